//! Language label to ElevenLabs voice id mapping.

/// Supported language labels and the voice each one renders with.
///
/// Labels are stored in canonical form (trimmed, lowercase). A label not in
/// this table is an unsupported language, never a silent fallback voice.
static VOICE_MAP: &[(&str, &str)] = &[
    ("espagnol", "l1zE9xgNpUTaQCZzpNJa"),
    ("français", "1a3lMdKLUcfcMtvN772u"),
    ("anglais", "7tRwuZTD1EWi6nydVerp"),
    ("italien", "HuK8QKF35exsCh2e7fLT"),
];

/// Normalize a caller-supplied language label to canonical form.
pub fn normalize_language(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Resolve a language label to its voice id.
///
/// Lookup is case- and whitespace-insensitive. Returns `None` for labels
/// with no registered voice.
pub fn resolve_voice(label: &str) -> Option<&'static str> {
    let clean = normalize_language(label);
    VOICE_MAP
        .iter()
        .find(|(language, _)| *language == clean)
        .map(|(_, voice_id)| *voice_id)
}
