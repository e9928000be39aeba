//! Trace and span id canonicalization

use super::model::Identifier;

/// Canonical string form of an id.
/// Raw bytes become lowercase hex; text ids are kept exactly as received.
pub fn canonicalize(id: &Identifier) -> String {
    match id {
        Identifier::Raw(bytes) => hex::encode(bytes),
        Identifier::Text(text) => text.clone(),
    }
}

/// Canonicalize an optional id. Absent or empty ids yield `None`.
pub fn canonicalize_opt(id: Option<&Identifier>) -> Option<String> {
    id.map(canonicalize).filter(|s| !s.is_empty())
}
