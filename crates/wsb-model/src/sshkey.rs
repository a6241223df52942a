//! SSH public key text normalization.
//!
//! Chat clients wrap long key blobs across lines; pasting such a key
//! produces embedded newlines and per-line indentation that would break
//! the authorized-keys format. Normalization collapses the paste back
//! into the single line the key originally was.

/// Normalizes raw key text: trims every line and joins them into one.
///
/// Whitespace *within* a line is preserved, since the key type, blob and
/// comment are space-separated on purpose.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.lines().map(str::trim).collect::<Vec<_>>().concat()
}
