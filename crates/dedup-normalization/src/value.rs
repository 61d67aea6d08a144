//! Single-value normalization.

use dedup_model::FieldKind;

/// Spreadsheet placeholders that mean "no value" once lowercased.
const NULL_MARKERS: [&str; 3] = ["nan", "none", "nat"];

/// Trim, lowercase and collapse whitespace runs to one space.
///
/// Empty results and null placeholders become `None`.
///
/// # Examples
///
/// ```
/// use dedup_normalization::normalize_text;
///
/// assert_eq!(normalize_text("  Ana   RUIZ ").as_deref(), Some("ana ruiz"));
/// assert_eq!(normalize_text("NaN"), None);
/// assert_eq!(normalize_text("   "), None);
/// ```
pub fn normalize_text(raw: &str) -> Option<String> {
    let collapsed = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if collapsed.is_empty() || NULL_MARKERS.contains(&collapsed.as_str()) {
        None
    } else {
        Some(collapsed)
    }
}

/// Keep ASCII digits only.
///
/// No country-code or leading-zero handling: `+34 600` and `0034600` stay
/// different numbers.
///
/// Non-ASCII decimal digits (Arabic-Indic, fullwidth) are dropped, so a
/// number written only in such digits normalizes to `None`.
///
/// # Examples
///
/// ```
/// use dedup_normalization::normalize_phone;
///
/// assert_eq!(normalize_phone("(555) 123-4567").as_deref(), Some("5551234567"));
/// assert_eq!(normalize_phone("n/a"), None);
/// assert_eq!(normalize_phone("٣٤٥"), None);
/// ```
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() { None } else { Some(digits) }
}

/// Normalize a raw value according to its field kind.
pub fn normalize_value(kind: FieldKind, raw: &str) -> Option<String> {
    match kind {
        FieldKind::Text => normalize_text(raw),
        FieldKind::Phone => normalize_phone(raw),
    }
}
