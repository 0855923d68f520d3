//! Display-string helpers for statuses and addresses.

/// Turns an upstream status label into sentence case.
///
/// `"in_assessment"` becomes `"In assessment"`; labels that are already
/// human-readable keep their words and only get sentence casing.
#[must_use]
pub fn humanize_status(status: &str) -> String {
    let spaced = status.trim().replace('_', " ").to_lowercase();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Title-cases an upper-case address line.
///
/// Words containing a digit (house numbers, postcode halves) are upper-cased
/// whole so `"se1 7qd"` reads `"SE1 7QD"`.
#[must_use]
pub fn capitalize_address(address: &str) -> String {
    address
        .split(' ')
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    if word.chars().any(|c| c.is_ascii_digit()) {
        return word.to_uppercase();
    }

    let mut out = String::with_capacity(word.len());
    let mut at_boundary = true;
    for c in word.chars() {
        if at_boundary {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_boundary = !c.is_alphabetic();
    }
    out
}
