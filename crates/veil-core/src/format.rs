//! Format engine: renders an already-masked value for a consumption context

use crate::options::Format;

/// Render `value` (already masked) for the target `format`.
///
/// `mask_type` is the declared type tag of the value (`"card"`, `"phone"`,
/// `"iban"`, ...); only the `Display` format is type-aware.
pub fn apply_format(value: &str, mask_type: &str, format: Format) -> String {
    match format {
        Format::Display => match mask_type {
            "card" | "iban" => group_in_blocks(value, 4),
            "phone" => format_phone(value),
            _ => value.to_string(),
        },
        Format::Compact => value.chars().filter(|c| !c.is_whitespace()).collect(),
        Format::Log => format!("[REDACTED:{mask_type}]"),
    }
}

/// Insert a space every `block` characters.
fn group_in_blocks(value: &str, block: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    chars
        .chunks(block)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Phone display rendering.
///
/// `+CC XXX XXX XXXX` when the value carries a 1-4 digit country code and
/// at least ten characters after it; `(XXX) XXX-XXXX` for a plain ten
/// character run; anything else passes through unchanged. Masked glyphs are
/// grouped like the digits they replaced.
fn format_phone(value: &str) -> String {
    if let Some(rest) = value.strip_prefix('+') {
        let cc_len = rest
            .chars()
            .take(4)
            .take_while(|c| c.is_ascii_digit())
            .count();
        let national: Vec<char> = rest.chars().skip(cc_len).collect();
        if cc_len >= 1 && national.len() >= 10 {
            let cc = &rest[..cc_len];
            let area: String = national[..3].iter().collect();
            let exchange: String = national[3..6].iter().collect();
            let line: String = national[6..].iter().collect();
            return format!("+{cc} {area} {exchange} {line}");
        }
    }

    let chars: Vec<char> = value.chars().collect();
    if chars.len() == 10 && !value.starts_with('+') {
        let area: String = chars[..3].iter().collect();
        let exchange: String = chars[3..6].iter().collect();
        let line: String = chars[6..].iter().collect();
        return format!("({area}) {exchange}-{line}");
    }

    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_spaces_cards_every_four() {
        assert_eq!(
            apply_format("************0366", "card", Format::Display),
            "**** **** **** 0366"
        );
    }

    #[test]
    fn display_groups_iban_in_fours() {
        assert_eq!(
            apply_format("DE44********3000", "iban", Format::Display),
            "DE44 **** **** 3000"
        );
    }

    #[test]
    fn display_leaves_other_types_alone() {
        assert_eq!(
            apply_format("j***.d**@example.com", "email", Format::Display),
            "j***.d**@example.com"
        );
    }

    #[test]
    fn display_phone_with_country_code() {
        assert_eq!(
            apply_format("+1**********", "phone", Format::Display),
            "+1 *** *** ****"
        );
        assert_eq!(
            apply_format("+44*********0", "phone", Format::Display),
            "+44 *** *** ***0"
        );
    }

    #[test]
    fn display_phone_plain_ten_digits() {
        assert_eq!(
            apply_format("******4567", "phone", Format::Display),
            "(***) ***-4567"
        );
    }

    #[test]
    fn display_phone_unrecognized_shape_unchanged() {
        assert_eq!(apply_format("**34", "phone", Format::Display), "**34");
        assert_eq!(apply_format("+", "phone", Format::Display), "+");
    }

    #[test]
    fn compact_strips_whitespace() {
        assert_eq!(
            apply_format("**** **** **** 0366", "card", Format::Compact),
            "************0366"
        );
        assert_eq!(apply_format(" a b\tc ", "email", Format::Compact), "abc");
    }

    #[test]
    fn log_is_a_fixed_placeholder() {
        assert_eq!(apply_format("whatever", "email", Format::Log), "[REDACTED:email]");
        assert_eq!(apply_format("", "ssn", Format::Log), "[REDACTED:ssn]");
        // Carries no information about the masked value's length.
        assert_eq!(
            apply_format("a", "jwt", Format::Log),
            apply_format(&"x".repeat(500), "jwt", Format::Log)
        );
    }
}
