//! US Social Security number masker

use once_cell::sync::Lazy;
use regex::Regex;
use veil_core::{MaskOptions, Result, apply_format, apply_strategy};

static SSN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-?\d{2}-?\d{4}$").expect("ssn regex"));

fn valid(value: &str) -> bool {
    if !SSN_RE.is_match(value) {
        return false;
    }
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();

    // Area 000, 666, and 9xx are never issued; group 00 and serial 0000 are
    // invalid.
    !(digits.starts_with("000")
        || digits.starts_with("666")
        || digits.starts_with('9')
        || &digits[3..5] == "00"
        || &digits[5..9] == "0000")
}

/// Mask an SSN. The strategy runs over the value as written, separators
/// included.
pub fn mask(value: &str, options: &MaskOptions) -> Result<String> {
    if !valid(value) {
        return Err(crate::invalid("ssn", value));
    }

    let masked = apply_strategy(value, &options.strategy, options.mask_char);
    Ok(apply_format(&masked, "ssn", options.format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_core::Strategy;

    #[test]
    fn masks_with_separators_in_place() {
        let opts = MaskOptions::default().with_strategy(Strategy::Last(4));
        assert_eq!(mask("123-45-6789", &opts).unwrap(), "*******6789");
    }

    #[test]
    fn masks_compact_form() {
        let opts = MaskOptions::default().with_strategy(Strategy::Full);
        assert_eq!(mask("123456789", &opts).unwrap(), "*********");
    }

    #[test]
    fn rejects_unissued_ranges() {
        for value in ["000-12-3456", "666-12-3456", "912-34-5678", "123-00-4567", "123-45-0000"] {
            let err = mask(value, &MaskOptions::default()).unwrap_err();
            assert_eq!(err.code(), "invalid_value", "value {value:?}");
        }
    }

    #[test]
    fn rejects_bad_shapes() {
        for value in ["", "12-345-6789", "1234567890", "123 45 6789"] {
            assert!(mask(value, &MaskOptions::default()).is_err(), "value {value:?}");
        }
    }
}
