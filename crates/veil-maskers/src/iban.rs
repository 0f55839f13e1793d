//! IBAN masker

use once_cell::sync::Lazy;
use regex::Regex;
use veil_core::{MaskOptions, Result, apply_format, apply_strategy};

// Two-letter country code, two check digits, 11-30 alphanumerics.
static IBAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Za-z0-9]{11,30}$").expect("iban regex"));

/// Mask an IBAN. Spaces are stripped before validation; the strategy runs
/// over the compact form and the display format regroups it in blocks of
/// four.
pub fn mask(value: &str, options: &MaskOptions) -> Result<String> {
    let compact: String = value.chars().filter(|c| *c != ' ').collect();
    if !IBAN_RE.is_match(&compact) {
        return Err(crate::invalid("iban", value));
    }

    let masked = apply_strategy(&compact, &options.strategy, options.mask_char);
    Ok(apply_format(&masked, "iban", options.format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_core::{Format, Strategy};

    const IBAN: &str = "DE44500105175407324931";

    #[test]
    fn masks_and_regroups_for_display() {
        let opts = MaskOptions::default().with_strategy(Strategy::First(4));
        assert_eq!(mask(IBAN, &opts).unwrap(), "DE44 **** **** **** **** **");
    }

    #[test]
    fn accepts_spaced_input() {
        let opts = MaskOptions::default()
            .with_strategy(Strategy::First(4))
            .with_format(Format::Compact);
        assert_eq!(
            mask("DE44 5001 0517 5407 3249 31", &opts).unwrap(),
            "DE44******************"
        );
    }

    #[test]
    fn rejects_bad_shapes() {
        for value in ["", "DE445001", "4450010517540732493111", "de44500105175407324931"] {
            let err = mask(value, &MaskOptions::default()).unwrap_err();
            assert_eq!(err.code(), "invalid_value", "value {value:?}");
        }
    }
}
