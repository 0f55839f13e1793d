//! Payment card masker

use veil_core::{MaskOptions, Result, apply_format, apply_strategy};

/// Luhn checksum over a digit string.
fn luhn_valid(digits: &str) -> bool {
    let mut sum = 0u32;
    let mut double = false;
    for c in digits.chars().rev() {
        let Some(d) = c.to_digit(10) else {
            return false;
        };
        let d = if double {
            let doubled = d * 2;
            if doubled > 9 { doubled - 9 } else { doubled }
        } else {
            d
        };
        sum += d;
        double = !double;
    }
    sum % 10 == 0
}

/// Mask a card number. Spaces and dashes are stripped before validation
/// (13-19 digits, Luhn); the strategy runs over the bare digit string and
/// the display format regroups it in blocks of four.
pub fn mask(value: &str, options: &MaskOptions) -> Result<String> {
    let digits: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-'))
        .collect();
    if digits.is_empty()
        || !digits.chars().all(|c| c.is_ascii_digit())
        || !(13..=19).contains(&digits.len())
        || !luhn_valid(&digits)
    {
        return Err(crate::invalid("card", value));
    }

    let masked = apply_strategy(&digits, &options.strategy, options.mask_char);
    Ok(apply_format(&masked, "card", options.format))
}
