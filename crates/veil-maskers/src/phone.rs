//! Phone number masker

use veil_core::{MaskOptions, Result, apply_format, apply_strategy};

fn valid(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    for (i, c) in value.chars().enumerate() {
        let separator = matches!(c, ' ' | '-' | '.' | '(' | ')');
        let plus = c == '+' && i == 0;
        if !c.is_ascii_digit() && !separator && !plus {
            return false;
        }
    }

    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !(10..=15).contains(&digits) {
        return false;
    }
    // Eleven digits without a '+' is US/Canada with its country code spelled
    // out, which must be 1.
    if digits == 11 && !value.starts_with('+') && !value.trim_start_matches('(').starts_with('1') {
        return false;
    }
    true
}

/// Mask the digits of a phone number. Separators are dropped; when the
/// number carries a `+`, the country code stays readable and the strategy
/// runs over the national digits only, so the display format can regroup
/// the result.
pub fn mask(value: &str, options: &MaskOptions) -> Result<String> {
    if !valid(value) {
        return Err(crate::invalid("phone", value));
    }

    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    let (prefix, national) = if value.starts_with('+') {
        let cc_len = digits.len().saturating_sub(10).min(4);
        (format!("+{}", &digits[..cc_len]), &digits[cc_len..])
    } else {
        (String::new(), digits.as_str())
    };

    let masked = apply_strategy(national, &options.strategy, options.mask_char);
    Ok(apply_format(&format!("{prefix}{masked}"), "phone", options.format))
}
