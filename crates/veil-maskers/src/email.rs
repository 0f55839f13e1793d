//! Email masker

use once_cell::sync::Lazy;
use regex::Regex;
use veil_core::{MaskOptions, Result, apply_format, apply_strategy};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email regex")
});

/// Mask the local part of an email address, leaving the domain readable.
pub fn mask(value: &str, options: &MaskOptions) -> Result<String> {
    if !EMAIL_RE.is_match(value) {
        return Err(crate::invalid("email", value));
    }

    // Validated above, the '@' is present.
    let (local, domain) = value.split_once('@').unwrap_or((value, ""));
    let masked_local = apply_strategy(local, &options.strategy, options.mask_char);
    let masked = format!("{masked_local}@{domain}");
    Ok(apply_format(&masked, "email", options.format))
}
