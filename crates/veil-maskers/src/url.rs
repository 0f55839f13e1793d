//! URL masker

use once_cell::sync::Lazy;
use regex::Regex;
use veil_core::{MaskOptions, Result, apply_format, apply_strategy};

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(https?://[^\s/?#]+)([^\s]*)$").expect("url regex"));

/// Mask a URL. Scheme and host stay readable; the strategy runs over the
/// path, query, and fragment.
pub fn mask(value: &str, options: &MaskOptions) -> Result<String> {
    let Some(captures) = URL_RE.captures(value) else {
        return Err(crate::invalid("url", value));
    };

    let origin = &captures[1];
    let rest = &captures[2];
    if rest.is_empty() {
        return Ok(apply_format(value, "url", options.format));
    }

    let masked = apply_strategy(rest, &options.strategy, options.mask_char);
    Ok(apply_format(&format!("{origin}{masked}"), "url", options.format))
}
