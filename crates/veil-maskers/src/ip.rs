//! IP address masker

use std::net::IpAddr;
use veil_core::{MaskOptions, Result, apply_format, apply_strategy};

/// Mask an IPv4 or IPv6 address. Validation is delegated to the standard
/// library parser; the strategy runs over the textual form as-is.
pub fn mask(value: &str, options: &MaskOptions) -> Result<String> {
    if value.parse::<IpAddr>().is_err() {
        return Err(crate::invalid("ip", value));
    }

    let masked = apply_strategy(value, &options.strategy, options.mask_char);
    Ok(apply_format(&masked, "ip", options.format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_core::Strategy;

    #[test]
    fn masks_ipv4() {
        let opts = MaskOptions::default().with_strategy(Strategy::First(3));
        assert_eq!(mask("192.168.1.100", &opts).unwrap(), "192**********");
    }

    #[test]
    fn masks_ipv6() {
        let masked = mask("2001:db8::8a2e:370:7334", &MaskOptions::default()).unwrap();
        assert_eq!(masked, "2*********************4");
    }

    #[test]
    fn rejects_non_addresses() {
        for value in ["", "999.1.1.1", "192.168.1", "example.com", "2001:::1"] {
            let err = mask(value, &MaskOptions::default()).unwrap_err();
            assert_eq!(err.code(), "invalid_value", "value {value:?}");
        }
    }
}
