//! Veil Built-in Maskers
//!
//! Domain maskers for common sensitive data types, packaged as a plugin:
//! email, phone, credit card, IBAN, IP address, JWT, SSN, and URL. Each
//! masker validates its input, applies the caller's visibility strategy to
//! the sensitive portion, and renders through the format engine.

pub mod card;
pub mod email;
pub mod iban;
pub mod ip;
pub mod jwt;
pub mod phone;
pub mod ssn;
pub mod url;

use serde_json::Value;
use std::sync::Arc;
use veil_core::{Error, Result};
use veil_kernel::{Kernel, Plugin};

/// Plugin installing the built-in maskers.
///
/// Masker types registered: `email`, `phone`, `card`, `iban`, `ip`, `jwt`,
/// `ssn`, `url`.
pub struct StandardMaskersPlugin;

#[async_trait::async_trait]
impl Plugin for StandardMaskersPlugin {
    fn name(&self) -> &str {
        "standard-maskers"
    }

    fn version(&self) -> &str {
        env!("CARGO_PKG_VERSION")
    }

    fn install(&self, kernel: &Kernel) -> Result<()> {
        kernel.register_masker("email", email::mask)?;
        kernel.register_masker("phone", phone::mask)?;
        kernel.register_masker("card", card::mask)?;
        kernel.register_masker("iban", iban::mask)?;
        kernel.register_masker("ip", ip::mask)?;
        kernel.register_masker("jwt", jwt::mask)?;
        kernel.register_masker("ssn", ssn::mask)?;
        kernel.register_masker("url", url::mask)?;
        Ok(())
    }
}

/// Build a kernel with the built-in maskers installed.
///
/// Each call returns a fresh, independently-owned pipeline; there is no
/// shared default instance.
pub fn standard_kernel() -> Result<Arc<Kernel>> {
    let kernel = Kernel::new();
    kernel.register_plugin(Arc::new(StandardMaskersPlugin))?;
    Ok(kernel)
}

/// Rejection for a value that failed a masker's own validation.
fn invalid(mask_type: &str, value: &str) -> Error {
    Error::InvalidValue {
        mask_type: mask_type.to_string(),
        value: Value::String(value.to_string()),
    }
}
