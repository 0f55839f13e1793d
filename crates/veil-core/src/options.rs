//! Masking options: strategy, format, and mask glyph

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default glyph used to replace masked characters.
pub const DEFAULT_MASK_CHAR: char = '*';

/// Visibility rule deciding which characters of a value stay readable.
///
/// Parsed from the wire grammar `full`, `middle`, `first:N`, `last:N`,
/// `partial:R` (R a fraction in `[0, 1]`). [`FromStr`] is the validation
/// predicate: anything outside that grammar is [`Error::InvalidStrategy`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Strategy {
    /// Mask every character.
    Full,
    /// Keep the first and last character, mask everything between.
    Middle,
    /// Keep the first N characters.
    First(usize),
    /// Keep the last N characters.
    Last(usize),
    /// Keep `floor(len * ratio)` characters from the start.
    Partial(f64),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Middle
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidStrategy {
            strategy: s.to_string(),
        };

        match s {
            "full" => return Ok(Strategy::Full),
            "middle" => return Ok(Strategy::Middle),
            _ => {}
        }

        if let Some(n) = s.strip_prefix("first:") {
            return n.parse().map(Strategy::First).map_err(|_| invalid());
        }
        if let Some(n) = s.strip_prefix("last:") {
            return n.parse().map(Strategy::Last).map_err(|_| invalid());
        }
        if let Some(r) = s.strip_prefix("partial:") {
            let ratio: f64 = r.parse().map_err(|_| invalid())?;
            if !ratio.is_finite() || !(0.0..=1.0).contains(&ratio) {
                return Err(invalid());
            }
            return Ok(Strategy::Partial(ratio));
        }

        Err(invalid())
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Full => write!(f, "full"),
            Strategy::Middle => write!(f, "middle"),
            Strategy::First(n) => write!(f, "first:{n}"),
            Strategy::Last(n) => write!(f, "last:{n}"),
            Strategy::Partial(r) => write!(f, "partial:{r}"),
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Strategy> for String {
    fn from(strategy: Strategy) -> Self {
        strategy.to_string()
    }
}

impl Strategy {
    /// Whether `s` belongs to the strategy grammar.
    pub fn is_valid(s: &str) -> bool {
        s.parse::<Strategy>().is_ok()
    }
}

/// Rendering mode for an already-masked value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Type-aware re-spacing for human consumption.
    #[default]
    Display,
    /// All whitespace stripped.
    Compact,
    /// Fixed `[REDACTED:<type>]` placeholder; leaks neither length nor shape.
    Log,
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "display" => Ok(Format::Display),
            "compact" => Ok(Format::Compact),
            "log" => Ok(Format::Log),
            _ => Err(Error::InvalidFormat {
                format: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Display => write!(f, "display"),
            Format::Compact => write!(f, "compact"),
            Format::Log => write!(f, "log"),
        }
    }
}

/// Per-call masking options. Never mutated by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskOptions {
    pub strategy: Strategy,
    pub format: Format,
    pub mask_char: char,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            format: Format::default(),
            mask_char: DEFAULT_MASK_CHAR,
        }
    }
}

impl MaskOptions {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }
}
