//! Veil Core Types
//!
//! This crate provides the building blocks shared by the masking pipeline:
//! - Mask options (strategy, format, mask glyph)
//! - The strategy engine (which characters stay visible)
//! - The format engine (how a masked value is rendered)
//! - Core error types

pub mod error;
pub mod format;
pub mod options;
pub mod strategy;

pub use error::{Error, InitPhase, Result};
pub use format::apply_format;
pub use options::{Format, MaskOptions, Strategy, DEFAULT_MASK_CHAR};
pub use strategy::{apply_strategy, masked_count, visible_count};
