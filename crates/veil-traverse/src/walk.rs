//! Structure-preserving tree walk

use crate::fields::FieldMap;
use serde_json::Value;
use veil_core::{Format, MaskOptions, Result, Strategy};
use veil_kernel::Kernel;

/// Recursion ceiling for one traversal call. Owned `serde_json::Value`
/// trees cannot be cyclic, so this only guards pathological nesting; the
/// walk stops descending silently once it is reached.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Options for one [`traverse`] call.
#[derive(Debug, Clone)]
pub struct TraverseOptions {
    /// Which paths get masked, and with which masker type.
    pub fields: FieldMap,
    /// Recurse into containers that did not match a field path.
    pub deep: bool,
    /// Mask string elements of an array whose path matched.
    pub mask_arrays: bool,
    /// Strategy override applied to every masked leaf.
    pub strategy: Option<Strategy>,
    /// Format override applied to every masked leaf.
    pub format: Option<Format>,
    /// Mask glyph override.
    pub mask_char: Option<char>,
    pub max_depth: usize,
}

impl TraverseOptions {
    pub fn new(fields: FieldMap) -> Self {
        Self {
            fields,
            deep: true,
            mask_arrays: true,
            strategy: None,
            format: None,
            mask_char: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    fn mask_options(&self) -> MaskOptions {
        let mut opts = MaskOptions::default();
        if let Some(strategy) = self.strategy {
            opts.strategy = strategy;
        }
        if let Some(format) = self.format {
            opts.format = format;
        }
        if let Some(mask_char) = self.mask_char {
            opts.mask_char = mask_char;
        }
        opts
    }
}

/// Walk `tree`, masking every leaf string whose path matches the field
/// mapping, and return the same-shaped tree.
///
/// Array elements inherit the array's path, so a mapping for `a.b` also
/// covers the strings of an array at `a.b` and the `b` keys of objects
/// inside an array at `a`. A masking failure at any leaf aborts the whole
/// traversal; no partial result is returned.
pub fn traverse(kernel: &Kernel, tree: &Value, options: &TraverseOptions) -> Result<Value> {
    let mask_opts = options.mask_options();
    walk(kernel, tree, "", options, &mask_opts, 0)
}

fn walk(
    kernel: &Kernel,
    value: &Value,
    path: &str,
    options: &TraverseOptions,
    mask_opts: &MaskOptions,
    depth: usize,
) -> Result<Value> {
    if depth > options.max_depth {
        tracing::warn!(path, depth, "max traversal depth reached, leaving subtree unmasked");
        return Ok(value.clone());
    }

    match value {
        Value::Object(entries) => {
            let mut out = serde_json::Map::with_capacity(entries.len());
            for (key, child) in entries {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                out.insert(
                    key.clone(),
                    mask_node(kernel, child, &child_path, options, mask_opts, depth)?,
                );
            }
            Ok(Value::Object(out))
        }
        Value::Array(items) => items
            .iter()
            .map(|item| walk(kernel, item, path, options, mask_opts, depth + 1))
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        other => Ok(other.clone()),
    }
}

fn mask_node(
    kernel: &Kernel,
    child: &Value,
    child_path: &str,
    options: &TraverseOptions,
    mask_opts: &MaskOptions,
    depth: usize,
) -> Result<Value> {
    if let Some(mask_type) = options.fields.resolve(child_path) {
        match child {
            Value::String(s) => {
                return kernel.execute_mask(mask_type, s, mask_opts).map(Value::String);
            }
            Value::Array(items) if options.mask_arrays => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    let masked = match item {
                        Value::String(s) => {
                            Value::String(kernel.execute_mask(mask_type, s, mask_opts)?)
                        }
                        other if options.deep => {
                            walk(kernel, other, child_path, options, mask_opts, depth + 1)?
                        }
                        other => other.clone(),
                    };
                    out.push(masked);
                }
                return Ok(Value::Array(out));
            }
            _ => {}
        }
    }

    match child {
        Value::Object(_) | Value::Array(_) if options.deep => {
            walk(kernel, child, child_path, options, mask_opts, depth + 1)
        }
        other => Ok(other.clone()),
    }
}
