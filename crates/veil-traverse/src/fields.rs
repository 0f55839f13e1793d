//! Dot-path field mapping

use std::collections::HashMap;
use veil_core::{Error, Result};

/// Validated mapping from dot-separated paths to masker type names.
///
/// A path is a sequence of non-empty segments joined by `.`; the final
/// segment may be the wildcard `*`, which matches every direct child of the
/// prefix. Exact paths take precedence over wildcards.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    exact: HashMap<String, String>,
    // Keyed by the wildcard's prefix, i.e. `user.*` is stored under `user`.
    wildcard: HashMap<String, String>,
}

impl FieldMap {
    /// Build a field map, validating every path.
    pub fn new<I, P, T>(mappings: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<String>,
        T: Into<String>,
    {
        let mut map = FieldMap::default();
        for (path, mask_type) in mappings {
            map.insert(path.into(), mask_type.into())?;
        }
        Ok(map)
    }

    fn insert(&mut self, path: String, mask_type: String) -> Result<()> {
        let invalid = |reason: &str| Error::InvalidFieldPath {
            path: path.clone(),
            reason: reason.to_string(),
        };

        if path.is_empty() {
            return Err(invalid("path must not be empty"));
        }

        let segments: Vec<&str> = path.split('.').collect();
        for (i, segment) in segments.iter().enumerate() {
            if segment.is_empty() {
                return Err(invalid("empty path segment"));
            }
            let last = i == segments.len() - 1;
            if segment.contains('*') && (*segment != "*" || !last) {
                return Err(invalid("wildcard is only allowed as the final segment"));
            }
        }

        if segments.last() == Some(&"*") {
            if segments.len() < 2 {
                return Err(invalid("wildcard needs a prefix"));
            }
            let prefix = segments[..segments.len() - 1].join(".");
            self.wildcard.insert(prefix, mask_type);
        } else {
            self.exact.insert(path, mask_type);
        }
        Ok(())
    }

    /// Masker type for `path`, if any mapping matches. Exact matches win
    /// over wildcard matches.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        if let Some(mask_type) = self.exact.get(path) {
            return Some(mask_type);
        }
        let (prefix, _) = path.rsplit_once('.')?;
        self.wildcard.get(prefix).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.wildcard.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_paths_resolve() {
        let map = FieldMap::new([("user.email", "email"), ("card", "card")]).unwrap();
        assert_eq!(map.resolve("user.email"), Some("email"));
        assert_eq!(map.resolve("card"), Some("card"));
        assert_eq!(map.resolve("user.phone"), None);
        assert_eq!(map.resolve("email"), None);
    }

    #[test]
    fn wildcard_matches_direct_children() {
        let map = FieldMap::new([("user.contacts.*", "phone")]).unwrap();
        assert_eq!(map.resolve("user.contacts.home"), Some("phone"));
        assert_eq!(map.resolve("user.contacts.work"), Some("phone"));
        assert_eq!(map.resolve("user.contacts"), None);
        assert_eq!(map.resolve("user.contacts.home.extension"), None);
    }

    #[test]
    fn exact_wins_over_wildcard() {
        let map =
            FieldMap::new([("user.*", "phone"), ("user.email", "email")]).unwrap();
        assert_eq!(map.resolve("user.email"), Some("email"));
        assert_eq!(map.resolve("user.fax"), Some("phone"));
    }

    #[test]
    fn rejects_malformed_paths() {
        for path in ["", ".", "a..b", "a.", ".a", "*", "a.*.b", "a.b*", "*a.b"] {
            let err = FieldMap::new([(path, "email")]).unwrap_err();
            assert_eq!(err.code(), "invalid_field_path", "path {path:?}");
        }
    }

    #[test]
    fn top_level_path_never_matches_wildcard() {
        let map = FieldMap::new([("user.*", "email")]).unwrap();
        assert_eq!(map.resolve("user"), None);
    }
}
