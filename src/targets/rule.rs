//! Field rewrite rules.
//!
//! A rule locates one version-bearing field in a file. The search key is the
//! bare old base (`X.Y.Z`); an optional prerelease suffix after it is consumed
//! and discarded, so `0.39.0-rc.2` is matched by the key `0.39.0`. Everything
//! around the version token is captured and written back unchanged.

use regex::{Captures, Regex};

use crate::error::Result;

/// How a field's value is written in its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStyle {
    /// `key: 1.2.3  # comment`
    YamlBare,
    /// `key: "v1.2.3"  # comment`
    YamlQuoted,
    /// `"key": "1.2.3"`
    JsonQuoted,
}

/// A single version field inside a target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub key: &'static str,
    pub style: FieldStyle,
    /// Whether the new value is written with a leading `v`.
    pub v_prefix: bool,
}

impl FieldRule {
    /// `version: X.Y.Z`
    pub const fn yaml_bare(key: &'static str) -> Self {
        FieldRule {
            key,
            style: FieldStyle::YamlBare,
            v_prefix: false,
        }
    }

    /// `key: "vX.Y.Z"`
    pub const fn yaml_tag(key: &'static str) -> Self {
        FieldRule {
            key,
            style: FieldStyle::YamlQuoted,
            v_prefix: true,
        }
    }

    /// `"key": "X.Y.Z"`
    pub const fn json(key: &'static str) -> Self {
        FieldRule {
            key,
            style: FieldStyle::JsonQuoted,
            v_prefix: false,
        }
    }

    /// Builds the search pattern for `old_base`.
    ///
    /// Group 1 is everything before the version token, group 2 everything
    /// after the (discarded) suffix.
    pub fn pattern(&self, old_base: &str) -> Result<Regex> {
        let key = regex::escape(self.key);
        let old = regex::escape(old_base);
        let source = match self.style {
            FieldStyle::YamlBare => {
                format!(r"(?m)^(\s*{key}:\s*)v?{old}(?:-[^\s#]*)?(\s*(?:#.*)?)$")
            }
            FieldStyle::YamlQuoted => {
                format!(r#"(?m)^(\s*{key}:\s*")v?{old}(?:-[^"]*)?("[\s#]*(?:#.*)?)$"#)
            }
            FieldStyle::JsonQuoted => {
                format!(r#"("{key}"\s*:\s*")v?{old}(?:-[^"]*)?(")"#)
            }
        };
        Ok(Regex::new(&source)?)
    }

    /// Replaces the first occurrence of this field's old value in `text`.
    ///
    /// Returns `None` when the field does not hold `old_base`.
    pub fn apply(&self, text: &str, old_base: &str, new_version: &str) -> Result<Option<String>> {
        let pattern = self.pattern(old_base)?;
        if !pattern.is_match(text) {
            return Ok(None);
        }
        let prefix = if self.v_prefix { "v" } else { "" };
        let replaced = pattern.replacen(text, 1, |caps: &Captures| {
            format!("{}{}{}{}", &caps[1], prefix, new_version, &caps[2])
        });
        Ok(Some(replaced.into_owned()))
    }
}
