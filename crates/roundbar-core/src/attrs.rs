//! Construction-time attributes.
//!
//! An `AttributeSet` is what a host hands a widget after parsing markup: plain
//! string values keyed by attribute name. Typed accessors return `Ok(None)`
//! for absent keys so callers can fall back to their own defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AttrError, Color, Dp, Gravity, Orientation};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet {
    values: BTreeMap<String, String>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn float(&self, key: &str) -> Result<Option<f32>, AttrError> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<f32>()
            .map(Some)
            .map_err(|_| AttrError::InvalidNumber {
                key: key.to_string(),
                value: raw.to_string(),
            })
    }

    /// `"12dp"`, `"24px"` or a bare number (dp). dp values go through the
    /// current `Density` and are truncated to whole pixels.
    pub fn dimension(&self, key: &str) -> Result<Option<i32>, AttrError> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        let invalid = || AttrError::InvalidDimension {
            key: key.to_string(),
            value: raw.to_string(),
        };
        let s = raw.trim();
        let (number, is_px) = if let Some(n) = s.strip_suffix("px") {
            (n, true)
        } else if let Some(n) = s.strip_suffix("dp").or_else(|| s.strip_suffix("dip")) {
            (n, false)
        } else {
            (s, false)
        };
        let v: f32 = number.trim().parse().map_err(|_| invalid())?;
        if !v.is_finite() {
            return Err(invalid());
        }
        Ok(Some(if is_px { v as i32 } else { Dp(v).to_px_int() }))
    }

    pub fn color(&self, key: &str) -> Result<Option<Color>, AttrError> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        Color::parse_argb_hex(raw)
            .map(Some)
            .map_err(|source| AttrError::InvalidColor {
                key: key.to_string(),
                source,
            })
    }

    pub fn gravity(&self, key: &str) -> Result<Option<Gravity>, AttrError> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        Gravity::parse(raw)
            .map(Some)
            .map_err(|source| AttrError::UnknownGravity {
                key: key.to_string(),
                value: raw.to_string(),
                source,
            })
    }

    pub fn orientation(&self, key: &str) -> Result<Option<Orientation>, AttrError> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        match raw.trim() {
            "horizontal" => Ok(Some(Orientation::Horizontal)),
            "vertical" => Ok(Some(Orientation::Vertical)),
            _ => Err(AttrError::UnknownOrientation {
                key: key.to_string(),
                value: raw.to_string(),
            }),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}
