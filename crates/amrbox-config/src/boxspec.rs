//! Refinement-box specifications as written in a configuration.
//!
//! Front ends describe the boxes of a level in several shapes:
//!
//! - a map of named boxes: `{"B0": [lower, upper]}` or `{"B0": Box}`
//! - a list of boxes: `[Box, Box]`
//! - a list of corner pairs: `[[lower, upper], ...]`
//!
//! with 1-D corners allowed as bare integers. Levels are keyed by name
//! (`"L0"`) or by number (`0`). This module only records what was written,
//! as a tagged [`BoxSpec`] per box; turning specs into boxes and level keys
//! into [`LevelNumber`]s happens when the hierarchy is built.

use crate::error::ConfigError;
use crate::value::{ConfigValue, MapKey};
use amrbox_core::{Index, IndexVec, LevelNumber};
use amrbox_geom::{BoxError, IndexBox};
use std::fmt;

/// Level identifier as written in the configuration.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LevelKey {
    /// `"L<n>"`.
    Name(String),
    /// A bare integer.
    Number(i64),
}

impl LevelKey {
    /// Translate to a [`LevelNumber`].
    ///
    /// Names must be `L` followed by decimal digits; numbers must be
    /// non-negative and fit in `u32`.
    pub fn level_number(&self) -> Result<LevelNumber, ConfigError> {
        let parsed = match self {
            Self::Name(name) => name
                .strip_prefix('L')
                .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|digits| digits.parse::<u32>().ok()),
            Self::Number(n) => u32::try_from(*n).ok(),
        };
        parsed.map(LevelNumber).ok_or_else(|| {
            ConfigError::malformed(self, "level keys must be \"L<n>\" or a non-negative integer")
        })
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for LevelKey {
    fn from(v: &str) -> Self {
        Self::Name(v.to_string())
    }
}

impl From<String> for LevelKey {
    fn from(v: String) -> Self {
        Self::Name(v)
    }
}

impl From<i64> for LevelKey {
    fn from(v: i64) -> Self {
        Self::Number(v)
    }
}

impl From<i32> for LevelKey {
    fn from(v: i32) -> Self {
        Self::Number(i64::from(v))
    }
}

impl From<LevelNumber> for LevelKey {
    fn from(v: LevelNumber) -> Self {
        Self::Number(i64::from(v.0))
    }
}

/// One box as written: either an already-built box or raw corners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoxSpec {
    /// A constructed [`IndexBox`].
    Built(IndexBox),
    /// A `(lower, upper)` pair not yet checked.
    Corners {
        /// Lower corner.
        lower: IndexVec,
        /// Upper corner.
        upper: IndexVec,
    },
}

impl BoxSpec {
    /// Produce the canonical box.
    pub fn to_box(&self) -> Result<IndexBox, BoxError> {
        match self {
            Self::Built(b) => Ok(b.clone()),
            Self::Corners { lower, upper } => IndexBox::new(lower, upper),
        }
    }
}

/// A box spec together with its optional name (`"B0"`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoxEntry {
    /// Name given in a named-box map.
    pub name: Option<String>,
    /// The box itself.
    pub spec: BoxSpec,
}

/// All box specs under one level key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelSpec {
    /// Key as written.
    pub key: LevelKey,
    /// Boxes in the order written.
    pub boxes: Vec<BoxEntry>,
}

/// The `refinement_boxes` option: box specs for every level, in the order
/// the levels were written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RefinementBoxes {
    levels: Vec<LevelSpec>,
}

impl RefinementBoxes {
    /// No levels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a level of already-built boxes.
    ///
    /// # Examples
    ///
    /// ```
    /// use amrbox_config::RefinementBoxes;
    /// use amrbox_geom::IndexBox;
    ///
    /// let boxes = RefinementBoxes::new()
    ///     .with_level("L0", [IndexBox::span(5, 25).unwrap()])
    ///     .with_level("L1", [IndexBox::span(12, 48).unwrap()]);
    /// assert_eq!(boxes.len(), 2);
    /// ```
    pub fn with_level(
        mut self,
        key: impl Into<LevelKey>,
        boxes: impl IntoIterator<Item = IndexBox>,
    ) -> Self {
        self.levels.push(LevelSpec {
            key: key.into(),
            boxes: boxes
                .into_iter()
                .map(|b| BoxEntry {
                    name: None,
                    spec: BoxSpec::Built(b),
                })
                .collect(),
        });
        self
    }

    /// Append a fully specified level.
    pub fn push_level(&mut self, level: LevelSpec) {
        self.levels.push(level);
    }

    /// Levels in the order written.
    pub fn levels(&self) -> &[LevelSpec] {
        &self.levels
    }

    /// Number of levels.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether no levels are present.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Parse the `refinement_boxes` option.
    ///
    /// [`ConfigValue::None`] and an empty map both mean "no refinement" and
    /// yield `Ok(None)`.
    pub fn from_value(value: &ConfigValue) -> Result<Option<Self>, ConfigError> {
        let map = match value {
            ConfigValue::None => return Ok(None),
            ConfigValue::Map(map) => map,
            other => {
                return Err(ConfigError::invalid(
                    "refinement_boxes",
                    format!("expected a map of levels, got {}", other.type_name()),
                ))
            }
        };
        if map.is_empty() {
            return Ok(None);
        }
        let mut boxes = Self::new();
        for (key, level_value) in map {
            let key = match key {
                MapKey::Name(name) => LevelKey::Name(name.clone()),
                MapKey::Index(n) => LevelKey::Number(*n),
            };
            let entries = parse_level(&key, level_value)?;
            if entries.is_empty() {
                return Err(ConfigError::malformed(&key, "level has no boxes"));
            }
            boxes.push_level(LevelSpec {
                key,
                boxes: entries,
            });
        }
        Ok(Some(boxes))
    }
}

fn parse_level(key: &LevelKey, value: &ConfigValue) -> Result<Vec<BoxEntry>, ConfigError> {
    match value {
        ConfigValue::Map(named) => named
            .iter()
            .map(|(name, spec)| match name {
                MapKey::Name(name) => Ok(BoxEntry {
                    name: Some(name.clone()),
                    spec: parse_box(key, spec)?,
                }),
                MapKey::Index(i) => Err(ConfigError::malformed(
                    key,
                    format!("box names must be strings, got {i}"),
                )),
            })
            .collect(),
        ConfigValue::List(items) => items
            .iter()
            .map(|item| {
                Ok(BoxEntry {
                    name: None,
                    spec: parse_box(key, item)?,
                })
            })
            .collect(),
        ConfigValue::Box(b) => Ok(vec![BoxEntry {
            name: None,
            spec: BoxSpec::Built(b.clone()),
        }]),
        other => Err(ConfigError::malformed(
            key,
            format!("expected a map or list of boxes, got {}", other.type_name()),
        )),
    }
}

fn parse_box(key: &LevelKey, value: &ConfigValue) -> Result<BoxSpec, ConfigError> {
    match value {
        ConfigValue::Box(b) => Ok(BoxSpec::Built(b.clone())),
        ConfigValue::List(corners) if corners.len() == 2 => Ok(BoxSpec::Corners {
            lower: parse_corner(key, &corners[0])?,
            upper: parse_corner(key, &corners[1])?,
        }),
        ConfigValue::List(corners) => Err(ConfigError::malformed(
            key,
            format!("expected a (lower, upper) pair, got {} items", corners.len()),
        )),
        other => Err(ConfigError::malformed(
            key,
            format!("expected a box or (lower, upper) pair, got {}", other.type_name()),
        )),
    }
}

fn parse_corner(key: &LevelKey, value: &ConfigValue) -> Result<IndexVec, ConfigError> {
    match value {
        ConfigValue::Int(i) => Ok(IndexVec::from_slice(&[*i])),
        ConfigValue::List(items) if !items.is_empty() => items
            .iter()
            .map(|item| {
                item.as_int().ok_or_else(|| {
                    ConfigError::malformed(
                        key,
                        format!("box corners must hold integers, got {}", item.type_name()),
                    )
                })
            })
            .collect::<Result<IndexVec, _>>(),
        other => Err(ConfigError::malformed(
            key,
            format!("expected a box corner, got {}", other.type_name()),
        )),
    }
}

/// A level of 1-D `(lower, upper)` corner pairs, the way scripting front
/// ends usually write them.
pub fn corners_1d(pairs: &[(Index, Index)]) -> ConfigValue {
    ConfigValue::List(
        pairs
            .iter()
            .map(|&(lo, hi)| ConfigValue::from([[lo], [hi]]))
            .collect(),
    )
}
