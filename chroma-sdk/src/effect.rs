//! Keyboard effect model
//!
//! [`KeyboardEffect`] is the typed form handed to the SDK session. Its variants
//! carry exactly the parameters their effect type needs, so a typed effect can
//! never pair a tag with the wrong parameter set.
//!
//! [`EffectDescription`] is the loose form used by effect files and the CLI: a
//! type tag plus optional parameters. Converting it into a [`KeyboardEffect`]
//! rejects missing parameters as well as parameters the tag does not use.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::RgbColor;
use crate::error::ChromaError;

/// Number of rows in the keyboard LED matrix
pub const MAX_ROW: usize = 6;

/// Number of columns in the keyboard LED matrix
pub const MAX_COLUMN: usize = 22;

/// Effect type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    None,
    Breathing,
    Custom,
    Reactive,
    Static,
    SpectrumCycling,
    Wave,
    CustomKey,
}

impl EffectKind {
    /// All effect kinds, in SDK order
    pub const ALL: &'static [EffectKind] = &[
        EffectKind::None,
        EffectKind::Breathing,
        EffectKind::Custom,
        EffectKind::Reactive,
        EffectKind::Static,
        EffectKind::SpectrumCycling,
        EffectKind::Wave,
        EffectKind::CustomKey,
    ];

    /// Get the name used in effect files and error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Breathing => "breathing",
            Self::Custom => "custom",
            Self::Reactive => "reactive",
            Self::Static => "static",
            Self::SpectrumCycling => "spectrum_cycling",
            Self::Wave => "wave",
            Self::CustomKey => "custom_key",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction of the wave effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveDirection {
    LeftToRight,
    RightToLeft,
}

impl FromStr for WaveDirection {
    type Err = ChromaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "left_to_right" | "ltr" => Ok(Self::LeftToRight),
            "right_to_left" | "rtl" => Ok(Self::RightToLeft),
            _ => Err(ChromaError::invalid(
                "wave",
                format!("unknown direction '{s}' (expected ltr or rtl)"),
            )),
        }
    }
}

/// How long a key stays lit after being pressed (reactive effect)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactiveDuration {
    Short,
    Medium,
    Long,
}

impl FromStr for ReactiveDuration {
    type Err = ChromaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(ChromaError::invalid(
                "reactive",
                format!("unknown duration '{s}' (expected short, medium or long)"),
            )),
        }
    }
}

/// Breathing effect variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breathing {
    /// Alternate between two colors
    TwoColors { first: RgbColor, second: RgbColor },
    /// Breathe through random colors
    Random,
}

/// Full-keyboard color grid, `MAX_ROW` x `MAX_COLUMN`
#[derive(Clone, PartialEq, Eq)]
pub struct KeyGrid(Box<[[RgbColor; MAX_COLUMN]; MAX_ROW]>);

impl KeyGrid {
    /// Grid with every key set to `color`
    pub fn filled(color: RgbColor) -> Self {
        Self(Box::new([[color; MAX_COLUMN]; MAX_ROW]))
    }

    /// Build a grid from row vectors
    ///
    /// Fails unless there are exactly `MAX_ROW` rows of `MAX_COLUMN` colors.
    pub fn from_rows(effect: EffectKind, rows: &[Vec<RgbColor>]) -> Result<Self, ChromaError> {
        if rows.len() != MAX_ROW {
            return Err(ChromaError::invalid(
                effect.name(),
                format!("grid has {} rows, expected {MAX_ROW}", rows.len()),
            ));
        }
        let mut grid = Self::filled(RgbColor::BLACK);
        for (row, colors) in rows.iter().enumerate() {
            if colors.len() != MAX_COLUMN {
                return Err(ChromaError::invalid(
                    effect.name(),
                    format!(
                        "grid row {row} has {} columns, expected {MAX_COLUMN}",
                        colors.len()
                    ),
                ));
            }
            grid.0[row].copy_from_slice(colors);
        }
        Ok(grid)
    }

    /// Get the color at a position
    pub fn get(&self, row: usize, column: usize) -> Option<RgbColor> {
        self.0.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Set the color at a position, returning false if out of range
    pub fn set(&mut self, row: usize, column: usize, color: RgbColor) -> bool {
        match self.0.get_mut(row).and_then(|r| r.get_mut(column)) {
            Some(slot) => {
                *slot = color;
                true
            }
            None => false,
        }
    }

    /// Iterate over the rows
    pub fn rows(&self) -> impl Iterator<Item = &[RgbColor; MAX_COLUMN]> {
        self.0.iter()
    }
}

impl Default for KeyGrid {
    fn default() -> Self {
        Self::filled(RgbColor::BLACK)
    }
}

impl fmt::Debug for KeyGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Single-key color drawn on top of a custom-key base grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyOverride {
    pub row: usize,
    pub column: usize,
    pub color: RgbColor,
}

/// Keyboard lighting effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyboardEffect {
    /// No effect (lighting off)
    None,
    Breathing(Breathing),
    /// Per-LED colors for the whole matrix
    Custom(KeyGrid),
    Reactive {
        duration: ReactiveDuration,
        color: RgbColor,
    },
    Static {
        color: RgbColor,
    },
    SpectrumCycling,
    Wave {
        direction: WaveDirection,
    },
    /// Base grid with individual key overrides
    CustomKey {
        base: KeyGrid,
        keys: Vec<KeyOverride>,
    },
}

impl KeyboardEffect {
    /// Get the type tag for this effect
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::None => EffectKind::None,
            Self::Breathing(_) => EffectKind::Breathing,
            Self::Custom(_) => EffectKind::Custom,
            Self::Reactive { .. } => EffectKind::Reactive,
            Self::Static { .. } => EffectKind::Static,
            Self::SpectrumCycling => EffectKind::SpectrumCycling,
            Self::Wave { .. } => EffectKind::Wave,
            Self::CustomKey { .. } => EffectKind::CustomKey,
        }
    }
}

/// Loosely-typed effect description, as found in effect files
///
/// ```toml
/// type = "breathing"
/// color = "#FF0000"
/// second_color = "#0000FF"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EffectDescription {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<RgbColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_color: Option<RgbColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<WaveDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<ReactiveDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Vec<Vec<RgbColor>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<KeyOverride>>,
}

impl EffectDescription {
    /// Description with only a type tag
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            color: None,
            second_color: None,
            direction: None,
            duration: None,
            grid: None,
            keys: None,
        }
    }

    /// Names of the parameters that are present
    fn present(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.color.is_some() {
            names.push("color");
        }
        if self.second_color.is_some() {
            names.push("second_color");
        }
        if self.direction.is_some() {
            names.push("direction");
        }
        if self.duration.is_some() {
            names.push("duration");
        }
        if self.grid.is_some() {
            names.push("grid");
        }
        if self.keys.is_some() {
            names.push("keys");
        }
        names
    }

    /// Reject any present parameter not in `allowed`
    fn only(&self, allowed: &[&str]) -> Result<(), ChromaError> {
        let extra: Vec<_> = self
            .present()
            .into_iter()
            .filter(|p| !allowed.contains(p))
            .collect();
        if extra.is_empty() {
            Ok(())
        } else {
            Err(ChromaError::invalid(
                self.kind.name(),
                format!("unexpected parameter(s): {}", extra.join(", ")),
            ))
        }
    }
}

impl From<&KeyboardEffect> for EffectDescription {
    fn from(effect: &KeyboardEffect) -> Self {
        let mut desc = Self::new(effect.kind());
        match effect {
            KeyboardEffect::None | KeyboardEffect::SpectrumCycling => {}
            KeyboardEffect::Breathing(Breathing::TwoColors { first, second }) => {
                desc.color = Some(*first);
                desc.second_color = Some(*second);
            }
            KeyboardEffect::Breathing(Breathing::Random) => {}
            KeyboardEffect::Custom(grid) => {
                desc.grid = Some(grid.rows().map(|r| r.to_vec()).collect());
            }
            KeyboardEffect::Reactive { duration, color } => {
                desc.duration = Some(*duration);
                desc.color = Some(*color);
            }
            KeyboardEffect::Static { color } => desc.color = Some(*color),
            KeyboardEffect::Wave { direction } => desc.direction = Some(*direction),
            KeyboardEffect::CustomKey { base, keys } => {
                desc.grid = Some(base.rows().map(|r| r.to_vec()).collect());
                desc.keys = Some(keys.clone());
            }
        }
        desc
    }
}

impl TryFrom<EffectDescription> for KeyboardEffect {
    type Error = ChromaError;

    fn try_from(desc: EffectDescription) -> Result<Self, Self::Error> {
        let kind = desc.kind;
        match kind {
            EffectKind::None => {
                desc.only(&[])?;
                Ok(Self::None)
            }
            EffectKind::SpectrumCycling => {
                desc.only(&[])?;
                Ok(Self::SpectrumCycling)
            }
            EffectKind::Static => {
                desc.only(&["color"])?;
                Ok(Self::Static {
                    color: desc.color.ok_or_else(|| missing(kind, "color"))?,
                })
            }
            EffectKind::Breathing => {
                desc.only(&["color", "second_color"])?;
                // Random breathing takes no colors; two-color breathing needs both
                match (desc.color, desc.second_color) {
                    (None, None) => Ok(Self::Breathing(Breathing::Random)),
                    (Some(first), Some(second)) => {
                        Ok(Self::Breathing(Breathing::TwoColors { first, second }))
                    }
                    (Some(_), None) => Err(missing(kind, "second_color")),
                    (None, Some(_)) => Err(missing(kind, "color")),
                }
            }
            EffectKind::Reactive => {
                desc.only(&["color", "duration"])?;
                Ok(Self::Reactive {
                    duration: desc.duration.ok_or_else(|| missing(kind, "duration"))?,
                    color: desc.color.ok_or_else(|| missing(kind, "color"))?,
                })
            }
            EffectKind::Wave => {
                desc.only(&["direction"])?;
                Ok(Self::Wave {
                    direction: desc.direction.ok_or_else(|| missing(kind, "direction"))?,
                })
            }
            EffectKind::Custom => {
                desc.only(&["grid"])?;
                let rows = desc
                    .grid
                    .as_deref()
                    .ok_or_else(|| missing(kind, "grid"))?;
                Ok(Self::Custom(KeyGrid::from_rows(kind, rows)?))
            }
            EffectKind::CustomKey => {
                desc.only(&["grid", "keys"])?;
                let rows = desc
                    .grid
                    .as_deref()
                    .ok_or_else(|| missing(kind, "grid"))?;
                let base = KeyGrid::from_rows(kind, rows)?;
                let keys = desc.keys.ok_or_else(|| missing(kind, "keys"))?;
                Ok(Self::CustomKey { base, keys })
            }
        }
    }
}

fn missing(kind: EffectKind, param: &str) -> ChromaError {
    ChromaError::invalid(kind.name(), format!("missing required parameter '{param}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(result: Result<KeyboardEffect, ChromaError>, needle: &str) {
        match result {
            Err(ChromaError::InvalidEffectParameters { reason, .. }) => {
                assert!(reason.contains(needle), "'{reason}' does not mention '{needle}'")
            }
            other => panic!("expected InvalidEffectParameters, got {other:?}"),
        }
    }

    #[test]
    fn test_static_description() {
        let mut desc = EffectDescription::new(EffectKind::Static);
        desc.color = Some(RgbColor::from_rgb_hex(0xFF0000));
        assert_eq!(
            KeyboardEffect::try_from(desc).unwrap(),
            KeyboardEffect::Static {
                color: RgbColor::RED
            }
        );
    }

    #[test]
    fn test_missing_parameter_rejected() {
        assert_invalid(
            KeyboardEffect::try_from(EffectDescription::new(EffectKind::Static)),
            "color",
        );
        assert_invalid(
            KeyboardEffect::try_from(EffectDescription::new(EffectKind::Wave)),
            "direction",
        );

        let mut reactive = EffectDescription::new(EffectKind::Reactive);
        reactive.color = Some(RgbColor::GREEN);
        assert_invalid(KeyboardEffect::try_from(reactive), "duration");
    }

    #[test]
    fn test_extra_parameter_rejected() {
        let mut desc = EffectDescription::new(EffectKind::Wave);
        desc.direction = Some(WaveDirection::LeftToRight);
        desc.color = Some(RgbColor::RED);
        assert_invalid(KeyboardEffect::try_from(desc), "unexpected parameter(s): color");

        let mut none = EffectDescription::new(EffectKind::None);
        none.duration = Some(ReactiveDuration::Long);
        assert_invalid(KeyboardEffect::try_from(none), "duration");
    }

    #[test]
    fn test_breathing_variants() {
        assert_eq!(
            KeyboardEffect::try_from(EffectDescription::new(EffectKind::Breathing)).unwrap(),
            KeyboardEffect::Breathing(Breathing::Random)
        );

        let mut half = EffectDescription::new(EffectKind::Breathing);
        half.color = Some(RgbColor::RED);
        assert_invalid(KeyboardEffect::try_from(half), "second_color");

        let mut only_second = EffectDescription::new(EffectKind::Breathing);
        only_second.second_color = Some(RgbColor::RED);
        assert_invalid(KeyboardEffect::try_from(only_second), "'color'");
    }

    #[test]
    fn test_grid_shape_checked() {
        let mut desc = EffectDescription::new(EffectKind::Custom);
        desc.grid = Some(vec![vec![RgbColor::RED; MAX_COLUMN]; MAX_ROW - 1]);
        assert_invalid(KeyboardEffect::try_from(desc), "5 rows");

        let mut rows = vec![vec![RgbColor::RED; MAX_COLUMN]; MAX_ROW];
        rows[3].pop();
        let mut desc = EffectDescription::new(EffectKind::Custom);
        desc.grid = Some(rows);
        assert_invalid(KeyboardEffect::try_from(desc), "row 3 has 21 columns");
    }

    #[test]
    fn test_custom_key_requires_keys() {
        let mut desc = EffectDescription::new(EffectKind::CustomKey);
        desc.grid = Some(vec![vec![RgbColor::BLACK; MAX_COLUMN]; MAX_ROW]);
        assert_invalid(KeyboardEffect::try_from(desc), "keys");
    }

    #[test]
    fn test_description_roundtrip_through_effect() {
        let effects = [
            KeyboardEffect::None,
            KeyboardEffect::SpectrumCycling,
            KeyboardEffect::Breathing(Breathing::TwoColors {
                first: RgbColor::RED,
                second: RgbColor::BLUE,
            }),
            KeyboardEffect::Reactive {
                duration: ReactiveDuration::Medium,
                color: RgbColor::WHITE,
            },
            KeyboardEffect::Wave {
                direction: WaveDirection::RightToLeft,
            },
            KeyboardEffect::Static {
                color: RgbColor::RED,
            },
            KeyboardEffect::Custom(KeyGrid::filled(RgbColor::GREEN)),
            KeyboardEffect::CustomKey {
                base: KeyGrid::filled(RgbColor::BLACK),
                keys: vec![KeyOverride {
                    row: 2,
                    column: 7,
                    color: RgbColor::WHITE,
                }],
            },
        ];
        // Every kind is covered
        for kind in EffectKind::ALL {
            assert!(effects.iter().any(|e| e.kind() == *kind), "{kind} not covered");
        }

        for effect in effects {
            let desc = EffectDescription::from(&effect);
            assert_eq!(desc.kind, effect.kind());
            assert_eq!(KeyboardEffect::try_from(desc).unwrap(), effect);
        }
    }

    #[test]
    fn test_custom_key_description_from_toml() {
        let row = vec!["\"#000000\""; MAX_COLUMN].join(", ");
        let grid = vec![format!("[{row}]"); MAX_ROW].join(",\n");
        let content = format!(
            r##"
            type = "custom_key"
            grid = [
            {grid}
            ]

            [[keys]]
            row = 1
            column = 4
            color = "#FF0000"

            [[keys]]
            row = 5
            column = 21
            color = "blue"
            "##
        );
        let desc: EffectDescription = toml::from_str(&content).unwrap();
        assert_eq!(desc.kind, EffectKind::CustomKey);

        match KeyboardEffect::try_from(desc).unwrap() {
            KeyboardEffect::CustomKey { base, keys } => {
                assert_eq!(base, KeyGrid::filled(RgbColor::BLACK));
                assert_eq!(
                    keys,
                    vec![
                        KeyOverride {
                            row: 1,
                            column: 4,
                            color: RgbColor::RED
                        },
                        KeyOverride {
                            row: 5,
                            column: 21,
                            color: RgbColor::BLUE
                        },
                    ]
                );
            }
            other => panic!("expected custom_key, got {other:?}"),
        }
    }

    #[test]
    fn test_description_from_toml() {
        let desc: EffectDescription = toml::from_str(
            r##"
            type = "reactive"
            color = "#00FF00"
            duration = "long"
            "##,
        )
        .unwrap();
        assert_eq!(
            KeyboardEffect::try_from(desc).unwrap(),
            KeyboardEffect::Reactive {
                duration: ReactiveDuration::Long,
                color: RgbColor::GREEN,
            }
        );
    }

    #[test]
    fn test_unknown_field_rejected_by_parser() {
        let result: Result<EffectDescription, _> = toml::from_str(
            r#"
            type = "static"
            colour = "red"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_direction_and_duration_parsing() {
        assert_eq!("ltr".parse::<WaveDirection>().unwrap(), WaveDirection::LeftToRight);
        assert_eq!(
            "right-to-left".parse::<WaveDirection>().unwrap(),
            WaveDirection::RightToLeft
        );
        assert!("up".parse::<WaveDirection>().is_err());
        assert!("left".parse::<WaveDirection>().is_err());
        assert!("right".parse::<WaveDirection>().is_err());
        assert_eq!("Short".parse::<ReactiveDuration>().unwrap(), ReactiveDuration::Short);
        assert!("forever".parse::<ReactiveDuration>().is_err());
    }

    #[test]
    fn test_grid_set_bounds() {
        let mut grid = KeyGrid::default();
        assert!(grid.set(5, 21, RgbColor::RED));
        assert!(!grid.set(6, 0, RgbColor::RED));
        assert!(!grid.set(0, 22, RgbColor::RED));
        assert_eq!(grid.get(5, 21), Some(RgbColor::RED));
        assert_eq!(grid.get(6, 0), None);
    }
}
