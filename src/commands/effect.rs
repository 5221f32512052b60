//! Effect command handlers.

use std::path::Path;

use anyhow::Context;
use chroma_sdk::{
    Breathing, ChromaLibrary, ChromaSdk, EffectDescription, KeyGrid, KeyOverride, KeyboardEffect,
    RgbColor,
};
use tracing::info;

use super::CommandResult;

/// Static color over the whole keyboard
pub fn static_effect(color: &str) -> anyhow::Result<KeyboardEffect> {
    Ok(KeyboardEffect::Static {
        color: color.parse()?,
    })
}

/// Two-color breathing, or random colors when no color is given
pub fn breathing(color: Option<&str>, second: Option<&str>) -> anyhow::Result<KeyboardEffect> {
    let breathing = match (color, second) {
        (None, None) => Breathing::Random,
        (Some(first), Some(second)) => Breathing::TwoColors {
            first: first.parse()?,
            second: second.parse()?,
        },
        _ => anyhow::bail!("breathing takes either no colors or two colors"),
    };
    Ok(KeyboardEffect::Breathing(breathing))
}

/// Reactive effect
pub fn reactive(color: &str, duration: &str) -> anyhow::Result<KeyboardEffect> {
    Ok(KeyboardEffect::Reactive {
        duration: duration.parse()?,
        color: color.parse()?,
    })
}

/// Wave effect
pub fn wave(direction: &str) -> anyhow::Result<KeyboardEffect> {
    Ok(KeyboardEffect::Wave {
        direction: direction.parse()?,
    })
}

/// Parse a `ROW,COL=COLOR` key argument
pub fn parse_key(arg: &str) -> anyhow::Result<KeyOverride> {
    let (position, color) = arg
        .split_once('=')
        .with_context(|| format!("invalid key '{arg}' (expected ROW,COL=COLOR)"))?;
    let (row, column) = position
        .split_once(',')
        .with_context(|| format!("invalid key position '{position}' (expected ROW,COL)"))?;
    Ok(KeyOverride {
        row: row.trim().parse().with_context(|| format!("invalid row '{row}'"))?,
        column: column
            .trim()
            .parse()
            .with_context(|| format!("invalid column '{column}'"))?,
        color: color.parse()?,
    })
}

/// Custom grid filled with one color; becomes a custom-key effect when keys are given
pub fn custom(color: &str, keys: &[String]) -> anyhow::Result<KeyboardEffect> {
    let base = KeyGrid::filled(color.parse::<RgbColor>()?);
    if keys.is_empty() {
        return Ok(KeyboardEffect::Custom(base));
    }
    let keys = keys
        .iter()
        .map(|k| parse_key(k))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(KeyboardEffect::CustomKey { base, keys })
}

/// Read an effect file
pub fn load_effect_file(path: &Path) -> anyhow::Result<EffectDescription> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read effect file {}", path.display()))?;
    let description = toml::from_str(&content)
        .with_context(|| format!("parse effect file {}", path.display()))?;
    Ok(description)
}

/// Effect described by a file, validated against its type
pub fn from_file(path: &Path) -> anyhow::Result<KeyboardEffect> {
    Ok(KeyboardEffect::try_from(load_effect_file(path)?)?)
}

/// Apply an effect on an initialized session
pub fn apply<L: ChromaLibrary>(sdk: &ChromaSdk<L>, effect: &KeyboardEffect) -> CommandResult {
    sdk.apply_keyboard_effect(effect)?;
    info!("Applied {} effect", effect.kind());
    match effect {
        KeyboardEffect::Static { color } => println!("Applied static effect ({color})"),
        KeyboardEffect::Breathing(Breathing::TwoColors { first, second }) => {
            println!("Applied breathing effect ({first} / {second})")
        }
        KeyboardEffect::Reactive { duration, color } => {
            println!("Applied reactive effect ({color}, {duration:?})")
        }
        KeyboardEffect::Wave { direction } => println!("Applied wave effect ({direction:?})"),
        KeyboardEffect::CustomKey { keys, .. } => {
            println!("Applied custom-key effect ({} keys)", keys.len())
        }
        other => println!("Applied {} effect", other.kind()),
    }
    Ok(())
}
