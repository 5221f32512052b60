//! Fixed-layout parameter records for `CreateKeyboardEffect`
//!
//! Each effect type has a `repr(C)` parameter struct matching the SDK's
//! keyboard effect structures. Colors are stored as COLORREF (`0x00BBGGRR`),
//! effect enums as 32-bit signed integers.

use std::ffi::c_void;
use std::ptr;

use tracing::trace;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::effect::{
    Breathing, KeyGrid, KeyOverride, KeyboardEffect, ReactiveDuration, WaveDirection, MAX_COLUMN,
    MAX_ROW,
};
use crate::error::ChromaError;

/// Flag marking a per-key color in [`CustomKeyParam::key`]
pub const KEY_OVERRIDE_FLAG: u32 = 0x0100_0000;

/// Keyboard effect type as passed to `CreateKeyboardEffect`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum EffectType {
    None = 0,
    Breathing = 1,
    Custom = 2,
    Reactive = 3,
    Static = 4,
    SpectrumCycling = 5,
    Wave = 6,
    Reserved = 7,
    CustomKey = 8,
    Invalid = 9,
}

impl EffectType {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Breathing kinds
pub mod breathing_kind {
    pub const TWO_COLORS: i32 = 1;
    pub const RANDOM_COLORS: i32 = 2;
}

/// Reactive durations (0 is "none" and never sent)
pub mod reactive_duration {
    pub const SHORT: i32 = 1;
    pub const MEDIUM: i32 = 2;
    pub const LONG: i32 = 3;
}

/// Wave directions (0 is "none" and never sent)
pub mod wave_direction {
    pub const LEFT_TO_RIGHT: i32 = 1;
    pub const RIGHT_TO_LEFT: i32 = 2;
}

/// BREATHING_EFFECT_TYPE: 12 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct BreathingParam {
    pub kind: i32,
    pub color1: u32,
    pub color2: u32,
}

/// CUSTOM_EFFECT_TYPE: one COLORREF per matrix position
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct CustomParam {
    pub color: [[u32; MAX_COLUMN]; MAX_ROW],
}

/// REACTIVE_EFFECT_TYPE: 8 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct ReactiveParam {
    pub duration: i32,
    pub color: u32,
}

/// STATIC_EFFECT_TYPE: 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct StaticParam {
    pub color: u32,
}

/// WAVE_EFFECT_TYPE: 4 bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct WaveParam {
    pub direction: i32,
}

/// CUSTOM_KEY_EFFECT_TYPE: base grid followed by the key grid
///
/// Only key entries carrying [`KEY_OVERRIDE_FLAG`] are drawn over `color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
pub struct CustomKeyParam {
    pub color: [[u32; MAX_COLUMN]; MAX_ROW],
    pub key: [[u32; MAX_COLUMN]; MAX_ROW],
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NativeParam {
    Empty,
    Breathing(BreathingParam),
    Custom(Box<CustomParam>),
    Reactive(ReactiveParam),
    Static(StaticParam),
    Wave(WaveParam),
    CustomKey(Box<CustomKeyParam>),
}

/// Encoded effect, ready for `CreateKeyboardEffect(type, param, NULL)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeRecord {
    effect_type: EffectType,
    param: NativeParam,
}

impl NativeRecord {
    /// Effect type argument
    pub fn effect_type(&self) -> EffectType {
        self.effect_type
    }

    /// Exact parameter bytes handed to the SDK (empty when no parameter)
    pub fn param_bytes(&self) -> &[u8] {
        match &self.param {
            NativeParam::Empty => &[],
            NativeParam::Breathing(p) => p.as_bytes(),
            NativeParam::Custom(p) => p.as_bytes(),
            NativeParam::Reactive(p) => p.as_bytes(),
            NativeParam::Static(p) => p.as_bytes(),
            NativeParam::Wave(p) => p.as_bytes(),
            NativeParam::CustomKey(p) => p.as_bytes(),
        }
    }

    /// Parameter pointer argument, null for effects without parameters
    ///
    /// Valid for as long as `self` is alive and unmoved.
    pub fn param_ptr(&self) -> *const c_void {
        let bytes = self.param_bytes();
        if bytes.is_empty() {
            ptr::null()
        } else {
            bytes.as_ptr().cast()
        }
    }
}

fn colorref_grid(grid: &KeyGrid) -> [[u32; MAX_COLUMN]; MAX_ROW] {
    let mut out = [[0u32; MAX_COLUMN]; MAX_ROW];
    for (dst, src) in out.iter_mut().zip(grid.rows()) {
        for (cell, color) in dst.iter_mut().zip(src.iter()) {
            *cell = color.to_colorref();
        }
    }
    out
}

fn key_grid(keys: &[KeyOverride]) -> Result<[[u32; MAX_COLUMN]; MAX_ROW], ChromaError> {
    let mut out = [[0u32; MAX_COLUMN]; MAX_ROW];
    for key in keys {
        if key.row >= MAX_ROW || key.column >= MAX_COLUMN {
            return Err(ChromaError::invalid(
                "custom_key",
                format!(
                    "key ({}, {}) outside the {MAX_ROW}x{MAX_COLUMN} matrix",
                    key.row, key.column
                ),
            ));
        }
        out[key.row][key.column] = KEY_OVERRIDE_FLAG | key.color.to_colorref();
    }
    Ok(out)
}

/// Encode an effect into its native record
///
/// Pure: nothing is sent anywhere. Fails with `InvalidEffectParameters` instead
/// of producing a record the SDK would misread.
pub fn encode(effect: &KeyboardEffect) -> Result<NativeRecord, ChromaError> {
    let (effect_type, param) = match effect {
        KeyboardEffect::None => (EffectType::None, NativeParam::Empty),
        KeyboardEffect::SpectrumCycling => (EffectType::SpectrumCycling, NativeParam::Empty),
        KeyboardEffect::Breathing(breathing) => {
            let param = match *breathing {
                Breathing::TwoColors { first, second } => BreathingParam {
                    kind: breathing_kind::TWO_COLORS,
                    color1: first.to_colorref(),
                    color2: second.to_colorref(),
                },
                Breathing::Random => BreathingParam {
                    kind: breathing_kind::RANDOM_COLORS,
                    color1: 0,
                    color2: 0,
                },
            };
            (EffectType::Breathing, NativeParam::Breathing(param))
        }
        KeyboardEffect::Custom(grid) => (
            EffectType::Custom,
            NativeParam::Custom(Box::new(CustomParam {
                color: colorref_grid(grid),
            })),
        ),
        KeyboardEffect::Reactive { duration, color } => {
            let duration = match duration {
                ReactiveDuration::Short => reactive_duration::SHORT,
                ReactiveDuration::Medium => reactive_duration::MEDIUM,
                ReactiveDuration::Long => reactive_duration::LONG,
            };
            (
                EffectType::Reactive,
                NativeParam::Reactive(ReactiveParam {
                    duration,
                    color: color.to_colorref(),
                }),
            )
        }
        KeyboardEffect::Static { color } => (
            EffectType::Static,
            NativeParam::Static(StaticParam {
                color: color.to_colorref(),
            }),
        ),
        KeyboardEffect::Wave { direction } => {
            let direction = match direction {
                WaveDirection::LeftToRight => wave_direction::LEFT_TO_RIGHT,
                WaveDirection::RightToLeft => wave_direction::RIGHT_TO_LEFT,
            };
            (
                EffectType::Wave,
                NativeParam::Wave(WaveParam { direction }),
            )
        }
        KeyboardEffect::CustomKey { base, keys } => (
            EffectType::CustomKey,
            NativeParam::CustomKey(Box::new(CustomKeyParam {
                color: colorref_grid(base),
                key: key_grid(keys)?,
            })),
        ),
    };

    let record = NativeRecord { effect_type, param };
    trace!(
        "Encoded {} effect: type={} {} param bytes",
        effect.kind(),
        effect_type.as_i32(),
        record.param_bytes().len()
    );
    Ok(record)
}
