//! Bindings for the Razer Chroma SDK keyboard API
//!
//! This crate loads the vendor's native library and exposes its keyboard
//! entry points through a typed, lock-guarded session:
//!
//! - [`library`]: library name selection, loading, and the raw entry points
//! - [`effect`]: keyboard effects and loosely-typed effect descriptions
//! - [`record`]: encoding effects into the SDK's fixed-layout parameter blocks
//! - [`session`]: the [`ChromaSdk`] handle (`init`, `shutdown`, effects)

pub mod color;
pub mod effect;
pub mod error;
pub mod library;
pub mod record;
pub mod session;
pub mod status;

pub use color::RgbColor;
pub use effect::{
    Breathing, EffectDescription, EffectKind, KeyGrid, KeyOverride, KeyboardEffect,
    ReactiveDuration, WaveDirection, MAX_COLUMN, MAX_ROW,
};
pub use error::ChromaError;
pub use library::{
    host_library_name, library_filename, library_name, ChromaLibrary, NativeLibrary,
};
pub use record::{encode, EffectType, NativeRecord};
pub use session::{ChromaSdk, SessionState};
