//! Native library discovery and the raw SDK entry points

use std::ffi::{c_void, OsStr, OsString};
use std::path::Path;

use libloading::Library;
use tracing::{debug, info};

use crate::error::ChromaError;
use crate::record::NativeRecord;

/// Base library name (32-bit hosts)
pub const LIBRARY_NAME: &str = "RzChromaSDK";

/// Library name on 64-bit hosts
pub const LIBRARY_NAME_64: &str = "RzChromaSDK64";

/// Entry point symbols
pub mod symbol {
    pub const INIT: &[u8] = b"Init\0";
    pub const UNINIT: &[u8] = b"UnInit\0";
    pub const CREATE_KEYBOARD_EFFECT: &[u8] = b"CreateKeyboardEffect\0";
}

type InitFn = unsafe extern "C" fn() -> i32;
type UnInitFn = unsafe extern "C" fn() -> i32;
type CreateKeyboardEffectFn =
    unsafe extern "C" fn(effect: i32, param: *mut c_void, effect_id: *mut c_void) -> i32;

/// Select the library name for an architecture string
///
/// Any architecture whose name contains "64" (`x86_64`, `aarch64`, `amd64`, ...)
/// gets the 64-bit library; everything else gets the base name.
pub fn library_name(arch: &str) -> &'static str {
    if arch.contains("64") {
        LIBRARY_NAME_64
    } else {
        LIBRARY_NAME
    }
}

/// Library name for the architecture this binary runs on
pub fn host_library_name() -> &'static str {
    library_name(std::env::consts::ARCH)
}

/// Platform file name for a library name (`RzChromaSDK64.dll`, `libRzChromaSDK64.so`, ...)
pub fn library_filename(name: &str) -> OsString {
    libloading::library_filename(name)
}

/// The three SDK entry points, returning raw status codes (0 = success)
///
/// Implementations are only ever called from inside a [`ChromaSdk`] session
/// lock, so they need not be thread-safe themselves.
///
/// [`ChromaSdk`]: crate::ChromaSdk
pub trait ChromaLibrary: Send {
    /// `Init()`
    fn init(&mut self) -> i32;

    /// `UnInit()`
    fn uninit(&mut self) -> i32;

    /// `CreateKeyboardEffect(type, param, NULL)`
    fn create_keyboard_effect(&mut self, record: &NativeRecord) -> i32;
}

/// Dynamically loaded Chroma SDK library
pub struct NativeLibrary {
    name: String,
    init: InitFn,
    uninit: UnInitFn,
    create_keyboard_effect: CreateKeyboardEffectFn,
    // Keeps the function pointers above valid; must outlive them
    _library: Library,
}

impl NativeLibrary {
    /// Load the library matching the host architecture
    pub fn load() -> Result<Self, ChromaError> {
        Self::load_for_arch(std::env::consts::ARCH)
    }

    /// Load the library matching an architecture string
    pub fn load_for_arch(arch: &str) -> Result<Self, ChromaError> {
        let name = library_name(arch);
        debug!("Selected {} for architecture {}", name, arch);
        Self::open(library_filename(name))
    }

    /// Load the library from an explicit file name or path
    pub fn open(path: impl AsRef<OsStr>) -> Result<Self, ChromaError> {
        let path = path.as_ref();
        let name = Path::new(path).display().to_string();
        let load_error = |e: libloading::Error| ChromaError::LibraryLoad {
            library: name.clone(),
            reason: e.to_string(),
        };

        // SAFETY: loading runs the library's initializers; the Chroma SDK has no
        // load-time requirements beyond being the genuine vendor library.
        let library = unsafe { Library::new(path) }.map_err(load_error)?;

        // SAFETY: the symbol types match the SDK's exported signatures, and the
        // copied pointers are stored next to `library`, which outlives them.
        let (init, uninit, create_keyboard_effect) = unsafe {
            let init = *library
                .get::<InitFn>(symbol::INIT)
                .map_err(load_error)?;
            let uninit = *library
                .get::<UnInitFn>(symbol::UNINIT)
                .map_err(load_error)?;
            let create_keyboard_effect = *library
                .get::<CreateKeyboardEffectFn>(symbol::CREATE_KEYBOARD_EFFECT)
                .map_err(load_error)?;
            (init, uninit, create_keyboard_effect)
        };

        info!("Loaded Chroma SDK library {}", name);
        Ok(Self {
            name,
            init,
            uninit,
            create_keyboard_effect,
            _library: library,
        })
    }

    /// File name or path the library was loaded from
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ChromaLibrary for NativeLibrary {
    fn init(&mut self) -> i32 {
        // SAFETY: no arguments; pointer resolved from the live library
        unsafe { (self.init)() }
    }

    fn uninit(&mut self) -> i32 {
        // SAFETY: no arguments; pointer resolved from the live library
        unsafe { (self.uninit)() }
    }

    fn create_keyboard_effect(&mut self, record: &NativeRecord) -> i32 {
        // SAFETY: `record` is borrowed for the whole call, so the parameter
        // block stays alive; the SDK only reads it. The effect id out-pointer
        // is optional and passed as NULL.
        unsafe {
            (self.create_keyboard_effect)(
                record.effect_type().as_i32(),
                record.param_ptr() as *mut c_void,
                std::ptr::null_mut(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_name_selection() {
        for arch in ["x86_64", "aarch64", "amd64", "powerpc64", "mips64", "64"] {
            assert_eq!(library_name(arch), "RzChromaSDK64", "{arch}");
        }
        for arch in ["x86", "i686", "arm", "mips", "", "wasm32"] {
            assert_eq!(library_name(arch), "RzChromaSDK", "{arch}");
        }
    }

    #[test]
    fn test_host_library_name() {
        let expected = if std::env::consts::ARCH.contains("64") {
            LIBRARY_NAME_64
        } else {
            LIBRARY_NAME
        };
        assert_eq!(host_library_name(), expected);
    }

    #[test]
    fn test_library_filename_contains_name() {
        let file = library_filename(LIBRARY_NAME_64);
        assert!(file.to_string_lossy().contains("RzChromaSDK64"));
    }

    #[test]
    fn test_missing_library_is_load_error() {
        match NativeLibrary::open("/nonexistent/libRzChromaSDK-test.so") {
            Err(ChromaError::LibraryLoad { library, .. }) => {
                assert!(library.contains("RzChromaSDK-test"))
            }
            Err(e) => panic!("unexpected error: {e}"),
            Ok(_) => panic!("loading a nonexistent library succeeded"),
        }
    }
}
