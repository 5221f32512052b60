//! SDK session handle
//!
//! [`ChromaSdk`] owns the native library and the session state behind a single
//! lock. Every native call is made while holding it, so effect calls never
//! overlap each other or an `init`/`shutdown`.

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::effect::{EffectDescription, KeyboardEffect};
use crate::error::ChromaError;
use crate::library::{ChromaLibrary, NativeLibrary};
use crate::record;
use crate::status;

/// Lifecycle of an SDK session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// `init` has not succeeded yet
    Uninitialized,
    /// `init` succeeded; effects may be applied
    Initialized,
    /// `shutdown` succeeded; `init` may be called again
    ShutDown,
    /// `UnInit` returned an error; the SDK is not asked to tear down again
    Failed,
}

struct Session<L> {
    library: L,
    state: SessionState,
}

/// Handle to the Chroma SDK
///
/// Create one per process and pass it by reference to whoever needs it. The
/// handle is `Sync`; concurrent callers are serialized.
pub struct ChromaSdk<L: ChromaLibrary = NativeLibrary> {
    session: Mutex<Session<L>>,
}

impl ChromaSdk<NativeLibrary> {
    /// Load the SDK library for the host architecture (not yet initialized)
    pub fn load() -> Result<Self, ChromaError> {
        Ok(Self::with_library(NativeLibrary::load()?))
    }
}

impl<L: ChromaLibrary> ChromaSdk<L> {
    /// Wrap an already loaded library
    pub fn with_library(library: L) -> Self {
        Self {
            session: Mutex::new(Session {
                library,
                state: SessionState::Uninitialized,
            }),
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.session.lock().state
    }

    /// Check if effects can be applied
    pub fn is_initialized(&self) -> bool {
        self.state() == SessionState::Initialized
    }

    /// Initialize the SDK
    ///
    /// Fails with `AlreadyInitialized` (without calling the SDK) if the session
    /// is already up. A session that was shut down, or whose shutdown failed,
    /// can be initialized again.
    pub fn init(&self) -> Result<(), ChromaError> {
        let mut session = self.session.lock();
        if session.state == SessionState::Initialized {
            return Err(ChromaError::AlreadyInitialized);
        }

        let code = session.library.init();
        debug!("Init() -> {} ({})", code, status::describe(code));
        if code != status::SUCCESS {
            return Err(ChromaError::NativeInit {
                code,
                method: "init",
            });
        }

        session.state = SessionState::Initialized;
        info!("Chroma SDK initialized");
        Ok(())
    }

    /// Release the SDK
    ///
    /// Effect calls fail with `NotInitialized` afterwards, whether or not the
    /// SDK accepted the call. A non-zero status leaves the session `Failed`
    /// and is never retried, not even on drop.
    pub fn shutdown(&self) -> Result<(), ChromaError> {
        let mut session = self.session.lock();
        if session.state != SessionState::Initialized {
            return Err(ChromaError::NotInitialized { method: "shutdown" });
        }

        let code = session.library.uninit();
        debug!("UnInit() -> {} ({})", code, status::describe(code));
        if code != status::SUCCESS {
            session.state = SessionState::Failed;
            return Err(ChromaError::NativeShutdown {
                code,
                method: "shutdown",
            });
        }

        session.state = SessionState::ShutDown;
        info!("Chroma SDK shut down");
        Ok(())
    }

    /// Apply a keyboard effect
    ///
    /// The effect is encoded before the session is consulted, so invalid
    /// parameters are reported even without a session and never reach the SDK.
    pub fn apply_keyboard_effect(&self, effect: &KeyboardEffect) -> Result<(), ChromaError> {
        let record = record::encode(effect)?;

        let mut session = self.session.lock();
        if session.state != SessionState::Initialized {
            return Err(ChromaError::NotInitialized {
                method: "apply_keyboard_effect",
            });
        }

        let code = session.library.create_keyboard_effect(&record);
        debug!(
            "CreateKeyboardEffect({}) -> {} ({})",
            effect.kind(),
            code,
            status::describe(code)
        );
        if code != status::SUCCESS {
            return Err(ChromaError::EffectRejected {
                code,
                method: "apply_keyboard_effect",
            });
        }
        Ok(())
    }

    /// Validate an effect description and apply it
    pub fn apply_description(&self, description: EffectDescription) -> Result<(), ChromaError> {
        let effect = KeyboardEffect::try_from(description)?;
        self.apply_keyboard_effect(&effect)
    }
}

impl<L: ChromaLibrary> Drop for ChromaSdk<L> {
    fn drop(&mut self) {
        let session = self.session.get_mut();
        if session.state != SessionState::Initialized {
            return;
        }
        let code = session.library.uninit();
        if code == status::SUCCESS {
            session.state = SessionState::ShutDown;
            info!("Chroma SDK shut down on drop");
        } else {
            session.state = SessionState::Failed;
            warn!(
                "UnInit() on drop failed with status {} ({})",
                code,
                status::describe(code)
            );
        }
    }
}
