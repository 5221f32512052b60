//! Chroma SDK error types

use thiserror::Error;

use crate::status;

/// Errors from the Chroma SDK binding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChromaError {
    /// The native library or one of its entry points could not be loaded
    #[error("Failed to load {library}: {reason}")]
    LibraryLoad { library: String, reason: String },

    /// Native `Init` returned a non-zero status
    #[error("{method} failed with status {code} ({})", status::describe(*code))]
    NativeInit { code: i32, method: &'static str },

    /// Native `UnInit` returned a non-zero status
    #[error("{method} failed with status {code} ({})", status::describe(*code))]
    NativeShutdown { code: i32, method: &'static str },

    /// Native `CreateKeyboardEffect` returned a non-zero status
    #[error("{method} rejected by SDK with status {code} ({})", status::describe(*code))]
    EffectRejected { code: i32, method: &'static str },

    /// Call made outside an initialized session
    #[error("{method} called without an initialized SDK session")]
    NotInitialized { method: &'static str },

    /// `init` called on a session that is already initialized
    #[error("SDK session is already initialized")]
    AlreadyInitialized,

    /// Effect parameters do not match the effect type
    #[error("Invalid parameters for {effect} effect: {reason}")]
    InvalidEffectParameters { effect: &'static str, reason: String },
}

impl ChromaError {
    /// Raw native status code, for errors raised at the native boundary
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::NativeInit { code, .. }
            | Self::NativeShutdown { code, .. }
            | Self::EffectRejected { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub(crate) fn invalid(effect: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidEffectParameters {
            effect,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_preserved() {
        let err = ChromaError::EffectRejected {
            code: 87,
            method: "apply_keyboard_effect",
        };
        assert_eq!(err.code(), Some(87));
        let msg = err.to_string();
        assert!(msg.contains("apply_keyboard_effect"));
        assert!(msg.contains("87"));
        assert!(msg.contains("invalid parameter"));
    }

    #[test]
    fn test_local_errors_have_no_code() {
        assert_eq!(ChromaError::AlreadyInitialized.code(), None);
        assert_eq!(
            ChromaError::NotInitialized { method: "shutdown" }.code(),
            None
        );
        assert_eq!(ChromaError::invalid("wave", "missing direction").code(), None);
    }

    #[test]
    fn test_unknown_code_still_displayed() {
        let err = ChromaError::NativeInit {
            code: 12345,
            method: "init",
        };
        assert_eq!(err.to_string(), "init failed with status 12345 (unknown status)");
    }
}
