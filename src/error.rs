// Error types for the audio waveforms method channel
//
// `MethodError` is what the caller sees on the wire. `ChannelError` covers
// failures of the channel itself and is folded into a `MethodError` before
// it leaves the plugin.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error code attached to every call the desktop shim does not implement
pub const UNIMPLEMENTED_CODE: &str = "audioWaveforms";

/// Fixed message for unimplemented calls
pub const UNIMPLEMENTED_MESSAGE: &str = "AudioWaveforms desktop support is not yet implemented \
     for this platform. Use RecorderController or PlayerController from the \
     audio_waveforms package instead.";

/// Error code used when a handler lets the reply handle go without answering
pub const REPLY_DROPPED_CODE: &str = "REPLY_DROPPED";

/// Structured error reply: code, human-readable message and diagnostic details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct MethodError {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

impl MethodError {
    pub fn new(code: impl Into<String>, message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details,
        }
    }

    /// The canned reply for a call name this platform does not handle
    pub fn unimplemented(method: &str) -> Self {
        Self::new(
            UNIMPLEMENTED_CODE,
            UNIMPLEMENTED_MESSAGE,
            Some(Value::String(method.to_string())),
        )
    }

    pub fn is_unimplemented(&self) -> bool {
        self.code == UNIMPLEMENTED_CODE
    }
}

/// Errors that can occur while dispatching a call through a method channel
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Method call failed - {0}")]
    Method(#[from] MethodError),

    #[error("Reply for '{method}' was dropped before it was sent")]
    ReplyDropped { method: String },
}

impl From<ChannelError> for MethodError {
    fn from(err: ChannelError) -> Self {
        match err {
            ChannelError::Method(method_error) => method_error,
            ChannelError::ReplyDropped { ref method } => MethodError::new(
                REPLY_DROPPED_CODE,
                err.to_string(),
                Some(Value::String(method.clone())),
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChannelError>;
