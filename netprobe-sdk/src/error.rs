#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

/// Result alias for the SDK.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced to the owner of a [`crate::NetTest`].
///
/// Individual probe failures never show up here; they are recorded on the
/// site as a `-1` elapsed time.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Configuration or target registration error.
    #[error(transparent)]
    Core(#[from] netprobe_core::Error),
    /// The probe transport could not be set up.
    #[error("transport setup: {0}")]
    Transport(#[from] netprobe_transport::ProbeError),
    /// The tracing subscriber could not be installed.
    #[error(transparent)]
    Telemetry(#[from] netprobe_telemetry::Error),
    /// `start()` was called outside a tokio runtime.
    #[error("no tokio runtime available to run the probe scheduler")]
    NoRuntime,
}
