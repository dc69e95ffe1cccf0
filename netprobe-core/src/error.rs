use crate::types::SiteId;
use thiserror::Error;

/// Result alias used across netprobe-core.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while configuring the engine or registering targets.
///
/// Probe failures are not represented here; they never leave the scheduler.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading a configuration file failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// A configuration file was not valid TOML for the expected shape.
    #[error("toml: {0}")]
    Toml(#[from] toml::de::Error),
    /// A configuration value is out of range.
    #[error("config: {0}")]
    Config(String),
    /// A target description cannot be probed as given.
    #[error("invalid target: {0}")]
    InvalidTarget(String),
    /// No target with this id is registered.
    #[error("{0} is not registered")]
    NotFound(SiteId),
}

impl Error {
    /// Build a [`Error::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`Error::InvalidTarget`].
    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTarget(msg.into())
    }
}
