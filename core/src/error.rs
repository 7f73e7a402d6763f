//! Error type shared by the enscribi crates.
//!
//! Only setup paths (configuration, theme loading, swallowing) and host
//! failures produce an `Error`. Runtime "nothing to do" situations such as an
//! empty candidate list or a destroyed slot are silent no-ops and never reach
//! this type.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("theme '{theme}' has no group '{group}'")]
    MissingGroup { theme: String, group: String },

    #[error("renderer has no part '{0}'")]
    MissingPart(String),

    #[error("host rejected key press '{key}': {reason}")]
    Injection { key: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    ConfigSerialize(#[from] toml::ser::Error),
}
