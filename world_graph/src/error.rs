//! Errors raised by the world graph.
//!
//! Resolver errors are recoverable: their messages are shown to the player as-is.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("there is no {0}")]
    NotFound(String),

    #[error("you cannot see {0}")]
    NotVisible(String),

    #[error("{0} is not a place")]
    NotPlace(String),

    #[error("you are already in {0}")]
    AlreadyThere(String),

    #[error("you cannot reach {0} from here")]
    Unreachable(String),

    #[error("you cannot take yourself")]
    CannotTakeSelf,

    #[error("you do not have {0}")]
    NotHeld(String),

    #[error("you cannot {verb} {name}")]
    NoSuchCapability { verb: String, name: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type ResolveResult<T> = Result<T, ResolveError>;
