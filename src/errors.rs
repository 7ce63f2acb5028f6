use thiserror::Error;

/// The central error type for tickring.
///
/// Setup failures (configuration, listener I/O) convert into this type so
/// the binary can pick an exit code. Per-request command failures stay
/// [`CommandError`] and never reach it.
#[derive(Error, Debug)]
pub enum TickringError {
    #[error("History error: {0}")]
    Ring(#[from] RingError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by [`RingList`](crate::ring::RingList) itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    #[error("{op} from empty history")]
    EmptyContainer { op: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Errors raised while translating an external command into a ring operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    Ring(#[from] RingError),

    #[error("'{name}' {message}")]
    InvalidArgument { name: String, message: String },

    #[error("Missing parameter '{name}'")]
    MissingParameter { name: String },

    #[error("unsupported operation")]
    UnsupportedOperation { op: String },
}

impl CommandError {
    /// HTTP status the boundary answers with. Every command failure is a
    /// caller-contract violation, never a server fault.
    pub fn status(&self) -> u16 {
        400
    }
}

pub type Result<T> = std::result::Result<T, TickringError>;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;

/// Determine the appropriate process exit code for an error.
pub fn get_exit_code(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<TickringError>() {
        return match err {
            TickringError::Config(_) => EXIT_CONFIG_ERROR,
            TickringError::Ring(RingError::InvalidConfiguration(_)) => EXIT_CONFIG_ERROR,
            _ => EXIT_ERROR,
        };
    }

    if let Some(RingError::InvalidConfiguration(_)) = e.downcast_ref::<RingError>() {
        return EXIT_CONFIG_ERROR;
    }

    EXIT_ERROR
}
