use crate::Pos2;
use thiserror::Error;

/// Errors raised by the simulation core.
///
/// Every variant is local to the call that produced it; the universe and
/// simulation are left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// The coordinate lies outside a bounded universe that does not wrap.
    #[error("cell {pos} is outside the {width}x{height} universe")]
    OutOfBounds { pos: Pos2, width: i32, height: i32 },
    /// The model was mutated while the simulation is running.
    #[error("cannot {action} while the simulation is running")]
    InvalidOperation { action: &'static str },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl LifeError {
    pub(crate) fn invalid_argument<T: Into<String>>(message: T) -> Self {
        Self::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, LifeError>;
