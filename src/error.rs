//! Error type of the watchface

use core::fmt;

/// Errors that can occur while painting the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The draw target rejected a drawing operation
    Draw(E),
    /// A formatted string did not fit its fixed text buffer
    Format,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Draw(e) => write!(f, "draw target error: {:?}", e),
            Error::Format => f.write_str("text buffer too small for formatted string"),
        }
    }
}

impl<E> From<fmt::Error> for Error<E> {
    fn from(_: fmt::Error) -> Self {
        Error::Format
    }
}
