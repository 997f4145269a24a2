use core::fmt;
use std::error::Error;

/// A failure surfaced by an [`AsyncZip`][crate::vec::AsyncZip].
///
/// The input the failure belongs to has been retired: it is never fetched
/// from again. Every other input keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZipError<E> {
    /// The input at `index` failed while producing its next value.
    Input {
        /// Position of the input.
        index: usize,
        /// The error the input failed with.
        error: E,
    },
    /// The fetch for the input at `index` was dropped by its scheduler before
    /// it finished, taking the input with it.
    Dropped {
        /// Position of the input.
        index: usize,
    },
}

impl<E> ZipError<E> {
    /// Position of the input that failed.
    pub fn index(&self) -> usize {
        match self {
            ZipError::Input { index, .. } | ZipError::Dropped { index } => *index,
        }
    }

    /// Returns the error of the input, if the input itself failed.
    pub fn into_inner(self) -> Option<E> {
        match self {
            ZipError::Input { error, .. } => Some(error),
            ZipError::Dropped { .. } => None,
        }
    }
}

impl<E: fmt::Display> fmt::Display for ZipError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZipError::Input { index, error } => write!(f, "input {index} failed: {error}"),
            ZipError::Dropped { index } => {
                write!(f, "fetch for input {index} was dropped before it finished")
            }
        }
    }
}

impl<E> Error for ZipError<E>
where
    E: Error + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ZipError::Input { error, .. } => Some(error),
            ZipError::Dropped { .. } => None,
        }
    }
}
