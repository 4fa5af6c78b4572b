use thiserror::Error;

/// Failure modes for every parser exposed by this crate.
///
/// Every fallible entry point has a soft counterpart (`try_parse`) that
/// collapses any of these into `None`/`false` instead of propagating them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input was empty, or entirely whitespace, where a value was required.
    #[error("input was empty")]
    EmptyInput,

    /// `fragment` does not satisfy the grammar for `part`.
    #[error("'{fragment}' is not a valid {part}")]
    InvalidFormat {
        part: &'static str,
        fragment: String,
    },

    /// `fragment` names a numeric component that cannot be represented.
    #[error("'{fragment}' is out of range for a {part}")]
    OutOfRange {
        part: &'static str,
        fragment: String,
    },
}

impl Error {
    pub(crate) fn invalid(part: &'static str, fragment: impl Into<String>) -> Self {
        Error::InvalidFormat {
            part,
            fragment: fragment.into(),
        }
    }

    pub(crate) fn out_of_range(part: &'static str, fragment: impl Into<String>) -> Self {
        Error::OutOfRange {
            part,
            fragment: fragment.into(),
        }
    }
}
