//! Error types for projections and table operations.
//!
//! This module contains the [`Error`] type which represents all possible errors
//! that can occur when projecting a [`NestedMap`](crate::NestedMap) into an
//! array or a table.
//!
//! # Example
//!
//! ```
//! use nested_dict::{Error, NestedMap, Result, Scalar};
//!
//! fn project(map: &NestedMap) -> Result<()> {
//!     match map.to_array(None) {
//!         Ok(array) => {
//!             println!("shape: {:?}", array.shape());
//!             Ok(())
//!         }
//!         Err(Error::IrregularStructure { .. }) => {
//!             // retry with a fill value for the holes
//!             map.to_array(Some(Scalar::Int(0))).map(|_| ())
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use std::fmt::{self, Display};

use crate::{Key, Scalar};

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// What made a hierarchy impossible to lay out as a dense array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Irregularity {
    /// Sibling subtrees have different shapes and no fill value was given.
    Shape,
    /// Sibling subtrees have a different number of nesting levels.
    Rank,
    /// Sibling subtrees carry different key sets and no fill value was given.
    Labels,
}

/// This type represents all possible errors that can occur when projecting
/// a hierarchy or building a table.
///
/// # Variants
///
/// - [`IrregularStructure`](Error::IrregularStructure) - The hierarchy is not rectangular
/// - [`ColumnLengthMismatch`](Error::ColumnLengthMismatch) - Table columns differ in length
/// - [`UnknownColumn`](Error::UnknownColumn) - A table column name does not exist
/// - [`DuplicateColumn`](Error::DuplicateColumn) - Two table columns would share a name
/// - [`InvalidKey`](Error::InvalidKey) - A cell cannot be used as a row key
#[derive(Debug)]
pub enum Error {
    Message(String),

    /// The hierarchy cannot be laid out as a dense array.
    ///
    /// `path` names the branch whose children disagree; its length is the
    /// depth at which the irregularity was found. Shape and label
    /// disagreements go away when the projection is retried with a fill
    /// value; rank disagreements do not.
    IrregularStructure {
        path: Vec<Key>,
        reason: Irregularity,
    },

    /// The array library rejected an inferred shape.
    Shape(ndarray::ShapeError),

    /// A table column does not have as many cells as the first column.
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A table operation named a column the table does not have.
    UnknownColumn(String),

    /// Renaming would give two table columns the same name.
    DuplicateColumn(String),

    /// A cell used as a row key holds a value that is not a valid [`Key`].
    ///
    /// Only strings and integers can be keys.
    InvalidKey(Scalar),
}

impl Error {
    pub(crate) fn irregular(path: &[&Key], reason: Irregularity) -> Self {
        Error::IrregularStructure {
            path: path.iter().map(|key| (*key).clone()).collect(),
            reason,
        }
    }

    /// Returns `true` if retrying the projection with a fill value can succeed.
    pub fn is_recoverable_with_fill(&self) -> bool {
        matches!(
            self,
            Error::IrregularStructure {
                reason: Irregularity::Shape | Irregularity::Labels,
                ..
            }
        )
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

#[cfg(feature = "serde")]
impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Message(message) => formatter.write_str(message),
            Error::IrregularStructure { path, reason } => {
                let what = match reason {
                    Irregularity::Shape => "sibling shapes differ",
                    Irregularity::Rank => "sibling nesting depths differ",
                    Irregularity::Labels => "sibling keys differ",
                };
                write!(
                    formatter,
                    "irregular nested structure at depth {} ({what}) under [",
                    path.len()
                )?;
                for (i, key) in path.iter().enumerate() {
                    if i > 0 {
                        formatter.write_str(", ")?;
                    }
                    write!(formatter, "{key}")?;
                }
                formatter.write_str("]")?;
                if *reason != Irregularity::Rank {
                    formatter.write_str("; provide a fill value to handle this")?;
                }
                Ok(())
            }
            Error::Shape(error) => write!(formatter, "invalid array shape: {error}"),
            Error::ColumnLengthMismatch {
                column,
                expected,
                found,
            } => write!(
                formatter,
                "column {column:?} has {found} cells, expected {expected}"
            ),
            Error::UnknownColumn(name) => write!(formatter, "unknown column: {name:?}"),
            Error::DuplicateColumn(name) => write!(formatter, "duplicate column: {name:?}"),
            Error::InvalidKey(value) => write!(formatter, "value cannot be used as a key: {value}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Shape(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ndarray::ShapeError> for Error {
    fn from(error: ndarray::ShapeError) -> Self {
        Error::Shape(error)
    }
}
