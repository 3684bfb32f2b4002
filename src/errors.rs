//! Error types for field construction, cursor movement and store binding.

use std::fmt;

/// Errors produced while building a field tree or operating on a laid-out [crate::memory::Memory].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Two children of the same Structure or Union share a name.
    NamingConflict(String),
    /// Field name is empty or contains the path separator.
    InvalidFieldName(String),
    /// Variable declared with a width of 0 bits.
    InvalidFieldSize,
    /// Array declared with 0 elements.
    InvalidArrayCount,
    /// Array cursor moved outside `[0, size)`.
    IndexRange { index: usize, size: usize },
    /// Operation not supported by this kind of field (e.g. moving the cursor of a non-array).
    InvalidFieldKind(String),
    /// Bound store holds fewer bits than the layout needs.
    StoreTooSmall { required: usize, available: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NamingConflict(name) => write!(f, "duplicate field name `{name}`"),
            LayoutError::InvalidFieldName(name) => write!(f, "invalid field name `{name}`"),
            LayoutError::InvalidFieldSize => write!(f, "field width must be at least 1 bit"),
            LayoutError::InvalidArrayCount => write!(f, "array must have at least one element"),
            LayoutError::IndexRange { index, size } => {
                write!(f, "array index {index} out of range for size {size}")
            }
            LayoutError::InvalidFieldKind(name) => {
                write!(f, "operation not supported by field `{name}`")
            }
            LayoutError::StoreTooSmall {
                required,
                available,
            } => write!(
                f,
                "store holds {available} bits but the layout needs {required}"
            ),
        }
    }
}

impl std::error::Error for LayoutError {}
