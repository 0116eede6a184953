use std::fmt;

/// Errors that can occur when generating a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    /// Width or height is zero or negative.
    InvalidDimensions { width: i32, height: i32 },
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid maze dimensions {width}x{height}: both must be at least 1")
            }
        }
    }
}

impl std::error::Error for GenError {}
