//! Construction errors.

use std::fmt;

/// Why an [`ImageCloth`](crate::ImageCloth) could not be built.
#[derive(Clone, Debug, PartialEq)]
pub enum ClothError {
    /// The mesh needs at least two rows and columns.
    MeshTooSmall(usize),
    /// More mesh cells than cloth pixels along one side.
    MeshTooLarge { size: usize, max: usize },
    /// Cloth width or height is zero.
    EmptyCloth { width: u32, height: u32 },
    /// A physical parameter that must be strictly positive was not.
    NonPositive { name: &'static str, value: f32 },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::MeshTooSmall(n) =>
                write!(f, "mesh size must be at least 2, got {}", n),
            ClothError::MeshTooLarge { size, max } =>
                write!(f, "mesh size must be at most {}, got {}", max, size),
            ClothError::EmptyCloth { width, height } =>
                write!(f, "cloth dimensions must be non-zero, got {}x{}", width, height),
            ClothError::NonPositive { name, value } =>
                write!(f, "{} must be positive, got {}", name, value),
        }
    }
}

impl std::error::Error for ClothError {}
