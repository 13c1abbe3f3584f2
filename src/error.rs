//! Error types for planar geometry operations

use std::fmt;

/// Errors that can occur while configuring the lab, loading points or classifying sites
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// A Voronoi classification was requested against an empty site list
    NoSites,
    /// The point file could not be opened or read
    PointSource {
        /// Path that was requested
        path: String,
        /// Underlying I/O failure, rendered as text
        reason: String,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            GeometryError::NoSites => write!(f, "cannot classify against zero sites"),
            GeometryError::PointSource { path, reason } => {
                write!(f, "unable to read points from {}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Result type alias for geometry operations
pub type Result<T> = std::result::Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            GeometryError::NoSites.to_string(),
            "cannot classify against zero sites"
        );

        let err = GeometryError::PointSource {
            path: "points.txt".into(),
            reason: "not found".into(),
        };
        assert_eq!(err.to_string(), "unable to read points from points.txt: not found");

        let err = GeometryError::InvalidConfig("canvas width must be > 0".into());
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
