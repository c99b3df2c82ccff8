//! Error types shared by every stage of the texturing pipeline.
//!
//! All failures are raised synchronously and surfaced unchanged to the caller.
//! Numerical instability inside the integrator is not an error: the per-step
//! clamp keeps the fields bounded.

use std::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SurfaceError>;

/// Error kinds raised by the resolver, simulator, mapper and orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// Out-of-range feed/kill/diffusion/resolution/step values.
    ///
    /// Raised during configuration validation, before any simulation work.
    InvalidParameter {
        /// Name of the offending parameter (e.g. `"feed_rate"`)
        name: String,
        /// Description of the violated constraint
        message: String,
    },

    /// An operation was invoked out of the simulator's state order
    /// (`Uninitialised → Seeded → Running/Converged`), or a field of the
    /// wrong shape was supplied.
    InvalidFieldState {
        /// Description of the state violation
        message: String,
    },

    /// Mesh geometry collapses the cylindrical mapping (zero height range,
    /// empty mesh, non-finite coordinates, mismatched per-vertex data).
    MeshMapping {
        /// Description of the degenerate geometry
        message: String,
    },

    /// Reading or writing a field snapshot or configuration file failed.
    Io {
        /// Path that was being accessed
        path: String,
        /// Underlying error message
        message: String,
    },
}

impl SurfaceError {
    /// Create an invalid parameter error with a custom message.
    ///
    /// # Arguments
    /// * `name` - The name of the invalid parameter (e.g., `"kill_rate"`, `"dt"`)
    /// * `message` - A description of the validation error
    pub fn invalid_parameter(name: &str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            message: message.into(),
        }
    }

    /// Create an invalid parameter error for an `f32` value outside `(0, 1)`.
    pub fn out_of_unit_interval(name: &str, value: f32) -> Self {
        Self::invalid_parameter(name, format!("must lie strictly inside (0, 1), got {value}"))
    }

    /// Create an invalid parameter error for an `f32` that must be finite and positive.
    pub fn not_positive(name: &str, value: f32) -> Self {
        Self::invalid_parameter(name, format!("must be finite and positive, got {value}"))
    }

    /// Create an invalid field state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidFieldState {
            message: message.into(),
        }
    }

    /// Create a mesh mapping error.
    pub fn mesh_mapping(message: impl Into<String>) -> Self {
        Self::MeshMapping {
            message: message.into(),
        }
    }

    /// Create an I/O error for the given path.
    pub fn io(path: &std::path::Path, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
            Self::InvalidFieldState { message } => write!(f, "invalid field state: {message}"),
            Self::MeshMapping { message } => write!(f, "mesh mapping failed: {message}"),
            Self::Io { path, message } => write!(f, "I/O error on '{path}': {message}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_parameter() {
        let err = SurfaceError::out_of_unit_interval("feed_rate", 1.5);
        let text = err.to_string();
        assert!(text.contains("feed_rate"), "{text}");
        assert!(text.contains("1.5"), "{text}");
    }

    #[test]
    fn test_constructors_pick_variant() {
        assert!(matches!(
            SurfaceError::invalid_state("not seeded"),
            SurfaceError::InvalidFieldState { .. }
        ));
        assert!(matches!(
            SurfaceError::mesh_mapping("flat"),
            SurfaceError::MeshMapping { .. }
        ));
        assert!(matches!(
            SurfaceError::not_positive("dt", 0.0),
            SurfaceError::InvalidParameter { .. }
        ));
    }
}
