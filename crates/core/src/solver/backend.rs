//! Execution strategy selection
//!
//! The integrator can run single-threaded or data-parallel. Callers may pin a
//! strategy or let [`Backend::Auto`] pick one; output does not depend on the
//! choice.

use crate::error::SurfaceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Execution strategy for the integrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Single-threaded row-major sweep
    Scalar,
    /// Rows updated concurrently on the rayon thread pool
    Parallel,
    /// Pick `Parallel` for large grids on multi-core machines, `Scalar` otherwise
    #[default]
    Auto,
}

impl Backend {
    /// Grids with fewer rows than this are not worth splitting across threads
    pub const PARALLEL_MIN_ROWS: usize = 64;

    /// Resolve `Auto` to a concrete strategy for the given grid height
    ///
    /// `Scalar` and `Parallel` are returned unchanged.
    #[must_use]
    pub fn resolve(self, rows: usize) -> Self {
        match self {
            Self::Auto => {
                if rayon::current_num_threads() > 1 && rows >= Self::PARALLEL_MIN_ROWS {
                    Self::Parallel
                } else {
                    Self::Scalar
                }
            }
            concrete => concrete,
        }
    }

    /// Lowercase identifier
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Parallel => "parallel",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scalar" | "cpu" => Ok(Self::Scalar),
            "parallel" | "rayon" => Ok(Self::Parallel),
            "auto" => Ok(Self::Auto),
            other => Err(SurfaceError::invalid_parameter(
                "backend",
                format!("unknown backend '{other}' (expected scalar, parallel or auto)"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_backends_resolve_to_themselves() {
        assert_eq!(Backend::Scalar.resolve(4096), Backend::Scalar);
        assert_eq!(Backend::Parallel.resolve(1), Backend::Parallel);
    }

    #[test]
    fn test_auto_uses_scalar_for_small_grids() {
        assert_eq!(Backend::Auto.resolve(8), Backend::Scalar);
        assert_ne!(Backend::Auto.resolve(512), Backend::Auto);
    }

    #[test]
    fn test_parse_backend() {
        assert_eq!("Parallel".parse::<Backend>().unwrap(), Backend::Parallel);
        assert_eq!("scalar".parse::<Backend>().unwrap(), Backend::Scalar);
        assert!("gpu".parse::<Backend>().is_err());
    }
}
