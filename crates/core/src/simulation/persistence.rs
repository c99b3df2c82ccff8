//! Field snapshots on disk
//!
//! A snapshot records the configuration, the number of steps integrated so far
//! and both concentration fields. Loading one and handing it to
//! [`GrayScottSimulator::from_snapshot`](super::GrayScottSimulator::from_snapshot)
//! resumes the integration exactly where it stopped.

use super::SimulationConfig;
use crate::error::{Result, SurfaceError};
use crate::solver::FieldData;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Saved simulator state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// Configuration the fields were integrated with
    pub config: SimulationConfig,
    /// Steps taken since the last seeding
    pub steps_taken: usize,
    /// Substrate concentration
    pub u: FieldData,
    /// Activator concentration
    pub v: FieldData,
}

impl FieldSnapshot {
    /// Load a snapshot from a JSON file
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be read or parsed, and
    /// `InvalidFieldState` if the stored fields disagree with the stored
    /// configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            fs::read_to_string(path).map_err(|e| SurfaceError::io(path, e.to_string()))?;

        let snapshot: Self = serde_json::from_str(&contents)
            .map_err(|e| SurfaceError::io(path, format!("parse failed: {e}")))?;

        snapshot.check_shape()?;
        Ok(snapshot)
    }

    /// Save the snapshot as pretty-printed JSON
    ///
    /// # Errors
    /// Returns `Io` if the snapshot cannot be serialized or written
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SurfaceError::io(path, format!("serialize failed: {e}")))?;

        fs::write(path, contents).map_err(|e| SurfaceError::io(path, e.to_string()))?;

        Ok(())
    }

    fn check_shape(&self) -> Result<()> {
        let res = self.config.resolution;
        for (name, field) in [("u", &self.u), ("v", &self.v)] {
            if field.width != res || field.height != res || field.len() != res * res {
                return Err(SurfaceError::invalid_state(format!(
                    "snapshot field {name} is {}x{} but resolution is {res}",
                    field.width, field.height
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rd_surface_{}_{name}.json", std::process::id()))
    }

    fn small_snapshot() -> FieldSnapshot {
        let config = SimulationConfig {
            resolution: 4,
            ..SimulationConfig::default()
        };
        let mut v = FieldData::new(4, 4);
        v.set(1, 2, 0.25);
        FieldSnapshot {
            config,
            steps_taken: 17,
            u: FieldData::with_value(4, 4, 1.0),
            v,
        }
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let snapshot = small_snapshot();
        snapshot.save(&path).unwrap();

        let loaded = FieldSnapshot::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = FieldSnapshot::load(temp_path("does_not_exist")).unwrap_err();
        assert!(matches!(err, SurfaceError::Io { .. }));
    }

    #[test]
    fn test_load_rejects_mismatched_shape() {
        let path = temp_path("mismatch");
        let mut snapshot = small_snapshot();
        snapshot.config.resolution = 8;
        snapshot.save(&path).unwrap();

        let err = FieldSnapshot::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        assert!(matches!(err, SurfaceError::InvalidFieldState { .. }));
    }
}
