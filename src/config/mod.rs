// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for poseflow.
//!
//! This module provides data structures for loading and saving the
//! routine library as YAML. Out-of-range durations in a file are
//! clamped on conversion into the runtime library, never rejected;
//! only unreadable or unparsable files produce errors.

pub mod watcher;

pub use watcher::{LibraryEvent, LibraryWatcher};

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::routine::{Pose, Routine, RoutineLibrary, DEFAULT_TRANSITION_SECONDS, MIN_TRANSITION};

/// Errors reading or writing a routine file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read routine file {path:?}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write routine file {path:?}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid routine YAML")]
    Yaml(#[from] serde_yaml::Error),
}

/// Root configuration: player settings plus the routine list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutineFile {
    /// Player-wide settings
    #[serde(default)]
    pub settings: PlayerSettings,
    /// Routine definitions
    #[serde(default)]
    pub routines: Vec<RoutineConfig>,
}

impl RoutineFile {
    /// Load a routine file from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    /// Parse a routine file from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Save to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml).map_err(|source| ConfigError::Write {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// Starting transition duration, clamped to the floor
    pub fn transition_secs(&self) -> u32 {
        self.settings.transition_secs.max(MIN_TRANSITION)
    }

    /// Convert into the runtime library, clamping every hold
    pub fn into_library(self) -> RoutineLibrary {
        let routines = self
            .routines
            .into_iter()
            .map(|r| {
                let mut routine = Routine::new(r.id, r.name).with_description(r.description);
                for p in r.poses {
                    routine = routine.with_pose(Pose::new(p.id, p.name, p.hold_secs).with_art(p.art));
                }
                routine
            })
            .collect();
        RoutineLibrary::new(routines)
    }

    /// The built-in seed set as a file, for `--write-sample`
    pub fn sample() -> Self {
        let library = RoutineLibrary::sample();
        Self {
            settings: PlayerSettings::default(),
            routines: library
                .routines()
                .iter()
                .map(|r| RoutineConfig {
                    id: r.id.clone(),
                    name: r.name.clone(),
                    description: r.description.clone(),
                    poses: r
                        .poses
                        .iter()
                        .map(|p| PoseConfig {
                            id: p.id.clone(),
                            name: p.name.clone(),
                            hold_secs: p.hold_secs,
                            art: p.art.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

/// Player-wide settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSettings {
    /// Seconds between poses, shared by every gap
    #[serde(default = "default_transition_secs")]
    pub transition_secs: u32,
}

fn default_transition_secs() -> u32 {
    DEFAULT_TRANSITION_SECONDS
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            transition_secs: default_transition_secs(),
        }
    }
}

/// Routine definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutineConfig {
    /// Stable id (used to keep the selection across reloads)
    pub id: String,
    /// Display name
    pub name: String,
    /// Description for the browser card
    #[serde(default)]
    pub description: String,
    /// Poses in playback order
    #[serde(default)]
    pub poses: Vec<PoseConfig>,
}

/// Pose definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PoseConfig {
    /// Stable id, unique across the file
    pub id: String,
    /// Display name
    pub name: String,
    /// Hold duration in seconds
    #[serde(default = "default_hold_secs")]
    pub hold_secs: u32,
    /// Art tag for the presentation layer
    #[serde(default)]
    pub art: String,
}

fn default_hold_secs() -> u32 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routine::MIN_DURATION;
    use tempfile::tempdir;

    const SAMPLE_YAML: &str = r#"
settings:
  transition_secs: 15
routines:
  - id: "morning"
    name: "Morning"
    description: "Wake-up flow."
    poses:
      - id: "m-1"
        name: "Mountain"
        hold_secs: 20
      - id: "m-2"
        name: "Forward Fold"
"#;

    #[test]
    fn test_parse_with_defaults() {
        let file = RoutineFile::from_yaml(SAMPLE_YAML).unwrap();

        assert_eq!(file.transition_secs(), 15);
        assert_eq!(file.routines.len(), 1);
        assert_eq!(file.routines[0].poses[0].hold_secs, 20);
        // Omitted hold falls back to the field default
        assert_eq!(file.routines[0].poses[1].hold_secs, default_hold_secs());
        assert_eq!(file.routines[0].poses[1].art, "");
    }

    #[test]
    fn test_missing_settings_block() {
        let file = RoutineFile::from_yaml("routines: []").unwrap();
        assert_eq!(file.transition_secs(), DEFAULT_TRANSITION_SECONDS);
        assert!(file.routines.is_empty());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(RoutineFile::from_yaml("this is not valid yaml: [").is_err());
    }

    #[test]
    fn test_into_library_clamps_durations() {
        let yaml = r#"
settings:
  transition_secs: 1
routines:
  - id: "r"
    name: "R"
    poses:
      - id: "p-1"
        name: "Tiny"
        hold_secs: 2
"#;
        let file = RoutineFile::from_yaml(yaml).unwrap();
        assert_eq!(file.transition_secs(), MIN_TRANSITION);

        let library = file.into_library();
        assert_eq!(library.get("r").unwrap().poses[0].hold_secs, MIN_DURATION);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("routines.yaml");

        let file = RoutineFile::sample();
        file.save(&path).unwrap();

        let loaded = RoutineFile::load(&path).unwrap();
        assert_eq!(loaded, file);
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let result = RoutineFile::load("/nonexistent/routines.yaml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_sample_matches_runtime_library() {
        let library = RoutineFile::sample().into_library();
        assert_eq!(library, RoutineLibrary::sample());
    }
}
