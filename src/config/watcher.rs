// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! File watcher for hot-reload of the routine file.
//!
//! Detects edits to the routine YAML and re-parses it off the run
//! loop; the run loop applies a successful reload only while idle so
//! a live countdown never desyncs from a file edit.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::warn;

use super::RoutineFile;

/// Events emitted by the library watcher
#[derive(Debug)]
pub enum LibraryEvent {
    /// Routine file was modified and successfully re-parsed
    Reloaded(Box<RoutineFile>),
    /// Routine file was modified but failed to parse
    Error(String),
}

/// Routine file watcher with debouncing and validation
pub struct LibraryWatcher {
    _watcher: RecommendedWatcher,
    event_receiver: Receiver<LibraryEvent>,
    watched_path: PathBuf,
}

impl LibraryWatcher {
    /// Create a new watcher for the routine file.
    ///
    /// # Arguments
    /// * `path` - Path of the routine YAML file
    /// * `debounce_ms` - Debounce duration in milliseconds (default: 500)
    pub fn new<P: AsRef<Path>>(path: P, debounce_ms: Option<u64>) -> Result<Self> {
        let watched_path = path.as_ref().to_path_buf();
        let debounce_duration = Duration::from_millis(debounce_ms.unwrap_or(500));

        let (event_tx, event_rx): (Sender<LibraryEvent>, Receiver<LibraryEvent>) = mpsc::channel();
        let (notify_tx, notify_rx): (Sender<Event>, Receiver<Event>) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    let _ = notify_tx.send(event);
                }
            },
            Config::default(),
        )
        .map_err(|e| anyhow!("Failed to create file watcher: {}", e))?;

        // Watch the parent directory so editors that replace the file
        // (write-then-rename) are still observed.
        let watch_root = watched_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| watched_path.clone());

        watcher
            .watch(&watch_root, RecursiveMode::NonRecursive)
            .map_err(|e| anyhow!("Failed to watch path {:?}: {}", watch_root, e))?;

        // Debounce thread: coalesce bursts of notify events into one
        // reload once the file has been quiet for the debounce window.
        let reload_path = watched_path.clone();
        std::thread::spawn(move || {
            let mut last_event_time: Option<Instant> = None;

            loop {
                match notify_rx.recv_timeout(Duration::from_millis(100)) {
                    Ok(event) => {
                        let touches_file = event.paths.iter().any(|p| p == &reload_path);
                        if touches_file
                            && matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
                        {
                            last_event_time = Some(Instant::now());
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        if let Some(last_time) = last_event_time {
                            if last_time.elapsed() >= debounce_duration {
                                match RoutineFile::load(&reload_path) {
                                    Ok(file) => {
                                        let _ = event_tx.send(LibraryEvent::Reloaded(Box::new(file)));
                                    }
                                    Err(e) => {
                                        warn!(path = ?reload_path, error = %e, "routine file reload failed");
                                        let _ = event_tx.send(LibraryEvent::Error(format!(
                                            "Failed to load {:?}: {}",
                                            reload_path, e
                                        )));
                                    }
                                }
                                last_event_time = None;
                            }
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Disconnected) => {
                        // Watcher was dropped, exit thread
                        break;
                    }
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            event_receiver: event_rx,
            watched_path,
        })
    }

    /// Try to receive the next library event (non-blocking)
    pub fn try_recv(&self) -> Option<LibraryEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Receive all pending library events
    pub fn recv_all(&self) -> Vec<LibraryEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }

    /// Get the path being watched
    pub fn watched_path(&self) -> &Path {
        &self.watched_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    const VALID_YAML: &str = r#"
settings:
  transition_secs: 10
routines:
  - id: "r"
    name: "R"
    poses:
      - id: "p-1"
        name: "First"
        hold_secs: 20
"#;

    #[test]
    fn test_watcher_creation() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("routines.yaml");
        fs::write(&file_path, VALID_YAML).unwrap();

        let watcher = LibraryWatcher::new(&file_path, Some(100));
        assert!(watcher.is_ok());
        assert_eq!(watcher.unwrap().watched_path(), file_path);
    }

    #[test]
    fn test_watcher_detects_changes() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("routines.yaml");
        fs::write(&file_path, VALID_YAML).unwrap();

        let watcher = LibraryWatcher::new(&file_path, Some(100)).unwrap();

        std::thread::sleep(Duration::from_millis(50));

        let new_yaml = VALID_YAML.replace("hold_secs: 20", "hold_secs: 25");
        let mut file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&file_path)
            .unwrap();
        file.write_all(new_yaml.as_bytes()).unwrap();
        file.flush().unwrap();
        drop(file);

        // Wait for debounce + processing
        std::thread::sleep(Duration::from_millis(400));

        let events = watcher.recv_all();
        let reloaded = events.iter().find(|e| matches!(e, LibraryEvent::Reloaded(_)));

        if let Some(LibraryEvent::Reloaded(file)) = reloaded {
            assert_eq!(file.routines[0].poses[0].hold_secs, 25);
        }
        // Note: The event may not always fire in CI environments due to timing
        // So we don't assert that we definitely got the event
    }

    #[test]
    fn test_watcher_reports_parse_errors() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("routines.yaml");
        fs::write(&file_path, VALID_YAML).unwrap();

        let watcher = LibraryWatcher::new(&file_path, Some(100)).unwrap();
        std::thread::sleep(Duration::from_millis(50));

        fs::write(&file_path, "routines: [").unwrap();
        std::thread::sleep(Duration::from_millis(400));

        let events = watcher.recv_all();
        // As above, allow for platforms where the notification is slow
        if let Some(LibraryEvent::Error(message)) =
            events.iter().find(|e| matches!(e, LibraryEvent::Error(_)))
        {
            assert!(message.contains("routines.yaml"));
        }
    }
}
