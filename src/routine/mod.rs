// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Routine data model.
//!
//! A routine is an ordered list of timed poses sharing a theme. Pose
//! hold durations are whole seconds and never drop below
//! [`MIN_DURATION`]; adjustments clamp rather than reject.

/// Minimum hold duration for a pose, in seconds
pub const MIN_DURATION: u32 = 5;

/// Minimum transition duration between poses, in seconds
pub const MIN_TRANSITION: u32 = 5;

/// Transition duration used until the user changes it
pub const DEFAULT_TRANSITION_SECONDS: u32 = 10;

/// Seconds added or removed per duration adjustment
pub const ADJUST_STEP: i64 = 5;

/// One timed hold within a routine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pose {
    /// Stable identifier, unique across the whole library
    pub id: String,
    /// Display name
    pub name: String,
    /// Hold duration in seconds (>= MIN_DURATION)
    pub hold_secs: u32,
    /// Opaque art reference for the presentation layer
    pub art: String,
}

impl Pose {
    /// Create a pose, clamping the hold duration to the minimum
    pub fn new(id: impl Into<String>, name: impl Into<String>, hold_secs: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hold_secs: hold_secs.max(MIN_DURATION),
            art: String::new(),
        }
    }

    /// Builder: set the art reference
    pub fn with_art(mut self, art: impl Into<String>) -> Self {
        self.art = art.into();
        self
    }

    /// Apply a signed delta to the hold duration, clamping at the
    /// minimum. Returns the new value.
    pub fn adjust_hold(&mut self, delta: i64) -> u32 {
        let next = self.hold_secs as i64 + delta;
        self.hold_secs = next.max(MIN_DURATION as i64) as u32;
        self.hold_secs
    }
}

/// An ordered collection of poses sharing a theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routine {
    /// Stable identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Short description for the browser card
    pub description: String,
    /// Poses in playback order; may be empty
    pub poses: Vec<Pose>,
}

impl Routine {
    /// Create an empty routine
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            poses: Vec::new(),
        }
    }

    /// Builder: set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: append a pose
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.poses.push(pose);
        self
    }

    /// Number of poses
    pub fn pose_count(&self) -> usize {
        self.poses.len()
    }

    /// Hold duration of the first pose, or 0 for an empty routine.
    /// This is what the idle countdown readout mirrors.
    pub fn first_hold_secs(&self) -> u32 {
        self.poses.first().map(|p| p.hold_secs).unwrap_or(0)
    }

    /// Total playback time: every hold plus one transition per gap.
    /// A routine of N poses has exactly N-1 gaps, zero when N <= 1.
    pub fn total_secs(&self, transition_secs: u32) -> u32 {
        let holds: u32 = self.poses.iter().map(|p| p.hold_secs).sum();
        let gaps = self.poses.len().saturating_sub(1) as u32;
        holds + gaps * transition_secs
    }
}

/// All routines known to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineLibrary {
    routines: Vec<Routine>,
}

impl RoutineLibrary {
    /// Create a library from a list of routines
    pub fn new(routines: Vec<Routine>) -> Self {
        Self { routines }
    }

    /// All routines in display order
    pub fn routines(&self) -> &[Routine] {
        &self.routines
    }

    /// Number of routines
    pub fn len(&self) -> usize {
        self.routines.len()
    }

    /// Whether the library holds no routines
    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }

    /// Look up a routine by id
    pub fn get(&self, id: &str) -> Option<&Routine> {
        self.routines.iter().find(|r| r.id == id)
    }

    /// Index of a routine by id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.routines.iter().position(|r| r.id == id)
    }

    /// Routine at a display index
    pub fn at(&self, index: usize) -> Option<&Routine> {
        self.routines.get(index)
    }

    /// Adjust one pose's hold duration by id, across all routines.
    /// Clamps at [`MIN_DURATION`]; returns the new value, or `None`
    /// when no pose carries the id (the command is then a no-op).
    pub fn adjust_pose_duration(&mut self, pose_id: &str, delta: i64) -> Option<u32> {
        self.routines
            .iter_mut()
            .flat_map(|r| r.poses.iter_mut())
            .find(|p| p.id == pose_id)
            .map(|p| p.adjust_hold(delta))
    }

    /// The built-in seed set shipped with the player
    pub fn sample() -> Self {
        Self::new(vec![
            Routine::new("lower-back", "Lower Back")
                .with_description("Stretches and gentle twists for lower back relief.")
                .with_pose(Pose::new("lb-1", "Child's Pose", 30).with_art("child-pose"))
                .with_pose(Pose::new("lb-2", "Cat-Cow", 40).with_art("cat-cow"))
                .with_pose(Pose::new("lb-3", "Knees-to-Chest", 30).with_art("knees-chest")),
            Routine::new("shoulder", "Shoulder")
                .with_description("Open up tight shoulders and upper back.")
                .with_pose(Pose::new("s-1", "Shoulder Rolls", 20).with_art("shoulder-rolls"))
                .with_pose(Pose::new("s-2", "Eagle Arms", 30).with_art("eagle-arms"))
                .with_pose(Pose::new("s-3", "Thread the Needle", 40).with_art("thread-needle")),
            Routine::new("neck", "Neck")
                .with_description("Gentle neck stretches to ease tension.")
                .with_pose(Pose::new("n-1", "Neck Tilt", 15).with_art("neck-tilt"))
                .with_pose(Pose::new("n-2", "Neck Turn", 15).with_art("neck-turn"))
                .with_pose(Pose::new("n-3", "Chin Tuck", 20).with_art("chin-tuck")),
        ])
    }
}

impl Default for RoutineLibrary {
    fn default() -> Self {
        Self::sample()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pose_clamps_on_creation() {
        let pose = Pose::new("p-1", "Test", 2);
        assert_eq!(pose.hold_secs, MIN_DURATION);

        let pose = Pose::new("p-2", "Test", 30);
        assert_eq!(pose.hold_secs, 30);
    }

    #[test]
    fn test_adjust_hold_clamps() {
        let mut pose = Pose::new("p-1", "Test", 30);

        assert_eq!(pose.adjust_hold(5), 35);
        assert_eq!(pose.adjust_hold(-1000), MIN_DURATION);
        assert_eq!(pose.adjust_hold(-5), MIN_DURATION);
        assert_eq!(pose.adjust_hold(5), 10);
    }

    #[test]
    fn test_routine_builder() {
        let routine = Routine::new("r-1", "Test")
            .with_description("A test routine")
            .with_pose(Pose::new("p-1", "First", 30))
            .with_pose(Pose::new("p-2", "Second", 40));

        assert_eq!(routine.pose_count(), 2);
        assert_eq!(routine.description, "A test routine");
        assert_eq!(routine.first_hold_secs(), 30);
    }

    #[test]
    fn test_total_secs() {
        let routine = Routine::new("r-1", "Test")
            .with_pose(Pose::new("p-1", "A", 30))
            .with_pose(Pose::new("p-2", "B", 40))
            .with_pose(Pose::new("p-3", "C", 30));

        // 100s of holds + 2 gaps
        assert_eq!(routine.total_secs(10), 120);
        assert_eq!(routine.total_secs(5), 110);
    }

    #[test]
    fn test_total_secs_edge_counts() {
        let empty = Routine::new("r-1", "Empty");
        assert_eq!(empty.total_secs(10), 0);
        assert_eq!(empty.first_hold_secs(), 0);

        // A single pose has no gap regardless of transition value
        let single = Routine::new("r-2", "Single").with_pose(Pose::new("p-1", "Only", 25));
        assert_eq!(single.total_secs(10), 25);
        assert_eq!(single.total_secs(600), 25);
    }

    #[test]
    fn test_library_lookup() {
        let library = RoutineLibrary::sample();

        assert_eq!(library.len(), 3);
        assert_eq!(library.get("shoulder").unwrap().name, "Shoulder");
        assert_eq!(library.index_of("neck"), Some(2));
        assert!(library.get("hips").is_none());
        assert!(library.at(0).is_some());
        assert!(library.at(9).is_none());
    }

    #[test]
    fn test_library_adjusts_pose_by_id() {
        let mut library = RoutineLibrary::sample();

        assert_eq!(library.adjust_pose_duration("lb-2", 5), Some(45));
        assert_eq!(library.get("lower-back").unwrap().poses[1].hold_secs, 45);

        // Unknown id is a no-op
        assert_eq!(library.adjust_pose_duration("nope", 5), None);
    }

    #[test]
    fn test_library_adjust_never_below_floor() {
        let mut library = RoutineLibrary::sample();
        assert_eq!(library.adjust_pose_duration("n-1", -1000), Some(MIN_DURATION));
    }

    #[test]
    fn test_sample_durations() {
        let library = RoutineLibrary::sample();
        let lower_back = library.get("lower-back").unwrap();

        assert_eq!(lower_back.first_hold_secs(), 30);
        assert_eq!(lower_back.total_secs(DEFAULT_TRANSITION_SECONDS), 120);
    }
}
