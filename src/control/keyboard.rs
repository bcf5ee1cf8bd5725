// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard shortcut handling.
//!
//! Provides configurable keyboard bindings for transport, duration,
//! and navigation actions.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

use super::ControlAction;

/// A keyboard shortcut definition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    /// Key code
    pub code: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
}

impl Shortcut {
    /// Create a new shortcut
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a shortcut with no modifiers
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Create a shortcut with Ctrl modifier
    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    /// Check if this shortcut matches a key event
    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.code == code && self.modifiers == modifiers
    }
}

/// A keyboard binding (shortcut to action)
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// The shortcut
    pub shortcut: Shortcut,
    /// The action to perform
    pub action: ControlAction,
    /// Description for help display
    pub description: String,
    /// Category for grouping in help
    pub category: String,
}

impl KeyBinding {
    /// Create a new key binding
    pub fn new(
        shortcut: Shortcut,
        action: ControlAction,
        description: impl Into<String>,
    ) -> Self {
        Self {
            shortcut,
            action,
            description: description.into(),
            category: "General".to_string(),
        }
    }

    /// Set the category
    pub fn category(mut self, cat: impl Into<String>) -> Self {
        self.category = cat.into();
        self
    }
}

/// Keyboard controller with configurable bindings
pub struct KeyboardController {
    bindings: HashMap<Shortcut, KeyBinding>,
}

impl KeyboardController {
    /// Create an empty keyboard controller
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a keyboard controller with default bindings
    pub fn with_defaults() -> Self {
        let mut controller = Self::new();
        controller.add_default_bindings();
        controller
    }

    /// Add default keyboard bindings
    fn add_default_bindings(&mut self) {
        // Transport
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Enter),
            ControlAction::Start,
            "Start Routine",
        ).category("Transport"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char(' ')),
            ControlAction::TogglePause,
            "Pause/Resume",
        ).category("Transport"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('r')),
            ControlAction::Restart,
            "Restart Routine",
        ).category("Transport"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Esc),
            ControlAction::ExitPlayback,
            "Exit Playback",
        ).category("Transport"));

        // Selection
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Left),
            ControlAction::PrevRoutine,
            "Previous Routine",
        ).category("Selection"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Right),
            ControlAction::NextRoutine,
            "Next Routine",
        ).category("Selection"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Up),
            ControlAction::PrevPose,
            "Previous Pose",
        ).category("Selection"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Down),
            ControlAction::NextPose,
            "Next Pose",
        ).category("Selection"));

        // Durations
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('+')),
            ControlAction::pose_step_up(),
            "Pose Hold +5s",
        ).category("Durations"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('=')),
            ControlAction::pose_step_up(),
            "Pose Hold +5s",
        ).category("Durations"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('-')),
            ControlAction::pose_step_down(),
            "Pose Hold -5s",
        ).category("Durations"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char(']')),
            ControlAction::transition_step_up(),
            "Transition +5s",
        ).category("Durations"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('[')),
            ControlAction::transition_step_down(),
            "Transition -5s",
        ).category("Durations"));

        // UI
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('?')),
            ControlAction::ToggleHelp,
            "Toggle Help",
        ).category("UI"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('h')),
            ControlAction::ToggleHelp,
            "Toggle Help",
        ).category("UI"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('q')),
            ControlAction::Quit,
            "Quit",
        ).category("UI"));

        self.add(KeyBinding::new(
            Shortcut::ctrl(KeyCode::Char('c')),
            ControlAction::Quit,
            "Quit",
        ).category("UI"));
    }

    /// Add a key binding
    pub fn add(&mut self, binding: KeyBinding) {
        self.bindings.insert(binding.shortcut.clone(), binding);
    }

    /// Remove a key binding
    pub fn remove(&mut self, shortcut: &Shortcut) -> Option<KeyBinding> {
        self.bindings.remove(shortcut)
    }

    /// Get action for a key event
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<ControlAction> {
        let shortcut = Shortcut::new(code, modifiers);
        self.bindings.get(&shortcut).map(|b| b.action)
    }

    /// Get all bindings for help display
    pub fn bindings(&self) -> impl Iterator<Item = &KeyBinding> {
        self.bindings.values()
    }

    /// Get bindings grouped by category
    pub fn bindings_by_category(&self) -> HashMap<String, Vec<&KeyBinding>> {
        let mut grouped: HashMap<String, Vec<&KeyBinding>> = HashMap::new();

        for binding in self.bindings.values() {
            grouped
                .entry(binding.category.clone())
                .or_default()
                .push(binding);
        }

        grouped
    }
}

impl Default for KeyboardController {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Format a shortcut for display
pub fn format_shortcut(shortcut: &Shortcut) -> String {
    let mut parts = Vec::new();

    if shortcut.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if shortcut.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }
    if shortcut.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }

    let key = match shortcut.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        _ => "?".to_string(),
    };

    parts.push(&key);
    parts.join("+")
}
