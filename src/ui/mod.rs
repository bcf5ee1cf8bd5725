// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for the poseflow routine player.
//!
//! Provides a ratatui-based interface with a routine browser for the
//! idle/editing mode and a countdown screen for playback.

mod browser;
mod player;

pub use browser::{PoseListWidget, RoutineCardWidget, RoutineChipsWidget, TransitionRowWidget};
pub use player::PlayerScreenWidget;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::control::{format_shortcut, KeyboardController};
use crate::player::PlaybackController;

/// UI-only state: overlay flags and the browser's pose highlight
#[derive(Debug, Clone)]
pub struct UiState {
    /// Help overlay visible
    pub show_help: bool,
    /// Index of the highlighted pose row in the browser
    pub highlighted_pose: usize,
    /// Status message
    pub status_message: Option<String>,
    /// Status message timestamp
    status_time: Option<Instant>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_help: false,
            highlighted_pose: 0,
            status_message: None,
            status_time: None,
        }
    }
}

impl UiState {
    /// Set a status message that will be displayed temporarily
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_time = Some(Instant::now());
    }

    /// Clear expired status message
    pub fn clear_expired_status(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_time = None;
            }
        }
    }

    /// Move the pose highlight down, clamped to the routine length
    pub fn highlight_next_pose(&mut self, pose_count: usize) {
        if pose_count > 0 && self.highlighted_pose + 1 < pose_count {
            self.highlighted_pose += 1;
        }
    }

    /// Move the pose highlight up
    pub fn highlight_prev_pose(&mut self) {
        self.highlighted_pose = self.highlighted_pose.saturating_sub(1);
    }

    /// Keep the highlight valid after the routine or library changed
    pub fn clamp_highlight(&mut self, pose_count: usize) {
        if pose_count == 0 {
            self.highlighted_pose = 0;
        } else if self.highlighted_pose >= pose_count {
            self.highlighted_pose = pose_count - 1;
        }
    }
}

/// Terminal UI application
pub struct App {
    /// Terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Target frame rate
    frame_rate: u32,
}

impl App {
    /// Create the app and take over the terminal
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            frame_rate: 30,
        })
    }

    /// Set frame rate
    pub fn set_frame_rate(&mut self, fps: u32) {
        self.frame_rate = fps.clamp(1, 120);
    }

    /// Poll for events, waiting at most one frame or until the next
    /// clock tick is due, whichever is sooner. A zero `next_tick_in`
    /// means no tick is pending (stopped clock) or one is overdue;
    /// either way the full frame wait applies and the caller handles
    /// the tick right after.
    pub fn poll_event(&self, next_tick_in: Duration) -> io::Result<Option<Event>> {
        let frame = Duration::from_millis(1000 / self.frame_rate as u64);
        let timeout = if next_tick_in.is_zero() {
            frame
        } else {
            frame.min(next_tick_in)
        };
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Draw the current screen
    pub fn draw(
        &mut self,
        controller: &PlaybackController,
        keyboard: &KeyboardController,
        ui: &UiState,
    ) -> io::Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.area();

            if controller.is_playing() {
                render_player_screen(frame, area, controller, ui);
            } else {
                render_browser_screen(frame, area, controller, ui);
            }

            if ui.show_help {
                render_help_overlay(frame, area, keyboard);
            }
        })?;

        Ok(())
    }

    /// Cleanup terminal on drop
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the idle/editing screen
fn render_browser_screen(
    frame: &mut Frame,
    area: Rect,
    controller: &PlaybackController,
    ui: &UiState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(4), // Routine chips
            Constraint::Length(6), // Routine card
            Constraint::Length(4), // Transition row
            Constraint::Min(6),    // Pose list
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Pose Routine Player",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Pick a body area, tweak durations, start the flow.",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(title, chunks[0]);

    frame.render_widget(
        RoutineChipsWidget::new(controller.library(), controller.selected_index()),
        chunks[1],
    );

    if let Some(routine) = controller.selected_routine() {
        frame.render_widget(
            RoutineCardWidget::new(routine, controller.total_secs())
                .block(Block::default().borders(Borders::ALL).title(" Routine ")),
            chunks[2],
        );
        frame.render_widget(
            TransitionRowWidget::new(controller.transition_secs())
                .block(Block::default().borders(Borders::ALL).title(" Transition ")),
            chunks[3],
        );
        frame.render_widget(
            PoseListWidget::new(routine, ui.highlighted_pose)
                .block(Block::default().borders(Borders::ALL).title(" Poses ")),
            chunks[4],
        );
    } else {
        let empty = Paragraph::new("No routines loaded")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, chunks[2]);
    }

    render_status_bar(frame, chunks[5], ui, BROWSER_HINTS);
}

/// Render the playback screen
fn render_player_screen(
    frame: &mut Frame,
    area: Rect,
    controller: &PlaybackController,
    ui: &UiState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(1)])
        .split(area);

    if let Some(routine) = controller.selected_routine() {
        frame.render_widget(
            PlayerScreenWidget::new(
                routine,
                controller.phase(),
                controller.remaining_secs(),
                controller.is_paused(),
                controller.transition_secs(),
            ),
            chunks[0],
        );
    }

    render_status_bar(frame, chunks[1], ui, PLAYER_HINTS);
}

const BROWSER_HINTS: &str =
    " Enter: Start | ←/→: Routine | ↑/↓: Pose | +/-: Hold ±5s | [/]: Transition ±5s | h: Help | q: Quit";
const PLAYER_HINTS: &str = " Space: Pause/Resume | r: Restart | Esc: Exit | q: Quit";

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect, ui: &UiState, hints: &str) {
    let text = if let Some(ref msg) = ui.status_message {
        Span::styled(msg.clone(), Style::default().fg(Color::Yellow))
    } else {
        Span::styled(hints, Style::default().fg(Color::DarkGray))
    };

    frame.render_widget(Paragraph::new(Line::from(text)), area);
}

/// Render help overlay built from the live key bindings
fn render_help_overlay(frame: &mut Frame, area: Rect, keyboard: &KeyboardController) {
    let width = 52.min(area.width.saturating_sub(4));
    let height = 20.min(area.height.saturating_sub(4));
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let help_area = Rect::new(x, y, width, height);

    // Clear background
    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Black)),
        help_area,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let grouped = keyboard.bindings_by_category();
    let mut categories: Vec<&String> = grouped.keys().collect();
    categories.sort();

    let mut lines = Vec::new();
    for category in categories {
        lines.push(Line::from(Span::styled(
            category.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let mut bindings = grouped[category].clone();
        bindings.sort_by(|a, b| a.description.cmp(&b.description));
        for binding in bindings {
            lines.push(Line::from(format!(
                "  {:<12}{}",
                format_shortcut(&binding.shortcut),
                binding.description
            )));
        }
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_state_status() {
        let mut ui = UiState::default();
        assert!(ui.status_message.is_none());

        ui.set_status("Test message");
        assert_eq!(ui.status_message, Some("Test message".to_string()));
    }

    #[test]
    fn test_highlight_navigation_clamps() {
        let mut ui = UiState::default();

        ui.highlight_next_pose(3);
        ui.highlight_next_pose(3);
        assert_eq!(ui.highlighted_pose, 2);
        ui.highlight_next_pose(3);
        assert_eq!(ui.highlighted_pose, 2);

        ui.highlight_prev_pose();
        ui.highlight_prev_pose();
        assert_eq!(ui.highlighted_pose, 0);
        ui.highlight_prev_pose();
        assert_eq!(ui.highlighted_pose, 0);
    }

    #[test]
    fn test_clamp_highlight_after_shrink() {
        let mut ui = UiState::default();
        ui.highlight_next_pose(5);
        ui.highlight_next_pose(5);
        assert_eq!(ui.highlighted_pose, 2);

        ui.clamp_highlight(2);
        assert_eq!(ui.highlighted_pose, 1);

        ui.clamp_highlight(0);
        assert_eq!(ui.highlighted_pose, 0);
    }
}
