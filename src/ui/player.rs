// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Playback screen widget.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::player::Phase;
use crate::routine::Routine;

/// Full-screen countdown display for active playback
pub struct PlayerScreenWidget<'a> {
    routine: &'a Routine,
    phase: Phase,
    remaining: u32,
    paused: bool,
    transition_secs: u32,
}

impl<'a> PlayerScreenWidget<'a> {
    /// Create the playback screen
    pub fn new(
        routine: &'a Routine,
        phase: Phase,
        remaining: u32,
        paused: bool,
        transition_secs: u32,
    ) -> Self {
        Self {
            routine,
            phase,
            remaining,
            paused,
            transition_secs,
        }
    }
}

impl Widget for PlayerScreenWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Top padding
                Constraint::Length(1), // Phase title
                Constraint::Length(1), // Subtitle
                Constraint::Length(3), // Countdown
                Constraint::Length(1), // Info line
                Constraint::Length(1), // Paused marker
                Constraint::Min(0),    // Bottom padding
            ])
            .split(area);

        let title_style = if self.phase.is_transition() {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };
        Paragraph::new(phase_title(self.routine, self.phase))
            .style(title_style)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        Paragraph::new(subtitle(self.phase, self.transition_secs))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        let countdown = Line::from(Span::styled(
            format!("{}s", self.remaining),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        Paragraph::new(vec![Line::from(""), countdown])
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        Paragraph::new(info_line(self.routine, self.phase))
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);

        if self.paused {
            Paragraph::new(Span::styled(
                "‖ PAUSED",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
        }
    }
}

/// Headline for the current phase: the held pose's name, or a
/// transition label while moving between poses
fn phase_title(routine: &Routine, phase: Phase) -> String {
    match phase {
        Phase::Transition(_) => "Transition".to_string(),
        Phase::Pose(i) => routine
            .poses
            .get(i)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Pose".to_string()),
    }
}

/// One-line instruction under the headline
fn subtitle(phase: Phase, transition_secs: u32) -> String {
    if phase.is_transition() {
        format!("Take {}s to switch poses", transition_secs)
    } else {
        "Hold this pose".to_string()
    }
}

/// What comes after the current phase
fn info_line(routine: &Routine, phase: Phase) -> String {
    let next = routine.poses.get(phase.pose_index() + 1);
    match (phase, next) {
        (Phase::Transition(_), Some(pose)) => {
            format!("Up next: {} — {}s", pose.name, pose.hold_secs)
        }
        (Phase::Transition(_), None) => "Get ready to finish strong.".to_string(),
        (Phase::Pose(_), Some(pose)) => format!("Next: {} — {}s", pose.name, pose.hold_secs),
        (Phase::Pose(_), None) => "This is the last pose.".to_string(),
    }
}
