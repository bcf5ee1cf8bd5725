// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Routine browser widgets for the idle/editing screen.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::routine::{Routine, RoutineLibrary};

/// Horizontal routine selector chips
pub struct RoutineChipsWidget<'a> {
    library: &'a RoutineLibrary,
    selected: usize,
}

impl<'a> RoutineChipsWidget<'a> {
    /// Create chips for a library with one selected entry
    pub fn new(library: &'a RoutineLibrary, selected: usize) -> Self {
        Self { library, selected }
    }
}

impl Widget for RoutineChipsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.library.is_empty() {
            return;
        }

        let constraints: Vec<Constraint> = self
            .library
            .routines()
            .iter()
            .map(|r| Constraint::Length(r.name.len().max(8) as u16 + 4))
            .collect();

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (i, routine) in self.library.routines().iter().enumerate() {
            if i >= chunks.len() {
                break;
            }
            let selected = i == self.selected;
            let (name_style, meta_style) = if selected {
                (
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::Cyan),
                )
            } else {
                (
                    Style::default().fg(Color::White),
                    Style::default().fg(Color::DarkGray),
                )
            };

            let marker = if selected { "▸ " } else { "  " };
            let lines = vec![
                Line::from(vec![
                    Span::styled(marker, name_style),
                    Span::styled(routine.name.clone(), name_style),
                ]),
                Line::from(Span::styled(
                    format!("  {} poses", routine.pose_count()),
                    meta_style,
                )),
            ];
            Paragraph::new(lines).render(chunks[i], buf);
        }
    }
}

/// Card summarizing the selected routine
pub struct RoutineCardWidget<'a> {
    routine: &'a Routine,
    total_secs: u32,
    block: Option<Block<'a>>,
}

impl<'a> RoutineCardWidget<'a> {
    /// Create a card for a routine with its derived total time
    pub fn new(routine: &'a Routine, total_secs: u32) -> Self {
        Self {
            routine,
            total_secs,
            block: None,
        }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for RoutineCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    self.routine.name.clone(),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{}s total", self.total_secs),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            Line::from(Span::styled(
                self.routine.description.clone(),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format!("{} poses", self.routine.pose_count()),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        Paragraph::new(lines).render(area, buf);
    }
}

/// Shared transition duration row
pub struct TransitionRowWidget<'a> {
    transition_secs: u32,
    block: Option<Block<'a>>,
}

impl<'a> TransitionRowWidget<'a> {
    /// Create a row showing the current transition duration
    pub fn new(transition_secs: u32) -> Self {
        Self {
            transition_secs,
            block: None,
        }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for TransitionRowWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{}s", self.transition_secs),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "  between poses before the next hold begins",
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(Span::styled(
                "[ -5s   ] +5s",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        Paragraph::new(lines).render(area, buf);
    }
}

/// Pose rows with a highlight for duration editing
pub struct PoseListWidget<'a> {
    routine: &'a Routine,
    highlighted: usize,
    block: Option<Block<'a>>,
}

impl<'a> PoseListWidget<'a> {
    /// Create the pose list with one highlighted row
    pub fn new(routine: &'a Routine, highlighted: usize) -> Self {
        Self {
            routine,
            highlighted,
            block: None,
        }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for PoseListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if self.routine.poses.is_empty() {
            Paragraph::new("No poses in this routine")
                .style(Style::default().fg(Color::DarkGray))
                .render(area, buf);
            return;
        }

        let mut lines = Vec::new();
        for (i, pose) in self.routine.poses.iter().enumerate() {
            let highlighted = i == self.highlighted;
            let marker = if highlighted { "▸ " } else { "  " };
            let name_style = if highlighted {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            lines.push(Line::from(vec![
                Span::styled(marker, name_style),
                Span::styled(format!("{:<20}", pose.name), name_style),
                Span::styled(
                    format!("Hold for {}s", pose.hold_secs),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("  [{}]", pose.art),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }

        Paragraph::new(lines).render(area, buf);
    }
}
