//! Beat indicator - one cell per beat, lit when the beat sounds

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::UiState;

/// Render the beat cells and the setlist
pub fn render_beats(frame: &mut Frame, area: Rect, state: &UiState, now: Instant) {
    let block = Block::default().title(" Beats ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width < 4 {
        return;
    }

    let lit = state.lit_at(now);
    let beats = state.time_signature.beats_per_measure();
    let mut spans = Vec::with_capacity(beats as usize);

    for beat in 0..beats {
        let is_lit = lit == Some(beat);
        let is_downbeat = beat == 0 && state.accent_first_beat;
        let color = match (is_lit, is_downbeat, state.is_silent) {
            (true, _, true) => Color::DarkGray,
            (true, true, false) => Color::Red,
            (true, false, false) => Color::Green,
            (false, _, _) => Color::Gray,
        };
        let style = if is_lit {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(color)
        };
        let cell = if is_lit { " ██ " } else { " ░░ " };
        spans.push(Span::styled(cell, style));
    }

    let mut lines = vec![Line::from(""), Line::from(spans)];

    lines.push(Line::from(""));
    if state.setlist.is_empty() {
        lines.push(Line::from(Span::styled(
            "Setlist empty - [W] saves the current song",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        let songs: Vec<Span> = state
            .setlist
            .iter()
            .enumerate()
            .take(9)
            .map(|(i, name)| {
                let style = if state.setlist_current == Some(i) {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                Span::styled(format!("[{}] {}  ", i + 1, name), style)
            })
            .collect();
        lines.push(Line::from(songs));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}
