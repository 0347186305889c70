//! Transport bar widget - tempo, meter, sound and play state

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_metronome::modifiers::TimerMode;

use super::UiState;

/// Render the transport bar
pub fn render_transport(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default().title(" metronome ").borders(Borders::ALL);

    let play_symbol = if state.is_playing { "▶" } else { "■" };
    let play_state_str = if state.is_playing { "Playing" } else { "Ready" };

    let main = Line::from(vec![
        Span::styled(
            format!(" BPM: {:>3}  ", state.bpm),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{play_symbol} {play_state_str}  "),
            Style::default().fg(if state.is_playing {
                Color::Green
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(
            format!("{}  ", state.time_signature),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{}  ", state.subdivision.label()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("sound: {}  ", state.sound),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            format!("vol: {:.0}%  ", state.volume * 100.0),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            if state.accent_first_beat {
                "accent"
            } else {
                "no accent"
            },
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("  {:.1}kHz", state.sample_rate as f32 / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let mut modifiers = vec![Span::raw(" ")];
    if state.muted_enabled {
        modifiers.push(Span::styled(
            if state.is_silent { "MUTED BAR  " } else { "muted bars  " },
            Style::default().fg(if state.is_silent {
                Color::Red
            } else {
                Color::Yellow
            }),
        ));
    }
    if state.trainer_enabled {
        modifiers.push(Span::styled(
            format!(
                "trainer → {} BPM ({:.0}%)  ",
                state.trainer_target,
                state.trainer_progress * 100.0
            ),
            Style::default().fg(Color::Yellow),
        ));
    }
    if state.timer_enabled {
        let mode = match state.timer_mode {
            TimerMode::Countdown => "⏳",
            TimerMode::Stopwatch => "⏱",
        };
        modifiers.push(Span::styled(
            format!("{mode} {}  ", state.timer_display),
            Style::default().fg(Color::Yellow),
        ));
    }
    modifiers.push(Span::styled(
        format!(
            "practiced {}m over {} session(s)",
            state.stats.total_practice_secs / 60,
            state.stats.sessions
        ),
        Style::default().fg(Color::DarkGray),
    ));
    if let Some(status) = &state.status {
        modifiers.push(Span::styled(
            format!("  {status}"),
            Style::default().fg(Color::Green),
        ));
    }

    let paragraph = Paragraph::new(vec![main, Line::from(modifiers)]).block(block);
    frame.render_widget(paragraph, area);
}
