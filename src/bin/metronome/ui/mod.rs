//! TUI module for the metronome
//!
//! Draws the transport and beat indicator, turns key presses into calls on
//! the shared core, and lights beats from the scheduler's visual cues.

mod beats;
pub mod state;
mod transport;

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use saavy_metronome::{
    engine::FrameClock,
    modifiers::MutedBarsConfig,
    notify::Notification,
    runtime::MetronomeRuntime,
    synth::ClickRenderer,
};

pub use state::UiState;

use beats::render_beats;
use transport::render_transport;

type Runtime = MetronomeRuntime<FrameClock, ClickRenderer>;

const VOLUME_STEP: f32 = 0.05;

/// UI application state
pub struct UiApp {
    runtime: Runtime,
    /// Notifications from the core (beats, completions)
    notifications: Consumer<Notification>,
    /// Beat cues waiting for their due time
    pending_beats: VecDeque<(Instant, u32)>,
    state: UiState,
    should_quit: bool,
}

impl UiApp {
    pub fn new(runtime: Runtime, notifications: Consumer<Notification>, sample_rate: u32) -> Self {
        Self {
            runtime,
            notifications,
            pending_beats: VecDeque::new(),
            state: UiState::new(sample_rate),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_notifications();
            self.fire_due_beats(Instant::now());
            self.runtime.with(|m| self.state.capture(m));

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key)?;
                    }
                }
            }
        }

        self.runtime.stop();
        Ok(())
    }

    fn poll_notifications(&mut self) {
        let now = Instant::now();
        while let Ok(notification) = self.notifications.pop() {
            match notification {
                Notification::Beat(cue) => self.pending_beats.push_back((now + cue.delay, cue.beat)),
                Notification::PlaybackStarted => self.state.status = None,
                Notification::PlaybackStopped => self.pending_beats.clear(),
                Notification::TrainerProgress { progress, .. } => {
                    self.state.trainer_progress = progress;
                }
                Notification::TrainerComplete => {
                    self.state.status = Some("Tempo trainer complete!".to_string());
                }
                Notification::TimerComplete => {
                    self.state.status = Some("Practice time complete!".to_string());
                }
                Notification::BpmChanged(_)
                | Notification::MutedBarsChanged { .. }
                | Notification::TimerTick { .. } => {}
            }
        }
    }

    /// Light every cue whose beat has sounded
    fn fire_due_beats(&mut self, now: Instant) {
        while let Some(&(due, beat)) = self.pending_beats.front() {
            if due > now {
                break;
            }
            self.pending_beats.pop_front();
            self.state.flash(beat, due);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EyreResult<()> {
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            10
        } else {
            1
        };

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                self.runtime
                    .toggle()
                    .wrap_err("failed to start the metronome ticker")?;
            }
            KeyCode::Up => {
                self.runtime.with(|m| m.adjust_bpm(step));
            }
            KeyCode::Down => {
                self.runtime.with(|m| m.adjust_bpm(-step));
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.runtime.with(|m| m.tap(Instant::now()));
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.runtime.with(|m| m.reset_to_defaults());
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.runtime.with(|m| m.set_sound_type(m.sound_type().next()));
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.runtime
                    .with(|m| m.set_subdivision(m.tempo().subdivision().next()));
            }
            KeyCode::Char('m') | KeyCode::Char('M') => {
                self.runtime
                    .with(|m| m.set_time_signature(m.tempo().time_signature().next_preset()));
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.runtime
                    .with(|m| m.set_accent_first_beat(!m.tempo().accent_first_beat()));
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.runtime.with(|m| m.set_volume(m.volume() + VOLUME_STEP));
            }
            KeyCode::Char('-') | KeyCode::Char('_') => {
                self.runtime.with(|m| m.set_volume(m.volume() - VOLUME_STEP));
            }
            KeyCode::Char('b') | KeyCode::Char('B') => {
                self.runtime.with(|m| {
                    let current = m.muted_bars();
                    m.set_muted_bars(MutedBarsConfig::new(
                        !current.enabled,
                        current.play_bars(),
                        current.silent_bars(),
                    ));
                });
            }
            KeyCode::Char('g') | KeyCode::Char('G') => {
                self.runtime.with(|m| {
                    let mut trainer = m.trainer();
                    trainer.enabled = !trainer.enabled;
                    m.set_trainer(trainer);
                });
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.runtime
                    .with(|m| m.set_practice_timer_enabled(!m.practice_timer_enabled()));
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                let index = self.runtime.with(|m| m.save_to_setlist(""));
                self.state.status = Some(format!("Saved as song {}", index + 1));
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as u8 - b'1') as usize;
                self.runtime.with(|m| m.load_setlist_entry(index));
            }
            _ => {}
        }

        Ok(())
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Transport bar
                Constraint::Min(6),    // Beats + setlist
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_transport(frame, chunks[0], &self.state);
        render_beats(frame, chunks[1], &self.state, Instant::now());

        let help = Paragraph::new(
            " [Space] Play/Stop  [↑↓] BPM (Shift ±10)  [T] Tap  [M] Meter  [D] Subdiv  [S] Sound  \
             [A] Accent  [+/-] Vol  [B] Muted  [G] Trainer  [P] Timer  [W] Save  [1-9] Recall  [R] Reset  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[2]);
    }
}
