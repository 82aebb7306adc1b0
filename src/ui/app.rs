//! Main TUI application state and logic

use super::panes::{
    render_blocks_pane, render_log_pane, render_map_pane, render_queue_pane, render_status_bar,
    BlocksRenderData, BlocksScrollState, StatusRenderData,
};
use crate::snapshot::{Snapshot, Timeline};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Map,
    Blocks,
    Queue,
    Log,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: map -> log -> blocks -> queue)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Map => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Blocks,
            FocusedPane::Blocks => FocusedPane::Queue,
            FocusedPane::Queue => FocusedPane::Map,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Map => FocusedPane::Queue,
            FocusedPane::Log => FocusedPane::Map,
            FocusedPane::Blocks => FocusedPane::Log,
            FocusedPane::Queue => FocusedPane::Blocks,
        }
    }
}

/// The main application state
pub struct App {
    /// Every recorded state of the run
    pub timeline: Timeline,

    /// Index of the snapshot on screen
    pub position: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub blocks_scroll: BlocksScrollState,
    pub queue_scroll: usize,
    pub log_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app positioned at the start of the timeline
    pub fn new(timeline: Timeline) -> Self {
        App {
            timeline,
            position: 0,
            focused_pane: FocusedPane::Map,
            blocks_scroll: BlocksScrollState { offset: 0 },
            queue_scroll: 0,
            log_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_secs(1) {
                if self.step_forward() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Snapshot currently on screen
    pub fn current(&self) -> Option<&Snapshot> {
        self.timeline.get(self.position)
    }

    /// Number of instructions in the run
    pub fn total_steps(&self) -> usize {
        self.timeline.len().saturating_sub(1)
    }

    /// Advance one instruction; false at the end of the timeline
    pub fn step_forward(&mut self) -> bool {
        if self.position < self.total_steps() {
            self.position += 1;
            self.log_scroll = usize::MAX;
            true
        } else {
            false
        }
    }

    /// Go back one instruction; false at the start
    pub fn step_backward(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            self.log_scroll = usize::MAX;
            true
        } else {
            false
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let Some(snapshot) = self.timeline.get(self.position) else {
            return;
        };
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Map (top) | Log (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[0]);

        // Right column: Blocks (top) | Queue (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        render_map_pane(
            frame,
            left_rows[0],
            &snapshot.space,
            self.focused_pane == FocusedPane::Map,
        );

        render_log_pane(
            frame,
            left_rows[1],
            &snapshot.log,
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        render_blocks_pane(
            frame,
            right_rows[0],
            BlocksRenderData {
                space: &snapshot.space,
                last_outcome: snapshot.last_outcome.as_ref(),
            },
            self.focused_pane == FocusedPane::Blocks,
            &mut self.blocks_scroll,
        );

        render_queue_pane(
            frame,
            right_rows[1],
            &snapshot.pending,
            self.focused_pane == FocusedPane::Queue,
            &mut self.queue_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                strategy: self.timeline.strategy(),
                current_step: self.position,
                total_steps: self.timeline.len().saturating_sub(1),
                last_failed: snapshot
                    .last_outcome
                    .as_ref()
                    .is_some_and(|o| o.is_failure()),
                is_playing: self.is_playing,
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let stepped = (0..n).take_while(|_| self.step_forward()).count();
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.status_message = if self.step_backward() {
                    "Stepped backward".to_string()
                } else {
                    "Cannot step backward: already at start".to_string()
                };
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.status_message = if self.step_forward() {
                    self.outcome_message()
                } else {
                    "Cannot step forward: queue drained".to_string()
                };
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Map => {}
                FocusedPane::Blocks => {
                    self.blocks_scroll.offset = self.blocks_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Queue => {
                    self.queue_scroll = self.queue_scroll.saturating_sub(1);
                }
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Map => {}
                FocusedPane::Blocks => {
                    self.blocks_scroll.offset = self.blocks_scroll.offset.saturating_add(1);
                }
                FocusedPane::Queue => {
                    self.queue_scroll = self.queue_scroll.saturating_add(1);
                }
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(Duration::from_secs(1))
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.position = self.total_steps();
                self.log_scroll = usize::MAX;
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.position = 0;
                self.log_scroll = 0;
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    /// Report line of the instruction that produced the current snapshot
    fn outcome_message(&self) -> String {
        self.current()
            .and_then(|s| s.last_outcome.as_ref())
            .map_or_else(|| "Stepped forward".to_string(), |o| o.to_string())
    }
}
