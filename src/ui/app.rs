//! Animating renderer: draws every checkpoint and paces the run

use crate::checkpoint::Checkpoint;
use crate::config::MAX_STEP_DELAY;
use crate::errors::VisualizerResult;
use crate::sequencer::{CancelToken, Renderer};
use crate::ui::panes::{render_canvas_pane, render_narration_pane, render_status_bar, StatusRenderData};
use crate::ui::scene::Scene;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

/// Narration lines kept on screen
const NARRATION_HISTORY: usize = 500;
/// Key polling granularity while waiting out a transition
const POLL_INTERVAL: Duration = Duration::from_millis(20);
const MIN_STEP_DELAY: Duration = Duration::from_millis(5);

/// Terminal renderer.
///
/// `on_checkpoint` applies the checkpoint to the [`Scene`], draws a frame and
/// then blocks for the step delay, which is what makes the sequencer wait for
/// the transition to finish before the next checkpoint.
pub struct App<'t, B: Backend> {
    terminal: &'t mut Terminal<B>,
    pub scene: Scene,
    pub title: String,
    pub narration: Vec<String>,
    narration_rx: Receiver<String>,
    cancel: CancelToken,
    pub delay: Duration,
    pub paused: bool,
    pub finished: bool,
}

impl<'t, B: Backend> App<'t, B> {
    pub fn new(
        terminal: &'t mut Terminal<B>,
        title: impl Into<String>,
        narration_rx: Receiver<String>,
        cancel: CancelToken,
        delay: Duration,
    ) -> Self {
        App {
            terminal,
            scene: Scene::new(),
            title: title.into(),
            narration: Vec::new(),
            narration_rx,
            cancel,
            delay,
            paused: false,
            finished: false,
        }
    }

    /// Show the final frame until the user quits
    pub fn finish(&mut self) -> VisualizerResult<()> {
        self.finished = true;
        self.paused = false;
        self.drain_narration();
        self.draw()?;
        while !self.cancel.is_cancelled() {
            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }
        Ok(())
    }

    /// Report a failure in the narration pane and wait for the user
    pub fn fail(&mut self, message: &str) -> VisualizerResult<()> {
        self.narration.push(format!("error: {}", message));
        self.finish()
    }

    fn drain_narration(&mut self) {
        while let Ok(line) = self.narration_rx.try_recv() {
            self.narration.push(line);
        }
        if self.narration.len() > NARRATION_HISTORY {
            let excess = self.narration.len() - NARRATION_HISTORY;
            self.narration.drain(..excess);
        }
    }

    fn draw(&mut self) -> VisualizerResult<()> {
        let scene = &self.scene;
        let narration = &self.narration;
        let status = StatusRenderData {
            title: &self.title,
            checkpoints: scene.applied,
            last: scene.last,
            delay: self.delay,
            paused: self.paused,
            finished: self.finished,
        };
        self.terminal
            .draw(|f| render(f, scene, narration, &status))?;
        Ok(())
    }

    /// Block for the step delay, handling keys; returns early on cancel
    fn wait(&mut self) -> VisualizerResult<()> {
        let started = Instant::now();
        loop {
            if self.cancel.is_cancelled() {
                return Ok(());
            }
            let elapsed = started.elapsed();
            if !self.paused && elapsed >= self.delay {
                return Ok(());
            }
            let timeout = if self.paused {
                POLL_INTERVAL
            } else {
                (self.delay - elapsed).min(POLL_INTERVAL)
            };
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key_event(key) {
                        self.draw()?;
                    }
                }
            }
        }
    }

    /// Returns whether the status bar needs a redraw
    fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.cancel.cancel();
                false
            }
            KeyCode::Char(' ') if !self.finished => {
                self.paused = !self.paused;
                true
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.delay = (self.delay / 2).max(MIN_STEP_DELAY);
                true
            }
            KeyCode::Char('-') => {
                self.delay = (self.delay * 2).min(MAX_STEP_DELAY);
                true
            }
            _ => false,
        }
    }
}

impl<B: Backend> Renderer for App<'_, B> {
    fn on_checkpoint(&mut self, checkpoint: Checkpoint) -> VisualizerResult<()> {
        self.scene.apply(&checkpoint);
        self.drain_narration();
        self.draw()?;
        if !self.delay.is_zero() || self.paused {
            self.wait()?;
        }
        Ok(())
    }
}

fn render(frame: &mut Frame, scene: &Scene, narration: &[String], status: &StatusRenderData) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
        .split(rows[0]);

    render_canvas_pane(frame, columns[0], scene, status.title);
    render_narration_pane(frame, columns[1], narration);
    render_status_bar(frame, rows[1], status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::Stack;
    use crate::sequencer::Sequencer;
    use ratatui::backend::TestBackend;
    use std::sync::mpsc;

    #[test]
    fn test_app_renders_checkpoints_in_order() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let (tx, rx) = mpsc::channel();
        let mut app = App::new(&mut terminal, "stack", rx, CancelToken::new(), Duration::ZERO);
        let mut stack = Stack::new();
        {
            let mut seq = Sequencer::new(&mut app, tx);
            seq.run(&mut stack.push(3)).unwrap();
            seq.run(&mut stack.push(5)).unwrap();
            seq.run(&mut stack.pop()).unwrap();
        }
        assert_eq!(app.scene.applied, 3);
        assert_eq!(app.scene.stack.items, vec![3]);
        assert_eq!(app.narration.len(), 3);
        assert_eq!(app.narration.last().map(String::as_str), Some("Popping 5 off the top of the stack."));
    }
}
