// Checkpoint delivery: drives engines and paces them through a renderer

use crate::checkpoint::{Checkpoint, Event, Trace};
use crate::engine::{Engine, EngineState};
use crate::errors::{VisualizerError, VisualizerResult};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;

/// Receives checkpoints, one at a time, in production order.
///
/// `on_checkpoint` must return only once the corresponding transition has
/// finished; the sequencer does not issue the next checkpoint before that.
pub trait Renderer {
    fn on_checkpoint(&mut self, checkpoint: Checkpoint) -> VisualizerResult<()>;
}

/// Receives human-readable captions. Fire and forget.
pub trait Narrator {
    fn on_explain(&mut self, text: &str);
}

impl<T: Renderer + ?Sized> Renderer for &mut T {
    fn on_checkpoint(&mut self, checkpoint: Checkpoint) -> VisualizerResult<()> {
        (**self).on_checkpoint(checkpoint)
    }
}

impl<T: Narrator + ?Sized> Narrator for &mut T {
    fn on_explain(&mut self, text: &str) {
        (**self).on_explain(text)
    }
}

/// Narration is dropped
impl Narrator for () {
    fn on_explain(&mut self, _text: &str) {}
}

impl Narrator for mpsc::Sender<String> {
    fn on_explain(&mut self, text: &str) {
        // a closed receiver just means nobody is listening any more
        let _ = self.send(text.to_string());
    }
}

/// Shared cancellation flag, checked before every step and every delivery
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clear the flag so the token can be reused for another run
    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Summary of one engine run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub engine: &'static str,
    pub steps: usize,
    pub checkpoints: usize,
    pub narrations: usize,
    pub cancelled: bool,
    pub final_state: EngineState,
}

impl RunReport {
    fn new(engine: &'static str) -> Self {
        RunReport {
            engine,
            steps: 0,
            checkpoints: 0,
            narrations: 0,
            cancelled: false,
            final_state: EngineState::Idle,
        }
    }
}

/// Drives engines to completion one checkpoint at a time.
///
/// Checkpoints reach the renderer in exactly the order the engine produced
/// them. An optional budget caps the total number of checkpoints delivered
/// over the sequencer's lifetime.
pub struct Sequencer<R: Renderer, N: Narrator> {
    renderer: R,
    narrator: N,
    cancel: CancelToken,
    budget: Option<usize>,
    delivered: usize,
}

impl<R: Renderer, N: Narrator> Sequencer<R, N> {
    pub fn new(renderer: R, narrator: N) -> Self {
        Sequencer {
            renderer,
            narrator,
            cancel: CancelToken::new(),
            budget: None,
            delivered: 0,
        }
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_budget(mut self, budget: Option<usize>) -> Self {
        self.budget = budget;
        self
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Checkpoints delivered so far across all runs
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    pub fn budget(&self) -> Option<usize> {
        self.budget
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_parts(self) -> (R, N) {
        (self.renderer, self.narrator)
    }

    /// Run `engine` until it completes or the token is cancelled.
    ///
    /// Cancellation is reported through [`RunReport::cancelled`], not as an
    /// error. Renderer failures and budget exhaustion abort the run.
    pub fn run<E: Engine + ?Sized>(&mut self, engine: &mut E) -> VisualizerResult<RunReport> {
        let mut report = RunReport::new(engine.name());
        let mut trace = Trace::new();
        let mut finished = false;
        info!("starting {}", engine.name());

        loop {
            if self.cancel.is_cancelled() {
                warn!(
                    "{} cancelled after {} checkpoints",
                    engine.name(),
                    report.checkpoints
                );
                report.cancelled = true;
                break;
            }

            match trace.pop() {
                Some(Event::Checkpoint(checkpoint)) => {
                    self.deliver(checkpoint)?;
                    report.checkpoints += 1;
                }
                Some(Event::Explain(text)) => {
                    self.narrator.on_explain(&text);
                    report.narrations += 1;
                }
                None if finished => break,
                None => {
                    finished = engine.step(&mut trace).is_complete();
                    report.steps += 1;
                }
            }
        }

        report.final_state = engine.state();
        info!(
            "finished {}: {} steps, {} checkpoints, state {}",
            report.engine, report.steps, report.checkpoints, report.final_state
        );
        Ok(report)
    }

    fn deliver(&mut self, checkpoint: Checkpoint) -> VisualizerResult<()> {
        if let Some(budget) = self.budget {
            if self.delivered >= budget {
                warn!("checkpoint budget of {} exhausted", budget);
                return Err(VisualizerError::CheckpointBudgetExceeded {
                    delivered: self.delivered,
                    budget,
                });
            }
        }
        debug!("checkpoint #{}: {}", self.delivered, checkpoint);
        self.renderer.on_checkpoint(checkpoint)?;
        self.delivered += 1;
        Ok(())
    }
}

/// Records everything it receives, in order.
///
/// Clones share one log, so the same recorder can be handed to a sequencer
/// as both renderer and narrator and inspected afterwards.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    events: Rc<RefCell<Vec<Event>>>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded event
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn checkpoints(&self) -> Vec<Checkpoint> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Checkpoint(c) => Some(c.clone()),
                Event::Explain(_) => None,
            })
            .collect()
    }

    pub fn narrations(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Explain(t) => Some(t.clone()),
                Event::Checkpoint(_) => None,
            })
            .collect()
    }

    /// Number of recorded checkpoints
    pub fn len(&self) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Checkpoint(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Renderer for TraceRecorder {
    fn on_checkpoint(&mut self, checkpoint: Checkpoint) -> VisualizerResult<()> {
        self.events.borrow_mut().push(Event::Checkpoint(checkpoint));
        Ok(())
    }
}

impl Narrator for TraceRecorder {
    fn on_explain(&mut self, text: &str) {
        self.events.borrow_mut().push(Event::Explain(text.to_string()));
    }
}
