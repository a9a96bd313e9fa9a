//! # Introduction
//!
//! algoscope runs classic algorithms and data-structure operations one
//! observable step at a time. Every step produces a [`checkpoint::Checkpoint`]
//! that a renderer animates before the next one is issued, so what the viewer
//! sees is exactly the order in which the algorithm did its work.
//!
//! ## Pipeline
//!
//! ```text
//! Container / Grid → Engine::step → Trace → Sequencer → Renderer (+ Narrator)
//! ```
//!
//! 1. [`containers`] and [`grid`]: the data the algorithms operate on. Container
//!    operations (`list.insert`, `table.put`, ...) return engines.
//! 2. [`engine`]: the [`engine::Engine`] contract plus the math, maze and
//!    pathfinding engines.
//! 3. [`checkpoint`]: the checkpoint vocabulary and the pending event buffer.
//! 4. [`sequencer`]: drives an engine, delivering checkpoints one at a time to a
//!    [`sequencer::Renderer`] and captions to a [`sequencer::Narrator`], with
//!    cancellation and an optional checkpoint budget.
//! 5. [`config`] and [`demo`]: run settings and the scripted scenarios the
//!    binary plays.
//! 6. [`ui`]: ratatui-based renderer; not part of the stable library API.
//!
//! ## Headless use
//!
//! ```
//! use algoscope::containers::{LinkedList, ListKind};
//! use algoscope::sequencer::{Sequencer, TraceRecorder};
//!
//! let mut list = LinkedList::from_values(ListKind::Singly, &[1, 2, 3]);
//! let recorder = TraceRecorder::new();
//! let mut seq = Sequencer::new(recorder.clone(), recorder.clone());
//! seq.run(&mut list.insert(9, 1).unwrap()).unwrap();
//!
//! assert_eq!(list.values(), vec![1, 9, 2, 3]);
//! assert!(!recorder.checkpoints().is_empty());
//! ```

pub mod checkpoint;
pub mod config;
pub mod containers;
pub mod demo;
pub mod engine;
pub mod errors;
pub mod grid;
pub mod sequencer;
pub mod ui;
