//! TUI pane rendering modules
//!
//! - [`canvas`]: the scene itself (list, stack, table, graph, numbers, grid)
//! - [`narration`]: captions produced alongside the checkpoints
//! - [`status`]: run state and keybindings
//!
//! Each module exports one stateless `render_*` function.

pub mod canvas;
pub mod narration;
pub mod status;

pub use canvas::render_canvas_pane;
pub use narration::render_narration_pane;
pub use status::{render_status_bar, StatusRenderData};
