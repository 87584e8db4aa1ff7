//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a clinical screening interface:
//! - Patient intake form grouped into the original page sections
//! - Risk analysis result with probability gauge and advice list

mod app;
mod styles;
mod ui;

pub use app::App;
pub use styles::HeartTheme;
