//! Terminal UI rendering using ratatui.
//!
//! ## Submodules
//!
//! - [`board`]: Table of components for the current tab
//! - [`common`]: Shared components (header, tabs, status bar, help overlay)
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │ Tabs (common::render_tabs)           │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ Components (board::render)           │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!    Help overlay rendered on top:
//!    - common::render_help
//! ```

pub mod board;
pub mod common;
pub mod theme;

pub use theme::Theme;
