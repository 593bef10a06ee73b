//! Labeled tree editing with box-drawing text rendering.
//!
//! * [`domain`]: node store, labels, glyph styles and the renderer
//! * [`application`]: edit session with selection cursor, edit commands
//! * [`config`]: layered settings
//! * [`cli`]: command line front end

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
