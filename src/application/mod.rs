//! Application layer: edit session, commands and the editor
//!
//! This layer drives the domain model on behalf of a front end.

pub mod command;
pub mod editor;
pub mod error;
pub mod session;

pub use command::{EditCommand, Target, HELP};
pub use editor::{Editor, Outcome, TreeStats};
pub use error::{ApplicationError, ApplicationResult};
pub use session::{EditSession, SessionOptions};
