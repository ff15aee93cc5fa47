//! REPL components for the survey dataset editor.

pub mod commands;
pub mod completion;
pub mod logging;
pub mod session;
pub mod view;
