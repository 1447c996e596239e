//! Custom event types for the editor page.

use crossterm::event::KeyEvent;

use crate::execution::{ExecuteRequest, ExecuteResponse, ExecutionError};

/// Events that can occur in the TUI application
#[derive(Debug)]
pub enum TuiEvent {
    /// User keyboard input
    Key(KeyEvent),
    /// Bracketed paste content
    Paste(String),
    /// Terminal was resized; redraw only
    Resize,
    /// Submit source to the execution service
    Run(ExecuteRequest),
    /// The in-flight run settled
    RunFinished(Result<ExecuteResponse, ExecutionError>),
    /// Request to quit the application
    Quit,
}
