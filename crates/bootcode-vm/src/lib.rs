//! Boot code virtual machine.
//!
//! This crate provides:
//! - The loop-detecting interpreter
//! - Per-run execution state
//! - The single-instruction repair search

pub mod interpreter;
pub mod repair;
pub mod state;

pub use interpreter::Interpreter;
pub use repair::{Debugger, Repair};
pub use state::{ExecutionState, Rejection, Status};
