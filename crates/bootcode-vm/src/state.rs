//! Execution state for a single run of the interpreter.

use serde::Serialize;
use std::collections::HashSet;

/// Why a run ended without halting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    /// The pointer came back to an instruction that already ran
    Loop { index: usize },
    /// The pointer left the addressable range
    OutOfBounds { pointer: i64 },
}

/// Interpreter status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Status {
    Running,
    Halted,
    Rejected(Rejection),
}

impl Status {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Status::Running)
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, Status::Halted)
    }
}

/// Accumulator, pointer and visit bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionState {
    pub accumulator: i64,
    pub pointer: i64,
    pub status: Status,
    visited: HashSet<usize>,
    history: Vec<usize>,
}

impl ExecutionState {
    pub fn new() -> Self {
        Self {
            accumulator: 0,
            pointer: 0,
            status: Status::Running,
            visited: HashSet::new(),
            history: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0;
        self.pointer = 0;
        self.status = Status::Running;
        self.visited.clear();
        self.history.clear();
    }

    /// Record a visit. Returns false if `index` was already visited.
    pub fn visit(&mut self, index: usize) -> bool {
        if !self.visited.insert(index) {
            return false;
        }
        self.history.push(index);
        true
    }

    pub fn has_visited(&self, index: usize) -> bool {
        self.visited.contains(&index)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Visited indices in execution order
    pub fn history(&self) -> &[usize] {
        &self.history
    }
}

impl Default for ExecutionState {
    fn default() -> Self {
        Self::new()
    }
}
