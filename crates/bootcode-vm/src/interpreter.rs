//! Loop-detecting interpreter.

use crate::state::{ExecutionState, Rejection, Status};
use bootcode_core::{BoundsPolicy, MachineConfig};
use bootcode_ir::{Operation, Program};

/// Runs a program until it halts or revisits an instruction
#[derive(Debug, Clone)]
pub struct Interpreter {
    program: Program,
    state: ExecutionState,
    config: MachineConfig,
}

impl Interpreter {
    pub fn new(program: Program) -> Self {
        Self::with_config(program, MachineConfig::default())
    }

    pub fn with_config(program: Program, config: MachineConfig) -> Self {
        Self {
            program,
            state: ExecutionState::new(),
            config,
        }
    }

    /// Run from the current pointer. Returns true on a normal halt, false
    /// when an instruction is about to run a second time or the pointer
    /// leaves the addressable range.
    ///
    /// Does not reset first: call [`Interpreter::reset`] between independent runs.
    pub fn run(&mut self) -> bool {
        let status = loop {
            let status = self.step();
            if status.is_terminal() {
                break status;
            }
        };

        match status {
            Status::Rejected(Rejection::OutOfBounds { pointer }) => {
                tracing::warn!(
                    "Pointer {} outside program of {} instructions",
                    pointer,
                    self.program.len()
                );
            }
            _ => {
                tracing::debug!(
                    "Run ended {:?} after {} instructions, accumulator {}",
                    status,
                    self.state.visited_count(),
                    self.state.accumulator
                );
            }
        }

        status.is_halted()
    }

    /// Execute at most one instruction and return the resulting status
    pub fn step(&mut self) -> Status {
        let status = self.advance();
        self.state.status = status;
        status
    }

    fn advance(&mut self) -> Status {
        let len = self.program.len() as i64;
        let pointer = self.state.pointer;

        if pointer < 0 {
            return Status::Rejected(Rejection::OutOfBounds { pointer });
        }

        if pointer >= len {
            if self.config.bounds == BoundsPolicy::Strict && pointer > len {
                return Status::Rejected(Rejection::OutOfBounds { pointer });
            }
            return Status::Halted;
        }

        let index = pointer as usize;
        if !self.state.visit(index) {
            return Status::Rejected(Rejection::Loop { index });
        }

        let inst = self.program.instructions[index];
        let argument = i64::from(inst.argument);
        match inst.operation {
            Operation::Accumulate => {
                self.state.accumulator += argument;
                self.state.pointer += 1;
            }
            Operation::Jump => self.state.pointer += argument,
            Operation::NoOp => self.state.pointer += 1,
        }

        Status::Running
    }

    /// Clear accumulator, pointer and visited instructions
    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn accumulator(&self) -> i64 {
        self.state.accumulator
    }

    pub fn pointer(&self) -> i64 {
        self.state.pointer
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn visited_count(&self) -> usize {
        self.state.visited_count()
    }

    pub fn has_visited(&self, index: usize) -> bool {
        self.state.has_visited(index)
    }

    pub fn history(&self) -> &[usize] {
        self.state.history()
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn program_mut(&mut self) -> &mut Program {
        &mut self.program
    }

    pub fn into_program(self) -> Program {
        self.program
    }
}
