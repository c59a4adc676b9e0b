//! Single-instruction repair search for looping programs.

use crate::interpreter::Interpreter;
use bootcode_core::{Error, RepairConfig, RepairPass, Result};
use bootcode_ir::{Instruction, Operation};
use serde::Serialize;

/// The flip that made the program halt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Repair {
    /// Index of the flipped instruction
    pub index: usize,
    pub from: Instruction,
    pub to: Instruction,
    /// Accumulator when the repaired program halted
    pub accumulator: i64,
    /// Candidate runs performed, the successful one included
    pub attempts: usize,
}

/// Returns the operation `inst` is tried as during `pass`, or None if it is not a candidate
fn candidate(pass: RepairPass, inst: &Instruction) -> Option<Operation> {
    let matches = match pass {
        RepairPass::NegativeJumps => inst.is_jump() && inst.argument < 0,
        RepairPass::NonNegativeJumps => inst.is_jump() && inst.argument >= 0,
        RepairPass::NoOps => inst.is_no_op(),
    };
    if matches {
        inst.operation.flipped()
    } else {
        None
    }
}

#[derive(Debug)]
pub struct Debugger {
    config: RepairConfig,
}

impl Debugger {
    pub fn new(config: RepairConfig) -> Self {
        Self { config }
    }

    /// Find one `jmp`/`nop` swap that makes the program halt.
    ///
    /// On success the swap stays in the program and the interpreter holds the
    /// state of the halting run. On failure every trial has been reverted and
    /// the interpreter is reset.
    pub fn fix(&self, interpreter: &mut Interpreter) -> Result<Repair> {
        let mut attempts = 0;

        for pass in self.config.ordered_passes() {
            tracing::debug!("Repair pass {:?}", pass);

            for index in 0..interpreter.program().len() {
                let original = interpreter.program().instructions[index];
                let Some(replacement) = candidate(pass, &original) else {
                    continue;
                };

                attempts += 1;
                if self.try_flip(interpreter, index, replacement) {
                    let repair = Repair {
                        index,
                        from: original,
                        to: interpreter.program().instructions[index],
                        accumulator: interpreter.accumulator(),
                        attempts,
                    };
                    tracing::info!(
                        "Fixed instruction {}: `{}` -> `{}` after {} attempts, accumulator {}",
                        index,
                        repair.from,
                        repair.to,
                        attempts,
                        repair.accumulator
                    );
                    return Ok(repair);
                }

                interpreter.program_mut().instructions[index].set_operation(original.operation);
            }
        }

        interpreter.reset();
        tracing::warn!("No single-instruction fix after {} attempts", attempts);
        Err(Error::NoFixFound { attempts })
    }

    /// Flip one instruction and run from a clean state
    fn try_flip(&self, interpreter: &mut Interpreter, index: usize, to: Operation) -> bool {
        interpreter.program_mut().instructions[index].set_operation(to);
        interpreter.reset();
        let halted = interpreter.run();
        tracing::debug!(
            "Candidate {} as {}: {}",
            index,
            to,
            if halted { "halted" } else { "rejected" }
        );
        halted
    }
}

impl Default for Debugger {
    fn default() -> Self {
        Self::new(RepairConfig::default())
    }
}
