//! Static validation for boot code programs.

use crate::program::Program;
use bootcode_core::{BoundsPolicy, Error, Result};

/// `(index, target)` for every `jmp` in the program
pub fn jump_targets(program: &Program) -> Vec<(usize, i64)> {
    program
        .iter()
        .enumerate()
        .filter(|(_, inst)| inst.is_jump())
        .map(|(idx, inst)| (idx, idx as i64 + i64::from(inst.argument)))
        .collect()
}

/// Check that every jump lands somewhere the machine can handle under `policy`
pub fn validate_program(program: &Program, policy: BoundsPolicy) -> Result<()> {
    let len = program.len() as i64;

    for (idx, target) in jump_targets(program) {
        if target < 0 {
            return Err(Error::Validation(format!(
                "Instruction {} jumps to negative index {}",
                idx, target
            )));
        }

        if policy == BoundsPolicy::Strict && target > len {
            return Err(Error::Validation(format!(
                "Instruction {} jumps to {}, past the end of a {}-instruction program",
                idx, target, len
            )));
        }
    }

    Ok(())
}
