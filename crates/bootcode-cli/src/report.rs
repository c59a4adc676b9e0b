//! Results of analysing one program: the plain run and the repair.

use bootcode_core::{BootConfig, Result};
use bootcode_ir::Program;
use bootcode_vm::{Debugger, Interpreter, Repair, Status};
use serde::Serialize;

/// Outcome of running the unmodified program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub halted: bool,
    pub accumulator: i64,
    pub executed: usize,
    #[serde(flatten)]
    pub status: Status,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub instructions: usize,
    pub first_run: RunSummary,
    pub repair: Option<Repair>,
}

/// Run the program once, then reset and search for a repair.
///
/// The repair error, if any, is returned next to the report so the caller can
/// still show the first run.
pub fn analyze(program: Program, config: &BootConfig) -> (Report, Result<()>) {
    let instructions = program.len();
    let mut vm = Interpreter::with_config(program, config.machine.clone());

    let halted = vm.run();
    let first_run = RunSummary {
        halted,
        accumulator: vm.accumulator(),
        executed: vm.visited_count(),
        status: vm.status(),
    };

    vm.reset();
    let debugger = Debugger::new(config.repair.clone());
    let (repair, outcome) = match debugger.fix(&mut vm) {
        Ok(repair) => (Some(repair), Ok(())),
        Err(e) => (None, Err(e)),
    };

    let report = Report {
        instructions,
        first_run,
        repair,
    };
    (report, outcome)
}
