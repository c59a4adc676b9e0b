//! Intermediate representation for boot code programs.
//!
//! A program is a flat list of `acc`, `jmp` and `nop` instructions, each with a
//! signed argument. This crate parses and renders the text format, encodes
//! programs to bytes, and checks jump targets statically.

pub mod instruction;
pub mod program;
pub mod validation;

pub use instruction::{Instruction, Operation};
pub use program::Program;
pub use validation::{jump_targets, validate_program};
