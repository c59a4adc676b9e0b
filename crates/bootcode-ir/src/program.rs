//! Program structure: an ordered list of instructions.

use crate::instruction::Instruction;
use bootcode_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A complete boot code program
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_instructions(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Parse one instruction per line. Blank lines are skipped; errors carry the 1-based line number.
    pub fn parse(source: &str) -> Result<Self> {
        let instructions = source
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| line.parse::<Instruction>().map_err(|e| e.at_line(idx + 1)))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Parsed program with {} instructions", instructions.len());
        Ok(Self { instructions })
    }

    pub fn add_instruction(&mut self, inst: Instruction) -> usize {
        self.instructions.push(inst);
        self.instructions.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Instruction> {
        self.instructions.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Serialize the program to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(Error::from)
    }

    /// Deserialize a program from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(Error::from)
    }
}

impl FromStr for Program {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for inst in &self.instructions {
            writeln!(f, "{}", inst)?;
        }
        Ok(())
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self::with_instructions(instructions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Operation;

    const SAMPLE: &str = "nop +0
acc +1
jmp +4
acc +3
jmp -3
acc -99
acc +1
jmp -4
acc +6
";

    #[test]
    fn test_parse_sample() {
        let program = Program::parse(SAMPLE).unwrap();
        assert_eq!(program.len(), 9);
        assert_eq!(program.get(0), Some(&Instruction::nop(0)));
        assert_eq!(program.get(5), Some(&Instruction::acc(-99)));
        assert_eq!(program.get(7), Some(&Instruction::jmp(-4)));
        assert!(program.get(9).is_none());
    }

    #[test]
    fn test_display_matches_source() {
        let program: Program = SAMPLE.parse().unwrap();
        assert_eq!(program.to_string(), SAMPLE);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let program = Program::parse("\nacc +1\n\n   \njmp -1\n").unwrap();
        assert_eq!(
            program,
            Program::with_instructions(vec![Instruction::acc(1), Instruction::jmp(-1)])
        );
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = Program::parse("acc +1\nnop +0\nmul +3\n").unwrap_err();
        match err {
            Error::AtLine { line, source } => {
                assert_eq!(line, 3);
                assert!(matches!(*source, Error::MalformedInstruction { .. }));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_empty_program() {
        let program = Program::parse("").unwrap();
        assert!(program.is_empty());
        assert_eq!(program.to_string(), "");
    }

    #[test]
    fn test_get_mut() {
        let mut program = Program::new();
        let idx = program.add_instruction(Instruction::jmp(2));
        program.get_mut(idx).unwrap().set_operation(Operation::NoOp);
        assert_eq!(program.get(idx), Some(&Instruction::nop(2)));
    }

    #[test]
    fn test_program_serialization() {
        let program = Program::parse(SAMPLE).unwrap();
        let bytes = program.to_bytes().unwrap();
        let deserialized = Program::from_bytes(&bytes).unwrap();
        assert_eq!(deserialized, program);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let err = Program::from_bytes(&[0xff; 3]).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
