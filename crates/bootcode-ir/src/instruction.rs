//! Instruction set for boot code programs.

use bootcode_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operation tag of an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "acc")]
    Accumulate,
    #[serde(rename = "jmp")]
    Jump,
    #[serde(rename = "nop")]
    NoOp,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Accumulate, Operation::Jump, Operation::NoOp];

    /// Textual mnemonic used by the program format
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Operation::Accumulate => "acc",
            Operation::Jump => "jmp",
            Operation::NoOp => "nop",
        }
    }

    /// The operation a repair may swap this one for
    pub fn flipped(&self) -> Option<Operation> {
        match self {
            Operation::Jump => Some(Operation::NoOp),
            Operation::NoOp => Some(Operation::Jump),
            Operation::Accumulate => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.mnemonic() == s)
            .ok_or_else(|| Error::malformed(s, format!("unknown opcode `{}`", s)))
    }
}

/// A single instruction: operation plus signed argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    pub operation: Operation,
    pub argument: i32,
}

impl Instruction {
    pub fn new(operation: Operation, argument: i32) -> Self {
        Self { operation, argument }
    }

    pub fn acc(argument: i32) -> Self {
        Self::new(Operation::Accumulate, argument)
    }

    pub fn jmp(argument: i32) -> Self {
        Self::new(Operation::Jump, argument)
    }

    pub fn nop(argument: i32) -> Self {
        Self::new(Operation::NoOp, argument)
    }

    /// Replace the operation tag, keeping the argument
    pub fn set_operation(&mut self, operation: Operation) {
        self.operation = operation;
    }

    pub fn is_jump(&self) -> bool {
        self.operation == Operation::Jump
    }

    pub fn is_no_op(&self) -> bool {
        self.operation == Operation::NoOp
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:+}", self.operation, self.argument)
    }
}

impl FromStr for Instruction {
    type Err = Error;

    /// Parse `<opcode> <signed-integer>`, e.g. `acc +1` or `jmp -3`
    fn from_str(s: &str) -> Result<Self> {
        let line = s.trim();
        let mut tokens = line.split_whitespace();

        let opcode = tokens
            .next()
            .ok_or_else(|| Error::malformed(line, "empty instruction"))?;
        let operation = opcode
            .parse::<Operation>()
            .map_err(|_| Error::malformed(line, format!("unknown opcode `{}`", opcode)))?;

        let argument = tokens
            .next()
            .ok_or_else(|| Error::malformed(line, "missing argument"))?;
        // i32's parser accepts a leading `+` as well as `-`
        let argument = argument
            .parse::<i32>()
            .map_err(|e| Error::malformed(line, format!("bad argument `{}`: {}", argument, e)))?;

        if let Some(extra) = tokens.next() {
            return Err(Error::malformed(line, format!("unexpected token `{}`", extra)));
        }

        Ok(Self::new(operation, argument))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instructions() {
        assert_eq!("acc +1".parse::<Instruction>().unwrap(), Instruction::acc(1));
        assert_eq!("jmp -3".parse::<Instruction>().unwrap(), Instruction::jmp(-3));
        assert_eq!("nop +0".parse::<Instruction>().unwrap(), Instruction::nop(0));
        assert_eq!("  acc   42 ".parse::<Instruction>().unwrap(), Instruction::acc(42));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["mul +2", "", "acc", "acc +x", "jmp +1 +2", "ACC +1"] {
            let err = text.parse::<Instruction>().unwrap_err();
            assert!(
                matches!(err, Error::MalformedInstruction { .. }),
                "{:?} gave {:?}",
                text,
                err
            );
        }
    }

    #[test]
    fn test_unknown_opcode_reason() {
        match "hcf +0".parse::<Instruction>().unwrap_err() {
            Error::MalformedInstruction { text, reason } => {
                assert_eq!(text, "hcf +0");
                assert_eq!(reason, "unknown opcode `hcf`");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Instruction::acc(1).to_string(), "acc +1");
        assert_eq!(Instruction::nop(0).to_string(), "nop +0");
        assert_eq!(Instruction::jmp(-4).to_string(), "jmp -4");
    }

    #[test]
    fn test_operation_properties() {
        assert_eq!(Operation::Jump.flipped(), Some(Operation::NoOp));
        assert_eq!(Operation::NoOp.flipped(), Some(Operation::Jump));
        assert_eq!(Operation::Accumulate.flipped(), None);
        assert_eq!("nop".parse::<Operation>().unwrap(), Operation::NoOp);
    }

    #[test]
    fn test_serializes_as_mnemonic() {
        let json = serde_json::to_string(&Instruction::jmp(-3)).unwrap();
        assert_eq!(json, r#"{"operation":"jmp","argument":-3}"#);

        for op in Operation::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.mnemonic()));
            assert_eq!(serde_json::from_str::<Operation>(&json).unwrap(), op);
        }
    }

    #[test]
    fn test_set_operation_keeps_argument() {
        let mut inst = Instruction::jmp(-4);
        inst.set_operation(Operation::NoOp);
        assert_eq!(inst, Instruction::nop(-4));
        assert!(inst.is_no_op());
        assert!(!inst.is_jump());
    }
}
