//! Core types and configuration shared by the bootcode interpreter, repair search and CLI.

pub mod config;
pub mod error;

pub use error::{Error, Result};
pub use config::*;
