//! # DCPU-16 Emulator Core
//!
//! An emulator for the DCPU-16, a 16-bit word-addressed virtual CPU with eight
//! general registers, a stack pointer, a program counter and an excess register,
//! operating over a 65536-word address space.
//!
//! ## Quick Start
//!
//! ```rust
//! use dcpu16::{decoder, CPU, FlatMemory, HaltReason, MemoryBus, Register};
//!
//! let mut memory = FlatMemory::new();
//!
//! // SET A, 0x10 (inline literal 0x10 is operand code 0x31)
//! memory.write(0x0000, decoder::encode(0x01, 0x00, 0x31));
//! // Word 1 is zero: special opcode 0x00, which halts the machine.
//!
//! let mut cpu = CPU::new(memory);
//! let halt = cpu.run().unwrap();
//!
//! assert_eq!(halt, HaltReason::UnimplementedSpecialOpcode(0x00));
//! assert_eq!(cpu.register(Register::A), 0x10);
//! ```
//!
//! ## Architecture
//!
//! Each step fetches the word at `PC`, splits it into fields with the
//! [`decoder`], resolves operand A and then operand B into [`Location`]s
//! (which may consume extra instruction words or move the stack pointer),
//! and dispatches on the opcode. Locations are read and written through the
//! accessor layer in [`location`], which rejects writes to literals.
//!
//! ## Modules
//!
//! - `cpu` - Machine state and the fetch-decode-execute loop
//! - `memory` - MemoryBus trait and the flat 64K-word memory
//! - `registers` - General register names
//! - `decoder` - Instruction word field extraction and instruction length
//! - `addressing` - Operand addressing modes and operand resolution
//! - `location` - Resolved storage locations and read/write access
//! - `opcodes` - Basic and special opcode enumerations
//! - `trace` - Pluggable access/fetch observers
//! - `image` - Binary image loading
//! - `dump` - Machine state snapshots for reporting

pub mod addressing;
pub mod cpu;
pub mod decoder;
pub mod dump;
pub mod image;
pub mod location;
pub mod memory;
pub mod opcodes;
pub mod registers;
pub mod trace;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::{AddressingMode, OperandRole};
pub use cpu::{RunState, CPU};
pub use dump::StateDump;
pub use image::{Endianness, Image, ImageError};
pub use location::Location;
pub use memory::{FlatMemory, MemoryBus, MEMORY_WORDS};
pub use opcodes::{Condition, Opcode, SpecialOpcode};
pub use registers::Register;
pub use trace::{LogTracer, NullTracer, Tracer};

use thiserror::Error;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// Basic opcode is not implemented.
    ///
    /// Contains the 5-bit opcode value for debugging purposes.
    #[error("unimplemented opcode 0x{0:02x}")]
    UnimplementedOpcode(u8),

    /// Special opcode (basic opcode 0x00) is not implemented.
    #[error("unimplemented special opcode 0x{0:02x}")]
    UnimplementedSpecialOpcode(u8),

    /// An instruction tried to store into a literal operand.
    #[error("attempt to write literal 0x{0:04x}")]
    LiteralWrite(u16),

    /// `step()` was called after the machine halted.
    #[error("machine is halted")]
    Halted,
}

impl ExecutionError {
    /// Returns true for faults that end a run abnormally.
    ///
    /// Unimplemented opcodes stop the machine but leave it in a state the
    /// caller is expected to inspect; a literal write is a programming-model
    /// violation.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExecutionError::LiteralWrite(_))
    }
}

/// Why a call to [`CPU::run`] returned normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HaltReason {
    /// The machine fetched a basic opcode it does not implement.
    #[error("unimplemented opcode 0x{0:02x}")]
    UnimplementedOpcode(u8),

    /// The machine fetched a special opcode it does not implement.
    #[error("unimplemented special opcode 0x{0:02x}")]
    UnimplementedSpecialOpcode(u8),
}

impl HaltReason {
    /// Classifies an execution error as a normal halt, if it is one.
    pub fn from_error(error: ExecutionError) -> Option<Self> {
        match error {
            ExecutionError::UnimplementedOpcode(code) => Some(HaltReason::UnimplementedOpcode(code)),
            ExecutionError::UnimplementedSpecialOpcode(code) => {
                Some(HaltReason::UnimplementedSpecialOpcode(code))
            }
            ExecutionError::LiteralWrite(_) | ExecutionError::Halted => None,
        }
    }
}
