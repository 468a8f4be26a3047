//! # Storage Locations
//!
//! A [`Location`] is the resolved target of an operand. Instructions read and
//! write through locations; the accessor methods here are the only place
//! machine state is touched on their behalf, and every access is reported to
//! the installed [`Tracer`](crate::Tracer).

use std::fmt;

use crate::registers::Register;
use crate::{ExecutionError, MemoryBus, CPU};

/// Concrete target of a resolved operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// A general-purpose register.
    Register(Register),
    /// The program counter.
    ProgramCounter,
    /// The stack pointer.
    StackPointer,
    /// The excess register.
    Excess,
    /// A memory word.
    Memory(u16),
    /// A constant. Read-only.
    Literal(u16),
}

impl Location {
    /// Returns true if the location can be written.
    pub fn is_writable(&self) -> bool {
        !matches!(self, Location::Literal(_))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Location::Register(reg) => write!(f, "REG({})", reg),
            Location::ProgramCounter => f.write_str("PC"),
            Location::StackPointer => f.write_str("SP"),
            Location::Excess => f.write_str("EX"),
            Location::Memory(addr) => write!(f, "MEM({:04x})", addr),
            Location::Literal(value) => write!(f, "LIT({:04x})", value),
        }
    }
}

impl<M: MemoryBus> CPU<M> {
    /// Reads the value stored at `location`.
    pub fn read_location(&mut self, location: Location) -> u16 {
        let value = match location {
            Location::Register(reg) => self.registers[reg.index()],
            Location::ProgramCounter => self.pc,
            Location::StackPointer => self.sp,
            Location::Excess => self.ex,
            Location::Memory(addr) => self.memory.read(addr),
            Location::Literal(value) => value,
        };
        self.tracer.on_read(location, value);
        value
    }

    /// Stores `value` at `location`.
    ///
    /// # Errors
    ///
    /// Returns `ExecutionError::LiteralWrite` if `location` is a literal. No
    /// state changes in that case.
    pub fn write_location(&mut self, location: Location, value: u16) -> Result<(), ExecutionError> {
        match location {
            Location::Register(reg) => self.registers[reg.index()] = value,
            Location::ProgramCounter => self.pc = value,
            Location::StackPointer => self.sp = value,
            Location::Excess => self.ex = value,
            Location::Memory(addr) => self.memory.write(addr, value),
            Location::Literal(literal) => return Err(ExecutionError::LiteralWrite(literal)),
        }
        self.tracer.on_write(location, value);
        Ok(())
    }
}
