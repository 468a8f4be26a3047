//! # DCPU-16 Instruction Implementations
//!
//! This module contains the implementations of the executed instructions,
//! organized by category. Each instruction is a standalone function taking a
//! mutable reference to the CPU and its already-resolved operand locations.
//!
//! ## Categories
//!
//! - **arithmetic**: SET, ADD, SUB
//! - **conditionals**: IFB, IFC, IFE, IFN, IFG, IFA, IFL, IFU
//! - **control**: JSR
//!
//! MUL through SHL, ADX, SBX, STI, STD and every special opcode but JSR halt
//! the machine as unimplemented.

pub mod arithmetic;
pub mod conditionals;
pub mod control;

use crate::location::Location;
use crate::opcodes::{Opcode, SpecialOpcode};
use crate::{ExecutionError, MemoryBus, CPU};

/// Dispatches a basic instruction once both operands are resolved.
pub(crate) fn execute_basic<M: MemoryBus>(
    cpu: &mut CPU<M>,
    code: u8,
    a: Location,
    b: Location,
) -> Result<(), ExecutionError> {
    match Opcode::from_code(code) {
        Some(Opcode::Set) => arithmetic::execute_set(cpu, a, b),
        Some(Opcode::Add) => arithmetic::execute_add(cpu, a, b),
        Some(Opcode::Sub) => arithmetic::execute_sub(cpu, a, b),
        Some(Opcode::If(condition)) => conditionals::execute_if(cpu, condition, a, b),
        _ => Err(ExecutionError::UnimplementedOpcode(code)),
    }
}

/// Dispatches a special-form instruction. Operand b does not exist here.
pub(crate) fn execute_special<M: MemoryBus>(
    cpu: &mut CPU<M>,
    code: u8,
    a: Location,
) -> Result<(), ExecutionError> {
    match SpecialOpcode::from_code(code) {
        Some(SpecialOpcode::Jsr) => control::execute_jsr(cpu, a),
        _ => Err(ExecutionError::UnimplementedSpecialOpcode(code)),
    }
}
