//! # Arithmetic Instructions
//!
//! This module implements the data movement and arithmetic operations:
//! - SET: `b = a`
//! - ADD: `b = b + a`
//! - SUB: `b = b - a`
//!
//! Results wrap modulo 65536. Carry and borrow are not propagated into EX.

use crate::location::Location;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes SET (opcode 0x01).
///
/// Copies the value of operand a into operand b.
pub(crate) fn execute_set<M: MemoryBus>(
    cpu: &mut CPU<M>,
    a: Location,
    b: Location,
) -> Result<(), ExecutionError> {
    let value = cpu.read_location(a);
    cpu.write_location(b, value)
}

/// Executes ADD (opcode 0x02).
pub(crate) fn execute_add<M: MemoryBus>(
    cpu: &mut CPU<M>,
    a: Location,
    b: Location,
) -> Result<(), ExecutionError> {
    let lhs = cpu.read_location(b);
    let rhs = cpu.read_location(a);

    // TODO: set EX to 0x0001 on overflow once EX propagation is implemented
    cpu.write_location(b, lhs.wrapping_add(rhs))
}

/// Executes SUB (opcode 0x03).
pub(crate) fn execute_sub<M: MemoryBus>(
    cpu: &mut CPU<M>,
    a: Location,
    b: Location,
) -> Result<(), ExecutionError> {
    let lhs = cpu.read_location(b);
    let rhs = cpu.read_location(a);

    // TODO: set EX to 0xFFFF on underflow once EX propagation is implemented
    cpu.write_location(b, lhs.wrapping_sub(rhs))
}
