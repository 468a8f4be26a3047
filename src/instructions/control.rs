//! # Control Flow Instructions
//!
//! This module implements the special-form control flow operation:
//! - JSR: Jump to subroutine
//!
//! There is no dedicated return instruction; `SET PC, POP` returns from a
//! subroutine entered with JSR.

use crate::location::Location;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes JSR (special opcode 0x01).
///
/// 1. Decrements SP and stores the address of the following instruction at `[SP]`
/// 2. Loads PC from operand a
///
/// Operand a is resolved before the push, so PC already points past any
/// next-word operand when it is saved.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>, a: Location) -> Result<(), ExecutionError> {
    let return_address = cpu.pc;

    cpu.sp = cpu.sp.wrapping_sub(1);
    cpu.write_location(Location::Memory(cpu.sp), return_address)?;

    let target = cpu.read_location(a);
    cpu.pc = target;

    Ok(())
}
