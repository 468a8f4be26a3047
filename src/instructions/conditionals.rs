//! # Skip-Conditional Instructions
//!
//! This module implements the IF family (opcodes 0x10-0x17):
//! - IFB, IFC: bit tests
//! - IFE, IFN: equality
//! - IFG, IFL: unsigned comparison
//! - IFA, IFU: signed comparison
//!
//! A conditional evaluates its predicate over `(b, a)`. When the predicate
//! holds, execution continues with the next instruction; otherwise that next
//! instruction is skipped. The skipped instruction is decoded to find its
//! length, so next-word operands are skipped along with it.

use crate::location::Location;
use crate::opcodes::Condition;
use crate::{decoder, ExecutionError, MemoryBus, CPU};

/// Executes an IF instruction with the given condition.
pub(crate) fn execute_if<M: MemoryBus>(
    cpu: &mut CPU<M>,
    condition: Condition,
    a: Location,
    b: Location,
) -> Result<(), ExecutionError> {
    let lhs = cpu.read_location(b);
    let rhs = cpu.read_location(a);

    if !condition.holds(lhs, rhs) {
        skip_next_instruction(cpu);
    }

    Ok(())
}

/// Advances PC past the instruction at PC.
fn skip_next_instruction<M: MemoryBus>(cpu: &mut CPU<M>) {
    let next = cpu.memory.read(cpu.pc);
    cpu.pc = cpu.pc.wrapping_add(decoder::instruction_length(next));
}
