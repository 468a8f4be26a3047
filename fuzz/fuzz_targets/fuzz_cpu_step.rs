//! Fuzz target for CPU step execution.
//!
//! This target creates arbitrary CPU states and memory contents,
//! then executes one instruction to find edge cases and crashes.

#![no_main]

use arbitrary::Arbitrary;
use dcpu16::{decoder, ExecutionError, FlatMemory, MemoryBus, Register, CPU};
use libfuzzer_sys::fuzz_target;

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    registers: [u16; 8],
    pc: u16,
    sp: u16,
    ex: u16,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Words at the PC location (instruction + operand words + next instruction)
    instruction_words: [u16; 6],
    /// Words around the stack pointer
    stack_words: [u16; 16],
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
}

fuzz_target!(|input: FuzzInput| {
    let state = &input.cpu_state;
    let mut memory = FlatMemory::new();

    // Stack contents first so instruction words win if the regions overlap
    memory.load(state.sp.wrapping_sub(8), &input.memory.stack_words);
    memory.load(state.pc, &input.memory.instruction_words);

    let mut cpu = CPU::new(memory);
    for reg in Register::ALL {
        cpu.set_register(reg, state.registers[reg.index()]);
    }
    cpu.set_pc(state.pc);
    cpu.set_sp(state.sp);
    cpu.set_ex(state.ex);

    let word = input.memory.instruction_words[0];
    let old_pc = state.pc;

    // Errors are expected (unimplemented opcodes, literal writes); panics are not
    let result = cpu.step();

    // EX is never written by the implemented instructions unless it is operand b
    if decoder::operand_b(word) != 0x1d || decoder::is_special(word) {
        assert_eq!(cpu.ex(), state.ex);
    }

    // A halting instruction still consumed exactly its operand words
    if let Err(ExecutionError::UnimplementedOpcode(_) | ExecutionError::UnimplementedSpecialOpcode(_)) = result {
        let length = decoder::instruction_length(word);
        assert_eq!(cpu.pc(), old_pc.wrapping_add(length));
    }

    assert!(cpu.steps() == 1);
});
