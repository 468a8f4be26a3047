//! Tests for the SUB instruction.
//!
//! SUB computes `b - a` modulo 65536. Underflow is not reported in EX.

use dcpu16::decoder::encode;
use dcpu16::{FlatMemory, MemoryBus, Register, CPU};

const SUB: u8 = 0x03;

fn setup_cpu(program: &[u16]) -> CPU<FlatMemory> {
    CPU::new(FlatMemory::with_words(program))
}

#[test]
fn test_sub_registers() {
    let mut cpu = setup_cpu(&[encode(SUB, 0x01, 0x00)]); // SUB B, A
    cpu.set_register(Register::A, 0x0010);
    cpu.set_register(Register::B, 0x0030);

    cpu.step().unwrap();

    assert_eq!(cpu.register(Register::B), 0x0020);
}

#[test]
fn test_sub_operand_order() {
    // b - a, not a - b
    let mut cpu = setup_cpu(&[encode(SUB, 0x00, 0x1f), 0x0001]); // SUB A, 1
    cpu.set_register(Register::A, 0x0010);

    cpu.step().unwrap();

    assert_eq!(cpu.register(Register::A), 0x000F);
}

#[test]
fn test_sub_wraps_below_zero() {
    let mut cpu = setup_cpu(&[encode(SUB, 0x00, 0x23)]); // SUB A, 2
    cpu.set_register(Register::A, 0x0001);

    cpu.step().unwrap();

    assert_eq!(cpu.register(Register::A), 0xFFFF);
    assert_eq!(cpu.ex(), 0, "borrow is not propagated into EX");
}

#[test]
fn test_sub_minus_one_increments() {
    let mut cpu = setup_cpu(&[encode(SUB, 0x00, 0x20)]); // SUB A, -1
    cpu.set_register(Register::A, 0xFFFF);

    cpu.step().unwrap();

    assert_eq!(cpu.register(Register::A), 0x0000);
}

#[test]
fn test_sub_from_memory_through_register() {
    let mut cpu = setup_cpu(&[encode(SUB, 0x0f, 0x1f), 0x0100]); // SUB [J], 0x100
    cpu.set_register(Register::J, 0x5000);
    cpu.memory_mut().write(0x5000, 0x0150);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x5000), 0x0050);
}
