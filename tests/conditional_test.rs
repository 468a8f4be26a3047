//! Tests for the skip-conditional (IF*) instructions.
//!
//! Tests cover:
//! - All eight predicates, true and false
//! - Signed versus unsigned comparison
//! - Skipping one-word and multi-word next instructions
//! - Skipping a special-form next instruction
//! - Only one instruction is skipped

use dcpu16::decoder::{encode, encode_special};
use dcpu16::{FlatMemory, MemoryBus, Register, CPU};

const IFB: u8 = 0x10;
const IFC: u8 = 0x11;
const IFE: u8 = 0x12;
const IFN: u8 = 0x13;
const IFG: u8 = 0x14;
const IFA: u8 = 0x15;
const IFL: u8 = 0x16;
const IFU: u8 = 0x17;

/// SET Z, 1
const SET_Z_1: u16 = 0x00a1 | (0x22 << 10);

/// `IFxx X, Y` followed by `next`, with X = b and Y = a.
fn setup_if(opcode: u8, b: u16, a: u16, next: &[u16]) -> CPU<FlatMemory> {
    let mut program = vec![encode(opcode, 0x03, 0x04)];
    program.extend_from_slice(next);
    program.push(SET_Z_1);

    let mut cpu = CPU::new(FlatMemory::with_words(&program));
    cpu.set_register(Register::X, b);
    cpu.set_register(Register::Y, a);
    cpu
}

/// Runs the IF and reports whether the following instruction would execute.
fn executes_next(opcode: u8, b: u16, a: u16) -> bool {
    let mut cpu = setup_if(opcode, b, a, &[]);
    cpu.step().unwrap();
    match cpu.pc() {
        1 => true,
        2 => false,
        pc => panic!("unexpected PC 0x{:04x} after IF", pc),
    }
}

#[test]
fn test_set_z_constant() {
    assert_eq!(SET_Z_1, encode(0x01, 0x05, 0x22));
}

#[test]
fn test_ifb() {
    assert!(executes_next(IFB, 0b1010, 0b0010));
    assert!(!executes_next(IFB, 0b1010, 0b0101));
    assert!(!executes_next(IFB, 0, 0xFFFF));
}

#[test]
fn test_ifc() {
    assert!(!executes_next(IFC, 0b1010, 0b0010));
    assert!(executes_next(IFC, 0b1010, 0b0101));
    assert!(executes_next(IFC, 0, 0xFFFF));
}

#[test]
fn test_ife() {
    assert!(executes_next(IFE, 5, 5));
    assert!(!executes_next(IFE, 5, 6));
}

#[test]
fn test_ifn() {
    assert!(executes_next(IFN, 5, 6));
    assert!(!executes_next(IFN, 5, 5));
}

#[test]
fn test_ifg_is_unsigned() {
    assert!(executes_next(IFG, 6, 5));
    assert!(!executes_next(IFG, 5, 5));
    assert!(!executes_next(IFG, 5, 6));
    assert!(executes_next(IFG, 0xFFFF, 0x0001));
}

#[test]
fn test_ifa_is_signed() {
    assert!(executes_next(IFA, 6, 5));
    assert!(!executes_next(IFA, 5, 5));
    assert!(executes_next(IFA, 0x0001, 0xFFFF)); // 1 > -1
    assert!(!executes_next(IFA, 0xFFFF, 0x0001)); // -1 > 1
    assert!(executes_next(IFA, 0x7FFF, 0x8000)); // 32767 > -32768
}

#[test]
fn test_ifl_is_unsigned() {
    assert!(executes_next(IFL, 5, 6));
    assert!(!executes_next(IFL, 5, 5));
    assert!(!executes_next(IFL, 6, 5));
    assert!(executes_next(IFL, 0x0001, 0xFFFF));
}

#[test]
fn test_ifu_is_signed() {
    assert!(executes_next(IFU, 5, 6));
    assert!(!executes_next(IFU, 5, 5));
    assert!(executes_next(IFU, 0xFFFF, 0x0001)); // -1 < 1
    assert!(!executes_next(IFU, 0x0001, 0xFFFF));
    assert!(executes_next(IFU, 0x8000, 0x7FFF));
}

#[test]
fn test_taken_condition_runs_next_instruction() {
    let mut cpu = setup_if(IFE, 1, 1, &[]);

    cpu.run_for_steps(2).unwrap();

    assert_eq!(cpu.register(Register::Z), 1);
    assert_eq!(cpu.pc(), 2);
}

#[test]
fn test_skip_one_word_instruction() {
    let mut cpu = setup_if(IFE, 1, 2, &[encode(0x01, 0x00, 0x2a)]); // SET A, 9 is skipped

    cpu.run_for_steps(2).unwrap();

    assert_eq!(cpu.register(Register::A), 0, "skipped instruction must not run");
    assert_eq!(cpu.register(Register::Z), 1, "instruction after it must run");
    assert_eq!(cpu.pc(), 3);
}

#[test]
fn test_skip_two_word_instruction() {
    let mut cpu = setup_if(IFN, 7, 7, &[encode(0x01, 0x00, 0x1f), 0x1111]); // SET A, 0x1111

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 3);

    cpu.step().unwrap();
    assert_eq!(cpu.register(Register::A), 0);
    assert_eq!(cpu.register(Register::Z), 1);
}

#[test]
fn test_skip_three_word_instruction() {
    // SET [0x1000], 0x1234
    let mut cpu = setup_if(IFG, 1, 2, &[encode(0x01, 0x1e, 0x1f), 0x1234, 0x1000]);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 4);

    cpu.step().unwrap();
    assert_eq!(cpu.memory().read(0x1000), 0);
    assert_eq!(cpu.register(Register::Z), 1);
}

#[test]
fn test_skip_special_form_counts_only_operand_a() {
    // JSR <next word> is two words: the b field holds the special opcode
    let mut cpu = setup_if(IFE, 1, 2, &[encode_special(0x01, 0x1f), 0x0040]);
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 3);

    // HWN A is one word even though 0x10 in the b field would be [A + next word]
    let mut cpu = setup_if(IFE, 1, 2, &[encode_special(0x10, 0x00)]);
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 2);
}

#[test]
fn test_skip_does_not_chain() {
    // The skipped instruction is itself an IF; only it is skipped
    let mut cpu = setup_if(IFE, 1, 2, &[encode(IFE, 0x03, 0x04)]);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 2);
}

#[test]
fn test_if_with_next_word_operands() {
    // IFE [0x2000], 0x0055 consumes two words before the skip is computed
    let mut cpu = CPU::new(FlatMemory::with_words(&[
        encode(IFE, 0x1e, 0x1f),
        0x0055,
        0x2000,
        encode(0x01, 0x00, 0x1f),
        0x0001,
        SET_Z_1,
    ]));
    cpu.memory_mut().write(0x2000, 0x0056);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 5);
}
