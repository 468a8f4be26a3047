//! # Addressing Modes
//!
//! This module classifies the 6-bit operand codes of the DCPU-16 and resolves
//! them into concrete [`Location`]s.
//!
//! Some modes have side effects during resolution: the next-word modes read
//! `memory[PC]` and advance `PC`, and the push/pop mode moves `SP`. Operand a
//! is always resolved before operand b so extra words are consumed in a fixed
//! order.

use crate::location::Location;
use crate::registers::Register;
use crate::{MemoryBus, CPU};

/// Which operand of an instruction is being resolved.
///
/// Operand a is evaluated first. The role only matters for [`AddressingMode::PushPop`],
/// which pops when it is operand a and pushes when it is operand b.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandRole {
    A,
    B,
}

/// DCPU-16 operand addressing mode.
///
/// # Operand Words
///
/// - **0 extra words**: Register, RegisterIndirect, PushPop, Peek, StackPointer,
///   ProgramCounter, Excess, Inline
/// - **1 extra word**: RegisterNextWord, Pick, NextWordIndirect, NextWord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// 0x00-0x07: the register itself.
    Register(Register),

    /// 0x08-0x0f: `[register]`, memory at the address held in the register.
    RegisterIndirect(Register),

    /// 0x10-0x17: `register + next word`, resolved to a literal.
    RegisterNextWord(Register),

    /// 0x18: POP as operand a (`[SP++]`), PUSH as operand b (`[--SP]`).
    PushPop,

    /// 0x19: PEEK, `[SP]`.
    Peek,

    /// 0x1a: PICK, `SP + next word`, resolved to a literal.
    Pick,

    /// 0x1b: the stack pointer.
    StackPointer,

    /// 0x1c: the program counter.
    ProgramCounter,

    /// 0x1d: the excess register.
    Excess,

    /// 0x1e: `[next word]`.
    NextWordIndirect,

    /// 0x1f: next word as a literal.
    NextWord,

    /// 0x20-0x3f: inline literal. 0x20 encodes 0xFFFF (-1), 0x21-0x3f encode 0-30.
    Inline(u16),
}

impl AddressingMode {
    /// Classifies an operand code. Only the low six bits are used.
    ///
    /// # Examples
    ///
    /// ```
    /// use dcpu16::{AddressingMode, Register};
    ///
    /// assert_eq!(AddressingMode::decode(0x03), AddressingMode::Register(Register::X));
    /// assert_eq!(AddressingMode::decode(0x20), AddressingMode::Inline(0xFFFF));
    /// assert_eq!(AddressingMode::decode(0x3f), AddressingMode::Inline(30));
    /// ```
    pub fn decode(code: u8) -> Self {
        let code = code & 0x3f;
        match code {
            0x00..=0x07 => AddressingMode::Register(Register::from_index(code)),
            0x08..=0x0f => AddressingMode::RegisterIndirect(Register::from_index(code - 0x08)),
            0x10..=0x17 => AddressingMode::RegisterNextWord(Register::from_index(code - 0x10)),
            0x18 => AddressingMode::PushPop,
            0x19 => AddressingMode::Peek,
            0x1a => AddressingMode::Pick,
            0x1b => AddressingMode::StackPointer,
            0x1c => AddressingMode::ProgramCounter,
            0x1d => AddressingMode::Excess,
            0x1e => AddressingMode::NextWordIndirect,
            0x1f => AddressingMode::NextWord,
            0x20 => AddressingMode::Inline(0xFFFF),
            _ => AddressingMode::Inline((code - 0x21) as u16),
        }
    }

    /// Returns true if resolving this mode reads `memory[PC]` and advances `PC`.
    ///
    /// The decoder uses this to compute instruction lengths, so skipping an
    /// instruction advances over exactly the words its execution would consume.
    pub fn consumes_next_word(self) -> bool {
        matches!(
            self,
            AddressingMode::RegisterNextWord(_)
                | AddressingMode::Pick
                | AddressingMode::NextWordIndirect
                | AddressingMode::NextWord
        )
    }
}

impl<M: MemoryBus> CPU<M> {
    /// Reads `memory[PC]` and advances `PC`.
    fn next_word(&mut self) -> u16 {
        let word = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        word
    }

    /// Resolves an operand code into a storage location.
    ///
    /// Applies the side effects of the addressing mode to `PC` and `SP`.
    pub fn resolve_operand(&mut self, code: u8, role: OperandRole) -> Location {
        match AddressingMode::decode(code) {
            AddressingMode::Register(reg) => Location::Register(reg),
            AddressingMode::RegisterIndirect(reg) => Location::Memory(self.registers[reg.index()]),
            AddressingMode::RegisterNextWord(reg) => {
                let offset = self.next_word();
                Location::Literal(self.registers[reg.index()].wrapping_add(offset))
            }
            AddressingMode::PushPop => match role {
                OperandRole::A => {
                    let addr = self.sp;
                    self.sp = self.sp.wrapping_add(1);
                    Location::Memory(addr)
                }
                OperandRole::B => {
                    self.sp = self.sp.wrapping_sub(1);
                    Location::Memory(self.sp)
                }
            },
            AddressingMode::Peek => Location::Memory(self.sp),
            AddressingMode::Pick => {
                let offset = self.next_word();
                Location::Literal(self.sp.wrapping_add(offset))
            }
            AddressingMode::StackPointer => Location::StackPointer,
            AddressingMode::ProgramCounter => Location::ProgramCounter,
            AddressingMode::Excess => Location::Excess,
            AddressingMode::NextWordIndirect => Location::Memory(self.next_word()),
            AddressingMode::NextWord => Location::Literal(self.next_word()),
            AddressingMode::Inline(value) => Location::Literal(value),
        }
    }
}
