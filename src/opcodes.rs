//! # Opcode Enumerations
//!
//! Closed enumerations of the DCPU-16 basic opcodes (bits 0-4 of an
//! instruction word) and special opcodes (bits 5-9 when the basic opcode is
//! zero), with mnemonics and implementation status.
//!
//! Only SET, ADD, SUB, the eight IF conditionals and JSR are executed. The
//! rest of the instruction set is listed so it can be named in traces and
//! reported precisely when the machine halts on it.

use std::fmt;

/// Predicate of a skip-conditional (IF*) instruction.
///
/// The predicate is evaluated as `predicate(b, a)`; when it is false the
/// next instruction is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// IFB: `(b & a) != 0`
    BitsSet,
    /// IFC: `(b & a) == 0`
    BitsClear,
    /// IFE: `b == a`
    Equal,
    /// IFN: `b != a`
    NotEqual,
    /// IFG: `b > a` (unsigned)
    Greater,
    /// IFA: `b > a` (signed)
    GreaterSigned,
    /// IFL: `b < a` (unsigned)
    Less,
    /// IFU: `b < a` (signed)
    LessSigned,
}

impl Condition {
    /// All conditions in opcode order (0x10-0x17).
    pub const ALL: [Condition; 8] = [
        Condition::BitsSet,
        Condition::BitsClear,
        Condition::Equal,
        Condition::NotEqual,
        Condition::Greater,
        Condition::GreaterSigned,
        Condition::Less,
        Condition::LessSigned,
    ];

    /// Evaluates the predicate over the values of operand b and operand a.
    pub fn holds(self, b: u16, a: u16) -> bool {
        match self {
            Condition::BitsSet => (b & a) != 0,
            Condition::BitsClear => (b & a) == 0,
            Condition::Equal => b == a,
            Condition::NotEqual => b != a,
            Condition::Greater => b > a,
            Condition::GreaterSigned => (b as i16) > (a as i16),
            Condition::Less => b < a,
            Condition::LessSigned => (b as i16) < (a as i16),
        }
    }

    fn offset(self) -> u8 {
        match self {
            Condition::BitsSet => 0,
            Condition::BitsClear => 1,
            Condition::Equal => 2,
            Condition::NotEqual => 3,
            Condition::Greater => 4,
            Condition::GreaterSigned => 5,
            Condition::Less => 6,
            Condition::LessSigned => 7,
        }
    }
}

/// Basic (non-special) opcodes.
///
/// Code 0x00 is not a basic opcode: it marks the special form and is decoded
/// with [`SpecialOpcode`]. Codes 0x18, 0x19, 0x1c and 0x1d are unassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Set,
    Add,
    Sub,
    Mul,
    Mli,
    Div,
    Dvi,
    Mod,
    Mdi,
    And,
    Bor,
    Xor,
    Shr,
    Asr,
    Shl,
    If(Condition),
    Adx,
    Sbx,
    Sti,
    Std,
}

impl Opcode {
    /// Decodes a 5-bit opcode field. Returns `None` for 0x00 and unassigned codes.
    pub fn from_code(code: u8) -> Option<Self> {
        let op = match code {
            0x01 => Opcode::Set,
            0x02 => Opcode::Add,
            0x03 => Opcode::Sub,
            0x04 => Opcode::Mul,
            0x05 => Opcode::Mli,
            0x06 => Opcode::Div,
            0x07 => Opcode::Dvi,
            0x08 => Opcode::Mod,
            0x09 => Opcode::Mdi,
            0x0a => Opcode::And,
            0x0b => Opcode::Bor,
            0x0c => Opcode::Xor,
            0x0d => Opcode::Shr,
            0x0e => Opcode::Asr,
            0x0f => Opcode::Shl,
            0x10..=0x17 => Opcode::If(Condition::ALL[(code - 0x10) as usize]),
            0x1a => Opcode::Adx,
            0x1b => Opcode::Sbx,
            0x1e => Opcode::Sti,
            0x1f => Opcode::Std,
            _ => return None,
        };
        Some(op)
    }

    /// The 5-bit code of this opcode.
    pub fn code(self) -> u8 {
        match self {
            Opcode::Set => 0x01,
            Opcode::Add => 0x02,
            Opcode::Sub => 0x03,
            Opcode::Mul => 0x04,
            Opcode::Mli => 0x05,
            Opcode::Div => 0x06,
            Opcode::Dvi => 0x07,
            Opcode::Mod => 0x08,
            Opcode::Mdi => 0x09,
            Opcode::And => 0x0a,
            Opcode::Bor => 0x0b,
            Opcode::Xor => 0x0c,
            Opcode::Shr => 0x0d,
            Opcode::Asr => 0x0e,
            Opcode::Shl => 0x0f,
            Opcode::If(condition) => 0x10 + condition.offset(),
            Opcode::Adx => 0x1a,
            Opcode::Sbx => 0x1b,
            Opcode::Sti => 0x1e,
            Opcode::Std => 0x1f,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Set => "SET",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Mli => "MLI",
            Opcode::Div => "DIV",
            Opcode::Dvi => "DVI",
            Opcode::Mod => "MOD",
            Opcode::Mdi => "MDI",
            Opcode::And => "AND",
            Opcode::Bor => "BOR",
            Opcode::Xor => "XOR",
            Opcode::Shr => "SHR",
            Opcode::Asr => "ASR",
            Opcode::Shl => "SHL",
            Opcode::If(Condition::BitsSet) => "IFB",
            Opcode::If(Condition::BitsClear) => "IFC",
            Opcode::If(Condition::Equal) => "IFE",
            Opcode::If(Condition::NotEqual) => "IFN",
            Opcode::If(Condition::Greater) => "IFG",
            Opcode::If(Condition::GreaterSigned) => "IFA",
            Opcode::If(Condition::Less) => "IFL",
            Opcode::If(Condition::LessSigned) => "IFU",
            Opcode::Adx => "ADX",
            Opcode::Sbx => "SBX",
            Opcode::Sti => "STI",
            Opcode::Std => "STD",
        }
    }

    /// Whether the execution engine runs this opcode instead of halting on it.
    pub fn is_implemented(self) -> bool {
        matches!(self, Opcode::Set | Opcode::Add | Opcode::Sub | Opcode::If(_))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Special opcodes, carried in bits 5-9 when the basic opcode is 0x00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialOpcode {
    Jsr,
    Int,
    Iag,
    Ias,
    Rfi,
    Iaq,
    Hwn,
    Hwq,
    Hwi,
}

impl SpecialOpcode {
    /// Decodes a 5-bit special opcode field. Returns `None` for unassigned codes.
    pub fn from_code(code: u8) -> Option<Self> {
        let op = match code {
            0x01 => SpecialOpcode::Jsr,
            0x08 => SpecialOpcode::Int,
            0x09 => SpecialOpcode::Iag,
            0x0a => SpecialOpcode::Ias,
            0x0b => SpecialOpcode::Rfi,
            0x0c => SpecialOpcode::Iaq,
            0x10 => SpecialOpcode::Hwn,
            0x11 => SpecialOpcode::Hwq,
            0x12 => SpecialOpcode::Hwi,
            _ => return None,
        };
        Some(op)
    }

    pub fn code(self) -> u8 {
        match self {
            SpecialOpcode::Jsr => 0x01,
            SpecialOpcode::Int => 0x08,
            SpecialOpcode::Iag => 0x09,
            SpecialOpcode::Ias => 0x0a,
            SpecialOpcode::Rfi => 0x0b,
            SpecialOpcode::Iaq => 0x0c,
            SpecialOpcode::Hwn => 0x10,
            SpecialOpcode::Hwq => 0x11,
            SpecialOpcode::Hwi => 0x12,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            SpecialOpcode::Jsr => "JSR",
            SpecialOpcode::Int => "INT",
            SpecialOpcode::Iag => "IAG",
            SpecialOpcode::Ias => "IAS",
            SpecialOpcode::Rfi => "RFI",
            SpecialOpcode::Iaq => "IAQ",
            SpecialOpcode::Hwn => "HWN",
            SpecialOpcode::Hwq => "HWQ",
            SpecialOpcode::Hwi => "HWI",
        }
    }

    /// Only JSR is executed; interrupts and hardware are not emulated.
    pub fn is_implemented(self) -> bool {
        matches!(self, SpecialOpcode::Jsr)
    }
}

impl fmt::Display for SpecialOpcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Mnemonic for an instruction word, or `"???"` for unassigned codes.
pub fn mnemonic_for(word: u16) -> &'static str {
    let opcode = crate::decoder::opcode(word);
    if opcode == 0 {
        SpecialOpcode::from_code(crate::decoder::special_opcode(word))
            .map_or("???", SpecialOpcode::mnemonic)
    } else {
        Opcode::from_code(opcode).map_or("???", Opcode::mnemonic)
    }
}
