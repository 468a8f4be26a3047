//! # Instruction Decoder
//!
//! Pure field extraction from 16-bit instruction words.
//!
//! ```text
//!  15        10 9      5 4      0
//! +------------+--------+--------+
//! |  operand a | oper b | opcode |
//! +------------+--------+--------+
//! ```
//!
//! When the opcode field is zero the instruction is in the special form: bits
//! 5-9 hold a special opcode instead of operand b, and operand a is the only
//! operand.

use crate::addressing::AddressingMode;

/// Opcode field value marking the special form.
pub const SPECIAL_FORM: u8 = 0x00;

/// Basic opcode, bits 0-4.
pub fn opcode(word: u16) -> u8 {
    (word & 0x1f) as u8
}

/// Special opcode, bits 5-9. Only meaningful when `opcode(word) == 0`.
pub fn special_opcode(word: u16) -> u8 {
    ((word >> 5) & 0x1f) as u8
}

/// Operand a code, bits 10-15.
pub fn operand_a(word: u16) -> u8 {
    ((word >> 10) & 0x3f) as u8
}

/// Operand b code, bits 5-9.
pub fn operand_b(word: u16) -> u8 {
    ((word >> 5) & 0x1f) as u8
}

/// Returns true if `word` is in the special form.
pub fn is_special(word: u16) -> bool {
    opcode(word) == SPECIAL_FORM
}

/// Total length of the instruction in words, including operand words.
///
/// Counts one extra word for each operand whose addressing mode consumes the
/// next word. For the special form only operand a is counted, since bits 5-9
/// are not an operand there.
///
/// # Examples
///
/// ```
/// use dcpu16::decoder::instruction_length;
///
/// assert_eq!(instruction_length(0x0401), 1); // SET A, B
/// assert_eq!(instruction_length(0x7c01), 2); // SET A, <next word>
/// assert_eq!(instruction_length(0x7fc1), 3); // SET <[next word]>, <next word>
/// ```
pub fn instruction_length(word: u16) -> u16 {
    let mut length = 1;

    if AddressingMode::decode(operand_a(word)).consumes_next_word() {
        length += 1;
    }
    if !is_special(word) && AddressingMode::decode(operand_b(word)).consumes_next_word() {
        length += 1;
    }

    length
}

/// Builds a basic instruction word from its fields.
///
/// Fields are masked to their widths (5 bits for `opcode` and `b`, 6 bits for `a`).
pub fn encode(opcode: u8, b: u8, a: u8) -> u16 {
    (opcode as u16 & 0x1f) | ((b as u16 & 0x1f) << 5) | ((a as u16 & 0x3f) << 10)
}

/// Builds a special-form instruction word.
pub fn encode_special(special: u8, a: u8) -> u16 {
    encode(SPECIAL_FORM, special, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_extraction() {
        // SET [0x1000], 0x1234 -> opcode 0x01, b 0x1e, a 0x1f
        let word = 0x7fc1;
        assert_eq!(opcode(word), 0x01);
        assert_eq!(operand_b(word), 0x1e);
        assert_eq!(operand_a(word), 0x1f);
    }

    #[test]
    fn test_special_shares_operand_b_field() {
        let word = encode_special(0x01, 0x1f);
        assert_eq!(word, 0x7c20);
        assert!(is_special(word));
        assert_eq!(special_opcode(word), 0x01);
        assert_eq!(operand_b(word), special_opcode(word));
    }

    #[test]
    fn test_encode_masks_fields() {
        assert_eq!(encode(0x21, 0x21, 0x41), encode(0x01, 0x01, 0x01));
    }

    #[test]
    fn test_length_counts_next_word_modes() {
        // register + next word, pick, next word indirect, next word literal
        for a in [0x10, 0x17, 0x1a, 0x1e, 0x1f] {
            assert_eq!(instruction_length(encode(0x01, 0x00, a)), 2, "a = 0x{:02x}", a);
            assert_eq!(instruction_length(encode(0x01, a, 0x00)), 2, "b = 0x{:02x}", a);
        }
        // everything else is free
        for a in [0x00, 0x08, 0x18, 0x19, 0x1b, 0x1c, 0x1d, 0x20, 0x3f] {
            assert_eq!(instruction_length(encode(0x01, 0x00, a)), 1, "a = 0x{:02x}", a);
        }
    }

    #[test]
    fn test_length_both_operands() {
        assert_eq!(instruction_length(encode(0x02, 0x1e, 0x1f)), 3);
    }

    #[test]
    fn test_length_special_form_ignores_b_field() {
        // Special opcode 0x10 (HWN) sits in the b field but is not an operand.
        assert_eq!(instruction_length(encode_special(0x10, 0x00)), 1);
        assert_eq!(instruction_length(encode_special(0x1e, 0x1f)), 2);
    }
}
