//! General-purpose register names.

use std::fmt;

/// One of the eight general-purpose registers.
///
/// The discriminant is the register's index in the register file and its
/// operand code in the register addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    A = 0,
    B = 1,
    C = 2,
    X = 3,
    Y = 4,
    Z = 5,
    I = 6,
    J = 7,
}

impl Register {
    /// All registers in index order.
    pub const ALL: [Register; 8] = [
        Register::A,
        Register::B,
        Register::C,
        Register::X,
        Register::Y,
        Register::Z,
        Register::I,
        Register::J,
    ];

    /// Returns the register with the given index (only the low three bits are used).
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index & 0x07) as usize]
    }

    /// Index into the register file.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Register::A => "A",
            Register::B => "B",
            Register::C => "C",
            Register::X => "X",
            Register::Y => "Y",
            Register::Z => "Z",
            Register::I => "I",
            Register::J => "J",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for (i, reg) in Register::ALL.iter().enumerate() {
            assert_eq!(reg.index(), i);
            assert_eq!(Register::from_index(i as u8), *reg);
        }
    }

    #[test]
    fn test_from_index_masks_high_bits() {
        assert_eq!(Register::from_index(0x0b), Register::X);
    }

    #[test]
    fn test_display() {
        assert_eq!(Register::J.to_string(), "J");
    }
}
