//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from specific
//! memory implementations. The DCPU-16 addresses 16-bit words, not bytes: every
//! address in 0x0000-0xFFFF names one word, and code and data share the space.
//!
//! ## Design Principles
//!
//! - No bus errors - reads/writes always succeed
//! - Addresses are `u16`, so every address is in range by construction
//! - Simple signatures for WASM compatibility

/// Number of words in the DCPU-16 address space.
pub const MEMORY_WORDS: usize = 0x10000;

/// Memory bus trait for the CPU to read/write words.
///
/// The CPU accesses all memory through this abstraction.
///
/// # Examples
///
/// ```
/// use dcpu16::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0xBEEF);
/// assert_eq!(mem.read(0x1234), 0xBEEF);
/// ```
pub trait MemoryBus {
    /// Reads the word at the specified address.
    ///
    /// This method must never panic.
    fn read(&self, addr: u16) -> u16;

    /// Writes a word to the specified address.
    ///
    /// This method must never panic.
    fn write(&mut self, addr: u16, value: u16);

    /// Writes `words` starting at `start`, wrapping at the top of the address space.
    fn load(&mut self, start: u16, words: &[u16]) {
        let mut addr = start;
        for &word in words {
            self.write(addr, word);
            addr = addr.wrapping_add(1);
        }
    }
}

/// Flat 64K-word memory.
///
/// All 65536 addresses are mapped to a single contiguous RAM array
/// initialized to zero.
///
/// # Examples
///
/// ```
/// use dcpu16::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0x0000, &[0x7c01, 0x0030]); // SET A, 0x30
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x0000);
/// assert_eq!(cpu.memory().read(0x0001), 0x0030);
/// ```
pub struct FlatMemory {
    /// 64K-word contiguous memory array
    data: Box<[u16]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all words initialized to zero.
    pub fn new() -> Self {
        Self {
            data: vec![0u16; MEMORY_WORDS].into_boxed_slice(),
        }
    }

    /// Creates memory holding `words` at addresses 0, 1, 2, …
    ///
    /// Words beyond the address space are ignored; use [`crate::Image`] to
    /// reject oversized images instead.
    pub fn with_words(words: &[u16]) -> Self {
        let mut memory = Self::new();
        let len = words.len().min(MEMORY_WORDS);
        memory.data[..len].copy_from_slice(&words[..len]);
        memory
    }

    /// Returns the whole address space as a slice.
    pub fn as_slice(&self) -> &[u16] {
        &self.data
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u16 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u16) {
        self.data[addr as usize] = value;
    }
}
