//! # Binary Images
//!
//! A program image is a flat sequence of 16-bit words loaded at address 0;
//! word 0 is the first instruction executed. On disk each word is two bytes,
//! big-endian unless the caller asks for little-endian.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::memory::{MemoryBus, MEMORY_WORDS};

/// Byte order of words in an image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness {
    #[default]
    Big,
    Little,
}

/// Errors produced while reading an image.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image is {0} bytes long; word images need an even byte count")]
    OddLength(usize),

    #[error("image holds {0} words but the address space holds {max}", max = MEMORY_WORDS)]
    TooLarge(usize),

    #[error("failed to read image")]
    Io(#[from] std::io::Error),
}

/// A validated program image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Image {
    words: Vec<u16>,
}

impl Image {
    /// Wraps already-decoded words.
    ///
    /// # Errors
    ///
    /// `ImageError::TooLarge` if there are more than 65536 words.
    pub fn from_words(words: Vec<u16>) -> Result<Self, ImageError> {
        if words.len() > MEMORY_WORDS {
            return Err(ImageError::TooLarge(words.len()));
        }
        Ok(Self { words })
    }

    /// Decodes raw bytes into words.
    ///
    /// # Examples
    ///
    /// ```
    /// use dcpu16::{Endianness, Image};
    ///
    /// let image = Image::from_bytes(&[0x7c, 0x01, 0x00, 0x30], Endianness::Big).unwrap();
    /// assert_eq!(image.words(), &[0x7c01, 0x0030]);
    ///
    /// let image = Image::from_bytes(&[0x01, 0x7c], Endianness::Little).unwrap();
    /// assert_eq!(image.words(), &[0x7c01]);
    /// ```
    pub fn from_bytes(bytes: &[u8], endianness: Endianness) -> Result<Self, ImageError> {
        if bytes.len() % 2 != 0 {
            return Err(ImageError::OddLength(bytes.len()));
        }

        let words = bytes
            .chunks_exact(2)
            .map(|pair| {
                let pair = [pair[0], pair[1]];
                match endianness {
                    Endianness::Big => u16::from_be_bytes(pair),
                    Endianness::Little => u16::from_le_bytes(pair),
                }
            })
            .collect();

        Self::from_words(words)
    }

    /// Reads and decodes an image file.
    pub fn from_file<P: AsRef<Path>>(path: P, endianness: Endianness) -> Result<Self, ImageError> {
        let bytes = fs::read(path.as_ref())?;
        log::debug!("read {} bytes from {}", bytes.len(), path.as_ref().display());
        Self::from_bytes(&bytes, endianness)
    }

    pub fn words(&self) -> &[u16] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Writes the image into memory starting at address 0.
    pub fn load_into<M: MemoryBus>(&self, memory: &mut M) {
        memory.load(0x0000, &self.words);
    }
}
