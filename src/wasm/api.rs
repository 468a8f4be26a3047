//! WASM API for the DCPU-16 emulator.
//!
//! Provides JavaScript-callable interfaces for loading images, stepping the
//! CPU and inspecting machine state.

use crate::{Endianness, ExecutionError, FlatMemory, Image, ImageError, MemoryBus, Register, CPU};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<ExecutionError> for JsError {
    fn from(error: ExecutionError) -> Self {
        JsError::new(&error.to_string())
    }
}

impl From<ImageError> for JsError {
    fn from(error: ImageError) -> Self {
        JsError::new(&error.to_string())
    }
}

/// DCPU-16 emulator handle for JavaScript.
#[wasm_bindgen]
pub struct Dcpu16Emulator {
    cpu: CPU<FlatMemory>,
}

#[wasm_bindgen]
impl Dcpu16Emulator {
    /// Create an emulator with zeroed memory
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Dcpu16Emulator {
            cpu: CPU::new(FlatMemory::new()),
        }
    }

    /// Clear memory, load an image at address 0 and reset the CPU
    pub fn load_image(&mut self, bytes: &[u8], little_endian: bool) -> Result<usize, JsError> {
        let endianness = if little_endian {
            Endianness::Little
        } else {
            Endianness::Big
        };
        let image = Image::from_bytes(bytes, endianness)?;

        self.cpu = CPU::new(FlatMemory::new());
        self.cpu.load_image(&image);
        Ok(image.len())
    }

    /// Execute a single instruction
    pub fn step(&mut self) -> Result<(), JsError> {
        self.cpu.step().map_err(JsError::from)
    }

    /// Execute up to `max_steps` instructions and return how many ran.
    ///
    /// Stops early without error when the machine halts on an unimplemented
    /// opcode; check `is_halted()` afterwards.
    pub fn run(&mut self, max_steps: u32) -> Result<u32, JsError> {
        let mut executed = 0;
        while executed < max_steps && !self.cpu.is_halted() {
            match self.cpu.step() {
                Ok(()) => executed += 1,
                Err(error) if !error.is_fatal() => break,
                Err(error) => return Err(error.into()),
            }
        }
        Ok(executed)
    }

    /// Reset registers and run state, keeping memory
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Register value by index (0 = A … 7 = J)
    pub fn register(&self, index: u8) -> u16 {
        self.cpu.register(Register::from_index(index))
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u16 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn ex(&self) -> u16 {
        self.cpu.ex()
    }

    pub fn read_memory(&self, addr: u16) -> u16 {
        self.cpu.memory().read(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u16) {
        self.cpu.memory_mut().write(addr, value);
    }

    pub fn is_halted(&self) -> bool {
        self.cpu.is_halted()
    }

    /// Halt reason as text, if the machine has halted
    pub fn halt_reason(&self) -> Option<String> {
        self.cpu.halt_reason().map(|reason| reason.to_string())
    }

    /// Human-readable state dump
    pub fn dump(&self) -> String {
        self.cpu.dump().to_string()
    }
}

impl Default for Dcpu16Emulator {
    fn default() -> Self {
        Self::new()
    }
}
