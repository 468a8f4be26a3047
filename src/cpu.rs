//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the DCPU-16 machine state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: eight general-purpose 16-bit registers (A, B, C, X, Y, Z, I, J)
//! - **Program counter** (PC): address of the next instruction word
//! - **Stack pointer** (SP): grows downward; the first push lands at 0xFFFF
//! - **Excess** (EX): overflow/auxiliary register
//! - **Run state**: running, or halted with a reason
//!
//! All registers wrap modulo 65536.
//!
//! ## Execution Model
//!
//! - `step()`: Execute one instruction
//! - `run()`: Execute until the machine halts
//! - `run_for_steps()`: Execute at most a given number of instructions

use crate::addressing::OperandRole;
use crate::dump::StateDump;
use crate::image::Image;
use crate::instructions;
use crate::registers::Register;
use crate::trace::{NullTracer, Tracer};
use crate::{decoder, ExecutionError, HaltReason, MemoryBus};

/// Whether the machine is still executing instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Terminal. Only `reset()` leaves this state.
    Halted,
}

/// DCPU-16 CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait.
///
/// # Examples
///
/// ```
/// use dcpu16::{CPU, FlatMemory, RunState};
///
/// let cpu = CPU::new(FlatMemory::new());
///
/// assert_eq!(cpu.pc(), 0x0000);
/// assert_eq!(cpu.sp(), 0x0000);
/// assert_eq!(cpu.ex(), 0x0000);
/// assert_eq!(cpu.state(), RunState::Running);
/// ```
pub struct CPU<M: MemoryBus> {
    /// General-purpose registers, indexed by `Register`
    pub(crate) registers: [u16; 8],

    /// Program counter (address of next instruction word)
    pub(crate) pc: u16,

    /// Stack pointer
    pub(crate) sp: u16,

    /// Excess register
    pub(crate) ex: u16,

    pub(crate) state: RunState,

    /// Error that halted the machine, if any
    pub(crate) halt_reason: Option<ExecutionError>,

    /// Instructions fetched since power-on or reset
    pub(crate) steps: u64,

    pub(crate) tracer: Box<dyn Tracer>,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the given memory bus.
    ///
    /// All registers, PC, SP and EX start at zero; memory is used as given.
    pub fn new(memory: M) -> Self {
        Self {
            registers: [0; 8],
            pc: 0,
            sp: 0,
            ex: 0,
            state: RunState::Running,
            halt_reason: None,
            steps: 0,
            tracer: Box::new(NullTracer),
            memory,
        }
    }

    /// Replaces the tracer, builder style.
    pub fn with_tracer(mut self, tracer: Box<dyn Tracer>) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn set_tracer(&mut self, tracer: Box<dyn Tracer>) {
        self.tracer = tracer;
    }

    /// Returns registers, PC, SP, EX and the run state to power-on values.
    ///
    /// Memory is left untouched.
    pub fn reset(&mut self) {
        self.registers = [0; 8];
        self.pc = 0;
        self.sp = 0;
        self.ex = 0;
        self.state = RunState::Running;
        self.halt_reason = None;
        self.steps = 0;
    }

    /// Writes an image into memory starting at address 0.
    pub fn load_image(&mut self, image: &Image) {
        image.load_into(&mut self.memory);
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Fetch the word at PC and advance PC
    /// 2. Resolve operand a, then operand b (not for the special form)
    /// 3. Dispatch on the opcode
    ///
    /// Any error halts the machine. Effects applied before the error (PC
    /// advance, stack pointer movement) are kept.
    ///
    /// # Errors
    ///
    /// - `UnimplementedOpcode` / `UnimplementedSpecialOpcode` for instructions
    ///   outside the executed subset
    /// - `LiteralWrite` if the instruction stores into a literal operand
    /// - `Halted` if the machine had already halted; no state changes
    ///
    /// # Examples
    ///
    /// ```
    /// use dcpu16::{decoder, CPU, ExecutionError, FlatMemory, RunState};
    ///
    /// // MUL A, B is not implemented
    /// let memory = FlatMemory::with_words(&[decoder::encode(0x04, 0x00, 0x01)]);
    /// let mut cpu = CPU::new(memory);
    ///
    /// assert_eq!(cpu.step(), Err(ExecutionError::UnimplementedOpcode(0x04)));
    /// assert_eq!(cpu.state(), RunState::Halted);
    /// assert_eq!(cpu.step(), Err(ExecutionError::Halted));
    /// ```
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        if self.state == RunState::Halted {
            return Err(ExecutionError::Halted);
        }

        let result = self.execute_next();
        self.steps = self.steps.saturating_add(1);

        if let Err(error) = result {
            self.halt(error);
        }
        result
    }

    fn execute_next(&mut self) -> Result<(), ExecutionError> {
        // Fetch
        let addr = self.pc;
        let word = self.memory.read(addr);
        self.pc = self.pc.wrapping_add(1);
        self.tracer.on_instruction(addr, word);

        // Operand a always comes first
        let a = self.resolve_operand(decoder::operand_a(word), OperandRole::A);

        if decoder::is_special(word) {
            return instructions::execute_special(self, decoder::special_opcode(word), a);
        }

        let b = self.resolve_operand(decoder::operand_b(word), OperandRole::B);
        instructions::execute_basic(self, decoder::opcode(word), a, b)
    }

    fn halt(&mut self, error: ExecutionError) {
        self.state = RunState::Halted;
        self.halt_reason = Some(error);
        if error.is_fatal() {
            log::debug!("fault at pc={:04x}: {}", self.pc, error);
        } else {
            log::debug!("halted at pc={:04x}: {}", self.pc, error);
        }
    }

    /// Runs until the machine halts.
    ///
    /// # Returns
    ///
    /// - `Ok(reason)` when the machine stopped on an unimplemented opcode or
    ///   special opcode; state is left for inspection
    /// - `Err(error)` for fatal faults, or `Err(ExecutionError::Halted)` if the
    ///   machine was already halted
    ///
    /// # Examples
    ///
    /// ```
    /// use dcpu16::{decoder, CPU, FlatMemory, HaltReason, Register};
    ///
    /// let memory = FlatMemory::with_words(&[
    ///     decoder::encode(0x01, 0x00, 0x31), // SET A, 0x10
    ///     decoder::encode(0x02, 0x00, 0x00), // ADD A, A
    /// ]);
    /// let mut cpu = CPU::new(memory);
    ///
    /// assert_eq!(cpu.run(), Ok(HaltReason::UnimplementedSpecialOpcode(0x00)));
    /// assert_eq!(cpu.register(Register::A), 0x20);
    /// ```
    pub fn run(&mut self) -> Result<HaltReason, ExecutionError> {
        loop {
            if let Err(error) = self.step() {
                return HaltReason::from_error(error).ok_or(error);
            }
        }
    }

    /// Executes at most `budget` instructions.
    ///
    /// Returns the number of instructions executed, or the first error.
    pub fn run_for_steps(&mut self, budget: u64) -> Result<u64, ExecutionError> {
        let mut executed = 0;

        while executed < budget {
            self.step()?;
            executed += 1;
        }

        Ok(executed)
    }

    /// Captures the reportable machine state.
    pub fn dump(&self) -> StateDump {
        StateDump::capture(self)
    }

    // ========== Getters ==========

    pub fn register(&self, reg: Register) -> u16 {
        self.registers[reg.index()]
    }

    /// Returns the register file in index order (A, B, C, X, Y, Z, I, J).
    pub fn registers(&self) -> &[u16; 8] {
        &self.registers
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    pub fn sp(&self) -> u16 {
        self.sp
    }

    /// Returns the excess register value.
    pub fn ex(&self) -> u16 {
        self.ex
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == RunState::Halted
    }

    /// Returns the error that halted the machine, if it has halted.
    pub fn halt_reason(&self) -> Option<ExecutionError> {
        self.halt_reason
    }

    /// Returns the number of instructions fetched since power-on or reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Setters ==========

    pub fn set_register(&mut self, reg: Register, value: u16) {
        self.registers[reg.index()] = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u16) {
        self.sp = value;
    }

    pub fn set_ex(&mut self, value: u16) {
        self.ex = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlatMemory, MemoryBus};

    #[test]
    fn test_cpu_initialization() {
        let cpu = CPU::new(FlatMemory::new());

        assert_eq!(cpu.registers(), &[0; 8]);
        assert_eq!(cpu.pc(), 0);
        assert_eq!(cpu.sp(), 0);
        assert_eq!(cpu.ex(), 0);
        assert_eq!(cpu.steps(), 0);
        assert_eq!(cpu.state(), RunState::Running);
        assert_eq!(cpu.halt_reason(), None);
    }

    #[test]
    fn test_step_records_halt_reason() {
        let mut cpu = CPU::new(FlatMemory::new());

        // Word 0 is 0x0000: special opcode 0x00 with operand a = register A
        assert_eq!(cpu.step(), Err(ExecutionError::UnimplementedSpecialOpcode(0x00)));
        assert!(cpu.is_halted());
        assert_eq!(cpu.halt_reason(), Some(ExecutionError::UnimplementedSpecialOpcode(0x00)));
        assert_eq!(cpu.pc(), 1);
        assert_eq!(cpu.steps(), 1);
    }

    #[test]
    fn test_step_after_halt_changes_nothing() {
        let mut cpu = CPU::new(FlatMemory::new());
        let _ = cpu.step();

        assert_eq!(cpu.step(), Err(ExecutionError::Halted));
        assert_eq!(cpu.pc(), 1);
        assert_eq!(cpu.steps(), 1);
        assert_eq!(cpu.run(), Err(ExecutionError::Halted));
    }

    #[test]
    fn test_reset_keeps_memory() {
        let mut cpu = CPU::new(FlatMemory::with_words(&[decoder::encode(0x01, 0x00, 0x25)]));
        cpu.run().unwrap();
        assert_eq!(cpu.register(Register::A), 4);

        cpu.reset();

        assert_eq!(cpu.register(Register::A), 0);
        assert_eq!(cpu.pc(), 0);
        assert_eq!(cpu.state(), RunState::Running);
        assert_eq!(cpu.halt_reason(), None);
        assert_eq!(cpu.memory().read(0), decoder::encode(0x01, 0x00, 0x25));
    }

    #[test]
    fn test_run_for_steps_stops_at_budget() {
        // SET A, 1 repeated
        let program = [decoder::encode(0x01, 0x00, 0x22); 8];
        let mut cpu = CPU::new(FlatMemory::with_words(&program));

        assert_eq!(cpu.run_for_steps(5), Ok(5));
        assert_eq!(cpu.pc(), 5);
        assert_eq!(cpu.state(), RunState::Running);
    }

    #[test]
    fn test_run_for_steps_propagates_halt() {
        let program = [decoder::encode(0x01, 0x00, 0x22); 2];
        let mut cpu = CPU::new(FlatMemory::with_words(&program));

        assert_eq!(
            cpu.run_for_steps(10),
            Err(ExecutionError::UnimplementedSpecialOpcode(0x00))
        );
        assert_eq!(cpu.steps(), 3);
    }

    #[test]
    fn test_run_returns_fatal_errors() {
        // SET <next word literal 7>, A
        let mut cpu = CPU::new(FlatMemory::with_words(&[decoder::encode(0x01, 0x1f, 0x00), 7]));

        assert_eq!(cpu.run(), Err(ExecutionError::LiteralWrite(7)));
        assert!(cpu.is_halted());
    }

    #[test]
    fn test_load_image() {
        let image = Image::from_words(vec![0x1111, 0x2222]).unwrap();
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.load_image(&image);

        assert_eq!(cpu.memory().read(0), 0x1111);
        assert_eq!(cpu.memory().read(1), 0x2222);
    }
}
