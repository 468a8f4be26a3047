//! # Execution Tracing
//!
//! Observers for instruction fetches and location accesses. The CPU owns one
//! boxed [`Tracer`]; the default [`NullTracer`] does nothing, and
//! [`LogTracer`] forwards every event to the `log` facade at `trace` level.
//!
//! Tracers only observe. They cannot change machine state.

use crate::location::Location;
use crate::opcodes;

/// Receives diagnostic events from the CPU.
///
/// All methods have empty default implementations.
pub trait Tracer {
    /// Called after an instruction word is fetched from `addr`.
    fn on_instruction(&mut self, _addr: u16, _word: u16) {}

    /// Called after `value` was read from `location`.
    fn on_read(&mut self, _location: Location, _value: u16) {}

    /// Called after `value` was written to `location`.
    fn on_write(&mut self, _location: Location, _value: u16) {}
}

/// Tracer that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTracer;

impl Tracer for NullTracer {}

/// Tracer that logs every event with `log::trace!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn on_instruction(&mut self, addr: u16, word: u16) {
        log::trace!("{:04x}: {:04x} {}", addr, word, opcodes::mnemonic_for(word));
    }

    fn on_read(&mut self, location: Location, value: u16) {
        log::trace!("READ  {} -> {:04x}", location, value);
    }

    fn on_write(&mut self, location: Location, value: u16) {
        log::trace!("WRITE {}, {:04x}", location, value);
    }
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Event captured by [`RecordingTracer`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Event {
        Fetch(u16, u16),
        Read(Location, u16),
        Write(Location, u16),
    }

    /// Test tracer that appends events to a shared log.
    #[derive(Default, Clone)]
    pub struct RecordingTracer {
        pub events: Rc<RefCell<Vec<Event>>>,
    }

    impl Tracer for RecordingTracer {
        fn on_instruction(&mut self, addr: u16, word: u16) {
            self.events.borrow_mut().push(Event::Fetch(addr, word));
        }

        fn on_read(&mut self, location: Location, value: u16) {
            self.events.borrow_mut().push(Event::Read(location, value));
        }

        fn on_write(&mut self, location: Location, value: u16) {
            self.events.borrow_mut().push(Event::Write(location, value));
        }
    }
}
