//! Machine state snapshots for end-of-run reports.

use std::fmt;

use crate::registers::Register;
use crate::{ExecutionError, MemoryBus, CPU};

/// Copy of the reportable machine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDump {
    pub registers: [u16; 8],
    pub pc: u16,
    pub sp: u16,
    pub ex: u16,
    /// Word stored at `pc`
    pub word_at_pc: u16,
    pub steps: u64,
    pub halt_reason: Option<ExecutionError>,
}

impl StateDump {
    pub fn capture<M: MemoryBus>(cpu: &CPU<M>) -> Self {
        Self {
            registers: *cpu.registers(),
            pc: cpu.pc(),
            sp: cpu.sp(),
            ex: cpu.ex(),
            word_at_pc: cpu.memory().read(cpu.pc()),
            steps: cpu.steps(),
            halt_reason: cpu.halt_reason(),
        }
    }

    pub fn register(&self, reg: Register) -> u16 {
        self.registers[reg.index()]
    }
}

impl fmt::Display for StateDump {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "pc: {:04x} [pc]: {:04x} steps: {}", self.pc, self.word_at_pc, self.steps)?;

        for row in Register::ALL.chunks(4) {
            let cells: Vec<String> = row
                .iter()
                .map(|reg| format!("{}: {:04x}", reg.name().to_lowercase(), self.register(*reg)))
                .collect();
            writeln!(f, "{}", cells.join("  "))?;
        }

        write!(f, "sp: {:04x} ex: {:04x}", self.sp, self.ex)?;

        if let Some(reason) = self.halt_reason {
            write!(f, "\nhalted: {}", reason)?;
        }
        Ok(())
    }
}
