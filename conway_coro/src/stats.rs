// stats.rs - Memory telemetry shown under the grid

use sysinfo::{MemoryRefreshKind, Pid, ProcessesToUpdate, RefreshKind, System, get_current_pid};
use tracing::warn;

const MIB: u64 = 1024 * 1024;

/// Memory figures in bytes. Process figures belong to this process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryReading {
    pub resident_bytes: u64,
    pub virtual_bytes: u64,
    pub system_total_bytes: u64,
}

pub struct MemoryStats {
    sys: System,
    pid: Option<Pid>,
}

impl MemoryStats {
    pub fn new() -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::new().with_memory(MemoryRefreshKind::everything()),
        );
        let pid = match get_current_pid() {
            Ok(pid) => Some(pid),
            Err(err) => {
                warn!(err, "process memory unavailable");
                None
            }
        };
        Self { sys, pid }
    }

    pub fn refresh(&mut self) -> MemoryReading {
        self.sys.refresh_memory();
        let mut reading = MemoryReading {
            system_total_bytes: self.sys.total_memory(),
            ..MemoryReading::default()
        };

        if let Some(pid) = self.pid {
            self.sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
            if let Some(process) = self.sys.process(pid) {
                reading.resident_bytes = process.memory();
                reading.virtual_bytes = process.virtual_memory();
            }
        }
        reading
    }
}

/// Text lines for the statistics rows, most important first.
pub fn stat_lines(generation: u64, population: usize, tracked_rows: usize, memory: MemoryReading) -> [String; 5] {
    [
        format!("Generation = {generation}"),
        format!("Population = {population}"),
        format!("Tracked rows = {tracked_rows}"),
        format!(
            "Resident = {} MiB\tVirtual = {} MiB",
            memory.resident_bytes / MIB,
            memory.virtual_bytes / MIB
        ),
        format!("System = {} MiB", memory.system_total_bytes / MIB),
    ]
}
