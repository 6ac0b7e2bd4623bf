#![allow(dead_code)]

use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use hostwatch::error::CollectorError;
use hostwatch::metric::Metric;
use hostwatch::system::snapshot::ByteUsage;
use hostwatch::system::source::{BatteryReading, MetricsSource, NetworkCounters, ProcessSample};

pub const MB: u64 = 1_048_576;

/// In-memory host. Tick numbers listed in `fail_ticks` (1-based) fail at the
/// CPU query, as if the OS layer went away for a moment.
pub struct FakeSource {
    pub cpu: f32,
    pub memory: ByteUsage,
    pub disk: ByteUsage,
    pub network: NetworkCounters,
    pub boot_time: u64,
    pub processes: Vec<ProcessSample>,
    pub battery: Metric<BatteryReading>,
    pub fail_ticks: Vec<usize>,
    pub ticks: Rc<Cell<usize>>,
}

impl FakeSource {
    pub fn healthy() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        FakeSource {
            cpu: 37.0,
            memory: ByteUsage {
                used_bytes: 6 * 1024 * MB,
                total_bytes: 16 * 1024 * MB,
            },
            disk: ByteUsage {
                used_bytes: 200 * 1024 * MB,
                total_bytes: 500 * 1024 * MB,
            },
            network: NetworkCounters {
                sent_bytes: 10 * MB,
                recv_bytes: 250 * MB,
            },
            boot_time: now - 7_200,
            processes: vec![
                process(1, "systemd", 0.3),
                process(812, "postgres", 12.0),
                process(4410, "rustc", 97.5),
            ],
            battery: Metric::Unavailable,
            fail_ticks: Vec::new(),
            ticks: Rc::new(Cell::new(0)),
        }
    }

    pub fn failing_on(mut self, ticks: &[usize]) -> Self {
        self.fail_ticks = ticks.to_vec();
        self
    }
}

pub fn process(pid: u32, name: &str, cpu_pct: f32) -> ProcessSample {
    ProcessSample {
        pid,
        name: name.to_string(),
        cpu_pct,
    }
}

impl MetricsSource for FakeSource {
    fn cpu_usage(&mut self) -> Result<f32, CollectorError> {
        let tick = self.ticks.get() + 1;
        self.ticks.set(tick);
        if self.fail_ticks.contains(&tick) {
            return Err(CollectorError::query("cpu", "simulated outage"));
        }
        Ok(self.cpu)
    }

    fn memory(&mut self) -> Result<ByteUsage, CollectorError> {
        Ok(self.memory)
    }

    fn disk(&mut self, _path: &Path) -> Result<ByteUsage, CollectorError> {
        Ok(self.disk)
    }

    fn network(&mut self) -> Result<NetworkCounters, CollectorError> {
        Ok(self.network)
    }

    fn boot_time(&mut self) -> Result<u64, CollectorError> {
        Ok(self.boot_time)
    }

    fn processes(&mut self) -> Result<Vec<ProcessSample>, CollectorError> {
        Ok(self.processes.clone())
    }

    fn battery(&mut self) -> Result<Metric<BatteryReading>, CollectorError> {
        Ok(self.battery)
    }
}
