use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::error::CollectorError;
use crate::metric::Metric;

use super::snapshot::{BatteryStatus, ByteUsage, NetworkTotals, Snapshot, Usage, bytes_to_mb};
use super::source::{MetricsSource, NetworkCounters};
use super::top_process;

pub struct Collector<S> {
    source: S,
    disk_path: PathBuf,
    network_high_water: NetworkCounters,
}

impl<S: MetricsSource> Collector<S> {
    pub fn new(source: S, disk_path: impl Into<PathBuf>) -> Self {
        Collector {
            source,
            disk_path: disk_path.into(),
            network_high_water: NetworkCounters::default(),
        }
    }

    pub fn disk_path(&self) -> &Path {
        &self.disk_path
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn collect(&mut self) -> Result<Snapshot, CollectorError> {
        let _span = tracing::debug_span!("collector.collect").entered();

        let cpu = self.source.cpu_usage()?;
        if !cpu.is_finite() {
            return Err(CollectorError::malformed("cpu", format!("usage {cpu}")));
        }

        let memory = checked_usage("memory", self.source.memory()?)?;
        if memory.total_bytes == 0 {
            return Err(CollectorError::malformed("memory", "total is zero"));
        }
        let disk = checked_usage("disk", self.source.disk(&self.disk_path)?)?;

        let counters = self.source.network()?;
        let network = self.advance_network(counters);
        let uptime = uptime_since(self.source.boot_time()?, SystemTime::now());

        let processes = self.source.processes()?;
        let top_process = top_process::select(&processes);

        let battery = match self.source.battery()? {
            Metric::Available(reading) if reading.percent.is_finite() => {
                Metric::Available(BatteryStatus {
                    percent: reading.percent.clamp(0.0, 100.0),
                    plugged_in: reading.plugged_in,
                })
            }
            _ => Metric::Unavailable,
        };

        debug!(
            cpu,
            processes = processes.len(),
            battery = battery.is_available(),
            "snapshot collected"
        );

        Ok(Snapshot {
            cpu_usage_pct: cpu.clamp(0.0, 100.0),
            memory: Usage::from_bytes(memory),
            disk: Usage::from_bytes(disk),
            network: NetworkTotals {
                sent_mb: bytes_to_mb(network.sent_bytes),
                recv_mb: bytes_to_mb(network.recv_bytes),
            },
            uptime,
            top_process,
            battery,
            process_count: processes.len(),
        })
    }

    /// Totals drop when an interface disappears; report the high-water mark
    /// so the cumulative counters never move backwards within a run.
    fn advance_network(&mut self, current: NetworkCounters) -> NetworkCounters {
        let hw = &mut self.network_high_water;
        hw.sent_bytes = hw.sent_bytes.max(current.sent_bytes);
        hw.recv_bytes = hw.recv_bytes.max(current.recv_bytes);
        *hw
    }
}

fn checked_usage(metric: &'static str, raw: ByteUsage) -> Result<ByteUsage, CollectorError> {
    if raw.used_bytes > raw.total_bytes {
        return Err(CollectorError::malformed(
            metric,
            format!(
                "used {} bytes exceeds total {} bytes",
                raw.used_bytes, raw.total_bytes
            ),
        ));
    }
    Ok(raw)
}

fn uptime_since(boot_secs: u64, now: SystemTime) -> Duration {
    let boot = UNIX_EPOCH + Duration::from_secs(boot_secs);
    now.duration_since(boot).unwrap_or(Duration::ZERO)
}
