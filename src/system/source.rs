use std::path::{Path, PathBuf};
use std::time::Duration;

use battery::units::ratio::percent;
use sysinfo::{Disks, Networks, ProcessRefreshKind, ProcessesToUpdate, System};
use tracing::debug;

use crate::error::CollectorError;
use crate::metric::Metric;

use super::snapshot::ByteUsage;

/// How long CPU counters must age after construction before the first
/// usage reading means anything.
pub const CPU_SETTLE_TIME: Duration = sysinfo::MINIMUM_CPU_UPDATE_INTERVAL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetworkCounters {
    pub sent_bytes: u64,
    pub recv_bytes: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub cpu_pct: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryReading {
    pub percent: f32,
    pub plugged_in: bool,
}

/// The host queries a snapshot is built from.
pub trait MetricsSource {
    fn cpu_usage(&mut self) -> Result<f32, CollectorError>;
    fn memory(&mut self) -> Result<ByteUsage, CollectorError>;
    /// Usage of the filesystem that holds `path`.
    fn disk(&mut self, path: &Path) -> Result<ByteUsage, CollectorError>;
    /// Cumulative counters since boot, summed over all interfaces.
    fn network(&mut self) -> Result<NetworkCounters, CollectorError>;
    /// Boot time in seconds since the Unix epoch.
    fn boot_time(&mut self) -> Result<u64, CollectorError>;
    fn processes(&mut self) -> Result<Vec<ProcessSample>, CollectorError>;
    fn battery(&mut self) -> Result<Metric<BatteryReading>, CollectorError>;
}

/// Host source backed by `sysinfo`, plus the `battery` crate for power state.
pub struct SysinfoSource {
    sys: System,
    disks: Disks,
    networks: Networks,
    batteries: Option<battery::Manager>,
}

impl SysinfoSource {
    pub fn new() -> Result<Self, CollectorError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(CollectorError::Unsupported);
        }

        // Prime CPU counters so the first real sample has a baseline.
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_usage();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cpu(),
        );

        let batteries = match battery::Manager::new() {
            Ok(manager) => Some(manager),
            Err(err) => {
                debug!(error = %err, "battery backend unavailable");
                None
            }
        };

        Ok(SysinfoSource {
            sys,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            batteries,
        })
    }
}

impl MetricsSource for SysinfoSource {
    fn cpu_usage(&mut self) -> Result<f32, CollectorError> {
        self.sys.refresh_cpu_usage();
        Ok(self.sys.global_cpu_usage())
    }

    fn memory(&mut self) -> Result<ByteUsage, CollectorError> {
        self.sys.refresh_memory();
        Ok(ByteUsage {
            used_bytes: self.sys.used_memory(),
            total_bytes: self.sys.total_memory(),
        })
    }

    fn disk(&mut self, path: &Path) -> Result<ByteUsage, CollectorError> {
        self.disks.refresh(true);
        let mounts: Vec<(PathBuf, ByteUsage)> = self
            .disks
            .list()
            .iter()
            .map(|disk| {
                let total = disk.total_space();
                let usage = ByteUsage {
                    used_bytes: total.saturating_sub(disk.available_space()),
                    total_bytes: total,
                };
                (disk.mount_point().to_path_buf(), usage)
            })
            .collect();

        pick_disk(&mounts, path).ok_or_else(|| CollectorError::DiskNotFound(path.to_path_buf()))
    }

    fn network(&mut self) -> Result<NetworkCounters, CollectorError> {
        self.networks.refresh(true);
        let counters = self
            .networks
            .values()
            .fold(NetworkCounters::default(), |acc, data| NetworkCounters {
                sent_bytes: acc.sent_bytes.saturating_add(data.total_transmitted()),
                recv_bytes: acc.recv_bytes.saturating_add(data.total_received()),
            });
        Ok(counters)
    }

    fn boot_time(&mut self) -> Result<u64, CollectorError> {
        match System::boot_time() {
            0 => Err(CollectorError::query("boot time", "host reported zero")),
            secs => Ok(secs),
        }
    }

    fn processes(&mut self) -> Result<Vec<ProcessSample>, CollectorError> {
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing().with_cpu(),
        );

        // Enumerate in PID order so ties resolve the same way every tick.
        let mut samples: Vec<ProcessSample> = self
            .sys
            .processes()
            .iter()
            .map(|(pid, process)| ProcessSample {
                pid: pid.as_u32(),
                name: process.name().to_string_lossy().to_string(),
                cpu_pct: process.cpu_usage(),
            })
            .collect();
        samples.sort_by_key(|p| p.pid);
        Ok(samples)
    }

    fn battery(&mut self) -> Result<Metric<BatteryReading>, CollectorError> {
        let Some(manager) = &self.batteries else {
            return Ok(Metric::Unavailable);
        };

        let mut batteries = manager
            .batteries()
            .map_err(|err| CollectorError::query("battery", err))?;
        let battery = match batteries.next() {
            Some(Ok(battery)) => battery,
            Some(Err(err)) => return Err(CollectorError::query("battery", err)),
            None => return Ok(Metric::Unavailable),
        };

        Ok(Metric::Available(BatteryReading {
            percent: battery.state_of_charge().get::<percent>(),
            plugged_in: plugged_in(battery.state()),
        }))
    }
}

fn plugged_in(state: battery::State) -> bool {
    !matches!(state, battery::State::Discharging | battery::State::Empty)
}

/// The mount whose path is the longest prefix of `path`.
pub fn pick_disk(mounts: &[(PathBuf, ByteUsage)], path: &Path) -> Option<ByteUsage> {
    mounts
        .iter()
        .filter(|(mount, _)| path.starts_with(mount))
        .max_by_key(|(mount, _)| mount.components().count())
        .map(|(_, usage)| *usage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(used: u64, total: u64) -> ByteUsage {
        ByteUsage {
            used_bytes: used,
            total_bytes: total,
        }
    }

    #[test]
    fn pick_disk_prefers_deepest_mount() {
        let mounts = vec![
            (PathBuf::from("/"), usage(1, 10)),
            (PathBuf::from("/home"), usage(2, 20)),
            (PathBuf::from("/home/shared"), usage(3, 30)),
        ];
        assert_eq!(pick_disk(&mounts, Path::new("/home/me")), Some(usage(2, 20)));
        assert_eq!(pick_disk(&mounts, Path::new("/")), Some(usage(1, 10)));
        assert_eq!(pick_disk(&mounts, Path::new("/var/log")), Some(usage(1, 10)));
    }

    #[test]
    fn pick_disk_does_not_match_partial_components() {
        let mounts = vec![(PathBuf::from("/data"), usage(1, 10))];
        assert_eq!(pick_disk(&mounts, Path::new("/database")), None);
    }

    #[test]
    fn pick_disk_without_mounts_is_none() {
        assert_eq!(pick_disk(&[], Path::new("/")), None);
    }

    #[test]
    fn discharging_means_unplugged() {
        assert!(!plugged_in(battery::State::Discharging));
        assert!(!plugged_in(battery::State::Empty));
        assert!(plugged_in(battery::State::Charging));
        assert!(plugged_in(battery::State::Full));
    }

    #[test]
    fn live_source_reports_sane_values() {
        let Ok(mut source) = SysinfoSource::new() else {
            return;
        };
        let memory = source.memory().unwrap();
        assert!(memory.used_bytes <= memory.total_bytes);
        assert!(source.processes().unwrap().windows(2).all(|w| w[0].pid < w[1].pid));
        let _ = source.battery();
    }
}
