use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::metric::Metric;

pub const BYTES_PER_MB: f64 = 1_048_576.0;

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// `used / total` as a percentage in `[0, 100]`. A zero total reads as 0%.
pub fn usage_percent(used: u64, total: u64) -> f32 {
    if total == 0 {
        return 0.0;
    }
    ((used as f64 / total as f64) * 100.0).clamp(0.0, 100.0) as f32
}

/// Raw byte counts as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteUsage {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Usage {
    pub used_mb: f64,
    pub total_mb: f64,
    pub usage_pct: f32,
}

impl Usage {
    pub fn from_bytes(raw: ByteUsage) -> Self {
        Usage {
            used_mb: bytes_to_mb(raw.used_bytes),
            total_mb: bytes_to_mb(raw.total_bytes),
            usage_pct: usage_percent(raw.used_bytes, raw.total_bytes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkTotals {
    pub sent_mb: f64,
    pub recv_mb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProcess {
    pub name: String,
    pub cpu_pct: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryStatus {
    pub percent: f32,
    pub plugged_in: bool,
}

/// Everything sampled in one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub cpu_usage_pct: f32,
    pub memory: Usage,
    pub disk: Usage,
    pub network: NetworkTotals,
    #[serde(rename = "uptime_secs", serialize_with = "serialize_secs")]
    pub uptime: Duration,
    pub top_process: Metric<TopProcess>,
    pub battery: Metric<BatteryStatus>,
    pub process_count: usize,
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_mebibyte_is_one_mb() {
        assert!((bytes_to_mb(1_048_576) - 1.0).abs() < 1e-6);
        assert!((bytes_to_mb(0)).abs() < 1e-6);
    }

    #[test]
    fn usage_percent_of_zero_total_is_zero() {
        assert_eq!(usage_percent(10, 0), 0.0);
        assert_eq!(usage_percent(0, 0), 0.0);
    }

    #[test]
    fn usage_from_bytes_converts_and_computes_percent() {
        let usage = Usage::from_bytes(ByteUsage {
            used_bytes: 512 * 1_048_576,
            total_bytes: 2048 * 1_048_576,
        });
        assert!((usage.used_mb - 512.0).abs() < 1e-6);
        assert!((usage.total_mb - 2048.0).abs() < 1e-6);
        assert!((usage.usage_pct - 25.0).abs() < 1e-4);
    }

    #[test]
    fn snapshot_serializes_uptime_as_seconds() {
        let snapshot = Snapshot {
            cpu_usage_pct: 3.0,
            memory: Usage::from_bytes(ByteUsage {
                used_bytes: 1,
                total_bytes: 2,
            }),
            disk: Usage::from_bytes(ByteUsage {
                used_bytes: 1,
                total_bytes: 2,
            }),
            network: NetworkTotals {
                sent_mb: 0.0,
                recv_mb: 0.0,
            },
            uptime: Duration::from_millis(90_500),
            top_process: Metric::Unavailable,
            battery: Metric::Unavailable,
            process_count: 0,
        };
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["uptime_secs"], 90);
        assert!(value["battery"].is_null());
        assert!(value["top_process"].is_null());
    }
}
