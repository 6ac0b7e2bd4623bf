use crate::metric::Metric;

use super::snapshot::TopProcess;
use super::source::ProcessSample;

/// Picks the busiest process. Ties keep the first entry in enumeration
/// order, and a NaN reading never beats a real one.
pub fn select(processes: &[ProcessSample]) -> Metric<TopProcess> {
    let mut best: Option<&ProcessSample> = None;
    for candidate in processes {
        best = match best {
            None => Some(candidate),
            Some(current) if beats(candidate.cpu_pct, current.cpu_pct) => Some(candidate),
            keep => keep,
        };
    }

    best.map(|p| TopProcess {
        name: p.name.clone(),
        cpu_pct: p.cpu_pct,
    })
    .into()
}

fn beats(candidate: f32, current: f32) -> bool {
    if current.is_nan() {
        return !candidate.is_nan();
    }
    candidate > current
}
