use std::path::PathBuf;

use thiserror::Error;

/// A failed host query. The tick that hit it is skipped; the next one retries.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("host metrics are not supported on this platform")]
    Unsupported,

    #[error("malformed {metric} reading: {reason}")]
    Malformed {
        metric: &'static str,
        reason: String,
    },

    #[error("no mounted filesystem contains {}", .0.display())]
    DiskNotFound(PathBuf),

    #[error("failed to query {metric}: {reason}")]
    Query {
        metric: &'static str,
        reason: String,
    },
}

impl CollectorError {
    pub fn malformed(metric: &'static str, reason: impl Into<String>) -> Self {
        CollectorError::Malformed {
            metric,
            reason: reason.into(),
        }
    }

    pub fn query(metric: &'static str, reason: impl ToString) -> Self {
        CollectorError::Query {
            metric,
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_metric() {
        let err = CollectorError::malformed("memory", "used exceeds total");
        assert_eq!(
            err.to_string(),
            "malformed memory reading: used exceeds total"
        );

        let err = CollectorError::DiskNotFound(PathBuf::from("/srv"));
        assert_eq!(err.to_string(), "no mounted filesystem contains /srv");
    }
}
