use std::time::Duration;

/// Default bounded capacity of the in-memory FIFO queue.
const DEFAULT_CAPACITY: usize = 1000;

/// Default time a send waits for capacity before failing.
const DEFAULT_SEND_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// In-memory FIFO queue settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueConfig {
    /// Maximum number of undelivered items (default: `1000`).
    pub capacity: usize,
    /// How long a send waits for capacity (default: 5 seconds).
    pub send_timeout: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            send_timeout: Duration::from_millis(DEFAULT_SEND_TIMEOUT_MS),
        }
    }
}

impl QueueConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default |
    /// |------------------------------|---------|
    /// | `FIFO_QUEUE_CAPACITY`        | `1000`  |
    /// | `FIFO_QUEUE_SEND_TIMEOUT_MS` | `5000`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let capacity = match lookup("FIFO_QUEUE_CAPACITY") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "FIFO_QUEUE_CAPACITY",
                        expected: "positive integer",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_CAPACITY,
        };

        let send_timeout_ms = match lookup("FIFO_QUEUE_SEND_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "FIFO_QUEUE_SEND_TIMEOUT_MS",
                expected: "u64",
                value: raw,
            })?,
            None => DEFAULT_SEND_TIMEOUT_MS,
        };

        Ok(Self {
            capacity,
            send_timeout: Duration::from_millis(send_timeout_ms),
        })
    }
}
