use thiserror::Error;

#[derive(Debug, Error)]
pub enum SleepwatchError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("recording line {line}: {source}")]
    Recording {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("recording contains no samples")]
    EmptyRecording,
    #[error("classify interval must be positive")]
    InvalidInterval,
    #[error("monitoring session already stopped")]
    SessionClosed,
    #[error("monitor task failed: {0}")]
    MonitorJoin(#[from] tokio::task::JoinError),
}
