//! Pipeline configuration.

/// Default number of concurrent workers.
pub const DEFAULT_WORKERS: usize = 10;

/// Configuration parameters for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Number of workers draining the job queue. Always at least 1.
    pub workers: usize,
}

impl PipelineConfig {
    /// Create a configuration with the given worker count.
    ///
    /// A count of zero is raised to one so the queue is always drained.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}
