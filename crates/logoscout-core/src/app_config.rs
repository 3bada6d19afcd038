#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Timeout for the homepage HTML fetch, in seconds.
    pub request_timeout_secs: u64,
    /// Timeout applied to each image dimension probe, in seconds. Probes
    /// bound their own latency so one slow image cannot stall a lookup.
    pub probe_timeout_secs: u64,
    pub user_agent: String,
    /// How many dimension probes may be in flight at once.
    pub probe_concurrency: usize,
    /// Maximum number of logos returned per lookup.
    pub max_results: usize,
    /// Minimum width and height (pixels or declared units) a candidate must
    /// report to survive the quality gate.
    pub min_dimension: u32,
}
