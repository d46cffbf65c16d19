//! OmniSpread service configuration constants and types.

/// Relative endpoint paths on the scan service
pub struct Endpoints {
    /// POST: submit a scan, returns `{ task_id }`
    pub scan: &'static str,
    /// GET: status for a task id appended as a path segment
    pub results: &'static str,
    /// GET: preset name -> ticker list mapping
    pub presets: &'static str,
}

/// Status polling cadence and ceiling.
///
/// The cadence and ceiling come from the original client (2 s * 300 polls,
/// roughly ten minutes) and carry no deeper rationale, so they are defaults
/// that callers can override per track, not fixed behavior.
pub struct PollingDefaults {
    pub interval_ms: u64,
    pub max_attempts: u32,
}

/// Per-request HTTP limits
pub struct HttpDefaults {
    pub request_timeout_ms: u64,
}

/// Spread-path synthesis defaults
pub struct SynthDefaults {
    /// One trading year of calendar days
    pub path_days: usize,
    /// Band width in stationary standard deviations
    pub band_sigma: f64,
}

/// The Master Configuration Struct
pub struct ServiceConfig {
    /// Where the scan engine listens when run locally
    pub base_url: &'static str,
    pub endpoints: Endpoints,
    pub polling: PollingDefaults,
    pub http: HttpDefaults,
    pub synth: SynthDefaults,
}

pub const SERVICE: ServiceConfig = ServiceConfig {
    base_url: "http://127.0.0.1:8000",
    endpoints: Endpoints {
        scan: "/scan",
        results: "/results",
        presets: "/presets",
    },
    polling: PollingDefaults {
        interval_ms: 2_000,
        max_attempts: 300,
    },
    http: HttpDefaults {
        request_timeout_ms: 30_000,
    },
    synth: SynthDefaults {
        path_days: 252,
        band_sigma: 2.0,
    },
};
