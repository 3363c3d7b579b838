use crate::envelope::HealthRes;
use chrono::{SecondsFormat, Utc};

/// Liveness check served by the REST API.
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is running, stamped with the current UTC time.
    pub fn check_health() -> HealthRes {
        HealthRes {
            success: true,
            message: "AutoFixer IDE Backend is running".into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
