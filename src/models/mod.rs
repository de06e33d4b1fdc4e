//! # Data Models
//!
//! SeaORM entities for the clinic's customers and pets, plus the canonical
//! serialized records returned by the JSON API.

use chrono::SecondsFormat;
use sea_orm::prelude::DateTimeUtc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod customer;
pub mod pet;

pub use customer::CustomerRecord;
pub use customer::Entity as Customer;
pub use pet::Entity as Pet;
pub use pet::PetRecord;

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
    /// Database reachability ("ok" or "unavailable")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "vet-crm".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: None,
        }
    }
}

/// Renders a stored timestamp as RFC 3339 text; absent timestamps stay `None`
/// and serialize as JSON `null`.
pub fn format_timestamp(value: Option<DateTimeUtc>) -> Option<String> {
    value.map(|ts| ts.to_rfc3339_opts(SecondsFormat::Micros, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_timestamp_present() {
        let ts = Utc.with_ymd_and_hms(2025, 10, 17, 9, 30, 0).unwrap();
        assert_eq!(
            format_timestamp(Some(ts)).as_deref(),
            Some("2025-10-17T09:30:00.000000Z")
        );
    }

    #[test]
    fn test_format_timestamp_absent() {
        assert_eq!(format_timestamp(None), None);
    }

    #[test]
    fn test_service_info_default() {
        let info = ServiceInfo::default();
        assert_eq!(info.service, "vet-crm");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.database.is_none());
    }
}
