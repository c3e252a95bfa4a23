//! Route Entity
//!
//! A planned delivery route as served by the backend, and the lifecycle
//! status that decides which board column it lives in.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque, stable route identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteId(pub u32);

impl From<u32> for RouteId {
    fn from(id: u32) -> Self {
        RouteId(id)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Route lifecycle status. Each variant owns exactly one board column.
///
/// Variant order is the column display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Planned but not yet confirmed
    Pending,
    /// Assigned to a vehicle/driver
    Assigned,
    InTransit,
    Completed,
    Delayed,
    Cancelled,
}

/// Wire names of every status, in column order
pub static COLUMN_KEYS: [&str; 6] = [
    "PENDING",
    "ASSIGNED",
    "IN_TRANSIT",
    "COMPLETED",
    "DELAYED",
    "CANCELLED",
];

impl Status {
    pub const ALL: [Status; 6] = [
        Status::Pending,
        Status::Assigned,
        Status::InTransit,
        Status::Completed,
        Status::Delayed,
        Status::Cancelled,
    ];

    /// Canonical wire name (`IN_TRANSIT`)
    pub fn as_str(&self) -> &'static str {
        COLUMN_KEYS[self.index()]
    }

    /// Column heading shown on the board
    pub fn title(&self) -> &'static str {
        match self {
            Status::Pending => "Pending Assignment",
            Status::Assigned => "Assigned",
            Status::InTransit => "In Transit",
            Status::Completed => "Completed",
            Status::Delayed => "Delayed",
            Status::Cancelled => "Cancelled",
        }
    }

    /// Position of this status' column on the board
    pub fn index(&self) -> usize {
        match self {
            Status::Pending => 0,
            Status::Assigned => 1,
            Status::InTransit => 2,
            Status::Completed => 3,
            Status::Delayed => 4,
            Status::Cancelled => 5,
        }
    }

    /// Classify a raw backend status.
    ///
    /// Case-insensitive and total: anything outside the enumeration comes back
    /// as [`Classification::Unknown`] carrying the raw value untouched.
    pub fn classify(raw: &str) -> Classification {
        let trimmed = raw.trim();
        COLUMN_KEYS
            .iter()
            .position(|key| key.eq_ignore_ascii_case(trimmed))
            .map(|idx| Classification::Known(Status::ALL[idx]))
            .unwrap_or_else(|| Classification::Unknown(raw.to_string()))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A route's status as ingested from the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Classification {
    Known(Status),
    /// Raw value that matches no column
    Unknown(String),
}

impl Classification {
    pub fn known(&self) -> Option<Status> {
        match self {
            Classification::Known(status) => Some(*status),
            Classification::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Classification::Known(status) => status.as_str(),
            Classification::Unknown(raw) => raw,
        }
    }
}

impl From<String> for Classification {
    fn from(raw: String) -> Self {
        Status::classify(&raw)
    }
}

impl From<Classification> for String {
    fn from(classification: Classification) -> Self {
        classification.as_str().to_string()
    }
}

impl From<Status> for Classification {
    fn from(status: Status) -> Self {
        Classification::Known(status)
    }
}

/// Vehicle assigned to a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleRef {
    pub id: u32,
    #[serde(default)]
    pub license_plate: Option<String>,
}

/// One stop of a route (only what the card needs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub id: u32,
    #[serde(default)]
    pub sequence_order: Option<u32>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub stop_type: Option<String>,
}

/// A planned delivery/pickup route
///
/// Everything except `status` is a read-only projection of backend state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub status: Classification,
    #[serde(default)]
    pub planned_date: Option<NaiveDate>,
    #[serde(default)]
    pub vehicle: Option<VehicleRef>,
    #[serde(default)]
    pub stops: Vec<RouteStop>,
    #[serde(default)]
    pub total_distance_km: Option<f64>,
    #[serde(default)]
    pub total_duration_mins: Option<u32>,
}

impl Route {
    /// Create a bare route with a raw status
    pub fn new(id: impl Into<RouteId>, raw_status: &str) -> Self {
        Self {
            id: id.into(),
            status: Status::classify(raw_status),
            planned_date: None,
            vehicle: None,
            stops: Vec::new(),
            total_distance_km: None,
            total_duration_mins: None,
        }
    }

    /// Known status, or None when the raw status matched no column
    pub fn status(&self) -> Option<Status> {
        self.status.known()
    }

    /// Copy of this route carrying a different status
    pub fn with_status(&self, status: Status) -> Route {
        Route {
            status: Classification::Known(status),
            ..self.clone()
        }
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn title(&self) -> String {
        match self.planned_date {
            Some(date) => format!("Route {} ({})", self.id, date.format("%Y-%m-%d")),
            None => format!("Route {} (N/A)", self.id),
        }
    }

    pub fn vehicle_label(&self) -> String {
        self.vehicle
            .as_ref()
            .and_then(|v| v.license_plate.clone())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn distance_label(&self) -> String {
        match self.total_distance_km {
            Some(km) => format!("{:.1} km", km),
            None => "N/A".to_string(),
        }
    }

    pub fn duration_label(&self) -> String {
        match self.total_duration_mins {
            Some(mins) => format!("{} min", mins),
            None => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(Status::classify("pending"), Classification::Known(Status::Pending));
        assert_eq!(Status::classify("In_Transit"), Classification::Known(Status::InTransit));
        assert_eq!(Status::classify(" DELAYED "), Classification::Known(Status::Delayed));
    }

    #[test]
    fn test_classify_unknown_keeps_raw_value() {
        let classified = Status::classify("banana");
        assert_eq!(classified, Classification::Unknown("banana".to_string()));
        assert_eq!(classified.known(), None);
        assert_eq!(Status::classify("").known(), None);
        assert_eq!(Status::classify("IN TRANSIT").known(), None);
    }

    #[test]
    fn test_status_wire_names_follow_column_order() {
        for (idx, status) in Status::ALL.iter().enumerate() {
            assert_eq!(status.index(), idx);
            assert_eq!(Status::classify(status.as_str()).known(), Some(*status));
        }
        assert_eq!(Status::InTransit.as_str(), "IN_TRANSIT");
        assert_eq!(Status::Pending.title(), "Pending Assignment");
    }

    #[test]
    fn test_route_deserializes_backend_payload() {
        let json = r#"{
            "id": 7,
            "vehicle": {"id": 3, "license_plate": "ABC-123", "capacity_kg": 900},
            "planned_date": "2024-05-02",
            "total_distance_km": 42.37,
            "total_duration_mins": 95,
            "status": "in_transit",
            "status_display": "In Transit",
            "stops": [{"id": 1, "sequence_order": 0, "location_name": "Depot"}, {"id": 2}]
        }"#;
        let route: Route = serde_json::from_str(json).unwrap();

        assert_eq!(route.id, RouteId(7));
        assert_eq!(route.status(), Some(Status::InTransit));
        assert_eq!(route.stop_count(), 2);
        assert_eq!(route.title(), "Route 7 (2024-05-02)");
        assert_eq!(route.vehicle_label(), "ABC-123");
        assert_eq!(route.distance_label(), "42.4 km");
        assert_eq!(route.duration_label(), "95 min");
    }

    #[test]
    fn test_unknown_status_never_fails_deserialization() {
        let route: Route = serde_json::from_str(r#"{"id": 9, "status": "banana"}"#).unwrap();
        assert_eq!(route.status(), None);
        assert_eq!(route.status.as_str(), "banana");
        assert_eq!(route.title(), "Route 9 (N/A)");
        assert_eq!(route.vehicle_label(), "N/A");
        assert_eq!(route.distance_label(), "N/A");
        assert_eq!(route.duration_label(), "N/A");
    }

    #[test]
    fn test_status_serializes_canonical_name() {
        let route = Route::new(1, "pending").with_status(Status::InTransit);
        let value = serde_json::to_value(&route).unwrap();
        assert_eq!(value["status"], "IN_TRANSIT");
        assert_eq!(value["id"], 1);
    }
}
