//! Static reference catalogs
//!
//! Read-only data sets the UI renders as-is: weather alerts, relief resource
//! inventory, and the relief shipment ledger. Nothing here is persisted or
//! mutated. A deployment can override the built-in samples from a TOML
//! catalog file.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Alert severity, one step wider than incident severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
    Critical,
}

/// A regional weather or flood alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: AlertSeverity,
    pub area: String,
    pub timestamp: DateTime<Utc>,
}

/// Stock level of a relief resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceStatus {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "out-of-stock")]
    OutOfStock,
}

/// A warehouse inventory entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReliefResource {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit: String,
    pub location: String,
    pub status: ResourceStatus,
}

/// Delivery state of a shipment ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentStatus {
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "in-transit")]
    InTransit,
    #[serde(rename = "delivered")]
    Delivered,
}

/// A relief shipment ledger entry
///
/// Shaped like the upstream tracking feed, hash and block number included;
/// `blockNumber` is absent until the entry is sealed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReliefShipment {
    pub id: String,
    pub transaction_hash: String,
    pub resource_type: String,
    pub quantity: u32,
    pub from: String,
    pub to: String,
    pub status: ShipmentStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
}

/// The full set of reference catalogs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceCatalog {
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub relief_resources: Vec<ReliefResource>,
    #[serde(default)]
    pub shipments: Vec<ReliefShipment>,
}

impl ReferenceCatalog {
    /// The built-in sample catalogs, timestamped relative to now
    pub fn builtin() -> Self {
        let now = Utc::now();
        Self {
            alerts: vec![
                Alert {
                    id: "1".to_string(),
                    title: "Heavy Rainfall Warning".to_string(),
                    description: "Heavy rainfall expected in Mumbai region for next 48 hours. \
                                  Please stay alert."
                        .to_string(),
                    severity: AlertSeverity::High,
                    area: "Mumbai".to_string(),
                    timestamp: now - Duration::hours(2),
                },
                Alert {
                    id: "2".to_string(),
                    title: "Flood Alert - Kerala".to_string(),
                    description: "Water levels rising in Periyar river. Residents near \
                                  riverbanks should evacuate immediately."
                        .to_string(),
                    severity: AlertSeverity::Critical,
                    area: "Kerala".to_string(),
                    timestamp: now - Duration::hours(5),
                },
                Alert {
                    id: "3".to_string(),
                    title: "Weather Update".to_string(),
                    description: "Moderate rainfall expected in Chennai. No immediate threat, \
                                  but stay prepared."
                        .to_string(),
                    severity: AlertSeverity::Medium,
                    area: "Chennai".to_string(),
                    timestamp: now - Duration::hours(24),
                },
            ],
            relief_resources: vec![
                ReliefResource {
                    id: "1".to_string(),
                    name: "Food Packets".to_string(),
                    quantity: 500,
                    unit: "packets".to_string(),
                    location: "Warehouse A - Mumbai".to_string(),
                    status: ResourceStatus::Available,
                },
                ReliefResource {
                    id: "2".to_string(),
                    name: "Water Bottles".to_string(),
                    quantity: 1000,
                    unit: "bottles".to_string(),
                    location: "Warehouse B - Pune".to_string(),
                    status: ResourceStatus::Available,
                },
                ReliefResource {
                    id: "3".to_string(),
                    name: "Medical Kits".to_string(),
                    quantity: 150,
                    unit: "kits".to_string(),
                    location: "Warehouse A - Mumbai".to_string(),
                    status: ResourceStatus::Available,
                },
                ReliefResource {
                    id: "4".to_string(),
                    name: "Blankets".to_string(),
                    quantity: 300,
                    unit: "pieces".to_string(),
                    location: "Warehouse C - Nashik".to_string(),
                    status: ResourceStatus::Low,
                },
            ],
            shipments: vec![
                ReliefShipment {
                    id: "1".to_string(),
                    transaction_hash: "0x1a2b3c4d5e6f7a8b9c0d".to_string(),
                    resource_type: "Food Packets".to_string(),
                    quantity: 200,
                    from: "Warehouse A".to_string(),
                    to: "Relief Camp - Bandra".to_string(),
                    status: ShipmentStatus::Delivered,
                    timestamp: now - Duration::hours(12),
                    block_number: Some(12345),
                },
                ReliefShipment {
                    id: "2".to_string(),
                    transaction_hash: "0x2b3c4d5e6f7a8b9c0d1e".to_string(),
                    resource_type: "Water Bottles".to_string(),
                    quantity: 500,
                    from: "Warehouse B".to_string(),
                    to: "Relief Camp - Andheri".to_string(),
                    status: ShipmentStatus::InTransit,
                    timestamp: now - Duration::hours(6),
                    block_number: Some(12346),
                },
                ReliefShipment {
                    id: "3".to_string(),
                    transaction_hash: "0x3c4d5e6f7a8b9c0d1e2f".to_string(),
                    resource_type: "Medical Kits".to_string(),
                    quantity: 50,
                    from: "Warehouse A".to_string(),
                    to: "Relief Camp - Kurla".to_string(),
                    status: ShipmentStatus::Pending,
                    timestamp: now - Duration::hours(2),
                    block_number: None,
                },
            ],
        }
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a catalog file, e.g. a deployment override
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
