//! FloodSafe Core Library
//!
//! Data models, storage, access policy, reference catalogs, and snapshot
//! interchange for the FloodSafe incident reporting platform.

pub mod error;
pub mod models;
pub mod permissions;
pub mod reference;
pub mod snapshot;
pub mod storage;

pub use error::{Error, Result};
pub use models::*;
pub use permissions::{PermissionMatrix, ReliefAction};
pub use reference::{
    Alert, AlertSeverity, ReferenceCatalog, ReliefResource, ReliefShipment, ResourceStatus,
    ShipmentStatus,
};
pub use snapshot::{RestoreSummary, Snapshot};
pub use storage::{
    Database, IncidentRepository, IncidentStore, SessionRepository, SessionStore, Storage,
    UserRepository, UserStore,
};
