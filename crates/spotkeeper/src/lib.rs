//! # Spotkeeper
//!
//! Parking spot records for a small residence parking board.
//!
//! Each spot has a short code (`A1`) and may be rented to a tenant. The
//! spot's status is never stored: it is derived from the tenant every time
//! (vacant, occupied, or ending when a lease end is scheduled).
//!
//! ## Architecture
//!
//! - **Status**: derives a spot's status from its tenant
//! - **Store**: ordered spots, written to a persistence slot on every change
//! - **Filter**: status filter and free-text search over the store
//! - **Editor**: turns raw form input into a canonical spot
//! - **Board**: a store plus the current view, driven by user intents
//!
//! ## Example
//!
//! ```
//! use spotkeeper::{Board, Intent, MemorySlot, SpotForm, SpotStatus, StoreConfig};
//!
//! let mut board = Board::open(MemorySlot::default(), StoreConfig::default()).unwrap();
//!
//! let mut form = SpotForm::blank().with_id("B1");
//! form.name = "Leroy Anne".to_string();
//! form.email = "anne.leroy@email.com".to_string();
//! form.phone = "0612345678".to_string();
//! form.start_date = "2025-01-01".to_string();
//! board.dispatch(Intent::Create { form }).unwrap();
//!
//! board.dispatch(Intent::SetStatusFilter(SpotStatus::Occupied.into())).unwrap();
//! let visible = board.visible();
//! let ids: Vec<&str> = visible.iter().map(|s| s.id.as_str()).collect();
//! assert_eq!(ids, ["A2", "B1"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod board;
pub mod config;
pub mod display;
pub mod editor;
pub mod error;
pub mod filter;
pub mod persistence;
pub mod seed;
pub mod spot;
pub mod status;
pub mod store;

// Re-export main types
pub use board::{Board, Intent};
pub use config::{SeedPolicy, StoreConfig};
pub use editor::{normalize, normalize_phone, EditMode, SpotForm, SpotIds};
pub use error::{PersistenceError, Result, SpotError, ValidationError};
pub use filter::{matches_query, visible, StatusCounts, ViewState};
pub use persistence::{FileSlot, MemorySlot, SpotPersistence};
pub use spot::{Spot, Tenant};
pub use status::{derive_status, SpotStatus, StatusFilter, UnknownFilter};
pub use store::SpotStore;

/// Spotkeeper version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
