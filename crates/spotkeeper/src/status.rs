//! Spot status derivation and status filters

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::spot::Spot;

/// Display status of a spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpotStatus {
    /// No tenant
    Vacant,

    /// Rented with no scheduled end
    Occupied,

    /// Rented, lease end scheduled
    Ending,
}

impl SpotStatus {
    /// All statuses, in display order.
    pub const ALL: [SpotStatus; 3] = [SpotStatus::Vacant, SpotStatus::Occupied, SpotStatus::Ending];

    /// English label.
    pub fn label(self) -> &'static str {
        match self {
            SpotStatus::Vacant => "vacant",
            SpotStatus::Occupied => "occupied",
            SpotStatus::Ending => "ending",
        }
    }

    /// French label, as shown on the parking board.
    pub fn label_fr(self) -> &'static str {
        match self {
            SpotStatus::Vacant => "libre",
            SpotStatus::Occupied => "occupée",
            SpotStatus::Ending => "bientôt libre",
        }
    }
}

impl fmt::Display for SpotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derive the status of a spot from its tenant.
///
/// 1. No tenant, or a blank one: [`SpotStatus::Vacant`]
/// 2. Tenant with an end date: [`SpotStatus::Ending`]
/// 3. Otherwise: [`SpotStatus::Occupied`]
pub fn derive_status(spot: &Spot) -> SpotStatus {
    match &spot.tenant {
        None => SpotStatus::Vacant,
        Some(tenant) if tenant.is_blank() => SpotStatus::Vacant,
        Some(tenant) if tenant.end_date.is_some() => SpotStatus::Ending,
        Some(_) => SpotStatus::Occupied,
    }
}

/// Which statuses a view shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    /// Every spot
    #[default]
    All,

    /// Only spots with this derived status
    Only(SpotStatus),
}

impl StatusFilter {
    /// Whether `status` passes this filter.
    pub fn accepts(self, status: SpotStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl From<SpotStatus> for StatusFilter {
    fn from(status: SpotStatus) -> Self {
        StatusFilter::Only(status)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => status.fmt(f),
        }
    }
}

/// Unrecognized status filter name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown status filter: {0:?}")]
pub struct UnknownFilter(pub String);

impl FromStr for StatusFilter {
    type Err = UnknownFilter;

    /// Accepts `all`, `vacant`, `occupied`, `ending`, and the board's older
    /// names `free` and `soon`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "vacant" | "free" => Ok(SpotStatus::Vacant.into()),
            "occupied" => Ok(SpotStatus::Occupied.into()),
            "ending" | "soon" => Ok(SpotStatus::Ending.into()),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}
