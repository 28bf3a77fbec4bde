//! Demo spots for a fresh board

use chrono::NaiveDate;

use crate::config::SeedPolicy;
use crate::spot::{Spot, Tenant};

/// Initial spots for `policy`.
pub fn seed_spots(policy: SeedPolicy) -> Vec<Spot> {
    match policy {
        SeedPolicy::Empty => Vec::new(),
        SeedPolicy::Demo => demo_spots(),
    }
}

/// A1 vacant, A2 occupied, A3 with a lease ending on 2024-12-31.
pub fn demo_spots() -> Vec<Spot> {
    let a2 = Tenant {
        name: "Dupont Jean".to_string(),
        phone: "06 10 02 03 04".to_string(),
        plate: Some("AB123CD".to_string()),
        address: Some("123 Rue Example".to_string()),
        email: "jean.dupont@email.com".to_string(),
        remote_id: Some("REM001".to_string()),
        start_date: NaiveDate::from_ymd_opt(2023, 9, 1),
        ..Default::default()
    };
    let a3 = Tenant {
        name: "Martin Paul".to_string(),
        phone: "06 11 22 33 44".to_string(),
        plate: Some("EF456GH".to_string()),
        address: Some("456 Rue Test".to_string()),
        email: "paul.martin@email.com".to_string(),
        remote_id: Some("REM002".to_string()),
        start_date: NaiveDate::from_ymd_opt(2022, 1, 1),
        end_date: NaiveDate::from_ymd_opt(2024, 12, 31),
        ..Default::default()
    };

    vec![
        Spot::vacant("A1"),
        Spot::occupied("A2", a2),
        Spot::occupied("A3", a3),
    ]
}
