//! Human-readable rendering of spot data

use chrono::{Datelike, NaiveDate};

use crate::spot::Spot;

const MONTHS_FR: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Long French date, e.g. `1 mars 2025` or `31 décembre 2024`.
pub fn format_date_fr(date: NaiveDate) -> String {
    let month = MONTHS_FR[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// One-line summary of a spot for lists and logs.
///
/// ```
/// use spotkeeper::{display::summary, Spot, Tenant};
///
/// let spot = Spot::occupied("A2", Tenant::named("Dupont Jean").with_plate("AB123CD"));
/// assert_eq!(summary(&spot), "Place A2 (occupée) Dupont Jean, AB123CD");
/// ```
pub fn summary(spot: &Spot) -> String {
    let mut line = format!("Place {} ({})", spot.id, spot.status().label_fr());
    if let Some(tenant) = spot.tenant.as_ref().filter(|t| !t.is_blank()) {
        line.push(' ');
        line.push_str(&tenant.name);
        if let Some(plate) = &tenant.plate {
            line.push_str(", ");
            line.push_str(plate);
        }
        if let Some(end) = tenant.end_date {
            line.push_str(", départ prévu le ");
            line.push_str(&format_date_fr(end));
        }
    }
    line
}
