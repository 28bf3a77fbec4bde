//! Status filtering and free-text search over spots

use crate::spot::Spot;
use crate::status::{SpotStatus, StatusFilter};

/// Return the spots passing both `filter` and `query`, in their original order.
///
/// The query is matched case-insensitively as a substring of the spot id,
/// the tenant name, the plate, or the phone number. Whitespace is ignored on
/// both sides of the phone comparison. An empty query matches every spot.
pub fn visible<'a, I>(spots: I, filter: StatusFilter, query: &str) -> Vec<&'a Spot>
where
    I: IntoIterator<Item = &'a Spot>,
{
    let query = SearchQuery::new(query);
    spots
        .into_iter()
        .filter(|spot| filter.accepts(spot.status()) && query.matches(spot))
        .collect()
}

/// Whether `spot` matches the free-text `query`.
pub fn matches_query(spot: &Spot, query: &str) -> bool {
    SearchQuery::new(query).matches(spot)
}

/// A query lowered and stripped once, then tested against many spots.
struct SearchQuery {
    lowered: String,
    compact: String,
}

impl SearchQuery {
    fn new(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        let compact = strip_whitespace(&lowered);
        Self { lowered, compact }
    }

    fn matches(&self, spot: &Spot) -> bool {
        if self.compact.is_empty() {
            return true;
        }
        if contains_lowered(&spot.id, &self.lowered) {
            return true;
        }
        let Some(tenant) = &spot.tenant else {
            return false;
        };

        contains_lowered(&tenant.name, &self.lowered)
            || tenant
                .plate
                .as_deref()
                .is_some_and(|plate| contains_lowered(plate, &self.lowered))
            || strip_whitespace(&tenant.phone)
                .to_lowercase()
                .contains(&self.compact)
    }
}

fn contains_lowered(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// The filter and search text currently applied to a board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    filter: StatusFilter,
    query: String,
}

impl ViewState {
    /// Show everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status filter.
    pub fn status_filter(&self) -> StatusFilter {
        self.filter
    }

    /// Current search text, as typed.
    pub fn search_query(&self) -> &str {
        &self.query
    }

    /// Replace the status filter.
    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Replace the search text.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Apply this view to `spots`.
    pub fn apply<'a, I>(&self, spots: I) -> Vec<&'a Spot>
    where
        I: IntoIterator<Item = &'a Spot>,
    {
        visible(spots, self.filter, &self.query)
    }
}

/// Number of spots per derived status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    /// Spots with no tenant
    pub vacant: usize,
    /// Spots rented with no end date
    pub occupied: usize,
    /// Spots whose lease is ending
    pub ending: usize,
}

impl StatusCounts {
    /// Count the statuses of `spots`.
    pub fn tally<'a, I>(spots: I) -> Self
    where
        I: IntoIterator<Item = &'a Spot>,
    {
        spots
            .into_iter()
            .fold(Self::default(), |mut counts, spot| {
                match spot.status() {
                    SpotStatus::Vacant => counts.vacant += 1,
                    SpotStatus::Occupied => counts.occupied += 1,
                    SpotStatus::Ending => counts.ending += 1,
                }
                counts
            })
    }

    /// Count for a single filter.
    pub fn get(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.total(),
            StatusFilter::Only(SpotStatus::Vacant) => self.vacant,
            StatusFilter::Only(SpotStatus::Occupied) => self.occupied,
            StatusFilter::Only(SpotStatus::Ending) => self.ending,
        }
    }

    /// Every spot.
    pub fn total(&self) -> usize {
        self.vacant + self.occupied + self.ending
    }
}
