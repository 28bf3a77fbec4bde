//! Form input validation and normalization into canonical spots
//!
//! A [`SpotForm`] holds the raw strings typed into the spot form. Before a
//! spot reaches the store, [`normalize`] trims the fields, groups the phone
//! digits, parses the dates and checks the required fields. A form whose
//! tenant fields are all empty produces a vacant spot, whatever was typed in
//! the date fields.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::spot::{Spot, Tenant};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether the form creates a new spot or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    /// New spot; its id must not exist yet
    Create,

    /// Existing spot, possibly renamed
    Edit {
        /// Id of the spot being edited
        original_id: String,
    },
}

impl EditMode {
    /// Edit the spot with this id.
    pub fn edit(original_id: impl Into<String>) -> Self {
        EditMode::Edit {
            original_id: original_id.into(),
        }
    }

    /// Whether this is an edit of an existing spot.
    pub fn is_editing(&self) -> bool {
        matches!(self, EditMode::Edit { .. })
    }
}

/// Raw values of the spot form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpotForm {
    /// Spot number
    pub id: String,
    /// Tenant name
    pub name: String,
    /// Phone number, any spacing
    pub phone: String,
    /// Licence plate
    pub plate: String,
    /// Postal address
    pub address: String,
    /// Contact email
    pub email: String,
    /// Gate remote identifier
    pub remote_id: String,
    /// Lease start, `YYYY-MM-DD`
    pub start_date: String,
    /// Lease end, `YYYY-MM-DD`
    pub end_date: String,
    /// Open-ended lease
    pub is_indefinite: bool,
}

impl SpotForm {
    /// Empty form for creating a spot.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing spot.
    pub fn from_spot(spot: &Spot) -> Self {
        let format = |d: Option<NaiveDate>| {
            d.map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default()
        };

        match &spot.tenant {
            None => Self {
                id: spot.id.clone(),
                ..Default::default()
            },
            Some(t) => Self {
                id: spot.id.clone(),
                name: t.name.clone(),
                phone: t.phone.clone(),
                plate: t.plate.clone().unwrap_or_default(),
                address: t.address.clone().unwrap_or_default(),
                email: t.email.clone(),
                remote_id: t.remote_id.clone().unwrap_or_default(),
                start_date: format(t.start_date),
                end_date: format(t.end_date),
                is_indefinite: t.is_indefinite,
            },
        }
    }

    /// Form for spot `id`, otherwise blank.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Whether any tenant text field has content.
    pub fn has_tenant(&self) -> bool {
        [
            &self.name,
            &self.phone,
            &self.plate,
            &self.address,
            &self.email,
            &self.remote_id,
        ]
        .iter()
        .any(|field| !field.trim().is_empty())
    }

    /// Required fields that are still empty.
    ///
    /// The spot id is always required. When the form describes a tenant,
    /// name, email, phone and start date are required too.
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.id.trim().is_empty() {
            missing.push("id");
        }
        if self.has_tenant() {
            let required = [
                ("name", &self.name),
                ("email", &self.email),
                ("phone", &self.phone),
                ("start_date", &self.start_date),
            ];
            missing.extend(
                required
                    .into_iter()
                    .filter(|(_, value)| value.trim().is_empty())
                    .map(|(field, _)| field),
            );
        }
        missing
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        self.missing_required().is_empty()
    }
}

/// Read-only view of existing spot ids, for duplicate checks.
pub trait SpotIds {
    /// Whether a spot with this id exists.
    fn contains_id(&self, id: &str) -> bool;
}

impl SpotIds for [Spot] {
    fn contains_id(&self, id: &str) -> bool {
        self.iter().any(|spot| spot.id == id)
    }
}

impl SpotIds for Vec<Spot> {
    fn contains_id(&self, id: &str) -> bool {
        self.as_slice().contains_id(id)
    }
}

/// Validate `form` and turn it into a canonical spot.
///
/// Nothing is mutated: the caller hands the result to the store.
///
/// # Errors
///
/// - `MissingField` for an empty id, or an empty required tenant field
/// - `InvalidDate` when a date is not `YYYY-MM-DD`
/// - `EndBeforeStart` when the lease ends before it starts
/// - `DuplicateId` when creating (or renaming onto) an id that exists
pub fn normalize<S>(form: &SpotForm, mode: &EditMode, existing: &S) -> Result<Spot, ValidationError>
where
    S: SpotIds + ?Sized,
{
    let id = form.id.trim();
    if id.is_empty() {
        return Err(ValidationError::MissingField { field: "id" });
    }

    let taken = match mode {
        EditMode::Create => existing.contains_id(id),
        EditMode::Edit { original_id } => id != original_id && existing.contains_id(id),
    };
    if taken {
        return Err(ValidationError::DuplicateId { id: id.to_string() });
    }

    if !form.has_tenant() {
        return Ok(Spot::vacant(id));
    }

    if let Some(field) = form.missing_required().into_iter().next() {
        return Err(ValidationError::MissingField { field });
    }

    let start_date = parse_date("start_date", &form.start_date)?;
    let end_date = if form.is_indefinite {
        None
    } else {
        parse_date("end_date", &form.end_date)?
    };
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(ValidationError::EndBeforeStart { start, end });
        }
    }

    let tenant = Tenant {
        name: form.name.trim().to_string(),
        phone: normalize_phone(&form.phone),
        plate: non_empty(&form.plate),
        address: non_empty(&form.address),
        email: form.email.trim().to_string(),
        remote_id: non_empty(&form.remote_id),
        start_date,
        end_date,
        is_indefinite: form.is_indefinite,
    };

    Ok(Spot::occupied(id, tenant))
}

/// Group a phone number in pairs of characters: `0610020304` becomes
/// `06 10 02 03 04`.
///
/// All whitespace is removed first, so normalizing twice changes nothing.
pub fn normalize_phone(raw: &str) -> String {
    let compact: Vec<char> = raw.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_date(field: &'static str, raw: &str) -> Result<Option<NaiveDate>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| ValidationError::InvalidDate {
            field,
            value: raw.to_string(),
        })
}
