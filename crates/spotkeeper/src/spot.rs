//! Parking spot and tenant records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::status::{derive_status, SpotStatus};

/// The person renting a spot.
///
/// Embedded in a [`Spot`]; a tenant has no identity of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    /// Full name
    #[serde(default)]
    pub name: String,

    /// Phone number, grouped in digit pairs (`06 10 02 03 04`)
    #[serde(default)]
    pub phone: String,

    /// Licence plate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plate: Option<String>,

    /// Postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Contact email
    #[serde(default)]
    pub email: String,

    /// Gate remote identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_id: Option<String>,

    /// First day of the lease
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::persistence::lenient_date"
    )]
    pub start_date: Option<NaiveDate>,

    /// Last day of the lease, when one is scheduled
    #[serde(
        default,
        alias = "departureDate",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::persistence::lenient_date"
    )]
    pub end_date: Option<NaiveDate>,

    /// Lease with no end date
    #[serde(default)]
    pub is_indefinite: bool,
}

impl Tenant {
    /// Create a tenant with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the licence plate.
    pub fn with_plate(mut self, plate: impl Into<String>) -> Self {
        self.plate = Some(plate.into());
        self
    }

    /// Set the lease start date.
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Schedule the end of the lease.
    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self.is_indefinite = false;
        self
    }

    /// Mark the lease as open-ended.
    pub fn indefinite(mut self) -> Self {
        self.is_indefinite = true;
        self.end_date = None;
        self
    }

    /// True when every text field is empty after trimming.
    ///
    /// Dates and the indefinite flag depend on the tenant and do not count:
    /// a blank tenant is a vacant spot.
    pub fn is_blank(&self) -> bool {
        let blank = |s: &str| s.trim().is_empty();
        let blank_opt = |s: &Option<String>| s.as_deref().map_or(true, blank);

        blank(&self.name)
            && blank(&self.phone)
            && blank(&self.email)
            && blank_opt(&self.plate)
            && blank_opt(&self.address)
            && blank_opt(&self.remote_id)
    }
}

/// A numbered parking spot, optionally rented.
///
/// The status is never stored: [`Spot::status`] derives it from the tenant
/// each time it is asked for.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "crate::persistence::StoredSpot")]
pub struct Spot {
    /// Short alphanumeric code, e.g. `A1`
    pub id: String,

    /// Current tenant, `None` when vacant
    pub tenant: Option<Tenant>,
}

impl Spot {
    /// A spot with no tenant.
    pub fn vacant(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tenant: None,
        }
    }

    /// A spot rented to `tenant`.
    pub fn occupied(id: impl Into<String>, tenant: Tenant) -> Self {
        Self {
            id: id.into(),
            tenant: Some(tenant),
        }
    }

    /// The display status, derived from the tenant.
    pub fn status(&self) -> SpotStatus {
        derive_status(self)
    }

    /// Check the record rules the store relies on.
    ///
    /// # Errors
    ///
    /// - `MissingField("id")` for an empty or whitespace id
    /// - `EndBeforeStart` when the lease ends before it starts
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "id" });
        }
        if let Some(Tenant {
            start_date: Some(start),
            end_date: Some(end),
            ..
        }) = &self.tenant
        {
            if end < start {
                return Err(ValidationError::EndBeforeStart {
                    start: *start,
                    end: *end,
                });
            }
        }
        Ok(())
    }

    /// Collapse a blank tenant to `None` and drop an end date on an
    /// open-ended lease.
    pub fn canonicalize(mut self) -> Self {
        self.tenant = match self.tenant.take() {
            Some(t) if t.is_blank() => None,
            Some(mut t) => {
                if t.is_indefinite {
                    t.end_date = None;
                }
                Some(t)
            }
            None => None,
        };
        self
    }
}

/// Wire form of a spot: the record plus its freshly derived status.
#[derive(Serialize)]
struct SpotRecord<'a> {
    id: &'a str,
    status: SpotStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    tenant: Option<&'a Tenant>,
}

impl Serialize for Spot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SpotRecord {
            id: &self.id,
            status: self.status(),
            tenant: self.tenant.as_ref(),
        }
        .serialize(serializer)
    }
}
