//! The RSVP record.
//!
//! A record is created once, from a validated form submission, and never
//! mutated afterwards. Its JSON shape is the persisted layout: field names
//! are camelCase and blank optional text is stored as an empty string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Headcount used when the submitted value is empty or not a number.
pub const DEFAULT_HEADCOUNT: u32 = 1;

/// One submitted RSVP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpRecord {
    /// When the response was submitted.
    pub created_at: DateTime<Utc>,

    /// Name of the guest filling out the form.
    #[serde(default)]
    pub primary_name: String,

    /// Contact email.
    #[serde(default)]
    pub email: String,

    /// Contact phone.
    #[serde(default)]
    pub phone: String,

    /// How the guest knows the couple.
    #[serde(default)]
    pub relationship: String,

    /// Names of everyone in the party.
    #[serde(default)]
    pub party_names: String,

    /// Number of people attending.
    #[serde(
        default = "default_headcount",
        deserialize_with = "headcount_or_default"
    )]
    pub headcount: u32,

    /// Events the party will attend, in selection order.
    #[serde(default)]
    pub events: Vec<String>,

    /// Dietary restrictions.
    #[serde(default)]
    pub dietary: String,

    /// Accommodation needs.
    #[serde(default)]
    pub accommodations: String,

    /// First song request.
    #[serde(default)]
    pub song1: String,

    /// Second song request.
    #[serde(default)]
    pub song2: String,

    /// Third song request.
    #[serde(default)]
    pub song3: String,

    /// Free-form notes for the couple.
    #[serde(default)]
    pub notes: String,
}

fn default_headcount() -> u32 {
    DEFAULT_HEADCOUNT
}

/// Older entries can carry `null` here, which is what a browser writes for NaN.
fn headcount_or_default<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(DEFAULT_HEADCOUNT))
}

impl RsvpRecord {
    /// Parse a headcount as typed into the form.
    ///
    /// Surrounding whitespace is ignored. Anything that is not a
    /// non-negative integer, including an empty field, yields
    /// [`DEFAULT_HEADCOUNT`]. Negative numbers such as `-3` count as
    /// non-numeric, since a party cannot have fewer than zero people.
    #[must_use]
    pub fn parse_headcount(raw: &str) -> u32 {
        raw.trim().parse().unwrap_or(DEFAULT_HEADCOUNT)
    }

    /// The non-blank song requests, in field order.
    pub fn songs(&self) -> impl Iterator<Item = &str> {
        [&self.song1, &self.song2, &self.song3]
            .into_iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Check the required fields the form enforces.
    #[must_use]
    pub fn has_required_fields(&self) -> bool {
        !self.primary_name.is_empty()
            && !self.email.is_empty()
            && !self.party_names.is_empty()
            && !self.events.is_empty()
    }
}
