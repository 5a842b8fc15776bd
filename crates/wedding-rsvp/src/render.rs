//! Rendering of the saved RSVP list.
//!
//! Rendering happens in two steps. [`Renderer::render`] builds a
//! [`ListView`] of plain-text cards, newest first. The view is then turned
//! into markup with [`ListView::to_html`], which escapes every interpolated
//! value, or into a terminal listing with [`ListView::to_text`].

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use tracing::warn;

use crate::record::RsvpRecord;
use crate::storage::StorageBackend;
use crate::store::RecordStore;

/// Text shown when no RSVPs are stored.
pub const EMPTY_PLACEHOLDER: &str = "No RSVPs saved on this device yet.";

/// Placeholder for blank values.
pub const BLANK: &str = "—";

/// Default timestamp format, close to a US-English locale string.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// One rendered RSVP. Values are display text, not yet escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpCard {
    /// Guest name.
    pub primary_name: String,
    /// Contact email.
    pub email: String,
    /// Submission time in local time.
    pub submitted_at: String,
    /// Number attending.
    pub headcount: u32,
    /// Attended events, comma separated.
    pub attending: String,
    /// Everyone in the party.
    pub guests: String,
    /// Dietary restrictions.
    pub dietary: String,
    /// Accommodation needs.
    pub accommodations: String,
    /// Song requests, pipe separated.
    pub songs: String,
    /// Notes.
    pub notes: String,
}

impl RsvpCard {
    /// Labelled detail lines, in display order.
    #[must_use]
    pub fn details(&self) -> [(&'static str, String); 7] {
        [
            ("Headcount", self.headcount.to_string()),
            ("Attending", self.attending.clone()),
            ("Guests", self.guests.clone()),
            ("Dietary", self.dietary.clone()),
            ("Accommodations", self.accommodations.clone()),
            ("Songs", self.songs.clone()),
            ("Notes", self.notes.clone()),
        ]
    }
}

/// The rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Nothing stored.
    Empty,
    /// Cards, most recent first.
    Cards(Vec<RsvpCard>),
}

impl ListView {
    /// Whether this is the empty placeholder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The rendered cards; empty for [`ListView::Empty`].
    #[must_use]
    pub fn cards(&self) -> &[RsvpCard] {
        match self {
            Self::Empty => &[],
            Self::Cards(cards) => cards,
        }
    }

    /// Render as HTML markup. All record text is escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        let cards = match self {
            Self::Empty => return format!(r#"<p class="muted small">{EMPTY_PLACEHOLDER}</p>"#),
            Self::Cards(cards) => cards,
        };

        let mut html = String::new();
        for card in cards {
            let _ = write!(
                html,
                concat!(
                    r#"<div class="rsvp-item">"#,
                    r#"<div class="topline">"#,
                    r#"<div><strong>{}</strong> <span class="muted small">({})</span></div>"#,
                    r#"<div class="badge">{}</div>"#,
                    "</div>",
                ),
                escape_html(&card.primary_name),
                escape_html(&card.email),
                escape_html(&card.submitted_at),
            );
            for (label, value) in card.details() {
                let _ = write!(
                    html,
                    r#"<div class="small"><strong>{label}:</strong> {}</div>"#,
                    escape_html(&value)
                );
            }
            html.push_str("</div>");
        }
        html
    }

    /// Render as plain text for a terminal.
    #[must_use]
    pub fn to_text(&self) -> String {
        let cards = match self {
            Self::Empty => return EMPTY_PLACEHOLDER.to_string(),
            Self::Cards(cards) => cards,
        };

        let mut text = String::new();
        for (i, card) in cards.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            let _ = writeln!(
                text,
                "{} ({})  [{}]",
                card.primary_name, card.email, card.submitted_at
            );
            for (label, value) in card.details() {
                let _ = writeln!(text, "  {label:<15} {value}");
            }
        }
        text
    }
}

/// Builds list views from stored records.
#[derive(Debug, Clone)]
pub struct Renderer {
    timestamp_format: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_TIMESTAMP_FORMAT)
    }
}

impl Renderer {
    /// Create a renderer using the given strftime format for timestamps.
    ///
    /// A format chrono cannot parse is replaced by
    /// [`DEFAULT_TIMESTAMP_FORMAT`].
    pub fn new(timestamp_format: impl Into<String>) -> Self {
        let mut timestamp_format = timestamp_format.into();
        if !is_valid_timestamp_format(&timestamp_format) {
            warn!(format = %timestamp_format, "Unusable timestamp format, using default");
            timestamp_format = DEFAULT_TIMESTAMP_FORMAT.to_string();
        }
        Self { timestamp_format }
    }

    /// The strftime format used for submission times.
    #[must_use]
    pub fn timestamp_format(&self) -> &str {
        &self.timestamp_format
    }

    /// Read the full store and render it.
    pub fn render<B: StorageBackend>(&self, store: &RecordStore<B>) -> ListView {
        self.render_records(&store.load())
    }

    /// Render records given in store order. Output is newest first.
    #[must_use]
    pub fn render_records(&self, records: &[RsvpRecord]) -> ListView {
        if records.is_empty() {
            return ListView::Empty;
        }
        ListView::Cards(records.iter().rev().map(|r| self.card(r)).collect())
    }

    /// Build the card for one record.
    #[must_use]
    pub fn card(&self, record: &RsvpRecord) -> RsvpCard {
        let songs = record.songs().collect::<Vec<_>>().join(" | ");

        RsvpCard {
            primary_name: record.primary_name.clone(),
            email: record.email.clone(),
            submitted_at: self.localize(record),
            headcount: record.headcount,
            attending: or_blank(&record.events.join(", ")),
            guests: record.party_names.clone(),
            dietary: or_blank(&record.dietary),
            accommodations: or_blank(&record.accommodations),
            songs: or_blank(&songs),
            notes: or_blank(&record.notes),
        }
    }

    fn localize(&self, record: &RsvpRecord) -> String {
        record
            .created_at
            .with_timezone(&Local)
            .format(&self.timestamp_format)
            .to_string()
    }
}

/// Whether `format` is a non-empty strftime string chrono can render.
#[must_use]
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

fn or_blank(value: &str) -> String {
    if value.is_empty() {
        BLANK.to_string()
    } else {
        value.to_string()
    }
}

/// Escape text for safe inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
