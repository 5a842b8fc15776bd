//! CSV encoding of stored RSVPs.

use chrono::SecondsFormat;

use crate::record::RsvpRecord;

/// File name the export is offered under.
pub const EXPORT_FILE_NAME: &str = "wedding_rsvps.csv";

/// Column header, in output order.
pub const HEADER: [&str; 14] = [
    "createdAt",
    "primaryName",
    "email",
    "phone",
    "relationship",
    "partyNames",
    "headcount",
    "events",
    "dietary",
    "accommodations",
    "song1",
    "song2",
    "song3",
    "notes",
];

/// Separator used to flatten the events list into one field.
pub const EVENTS_SEPARATOR: &str = "; ";

/// Escape a single field.
///
/// Fields containing a double quote, comma or newline are wrapped in double
/// quotes with inner quotes doubled. Everything else passes through as is.
#[must_use]
pub fn escape(value: &str) -> String {
    if value.contains(['"', ',', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// The raw (unescaped) cells of one record, in [`HEADER`] order.
#[must_use]
pub fn row_fields(record: &RsvpRecord) -> [String; 14] {
    [
        record
            .created_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        record.primary_name.clone(),
        record.email.clone(),
        record.phone.clone(),
        record.relationship.clone(),
        record.party_names.clone(),
        record.headcount.to_string(),
        record.events.join(EVENTS_SEPARATOR),
        record.dietary.clone(),
        record.accommodations.clone(),
        record.song1.clone(),
        record.song2.clone(),
        record.song3.clone(),
        record.notes.clone(),
    ]
}

fn join_row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .map(|cell| escape(cell.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Encode records as a CSV document: the header row, then one row per
/// record in store order. Rows are joined with `\n`, with no trailing newline.
#[must_use]
pub fn encode(records: &[RsvpRecord]) -> String {
    std::iter::once(join_row(HEADER))
        .chain(records.iter().map(|r| join_row(row_fields(r))))
        .collect::<Vec<_>>()
        .join("\n")
}
