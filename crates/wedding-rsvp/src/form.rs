//! The RSVP form controller.
//!
//! A submission moves through `Saving`, is rejected when no event is
//! checked or a required field is blank, and otherwise appends one record
//! to the store. Rejected submissions leave the form values in place; a
//! successful one resets them.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::record::RsvpRecord;
use crate::storage::StorageBackend;
use crate::store::RecordStore;

/// Raw form input, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RsvpForm {
    /// Guest name.
    pub primary_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Relationship to the couple.
    pub relationship: String,
    /// Names of everyone in the party.
    pub party_names: String,
    /// Headcount as typed; parsed on submit.
    pub headcount: String,
    /// Checked event boxes, in page order.
    pub events: Vec<String>,
    /// Dietary restrictions.
    pub dietary: String,
    /// Accommodation needs.
    pub accommodations: String,
    /// First song request.
    pub song1: String,
    /// Second song request.
    pub song2: String,
    /// Third song request.
    pub song3: String,
    /// Notes for the couple.
    pub notes: String,
}

impl RsvpForm {
    /// Checked events, trimmed, with blanks and repeats dropped.
    #[must_use]
    pub fn checked_events(&self) -> Vec<String> {
        let mut events: Vec<String> = Vec::with_capacity(self.events.len());
        for event in &self.events {
            let event = event.trim();
            if !event.is_empty() && !events.iter().any(|e| e == event) {
                events.push(event.to_string());
            }
        }
        events
    }

    /// Build a record from this input. Strings are trimmed; no validation.
    #[must_use]
    pub fn to_record(&self, events: Vec<String>, created_at: DateTime<Utc>) -> RsvpRecord {
        RsvpRecord {
            created_at,
            primary_name: self.primary_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            relationship: self.relationship.trim().to_string(),
            party_names: self.party_names.trim().to_string(),
            headcount: RsvpRecord::parse_headcount(&self.headcount),
            events,
            dietary: self.dietary.trim().to_string(),
            accommodations: self.accommodations.trim().to_string(),
            song1: self.song1.trim().to_string(),
            song2: self.song2.trim().to_string(),
            song3: self.song3.trim().to_string(),
            notes: self.notes.trim().to_string(),
        }
    }
}

/// Status line under the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    /// Nothing to report.
    #[default]
    Idle,
    /// A submission is being processed.
    Saving,
    /// No event was checked.
    EventRequired,
    /// Name, email or guest names were blank.
    MissingRequired,
    /// The record was stored.
    Saved,
    /// The store rejected the write.
    SaveFailed,
}

impl FormStatus {
    /// The text shown to the guest.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Saving => "Saving…",
            Self::EventRequired => "Please select at least one event to attend.",
            Self::MissingRequired => "Please fill out your name, email, and guest names.",
            Self::Saved => "Saved! (Stored locally on this device.)",
            Self::SaveFailed => "Could not save your RSVP on this device. Please try again.",
        }
    }

    /// Whether this status means the submission was turned away.
    #[must_use]
    pub fn is_rejection(self) -> bool {
        matches!(
            self,
            Self::EventRequired | Self::MissingRequired | Self::SaveFailed
        )
    }
}

impl std::fmt::Display for FormStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// What a submission attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record was appended to the store.
    Saved(RsvpRecord),
    /// Nothing was stored; the status says why.
    Rejected(FormStatus),
}

impl SubmitOutcome {
    /// Whether a record was stored.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Holds the visible form and its status line.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    form: RsvpForm,
    status: FormStatus,
}

impl FormController {
    /// Create a controller with an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current form values.
    #[must_use]
    pub fn form(&self) -> &RsvpForm {
        &self.form
    }

    /// Mutable access to the form values, for filling it in.
    pub fn form_mut(&mut self) -> &mut RsvpForm {
        &mut self.form
    }

    /// Replace the form values wholesale.
    pub fn fill(&mut self, form: RsvpForm) {
        self.form = form;
    }

    /// The current status line.
    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Clear the form and status. The store is not touched.
    pub fn reset(&mut self) {
        self.form = RsvpForm::default();
        self.status = FormStatus::Idle;
    }

    /// Submit the current form, stamping the record with the current time.
    pub fn submit<B: StorageBackend>(&mut self, store: &mut RecordStore<B>) -> SubmitOutcome {
        self.submit_at(store, Utc::now())
    }

    /// Submit the current form with an explicit creation time.
    pub fn submit_at<B: StorageBackend>(
        &mut self,
        store: &mut RecordStore<B>,
        now: DateTime<Utc>,
    ) -> SubmitOutcome {
        self.status = FormStatus::Saving;

        let events = self.form.checked_events();
        if events.is_empty() {
            return self.reject(FormStatus::EventRequired);
        }

        let record = self.form.to_record(events, now);
        if !record.has_required_fields() {
            return self.reject(FormStatus::MissingRequired);
        }

        match store.append(record.clone()) {
            Ok(count) => {
                info!(count, events = record.events.len(), "RSVP saved");
                self.form = RsvpForm::default();
                self.status = FormStatus::Saved;
                SubmitOutcome::Saved(record)
            }
            Err(e) => {
                warn!(error = %e, "Failed to save RSVP");
                self.reject(FormStatus::SaveFailed)
            }
        }
    }

    fn reject(&mut self, status: FormStatus) -> SubmitOutcome {
        self.status = status;
        SubmitOutcome::Rejected(status)
    }
}


#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::fixtures::filled_form;
    use super::*;
    use crate::error::{Error, Result};
    use crate::storage::MemoryStorage;

    fn store() -> RecordStore<MemoryStorage> {
        RecordStore::new(MemoryStorage::new())
    }

    #[derive(Debug)]
    struct FailingWrites;

    impl StorageBackend for FailingWrites {
        fn get_item(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::internal("disk full"))
        }

        fn remove_item(&mut self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_submit_saves_trimmed_record() {
        let mut store = store();
        let mut controller = FormController::new();
        controller.fill(filled_form());
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();

        let outcome = controller.submit_at(&mut store, now);

        let SubmitOutcome::Saved(record) = outcome else {
            panic!("expected saved outcome");
        };
        assert_eq!(record.primary_name, "Jo March");
        assert_eq!(record.headcount, 2);
        assert_eq!(record.created_at, now);
        assert_eq!(store.load(), vec![record]);
        assert_eq!(controller.status(), FormStatus::Saved);
        assert_eq!(controller.form(), &RsvpForm::default());
    }

    #[test]
    fn test_zero_events_rejected() {
        let mut store = store();
        let mut controller = FormController::new();
        let mut form = filled_form();
        form.events.clear();
        controller.fill(form.clone());

        let outcome = controller.submit(&mut store);

        assert_eq!(outcome, SubmitOutcome::Rejected(FormStatus::EventRequired));
        assert_eq!(
            controller.status().message(),
            "Please select at least one event to attend."
        );
        assert!(store.load().is_empty());
        assert_eq!(controller.form(), &form);
    }

    #[test]
    fn test_blank_events_count_as_none() {
        let mut store = store();
        let mut controller = FormController::new();
        let mut form = filled_form();
        form.events = vec!["  ".to_string()];
        controller.fill(form);

        assert_eq!(
            controller.submit(&mut store),
            SubmitOutcome::Rejected(FormStatus::EventRequired)
        );
    }

    #[test]
    fn test_missing_party_names_rejected() {
        let mut store = store();
        let mut controller = FormController::new();
        controller.fill(RsvpForm {
            primary_name: "Jo".to_string(),
            email: "j@x.com".to_string(),
            party_names: String::new(),
            events: vec!["Ceremony".to_string()],
            ..RsvpForm::default()
        });

        let outcome = controller.submit(&mut store);

        assert_eq!(outcome, SubmitOutcome::Rejected(FormStatus::MissingRequired));
        assert!(controller.status().message().contains("guest names"));
        assert!(store.load().is_empty());
        assert_eq!(controller.form().primary_name, "Jo");
    }

    #[test]
    fn test_whitespace_only_name_rejected() {
        let mut store = store();
        let mut controller = FormController::new();
        let mut form = filled_form();
        form.primary_name = "   ".to_string();
        controller.fill(form);

        assert_eq!(
            controller.submit(&mut store),
            SubmitOutcome::Rejected(FormStatus::MissingRequired)
        );
    }

    #[test]
    fn test_event_check_runs_before_field_check() {
        let mut store = store();
        let mut controller = FormController::new();

        assert_eq!(
            controller.submit(&mut store),
            SubmitOutcome::Rejected(FormStatus::EventRequired)
        );
    }

    #[test]
    fn test_headcount_defaults_to_one() {
        let mut store = store();
        let mut controller = FormController::new();
        let mut form = filled_form();
        form.headcount = String::new();
        controller.fill(form);

        controller.submit(&mut store);

        assert_eq!(store.load()[0].headcount, 1);
    }

    #[test]
    fn test_non_numeric_headcount_defaults_to_one() {
        let mut store = store();
        let mut controller = FormController::new();
        let mut form = filled_form();
        form.headcount = "a few".to_string();
        controller.fill(form);

        controller.submit(&mut store);

        assert_eq!(store.load()[0].headcount, 1);
    }

    #[test]
    fn test_duplicate_events_collapsed() {
        let mut form = filled_form();
        form.events = vec![
            "Ceremony".to_string(),
            "Reception".to_string(),
            "Ceremony ".to_string(),
        ];

        assert_eq!(form.checked_events(), vec!["Ceremony", "Reception"]);
    }

    #[test]
    fn test_write_failure_is_reported_not_raised() {
        let mut store = RecordStore::new(FailingWrites);
        let mut controller = FormController::new();
        controller.fill(filled_form());

        let outcome = controller.submit(&mut store);

        assert_eq!(outcome, SubmitOutcome::Rejected(FormStatus::SaveFailed));
        assert!(controller.status().is_rejection());
        assert_eq!(controller.form(), &filled_form());
    }

    #[test]
    fn test_read_failure_saves_nothing() {
        #[derive(Debug, Default)]
        struct Unreadable {
            writes: usize,
        }

        impl StorageBackend for Unreadable {
            fn get_item(&self, _key: &str) -> Result<Option<String>> {
                Err(Error::internal("database is locked"))
            }

            fn set_item(&mut self, _key: &str, _value: &str) -> Result<()> {
                self.writes += 1;
                Ok(())
            }

            fn remove_item(&mut self, _key: &str) -> Result<()> {
                Ok(())
            }
        }

        crate::logging::init_test_logging();
        let mut store = RecordStore::new(Unreadable::default());
        let mut controller = FormController::new();
        controller.fill(filled_form());

        let outcome = controller.submit(&mut store);

        assert_eq!(outcome, SubmitOutcome::Rejected(FormStatus::SaveFailed));
        assert_eq!(store.backend().writes, 0);
        assert_eq!(controller.form(), &filled_form());
    }

    #[test]
    fn test_reset_clears_form_and_status_only() {
        let mut store = store();
        let mut controller = FormController::new();
        controller.fill(filled_form());
        controller.submit(&mut store);
        controller.form_mut().primary_name = "Beth".to_string();

        controller.reset();

        assert_eq!(controller.form(), &RsvpForm::default());
        assert_eq!(controller.status(), FormStatus::Idle);
        assert_eq!(controller.status().to_string(), "");
        assert_eq!(store.load().len(), 1);
    }
}
