//! The RSVP page.
//!
//! Wires the controllers to one store. The list is rendered on load, then
//! again after a saved submission or a confirmed clear.

use tracing::debug;

use crate::error::Result;
use crate::export::{ClearOutcome, Dialogs, Download, ExportController, ExportOutcome};
use crate::form::{FormController, FormStatus, RsvpForm, SubmitOutcome};
use crate::render::{ListView, Renderer};
use crate::storage::StorageBackend;
use crate::store::RecordStore;
use crate::widgets::{Carousel, NavToggle};

/// Page state: store, form, rendered list and widgets.
#[derive(Debug)]
pub struct RsvpPage<B> {
    store: RecordStore<B>,
    renderer: Renderer,
    form: FormController,
    exporter: ExportController,
    list: ListView,
    nav: NavToggle,
    carousels: Vec<Carousel>,
}

impl<B: StorageBackend> RsvpPage<B> {
    /// Load the page over `store` and render the saved list.
    pub fn new(store: RecordStore<B>, renderer: Renderer, exporter: ExportController) -> Self {
        let list = renderer.render(&store);
        Self {
            store,
            renderer,
            form: FormController::new(),
            exporter,
            list,
            nav: NavToggle::new(),
            carousels: Vec::new(),
        }
    }

    /// Add a carousel with `slide_count` slides. Returns its index.
    pub fn add_carousel(&mut self, slide_count: usize) -> usize {
        self.carousels.push(Carousel::new(slide_count));
        self.carousels.len() - 1
    }

    /// The record store.
    #[must_use]
    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    /// The rendered RSVP list.
    #[must_use]
    pub fn list(&self) -> &ListView {
        &self.list
    }

    /// The form status line.
    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.form.status()
    }

    /// The current form values.
    #[must_use]
    pub fn form(&self) -> &RsvpForm {
        self.form.form()
    }

    /// Fill in the form.
    pub fn fill_form(&mut self, form: RsvpForm) {
        self.form.fill(form);
    }

    /// Submit the form; re-render when a record was saved.
    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.form.submit(&mut self.store);
        if outcome.is_saved() {
            self.rerender();
        }
        outcome
    }

    /// The form's reset button.
    pub fn reset_form(&mut self) {
        self.form.reset();
    }

    /// The export button.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails.
    pub fn export_csv<D, S>(&self, dialogs: &mut D, sink: &mut S) -> Result<ExportOutcome>
    where
        D: Dialogs + ?Sized,
        S: Download + ?Sized,
    {
        self.exporter.export(&self.store, dialogs, sink)
    }

    /// The clear button; re-renders after a confirmed clear.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be cleared.
    pub fn clear_all<D>(&mut self, dialogs: &mut D) -> Result<ClearOutcome>
    where
        D: Dialogs + ?Sized,
    {
        let outcome = self.exporter.clear(&mut self.store, dialogs)?;
        if outcome == ClearOutcome::Cleared {
            self.rerender();
        }
        Ok(outcome)
    }

    /// The navigation toggle.
    #[must_use]
    pub fn nav_mut(&mut self) -> &mut NavToggle {
        &mut self.nav
    }

    /// A carousel by index.
    #[must_use]
    pub fn carousel_mut(&mut self, index: usize) -> Option<&mut Carousel> {
        self.carousels.get_mut(index)
    }

    fn rerender(&mut self) {
        self.list = self.renderer.render(&self.store);
        debug!(cards = self.list.cards().len(), "Re-rendered RSVP list");
    }
}
