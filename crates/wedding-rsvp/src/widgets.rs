//! Page widget state: the mobile navigation toggle and photo carousels.

/// Open/closed state of the mobile navigation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavToggle {
    open: bool,
}

impl NavToggle {
    /// A closed navigation panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the panel. Returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Close the panel, as when a navigation link is followed.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Whether the panel is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Value for the toggle button's `aria-expanded` attribute.
    #[must_use]
    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }
}

/// A carousel with exactly one active slide, navigated circularly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    slide_count: usize,
    current: usize,
}

impl Carousel {
    /// A carousel over `slide_count` slides, starting at the first.
    ///
    /// With zero slides nothing is ever active and navigation does nothing.
    #[must_use]
    pub fn new(slide_count: usize) -> Self {
        Self {
            slide_count,
            current: 0,
        }
    }

    /// Number of slides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slide_count
    }

    /// Whether the carousel has no slides.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slide_count == 0
    }

    /// Index of the active slide.
    #[must_use]
    pub fn active(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.current)
    }

    /// Whether slide `index` is the active one.
    #[must_use]
    pub fn is_active(&self, index: usize) -> bool {
        self.active() == Some(index)
    }

    /// Advance to the next slide, wrapping to the first.
    pub fn next_slide(&mut self) -> Option<usize> {
        if !self.is_empty() {
            self.current = (self.current + 1) % self.slide_count;
        }
        self.active()
    }

    /// Go back to the previous slide, wrapping to the last.
    pub fn prev_slide(&mut self) -> Option<usize> {
        if !self.is_empty() {
            self.current = (self.current + self.slide_count - 1) % self.slide_count;
        }
        self.active()
    }
}
