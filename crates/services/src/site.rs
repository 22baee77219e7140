//! Page chrome around the quiz and animations: navigation, scroll state,
//! project filtering, modals and the contact form.
//!
//! Everything here is plain state; adapters apply the results to the page.

use std::time::Duration;

use folio_core::model::{ModalId, ProjectCard, ProjectFilter};

//
// ─── NAVIGATION ────────────────────────────────────────────────────────────────
//

/// Mobile hamburger menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Following a link always collapses the menu.
    pub fn follow_link(&mut self) {
        self.open = false;
    }

    /// Icon class for the hamburger button.
    #[must_use]
    pub fn icon(&self) -> &'static str {
        if self.open { "fa-times" } else { "fa-bars" }
    }
}

/// Header and back-to-top state derived from the scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollChrome {
    pub header_scrolled: bool,
    pub back_to_top_visible: bool,
}

impl ScrollChrome {
    pub const HEADER_THRESHOLD: f64 = 100.0;
    pub const BACK_TO_TOP_THRESHOLD: f64 = 500.0;

    #[must_use]
    pub fn at(scroll_y: f64) -> Self {
        Self {
            header_scrolled: scroll_y > Self::HEADER_THRESHOLD,
            back_to_top_visible: scroll_y > Self::BACK_TO_TOP_THRESHOLD,
        }
    }
}

/// Height of the fixed header that anchor scrolling must clear.
pub const HEADER_OFFSET: f64 = 80.0;

/// Scroll destination for an in-page anchor.
///
/// `"#"` and anchors whose element was not found yield `None`.
#[must_use]
pub fn anchor_scroll_target(href: &str, element_top: Option<f64>) -> Option<f64> {
    if href == "#" || !href.starts_with('#') {
        return None;
    }
    element_top.map(|top| top - HEADER_OFFSET)
}

//
// ─── PROJECTS ──────────────────────────────────────────────────────────────────
//

/// How a card should change after a filter click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardTransition {
    pub index: usize,
    pub visible: bool,
    /// Delay before the fade completes (shown) or the card is removed (hidden).
    pub delay: Duration,
}

/// The filterable project grid.
#[derive(Debug, Clone, Default)]
pub struct ProjectGrid {
    cards: Vec<ProjectCard>,
    filter: ProjectFilter,
}

impl ProjectGrid {
    pub const SHOW_DELAY: Duration = Duration::from_millis(100);
    pub const HIDE_DELAY: Duration = Duration::from_millis(300);

    #[must_use]
    pub fn new(cards: Vec<ProjectCard>) -> Self {
        Self {
            cards,
            filter: ProjectFilter::All,
        }
    }

    #[must_use]
    pub fn active_filter(&self) -> &ProjectFilter {
        &self.filter
    }

    #[must_use]
    pub fn cards(&self) -> &[ProjectCard] {
        &self.cards
    }

    /// Activate the filter button with attribute `raw`.
    pub fn apply_filter(&mut self, raw: &str) -> Vec<CardTransition> {
        self.filter = ProjectFilter::parse(raw);
        self.cards
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let visible = self.filter.matches(card);
                CardTransition {
                    index,
                    visible,
                    delay: if visible {
                        Self::SHOW_DELAY
                    } else {
                        Self::HIDE_DELAY
                    },
                }
            })
            .collect()
    }
}

//
// ─── OVERLAYS ──────────────────────────────────────────────────────────────────
//

/// Project detail modal; while one is open the page does not scroll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    open: Option<ModalId>,
}

impl ModalState {
    /// Open `id` if the modal exists on the page. Returns whether it opened.
    pub fn open(&mut self, id: ModalId, exists: bool) -> bool {
        if !exists {
            tracing::debug!(modal = %id, "modal not found");
            return false;
        }
        self.open = Some(id);
        true
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// A click landing on the modal backdrop itself closes it.
    pub fn click(&mut self, target: &ModalId) {
        if self.open.as_ref() == Some(target) {
            self.close();
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&ModalId> {
        self.open.as_ref()
    }

    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.open.is_some()
    }
}

/// The slide-out quiz panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizPanel {
    active: bool,
}

impl QuizPanel {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn toggle(&mut self) {
        self.active = !self.active;
    }

    pub fn close(&mut self) {
        self.active = false;
    }

    /// Clicks outside both the toggle and the panel dismiss it.
    pub fn click(&mut self, inside_toggle: bool, inside_panel: bool) {
        if !inside_toggle && !inside_panel {
            self.active = false;
        }
    }
}

//
// ─── CONTACT ───────────────────────────────────────────────────────────────────
//

/// Values of the contact form at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    /// Message shown to the visitor; nothing is sent anywhere.
    #[must_use]
    pub fn acknowledgement(&self) -> String {
        format!(
            "Thank you for your message, {}! I will get back to you soon at {}.",
            self.name.trim(),
            self.email.trim()
        )
    }
}
