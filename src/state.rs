use std::sync::Arc;

use crate::data::filter::{apply_filters, Choice, FilterSelection};
use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Overview,
    Segmentation,
    Insights,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Overview, Page::Segmentation, Page::Insights];

    /// Label in the navigation radio.
    pub fn label(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::Segmentation => "Segmentation",
            Page::Insights => "Insights",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "📊 Customer Revenue & Usage Overview",
            Page::Segmentation => "📈 Customer Segmentation Insights",
            Page::Insights => "💡 Business Insights & Recommendations",
        }
    }

    /// Whether the page has region / plan selectors.
    pub fn has_filters(self) -> bool {
        !matches!(self, Page::Insights)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Overview and Segmentation each keep their own selection; changing one
/// never touches the other.
pub struct AppState {
    /// Table loaded once at startup.
    pub dataset: Arc<Dataset>,

    /// Page shown in the central panel.
    pub page: Page,

    pub overview: FilterSelection,
    pub segmentation: FilterSelection,

    /// Last render failure, shown in place of the page.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            page: Page::default(),
            overview: FilterSelection::default(),
            segmentation: FilterSelection::default(),
            status_message: None,
        }
    }

    /// Selection owned by `page`; `None` for pages without selectors.
    pub fn selection(&self, page: Page) -> Option<&FilterSelection> {
        match page {
            Page::Overview => Some(&self.overview),
            Page::Segmentation => Some(&self.segmentation),
            Page::Insights => None,
        }
    }

    fn selection_mut(&mut self, page: Page) -> Option<&mut FilterSelection> {
        match page {
            Page::Overview => Some(&mut self.overview),
            Page::Segmentation => Some(&mut self.segmentation),
            Page::Insights => None,
        }
    }

    pub fn set_region(&mut self, page: Page, choice: Choice) {
        if let Some(sel) = self.selection_mut(page) {
            sel.region = choice;
        }
        self.log_selection(page);
    }

    pub fn set_plan(&mut self, page: Page, choice: Choice) {
        if let Some(sel) = self.selection_mut(page) {
            sel.plan = choice;
        }
        self.log_selection(page);
    }

    fn log_selection(&self, page: Page) {
        let Some(sel) = self.selection(page) else {
            return;
        };
        match apply_filters(&self.dataset, sel) {
            Ok(view) => log::debug!("{}: {sel} → {} rows", page.label(), view.len()),
            Err(e) => log::debug!("{}: {sel} → {e}", page.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_selections_are_independent() {
        let mut state = AppState::new(Arc::new(Dataset::default()));
        state.set_region(Page::Overview, Choice::from("North"));
        state.set_plan(Page::Segmentation, Choice::from("B"));

        assert_eq!(state.overview, FilterSelection::new("North", Choice::All));
        assert_eq!(state.segmentation, FilterSelection::new(Choice::All, "B"));
    }

    #[test]
    fn insights_has_no_selection() {
        let mut state = AppState::new(Arc::new(Dataset::default()));
        state.set_region(Page::Insights, Choice::from("North"));
        assert!(state.selection(Page::Insights).is_none());
        assert_eq!(state.overview, FilterSelection::default());
        assert!(!Page::Insights.has_filters());
    }
}
