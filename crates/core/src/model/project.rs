use serde::{Deserialize, Serialize};

/// A project tile in the portfolio grid.
///
/// `categories` is the raw space-separated category attribute, e.g. `"web app"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCard {
    pub title: String,
    pub categories: String,
}

impl ProjectCard {
    #[must_use]
    pub fn new(title: impl Into<String>, categories: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            categories: categories.into(),
        }
    }
}

/// Active filter button.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ProjectFilter {
    #[default]
    All,
    Category(String),
}

impl ProjectFilter {
    /// Parse a filter attribute; `"all"` or a blank value selects everything.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" | "all" => ProjectFilter::All,
            other => ProjectFilter::Category(other.to_owned()),
        }
    }

    /// Category attributes are matched by substring, so `"web"` also matches
    /// `"webgl"`.
    #[must_use]
    pub fn matches(&self, card: &ProjectCard) -> bool {
        match self {
            ProjectFilter::All => true,
            ProjectFilter::Category(cat) => card.categories.contains(cat.as_str()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            ProjectFilter::All => "all",
            ProjectFilter::Category(cat) => cat,
        }
    }
}
