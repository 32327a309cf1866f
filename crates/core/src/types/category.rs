//! Category read model.

use serde::{Deserialize, Serialize};

use super::id::CategoryId;

/// A menu category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier. Id 0 is reserved for the synthetic "Todos" entry.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL-safe identifier used for filtering (`?category=slug`).
    pub slug: String,
    /// Badge background color (hex, e.g. `#F6F7F8`).
    pub badge_bg: String,
    /// Badge text color (hex).
    pub badge_text: String,
}

impl Category {
    /// The synthetic "Todos" (all products) entry shown first in filter bars.
    #[must_use]
    pub fn all() -> Self {
        Self {
            id: CategoryId::ALL,
            name: "Todos".to_owned(),
            slug: "todos".to_owned(),
            badge_bg: "#F6F7F8".to_owned(),
            badge_text: "#1A1A1A".to_owned(),
        }
    }
}
