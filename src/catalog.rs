//! The list of bites shown on the landing page.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[Self::Beginner, Self::Intermediate, Self::Advanced]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Capitalized label for buttons and tags.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown difficulty '{s}' (expected beginner, intermediate or advanced)"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Performance,
    Ux,
    DataHandling,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Performance => "Performance",
            Self::Ux => "UX",
            Self::DataHandling => "Data Handling",
        }
    }
}

/// Page a bite opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Landing,
    DebounceSearch,
    InfiniteScroll,
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Landing => "Frontend Bites",
            Self::DebounceSearch => "Debounce Search",
            Self::InfiniteScroll => "Infinite Scroll",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bite {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub difficulty: Difficulty,
    pub route: Route,
}

pub static BITES: &[Bite] = &[
    Bite {
        id: "infinite-scroll",
        title: "Infinite Scroll",
        description: "Load more items automatically as user scrolls to the bottom. \
                      Perfect for feeds, product listings, and galleries.",
        category: Category::Performance,
        difficulty: Difficulty::Intermediate,
        route: Route::InfiniteScroll,
    },
    Bite {
        id: "debounce-search",
        title: "Debounce Search",
        description: "Optimize search input with debouncing to reduce API calls and improve \
                      performance. Essential for real-time search.",
        category: Category::Ux,
        difficulty: Difficulty::Beginner,
        route: Route::DebounceSearch,
    },
];

/// Bites matching `filter`, in catalog order. `None` keeps everything.
pub fn filter_by_difficulty(bites: &[Bite], filter: Option<Difficulty>) -> Vec<&Bite> {
    bites
        .iter()
        .filter(|bite| filter.map_or(true, |difficulty| bite.difficulty == difficulty))
        .collect()
}

pub fn find_bite(id: &str) -> Option<&'static Bite> {
    BITES.iter().find(|bite| bite.id == id)
}

pub fn bite_ids() -> Vec<&'static str> {
    BITES.iter().map(|bite| bite.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filter_keeps_catalog_order() {
        let ids: Vec<_> = filter_by_difficulty(BITES, None).iter().map(|b| b.id).collect();
        assert_eq!(ids, ["infinite-scroll", "debounce-search"]);
    }

    #[test]
    fn filter_selects_matching_difficulty() {
        let found = filter_by_difficulty(BITES, Some(Difficulty::Beginner));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].route, Route::DebounceSearch);
    }

    #[test]
    fn advanced_is_empty() {
        assert!(filter_by_difficulty(BITES, Some(Difficulty::Advanced)).is_empty());
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Intermediate".parse::<Difficulty>(), Ok(Difficulty::Intermediate));
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn find_by_id() {
        assert_eq!(find_bite("debounce-search").map(|b| b.title), Some("Debounce Search"));
        assert!(find_bite("nope").is_none());
    }
}
