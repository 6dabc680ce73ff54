//! Static theme and avatar catalog with search and markup rendering.

pub mod avatars;
pub mod render;
pub mod themes;

use serde::{Deserialize, Serialize};

pub use avatars::{AVATARS, AVATAR_CATEGORIES};
pub use render::{render_avatar, render_theme_css};
pub use themes::{THEMES, THEME_CATEGORIES};

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub background: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
    pub card_bg: &'static str,
    pub animation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Avatar {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub style: &'static str,
    pub animation: &'static str,
    pub colors: [&'static str; 3],
}

/// Anything the catalog search can match on.
pub trait CatalogEntry {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn category(&self) -> &'static str;
}

impl CatalogEntry for Theme {
    fn id(&self) -> &'static str {
        self.id
    }
    fn name(&self) -> &'static str {
        self.name
    }
    fn category(&self) -> &'static str {
        self.category
    }
}

impl CatalogEntry for Avatar {
    fn id(&self) -> &'static str {
        self.id
    }
    fn name(&self) -> &'static str {
        self.name
    }
    fn category(&self) -> &'static str {
        self.category
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CatalogPage<T: Serialize + 'static> {
    pub categories: &'static [&'static str],
    pub items: Vec<&'static T>,
    pub total: usize,
}

/// Case-insensitive name search combined with an exact category match.
/// An empty search term and the `All` category both match everything.
pub fn filter<T: CatalogEntry>(entries: &'static [T], query: &CatalogQuery) -> Vec<&'static T> {
    let needle = query.search.as_deref().unwrap_or_default().to_lowercase();
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);

    entries
        .iter()
        .filter(|entry| entry.name().to_lowercase().contains(&needle))
        .filter(|entry| category.map_or(true, |c| entry.category() == c))
        .collect()
}

pub fn find_theme(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.id == id)
}

pub fn find_avatar(id: &str) -> Option<&'static Avatar> {
    AVATARS.iter().find(|a| a.id == id)
}

pub fn default_theme() -> &'static Theme {
    &THEMES[0]
}

pub fn default_avatar() -> &'static Avatar {
    &AVATARS[0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_search_returns_everything() {
        let query = CatalogQuery {
            search: Some(String::new()),
            category: None,
        };
        assert_eq!(filter(THEMES, &query).len(), THEMES.len());
        assert_eq!(filter(AVATARS, &query).len(), AVATARS.len());

        let all = CatalogQuery {
            search: Some(String::new()),
            category: Some(ALL_CATEGORIES.to_string()),
        };
        assert_eq!(filter(THEMES, &all).len(), THEMES.len());
    }

    #[test]
    fn search_is_case_insensitive_and_category_exact() {
        let query = CatalogQuery {
            search: Some("OCEAN".to_string()),
            category: None,
        };
        let found = filter(THEMES, &query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "ocean-blue");

        let pets = CatalogQuery {
            search: None,
            category: Some("Pets".to_string()),
        };
        let found = filter(AVATARS, &pets);
        assert!(!found.is_empty());
        assert!(found.iter().all(|a| a.category == "Pets"));

        let none = CatalogQuery {
            search: Some("ocean".to_string()),
            category: Some("Tech".to_string()),
        };
        assert!(filter(THEMES, &none).is_empty());
    }

    #[test]
    fn whitespace_search_is_matched_literally() {
        let space = CatalogQuery {
            search: Some(" ".to_string()),
            category: None,
        };
        let found = filter(THEMES, &space);
        assert!(found.len() < THEMES.len());
        assert!(found.iter().all(|t| t.name.contains(' ')));
        assert!(!found.iter().any(|t| t.id == "neumorphism"));

        let padded = CatalogQuery {
            search: Some("   ".to_string()),
            category: None,
        };
        assert!(filter(THEMES, &padded).is_empty());
        assert!(filter(AVATARS, &padded).is_empty());

        let leading = CatalogQuery {
            search: Some(" blue".to_string()),
            category: None,
        };
        assert!(filter(THEMES, &leading).iter().any(|t| t.id == "ocean-blue"));
    }

    #[test]
    fn ids_are_unique_and_defaults_resolve() {
        let mut ids: Vec<_> = THEMES.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), THEMES.len());

        let mut ids: Vec<_> = AVATARS.iter().map(|a| a.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), AVATARS.len());

        assert_eq!(default_theme().id, "clean-light");
        assert_eq!(default_avatar().id, "anime-student");
        assert_eq!(find_avatar("cat-cute").map(|a| a.name), Some("Cute Cat"));
        assert!(find_theme("missing").is_none());
    }
}
