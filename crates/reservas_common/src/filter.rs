// --- File: crates/reservas_common/src/filter.rs ---
use std::str::FromStr;

use crate::error::ReservasError;
use crate::models::{Room, RoomCategory};

/// Category tab selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(RoomCategory),
}

impl CategoryFilter {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "Todos",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    /// Tabs in display order.
    pub fn tabs() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(RoomCategory::ALL.iter().copied().map(CategoryFilter::Only))
            .collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ReservasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(CategoryFilter::All),
            other => other.parse().map(CategoryFilter::Only),
        }
    }
}

/// Category plus case-insensitive name search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomFilter {
    pub category: CategoryFilter,
    pub search: String,
}

impl RoomFilter {
    pub fn new(category: CategoryFilter, search: impl Into<String>) -> Self {
        Self {
            category,
            search: search.into(),
        }
    }

    pub fn matches(&self, room: &Room) -> bool {
        let category_ok = match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => room.category == category,
        };
        category_ok
            && room
                .name
                .to_lowercase()
                .contains(&self.search.trim().to_lowercase())
    }

    pub fn apply<'a>(&self, rooms: &'a [Room]) -> Vec<&'a Room> {
        rooms.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn names(rooms: Vec<&Room>) -> Vec<&str> {
        rooms.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_all_with_empty_search_keeps_everything() {
        let catalog = Catalog::builtin();
        assert_eq!(RoomFilter::default().apply(catalog.rooms()).len(), 8);
    }

    #[test]
    fn test_category_and_search_combine() {
        let catalog = Catalog::builtin();
        let filter = RoomFilter::new(CategoryFilter::Only(RoomCategory::Laboratory), "CHROME B");
        assert_eq!(names(filter.apply(catalog.rooms())), vec!["BS - Chrome B (34un)"]);

        let filter = RoomFilter::new(CategoryFilter::Only(RoomCategory::Classroom), "chrome");
        assert!(filter.apply(catalog.rooms()).is_empty());
    }

    #[test]
    fn test_search_matches_accented_names_case_insensitively() {
        let catalog = Catalog::builtin();
        let filter = RoomFilter::new(CategoryFilter::All, "AUDITÓRIO");
        assert_eq!(
            names(filter.apply(catalog.rooms())),
            vec!["Auditório B. Norte", "Auditório Bloco Sul"]
        );
    }

    #[test]
    fn test_parse_and_labels() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "auditorium".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(RoomCategory::Auditorium)
        );
        assert!("kitchen".parse::<CategoryFilter>().is_err());

        let labels: Vec<_> = CategoryFilter::tabs().iter().map(|t| t.label()).collect();
        assert_eq!(
            labels,
            vec!["Todos", "Labs Chromebook", "Ateliers/Oficinas", "Auditórios"]
        );
    }
}
