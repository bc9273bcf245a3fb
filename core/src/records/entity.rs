use crate::records::segment::MovementSegment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inclusive time range restricting which segments of an entity are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SelectionWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Many-to-one mapping from display names to entity ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasBook {
    aliases: BTreeMap<String, String>,
}

impl AliasBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alias: impl Into<String>, entity_id: impl Into<String>) {
        self.aliases.insert(alias.into(), entity_id.into());
    }

    /// Resolves an alias to its entity id. Unknown names are passed through
    /// unchanged so raw ids can be used interchangeably with aliases.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map(String::as_str).unwrap_or(name)
    }

    /// First alias (alphabetically) pointing at `entity_id`.
    pub fn alias_for(&self, entity_id: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(_, id)| id.as_str() == entity_id)
            .map(|(alias, _)| alias.as_str())
    }
}

/// An animal together with its chronologically ordered segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEntity {
    pub entity_id: String,
    pub alias: Option<String>,
    pub segments: Vec<MovementSegment>,
}

impl TrackedEntity {
    /// Collects every segment of `entity_id` from `records`, sorted by begin time.
    pub fn from_records(records: &[MovementSegment], entity_id: &str, aliases: &AliasBook) -> Self {
        let mut segments: Vec<MovementSegment> = records
            .iter()
            .filter(|segment| segment.entity_id == entity_id)
            .cloned()
            .collect();
        segments.sort_by_key(|segment| segment.begin_time);

        Self {
            entity_id: entity_id.to_string(),
            alias: aliases.alias_for(entity_id).map(str::to_string),
            segments,
        }
    }

    /// `[min(begin_time), max(begin_time)]` over the entity's segments.
    pub fn span(&self) -> Option<SelectionWindow> {
        let start = self.segments.iter().map(|s| s.begin_time).min()?;
        let end = self.segments.iter().map(|s| s.begin_time).max()?;
        Some(SelectionWindow::new(start, end))
    }

    pub fn display_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.entity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::segment::GeoPosition;
    use chrono::{Duration, TimeZone};

    fn segment(id: &str, hours: i64) -> MovementSegment {
        let begin = Utc.with_ymd_and_hms(2004, 1, 1, 0, 0, 0).unwrap() + Duration::hours(hours);
        MovementSegment::new(
            id,
            GeoPosition::new(0.0, 0.0),
            GeoPosition::new(0.0, 1.0),
            begin,
            begin + Duration::hours(1),
            1.0,
            1.0,
        )
    }

    #[test]
    fn alias_book_is_many_to_one() {
        let mut book = AliasBook::new();
        book.insert("Shelly", "22");
        book.insert("Shell", "22");
        assert_eq!(book.resolve("Shelly"), "22");
        assert_eq!(book.resolve("Shell"), "22");
        assert_eq!(book.resolve("23"), "23");
        assert_eq!(book.alias_for("22"), Some("Shell"));
        assert_eq!(book.alias_for("23"), None);
    }

    #[test]
    fn tracked_entity_sorts_and_spans() {
        let records = vec![segment("a", 5), segment("b", 0), segment("a", 1)];
        let mut book = AliasBook::new();
        book.insert("Crush", "a");
        let entity = TrackedEntity::from_records(&records, "a", &book);

        assert_eq!(entity.segments.len(), 2);
        assert!(entity.segments[0].begin_time < entity.segments[1].begin_time);
        assert_eq!(entity.display_name(), "Crush");

        let span = entity.span().unwrap();
        assert_eq!(span.start, entity.segments[0].begin_time);
        assert_eq!(span.end, entity.segments[1].begin_time);
    }

    #[test]
    fn window_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2004, 1, 1, 0, 0, 0).unwrap();
        let window = SelectionWindow::new(start, start + Duration::days(1));
        assert!(window.contains(start));
        assert!(window.contains(start + Duration::days(1)));
        assert!(!window.contains(start + Duration::days(2)));
    }
}
