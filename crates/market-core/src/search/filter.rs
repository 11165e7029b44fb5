//! Generic list filtering.
//!
//! Every list screen filters the same way: a free-text query matched as a
//! case-insensitive substring against one or more text fields, combined
//! with optional equality filters whose "all" value matches everything.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel accepted by [`Selection::from_str`] for "no restriction".
pub const ALL: &str = "all";

/// Case-insensitive substring query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextQuery {
    needle: String,
}

impl TextQuery {
    pub fn new(query: impl AsRef<str>) -> Self {
        Self {
            needle: query.as_ref().to_lowercase(),
        }
    }

    /// An empty query matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Check whether `haystack` contains the query, ignoring case.
    pub fn matches(&self, haystack: &str) -> bool {
        self.needle.is_empty() || haystack.to_lowercase().contains(&self.needle)
    }
}

/// An equality filter with an "all" value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection<T> {
    /// Matches every value.
    All,
    /// Matches values equal to the inner one.
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => expected == value,
        }
    }
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T> From<Option<T>> for Selection<T> {
    fn from(value: Option<T>) -> Self {
        value.map(Selection::Only).unwrap_or_default()
    }
}

impl<T: FromStr> FromStr for Selection<T> {
    type Err = T::Err;

    /// `"all"` (any case) and the empty string parse as [`Selection::All`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            return Ok(Selection::All);
        }
        s.parse().map(Selection::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "{}", ALL),
            Selection::Only(value) => write!(f, "{}", value),
        }
    }
}

/// Accessor for a searchable text field.
pub type TextField<T> = fn(&T) -> &str;

/// A predicate combinator over records of type `T`.
///
/// The text query must match at least one registered field; every
/// condition must hold. Output order follows input order.
///
/// ```
/// use market_core::search::{Filter, Selection};
///
/// struct Row { name: String, city: String }
///
/// let rows = vec![
///     Row { name: "Ana".into(), city: "Recife".into() },
///     Row { name: "Bruno".into(), city: "Natal".into() },
/// ];
/// let filter = Filter::new()
///     .text("an")
///     .field(|r: &Row| r.name.as_str())
///     .select(Selection::Only("Recife".to_string()), |r: &Row| &r.city);
/// let names: Vec<_> = filter.apply(&rows).map(|r| r.name.as_str()).collect();
/// assert_eq!(names, vec!["Ana"]);
/// ```
pub struct Filter<T> {
    text: TextQuery,
    fields: Vec<TextField<T>>,
    conditions: Vec<Box<dyn Fn(&T) -> bool>>,
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Self {
            text: TextQuery::default(),
            fields: Vec::new(),
            conditions: Vec::new(),
        }
    }
}

impl<T> Filter<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query.
    pub fn text(mut self, query: impl AsRef<str>) -> Self {
        self.text = TextQuery::new(query);
        self
    }

    /// Register a text field the query is matched against.
    pub fn field(mut self, accessor: TextField<T>) -> Self {
        self.fields.push(accessor);
        self
    }

    /// Add an arbitrary condition.
    pub fn when(mut self, condition: impl Fn(&T) -> bool + 'static) -> Self {
        self.conditions.push(Box::new(condition));
        self
    }

    /// Add an equality condition on the value returned by `accessor`.
    pub fn select<V>(self, selection: Selection<V>, accessor: fn(&T) -> &V) -> Self
    where
        T: 'static,
        V: PartialEq + 'static,
    {
        match selection {
            Selection::All => self,
            Selection::Only(expected) => self.when(move |item| accessor(item) == &expected),
        }
    }

    /// Check a single record.
    pub fn matches(&self, item: &T) -> bool {
        let text_ok = self.text.is_empty()
            || self.fields.iter().any(|field| self.text.matches(field(item)));
        text_ok && self.conditions.iter().all(|condition| condition(item))
    }

    /// Lazily filter a sequence of records.
    pub fn apply<'s, I>(&'s self, items: I) -> impl Iterator<Item = &'s T> + 's
    where
        I: IntoIterator<Item = &'s T>,
        I::IntoIter: 's,
        T: 's,
    {
        items.into_iter().filter(move |item| self.matches(item))
    }

    /// Count matching records.
    pub fn count<'s, I>(&'s self, items: I) -> usize
    where
        I: IntoIterator<Item = &'s T>,
        T: 's,
    {
        items.into_iter().filter(|item| self.matches(item)).count()
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("text", &self.text)
            .field("fields", &self.fields.len())
            .field("conditions", &self.conditions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        name: &'static str,
        code: &'static str,
        group: &'static str,
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Rice 5kg", code: "7891234567890", group: "Grains" },
            Row { name: "Black Beans 1kg", code: "7891234567891", group: "Grains" },
            Row { name: "Soy Oil 900ml", code: "7891234567892", group: "Oils" },
        ]
    }

    fn by_name_or_code() -> Filter<Row> {
        Filter::new().field(|r: &Row| r.name).field(|r: &Row| r.code)
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let rows = rows();
        let filter = by_name_or_code();
        assert_eq!(filter.apply(&rows).count(), 3);
    }

    #[test]
    fn test_case_insensitive_name_match() {
        let rows = rows();
        let filter = by_name_or_code().text("RICE");
        let hits: Vec<_> = filter.apply(&rows).map(|r| r.name).collect();
        assert_eq!(hits, vec!["Rice 5kg"]);
    }

    #[test]
    fn test_code_match() {
        let rows = rows();
        let filter = by_name_or_code().text("892");
        let hits: Vec<_> = filter.apply(&rows).map(|r| r.name).collect();
        assert_eq!(hits, vec!["Soy Oil 900ml"]);
    }

    #[test]
    fn test_selection_combines_with_text() {
        let rows = rows();
        let filter = by_name_or_code()
            .text("1kg")
            .select(Selection::Only("Oils"), |r: &Row| &r.group);
        assert_eq!(filter.apply(&rows).count(), 0);

        let filter = by_name_or_code()
            .text("kg")
            .select(Selection::Only("Grains"), |r: &Row| &r.group);
        assert_eq!(filter.count(&rows), 2);
    }

    #[test]
    fn test_order_is_stable() {
        let rows = rows();
        let filter = by_name_or_code().text("789");
        let hits: Vec<_> = filter.apply(&rows).map(|r| r.code).collect();
        assert_eq!(
            hits,
            vec!["7891234567890", "7891234567891", "7891234567892"]
        );
    }

    #[test]
    fn test_query_without_fields_matches_nothing() {
        let rows = rows();
        let filter: Filter<Row> = Filter::new().text("rice");
        assert_eq!(filter.apply(&rows).count(), 0);
    }

    #[test]
    fn test_selection_parse() {
        let all: Selection<String> = "ALL".parse().unwrap();
        assert!(all.is_all());
        let empty: Selection<String> = "".parse().unwrap();
        assert!(empty.is_all());
        let only: Selection<String> = "Grains".parse().unwrap();
        assert_eq!(only, Selection::Only("Grains".to_string()));
        assert_eq!(only.to_string(), "Grains");
    }

    #[test]
    fn test_selection_from_option() {
        assert_eq!(Selection::<u8>::from(None), Selection::All);
        assert_eq!(Selection::from(Some(3u8)), Selection::Only(3));
    }
}
