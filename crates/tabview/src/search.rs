//! Free-text search across several fields.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A single free-text query checked against a list of searchable fields.
///
/// A record matches if ANY of the fields contains the trimmed query,
/// ignoring case. Numbers, dates and booleans are searched through their
/// default string representation. A blank query matches everything.
///
/// ```
/// use tabview::SearchSpec;
///
/// let search = SearchSpec::new("  Dell ", ["title", "brand"]);
/// assert_eq!(search.needle(), Some("dell".to_string()));
/// assert!(SearchSpec::new("   ", ["title"]).is_blank());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSpec {
    pub query: String,
    pub fields: Vec<String>,
}

impl SearchSpec {
    pub fn new<I, S>(query: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SearchSpec {
            query: query.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if the query is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.query.trim().is_empty()
    }

    /// The trimmed, lower-cased query, or `None` when blank.
    pub fn needle(&self) -> Option<String> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    /// Tests one record against an already folded needle.
    fn matches_folded<T, F>(&self, record: &T, needle: &str, accessor: &F) -> bool
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        self.fields
            .iter()
            .any(|field| accessor(record, field).contains_folded(needle))
    }

    /// Tests one record against this search.
    pub fn matches<T, F>(&self, record: &T, accessor: &F) -> bool
    where
        for<'b> F: Fn(&'b T, &str) -> Value<'b>,
    {
        match self.needle() {
            Some(needle) => self.matches_folded(record, &needle, accessor),
            None => true,
        }
    }
}

/// Keeps the records matching `search`, in input order.
///
/// A blank query returns every input record.
pub fn apply_search<'a, T, I, F>(records: I, search: &SearchSpec, accessor: F) -> Vec<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    for<'b> F: Fn(&'b T, &str) -> Value<'b>,
{
    match search.needle() {
        Some(needle) => records
            .into_iter()
            .filter(|record| search.matches_folded(*record, &needle, &accessor))
            .collect(),
        None => records.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, Timestamp};

    struct Product {
        title: String,
        sku: u32,
        listed: Timestamp,
    }

    fn accessor<'a>(p: &'a Product, field: &str) -> Value<'a> {
        match field {
            "title" => Value::text(&p.title),
            "sku" => Value::Number(Number::from(p.sku)),
            "listed" => Value::Date(p.listed),
            _ => Value::Null,
        }
    }

    fn products() -> Vec<Product> {
        vec![
            Product {
                title: "Dell Inspiron".to_string(),
                sku: 1001,
                listed: Timestamp::from_secs(0),
            },
            Product {
                title: "USB-C Hub".to_string(),
                sku: 2002,
                listed: Timestamp::from_secs(31_536_000),
            },
        ]
    }

    #[test]
    fn matches_any_case() {
        let items = products();
        for query in ["dell", "DELL", "DeLl", "  dell  "] {
            let found = apply_search(&items, &SearchSpec::new(query, ["title"]), accessor);
            assert_eq!(found.len(), 1, "query {:?}", query);
            assert_eq!(found[0].title, "Dell Inspiron");
        }
    }

    #[test]
    fn no_match() {
        let items = products();
        let found = apply_search(&items, &SearchSpec::new("xyz", ["title"]), accessor);
        assert!(found.is_empty());
    }

    #[test]
    fn blank_query_returns_input() {
        let items = products();
        assert_eq!(apply_search(&items, &SearchSpec::default(), accessor).len(), 2);
        assert_eq!(
            apply_search(&items, &SearchSpec::new(" \t", ["title"]), accessor).len(),
            2
        );
    }

    #[test]
    fn any_field_matches() {
        let items = products();
        let search = SearchSpec::new("2002", ["title", "sku"]);
        let found = apply_search(&items, &search, accessor);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "USB-C Hub");
    }

    #[test]
    fn dates_are_searched_as_rfc3339() {
        let items = products();
        let found = apply_search(&items, &SearchSpec::new("1971-01", ["listed"]), accessor);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sku, 2002);
    }

    #[test]
    fn unknown_field_never_matches() {
        let items = products();
        let found = apply_search(&items, &SearchSpec::new("dell", ["brand"]), accessor);
        assert!(found.is_empty());
    }

    #[test]
    fn no_fields_never_matches_non_blank_query() {
        let items = products();
        let found = apply_search(&items, &SearchSpec::new("dell", Vec::<String>::new()), accessor);
        assert!(found.is_empty());
    }
}
