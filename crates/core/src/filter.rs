//! Pure client-side filter/search projection.
//!
//! Narrows an in-memory item list by type and by a case-insensitive
//! substring match over title, content, and tags. Synchronous and
//! side-effect free; callers recompute on every input change. List sizes
//! are bounded by what has been paged in, so no memoization is needed.

use crate::item::ItemType;

/// Type narrowing applied before the text query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(ItemType),
}

impl TypeFilter {
    /// Parse a filter label: `"all"` or one of the item type labels.
    pub fn parse(label: &str) -> Option<Self> {
        if label == "all" {
            Some(TypeFilter::All)
        } else {
            ItemType::parse(label).map(TypeFilter::Only)
        }
    }

    fn matches(self, type_label: &str) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(ty) => type_label == ty.as_str(),
        }
    }
}

/// Record shape the projection needs; implemented by the stored item row.
pub trait Searchable {
    fn type_label(&self) -> &str;
    fn title(&self) -> &str;
    fn content(&self) -> &str;
    fn tags(&self) -> &[String];
}

/// Return the ordered subsequence of `items` matching the filter and query.
///
/// An empty (or all-whitespace) query matches everything that passes the
/// type filter. Otherwise the query must appear, case-insensitively, in the
/// title, the content, or at least one tag.
pub fn filter_items<'a, T: Searchable>(
    items: &'a [T],
    filter: TypeFilter,
    query: &str,
) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|item| filter.matches(item.type_label()))
        .filter(|item| needle.is_empty() || matches_query(*item, &needle))
        .collect()
}

/// `needle` must already be lowercased and non-empty.
fn matches_query<T: Searchable>(item: &T, needle: &str) -> bool {
    item.title().to_lowercase().contains(needle)
        || item.content().to_lowercase().contains(needle)
        || item
            .tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestItem {
        label: &'static str,
        title: &'static str,
        content: &'static str,
        tags: Vec<String>,
    }

    impl Searchable for TestItem {
        fn type_label(&self) -> &str {
            self.label
        }
        fn title(&self) -> &str {
            self.title
        }
        fn content(&self) -> &str {
            self.content
        }
        fn tags(&self) -> &[String] {
            &self.tags
        }
    }

    fn item(label: &'static str, title: &'static str, tags: &[&str]) -> TestItem {
        TestItem {
            label,
            title,
            content: "",
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    #[test]
    fn test_type_filter_returns_exact_subset_in_order() {
        let items = vec![
            item("bookmark", "a", &[]),
            item("note", "b", &[]),
            item("code", "c", &[]),
            item("code", "d", &[]),
        ];
        let matched = filter_items(&items, TypeFilter::Only(ItemType::Code), "");
        let titles: Vec<&str> = matched.iter().map(|i| i.title()).collect();
        assert_eq!(titles, vec!["c", "d"]);
    }

    #[test]
    fn test_tag_search_is_case_insensitive() {
        let items = vec![
            item("note", "first", &["react", "ui"]),
            item("note", "second", &["vue"]),
        ];
        let matched = filter_items(&items, TypeFilter::All, "react");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title(), "first");

        let matched = filter_items(&items, TypeFilter::All, "REACT");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title(), "first");
    }

    #[test]
    fn test_query_matches_title_and_content() {
        let items = vec![
            TestItem {
                label: "note",
                title: "Weekly sync",
                content: "discuss roadmap",
                tags: vec![],
            },
            TestItem {
                label: "note",
                title: "Groceries",
                content: "milk, eggs",
                tags: vec![],
            },
        ];
        assert_eq!(filter_items(&items, TypeFilter::All, "SYNC").len(), 1);
        assert_eq!(filter_items(&items, TypeFilter::All, "roadmap").len(), 1);
        assert_eq!(filter_items(&items, TypeFilter::All, "absent").len(), 0);
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let items = vec![item("note", "a", &[]), item("code", "b", &[])];
        assert_eq!(filter_items(&items, TypeFilter::All, "  ").len(), 2);
    }

    #[test]
    fn test_parse_filter_labels() {
        assert_eq!(TypeFilter::parse("all"), Some(TypeFilter::All));
        assert_eq!(
            TypeFilter::parse("code"),
            Some(TypeFilter::Only(ItemType::Code))
        );
        assert_eq!(TypeFilter::parse("gist"), None);
    }
}
