//! The reusable client-side search filter.
//!
//! Every list view funnels through the same helper: a record exposes its
//! searchable fields as strings, and the filter keeps the records whose
//! any field contains the query, case-insensitively.

/// The fixed set of searchable fields of a record, stringified.
pub trait SearchFields {
    fn search_fields(&self) -> Vec<String>;
}

/// Case-insensitive substring filter over a record sequence.
///
/// An empty query returns the input unchanged. The output is always a
/// subsequence of the input in the original order.
pub fn filter_by_query<'a, T: SearchFields>(items: &'a [T], query: &str) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }
    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| {
            item.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Record {
        name: &'static str,
        amount: u64,
    }

    impl SearchFields for Record {
        fn search_fields(&self) -> Vec<String> {
            vec![self.name.to_string(), self.amount.to_string()]
        }
    }

    fn records() -> Vec<Record> {
        vec![
            Record { name: "Spotify", amount: 10 },
            Record { name: "Netflix", amount: 15 },
            Record { name: "Audible", amount: 10 },
        ]
    }

    #[test]
    fn empty_query_returns_input_unchanged() {
        let input = records();
        let out = filter_by_query(&input, "");
        assert_eq!(out.len(), input.len());
        for (filtered, original) in out.iter().zip(&input) {
            assert!(std::ptr::eq(*filtered, original));
        }
    }

    #[test]
    fn unmatched_query_returns_empty() {
        let input = records();
        assert!(filter_by_query(&input, "hbo").is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let input = records();
        let out = filter_by_query(&input, "SPOT");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Spotify");
    }

    #[test]
    fn numeric_fields_match_their_stringified_form() {
        let input = records();
        let out = filter_by_query(&input, "10");
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn output_preserves_input_order() {
        let input = records();
        // "i" hits Spotify, Netflix and Audible alike
        let out = filter_by_query(&input, "i");
        let names: Vec<_> = out.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Spotify", "Netflix", "Audible"]);
    }
}
