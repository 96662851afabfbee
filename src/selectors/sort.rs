//! Sorting of span lists by a caller-chosen key.

use crate::parser::schema::Span;
use crate::utils::error::TraceError;
use std::cmp::Ordering;

/// Sort direction, convertible from the `1` / `-1` convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Flip the ordering for descending sorts
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    pub fn sign(self) -> i8 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }
}

impl TryFrom<i8> for SortDirection {
    type Error = TraceError;

    fn try_from(dir: i8) -> Result<Self, Self::Error> {
        match dir {
            1 => Ok(Self::Ascending),
            -1 => Ok(Self::Descending),
            other => Err(TraceError::InvalidArgument(format!(
                "sort direction must be 1 or -1, got {}",
                other
            ))),
        }
    }
}

/// How to order a span list
///
/// `selector` extracts the key of each span once, `comparator` orders two
/// keys, and `dir` flips the result for descending sorts.
#[derive(Debug, Clone, Copy)]
pub struct SpanSort<S, C> {
    pub dir: SortDirection,
    pub comparator: C,
    pub selector: S,
}

impl<K, S, C> SpanSort<S, C>
where
    S: Fn(&Span) -> K,
    C: Fn(&K, &K) -> Ordering,
{
    pub fn new(dir: SortDirection, comparator: C, selector: S) -> Self {
        Self {
            dir,
            comparator,
            selector,
        }
    }
}

/// Return the spans in a new order; the input slice is left untouched
///
/// The sort is stable: spans with equal keys keep their relative order in
/// both directions.
pub fn sorted_spans<'a, K, S, C>(spans: &'a [Span], sort: &SpanSort<S, C>) -> Vec<&'a Span>
where
    S: Fn(&Span) -> K,
    C: Fn(&K, &K) -> Ordering,
{
    let mut keyed: Vec<(K, &'a Span)> = spans
        .iter()
        .map(|span| ((sort.selector)(span), span))
        .collect();

    keyed.sort_by(|a, b| sort.dir.apply((sort.comparator)(&a.0, &b.0)));

    keyed.into_iter().map(|(_, span)| span).collect()
}

/// Numeric ascending comparator; incomparable values (NaN) count as equal
pub fn number_sort_comparator<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Case-insensitive string comparator, ties broken by exact comparison
pub fn string_sort_comparator<T: AsRef<str>>(a: &T, b: &T) -> Ordering {
    let (a, b) = (a.as_ref(), b.as_ref());
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_sign() {
        assert_eq!(SortDirection::try_from(1).unwrap(), SortDirection::Ascending);
        assert_eq!(SortDirection::try_from(-1).unwrap(), SortDirection::Descending);
        assert!(matches!(
            SortDirection::try_from(0),
            Err(TraceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_string_comparator() {
        let mut names = vec!["beta".to_string(), "Alpha".to_string(), "alpha".to_string()];
        names.sort_by(string_sort_comparator);
        assert_eq!(names, vec!["Alpha", "alpha", "beta"]);
    }

    #[test]
    fn test_stable_in_both_directions() {
        let spans = vec![
            Span::new("a", "p", "op", 5, 1),
            Span::new("b", "p", "op", 1, 1),
            Span::new("c", "p", "op", 5, 1),
        ];

        let asc = SpanSort::new(SortDirection::Ascending, number_sort_comparator, |s: &Span| {
            s.start_time
        });
        let ids: Vec<&str> = sorted_spans(&spans, &asc)
            .iter()
            .map(|s| s.span_id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a", "c"]);

        let desc = SpanSort {
            dir: SortDirection::Descending,
            ..asc
        };
        let ids: Vec<&str> = sorted_spans(&spans, &desc)
            .iter()
            .map(|s| s.span_id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }
}
