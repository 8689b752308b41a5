//! Property tests over the grammar and the year-endpoint resolution.

use proptest::prelude::*;

use enumchron::{
    resolve_year_endpoints, DomainValue, EnumchronParser, Field, LetterOrRange, NumberOrRange,
    TransformError, YearEntry,
};

fn safe_letters() -> Vec<char> {
    ('a'..='z').filter(|c| enumchron::is_safe_letter(*c)).collect()
}

proptest! {
    /// A labeled number list survives parsing with its values and order
    /// intact.
    #[test]
    fn number_lists_round_trip(values in prop::collection::vec(1u32..=999, 1..=8)) {
        let body = values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let record = EnumchronParser::new()
            .parse_record(&format!("no. {body}"))
            .unwrap();
        let expected: Vec<NumberOrRange> = values
            .iter()
            .map(|v| NumberOrRange::Number(*v as i64))
            .collect();
        prop_assert_eq!(record.get(Field::Number), Some(&DomainValue::IntList(expected)));
    }

    /// Unlabeled lists of safe letters land in the unknown bucket, in
    /// order.
    #[test]
    fn safe_letter_lists_round_trip(
        letters in prop::collection::vec(prop::sample::select(safe_letters()), 2..=5),
    ) {
        let body = letters
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let record = EnumchronParser::new().parse_record(&body).unwrap();
        let expected: Vec<LetterOrRange> =
            letters.iter().map(|c| LetterOrRange::Letter(*c)).collect();
        prop_assert_eq!(record.unknown(), &[DomainValue::LetterList(expected)][..]);
    }

    /// A 4-digit start with a consecutive 2-digit end is always a dual,
    /// including across a century boundary.
    #[test]
    fn consecutive_shorthand_is_a_dual(first in 1000i32..=2998) {
        let tail = format!("{:02}", (first + 1) % 100);
        let resolved = resolve_year_endpoints(&first.to_string(), &tail).unwrap();
        prop_assert_eq!(resolved, YearEntry::Dual(first, first + 1));
    }

    /// Spans wider than one year are ranges.
    #[test]
    fn wide_spans_are_ranges(first in 1000i32..=2990, gap in 2i32..=9) {
        let last = first + gap;
        let resolved =
            resolve_year_endpoints(&first.to_string(), &last.to_string()).unwrap();
        prop_assert_eq!(resolved, YearEntry::Range(first, last));
    }

    /// Reversed endpoints are refused, never reordered.
    #[test]
    fn reversed_endpoints_are_refused(last in 1000i32..=2998, gap in 1i32..=50) {
        let first = last + gap;
        let err =
            resolve_year_endpoints(&first.to_string(), &last.to_string()).unwrap_err();
        prop_assert_eq!(err, TransformError::AmbiguousYearOrder { first, last });
    }

    /// The fixed two-digit heuristic: an ascending pair reads as 19xx-19xx.
    #[test]
    fn ascending_two_digit_pairs_stay_in_the_1900s(a in 0i32..=98, gap in 1i32..=20) {
        let b = (a + gap).min(99);
        let resolved =
            resolve_year_endpoints(&format!("{a:02}"), &format!("{b:02}")).unwrap();
        prop_assert_eq!(resolved.first(), 1900 + a);
        prop_assert_eq!(resolved.last(), 1900 + b);
    }

    /// And a descending pair reads as a turn-of-century span.
    #[test]
    fn descending_two_digit_pairs_cross_the_century(a in 1i32..=99, gap in 1i32..=20) {
        let b = (a - gap).max(0);
        let resolved =
            resolve_year_endpoints(&format!("{a:02}"), &format!("{b:02}")).unwrap();
        prop_assert_eq!(resolved.first(), 1900 + a);
        prop_assert_eq!(resolved.last(), 2000 + b);
    }
}
