//! Search and sort views over the catalog. Nothing here mutates lessons.

use std::cmp::Ordering;

use shared::domain::{Lesson, SortField, SortOrder};

/// `term` must already be lowercase. An empty term matches every lesson.
fn matches_lowercase_term(lesson: &Lesson, term: &str) -> bool {
    lesson.subject.to_lowercase().contains(term)
        || lesson.location.to_lowercase().contains(term)
        || lesson.price.to_string().contains(term)
        || lesson.spaces.to_string().contains(term)
}

/// Case-insensitive substring match against subject, location, price and spaces.
pub fn filter_lessons<'a>(lessons: &'a [Lesson], term: &str) -> Vec<&'a Lesson> {
    let term = term.to_lowercase();
    lessons
        .iter()
        .filter(|lesson| matches_lowercase_term(lesson, &term))
        .collect()
}

pub fn compare_lessons(a: &Lesson, b: &Lesson, field: SortField) -> Ordering {
    match field {
        SortField::Subject => a.subject.cmp(&b.subject),
        SortField::Location => a.location.cmp(&b.location),
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::Spaces => a.spaces.cmp(&b.spaces),
    }
}

/// Stable sort: lessons that compare equal keep catalog order in either direction.
pub fn sort_lessons(lessons: &mut [&Lesson], field: SortField, order: SortOrder) {
    lessons.sort_by(|a, b| {
        let ordering = compare_lessons(a, b, field);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

pub fn sorted_and_filtered<'a>(
    lessons: &'a [Lesson],
    term: &str,
    field: SortField,
    order: SortOrder,
) -> Vec<&'a Lesson> {
    let mut view = filter_lessons(lessons, term);
    sort_lessons(&mut view, field, order);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_lessons;

    fn subjects(view: &[&Lesson]) -> Vec<String> {
        view.iter().map(|l| l.subject.clone()).collect()
    }

    #[test]
    fn location_search_ignores_case() {
        let lessons = seed_lessons();
        for term in ["hendon", "HENDON", "Hendon"] {
            assert_eq!(
                subjects(&filter_lessons(&lessons, term)),
                vec!["Mathematics", "History", "Computer Science"],
                "term {term}"
            );
        }
    }

    #[test]
    fn empty_term_matches_everything() {
        let lessons = seed_lessons();
        assert_eq!(filter_lessons(&lessons, "").len(), lessons.len());
    }

    #[test]
    fn price_and_spaces_are_searchable_as_text() {
        let lessons = seed_lessons();
        assert_eq!(subjects(&filter_lessons(&lessons, "120")), vec!["Computer Science"]);

        // every seed lesson has 5 spaces, and "95" contains "5" as well
        assert_eq!(filter_lessons(&lessons, "5").len(), lessons.len());
        assert!(filter_lessons(&lessons, "zzz").is_empty());
    }

    #[test]
    fn price_descending_puts_computer_science_first() {
        let lessons = seed_lessons();
        let view = sorted_and_filtered(&lessons, "", SortField::Price, SortOrder::Desc);
        assert_eq!(view.first().map(|l| l.subject.as_str()), Some("Computer Science"));
        assert_eq!(view.last().map(|l| l.subject.as_str()), Some("History"));
    }

    #[test]
    fn price_sorts_numerically_not_lexically() {
        let lessons = seed_lessons();
        let view = sorted_and_filtered(&lessons, "", SortField::Price, SortOrder::Asc);
        let prices: Vec<f64> = view.iter().map(|l| l.price).collect();
        assert_eq!(
            prices,
            vec![50.0, 60.0, 70.0, 80.0, 85.0, 90.0, 95.0, 100.0, 110.0, 120.0]
        );
    }

    #[test]
    fn ties_keep_catalog_order_in_both_directions() {
        let lessons = seed_lessons();
        let asc = sorted_and_filtered(&lessons, "", SortField::Location, SortOrder::Asc);
        let hendon: Vec<_> = asc
            .iter()
            .filter(|l| l.location == "Hendon")
            .map(|l| l.id.0)
            .collect();
        assert_eq!(hendon, vec![1, 5, 9]);

        let desc = sorted_and_filtered(&lessons, "", SortField::Location, SortOrder::Desc);
        assert_eq!(desc.first().map(|l| l.location.as_str()), Some("Hendon"));
        assert_eq!(desc.first().map(|l| l.id.0), Some(1));
    }

    #[test]
    fn sorting_filtered_view_only_sees_matches() {
        let lessons = seed_lessons();
        let view = sorted_and_filtered(&lessons, "colindale", SortField::Subject, SortOrder::Asc);
        assert_eq!(subjects(&view), vec!["Economics", "English", "Physics"]);
    }
}
