//! The filter → sort → paginate pipeline.
//!
//! Every function here is pure. Nothing is cached between calls; callers
//! recompute the visible page from the full record set whenever an input changes.

use tracing::debug;
use userdir_types::{ListQuery, PageView, SortOrder, StatusFilter, User};

use crate::collate::locale_compare;

/// Records whose name contains `query` (case-insensitively) and whose status
/// passes `status`. An empty query passes every record.
pub fn filter_users<'a>(records: &'a [User], query: &str, status: StatusFilter) -> Vec<&'a User> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|user| user.name.to_lowercase().contains(&needle) && status.matches(&user.status))
        .collect()
}

pub fn sort_users(users: &mut [&User], order: SortOrder) {
    match order {
        SortOrder::Asc => users.sort_by(|a, b| locale_compare(&a.name, &b.name)),
        SortOrder::Desc => users.sort_by(|a, b| locale_compare(&b.name, &a.name)),
    }
}

/// Zero when there is nothing to show.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1))
}

/// Items `(page - 1) * page_size .. page * page_size`, cut short at the end of
/// `items`. Pages are 1-based; page 0 and pages past the end are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let size = page_size.max(1);
    let Some(index) = page.checked_sub(1) else {
        return &[];
    };
    let start = index.saturating_mul(size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(items.len());
    &items[start..end]
}

pub fn match_count(records: &[User], query: &ListQuery) -> usize {
    filter_users(records, &query.query, query.status).len()
}

/// Runs the whole pipeline. The requested page is not clamped.
pub fn run(records: &[User], query: &ListQuery, page_size: usize) -> PageView {
    let page_size = page_size.max(1);
    let mut matches = filter_users(records, &query.query, query.status);
    sort_users(&mut matches, query.sort);

    let total_matches = matches.len();
    let total_pages = total_pages(total_matches, page_size);
    let users: Vec<User> = paginate(&matches, query.page, page_size)
        .iter()
        .map(|user| (*user).clone())
        .collect();

    debug!(
        query = %query.query,
        status = %query.status,
        sort = %query.sort,
        page = query.page,
        total_matches,
        total_pages,
        visible = users.len(),
        "Recomputed page"
    );

    PageView {
        users,
        page: query.page,
        total_pages,
        total_matches,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userdir_types::{Status, DEFAULT_PAGE_SIZE};

    fn user(id: i64, name: &str, status: &str) -> User {
        User::new(id, name, status)
    }

    fn names(view: &PageView) -> Vec<&str> {
        view.users.iter().map(|u| u.name.as_str()).collect()
    }

    fn thirteen_active() -> Vec<User> {
        // Shuffled so the sort step has work to do.
        let order = [7, 13, 1, 12, 2, 11, 3, 10, 4, 9, 5, 8, 6];
        order
            .iter()
            .map(|i| user(*i, &format!("U{:02}", i), "Active"))
            .collect()
    }

    fn query(text: &str, status: StatusFilter, sort: SortOrder, page: usize) -> ListQuery {
        ListQuery {
            query: text.to_string(),
            status,
            sort,
            page,
        }
    }

    fn run_asc(records: &[User], text: &str, status: StatusFilter, page: usize) -> PageView {
        run(records, &query(text, status, SortOrder::Asc, page), DEFAULT_PAGE_SIZE)
    }

    #[test]
    fn test_thirteen_records_span_two_pages() {
        let records = thirteen_active();

        let first = run_asc(&records, "", StatusFilter::All, 1);
        let expected: Vec<String> = (1..=12).map(|i| format!("U{:02}", i)).collect();
        assert_eq!(names(&first), expected);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.total_matches, 13);

        let second = run_asc(&records, "", StatusFilter::All, 2);
        assert_eq!(names(&second), vec!["U13"]);
        assert_eq!(second.total_pages, 2);
    }

    #[test]
    fn test_status_filter_selects_active_only() {
        let records = vec![user(1, "Bob", "Inactive"), user(2, "Alice", "Active")];
        let view = run_asc(&records, "", StatusFilter::Active, 1);
        assert_eq!(names(&view), vec!["Alice"]);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn test_empty_record_set() {
        let view = run(&[], &ListQuery::default(), DEFAULT_PAGE_SIZE);
        assert!(view.is_empty());
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.total_matches, 0);
    }

    #[test]
    fn test_query_matching_nothing() {
        let records = thirteen_active();
        let view = run_asc(&records, "zzz", StatusFilter::All, 1);
        assert!(view.is_empty());
        assert_eq!(view.total_pages, 0);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = vec![user(1, "alice smith", "Active"), user(2, "Bob", "Active")];
        let matches = filter_users(&records, "ALICE", StatusFilter::All);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "alice smith");

        let matches = filter_users(&records, "Smi", StatusFilter::All);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_all_filter_is_no_filter() {
        let records = vec![
            user(1, "A", "Active"),
            user(2, "B", "Inactive"),
            user(3, "C", "Pending"),
        ];
        let all = filter_users(&records, "", StatusFilter::All);
        assert_eq!(all.len(), records.len());
    }

    #[test]
    fn test_unknown_status_matches_no_specific_filter() {
        let records = vec![user(1, "Pat", "Pending")];
        assert!(filter_users(&records, "", StatusFilter::Active).is_empty());
        assert!(filter_users(&records, "", StatusFilter::Inactive).is_empty());
        assert_eq!(records[0].status, Status::Other("Pending".to_string()));
    }

    #[test]
    fn test_desc_is_reverse_of_asc() {
        let records = vec![
            user(1, "delta", "Active"),
            user(2, "Alpha", "Inactive"),
            user(3, "charlie", "Active"),
            user(4, "Bravo", "Active"),
            user(5, "Écho", "Active"),
        ];
        let mut asc = filter_users(&records, "", StatusFilter::All);
        sort_users(&mut asc, SortOrder::Asc);
        let mut desc = filter_users(&records, "", StatusFilter::All);
        sort_users(&mut desc, SortOrder::Desc);

        let asc_names: Vec<&str> = asc.iter().map(|u| u.name.as_str()).collect();
        let mut desc_names: Vec<&str> = desc.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(asc_names, vec!["Alpha", "Bravo", "charlie", "delta", "Écho"]);
        desc_names.reverse();
        assert_eq!(asc_names, desc_names);
    }

    #[test]
    fn test_page_never_exceeds_page_size() {
        let records: Vec<User> = (0..40)
            .map(|i| user(i, &format!("N{:03}", i), "Active"))
            .collect();
        for page in 0..6 {
            let view = run_asc(&records, "", StatusFilter::All, page);
            assert!(view.users.len() <= DEFAULT_PAGE_SIZE);
            assert_eq!(view.total_pages, 4);
        }
    }

    #[test]
    fn test_last_page_is_non_empty_and_past_end_is_empty() {
        let records = thirteen_active();
        let last = run_asc(&records, "", StatusFilter::All, 2);
        assert!(!last.is_empty());

        let past = run_asc(&records, "", StatusFilter::All, 3);
        assert!(past.is_empty());
        assert_eq!(past.page, 3);
        assert_eq!(past.total_pages, 2);
    }

    #[test]
    fn test_run_is_idempotent() {
        let records = thirteen_active();
        let q = query("u1", StatusFilter::Active, SortOrder::Desc, 1);
        assert_eq!(run(&records, &q, DEFAULT_PAGE_SIZE), run(&records, &q, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 12), 0);
        assert_eq!(total_pages(1, 12), 1);
        assert_eq!(total_pages(12, 12), 1);
        assert_eq!(total_pages(13, 12), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_paginate_bounds() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(paginate(&items, 1, 2), &[1, 2]);
        assert_eq!(paginate(&items, 3, 2), &[5]);
        assert!(paginate(&items, 4, 2).is_empty());
        assert!(paginate(&items, 0, 2).is_empty());
        assert!(paginate(&items, usize::MAX, 2).is_empty());
    }
}
