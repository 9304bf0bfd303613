use tracing::debug;
use userdir_types::{DirectoryView, ListQuery, SortOrder, StatusFilter, Theme, User};

use crate::navigation::{can_go_next, can_go_prev, step_page};
use crate::pipeline;
use crate::theme::ThemeStore;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    QueryChanged(String),
    StatusFilterChanged(StatusFilter),
    SortOrderChanged(SortOrder),
    /// Relative move; clamped to the pages that exist.
    PageChanged(i64),
    ThemeToggled,
    RecordsLoaded(Vec<User>),
}

/// Directory state driven by events. The record set, the list query and the
/// theme store are the only state; views are recomputed on every call.
pub struct Directory<S> {
    records: Vec<User>,
    query: ListQuery,
    page_size: usize,
    theme_store: S,
}

impl<S: ThemeStore> Directory<S> {
    pub fn new(theme_store: S, page_size: usize) -> Self {
        Self {
            records: Vec::new(),
            query: ListQuery::default(),
            page_size: page_size.max(1),
            theme_store,
        }
    }

    pub fn with_query(mut self, query: ListQuery) -> Self {
        self.query = query;
        self
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn theme(&self) -> Theme {
        self.theme_store.get()
    }

    pub fn theme_store(&self) -> &S {
        &self.theme_store
    }

    pub fn update(&mut self, event: Event) -> DirectoryView {
        debug!("Dispatching {}", event_name(&event));
        match event {
            Event::QueryChanged(text) => {
                self.query.query = text;
                self.query.page = 1;
            }
            Event::StatusFilterChanged(status) => {
                self.query.status = status;
                self.query.page = 1;
            }
            Event::SortOrderChanged(order) => {
                self.query.sort = order;
            }
            Event::PageChanged(delta) => {
                let total = pipeline::total_pages(
                    pipeline::match_count(&self.records, &self.query),
                    self.page_size,
                );
                self.query.page = step_page(self.query.page, delta, total);
            }
            Event::ThemeToggled => {
                let next = self.theme_store.get().toggle();
                self.theme_store.set(next);
            }
            Event::RecordsLoaded(records) => {
                self.records = records;
            }
        }
        self.view()
    }

    pub fn view(&self) -> DirectoryView {
        let list = pipeline::run(&self.records, &self.query, self.page_size);
        DirectoryView {
            can_prev: can_go_prev(list.page),
            can_next: can_go_next(list.page, list.total_pages),
            list,
            query: self.query.clone(),
            theme: self.theme_store.get(),
            loaded_records: self.records.len(),
        }
    }
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::QueryChanged(_) => "query-changed",
        Event::StatusFilterChanged(_) => "status-filter-changed",
        Event::SortOrderChanged(_) => "sort-order-changed",
        Event::PageChanged(_) => "page-changed",
        Event::ThemeToggled => "theme-toggled",
        Event::RecordsLoaded(_) => "records-loaded",
    }
}
