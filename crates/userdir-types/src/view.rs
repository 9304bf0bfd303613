use serde::{Deserialize, Serialize};

use crate::{ListQuery, Theme, User};

/// One page of the filtered and sorted record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageView {
    pub users: Vec<User>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
    pub page_size: usize,
}

impl PageView {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Everything needed to render one frame of the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryView {
    pub list: PageView,
    pub query: ListQuery,
    pub theme: Theme,
    pub can_prev: bool,
    pub can_next: bool,
    pub loaded_records: usize,
}
