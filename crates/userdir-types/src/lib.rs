mod query;
mod user;
mod view;

pub use query::*;
pub use user::*;
pub use view::*;

pub const DEFAULT_PAGE_SIZE: usize = 12;
