pub mod favorites;
pub mod list;
pub mod pagination;

pub use favorites::{FavoriteStore, Favorites};
pub use list::ListState;
pub use pagination::page_window;
