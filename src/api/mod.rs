pub mod client;
pub mod traits;
pub mod types;

pub use client::PropertiesClient;
pub use traits::PropertySource;
pub use types::ListQuery;
