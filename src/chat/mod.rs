pub mod deepseek;
pub mod refine;
pub mod transcript;

pub use deepseek::{CompletionBackend, DeepSeekClient};
pub use refine::{refine_query, RefineError};
pub use transcript::Transcript;
