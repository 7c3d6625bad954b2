pub mod client;
pub mod error;
pub mod model_trim;
pub mod options;
mod retry;
pub mod types;

pub use client::ClassifierClient;
pub use error::NormalizeError;
pub use model_trim::{fallback_model_trim, normalize_model_trim};
pub use options::{fallback_split, normalize_options};
pub use types::ModelTrim;
