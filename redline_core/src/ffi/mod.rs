mod controller;
mod error;

pub use controller::{
    diff_texts, normalize_json, open_comparison, open_comparison_with_config, ReviewController,
};
pub use error::CoreError;
