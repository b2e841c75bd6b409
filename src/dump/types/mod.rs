pub mod error;
pub mod models;
pub mod word_type;
