pub mod api;
pub mod config;
pub mod handlers;
pub mod monitoring;
pub mod paragraph;

pub use config::ApiConfig;
pub use paragraph::{split_and_search, Paragraph, SegmentError, SegmentResult};
