pub mod analyzer;
pub mod fetcher;
pub mod parser;
pub mod recommend;
pub mod report;

pub use crate::domain::model::{FetchQuery, Price, Recommendation, Requirement, ThemeRecord};
pub use crate::domain::ports::ThemeSource;
pub use crate::utils::error::Result;
