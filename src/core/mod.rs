pub mod etl;
pub mod pipeline;
pub mod pool;

pub use crate::domain::model::{BatchResult, SourceDocument};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
