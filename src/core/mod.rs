pub mod engine;
pub mod page;
pub mod pipeline;
pub mod title;

pub use crate::domain::model::{CosenseExport, CosensePage, KindleBook, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
