pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use core::{engine::ConvertEngine, pipeline::ConvertPipeline, title::extract_groups};
pub use utils::error::{ConvertError, Result};
