pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OUTPUT_FILENAME: &str = "cosense.json";
pub const DEFAULT_USER_NAME: &str = "Kindle User";
pub const DEFAULT_USER_EMAIL: &str = "user@example.com";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "kindle2cosense")]
#[command(about = "Convert a Kindle library export into a Cosense (Scrapbox) import file")]
pub struct CliConfig {
    /// Kindle ライブラリエクスポート (JSON) のパス
    #[arg(long, default_value = "input/kindle.json")]
    pub input_path: String,

    #[arg(long, default_value = "./build")]
    pub output_path: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_FILENAME)]
    pub output_filename: String,

    #[arg(long, default_value = DEFAULT_USER_NAME)]
    pub user_name: String,

    #[arg(long, default_value = DEFAULT_USER_EMAIL)]
    pub user_email: String,

    /// TOML 設定ファイルから読み込む (指定時はファイル側の値を使う)
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU/memory stats per phase")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_filename(&self) -> &str {
        &self.output_filename
    }

    fn user_name(&self) -> &str {
        &self.user_name
    }

    fn user_email(&self) -> &str {
        &self.user_email
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input_path", &self.input_path)?;
        validate_file_extension("input_path", &self.input_path, &["json"])?;
        validate_path("output_path", &self.output_path)?;
        validate_non_empty_string("output_filename", &self.output_filename)?;
        validate_non_empty_string("user_name", &self.user_name)?;
        validate_non_empty_string("user_email", &self.user_email)?;
        Ok(())
    }
}
