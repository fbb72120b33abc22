use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    InputData,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::IoError(_) => ErrorCategory::System,
            ConvertError::SerializationError(_) => ErrorCategory::InputData,
            ConvertError::ConfigValidationError { .. }
            | ConvertError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::System => ErrorSeverity::Critical,
            ErrorCategory::InputData => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ConvertError::IoError(_) => {
                "入力ファイルのパスと出力先ディレクトリの書き込み権限を確認してください".to_string()
            }
            ConvertError::SerializationError(_) => {
                "kindle.json が Kindle ライブラリエクスポート (ブック配列) か確認してください"
                    .to_string()
            }
            ConvertError::ConfigValidationError { .. }
            | ConvertError::InvalidConfigValueError { .. } => {
                "--help でオプションを確認するか、設定ファイルを見直してください".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::IoError(e) => format!("ファイルの読み書きに失敗しました: {}", e),
            ConvertError::SerializationError(e) => format!("JSON の解析に失敗しました: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
