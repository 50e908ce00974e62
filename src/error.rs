use quote_pricing_common::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("見積ファイルが不正: {0}")]
    InvalidQuoteFile(String),

    #[error("明細を追加できません: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Common(#[from] quote_pricing_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
