//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Método de precificação desconhecido: {0}")]
    UnknownPricingMode(String),

    #[error("Segmento desconhecido: {0}")]
    UnknownSegment(String),

    #[error("Item inexistente no orçamento: #{0}")]
    ItemIndex(usize),

    #[error("Selecione um cliente")]
    MissingClient,

    #[error("Adicione pelo menos um item ao orçamento")]
    EmptyQuote,
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
