//! 見積ファイル
//!
//! 見積をJSONファイルに保存する（外部の永続化層の代わり）。

use crate::error::{QuoteError, Result};
use quote_pricing_common::{Expense, Quote};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// 見積を読み込む。ファイルがなければ空の見積。
pub fn load_quote(path: &Path) -> Result<Quote> {
    if !path.exists() {
        log::debug!("新しい見積: {}", path.display());
        return Ok(Quote::new());
    }

    let reader = BufReader::new(File::open(path)?);
    let quote: Quote = serde_json::from_reader(reader)
        .map_err(|e| QuoteError::InvalidQuoteFile(format!("{}: {}", path.display(), e)))?;
    log::debug!("見積を読み込み: {} ({}件)", path.display(), quote.items.len());
    Ok(quote)
}

/// 見積を保存する（更新時刻を記録）
pub fn save_quote(path: &Path, quote: &mut Quote) -> Result<()> {
    quote.touch(chrono::Utc::now());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, quote)?;
    log::info!("見積を保存: {}", path.display());
    Ok(())
}

/// 見積一覧（財務集計用）を読み込む
pub fn load_quotes(path: &Path) -> Result<Vec<Quote>> {
    if !path.exists() {
        return Err(QuoteError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// 経費一覧を読み込む。ファイルがなければ空。
pub fn load_expenses(path: Option<&Path>) -> Result<Vec<Expense>> {
    match path {
        Some(path) if path.exists() => {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        }
        Some(path) => Err(QuoteError::FileNotFound(path.display().to_string())),
        None => Ok(Vec::new()),
    }
}
