//! quote-pricing
//!
//! 見積明細の入力・価格計算・見積ファイル編集のCLI。計算本体は `quote_pricing_common`。

pub mod cli;
pub mod config;
pub mod editor;
pub mod error;
pub mod report;
pub mod store;
