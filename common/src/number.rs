//! 数値入力の正規化
//!
//! 入力途中の空欄・不正文字列はエラーにせず 0 として扱う。
//! 必須項目の欠落は保存時のバリデーションで報告する。

use regex::Regex;

lazy_static::lazy_static! {
    // 先頭の数値部分（"12abc" → "12"）
    static ref NUMERIC_PREFIX_RE: Regex =
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap();
    // 千の位区切り
    static ref THOUSANDS_RE: Regex = Regex::new(r"(\d)(\d{3})$").unwrap();
}

/// テキスト入力を数値に変換する
///
/// 空文字・数値として読めない文字列・有限でない値は 0 になる。
/// 先頭の数値部分だけを読むので `"2.5m"` は `2.5` になる。
///
/// # Examples
/// ```
/// use quote_pricing_common::normalize_numeric_input;
///
/// assert_eq!(normalize_numeric_input(""), 0.0);
/// assert_eq!(normalize_numeric_input("150"), 150.0);
/// assert_eq!(normalize_numeric_input("abc"), 0.0);
/// ```
pub fn normalize_numeric_input(raw: &str) -> f64 {
    NUMERIC_PREFIX_RE
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// 数値を入力欄の表示用文字列にする（0 は空欄）
pub fn to_display(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        String::new()
    } else {
        value.to_string()
    }
}

/// pt-BR形式の金額入力（"1.234,56"）を数値に変換する
///
/// 数字とカンマ以外は捨て、カンマを小数点として扱う。
pub fn parse_currency_input(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    normalize_numeric_input(&cleaned.replacen(',', ".", 1))
}

/// 金額をpt-BR形式（"1.234,56"）に整形する
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = int_part.to_string();
    let mut tail = String::new();
    while let Some(caps) = THOUSANDS_RE.captures(&grouped) {
        let head_len = grouped.len() - 3;
        tail = format!(".{}{}", &caps[2], tail);
        grouped.truncate(head_len);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{},{}", sign, grouped, tail, dec_part)
}
