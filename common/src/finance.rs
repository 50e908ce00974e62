//! 財務サマリー
//!
//! 承認済み見積を売上、経費を費用として集計する。

use crate::quote::{Quote, QuoteStatus};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 経費の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Marketing,
    Labor,
    Food,
    Parking,
    Tools,
    Other,
}

impl ExpenseCategory {
    /// 分類キーから判定（表記ゆれを吸収）
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "marketing" => ExpenseCategory::Marketing,
            "mao-de-obra" | "mão de obra" => ExpenseCategory::Labor,
            "alimentacao" | "alimentação" => ExpenseCategory::Food,
            "estacionamento" => ExpenseCategory::Parking,
            "ferramentas" => ExpenseCategory::Tools,
            _ => ExpenseCategory::Other,
        }
    }
}

/// 経費
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Expense {
    pub amount: f64,
    pub category: String,
    pub paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// 集計期間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinancePeriod {
    #[default]
    Month,
    Year,
}

impl FinancePeriod {
    /// 基準日と同じ月（年）か。日付のない記録は常に含める。
    fn contains(&self, date: Option<NaiveDate>, reference: NaiveDate) -> bool {
        let Some(date) = date else {
            return true;
        };
        match self {
            FinancePeriod::Month => date.year() == reference.year() && date.month() == reference.month(),
            FinancePeriod::Year => date.year() == reference.year(),
        }
    }
}

impl std::str::FromStr for FinancePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "month" | "mes" | "mês" => Ok(FinancePeriod::Month),
            "year" | "ano" => Ok(FinancePeriod::Year),
            _ => Err(format!("Unknown period: {}. Use month or year", s)),
        }
    }
}

/// 財務サマリー
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    /// 売上（承認済み見積の合計）
    pub revenue: f64,
    pub receivable: f64,
    pub received: f64,
    pub expenses_to_pay: f64,
    pub expenses_paid: f64,
    pub net_profit: f64,
    /// 純利益率（%）
    pub net_margin: f64,
    /// 粗利益率（%）
    pub gross_margin: f64,
    pub marketing: f64,
    pub labor: f64,
    pub food: f64,
    pub parking: f64,
    pub tools: f64,
    pub other_expenses: f64,
}

fn quote_date(quote: &Quote) -> Option<NaiveDate> {
    quote
        .updated_at
        .or(quote.created_at)
        .map(|at: DateTime<Utc>| at.date_naive())
}

impl FinanceSummary {
    /// 見積と経費から集計する
    ///
    /// # Arguments
    /// * `quotes` - 見積一覧（承認済みのみ売上に計上）
    /// * `expenses` - 経費一覧
    /// * `period` - 集計期間
    /// * `reference` - 期間の基準日
    pub fn compute(
        quotes: &[Quote],
        expenses: &[Expense],
        period: FinancePeriod,
        reference: NaiveDate,
    ) -> Self {
        let mut summary = Self::default();

        for quote in quotes
            .iter()
            .filter(|q| q.status == QuoteStatus::Approved)
            .filter(|q| period.contains(quote_date(q), reference))
        {
            let total = quote.total();
            summary.revenue += total;
            if quote.paid {
                summary.received += total;
            } else {
                summary.receivable += total;
            }
        }

        for expense in expenses.iter().filter(|e| period.contains(e.date, reference)) {
            let amount = expense.amount;
            if expense.paid {
                summary.expenses_paid += amount;
            } else {
                summary.expenses_to_pay += amount;
            }

            let bucket = match ExpenseCategory::from_key(&expense.category) {
                ExpenseCategory::Marketing => &mut summary.marketing,
                ExpenseCategory::Labor => &mut summary.labor,
                ExpenseCategory::Food => &mut summary.food,
                ExpenseCategory::Parking => &mut summary.parking,
                ExpenseCategory::Tools => &mut summary.tools,
                ExpenseCategory::Other => &mut summary.other_expenses,
            };
            *bucket += amount;
        }

        let costs = summary.expenses_paid;
        summary.net_profit = summary.revenue - costs - summary.marketing;
        if summary.revenue > 0.0 {
            summary.gross_margin = (summary.revenue - costs) / summary.revenue * 100.0;
            summary.net_margin = summary.net_profit / summary.revenue * 100.0;
        }

        summary
    }
}
