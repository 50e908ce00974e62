//! Quote Pricing Common Library
//!
//! 見積明細の価格計算エンジン（I/Oなし）。CLIと将来のフロントエンドで共有する。

pub mod types;
pub mod error;
pub mod number;
pub mod segment;
pub mod engine;
pub mod validation;
pub mod editor;
pub mod catalog;
pub mod quote;
pub mod finance;

pub use types::{AreaDimensions, GlassSpec, Measured, Pricing, PricingMode, QuoteLineItem};
pub use error::{Error, Result};
pub use number::{format_currency, normalize_numeric_input, parse_currency_input, to_display};
pub use segment::{Segment, SegmentClass};
pub use engine::{compute_total, effective_quantity, recompute, PricingInputs, TotalState};
pub use validation::{validate_for_save, LineItemDraft, MissingFields, ValidationError};
pub use editor::{ItemEditor, ServiceSelection};
pub use catalog::{builder_service_name, Catalog, CatalogService, ServiceKind};
pub use quote::{Quote, QuoteStatus};
pub use finance::{Expense, ExpenseCategory, FinancePeriod, FinanceSummary};
