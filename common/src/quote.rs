//! 見積（明細の順序付きリスト）
//!
//! 編集セッションが所有する明細リストと小計・値引き・合計。

use crate::catalog::CatalogService;
use crate::error::{Error, Result};
use crate::engine::{compute_total, effective_quantity};
use crate::types::{Pricing, PricingMode, QuoteLineItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 見積の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Approved,
    Cancelled,
}

impl QuoteStatus {
    pub fn label(&self) -> &'static str {
        match self {
            QuoteStatus::Draft => "Rascunho",
            QuoteStatus::Sent => "Enviado",
            QuoteStatus::Approved => "Aprovado",
            QuoteStatus::Cancelled => "Cancelado",
        }
    }
}

impl std::str::FromStr for QuoteStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "draft" | "rascunho" => Ok(QuoteStatus::Draft),
            "sent" | "enviado" => Ok(QuoteStatus::Sent),
            "approved" | "aprovado" => Ok(QuoteStatus::Approved),
            "cancelled" | "cancelado" => Ok(QuoteStatus::Cancelled),
            _ => Err(Error::Parse(format!("status desconhecido: {}", s))),
        }
    }
}

/// 行の合計を方式の計算式で再計算する
///
/// 寸法が記録されていない行（寸法を持たない業種）は 数量 × 単価。
fn reprice(item: &mut QuoteLineItem) {
    let inputs = item.pricing_inputs();
    let mode = match item.mode() {
        PricingMode::Area if inputs.width > 0.0 && inputs.height > 0.0 => PricingMode::Area,
        PricingMode::Linear if inputs.width > 0.0 => PricingMode::Linear,
        PricingMode::Fixed => PricingMode::Fixed,
        _ => PricingMode::Unit,
    };
    item.total = compute_total(mode, &inputs, item.total);
    if mode == PricingMode::Fixed {
        item.unit_price = item.total;
    }
}

/// 見積
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[serde(default)]
    pub client_id: String,

    #[serde(default)]
    pub client_name: String,

    #[serde(default)]
    pub items: Vec<QuoteLineItem>,

    #[serde(default)]
    pub discount: f64,

    #[serde(default)]
    pub status: QuoteStatus,

    #[serde(default)]
    pub paid: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Quote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: QuoteLineItem) {
        log::debug!("明細追加 #{}: {}", self.items.len(), item.service_name);
        self.items.push(item);
    }

    /// カタログのサービスを数量1・既定単価で追加
    pub fn add_service(&mut self, service: &CatalogService) {
        let price = service.default_price.unwrap_or(0.0);
        self.add_item(QuoteLineItem {
            service_id: Some(service.id.clone()),
            service_name: service.name.clone(),
            quantity: 1.0,
            unit_price: price,
            total: price,
            pricing: Pricing::Unit { measured: None },
            glass: None,
            category: None,
            model: None,
            is_installation: false,
        });
    }

    fn item_mut(&mut self, index: usize) -> Result<&mut QuoteLineItem> {
        self.items.get_mut(index).ok_or(Error::ItemIndex(index))
    }

    /// 行の数量を変更（0以下は1）
    pub fn update_quantity(&mut self, index: usize, quantity: f64) -> Result<()> {
        let item = self.item_mut(index)?;
        item.quantity = effective_quantity(quantity);
        reprice(item);
        Ok(())
    }

    /// 行の単価を変更（負数は0）
    ///
    /// 固定方式の行では単価がそのまま合計になる。
    pub fn update_unit_price(&mut self, index: usize, unit_price: f64) -> Result<()> {
        let item = self.item_mut(index)?;
        let unit_price = if unit_price.is_finite() { unit_price.max(0.0) } else { 0.0 };
        item.unit_price = unit_price;
        if item.mode() == PricingMode::Fixed {
            item.total = unit_price;
        }
        reprice(item);
        Ok(())
    }

    /// 既存行を編集結果で置き換える
    pub fn replace_item(&mut self, index: usize, item: QuoteLineItem) -> Result<()> {
        *self.item_mut(index)? = item;
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> Result<QuoteLineItem> {
        if index >= self.items.len() {
            return Err(Error::ItemIndex(index));
        }
        Ok(self.items.remove(index))
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(|item| item.total).sum()
    }

    /// 小計 − 値引き
    pub fn total(&self) -> f64 {
        self.subtotal() - self.discount
    }

    /// 保存前の検査（顧客と明細が必要）
    pub fn validate_for_save(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(Error::MissingClient);
        }
        if self.items.is_empty() {
            return Err(Error::EmptyQuote);
        }
        Ok(())
    }

    /// 保存時刻を記録する
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
        self.updated_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::AreaDimensions;

    fn quote_with_services() -> Quote {
        let catalog = Catalog::builtin();
        let mut quote = Quote::new();
        quote.add_service(catalog.find_quick_service("troca-roldanas").unwrap());
        quote.add_service(catalog.find_quick_service("visita-tecnica").unwrap());
        quote
    }

    #[test]
    fn test_add_service_uses_default_price() {
        let quote = quote_with_services();
        assert_eq!(quote.items.len(), 2);
        assert_eq!(quote.items[0].service_id.as_deref(), Some("troca-roldanas"));
        assert_eq!(quote.items[0].total, 50.0);
        assert_eq!(quote.subtotal(), 200.0);
    }

    #[test]
    fn test_update_row_recomputes_total() {
        let mut quote = quote_with_services();
        quote.update_quantity(0, 4.0).unwrap();
        assert_eq!(quote.items[0].total, 200.0);
        quote.update_unit_price(0, 45.0).unwrap();
        assert_eq!(quote.items[0].total, 180.0);
        assert_eq!(quote.subtotal(), 330.0);
    }

    fn area_row() -> QuoteLineItem {
        QuoteLineItem {
            service_id: None,
            service_name: "Box Padrão".into(),
            quantity: 1.0,
            unit_price: 150.0,
            total: 450.0,
            pricing: Pricing::Area {
                dimensions: Some(AreaDimensions { width: 2.0, height: 1.5, area: Some(3.0) }),
            },
            glass: None,
            category: None,
            model: None,
            is_installation: true,
        }
    }

    #[test]
    fn test_update_area_row_keeps_dimensions() {
        let mut quote = Quote::new();
        quote.add_item(area_row());
        quote.update_quantity(0, 2.0).unwrap();
        assert_eq!(quote.items[0].total, 900.0);
        quote.update_unit_price(0, 200.0).unwrap();
        assert_eq!(quote.items[0].total, 1200.0);
    }

    #[test]
    fn test_update_quantity_floors_at_one() {
        let mut quote = Quote::new();
        quote.add_item(area_row());
        for quantity in [0.0, -3.0, f64::NAN] {
            quote.update_quantity(0, quantity).unwrap();
            assert_eq!(quote.items[0].quantity, 1.0);
            assert_eq!(quote.items[0].total, 450.0);
        }
    }

    #[test]
    fn test_update_unit_price_never_negative() {
        let mut quote = quote_with_services();
        quote.update_unit_price(0, -45.0).unwrap();
        assert_eq!(quote.items[0].unit_price, 0.0);
        assert_eq!(quote.items[0].total, 0.0);
    }

    #[test]
    fn test_update_row_without_dimensions_uses_quantity_times_price() {
        let mut row = area_row();
        row.pricing = Pricing::Area { dimensions: None };
        let mut quote = Quote::new();
        quote.add_item(row);
        quote.update_quantity(0, 3.0).unwrap();
        assert_eq!(quote.items[0].total, 450.0);
    }

    #[test]
    fn test_update_fixed_row() {
        let mut row = area_row();
        row.pricing = Pricing::Fixed { measured: None };
        row.unit_price = 450.0;
        let mut quote = Quote::new();
        quote.add_item(row);

        quote.update_quantity(0, 5.0).unwrap();
        assert_eq!(quote.items[0].total, 450.0);
        assert_eq!(quote.items[0].unit_price, 450.0);

        quote.update_unit_price(0, 520.0).unwrap();
        assert_eq!(quote.items[0].total, 520.0);
        assert_eq!(quote.items[0].unit_price, 520.0);
    }

    #[test]
    fn test_discount() {
        let mut quote = quote_with_services();
        quote.discount = 20.0;
        assert_eq!(quote.total(), 180.0);
    }

    #[test]
    fn test_remove_and_out_of_range() {
        let mut quote = quote_with_services();
        let removed = quote.remove_item(0).unwrap();
        assert_eq!(removed.service_name, "Troca de Roldanas");
        assert_eq!(quote.items.len(), 1);
        assert!(matches!(quote.remove_item(5), Err(Error::ItemIndex(5))));
        assert!(matches!(quote.update_quantity(3, 1.0), Err(Error::ItemIndex(3))));
    }

    #[test]
    fn test_validate_for_save() {
        let mut quote = Quote::new();
        assert!(matches!(quote.validate_for_save(), Err(Error::MissingClient)));
        quote.client_id = "c1".into();
        assert!(matches!(quote.validate_for_save(), Err(Error::EmptyQuote)));
        quote.add_service(&Catalog::builtin().quick_services[0]);
        assert!(quote.validate_for_save().is_ok());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("aprovado".parse::<QuoteStatus>().unwrap(), QuoteStatus::Approved);
        assert!("perdido".parse::<QuoteStatus>().is_err());
    }
}
