//! 見積明細の型定義
//!
//! - PricingMode: 価格計算方式（m²・メートル・固定・単位）
//! - Pricing: 方式ごとの寸法を持つタグ付きユニオン
//! - QuoteLineItem: 確定した見積明細（永続化される形）

use crate::engine::PricingInputs;
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// 価格計算方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    /// 面積 × 単価
    #[serde(rename = "m2")]
    Area,
    /// 長さ × 単価
    Linear,
    /// 合計を直接入力
    Fixed,
    /// 数量 × 単価
    #[default]
    Unit,
}

impl PricingMode {
    pub const ALL: [PricingMode; 4] = [
        PricingMode::Area,
        PricingMode::Linear,
        PricingMode::Fixed,
        PricingMode::Unit,
    ];

    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            PricingMode::Area => "Por m² (Metro Quadrado)",
            PricingMode::Linear => "Por Metro Linear",
            PricingMode::Fixed => "Preço Fixo (Manual)",
            PricingMode::Unit => "Por Unidade",
        }
    }

    /// 永続化キー
    pub fn key(&self) -> &'static str {
        match self {
            PricingMode::Area => "m2",
            PricingMode::Linear => "linear",
            PricingMode::Fixed => "fixed",
            PricingMode::Unit => "unit",
        }
    }
}

impl std::str::FromStr for PricingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m2" | "m²" | "area" => Ok(PricingMode::Area),
            "linear" | "ml" | "metro" => Ok(PricingMode::Linear),
            "fixed" | "fixo" | "manual" => Ok(PricingMode::Fixed),
            "unit" | "un" | "unidade" => Ok(PricingMode::Unit),
            _ => Err(Error::UnknownPricingMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for PricingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// m²方式の寸法
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaDimensions {
    pub width: f64,
    pub height: f64,
    /// width × height（両方が正のときのみ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
}

/// 固定・単位方式で参考として記録する寸法
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measured {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// 方式ごとの寸法
///
/// `None` は業種が寸法を添付しないことを表す。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pricingMethod", rename_all = "lowercase")]
pub enum Pricing {
    #[serde(rename = "m2")]
    Area {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dimensions: Option<AreaDimensions>,
    },
    Linear {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        length: Option<f64>,
    },
    Fixed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        measured: Option<Measured>,
    },
    Unit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        measured: Option<Measured>,
    },
}

impl Pricing {
    pub fn mode(&self) -> PricingMode {
        match self {
            Pricing::Area { .. } => PricingMode::Area,
            Pricing::Linear { .. } => PricingMode::Linear,
            Pricing::Fixed { .. } => PricingMode::Fixed,
            Pricing::Unit { .. } => PricingMode::Unit,
        }
    }

    /// 幅（メートル方式では長さ）
    pub fn width(&self) -> Option<f64> {
        match self {
            Pricing::Area { dimensions } => dimensions.map(|d| d.width),
            Pricing::Linear { length } => *length,
            Pricing::Fixed { measured } | Pricing::Unit { measured } => {
                measured.and_then(|m| m.width)
            }
        }
    }

    pub fn height(&self) -> Option<f64> {
        match self {
            Pricing::Area { dimensions } => dimensions.map(|d| d.height),
            Pricing::Linear { .. } => None,
            Pricing::Fixed { measured } | Pricing::Unit { measured } => {
                measured.and_then(|m| m.height)
            }
        }
    }

    pub fn area(&self) -> Option<f64> {
        match self {
            Pricing::Area { dimensions } => dimensions.and_then(|d| d.area),
            _ => None,
        }
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Pricing::Unit { measured: None }
    }
}

/// ガラス・枠の仕様（ガラス業のみ）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlassSpec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub glass_color: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub glass_thickness: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub profile_color: String,
}

impl GlassSpec {
    pub fn is_empty(&self) -> bool {
        self.glass_color.is_empty()
            && self.glass_thickness.is_empty()
            && self.profile_color.is_empty()
    }
}

/// 確定した見積明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLineItem {
    /// カタログのクイック追加で作られた明細のサービスID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,

    pub service_name: String,

    #[serde(default = "default_quantity")]
    pub quantity: f64,

    #[serde(default)]
    pub unit_price: f64,

    #[serde(default)]
    pub total: f64,

    #[serde(flatten)]
    pub pricing: Pricing,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glass: Option<GlassSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// 施工明細エディタで作成された明細
    #[serde(default)]
    pub is_installation: bool,
}

fn default_quantity() -> f64 {
    1.0
}

impl QuoteLineItem {
    pub fn mode(&self) -> PricingMode {
        self.pricing.mode()
    }

    /// 計算式に戻すための入力値
    pub fn pricing_inputs(&self) -> PricingInputs {
        PricingInputs {
            width: self.pricing.width().unwrap_or(0.0),
            height: self.pricing.height().unwrap_or(0.0),
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area_item() -> QuoteLineItem {
        QuoteLineItem {
            service_id: None,
            service_name: "Box Padrão".to_string(),
            quantity: 1.0,
            unit_price: 150.0,
            total: 450.0,
            pricing: Pricing::Area {
                dimensions: Some(AreaDimensions { width: 2.0, height: 1.5, area: Some(3.0) }),
            },
            glass: Some(GlassSpec { glass_color: "Verde".into(), ..Default::default() }),
            category: None,
            model: None,
            is_installation: true,
        }
    }

    #[test]
    fn test_pricing_mode_from_str() {
        assert_eq!("m2".parse::<PricingMode>().unwrap(), PricingMode::Area);
        assert_eq!("LINEAR".parse::<PricingMode>().unwrap(), PricingMode::Linear);
        assert_eq!("fixo".parse::<PricingMode>().unwrap(), PricingMode::Fixed);
        assert_eq!(" unit ".parse::<PricingMode>().unwrap(), PricingMode::Unit);
    }

    #[test]
    fn test_pricing_mode_unknown_is_error() {
        let err = "m3".parse::<PricingMode>().unwrap_err();
        assert!(matches!(err, Error::UnknownPricingMode(ref s) if s == "m3"));
    }

    #[test]
    fn test_line_item_serialize() {
        let json = serde_json::to_string(&area_item()).expect("シリアライズ失敗");
        assert!(json.contains("\"serviceName\":\"Box Padrão\""));
        assert!(json.contains("\"pricingMethod\":\"m2\""));
        assert!(json.contains("\"area\":3.0"));
        assert!(json.contains("\"glassColor\":\"Verde\""));
        assert!(!json.contains("glassThickness"));
        assert!(json.contains("\"isInstallation\":true"));
    }

    #[test]
    fn test_line_item_deserialize() {
        let json = r#"{
            "serviceName": "Guarda-corpo",
            "unitPrice": 50,
            "total": 550,
            "quantity": 2,
            "pricingMethod": "linear",
            "length": 5.5
        }"#;
        let item: QuoteLineItem = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(item.mode(), PricingMode::Linear);
        assert_eq!(item.pricing.width(), Some(5.5));
        assert_eq!(item.pricing.height(), None);
        assert!(!item.is_installation);
    }

    #[test]
    fn test_line_item_deserialize_unknown_method_fails() {
        let json = r#"{"serviceName": "X", "pricingMethod": "m3"}"#;
        assert!(serde_json::from_str::<QuoteLineItem>(json).is_err());
    }

    #[test]
    fn test_pricing_inputs_from_item() {
        let inputs = area_item().pricing_inputs();
        assert_eq!(inputs.width, 2.0);
        assert_eq!(inputs.height, 1.5);
        assert_eq!(inputs.quantity, 1.0);
        assert_eq!(inputs.unit_price, 150.0);
    }
}
