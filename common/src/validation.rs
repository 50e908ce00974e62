//! 保存時のバリデーション
//!
//! 方式・業種ごとの必須項目を検査し、確定した明細を組み立てる。
//! 失敗時は明細を作らない（部分的な成功はない）。

use crate::engine::{effective_quantity, finalize_total, PricingInputs, TotalState};
use crate::segment::{Segment, SegmentClass};
use crate::types::{AreaDimensions, GlassSpec, Measured, Pricing, PricingMode, QuoteLineItem};
use thiserror::Error;

/// 未入力項目の一覧（表示用ラベル）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(Vec<&'static str>);

impl MissingFields {
    pub fn fields(&self) -> &[&'static str] {
        &self.0
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|f| *f == label)
    }
}

impl std::fmt::Display for MissingFields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.split_last() {
            None => Ok(()),
            Some((last, [])) => write!(f, "{}", last),
            Some((last, rest)) => write!(f, "{} e {}", rest.join(", "), last),
        }
    }
}

/// 保存時のバリデーションエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Selecione ou digite o nome do serviço")]
    MissingServiceName,

    #[error("Digite um valor total válido")]
    InvalidFixedTotal,

    #[error("Preencha {missing}")]
    MissingAreaInputs { missing: MissingFields },

    #[error("Preencha {missing}")]
    MissingLinearInputs { missing: MissingFields },

    #[error("Preencha {missing}")]
    MissingUnitInputs { missing: MissingFields },
}

/// 保存前の明細（入力欄を数値化したもの）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemDraft {
    /// 解決済みのサービス名（カタログ選択または「その他」の自由入力）
    pub service_name: String,
    pub mode: PricingMode,
    pub width: f64,
    pub height: f64,
    /// 正規化前の数量（空欄は0）
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
    pub total_state: TotalState,
    pub glass: GlassSpec,
    pub category: Option<String>,
    pub model: Option<String>,
    pub is_installation: bool,
}

impl LineItemDraft {
    fn inputs(&self) -> PricingInputs {
        PricingInputs {
            width: self.width,
            height: self.height,
            quantity: self.quantity,
            unit_price: self.unit_price,
        }
    }
}

fn missing_of(checks: &[(&'static str, f64)]) -> Option<MissingFields> {
    let missing: Vec<&'static str> = checks
        .iter()
        .filter(|(_, value)| !(*value > 0.0))
        .map(|(label, _)| *label)
        .collect();
    if missing.is_empty() {
        None
    } else {
        Some(MissingFields(missing))
    }
}

fn check_inputs(draft: &LineItemDraft, class: SegmentClass) -> Result<(), ValidationError> {
    match draft.mode {
        PricingMode::Fixed => {
            if !(draft.total > 0.0) {
                return Err(ValidationError::InvalidFixedTotal);
            }
        }
        PricingMode::Area => {
            if let Some(missing) = missing_of(&[
                ("largura", draft.width),
                ("altura", draft.height),
                ("preço por m²", draft.unit_price),
            ]) {
                return Err(ValidationError::MissingAreaInputs { missing });
            }
        }
        PricingMode::Linear => {
            let missing = if class == SegmentClass::Linear && !(draft.unit_price > 0.0) {
                // メートル単価がなければ合計の入力が必要
                missing_of(&[("preço total", draft.total)])
            } else {
                missing_of(&[
                    (class.length_label(), draft.width),
                    (class.linear_price_label(), draft.unit_price),
                ])
            };
            if let Some(missing) = missing {
                return Err(ValidationError::MissingLinearInputs { missing });
            }
        }
        PricingMode::Unit => {
            if let Some(missing) = missing_of(&[
                ("quantidade", draft.quantity),
                ("preço unitário", draft.unit_price),
            ]) {
                return Err(ValidationError::MissingUnitInputs { missing });
            }
        }
    }
    Ok(())
}

fn positive(value: f64) -> Option<f64> {
    (value > 0.0).then_some(value)
}

fn build_pricing(draft: &LineItemDraft, class: SegmentClass) -> Pricing {
    let measured = (class.attaches_dimensions() && (draft.width > 0.0 || draft.height > 0.0))
        .then(|| Measured {
            width: positive(draft.width),
            height: positive(draft.height),
        });

    match draft.mode {
        PricingMode::Area => Pricing::Area {
            dimensions: measured.map(|_| AreaDimensions {
                width: draft.width,
                height: draft.height,
                area: (draft.width > 0.0 && draft.height > 0.0)
                    .then(|| draft.width * draft.height),
            }),
        },
        // 高さは使わない
        PricingMode::Linear => Pricing::Linear {
            length: if class.attaches_length() { positive(draft.width) } else { None },
        },
        PricingMode::Fixed => Pricing::Fixed { measured },
        PricingMode::Unit => Pricing::Unit { measured },
    }
}

/// 明細を検査して確定する
///
/// # Arguments
/// * `draft` - 入力中の明細
/// * `segment` - テナントの業種
///
/// # Returns
/// * `Ok(QuoteLineItem)` - 見積に追加できる明細
/// * `Err(ValidationError)` - 未入力・不正な項目
pub fn validate_for_save(
    draft: &LineItemDraft,
    segment: Segment,
) -> Result<QuoteLineItem, ValidationError> {
    let class = segment.class();

    let service_name = draft.service_name.trim();
    if service_name.is_empty() {
        log::info!("明細を保存できません: サービス名が未入力");
        return Err(ValidationError::MissingServiceName);
    }

    if let Err(err) = check_inputs(draft, class) {
        log::info!("明細を保存できません ({}): {}", draft.mode, err);
        return Err(err);
    }

    let inputs = draft.inputs();
    let quantity = effective_quantity(draft.quantity);
    let total = finalize_total(class, draft.mode, &inputs, draft.total, draft.total_state);

    let unit_price = match draft.mode {
        // 固定方式の単価は合計と同じにする
        PricingMode::Fixed => total,
        PricingMode::Linear if class == SegmentClass::Linear && !(draft.unit_price > 0.0) => {
            let meters = if draft.width > 0.0 { draft.width } else { 1.0 };
            total / (meters * quantity)
        }
        _ => draft.unit_price,
    };

    let glass = (class.attaches_glass() && !draft.glass.is_empty()).then(|| draft.glass.clone());

    let item = QuoteLineItem {
        service_id: None,
        service_name: service_name.to_string(),
        quantity,
        unit_price,
        total,
        pricing: build_pricing(draft, class),
        glass,
        category: draft.category.clone(),
        model: draft.model.clone(),
        is_installation: draft.is_installation,
    };

    log::debug!(
        "明細確定: {} [{}] 合計={:.2}",
        item.service_name,
        item.mode(),
        item.total
    );
    Ok(item)
}
