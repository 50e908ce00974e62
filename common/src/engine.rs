//! 価格計算エンジン
//!
//! 入力値から合計を導出する純粋関数群。
//! 手動上書き中は自動計算を止め、固定方式では入力された合計をそのまま返す。

use crate::number::normalize_numeric_input;
use crate::segment::SegmentClass;
use crate::types::PricingMode;

/// 合計欄の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TotalState {
    /// 計算式で合計を導出する
    #[default]
    Automatic,
    /// 合計が直接入力され固定されている
    Overridden,
}

/// 計算式への入力
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PricingInputs {
    /// 幅（メートル方式では長さ）
    pub width: f64,
    pub height: f64,
    pub quantity: f64,
    pub unit_price: f64,
}

impl PricingInputs {
    /// 入力欄のテキストから作る
    pub fn from_raw(width: &str, height: &str, quantity: &str, unit_price: &str) -> Self {
        Self {
            width: normalize_numeric_input(width),
            height: normalize_numeric_input(height),
            quantity: normalize_numeric_input(quantity),
            unit_price: normalize_numeric_input(unit_price),
        }
    }

    /// 幅 × 高さ（上書き状態に関係なく常に再計算される）
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// 数量の下限は1（0・負数・空欄は1として扱う）
pub fn effective_quantity(quantity: f64) -> f64 {
    if quantity.is_finite() && quantity > 1.0 {
        quantity
    } else {
        1.0
    }
}

/// 方式ごとの計算式（上書き判定なし）
///
/// 固定方式には計算式がないので `current_total` を返す。
pub fn compute_total(mode: PricingMode, inputs: &PricingInputs, current_total: f64) -> f64 {
    let quantity = effective_quantity(inputs.quantity);
    let PricingInputs { width, height, unit_price, .. } = *inputs;

    match mode {
        PricingMode::Fixed => current_total,
        PricingMode::Area => {
            if width > 0.0 && height > 0.0 && unit_price > 0.0 {
                width * height * quantity * unit_price
            } else {
                0.0
            }
        }
        PricingMode::Linear => {
            if width > 0.0 && unit_price > 0.0 {
                width * quantity * unit_price
            } else {
                0.0
            }
        }
        PricingMode::Unit => {
            if unit_price > 0.0 {
                quantity * unit_price
            } else {
                0.0
            }
        }
    }
}

/// 入力変更時の再計算
///
/// 手動上書き中（固定方式以外）は `current_total` をそのまま返す。
pub fn recompute(
    mode: PricingMode,
    inputs: &PricingInputs,
    current_total: f64,
    manual_override: bool,
) -> f64 {
    if manual_override && mode != PricingMode::Fixed {
        return current_total;
    }
    compute_total(mode, inputs, current_total)
}

/// 配管業のメートル方式
///
/// メートル単価があれば 単価 × メートル × 数量、なければ入力された合計。
pub fn linear_segment_total(
    price_per_meter: f64,
    meters: f64,
    quantity: f64,
    entered_total: f64,
) -> f64 {
    if price_per_meter > 0.0 {
        if meters > 0.0 {
            price_per_meter * meters * effective_quantity(quantity)
        } else {
            0.0
        }
    } else {
        entered_total.max(0.0)
    }
}

/// 業種の計算規則を含めた保存時の合計
///
/// 配管業のメートル方式はメートル単価の有無で決まり、上書き状態は見ない。
pub fn finalize_total(
    class: SegmentClass,
    mode: PricingMode,
    inputs: &PricingInputs,
    current_total: f64,
    state: TotalState,
) -> f64 {
    match (class, mode) {
        (SegmentClass::Linear, PricingMode::Linear) => linear_segment_total(
            inputs.unit_price,
            inputs.width,
            inputs.quantity,
            current_total,
        ),
        _ => recompute(mode, inputs, current_total, state == TotalState::Overridden),
    }
}
