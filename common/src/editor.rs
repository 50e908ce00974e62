//! 明細エディタ（入力中の状態遷移）
//!
//! 入力欄の変更ごとに呼び出し側が対応するメソッドを呼ぶ。
//! 各メソッドは同期的に状態を更新し、必要なら合計を再計算する。
//!
//! 状態:
//! - Automatic: 入力変更で合計を再計算
//! - Overridden: 合計欄が直接編集され、方式を変えるまで固定
//!
//! 固定方式では合計は常に手入力で、フラグは使わない。

use crate::catalog::Catalog;
use crate::engine::{recompute, PricingInputs, TotalState};
use crate::number::{normalize_numeric_input, to_display};
use crate::segment::Segment;
use crate::types::{GlassSpec, PricingMode, QuoteLineItem};
use crate::validation::{validate_for_save, LineItemDraft, ValidationError};

/// サービス名の選択状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ServiceSelection {
    #[default]
    Unselected,
    /// カタログの項目
    Named(String),
    /// 「その他」を選び自由入力
    Other { custom: String },
}

impl ServiceSelection {
    /// 保存に使うサービス名
    pub fn resolve(&self) -> &str {
        match self {
            ServiceSelection::Unselected => "",
            ServiceSelection::Named(name) => name,
            ServiceSelection::Other { custom } => custom,
        }
    }
}

/// 1明細ぶんの編集状態
#[derive(Debug, Clone)]
pub struct ItemEditor {
    segment: Segment,
    mode: PricingMode,
    state: TotalState,
    service: ServiceSelection,
    width: String,
    height: String,
    quantity: String,
    unit_price: String,
    total: String,
    glass: GlassSpec,
    category: Option<String>,
    model: Option<String>,
    is_installation: bool,
}

impl ItemEditor {
    /// 新規明細（業種の初期方式・自動計算から開始）
    pub fn new(segment: Segment) -> Self {
        Self {
            segment,
            mode: segment.default_mode(),
            state: TotalState::Automatic,
            service: ServiceSelection::Unselected,
            width: String::new(),
            height: String::new(),
            quantity: String::new(),
            unit_price: String::new(),
            total: String::new(),
            glass: GlassSpec::default(),
            category: None,
            model: None,
            is_installation: true,
        }
    }

    /// 既存の明細を編集する
    ///
    /// 固定方式の明細は上書き状態から開始する。
    pub fn from_item(segment: Segment, item: &QuoteLineItem, catalog: &Catalog) -> Self {
        let mode = item.mode();
        let state = if mode == PricingMode::Fixed {
            TotalState::Overridden
        } else {
            TotalState::Automatic
        };

        Self {
            segment,
            mode,
            state,
            service: catalog.select_service(&item.service_name),
            width: to_display(item.pricing.width().unwrap_or(0.0)),
            height: to_display(item.pricing.height().unwrap_or(0.0)),
            quantity: to_display(if item.quantity > 0.0 { item.quantity } else { 1.0 }),
            unit_price: to_display(item.unit_price),
            total: to_display(item.total),
            glass: item.glass.clone().unwrap_or_default(),
            category: item.category.clone(),
            model: item.model.clone(),
            is_installation: item.is_installation,
        }
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn mode(&self) -> PricingMode {
        self.mode
    }

    pub fn state(&self) -> TotalState {
        self.state
    }

    /// 合計が固定されているか（固定方式は常に手入力）
    pub fn is_manual(&self) -> bool {
        self.mode == PricingMode::Fixed || self.state == TotalState::Overridden
    }

    pub fn service(&self) -> &ServiceSelection {
        &self.service
    }

    pub fn glass(&self) -> &GlassSpec {
        &self.glass
    }

    pub fn inputs(&self) -> PricingInputs {
        PricingInputs::from_raw(&self.width, &self.height, &self.quantity, &self.unit_price)
    }

    pub fn total(&self) -> f64 {
        normalize_numeric_input(&self.total)
    }

    /// 合計欄の表示文字列
    pub fn total_text(&self) -> &str {
        &self.total
    }

    /// 幅 × 高さ（上書き状態に関係なく入力から導出）
    pub fn area(&self) -> f64 {
        self.inputs().area()
    }

    /// 固定方式では合計欄を入力のまま残す
    fn recompute(&mut self) {
        if self.mode == PricingMode::Fixed {
            return;
        }
        let next = recompute(
            self.mode,
            &self.inputs(),
            self.total(),
            self.state == TotalState::Overridden,
        );
        if self.state == TotalState::Automatic {
            self.total = to_display(next);
        }
    }

    pub fn set_width(&mut self, raw: &str) {
        self.width = raw.to_string();
        self.recompute();
    }

    pub fn set_height(&mut self, raw: &str) {
        self.height = raw.to_string();
        self.recompute();
    }

    pub fn set_quantity(&mut self, raw: &str) {
        self.quantity = raw.to_string();
        self.recompute();
    }

    pub fn set_unit_price(&mut self, raw: &str) {
        self.unit_price = raw.to_string();
        self.recompute();
    }

    /// 方式変更（上書きを解除して再計算）
    pub fn set_mode(&mut self, mode: PricingMode) {
        if self.state == TotalState::Overridden {
            log::debug!("方式変更により上書きを解除: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
        self.state = TotalState::Automatic;
        self.recompute();
    }

    /// 合計欄の直接編集
    pub fn set_total(&mut self, raw: &str) {
        self.total = raw.to_string();
        if self.mode != PricingMode::Fixed && self.state == TotalState::Automatic {
            log::debug!("合計を手動で上書き: {}", raw);
            self.state = TotalState::Overridden;
        }
    }

    /// ロックボタン（上書きの切り替え）
    ///
    /// 固定方式では何もしない。解除したときはすぐに再計算する。
    pub fn toggle_lock(&mut self) {
        if self.mode == PricingMode::Fixed {
            return;
        }
        self.state = match self.state {
            TotalState::Automatic => TotalState::Overridden,
            TotalState::Overridden => TotalState::Automatic,
        };
        log::debug!("合計ロック切り替え: {:?}", self.state);
        self.recompute();
    }

    /// カタログからサービスを選ぶ
    pub fn select_service(&mut self, catalog: &Catalog, name: &str) {
        self.service = catalog.select_service(name);
    }

    /// 「その他」の自由入力
    pub fn set_custom_service_name(&mut self, name: &str) {
        self.service = ServiceSelection::Other { custom: name.to_string() };
    }

    /// ビルダーで選んだカテゴリ・モデル
    pub fn set_category_model(&mut self, category: Option<String>, model: Option<String>) {
        self.category = category;
        self.model = model;
    }

    /// 同じ値を選ぶと解除される
    pub fn toggle_glass_color(&mut self, value: &str) {
        toggle_chip(&mut self.glass.glass_color, value);
    }

    pub fn toggle_glass_thickness(&mut self, value: &str) {
        toggle_chip(&mut self.glass.glass_thickness, value);
    }

    pub fn toggle_profile_color(&mut self, value: &str) {
        toggle_chip(&mut self.glass.profile_color, value);
    }

    /// 現在の入力を数値化する
    pub fn draft(&self) -> LineItemDraft {
        let inputs = self.inputs();
        LineItemDraft {
            service_name: self.service.resolve().to_string(),
            mode: self.mode,
            width: inputs.width,
            height: inputs.height,
            quantity: inputs.quantity,
            unit_price: inputs.unit_price,
            total: self.total(),
            total_state: self.state,
            glass: self.glass.clone(),
            category: self.category.clone(),
            model: self.model.clone(),
            is_installation: self.is_installation,
        }
    }

    /// 「見積に追加」
    pub fn validate_for_save(&self) -> Result<QuoteLineItem, ValidationError> {
        validate_for_save(&self.draft(), self.segment)
    }
}

fn toggle_chip(slot: &mut String, value: &str) {
    if slot == value {
        slot.clear();
    } else {
        *slot = value.to_string();
    }
}
