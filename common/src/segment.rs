//! 業種（テナントのセグメント）
//!
//! 業種ごとに使う計算方式と、明細に添付する項目が変わる。

use crate::error::Error;
use crate::types::PricingMode;
use serde::{Deserialize, Serialize};

/// テナントの業種
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    /// ガラス業（既定）
    #[default]
    Glazier,
    Locksmith,
    Plumber,
    Handyman,
}

/// 業種の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentClass {
    /// 幅×高さで計算する（ガラス業）
    AreaBased,
    /// 数量×単価のみ（鍵屋・便利屋）
    Simple,
    /// メートル単価で計算する（配管業）
    Linear,
}

impl Segment {
    pub const ALL: [Segment; 4] = [
        Segment::Glazier,
        Segment::Locksmith,
        Segment::Plumber,
        Segment::Handyman,
    ];

    pub fn class(&self) -> SegmentClass {
        match self {
            Segment::Glazier => SegmentClass::AreaBased,
            Segment::Locksmith | Segment::Handyman => SegmentClass::Simple,
            Segment::Plumber => SegmentClass::Linear,
        }
    }

    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            Segment::Glazier => "Vidraçaria",
            Segment::Locksmith => "Chaveiro",
            Segment::Plumber => "Encanador",
            Segment::Handyman => "Marido de Aluguel",
        }
    }

    /// 新規明細の初期計算方式
    pub fn default_mode(&self) -> PricingMode {
        match self.class() {
            SegmentClass::AreaBased => PricingMode::Area,
            SegmentClass::Simple => PricingMode::Unit,
            SegmentClass::Linear => PricingMode::Linear,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Segment::Glazier => "glazier",
            Segment::Locksmith => "locksmith",
            Segment::Plumber => "plumber",
            Segment::Handyman => "handyman",
        }
    }
}

impl SegmentClass {
    /// 幅・高さを明細に添付するか
    pub fn attaches_dimensions(&self) -> bool {
        matches!(self, SegmentClass::AreaBased)
    }

    /// 長さ（メートル方式）を明細に添付するか
    pub fn attaches_length(&self) -> bool {
        matches!(self, SegmentClass::AreaBased | SegmentClass::Linear)
    }

    /// ガラス・枠の仕様を明細に添付するか
    pub fn attaches_glass(&self) -> bool {
        matches!(self, SegmentClass::AreaBased)
    }

    /// 長さ入力欄の名称
    pub fn length_label(&self) -> &'static str {
        match self {
            SegmentClass::Linear => "metros lineares",
            _ => "largura",
        }
    }

    /// メートル単価欄の名称
    pub fn linear_price_label(&self) -> &'static str {
        match self {
            SegmentClass::Linear => "preço por metro",
            _ => "preço por metro linear",
        }
    }
}

impl std::str::FromStr for Segment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "glazier" | "vidracaria" | "vidraçaria" | "vidraceiro" => Ok(Segment::Glazier),
            "locksmith" | "chaveiro" => Ok(Segment::Locksmith),
            "plumber" | "encanador" => Ok(Segment::Plumber),
            "handyman" | "marido-de-aluguel" => Ok(Segment::Handyman),
            _ => Err(Error::UnknownSegment(s.to_string())),
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
