use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use quote_pricing_common::{
    builder_service_name, Catalog, FinancePeriod, ItemEditor, PricingMode, QuoteStatus, Segment,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quote-pricing")]
#[command(about = "見積明細の価格計算・見積作成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 明細の合計を計算して表示
    Price {
        #[command(flatten)]
        item: ItemArgs,

        /// 確定した明細をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 明細を検査して見積ファイルに追加
    Add {
        /// 見積JSONファイル（なければ作成）
        #[arg(required = true)]
        quote: PathBuf,

        #[command(flatten)]
        item: ItemArgs,
    },

    /// 対話的に明細を編集
    Edit {
        /// 見積JSONファイル（なければ作成）
        #[arg(required = true)]
        quote: PathBuf,

        /// 編集する行番号（省略時は新規追加）
        #[arg(short, long)]
        index: Option<usize>,

        /// 業種を指定（省略時は設定値）
        #[arg(long)]
        segment: Option<Segment>,
    },

    /// 見積を表示/編集
    Quote {
        /// 見積JSONファイル
        #[arg(required = true)]
        quote: PathBuf,

        /// 値引き（例: 50 または 1.234,56）
        #[arg(long)]
        discount: Option<String>,

        /// 行を削除
        #[arg(long)]
        remove: Option<usize>,

        /// カタログのサービスIDを数量1で追加
        #[arg(long)]
        add_service: Option<String>,

        /// 顧客ID
        #[arg(long)]
        client_id: Option<String>,

        /// 顧客名
        #[arg(long)]
        client_name: Option<String>,

        /// 状態 (draft/sent/approved/cancelled)
        #[arg(long)]
        status: Option<QuoteStatus>,

        /// 支払い済みにする
        #[arg(long)]
        paid: bool,
    },

    /// 見積の行の数量・単価を変更
    Row {
        /// 見積JSONファイル
        #[arg(required = true)]
        quote: PathBuf,

        /// 行番号
        #[arg(required = true)]
        index: usize,

        /// 数量
        #[arg(short, long)]
        quantity: Option<String>,

        /// 単価
        #[arg(short = 'p', long)]
        unit_price: Option<String>,
    },

    /// 財務サマリーを表示
    Finance {
        /// 見積一覧JSONファイル
        #[arg(required = true)]
        quotes: PathBuf,

        /// 経費一覧JSONファイル
        #[arg(short, long)]
        expenses: Option<PathBuf>,

        /// 集計期間 (month/year)
        #[arg(long, default_value = "month")]
        period: FinancePeriod,

        /// 基準日（YYYY-MM-DD、省略時は今日）
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// カタログを表示
    Catalog {
        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 業種を設定 (glazier/locksmith/plumber/handyman)
        #[arg(long)]
        set_segment: Option<Segment>,

        /// カタログJSONファイルを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 明細の入力欄
///
/// 数値は入力欄と同じく文字列のまま受け取る。
#[derive(Args, Debug, Clone, Default)]
pub struct ItemArgs {
    /// サービス名（カタログにない名前は「その他」扱い）
    #[arg(short, long)]
    pub service: Option<String>,

    /// 計算方式 (m2/linear/fixed/unit)
    #[arg(short, long)]
    pub mode: Option<PricingMode>,

    /// 業種を指定（省略時は設定値）
    #[arg(long)]
    pub segment: Option<Segment>,

    /// 幅（メートル方式では長さ）
    #[arg(short, long)]
    pub width: Option<String>,

    /// 高さ
    #[arg(long)]
    pub height: Option<String>,

    /// 数量
    #[arg(short, long)]
    pub quantity: Option<String>,

    /// 単価
    #[arg(short = 'p', long)]
    pub unit_price: Option<String>,

    /// 合計を直接入力（固定方式以外では手動上書き）
    #[arg(short, long)]
    pub total: Option<String>,

    /// カテゴリID
    #[arg(long)]
    pub category: Option<String>,

    /// モデルID
    #[arg(long)]
    pub model: Option<String>,

    /// ガラスの色
    #[arg(long)]
    pub glass_color: Option<String>,

    /// ガラスの厚さ
    #[arg(long)]
    pub glass_thickness: Option<String>,

    /// 枠の色
    #[arg(long)]
    pub profile_color: Option<String>,
}

impl ItemArgs {
    /// 画面操作と同じ順序で入力をエディタに流す
    ///
    /// 方式 → サービス → 寸法・数量・単価 → 合計
    pub fn build_editor(&self, segment: Segment, catalog: &Catalog) -> ItemEditor {
        let mut editor = ItemEditor::new(segment);

        if let Some(mode) = self.mode {
            editor.set_mode(mode);
        }
        match (&self.service, &self.category) {
            (Some(service), _) => editor.select_service(catalog, service),
            // サービス名がなければビルダーの「カテゴリ - モデル」
            (None, Some(category_id)) => {
                if let Some(category) = catalog.find_category(category_id) {
                    if let Some(model) = catalog.model_name(category, self.model.as_deref()) {
                        let name = builder_service_name(segment, &category.name, model, "");
                        editor.set_custom_service_name(&name);
                    }
                }
            }
            (None, None) => {}
        }
        editor.set_category_model(self.category.clone(), self.model.clone());

        let fields: [(&Option<String>, fn(&mut ItemEditor, &str)); 4] = [
            (&self.width, ItemEditor::set_width),
            (&self.height, ItemEditor::set_height),
            (&self.quantity, ItemEditor::set_quantity),
            (&self.unit_price, ItemEditor::set_unit_price),
        ];
        for (value, setter) in fields {
            if let Some(raw) = value {
                setter(&mut editor, raw);
            }
        }

        if let Some(color) = &self.glass_color {
            editor.toggle_glass_color(color);
        }
        if let Some(thickness) = &self.glass_thickness {
            editor.toggle_glass_thickness(thickness);
        }
        if let Some(color) = &self.profile_color {
            editor.toggle_profile_color(color);
        }

        if let Some(total) = &self.total {
            editor.set_total(total);
        }

        editor
    }
}
