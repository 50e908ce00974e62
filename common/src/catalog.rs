//! サービスカタログ
//!
//! サービス名・カテゴリ・モデル・ガラス仕様の選択肢。
//! 外部のJSONから読み込むか、組み込みのガラス業カタログを使う。

use crate::editor::ServiceSelection;
use crate::error::Result;
use crate::segment::{Segment, SegmentClass};
use serde::{Deserialize, Serialize};

/// カテゴリにモデルがないときのモデル名
pub const MANUAL_MODEL: &str = "Manual";

/// クイック追加サービスの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Fixed,
    #[default]
    Unit,
    Meter,
}

impl ServiceKind {
    /// 単価の単位表記
    pub fn price_suffix(&self) -> &'static str {
        match self {
            ServiceKind::Fixed => "",
            ServiceKind::Unit => "/un",
            ServiceKind::Meter => "/m",
        }
    }
}

/// 見積にワンクリックで追加できるサービス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogService {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: ServiceKind,
    #[serde(default)]
    pub default_price: Option<f64>,
}

/// ビルダーのモデル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogModel {
    pub id: String,
    pub name: String,
}

/// ビルダーのカテゴリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub models: Vec<CatalogModel>,
}

/// カタログ全体
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalog {
    /// 施工明細のサービス名
    pub installation_services: Vec<String>,
    /// 自由入力に切り替える選択肢
    pub other_label: String,
    pub categories: Vec<CatalogCategory>,
    pub quick_services: Vec<CatalogService>,
    pub glass_colors: Vec<String>,
    pub glass_thicknesses: Vec<String>,
    pub profile_colors: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn category(id: &str, name: &str, models: &[(&str, &str)]) -> CatalogCategory {
    CatalogCategory {
        id: id.into(),
        name: name.into(),
        models: models
            .iter()
            .map(|(id, name)| CatalogModel { id: (*id).into(), name: (*name).into() })
            .collect(),
    }
}

fn quick(id: &str, name: &str, description: &str, price: f64) -> CatalogService {
    CatalogService {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        kind: ServiceKind::Unit,
        default_price: Some(price),
    }
}

impl Catalog {
    /// 組み込みカタログ（ガラス業）
    pub fn builtin() -> Self {
        Self {
            installation_services: strings(&[
                "Cortina de Vidro",
                "Box Padrão",
                "Guarda-corpo",
                "Porta de Vidro",
                "Janela de Vidro",
                "Divisória de Vidro",
            ]),
            other_label: "Outro".into(),
            categories: vec![
                category("janelas", "Janelas", &[
                    ("2-folhas-correr", "2 Folhas Correr"),
                    ("4-folhas-correr", "4 Folhas Correr"),
                    ("basculante", "Basculante"),
                    ("maxim-ar", "Maxim-ar"),
                ]),
                category("portas", "Portas", &[
                    ("abrir-pivotante", "Abrir (Pivotante)"),
                    ("correr-2-folhas", "Correr 2 Folhas"),
                    ("correr-4-folhas", "Correr 4 Folhas"),
                    ("mao-de-amigo", "Mão de Amigo"),
                ]),
                category("box", "Box (Banheiro)", &[
                    ("frontal-1-fixo-1-movel", "Frontal (1 Fixo 1 Móvel)"),
                    ("canto-l", "Canto (L)"),
                    ("abrir-pivotante", "Abrir (Pivotante)"),
                    ("box-ate-teto", "Box até o Teto"),
                ]),
                category("guarda-corpo", "Guarda-Corpo", &[
                    ("torre", "Torre"),
                    ("botao", "Botão"),
                    ("perfil-u", "Perfil U"),
                ]),
                category("envidracamento", "Envidraçamento/Sacada", &[
                    ("fixo", "Fixo"),
                    ("correr", "Correr"),
                    ("basculante", "Basculante"),
                ]),
                category("espelhos", "Espelhos", &[
                    ("espelho-simples", "Espelho Simples"),
                    ("espelho-com-moldura", "Espelho com Moldura"),
                ]),
                category("fixos", "Fixos/Vitrines", &[
                    ("vitrine-simples", "Vitrine Simples"),
                    ("vitrine-com-porta", "Vitrine com Porta"),
                ]),
                category("outros", "Outros/Manual", &[]),
            ],
            quick_services: vec![
                quick("troca-roldanas", "Troca de Roldanas", "Substituição por roldanas premium", 50.0),
                quick("vedacao-completa", "Vedação Completa", "Substituição completa da vedação", 35.0),
                quick("higienizacao-blindagem", "Higienização e Blindagem", "Limpeza profunda e blindagem nos trilhos", 450.0),
                quick("colagem-vidro", "Colagem de Vidro", "Colagem profissional de vidros soltos", 120.0),
                quick("visita-tecnica", "Visita Técnica/Diagnóstico", "Diagnóstico completo do sistema", 150.0),
            ],
            glass_colors: strings(&["Incolor", "Verde", "Fumê", "Bronze"]),
            glass_thicknesses: strings(&["6mm", "8mm", "10mm"]),
            profile_colors: strings(&["Branco", "Preto", "Fosco", "Bronze", "Cromado"]),
        }
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        Ok(catalog)
    }

    pub fn is_catalog_service(&self, name: &str) -> bool {
        self.installation_services.iter().any(|s| s == name)
    }

    /// サービス名から選択状態を作る
    ///
    /// カタログにない名前は「その他」＋自由入力になる。
    pub fn select_service(&self, name: &str) -> ServiceSelection {
        if name.is_empty() {
            ServiceSelection::Unselected
        } else if !self.other_label.is_empty() && name == self.other_label {
            ServiceSelection::Other { custom: String::new() }
        } else if self.is_catalog_service(name) {
            ServiceSelection::Named(name.to_string())
        } else {
            ServiceSelection::Other { custom: name.to_string() }
        }
    }

    pub fn find_category(&self, id: &str) -> Option<&CatalogCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn find_quick_service(&self, id: &str) -> Option<&CatalogService> {
        self.quick_services.iter().find(|s| s.id == id)
    }

    /// ビルダーで選んだカテゴリ・モデルの表示名
    ///
    /// モデルのないカテゴリは `Manual` になる。
    pub fn model_name<'a>(&self, category: &'a CatalogCategory, model_id: Option<&str>) -> Option<&'a str> {
        if category.models.is_empty() {
            return Some(MANUAL_MODEL);
        }
        let model_id = model_id?;
        category
            .models
            .iter()
            .find(|m| m.id == model_id)
            .map(|m| m.name.as_str())
    }
}

/// ビルダーのサービス名
///
/// 鍵屋・便利屋は説明文があればそれを使い、それ以外は「カテゴリ - モデル」。
pub fn builder_service_name(
    segment: Segment,
    category_name: &str,
    model_name: &str,
    description: &str,
) -> String {
    let composed = format!("{} - {}", category_name, model_name);
    match segment.class() {
        SegmentClass::Simple if !description.trim().is_empty() => description.trim().to_string(),
        _ => composed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.other_label, "Outro");
        assert!(catalog.is_catalog_service("Box Padrão"));
        assert_eq!(catalog.categories.len(), 8);
        assert_eq!(catalog.find_quick_service("visita-tecnica").unwrap().default_price, Some(150.0));
    }

    #[test]
    fn test_select_service() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.select_service(""), ServiceSelection::Unselected);
        assert_eq!(
            catalog.select_service("Guarda-corpo"),
            ServiceSelection::Named("Guarda-corpo".into())
        );
        assert_eq!(
            catalog.select_service("Outro"),
            ServiceSelection::Other { custom: String::new() }
        );
        assert_eq!(
            catalog.select_service("Película"),
            ServiceSelection::Other { custom: "Película".into() }
        );
    }

    #[test]
    fn test_model_name_manual_category() {
        let catalog = Catalog::builtin();
        let outros = catalog.find_category("outros").unwrap();
        assert_eq!(catalog.model_name(outros, None), Some(MANUAL_MODEL));

        let box_cat = catalog.find_category("box").unwrap();
        assert_eq!(catalog.model_name(box_cat, Some("canto-l")), Some("Canto (L)"));
        assert_eq!(catalog.model_name(box_cat, Some("nao-existe")), None);
        assert_eq!(catalog.model_name(box_cat, None), None);
    }

    #[test]
    fn test_builder_service_name() {
        assert_eq!(
            builder_service_name(Segment::Glazier, "Janelas", "Basculante", "ignorado"),
            "Janelas - Basculante"
        );
        assert_eq!(
            builder_service_name(Segment::Locksmith, "Portas", "Manual", " Abertura de porta "),
            "Abertura de porta"
        );
        assert_eq!(
            builder_service_name(Segment::Handyman, "Outros/Manual", "Manual", ""),
            "Outros/Manual - Manual"
        );
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"{
            "installationServices": ["Troca de fechadura"],
            "otherLabel": "Outro",
            "quickServices": [
                {"id": "copia", "name": "Cópia de chave", "type": "unit", "defaultPrice": 15}
            ]
        }"#;
        let catalog = Catalog::from_json(json).expect("カタログ読み込み失敗");
        assert!(catalog.is_catalog_service("Troca de fechadura"));
        assert!(catalog.categories.is_empty());
        assert_eq!(catalog.quick_services[0].kind, ServiceKind::Unit);
    }
}
