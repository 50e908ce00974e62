//! 見積ファイルの保存・読み込みテスト

use quote_pricing::cli::ItemArgs;
use quote_pricing::error::QuoteError;
use quote_pricing::store;
use quote_pricing_common::{
    normalize_numeric_input, Catalog, PricingMode, Quote, QuoteStatus, Segment,
};
use tempfile::tempdir;

fn area_item(width: &str, price: &str) -> quote_pricing_common::QuoteLineItem {
    ItemArgs {
        service: Some("Box Padrão".into()),
        mode: Some(PricingMode::Area),
        width: Some(width.into()),
        height: Some("1".into()),
        quantity: Some("1".into()),
        unit_price: Some(price.into()),
        glass_color: Some("Incolor".into()),
        ..Default::default()
    }
    .build_editor(Segment::Glazier, &Catalog::builtin())
    .validate_for_save()
    .expect("明細の確定に失敗")
}

/// 存在しないファイルは空の見積
#[test]
fn test_load_missing_quote_is_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let quote = store::load_quote(&dir.path().join("novo.json")).unwrap();
    assert!(quote.items.is_empty());
    assert_eq!(quote.status, QuoteStatus::Draft);
}

#[test]
fn test_save_and_reload() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("orcamentos").join("cliente.json");

    let mut quote = Quote::new();
    quote.client_name = "Maria".into();
    quote.add_item(area_item("2", "150"));
    quote.add_service(Catalog::builtin().find_quick_service("visita-tecnica").unwrap());
    store::save_quote(&path, &mut quote).unwrap();

    assert!(quote.created_at.is_some());
    assert_eq!(quote.created_at, quote.updated_at);

    let loaded = store::load_quote(&path).unwrap();
    assert_eq!(loaded, quote);
    assert_eq!(loaded.subtotal(), 450.0);
}

/// 明細の置き換え・削除後も順序を保つ
#[test]
fn test_replace_and_remove_rows() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("q.json");

    let mut quote = Quote::new();
    quote.add_item(area_item("1", "100"));
    quote.add_item(area_item("2", "100"));
    quote.add_item(area_item("3", "100"));
    store::save_quote(&path, &mut quote).unwrap();

    let mut quote = store::load_quote(&path).unwrap();
    quote.replace_item(1, area_item("5", "100")).unwrap();
    let removed = quote.remove_item(0).unwrap();
    assert_eq!(removed.total, 100.0);
    store::save_quote(&path, &mut quote).unwrap();

    let loaded = store::load_quote(&path).unwrap();
    let totals: Vec<f64> = loaded.items.iter().map(|i| i.total).collect();
    assert_eq!(totals, vec![500.0, 300.0]);
}

/// 保存形式はcamelCaseで方式タグを持つ
#[test]
fn test_saved_json_shape() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("q.json");

    let mut quote = Quote::new();
    quote.add_item(area_item("2", "150"));
    store::save_quote(&path, &mut quote).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let item = &value["items"][0];
    assert_eq!(item["serviceName"], "Box Padrão");
    assert_eq!(item["pricingMethod"], "m2");
    assert_eq!(item["unitPrice"], 150.0);
    assert_eq!(item["glass"]["glassColor"], "Incolor");
}

#[test]
fn test_invalid_quote_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = store::load_quote(&path);
    assert!(matches!(result, Err(QuoteError::InvalidQuoteFile(_))));
}

#[test]
fn test_load_quotes_and_expenses() {
    let dir = tempdir().expect("Failed to create temp dir");

    let missing = store::load_quotes(&dir.path().join("nada.json"));
    assert!(matches!(missing, Err(QuoteError::FileNotFound(_))));

    let quotes_path = dir.path().join("quotes.json");
    std::fs::write(&quotes_path, r#"[{"clientName": "Ana", "status": "approved", "paid": true}]"#).unwrap();
    let quotes = store::load_quotes(&quotes_path).unwrap();
    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].status, QuoteStatus::Approved);

    assert!(store::load_expenses(None).unwrap().is_empty());

    let expenses_path = dir.path().join("expenses.json");
    std::fs::write(
        &expenses_path,
        r#"[{"amount": 80, "category": "food", "paid": true, "date": "2026-03-02"}]"#,
    )
    .unwrap();
    let expenses = store::load_expenses(Some(&expenses_path)).unwrap();
    assert_eq!(expenses[0].amount, 80.0);
}

/// 行の数量・単価変更は保存された寸法で再計算する
#[test]
fn test_row_update_after_reload() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("q.json");

    let mut quote = Quote::new();
    quote.add_item(area_item("2", "150"));
    store::save_quote(&path, &mut quote).unwrap();

    let mut quote = store::load_quote(&path).unwrap();
    quote.update_quantity(0, normalize_numeric_input("2")).unwrap();
    assert_eq!(quote.items[0].total, 600.0);

    quote.update_quantity(0, normalize_numeric_input("-3")).unwrap();
    assert_eq!(quote.items[0].quantity, 1.0);
    assert_eq!(quote.items[0].total, 300.0);

    quote.update_unit_price(0, normalize_numeric_input("-10")).unwrap();
    assert_eq!(quote.items[0].total, 0.0);
    store::save_quote(&path, &mut quote).unwrap();

    let loaded = store::load_quote(&path).unwrap();
    assert!(loaded.items[0].total >= 0.0);
    assert_eq!(loaded.items[0].unit_price, 0.0);
}
