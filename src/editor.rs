//! 対話式明細エディタ
//!
//! 1行の入力が画面上の1操作に相当する。操作ごとにエンジンの状態を更新し、
//! 現在の合計を表示する。

use crate::error::{QuoteError, Result};
use crate::report;
use crate::store;
use dialoguer::{Input, Select};
use quote_pricing_common::{Catalog, ItemEditor, PricingMode, QuoteLineItem, Segment};
use std::path::Path;

/// 対話アクション
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    Width(String),
    Height(String),
    Quantity(String),
    UnitPrice(String),
    /// 合計を直接入力
    Total(String),
    Mode(PricingMode),
    /// カタログから選ぶ
    PickService,
    /// サービス名を入力（カタログにない名前は「その他」）
    Service(String),
    ToggleLock,
    GlassColor(String),
    GlassThickness(String),
    ProfileColor(String),
    Help,
    /// 保存して終了
    Save,
    /// 保存せずに終了
    Quit,
}

/// 操作後の流れ
#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue,
    Saved(QuoteLineItem),
    Cancelled,
}

pub const HELP: &str = "\
操作: w <幅> | h <高さ> | q <数量> | p <単価> | t <合計>
      m <m2|linear|fixed|unit> | s <サービス名> | s (一覧から選択)
      l (ロック切替) | c <色> | e <厚さ> | k <枠色>
      ok (保存) | x (保存せず終了) | ? (ヘルプ)";

/// 入力行を操作に変換
pub fn parse_action(line: &str) -> std::result::Result<EditorAction, String> {
    let trimmed = line.trim();
    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (trimmed, ""),
    };

    let action = match command {
        "w" => EditorAction::Width(arg.to_string()),
        "h" => EditorAction::Height(arg.to_string()),
        "q" => EditorAction::Quantity(arg.to_string()),
        "p" => EditorAction::UnitPrice(arg.to_string()),
        "t" => EditorAction::Total(arg.to_string()),
        "m" => EditorAction::Mode(arg.parse::<PricingMode>().map_err(|e| e.to_string())?),
        "s" if arg.is_empty() => EditorAction::PickService,
        "s" => EditorAction::Service(arg.to_string()),
        "l" => EditorAction::ToggleLock,
        "c" => EditorAction::GlassColor(arg.to_string()),
        "e" => EditorAction::GlassThickness(arg.to_string()),
        "k" => EditorAction::ProfileColor(arg.to_string()),
        "" | "?" | "help" => EditorAction::Help,
        "ok" | "save" => EditorAction::Save,
        "x" | "quit" | "exit" => EditorAction::Quit,
        other => return Err(format!("comando desconhecido: {}", other)),
    };
    Ok(action)
}

/// 操作をエディタに適用する
///
/// 保存時にバリデーションが失敗した場合は理由を返し、編集を続ける。
pub fn apply_action(
    editor: &mut ItemEditor,
    catalog: &Catalog,
    action: EditorAction,
) -> std::result::Result<Flow, String> {
    match action {
        EditorAction::Width(raw) => editor.set_width(&raw),
        EditorAction::Height(raw) => editor.set_height(&raw),
        EditorAction::Quantity(raw) => editor.set_quantity(&raw),
        EditorAction::UnitPrice(raw) => editor.set_unit_price(&raw),
        EditorAction::Total(raw) => editor.set_total(&raw),
        EditorAction::Mode(mode) => editor.set_mode(mode),
        EditorAction::Service(name) => editor.select_service(catalog, &name),
        EditorAction::ToggleLock => editor.toggle_lock(),
        EditorAction::GlassColor(value) => editor.toggle_glass_color(&value),
        EditorAction::GlassThickness(value) => editor.toggle_glass_thickness(&value),
        EditorAction::ProfileColor(value) => editor.toggle_profile_color(&value),
        EditorAction::PickService | EditorAction::Help => {}
        EditorAction::Save => {
            return editor
                .validate_for_save()
                .map(Flow::Saved)
                .map_err(|e| e.to_string());
        }
        EditorAction::Quit => return Ok(Flow::Cancelled),
    }
    Ok(Flow::Continue)
}

/// カタログの一覧からサービスを選ぶ
fn pick_service(editor: &mut ItemEditor, catalog: &Catalog) -> Result<()> {
    let mut items: Vec<String> = catalog.installation_services.clone();
    if !catalog.other_label.is_empty() {
        items.push(format!("{} (especificar)", catalog.other_label));
    }
    if items.is_empty() {
        println!("  → catálogo vazio");
        return Ok(());
    }

    let selected = Select::new()
        .with_prompt("Tipo de serviço")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| QuoteError::CliExecution(e.to_string()))?;

    if selected < catalog.installation_services.len() {
        editor.select_service(catalog, &catalog.installation_services[selected]);
    } else {
        let custom: String = Input::new()
            .with_prompt("Especifique o tipo de serviço")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| QuoteError::CliExecution(e.to_string()))?;
        editor.set_custom_service_name(custom.trim());
    }
    Ok(())
}

/// 対話式で明細を編集して見積に保存
pub fn run_interactive_editor(
    quote_path: &Path,
    index: Option<usize>,
    segment: Segment,
    catalog: &Catalog,
    currency_symbol: &str,
) -> Result<()> {
    let mut quote = store::load_quote(quote_path)?;

    let mut editor = match index {
        Some(i) => {
            let item = quote
                .items
                .get(i)
                .ok_or(quote_pricing_common::Error::ItemIndex(i))?;
            println!("✏️  Editando item #{}: {}", i, item.service_name);
            ItemEditor::from_item(segment, item, catalog)
        }
        None => {
            println!("➕ Novo item ({})", segment.label());
            ItemEditor::new(segment)
        }
    };

    println!("{}\n", HELP);

    loop {
        println!("{}", report::render_editor_status(&editor, currency_symbol));

        let line: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| QuoteError::CliExecution(e.to_string()))?;

        let action = match parse_action(&line) {
            Ok(action) => action,
            Err(message) => {
                println!("  → {}", message);
                continue;
            }
        };

        match action {
            EditorAction::Help => {
                println!("{}", HELP);
                continue;
            }
            EditorAction::PickService => {
                pick_service(&mut editor, catalog)?;
                continue;
            }
            _ => {}
        }

        match apply_action(&mut editor, catalog, action) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Saved(item)) => {
                match index {
                    Some(i) => quote.replace_item(i, item)?,
                    None => quote.add_item(item),
                }
                store::save_quote(quote_path, &mut quote)?;
                println!("\n✓ Salvo: {}", quote_path.display());
                println!("{}", report::render_quote(&quote, currency_symbol));
                return Ok(());
            }
            Ok(Flow::Cancelled) => {
                println!("Cancelado, nada foi salvo");
                return Ok(());
            }
            Err(message) => println!("  ⚠ {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_pricing_common::TotalState;

    #[test]
    fn test_parse_action() {
        assert_eq!(parse_action("w 2.5"), Ok(EditorAction::Width("2.5".into())));
        assert_eq!(parse_action("  p   150 "), Ok(EditorAction::UnitPrice("150".into())));
        assert_eq!(parse_action("t"), Ok(EditorAction::Total("".into())));
        assert_eq!(parse_action("m fixed"), Ok(EditorAction::Mode(PricingMode::Fixed)));
        assert_eq!(parse_action("s"), Ok(EditorAction::PickService));
        assert_eq!(
            parse_action("s Porta de Vidro"),
            Ok(EditorAction::Service("Porta de Vidro".into()))
        );
        assert_eq!(parse_action("l"), Ok(EditorAction::ToggleLock));
        assert_eq!(parse_action(""), Ok(EditorAction::Help));
        assert_eq!(parse_action("ok"), Ok(EditorAction::Save));
        assert_eq!(parse_action("x"), Ok(EditorAction::Quit));
    }

    #[test]
    fn test_parse_action_errors() {
        assert!(parse_action("m m3").is_err());
        assert!(parse_action("z 1").is_err());
    }

    #[test]
    fn test_session_scenario_override() {
        let catalog = Catalog::builtin();
        let mut editor = ItemEditor::new(Segment::Glazier);
        for line in ["s Box Padrão", "w 2", "h 1.5", "p 150"] {
            let action = parse_action(line).unwrap();
            assert_eq!(apply_action(&mut editor, &catalog, action), Ok(Flow::Continue));
        }
        assert_eq!(editor.total(), 450.0);

        apply_action(&mut editor, &catalog, parse_action("t 999").unwrap()).unwrap();
        apply_action(&mut editor, &catalog, parse_action("p 200").unwrap()).unwrap();
        assert_eq!(editor.total(), 999.0);
        assert_eq!(editor.state(), TotalState::Overridden);

        apply_action(&mut editor, &catalog, parse_action("m unit").unwrap()).unwrap();
        assert_eq!(editor.total(), 200.0);
    }

    #[test]
    fn test_save_failure_keeps_editing() {
        let catalog = Catalog::builtin();
        let mut editor = ItemEditor::new(Segment::Glazier);
        editor.select_service(&catalog, "Box Padrão");
        editor.set_width("2");
        let result = apply_action(&mut editor, &catalog, EditorAction::Save);
        assert_eq!(result, Err("Preencha altura e preço por m²".to_string()));
    }

    #[test]
    fn test_save_success() {
        let catalog = Catalog::builtin();
        let mut editor = ItemEditor::new(Segment::Locksmith);
        editor.set_custom_service_name("Abertura de porta");
        editor.set_quantity("1");
        editor.set_unit_price("120");
        match apply_action(&mut editor, &catalog, EditorAction::Save) {
            Ok(Flow::Saved(item)) => assert_eq!(item.total, 120.0),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_quit() {
        let catalog = Catalog::builtin();
        let mut editor = ItemEditor::new(Segment::Glazier);
        assert_eq!(apply_action(&mut editor, &catalog, EditorAction::Quit), Ok(Flow::Cancelled));
    }
}
