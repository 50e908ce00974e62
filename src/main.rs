use anyhow::Context;
use clap::Parser;
use quote_pricing::{cli, config, editor, error, report, store};
use quote_pricing_common::{
    normalize_numeric_input, parse_currency_input, FinanceSummary, Segment,
};
use cli::{Cli, Commands};
use config::Config;
use error::QuoteError;

/// 業種（引数 → 環境変数 → 設定ファイル）
fn resolve_segment(arg: Option<Segment>, config: &Config) -> error::Result<Segment> {
    match arg {
        Some(segment) => Ok(segment),
        None => config.effective_segment(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let config = Config::load().context("設定の読み込みに失敗")?;
    let symbol = config.currency_symbol.clone();

    match cli.command {
        Commands::Price { item, json } => {
            let segment = resolve_segment(item.segment, &config)?;
            let catalog = config.load_catalog()?;
            let item_editor = item.build_editor(segment, &catalog);

            println!("💰 {}", report::render_editor_status(&item_editor, &symbol));
            match item_editor.validate_for_save() {
                Ok(line) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&line)?);
                    } else {
                        println!("✔ {}", report::render_item(0, &line, &symbol));
                    }
                }
                Err(e) => println!("⚠ {}", e),
            }
        }

        Commands::Add { quote, item } => {
            println!("➕ quote-pricing - 明細追加\n");

            let segment = resolve_segment(item.segment, &config)?;
            let catalog = config.load_catalog()?;
            let line = item
                .build_editor(segment, &catalog)
                .validate_for_save()
                .map_err(QuoteError::from)?;

            let mut current = store::load_quote(&quote)?;
            current.add_item(line);
            store::save_quote(&quote, &mut current)?;

            println!("{}", report::render_quote(&current, &symbol));
            println!("✔ 保存: {}", quote.display());
        }

        Commands::Edit { quote, index, segment } => {
            println!("✏️  quote-pricing - 明細編集\n");
            let segment = resolve_segment(segment, &config)?;
            let catalog = config.load_catalog()?;
            editor::run_interactive_editor(&quote, index, segment, &catalog, &symbol)?;
        }

        Commands::Quote {
            quote,
            discount,
            remove,
            add_service,
            client_id,
            client_name,
            status,
            paid,
        } => {
            let mut current = store::load_quote(&quote)?;
            let mut modified = false;

            if let Some(raw) = discount {
                current.discount = parse_currency_input(&raw);
                modified = true;
            }
            if let Some(index) = remove {
                let removed = current.remove_item(index)?;
                println!("✔ 削除: #{} {}", index, removed.service_name);
                modified = true;
            }
            if let Some(id) = add_service {
                let catalog = config.load_catalog()?;
                let service = catalog
                    .find_quick_service(&id)
                    .ok_or_else(|| QuoteError::Config(format!("サービスが見つかりません: {}", id)))?;
                current.add_service(service);
                println!("✔ 追加: {}", service.name);
                modified = true;
            }
            if let Some(id) = client_id {
                current.client_id = id;
                modified = true;
            }
            if let Some(name) = client_name {
                current.client_name = name;
                modified = true;
            }
            if let Some(status) = status {
                current.status = status;
                modified = true;
            }
            if paid {
                current.paid = true;
                modified = true;
            }

            if modified {
                store::save_quote(&quote, &mut current)?;
                println!("✔ 保存: {}\n", quote.display());
            }

            print!("{}", report::render_quote(&current, &symbol));
            if let Err(e) = current.validate_for_save() {
                println!("⚠ {}", e);
            }
        }

        Commands::Row { quote, index, quantity, unit_price } => {
            let mut current = store::load_quote(&quote)?;

            if let Some(raw) = quantity {
                current.update_quantity(index, normalize_numeric_input(&raw))?;
            }
            if let Some(raw) = unit_price {
                current.update_unit_price(index, normalize_numeric_input(&raw))?;
            }

            store::save_quote(&quote, &mut current)?;
            print!("{}", report::render_quote(&current, &symbol));
        }

        Commands::Finance { quotes, expenses, period, date } => {
            println!("📊 quote-pricing - 財務サマリー\n");

            let quotes = store::load_quotes(&quotes)?;
            let expenses = store::load_expenses(expenses.as_deref())?;
            let reference = date.unwrap_or_else(|| chrono::Local::now().date_naive());

            let summary = FinanceSummary::compute(&quotes, &expenses, period, reference);
            print!("{}", report::render_finance(&summary, &symbol));
        }

        Commands::Catalog { json } => {
            let catalog = config.load_catalog()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                print!("{}", report::render_catalog(&catalog, &symbol));
            }
        }

        Commands::Config { set_segment, set_catalog, show } => {
            let mut config = config;

            if let Some(segment) = set_segment {
                config.set_segment(segment)?;
                println!("✔ 業種を設定しました: {}", segment.label());
            }

            if let Some(path) = set_catalog {
                config.set_catalog_path(path)?;
                println!("✔ カタログを設定しました");
            }

            if show {
                println!("設定:");
                println!("  業種: {} ({})", config.segment.label(), config.segment);
                println!(
                    "  カタログ: {}",
                    config
                        .catalog_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".into())
                );
                println!("  通貨記号: {}", config.currency_symbol);
            }
        }
    }

    Ok(())
}
