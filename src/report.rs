//! 表示用の整形

use quote_pricing_common::{
    format_currency, Catalog, FinanceSummary, ItemEditor, PricingMode, Quote, QuoteLineItem,
};

pub fn money(symbol: &str, value: f64) -> String {
    format!("{} {}", symbol, format_currency(value))
}

/// 明細1行
pub fn render_item(index: usize, item: &QuoteLineItem, symbol: &str) -> String {
    let mut line = format!(
        "#{} {} [{}] {} × {} = {}",
        index,
        item.service_name,
        item.mode(),
        item.quantity,
        money(symbol, item.unit_price),
        money(symbol, item.total)
    );

    match (item.pricing.width(), item.pricing.height(), item.mode()) {
        (Some(w), _, PricingMode::Linear) => line.push_str(&format!(" ({} m)", w)),
        (Some(w), Some(h), _) => {
            line.push_str(&format!(" ({} × {}", w, h));
            if let Some(area) = item.pricing.area() {
                line.push_str(&format!(" = {:.2} m²", area));
            }
            line.push(')');
        }
        (Some(w), None, _) => line.push_str(&format!(" (largura {})", w)),
        (None, Some(h), _) => line.push_str(&format!(" (altura {})", h)),
        (None, None, _) => {}
    }

    if let Some(glass) = &item.glass {
        let parts: Vec<&str> = [
            glass.glass_color.as_str(),
            glass.glass_thickness.as_str(),
            glass.profile_color.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
        line.push_str(&format!(" {{{}}}", parts.join(" / ")));
    }

    line
}

/// 見積全体
pub fn render_quote(quote: &Quote, symbol: &str) -> String {
    let mut out = String::new();
    let client = if quote.client_name.is_empty() { "-" } else { quote.client_name.as_str() };
    out.push_str(&format!("Cliente: {}  Status: {}\n", client, quote.status.label()));

    if quote.items.is_empty() {
        out.push_str("  (nenhum item)\n");
    }
    for (index, item) in quote.items.iter().enumerate() {
        out.push_str(&format!("  {}\n", render_item(index, item, symbol)));
    }

    out.push_str(&format!("Subtotal: {}\n", money(symbol, quote.subtotal())));
    if quote.discount != 0.0 {
        out.push_str(&format!("Desconto: {}\n", money(symbol, quote.discount)));
    }
    out.push_str(&format!("Total: {}\n", money(symbol, quote.total())));
    out
}

/// エディタの現在状態
pub fn render_editor_status(editor: &ItemEditor, symbol: &str) -> String {
    let inputs = editor.inputs();
    let lock = if editor.is_manual() { "🔒" } else { "🔓" };
    let mut out = format!(
        "[{}] {} | serviço: {}",
        editor.mode(),
        editor.mode().label(),
        match editor.service().resolve() {
            "" => "-",
            name => name,
        }
    );
    match editor.mode() {
        PricingMode::Area => out.push_str(&format!(
            " | {} × {} = {:.2} m²",
            inputs.width,
            inputs.height,
            editor.area()
        )),
        PricingMode::Linear => out.push_str(&format!(
            " | {}: {} m",
            editor.segment().class().length_label(),
            inputs.width
        )),
        PricingMode::Fixed | PricingMode::Unit => {}
    }
    out.push_str(&format!(
        " | qtd: {} | preço: {} | total: {} {}",
        inputs.quantity,
        money(symbol, inputs.unit_price),
        money(symbol, editor.total()),
        lock
    ));
    out
}

/// カタログ一覧
pub fn render_catalog(catalog: &Catalog, symbol: &str) -> String {
    let mut out = String::from("Serviços de instalação:\n");
    for name in &catalog.installation_services {
        out.push_str(&format!("  - {}\n", name));
    }
    if !catalog.other_label.is_empty() {
        out.push_str(&format!("  - {} (especificar)\n", catalog.other_label));
    }

    out.push_str("Serviços rápidos:\n");
    for service in &catalog.quick_services {
        let price = service
            .default_price
            .map(|p| format!("{}{}", money(symbol, p), service.kind.price_suffix()))
            .unwrap_or_else(|| "-".into());
        out.push_str(&format!("  {} {} ({})\n", service.id, service.name, price));
    }

    out.push_str("Categorias:\n");
    for category in &catalog.categories {
        let models: Vec<&str> = category.models.iter().map(|m| m.name.as_str()).collect();
        out.push_str(&format!("  {} {}: {}\n", category.id, category.name, models.join(", ")));
    }

    out.push_str(&format!("Cores de vidro: {}\n", catalog.glass_colors.join(", ")));
    out.push_str(&format!("Espessuras: {}\n", catalog.glass_thicknesses.join(", ")));
    out.push_str(&format!("Acabamentos: {}\n", catalog.profile_colors.join(", ")));
    out
}

/// 財務サマリー
pub fn render_finance(summary: &FinanceSummary, symbol: &str) -> String {
    let rows = [
        ("Faturamento", money(symbol, summary.revenue)),
        ("Valores a receber", money(symbol, summary.receivable)),
        ("Recebido", money(symbol, summary.received)),
        ("Contas a pagar", money(symbol, summary.expenses_to_pay)),
        ("Contas pagas", money(symbol, summary.expenses_paid)),
        ("Lucro líquido", money(symbol, summary.net_profit)),
        ("Margem bruta", format!("{:.2}%", summary.gross_margin)),
        ("Margem líquida", format!("{:.2}%", summary.net_margin)),
        ("Marketing", money(symbol, summary.marketing)),
        ("Mão de obra", money(symbol, summary.labor)),
        ("Alimentação", money(symbol, summary.food)),
        ("Estacionamento", money(symbol, summary.parking)),
        ("Ferramentas", money(symbol, summary.tools)),
        ("Outras despesas", money(symbol, summary.other_expenses)),
    ];
    rows.iter()
        .map(|(label, value)| format!("{:<18} {}\n", label, value))
        .collect()
}
