use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use crate::{
    app::{
        AppState, Editing,
        view::stock_visible_indices,
        workflows::{StockField, StockForm},
    },
    format,
    ui::{
        components::{card::Card, centered_rect},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_search(frame, layout[0], state, theme);
    render_table(frame, layout[1], state, theme);

    if let Some(form) = &state.stock_form {
        render_form(frame, area, state, form, theme);
    }
}

fn render_search(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let editing = state.editing == Some(Editing::StockQuery);
    let query = if editing {
        format!("{}_", state.stock.query)
    } else {
        state.stock.query.clone()
    };
    Card::new("Buscar tipo, marca ou modelo", theme)
        .focused(editing)
        .render_with(frame, area, Paragraph::new(query));
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let items = state.store.stock();
    let visible = stock_visible_indices(state);

    let header = Row::new([
        "Tipo", "Marca", "Modelo", "Nota", "Data", "Qtd", "Unitário", "Total", "Origem",
    ])
    .style(Style::default().fg(theme.text_muted));
    let rows = visible.iter().filter_map(|idx| items.get(*idx)).map(|entry| {
        Row::new([
            format::stock_type_name(entry).to_string(),
            format::stock_brand(entry).to_string(),
            format::stock_model(entry).to_string(),
            format::or_dash(entry.nota_numero.as_deref()).to_string(),
            format::date(entry.nota_data),
            entry.quantidade.to_string(),
            format::currency(Some(entry.valor_unitario)),
            format::currency(Some(entry.valor_total)),
            format::or_dash(entry.origem.as_deref()).to_string(),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(16),
            Constraint::Percentage(11),
            Constraint::Percentage(11),
            Constraint::Percentage(9),
            Constraint::Percentage(10),
            Constraint::Percentage(5),
            Constraint::Percentage(13),
            Constraint::Percentage(13),
            Constraint::Percentage(12),
        ],
    )
    .header(header)
    .row_highlight_style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let mut table_state = TableState::default();
    if !visible.is_empty() {
        table_state.select(Some(state.stock.selected));
    }

    let title = format!("Estoque ({}/{})", visible.len(), items.len());
    let card = Card::new(&title, theme);
    let inner = card.inner(area);
    frame.render_widget(card.block(), area);
    frame.render_stateful_widget(table, inner, &mut table_state);
}

fn render_form(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    form: &StockForm,
    theme: &Theme,
) {
    let rect = centered_rect(70, 80, area);
    frame.render_widget(Clear, rect);
    let card = Card::new("Nova entrada de estoque", theme).focused(true);
    let inner = card.inner(rect);
    frame.render_widget(card.block(), rect);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(7)])
        .split(inner);

    let types = state.store.equipment_types();
    let items: Vec<ListItem> = types
        .iter()
        .map(|kind| {
            let marker = if form.type_id == Some(kind.id) { "● " } else { "  " };
            ListItem::new(format!("{marker}{}", format::equipment_type_label(kind)))
        })
        .collect();
    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(form.type_cursor));
    }
    let list = List::new(items)
        .block(
            Card::new("Tipo de equipamento", theme)
                .focused(form.focus == StockField::Type)
                .block(),
        )
        .highlight_style(Style::default().fg(theme.accent))
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, layout[0], &mut list_state);

    let total = form
        .total_preview()
        .map(|total| format::currency(Some(total)))
        .unwrap_or_else(|| format::DASH.to_string());
    let fields = [
        ("Número da nota", StockField::InvoiceNumber, form.invoice_number.as_str()),
        ("Data da nota (AAAA-MM-DD)", StockField::InvoiceDate, form.invoice_date.as_str()),
        ("Quantidade", StockField::Quantity, form.quantity.as_str()),
        ("Valor unitário", StockField::UnitValue, form.unit_value.as_str()),
        ("Origem", StockField::Origin, form.origin.as_str()),
    ];
    let mut lines: Vec<Line> = fields
        .into_iter()
        .map(|(label, field, value)| field_line(label, value, form.focus == field, theme))
        .collect();
    lines.push(Line::from(vec![
        Span::styled("Valor total: ", Style::default().fg(theme.text_muted)),
        Span::raw(total),
    ]));
    frame.render_widget(Paragraph::new(lines), layout[1]);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool, theme: &Theme) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label}: "), label_style),
        Span::raw(value),
        Span::raw(cursor),
    ])
}
