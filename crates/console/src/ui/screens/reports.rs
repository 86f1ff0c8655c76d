use api_types::reports::{Movement, StockSummary, UserReport, ValueSummaryRow};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Row, Table},
};

use crate::{
    app::{
        AppState, Editing,
        tasks::{Report, ReportKind},
    },
    format,
    ui::{components::card::Card, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(0)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Length(3), Constraint::Min(0)])
        .split(cols[0]);

    let items: Vec<ListItem> = ReportKind::ALL
        .iter()
        .map(|kind| ListItem::new(kind.label()))
        .collect();
    let mut list_state = ListState::default();
    list_state.select(Some(state.reports.cursor));
    let list = List::new(items)
        .block(Card::new("Relatórios", theme).block())
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, left[0], &mut list_state);

    let editing = state.editing == Some(Editing::ReportUserId);
    let user_id = if editing {
        format!("{}_", state.reports.user_id)
    } else {
        state.reports.user_id.clone()
    };
    Card::new("ID do usuário", theme)
        .focused(editing)
        .render_with(frame, left[1], Paragraph::new(user_id));

    match &state.reports.output {
        None => Card::new("Resultado", theme).render_with(
            frame,
            cols[1],
            Paragraph::new(Line::from(Span::styled(
                "Escolha um relatório e pressione Enter",
                Style::default().fg(theme.text_muted),
            ))),
        ),
        Some(Report::StockSummary(summary)) => render_summary(frame, cols[1], summary, theme),
        Some(Report::ValueSummary(rows)) => render_values(frame, cols[1], rows, theme),
        Some(Report::Movements { limit, rows }) => {
            render_movements(frame, cols[1], *limit, rows, theme)
        }
        Some(Report::User(report)) => render_user(frame, cols[1], report, theme),
    }
}

fn render_summary(frame: &mut Frame<'_>, area: Rect, summary: &StockSummary, theme: &Theme) {
    let counters = [
        ("Total", summary.total),
        ("Disponíveis", summary.disponivel),
        ("Alocados", summary.alocado),
        ("Em manutenção", summary.em_manutencao),
        ("Baixados", summary.baixado),
    ];
    let mut lines: Vec<Line> = counters
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<16}"), Style::default().fg(theme.text_muted)),
                Span::raw(value.to_string()),
            ])
        })
        .collect();
    lines.push(Line::from(vec![
        Span::styled(
            format!("{:<16}", "Valor investido"),
            Style::default().fg(theme.text_muted),
        ),
        Span::raw(format::currency(summary.valor_total_investido)),
    ]));
    Card::new(ReportKind::StockSummary.label(), theme).render_with(
        frame,
        area,
        Paragraph::new(lines),
    );
}

fn render_values(frame: &mut Frame<'_>, area: Rect, rows: &[ValueSummaryRow], theme: &Theme) {
    let header = Row::new(["Tipo", "Marca", "Modelo", "Qtd", "Valor total"])
        .style(Style::default().fg(theme.text_muted));
    let body = rows.iter().map(|row| {
        Row::new([
            row.nome.clone(),
            format::or_dash(row.marca.as_deref()).to_string(),
            format::or_dash(row.modelo.as_deref()).to_string(),
            row.quantidade.to_string(),
            format::currency(row.valor_total),
        ])
    });
    let table = Table::new(
        body,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(10),
            Constraint::Percentage(20),
        ],
    )
    .header(header);
    Card::new(ReportKind::ValueSummary.label(), theme).render_with(frame, area, table);
}

fn render_movements(
    frame: &mut Frame<'_>,
    area: Rect,
    limit: u32,
    rows: &[Movement],
    theme: &Theme,
) {
    let header = Row::new(["Data", "Tipo", "Equipamento", "De", "Para", "Observação"])
        .style(Style::default().fg(theme.text_muted));
    let body = rows.iter().map(|movement| {
        Row::new([
            format::timestamp(movement.date),
            movement
                .kind
                .map(|kind| kind.label())
                .unwrap_or(format::DASH)
                .to_string(),
            movement.equipment_instance_id.to_string(),
            user_ref(movement.from_user_id),
            user_ref(movement.to_user_id),
            format::or_dash(movement.note.as_deref()).to_string(),
        ])
    });
    let table = Table::new(
        body,
        [
            Constraint::Length(20),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Min(10),
        ],
    )
    .header(header);
    let title = format!("{} (limite {limit})", ReportKind::Movements.label());
    Card::new(&title, theme).render_with(frame, area, table);
}

fn user_ref(id: Option<i64>) -> String {
    id.map(|id| format!("#{id}"))
        .unwrap_or_else(|| format::DASH.to_string())
}

fn render_user(frame: &mut Frame<'_>, area: Rect, report: &UserReport, theme: &Theme) {
    let title = format!("{} - {}", ReportKind::User.label(), report.user.nome);
    let card = Card::new(&title, theme);
    let inner = card.inner(area);
    frame.render_widget(card.block(), area);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let who = Line::from(Span::styled(
        format::user_label(&report.user),
        Style::default().fg(theme.text_muted),
    ));
    frame.render_widget(Paragraph::new(who), layout[0]);

    let header = Row::new(["Equipamento", "Patrimônio", "Serial", "Desde"])
        .style(Style::default().fg(theme.text_muted));
    let body = report.equipment.iter().map(|instance| {
        Row::new([
            format::instance_type_name(instance).to_string(),
            format::or_dash(instance.patrimonial.as_deref()).to_string(),
            format::or_dash(instance.serial.as_deref()).to_string(),
            format::since(instance.assigned_at),
        ])
    });
    let table = Table::new(
        body,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ],
    )
    .header(header);
    frame.render_widget(table, layout[1]);
}
