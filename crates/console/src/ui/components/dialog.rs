use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph, Row, Table},
};

use crate::{
    app::AppState,
    format,
    ui::{
        components::{card::Card, centered_rect},
        theme::Theme,
    },
};

/// Equipment held by one user.
pub fn render_user_equipment(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(report) = &state.popup else {
        return;
    };
    let rect = centered_rect(80, 60, area);
    let title = format!("Equipamentos de {}", report.user.nome);

    let header = Row::new(["Equipamento", "Patrimônio", "Serial", "Desde"])
        .style(Style::default().fg(theme.text_muted));
    let rows = report.equipment.iter().map(|instance| {
        Row::new([
            format::instance_type_name(instance).to_string(),
            format::or_dash(instance.patrimonial.as_deref()).to_string(),
            format::or_dash(instance.serial.as_deref()).to_string(),
            format::since(instance.assigned_at),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ],
    )
    .header(header);

    frame.render_widget(Clear, rect);
    Card::new(&title, theme)
        .focused(true)
        .render_with(frame, rect, table);
}

/// Confirmation before a return is sent.
pub fn render_return_confirm(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let Some(id) = state.pending_return else {
        return;
    };
    let label = state
        .store
        .allocated_equipment()
        .iter()
        .find(|instance| instance.id == id)
        .map(format::instance_label)
        .unwrap_or_else(|| format!("#{id}"));

    let rect = centered_rect(50, 20, area);
    let lines = vec![
        Line::from(format!("Devolver {label}?")),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Style::default().fg(theme.accent)),
            Span::raw(" confirmar   "),
            Span::styled("n", Style::default().fg(theme.accent)),
            Span::raw(" cancelar"),
        ]),
    ];

    frame.render_widget(Clear, rect);
    Card::new("Devolução", theme).focused(true).render_with(
        frame,
        rect,
        Paragraph::new(lines).alignment(Alignment::Center),
    );
}
