use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::Paragraph,
};

use crate::{
    app::AppState,
    format,
    ui::{
        components::card::{Card, StatCard},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let Some(summary) = state.summary else {
        Card::new("Dashboard", theme).render_with(
            frame,
            area,
            Paragraph::new(Line::from("Carregando...")).style(Style::default().fg(theme.text_muted)),
        );
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(layout[0]);

    StatCard::new("Total", summary.total.to_string(), theme).render(frame, cols[0]);
    StatCard::new("Disponíveis", summary.disponivel.to_string(), theme)
        .style(Style::default().fg(theme.positive))
        .render(frame, cols[1]);
    StatCard::new("Alocados", summary.alocado.to_string(), theme)
        .style(Style::default().fg(theme.accent))
        .render(frame, cols[2]);
    StatCard::new("Em manutenção", summary.em_manutencao.to_string(), theme)
        .style(Style::default().fg(theme.warning))
        .render(frame, cols[3]);

    StatCard::new(
        "Valor total investido",
        format::currency(summary.valor_total_investido),
        theme,
    )
    .render(frame, layout[1]);
}
