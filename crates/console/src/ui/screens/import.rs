use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{
        AppState, Editing,
        tasks::{ImportKind, ImportSummary},
    },
    ui::{components::card::Card, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(0),
        ])
        .split(area);

    let kinds: Vec<Span> = [ImportKind::Users, ImportKind::Equipment]
        .into_iter()
        .flat_map(|kind| {
            let style = if kind == state.import.kind {
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text_muted)
            };
            [Span::styled(format!(" {} ", kind.label()), style), Span::raw("  ")]
        })
        .collect();
    Card::new("Tipo de importação", theme).render_with(
        frame,
        layout[0],
        Paragraph::new(Line::from(kinds)),
    );

    let editing = state.editing == Some(Editing::ImportPath);
    let path = if editing {
        format!("{}_", state.import.path)
    } else {
        state.import.path.clone()
    };
    Card::new("Arquivo (CSV ou Excel)", theme)
        .focused(editing)
        .render_with(frame, layout[1], Paragraph::new(path));

    if let Some(summary) = &state.import.result {
        Card::new("Resultado", theme).render_with(
            frame,
            layout[2],
            Paragraph::new(summary_lines(summary, theme)),
        );
    }
}

fn summary_lines(summary: &ImportSummary, theme: &Theme) -> Vec<Line<'static>> {
    let counters = match summary {
        ImportSummary::Users(stats) => [
            ("Criados", stats.created),
            ("Atualizados", stats.updated),
            ("Erros", stats.errors),
        ],
        ImportSummary::Equipment(stats) => [
            ("Tipos criados", stats.equipment_types_created),
            ("Instâncias", stats.instances_created),
            ("Erros", stats.errors),
        ],
    };
    counters
        .into_iter()
        .map(|(label, value)| {
            let style = if label == "Erros" && value > 0 {
                Style::default().fg(theme.error)
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(vec![
                Span::styled(format!("{label:<14}"), Style::default().fg(theme.text_muted)),
                Span::styled(value.to_string(), style),
            ])
        })
        .collect()
}
