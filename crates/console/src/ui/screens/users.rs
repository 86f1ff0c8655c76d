use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table, TableState},
};

use crate::{
    app::{AppState, Editing, view::users_visible_indices},
    format,
    ui::{components::card::Card, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let filters = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(layout[0]);

    let editing = state.editing == Some(Editing::UserQuery);
    let query = if editing {
        format!("{}_", state.users.query)
    } else {
        state.users.query.clone()
    };
    Card::new("Buscar nome, CPF ou matrícula", theme)
        .focused(editing)
        .render_with(frame, filters[0], Paragraph::new(query));

    let city = Line::from(vec![
        Span::raw(state.users.city_label().to_string()),
        Span::styled(
            format!("  ({}/{})", state.users.city_index + 1, state.users.city_options.len()),
            Style::default().fg(theme.text_muted),
        ),
    ]);
    Card::new("Cidade", theme).render_with(frame, filters[1], Paragraph::new(city));

    render_table(frame, layout[1], state, theme);
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let items = state.store.users();
    let visible = users_visible_indices(state);

    let header = Row::new(["Nome", "CPF", "Matrícula", "Cargo", "Setor", "Cidade", "Atualizado"])
        .style(Style::default().fg(theme.text_muted));
    let rows = visible.iter().filter_map(|idx| items.get(*idx)).map(|user| {
        Row::new([
            user.nome.clone(),
            format::or_dash(user.cpf.as_deref()).to_string(),
            format::or_dash(user.matricula.as_deref()).to_string(),
            format::or_dash(user.cargo.as_deref()).to_string(),
            format::or_dash(user.setor.as_deref()).to_string(),
            format::or_dash(user.cidade.as_deref()).to_string(),
            format::timestamp(user.updated_at),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(22),
            Constraint::Percentage(13),
            Constraint::Percentage(10),
            Constraint::Percentage(14),
            Constraint::Percentage(12),
            Constraint::Percentage(11),
            Constraint::Percentage(18),
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
        table_state.select(Some(state.users.selected));
    }

    let title = format!("Usuários ({}/{})", visible.len(), items.len());
    let card = Card::new(&title, theme);
    let inner = card.inner(area);
    frame.render_widget(card.block(), area);
    frame.render_stateful_widget(table, inner, &mut table_state);
}
