use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{List, ListItem, ListState, Paragraph, Row, Table, TableState},
};

use crate::{
    app::{AppState, AssignFocus},
    format,
    ui::{components::card::Card, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);
    let pickers = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[0]);

    let assign = &state.assign;

    let equipment: Vec<ListItem> = state
        .store
        .available_equipment()
        .iter()
        .map(|instance| {
            let picked = assign.equipment_id == Some(instance.id);
            ListItem::new(format!("{}{}", marker(picked), format::instance_label(instance)))
        })
        .collect();
    render_picker(
        frame,
        pickers[0],
        "Equipamento disponível",
        equipment,
        assign.equipment_cursor,
        assign.focus == AssignFocus::Equipment,
        theme,
    );

    let users: Vec<ListItem> = state
        .store
        .users()
        .iter()
        .map(|user| {
            let picked = assign.user_id == Some(user.id);
            ListItem::new(format!("{}{}", marker(picked), format::user_label(user)))
        })
        .collect();
    render_picker(
        frame,
        pickers[1],
        "Usuário",
        users,
        assign.user_cursor,
        assign.focus == AssignFocus::User,
        theme,
    );

    let editing = assign.focus == AssignFocus::Note;
    let note = if editing {
        format!("{}_", assign.note)
    } else {
        assign.note.clone()
    };
    Card::new("Observação", theme)
        .focused(editing)
        .render_with(frame, layout[1], Paragraph::new(note));

    render_allocated(frame, layout[2], state, theme);
}

fn marker(picked: bool) -> &'static str {
    if picked { "● " } else { "  " }
}

fn render_picker(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    items: Vec<ListItem<'_>>,
    cursor: usize,
    focused: bool,
    theme: &Theme,
) {
    let mut list_state = ListState::default();
    if focused && !items.is_empty() {
        list_state.select(Some(cursor));
    }
    let list = List::new(items)
        .block(Card::new(title, theme).focused(focused).block())
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_allocated(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let focused = state.assign.focus == AssignFocus::Allocated;
    let items = state.store.allocated_equipment();

    let header = Row::new(["Equipamento", "Usuário", "Desde"])
        .style(Style::default().fg(theme.text_muted));
    let rows = items.iter().map(|instance| {
        Row::new([
            format::instance_label(instance),
            format::holder_name(instance).to_string(),
            format::since(instance.assigned_at),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(45),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
        ],
    )
    .header(header)
    .row_highlight_style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let mut table_state = TableState::default();
    if focused && !items.is_empty() {
        table_state.select(Some(state.assign.allocated_cursor));
    }

    let title = format!("Equipamentos alocados ({})", items.len());
    let card = Card::new(&title, theme).focused(focused);
    let inner = card.inner(area);
    frame.render_widget(card.block(), area);
    frame.render_stateful_widget(table, inner, &mut table_state);
}
