pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AppState, view::View};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Active view
            Constraint::Length(1), // Hints
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], &state.nav, &theme);

    let content = layout[2];
    match state.nav.active() {
        View::Dashboard => screens::dashboard::render(frame, content, state, &theme),
        View::Stock => screens::stock::render(frame, content, state, &theme),
        View::Users => screens::users::render(frame, content, state, &theme),
        View::Assign => screens::assign::render(frame, content, state, &theme),
        View::Reports => screens::reports::render(frame, content, state, &theme),
        View::Import => screens::import::render(frame, content, state, &theme),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    components::dialog::render_user_equipment(frame, area, state, &theme);
    components::dialog::render_return_confirm(frame, area, state, &theme);
    components::toast::render(frame, area, state.notifier.current(), &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let (status, status_style) = match state.online {
        Some(true) => ("● online", Style::default().fg(theme.positive)),
        Some(false) => ("● offline", Style::default().fg(theme.error)),
        None => ("● ...", Style::default().fg(theme.text_muted)),
    };

    let line = Line::from(vec![
        Span::styled("Inventário", Style::default().fg(theme.accent)),
        Span::raw("  "),
        Span::styled("API", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Atualizado", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, status_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts =
        components::hints::hints_to_spans(&components::hints::for_state(state), theme);
    parts.push(components::hints::hint_separator(theme));
    parts.extend(components::hints::hints_to_spans(
        &components::hints::navigation(),
        theme,
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
