use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::view::Navigation, ui::theme::Theme};

/// Tab bar; the active view is bracketed.
pub fn render_tabs(frame: &mut Frame<'_>, area: Rect, nav: &Navigation, theme: &Theme) {
    let mut spans = vec![Span::raw(" ")];

    for (i, (view, active)) in nav.tabs().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let label = format!("{} {}", view.shortcut(), view.label());
        if active {
            spans.push(Span::styled("[", Style::default().fg(theme.accent)));
            spans.push(Span::styled(
                label,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled("]", Style::default().fg(theme.accent)));
        } else {
            spans.push(Span::styled(label, Style::default().fg(theme.text_muted)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
