use ratatui::{style::Style, text::Span};

use crate::{
    app::{AppState, AssignFocus, view::View},
    ui::theme::Theme,
};

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Hints for whatever currently owns the keyboard.
pub fn for_state(state: &AppState) -> Vec<KeyHint> {
    if state.popup.is_some() {
        return vec![KeyHint::new("Esc", "fechar")];
    }
    if state.pending_return.is_some() {
        return vec![KeyHint::new("y", "confirmar"), KeyHint::new("n", "cancelar")];
    }
    if state.editing.is_some() {
        return vec![KeyHint::new("Enter", "ok"), KeyHint::new("Esc", "sair")];
    }

    match state.nav.active() {
        View::Dashboard => vec![KeyHint::new("r", "atualizar")],
        View::Stock if state.stock_form.is_some() => vec![
            KeyHint::new("Tab", "próximo"),
            KeyHint::new("↑↓", "tipo"),
            KeyHint::new("Enter", "salvar"),
            KeyHint::new("Esc", "cancelar"),
        ],
        View::Stock => vec![
            KeyHint::new("/", "buscar"),
            KeyHint::new("n", "nova entrada"),
            KeyHint::new("e", "exportar"),
            KeyHint::new("r", "atualizar"),
        ],
        View::Users => vec![
            KeyHint::new("/", "buscar"),
            KeyHint::new("c", "cidade"),
            KeyHint::new("v", "equipamentos"),
            KeyHint::new("e", "exportar"),
        ],
        View::Assign if state.assign.focus == AssignFocus::Allocated => vec![
            KeyHint::new("Tab", "foco"),
            KeyHint::new("↑↓", "mover"),
            KeyHint::new("d", "devolver"),
        ],
        View::Assign => vec![
            KeyHint::new("Tab", "foco"),
            KeyHint::new("Espaço", "selecionar"),
            KeyHint::new("Enter", "destinar"),
        ],
        View::Reports => vec![
            KeyHint::new("↑↓", "relatório"),
            KeyHint::new("i", "ID do usuário"),
            KeyHint::new("Enter", "gerar"),
        ],
        View::Import => vec![
            KeyHint::new("Tab", "tipo"),
            KeyHint::new("i", "caminho"),
            KeyHint::new("Enter", "importar"),
        ],
    }
}

/// View shortcuts shown on every screen.
pub fn navigation() -> Vec<KeyHint> {
    vec![KeyHint::new("1-6", "telas"), KeyHint::new("q", "sair")]
}
