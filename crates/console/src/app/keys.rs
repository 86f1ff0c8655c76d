//! Gives raw key actions their meaning for the current view and mode.

use crossterm::event::KeyEvent;

use crate::{
    app::{
        App, AssignFocus, Command, Editing,
        tasks::{ImportKind, ReportKind},
        view::{self, View},
        workflows::StockField,
    },
    ui::keymap::{self, AppAction},
};

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.handle_action(keymap::map_key(key));
    }

    pub fn handle_action(&mut self, action: AppAction) {
        if action == AppAction::Quit {
            self.dispatch(Command::Quit);
            return;
        }
        if self.state.popup.is_some() {
            if matches!(
                action,
                AppAction::Cancel | AppAction::Submit | AppAction::Input('q')
            ) {
                self.dispatch(Command::DismissPopup);
            }
            return;
        }
        if self.state.pending_return.is_some() {
            let command = match action {
                AppAction::Input('y' | 'Y' | 's' | 'S') => Command::ConfirmReturn,
                _ => Command::CancelReturn,
            };
            self.dispatch(command);
            return;
        }
        if let Some(target) = self.state.editing {
            self.edit_text(target, action);
            return;
        }
        let active = self.state.nav.active();
        if active == View::Stock && self.state.stock_form.is_some() {
            self.stock_form_key(action);
            return;
        }
        if active == View::Assign && self.state.assign.focus == AssignFocus::Note {
            self.assign_note_key(action);
            return;
        }

        if let AppAction::Input(ch) = action {
            if let Some(view) = View::from_shortcut(ch) {
                self.dispatch(Command::SwitchView(view));
                return;
            }
            match ch {
                'q' => {
                    self.dispatch(Command::Quit);
                    return;
                }
                'r' => {
                    self.dispatch(Command::Refresh);
                    return;
                }
                _ => {}
            }
        }

        match active {
            View::Dashboard => {}
            View::Stock => self.stock_key(action),
            View::Users => self.users_key(action),
            View::Assign => self.assign_key(action),
            View::Reports => self.reports_key(action),
            View::Import => self.import_key(action),
        }
    }

    fn edit_text(&mut self, target: Editing, action: AppAction) {
        let mut value = match target {
            Editing::StockQuery => self.state.stock.query.clone(),
            Editing::UserQuery => self.state.users.query.clone(),
            Editing::ReportUserId => self.state.reports.user_id.clone(),
            Editing::ImportPath => self.state.import.path.clone(),
        };
        match action {
            AppAction::Input(ch) => value.push(ch),
            AppAction::Backspace => {
                value.pop();
            }
            AppAction::Submit | AppAction::Cancel | AppAction::NextField => {
                self.state.editing = None;
                return;
            }
            _ => return,
        }
        let command = match target {
            Editing::StockQuery => Command::SetStockQuery(value),
            Editing::UserQuery => Command::SetUserQuery(value),
            Editing::ReportUserId => Command::SetReportUserId(value),
            Editing::ImportPath => Command::SetImportPath(value),
        };
        self.dispatch(command);
    }

    fn stock_key(&mut self, action: AppAction) {
        let len = view::stock_visible_indices(&self.state).len();
        match action {
            AppAction::Input('/') => self.state.editing = Some(Editing::StockQuery),
            AppAction::Input('n') => self.dispatch(Command::OpenStockForm),
            AppAction::Input('e') => self.dispatch(Command::Export),
            AppAction::Up => self.state.stock.selected = step_up(self.state.stock.selected),
            AppAction::Down => {
                self.state.stock.selected = step_down(self.state.stock.selected, len);
            }
            _ => {}
        }
    }

    fn stock_form_key(&mut self, action: AppAction) {
        let Some(form) = self.state.stock_form.as_mut() else {
            return;
        };
        let focus = form.focus;
        match action {
            AppAction::Cancel => self.dispatch(Command::CloseStockForm),
            AppAction::Submit => self.dispatch(Command::SubmitStock),
            AppAction::NextField => form.focus = focus.next(),
            AppAction::Up | AppAction::Down if focus == StockField::Type => {
                let types = self.state.store.equipment_types();
                if types.is_empty() {
                    return;
                }
                let cursor = if action == AppAction::Up {
                    step_up(form.type_cursor)
                } else {
                    step_down(form.type_cursor, types.len())
                };
                form.type_cursor = cursor;
                let id = types.get(cursor).map(|kind| kind.id);
                self.dispatch(Command::SelectStockType(id));
            }
            AppAction::Input(_) | AppAction::Backspace => {
                let Some(slot) = form.field_mut(focus) else {
                    return;
                };
                let mut value = slot.clone();
                if let AppAction::Input(ch) = action {
                    value.push(ch);
                } else {
                    value.pop();
                }
                self.dispatch(Command::SetStockField(focus, value));
            }
            _ => {}
        }
    }

    fn users_key(&mut self, action: AppAction) {
        let visible = view::users_visible_indices(&self.state);
        match action {
            AppAction::Input('/') => self.state.editing = Some(Editing::UserQuery),
            AppAction::Input('c') => self.dispatch(Command::CycleCity),
            AppAction::Input('e') => self.dispatch(Command::Export),
            AppAction::Input('v') | AppAction::Submit => {
                let user = visible
                    .get(self.state.users.selected)
                    .and_then(|idx| self.state.store.users().get(*idx))
                    .map(|user| user.id);
                if let Some(id) = user {
                    self.dispatch(Command::ViewUserEquipment(id));
                }
            }
            AppAction::Up => self.state.users.selected = step_up(self.state.users.selected),
            AppAction::Down => {
                self.state.users.selected = step_down(self.state.users.selected, visible.len());
            }
            _ => {}
        }
    }

    fn assign_key(&mut self, action: AppAction) {
        let assign = &mut self.state.assign;
        let available = self.state.store.available_equipment();
        let users = self.state.store.users();
        let allocated = self.state.store.allocated_equipment();

        match (action, assign.focus) {
            (AppAction::NextField, focus) => assign.focus = focus.next(),
            (AppAction::Up, AssignFocus::Equipment) => {
                assign.equipment_cursor = step_up(assign.equipment_cursor);
            }
            (AppAction::Down, AssignFocus::Equipment) => {
                assign.equipment_cursor = step_down(assign.equipment_cursor, available.len());
            }
            (AppAction::Up, AssignFocus::User) => assign.user_cursor = step_up(assign.user_cursor),
            (AppAction::Down, AssignFocus::User) => {
                assign.user_cursor = step_down(assign.user_cursor, users.len());
            }
            (AppAction::Up, AssignFocus::Allocated) => {
                assign.allocated_cursor = step_up(assign.allocated_cursor);
            }
            (AppAction::Down, AssignFocus::Allocated) => {
                assign.allocated_cursor = step_down(assign.allocated_cursor, allocated.len());
            }
            (AppAction::Input(' '), AssignFocus::Equipment) => {
                let id = available.get(assign.equipment_cursor).map(|item| item.id);
                let toggled = if id == assign.equipment_id { None } else { id };
                self.dispatch(Command::SelectAssignEquipment(toggled));
            }
            (AppAction::Input(' '), AssignFocus::User) => {
                let id = users.get(assign.user_cursor).map(|user| user.id);
                let toggled = if id == assign.user_id { None } else { id };
                self.dispatch(Command::SelectAssignUser(toggled));
            }
            (AppAction::Submit | AppAction::Input('d'), AssignFocus::Allocated) => {
                if let Some(instance) = view::allocated_under_cursor(&self.state) {
                    let id = instance.id;
                    self.dispatch(Command::RequestReturn(id));
                }
            }
            (AppAction::Submit, _) => self.dispatch(Command::SubmitAssign),
            _ => {}
        }
    }

    fn assign_note_key(&mut self, action: AppAction) {
        let mut note = self.state.assign.note.clone();
        match action {
            AppAction::Input(ch) => note.push(ch),
            AppAction::Backspace => {
                note.pop();
            }
            AppAction::NextField => {
                self.state.assign.focus = self.state.assign.focus.next();
                return;
            }
            AppAction::Cancel => {
                self.state.assign.focus = AssignFocus::Equipment;
                return;
            }
            AppAction::Submit => {
                self.dispatch(Command::SubmitAssign);
                return;
            }
            _ => return,
        }
        self.dispatch(Command::SetAssignNote(note));
    }

    fn reports_key(&mut self, action: AppAction) {
        let reports = &mut self.state.reports;
        match action {
            AppAction::Up => reports.cursor = step_up(reports.cursor),
            AppAction::Down => reports.cursor = step_down(reports.cursor, ReportKind::ALL.len()),
            AppAction::Input('i') | AppAction::Input('/') => {
                reports.cursor = ReportKind::ALL
                    .iter()
                    .position(|kind| *kind == ReportKind::User)
                    .unwrap_or(reports.cursor);
                self.state.editing = Some(Editing::ReportUserId);
            }
            AppAction::Submit => {
                let kind = reports.selected();
                self.dispatch(Command::GenerateReport(kind));
            }
            _ => {}
        }
    }

    fn import_key(&mut self, action: AppAction) {
        match action {
            AppAction::NextField | AppAction::Up | AppAction::Down => {
                let kind = match self.state.import.kind {
                    ImportKind::Users => ImportKind::Equipment,
                    ImportKind::Equipment => ImportKind::Users,
                };
                self.dispatch(Command::SetImportKind(kind));
            }
            AppAction::Input('i') | AppAction::Input('/') => {
                self.state.editing = Some(Editing::ImportPath);
            }
            AppAction::Submit => self.dispatch(Command::SubmitImport),
            _ => {}
        }
    }
}

fn step_up(cursor: usize) -> usize {
    cursor.saturating_sub(1)
}

fn step_down(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (cursor + 1).min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_steps_stay_in_bounds() {
        assert_eq!(step_up(0), 0);
        assert_eq!(step_down(0, 0), 0);
        assert_eq!(step_down(1, 3), 2);
        assert_eq!(step_down(2, 3), 2);
    }
}
