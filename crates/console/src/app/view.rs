//! View state machine and per-view load plans.

use api_types::equipment::EquipmentInstance;

use crate::{
    app::{App, tasks::Task},
    filter::{self, Predicate},
    store::Collection,
};

pub const ALL_CITIES: &str = "Todas as cidades";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Dashboard,
    Stock,
    Users,
    Assign,
    Reports,
    Import,
}

/// One fetch of a view's load routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Load {
    StockSummary,
    Collection(Collection),
}

impl View {
    pub const ALL: [View; 6] = [
        View::Dashboard,
        View::Stock,
        View::Users,
        View::Assign,
        View::Reports,
        View::Import,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Stock => "Estoque",
            Self::Users => "Usuários",
            Self::Assign => "Destinações",
            Self::Reports => "Relatórios",
            Self::Import => "Importação",
        }
    }

    /// Navigation key (`1`..`6`).
    pub fn shortcut(self) -> char {
        match self {
            Self::Dashboard => '1',
            Self::Stock => '2',
            Self::Users => '3',
            Self::Assign => '4',
            Self::Reports => '5',
            Self::Import => '6',
        }
    }

    pub fn from_shortcut(ch: char) -> Option<View> {
        Self::ALL.into_iter().find(|view| view.shortcut() == ch)
    }

    /// Fetches run every time the view is entered. Reports and import load
    /// nothing eagerly.
    pub fn load_plan(self) -> &'static [Load] {
        match self {
            Self::Dashboard => &[Load::StockSummary],
            Self::Stock => &[Load::Collection(Collection::Stock)],
            Self::Users => &[Load::Collection(Collection::Users)],
            Self::Assign => &[
                Load::Collection(Collection::AvailableEquipment),
                Load::Collection(Collection::Users),
                Load::Collection(Collection::AllocatedEquipment),
            ],
            Self::Reports | Self::Import => &[],
        }
    }
}

/// Which view is active. Tabs and content regions are both derived from
/// this single field, so exactly one of each is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    active: View,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            active: View::Dashboard,
        }
    }
}

impl Navigation {
    pub fn active(&self) -> View {
        self.active
    }

    pub fn is_active(&self, view: View) -> bool {
        self.active == view
    }

    /// Activates `view` and returns the loads to run.
    pub fn switch(&mut self, view: View) -> &'static [Load] {
        self.active = view;
        view.load_plan()
    }

    /// Tab bar state: every view with its active flag.
    pub fn tabs(&self) -> [(View, bool); 6] {
        View::ALL.map(|view| (view, self.is_active(view)))
    }
}

impl App {
    pub(crate) fn switch_view(&mut self, view: View) {
        tracing::info!(?view, "switch view");
        self.state.pending_return = None;
        let plan = self.state.nav.switch(view);
        self.run_load_plan(view, plan);
    }

    pub(crate) fn refresh_view(&mut self) {
        let view = self.state.nav.active();
        self.run_load_plan(view, view.load_plan());
    }

    pub(crate) fn run_load_plan(&mut self, origin: View, plan: &[Load]) {
        for load in plan {
            self.spawn(Task::Load {
                origin,
                load: *load,
            });
        }
    }

    /// Derived state refreshed after a collection snapshot changes.
    pub(crate) fn on_collection_replaced(&mut self, key: Collection) {
        match key {
            Collection::Users => {
                let previous = self.state.users.city().to_string();
                self.state.users.city_options =
                    filter::facet_options(self.state.store.users(), ALL_CITIES);
                self.state.users.city_index = self
                    .state
                    .users
                    .city_options
                    .iter()
                    .position(|option| option.value == previous)
                    .unwrap_or(0);
                let visible = users_visible_indices(&self.state).len();
                self.state.users.selected = clamp(self.state.users.selected, visible);
                let users = self.state.store.users().len();
                self.state.assign.user_cursor = clamp(self.state.assign.user_cursor, users);
            }
            Collection::Stock => {
                let visible = stock_visible_indices(&self.state).len();
                self.state.stock.selected = clamp(self.state.stock.selected, visible);
            }
            Collection::AvailableEquipment => {
                let len = self.state.store.available_equipment().len();
                self.state.assign.equipment_cursor =
                    clamp(self.state.assign.equipment_cursor, len);
            }
            Collection::AllocatedEquipment => {
                let len = self.state.store.allocated_equipment().len();
                self.state.assign.allocated_cursor =
                    clamp(self.state.assign.allocated_cursor, len);
            }
            Collection::EquipmentTypes => {
                if let Some(form) = self.state.stock_form.as_mut() {
                    let types = self.state.store.equipment_types();
                    form.type_cursor = clamp(form.type_cursor, types.len());
                    // The highlighted row is the selection until the user moves.
                    if !types.iter().any(|kind| Some(kind.id) == form.type_id) {
                        form.type_id = types.get(form.type_cursor).map(|kind| kind.id);
                    }
                }
            }
        }
    }
}

fn clamp(cursor: usize, len: usize) -> usize {
    cursor.min(len.saturating_sub(1))
}

pub fn stock_predicate(state: &crate::app::AppState) -> Predicate {
    Predicate::text(state.stock.query.clone())
}

pub fn users_predicate(state: &crate::app::AppState) -> Predicate {
    Predicate {
        text: state.users.query.clone(),
        facet: state.users.city().to_string(),
    }
}

pub fn stock_visible_indices(state: &crate::app::AppState) -> Vec<usize> {
    filter::visible_indices(state.store.stock(), &stock_predicate(state))
}

pub fn users_visible_indices(state: &crate::app::AppState) -> Vec<usize> {
    filter::visible_indices(state.store.users(), &users_predicate(state))
}

/// Allocated instance under the cursor of the assign view.
pub fn allocated_under_cursor(state: &crate::app::AppState) -> Option<&EquipmentInstance> {
    state
        .store
        .allocated_equipment()
        .get(state.assign.allocated_cursor)
}
