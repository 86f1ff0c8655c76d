pub mod keys;
pub mod tasks;
pub mod view;
pub mod workflows;

use std::time::{Duration, Instant};

use api_types::reports::{StockSummary, UserReport};
use chrono::{DateTime, Local};
use crossterm::event::{self, Event};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    export,
    filter::FacetOption,
    notify::Notifier,
    store::{Collection, CollectionStore},
    ui,
};

use self::{
    tasks::{ImportKind, ImportSummary, Outcome, Report, ReportKind, ReportRequest, Task},
    view::{ALL_CITIES, Navigation, View},
    workflows::{StockField, StockForm, failure_message, parse_user_id},
};

/// Everything the UI does goes through one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    SwitchView(View),
    Refresh,
    SetStockQuery(String),
    SetUserQuery(String),
    /// Exact city value; empty selects every city.
    SetCity(String),
    CycleCity,
    SelectAssignEquipment(Option<i64>),
    SelectAssignUser(Option<i64>),
    SetAssignNote(String),
    SubmitAssign,
    /// Asks for confirmation before returning the instance.
    RequestReturn(i64),
    ConfirmReturn,
    CancelReturn,
    OpenStockForm,
    CloseStockForm,
    SetStockField(StockField, String),
    SelectStockType(Option<i64>),
    SubmitStock,
    SetReportUserId(String),
    GenerateReport(ReportKind),
    SetImportKind(ImportKind),
    SetImportPath(String),
    SubmitImport,
    ViewUserEquipment(i64),
    DismissPopup,
    Export,
}

/// Text input currently receiving keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Editing {
    StockQuery,
    UserQuery,
    ReportUserId,
    ImportPath,
}

#[derive(Debug, Default)]
pub struct StockViewState {
    pub query: String,
    pub selected: usize,
}

#[derive(Debug)]
pub struct UsersViewState {
    pub query: String,
    pub city_options: Vec<FacetOption>,
    pub city_index: usize,
    pub selected: usize,
}

impl Default for UsersViewState {
    fn default() -> Self {
        Self {
            query: String::new(),
            city_options: vec![FacetOption {
                label: ALL_CITIES.to_string(),
                value: String::new(),
            }],
            city_index: 0,
            selected: 0,
        }
    }
}

impl UsersViewState {
    /// Selected city value; empty means every city.
    pub fn city(&self) -> &str {
        self.city_options
            .get(self.city_index)
            .map(|option| option.value.as_str())
            .unwrap_or("")
    }

    pub fn city_label(&self) -> &str {
        self.city_options
            .get(self.city_index)
            .map(|option| option.label.as_str())
            .unwrap_or(ALL_CITIES)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignFocus {
    #[default]
    Equipment,
    User,
    Note,
    Allocated,
}

impl AssignFocus {
    pub fn next(self) -> Self {
        match self {
            Self::Equipment => Self::User,
            Self::User => Self::Note,
            Self::Note => Self::Allocated,
            Self::Allocated => Self::Equipment,
        }
    }
}

#[derive(Debug, Default)]
pub struct AssignState {
    pub equipment_id: Option<i64>,
    pub user_id: Option<i64>,
    pub note: String,
    pub focus: AssignFocus,
    pub equipment_cursor: usize,
    pub user_cursor: usize,
    pub allocated_cursor: usize,
}

impl AssignState {
    pub fn reset_form(&mut self) {
        self.equipment_id = None;
        self.user_id = None;
        self.note.clear();
    }
}

#[derive(Debug, Default)]
pub struct ReportsState {
    pub cursor: usize,
    pub user_id: String,
    pub output: Option<Report>,
}

impl ReportsState {
    pub fn selected(&self) -> ReportKind {
        ReportKind::ALL
            .get(self.cursor)
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct ImportState {
    pub kind: ImportKind,
    pub path: String,
    pub result: Option<ImportSummary>,
}

#[derive(Debug)]
pub struct AppState {
    pub nav: Navigation,
    pub store: CollectionStore,
    pub summary: Option<StockSummary>,
    pub stock: StockViewState,
    pub stock_form: Option<StockForm>,
    pub users: UsersViewState,
    pub assign: AssignState,
    /// Instance waiting for the user to confirm its return.
    pub pending_return: Option<i64>,
    pub reports: ReportsState,
    pub import: ImportState,
    /// Equipment held by a user, shown over the active view.
    pub popup: Option<UserReport>,
    pub editing: Option<Editing>,
    pub notifier: Notifier,
    /// `None` until the first health check answers.
    pub online: Option<bool>,
    pub last_refresh: Option<DateTime<Local>>,
    pub base_url: String,
}

pub struct App {
    config: AppConfig,
    client: Client,
    pub state: AppState,
    tx: UnboundedSender<Outcome>,
    rx: UnboundedReceiver<Outcome>,
    in_flight: usize,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url, &config.api_key)?;
        let (tx, rx) = mpsc::unbounded_channel();
        let state = AppState {
            nav: Navigation::default(),
            store: CollectionStore::new(),
            summary: None,
            stock: StockViewState::default(),
            stock_form: None,
            users: UsersViewState::default(),
            assign: AssignState::default(),
            pending_return: None,
            reports: ReportsState::default(),
            import: ImportState::default(),
            popup: None,
            editing: None,
            notifier: Notifier::new(Duration::from_secs(config.toast_seconds)),
            online: None,
            last_refresh: None,
            base_url: config.base_url.clone(),
        };

        Ok(Self {
            config,
            client,
            state,
            tx,
            rx,
            in_flight: 0,
            should_quit: false,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Requests spawned and not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Health check plus the dashboard load. Needs a tokio runtime.
    pub fn start(&mut self) {
        self.spawn(Task::Health);
        let view = self.state.nav.active();
        self.run_load_plan(view, view.load_plan());
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        self.start();
        let result = self.event_loop(&mut terminal);
        ui::restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            self.drain();
            self.state.notifier.expire(Instant::now());

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Runs `task` off the UI loop; its outcome comes back through the channel.
    pub(crate) fn spawn(&mut self, task: Task) {
        tracing::debug!(?task, "spawn");
        self.in_flight += 1;
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = tasks::execute(&client, task).await;
            if tx.send(outcome).is_err() {
                tracing::debug!("app gone, outcome dropped");
            }
        });
    }

    /// Applies every outcome already delivered, without waiting.
    pub fn drain(&mut self) {
        while let Ok(outcome) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            self.apply(outcome);
        }
    }

    /// Waits until every spawned request has been applied.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            let Some(outcome) = self.rx.recv().await else {
                break;
            };
            self.in_flight -= 1;
            self.apply(outcome);
        }
    }

    pub fn dispatch(&mut self, command: Command) {
        tracing::trace!(?command, "dispatch");
        match command {
            Command::Quit => self.should_quit = true,
            Command::SwitchView(view) => self.switch_view(view),
            Command::Refresh => self.refresh_view(),
            Command::SetStockQuery(query) => {
                self.state.stock.query = query;
                self.state.stock.selected = 0;
            }
            Command::SetUserQuery(query) => {
                self.state.users.query = query;
                self.state.users.selected = 0;
            }
            Command::SetCity(value) => {
                self.state.users.city_index = self
                    .state
                    .users
                    .city_options
                    .iter()
                    .position(|option| option.value == value)
                    .unwrap_or(0);
                self.state.users.selected = 0;
            }
            Command::CycleCity => {
                let len = self.state.users.city_options.len().max(1);
                self.state.users.city_index = (self.state.users.city_index + 1) % len;
                self.state.users.selected = 0;
            }
            Command::SelectAssignEquipment(id) => self.state.assign.equipment_id = id,
            Command::SelectAssignUser(id) => self.state.assign.user_id = id,
            Command::SetAssignNote(note) => self.state.assign.note = note,
            Command::SubmitAssign => self.submit_assign(),
            Command::RequestReturn(id) => self.state.pending_return = Some(id),
            Command::ConfirmReturn => {
                if let Some(id) = self.state.pending_return {
                    self.submit_return(id);
                }
            }
            Command::CancelReturn => self.state.pending_return = None,
            Command::OpenStockForm => self.open_stock_form(),
            Command::CloseStockForm => self.state.stock_form = None,
            Command::SetStockField(field, value) => {
                if let Some(slot) = self
                    .state
                    .stock_form
                    .as_mut()
                    .and_then(|form| form.field_mut(field))
                {
                    *slot = value;
                }
            }
            Command::SelectStockType(id) => {
                if let Some(form) = self.state.stock_form.as_mut() {
                    form.type_id = id;
                }
            }
            Command::SubmitStock => self.submit_stock(),
            Command::SetReportUserId(raw) => self.state.reports.user_id = raw,
            Command::GenerateReport(kind) => self.generate_report(kind),
            Command::SetImportKind(kind) => self.state.import.kind = kind,
            Command::SetImportPath(path) => self.state.import.path = path,
            Command::SubmitImport => self.submit_import(self.state.import.kind),
            Command::ViewUserEquipment(user_id) => self.spawn(Task::UserEquipment(user_id)),
            Command::DismissPopup => self.state.popup = None,
            Command::Export => self.export_view(),
        }
    }

    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Loaded {
                origin,
                key,
                result,
            } => match self.state.store.apply(key, result) {
                Ok(()) => {
                    self.mark_refreshed();
                    self.on_collection_replaced(key);
                }
                Err(err) => {
                    self.note_failure(&err);
                    if let Some(message) = load_failure_message(origin, key) {
                        self.state.notifier.error(message);
                    }
                }
            },
            Outcome::Summary(result) => match result {
                Ok(summary) => {
                    self.mark_refreshed();
                    self.state.summary = Some(summary);
                }
                Err(err) => {
                    tracing::warn!("stock summary failed: {err}");
                    self.note_failure(&err);
                    self.state.notifier.error("Erro ao carregar dashboard");
                }
            },
            Outcome::Health(result) => match result {
                Ok(health) => {
                    tracing::info!(status = %health.status, "backend reachable");
                    self.state.online = Some(true);
                }
                Err(err) => {
                    tracing::warn!("health check failed: {err}");
                    self.state.online = Some(false);
                }
            },
            Outcome::Assigned(result) => self.on_assigned(result),
            Outcome::Returned(result) => self.on_returned(result),
            Outcome::StockCreated(result) => self.on_stock_created(result),
            Outcome::Imported { kind, result } => self.on_imported(kind, result),
            Outcome::Report(result) => match result {
                Ok(report) => self.state.reports.output = Some(report),
                Err(err) => {
                    self.note_failure(&err);
                    self.state
                        .notifier
                        .error(failure_message(&err, "Erro ao gerar relatório"));
                }
            },
            Outcome::UserEquipment(result) => match result {
                Ok(report) if report.equipment.is_empty() => {
                    self.state
                        .notifier
                        .info("Usuário não possui equipamentos alocados");
                }
                Ok(report) => self.state.popup = Some(report),
                Err(err) => {
                    self.note_failure(&err);
                    self.state
                        .notifier
                        .error(failure_message(&err, "Erro ao buscar equipamentos"));
                }
            },
        }
    }

    fn generate_report(&mut self, kind: ReportKind) {
        let request = match kind {
            ReportKind::StockSummary => ReportRequest::StockSummary,
            ReportKind::ValueSummary => ReportRequest::ValueSummary,
            ReportKind::Movements => ReportRequest::Movements {
                limit: self.config.movements_limit,
            },
            ReportKind::User => match parse_user_id(&self.state.reports.user_id) {
                Ok(id) => ReportRequest::User { id },
                Err(err) => {
                    self.state.notifier.error(err.to_string());
                    return;
                }
            },
        };
        self.spawn(Task::Report(request));
    }

    fn export_view(&mut self) {
        let now = Local::now().naive_local();
        let dir = self.config.export_dir.clone();
        let result = match self.state.nav.active() {
            View::Stock => {
                let items = self.state.store.stock();
                let rows: Vec<_> = view::stock_visible_indices(&self.state)
                    .into_iter()
                    .filter_map(|idx| items.get(idx))
                    .collect();
                export::write_stock(&dir, now, &rows)
            }
            View::Users => {
                let items = self.state.store.users();
                let rows: Vec<_> = view::users_visible_indices(&self.state)
                    .into_iter()
                    .filter_map(|idx| items.get(idx))
                    .collect();
                export::write_users(&dir, now, &rows)
            }
            _ => {
                self.state
                    .notifier
                    .info("Exportação disponível em Estoque e Usuários");
                return;
            }
        };

        match result {
            Ok(path) => {
                tracing::info!(path = %path.display(), "exported");
                self.state
                    .notifier
                    .success(format!("Exportado para {}", path.display()));
            }
            Err(err) => {
                tracing::warn!("export failed: {err}");
                self.state.notifier.error(format!("Erro ao exportar: {err}"));
            }
        }
    }

    fn mark_refreshed(&mut self) {
        self.state.online = Some(true);
        self.state.last_refresh = Some(Local::now());
    }

    /// Transport failures flip the connection indicator.
    pub(crate) fn note_failure(&mut self, err: &ClientError) {
        if err.is_transport() {
            self.state.online = Some(false);
        }
    }
}

/// Notification for a failed view load. Assign sub-fetches stay silent.
fn load_failure_message(origin: View, key: Collection) -> Option<&'static str> {
    match (origin, key) {
        (View::Assign, _) => None,
        (_, Collection::Stock) => Some("Erro ao carregar estoque"),
        (_, Collection::Users) => Some("Erro ao carregar usuários"),
        (_, Collection::EquipmentTypes) => Some("Erro ao carregar tipos de equipamento"),
        (_, Collection::AvailableEquipment | Collection::AllocatedEquipment) => {
            Some("Erro ao carregar equipamentos")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_sub_fetch_failures_are_silent() {
        for key in [
            Collection::AvailableEquipment,
            Collection::Users,
            Collection::AllocatedEquipment,
        ] {
            assert_eq!(load_failure_message(View::Assign, key), None);
        }
        assert_eq!(
            load_failure_message(View::Users, Collection::Users),
            Some("Erro ao carregar usuários")
        );
        assert_eq!(
            load_failure_message(View::Stock, Collection::Stock),
            Some("Erro ao carregar estoque")
        );
    }

    #[test]
    fn city_falls_back_to_all() {
        let mut users = UsersViewState::default();
        assert_eq!(users.city(), "");
        assert_eq!(users.city_label(), ALL_CITIES);
        users.city_index = 5;
        assert_eq!(users.city(), "");
    }

    #[test]
    fn assign_focus_cycles() {
        let mut focus = AssignFocus::default();
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, AssignFocus::Equipment);
    }

    #[test]
    fn reset_keeps_cursors() {
        let mut assign = AssignState {
            equipment_id: Some(7),
            user_id: Some(3),
            note: "x".to_string(),
            equipment_cursor: 2,
            ..AssignState::default()
        };
        assign.reset_form();
        assert_eq!(assign.equipment_id, None);
        assert_eq!(assign.user_id, None);
        assert!(assign.note.is_empty());
        assert_eq!(assign.equipment_cursor, 2);
    }
}
