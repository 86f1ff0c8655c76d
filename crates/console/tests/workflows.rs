mod support;

use axum::http::Method;
use inventory_console::{
    Command,
    app::{
        tasks::{ImportKind, ImportSummary, Report, ReportKind},
        view::{View, users_visible_indices},
        workflows::StockField,
    },
    notify::ToastLevel,
};
use serde_json::json;

use support::{API_KEY, Backend, assign_backend, stock_entry, user};

fn toast(app: &inventory_console::App) -> Option<(String, ToastLevel)> {
    app.state
        .notifier
        .current()
        .map(|toast| (toast.message.clone(), toast.level))
}

#[tokio::test]
async fn startup_loads_dashboard_and_health() {
    let backend = Backend::start().await;
    backend.respond(
        Method::GET,
        "/reports/stock-summary",
        200,
        json!({"total": 10, "disponivel": 6, "alocado": 3, "em_manutencao": 1, "baixado": 0, "valor_total_investido": 1234.56}),
    );
    let mut app = backend.app();

    app.start();
    app.settle().await;

    let summary = app.state.summary.unwrap();
    assert_eq!(summary.total, 10);
    assert_eq!(summary.alocado, 3);
    assert_eq!(app.state.online, Some(true));
    assert_eq!(app.state.nav.active(), View::Dashboard);
}

#[tokio::test]
async fn assign_success_reloads_the_assign_view() {
    let backend = assign_backend().await;
    backend.respond(Method::POST, "/assign", 200, json!({"message": "ok"}));
    let mut app = backend.app();
    app.dispatch(Command::SwitchView(View::Assign));
    app.settle().await;
    assert_eq!(app.state.store.available_equipment().len(), 1);
    assert_eq!(app.state.store.allocated_equipment().len(), 1);
    backend.clear_hits();

    app.dispatch(Command::SelectAssignEquipment(Some(7)));
    app.dispatch(Command::SelectAssignUser(Some(3)));
    app.dispatch(Command::SubmitAssign);
    app.settle().await;

    let posts = backend.hits_to(Method::POST, "/assign");
    assert_eq!(posts.len(), 1);
    assert_eq!(
        posts[0].json(),
        json!({"equipment_instance_id": 7, "to_user_id": 3, "note": ""})
    );
    assert_eq!(posts[0].api_key.as_deref(), Some(API_KEY));

    let reloads: Vec<_> = backend
        .hits()
        .into_iter()
        .filter(|hit| hit.method == Method::GET)
        .collect();
    assert_eq!(reloads.len(), 3);
    assert_eq!(backend.hits_to(Method::GET, "/equipment-instances").len(), 2);
    assert_eq!(backend.hits_to(Method::GET, "/users").len(), 1);

    assert_eq!(
        toast(&app),
        Some((
            "Equipamento destinado com sucesso!".to_string(),
            ToastLevel::Success
        ))
    );
    assert_eq!(app.state.assign.equipment_id, None);
    assert_eq!(app.state.assign.user_id, None);
}

#[tokio::test]
async fn assign_rejection_shows_server_message_without_reload() {
    let backend = assign_backend().await;
    backend.respond(
        Method::POST,
        "/assign",
        400,
        json!({"error": "instance not available"}),
    );
    let mut app = backend.app();
    app.dispatch(Command::SwitchView(View::Assign));
    app.settle().await;
    backend.clear_hits();

    app.dispatch(Command::SelectAssignEquipment(Some(7)));
    app.dispatch(Command::SelectAssignUser(Some(3)));
    app.dispatch(Command::SubmitAssign);
    app.settle().await;

    assert_eq!(backend.hits().len(), 1);
    assert_eq!(
        toast(&app),
        Some(("instance not available".to_string(), ToastLevel::Error))
    );
    assert_eq!(app.state.assign.equipment_id, Some(7));
}

#[tokio::test]
async fn assign_without_selection_sends_nothing() {
    let backend = Backend::start().await;
    let mut app = backend.app();

    app.dispatch(Command::SelectAssignEquipment(Some(7)));
    app.dispatch(Command::SubmitAssign);
    app.settle().await;

    assert!(backend.hits().is_empty());
    assert_eq!(
        toast(&app),
        Some(("Selecione equipamento e usuário".to_string(), ToastLevel::Error))
    );
}

#[tokio::test]
async fn assign_sub_fetch_failure_is_silent() {
    let backend = assign_backend().await;
    backend.respond(Method::GET, "/users", 500, json!({"error": "boom"}));
    let mut app = backend.app();

    app.dispatch(Command::SwitchView(View::Assign));
    app.settle().await;

    assert!(app.state.notifier.current().is_none());
    assert!(app.state.store.users().is_empty());
    assert_eq!(app.state.store.available_equipment().len(), 1);
}

#[tokio::test]
async fn return_waits_for_confirmation() {
    let backend = assign_backend().await;
    backend.respond(Method::POST, "/return", 200, json!({}));
    let mut app = backend.app();
    app.dispatch(Command::SwitchView(View::Assign));
    app.settle().await;
    backend.clear_hits();

    app.dispatch(Command::RequestReturn(9));
    app.settle().await;
    assert!(backend.hits().is_empty());
    assert_eq!(app.state.pending_return, Some(9));

    app.dispatch(Command::ConfirmReturn);
    app.settle().await;

    let posts = backend.hits_to(Method::POST, "/return");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].json(), json!({"equipment_instance_id": 9}));
    assert_eq!(posts[0].api_key.as_deref(), Some(API_KEY));
    assert_eq!(app.state.pending_return, None);
    assert_eq!(
        toast(&app),
        Some((
            "Equipamento devolvido com sucesso!".to_string(),
            ToastLevel::Success
        ))
    );
    assert_eq!(backend.hits_to(Method::GET, "/equipment-instances").len(), 2);
}

#[tokio::test]
async fn cancelled_return_sends_nothing() {
    let backend = Backend::start().await;
    let mut app = backend.app();

    app.dispatch(Command::RequestReturn(9));
    app.dispatch(Command::CancelReturn);
    app.settle().await;

    assert!(backend.hits().is_empty());
    assert_eq!(app.state.pending_return, None);
}

#[tokio::test]
async fn add_stock_submits_exact_total() {
    let backend = Backend::start().await;
    backend.respond(
        Method::GET,
        "/equipment-types",
        200,
        json!([{"id": 1, "nome": "Notebook", "marca": "Dell", "modelo": "Latitude"}]),
    );
    backend.respond(Method::POST, "/stock", 201, stock_entry(5, "Notebook", "Dell"));
    backend.respond(Method::GET, "/stock", 200, json!([stock_entry(5, "Notebook", "Dell")]));
    let mut app = backend.app();
    app.dispatch(Command::SwitchView(View::Stock));
    app.dispatch(Command::OpenStockForm);
    app.settle().await;
    assert_eq!(app.state.store.equipment_types().len(), 1);
    backend.clear_hits();

    app.dispatch(Command::SelectStockType(Some(1)));
    app.dispatch(Command::SetStockField(StockField::Quantity, "5".to_string()));
    app.dispatch(Command::SetStockField(StockField::UnitValue, "120.00".to_string()));
    app.dispatch(Command::SetStockField(StockField::InvoiceNumber, "NF-9".to_string()));
    app.dispatch(Command::SubmitStock);
    app.settle().await;

    let posts = backend.hits_to(Method::POST, "/stock");
    assert_eq!(posts.len(), 1);
    let body = posts[0].json();
    assert_eq!(body["equipment_type_id"], json!(1));
    assert_eq!(body["quantidade"], json!(5));
    assert_eq!(body["valor_unitario"], json!(120.0));
    assert_eq!(body["valor_total"], json!(600.0));
    assert_eq!(body["nota_numero"], json!("NF-9"));
    assert_eq!(body["instances"], json!([]));
    assert_eq!(posts[0].api_key.as_deref(), Some(API_KEY));

    assert!(app.state.stock_form.is_none());
    assert_eq!(backend.hits_to(Method::GET, "/stock").len(), 1);
    assert_eq!(
        toast(&app),
        Some(("Entrada adicionada com sucesso!".to_string(), ToastLevel::Success))
    );
}

#[tokio::test]
async fn stock_form_selects_highlighted_type_on_load() {
    let backend = Backend::start().await;
    backend.respond(
        Method::GET,
        "/equipment-types",
        200,
        json!([{"id": 4, "nome": "Monitor"}, {"id": 1, "nome": "Notebook"}]),
    );
    backend.respond(Method::POST, "/stock", 201, stock_entry(5, "Monitor", "LG"));
    backend.respond(Method::GET, "/stock", 200, json!([]));
    let mut app = backend.app();
    app.dispatch(Command::SwitchView(View::Stock));
    app.dispatch(Command::OpenStockForm);
    app.settle().await;

    let form = app.state.stock_form.as_ref().unwrap();
    assert_eq!(form.type_cursor, 0);
    assert_eq!(form.type_id, Some(4));
    backend.clear_hits();

    app.dispatch(Command::SetStockField(StockField::Quantity, "2".to_string()));
    app.dispatch(Command::SetStockField(StockField::UnitValue, "10".to_string()));
    app.dispatch(Command::SetStockField(StockField::InvoiceDate, "2024-01-15".to_string()));
    app.dispatch(Command::SubmitStock);
    app.settle().await;

    let posts = backend.hits_to(Method::POST, "/stock");
    assert_eq!(posts.len(), 1);
    let body = posts[0].json();
    assert_eq!(body["equipment_type_id"], json!(4));
    assert_eq!(body["nota_data"], json!("2024-01-15"));
}

#[tokio::test]
async fn add_stock_rejects_non_iso_invoice_date() {
    let backend = Backend::start().await;
    let mut app = backend.app();
    app.dispatch(Command::OpenStockForm);
    app.settle().await;
    backend.clear_hits();

    app.dispatch(Command::SelectStockType(Some(1)));
    app.dispatch(Command::SetStockField(StockField::Quantity, "1".to_string()));
    app.dispatch(Command::SetStockField(StockField::UnitValue, "10".to_string()));
    app.dispatch(Command::SetStockField(StockField::InvoiceDate, "15/01/2024".to_string()));
    app.dispatch(Command::SubmitStock);
    app.settle().await;

    assert!(backend.hits().is_empty());
    assert_eq!(
        toast(&app),
        Some(("Data da nota inválida (use AAAA-MM-DD)".to_string(), ToastLevel::Error))
    );
}

#[tokio::test]
async fn add_stock_requires_a_type() {
    let backend = Backend::start().await;
    let mut app = backend.app();
    app.dispatch(Command::OpenStockForm);
    app.settle().await;
    backend.clear_hits();

    app.dispatch(Command::SetStockField(StockField::Quantity, "5".to_string()));
    app.dispatch(Command::SubmitStock);
    app.settle().await;

    assert!(backend.hits().is_empty());
    assert_eq!(
        toast(&app),
        Some(("Selecione o tipo de equipamento".to_string(), ToastLevel::Error))
    );
    assert!(app.state.stock_form.is_some());
}

#[tokio::test]
async fn reads_never_send_the_api_key() {
    let backend = Backend::start().await;
    backend.respond(Method::GET, "/stock", 200, json!([]));
    let mut app = backend.app();

    app.dispatch(Command::SwitchView(View::Stock));
    app.settle().await;

    let hits = backend.hits_to(Method::GET, "/stock");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].api_key, None);
}

#[tokio::test]
async fn failed_reload_keeps_previous_users() {
    let backend = Backend::start().await;
    backend.respond(
        Method::GET,
        "/users",
        200,
        json!([user(1, "Ana", Some("A")), user(2, "Bia", Some("B"))]),
    );
    let mut app = backend.app();
    app.dispatch(Command::SwitchView(View::Users));
    app.settle().await;
    assert_eq!(app.state.store.users().len(), 2);

    backend.respond(Method::GET, "/users", 500, json!({"error": "database down"}));
    app.dispatch(Command::Refresh);
    app.settle().await;

    assert_eq!(app.state.store.users().len(), 2);
    assert_eq!(
        toast(&app),
        Some(("Erro ao carregar usuários".to_string(), ToastLevel::Error))
    );
}

#[tokio::test]
async fn city_filter_offers_distinct_cities() {
    let backend = Backend::start().await;
    backend.respond(
        Method::GET,
        "/users",
        200,
        json!([user(1, "Ana", Some("A")), user(2, "Bia", Some("B")), user(3, "Caio", None)]),
    );
    let mut app = backend.app();
    app.dispatch(Command::SwitchView(View::Users));
    app.settle().await;

    let options: Vec<(&str, &str)> = app
        .state
        .users
        .city_options
        .iter()
        .map(|option| (option.label.as_str(), option.value.as_str()))
        .collect();
    assert_eq!(
        options,
        vec![("Todas as cidades", ""), ("A", "A"), ("B", "B")]
    );

    app.dispatch(Command::SetCity("A".to_string()));
    assert_eq!(users_visible_indices(&app.state), vec![0]);

    app.dispatch(Command::SetCity(String::new()));
    assert_eq!(users_visible_indices(&app.state), vec![0, 1, 2]);
}

#[tokio::test]
async fn user_without_equipment_gets_info_message() {
    let backend = Backend::start().await;
    backend.respond(
        Method::GET,
        "/reports/user/3",
        200,
        json!({"user": user(3, "Ana", None), "equipment": []}),
    );
    let mut app = backend.app();

    app.dispatch(Command::ViewUserEquipment(3));
    app.settle().await;

    assert!(app.state.popup.is_none());
    assert_eq!(
        toast(&app),
        Some((
            "Usuário não possui equipamentos alocados".to_string(),
            ToastLevel::Info
        ))
    );
}

#[tokio::test]
async fn user_equipment_opens_popup() {
    let backend = Backend::start().await;
    backend.respond(
        Method::GET,
        "/reports/user/4",
        200,
        json!({"user": user(4, "Bia", None), "equipment": [support::instance(9, "alocado", None)]}),
    );
    let mut app = backend.app();

    app.dispatch(Command::ViewUserEquipment(4));
    app.settle().await;

    let popup = app.state.popup.as_ref().unwrap();
    assert_eq!(popup.user.nome, "Bia");
    assert_eq!(popup.equipment.len(), 1);

    app.dispatch(Command::DismissPopup);
    assert!(app.state.popup.is_none());
}

#[tokio::test]
async fn movements_report_uses_configured_limit() {
    let backend = Backend::start().await;
    backend.respond(
        Method::GET,
        "/reports/movements",
        200,
        json!([{"id": 1, "date": "2024-02-01T08:30:00", "type": "destinação", "equipment_instance_id": 7, "from_user_id": null, "to_user_id": 3, "note": null}]),
    );
    let mut app = backend.app();

    app.dispatch(Command::GenerateReport(ReportKind::Movements));
    app.settle().await;

    let hits = backend.hits_to(Method::GET, "/reports/movements");
    assert_eq!(hits[0].query.as_deref(), Some("limit=50"));
    match &app.state.reports.output {
        Some(Report::Movements { limit, rows }) => {
            assert_eq!(*limit, 50);
            assert_eq!(rows.len(), 1);
        }
        other => panic!("unexpected report: {other:?}"),
    }
}

#[tokio::test]
async fn user_report_requires_an_id() {
    let backend = Backend::start().await;
    let mut app = backend.app();

    app.dispatch(Command::SetReportUserId("abc".to_string()));
    app.dispatch(Command::GenerateReport(ReportKind::User));
    app.settle().await;

    assert!(backend.hits().is_empty());
    assert_eq!(
        toast(&app),
        Some(("Digite o ID do usuário".to_string(), ToastLevel::Error))
    );
}

#[tokio::test]
async fn import_uploads_file_and_shows_counts() {
    let backend = Backend::start().await;
    backend.respond(
        Method::POST,
        "/import/users",
        200,
        json!({"stats": {"created": 2, "updated": 1, "errors": 0}, "message": "ok"}),
    );
    let path = std::env::temp_dir().join(format!("inventory_users_{}.csv", std::process::id()));
    std::fs::write(&path, "nome,cpf\nAna,123\n").unwrap();
    let mut app = backend.app();

    app.dispatch(Command::SetImportKind(ImportKind::Users));
    app.dispatch(Command::SetImportPath(path.display().to_string()));
    app.dispatch(Command::SubmitImport);
    app.settle().await;

    let posts = backend.hits_to(Method::POST, "/import/users");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].api_key.as_deref(), Some(API_KEY));
    let body = String::from_utf8_lossy(&posts[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("Ana,123"));

    match app.state.import.result {
        Some(ImportSummary::Users(stats)) => {
            assert_eq!((stats.created, stats.updated, stats.errors), (2, 1, 0));
        }
        other => panic!("unexpected import result: {other:?}"),
    }
    assert!(app.state.import.path.is_empty());
    std::fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn import_requires_a_path() {
    let backend = Backend::start().await;
    let mut app = backend.app();

    app.dispatch(Command::SubmitImport);
    app.settle().await;

    assert!(backend.hits().is_empty());
    assert_eq!(
        toast(&app),
        Some(("Selecione um arquivo".to_string(), ToastLevel::Error))
    );
}

#[tokio::test]
async fn import_failure_falls_back_to_generic_message() {
    let backend = Backend::start().await;
    backend.respond_raw(Method::POST, "/import/equipment", 502, "<html>bad gateway</html>");
    let path = std::env::temp_dir().join(format!("inventory_eq_{}.csv", std::process::id()));
    std::fs::write(&path, "tipo\nNotebook\n").unwrap();
    let mut app = backend.app();

    app.dispatch(Command::SetImportKind(ImportKind::Equipment));
    app.dispatch(Command::SetImportPath(path.display().to_string()));
    app.dispatch(Command::SubmitImport);
    app.settle().await;

    assert_eq!(
        toast(&app),
        Some(("Erro ao importar equipamentos".to_string(), ToastLevel::Error))
    );
    assert!(app.state.import.result.is_none());
    std::fs::remove_file(&path).unwrap();
}

#[tokio::test]
async fn unreachable_backend_marks_offline() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = inventory_console::config::AppConfig::default();
    config.base_url = format!("http://{addr}/api");
    let mut app = inventory_console::App::new(config).unwrap();

    app.dispatch(Command::SwitchView(View::Stock));
    app.settle().await;

    assert_eq!(app.state.online, Some(false));
    assert_eq!(
        toast(&app),
        Some(("Erro ao carregar estoque".to_string(), ToastLevel::Error))
    );
}
