//! In-process fake of the inventory backend.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use inventory_console::{App, config::AppConfig};
use serde_json::{Value, json};

pub const API_KEY: &str = "test-key";

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub api_key: Option<String>,
    pub body: Bytes,
}

impl Hit {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct Inner {
    hits: Vec<Hit>,
    routes: HashMap<(Method, String), (StatusCode, String)>,
}

type Shared = Arc<Mutex<Inner>>;

pub struct Backend {
    pub base_url: String,
    inner: Shared,
}

impl Backend {
    /// Binds `127.0.0.1:0` and serves until the test runtime stops.
    pub async fn start() -> Self {
        let inner: Shared = Arc::default();
        let router = Router::new().fallback(handle).with_state(inner.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let backend = Self {
            base_url: format!("http://{addr}/api"),
            inner,
        };
        backend.respond(Method::GET, "/health", 200, json!({"status": "healthy"}));
        backend
    }

    /// Answers `method path` (relative to `/api`) with a JSON body. `path` may
    /// carry a query string, which then has to match exactly.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.respond_raw(method, path, status, &body.to_string());
    }

    pub fn respond_raw(&self, method: Method, path: &str, status: u16, body: &str) {
        let status = StatusCode::from_u16(status).unwrap();
        self.inner
            .lock()
            .unwrap()
            .routes
            .insert((method, format!("/api{path}")), (status, body.to_string()));
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.inner.lock().unwrap().hits.clone()
    }

    pub fn hits_to(&self, method: Method, path: &str) -> Vec<Hit> {
        let path = format!("/api{path}");
        self.hits()
            .into_iter()
            .filter(|hit| hit.method == method && hit.path == path)
            .collect()
    }

    pub fn clear_hits(&self) {
        self.inner.lock().unwrap().hits.clear();
    }

    pub fn config(&self) -> AppConfig {
        AppConfig {
            base_url: self.base_url.clone(),
            api_key: API_KEY.to_string(),
            ..AppConfig::default()
        }
    }

    pub fn app(&self) -> App {
        App::new(self.config()).unwrap()
    }
}

async fn handle(
    State(inner): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let api_key = headers
        .get("x-api-key")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let path = uri.path().to_string();

    let mut inner = inner.lock().unwrap();
    inner.hits.push(Hit {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        api_key,
        body,
    });

    let with_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.clone(),
    };
    let (status, body) = inner
        .routes
        .get(&(method.clone(), with_query))
        .or_else(|| inner.routes.get(&(method, path)))
        .cloned()
        .unwrap_or((
            StatusCode::NOT_FOUND,
            json!({"error": "not found"}).to_string(),
        ));
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub fn user(id: i64, nome: &str, cidade: Option<&str>) -> Value {
    json!({
        "id": id,
        "nome": nome,
        "cpf": null,
        "cargo": "Analista",
        "cidade": cidade,
        "setor": null,
        "email": null,
        "matricula": format!("M-{id:03}"),
        "updated_at": "2024-01-02T10:00:00"
    })
}

pub fn instance(id: i64, status: &str, holder: Option<Value>) -> Value {
    json!({
        "id": id,
        "stock_item_id": 1,
        "stock_item": {
            "id": 1,
            "equipment_type_id": 1,
            "equipment_type": {"id": 1, "nome": "Notebook", "marca": "Dell", "modelo": "Latitude"},
            "quantidade": 1,
            "valor_unitario": 100.0,
            "valor_total": 100.0
        },
        "patrimonial": format!("PAT-{id:03}"),
        "serial": null,
        "status": status,
        "current_user_id": holder.as_ref().and_then(|u| u.get("id").cloned()),
        "current_user": holder,
        "assigned_at": null
    })
}

pub fn stock_entry(id: i64, nome: &str, marca: &str) -> Value {
    json!({
        "id": id,
        "equipment_type_id": id,
        "equipment_type": {"id": id, "nome": nome, "marca": marca, "modelo": null},
        "nota_numero": "NF-1",
        "nota_data": "2024-01-15",
        "quantidade": 2,
        "valor_unitario": 10.5,
        "valor_total": 21.0,
        "origem": "compra"
    })
}

/// Backend with the three collections of the assign view populated.
pub async fn assign_backend() -> Backend {
    let backend = Backend::start().await;
    backend.respond(
        Method::GET,
        "/equipment-instances?status=disponivel",
        200,
        json!([instance(7, "disponível", None)]),
    );
    backend.respond(
        Method::GET,
        "/equipment-instances?status=alocado",
        200,
        json!([instance(9, "alocado", Some(user(4, "Bia", None)))]),
    );
    backend.respond(
        Method::GET,
        "/users",
        200,
        json!([user(3, "Ana", Some("Recife")), user(4, "Bia", None)]),
    );
    backend
}
