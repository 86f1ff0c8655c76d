mod support;

use api_types::{
    assignment::AssignRequest,
    equipment::EquipmentStatus,
};
use axum::http::Method;
use inventory_console::client::{Client, ClientError};
use serde_json::json;

use support::{API_KEY, Backend, instance, user};

fn client(backend: &Backend) -> Client {
    Client::new(&backend.base_url, API_KEY).unwrap()
}

#[tokio::test]
async fn list_users_decodes_optional_fields() {
    let backend = Backend::start().await;
    backend.respond(
        Method::GET,
        "/users",
        200,
        json!([user(1, "Ana", Some("Recife")), {"id": 2, "nome": "Bia"}]),
    );

    let users = client(&backend).users_list().await.unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].cidade.as_deref(), Some("Recife"));
    assert_eq!(users[1].cpf, None);
    assert_eq!(users[1].updated_at, None);
}

#[tokio::test]
async fn status_filter_uses_backend_enum_names() {
    let backend = Backend::start().await;
    backend.respond(
        Method::GET,
        "/equipment-instances",
        200,
        json!([instance(1, "em manutenção", None)]),
    );

    let items = client(&backend)
        .equipment_instances_list(Some(EquipmentStatus::InMaintenance))
        .await
        .unwrap();

    let hits = backend.hits_to(Method::GET, "/equipment-instances");
    assert_eq!(hits[0].query.as_deref(), Some("status=em_manutencao"));
    assert_eq!(items[0].status, Some(EquipmentStatus::InMaintenance));
}

#[tokio::test]
async fn structured_error_keeps_server_message() {
    let backend = Backend::start().await;
    backend.respond(
        Method::POST,
        "/assign",
        400,
        json!({"error": "instance not available"}),
    );
    let payload = AssignRequest {
        equipment_instance_id: 7,
        to_user_id: 3,
        note: String::new(),
    };

    let err = client(&backend).assign(&payload).await.unwrap_err();

    match &err {
        ClientError::Api { status, message } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message.as_deref(), Some("instance not available"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.server_message(), Some("instance not available"));
}

#[tokio::test]
async fn unstructured_error_has_no_message() {
    let backend = Backend::start().await;
    backend.respond_raw(Method::GET, "/stock", 500, "Internal Server Error");

    let err = client(&backend).stock_list().await.unwrap_err();

    assert!(!err.is_transport());
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn undecodable_success_body_is_a_transport_error() {
    let backend = Backend::start().await;
    backend.respond_raw(Method::GET, "/users", 200, "not json");

    let err = client(&backend).users_list().await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn writes_carry_the_api_key_and_reads_do_not() {
    let backend = Backend::start().await;
    backend.respond(Method::POST, "/assign", 200, json!({}));
    backend.respond(Method::GET, "/users", 200, json!([]));
    let client = client(&backend);

    client
        .assign(&AssignRequest {
            equipment_instance_id: 1,
            to_user_id: 2,
            note: "x".to_string(),
        })
        .await
        .unwrap();
    client.users_list().await.unwrap();

    assert_eq!(
        backend.hits_to(Method::POST, "/assign")[0].api_key.as_deref(),
        Some(API_KEY)
    );
    assert_eq!(backend.hits_to(Method::GET, "/users")[0].api_key, None);
}

#[test]
fn invalid_base_url_is_rejected() {
    assert!(Client::new("not a url", API_KEY).is_err());
}
