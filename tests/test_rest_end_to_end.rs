//! Controller wired to the real REST stack against a mock backend.

use contact_agenda::client::{AgendaClient, AsyncAgendaClient, AsyncAgendaClientImpl};
use contact_agenda::repositories::{ContactRepository, RestContactRepository};
use contact_agenda::services::messages;
use contact_agenda::{AgendaController, ContactDraft, ContactId};
use mockito::{Matcher, Server};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn controller(server: &Server) -> AgendaController {
    let client = AgendaClient::with_base_url(format!("{}/contactos", server.url()));
    let client = Arc::new(AsyncAgendaClientImpl::new(client)) as Arc<dyn AsyncAgendaClient>;
    let repo = Arc::new(RestContactRepository::new(client)) as Arc<dyn ContactRepository>;
    AgendaController::with_settings(repo, 3, Duration::from_millis(50))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_load_create_and_delete_round() {
    let mut server = Server::new_async().await;

    let list = server
        .mock("GET", "/contactos")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 1, "nombre": "Beto", "telefono": "3007654321", "correo": "b@x.co"}]"#)
        .create_async()
        .await;

    let create = server
        .mock("POST", "/contactos")
        .match_body(Matcher::Json(json!({
            "nombre": "Ana",
            "telefono": "3001234567",
            "correo": "ana@x.co"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "2", "nombre": "Ana", "telefono": "3001234567", "correo": "ana@x.co"}"#)
        .create_async()
        .await;

    let delete = server
        .mock("DELETE", "/contactos/1")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let agenda = controller(&server);
    agenda.load().await.unwrap();
    list.assert_async().await;

    let created = agenda
        .submit(&ContactDraft::new("Ana", "3001234567", "ana@x.co"))
        .await
        .unwrap();
    create.assert_async().await;

    let state = agenda.state().await;
    assert_eq!(state.contacts.len(), 2);
    assert_eq!(state.contacts[1], created);
    assert_eq!(state.banner.unwrap().message, messages::CREATED);

    agenda.delete(&ContactId::new("1").unwrap()).await.unwrap();
    delete.assert_async().await;

    let state = agenda.state().await;
    assert_eq!(state.contacts, vec![created]);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(agenda.state().await.banner.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_backend_down_shows_load_error() {
    let mut server = Server::new_async().await;

    let list = server
        .mock("GET", "/contactos")
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let agenda = controller(&server);
    assert!(agenda.load().await.is_err());
    list.assert_async().await;

    let state = agenda.state().await;
    assert!(!state.loading);
    assert_eq!(state.load_error.as_deref(), Some(messages::LOAD_FAILED));
}
