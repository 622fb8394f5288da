//! Live screening editor over a websocket.
//!
//! Each connection owns one [`ScreeningEditor`]. Requests look like
//! `{"action": "...", "id": "...", "data": {...}}` and are answered on the
//! same connection with `{"action_type", "status", "data"}`. Schedule
//! events are pushed to every connection with status `event`.

use std::sync::Arc;

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    Extension,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use uuid::Uuid;

use crate::error::Error;
use crate::scheduling::ScreeningFilter;
use crate::state::AppState;
use crate::workflows::{ScreeningDraft, ScreeningEditor};

#[derive(Debug, Deserialize)]
struct Request {
    action: String,
    #[serde(default)]
    id: Option<Uuid>,
    #[serde(default)]
    data: Value,
}

fn envelope(action_type: &str, status: &str, data: Value) -> Message {
    let message = json!({
        "action_type": action_type,
        "status": status,
        "data": data,
    });
    Message::Text(message.to_string().into())
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Extension(state): Extension<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = unbounded_channel::<Message>();

    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if let Err(e) = sender.send(message).await {
                tracing::debug!("websocket send failed: {e}");
                break;
            }
        }
    });

    let events = tokio::spawn(forward_events(state.clone(), tx.clone()));

    tracing::debug!("websocket connected");
    let mut editor = ScreeningEditor::new(state);

    while let Some(message) = receiver.next().await {
        let text = match message {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::debug!("websocket receive failed: {e}");
                break;
            }
        };

        let reply = match serde_json::from_str::<Request>(text.as_str()) {
            Ok(request) => handle_request(&mut editor, request).await,
            Err(e) => envelope("error", "error", json!({ "message": format!("malformed request: {e}") })),
        };
        if tx.send(reply).is_err() {
            break;
        }
    }

    events.abort();
    writer.abort();
    tracing::debug!("websocket disconnected");
}

/// Push every schedule event to this connection until it goes away.
async fn forward_events(state: Arc<AppState>, tx: UnboundedSender<Message>) {
    let mut events = state.notifier.subscribe();
    loop {
        match events.recv().await {
            Ok(event) => {
                let data = serde_json::to_value(&event).unwrap_or(Value::Null);
                if tx.send(envelope(event.name(), "event", data)).is_err() {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "websocket client fell behind on schedule events");
            }
            Err(RecvError::Closed) => break,
        }
    }
}

async fn handle_request(editor: &mut ScreeningEditor, request: Request) -> Message {
    let action = request.action.as_str();
    match dispatch(editor, &request).await {
        Ok(data) => envelope(action, "success", data),
        Err(e) => {
            tracing::debug!(action, "websocket request failed: {e}");
            envelope(action, "error", json!({ "error": e.to_json(), "editor": form_view(editor) }))
        }
    }
}

async fn dispatch(editor: &mut ScreeningEditor, request: &Request) -> Result<Value, Error> {
    match request.action.as_str() {
        "get_screenings" => {
            let filter: ScreeningFilter = parse_data(&request.data)?;
            Ok(json!(editor.state().query().screening_rows(&filter)))
        }
        "get_form" => Ok(form_view(editor)),
        "update_form" => {
            editor.apply(parse_data(&request.data)?);
            Ok(form_view(editor))
        }
        "load_screening" => {
            let id = request
                .id
                .ok_or_else(|| Error::Validation("missing screening id".to_string()))?;
            editor.load(id)?;
            Ok(form_view(editor))
        }
        "submit_screening" => {
            let draft: ScreeningDraft = parse_data(&request.data)?;
            editor.apply(draft);
            let screening = editor.submit().await?;
            Ok(json!({ "screening": screening, "editor": form_view(editor) }))
        }
        "delete_screening" => {
            let screening = editor.delete().await?;
            Ok(json!({ "screening": screening, "editor": form_view(editor) }))
        }
        "reset" => {
            editor.reset();
            Ok(form_view(editor))
        }
        other => Err(Error::Validation(format!("unsupported action '{other}'"))),
    }
}

fn parse_data<T: Default + serde::de::DeserializeOwned>(data: &Value) -> Result<T, Error> {
    if data.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(data.clone()).map_err(|e| Error::Validation(format!("malformed data: {e}")))
}

fn form_view(editor: &ScreeningEditor) -> Value {
    json!({
        "form": editor.form(),
        "halls": editor.hall_options(),
        "can_submit": editor.can_submit(),
    })
}
