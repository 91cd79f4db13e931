// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod config;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use config::LimitArgs;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{error, info};
use tradegate::{AdCommand, TransactionCommand};
use tradegate_api::{
    ActorCredentials, AdResponse, AdTransitionRequest, ApiError, AuditEventResponse, BulkOutcome,
    BulkRequest, CreateAdRequest, DeleteAdResponse, ErrorKind, OpenTransactionRequest,
    TransactionResponse, TransactionTransitionRequest, TransitionsResponse,
    ad_draft_from_request, ad_transitions, apply_bulk, audit_trail, create_ad, delete_ad, get_ad,
    get_transaction, open_transaction, resolve_actor, transaction_draft_from_request,
    transaction_transitions, transition_ad, transition_transaction,
};
use tradegate_domain::{Actor, TradeLimits, TransitionKind};
use tradegate_persistence::{InMemoryStore, LifecycleStore, SqlitePersistence};

/// Lifecycle governance server for P2P ads and transactions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Keep state in process memory without `SQLite`. Ignores `--database`.
    #[arg(long)]
    ephemeral: bool,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    #[command(flatten)]
    limits: LimitArgs,
}

type SharedStore = Arc<Mutex<Box<dyn LifecycleStore + Send>>>;

/// Application state shared across handlers.
///
/// Store access is serialised behind one mutex; each request holds it for the
/// whole load, apply and save sequence.
#[derive(Clone)]
struct AppState {
    store: SharedStore,
    limits: Arc<TradeLimits>,
}

impl AppState {
    fn new(store: Box<dyn LifecycleStore + Send>, limits: TradeLimits) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            limits: Arc::new(limits),
        }
    }
}

/// A request body carrying the actor alongside the operation payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct Authenticated<T> {
    #[serde(flatten)]
    actor: ActorCredentials,
    #[serde(flatten)]
    body: T,
}

impl<T> Authenticated<T> {
    fn resolve(self) -> Result<(Actor, T), HttpError> {
        let actor: Actor = resolve_actor(&self.actor.actor_id, &self.actor.actor_roles)?;
        Ok((actor, self.body))
    }
}

/// Actor identity on read requests.
///
/// `actor_roles` is taken as text and resolved like any other role string.
#[derive(Debug, Deserialize)]
struct ActorQuery {
    actor_id: String,
    actor_roles: Option<String>,
}

impl ActorQuery {
    fn resolve(&self) -> Result<Actor, HttpError> {
        let roles: Value = self
            .actor_roles
            .as_ref()
            .map_or(Value::Null, |text| Value::String(text.clone()));
        Ok(resolve_actor(&self.actor_id, &roles)?)
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Machine-readable error kind.
    kind: ErrorKind,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    status: StatusCode,
    kind: ErrorKind,
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            kind: self.kind,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

const fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::AuthenticationFailed => StatusCode::UNAUTHORIZED,
        ErrorKind::Unauthorized => StatusCode::FORBIDDEN,
        ErrorKind::InvalidTransition | ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::ValidationError => StatusCode::BAD_REQUEST,
        ErrorKind::AlreadyExpired => StatusCode::GONE,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let kind: ErrorKind = err.kind();
        if kind == ErrorKind::Internal {
            error!(error = %err, "Internal error");
        }
        Self {
            status: status_for(kind),
            kind,
            message: err.to_string(),
        }
    }
}

fn unknown_operation(resource: &str, op: &str) -> HttpError {
    HttpError {
        status: StatusCode::NOT_FOUND,
        kind: ErrorKind::NotFound,
        message: format!("Unknown {resource} operation '{op}'"),
    }
}

/// Handler for POST `/ads`.
async fn handle_create_ad(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Authenticated<CreateAdRequest>>,
) -> Result<(StatusCode, Json<AdResponse>), HttpError> {
    let (actor, body) = req.resolve()?;
    info!(actor_id = %actor.id(), "Handling create_ad request");

    let draft = ad_draft_from_request(body)?;
    let mut store = app_state.store.lock().await;
    let ad = create_ad(
        &mut *store,
        &actor,
        draft,
        &app_state.limits,
        OffsetDateTime::now_utc(),
    )?;
    drop(store);

    Ok((StatusCode::CREATED, Json(AdResponse::from(&ad))))
}

/// Handler for GET `/ads/{id}`.
async fn handle_get_ad(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<AdResponse>, HttpError> {
    query.resolve()?;
    let mut store = app_state.store.lock().await;
    let ad = get_ad(&mut *store, &id)?;
    drop(store);

    Ok(Json(AdResponse::from(&ad)))
}

/// Handler for POST `/ads/{id}/{op}`.
///
/// `op` is a status change or `delete`.
async fn handle_ad_operation(
    AxumState(app_state): AxumState<AppState>,
    Path((id, op)): Path<(String, String)>,
    Json(req): Json<Authenticated<AdTransitionRequest>>,
) -> Result<Response, HttpError> {
    let (actor, body) = req.resolve()?;
    info!(actor_id = %actor.id(), ad_id = %id, op = %op, "Handling ad operation");

    let kind: TransitionKind =
        TransitionKind::from_str(&op).map_err(|_| unknown_operation("ad", &op))?;
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let mut store = app_state.store.lock().await;

    if kind == TransitionKind::Delete {
        let deleted = delete_ad(&mut *store, &actor, &id, now)?;
        drop(store);
        return Ok(Json(DeleteAdResponse {
            id: deleted.to_string(),
            message: format!("Deleted ad {deleted}"),
        })
        .into_response());
    }

    let command: AdCommand =
        AdCommand::for_kind(kind, body.reason).ok_or_else(|| unknown_operation("ad", &op))?;
    let ad = transition_ad(&mut *store, &actor, &id, command, now)?;
    drop(store);

    Ok(Json(AdResponse::from(&ad)).into_response())
}

/// Handler for GET `/ads/{id}/transitions`.
async fn handle_ad_transitions(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<TransitionsResponse>, HttpError> {
    let actor: Actor = query.resolve()?;
    let mut store = app_state.store.lock().await;
    let listing = ad_transitions(&mut *store, &actor, &id, OffsetDateTime::now_utc())?;
    drop(store);

    Ok(Json(listing))
}

/// Handler for POST `/transactions`.
async fn handle_open_transaction(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Authenticated<OpenTransactionRequest>>,
) -> Result<(StatusCode, Json<TransactionResponse>), HttpError> {
    let (actor, body) = req.resolve()?;
    info!(actor_id = %actor.id(), ad_id = %body.ad_id, "Handling open_transaction request");

    let draft = transaction_draft_from_request(&body, &app_state.limits)?;
    let mut store = app_state.store.lock().await;
    let transaction = open_transaction(
        &mut *store,
        &actor,
        draft,
        &app_state.limits,
        OffsetDateTime::now_utc(),
    )?;
    drop(store);

    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse::from(&transaction)),
    ))
}

/// Handler for GET `/transactions/{id}`.
async fn handle_get_transaction(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<TransactionResponse>, HttpError> {
    query.resolve()?;
    let mut store = app_state.store.lock().await;
    let transaction = get_transaction(&mut *store, &id)?;
    drop(store);

    Ok(Json(TransactionResponse::from(&transaction)))
}

/// Handler for POST `/transactions/{id}/{op}`.
async fn handle_transaction_operation(
    AxumState(app_state): AxumState<AppState>,
    Path((id, op)): Path<(String, String)>,
    Json(req): Json<Authenticated<TransactionTransitionRequest>>,
) -> Result<Json<TransactionResponse>, HttpError> {
    let (actor, body) = req.resolve()?;
    info!(actor_id = %actor.id(), transaction_id = %id, op = %op, "Handling transaction operation");

    let command: TransactionCommand = TransitionKind::from_str(&op)
        .ok()
        .and_then(|kind| TransactionCommand::for_kind(kind, body.payment_reference))
        .ok_or_else(|| unknown_operation("transaction", &op))?;

    let mut store = app_state.store.lock().await;
    let transaction =
        transition_transaction(&mut *store, &actor, &id, command, OffsetDateTime::now_utc())?;
    drop(store);

    Ok(Json(TransactionResponse::from(&transaction)))
}

/// Handler for GET `/transactions/{id}/transitions`.
async fn handle_transaction_transitions(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<TransitionsResponse>, HttpError> {
    let actor: Actor = query.resolve()?;
    let mut store = app_state.store.lock().await;
    let listing = transaction_transitions(&mut *store, &actor, &id, OffsetDateTime::now_utc())?;
    drop(store);

    Ok(Json(listing))
}

/// Handler for POST `/bulk`.
async fn handle_bulk(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<Authenticated<BulkRequest>>,
) -> Result<Json<BulkOutcome>, HttpError> {
    let (actor, body) = req.resolve()?;
    info!(
        actor_id = %actor.id(),
        resource = %body.resource,
        op = %body.op,
        count = body.ids.len(),
        "Handling bulk request"
    );

    let mut store = app_state.store.lock().await;
    let outcome = apply_bulk(&mut *store, &actor, &body, OffsetDateTime::now_utc())?;
    drop(store);

    Ok(Json(outcome))
}

/// Handler for GET `/audit/{resource}/{id}`.
async fn handle_audit_trail(
    AxumState(app_state): AxumState<AppState>,
    Path((resource, id)): Path<(String, String)>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<Vec<AuditEventResponse>>, HttpError> {
    let actor: Actor = query.resolve()?;
    let mut store = app_state.store.lock().await;
    let events = audit_trail(&mut *store, &actor, &resource, &id)?;
    drop(store);

    Ok(Json(events))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/ads", post(handle_create_ad))
        .route("/ads/{id}", get(handle_get_ad))
        .route("/ads/{id}/transitions", get(handle_ad_transitions))
        .route("/ads/{id}/{op}", post(handle_ad_operation))
        .route("/transactions", post(handle_open_transaction))
        .route("/transactions/{id}", get(handle_get_transaction))
        .route(
            "/transactions/{id}/transitions",
            get(handle_transaction_transitions),
        )
        .route("/transactions/{id}/{op}", post(handle_transaction_operation))
        .route("/bulk", post(handle_bulk))
        .route("/audit/{resource}/{id}", get(handle_audit_trail))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing TradeGate Server");

    let limits: TradeLimits = args.limits.to_limits()?;
    info!(
        min_amount = %limits.min_amount,
        max_amount = %limits.max_amount,
        min_price = %limits.min_price,
        default_expiry_minutes = limits.default_expiry.whole_minutes(),
        "Loaded trade limits"
    );

    let store: Box<dyn LifecycleStore + Send> = if args.ephemeral {
        info!("Using process-local store");
        Box::new(InMemoryStore::new())
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Box::new(SqlitePersistence::new_with_file(db_path)?)
    } else {
        info!("Using in-memory database");
        Box::new(SqlitePersistence::new_in_memory()?)
    };

    let app: Router = build_router(AppState::new(store, limits));

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
