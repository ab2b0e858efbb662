//! In-process stub of the commission backend.
//!
//! A small axum app holding its state in memory and enforcing transitions
//! with the same `mercboard_core::lifecycle` table the real backend
//! implements, so client tests exercise the full wire contract without a
//! network dependency.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};

use mercboard_core::lifecycle::{self, CommissionAction};
use mercboard_core::report::ReportStatus;
use mercboard_core::settings::ChannelSettings;
use mercboard_core::{Commission, CommissionStatus, KarmaReport, ReportType, UserRef};

#[derive(Default)]
pub struct StubState {
    pub commissions: Mutex<HashMap<i64, Commission>>,
    pub reports: Mutex<Vec<KarmaReport>>,
    pub settings: Mutex<ChannelSettings>,
    pub next_id: AtomicI64,
    /// Number of `GET /` probes received.
    pub probe_calls: AtomicUsize,
    /// Number of mutating requests that reached a handler.
    pub mutation_calls: AtomicUsize,
    /// When false, the liveness probe answers 503.
    pub healthy: AtomicBool,
    /// When true, every route answers 503.
    pub fail_all: AtomicBool,
}

impl StubState {
    pub fn commission_status(&self, id: i64) -> Option<CommissionStatus> {
        self.commissions.lock().unwrap().get(&id).map(|c| c.status)
    }
}

/// Bind the stub on an ephemeral port; returns its base URL and state.
pub async fn spawn_stub() -> (String, Arc<StubState>) {
    let state = Arc::new(StubState {
        next_id: AtomicI64::new(1),
        healthy: AtomicBool::new(true),
        ..StubState::default()
    });

    let app = Router::new()
        .route("/", get(probe))
        .route("/api/commissions", post(create_commission))
        .route("/api/commissions/pending", get(list_pending))
        .route("/api/commissions/{id}", get(get_commission))
        .route("/api/commissions/{id}/accept", post(accept))
        .route("/api/commissions/{id}/approve", post(approve))
        .route("/api/commissions/{id}/reject", post(reject))
        .route("/api/commissions/{id}/complete", post(complete))
        .route("/api/commissions/{id}/report", post(report))
        .route("/api/users/{id}/commissions", get(user_commissions))
        .route("/api/users/{id}/stats", get(user_stats))
        .route("/api/leaderboard", get(leaderboard))
        .route("/api/reports/pending", get(pending_reports))
        .route("/api/settings/admin_channel", post(set_admin_channel))
        .route("/api/settings/public_channel", post(set_public_channel))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            failure_gate,
        ))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });

    (format!("http://{addr}"), state)
}

async fn failure_gate(
    State(state): State<Arc<StubState>>,
    request: Request,
    next: Next,
) -> Response {
    if state.fail_all.load(Ordering::SeqCst) {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }
    next.run(request).await
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": "Commission not found"})),
    )
        .into_response()
}

fn user_ref(body: &Value, id_key: &str, name_key: &str) -> UserRef {
    UserRef {
        discord_id: body[id_key].as_str().unwrap_or_default().to_string(),
        username: body[name_key].as_str().unwrap_or_default().to_string(),
        display_name: body
            .get("display_name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

/// Apply a lifecycle action to a stored commission, answering 400 with the
/// transition error when it is illegal.  The stored state is only written
/// on success.
fn transition(
    state: &StubState,
    id: i64,
    action: CommissionAction,
    mutate: impl FnOnce(&mut Commission),
) -> Response {
    state.mutation_calls.fetch_add(1, Ordering::SeqCst);
    let mut commissions = state.commissions.lock().unwrap();
    let Some(commission) = commissions.get_mut(&id) else {
        return not_found();
    };
    match lifecycle::apply(commission.status, action) {
        Ok(next) => {
            commission.status = next;
            mutate(commission);
            (
                StatusCode::OK,
                Json(json!({"message": format!("Commission #{id} {}", commission.status)})),
            )
                .into_response()
        }
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": err.to_string()})),
        )
            .into_response(),
    }
}

async fn probe(State(state): State<Arc<StubState>>) -> Response {
    state.probe_calls.fetch_add(1, Ordering::SeqCst);
    if state.healthy.load(Ordering::SeqCst) {
        (StatusCode::OK, Json(json!({"status": "healthy"}))).into_response()
    } else {
        StatusCode::SERVICE_UNAVAILABLE.into_response()
    }
}

async fn create_commission(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Response {
    state.mutation_calls.fetch_add(1, Ordering::SeqCst);
    let commission_type = match serde_json::from_value(body["commission_type"].clone()) {
        Ok(t) => t,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Unknown commission type"})),
            )
                .into_response()
        }
    };
    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let commission = Commission {
        id,
        commission_type,
        skills: body["skills"].as_str().unwrap_or_default().to_string(),
        creator: user_ref(&body, "discord_id", "username"),
        accepter: None,
        status: lifecycle::INITIAL_STATUS,
        created_at: Utc::now(),
        expires_at: None,
    };
    state.commissions.lock().unwrap().insert(id, commission);
    (
        StatusCode::CREATED,
        Json(json!({"commission_id": id})),
    )
        .into_response()
}

async fn get_commission(State(state): State<Arc<StubState>>, Path(id): Path<i64>) -> Response {
    match state.commissions.lock().unwrap().get(&id) {
        Some(c) => (StatusCode::OK, Json(json!({"commission": c}))).into_response(),
        None => not_found(),
    }
}

async fn accept(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let accepter = user_ref(&body, "discord_id", "username");
    transition(&state, id, CommissionAction::Accept, |c| {
        c.accepter = Some(accepter);
    })
}

async fn approve(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(_body): Json<Value>,
) -> Response {
    transition(&state, id, CommissionAction::Approve, |_| {})
}

async fn reject(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(_body): Json<Value>,
) -> Response {
    transition(&state, id, CommissionAction::Reject, |_| {})
}

async fn complete(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(_body): Json<Value>,
) -> Response {
    transition(&state, id, CommissionAction::Complete, |_| {})
}

async fn report(
    State(state): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    state.mutation_calls.fetch_add(1, Ordering::SeqCst);
    let commissions = state.commissions.lock().unwrap();
    let Some(commission) = commissions.get(&id) else {
        return not_found();
    };
    if let Err(err) = lifecycle::ensure_legal(commission.status, CommissionAction::Report) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": err.to_string()})),
        )
            .into_response();
    }
    let report_type: ReportType =
        match serde_json::from_value(body["report_type"].clone()) {
            Ok(t) => t,
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Unknown report type"})),
                )
                    .into_response()
            }
        };
    let mut reports = state.reports.lock().unwrap();
    let report = KarmaReport {
        id: reports.len() as i64 + 1,
        commission_id: id,
        reporter_id: body["reporter_id"].as_str().unwrap_or_default().to_string(),
        reporter_name: body["reporter_name"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        report_type,
        reason: body["reason"].as_str().unwrap_or_default().to_string(),
        status: ReportStatus::Pending,
    };
    reports.push(report);
    (
        StatusCode::CREATED,
        Json(json!({"message": "Karma report submitted for admin review"})),
    )
        .into_response()
}

async fn list_pending(State(state): State<Arc<StubState>>) -> Response {
    let pending: Vec<Commission> = state
        .commissions
        .lock()
        .unwrap()
        .values()
        .filter(|c| c.status == CommissionStatus::Pending)
        .cloned()
        .collect();
    (StatusCode::OK, Json(json!({"commissions": pending}))).into_response()
}

async fn user_commissions(State(state): State<Arc<StubState>>, Path(id): Path<String>) -> Response {
    let owned: Vec<Commission> = state
        .commissions
        .lock()
        .unwrap()
        .values()
        .filter(|c| c.creator.discord_id == id)
        .cloned()
        .collect();
    (StatusCode::OK, Json(json!({"commissions": owned}))).into_response()
}

async fn user_stats(State(state): State<Arc<StubState>>, Path(id): Path<String>) -> Response {
    let commissions = state.commissions.lock().unwrap();
    let total = commissions
        .values()
        .filter(|c| c.creator.discord_id == id)
        .count() as u32;
    let completed = commissions
        .values()
        .filter(|c| c.creator.discord_id == id && c.status == CommissionStatus::Completed)
        .count() as u32;
    let success_rate = if total > 0 {
        f64::from(completed) / f64::from(total) * 100.0
    } else {
        0.0
    };
    (
        StatusCode::OK,
        Json(json!({"stats": {
            "total_commissions": total,
            "completed_commissions": completed,
            "success_rate": success_rate,
            "average_rating": 0.0,
            "karma_points": 0,
            "rank": null,
        }})),
    )
        .into_response()
}

async fn leaderboard(State(_state): State<Arc<StubState>>) -> Response {
    (StatusCode::OK, Json(json!({"leaderboard": []}))).into_response()
}

async fn pending_reports(State(state): State<Arc<StubState>>) -> Response {
    let reports = state.reports.lock().unwrap().clone();
    (StatusCode::OK, Json(json!({"reports": reports}))).into_response()
}

async fn set_admin_channel(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Response {
    state.mutation_calls.fetch_add(1, Ordering::SeqCst);
    state.settings.lock().unwrap().admin_channel = body["channel_id"]
        .as_str()
        .map(str::to_string);
    (StatusCode::OK, Json(json!({"message": "ok"}))).into_response()
}

async fn set_public_channel(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Response {
    state.mutation_calls.fetch_add(1, Ordering::SeqCst);
    state.settings.lock().unwrap().public_channel = body["channel_id"]
        .as_str()
        .map(str::to_string);
    (StatusCode::OK, Json(json!({"message": "ok"}))).into_response()
}
