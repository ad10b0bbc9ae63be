//! In-process stand-in for the `/be/*` backend and `/ai/*` services.

#![allow(dead_code)]

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use jeonsafe::config::{ApiConfig, Config};
use jeonsafe::AppState;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

pub const TOKEN: &str = "tok-1";
pub const PASSWORD: &str = "password123";
pub const USER_ID: i64 = 7;

#[derive(Default)]
pub struct Mock {
    base_url: String,
    next_file: AtomicI64,
    next_thread: AtomicI64,
    /// Original filename by file id.
    files: Mutex<HashMap<i64, String>>,
    /// File ids whose risk extraction answers 500.
    pub fail_extract: Mutex<HashSet<i64>>,
    /// Classification returned by analyze, keyed by file id.
    pub kinds: Mutex<HashMap<i64, (String, String)>>,
    pub threads: Mutex<Vec<Value>>,
    pub messages: Mutex<Vec<(i64, Value)>>,
    /// File ids whose next blob fetch answers 403, as an expired link would.
    pub expire_once: Mutex<HashSet<i64>>,
    /// File ids whose blob fetch always answers 403.
    pub expire_always: Mutex<HashSet<i64>>,
    pub law_queries: Mutex<Vec<String>>,
    pub case_queries: Mutex<Vec<String>>,
    pub analyze_calls: AtomicUsize,
    pub extract_calls: AtomicUsize,
    pub uploads: AtomicUsize,
    pub logouts: AtomicUsize,
    pub download_urls: AtomicUsize,
}

impl Mock {
    pub fn analyze_calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }

    pub fn set_kind(&self, file_id: i64, kind: &str, label: &str) {
        self.kinds
            .lock()
            .insert(file_id, (kind.to_string(), label.to_string()));
    }

    pub fn add_thread(&self, thread: Value) {
        self.threads.lock().push(thread);
    }
}

pub struct Backend {
    pub base_url: String,
    pub mock: Arc<Mock>,
    pub dir: TempDir,
}

impl Backend {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let mock = Arc::new(Mock {
            base_url: base_url.clone(),
            next_file: AtomicI64::new(100),
            next_thread: AtomicI64::new(500),
            ..Mock::default()
        });

        let app = Router::new()
            .route("/be/auth/login", post(login))
            .route("/be/auth/signup", post(signup))
            .route("/be/auth/logout", post(logout))
            .route("/be/auth/me", get(me).delete(delete_me))
            .route("/be/api/files", post(upload))
            .route("/be/api/files/{id}/download-url", get(download_url))
            .route("/blob/{id}", get(blob))
            .route("/ai/gpt/analyze", post(analyze))
            .route("/ai/gpt/extract_risks", post(extract_risks))
            .route("/ai/laws/search", get(search_laws))
            .route("/ai/cases/search", get(search_cases))
            .route("/be/chat/threads", post(create_thread).get(list_threads))
            .route("/be/chat/threads/{id}/messages", post(add_message))
            .with_state(mock.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            mock,
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.api = ApiConfig {
            base_url: self.base_url.clone(),
            timeout_secs: Some(10),
        };
        config.report.download_dir = self.dir.path().join("downloads").display().to_string();
        config
    }

    pub fn state(&self) -> AppState {
        AppState::ephemeral(self.config()).unwrap()
    }

    /// State with a signed-in session.
    pub async fn signed_in(&self) -> AppState {
        let state = self.state();
        state
            .session
            .login("user@example.com", PASSWORD)
            .await
            .unwrap();
        state
    }

    pub fn blob_url(&self, id: i64) -> String {
        format!("{}/blob/{id}", self.base_url)
    }
}

fn authed(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Not authenticated" })),
    )
        .into_response()
}

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

async fn login(Json(body): Json<Credentials>) -> Response {
    if body.password != PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "이메일 또는 비밀번호가 올바르지 않습니다." })),
        )
            .into_response();
    }
    Json(json!({ "access_token": TOKEN, "token_type": "bearer" })).into_response()
}

async fn signup(Json(body): Json<Credentials>) -> Response {
    if body.email == "taken@example.com" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "이미 가입된 이메일입니다." })),
        )
            .into_response();
    }
    Json(json!({ "id": 8, "email": body.email })).into_response()
}

async fn logout(State(mock): State<Arc<Mock>>) -> Response {
    mock.logouts.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "ok": true })).into_response()
}

async fn me(headers: HeaderMap) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    Json(json!({ "id": USER_ID, "email": "user@example.com", "name": "홍길동" })).into_response()
}

async fn delete_me(headers: HeaderMap) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn upload(
    State(mock): State<Arc<Mock>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    let mut category = String::from("other");
    let mut filename = String::new();
    let mut content_type = String::from("application/octet-stream");
    let mut size = 0usize;
    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name() {
            Some("category") => category = field.text().await.unwrap_or_default(),
            Some("file") => {
                filename = field.file_name().unwrap_or_default().to_string();
                if let Some(ct) = field.content_type() {
                    content_type = ct.to_string();
                }
                size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
            }
            _ => {}
        }
    }
    mock.uploads.fetch_add(1, Ordering::SeqCst);
    let id = mock.next_file.fetch_add(1, Ordering::SeqCst);
    mock.files.lock().insert(id, filename.clone());
    Json(json!({
        "id": id,
        "user_id": USER_ID,
        "original_filename": filename,
        "content_type": content_type,
        "size_bytes": size,
        "storage": "s3",
        "s3_key": format!("uploads/{id}"),
        "s3_url": null,
        "category": category,
        "created_at": "2025-09-01T10:00:00",
    }))
    .into_response()
}

async fn download_url(
    State(mock): State<Arc<Mock>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    mock.download_urls.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "url": format!("{}/blob/{id}", mock.base_url) })).into_response()
}

async fn blob(State(mock): State<Arc<Mock>>, Path(id): Path<i64>) -> Response {
    if mock.expire_once.lock().remove(&id) || mock.expire_always.lock().contains(&id) {
        return (StatusCode::FORBIDDEN, "Request has expired").into_response();
    }
    format!("%PDF-1.7 mock {id}").into_bytes().into_response()
}

fn file_id_of(url: &str) -> Option<i64> {
    url.rsplit('/').next()?.parse().ok()
}

#[derive(Deserialize)]
struct Urls {
    urls: Vec<String>,
}

async fn analyze(State(mock): State<Arc<Mock>>, Json(body): Json<Urls>) -> Json<Value> {
    mock.analyze_calls.fetch_add(1, Ordering::SeqCst);
    let kinds = mock.kinds.lock().clone();
    let items: Vec<Value> = body
        .urls
        .iter()
        .map(|url| {
            let id = file_id_of(url).unwrap_or_default();
            let (kind, label) = kinds
                .get(&id)
                .cloned()
                .unwrap_or_else(|| ("contract".to_string(), "M".to_string()));
            json!({
                "fileurl": url,
                "mime": "application/pdf",
                "modality": "pdf",
                "kind": kind,
                "law_input": format!("보증금 반환 {id}"),
                "case_input": format!("임대차 보증금 {id}"),
                "rating": { "label": label, "reasons": ["특약 확인 필요", "보증금 반환 시기 불명확"] },
            })
        })
        .collect();
    Json(json!({ "items": items }))
}

async fn extract_risks(State(mock): State<Arc<Mock>>, Json(body): Json<Urls>) -> Response {
    mock.extract_calls.fetch_add(1, Ordering::SeqCst);
    let Some(url) = body.urls.first() else {
        return Json(json!({ "items": [] })).into_response();
    };
    let id = file_id_of(url).unwrap_or_default();
    if mock.fail_extract.lock().contains(&id) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "extraction failed" })),
        )
            .into_response();
    }
    Json(json!({
        "items": [{
            "fileurl": url,
            "risky_sentences": [
                {
                    "sentence": "임대인은 보증금을 계약 종료 후 6개월 이내에 반환한다.",
                    "reason": "반환 기한이 지나치게 깁니다.",
                    "risk_label": "B",
                    "law_input": format!("보증금 반환 기한 {id}"),
                    "case_input": format!("보증금 반환 지연 {id}"),
                    "positions": [{"page":1,"x":50,"y":100,"w":300,"h":14,"page_width":600,"page_height":800}],
                },
                {
                    "sentence": "관리비는 임차인이 부담한다.",
                    "reason": "",
                    "risk_label": "G",
                    "law_input": "   ",
                    "positions": [],
                },
            ],
        }],
    }))
    .into_response()
}

#[derive(Deserialize)]
struct SearchParams {
    q: String,
}

async fn search_laws(
    State(mock): State<Arc<Mock>>,
    Query(params): Query<SearchParams>,
) -> Json<Value> {
    mock.law_queries.lock().push(params.q.clone());
    Json(json!({
        "query": params.q,
        "count": 2,
        "items": [
            {"rank": 1, "score": 0.9, "law_name": "주택임대차보호법", "article_no": "제3조", "snippet": format!("{} 대항력", params.q)},
            {"rank": 2, "score": 0.5, "law_name": "민법", "article_no": "제618조", "snippet": "임대차의 의의"},
        ],
    }))
}

async fn search_cases(
    State(mock): State<Arc<Mock>>,
    Query(params): Query<SearchParams>,
) -> Json<Value> {
    mock.case_queries.lock().push(params.q.clone());
    Json(json!({
        "query": params.q,
        "count": 1,
        "items": [
            {"doc_id": 77, "사건명": format!("{} 사건", params.q), "법원명": "대법원", "선고일자": "2025.04.15", "본문요약": "보증금 반환 의무를 인정한 사례"},
        ],
    }))
}

async fn create_thread(
    State(mock): State<Arc<Mock>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    let id = mock.next_thread.fetch_add(1, Ordering::SeqCst);
    let thread = json!({
        "id": id,
        "user_id": body["user_id"],
        "channel": body["channel"],
        "title": body["title"].as_str().unwrap_or_default(),
        "status": "OPEN",
        "report_file_id": body["report_file_id"],
        "created_at": "2025-09-01T10:00:00",
        "closed_at": null,
    });
    mock.threads.lock().push(thread.clone());
    Json(thread).into_response()
}

#[derive(Deserialize)]
struct ThreadQuery {
    user_id: i64,
    channel: String,
}

async fn list_threads(
    State(mock): State<Arc<Mock>>,
    headers: HeaderMap,
    Query(q): Query<ThreadQuery>,
) -> Response {
    if !authed(&headers) {
        return unauthorized();
    }
    let items: Vec<Value> = mock
        .threads
        .lock()
        .iter()
        .filter(|t| t["channel"] == q.channel.as_str() && t["user_id"] == q.user_id)
        .cloned()
        .collect();
    Json(json!({ "items": items })).into_response()
}

async fn add_message(
    State(mock): State<Arc<Mock>>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.messages.lock().push((id, body));
    Json(json!({ "ok": true }))
}
