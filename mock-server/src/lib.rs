use std::{collections::BTreeMap, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub id: u64,
    pub product_a: String,
    pub product_b: String,
    pub recom_type: String,
    pub likes: i64,
}

/// Validated create/update payload.
#[derive(Debug, PartialEq, Eq)]
pub struct RecommendationInput {
    pub product_a: String,
    pub product_b: String,
    pub recom_type: String,
    pub likes: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub product_a: Option<String>,
    pub product_b: Option<String>,
    pub recom_type: Option<String>,
    pub likes: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    UnsupportedMediaType(String),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ServiceError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            ServiceError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
            ServiceError::UnsupportedMediaType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported media type")
            }
        };
        let message = self.to_string();
        warn!(status = status.as_u16(), %message, "request rejected");
        let body = Json(json!({
            "status": status.as_u16(),
            "error": error,
            "message": message,
        }));
        (status, body).into_response()
    }
}

#[derive(Debug, Default)]
pub struct Store {
    last_id: u64,
    items: BTreeMap<u64, Recommendation>,
}

pub type Db = Arc<RwLock<Store>>;

/// Bind address read from `HOST` / `PORT`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(
            "/recommendations",
            get(list_recommendations).post(create_recommendation),
        )
        .route(
            "/recommendations/{id}",
            get(get_recommendation)
                .put(update_recommendation)
                .delete(delete_recommendation),
        )
        .route("/recommendations/{id}/likes", put(like_recommendation))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock recommendations service listening");
    }
    axum::serve(listener, app()).await
}

async fn list_recommendations(
    State(db): State<Db>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Recommendation>>, ServiceError> {
    info!(?params, "Request for recommendation list");
    let likes = match non_blank(&params.likes) {
        Some(raw) => Some(raw.parse::<i64>().map_err(|_| {
            ServiceError::BadRequest(format!("Invalid likes filter '{raw}': must be an integer"))
        })?),
        None => None,
    };
    let store = db.read().await;
    let results = store
        .items
        .values()
        .filter(|rec| matches_text(&params.product_a, &rec.product_a))
        .filter(|rec| matches_text(&params.product_b, &rec.product_b))
        .filter(|rec| matches_text(&params.recom_type, &rec.recom_type))
        .filter(|rec| likes.map_or(true, |likes| rec.likes == likes))
        .cloned()
        .collect();
    Ok(Json(results))
}

async fn create_recommendation(
    State(db): State<Db>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ServiceError> {
    info!("Request to create a recommendation");
    check_content_type(&headers)?;
    let input = parse_input(&body, true)?;

    let mut store = db.write().await;
    store.last_id += 1;
    let rec = Recommendation {
        id: store.last_id,
        product_a: input.product_a,
        product_b: input.product_b,
        recom_type: input.recom_type,
        likes: input.likes,
    };
    store.items.insert(rec.id, rec.clone());
    let location = format!("/recommendations/{}", rec.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(rec)))
}

async fn get_recommendation(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Recommendation>, ServiceError> {
    info!(%id, "Request for recommendation");
    let key = parse_id(&id)?;
    let store = db.read().await;
    store.items.get(&key).cloned().map(Json).ok_or_else(|| not_found(&id))
}

async fn update_recommendation(
    State(db): State<Db>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Recommendation>, ServiceError> {
    info!(%id, "Request to update recommendation");
    let key = parse_id(&id)?;
    check_content_type(&headers)?;
    let mut store = db.write().await;
    let rec = store.items.get_mut(&key).ok_or_else(|| not_found(&id))?;
    let input = parse_input(&body, false)?;
    rec.product_a = input.product_a;
    rec.product_b = input.product_b;
    rec.recom_type = input.recom_type;
    rec.likes = input.likes;
    Ok(Json(rec.clone()))
}

async fn like_recommendation(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Recommendation>, ServiceError> {
    info!(%id, "Request to like recommendation");
    let key = parse_id(&id)?;
    let mut store = db.write().await;
    let rec = store.items.get_mut(&key).ok_or_else(|| not_found(&id))?;
    rec.likes += 1;
    Ok(Json(rec.clone()))
}

/// Deleting an unknown id still answers 204.
async fn delete_recommendation(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServiceError> {
    info!(%id, "Request to delete recommendation");
    let key = parse_id(&id)?;
    db.write().await.items.remove(&key);
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: &str) -> ServiceError {
    ServiceError::NotFound(format!("Recommendation with id '{id}' was not found."))
}

fn parse_id(id: &str) -> Result<u64, ServiceError> {
    id.parse().map_err(|_| not_found(id))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn matches_text(filter: &Option<String>, value: &str) -> bool {
    non_blank(filter).map_or(true, |wanted| wanted == value)
}

fn check_content_type(headers: &HeaderMap) -> Result<(), ServiceError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let media_type = content_type.split(';').next().unwrap_or("").trim();
    if media_type == "application/json" {
        return Ok(());
    }
    Err(ServiceError::UnsupportedMediaType(
        "Content-Type must be application/json".to_string(),
    ))
}

/// Validate a create/update body.
///
/// `likes` may be a number or a numeric string. On create a missing or
/// `null` count starts at zero.
pub fn parse_input(body: &[u8], allow_null_likes: bool) -> Result<RecommendationInput, ServiceError> {
    let bad_data = || {
        ServiceError::BadRequest(
            "Invalid Recommendation: body of request contained bad or no data".to_string(),
        )
    };
    let value: Value = serde_json::from_slice(body).map_err(|_| bad_data())?;
    let object = value.as_object().ok_or_else(bad_data)?;

    let text = |object: &Map<String, Value>, key: &str| -> Result<String, ServiceError> {
        match object.get(key) {
            None => Err(ServiceError::BadRequest(format!(
                "Invalid Recommendation: missing {key}"
            ))),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(bad_data()),
        }
    };
    let product_a = text(object, "product_a")?;
    let product_b = text(object, "product_b")?;
    let recom_type = text(object, "recom_type")?;

    let invalid_likes =
        || ServiceError::BadRequest("Invalid Recommendation: likes must be an integer".to_string());
    let likes = match object.get("likes") {
        None | Some(Value::Null) if allow_null_likes => 0,
        None => {
            return Err(ServiceError::BadRequest(
                "Invalid Recommendation: missing likes".to_string(),
            ))
        }
        Some(Value::Number(n)) => n.as_i64().ok_or_else(invalid_likes)?,
        Some(Value::String(s)) => s.trim().parse().map_err(|_| invalid_likes())?,
        Some(_) => return Err(invalid_likes()),
    };

    Ok(RecommendationInput {
        product_a,
        product_b,
        recom_type,
        likes,
    })
}
