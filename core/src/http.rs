use std::collections::BTreeMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use log::{error, info, warn};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::CoreConfig;
use crate::features;
use crate::form::{FieldSpec, FORM_FIELDS};
use crate::ml::inference::InferenceEngine;
use crate::ml::tree::TreeSummary;
use crate::page::{BackgroundImage, Outcome, PageRenderer};
use crate::telemetry::{StatsSnapshot, TelemetryStore};
use crate::types::{Attrition, Category, EmployeeProfile};

#[derive(Clone)]
pub struct ApiState {
    pub engine: Arc<InferenceEngine>,
    pub pages: Arc<PageRenderer>,
    pub telemetry: Arc<TelemetryStore>,
    pub background: Option<Arc<BackgroundImage>>,
}

#[derive(Debug, Serialize)]
struct PredictResponse {
    label: Attrition,
    attrition: bool,
    probability: f64,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct SchemaResponse {
    fields: &'static [FieldSpec],
    columns: Vec<&'static str>,
    vocabularies: BTreeMap<Category, Vec<String>>,
}

#[derive(Debug, Serialize)]
struct ApiStatus {
    model: TreeSummary,
    stats: StatsSnapshot,
    background: bool,
}

pub fn router(state: ApiState, config: &CoreConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict_form))
        .route("/background", get(background))
        .route("/api/predict", post(api_predict))
        .route("/api/schema", get(schema))
        .route("/api/status", get(status))
        .with_state(state)
        .layer(cors_layer(config))
}

pub async fn serve<F>(
    addr: &str,
    app: Router,
    shutdown: F,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("[API] Listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn index(State(state): State<ApiState>) -> Response {
    let profile = state.engine.default_profile();
    render_page(&state, &profile, Outcome::Empty, StatusCode::OK)
}

async fn predict_form(
    State(state): State<ApiState>,
    payload: Result<Form<EmployeeProfile>, FormRejection>,
) -> Response {
    let profile = match payload {
        Ok(Form(profile)) => profile,
        Err(rejection) => {
            let message = rejection.body_text();
            warn!("[API] Rejected form submission: {}", message);
            state.telemetry.record_rejection().await;
            let profile = state.engine.default_profile();
            return render_page(
                &state,
                &profile,
                Outcome::Rejected(&message),
                StatusCode::UNPROCESSABLE_ENTITY,
            );
        }
    };

    match state.engine.predict(&profile) {
        Ok(prediction) => {
            state.telemetry.record_prediction(&prediction).await;
            render_page(
                &state,
                &profile,
                Outcome::Predicted(&prediction),
                StatusCode::OK,
            )
        }
        Err(error) => {
            let message = error.to_string();
            warn!("[API] Rejected profile: {}", message);
            state.telemetry.record_rejection().await;
            render_page(
                &state,
                &profile,
                Outcome::Rejected(&message),
                StatusCode::UNPROCESSABLE_ENTITY,
            )
        }
    }
}

async fn api_predict(
    State(state): State<ApiState>,
    payload: Result<Json<EmployeeProfile>, JsonRejection>,
) -> Response {
    let profile = match payload {
        Ok(Json(profile)) => profile,
        Err(rejection) => {
            let message = rejection.body_text();
            warn!("[API] Rejected JSON payload: {}", message);
            state.telemetry.record_rejection().await;
            return error_response(StatusCode::UNPROCESSABLE_ENTITY, message);
        }
    };

    match state.engine.predict(&profile) {
        Ok(prediction) => {
            state.telemetry.record_prediction(&prediction).await;
            Json(PredictResponse {
                label: prediction.attrition,
                attrition: prediction.attrition == Attrition::Leaves,
                probability: prediction.probability,
                message: prediction.headline(),
            })
            .into_response()
        }
        Err(error) => {
            warn!("[API] Rejected profile: {}", error);
            state.telemetry.record_rejection().await;
            error_response(StatusCode::UNPROCESSABLE_ENTITY, error.to_string())
        }
    }
}

async fn schema(State(state): State<ApiState>) -> Json<SchemaResponse> {
    let vocabularies = state
        .engine
        .encoders()
        .iter()
        .map(|encoder| (encoder.category(), encoder.classes().to_vec()))
        .collect();

    Json(SchemaResponse {
        fields: &FORM_FIELDS,
        columns: features::column_names().collect(),
        vocabularies,
    })
}

async fn status(State(state): State<ApiState>) -> Json<ApiStatus> {
    Json(ApiStatus {
        model: state.engine.model().summary(),
        stats: state.telemetry.snapshot_stats().await,
        background: state.background.is_some(),
    })
}

async fn background(State(state): State<ApiState>) -> Response {
    match state.background.as_ref() {
        Some(image) => (
            [(header::CONTENT_TYPE, image.content_type)],
            image.bytes.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn render_page(
    state: &ApiState,
    profile: &EmployeeProfile,
    outcome: Outcome<'_>,
    status: StatusCode,
) -> Response {
    match state.pages.render(profile, state.engine.encoders(), outcome) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(render_error) => {
            error!("[API] Page render failed: {}", render_error);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Page render failed".to_string(),
            )
        }
    }
}

fn error_response(code: StatusCode, message: String) -> Response {
    (
        code,
        Json(ErrorResponse {
            status: "error".to_string(),
            message,
        }),
    )
        .into_response()
}

fn cors_layer(config: &CoreConfig) -> CorsLayer {
    let cors = if config.cors_allows_any() {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse::<HeaderValue>().ok())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(AllowOrigin::list(origins))
    };

    cors.allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}
