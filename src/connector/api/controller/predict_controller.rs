use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::connector::api::Container;
use crate::domain::Prediction;

/// Error payload returned when the request body lacks a required field.
pub const MISSING_FIELDS_ERROR: &str = "Missing required fields: 'api_key' and 'texts'";

/// Body of `POST /predict`.
///
/// Both fields are required; they are modelled as `Option` so that absence
/// maps to the fixed 400 payload instead of a generic deserialization
/// rejection.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub texts: Option<TextPayload>,
}

/// `texts` accepts either a single string or an array of strings; a scalar
/// is treated as a one-element batch.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TextPayload {
    Single(String),
    Many(Vec<String>),
}

impl TextPayload {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::Single(text) => vec![text],
            Self::Many(texts) => texts,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// `POST /predict` — predict a CPV code for each submitted text.
///
/// Always answers 200 with one entry per text, in input order; per-item
/// failures surface as `cpv_code: null`, never as an HTTP error. The only
/// client error is 400 for a structurally invalid body, produced before any
/// provider call is made.
pub async fn predict(
    State(container): State<Arc<Container>>,
    Json(request): Json<PredictRequest>,
) -> Response {
    let (Some(api_key), Some(texts)) = (request.api_key, request.texts) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: MISSING_FIELDS_ERROR,
            }),
        )
            .into_response();
    };

    let results: Vec<Prediction> = container
        .predict_use_case()
        .execute(texts.into_vec(), &api_key)
        .await;

    Json(results).into_response()
}
