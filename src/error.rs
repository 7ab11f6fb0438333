use crate::service::pipeline;
use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use docket_engine::provider;
use serde_json::Value as JsonValue;
use std::borrow::Cow;

#[derive(Debug, serde::Serialize)]
pub(crate) struct ServerError {
    #[serde(skip)]
    code: StatusCode,
    pub message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<JsonValue>,
}

impl ServerError {
    pub(crate) fn internal() -> Self {
        Self {
            code: StatusCode::INTERNAL_SERVER_ERROR,
            message: Cow::Borrowed(StatusCode::INTERNAL_SERVER_ERROR.as_str()),
            details: None,
        }
    }

    pub(crate) fn not_found() -> Self {
        Self {
            code: StatusCode::NOT_FOUND,
            message: Cow::Borrowed("resource not found"),
            details: None,
        }
    }

    pub(crate) fn message(mut self, message: Cow<'static, str>) -> Self {
        self.message = message;
        self
    }

    pub(crate) fn details(mut self, details: JsonValue) -> Self {
        self.details = Some(details);
        self
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        (self.code, Json(self)).into_response()
    }
}

impl From<pipeline::Error> for ServerError {
    fn from(error: pipeline::Error) -> Self {
        match error {
            pipeline::Error::Provider(provider::Error::UnknownDocument { name }) => {
                ServerError::not_found()
                    .message(Cow::Borrowed("unable to find document"))
                    .details(serde_json::json!({ "document": name }))
            }
            pipeline::Error::Filter { index, .. } => ServerError::internal()
                .message(Cow::Borrowed("unable to prepare document"))
                .details(serde_json::json!({ "filter": index })),
            _ => ServerError::internal(),
        }
    }
}
