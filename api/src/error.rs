use std::collections::HashMap;

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::Value;

use crate::models;

#[derive(Debug)]
pub enum ServerError {
    DatabaseError(models::Error),
}

impl Serialize for ServerError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        use serde::ser::SerializeMap;
        match self {
            ServerError::DatabaseError(e) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("message", &e.to_string())?;
                map.end()
            }
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    ServerError {
        error: ServerError,

        #[cfg(debug_assertions)]
        backtrace: Option<backtrace::Backtrace>,
    },
    /// The request itself is at fault, e.g. failed validation or a missing
    /// comment.
    ApiRequest {
        message: String,
        status: StatusCode,
    },
    Unhandled(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    msg: Option<String>,

    #[cfg(debug_assertions)]
    #[serde(skip_serializing_if = "Option::is_none")]
    debug_info: Option<HashMap<&'static str, Value>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, error_response) = match self {
            AppError::ServerError {
                error,
                #[cfg(debug_assertions)]
                backtrace,
            } => {
                tracing::error!(?error, "Request failed with a server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    #[cfg(debug_assertions)]
                    {
                        let frames_info = backtrace
                            .as_ref()
                            .map(filter_backtrace)
                            .unwrap_or_default();
                        ErrorResponse {
                            code: "DATABASE_ERR".into(),
                            msg: Some("Database error".into()),
                            debug_info: Some(HashMap::from([
                                ("backtrace", serde_json::to_value(&frames_info).unwrap_or_default()),
                                ("error", serde_json::to_value(&error).unwrap_or_default()),
                            ])),
                        }
                    },
                    #[cfg(not(debug_assertions))]
                    ErrorResponse {
                        code: "SERVER_ERR".into(),
                        msg: Some("Internal server error".into()),
                    },
                )
            }
            AppError::ApiRequest { message, status } => (
                status,
                ErrorResponse {
                    code: "REQUEST_ERR".into(),
                    msg: Some(message),
                    #[cfg(debug_assertions)]
                    debug_info: None,
                },
            ),
            AppError::Unhandled(e) => {
                tracing::error!(error = %e, "Unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        code: "ERR".into(),
                        msg: Some(e),
                        #[cfg(debug_assertions)]
                        debug_info: None,
                    },
                )
            }
        };

        (status_code, Json(error_response)).into_response()
    }
}

impl From<models::Error> for AppError {
    fn from(e: models::Error) -> Self {
        match e {
            models::Error::NoRecord => AppError::ApiRequest {
                message: "Comment not found".into(),
                status: StatusCode::NOT_FOUND,
            },
            e => AppError::ServerError {
                error: ServerError::DatabaseError(e),

                #[cfg(debug_assertions)]
                backtrace: Some(backtrace::Backtrace::new()),
            },
        }
    }
}

impl From<&'static str> for AppError {
    fn from(e: &'static str) -> Self {
        AppError::Unhandled(e.into())
    }
}

impl<M: Into<String>> From<(M, StatusCode)> for AppError {
    fn from((message, status): (M, StatusCode)) -> Self {
        AppError::ApiRequest {
            message: message.into(),
            status,
        }
    }
}

#[derive(Serialize, Debug)]
struct FrameInfo {
    name: String,
    loc: String,
}

fn filter_backtrace(backtrace: &backtrace::Backtrace) -> Vec<FrameInfo> {
    const MODULE_PREFIX: &str = concat!(env!("CARGO_PKG_NAME"), "::");
    let mut frames_info: Vec<FrameInfo> = Vec::new();

    for frame in backtrace.frames() {
        for symbol in frame.symbols() {
            if let (Some(name), Some(filename), Some(lineno)) = (
                symbol.name().map(|n| n.to_string()),
                symbol.filename().map(|f| f.to_owned()),
                symbol.lineno(),
            ) {
                if name.contains(MODULE_PREFIX) {
                    frames_info.push(FrameInfo {
                        name,
                        loc: format!("{}:{}", filename.to_string_lossy(), lineno),
                    });
                }
            }
        }
    }

    return frames_info;
}
