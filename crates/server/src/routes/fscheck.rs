use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use service::FsChecker;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<FsChecker>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl ReportFormat {
    /// Only an exact `json` switches format; anything else gets the text report.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("json") => ReportFormat::Json,
            _ => ReportFormat::Text,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FsCheckQuery {
    #[serde(default)]
    pub format: Option<String>,
}

/// 执行一次目录写入检查并返回报告（任意方法、任意查询参数都返回 200）
pub async fn fscheck(
    State(state): State<AppState>,
    query: Option<Query<FsCheckQuery>>,
) -> Result<Response, ApiError> {
    let format = ReportFormat::from_param(
        query.as_ref().and_then(|Query(q)| q.format.as_deref()),
    );

    let checker = Arc::clone(&state.checker);
    let report = tokio::task::spawn_blocking(move || checker.run())
        .await
        .map_err(|e| ApiError(format!("fs check task failed: {e}")))?;

    let resp = match format {
        ReportFormat::Text => (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            report.render_text(),
        )
            .into_response(),
        ReportFormat::Json => Json(report).into_response(),
    };
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_json_selects_json() {
        assert_eq!(ReportFormat::from_param(Some("json")), ReportFormat::Json);
        for other in [None, Some(""), Some("JSON"), Some("xml"), Some("text")] {
            assert_eq!(ReportFormat::from_param(other), ReportFormat::Text, "{other:?}");
        }
    }
}
