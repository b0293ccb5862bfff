//! Supported language listing

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::{
    models::{ExecutionModel, SupportedLanguage},
    state::AppState,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageInfo {
    pub id: &'static str,
    pub execution_model: ExecutionModel,
    pub judge0_id: u32,
}

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageInfo>,
}

async fn list_languages() -> Json<LanguagesResponse> {
    let languages = SupportedLanguage::ALL
        .iter()
        .map(|language| LanguageInfo {
            id: language.as_str(),
            execution_model: language.execution_model(),
            judge0_id: language.judge0_id(),
        })
        .collect();

    Json(LanguagesResponse { languages })
}

/// Language routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/languages", get(list_languages))
}
