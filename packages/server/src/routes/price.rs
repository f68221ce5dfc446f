//! The pricing endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Deserialize;

use pricing::{
    provider_for, AnalysisResult, AppSettings, CompAnalyzer, PipelineConfig, PricingPipeline,
    PricingStore, ProductType, Query, SerpApiListingSource,
};

use crate::app::AppState;

use super::{error_with, ErrorBody};

/// Wall-clock budget for one pricing request. Expiry is surfaced as a
/// retryable failure, never cached.
pub const REQUEST_BUDGET: Duration = Duration::from_secs(70);

/// Request body for `POST /api/price`.
#[derive(Debug, Deserialize)]
pub struct PriceRequest {
    #[serde(default)]
    pub query: String,

    #[serde(rename = "type")]
    pub product_type: Option<ProductType>,

    #[serde(default, rename = "forceRefresh")]
    pub force_refresh: bool,
}

/// Handle `POST /api/price`.
pub async fn price_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<PriceRequest>,
) -> Result<Json<AnalysisResult>, (StatusCode, Json<ErrorBody>)> {
    let query_text = request.query.trim().to_string();
    let missing_fields = error_with(
        StatusCode::BAD_REQUEST,
        "Missing required fields: query and type",
    );
    let Some(product_type) = request.product_type else {
        return Err(missing_fields);
    };
    if query_text.is_empty() {
        return Err(missing_fields);
    }

    let settings = state.settings.read().await.clone();
    if !settings.has_credentials() {
        return Err(error_with(
            StatusCode::INTERNAL_SERVER_ERROR,
            "API keys not configured. Please visit Settings page.",
        ));
    }

    let pipeline = build_pipeline(&settings, state.store.clone());
    let query = Query::new(query_text, product_type, settings.default_region)
        .with_force_refresh(request.force_refresh);

    match tokio::time::timeout(REQUEST_BUDGET, pipeline.run(&query)).await {
        Ok(Ok(result)) => Ok(Json(result)),
        Ok(Err(err)) => {
            tracing::error!(error = %err, query = %query.text, "pricing request failed");
            Err(error_with(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
        }
        Err(_) => {
            tracing::warn!(query = %query.text, "pricing request exceeded its time budget");
            Err(error_with(
                StatusCode::GATEWAY_TIMEOUT,
                "Pricing request timed out. Please retry.",
            ))
        }
    }
}

/// Assemble a pipeline from the current settings snapshot. Provider
/// selection happens here, once, from the configured enum.
fn build_pipeline(
    settings: &AppSettings,
    store: Arc<dyn PricingStore>,
) -> PricingPipeline<SerpApiListingSource, dyn PricingStore> {
    let source = SerpApiListingSource::new(settings.serpapi_key.clone());
    let provider = provider_for(settings.llm_provider, &settings.llm_api_key);

    PricingPipeline::new(
        source,
        CompAnalyzer::new(provider),
        store,
        PipelineConfig::new(settings.default_region, settings.default_currency),
    )
}
