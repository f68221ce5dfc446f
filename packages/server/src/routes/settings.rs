//! Settings endpoint: masked reads, merge-on-write updates.

use axum::{extract::Extension, Json};

use pricing::{MaskedSettings, SettingsUpdate};

use crate::app::AppState;

/// Handle `GET /api/settings`. Credentials are masked `first4...last4`.
pub async fn get_settings(Extension(state): Extension<AppState>) -> Json<MaskedSettings> {
    Json(state.settings.read().await.masked())
}

/// Handle `POST /api/settings`. Blank credential fields leave the
/// stored credential unchanged; the response is the masked result.
pub async fn update_settings(
    Extension(state): Extension<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Json<MaskedSettings> {
    let mut settings = state.settings.write().await;
    *settings = settings.apply_update(update);
    Json(settings.masked())
}
