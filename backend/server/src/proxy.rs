//! # Menu Proxy
//!
//! `GET /api/menu-debug` forwards to microCMS with the server-side key and hands the response
//! body back as is.
//!
//! - Only the server-side credential pair is used, the public pair never reaches this route
//! - Missing credentials fail before any outbound request
//! - Upstream status is not forwarded, a JSON body always comes back as 200
//! - No caching, no retries, no auth on the inbound side
use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::de::IgnoredAny;
use tracing::{info, warn};

use crate::{error::AppError, state::AppState};

pub async fn menu_debug_handler(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let Some(credentials) = state.config.cms.as_ref() else {
        warn!("Menu proxy called without MICROCMS_API_KEY/MICROCMS_SERVICE_DOMAIN");
        return Err(AppError::MissingCmsConfig);
    };

    let cms = state.cms_client(credentials);
    info!("Proxying menu request to {}", cms.menu_url());

    let (status, body) = cms.fetch_raw().await?;

    if serde_json::from_slice::<IgnoredAny>(&body).is_err() {
        return Err(anyhow!("CMS responded {status} with a non-JSON body").into());
    }

    if !status.is_success() {
        warn!("CMS responded {status}, relaying body anyway");
    }

    Ok((StatusCode::OK, [(CONTENT_TYPE, "application/json")], body).into_response())
}
