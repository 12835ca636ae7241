use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    error::AppError,
    state::AppState,
    utils::get_add_item,
    views::{CartView, ConfirmView, MenuView, SessionView},
};

pub async fn create_session_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (id, session) = state.sessions.create(state.menu_source()).await;

    (StatusCode::CREATED, Json(SessionView::new(id, &session)))
}

pub async fn session_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.read(id, |page| page.session.clone()).await?;

    Ok(Json(SessionView::new(id, &session)))
}

pub async fn delete_session_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn menu_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<MenuView>, AppError> {
    let menu_state = state.sessions.read(id, |page| page.menu.state()).await?;

    Ok(Json(MenuView::from(menu_state)))
}

/// Only items on the page's current menu can be added, nothing while the menu is still loading.
pub async fn add_item_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<SessionView>, AppError> {
    let payload = get_add_item(body)?;

    let session = state
        .sessions
        .update(id, |page| {
            let menu = page.menu.menu();
            let item = menu
                .find(&payload.item_id)
                .ok_or_else(|| AppError::UnknownMenuItem(payload.item_id.clone()))?;

            Ok(page.session.add(item, payload.qty))
        })
        .await?;

    Ok(Json(SessionView::new(id, &session)))
}

pub async fn remove_item_handler(
    State(state): State<Arc<AppState>>,
    Path((id, item_id)): Path<(Uuid, String)>,
) -> Result<Json<SessionView>, AppError> {
    let session = state
        .sessions
        .update(id, |page| Ok(page.session.remove(&item_id)))
        .await?;

    Ok(Json(SessionView::new(id, &session)))
}

pub async fn clear_cart_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state
        .sessions
        .update(id, |page| Ok(page.session.clear_cart()))
        .await?;

    Ok(Json(SessionView::new(id, &session)))
}

pub async fn open_checkout_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state
        .sessions
        .update(id, |page| Ok(page.session.open_checkout()))
        .await?;

    Ok(Json(SessionView::new(id, &session)))
}

pub async fn confirm_checkout_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConfirmView>, AppError> {
    let mut receipt = None;

    let session = state
        .sessions
        .update(id, |page| {
            if page.session.checkout().is_visible() {
                receipt = Some(CartView::from(page.session.cart()));
            }

            Ok(page.session.confirm_checkout())
        })
        .await?;

    Ok(Json(ConfirmView {
        session: SessionView::new(id, &session),
        receipt,
    }))
}

pub async fn close_checkout_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state
        .sessions
        .update(id, |page| Ok(page.session.close_checkout()))
        .await?;

    Ok(Json(SessionView::new(id, &session)))
}
