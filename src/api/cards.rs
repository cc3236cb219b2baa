use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
};
use chrono::{DateTime, Utc};

use crate::api::extract::ValidJson;
use crate::db::cards;
use crate::error::AppError;
use crate::models::card::{INVALID_STATUS_MESSAGE, parse_deadline};
use crate::models::{CardPatch, CardStatus, CardView, NewCard, NewCardRequest, UpdateCardRequest};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation::non_blank;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/card", post(create_card))
        .route("/card/user/{user_id}", get(list_cards_by_user))
        .route("/card/{id}", get(get_card).put(update_card).delete(delete_card))
}

fn parse_status(raw: Option<&str>) -> Result<Option<CardStatus>, AppError> {
    raw.map(|s| s.parse::<CardStatus>().map_err(|_| AppError::validation(INVALID_STATUS_MESSAGE)))
        .transpose()
}

fn parse_deadline_field(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, AppError> {
    match non_blank(raw) {
        Some(s) => parse_deadline(s)
            .map(Some)
            .ok_or_else(|| AppError::validation("Invalid deadline format")),
        None => Ok(None),
    }
}

async fn create_card(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<NewCardRequest>,
) -> Result<ApiResponse<CardView>, AppError> {
    let title = non_blank(req.title.as_deref())
        .ok_or_else(|| AppError::validation("Title is required"))?;
    let user_id = non_blank(req.user_id.as_deref())
        .ok_or_else(|| AppError::validation("User ID is required"))?;
    let status = parse_status(req.status.as_deref())?.unwrap_or_default();
    let deadline = parse_deadline_field(req.deadline.as_deref())?.unwrap_or_else(Utc::now);

    let new_card = NewCard {
        title: title.to_string(),
        description: req.description.clone().unwrap_or_default(),
        deadline,
        user_id: user_id.to_string(),
        status,
    };
    let card = cards::insert_card(&state.db, new_card).await?;
    Ok(ApiResponse::created("Card created successfully", CardView::new(card, Utc::now())))
}

async fn list_cards_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<Vec<CardView>>, AppError> {
    let now = Utc::now();
    let cards = cards::fetch_cards_by_user(&state.db, &user_id)
        .await?
        .into_iter()
        .map(|card| CardView::new(card, now))
        .collect();
    Ok(ApiResponse::ok("Cards retrieved successfully", cards))
}

async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<CardView>, AppError> {
    let card = cards::find_card_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Card not found"))?;
    Ok(ApiResponse::ok("Card retrieved successfully", CardView::new(card, Utc::now())))
}

async fn update_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdateCardRequest>,
) -> Result<ApiResponse<CardView>, AppError> {
    let title = match req.title.as_deref() {
        Some(raw) => Some(
            non_blank(Some(raw))
                .ok_or_else(|| AppError::validation("Title is required"))?
                .to_string(),
        ),
        None => None,
    };
    let patch = CardPatch {
        title,
        // an empty description keeps the stored one
        description: req.description.clone().filter(|d| !d.is_empty()),
        deadline: parse_deadline_field(req.deadline.as_deref())?,
        status: parse_status(req.status.as_deref())?,
    };

    let mut card = cards::find_card_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Card not found"))?;

    if let Some(next) = patch.status {
        if !card.status.can_transition_to(next) {
            return Err(AppError::validation("Completed cards cannot be reopened"));
        }
    }

    patch.apply(&mut card);
    let card = cards::update_card(&state.db, &card)
        .await?
        .ok_or_else(|| AppError::not_found("Card not found"))?;
    Ok(ApiResponse::ok("Card updated successfully", CardView::new(card, Utc::now())))
}

async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<CardView>, AppError> {
    let card = cards::delete_card(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Card not found"))?;
    Ok(ApiResponse::ok("Card deleted successfully", CardView::new(card, Utc::now())))
}
