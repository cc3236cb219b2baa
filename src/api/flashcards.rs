use axum::{
    Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::api::extract::ValidJson;
use crate::db::flashcards;
use crate::error::AppError;
use crate::models::{
    Flashcard, FlashcardSet, FlashcardSetSummary, FlashcardSetWithCards, NewFlashcardRequest,
    NewFlashcardSetRequest, UpdateFlashcardRequest, UpdateFlashcardSetRequest,
};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::validation::non_blank;

const SET_NOT_FOUND: &str = "Flashcard set not found";
const CARD_NOT_FOUND: &str = "Flashcard not found";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/flashcard/set", post(create_set))
        .route("/flashcard/set/user/{user_id}", get(list_sets_by_user))
        .route("/flashcard/set/{id}", get(get_set).put(update_set).delete(delete_set))
        .route("/flashcard/set/{id}/cards", get(get_set_with_cards))
        .route("/flashcard/card", post(create_card))
        .route("/flashcard/cards/set/{set_id}", get(list_cards_by_set))
        .route(
            "/flashcard/card/{id}",
            get(get_card).put(update_card).delete(delete_card),
        )
}

fn front_and_back<'a>(
    front: Option<&'a str>,
    back: Option<&'a str>,
) -> Result<(&'a str, &'a str), AppError> {
    match (non_blank(front), non_blank(back)) {
        (Some(front), Some(back)) => Ok((front, back)),
        _ => Err(AppError::validation("Front and back content are required")),
    }
}

async fn create_set(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<NewFlashcardSetRequest>,
) -> Result<ApiResponse<FlashcardSet>, AppError> {
    let user_id = non_blank(req.user_id.as_deref())
        .ok_or_else(|| AppError::validation("User ID is required"))?;
    let name = non_blank(req.name.as_deref())
        .ok_or_else(|| AppError::validation("Set name is required"))?;
    let description = req.description.as_deref().unwrap_or_default();

    let set = flashcards::insert_set(&state.db, user_id, name, description).await?;
    Ok(ApiResponse::created("Flashcard set created successfully", set))
}

async fn list_sets_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<Vec<FlashcardSetSummary>>, AppError> {
    let sets = flashcards::fetch_sets_by_user(&state.db, &user_id).await?;
    Ok(ApiResponse::ok("Flashcard sets retrieved successfully", sets))
}

async fn get_set(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<FlashcardSet>, AppError> {
    let set = flashcards::find_set_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found(SET_NOT_FOUND))?;
    Ok(ApiResponse::ok("Flashcard set retrieved successfully", set))
}

async fn get_set_with_cards(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<FlashcardSetWithCards>, AppError> {
    let set = flashcards::find_set_with_cards(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found(SET_NOT_FOUND))?;
    Ok(ApiResponse::ok("Flashcard set retrieved with cards successfully", set))
}

async fn update_set(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdateFlashcardSetRequest>,
) -> Result<ApiResponse<FlashcardSet>, AppError> {
    let name = non_blank(req.name.as_deref())
        .ok_or_else(|| AppError::validation("Set name is required"))?;

    let existing = flashcards::find_set_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found(SET_NOT_FOUND))?;
    let description = req.description.as_deref().unwrap_or(&existing.description);

    let set = flashcards::update_set(&state.db, &id, name, description)
        .await?
        .ok_or_else(|| AppError::not_found(SET_NOT_FOUND))?;
    Ok(ApiResponse::ok("Flashcard set updated successfully", set))
}

async fn delete_set(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<FlashcardSet>, AppError> {
    let set = flashcards::delete_set(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found(SET_NOT_FOUND))?;
    Ok(ApiResponse::ok("Flashcard set deleted successfully", set))
}

async fn create_card(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<NewFlashcardRequest>,
) -> Result<ApiResponse<Flashcard>, AppError> {
    let set_id = non_blank(req.set_id.as_deref())
        .ok_or_else(|| AppError::validation("Set ID is required"))?;
    let (front, back) = front_and_back(req.front.as_deref(), req.back.as_deref())?;

    if flashcards::find_set_by_id(&state.db, set_id).await?.is_none() {
        return Err(AppError::not_found(SET_NOT_FOUND));
    }

    let card = flashcards::insert_card(&state.db, set_id, front, back).await?;
    Ok(ApiResponse::created("Flashcard created successfully", card))
}

async fn list_cards_by_set(
    State(state): State<AppState>,
    Path(set_id): Path<String>,
) -> Result<ApiResponse<Vec<Flashcard>>, AppError> {
    let cards = flashcards::fetch_cards_by_set(&state.db, &set_id).await?;
    Ok(ApiResponse::ok("Flashcards retrieved successfully", cards))
}

async fn get_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Flashcard>, AppError> {
    let card = flashcards::find_card_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found(CARD_NOT_FOUND))?;
    Ok(ApiResponse::ok("Flashcard retrieved successfully", card))
}

async fn update_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<UpdateFlashcardRequest>,
) -> Result<ApiResponse<Flashcard>, AppError> {
    let (front, back) = front_and_back(req.front.as_deref(), req.back.as_deref())?;

    let card = flashcards::update_card(&state.db, &id, front, back)
        .await?
        .ok_or_else(|| AppError::not_found(CARD_NOT_FOUND))?;
    Ok(ApiResponse::ok("Flashcard updated successfully", card))
}

async fn delete_card(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Flashcard>, AppError> {
    let card = flashcards::delete_card(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::not_found(CARD_NOT_FOUND))?;
    Ok(ApiResponse::ok("Flashcard deleted successfully", card))
}
