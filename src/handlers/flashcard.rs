//! Flashcard set creation and update handlers.
//!
//! Both handlers take their collaborators explicitly - a document store
//! handle and the invocation's identity context - so the core logic stays
//! testable without HTTP. The thin axum route functions at the bottom adapt
//! requests onto them.
//!
//! Expected input for create:
//!   - "title" <string (1-30 characters)>
//!   - "category" <string (1-30 characters)>
//!   - "cards" [] of {"question", "answer"} <non-empty strings>
//!
//! Update additionally requires "flashcardId" and overwrites the mutable
//! fields of an existing set.

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::identity::{Identity, OptionalIdentity};
use crate::store::{DocumentStore, StoreError, FLASHCARDS, USERS};
use crate::validation::{array_of_objects_contain_keys, is_str_between, is_truthy};
use crate::AppState;

const TITLE_MESSAGE: &str = "The \"title\" field must be a string between 1-30 characters.";
const CATEGORY_MESSAGE: &str = "The \"category\" field must be a string between 1-30 characters.";
const CARDS_MESSAGE: &str = "The \"cards\" field must be a non-empty array of objects with \
                             keys \"question\" and \"answer\" with non-empty string values.";

/// Create a flashcard set owned by the authenticated caller and append its
/// summary to the caller's profile. Returns the persisted set including the
/// store-assigned `flashcardId`.
pub async fn add_flashcard_set(
    store: &dyn DocumentStore,
    identity: Option<&Identity>,
    payload: &Value,
) -> Result<Value, ApiError> {
    let identity = identity.ok_or_else(|| {
        ApiError::unauthenticated("You must be authenticated to create a flashcard set.")
    })?;

    require_fields(payload, &["title", "category", "cards"])?;
    validate_set_fields(payload)?;

    let timestamp = Utc::now().timestamp_millis();
    let title = trimmed(&payload["title"]);
    let category = trimmed(&payload["category"]);
    let cards = trimmed_cards(payload["cards"].as_array().unwrap_or(&Vec::new()));

    let set = json!({
        "creatorId": identity.uid,
        "title": title,
        "category": category,
        "cards": cards,
        "timestamp": timestamp,
    });

    let flashcard_id = store.add(FLASHCARDS, &set).await?;

    // Denormalized reference on the owner's profile. The append is a single
    // atomic store operation, so concurrent creations for the same user
    // cannot drop each other's entries. No rollback of the flashcard write
    // if this fails; the error surfaces as "unknown".
    let summary = json!({
        "flashcardId": flashcard_id,
        "title": title,
        "category": category,
        "timestamp": timestamp,
    });
    store
        .array_union(USERS, &identity.uid, "createdFlashcards", &summary)
        .await?;

    let mut persisted = set;
    persisted["flashcardId"] = json!(flashcard_id);
    Ok(persisted)
}

/// Overwrite an existing flashcard set's mutable fields and the matching
/// summary on the caller's profile. Returns the persisted set.
// TODO: reject updates when the caller is not the set's creator
pub async fn update_flashcard_set(
    store: &dyn DocumentStore,
    identity: Option<&Identity>,
    payload: &Value,
) -> Result<Value, ApiError> {
    let identity = identity.ok_or_else(|| {
        ApiError::unauthenticated("You must be authenticated to update a flashcard set.")
    })?;

    require_fields(payload, &["flashcardId", "title", "category", "cards"])?;
    validate_set_fields(payload)?;

    let flashcard_id = payload["flashcardId"].as_str().ok_or_else(|| {
        ApiError::invalid_argument("The \"flashcardId\" field must be provided.")
    })?;

    let timestamp = Utc::now().timestamp_millis();
    let title = trimmed(&payload["title"]);
    let category = trimmed(&payload["category"]);
    let cards = trimmed_cards(payload["cards"].as_array().unwrap_or(&Vec::new()));

    // Merge keeps creatorId untouched; a missing id is a store NotFound
    store
        .update(
            FLASHCARDS,
            flashcard_id,
            &json!({
                "title": title,
                "category": category,
                "cards": cards,
                "timestamp": timestamp,
            }),
        )
        .await?;

    sync_profile_summary(store, &identity.uid, flashcard_id, &title, &category, timestamp).await?;

    let mut persisted = store
        .get(FLASHCARDS, flashcard_id)
        .await?
        .ok_or_else(|| StoreError::not_found(FLASHCARDS, flashcard_id))?;
    persisted["flashcardId"] = json!(flashcard_id);
    Ok(persisted)
}

/// Overwrite the matching summary entry on the owner's profile. A summary
/// that is missing from the profile is left alone. Read-modify-write: a
/// concurrent update for the same user can still lose one rewrite.
async fn sync_profile_summary(
    store: &dyn DocumentStore,
    uid: &str,
    flashcard_id: &str,
    title: &str,
    category: &str,
    timestamp: i64,
) -> Result<(), ApiError> {
    let mut profile = store
        .get(USERS, uid)
        .await?
        .ok_or_else(|| StoreError::not_found(USERS, uid))?;

    let Some(entries) = profile
        .get_mut("createdFlashcards")
        .and_then(Value::as_array_mut)
    else {
        return Ok(());
    };

    for entry in entries.iter_mut() {
        if entry.get("flashcardId").and_then(Value::as_str) == Some(flashcard_id) {
            entry["title"] = json!(title);
            entry["category"] = json!(category);
            entry["timestamp"] = json!(timestamp);
        }
    }

    store
        .update(USERS, uid, &json!({ "createdFlashcards": entries }))
        .await?;
    Ok(())
}

/// Each missing/falsy field is its own failure, checked in declaration order
fn require_fields(payload: &Value, fields: &[&str]) -> Result<(), ApiError> {
    for field in fields {
        if !is_truthy(&payload[*field]) {
            return Err(ApiError::invalid_argument(format!(
                "The \"{field}\" field must be provided."
            )));
        }
    }
    Ok(())
}

/// Shared field validation for create and update, checked after presence
fn validate_set_fields(payload: &Value) -> Result<(), ApiError> {
    if !is_str_between(&payload["title"], 1, 30).unwrap_or(false) {
        return Err(ApiError::invalid_argument(TITLE_MESSAGE));
    }
    if !is_str_between(&payload["category"], 1, 30).unwrap_or(false) {
        return Err(ApiError::invalid_argument(CATEGORY_MESSAGE));
    }

    let cards_ok = payload["cards"].as_array().is_some_and(|cards| {
        !cards.is_empty()
            && array_of_objects_contain_keys(cards, &["question", "answer"]).unwrap_or(false)
    });
    if !cards_ok {
        return Err(ApiError::invalid_argument(CARDS_MESSAGE));
    }
    Ok(())
}

fn trimmed(value: &Value) -> String {
    value.as_str().unwrap_or_default().trim().to_string()
}

fn trimmed_cards(cards: &[Value]) -> Vec<Value> {
    cards
        .iter()
        .map(|card| {
            json!({
                "question": trim_field(&card["question"]),
                "answer": trim_field(&card["answer"]),
            })
        })
        .collect()
}

fn trim_field(value: &Value) -> Value {
    match value {
        Value::String(s) => json!(s.trim()),
        other => other.clone(),
    }
}

// --- axum routes ---

/// POST /api/flashcards
pub async fn create(
    State(state): State<AppState>,
    OptionalIdentity(identity): OptionalIdentity,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let set = add_flashcard_set(state.store.as_ref(), identity.as_ref(), &payload).await?;
    Ok(Json(json!({ "success": true, "data": set })))
}

/// PUT /api/flashcards
pub async fn update(
    State(state): State<AppState>,
    OptionalIdentity(identity): OptionalIdentity,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let set = update_flashcard_set(state.store.as_ref(), identity.as_ref(), &payload).await?;
    Ok(Json(json!({ "success": true, "data": set })))
}
