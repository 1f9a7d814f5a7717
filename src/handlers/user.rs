//! Signup provisioning hook.
//!
//! The platform's auth subsystem emits an account-created event with the new
//! account's uid and email; this hook seeds the companion profile document
//! every flashcard mutation relies on.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::store::{DocumentStore, USERS};
use crate::AppState;

/// Account-creation event delivered by the identity provider
#[derive(Debug, Clone, Deserialize)]
pub struct SignupEvent {
    pub uid: String,
    pub email: String,
}

/// Create the initial user profile, overwriting any existing document
pub async fn provision_user_profile(
    store: &dyn DocumentStore,
    event: &SignupEvent,
) -> Result<(), ApiError> {
    store
        .set(
            USERS,
            &event.uid,
            &json!({
                "email": event.email,
                "createdFlashcards": [],
            }),
        )
        .await?;
    Ok(())
}

// --- axum route ---

/// POST /hooks/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(event): Json<SignupEvent>,
) -> Result<Json<Value>, ApiError> {
    provision_user_profile(state.store.as_ref(), &event).await?;
    tracing::info!(uid = %event.uid, "Provisioned user profile");
    Ok(Json(json!({ "success": true, "data": null })))
}
