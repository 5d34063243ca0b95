use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::{
    klaviyo_client::{ProfileAttributes, ProfileOutcome},
    web::{
        data::{self, DataParsingError, Segment},
        Error, Result,
    },
    AppState,
};

/// Relays one lead-capture submission to Klaviyo: validate the keys, pick the
/// destination list from the segment, create or resolve the profile, attach
/// it to the list. Strictly sequential, the second call needs the id produced
/// by the first.
#[tracing::instrument(name = "Relaying lead submission to Klaviyo", skip(app_state, submission))]
pub async fn notification_popup(
    State(app_state): State<AppState>,
    Json(submission): Json<Value>,
) -> Result<Json<Value>> {
    if !data::has_required_keys(&submission, &data::REQUIRED_KEYS) {
        return Err(DataParsingError::MissingRequiredKeys.into());
    }

    let segment = Segment::parse(&submission["segment"])?;
    let list_id = app_state.list_id(segment);
    debug!("segment '{}' resolved to list '{list_id}'", segment.as_ref());

    let profile = ProfileAttributes {
        email: &submission["email"],
        first_name: &submission["firstname"],
        zipcode: &submission["zipcode"],
        birthday: &submission["birthday"],
    };

    let profile_id = match app_state.klaviyo_client.create_profile(&profile).await? {
        ProfileOutcome::Created(id) => id,
        ProfileOutcome::Duplicate(id) => {
            info!("profile already exists, id resolved from duplicate metadata");
            id
        }
        ProfileOutcome::Unresolved => return Err(Error::ProfileUnresolved),
    };

    app_state
        .klaviyo_client
        .add_profile_to_list(list_id, &profile_id)
        .await?;

    info!("SUCCESS");
    Ok(Json(json!({ "success": "data submitted to klaviyo" })))
}
