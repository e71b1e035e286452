// src/web/handlers/requirement_handlers.rs
use crate::auth::{AuthError, AuthenticatedUser};
use crate::database::{DatabaseConfig, RequirementRepository};
use crate::requirements::ProfileRequirementKey;
use crate::web::types::{
    ActionResponse, DataResponse, RequirementKeyInfo, RequirementsData, StandardErrorResponse,
    StandardRequest, UpsertRequirementsRequest, WithConversationId,
};
use rocket::serde::json::Json;
use rocket::State;
use std::collections::BTreeSet;
use tracing::{error, info};
use uuid::Uuid;

fn parse_job_id(
    job_id: &str,
    conversation_id: Option<String>,
) -> Result<Uuid, Json<StandardErrorResponse>> {
    Uuid::parse_str(job_id).map_err(|_| {
        Json(StandardErrorResponse::new(
            format!("'{}' is not a valid job id", job_id),
            "INVALID_JOB_ID".to_string(),
            vec!["Job ids are UUIDs".to_string()],
            conversation_id,
        ))
    })
}

pub async fn get_requirements_handler(
    job_id: String,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<RequirementsData>>, Json<StandardErrorResponse>> {
    let job_id = parse_job_id(&job_id, None)?;

    info!(
        "Fetching requirement configuration for job {} (user: {})",
        job_id,
        auth.email()
    );

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database connection failed: {}", e);
            return Err(Json(StandardErrorResponse::new(
                "Could not load requirement configuration".to_string(),
                "CONFIG_FETCH_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
                None,
            )));
        }
    };

    match RequirementRepository::new(pool).get(job_id).await {
        Ok(Some(config)) => Ok(Json(DataResponse::success(
            format!("{} requirement keys configured", config.requirement_keys.len()),
            RequirementsData {
                job_id: config.job_id,
                requirement_keys: config.requirement_keys,
                updated_at: Some(config.updated_at),
            },
            None,
        ))),
        Ok(None) => Ok(Json(DataResponse::success(
            "No requirements configured for this job".to_string(),
            RequirementsData {
                job_id,
                requirement_keys: BTreeSet::new(),
                updated_at: None,
            },
            None,
        ))),
        Err(e) => {
            error!("Failed to load requirement configuration: {}", e);
            Err(Json(StandardErrorResponse::new(
                "Could not load requirement configuration".to_string(),
                "CONFIG_FETCH_ERROR".to_string(),
                vec!["Try again in a few moments".to_string()],
                None,
            )))
        }
    }
}

pub async fn upsert_requirements_handler(
    job_id: String,
    request: Json<StandardRequest<UpsertRequirementsRequest>>,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();

    if !auth.is_admin() {
        info!(
            "Rejected requirement upsert by non-admin user: {}",
            auth.email()
        );
        return Err(Json(StandardErrorResponse::new(
            AuthError::NotAuthorized.message().to_string(),
            "NOT_AUTHORIZED".to_string(),
            vec!["Ask a portal administrator to make this change".to_string()],
            conversation_id,
        )));
    }

    let job_id = parse_job_id(&job_id, conversation_id.clone())?;

    // Validate every key before touching storage; the replace is
    // all-or-nothing.
    let mut requirement_keys = BTreeSet::new();
    for raw in &request.data.requirement_keys {
        match ProfileRequirementKey::parse(raw) {
            Some(key) => {
                requirement_keys.insert(key);
            }
            None => {
                return Err(Json(StandardErrorResponse::new(
                    format!("Unknown requirement key: {}", raw),
                    "UNKNOWN_REQUIREMENT_KEY".to_string(),
                    vec![format!(
                        "Valid keys: {}",
                        ProfileRequirementKey::ALL
                            .iter()
                            .map(|k| k.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    )],
                    conversation_id,
                )));
            }
        }
    }

    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            error!("Database connection failed: {}", e);
            return Err(Json(StandardErrorResponse::new(
                "Failed to save requirement configuration".to_string(),
                "UPSERT_ERROR".to_string(),
                vec!["Try again or contact support".to_string()],
                conversation_id,
            )));
        }
    };

    if let Err(e) = RequirementRepository::new(pool)
        .upsert(job_id, &requirement_keys)
        .await
    {
        error!("Failed to save requirement configuration: {}", e);
        return Err(Json(StandardErrorResponse::new(
            "Failed to save requirement configuration".to_string(),
            "UPSERT_ERROR".to_string(),
            vec!["Try again or contact support".to_string()],
            conversation_id,
        )));
    }

    info!(
        "User {} set {} requirement keys for job {}",
        auth.email(),
        requirement_keys.len(),
        job_id
    );

    Ok(Json(ActionResponse::success(
        format!(
            "Requirement configuration saved ({} keys)",
            requirement_keys.len()
        ),
        "saved".to_string(),
        conversation_id,
    )))
}

pub async fn list_requirement_keys_handler() -> Json<DataResponse<Vec<RequirementKeyInfo>>> {
    let catalog = ProfileRequirementKey::ALL
        .iter()
        .map(|key| RequirementKeyInfo {
            key: *key,
            label: key.label().to_string(),
            group: key.group(),
        })
        .collect();

    Json(DataResponse::success(
        "Requirement key catalog".to_string(),
        catalog,
        None,
    ))
}
