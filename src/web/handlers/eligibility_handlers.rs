// src/web/handlers/eligibility_handlers.rs
use crate::auth::AuthenticatedUser;
use crate::database::{DatabaseConfig, RequirementRepository};
use crate::eligibility::{evaluate, JobProfileEligibility};
use crate::profile_client::ProfileServiceClient;
use crate::requirements::ProfileRequirementKey;
use crate::web::types::{DataResponse, StandardErrorResponse};
use rocket::serde::json::Json;
use rocket::State;
use std::collections::BTreeSet;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Compute one candidate's eligibility for one job.
///
/// Failure policy (normative, not incidental): a requirement-set fetch
/// failure is treated as "no requirements configured", and a profile fetch
/// failure degrades to the gate-inactive snapshot. Transient check failures
/// must never block the apply action; only the upsert path surfaces hard
/// errors.
pub async fn get_eligibility_handler(
    job_id: String,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
    profile_client: &State<ProfileServiceClient>,
) -> Result<Json<DataResponse<JobProfileEligibility>>, Json<StandardErrorResponse>> {
    let job_id = match Uuid::parse_str(&job_id) {
        Ok(id) => id,
        Err(_) => {
            return Err(Json(StandardErrorResponse::new(
                format!("'{}' is not a valid job id", job_id),
                "INVALID_JOB_ID".to_string(),
                vec!["Job ids are UUIDs".to_string()],
                None,
            )))
        }
    };

    let candidate_id = match auth.candidate_id() {
        Ok(id) => id,
        Err(e) => {
            warn!("Eligibility request with non-candidate subject: {}", e);
            return Err(Json(StandardErrorResponse::new(
                "This endpoint is candidate-scoped".to_string(),
                "INVALID_SUBJECT".to_string(),
                vec!["Sign in with a candidate account".to_string()],
                None,
            )));
        }
    };

    let requirement_keys = load_requirement_keys(job_id, db_config).await;

    if requirement_keys.is_empty() {
        return Ok(Json(DataResponse::success(
            "No requirements configured; gate inactive".to_string(),
            JobProfileEligibility::gate_inactive(),
            None,
        )));
    }

    let profile = match profile_client.fetch_profile(candidate_id).await {
        Ok(profile) => profile,
        Err(e) => {
            // Fail open: the apply flow proceeds with eligibility unknown.
            error!(
                "Profile fetch failed for candidate {} (job {}): {}",
                candidate_id, job_id, e
            );
            return Ok(Json(DataResponse::success(
                "Eligibility could not be determined; apply is not blocked".to_string(),
                JobProfileEligibility::gate_inactive(),
                None,
            )));
        }
    };

    let result = evaluate(&requirement_keys, &profile);

    info!(
        "Eligibility for candidate {} on job {}: {}/{} complete, eligible={}",
        candidate_id, job_id, result.completed_count, result.total_required, result.is_eligible
    );

    Ok(Json(DataResponse::success(
        format!(
            "{} of {} required sections complete",
            result.completed_count, result.total_required
        ),
        result,
        None,
    )))
}

async fn load_requirement_keys(
    job_id: Uuid,
    db_config: &State<DatabaseConfig>,
) -> BTreeSet<ProfileRequirementKey> {
    let pool = match db_config.pool() {
        Ok(pool) => pool,
        Err(e) => {
            warn!(
                "Database unavailable for job {}; treating as unconfigured: {}",
                job_id, e
            );
            return BTreeSet::new();
        }
    };

    match RequirementRepository::new(pool).get(job_id).await {
        Ok(Some(config)) => config.requirement_keys,
        Ok(None) => BTreeSet::new(),
        Err(e) => {
            warn!(
                "Requirement fetch failed for job {}; treating as unconfigured: {}",
                job_id, e
            );
            BTreeSet::new()
        }
    }
}
