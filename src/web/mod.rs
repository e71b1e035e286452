// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::auth::{AuthConfig, AuthenticatedUser, OptionalAuth};
use crate::database::DatabaseConfig;
use crate::eligibility::JobProfileEligibility;
use crate::profile_client::ProfileServiceClient;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, put, routes, Build, Request, Response, Rocket, State};
use std::path::PathBuf;
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, PUT, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

// API Routes

#[get("/jobs/<job_id>/profile-requirements")]
pub async fn get_profile_requirements(
    job_id: String,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<DataResponse<RequirementsData>>, Json<StandardErrorResponse>> {
    handlers::get_requirements_handler(job_id, auth, db_config).await
}

#[put("/jobs/<job_id>/profile-requirements", data = "<request>")]
pub async fn upsert_profile_requirements(
    job_id: String,
    request: Json<StandardRequest<UpsertRequirementsRequest>>,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
) -> Result<Json<ActionResponse>, Json<StandardErrorResponse>> {
    handlers::upsert_requirements_handler(job_id, request, auth, db_config).await
}

#[get("/jobs/<job_id>/eligibility")]
pub async fn get_eligibility(
    job_id: String,
    auth: AuthenticatedUser,
    db_config: &State<DatabaseConfig>,
    profile_client: &State<ProfileServiceClient>,
) -> Result<Json<DataResponse<JobProfileEligibility>>, Json<StandardErrorResponse>> {
    handlers::get_eligibility_handler(job_id, auth, db_config, profile_client).await
}

#[get("/requirement-keys")]
pub async fn get_requirement_keys() -> Json<DataResponse<Vec<RequirementKeyInfo>>> {
    handlers::list_requirement_keys_handler().await
}

#[get("/me")]
pub async fn get_current_user(auth: AuthenticatedUser) -> Json<DataResponse<UserInfo>> {
    handlers::get_current_user_handler(auth).await
}

#[get("/me", rank = 2)]
pub async fn get_current_user_error() -> Json<StandardErrorResponse> {
    handlers::get_current_user_error_handler().await
}

#[get("/health")]
pub async fn health(auth: OptionalAuth) -> Json<TextResponse> {
    handlers::health_handler(auth).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

/// Assemble the rocket instance from its managed state.
pub fn build_rocket(
    db_config: DatabaseConfig,
    auth_config: AuthConfig,
    profile_client: ProfileServiceClient,
) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(auth_config)
        .manage(db_config)
        .manage(profile_client)
        .register("/api", catchers![bad_request, internal_error])
        .mount(
            "/api",
            routes![
                get_profile_requirements,
                upsert_profile_requirements,
                get_eligibility,
                get_requirement_keys,
                get_current_user,
                get_current_user_error,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(
    database_path: PathBuf,
    port: u16,
    profile_service_url: String,
    jwt_secret: String,
) -> Result<()> {
    let mut db_config = DatabaseConfig::new(database_path);

    if let Err(e) = db_config.init_pool().await {
        error!("Failed to initialize database: {}", e);
        return Err(e);
    }

    if let Err(e) = db_config.migrate().await {
        error!("Failed to run database migrations: {}", e);
        return Err(e);
    }

    let profile_client = ProfileServiceClient::new(profile_service_url)?;
    let auth_config = AuthConfig::new(jwt_secret);

    info!("Starting applygate eligibility API server");
    info!("Database: {}", db_config.database_path.display());

    let figment = rocket::Config::figment().merge(("port", port));

    let _rocket = build_rocket(db_config, auth_config, profile_client)
        .configure(figment)
        .launch()
        .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Claims, ROLE_ADMIN, ROLE_CANDIDATE};
    use crate::database::{run_migrations, RequirementRepository};
    use crate::requirements::ProfileRequirementKey;
    use jsonwebtoken::{encode, EncodingKey, Header as JwtHeader};
    use rocket::http::{ContentType, Header as HttpHeader};
    use rocket::local::asynchronous::Client;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::collections::BTreeSet;
    use uuid::Uuid;

    const TEST_SECRET: &str = "test-secret";
    // Discard port; nothing listens here, so profile fetches fail fast.
    const UNREACHABLE_PROFILE_SERVICE: &str = "http://127.0.0.1:9";

    fn bearer(role: &str) -> HttpHeader<'static> {
        let now = chrono::Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "user@example.com".to_string(),
            role: role.to_string(),
            exp: now + 3600,
            iat: now,
        };
        let token = encode(
            &JwtHeader::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();
        HttpHeader::new("Authorization", format!("Bearer {}", token))
    }

    async fn fresh_db() -> DatabaseConfig {
        // Single connection so the in-memory database is shared.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        DatabaseConfig {
            database_path: "test.db".into(),
            pool: Some(pool),
        }
    }

    async fn test_client(db_config: DatabaseConfig) -> Client {
        let rocket = build_rocket(
            db_config,
            AuthConfig::new(TEST_SECRET.to_string()),
            ProfileServiceClient::new(UNREACHABLE_PROFILE_SERVICE.to_string()).unwrap(),
        );
        Client::tracked(rocket).await.unwrap()
    }

    #[tokio::test]
    async fn test_eligibility_fails_open_when_profile_service_is_down() {
        let job_id = Uuid::new_v4();
        let db_config = fresh_db().await;
        let keys: BTreeSet<ProfileRequirementKey> = [
            ProfileRequirementKey::BasicPhone,
            ProfileRequirementKey::Resume,
        ]
        .into_iter()
        .collect();
        RequirementRepository::new(db_config.pool().unwrap())
            .upsert(job_id, &keys)
            .await
            .unwrap();

        let client = test_client(db_config).await;
        let response = client
            .get(format!("/api/jobs/{}/eligibility", job_id))
            .header(bearer(ROLE_CANDIDATE))
            .dispatch()
            .await;

        // Requirements are configured but the profile cannot be fetched:
        // the gate must not block the apply flow.
        assert_eq!(response.status(), Status::Ok);
        let body: serde_json::Value = response.into_json().await.unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["isEligible"], true);
        assert_eq!(body["data"]["totalRequired"], 0);
        assert!(body["data"]["missingKeys"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_eligibility_treats_unavailable_database_as_unconfigured() {
        // Pool never initialized; the requirement fetch fails.
        let db_config = DatabaseConfig::new("missing.db".into());
        let client = test_client(db_config).await;

        let response = client
            .get(format!("/api/jobs/{}/eligibility", Uuid::new_v4()))
            .header(bearer(ROLE_CANDIDATE))
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::Ok);
        let body: serde_json::Value = response.into_json().await.unwrap();
        assert_eq!(body["data"]["isEligible"], true);
        assert_eq!(body["data"]["completionPercentage"], 100);
    }

    #[tokio::test]
    async fn test_upsert_requires_admin_role() {
        let client = test_client(fresh_db().await).await;

        let response = client
            .put(format!(
                "/api/jobs/{}/profile-requirements",
                Uuid::new_v4()
            ))
            .header(ContentType::JSON)
            .header(bearer(ROLE_CANDIDATE))
            .body(r#"{"requirementKeys": ["BASIC_PHONE"]}"#)
            .dispatch()
            .await;

        let body: serde_json::Value = response.into_json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error_code"], "NOT_AUTHORIZED");
        assert_eq!(body["error"], "User not authorized for this operation");
    }

    #[tokio::test]
    async fn test_admin_saves_requirements_and_reads_them_back() {
        let job_id = Uuid::new_v4();
        let client = test_client(fresh_db().await).await;

        let response = client
            .put(format!("/api/jobs/{}/profile-requirements", job_id))
            .header(ContentType::JSON)
            .header(bearer(ROLE_ADMIN))
            .body(r#"{"requirementKeys": ["BASIC_PHONE", "RESUME"]}"#)
            .dispatch()
            .await;
        let body: serde_json::Value = response.into_json().await.unwrap();
        assert_eq!(body["success"], true);

        let response = client
            .get(format!("/api/jobs/{}/profile-requirements", job_id))
            .header(bearer(ROLE_ADMIN))
            .dispatch()
            .await;
        let body: serde_json::Value = response.into_json().await.unwrap();
        assert_eq!(body["data"]["requirementKeys"][0], "BASIC_PHONE");
        assert_eq!(body["data"]["requirementKeys"][1], "RESUME");
    }
}
