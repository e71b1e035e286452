// src/profile_client.rs
//! HTTP client for the upstream candidate-profile service.

use crate::profile::CandidateProfile;
use anyhow::{Context, Result};
use tracing::{error, trace};
use uuid::Uuid;

const PROFILE_ENDPOINT: &str = "/candidates";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct ProfileServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProfileServiceClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// Fetch one candidate's profile snapshot.
    ///
    /// Errors here are expected to be handled fail-open by the caller; the
    /// profile service being down must not block the apply flow.
    pub async fn fetch_profile(&self, candidate_id: Uuid) -> Result<CandidateProfile> {
        let url = format!(
            "{}{}/{}/profile",
            self.base_url, PROFILE_ENDPOINT, candidate_id
        );

        trace!("Calling profile service: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Profile service request failed: {}", url))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<CandidateProfile>()
                .await
                .context("Failed to parse candidate profile response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            error!("Profile service error response: {}", error_text);
            anyhow::bail!(
                "Profile service returned status {} for candidate {}: {}",
                status,
                candidate_id,
                error_text
            )
        }
    }
}
