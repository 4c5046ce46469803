use log::debug;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::Token;
use crate::error::{MyMrError, Result};

use super::types::{MergeRequest, Note};

/// Thin REST client for the two GitLab v4 endpoints the report needs.
///
/// Cheap to share: the underlying `reqwest::Client` pools connections and is
/// safe to use from many tasks at once.
pub struct GitLabClient {
    client: Client,
    api_url: Url,
    token: Option<Token>,
}

impl GitLabClient {
    pub fn new(base_url: &str, token: Option<Token>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("my-mr/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MyMrError::Config(format!("Failed to create HTTP client: {e}")))?;

        // Keep a trailing slash so instances served from a sub-path survive `join`
        let mut base = Url::parse(base_url)
            .map_err(|e| MyMrError::Config(format!("Invalid base URL: {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let api_url = base
            .join("api/v4/")
            .map_err(|e| MyMrError::Config(format!("Invalid API base URL: {e}")))?;

        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.token {
            request.bearer_auth(token.as_str())
        } else {
            request
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_url
            .join(path)
            .map_err(|e| MyMrError::Config(format!("Invalid endpoint URL: {e}")))
    }

    /// Single GET, single response: no pagination, no retry.
    async fn get_json<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!("GET {url}");

        let response = self.auth_request(self.client.get(url.clone())).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(MyMrError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Lists merge requests created by the token owner.
    ///
    /// With `only_open` the server filters to `state=opened`; otherwise every
    /// state is returned.
    ///
    /// # Errors
    ///
    /// `Network` on transport failure, `HttpStatus` on any non-200 response,
    /// `Decode` when the body is not a JSON array of merge requests.
    pub async fn list_merge_requests(&self, only_open: bool) -> Result<Vec<MergeRequest>> {
        let mut url = self.endpoint("merge_requests")?;
        if only_open {
            url.query_pairs_mut().append_pair("state", "opened");
        }

        self.get_json(url).await
    }

    /// Lists the discussion notes of one merge request, in API order.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`GitLabClient::list_merge_requests`].
    pub async fn list_notes(&self, project_id: u64, iid: u64) -> Result<Vec<Note>> {
        let url = self.endpoint(&format!(
            "projects/{project_id}/merge_requests/{iid}/notes"
        ))?;

        self.get_json(url).await
    }
}
