//! HTTP client for the GECOS Control Center — implements `DirectoryClient`.

use std::time::Duration;

use anyhow::{Context, Result};
use gecos_common::{
    AutoConfigDocument, ComputerList, OkResponse, OrganizationalUnit, OuEntry, RemoteAutoConfig,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::application::ports::DirectoryClient;
use crate::domain::access::AccessData;
use crate::domain::config::NetworkConfig;

const AUTH_CONFIG_PATH: &str = "/auth/config/";
const COMPUTER_LIST_PATH: &str = "/computers/list/";
const OU_SEARCH_PATH: &str = "/ou/gca/";
const REGISTER_PATH: &str = "/register/computer/";

/// Control Center client over HTTP(S) with basic authentication.
pub struct HttpDirectoryClient {
    client: Client,
}

impl HttpDirectoryClient {
    /// Creates a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(network: &NetworkConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(network.http_timeout_secs))
            .danger_accept_invalid_certs(network.accept_invalid_certs)
            .user_agent(concat!("gecos-assistant/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }

    fn get(&self, access: &AccessData, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", access.base_url());
        debug!(%url, "GET");
        self.client
            .get(url)
            .basic_auth(access.login.trim(), Some(&access.password))
    }

    async fn send(req: RequestBuilder, what: &str) -> Result<Response> {
        req.send()
            .await
            .with_context(|| format!("Failed to send {what} request"))
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("API error ({status}): {}", body.trim())
}

fn is_auth_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

/// Extracts the `ous` array, rejecting anything that is not a list.
fn parse_ou_response(body: &serde_json::Value) -> Result<Vec<OrganizationalUnit>> {
    let ous = body
        .get("ous")
        .and_then(serde_json::Value::as_array)
        .context("OU search did not return a list")?;
    ous.iter()
        .map(|v| {
            serde_json::from_value::<OuEntry>(v.clone())
                .map(OrganizationalUnit::from)
                .context("Failed to parse OU entry")
        })
        .collect()
}

impl DirectoryClient for HttpDirectoryClient {
    async fn validate_credentials(&self, access: &AccessData) -> Result<bool> {
        let response = Self::send(self.get(access, AUTH_CONFIG_PATH), "credential").await?;
        let status = response.status();
        if status.is_success() {
            return Ok(true);
        }
        if is_auth_failure(status) {
            debug!(%status, "credentials rejected");
            return Ok(false);
        }
        ensure_success(response).await.map(|_| false)
    }

    async fn fetch_autoconf(&self, access: &AccessData) -> Result<Option<RemoteAutoConfig>> {
        let response = Self::send(self.get(access, AUTH_CONFIG_PATH), "autoconfiguration").await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = ensure_success(response)
            .await?
            .text()
            .await
            .context("Failed to read autoconfiguration")?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let doc: AutoConfigDocument =
            serde_json::from_str(&body).context("Failed to parse autoconfiguration")?;
        let conf = RemoteAutoConfig::from(doc);
        Ok((!conf.is_empty()).then_some(conf))
    }

    async fn list_computer_names(&self, access: &AccessData) -> Result<Vec<String>> {
        let response = Self::send(self.get(access, COMPUTER_LIST_PATH), "computer list").await?;
        let list: ComputerList = ensure_success(response)
            .await?
            .json()
            .await
            .context("Failed to parse computer list")?;
        Ok(list.computers.into_iter().map(|c| c.name).collect())
    }

    async fn search_organizational_units(
        &self,
        access: &AccessData,
        text: &str,
    ) -> Result<Vec<OrganizationalUnit>> {
        let req = self.get(access, OU_SEARCH_PATH).query(&[("q", text)]);
        let response = Self::send(req, "OU search").await?;
        let body: serde_json::Value = ensure_success(response)
            .await?
            .json()
            .await
            .context("Failed to parse OU search response")?;
        parse_ou_response(&body)
    }

    async fn register_computer(
        &self,
        access: &AccessData,
        node_name: &str,
        ou_id: &str,
    ) -> Result<bool> {
        let url = format!("{}{REGISTER_PATH}", access.base_url());
        debug!(%url, node_name, ou_id, "POST");
        let req = self
            .client
            .post(url)
            .basic_auth(access.login.trim(), Some(&access.password))
            .form(&[("ou_id", ou_id), ("node_id", node_name)]);
        let response = Self::send(req, "register").await?;
        let ok: OkResponse = ensure_success(response)
            .await?
            .json()
            .await
            .context("Failed to parse register response")?;
        Ok(ok.ok)
    }

    async fn unregister_computer(&self, access: &AccessData, node_name: &str) -> Result<bool> {
        let url = format!("{}{REGISTER_PATH}", access.base_url());
        debug!(%url, node_name, "DELETE");
        let req = self
            .client
            .delete(url)
            .basic_auth(access.login.trim(), Some(&access.password))
            .query(&[("node_id", node_name)]);
        let response = Self::send(req, "unregister").await?;
        let ok: OkResponse = ensure_success(response)
            .await?
            .json()
            .await
            .context("Failed to parse unregister response")?;
        Ok(ok.ok)
    }

    async fn download_certificate(&self, url: &str) -> Result<String> {
        debug!(%url, "GET certificate");
        let response = Self::send(self.client.get(url), "certificate download").await?;
        let pem = ensure_success(response)
            .await?
            .text()
            .await
            .context("Failed to read certificate")?;
        anyhow::ensure!(
            pem.contains("-----BEGIN"),
            "{url} did not return a PEM document"
        );
        Ok(pem)
    }
}
