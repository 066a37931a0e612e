//! Blueink API client.
//!
//! The main entry point for interacting with the Blueink eSignature API.

use crate::bundles::BundlesClient;
use crate::error::{BlueinkError, Result};
use crate::packets::PacketsClient;
use crate::persons::PersonsClient;
use crate::response::NormalizedResponse;
use crate::templates::{EnvelopeTemplatesClient, TemplatesClient};
use crate::webhooks::WebhooksClient;
use reqwest::{header, Client as HttpClient, Method};
use serde::Serialize;
use std::env;
use std::time::Duration;

/// Default API base URL, used when neither the config nor the environment
/// overrides it.
pub const DEFAULT_BASE_URL: &str = "https://api.blueink.com/api/v2";
/// Environment variable holding the private API key.
pub const ENV_PRIVATE_API_KEY: &str = "BLUEINK_PRIVATE_API_KEY";
/// Environment variable overriding the API base URL.
pub const ENV_API_URL: &str = "BLUEINK_API_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Blueink API client.
///
/// # Example
///
/// ```rust,no_run
/// use blueink::{BundleBuilder, Client};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Client::new("blueink_private_key")?;
///
///     let mut builder = BundleBuilder::new();
///     builder.label("NDA packet");
///     let doc = builder.add_document_by_url("https://example.com/nda.pdf")?;
///     let signer = builder.add_signer("Homer", Some("homer@example.com"), None)?;
///     builder.add_field(
///         &doc,
///         15, 20, 30, 12, 1,
///         blueink::FieldKind::Signature,
///         &[&signer],
///     )?;
///
///     let response = client.bundles().create_from_builder(&builder).await?;
///     println!("created bundle: {}", response.data["id"]);
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    pub(crate) http: HttpClient,
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) raise_on_error: bool,
}

/// Configuration options for the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for the API. Falls back to the `BLUEINK_API_URL` environment
    /// variable, then to [`DEFAULT_BASE_URL`].
    pub base_url: Option<String>,
    /// Request timeout (default: 30 seconds).
    pub timeout: Option<Duration>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When true (the default), non-2xx responses become
    /// [`BlueinkError::Api`]. When false they are returned as
    /// [`NormalizedResponse`] values and status inspection is left to the
    /// caller.
    pub raise_on_error: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: None,
            user_agent: None,
            raise_on_error: true,
        }
    }
}

impl Client {
    /// Create a new Blueink client with default configuration.
    ///
    /// Fails with [`BlueinkError::MissingApiKey`] if `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a client taking the API key (and optionally the base URL)
    /// from the environment: `BLUEINK_PRIVATE_API_KEY` and
    /// `BLUEINK_API_URL`.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(ENV_PRIVATE_API_KEY).unwrap_or_default();
        Self::with_config(api_key, ClientConfig::default())
    }

    /// Create a new Blueink client with custom configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use blueink::{Client, ClientConfig};
    /// use std::time::Duration;
    ///
    /// let client = Client::with_config("blueink_private_key", ClientConfig {
    ///     base_url: Some("https://sandbox.blueink.com/api/v2".to_string()),
    ///     timeout: Some(Duration::from_secs(60)),
    ///     ..Default::default()
    /// }).unwrap();
    /// ```
    pub fn with_config(api_key: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(BlueinkError::MissingApiKey);
        }

        let base_url = config
            .base_url
            .or_else(|| env::var(ENV_API_URL).ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = config
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let user_agent = config
            .user_agent
            .unwrap_or_else(|| format!("blueink-rust/{}", env!("CARGO_PKG_VERSION")));

        let http = HttpClient::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key,
            raise_on_error: config.raise_on_error,
        })
    }

    /// Get the base URL for the API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bundle operations: create, list, retrieve, cancel, related data.
    pub fn bundles(&self) -> BundlesClient {
        BundlesClient::new(self.clone())
    }

    /// Person (stored signer) operations.
    pub fn persons(&self) -> PersonsClient {
        PersonsClient::new(self.clone())
    }

    /// Packet operations: update, remind, embed URLs, certificates.
    pub fn packets(&self) -> PacketsClient {
        PacketsClient::new(self.clone())
    }

    /// Template listing and retrieval.
    pub fn templates(&self) -> TemplatesClient {
        TemplatesClient::new(self.clone())
    }

    /// Envelope template listing and retrieval.
    pub fn envelope_templates(&self) -> EnvelopeTemplatesClient {
        EnvelopeTemplatesClient::new(self.clone())
    }

    /// Webhook subscription management.
    pub fn webhooks(&self) -> WebhooksClient {
        WebhooksClient::new(self.clone())
    }

    fn authorized(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header(header::AUTHORIZATION, format!("Token {}", self.api_key))
    }

    async fn finish(&self, request: reqwest::RequestBuilder) -> Result<NormalizedResponse> {
        let response = request.send().await?;
        let normalized = NormalizedResponse::from_response(response).await?;

        if self.raise_on_error && !normalized.is_success() {
            return Err(BlueinkError::Api {
                status: normalized.status,
                body: String::from_utf8_lossy(&normalized.raw).into_owned(),
            });
        }

        Ok(normalized)
    }

    /// Make an authenticated GET request with optional query parameters.
    pub(crate) async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<NormalizedResponse> {
        let mut request = self.authorized(Method::GET, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        self.finish(request).await
    }

    /// Make an authenticated POST request with a JSON body.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<NormalizedResponse> {
        self.finish(self.authorized(Method::POST, url).json(body))
            .await
    }

    /// Make an authenticated POST request with no body.
    pub(crate) async fn post_empty(&self, url: &str) -> Result<NormalizedResponse> {
        self.finish(self.authorized(Method::POST, url)).await
    }

    /// Make an authenticated multipart POST request.
    pub(crate) async fn post_multipart(
        &self,
        url: &str,
        form: reqwest::multipart::Form,
    ) -> Result<NormalizedResponse> {
        self.finish(self.authorized(Method::POST, url).multipart(form))
            .await
    }

    /// Make an authenticated PUT request with a JSON body.
    pub(crate) async fn put_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<NormalizedResponse> {
        self.finish(self.authorized(Method::PUT, url).json(body))
            .await
    }

    /// Make an authenticated PUT request with no body.
    pub(crate) async fn put_empty(&self, url: &str) -> Result<NormalizedResponse> {
        self.finish(self.authorized(Method::PUT, url)).await
    }

    /// Make an authenticated PATCH request with a JSON body.
    pub(crate) async fn patch_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<NormalizedResponse> {
        self.finish(self.authorized(Method::PATCH, url).json(body))
            .await
    }

    /// Make an authenticated DELETE request.
    pub(crate) async fn delete(&self, url: &str) -> Result<NormalizedResponse> {
        self.finish(self.authorized(Method::DELETE, url)).await
    }
}

/// Build the standard page/per_page query pairs for list endpoints,
/// merging in any caller-supplied extra parameters.
pub(crate) fn list_params(
    page: Option<u32>,
    per_page: Option<u32>,
    extra: &[(String, String)],
) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = extra.to_vec();
    if let Some(page) = page {
        params.push(("page".to_string(), page.to_string()));
    }
    if let Some(per_page) = per_page {
        params.push(("per_page".to_string(), per_page.to_string()));
    }
    params
}
