//! Webhook subscription management.
//!
//! Full CRUD for webhook subscriptions and their extra-header sub-resource,
//! read-only listing of webhook events and deliveries, and shared-secret
//! retrieval/regeneration. Access via `client.webhooks()`.

use crate::client::{list_params, Client};
use crate::endpoints::{self, build_url};
use crate::error::{BlueinkError, Result};
use crate::response::NormalizedResponse;
use crate::types::{event_types, Webhook, WebhookExtraHeader};

/// Builder for [`Webhook`] payloads.
///
/// Subscribed event types are validated against the fixed set the API
/// accepts; extra headers keep the order they were added in.
#[derive(Debug)]
pub struct WebhookBuilder {
    url: String,
    enabled: bool,
    json_payload: bool,
    event_types: Vec<String>,
    extra_headers: Vec<WebhookExtraHeader>,
}

impl WebhookBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            enabled: true,
            json_payload: true,
            event_types: vec![],
            extra_headers: vec![],
        }
    }

    /// Toggle whether the subscription is active.
    pub fn enabled(&mut self, enabled: bool) -> &mut Self {
        self.enabled = enabled;
        self
    }

    /// Toggle whether deliveries carry a JSON body.
    pub fn json_payload(&mut self, json_payload: bool) -> &mut Self {
        self.json_payload = json_payload;
        self
    }

    /// Subscribe to an event type. Fails if the type is not one the API
    /// supports.
    pub fn add_event_type(&mut self, event_type: impl Into<String>) -> Result<&mut Self> {
        let event_type = event_type.into();
        if !event_types::ALL.contains(&event_type.as_str()) {
            return Err(BlueinkError::Validation(format!(
                "event type '{event_type}' is not allowed; must be one of {:?}",
                event_types::ALL
            )));
        }
        self.event_types.push(event_type);
        Ok(self)
    }

    /// Add an extra HTTP header to send with deliveries. Headers keep the
    /// order they were added in.
    pub fn add_extra_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let order = self.extra_headers.len() as u32;
        self.extra_headers.push(WebhookExtraHeader {
            id: None,
            webhook: None,
            name: name.into(),
            value: value.into(),
            order,
        });
        self
    }

    /// Compile the webhook payload. At least one event type is required.
    pub fn build(&self) -> Result<Webhook> {
        if self.event_types.is_empty() {
            return Err(BlueinkError::Validation(
                "a webhook must subscribe to at least one event type".to_string(),
            ));
        }
        Ok(Webhook {
            id: None,
            url: self.url.clone(),
            enabled: self.enabled,
            json_payload: self.json_payload,
            event_types: self.event_types.clone(),
            extra_headers: self.extra_headers.clone(),
        })
    }
}

/// Client for webhook operations.
pub struct WebhooksClient {
    client: Client,
}

impl WebhooksClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    // ----------
    // Webhooks
    // ----------

    /// Create a webhook subscription.
    pub async fn create(&self, webhook: &Webhook) -> Result<NormalizedResponse> {
        let url = build_url(&self.client.base_url, endpoints::webhooks::CREATE, &[])?;
        self.client.post_json(&url, webhook).await
    }

    /// Compile a [`WebhookBuilder`] and post the result.
    pub async fn create_from_builder(
        &self,
        builder: &WebhookBuilder,
    ) -> Result<NormalizedResponse> {
        self.create(&builder.build()?).await
    }

    /// List webhook subscriptions.
    pub async fn list(&self, extra: &[(String, String)]) -> Result<NormalizedResponse> {
        let url = build_url(&self.client.base_url, endpoints::webhooks::LIST, &[])?;
        self.client.get(&url, &list_params(None, None, extra)).await
    }

    /// Retrieve a single webhook subscription.
    pub async fn retrieve(&self, webhook_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::webhooks::RETRIEVE,
            &[("webhook_id", webhook_id)],
        )?;
        self.client.get(&url, &[]).await
    }

    /// Partially update a webhook subscription (PATCH).
    pub async fn update(
        &self,
        webhook_id: &str,
        data: &serde_json::Value,
    ) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::webhooks::UPDATE,
            &[("webhook_id", webhook_id)],
        )?;
        self.client.patch_json(&url, data).await
    }

    /// Delete a webhook subscription.
    pub async fn delete(&self, webhook_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::webhooks::DELETE,
            &[("webhook_id", webhook_id)],
        )?;
        self.client.delete(&url).await
    }

    // ----------
    // Extra headers
    // ----------

    /// Attach an extra header to an existing webhook.
    pub async fn create_header(&self, header: &WebhookExtraHeader) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::webhooks::CREATE_HEADER,
            &[],
        )?;
        self.client.post_json(&url, header).await
    }

    /// List webhook extra headers.
    pub async fn list_headers(&self, extra: &[(String, String)]) -> Result<NormalizedResponse> {
        let url = build_url(&self.client.base_url, endpoints::webhooks::LIST_HEADERS, &[])?;
        self.client.get(&url, &list_params(None, None, extra)).await
    }

    /// Retrieve a single extra header.
    pub async fn retrieve_header(&self, header_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::webhooks::RETRIEVE_HEADER,
            &[("webhook_header_id", header_id)],
        )?;
        self.client.get(&url, &[]).await
    }

    /// Partially update an extra header (PATCH).
    pub async fn update_header(
        &self,
        header_id: &str,
        data: &serde_json::Value,
    ) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::webhooks::UPDATE_HEADER,
            &[("webhook_header_id", header_id)],
        )?;
        self.client.patch_json(&url, data).await
    }

    /// Delete an extra header.
    pub async fn delete_header(&self, header_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::webhooks::DELETE_HEADER,
            &[("webhook_header_id", header_id)],
        )?;
        self.client.delete(&url).await
    }

    // ----------
    // Events and deliveries (read-only)
    // ----------

    /// List webhook events.
    pub async fn list_events(&self, extra: &[(String, String)]) -> Result<NormalizedResponse> {
        let url = build_url(&self.client.base_url, endpoints::webhooks::LIST_EVENTS, &[])?;
        self.client.get(&url, &list_params(None, None, extra)).await
    }

    /// Retrieve a single webhook event.
    pub async fn retrieve_event(&self, event_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::webhooks::RETRIEVE_EVENT,
            &[("webhook_event_id", event_id)],
        )?;
        self.client.get(&url, &[]).await
    }

    /// List webhook deliveries.
    pub async fn list_deliveries(&self, extra: &[(String, String)]) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::webhooks::LIST_DELIVERIES,
            &[],
        )?;
        self.client.get(&url, &list_params(None, None, extra)).await
    }

    /// Retrieve a single webhook delivery.
    pub async fn retrieve_delivery(&self, delivery_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::webhooks::RETRIEVE_DELIVERY,
            &[("webhook_delivery_id", delivery_id)],
        )?;
        self.client.get(&url, &[]).await
    }

    // ----------
    // Secret
    // ----------

    /// Retrieve the shared secret used to verify webhook signatures.
    pub async fn retrieve_secret(&self) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::webhooks::RETRIEVE_SECRET,
            &[],
        )?;
        self.client.get(&url, &[]).await
    }

    /// Regenerate the shared secret, invalidating the previous one.
    pub async fn regenerate_secret(&self) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::webhooks::REGENERATE_SECRET,
            &[],
        )?;
        self.client.post_empty(&url).await
    }
}
