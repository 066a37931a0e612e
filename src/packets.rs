//! Packet operations.
//!
//! Packets are per-signer records inside a launched bundle. The API exposes
//! partial update, reminders, certificate-of-evidence retrieval, and
//! embedded-signing URLs. Access via `client.packets()`.

use crate::client::Client;
use crate::endpoints::{self, build_url};
use crate::error::Result;
use crate::response::NormalizedResponse;

/// Client for packet operations.
pub struct PacketsClient {
    client: Client,
}

impl PacketsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Update a packet.
    ///
    /// Always a partial update (PATCH); the API supports no full replace
    /// for this endpoint.
    pub async fn update(
        &self,
        packet_id: &str,
        data: &serde_json::Value,
    ) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::packets::UPDATE,
            &[("packet_id", packet_id)],
        )?;
        self.client.patch_json(&url, data).await
    }

    /// Send a reminder to this packet's signer.
    pub async fn remind(&self, packet_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::packets::REMIND,
            &[("packet_id", packet_id)],
        )?;
        self.client.put_empty(&url).await
    }

    /// Retrieve the certificate of evidence for a completed packet.
    pub async fn retrieve_coe(&self, packet_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::packets::RETRIEVE_COE,
            &[("packet_id", packet_id)],
        )?;
        self.client.get(&url, &[]).await
    }

    /// Create an embedded signing URL.
    ///
    /// The packet's `deliver_via` must be set to embed for this request to
    /// succeed.
    pub async fn embed_url(&self, packet_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::packets::EMBED_URL,
            &[("packet_id", packet_id)],
        )?;
        self.client.post_empty(&url).await
    }
}
