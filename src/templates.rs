//! Template and envelope-template operations.
//!
//! Both resources are read-only: list and retrieve. Access via
//! `client.templates()` and `client.envelope_templates()`.

use crate::client::{list_params, Client};
use crate::endpoints::{self, build_url};
use crate::error::Result;
use crate::paginator::{PageFuture, PaginatedIterator};
use crate::response::NormalizedResponse;

/// Client for template operations.
pub struct TemplatesClient {
    client: Client,
}

impl TemplatesClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List templates.
    pub async fn list(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
        extra: &[(String, String)],
    ) -> Result<NormalizedResponse> {
        let url = build_url(&self.client.base_url, endpoints::templates::LIST, &[])?;
        self.client
            .get(&url, &list_params(page, per_page, extra))
            .await
    }

    /// Lazily iterate over pages of templates, starting at `page`
    /// (1-indexed).
    pub fn paged_list(
        &self,
        page: u32,
        per_page: u32,
    ) -> PaginatedIterator<impl FnMut(u32, u32) -> PageFuture + use<>> {
        let client = self.client.clone();
        PaginatedIterator::new(
            move |page: u32, per_page: u32| -> PageFuture {
                let client = client.clone();
                Box::pin(async move {
                    TemplatesClient::new(client)
                        .list(Some(page), Some(per_page), &[])
                        .await
                })
            },
            page,
            per_page,
        )
    }

    /// Retrieve a single template.
    pub async fn retrieve(&self, template_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::templates::RETRIEVE,
            &[("template_id", template_id)],
        )?;
        self.client.get(&url, &[]).await
    }
}

/// Client for envelope-template operations.
pub struct EnvelopeTemplatesClient {
    client: Client,
}

impl EnvelopeTemplatesClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List envelope templates.
    pub async fn list(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
        extra: &[(String, String)],
    ) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::envelope_templates::LIST,
            &[],
        )?;
        self.client
            .get(&url, &list_params(page, per_page, extra))
            .await
    }

    /// Lazily iterate over pages of envelope templates.
    pub fn paged_list(
        &self,
        page: u32,
        per_page: u32,
    ) -> PaginatedIterator<impl FnMut(u32, u32) -> PageFuture + use<>> {
        let client = self.client.clone();
        PaginatedIterator::new(
            move |page: u32, per_page: u32| -> PageFuture {
                let client = client.clone();
                Box::pin(async move {
                    EnvelopeTemplatesClient::new(client)
                        .list(Some(page), Some(per_page), &[])
                        .await
                })
            },
            page,
            per_page,
        )
    }

    /// Retrieve a single envelope template.
    pub async fn retrieve(&self, envelope_template_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::envelope_templates::RETRIEVE,
            &[("envelope_template_id", envelope_template_id)],
        )?;
        self.client.get(&url, &[]).await
    }
}
