//! Bundle operations.
//!
//! Create, list, retrieve, and cancel bundles, plus the read-only related
//! data endpoints (events, files, data). Access via `client.bundles()`.

use reqwest::multipart::{Form, Part};

use crate::bundle_builder::{BundleBuilder, FilePart};
use crate::client::{list_params, Client};
use crate::endpoints::{self, build_url};
use crate::error::Result;
use crate::paginator::{PageFuture, PaginatedIterator};
use crate::response::NormalizedResponse;
use crate::types::Bundle;

/// Client for bundle operations.
pub struct BundlesClient {
    client: Client,
}

impl BundlesClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Post a bundle.
    ///
    /// With no file parts the bundle goes up as a JSON body. With file
    /// parts the request is multipart/form-data: the bundle JSON travels in
    /// a `bundle_request` part and each file in a `files[N]` part, where `N`
    /// matches the `file_index` recorded on the corresponding document.
    pub async fn create(&self, bundle: &Bundle, files: &[FilePart]) -> Result<NormalizedResponse> {
        let url = build_url(&self.client.base_url, endpoints::bundles::CREATE, &[])?;

        if files.is_empty() {
            return self.client.post_json(&url, bundle).await;
        }

        let mut form = Form::new().text("bundle_request", serde_json::to_string(bundle)?);
        for (idx, file) in files.iter().enumerate() {
            let part = Part::bytes(file.content.clone())
                .file_name(file.filename.clone())
                .mime_str(&file.content_type)?;
            form = form.part(format!("files[{idx}]"), part);
        }

        self.client.post_multipart(&url, form).await
    }

    /// Compile a [`BundleBuilder`] and post the result, attaching any
    /// collected file parts. The recommended way to create a bundle.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use blueink::{BundleBuilder, Client, FieldKind};
    ///
    /// let client = Client::new("blueink_private_key")?;
    /// let mut builder = BundleBuilder::new();
    /// builder.label("Offer letter");
    /// let doc = builder.add_document_by_url("https://example.com/offer.pdf")?;
    /// let signer = builder.add_signer("Jane", Some("jane@example.com"), None)?;
    /// builder.add_field(&doc, 10, 20, 30, 12, 1, FieldKind::Signature, &[&signer])?;
    ///
    /// let response = client.bundles().create_from_builder(&builder).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_from_builder(&self, builder: &BundleBuilder) -> Result<NormalizedResponse> {
        let bundle = builder.build()?;
        self.create(&bundle, builder.file_parts()).await
    }

    /// List bundles. `extra` pairs are appended as query parameters
    /// (e.g. `("status", "co")`).
    pub async fn list(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
        extra: &[(String, String)],
    ) -> Result<NormalizedResponse> {
        let url = build_url(&self.client.base_url, endpoints::bundles::LIST, &[])?;
        self.client
            .get(&url, &list_params(page, per_page, extra))
            .await
    }

    /// Lazily iterate over pages of bundles, starting at `page`
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
                    BundlesClient::new(client)
                        .list(Some(page), Some(per_page), &[])
                        .await
                })
            },
            page,
            per_page,
        )
    }

    /// Retrieve a single bundle by its slug.
    pub async fn retrieve(&self, bundle_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::bundles::RETRIEVE,
            &[("bundle_id", bundle_id)],
        )?;
        self.client.get(&url, &[]).await
    }

    /// Cancel a bundle.
    pub async fn cancel(&self, bundle_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::bundles::CANCEL,
            &[("bundle_id", bundle_id)],
        )?;
        self.client.put_empty(&url).await
    }

    /// List the events recorded for a bundle.
    pub async fn list_events(&self, bundle_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::bundles::LIST_EVENTS,
            &[("bundle_id", bundle_id)],
        )?;
        self.client.get(&url, &[]).await
    }

    /// List the files attached to a bundle.
    pub async fn list_files(&self, bundle_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::bundles::LIST_FILES,
            &[("bundle_id", bundle_id)],
        )?;
        self.client.get(&url, &[]).await
    }

    /// List the field data collected for a bundle.
    pub async fn list_data(&self, bundle_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::bundles::LIST_DATA,
            &[("bundle_id", bundle_id)],
        )?;
        self.client.get(&url, &[]).await
    }
}
