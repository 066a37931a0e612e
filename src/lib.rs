//! # Blueink Rust SDK
//!
//! Rust client for the Blueink eSignature API: build signature-request
//! bundles (documents, signers, fields, template references), send them,
//! and manage persons, packets, templates, and webhooks.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use blueink::{BundleBuilder, Client, FieldKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads BLUEINK_PRIVATE_API_KEY (and optionally BLUEINK_API_URL)
//!     // from the environment.
//!     let client = Client::from_env()?;
//!
//!     let mut builder = BundleBuilder::new();
//!     builder
//!         .label("Employment agreement")
//!         .email_subject("Please sign")
//!         .is_test(true);
//!
//!     let doc = builder.add_document_by_url("https://example.com/agreement.pdf")?;
//!     let signer = builder.add_signer("Eli Vance", Some("eli@blackmesa.gov"), None)?;
//!     builder.add_field(&doc, 15, 60, 30, 12, 1, FieldKind::Signature, &[&signer])?;
//!
//!     let response = client.bundles().create_from_builder(&builder).await?;
//!     println!("created bundle {}", response.data["id"]);
//!     Ok(())
//! }
//! ```
//!
//! ## Paging through list endpoints
//!
//! List endpoints report pagination in the `X-Blueink-Pagination` response
//! header; [`PaginatedIterator`] walks pages lazily:
//!
//! ```rust,no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = blueink::Client::from_env()?;
//! let mut pages = client.templates().paged_list(1, 50);
//! while let Some(page) = pages.next().await {
//!     let page = page?;
//!     println!("status {} pagination {:?}", page.status, page.pagination);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! All operations return `Result<T, BlueinkError>`. Builder validation
//! failures (duplicate keys, broken cross-references, malformed signing
//! order) surface before any network request; API errors carry the HTTP
//! status and raw body. Set `ClientConfig::raise_on_error` to `false` to
//! receive non-2xx responses as [`NormalizedResponse`] values instead.

pub mod bundle_builder;
pub mod bundles;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod packets;
pub mod paginator;
pub mod persons;
pub mod response;
pub mod templates;
pub mod types;
pub mod webhooks;

// Re-export the main types at the crate root.
pub use bundle_builder::{BundleBuilder, FieldOptions, FilePart, SignerOptions};
pub use client::{Client, ClientConfig, DEFAULT_BASE_URL, ENV_API_URL, ENV_PRIVATE_API_KEY};
pub use error::{BlueinkError, Result};
pub use paginator::PaginatedIterator;
pub use persons::PersonBuilder;
pub use response::{NormalizedResponse, Pagination, PAGINATION_HEADER};
pub use types::{
    Bundle, BundleStatus, ContactChannel, DeliverVia, Document, Field, FieldKind, Packet, Person,
    TemplateRefAssignment, TemplateRefFieldValue, Webhook, WebhookExtraHeader,
};
pub use webhooks::WebhookBuilder;
