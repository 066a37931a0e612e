//! Person (stored signer) operations.
//!
//! Access via `client.persons()`. [`PersonBuilder`] assembles the contact
//! `channels` shape the API expects from plain email/phone lists.

use crate::client::{list_params, Client};
use crate::endpoints::{self, build_url};
use crate::error::{BlueinkError, Result};
use crate::paginator::{PageFuture, PaginatedIterator};
use crate::response::NormalizedResponse;
use crate::types::{ContactChannel, Person};

/// Builder for [`Person`] payloads.
#[derive(Debug, Default)]
pub struct PersonBuilder {
    name: Option<String>,
    metadata: Option<serde_json::Value>,
    emails: Vec<String>,
    phones: Vec<String>,
}

impl PersonBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Replace the person's name.
    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Attach arbitrary metadata to the person record.
    pub fn metadata(&mut self, metadata: serde_json::Value) -> &mut Self {
        self.metadata = Some(metadata);
        self
    }

    /// Add an email contact channel.
    pub fn add_email(&mut self, email: impl Into<String>) -> &mut Self {
        self.emails.push(email.into());
        self
    }

    /// Add a mobile phone contact channel.
    pub fn add_phone(&mut self, phone: impl Into<String>) -> &mut Self {
        self.phones.push(phone.into());
        self
    }

    /// Replace all email channels.
    pub fn emails(&mut self, emails: Vec<String>) -> &mut Self {
        self.emails = emails;
        self
    }

    /// Replace all phone channels.
    pub fn phones(&mut self, phones: Vec<String>) -> &mut Self {
        self.phones = phones;
        self
    }

    /// Compile the person payload. A non-empty name is required.
    pub fn build(&self) -> Result<Person> {
        let name = self
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                BlueinkError::Validation("a name is required to create a person".to_string())
            })?;

        let mut channels = Vec::with_capacity(self.emails.len() + self.phones.len());
        for email in &self.emails {
            channels.push(ContactChannel {
                email: Some(email.clone()),
                phone: None,
                kind: "em".to_string(),
            });
        }
        for phone in &self.phones {
            channels.push(ContactChannel {
                email: None,
                phone: Some(phone.clone()),
                kind: "mp".to_string(),
            });
        }

        Ok(Person {
            name,
            metadata: self.metadata.clone(),
            channels,
        })
    }
}

/// Client for person operations.
pub struct PersonsClient {
    client: Client,
}

impl PersonsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a person record.
    pub async fn create(&self, person: &Person) -> Result<NormalizedResponse> {
        if person.name.is_empty() {
            return Err(BlueinkError::Validation(
                "a name is required to create a person".to_string(),
            ));
        }
        let url = build_url(&self.client.base_url, endpoints::persons::CREATE, &[])?;
        self.client.post_json(&url, person).await
    }

    /// Compile a [`PersonBuilder`] and post the result.
    pub async fn create_from_builder(&self, builder: &PersonBuilder) -> Result<NormalizedResponse> {
        self.create(&builder.build()?).await
    }

    /// List persons.
    pub async fn list(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
        extra: &[(String, String)],
    ) -> Result<NormalizedResponse> {
        let url = build_url(&self.client.base_url, endpoints::persons::LIST, &[])?;
        self.client
            .get(&url, &list_params(page, per_page, extra))
            .await
    }

    /// Lazily iterate over pages of persons, starting at `page` (1-indexed).
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
                    PersonsClient::new(client)
                        .list(Some(page), Some(per_page), &[])
                        .await
                })
            },
            page,
            per_page,
        )
    }

    /// Retrieve a single person.
    pub async fn retrieve(&self, person_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::persons::RETRIEVE,
            &[("person_id", person_id)],
        )?;
        self.client.get(&url, &[]).await
    }

    /// Replace a person record (PUT).
    pub async fn update(&self, person_id: &str, person: &Person) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::persons::UPDATE,
            &[("person_id", person_id)],
        )?;
        self.client.put_json(&url, person).await
    }

    /// Partially update a person record (PATCH). Only the supplied JSON
    /// fields change.
    pub async fn partial_update(
        &self,
        person_id: &str,
        data: &serde_json::Value,
    ) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::persons::UPDATE,
            &[("person_id", person_id)],
        )?;
        self.client.patch_json(&url, data).await
    }

    /// Delete a person record.
    pub async fn delete(&self, person_id: &str) -> Result<NormalizedResponse> {
        let url = build_url(
            &self.client.base_url,
            endpoints::persons::DELETE,
            &[("person_id", person_id)],
        )?;
        self.client.delete(&url).await
    }
}
