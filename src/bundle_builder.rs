//! Incremental construction of bundle payloads.
//!
//! [`BundleBuilder`] accumulates documents, signers (packets), and fields,
//! enforcing referential integrity as entities are added: a field must name
//! an existing document, its editors must name existing signers, and role
//! assignments are only valid against template-reference documents. The
//! immutable [`Bundle`] is produced by [`BundleBuilder::build`], which also
//! checks the structural invariants (non-empty packets/documents, contiguous
//! signing order when ordered delivery is requested).
//!
//! Every `add_*` call either fully succeeds and returns the entity's key, or
//! fails and leaves the builder untouched.

use base64::Engine;
use std::path::Path;

use crate::error::{BlueinkError, Result};
use crate::types::{
    Bundle, DeliverVia, Document, Field, FieldKind, Packet, TemplateRefAssignment,
    TemplateRefFieldValue,
};

/// One file to be uploaded alongside the bundle as a multipart part.
///
/// The part's index in the builder's file list matches the `file_index`
/// recorded on the corresponding document.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// Optional attributes for [`BundleBuilder::add_signer_with_options`].
#[derive(Debug, Clone, Default)]
pub struct SignerOptions {
    pub deliver_via: Option<DeliverVia>,
    pub person_id: Option<String>,
    pub auth_sms: bool,
    pub auth_selfie: bool,
    pub auth_id: bool,
    /// Position in the signing order; required when the bundle is ordered.
    pub order: Option<u32>,
    /// Caller-supplied key; generated when absent.
    pub key: Option<String>,
}

/// Optional attributes for [`BundleBuilder::add_field_with_options`].
#[derive(Debug, Clone, Default)]
pub struct FieldOptions {
    pub label: Option<String>,
    pub v_pattern: Option<String>,
    pub v_min: Option<i32>,
    pub v_max: Option<i32>,
    /// Caller-supplied key; generated when absent.
    pub key: Option<String>,
}

/// Builder for [`Bundle`] payloads.
///
/// Documents, packets, and fields keep their insertion order in the
/// serialized output. Not thread-safe; build one bundle per builder.
#[derive(Debug, Default)]
pub struct BundleBuilder {
    label: Option<String>,
    in_order: bool,
    email_subject: Option<String>,
    email_message: Option<String>,
    is_test: bool,
    cc_emails: Vec<String>,
    custom_key: Option<String>,
    team: Option<String>,

    documents: Vec<Document>,
    packets: Vec<Packet>,
    files: Vec<FilePart>,

    doc_counter: u32,
    signer_counter: u32,
    field_counter: u32,
}

impl BundleBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bundle label.
    pub fn label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }

    /// Require signers to sign in their packet order.
    pub fn in_order(&mut self, in_order: bool) -> &mut Self {
        self.in_order = in_order;
        self
    }

    /// Set the subject of the request email.
    pub fn email_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.email_subject = Some(subject.into());
        self
    }

    /// Set the body of the request email.
    pub fn email_message(&mut self, message: impl Into<String>) -> &mut Self {
        self.email_message = Some(message.into());
        self
    }

    /// Mark the bundle as a test bundle.
    pub fn is_test(&mut self, is_test: bool) -> &mut Self {
        self.is_test = is_test;
        self
    }

    /// Set a caller-defined identifier on the bundle.
    pub fn custom_key(&mut self, custom_key: impl Into<String>) -> &mut Self {
        self.custom_key = Some(custom_key.into());
        self
    }

    /// Set the team the bundle belongs to.
    pub fn team(&mut self, team: impl Into<String>) -> &mut Self {
        self.team = Some(team.into());
        self
    }

    /// Add an email address to be cc'd on bundle notifications.
    pub fn add_cc(&mut self, email: impl Into<String>) -> &mut Self {
        self.cc_emails.push(email.into());
        self
    }

    /// File parts collected for upload, in `file_index` order.
    pub fn file_parts(&self) -> &[FilePart] {
        &self.files
    }

    fn document_index(&self, key: &str) -> Option<usize> {
        self.documents.iter().position(|d| d.key == key)
    }

    fn has_signer(&self, key: &str) -> bool {
        self.packets.iter().any(|p| p.key == key)
    }

    fn register_document(&mut self, document: Document) -> Result<String> {
        if self.document_index(&document.key).is_some() {
            return Err(BlueinkError::DuplicateKey(document.key));
        }
        let key = document.key.clone();
        self.documents.push(document);
        Ok(key)
    }

    fn next_doc_key(&mut self) -> String {
        self.doc_counter += 1;
        format!("doc-{}", self.doc_counter)
    }

    /// Add a document the server fetches from a URL. Returns the document
    /// key for later cross-referencing.
    pub fn add_document_by_url(&mut self, url: impl Into<String>) -> Result<String> {
        let key = self.next_doc_key();
        self.add_document_by_url_with_key(key, url)
    }

    /// [`add_document_by_url`](Self::add_document_by_url) with a
    /// caller-supplied key.
    pub fn add_document_by_url_with_key(
        &mut self,
        key: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<String> {
        self.register_document(Document {
            key: key.into(),
            file_url: Some(url.into()),
            file_index: None,
            fields: vec![],
            template_id: None,
            assignments: vec![],
            field_values: vec![],
        })
    }

    /// Add a document from in-memory bytes; the content is attached to the
    /// bundle POST as a multipart file part.
    pub fn add_document_by_bytes(
        &mut self,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        content: Vec<u8>,
    ) -> Result<String> {
        let key = self.next_doc_key();
        let file_index = self.files.len();
        let document = Document {
            key,
            file_url: None,
            file_index: Some(file_index),
            fields: vec![],
            template_id: None,
            assignments: vec![],
            field_values: vec![],
        };
        let key = self.register_document(document)?;
        self.files.push(FilePart {
            filename: filename.into(),
            content_type: content_type.into(),
            content,
        });
        Ok(key)
    }

    /// Add a document by reading a file from disk. The file is read eagerly
    /// so no handle outlives this call.
    pub fn add_document_by_path(
        &mut self,
        path: impl AsRef<Path>,
        content_type: impl Into<String>,
    ) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        self.add_document_by_bytes(filename, content_type, content)
    }

    /// Add a document from base64-encoded content. The content is decoded
    /// up front so malformed input fails here rather than at upload time.
    pub fn add_document_by_b64(
        &mut self,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        b64: &str,
    ) -> Result<String> {
        let content = base64::engine::general_purpose::STANDARD.decode(b64)?;
        self.add_document_by_bytes(filename, content_type, content)
    }

    /// Add a document that references a pre-existing remote template.
    /// Only template-reference documents accept
    /// [`assign_role`](Self::assign_role) and [`set_value`](Self::set_value).
    pub fn add_document_template(&mut self, template_id: impl Into<String>) -> Result<String> {
        let key = self.next_doc_key();
        self.add_document_template_with_key(key, template_id)
    }

    /// [`add_document_template`](Self::add_document_template) with a
    /// caller-supplied key.
    pub fn add_document_template_with_key(
        &mut self,
        key: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Result<String> {
        self.register_document(Document {
            key: key.into(),
            file_url: None,
            file_index: None,
            fields: vec![],
            template_id: Some(template_id.into()),
            assignments: vec![],
            field_values: vec![],
        })
    }

    /// Add a field to a document. `editors` are signer keys returned by
    /// [`add_signer`](Self::add_signer); they are validated eagerly.
    #[allow(clippy::too_many_arguments)]
    pub fn add_field(
        &mut self,
        document_key: &str,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        page: i32,
        kind: FieldKind,
        editors: &[&str],
    ) -> Result<String> {
        self.add_field_with_options(
            document_key,
            x,
            y,
            w,
            h,
            page,
            kind,
            editors,
            FieldOptions::default(),
        )
    }

    /// [`add_field`](Self::add_field) with optional label, validation
    /// pattern/bounds, and caller-supplied key.
    ///
    /// Nothing is appended unless every check passes: the document must
    /// exist, every editor must be a registered signer, and the key must be
    /// unique within the document.
    #[allow(clippy::too_many_arguments)]
    pub fn add_field_with_options(
        &mut self,
        document_key: &str,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        page: i32,
        kind: FieldKind,
        editors: &[&str],
        options: FieldOptions,
    ) -> Result<String> {
        let doc_index = self
            .document_index(document_key)
            .ok_or_else(|| BlueinkError::UnknownDocument(document_key.to_string()))?;

        for editor in editors {
            if !self.has_signer(editor) {
                return Err(BlueinkError::UnknownSigner(editor.to_string()));
            }
        }

        let key = match options.key {
            Some(key) => key,
            None => {
                self.field_counter += 1;
                format!("field-{}", self.field_counter)
            }
        };
        if self.documents[doc_index].fields.iter().any(|f| f.key == key) {
            return Err(BlueinkError::DuplicateKey(key));
        }

        let field = Field {
            kind,
            key: key.clone(),
            x,
            y,
            w,
            h,
            page,
            label: options.label,
            v_pattern: options.v_pattern,
            v_min: options.v_min,
            v_max: options.v_max,
            editors: editors.iter().map(|e| e.to_string()).collect(),
        };
        self.documents[doc_index].fields.push(field);
        Ok(key)
    }

    /// Add a signer. At least one of `email` or `phone` is required;
    /// on failure no key is registered.
    pub fn add_signer(
        &mut self,
        name: impl Into<String>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<String> {
        self.add_signer_with_options(name, email, phone, SignerOptions::default())
    }

    /// [`add_signer`](Self::add_signer) with delivery, authentication, and
    /// ordering options.
    pub fn add_signer_with_options(
        &mut self,
        name: impl Into<String>,
        email: Option<&str>,
        phone: Option<&str>,
        options: SignerOptions,
    ) -> Result<String> {
        if email.is_none() && phone.is_none() {
            return Err(BlueinkError::Validation(
                "a signer must have either an email or a phone number".to_string(),
            ));
        }

        let key = match options.key {
            Some(key) => key,
            None => {
                self.signer_counter += 1;
                format!("signer-{}", self.signer_counter)
            }
        };
        if self.has_signer(&key) {
            return Err(BlueinkError::DuplicateKey(key));
        }

        self.packets.push(Packet {
            key: key.clone(),
            name: name.into(),
            email: email.map(str::to_string),
            phone: phone.map(str::to_string),
            deliver_via: options.deliver_via,
            person_id: options.person_id,
            auth_sms: options.auth_sms,
            auth_selfie: options.auth_selfie,
            auth_id: options.auth_id,
            order: options.order,
        });
        Ok(key)
    }

    /// Assign a signer to a role defined by a template-reference document.
    pub fn assign_role(
        &mut self,
        document_key: &str,
        signer_key: &str,
        role: impl Into<String>,
    ) -> Result<()> {
        let doc_index = self.template_ref_index(document_key)?;
        if !self.has_signer(signer_key) {
            return Err(BlueinkError::UnknownSigner(signer_key.to_string()));
        }

        self.documents[doc_index]
            .assignments
            .push(TemplateRefAssignment {
                role: role.into(),
                signer: signer_key.to_string(),
            });
        Ok(())
    }

    /// Set an initial value for a field defined by a template-reference
    /// document. Field keys belong to the remote template, so they are not
    /// validated locally.
    pub fn set_value(
        &mut self,
        document_key: &str,
        field_key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<()> {
        let doc_index = self.template_ref_index(document_key)?;

        self.documents[doc_index]
            .field_values
            .push(TemplateRefFieldValue {
                key: field_key.into(),
                initial_value: value.into(),
            });
        Ok(())
    }

    fn template_ref_index(&self, document_key: &str) -> Result<usize> {
        let doc_index = self
            .document_index(document_key)
            .ok_or_else(|| BlueinkError::UnknownDocument(document_key.to_string()))?;
        if !self.documents[doc_index].is_template_ref() {
            return Err(BlueinkError::NotATemplate(document_key.to_string()));
        }
        Ok(doc_index)
    }

    /// Compile the immutable bundle, validating structural invariants.
    pub fn build(&self) -> Result<Bundle> {
        if self.packets.is_empty() {
            return Err(BlueinkError::Validation(
                "a bundle requires at least one signer".to_string(),
            ));
        }
        if self.documents.is_empty() {
            return Err(BlueinkError::Validation(
                "a bundle requires at least one document".to_string(),
            ));
        }

        if self.in_order {
            self.check_packet_ordering()?;
        }

        Ok(Bundle {
            label: self.label.clone(),
            in_order: self.in_order,
            email_subject: self.email_subject.clone(),
            email_message: self.email_message.clone(),
            cc_emails: self.cc_emails.clone(),
            is_test: self.is_test,
            packets: self.packets.clone(),
            documents: self.documents.clone(),
            custom_key: self.custom_key.clone(),
            team: self.team.clone(),
        })
    }

    /// Ordered delivery requires every packet to carry a distinct order
    /// index and the indices to cover exactly 0..n-1.
    fn check_packet_ordering(&self) -> Result<()> {
        let mut indices = Vec::with_capacity(self.packets.len());
        for packet in &self.packets {
            let order = packet.order.ok_or_else(|| {
                BlueinkError::Validation(format!(
                    "bundle is ordered but signer '{}' has no order index",
                    packet.name
                ))
            })?;
            if indices.contains(&order) {
                return Err(BlueinkError::Validation(format!(
                    "two or more signers share order index {order}"
                )));
            }
            indices.push(order);
        }

        for expected in 0..self.packets.len() as u32 {
            if !indices.contains(&expected) {
                return Err(BlueinkError::Validation(format!(
                    "malformed signing order: index {expected} is missing \
                     (indices must cover 0..{})",
                    self.packets.len() - 1
                )));
            }
        }
        Ok(())
    }

    /// Compile the bundle and serialize it to a JSON string.
    pub fn as_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.build()?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder_with_one_of_each() -> (BundleBuilder, String, String) {
        let mut builder = BundleBuilder::new();
        builder.label("T1");
        let doc = builder
            .add_document_by_url("https://x/doc.pdf")
            .unwrap();
        let signer = builder.add_signer("A", Some("a@x.com"), None).unwrap();
        (builder, doc, signer)
    }

    #[test]
    fn test_generated_keys() {
        let (_, doc, signer) = builder_with_one_of_each();
        assert_eq!(doc, "doc-1");
        assert_eq!(signer, "signer-1");
    }

    #[test]
    fn test_minimal_bundle_round_trip() {
        let (mut builder, doc, signer) = builder_with_one_of_each();
        let field = builder
            .add_field(&doc, 15, 20, 30, 12, 1, FieldKind::Signature, &[&signer])
            .unwrap();

        let bundle = builder.build().unwrap();
        let json = serde_json::to_value(&bundle).unwrap();

        assert_eq!(json["label"], "T1");
        assert_eq!(json["documents"].as_array().unwrap().len(), 1);
        assert_eq!(json["packets"].as_array().unwrap().len(), 1);
        let fields = json["documents"][0]["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0]["key"], field);
        assert_eq!(
            fields[0]["editors"],
            serde_json::json!([signer.as_str()])
        );
    }

    #[test]
    fn test_duplicate_document_key_rejected() {
        let mut builder = BundleBuilder::new();
        builder
            .add_document_by_url_with_key("doc-a", "https://x/1.pdf")
            .unwrap();
        let err = builder
            .add_document_by_url_with_key("doc-a", "https://x/2.pdf")
            .unwrap_err();
        assert!(matches!(err, BlueinkError::DuplicateKey(k) if k == "doc-a"));
    }

    #[test]
    fn test_add_field_unknown_document_no_partial_mutation() {
        let (mut builder, _, signer) = builder_with_one_of_each();
        let err = builder
            .add_field("nope", 1, 1, 1, 1, 1, FieldKind::Input, &[&signer])
            .unwrap_err();
        assert!(matches!(err, BlueinkError::UnknownDocument(_)));

        let bundle = builder.build().unwrap();
        assert!(bundle.documents[0].fields.is_empty());
    }

    #[test]
    fn test_add_field_unknown_editor_rejected_eagerly() {
        let (mut builder, doc, _) = builder_with_one_of_each();
        let err = builder
            .add_field(&doc, 1, 1, 1, 1, 1, FieldKind::Signature, &["ghost"])
            .unwrap_err();
        assert!(matches!(err, BlueinkError::UnknownSigner(k) if k == "ghost"));

        let bundle = builder.build().unwrap();
        assert!(bundle.documents[0].fields.is_empty());
    }

    #[test]
    fn test_add_signer_without_contact_is_noop() {
        let mut builder = BundleBuilder::new();
        let err = builder.add_signer("Nobody", None, None).unwrap_err();
        assert!(matches!(err, BlueinkError::Validation(_)));

        // The failed call must not consume a key.
        let key = builder.add_signer("A", Some("a@x.com"), None).unwrap();
        assert_eq!(key, "signer-1");
    }

    #[test]
    fn test_build_requires_documents_and_signers() {
        let builder = BundleBuilder::new();
        assert!(builder.build().is_err());

        let mut builder = BundleBuilder::new();
        builder.add_document_by_url("https://x/doc.pdf").unwrap();
        let err = builder.build().unwrap_err();
        assert!(matches!(err, BlueinkError::Validation(_)));
    }

    fn ordered_builder(orders: &[Option<u32>]) -> BundleBuilder {
        let mut builder = BundleBuilder::new();
        builder.in_order(true);
        builder.add_document_by_url("https://x/doc.pdf").unwrap();
        for (i, order) in orders.iter().enumerate() {
            builder
                .add_signer_with_options(
                    format!("Signer {i}"),
                    Some("s@x.com"),
                    None,
                    SignerOptions {
                        order: *order,
                        ..Default::default()
                    },
                )
                .unwrap();
        }
        builder
    }

    #[test]
    fn test_ordering_contiguous_indices_ok() {
        let builder = ordered_builder(&[Some(0), Some(1), Some(2)]);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_ordering_duplicate_index_rejected() {
        let builder = ordered_builder(&[Some(0), Some(0)]);
        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("order index 0"));
    }

    #[test]
    fn test_ordering_gap_rejected() {
        let builder = ordered_builder(&[Some(0), Some(2)]);
        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("index 1 is missing"));
    }

    #[test]
    fn test_ordering_missing_index_rejected() {
        let builder = ordered_builder(&[Some(0), None]);
        let err = builder.build().unwrap_err();
        assert!(err.to_string().contains("no order index"));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut builder = BundleBuilder::new();
        builder.add_signer("A", Some("a@x.com"), None).unwrap();
        for i in 0..3 {
            builder
                .add_document_by_url(format!("https://x/{i}.pdf"))
                .unwrap();
        }

        let bundle = builder.build().unwrap();
        let urls: Vec<_> = bundle
            .documents
            .iter()
            .map(|d| d.file_url.clone().unwrap())
            .collect();
        assert_eq!(urls, vec!["https://x/0.pdf", "https://x/1.pdf", "https://x/2.pdf"]);
    }

    #[test]
    fn test_file_documents_get_sequential_indices() {
        let mut builder = BundleBuilder::new();
        builder
            .add_document_by_bytes("a.pdf", "application/pdf", vec![1, 2, 3])
            .unwrap();
        builder
            .add_document_by_bytes("b.pdf", "application/pdf", vec![4, 5])
            .unwrap();

        assert_eq!(builder.file_parts().len(), 2);
        assert_eq!(builder.file_parts()[1].filename, "b.pdf");

        builder.add_signer("A", Some("a@x.com"), None).unwrap();
        let bundle = builder.build().unwrap();
        assert_eq!(bundle.documents[0].file_index, Some(0));
        assert_eq!(bundle.documents[1].file_index, Some(1));
    }

    #[test]
    fn test_b64_document_decodes_content() {
        let mut builder = BundleBuilder::new();
        builder
            .add_document_by_b64("a.pdf", "application/pdf", "aGVsbG8=")
            .unwrap();
        assert_eq!(builder.file_parts()[0].content, b"hello");

        let err = builder
            .add_document_by_b64("b.pdf", "application/pdf", "not base64!!")
            .unwrap_err();
        assert!(matches!(err, BlueinkError::Decode(_)));
    }

    #[test]
    fn test_assign_role_and_set_value() {
        let mut builder = BundleBuilder::new();
        let tpl = builder.add_document_template("tpl-99").unwrap();
        let signer = builder.add_signer("A", Some("a@x.com"), None).unwrap();

        builder.assign_role(&tpl, &signer, "employer").unwrap();
        builder.set_value(&tpl, "salary", "50000").unwrap();

        let bundle = builder.build().unwrap();
        assert_eq!(bundle.documents[0].assignments[0].role, "employer");
        assert_eq!(bundle.documents[0].assignments[0].signer, signer);
        assert_eq!(bundle.documents[0].field_values[0].initial_value, "50000");
    }

    #[test]
    fn test_assign_role_rejects_non_template() {
        let (mut builder, doc, signer) = builder_with_one_of_each();
        let err = builder.assign_role(&doc, &signer, "employer").unwrap_err();
        assert!(matches!(err, BlueinkError::NotATemplate(_)));
    }

    #[test]
    fn test_assign_role_rejects_unknown_signer() {
        let mut builder = BundleBuilder::new();
        let tpl = builder.add_document_template("tpl-99").unwrap();
        let err = builder.assign_role(&tpl, "ghost", "employer").unwrap_err();
        assert!(matches!(err, BlueinkError::UnknownSigner(_)));
    }

    #[test]
    fn test_set_value_rejects_unknown_document() {
        let mut builder = BundleBuilder::new();
        let err = builder.set_value("nope", "k", "v").unwrap_err();
        assert!(matches!(err, BlueinkError::UnknownDocument(_)));
    }

    #[test]
    fn test_as_json_sparse_output() {
        let (mut builder, doc, signer) = builder_with_one_of_each();
        builder
            .add_field(&doc, 1, 2, 3, 4, 1, FieldKind::Signature, &[&signer])
            .unwrap();

        let json = builder.as_json().unwrap();
        assert!(json.contains("\"label\":\"T1\""));
        // Unset optional attributes stay out of the payload.
        assert!(!json.contains("email_subject"));
        assert!(!json.contains("custom_key"));
        assert!(!json.contains("template_id"));
    }
}
