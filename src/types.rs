//! Wire types for the Blueink SDK.
//!
//! These structs serialize to the JSON shapes the Blueink API expects.
//! Serialization is sparse: attributes the caller never set are omitted
//! entirely, while explicitly set values (including empty strings) are kept.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BlueinkError;

/// Kind of an interactive field placed on a document page.
///
/// Serialized as the fixed short wire codes the API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "att")]
    Attachment,
    #[serde(rename = "cbx")]
    CheckboxGroup,
    #[serde(rename = "chk")]
    Checkbox,
    #[serde(rename = "dat")]
    Date,
    #[serde(rename = "ini")]
    Initials,
    #[serde(rename = "inp")]
    Input,
    #[serde(rename = "sdt")]
    SigningDate,
    #[serde(rename = "sel")]
    Select,
    #[serde(rename = "sig")]
    Signature,
    #[serde(rename = "snm")]
    SignerName,
    #[serde(rename = "txt")]
    Text,
}

impl FieldKind {
    /// All wire codes accepted by the API.
    pub const ALLOWED: [&'static str; 11] = [
        "att", "cbx", "chk", "dat", "ini", "inp", "sdt", "sel", "sig", "snm", "txt",
    ];

    /// The short wire code for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Attachment => "att",
            FieldKind::CheckboxGroup => "cbx",
            FieldKind::Checkbox => "chk",
            FieldKind::Date => "dat",
            FieldKind::Initials => "ini",
            FieldKind::Input => "inp",
            FieldKind::SigningDate => "sdt",
            FieldKind::Select => "sel",
            FieldKind::Signature => "sig",
            FieldKind::SignerName => "snm",
            FieldKind::Text => "txt",
        }
    }
}

impl FromStr for FieldKind {
    type Err = BlueinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "att" => Ok(FieldKind::Attachment),
            "cbx" => Ok(FieldKind::CheckboxGroup),
            "chk" => Ok(FieldKind::Checkbox),
            "dat" => Ok(FieldKind::Date),
            "ini" => Ok(FieldKind::Initials),
            "inp" => Ok(FieldKind::Input),
            "sdt" => Ok(FieldKind::SigningDate),
            "sel" => Ok(FieldKind::Select),
            "sig" => Ok(FieldKind::Signature),
            "snm" => Ok(FieldKind::SignerName),
            "txt" => Ok(FieldKind::Text),
            other => Err(BlueinkError::Validation(format!(
                "field kind '{other}' is invalid; kind must be one of {:?}",
                FieldKind::ALLOWED
            ))),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a signer receives their signature request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliverVia {
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "embed")]
    Embed,
    /// SMS delivery; the wire code is "phone".
    #[serde(rename = "phone")]
    Sms,
}

/// Lifecycle status of a bundle, as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BundleStatus {
    #[serde(rename = "ne")]
    New,
    #[serde(rename = "dr")]
    Draft,
    #[serde(rename = "pe")]
    Pending,
    #[serde(rename = "se")]
    Sent,
    #[serde(rename = "st")]
    Started,
    #[serde(rename = "ca")]
    Cancelled,
    #[serde(rename = "ex")]
    Expired,
    #[serde(rename = "co")]
    Complete,
    #[serde(rename = "fa")]
    Failed,
}

/// Webhook event types a subscription may cover.
pub mod event_types {
    pub const BUNDLE_LAUNCHED: &str = "bundle_launched";
    pub const BUNDLE_COMPLETE: &str = "bundle_complete";
    pub const BUNDLE_DOCS_READY: &str = "bundle_docs_ready";
    pub const BUNDLE_ERROR: &str = "bundle_error";
    pub const BUNDLE_CANCELLED: &str = "bundle_cancelled";
    pub const PACKET_VIEWED: &str = "packet_viewed";
    pub const PACKET_COMPLETE: &str = "packet_complete";

    /// All subscribable event types.
    pub const ALL: [&str; 7] = [
        BUNDLE_LAUNCHED,
        BUNDLE_COMPLETE,
        BUNDLE_DOCS_READY,
        BUNDLE_ERROR,
        BUNDLE_CANCELLED,
        PACKET_VIEWED,
        PACKET_COMPLETE,
    ];
}

/// An interactive element placed at a page coordinate within a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub kind: FieldKind,
    pub key: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub page: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Validation pattern name (e.g. "email", "numbers").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_max: Option<i32>,
    /// Signer (packet) keys allowed to edit this field.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub editors: Vec<String>,
}

/// Assignment of a signer to a role defined by a remote template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRefAssignment {
    pub role: String,
    pub signer: String,
}

/// Initial value for a field defined by a remote template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateRefFieldValue {
    pub key: String,
    pub initial_value: String,
}

/// One file (or template reference) within a bundle.
///
/// Exactly one of `file_url`, `file_index`, or `template_id` is set;
/// `assignments` and `field_values` are only meaningful when `template_id`
/// is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    /// Index into the multipart file parts uploaded alongside the bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_index: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fields: Vec<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub assignments: Vec<TemplateRefAssignment>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub field_values: Vec<TemplateRefFieldValue>,
}

impl Document {
    /// Returns true if this document points at a remote template.
    pub fn is_template_ref(&self) -> bool {
        self.template_id.is_some()
    }
}

/// A signer (recipient) record within a bundle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Packet {
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deliver_via: Option<DeliverVia>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    pub auth_sms: bool,
    pub auth_selfie: bool,
    pub auth_id: bool,
    /// Position in the signing order; required when the bundle is ordered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// The top-level signature-request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub in_order: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub cc_emails: Vec<String>,
    pub is_test: bool,
    pub packets: Vec<Packet>,
    pub documents: Vec<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

/// A contact channel attached to a person record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactChannel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// "em" for email, "mp" for mobile phone.
    pub kind: String,
}

/// A person (stored signer) record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub channels: Vec<ContactChannel>,
}

/// An extra HTTP header sent with webhook deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookExtraHeader {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<String>,
    pub name: String,
    pub value: String,
    pub order: u32,
}

/// A webhook subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub url: String,
    pub enabled: bool,
    /// Whether deliveries carry a JSON body.
    #[serde(rename = "json")]
    pub json_payload: bool,
    pub event_types: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub extra_headers: Vec<WebhookExtraHeader>,
}
