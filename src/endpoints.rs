//! Endpoint path templates and URL construction.
//!
//! Paths contain `${name}` placeholders that are substituted by
//! [`build_url`]. Each resource gets its own constant module so call sites
//! read as `endpoints::bundles::RETRIEVE`.

use crate::error::{BlueinkError, Result};

pub mod bundles {
    pub const CREATE: &str = "/bundles/";
    pub const LIST: &str = "/bundles/";
    pub const RETRIEVE: &str = "/bundles/${bundle_id}/";
    pub const CANCEL: &str = "/bundles/${bundle_id}/cancel/";
    pub const LIST_EVENTS: &str = "/bundles/${bundle_id}/events/";
    pub const LIST_FILES: &str = "/bundles/${bundle_id}/files/";
    pub const LIST_DATA: &str = "/bundles/${bundle_id}/data/";
}

pub mod persons {
    pub const CREATE: &str = "/persons/";
    pub const LIST: &str = "/persons/";
    pub const RETRIEVE: &str = "/persons/${person_id}/";
    pub const UPDATE: &str = "/persons/${person_id}/";
    pub const DELETE: &str = "/persons/${person_id}/";
}

pub mod packets {
    pub const EMBED_URL: &str = "/packets/${packet_id}/embed_url/";
    pub const UPDATE: &str = "/packets/${packet_id}/";
    pub const REMIND: &str = "/packets/${packet_id}/remind/";
    pub const RETRIEVE_COE: &str = "/packets/${packet_id}/coe/";
}

pub mod templates {
    pub const LIST: &str = "/templates/";
    pub const RETRIEVE: &str = "/templates/${template_id}/";
}

pub mod envelope_templates {
    pub const LIST: &str = "/envelope_templates/";
    pub const RETRIEVE: &str = "/envelope_templates/${envelope_template_id}/";
}

pub mod webhooks {
    pub const CREATE: &str = "/webhooks/";
    pub const LIST: &str = "/webhooks/";
    pub const RETRIEVE: &str = "/webhooks/${webhook_id}/";
    pub const UPDATE: &str = "/webhooks/${webhook_id}/";
    pub const DELETE: &str = "/webhooks/${webhook_id}/";

    pub const CREATE_HEADER: &str = "/webhook_extra_header/";
    pub const LIST_HEADERS: &str = "/webhook_extra_header/";
    pub const RETRIEVE_HEADER: &str = "/webhook_extra_header/${webhook_header_id}/";
    pub const UPDATE_HEADER: &str = "/webhook_extra_header/${webhook_header_id}/";
    pub const DELETE_HEADER: &str = "/webhook_extra_header/${webhook_header_id}/";

    pub const LIST_EVENTS: &str = "/webhook_events/";
    pub const RETRIEVE_EVENT: &str = "/webhook_events/${webhook_event_id}/";

    pub const LIST_DELIVERIES: &str = "/webhook_deliveries/";
    pub const RETRIEVE_DELIVERY: &str = "/webhook_deliveries/${webhook_delivery_id}/";

    pub const RETRIEVE_SECRET: &str = "/webhook_secret/";
    pub const REGENERATE_SECRET: &str = "/webhook_secret/regenerate/";
}

/// Build a concrete URL from a base URL, an endpoint template, and
/// substitution pairs.
///
/// Every `${name}` placeholder in the template must have a matching
/// `(name, value)` pair; a placeholder with no pair is
/// [`BlueinkError::MissingSubstitution`]. Current endpoints take at most one
/// placeholder, so call sites pass zero or one pair.
pub fn build_url(base_url: &str, endpoint: &str, substitutions: &[(&str, &str)]) -> Result<String> {
    let mut path = endpoint.to_string();

    for (name, value) in substitutions {
        path = path.replace(&format!("${{{name}}}"), value);
    }

    if let Some(start) = path.find("${") {
        let rest = &path[start + 2..];
        let placeholder = rest.split('}').next().unwrap_or(rest).to_string();
        return Err(BlueinkError::MissingSubstitution {
            placeholder,
            endpoint: endpoint.to_string(),
        });
    }

    Ok(format!("{base_url}{path}"))
}
