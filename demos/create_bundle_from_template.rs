//! Create a bundle from a pre-existing template, assigning a signer to a
//! role and pre-filling a field value.

use blueink::{BundleBuilder, Client};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::from_env()?;

    let template_id = std::env::args()
        .nth(1)
        .expect("usage: create_bundle_from_template <template_id>");

    let mut builder = BundleBuilder::new();
    builder.label("Offer letter from template").is_test(true);

    let tpl = builder.add_document_template(&template_id)?;
    let signer = builder.add_signer("Barney Calhoun", Some("barney@blackmesa.gov"), None)?;

    builder.assign_role(&tpl, &signer, "employee")?;
    builder.set_value(&tpl, "start_date", "2026-09-01")?;

    let response = client.bundles().create_from_builder(&builder).await?;
    println!("created bundle: {}", response.data["id"]);
    Ok(())
}
