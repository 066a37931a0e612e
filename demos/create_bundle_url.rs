//! Create a bundle from a document URL with two signers.
//!
//! Run with:
//! ```sh
//! BLUEINK_PRIVATE_API_KEY=your_key cargo run --example create_bundle_url
//! ```

use blueink::{BundleBuilder, Client, FieldKind, SignerOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::from_env()?;

    let mut builder = BundleBuilder::new();
    builder
        .label("W-4 onboarding")
        .email_subject("Please sign your W-4")
        .email_message("Both signatures are required.")
        .in_order(true)
        .is_test(true);

    let doc = builder.add_document_by_url("https://www.irs.gov/pub/irs-pdf/fw4.pdf")?;

    let employee = builder.add_signer_with_options(
        "Eli Vance",
        Some("eli@blackmesa.gov"),
        None,
        SignerOptions {
            order: Some(0),
            ..Default::default()
        },
    )?;
    let manager = builder.add_signer_with_options(
        "Gordon Freeman",
        Some("gordon@blackmesa.gov"),
        None,
        SignerOptions {
            order: Some(1),
            ..Default::default()
        },
    )?;

    builder.add_field(&doc, 15, 60, 30, 12, 1, FieldKind::Signature, &[&employee])?;
    builder.add_field(&doc, 15, 75, 30, 12, 1, FieldKind::Signature, &[&manager])?;
    builder.add_field(&doc, 50, 60, 20, 8, 1, FieldKind::SigningDate, &[&employee])?;

    let response = client.bundles().create_from_builder(&builder).await?;
    println!("created bundle: {}", response.data["id"]);
    Ok(())
}
