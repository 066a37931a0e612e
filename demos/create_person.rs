//! Create a person (stored signer) with email and phone contact channels.

use blueink::{Client, PersonBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::from_env()?;

    let mut builder = PersonBuilder::new("Isaac Kleiner");
    builder
        .add_email("kleiner@blackmesa.gov")
        .add_phone("505 555 5557")
        .metadata(serde_json::json!({ "department": "anomalous materials" }));

    let response = client.persons().create_from_builder(&builder).await?;
    println!("created person: {}", response.data["id"]);
    Ok(())
}
