//! Page through all bundles and print their labels and statuses.

use blueink::Client;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::from_env()?;

    let mut pages = client.bundles().paged_list(1, 50);
    while let Some(page) = pages.next().await {
        let page = page?;
        if let Some(pagination) = page.pagination {
            println!("-- page {} of {}", pagination.page_number, pagination.total_pages);
        }
        if let Some(bundles) = page.data.as_array() {
            for bundle in bundles {
                println!("{}  {}  {}", bundle["id"], bundle["status"], bundle["label"]);
            }
        }
    }
    Ok(())
}
