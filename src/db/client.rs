use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::Client;

/// Connect to MongoDB and verify the server is reachable.
///
/// The driver establishes connections lazily, so a `ping` runs here to make
/// an unreachable server fail at startup instead of on the first request.
pub async fn connect(uri: &str) -> Result<Client, mongodb::error::Error> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some("inventory-api".to_string());
    options.max_pool_size = Some(10);
    options.server_selection_timeout = Some(Duration::from_secs(30));

    let client = Client::with_options(options)?;
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;

    Ok(client)
}
