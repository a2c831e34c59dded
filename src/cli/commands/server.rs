use serde_json::json;

use crate::cli::client::ApiClient;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub async fn health(client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let message = client.get_text("/").await?;
    output_success(
        &output_format,
        &message,
        json!({ "server": client.url("/")?.as_str(), "status": "up", "message": message }),
    )
}
