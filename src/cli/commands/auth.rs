use anyhow::anyhow;
use serde_json::json;

use crate::cli::client::{cookie_value, ApiClient};
use crate::cli::OutputFormat;

pub async fn token(
    client: &ApiClient,
    email: &str,
    cookie_name: &str,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let response = client.post_json("/jwt", &json!({ "email": email })).await?;
    let token = cookie_value(response.headers(), cookie_name)
        .ok_or_else(|| anyhow!("server did not set a '{}' cookie", cookie_name))?;

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "email": email, "token": token }))?);
        }
        // Bare token so it can be captured by shell scripts
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
