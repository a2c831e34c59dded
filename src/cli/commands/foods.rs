use std::io::Read;

use anyhow::{anyhow, Context};
use serde_json::Value;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_listing, output_listings, output_success};
use crate::cli::OutputFormat;

pub async fn featured(client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let listings = client.get_json("/featured-foods", &[]).await?;
    output_listings(&output_format, &listings)
}

pub async fn available(
    client: &ApiClient,
    search: Option<String>,
    sort: Option<String>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let mut query = Vec::new();
    if let Some(search) = search {
        query.push(("search", search));
    }
    if let Some(sort) = sort {
        query.push(("sort", sort));
    }

    let listings = client.get_json("/available", &query).await?;
    output_listings(&output_format, &listings)
}

pub async fn details(client: &ApiClient, id: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let listing = client.get_json(&format!("/details/{}", id), &[]).await?;
    output_listing(&output_format, &listing)
}

pub async fn add(client: &ApiClient, json: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let listing = parse_listing(json)?;
    let result: Value = client.post_json("/add-food", &listing).await?.json().await?;

    let id = result.get("insertedId").and_then(Value::as_str).unwrap_or("-");
    let message = format!("Listing created: {}", id);
    output_success(&output_format, &message, result)
}

pub async fn remove(client: &ApiClient, id: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let result = client.delete_json(&format!("/remove-food/{}", id)).await?;

    let deleted = result.get("deletedCount").and_then(Value::as_u64).unwrap_or(0);
    let message = if deleted > 0 {
        format!("Listing {} deleted", id)
    } else {
        format!("No listing {} to delete", id)
    };
    output_success(&output_format, &message, result)
}

/// Parse a listing argument; `-` reads the JSON from stdin
fn parse_listing(json: &str) -> anyhow::Result<Value> {
    let raw = if json == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer).context("failed to read stdin")?;
        buffer
    } else {
        json.to_string()
    };

    let value: Value = serde_json::from_str(&raw).context("listing is not valid JSON")?;
    if !value.is_object() {
        return Err(anyhow!("listing must be a JSON object"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_must_be_an_object() {
        assert!(parse_listing(r#"{"food_name":"Rice"}"#).is_ok());
        assert!(parse_listing("[1,2]").is_err());
        assert!(parse_listing("not json").is_err());
    }
}
