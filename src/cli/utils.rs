use serde_json::Value;

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(output_format: &OutputFormat, message: &str, data: Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output a list of listings in the appropriate format
pub fn output_listings(output_format: &OutputFormat, listings: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(listings)?);
        }
        OutputFormat::Text => {
            let items = listings.as_array().map(Vec::as_slice).unwrap_or_default();
            if items.is_empty() {
                println!("No listings found");
            }
            for item in items {
                println!("{}", listing_line(item));
            }
        }
    }
    Ok(())
}

/// Output a single listing, or a notice when the server returned null
pub fn output_listing(output_format: &OutputFormat, listing: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(listing)?);
        }
        OutputFormat::Text => match listing.as_object() {
            Some(fields) => {
                for (key, value) in fields {
                    println!("{}: {}", key, display_value(value));
                }
            }
            None => println!("Listing not found"),
        },
    }
    Ok(())
}

/// One-line summary: id, name, quantity, expiry, status
pub fn listing_line(listing: &Value) -> String {
    let field = |name: &str| listing.get(name).map(display_value).unwrap_or_else(|| "-".to_string());
    format!(
        "{}  {}  qty={}  expires={}  [{}]",
        field("_id"),
        field("food_name"),
        field("food_quantity"),
        field("expired_date"),
        field("food_status"),
    )
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_line_fills_missing_fields() {
        let line = listing_line(&json!({
            "_id": "65f1c0a2b3c4d5e6f7a8b9c0",
            "food_name": "Rice",
            "food_quantity": 4,
        }));
        assert_eq!(line, "65f1c0a2b3c4d5e6f7a8b9c0  Rice  qty=4  expires=-  [-]");
    }
}
