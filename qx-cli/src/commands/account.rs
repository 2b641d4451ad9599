//! Account command handlers

use anyhow::Result;
use colored::*;

use crate::commands::build_client;
use crate::config::Config;

/// Show the account credit balance
pub async fn show_credits(config: &Config) -> Result<()> {
    let client = build_client(config)?;
    let credits = client.get_my_credits().await?;

    match credits.remaining {
        Some(remaining) => {
            println!("{} {}", "Remaining credits:".bold(), remaining);
            if let Some(max) = credits.max_user_type {
                println!("{} {}", "Credit ceiling:".bold(), max);
            }
        }
        None => println!("{}", "No credit information available.".yellow()),
    }

    Ok(())
}
