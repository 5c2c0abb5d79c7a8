//! demos/plot_meteogram.rs
//!
//! Downloads the last day of one-minute observations for a station and plots a
//! meteogram in the browser.
//!
//! To run this example:
//! cargo run --example plot_meteogram --features plotting -- AMW

use std::env;
use std::error::Error;

use meteogram::{plot_meteogram, AsosClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let station = env::args().nth(1).unwrap_or_else(|| "AMW".to_string());

    // 1. Create a client reading the current time from the system clock
    let client = AsosClient::new();
    println!("Request URL: {}", client.request_url(&station).call()?);

    // 2. Download and convert the last 24 hours
    let frame = client.station(&station).call().await?;

    // 3. Plot the data
    println!("Generating meteogram for {}...", station);
    plot_meteogram(&frame, None, None)?.show();
    println!("Plot shown in browser.");

    Ok(())
}
