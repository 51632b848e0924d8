use anyhow::Result;
use colored::Colorize;

use medgrid_client::ApiClient;

pub async fn status(client: &ApiClient, server: &str) -> Result<()> {
    let code = client.ping().await?;
    if (200..300).contains(&code) {
        println!("{} {} is {}", "✓".green(), server.cyan(), "reachable".green());
    } else {
        println!(
            "{} {} returned {}",
            "✗".red(),
            server.cyan(),
            code.to_string().red()
        );
    }
    Ok(())
}

pub fn about(server: Option<&str>) {
    println!(
        "{} {}",
        "medgrid".cyan(),
        env!("CARGO_PKG_VERSION")
    );
    println!("A table-first client for patient records.");
    println!("{}: {}", "Server".cyan(), server.unwrap_or("(not set)"));
}
