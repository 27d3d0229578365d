use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use fakenodo::config::load_or_default;
use fakenodo::observability::init_tracing;
use fakenodo::probe::{test_fakenodo_connection, ConnectivityProbe, ErrorBanner};

#[derive(Parser)]
#[command(name = "fakenodo-cli")]
#[command(about = "Management CLI for the fakenodo mock service", long_about = None)]
struct Cli {
    /// Config file; FAKENODO_CONFIG applies when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of the service; overrides the configured probe.base_url
    #[arg(short, long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the connectivity probe once
    Probe,
    /// Show the raw status payload
    Status,
    /// List depositions
    List,
    /// Create a deposition
    Create {
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Publish a deposition
    Publish { id: u64 },
    /// List published versions of a deposition
    Versions { id: u64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("fakenodo=info");
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let config = load_or_default(cli.config)?;
    let url = cli.url.unwrap_or(config.probe.base_url);

    match cli.command {
        Commands::Probe => {
            // One probe per invocation, automatically, like the page-load
            // trigger this replaces.
            let banner = Arc::new(ErrorBanner::new());
            let probe = ConnectivityProbe::new(url, Some(banner.clone()));
            test_fakenodo_connection(&probe).await;

            if banner.is_visible() {
                eprintln!("{}", banner.text());
                std::process::exit(1);
            }
            println!("fakenodo is reachable");
        }
        Commands::Status => {
            let res = client.get(format!("{}/fakenodo/test", url)).send().await?;
            print_response(res).await?;
        }
        Commands::List => {
            let res = client
                .get(format!("{}/fakenodo/deposit/depositions", url))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Create { title } => {
            let metadata = match title {
                Some(title) => json!({ "metadata": { "title": title } }),
                None => json!({}),
            };
            let res = client
                .post(format!("{}/fakenodo/deposit/depositions", url))
                .json(&metadata)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Publish { id } => {
            let res = client
                .post(format!(
                    "{}/fakenodo/deposit/depositions/{}/actions/publish",
                    url, id
                ))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Versions { id } => {
            let res = client
                .get(format!(
                    "{}/fakenodo/deposit/depositions/{}/versions",
                    url, id
                ))
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
