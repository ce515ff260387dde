use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Send votes through the blue/green gateway", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast one or more votes
    Vote {
        choice: Vote,

        /// Number of votes to send
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
    },
    /// Clear all votes on the backend that receives this request
    Clear,
    /// Check gateway liveness
    Health,
}

#[derive(Clone, Copy, ValueEnum)]
enum Vote {
    Spaces,
    Tabs,
}

impl Vote {
    fn as_str(self) -> &'static str {
        match self {
            Vote::Spaces => "spaces",
            Vote::Tabs => "tabs",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Vote { choice, count } => {
            for i in 1..=count {
                let res = client
                    .get(&cli.url)
                    .query(&[("choice", choice.as_str())])
                    .send()
                    .await?;
                print_response(i, res).await?;
            }
        }
        Commands::Clear => {
            let res = client
                .get(&cli.url)
                .query(&[("choice", "clear")])
                .send()
                .await?;
            print_response(1, res).await?;
        }
        Commands::Health => {
            let res = client.get(format!("{}/health", cli.url.trim_end_matches('/'))).send().await?;
            print_response(1, res).await?;
        }
    }

    Ok(())
}

async fn print_response(seq: u32, res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let backend = res
        .headers()
        .get("x-gateway-backend")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let body = res.text().await?;
    let rendered = match serde_json::from_str::<Value>(&body) {
        Ok(json) => serde_json::to_string(&json)?,
        Err(_) => body,
    };

    if status.is_success() {
        println!("#{seq} {status} [{backend}] {rendered}");
    } else {
        eprintln!("#{seq} {status} [{backend}] {rendered}");
    }
    Ok(())
}
