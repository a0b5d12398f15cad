//! One-shot CLI over the same library the server uses: submit a single URL
//! or generate-and-submit a bridge page, then print the record.

use std::sync::Arc;

use seo_autopilot::bridge::{BridgeGenerator, ItemInput};
use seo_autopilot::config::AppConfig;
use seo_autopilot::credentials::CredentialPool;
use seo_autopilot::history::SubmissionHistory;
use seo_autopilot::submit::transport::HttpTransport;
use seo_autopilot::submit::SubmitEngine;

fn usage() {
    println!("Commands:");
    println!("  submit <url>        Submit a single URL");
    println!("  boost <url>...      Generate a bridge page for the URLs and submit it");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let cfg = Arc::new(AppConfig::from_env());
    let pool = CredentialPool::load(&cfg);
    let history = SubmissionHistory::load(cfg.history_file()).await;
    let engine = Arc::new(SubmitEngine::new(
        Arc::clone(&cfg),
        pool,
        history,
        Arc::new(HttpTransport::new()),
    ));

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.split_first() {
        Some((cmd, rest)) if cmd == "submit" => {
            let Some(url) = rest.first() else {
                eprintln!("Usage: booster submit <url>");
                std::process::exit(1);
            };
            println!("Submitting {url}...");
            let result = engine.submit(url).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Some((cmd, rest)) if cmd == "boost" => {
            if rest.is_empty() {
                eprintln!("Usage: booster boost <url1> <url2> ...");
                std::process::exit(1);
            }
            println!("Generating bridge page for {} URLs...", rest.len());
            let bridge = BridgeGenerator::new(Arc::clone(&cfg), Arc::clone(&engine));
            let inputs = rest.iter().cloned().map(ItemInput::Url).collect();
            let result = bridge.boost(inputs).await?;
            println!("Bridge page created & submitted!");
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => usage(),
    }

    Ok(())
}
