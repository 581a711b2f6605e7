//! HTTP server entry point for the payroll engine.
//!
//! Configuration comes from the environment:
//!
//! - `PAYROLL_RULES_PATH`: rule table YAML (default `config/rules.yaml`)
//! - `PAYROLL_HISTORY_PATH`: optional JSON history snapshot
//! - `PAYROLL_BIND_ADDR`: listen address (default `127.0.0.1:3000`)

use std::env;
use std::error::Error;

use tokio::net::TcpListener;
use tracing::{info, warn};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::RulesLoader;
use payroll_engine::models::load_history;

const DEFAULT_RULES_PATH: &str = "config/rules.yaml";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    let rules_path = env::var("PAYROLL_RULES_PATH").unwrap_or_else(|_| DEFAULT_RULES_PATH.to_string());
    let rules = RulesLoader::load(&rules_path)?.into_rules();
    info!(
        path = %rules_path,
        income_slabs = rules.income_tax_slabs.len(),
        locations = rules.professional_tax.len(),
        "Loaded rule table"
    );

    let history = match env::var("PAYROLL_HISTORY_PATH") {
        Ok(path) => {
            let history = load_history(&path)?;
            info!(path = %path, records = history.len(), "Loaded history snapshot");
            history
        }
        Err(_) => {
            warn!("PAYROLL_HISTORY_PATH not set; historical variance needs history in each request");
            Vec::new()
        }
    };

    let bind_addr = env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Payroll engine listening");

    axum::serve(listener, create_router(AppState::new(rules, history))).await?;
    Ok(())
}
