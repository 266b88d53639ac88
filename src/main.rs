use std::io::{self, BufRead, Write};
use std::sync::Arc;

use stockdash::app::App;
use stockdash::commands::Command;
use stockdash::config::ClientConfig;
use stockdash::external::http_api::HttpDashboardApi;
use stockdash::interaction::TerminalInteraction;
use stockdash::logging::{init_logging, LoggingConfig};

fn read_line() -> Option<String> {
    tokio::task::block_in_place(|| {
        let mut stdout = io::stdout();
        let _ = write!(stdout, "stockdash> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line),
        }
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    init_logging(LoggingConfig::from_env()).map_err(|e| anyhow::anyhow!("logging: {}", e))?;

    let config = ClientConfig::from_env()?;
    tracing::info!("🔌 Backend: {}", config.base_url);

    let api = HttpDashboardApi::new(config.base_url.clone(), config.request_timeout)?;
    let app = App::start(&config, Arc::new(api), Arc::new(TerminalInteraction)).await?;

    println!("{}", app.render());

    while let Some(line) = read_line() {
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<Command>() {
            Ok(command) => {
                if !app.dispatch(command).await {
                    break;
                }
            }
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        }

        println!("{}", app.render());
    }

    app.shutdown().await?;
    Ok(())
}
