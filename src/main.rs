use clap::Parser;
use signaldesk::cli::commands::{Cli, Commands};
use signaldesk::domain::values::band::Band;
use signaldesk::domain::values::sorting::{FilterSpec, RiskFilter, SortField};
use signaldesk::SignalDesk;

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let db_path = std::env::var("SIGNALDESK_DB").unwrap_or_else(|_| "./signaldesk.db".into());

    let desk = match SignalDesk::new(&db_path) {
        Ok(desk) => desk,
        Err(e) => {
            eprintln!("Error initializing signaldesk: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(desk, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(desk: SignalDesk, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Rows => {
            let scan = desk.rows().await?;
            println!("{}", serde_json::to_string_pretty(&scan)?);
        }
        Commands::Top { limit } => {
            let view = desk.top_opportunities(limit).await?;
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        Commands::Opportunities {
            view,
            band,
            strategy,
            risk,
            max_cap,
            sort,
        } => {
            let filters = if band.is_some() || strategy.is_some() || risk.is_some() || max_cap.is_some()
            {
                Some(FilterSpec {
                    band: band.as_deref().map(str::parse::<Band>).transpose()?,
                    strategy,
                    risk: risk.as_deref().map(str::parse::<RiskFilter>).transpose()?,
                    max_capital_pct: max_cap,
                })
            } else {
                None
            };
            let sort_field = sort.as_deref().map(str::parse::<SortField>).transpose()?;

            let ranked = desk.opportunities_table(&view, filters, sort_field).await?;
            println!("{}", serde_json::to_string_pretty(&ranked)?);
        }
        Commands::Notifications { all } => {
            let groups = desk.notifications(all);
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
        Commands::Sync => {
            let report = desk.sync_notifications().await;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::MarkRead { id } => {
            desk.mark_read(&id);
            println!("{{\"marked_read\": \"{id}\"}}");
        }
        Commands::MarkAllRead => {
            let count = desk.mark_all_read();
            println!("{{\"marked_read\": {count}}}");
        }
        Commands::Prefs { view, reset } => {
            if reset {
                desk.reset_preferences(&view);
            }
            let prefs = desk.preferences(&view);
            println!("{}", serde_json::to_string_pretty(&prefs)?);
        }
    }
    Ok(())
}
