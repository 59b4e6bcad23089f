//! situps-client CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use situps_client::cli::{Cli, Commands, OutputFormat};
use situps_client::output::{format_output, pretty};
use situps_client::{EntriesStore, SitupsClient};
use situps_core::entry::EntryKey;
use situps_core::schedule::WeekNumbering;
use tokio_stream::StreamExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "situps_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = cli.client_config();

    match &cli.command {
        Commands::Range(args) => {
            let range = args.range_config(&config).build();
            let weeks = range.weeks(args.numbering.into());
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&weeks, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_weeks(&weeks)),
            }
        }
        Commands::Get(args) => {
            let client = SitupsClient::connect(&config).await?;
            let response = client
                .get_entry(EntryKey::new(config.user_id.as_str(), args.date))
                .await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&response, cli.format)),
                OutputFormat::Pretty => println!("{}", pretty::format_entry_response(&response)),
            }
        }
        Commands::Update(args) => {
            let client = SitupsClient::connect(&config).await?;
            let key = EntryKey::new(config.user_id.as_str(), args.date);

            // The server echoes accepted updates to every subscriber.
            let mut subscription = client.subscribe_to_state_change(&key).await?;
            client.update_entry(key, args.new_amount()).await?;

            let change = tokio::time::timeout(config.request_timeout(), subscription.recv())
                .await
                .context("server did not confirm the update")?
                .context("connection closed before the update was confirmed")?;
            if !cli.quiet {
                match cli.format {
                    OutputFormat::Json => println!("{}", format_output(&change, cli.format)),
                    OutputFormat::Pretty => {
                        println!("Updated: {}", pretty::format_state_change(&change))
                    }
                }
            }
        }
        Commands::Watch(args) => {
            let client = SitupsClient::connect(&config).await?;
            let key = EntryKey::new(config.user_id.as_str(), args.date);
            if !cli.quiet {
                eprintln!("Watching {}...", pretty::format_key(&key));
            }

            let stream = client.watch_entry(&key).await?;
            tokio::pin!(stream);
            while let Some(change_result) = stream.next().await {
                match change_result {
                    Ok(change) => match cli.format {
                        OutputFormat::Json => println!("{}", format_output(&change, cli.format)),
                        OutputFormat::Pretty => println!("{}", pretty::format_state_change(&change)),
                    },
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        break;
                    }
                }
            }
        }
        Commands::Load(args) => {
            let client = SitupsClient::connect(&config).await?;
            let mut store = EntriesStore::new(client);
            store.set_range_config(&args.range.range_config(&config));

            let days = store.load_amounts(&config.user_id).await?;
            match cli.format {
                OutputFormat::Json => println!("{}", format_output(&days, cli.format)),
                OutputFormat::Pretty => {
                    let numbering: WeekNumbering = args.range.numbering.into();
                    println!("{}", pretty::format_day_amounts(&days, numbering))
                }
            }
        }
    }

    Ok(())
}
