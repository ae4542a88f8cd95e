//! Terminal host for the recommendation form.
//!
//! Owns the input slots, the action triggers, the status line and the
//! results region, and drives `Controller` over HTTP. Input keeps flowing while requests
//! are in flight.

mod command;

use anyhow::Result;
use clap::Parser;
use recommendation_core::{
    ClientConfig, Controller, Field, HttpTransport, Outcome, RecommendationClient, ViewState,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

use command::{Command, HELP};

#[derive(Parser, Debug)]
#[command(about = "Edit and search recommendations from the terminal")]
struct Args {
    /// Origin serving `/recommendations`; overrides RECOMMENDATIONS_BASE_URL
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ClientConfig::from_env()?;
    let base_url = args.base_url.unwrap_or(config.base_url);
    info!(%base_url, "starting console");

    let mut controller = Controller::new(RecommendationClient::new(&base_url), HttpTransport::new());
    println!("{HELP}");
    render(controller.view(), false);

    // Requests run concurrently with input; each outcome is applied as it
    // lands, so overlapping actions resolve in completion order.
    let mut in_flight: JoinSet<Outcome> = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                let outcome = joined?;
                let searched = matches!(outcome, Outcome::Searched(_));
                controller.apply(outcome);
                render(controller.view(), searched);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match command::parse(&line) {
                    Ok(None) => {}
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(Command::Help)) => println!("{HELP}"),
                    Ok(Some(Command::Show)) => render(controller.view(), false),
                    Ok(Some(Command::Set(field, value))) => controller.form_mut().set(field, value),
                    Ok(Some(Command::Run(action))) => match controller.prepare(action) {
                        Some(pending) => {
                            in_flight.spawn(pending.send());
                        }
                        None => render(controller.view(), false),
                    },
                    Err(err) => println!("{err}"),
                }
            }
        }
    }

    // Let requests still in flight at end of input report back.
    while let Some(joined) = in_flight.join_next().await {
        let outcome = joined?;
        let searched = matches!(outcome, Outcome::Searched(_));
        controller.apply(outcome);
        render(controller.view(), searched);
    }
    Ok(())
}

fn render(view: &ViewState, with_results: bool) {
    for field in Field::ALL {
        println!("{:>10}: {}", field.name(), view.form.get(field));
    }
    println!("    status: {}", view.status.message());
    if with_results {
        if let Some(results) = &view.results {
            print!("{results}");
        }
    }
}
