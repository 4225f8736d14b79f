// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Party RSVP server and command line.
//!
//! `serve` runs the RSVP API. The other subcommands drive the local
//! confirmation flow: confirm a guest, list or clear local records, and
//! render a ticket without storing anything.

use clap::{Parser, Subcommand};
use party_rsvp::{
    config::Config,
    db::RsvpDb,
    services::{
        validation::prepare_ticket, FileKvStore, RawForm, RecordStore, RemoteSync,
        RsvpController, SubmitOutcome, SyncOutcome,
    },
    ticket::TicketRenderer,
    AppState,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "party-rsvp", version, about = "Party invitation RSVPs and tickets")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the RSVP API server
    Serve,
    /// Confirm one RSVP into the local store
    Confirm {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0.0)]
        adults: f64,
        #[arg(long, default_value_t = 0.0)]
        kids: f64,
        /// Write the ticket PNG here
        #[arg(long)]
        ticket_out: Option<PathBuf>,
    },
    /// Show local totals and confirmations, newest first
    List,
    /// Delete every local confirmation
    Clear,
    /// Render a ticket without storing an RSVP
    Ticket {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 1.0)]
        adults: f64,
        #[arg(long, default_value_t = 0.0)]
        kids: f64,
        #[arg(long)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => {
            init_json_logging();
            serve().await
        }
        command => {
            init_cli_logging();
            run_local(command).await
        }
    }
}

async fn serve() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Party RSVP API");

    let db = RsvpDb::connect(config.gcp_project_id.as_deref()).await?;
    let renderer = TicketRenderer::new(config.ticket_font_path.as_deref());

    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        renderer,
    });

    let app = party_rsvp::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn run_local(command: Command) -> anyhow::Result<()> {
    let config = Config::local_from_env();
    let store = RecordStore::new(FileKvStore::new(&config.data_dir));
    let renderer = TicketRenderer::new(config.ticket_font_path.as_deref());

    match command {
        Command::Confirm {
            name,
            adults,
            kids,
            ticket_out,
        } => {
            let remote = RemoteSync::from_config(config.remote_url.as_deref());
            let mut controller = RsvpController::new(store, remote, renderer);

            match controller.submit(RawForm { name, adults, kids })? {
                SubmitOutcome::Rejected { errors } => {
                    for error in &errors {
                        eprintln!("{error}");
                    }
                    anyhow::bail!("RSVP rejected");
                }
                SubmitOutcome::Confirmed(confirmation) => {
                    println!("{}", confirmation.record.summary_line());
                    let totals = confirmation.summary.totals;
                    println!(
                        "Total: {} adults, {} kids, {} guests",
                        totals.adults, totals.kids, totals.guests
                    );

                    if let (Some(path), Some(ticket)) = (ticket_out, &confirmation.ticket) {
                        std::fs::write(&path, ticket.to_png()?)?;
                        println!("Ticket written to {}", path.display());
                    }

                    // The process is about to exit; give the mirror a chance to land.
                    if let Some(sync) = confirmation.sync {
                        match sync.await {
                            Ok(SyncOutcome::Failed(reason)) => {
                                eprintln!("Remote sync failed: {reason}")
                            }
                            Ok(_) => {}
                            Err(e) => tracing::error!(error = %e, "Remote sync task panicked"),
                        }
                    }
                }
            }
        }
        Command::List => {
            let controller = RsvpController::new(store, RemoteSync::disabled(), renderer);
            let summary = controller.summary();
            for line in &summary.lines {
                println!("{line}");
            }
            println!(
                "Total: {} adults, {} kids, {} guests",
                summary.totals.adults, summary.totals.kids, summary.totals.guests
            );
        }
        Command::Clear => {
            let mut controller = RsvpController::new(store, RemoteSync::disabled(), renderer);
            controller.clear_all()?;
            println!("Local RSVPs cleared");
        }
        Command::Ticket {
            name,
            adults,
            kids,
            out,
        } => {
            let input = match prepare_ticket(&name, adults, kids) {
                Ok(input) => input,
                Err(errors) => {
                    for error in &errors {
                        eprintln!("{error}");
                    }
                    anyhow::bail!("Ticket request rejected");
                }
            };
            let ticket = renderer.render(&input.name, input.adults, input.kids)?;
            std::fs::write(&out, ticket.to_png()?)?;
            println!("Ticket written to {}", out.display());
        }
        Command::Serve => serve().await?,
    }

    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("party_rsvp=debug,info"))
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_json_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(format)
        .init();
}

/// Plain logging to stderr for the interactive subcommands.
fn init_cli_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
