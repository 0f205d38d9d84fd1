mod api;
mod config;
mod form;
mod poll;
mod types;
mod ui;

use std::io;
use std::process::exit;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use api::ApiClient;
use config::{Cli, SavedConfig, load_config, reset_config, save_config};
use poll::Refresher;
use types::App;

fn display_startup_info(config: &SavedConfig) {
    eprintln!("🚕 Starting rideterm...");
    eprintln!("🌐 Server: {}", config.server_url);
    eprintln!(
        "⏱️  Refreshing the ride list every {} seconds (Press 'q' to quit)",
        config.refresh_secs
    );
    eprintln!();
    eprintln!("🎯 Tip: ↑/↓ to select a ride, 'b' to book, 's' to start, 'c' to complete");
    eprintln!();
}

/// Merge CLI flags over saved configuration over defaults.
fn effective_config(cli: &Cli) -> SavedConfig {
    let mut config = load_config().unwrap_or_default();
    if let Some(server) = &cli.server {
        config.server_url = server.clone();
    }
    if let Some(refresh) = cli.refresh {
        config.refresh_secs = refresh.max(1);
    }
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "rideterm=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Handle reset flag first
    if cli.reset {
        match reset_config() {
            Ok(true) => {
                println!("✅ Saved configuration has been reset.");
            }
            Ok(false) => {
                println!("ℹ️  No saved configuration found to reset.");
            }
            Err(e) => {
                eprintln!("❌ Error resetting configuration: {}", e);
                exit(1);
            }
        }
        return Ok(());
    }

    let config = effective_config(&cli);
    let client = ApiClient::new(config.server_url.clone())?;

    // One-shot automation mode: fetch once, print JSON, never start polling.
    if cli.json {
        let rides = client.fetch_rides().await?;
        println!("{}", serde_json::to_string_pretty(&rides)?);
        return Ok(());
    }

    display_startup_info(&config);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(client.clone(), tx.clone(), &config);
    let mut refresher = Refresher::start(
        client,
        Duration::from_secs(config.refresh_secs),
        tx.clone(),
    );
    app.set_refresh_handle(refresher.handle());

    let mut terminal = ui::setup_terminal()?;

    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        // --- Draw UI ---
        ui::render_ui(&app, &mut terminal)?;

        // --- Input handling ---
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if ui::input::handle_key_event(&mut app, key.code) {
                        break; // Exit condition
                    }
                }
            }
        }

        // --- Tick-based updates ---
        if last_tick.elapsed() >= tick_rate {
            // Drain everything the refresher and action tasks sent since
            // the last tick
            while let Ok(ui_event) = rx.try_recv() {
                app.handle_event(ui_event);
            }

            app.prune_notifications();

            // A successful action reloads the ride list after a short delay
            if app.reload_due() {
                app.force_refresh();
            }

            // Apply settings the form queued: persist, then restart the
            // refresher against the (possibly) new server and interval
            if let Some(new_config) = app.take_pending_settings() {
                let applied = save_config(&new_config)
                    .map_err(anyhow::Error::from)
                    .and_then(|_| {
                        ApiClient::new(new_config.server_url.clone()).map_err(anyhow::Error::from)
                    });
                match applied {
                    Ok(new_client) => {
                        refresher.stop();
                        refresher = Refresher::start(
                            new_client.clone(),
                            Duration::from_secs(new_config.refresh_secs),
                            tx.clone(),
                        );
                        app.set_refresh_handle(refresher.handle());
                        app.set_client(new_client);
                        app.settings_saved(&new_config);
                    }
                    Err(err) => {
                        tracing::error!("failed to apply settings: {err}");
                        app.settings_failed();
                    }
                }
            }

            last_tick = Instant::now();
        }
    }

    refresher.stop();
    ui::restore_terminal(&mut terminal)?;
    Ok(())
}
