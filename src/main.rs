//! GateReady - a terminal client for the GateReady flight assistant.
//!
//! Sign in, list your bookings, and ask the assistant about upcoming trips.
//! The session survives restarts; an expired access token is refreshed and
//! the request retried without user involvement.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gateready::api::{ApiClient, ApiError};
use gateready::app::App;
use gateready::auth::{CredentialStore, SessionState};
use gateready::config::Config;
use gateready::models::BookingFilter;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();
    info!("GateReady client starting");

    let config = Config::load()?;
    let cache_dir = config
        .cache_dir()
        .unwrap_or_else(|_| PathBuf::from(".gateready"));
    let store = CredentialStore::new(cache_dir);
    let session = Arc::new(SessionState::new(store));
    let api = ApiClient::new(config.api_base(), Arc::clone(&session))?;
    let mut app = App::new(config, session, api);

    if app.is_authenticated() {
        println!("Session restored. Type :help for commands.");
        app.refresh_bookings().await;
        print_bookings(&app);
    } else {
        println!("Not signed in. Use :login to begin, :help for commands.");
    }

    run_repl(&mut app).await?;

    info!("GateReady client shutting down");
    Ok(())
}

async fn run_repl(app: &mut App) -> Result<()> {
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF
            return Ok(());
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input {
            ":quit" | ":q" => return Ok(()),
            ":help" => print_help(),
            ":history" => print_history(app),
            ":login" => handle_login(app).await?,
            ":logout" => {
                app.logout().await;
                println!("Signed out.");
            }
            _ if input.starts_with(":bookings") => {
                handle_bookings(app, input.trim_start_matches(":bookings").trim()).await;
            }
            _ if input.starts_with(':') => {
                println!("Unknown command. Type :help for commands.");
            }
            message => handle_chat(app, message).await,
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  :login                      sign in");
    println!("  :logout                     sign out and clear the session");
    println!("  :bookings [origin=X] [destination=Y] [status=Z]");
    println!("                              list bookings, optionally filtered");
    println!("  :history                    show the chat transcript");
    println!("  :quit                       exit");
    println!("Anything else is sent to the assistant as a chat message.");
}

async fn handle_login(app: &mut App) -> Result<()> {
    let stdin = io::stdin();

    let default = app.last_username().unwrap_or("").to_string();
    if default.is_empty() {
        print!("Username: ");
    } else {
        print!("Username [{default}]: ");
    }
    io::stdout().flush()?;

    let mut username = String::new();
    stdin.lock().read_line(&mut username)?;
    let mut username = username.trim().to_string();
    if username.is_empty() {
        username = default;
    }
    if username.is_empty() {
        println!("Login cancelled.");
        return Ok(());
    }

    let password = rpassword::prompt_password("Password: ")?;

    match app.login(&username, &password).await {
        Ok(()) => {
            app.save_config();
            println!("Signed in as {username}.");
            print_bookings(app);
        }
        Err(e) => println!("{e}"),
    }
    Ok(())
}

async fn handle_bookings(app: &mut App, args: &str) {
    if !app.is_authenticated() {
        println!("Login to see your bookings.");
        return;
    }

    app.filter = parse_filter(args);
    app.refresh_bookings().await;
    print_bookings(app);
}

/// Parse `origin=X destination=Y status=Z` filter arguments.
fn parse_filter(args: &str) -> BookingFilter {
    let mut filter = BookingFilter::default();
    for part in args.split_whitespace() {
        if let Some((key, value)) = part.split_once('=') {
            if value.is_empty() {
                continue;
            }
            match key {
                "origin" => filter.origin = Some(value.to_string()),
                "destination" | "dest" => filter.destination = Some(value.to_string()),
                "status" => filter.status = Some(value.to_string()),
                _ => {}
            }
        }
    }
    filter
}

fn print_bookings(app: &App) {
    if app.bookings.is_empty() {
        if app.filter.is_empty() {
            println!("No bookings yet.");
        } else {
            println!("No bookings match the current filter.");
        }
        return;
    }
    for booking in &app.bookings {
        println!(
            "  {:<8} {:<24} {:<20} {}",
            booking.flight_number,
            booking.route(),
            booking.date_display(),
            booking.status
        );
    }
}

fn print_history(app: &App) {
    if app.transcript.is_empty() {
        println!("No messages yet.");
        return;
    }
    for message in &app.transcript {
        println!("{}: {}", message.role.label(), message.content);
    }
}

async fn handle_chat(app: &mut App, message: &str) {
    if !app.is_authenticated() {
        println!("Login before chatting with the assistant.");
        return;
    }

    match app.send_message(message).await {
        Ok(reply) => println!("Assistant: {reply}"),
        Err(e @ ApiError::Unauthenticated) => println!("{e}"),
        Err(e) => println!("Request failed: {e}"),
    }
}
