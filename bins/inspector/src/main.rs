//! Expense app cookie inspector.
//!
//! Terminal front-end over the cookie jar file: shows every collection,
//! seeds or clears the demo data, and drives the login session and the
//! route guard the way the app does on load.

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expapp_core::auth::{AppState, Navigation, resolve};
use expapp_core::currency::fresh_rates;
use expapp_core::inspector::{Confirm, Inspector};
use expapp_core::notice::{self, DEMO_NOTICE, DEMO_NOTICE_TITLE};
use expapp_core::seed::DEMO_CREDENTIALS;
use expapp_core::store::{CookieOptions, CookieStore, FileJar, JarLimits};
use expapp_shared::{AppConfig, AppError};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every collection and the cached rate tables.
    Show,
    /// Install the demo dataset.
    Seed,
    /// Remove the demo dataset, keeping session and preferences.
    ClearDemo,
    /// Remove every cookie the app owns.
    ClearAll {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Log in as a stored user.
    Login {
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
    /// End the current session.
    Logout,
    /// Resolve a path through the route guard.
    Navigate {
        /// Application path, e.g. `/dashboard`.
        path: String,
    },
}

/// Asks on stdin; anything but `y`/`yes` declines.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expapp=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    if let Err(err) = run(args.command.unwrap_or(Command::Show)) {
        error!(code = err.error_code(), error = %err, "Inspector command failed");
        return Err(err.into());
    }
    Ok(())
}

fn run(command: Command) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let jar = FileJar::open(&config.jar.path, JarLimits::from(&config.store))?;
    let mut store = CookieStore::with_options(jar, CookieOptions::from(&config.store));

    let mut state = AppState::new();
    state.hydrate(&store);

    if notice::should_show(&config.demo, &store.preferences()) {
        println!("{DEMO_NOTICE_TITLE}\n{DEMO_NOTICE}\n");
    }

    match command {
        Command::Show => {
            println!("{}", Inspector::new(&mut store).snapshot());

            let ttl = chrono::Duration::hours(config.rates.ttl_hours);
            let now = chrono::Utc::now();
            for base in store.cached_rate_currencies() {
                let status = if fresh_rates(&store, base, ttl, now).is_some() {
                    "fresh"
                } else {
                    "stale"
                };
                println!("rates {base}: {status} (ttl {}h)", config.rates.ttl_hours);
            }
        }
        Command::Seed => {
            let mut inspector = Inspector::new(&mut store);
            let report = inspector.seed()?;
            println!(
                "Demo data seeded: {} users, {} expenses, {} rules.",
                report.users, report.expenses, report.rules
            );
            for cred in &DEMO_CREDENTIALS {
                println!("  {} / {}", cred.email, cred.password);
            }
        }
        Command::ClearDemo => {
            Inspector::new(&mut store).clear_demo()?;
            println!("Demo data cleared.");
        }
        Command::ClearAll { yes } => {
            let mut inspector = Inspector::new(&mut store);
            let removed = if yes {
                inspector.clear_all(&mut |_: &str| true)?
            } else {
                inspector.clear_all(&mut StdinConfirm)?
            };
            match removed {
                Some(n) => println!("Removed {n} cookies."),
                None => println!("Nothing removed."),
            }
        }
        Command::Login { email, password } => {
            let user = state.login(&mut store, &email, &password)?;
            println!("Logged in as {} ({}).", user.name, user.role);
        }
        Command::Logout => {
            state.logout(&mut store)?;
            println!("Logged out.");
        }
        Command::Navigate { path } => match resolve(&state, &path) {
            Navigation::Render(route) => println!("render {route}"),
            Navigation::Redirect(route) => println!("redirect {route}"),
            Navigation::Loading => println!("loading"),
            Navigation::NotFound => println!("404 not found: {path}"),
        },
    }

    info!(path = %config.jar.path.display(), "Done");
    Ok(())
}
