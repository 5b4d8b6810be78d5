//! Demo data seeder for the expense app.
//!
//! Writes the demo company, users, expenses and rules into the configured
//! cookie jar file, or removes them again.
//!
//! Usage: cargo run --bin seeder [seed|clear]

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use expapp_core::seed::{DEMO_CREDENTIALS, DemoSeeder};
use expapp_core::store::{CookieOptions, CookieStore, FileJar, JarLimits};
use expapp_shared::{AppConfig, AppError};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "expapp=debug,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let command = std::env::args().nth(1);
    if let Err(err) = run(command.as_deref()) {
        error!(code = err.error_code(), error = %err, "Seeder failed");
        return Err(err.into());
    }
    Ok(())
}

fn run(command: Option<&str>) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let jar = FileJar::open(&config.jar.path, JarLimits::from(&config.store))?;
    let mut store = CookieStore::with_options(jar, CookieOptions::from(&config.store));
    info!(path = %config.jar.path.display(), "Opened cookie jar");

    let seeder = DemoSeeder::new();
    match command {
        None | Some("seed") => {
            let report = seeder.seed(&mut store)?;
            println!(
                "Seeded {} users, {} expenses, {} rules.",
                report.users, report.expenses, report.rules
            );
            println!("Demo logins:");
            for cred in &DEMO_CREDENTIALS {
                println!("  {:<8} {} / {}", cred.role.as_str(), cred.email, cred.password);
            }
        }
        Some("clear") => {
            seeder.clear(&mut store)?;
            println!("Demo data cleared.");
        }
        Some(other) => {
            return Err(AppError::Configuration(format!(
                "unknown command '{other}', expected 'seed' or 'clear'"
            )));
        }
    }

    Ok(())
}
