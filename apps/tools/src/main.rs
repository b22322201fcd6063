use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shared::domain::{SortField, SortOrder};
use storefront::{checkout::validate_checkout_form, config::load_settings, Storefront};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

mod session;

#[derive(Parser, Debug)]
#[command(name = "storefront-cli", about = "Browse lessons and book them from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the catalog, optionally filtered and sorted.
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "subject")]
        sort_by: SortField,
        #[arg(long, default_value = "asc")]
        order: SortOrder,
        #[arg(long)]
        json: bool,
    },
    /// Check contact details against the checkout rules.
    Validate {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        json: bool,
    },
    /// Interactive booking session on stdin/stdout.
    Session,
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = load_settings();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut store = Storefront::from_settings(&settings).context("failed to load lesson catalog")?;

    match cli.command {
        Command::List {
            search,
            sort_by,
            order,
            json,
        } => {
            store.set_search_term(search);
            store.set_sort(sort_by, order);
            if json {
                println!("{}", serde_json::to_string_pretty(&store.catalog_view())?);
            } else {
                println!(
                    "{}",
                    session::render_lessons(&store.sorted_and_filtered_lessons())
                );
            }
        }
        Command::Validate { name, phone, json } => {
            let errors = validate_checkout_form(&name, &phone);
            if json {
                println!("{}", serde_json::to_string_pretty(&errors)?);
            } else if errors.is_empty() {
                println!("details valid");
            } else {
                for message in [errors.name_message(), errors.phone_message()] {
                    if !message.is_empty() {
                        println!("{message}");
                    }
                }
            }
            if !errors.is_empty() {
                std::process::exit(1);
            }
        }
        Command::Session => {
            println!("{}", session::HELP);
            let stdin = BufReader::new(tokio::io::stdin());
            let mut stdout = tokio::io::stdout();
            session::run_session(&mut store, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
