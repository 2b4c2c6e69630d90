//! Terminal frontend for Celestial Sword.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const DEFAULT_DATA_DIR: &str = ".celestial-sword";

#[derive(Parser)]
#[command(
    name = "cs",
    about = "Celestial Sword: a small RPG and its companion website",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the RPG in an interactive session
    Play {
        /// Directory holding the save file
        #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,

        /// RNG seed for reproducible rolls
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Disable random encounters (both movement and idle checks)
        #[arg(long)]
        no_encounters: bool,
    },

    /// Show a leaderboard: level, pvp, or guild
    Leaderboard {
        /// Which table to show
        #[arg(default_value = "level")]
        tab: String,

        /// Print the rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in to the website by email or username
    Login {
        /// Email address or username
        identifier: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Keep the session token after this command exits
        #[arg(short, long)]
        remember: bool,

        #[command(flatten)]
        web: WebArgs,
    },

    /// Create a website account
    Register {
        /// Username (3-20 letters and digits)
        #[arg(short, long)]
        username: String,

        /// Contact email
        #[arg(short, long)]
        email: String,

        /// Password (at least 8 characters)
        #[arg(short, long)]
        password: String,

        /// Password again
        #[arg(short, long)]
        confirm: String,

        /// Game server to join
        #[arg(short, long, default_value = "")]
        server: String,

        /// Accept the Terms of Service
        #[arg(long)]
        accept_terms: bool,

        #[command(flatten)]
        web: WebArgs,
    },

    /// Forget the remembered session
    Logout {
        #[command(flatten)]
        web: WebArgs,
    },

    /// Show the account of the remembered session
    Whoami {
        #[command(flatten)]
        web: WebArgs,
    },

    /// File a support ticket
    Support {
        /// Your name
        #[arg(short, long)]
        name: String,

        /// Reply address
        #[arg(short, long)]
        email: String,

        /// Short summary
        #[arg(short, long)]
        subject: String,

        /// Description of the problem
        #[arg(short, long)]
        message: String,

        #[command(flatten)]
        web: WebArgs,
    },
}

/// Options shared by the website commands.
#[derive(clap::Args)]
struct WebArgs {
    /// Directory holding the remembered session token
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Simulated server latency in milliseconds
    #[arg(long, default_value = "1000")]
    latency_ms: u64,
}

impl WebArgs {
    fn options(&self) -> commands::WebOptions<'_> {
        commands::WebOptions {
            data_dir: &self.data_dir,
            latency_ms: self.latency_ms,
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            data_dir,
            seed,
            no_encounters,
        } => commands::play::run(&data_dir, seed, no_encounters),
        Commands::Leaderboard { tab, json } => commands::leaderboard::run(&tab, json),
        Commands::Login {
            identifier,
            password,
            remember,
            web,
        } => commands::account::login(web.options(), &identifier, &password, remember),
        Commands::Register {
            username,
            email,
            password,
            confirm,
            server,
            accept_terms,
            web,
        } => {
            let form = cs_web::RegistrationForm {
                username,
                email,
                password,
                confirm_password: confirm,
                server,
                accept_terms,
            };
            commands::account::register(web.options(), &form)
        }
        Commands::Logout { web } => commands::account::logout(web.options()),
        Commands::Whoami { web } => commands::account::whoami(web.options()),
        Commands::Support {
            name,
            email,
            subject,
            message,
            web,
        } => {
            let ticket = cs_web::SupportTicket {
                name,
                email,
                subject,
                message,
            };
            commands::support::run(web.options(), &ticket)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
