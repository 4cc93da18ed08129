//! CLI entry point for postdeck

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postdeck")]
#[command(version)]
#[command(about = "A static blog front end with carousels, search and a fullscreen viewer", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Generate the static site
    #[command(alias = "g")]
    Build {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Start a local preview server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Clean the public folder and saved preferences
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, index, image)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Search posts by title or content
    Search {
        /// Case-insensitive substring to look for
        query: String,
    },

    /// Show or toggle the saved theme preference
    Theme {
        /// Flip the theme and save the choice
        #[arg(short, long)]
        toggle: bool,

        /// Assume the system prefers a dark color scheme
        #[arg(long)]
        system_dark: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postdeck=debug,info"
    } else {
        "postdeck=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            postdeck::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::Build { watch } => {
            let site = postdeck::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");

            site.build().await?;
            println!("Generated successfully!");

            if watch {
                postdeck::commands::build::watch(&site).await?;
            }
        }

        Commands::Serve {
            port,
            ip,
            open,
            r#static,
        } => {
            let site = postdeck::Site::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            site.build().await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            postdeck::server::start(&site, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let site = postdeck::Site::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = postdeck::Site::new(&base_dir)?;
            postdeck::commands::list::run(&site, &r#type).await?;
        }

        Commands::Search { query } => {
            let site = postdeck::Site::new(&base_dir)?;
            postdeck::commands::search::run(&site, &query).await?;
        }

        Commands::Theme {
            toggle,
            system_dark,
        } => {
            let site = postdeck::Site::new(&base_dir)?;
            let system_dark = if system_dark { Some(true) } else { None };
            postdeck::commands::theme::run(&site, toggle, system_dark)?;
        }
    }

    Ok(())
}
