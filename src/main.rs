//! CLI entry point for folio

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands::build::BuildOptions;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "A small static blog generator with a client-side post browser", long_about = None)]
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
    /// Generate post pages, blog data, sitemap, feed and assets
    #[command(alias = "b")]
    Build {
        /// Regenerate every page, even up-to-date ones
        #[arg(short, long)]
        force: bool,

        /// Publish draft posts too
        #[arg(long)]
        drafts: bool,
    },

    /// Remove generated files
    Clean,

    /// Scaffold a new post
    New {
        /// Title of the new post
        title: String,
    },

    /// Convert source images to responsive WebP variants
    Images {
        /// Reprocess every image
        #[arg(short, long)]
        force: bool,
    },

    /// Build with drafts, serve the site and rebuild on changes
    #[command(alias = "s")]
    Dev {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Serve without watching for changes
        #[arg(long)]
        r#static: bool,
    },

    /// List site information
    List {
        /// Type of content to list (post, tag)
        #[arg(default_value = "post")]
        r#type: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
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
    let folio = folio::Folio::new(&base_dir)?;

    match cli.command {
        Commands::Build { force, drafts } => {
            folio::commands::build::run(
                &folio,
                BuildOptions {
                    force,
                    include_drafts: drafts,
                },
            )?;
        }

        Commands::Clean => {
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::New { title } => {
            let path = folio.new_post(&title)?;
            println!("Created: {}", path.display());
        }

        Commands::Images { force } => {
            folio::commands::images::run(&folio, force)?;
        }

        Commands::Dev {
            port,
            ip,
            open,
            r#static,
        } => {
            // Build first
            folio::server::rebuild(&folio)?;
            folio::server::start(&folio, &ip, port, !r#static, open).await?;
        }

        Commands::List { r#type } => {
            folio::commands::list::run(&folio, &r#type)?;
        }
    }

    Ok(())
}
