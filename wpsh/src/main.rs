//! wpsh drives WP-CLI on remote WordPress servers over SSH.

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod editor;

use commands::create::CreateArgs;
use commands::update::UpdateArgs;
use config::Config;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Server name from the config (defaults to default_server)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter config file
    Init,
    /// Verify WP-CLI and the WordPress installation on a server
    Doctor,
    /// Create a post, or bulk-create from a JSON array file
    Create {
        /// Post title, or a path to a .json file with an array of posts
        target: String,
        /// Post body
        #[arg(long)]
        content: Option<String>,
        /// Post status
        #[arg(long, default_value = "draft")]
        status: String,
        /// Post type
        #[arg(long = "type", default_value = "post")]
        post_type: String,
        /// Category name or slug to assign
        #[arg(long)]
        category: Option<String>,
        /// Category term ID to assign
        #[arg(long)]
        category_id: Option<u64>,
    },
    /// Edit post content and/or assign a category
    Update {
        /// Post ID
        post_id: u64,
        /// Text to search for
        find: Option<String>,
        /// Replacement text
        replace: Option<String>,
        /// Restrict the edit to one line (1-based)
        #[arg(long)]
        line: Option<usize>,
        /// Replace only the nth occurrence (1-based)
        #[arg(long)]
        nth: Option<usize>,
        /// Show the edit without applying it
        #[arg(long)]
        preview: bool,
        /// Category name or slug to assign
        #[arg(long)]
        category: Option<String>,
        /// Category term ID to assign
        #[arg(long)]
        category_id: Option<u64>,
    },
    /// Search post titles
    Find {
        /// Text to look for (case-insensitive)
        text: String,
        /// Post type to search
        #[arg(long = "type", default_value = "post")]
        post_type: String,
    },
    /// List posts
    List {
        /// Post type to list
        #[arg(long = "type", default_value = "post")]
        post_type: String,
        /// Filter by post status
        #[arg(long)]
        status: Option<String>,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Manage themes
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// List all categories
    List,
    /// Create a category
    Create {
        /// Category name
        name: String,
        /// Parent term ID
        #[arg(long)]
        parent: Option<u64>,
    },
    /// Replace the categories of a post
    Set {
        /// Post ID
        post_id: u64,
        /// Category names, slugs, or term IDs
        #[arg(required = true)]
        categories: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ThemeCommands {
    /// List installed themes
    List,
    /// Activate a theme
    Activate {
        /// Theme slug
        theme: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .init();

    if matches!(cli.command, Commands::Init) {
        return commands::init::run();
    }

    let config = Config::load()?;
    let server = cli.server.as_deref();

    match cli.command {
        Commands::Init => Ok(()),
        Commands::Doctor => commands::doctor::run(&config, server).await,
        Commands::Create {
            target,
            content,
            status,
            post_type,
            category,
            category_id,
        } => {
            commands::create::run(
                &config,
                server,
                CreateArgs {
                    target: &target,
                    content: content.as_deref(),
                    status: &status,
                    post_type: &post_type,
                    category: category.as_deref(),
                    category_id,
                },
            )
            .await
        }
        Commands::Update {
            post_id,
            find,
            replace,
            line,
            nth,
            preview,
            category,
            category_id,
        } => {
            commands::update::run(
                &config,
                server,
                UpdateArgs {
                    post_id,
                    find: find.as_deref(),
                    replace: replace.as_deref(),
                    line,
                    nth,
                    preview,
                    category: category.as_deref(),
                    category_id,
                },
            )
            .await
        }
        Commands::Find { text, post_type } => {
            commands::find::run(&config, server, &text, &post_type).await
        }
        Commands::List { post_type, status } => {
            commands::list::run(&config, server, &post_type, status.as_deref()).await
        }
        Commands::Category { command } => match command {
            CategoryCommands::List => commands::category::list(&config, server).await,
            CategoryCommands::Create { name, parent } => {
                commands::category::create(&config, server, &name, parent).await
            }
            CategoryCommands::Set {
                post_id,
                categories,
            } => commands::category::set(&config, server, post_id, &categories).await,
        },
        Commands::Theme { command } => match command {
            ThemeCommands::List => commands::theme::list(&config, server).await,
            ThemeCommands::Activate { theme } => {
                commands::theme::activate(&config, server, &theme).await
            }
        },
    }
}
