mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use larder_core::models::Difficulty;
use larder_core::ClientConfig;

#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Recipe platform admin console", long_about = None)]
struct Cli {
    /// Backend URL (default: $LARDER_API_URL or http://localhost:8080)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Bearer token (default: $LARDER_API_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the ingredient catalogue
    Ingredients {
        #[command(subcommand)]
        action: IngredientAction,
    },
    /// Manage recipes
    Recipes {
        #[command(subcommand)]
        action: RecipeAction,
    },
    /// Manage the ingredients of a recipe
    RecipeIngredients {
        #[command(subcommand)]
        action: RecipeIngredientAction,
    },
    /// Manage the steps of a recipe
    RecipeSteps {
        #[command(subcommand)]
        action: RecipeStepAction,
    },
    /// Browse categories and sub-categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Print the dashboard statistic cards
    Dashboard {
        /// Unread notification count to badge
        #[arg(long, default_value_t = 0)]
        unread: u32,
    },
    /// End the session, revoking the token when a logout endpoint is configured
    Logout,
}

#[derive(Subcommand)]
pub enum IngredientAction {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0.0)]
        calories: f64,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 0.0)]
        calories: f64,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum RecipeAction {
    List {
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
        /// Only recipes in this sub-category
        #[arg(long)]
        sub_category: Option<i64>,
    },
    Search {
        keyword: String,
    },
    Create {
        #[arg(long)]
        sub_category: i64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// EASY, MEDIUM or HARD
        #[arg(long)]
        difficulty: Difficulty,
        /// Minutes
        #[arg(long)]
        cooking_time: u32,
        /// Cover image file
        #[arg(long)]
        image: PathBuf,
    },
    Update {
        id: i64,
        #[arg(long)]
        sub_category: i64,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        difficulty: Difficulty,
        #[arg(long)]
        cooking_time: u32,
        /// Replacement cover image
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Flip a recipe between published and hidden
    ToggleStatus {
        id: i64,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum RecipeIngredientAction {
    List {
        recipe: i64,
    },
    Add {
        #[arg(long)]
        recipe: i64,
        #[arg(long)]
        ingredient: i64,
        #[arg(long)]
        quantity: f64,
    },
    Update {
        #[arg(long, default_value = "")]
        recipe: String,
        #[arg(long, default_value = "")]
        ingredient: String,
        #[arg(long)]
        quantity: f64,
    },
    Remove {
        #[arg(long, default_value = "")]
        recipe: String,
        #[arg(long, default_value = "")]
        ingredient: String,
    },
}

#[derive(Subcommand)]
pub enum RecipeStepAction {
    List {
        recipe: i64,
    },
    Add {
        #[arg(long)]
        recipe: i64,
        #[arg(long)]
        step: u32,
        #[arg(long)]
        description: String,
        /// Minutes to wait after this step
        #[arg(long)]
        waiting_time: Option<u32>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Update {
        #[arg(long, default_value = "")]
        recipe: String,
        #[arg(long, default_value = "")]
        step: String,
        /// Move the step to this number (default: keep it)
        #[arg(long)]
        new_step: Option<u32>,
        #[arg(long)]
        description: String,
        #[arg(long)]
        waiting_time: Option<u32>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete {
        /// Step id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum CategoryAction {
    List,
    SubCategories {
        category: i64,
    },
}

fn init_telemetry() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(server: Option<String>, token: Option<String>) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("Invalid LARDER_* environment")?;
    if let Some(server) = server {
        config = config
            .with_base_url(&server)
            .with_context(|| format!("Invalid --server {:?}", server))?;
    }
    if token.is_some() {
        config = config.with_token(token);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_telemetry();

    let cli = Cli::parse();
    let config = load_config(cli.server, cli.token)?;
    let console = commands::Console::new(&config)?;

    match cli.command {
        Commands::Ingredients { action } => console.ingredients(action).await,
        Commands::Recipes { action } => console.recipes(action).await,
        Commands::RecipeIngredients { action } => console.recipe_ingredients(action).await,
        Commands::RecipeSteps { action } => console.recipe_steps(action).await,
        Commands::Categories { action } => console.categories(action).await,
        Commands::Dashboard { unread } => console.dashboard(unread).await,
        Commands::Logout => console.logout().await,
    }
}
