use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use content_aggregator::{
    AppConfig, Content, ContentCategory, ContentTypeFilter, DashboardSession, FeedStatus,
    FeedView, HttpGateway, JsonFileSnapshotStore, Theme, ERROR_HEADLINE, ERROR_HINT,
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "content-aggregator", about = "Personalized content dashboard feed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch all sources and print the filtered feed
    Feed {
        /// Case-insensitive search over titles and descriptions
        #[arg(long, default_value = "")]
        search: String,
        /// Print the feed view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage favorited content
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Show or change preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),
}

#[derive(Subcommand, Debug)]
enum FavoritesCommand {
    List,
    /// Favorite an item from the current feed by id
    Add { id: String },
    Remove { id: String },
    Clear,
}

#[derive(Subcommand, Debug)]
enum PrefsCommand {
    Show,
    ToggleCategory { category: ContentCategory },
    SetCategories { categories: Vec<ContentCategory> },
    ClearCategories,
    ContentType { filter: ContentTypeFilter },
    ToggleFavoritesOnly,
    ToggleDarkMode,
    DarkMode { state: Switch },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Switch {
    On,
    Off,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("failed to load configuration")?;
    info!("Using state directory {}", config.state_dir.display());

    let gateway = HttpGateway::from_config(&config).context("failed to build provider gateway")?;
    let snapshots = JsonFileSnapshotStore::new(config.state_dir.clone());
    let (theme_tx, theme_rx) = watch::channel(Theme::default());

    let mut session = DashboardSession::from_config(&config, Arc::new(gateway), Arc::new(snapshots))
        .with_theme_signal(Arc::new(theme_tx));
    session.hydrate();

    match cli.command {
        Commands::Feed { search, json } => {
            session.refresh().await;
            let view = session.view(&search).await;
            if json {
                let rendered = serde_json::to_string_pretty(&view).context("failed to render feed")?;
                println!("{}", rendered);
            } else {
                print_feed(&view, &session);
            }
        }
        Commands::Favorites(command) => run_favorites(command, &mut session).await?,
        Commands::Prefs(command) => {
            run_prefs(command, &mut session);
            println!("theme: {}", *theme_rx.borrow());
        }
    }

    Ok(())
}

async fn run_favorites(command: FavoritesCommand, session: &mut DashboardSession) -> Result<()> {
    match command {
        FavoritesCommand::List => {
            for item in session.favorites().items() {
                print_item(item, true);
            }
            println!("{} favorites", session.favorites().len());
        }
        FavoritesCommand::Add { id } => {
            session.refresh().await;
            let content = session
                .find_content(&id)
                .await
                .with_context(|| format!("no content with id {} in the current feed", id))?;
            session.favorites_mut().add(content);
            println!("favorited {}", id);
        }
        FavoritesCommand::Remove { id } => {
            session.favorites_mut().remove(&id);
            println!("removed {}", id);
        }
        FavoritesCommand::Clear => {
            session.favorites_mut().clear();
            println!("favorites cleared");
        }
    }
    Ok(())
}

fn run_prefs(command: PrefsCommand, session: &mut DashboardSession) {
    let preferences = session.preferences_mut();
    match command {
        PrefsCommand::Show => {}
        PrefsCommand::ToggleCategory { category } => preferences.toggle_category(category),
        PrefsCommand::SetCategories { categories } => preferences.set_categories(categories),
        PrefsCommand::ClearCategories => preferences.clear_categories(),
        PrefsCommand::ContentType { filter } => preferences.set_content_type_filter(filter),
        PrefsCommand::ToggleFavoritesOnly => preferences.toggle_favorites_only(),
        PrefsCommand::ToggleDarkMode => preferences.toggle_dark_mode(),
        PrefsCommand::DarkMode { state } => preferences.set_dark_mode(matches!(state, Switch::On)),
    }

    let current = preferences.preferences();
    let categories: Vec<&str> = current.categories.iter().map(|c| c.as_str()).collect();
    println!("categories: {}", categories.join(", "));
    println!("content type: {}", current.content_type_filter);
    println!("favorites only: {}", current.show_favorites_only);
    println!("dark mode: {}", current.dark_mode);
}

fn print_feed(view: &FeedView, session: &DashboardSession) {
    match &view.status {
        FeedStatus::Loading => println!("{}", content_aggregator::LOADING_MESSAGE),
        FeedStatus::Error(failures) => {
            println!("{}", ERROR_HEADLINE);
            println!("{}", ERROR_HINT);
            for (source, failure) in failures {
                println!("  {}: {}", source, failure);
            }
        }
        FeedStatus::Ready => {}
    }

    if let Some(reason) = &view.empty_reason {
        println!("{}", reason.headline());
        println!("{}", reason.hint());
        return;
    }

    for item in &view.items {
        print_item(item, session.favorites().is_favorite(item.id()));
    }
    println!("{}", view.result_count());
}

fn print_item(item: &Content, favorite: bool) {
    let star = if favorite { "*" } else { " " };
    let category = item.category().map(|c| c.as_str()).unwrap_or("-");
    println!(
        "{} [{}] {:<13} {} ({})",
        star,
        item.kind(),
        category,
        item.title(),
        item.id()
    );
}
