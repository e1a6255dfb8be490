use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use property_finder::admin::ListingDraft;
use property_finder::config::AppConfig;
use property_finder::contact::{display_price, whatsapp_link};
use property_finder::search::{apply_filters, SearchFilters};
use property_finder::sources::{load_listings, FileSource, PropertySource, RestSource};
use property_finder::CanonicalProperty;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "property-finder")]
#[command(about = "Browse property listings and contact sellers on WhatsApp", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read listings from a JSON file of rows instead of the store
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search listings, e.g. "2bhk in pune"
    Search {
        query: Option<String>,

        /// Only listings whose location contains this text
        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        min_price: Option<f64>,

        #[arg(long)]
        max_price: Option<f64>,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one listing in full
    Show { id: String },
    /// Print the WhatsApp link for a listing
    Contact { id: String },
    /// Create, update or delete listings in the store
    Admin {
        #[command(subcommand)]
        action: AdminCommand,
    },
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Create a listing from a draft JSON file
    Create { draft: PathBuf },
    /// Update a listing from a draft JSON file
    Update { id: String, draft: PathBuf },
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `search --json` stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Search {
            query,
            location,
            min_price,
            max_price,
            json,
        } => {
            let listings = fetch(cli.file.as_deref(), &config).await?;
            let filters = SearchFilters {
                query: query.unwrap_or_default(),
                location,
                min_price,
                max_price,
            };
            let found = apply_filters(&listings, &filters);

            if json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                print_results(&filters, &found);
            }
        }
        Commands::Show { id } => {
            let listings = fetch(cli.file.as_deref(), &config).await?;
            print_detail(find(&listings, &id)?);
        }
        Commands::Contact { id } => {
            let listings = fetch(cli.file.as_deref(), &config).await?;
            let link = whatsapp_link(find(&listings, &id)?)?;
            println!("{}", link);
        }
        Commands::Admin { action } => {
            if cli.file.is_some() {
                anyhow::bail!("Admin commands write to the store and cannot be used with --file");
            }
            let store = RestSource::new(&config.store)?;
            match action {
                AdminCommand::Create { draft } => {
                    let listing = read_draft(&draft).await?.validate()?;
                    store.insert(&listing).await?;
                }
                AdminCommand::Update { id, draft } => {
                    let listing = read_draft(&draft).await?.validate()?;
                    store.update(&id, &listing).await?;
                }
                AdminCommand::Delete { id } => store.delete(&id).await?,
            }
        }
    }

    Ok(())
}

async fn fetch(file: Option<&Path>, config: &AppConfig) -> Result<Vec<CanonicalProperty>> {
    let source: Box<dyn PropertySource> = match file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(RestSource::new(&config.store)?),
    };
    load_listings(source.as_ref(), &config.normalize_options())
        .await
        .context("Failed to fetch properties")
}

fn find<'a>(listings: &'a [CanonicalProperty], id: &str) -> Result<&'a CanonicalProperty> {
    listings
        .iter()
        .find(|p| p.id == id)
        .with_context(|| format!("No property with id {}", id))
}

async fn read_draft(path: &Path) -> Result<ListingDraft> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read draft {}", path.display()))?;
    let draft = serde_json::from_str(&json)
        .with_context(|| format!("Invalid draft {}", path.display()))?;
    info!("Read draft from {}", path.display());
    Ok(draft)
}

fn print_results(filters: &SearchFilters, found: &[&CanonicalProperty]) {
    println!("{} Properties Found", found.len());
    if !filters.query.trim().is_empty() {
        println!("Showing results for \"{}\"", filters.query);
    }
    println!();

    if found.is_empty() {
        println!("No properties found");
        println!("Try adjusting your search filters or browse all available properties");
        return;
    }

    for (i, property) in found.iter().enumerate() {
        println!("{}. {} ({})", i + 1, property.title, display_price(property));
        println!("   {}", property.location);
        if !property.bedroom_types.is_empty() {
            let configs: Vec<_> = property
                .bedroom_types
                .iter()
                .map(|b| format!("{} - {} sq ft", b.kind, b.sqft))
                .collect();
            println!("   {}", configs.join(", "));
        }
        println!("   ID: {}", property.id);
        println!();
    }
}

fn print_detail(property: &CanonicalProperty) {
    println!("{}", property.title);
    println!("{}", property.location);
    println!("Price: {}", display_price(property));
    println!("Type: {}", property.property_type);

    if !property.bedroom_types.is_empty() {
        println!();
        println!("Configurations:");
        for b in &property.bedroom_types {
            println!("  {} - {} sq ft", b.kind, b.sqft);
        }
    }
    if !property.description.is_empty() {
        println!();
        println!("{}", property.description);
    }
    if !property.amenities.is_empty() {
        println!();
        println!("Amenities: {}", property.amenities.join(", "));
    }

    println!();
    println!("Images:");
    for url in &property.images {
        println!("  {}", url);
    }
    for url in &property.brochure_urls {
        println!("Brochure: {}", url);
    }
    if let Some(link) = &property.google_maps_link {
        println!("Map: {}", link);
    }
    if let Some(link) = &property.youtube_video_url {
        println!("Video: {}", link);
    }
    match whatsapp_link(property) {
        Ok(link) => println!("WhatsApp: {}", link),
        Err(e) => println!("WhatsApp: unavailable ({})", e),
    }
}
