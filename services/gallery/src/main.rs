use anyhow::Result;
use clap::{Parser, Subcommand};
use common::{BackendClient, BackendConfig, telemetry};
use gallery::{GalleryController, GallerySettings, PhotoRepository, TagFilter, ViewState};
use tracing::info;

/// Browse the public photo gallery
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Log the photos, optionally narrowed to one tag
    List { tag: Option<String> },
    /// Print the filter bar and grid markup
    Render { tag: Option<String> },
}

impl Command {
    fn filter(&self) -> TagFilter {
        match self {
            Command::List { tag } | Command::Render { tag } => {
                tag.as_deref().map(TagFilter::from_key).unwrap_or(TagFilter::All)
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init();

    let backend = BackendConfig::load()?;
    let repository = PhotoRepository::new(BackendClient::new(backend));
    let mut controller = GalleryController::new(repository);

    controller.load().await?;
    controller.filter_by(args.command.filter());

    match args.command {
        Command::List { .. } => {
            if *controller.view() == ViewState::Empty {
                info!("No photos");
            }
            for photo in controller.visible() {
                info!(
                    "{} | {} | [{}]",
                    photo.title,
                    photo.image_url,
                    photo.tags.join(", ")
                );
            }
        }
        Command::Render { .. } => {
            let settings = GallerySettings::from_env();
            for position in 0..settings.eager_cards {
                controller.on_visibility(position, true);
            }

            println!("<nav class=\"tag-filters\">{}</nav>", controller.filters_html());
            println!("<section class=\"photo-grid\">{}</section>", controller.grid_html());
            info!("{} images left for lazy loading", controller.pending_images());
        }
    }

    Ok(())
}
