use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use auth::SessionManager;
use clap::Parser;
use common::storage::{FileStore, StorageConfig};
use common::{BackendClient, BackendConfig, telemetry};
use tracing::{error, info};
use upload::{
    LogProgress, ObjectStorage, PhotoRepository, SelectedFile, UploadController, UploadForm,
    UploadSettings,
};

/// Upload a photo to the public gallery
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image file to upload
    file: PathBuf,

    title: String,

    #[arg(default_value = "")]
    description: String,

    /// Comma-separated tags
    #[arg(default_value = "")]
    tags: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init();

    let backend = BackendConfig::load()?;
    let client = BackendClient::new(backend);
    let sessions = SessionManager::new(Arc::new(FileStore::new(&StorageConfig::from_env())));

    if !sessions.is_authenticated() {
        info!("No active session, uploading anonymously");
    }

    let mut controller = UploadController::new(
        ObjectStorage::new(client.clone()),
        PhotoRepository::new(client),
        sessions,
        UploadSettings::from_env(),
    );

    let file = match SelectedFile::from_path(&args.file) {
        Ok(file) => file,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };
    info!("Preview ready ({} bytes of image data)", file.size());
    controller.accept(file);

    let mut form = UploadForm {
        title: args.title,
        description: args.description,
        tags: args.tags,
    };

    match controller.submit(&form, &mut LogProgress).await {
        Ok(receipt) => {
            if let Some(notice) = controller.notice() {
                info!("{}", notice.text);
            }
            info!("Image available at {}", receipt.image_url);
            tokio::time::sleep(receipt.reset_after).await;
            controller.reset(&mut form);
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            Err(e.into())
        }
    }
}
