//! Command-line entry point: fill in the create-product form and submit it once.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use shopadmin_client::{ConsoleFeedback, FormSubmitter, HttpProductApi, SubmitEvent, SubmitterConfig};
use shopadmin_products::{FormFields, ImageAttachment};

/// Create a product through the admin Product API.
///
/// Endpoint, redirect target, and CSRF token come from `SHOPADMIN_*`
/// environment variables.
#[derive(Parser, Debug)]
#[command(name = "shopadmin-create-product")]
struct Cli {
    /// Product name (required)
    #[arg(long, default_value = "")]
    name: String,

    /// Free-text description
    #[arg(long, default_value = "")]
    description: String,

    /// Price as typed into the form; unparsable values become 0
    #[arg(long, default_value = "")]
    price: String,

    /// Category identifier (required)
    #[arg(long, default_value = "")]
    category: String,

    /// Image file to upload
    #[arg(long)]
    image: Option<PathBuf>,

    /// MIME type of the image (e.g. image/png)
    #[arg(long, requires = "image")]
    image_type: Option<String>,
}

async fn load_image(path: &Path, content_type: Option<String>) -> anyhow::Result<ImageAttachment> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let mut image = ImageAttachment::new(file_name, bytes);
    if let Some(content_type) = content_type {
        image = image.with_content_type(content_type);
    }
    Ok(image)
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = SubmitterConfig::from_env().context("invalid SHOPADMIN_* configuration")?;
    let api = HttpProductApi::new(config.timeout).context("failed to build HTTP client")?;

    let mut form = FormFields::new(cli.name, cli.category)
        .with_description(cli.description)
        .with_price(cli.price);
    if let Some(path) = &cli.image {
        form = form.with_image(load_image(path, cli.image_type).await?);
    }

    tracing::info!(endpoint = %config.create_endpoint, "submitting product form");

    let submitter = FormSubmitter::new(config, api, ConsoleFeedback);
    let mut event = SubmitEvent::new();
    let outcome = submitter.handle_submit(&mut event, &form).await;

    Ok(outcome.is_created())
}

#[tokio::main]
async fn main() -> ExitCode {
    shopadmin_observability::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "create-product failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
