use anyhow::{Context, anyhow, bail};
use clap::Parser;
use infogen_fetch::generation::{
    GeneratedImage, GenerationClient, GenerationConfig, InlineData, PromptSource, build_prompt,
    infographic_request,
};
use infogen_fetch::results::PageContent;
use infogen_fetch::server::{self, AppState};
use infogen_fetch::utils::sanitize_filename;
use infogen_fetch::{ReqwestClient, ServerConfig, fetch_source, looks_like_url};
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod args;
use args::{Args, Command, GenerateArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Serve { bind } => run_server(config, bind).await,
        Command::Fetch { url, pretty } => {
            let page = fetch(&config, &url).await?;
            let json = if pretty {
                serde_json::to_string_pretty(&page)?
            } else {
                serde_json::to_string(&page)?
            };
            println!("{}", json);
            Ok(())
        }
        Command::Prompt { source, style } => {
            let page = fetch_if_url(&config, &source).await?;
            let generation = GenerationConfig::from(style);
            println!(
                "{}",
                build_prompt(&generation, prompt_source(&page, Some(&source)))
            );
            Ok(())
        }
        Command::Generate(args) => generate(&config, args).await,
        Command::Video { prompt, image } => video(&config, &prompt, image.as_deref()).await,
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServerConfig> {
    let config = match path {
        Some(path) => ServerConfig::from_file(path)
            .map_err(|e| anyhow!("Failed to load config {}: {}", path.display(), e))?,
        None => ServerConfig::default(),
    };

    Ok(config.with_env_overrides())
}

async fn run_server(config: ServerConfig, bind: Option<String>) -> anyhow::Result<()> {
    let bind_addr = bind.unwrap_or(config.bind_addr);
    let client = ReqwestClient::new(&config.fetch)?;
    let state = AppState::new(Arc::new(client), config.fetch);

    ::log::info!("Starting API server on {}", bind_addr);
    server::serve(&bind_addr, state)
        .await
        .with_context(|| format!("Server on {} failed", bind_addr))
}

async fn fetch(config: &ServerConfig, url: &str) -> anyhow::Result<PageContent> {
    let client = ReqwestClient::new(&config.fetch)?;
    let page = fetch_source(&client, url, &config.fetch).await?;
    Ok(page)
}

/// Fetch the source when it looks like a URL; otherwise it is pasted text
async fn fetch_if_url(config: &ServerConfig, source: &str) -> anyhow::Result<Option<PageContent>> {
    if looks_like_url(source) {
        Ok(Some(fetch(config, source).await?))
    } else {
        ::log::info!("Source does not look like a URL, using it as text");
        Ok(None)
    }
}

/// Fetched page, then pasted text; with neither the images are the source
fn prompt_source<'a>(page: &'a Option<PageContent>, source: Option<&'a str>) -> PromptSource<'a> {
    match (page, source) {
        (Some(page), _) => PromptSource::Page(page),
        (None, Some(text)) => PromptSource::Text(text),
        (None, None) => PromptSource::Slides,
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

async fn read_image(path: &Path) -> anyhow::Result<InlineData> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    Ok(InlineData::from_bytes(mime_for_path(path), &bytes))
}

/// Output location for one image; variations get a `-<n>` suffix
fn output_path(
    output: Option<&Path>,
    title: &str,
    image: &GeneratedImage,
    variation: Option<usize>,
) -> PathBuf {
    let suffix = variation.map(|n| format!("-{}", n)).unwrap_or_default();

    match output {
        Some(path) if variation.is_none() => path.to_path_buf(),
        Some(path) => {
            let stem = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("infographic");
            let ext = path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or(image.extension());
            path.with_file_name(format!("{}{}.{}", stem, suffix, ext))
        }
        None => PathBuf::from(format!(
            "{}{}.{}",
            sanitize_filename(title),
            suffix,
            image.extension()
        )),
    }
}

async fn write_image(image: &GeneratedImage, path: &Path) -> anyhow::Result<()> {
    let bytes = image
        .decode()
        .context("Model returned invalid base64 image data")?;

    tokio::fs::write(path, &bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    ::log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    println!("{}", path.display());
    Ok(())
}

async fn generate(config: &ServerConfig, args: GenerateArgs) -> anyhow::Result<()> {
    if args.source.is_none() && args.images.is_empty() {
        bail!("Nothing to summarize: pass a URL, some text, or at least one --image");
    }

    let page = match args.source.as_deref() {
        Some(source) => fetch_if_url(config, source).await?,
        None => None,
    };

    let mut images = Vec::with_capacity(args.images.len());
    for path in &args.images {
        images.push(read_image(path).await?);
    }

    let reference = match args.reference.as_deref() {
        Some(path) => Some(read_image(path).await?),
        None => None,
    };

    let generation = GenerationConfig::from(args.style);
    let request = infographic_request(
        &generation,
        prompt_source(&page, args.source.as_deref()),
        &images,
        reference.as_ref(),
        &config.generation.image_size,
    );

    let title = page
        .as_ref()
        .map(|page| page.title.as_str())
        .filter(|title| !title.is_empty())
        .unwrap_or("infographic");

    let client = GenerationClient::new(config.generation.clone())?;

    if args.count <= 1 {
        let image = client.generate_image(&request).await?;
        let path = output_path(args.output.as_deref(), title, &image, None);
        return write_image(&image, &path).await;
    }

    let variations = client
        .generate_variations(&request, args.count as usize)
        .await;
    if variations.is_empty() {
        bail!("All {} variations failed", args.count);
    }

    for (index, image) in variations.iter().enumerate() {
        let path = output_path(args.output.as_deref(), title, image, Some(index + 1));
        write_image(image, &path).await?;
    }
    Ok(())
}

async fn video(config: &ServerConfig, prompt: &str, image: Option<&Path>) -> anyhow::Result<()> {
    let image = match image {
        Some(path) => Some(read_image(path).await?),
        None => None,
    };

    let client = GenerationClient::new(config.generation.clone())?;
    let video = client.generate_video(prompt, image.as_ref()).await?;
    println!("{}", video.uri);
    Ok(())
}
