use anyhow::Result;
use std::sync::Arc;
use vocabot::gateway::{telegram, TelegramGateway};
use vocabot::morph::{CachedNormalizer, Normalizer, RemoteNormalizer, SimpleNormalizer};
use vocabot::{Config, Dialog, Vocabulary};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger from environment variable or default to info level
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("run");

    match command {
        "check" => {
            // Eager vocabulary lint; exits non-zero on findings
            let path = args
                .get(2)
                .map(String::as_str)
                .ok_or_else(|| anyhow::anyhow!("Usage: vocabot check <voc.yaml>"))?;
            run_check(path)?;
        }
        _ => {
            run_bot().await?;
        }
    }

    Ok(())
}

/// Load everything and start long-polling.
async fn run_bot() -> Result<()> {
    log::info!("Starting vocabot v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    let token = config.token()?;

    let voc = Arc::new(Vocabulary::load(&config.bot.voc)?);
    log::info!(
        "Vocabulary loaded: {} nodes, default '{}'",
        voc.nodes.len(),
        voc.default_node()
    );
    for finding in voc.validate() {
        log::warn!("Vocabulary lint: {}", finding);
    }

    let normalizer = build_normalizer(&config);
    let gateway = Arc::new(TelegramGateway::new(
        &config.bot.api_base,
        &token,
        config.bot.poll_timeout_secs,
    ));

    let dialog = Arc::new(Dialog::new(voc, gateway.clone(), normalizer));
    telegram::run(dialog, gateway).await?;

    Ok(())
}

/// Build the configured normalizer, wrapped in an LRU word cache when
/// cache_capacity > 0 (avoids re-normalizing the same trigger words every
/// turn).
fn build_normalizer(config: &Config) -> Arc<dyn Normalizer> {
    let inner: Arc<dyn Normalizer> = match &config.morph.endpoint {
        Some(endpoint) if !endpoint.is_empty() => {
            log::info!("Using remote morphology service at {}", endpoint);
            Arc::new(RemoteNormalizer::new(
                endpoint.clone(),
                config.morph.lang.clone(),
            ))
        }
        _ => {
            log::info!("Using built-in suffix-stripping normalizer");
            Arc::new(SimpleNormalizer::new())
        }
    };

    if config.morph.cache_capacity > 0 {
        Arc::new(CachedNormalizer::new(inner, config.morph.cache_capacity))
    } else {
        inner
    }
}

/// Lint a vocabulary file and print every finding.
fn run_check(path: &str) -> Result<()> {
    let voc = Vocabulary::load(path)?;
    let findings = voc.validate();

    if findings.is_empty() {
        println!(
            "{}: OK ({} nodes, default '{}')",
            path,
            voc.nodes.len(),
            voc.default_node()
        );
        return Ok(());
    }

    for finding in &findings {
        println!("{}: {}", path, finding);
    }
    anyhow::bail!("{} finding(s) in {}", findings.len(), path)
}
