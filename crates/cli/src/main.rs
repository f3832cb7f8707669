use clap::Parser;
use quadsweep::CancellationToken;
use quadsweep_cli::{Args, Settings, run};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "quadsweep=info,quadsweep_client=info,quadsweep_cli=info,info".into()
            }),
        )
        .init();

    let args = Args::parse();
    let settings = Settings::load(&args)?;

    info!(
        "Sweeping {} via {} (max depth {}, {} concurrent requests)",
        settings.region,
        settings.endpoint,
        settings.crawl.max_depth,
        settings.crawl.max_concurrent_requests
    );

    let stop = CancellationToken::new();
    let signal = stop.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Stop requested, letting in-flight requests finish...");
            signal.cancel();
        }
    });

    let summary = run(&settings, stop).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
