// src/bin/cli.rs
use tw_monthly::cli;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let summary = cli::run().await?;
    if !summary.failed.is_empty() {
        let names: Vec<&str> = summary.failed.iter().map(|(name, _)| name.as_str()).collect();
        eprintln!("{} report(s) failed for {}: {}", names.len(), summary.period, names.join(", "));
        std::process::exit(2);
    }
    Ok(())
}
