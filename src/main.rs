use clap::Parser;
use std::path::Path;
use swiss_vote_explorer::config::LogFormat;
use swiss_vote_explorer::core::report;
use swiss_vote_explorer::utils::logger;
use swiss_vote_explorer::utils::monitor::RunMonitor;
use swiss_vote_explorer::utils::validation::Validate;
use swiss_vote_explorer::{
    CatalogueExporter, CliConfig, Command, ExplorerConfig, ExplorerError, ListFilter,
    LocalStorage, OpenDataClient, SpaceManifest, VoteExplorer,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting swiss-vote-explorer");
    tracing::debug!("CLI config: {:?}", cli);

    let mut monitor = RunMonitor::new(cli.monitor);
    let result = run(&cli, &mut monitor).await;
    monitor.log_final_stats();

    if let Err(e) = result {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}

fn build_explorer(config: &ExplorerConfig) -> Result<VoteExplorer<OpenDataClient>, ExplorerError> {
    Ok(VoteExplorer::new(
        OpenDataClient::from_config(config)?,
        config.display.language.clone(),
    ))
}

async fn run(cli: &CliConfig, monitor: &mut RunMonitor) -> Result<(), ExplorerError> {
    match &cli.command {
        Command::List { limit, since, json } => {
            let explorer = build_explorer(&cli.resolve()?)?;
            let filter = ListFilter {
                since: *since,
                limit: *limit,
            };
            let votes = explorer.list_votes(&filter).await?;
            monitor.checkpoint("fetch catalogue");

            if *json {
                println!("{}", serde_json::to_string_pretty(&votes)?);
            } else {
                print!("{}", report::CatalogueReport(&votes));
            }
        }
        Command::Summary { proposal, json } => {
            let explorer = build_explorer(&cli.resolve()?)?;
            let summary = explorer.summarize(proposal).await?;
            monitor.checkpoint("fetch results");

            if *json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", report::SummaryReport(&summary));
            }
        }
        Command::Export { .. } => {
            let config = cli.resolve()?;
            export(&build_explorer(&config)?, &config, monitor).await?;
        }
        // manifest 檢查不需要 API 配置
        Command::Manifest { path } => check_manifest(path)?,
    }

    Ok(())
}

async fn export(
    explorer: &VoteExplorer<OpenDataClient>,
    config: &ExplorerConfig,
    monitor: &mut RunMonitor,
) -> Result<(), ExplorerError> {
    let votes = explorer.list_votes(&ListFilter::default()).await?;
    monitor.checkpoint("fetch catalogue");

    let storage = LocalStorage::new(config.export.output_path.clone());
    let exporter = CatalogueExporter::new(
        storage,
        config.output_formats()?,
        config.export.archive_name.clone(),
    );
    let report = exporter.export(&votes).await?;
    monitor.checkpoint("export");

    tracing::info!("✅ Export completed: {} records", report.records);
    println!("✅ Exported {} votes ({})", report.records, report.files.join(", "));
    println!("📁 Output saved to: {}", report.archive_path);
    Ok(())
}

fn check_manifest(path: &str) -> Result<(), ExplorerError> {
    tracing::info!("📁 Loading Space manifest from: {}", path);
    let document = SpaceManifest::from_file(path)?;
    let manifest = &document.manifest;
    manifest.validate()?;

    let base_dir = Path::new(path).parent().unwrap_or_else(|| Path::new("."));
    println!("✅ Manifest is valid: {}", manifest.title);
    println!("   SDK: {} {}", manifest.sdk.as_str(), manifest.sdk_version.as_deref().unwrap_or(""));
    if !manifest.tags.is_empty() {
        println!("   Tags: {}", manifest.tags.join(", "));
    }

    if manifest.app_file.is_some() {
        let entry_point = manifest.check_entry_point(base_dir)?;
        println!("   Entry point: {}", entry_point.display());
    }
    Ok(())
}
