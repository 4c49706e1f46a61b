use anyhow::Context;
use clap::Parser;
use resume_etl::core::Pipeline;
use resume_etl::utils::error::ErrorSeverity;
use resume_etl::utils::{logger, validation::Validate};
use resume_etl::{EtlEngine, LocalStorage, ResumePipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Résumé ETL driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "resume-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override worker count from config
    #[arg(long)]
    workers: Option<usize>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Dry run - list the documents that would be parsed without parsing them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based résumé ETL");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(workers) = args.workers {
        config.batch.workers = Some(workers);
        tracing::info!("🔧 Worker count overridden to: {}", workers);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.load.output_path.clone());
    let pipeline = ResumePipeline::new(storage, config)
        .with_context(|| format!("failed to build pipeline from '{}'", args.config))?;

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&pipeline).await?;
        return Ok(());
    }

    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ ETL process completed successfully!");
            println!("✅ ETL process completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Input: {}", config.input.dir);
    if config.input.extensions.is_empty() {
        println!("  Extensions: all files");
    } else {
        println!("  Extensions: {}", config.input.extensions.join(", "));
    }
    println!(
        "  Skills: {}",
        config.parser.skills_file.as_deref().unwrap_or("built-in list")
    );
    println!("  Workers: {}", config.workers());
    println!("  Output: {}", config.load.output_path);
    println!("  Formats: {}", config.load.output_formats.join(", "));
    if config.load.archive {
        println!("  Archive: resumes.zip");
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(pipeline: &impl Pipeline) -> anyhow::Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!();

    let documents = pipeline.extract().await?;
    println!("📄 Documents found: {}", documents.len());
    for doc in &documents {
        let ext = if doc.extension.is_empty() { "none" } else { doc.extension.as_str() };
        println!("  {} ({})", doc.display_path(), ext);
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
