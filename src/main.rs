use anyhow::Context;
use clap::Parser;
use file_zipper::core::grouping;
use file_zipper::utils::monitor::SystemMonitor;
use file_zipper::utils::{logger, validation::Validate};
use file_zipper::{archive, ArchiveError, ArchivePlan, ArchiveReport, CliConfig};
use std::path::Path;
use std::process::Command;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_logger(config.verbose, config.json_logs);

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let mut monitor = SystemMonitor::new(config.monitor);
    if monitor.is_enabled() {
        tracing::info!("🔍 System monitoring enabled");
    }

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no archives will be written");
        let input_dir = config.input_dir().unwrap_or(Path::new(""));
        let output_dir = config.output_dir().unwrap_or(Path::new(""));
        match grouping::plan(input_dir) {
            Ok(plan) => print_plan(&plan, output_dir, config.json)?,
            Err(e) => fail(&e),
        }
        monitor.log_final_stats();
        return Ok(());
    }

    monitor.log_stats("Start");
    let report = match archive(config.input_dir(), config.output_dir()) {
        Ok(report) => report,
        Err(e) => fail(&e),
    };
    monitor.log_final_stats();

    print_report(&report, config.json)?;

    if config.open {
        open_directory(&report.output_dir)
            .with_context(|| format!("Failed to open {}", report.output_dir.display()))?;
    }

    Ok(())
}

fn fail(e: &ArchiveError) -> ! {
    tracing::error!(
        "❌ Zipping failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn print_report(report: &ArchiveReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("✅ Zip files created successfully.");
    println!(
        "📁 {} archives written to {}",
        report.archive_count(),
        report.output_dir.display()
    );
    Ok(())
}

fn print_plan(plan: &ArchivePlan, output_dir: &Path, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(plan.groups())?);
        return Ok(());
    }

    for group in plan {
        println!("{}", output_dir.join(group.archive_name()).display());
        for entry in &group.entries {
            println!("  {}", entry.file_name);
        }
    }
    println!("{} archives from {} files", plan.len(), plan.file_count());
    Ok(())
}

/// Opens `dir` in the platform file browser without waiting for it.
fn open_directory(dir: &Path) -> std::io::Result<()> {
    tracing::debug!("Opening {}", dir.display());

    #[cfg(target_os = "windows")]
    let mut command = Command::new("explorer");
    #[cfg(target_os = "macos")]
    let mut command = Command::new("open");
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let mut command = Command::new("xdg-open");

    command.arg(dir).spawn()?;
    Ok(())
}
