use crate::config::ProbeConfig;
use crate::core::{PollPolicy, RenderedTable, TableCellLocator};
use crate::error::{ProbeError, ProbeResult};
use crate::fixture;
use crate::navigation;
use crate::scenario::{self, ScenarioReport, StepStatus};
use crate::selectors;
use colored::Colorize;
use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::Duration;

/// Install the tracing subscriber; `RUST_LOG` wins over `verbose`
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "gridprobe=debug"
    } else {
        "gridprobe=warn"
    };
    // A second init (tests, embedding) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Render a fixture and wrap it for a single command
fn render_fixture(fixture: &Path, config: &ProbeConfig) -> ProbeResult<RenderedTable> {
    let grid = fixture::load(fixture)?;
    Ok(RenderedTable::render(&grid, config.layout()))
}

fn fixture_locator<'a>(
    table: &'a RenderedTable,
    config: &ProbeConfig,
) -> TableCellLocator<&'a RenderedTable> {
    config.locator(table).with_poll(PollPolicy::immediate())
}

/// Execute the resolve command
pub fn resolve(fixture: PathBuf, row: usize, column: String, config: &ProbeConfig) -> ProbeResult<()> {
    let table = render_fixture(&fixture, config)?;
    let locator = fixture_locator(&table, config);

    let at = locator.resolve(row, &column)?;

    println!("{}", "📍 Resolved cell".bold().green());
    println!("   Column: {}", column.bright_blue().bold());
    println!("   Row index: {}", row);
    println!("   Physical row: {}", at.row);
    println!("   Physical column: {}", at.column);
    println!("   Cell: {}", selectors::cell(at).cyan());
    println!("   Content: {}", selectors::cell_content(at).cyan());
    Ok(())
}

/// Execute the get command; prints the bare value so it can be piped
pub fn get(fixture: PathBuf, row: usize, column: String, config: &ProbeConfig) -> ProbeResult<()> {
    let table = render_fixture(&fixture, config)?;
    let value = fixture_locator(&table, config).get_value(row, &column)?;
    println!("{value}");
    Ok(())
}

/// Execute the assert command
pub fn assert_cell(
    fixture: PathBuf,
    row: usize,
    column: String,
    equals: Option<String>,
    config: &ProbeConfig,
) -> ProbeResult<()> {
    let table = render_fixture(&fixture, config)?;
    let locator = fixture_locator(&table, config);

    match locator.assert_value(row, &column, equals.as_deref()) {
        Ok(()) => {
            println!(
                "{} row {} of '{}' equals {:?}",
                "✅".green(),
                row,
                column,
                equals.as_deref().unwrap_or("null")
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "❌".red(), e.to_string().red());
            Err(e)
        }
    }
}

/// Execute the headers command
pub fn headers(fixture: PathBuf, config: &ProbeConfig) -> ProbeResult<()> {
    let table = render_fixture(&fixture, config)?;
    let headers = fixture_locator(&table, config).headers()?;

    println!("{}", "📋 Headers:".bold().cyan());
    for (index, title) in headers.iter().enumerate() {
        println!(
            "   {:>3}  {}  (physical column {})",
            index,
            title.bright_blue(),
            index + config.leading_column_count
        );
    }
    Ok(())
}

/// Print a scenario report
fn print_report(report: &ScenarioReport) {
    println!("{} {}", "🧪 Scenario:".bold(), report.name.bright_blue().bold());
    for outcome in &report.outcomes {
        match &outcome.status {
            StepStatus::Passed(None) => {
                println!("   {} {}", "✅".green(), outcome.description);
            }
            StepStatus::Passed(Some(detail)) => {
                println!(
                    "   {} {} {}",
                    "✅".green(),
                    outcome.description,
                    format!("→ {detail}").bright_black()
                );
            }
            StepStatus::Failed(msg) => {
                println!("   {} {}", "❌".red(), outcome.description.red());
                println!("      {}", msg.red());
            }
            StepStatus::Skipped => {
                println!("   {} {}", "⏭ ".yellow(), outcome.description.bright_black());
            }
        }
    }
    println!(
        "   {} passed, {} failed, {} skipped\n",
        report.passed_count().to_string().green(),
        report.failed_count().to_string().red(),
        report.skipped_count().to_string().yellow()
    );
}

/// Execute the run command over one or more scenario files
pub fn run(files: Vec<PathBuf>, config: &ProbeConfig) -> ProbeResult<()> {
    let mut failed = Vec::new();

    for file in &files {
        match scenario::run_file(file, config) {
            Ok(report) => {
                print_report(&report);
                if !report.passed() {
                    failed.push(file.display().to_string());
                }
            }
            Err(e) => {
                eprintln!("{} {}: {}", "❌".red(), file.display(), e.to_string().red());
                failed.push(file.display().to_string());
            }
        }
    }

    if failed.is_empty() {
        println!(
            "{}",
            format!("✅ All {} scenario(s) passed", files.len()).bold().green()
        );
        Ok(())
    } else {
        Err(ProbeError::Validation(format!(
            "{} of {} scenario(s) failed: {}",
            failed.len(),
            files.len(),
            failed.join(", ")
        )))
    }
}

/// Execute the project-url command
pub fn project_url(project_id: String, config: &ProbeConfig) -> ProbeResult<()> {
    let base = config.base_url.as_deref().ok_or_else(|| {
        ProbeError::Validation(format!(
            "No base URL configured (set --base-url or {})",
            crate::config::BASE_URL_ENV
        ))
    })?;
    println!("{}", navigation::project_url(base, &project_id));
    Ok(())
}

/// Execute the project-id command
pub fn project_id(location: String) -> ProbeResult<()> {
    println!("{}", navigation::project_id_from_location(&location)?);
    Ok(())
}

/// Re-run a scenario whenever it or a file next to it changes
pub fn watch(file: PathBuf, config: &ProbeConfig, verbose: bool) -> ProbeResult<()> {
    println!("{}", "👁️  gridprobe - Watch Mode".bold().green());
    println!("   Watching: {}", file.display());
    println!("   Press {} to stop\n", "Ctrl+C".bold().yellow());

    if !file.exists() {
        return Err(ProbeError::Validation(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let canonical_path = file.canonicalize()?;
    let parent_dir = canonical_path
        .parent()
        .ok_or_else(|| ProbeError::Validation("Cannot determine parent directory".to_string()))?;

    let (tx, rx) = channel();

    let mut debouncer = new_debouncer(Duration::from_millis(200), tx)
        .map_err(|e| ProbeError::Validation(format!("Failed to create file watcher: {}", e)))?;

    // The fixture usually sits next to the scenario, so watch the directory
    debouncer
        .watcher()
        .watch(parent_dir, RecursiveMode::NonRecursive)
        .map_err(|e| ProbeError::Validation(format!("Failed to watch directory: {}", e)))?;

    if verbose {
        println!(
            "   {} {}",
            "Watching directory:".cyan(),
            parent_dir.display()
        );
    }

    println!("{}", "🔄 Initial run...".cyan());
    run_watch_action(&file, config);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant = events
                    .iter()
                    .any(|event| event.kind == DebouncedEventKind::Any && is_watched(&event.path));
                if relevant {
                    println!("{}", "🔄 Change detected, re-running...".cyan());
                    run_watch_action(&file, config);
                }
            }
            Ok(Err(e)) => {
                eprintln!("{}", format!("⚠️  Watch error: {}", e).yellow());
            }
            Err(e) => {
                return Err(ProbeError::Validation(format!("Watch channel closed: {}", e)));
            }
        }
    }
}

/// Scenario, config and fixture files
fn is_watched(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml" | "json" | "csv")
    )
}

fn run_watch_action(file: &Path, config: &ProbeConfig) {
    match scenario::run_file(file, config) {
        Ok(report) => print_report(&report),
        Err(e) => eprintln!("{} {}", "❌".red(), e.to_string().red()),
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
