use clap::{Parser, Subcommand};
use gridprobe::cli;
use gridprobe::config::{ProbeConfig, BASE_URL_ENV};
use gridprobe::error::ProbeResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridprobe")]
#[command(about = "Locate, read and assert cells of a rendered data table")]
#[command(long_about = "gridprobe - cell locator and scenario runner for data-table UIs

Cells are addressed by row index and column name. The column is found
through the header titles; the rendered table puts a number of structural
columns (row controls, star/flag, row number) before the first data column.

COMMANDS:
  resolve      - Physical position and selectors of a cell
  get          - Displayed text of a cell
  assert       - Check the displayed text of a cell
  headers      - List the column headers of a fixture
  run          - Run YAML scenarios
  watch        - Re-run a scenario on file changes
  project-url  - Project page address on the configured instance
  project-id   - Project id from a page location

EXAMPLES:
  gridprobe resolve people.csv 0 Age           # → physical (1, 4)
  gridprobe assert people.csv 2 Age --null     # cell shows \"null\"
  gridprobe run tests/*.yaml")]
#[command(version)]
struct Cli {
    /// YAML config file (base_url, leading_column_count, poll)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Structural columns before the first data column
    #[arg(long, global = true)]
    leading_columns: Option<usize>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the physical coordinate and CSS selectors of a cell
    Resolve {
        /// Fixture file (.csv, .yaml, .json)
        fixture: PathBuf,

        /// Row index (0-based)
        row: usize,

        /// Column header title (exact match)
        column: String,
    },

    /// Print the displayed text of a cell
    Get {
        /// Fixture file (.csv, .yaml, .json)
        fixture: PathBuf,

        /// Row index (0-based)
        row: usize,

        /// Column header title (exact match)
        column: String,
    },

    #[command(long_about = "Check the displayed text of a cell.

The comparison is exact: no trimming, no case folding.
--null expects the literal text \"null\", which is how the table
renders a null cell.")]
    /// Check the displayed text of a cell
    Assert {
        /// Fixture file (.csv, .yaml, .json)
        fixture: PathBuf,

        /// Row index (0-based)
        row: usize,

        /// Column header title (exact match)
        column: String,

        /// Expected text
        #[arg(long, conflicts_with = "null", required_unless_present = "null")]
        equals: Option<String>,

        /// Expect a null cell
        #[arg(long)]
        null: bool,
    },

    /// List the column headers of a fixture
    Headers {
        /// Fixture file (.csv, .yaml, .json)
        fixture: PathBuf,
    },

    #[command(long_about = "Run YAML scenario files.

Each scenario names a fixture (relative to the scenario file) and a list
of steps: resolve, get, assert_cell, assert_not_string, assert_headers.
The first failing step ends its scenario.

EXAMPLE:
  fixture: people.csv
  steps:
    - resolve: { row: 0, column: Age, expect: [1, 4] }
    - assert_cell: { row: 1, column: Age, equals: null }")]
    /// Run YAML scenario files
    Run {
        /// Scenario file(s)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Re-run a scenario whenever it or its fixture changes
    Watch {
        /// Scenario file
        file: PathBuf,
    },

    /// Print the project page address
    ProjectUrl {
        /// Project id
        project_id: String,

        /// Base URL of the application instance
        #[arg(long, env = BASE_URL_ENV)]
        base_url: Option<String>,
    },

    /// Print the project id carried by a page location
    ProjectId {
        /// Page location, e.g. http://localhost:3333/project?project=123
        location: String,
    },
}

fn main() -> ProbeResult<()> {
    let cli = Cli::parse();

    cli::init_logging(cli.verbose);

    let mut config = ProbeConfig::load(cli.config.as_deref())?;
    if let Some(count) = cli.leading_columns {
        config.leading_column_count = count;
    }

    match cli.command {
        Commands::Resolve {
            fixture,
            row,
            column,
        } => cli::resolve(fixture, row, column, &config),

        Commands::Get {
            fixture,
            row,
            column,
        } => cli::get(fixture, row, column, &config),

        Commands::Assert {
            fixture,
            row,
            column,
            equals,
            null: _,
        } => cli::assert_cell(fixture, row, column, equals, &config),

        Commands::Headers { fixture } => cli::headers(fixture, &config),

        Commands::Run { files } => cli::run(files, &config),

        Commands::Watch { file } => cli::watch(file, &config, cli.verbose),

        Commands::ProjectUrl {
            project_id,
            base_url,
        } => {
            let config = config.with_base_url(base_url);
            cli::project_url(project_id, &config)
        }

        Commands::ProjectId { location } => cli::project_id(location),
    }
}
