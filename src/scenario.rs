//! YAML scenarios: a fixture plus an ordered list of locator steps
//!
//! ```yaml
//! name: people table
//! fixture: people.csv        # relative to the scenario file
//! settings:
//!   leading_column_count: 3
//! steps:
//!   - resolve: { row: 0, column: Age, expect: [1, 4] }
//!   - get: { row: 0, column: Name }
//!   - assert_cell: { row: 0, column: Age, equals: "30" }
//!   - assert_cell: { row: 2, column: Age, equals: null }
//!   - assert_not_string: { row: 0, column: Age }
//!   - assert_headers: [Name, Age, City]
//! ```
//!
//! Steps run in order. The first failing step ends the scenario; the steps
//! after it are reported as skipped.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::ProbeConfig;
use crate::core::{GridQuery, PollPolicy, RenderedTable, TableCellLocator};
use crate::error::{ProbeError, ProbeResult};
use crate::fixture;
use crate::selectors;
use crate::types::{CellValue, PhysicalCoordinate};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub fixture: PathBuf,
    #[serde(default)]
    pub settings: ScenarioSettings,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

/// Per-scenario overrides of [`ProbeConfig`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioSettings {
    pub leading_column_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Resolve a cell, optionally checking the physical `[row, column]`
    Resolve {
        row: usize,
        column: String,
        #[serde(default)]
        expect: Option<[usize; 2]>,
    },
    /// Read a cell and report its text
    Get { row: usize, column: String },
    /// `equals: null` (or no `equals`) expects the literal text "null"
    AssertCell {
        row: usize,
        column: String,
        #[serde(default)]
        equals: Option<CellValue>,
    },
    AssertNotString { row: usize, column: String },
    AssertHeaders(Vec<String>),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Step::Resolve { row, column, .. } => write!(f, "resolve row {row} of '{column}'"),
            Step::Get { row, column } => write!(f, "get row {row} of '{column}'"),
            Step::AssertCell {
                row,
                column,
                equals,
            } => write!(
                f,
                "assert row {row} of '{column}' equals {:?}",
                expected_text(equals.as_ref()).unwrap_or("null")
            ),
            Step::AssertNotString { row, column } => {
                write!(f, "assert row {row} of '{column}' is not a string")
            }
            Step::AssertHeaders(headers) => write!(f, "assert headers [{}]", headers.join(", ")),
        }
    }
}

/// Expected text of an `assert_cell` step; `None` selects the null rule
fn expected_text(equals: Option<&CellValue>) -> Option<&str> {
    match equals {
        None | Some(CellValue::Null) => None,
        Some(value) => Some(value.display_text()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// Passed, with an optional detail (resolved position, read value)
    Passed(Option<String>),
    Failed(String),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub index: usize,
    pub description: String,
    pub status: StepStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub name: String,
    pub outcomes: Vec<StepOutcome>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| matches!(o.status, StepStatus::Passed(_)))
    }

    pub fn passed_count(&self) -> usize {
        self.count(|s| matches!(s, StepStatus::Passed(_)))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, StepStatus::Failed(_)))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|s| matches!(s, StepStatus::Skipped))
    }

    fn count(&self, pred: impl Fn(&StepStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

pub fn parse_scenario(content: &str) -> ProbeResult<Scenario> {
    let scenario: Scenario = serde_yaml::from_str(content)?;
    if scenario.steps.is_empty() {
        return Err(ProbeError::Validation(
            "Scenario has no steps".to_string(),
        ));
    }
    Ok(scenario)
}

pub fn load_scenario(path: &Path) -> ProbeResult<Scenario> {
    parse_scenario(&std::fs::read_to_string(path)?)
}

/// Load a scenario file and run it against its fixture
pub fn run_file(path: &Path, config: &ProbeConfig) -> ProbeResult<ScenarioReport> {
    let mut scenario = load_scenario(path)?;
    if scenario.name.is_none() {
        scenario.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string);
    }
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    run_scenario(&scenario, base_dir, config)
}

/// Run `scenario`, resolving its fixture path against `base_dir`.
///
/// Fixture errors fail the whole run; step failures land in the report.
pub fn run_scenario(
    scenario: &Scenario,
    base_dir: &Path,
    config: &ProbeConfig,
) -> ProbeResult<ScenarioReport> {
    let name = scenario
        .name
        .clone()
        .unwrap_or_else(|| scenario.fixture.display().to_string());
    info!(scenario = %name, steps = scenario.steps.len(), "running scenario");

    let grid = fixture::load(&base_dir.join(&scenario.fixture))?;

    let mut config = config.clone();
    if let Some(count) = scenario.settings.leading_column_count {
        config.leading_column_count = count;
    }

    // A fixture never changes under us, so waiting cannot change an outcome
    let table = RenderedTable::render(&grid, config.layout());
    let locator = config.locator(&table).with_poll(PollPolicy::immediate());

    Ok(ScenarioReport {
        name,
        outcomes: run_steps(&locator, &scenario.steps),
    })
}

/// Run `steps` in order, stopping at the first failure
pub fn run_steps<Q: GridQuery>(locator: &TableCellLocator<Q>, steps: &[Step]) -> Vec<StepOutcome> {
    let mut outcomes = Vec::with_capacity(steps.len());
    let mut failed = false;

    for (index, step) in steps.iter().enumerate() {
        let description = step.to_string();
        let status = if failed {
            StepStatus::Skipped
        } else {
            match run_step(locator, step) {
                Ok(detail) => StepStatus::Passed(detail),
                Err(e) => {
                    failed = true;
                    StepStatus::Failed(e.to_string())
                }
            }
        };
        debug!(index, step = %description, status = ?status, "step finished");
        outcomes.push(StepOutcome {
            index,
            description,
            status,
        });
    }

    outcomes
}

fn run_step<Q: GridQuery>(
    locator: &TableCellLocator<Q>,
    step: &Step,
) -> ProbeResult<Option<String>> {
    match step {
        Step::Resolve {
            row,
            column,
            expect,
        } => {
            let at = locator.resolve(*row, column)?;
            if let Some([r, c]) = expect {
                let expected = PhysicalCoordinate::new(*r, *c);
                if at != expected {
                    return Err(ProbeError::assertion(
                        format!("resolve '{column}'"),
                        expected.to_string(),
                        at.to_string(),
                    ));
                }
            }
            Ok(Some(format!("{} -> {}", at, selectors::cell(at))))
        }
        Step::Get { row, column } => {
            let value = locator.get_value(*row, column)?;
            Ok(Some(format!("{value:?}")))
        }
        Step::AssertCell {
            row,
            column,
            equals,
        } => {
            locator.assert_value(*row, column, expected_text(equals.as_ref()))?;
            Ok(None)
        }
        Step::AssertNotString { row, column } => {
            locator.assert_not_string(*row, column)?;
            Ok(None)
        }
        Step::AssertHeaders(expected) => {
            let headers = locator.headers()?;
            if &headers != expected {
                return Err(ProbeError::assertion(
                    "headers",
                    expected.join(", "),
                    headers.join(", "),
                ));
            }
            Ok(None)
        }
    }
}
