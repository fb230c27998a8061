//! JSON reports printed by the commands.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::time::Duration;

use coverset_core::{Cost, CoverageInstance, ElementId, InstanceError, ProviderId, SolutionStatus};
use serde::{Deserialize, Serialize};

use crate::CliError;
use crate::solvers::TimedSolution;

/// Outcome of `coverset solve`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SolveReport {
    pub(crate) solver: String,
    pub(crate) selected: BTreeSet<ProviderId>,
    pub(crate) cost: Cost,
    pub(crate) status: SolutionStatus,
    /// Share of the target covered by the selection.
    pub(crate) coverage_percent: f64,
    pub(crate) uncovered: usize,
    pub(crate) elapsed_ms: f64,
    /// Selected providers covering each element, with `--details`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) details: Option<BTreeMap<ElementId, BTreeSet<ProviderId>>>,
}

impl SolveReport {
    pub(crate) fn new(
        run: TimedSolution,
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
        with_details: bool,
    ) -> Result<Self, CliError> {
        let selected = &run.solution.selected;
        let coverage_percent = instance
            .coverage_percentage(selected, target)
            .map_err(|err| solve_error(run.solver, err))?;
        let uncovered = run
            .solution
            .uncovered(instance, target)
            .map_err(|err| solve_error(run.solver, err))?
            .len();
        let details = if with_details {
            Some(
                instance
                    .coverage_details(selected)
                    .map_err(|err| solve_error(run.solver, err))?,
            )
        } else {
            None
        };
        Ok(Self {
            solver: run.solver.to_owned(),
            selected: run.solution.selected,
            cost: run.solution.cost,
            status: run.solution.status,
            coverage_percent,
            uncovered,
            elapsed_ms: millis(run.elapsed),
            details,
        })
    }

    /// `cost - optimum` for complete covers; partial selections have no gap.
    pub(crate) const fn gap_to(&self, optimum: Cost) -> Option<Cost> {
        if self.uncovered == 0 {
            self.cost.checked_sub(optimum)
        } else {
            None
        }
    }
}

/// Outcome of `coverset compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CompareReport {
    pub(crate) elements: usize,
    pub(crate) providers: usize,
    /// Elements no provider covers; they are excluded from the target.
    pub(crate) uncoverable: usize,
    pub(crate) baseline: String,
    pub(crate) optimum: Cost,
    pub(crate) rows: Vec<CompareRow>,
}

/// One solver's line in a [`CompareReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CompareRow {
    pub(crate) solver: String,
    pub(crate) cost: Cost,
    pub(crate) gap: Option<Cost>,
    pub(crate) coverage_percent: f64,
    pub(crate) uncovered: usize,
    pub(crate) elapsed_ms: f64,
}

impl CompareRow {
    pub(crate) fn from_report(report: SolveReport, optimum: Cost) -> Self {
        Self {
            gap: report.gap_to(optimum),
            solver: report.solver,
            cost: report.cost,
            coverage_percent: report.coverage_percent,
            uncovered: report.uncovered,
            elapsed_ms: report.elapsed_ms,
        }
    }
}

fn solve_error(solver: &'static str, err: InstanceError) -> CliError {
    CliError::Solve {
        solver,
        source: err.into(),
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "elapsed times are reported in fractional milliseconds"
)]
const fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1_000.0
}

/// Write `report` as pretty JSON followed by a newline.
pub(crate) fn write_report<T: Serialize>(writer: &mut dyn Write, report: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteReport)?;
    writer.write_all(b"\n").map_err(CliError::WriteReport)?;
    Ok(())
}
