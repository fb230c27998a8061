//! Test helpers for writing instance documents and stub solvers.

use std::collections::BTreeSet;

use camino::{Utf8Path, Utf8PathBuf};
use coverset_core::{
    CoverSolver, CoverageInstance, ElementId, ProviderId, Solution, SolutionStatus, SolveError,
};
use tempfile::TempDir;

use crate::solvers::{SolverFactory, SolverKind, SolverParams};
use crate::CliError;

/// `e1, e2`; provider 1 (cost 1) covers `e1`, provider 2 (cost 1) covers
/// both.
pub(super) const TWO_PROVIDER_DOCUMENT: &str = r#"{
  "elements": [1, 2],
  "providers": [
    { "id": 1, "cost": 1, "covers": [1] },
    { "id": 2, "cost": 1, "covers": [1, 2] }
  ]
}"#;

/// Like [`TWO_PROVIDER_DOCUMENT`] plus element 3, which nobody covers.
pub(super) const UNCOVERABLE_DOCUMENT: &str = r#"{
  "elements": [1, 2, 3],
  "providers": [
    { "id": 1, "cost": 1, "covers": [1] },
    { "id": 2, "cost": 1, "covers": [1, 2] }
  ]
}"#;

/// A temporary directory addressed through UTF-8 paths.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    /// Write `contents` to `name` and return its path.
    pub(super) fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.path(name);
        write_utf8(&path, contents.as_bytes());
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// A solver returning a fixed selection without looking at the instance.
pub(super) struct FixedSolver {
    pub(super) selected: Vec<u64>,
    pub(super) cost: u64,
}

impl CoverSolver for FixedSolver {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn solve(
        &self,
        _instance: &CoverageInstance,
        _target: &BTreeSet<ElementId>,
    ) -> Result<Solution, SolveError> {
        let selected = self.selected.iter().copied().map(ProviderId::new).collect();
        Ok(Solution::new(selected, self.cost, SolutionStatus::Unverified))
    }
}

/// Builds a [`FixedSolver`] for one kind and fails for every other kind.
pub(super) struct StubFactory {
    pub(super) kind: SolverKind,
    pub(super) selected: Vec<u64>,
    pub(super) cost: u64,
}

impl SolverFactory for StubFactory {
    fn build(
        &self,
        kind: SolverKind,
        _params: &SolverParams,
    ) -> Result<Box<dyn CoverSolver>, CliError> {
        if kind == self.kind {
            Ok(Box::new(FixedSolver {
                selected: self.selected.clone(),
                cost: self.cost,
            }))
        } else {
            Err(CliError::Solve {
                solver: "stub",
                source: SolveError::Infeasible,
            })
        }
    }
}
