//! LP relaxation with randomised rounding.
//!
//! The set-cover ILP is relaxed to `0 <= x_p <= 1`, solved by a
//! [`ModelBackend`], and each fractional value is rounded by `k` independent
//! Bernoulli trials: a provider is kept when any trial succeeds, which raises
//! its selection probability from `x` to `1 - (1 - x)^k`. Coverage of the
//! rounded selection is not re-checked.

use std::collections::BTreeSet;

use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand::distributions::Bernoulli;
use rand_chacha::ChaCha8Rng;

use crate::formulation::{ProviderVars, ensure_coverable, unit_sum};
use crate::model::{Comparison, LinearModel, ModelBackend, Sense, VarDomain};
use crate::{
    CoverSolver, CoverageInstance, ElementId, ProviderId, Solution, SolutionStatus, SolveError,
};

/// Trials per provider giving the classical `O(log n)` coverage guarantee:
/// `max(1, 2 * ceil(ln n))` for `n` target elements.
///
/// # Examples
/// ```
/// use coverset_core::default_trials;
///
/// assert_eq!(default_trials(0), 1);
/// assert_eq!(default_trials(1), 1);
/// assert_eq!(default_trials(100), 10);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the trial count derives from a natural logarithm"
)]
pub fn default_trials(target_len: usize) -> usize {
    if target_len <= 1 {
        return 1;
    }
    let rounds = (target_len as f64).ln().ceil() as usize;
    rounds.saturating_mul(2).max(1)
}

/// Round fractional provider values by repeated Bernoulli trials.
///
/// Values are clamped into `[0, 1]` first; `NaN` counts as zero. A provider
/// is selected when any of its `trials` draws succeeds. The result depends
/// only on `values`, `trials` and the state of `rng`.
///
/// # Examples
/// ```
/// use coverset_core::{ProviderId, round_fractional};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let values = [(ProviderId::new(1), 1.0), (ProviderId::new(2), 0.0)];
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let selected = round_fractional(&values, 3, &mut rng);
/// assert!(selected.contains(&ProviderId::new(1)));
/// assert!(!selected.contains(&ProviderId::new(2)));
/// ```
pub fn round_fractional<R: Rng + ?Sized>(
    values: &[(ProviderId, f64)],
    trials: usize,
    rng: &mut R,
) -> BTreeSet<ProviderId> {
    values
        .iter()
        .filter(|(_, value)| {
            let probability = if value.is_nan() {
                0.0
            } else {
                value.clamp(0.0, 1.0)
            };
            Bernoulli::new(probability)
                .is_ok_and(|trial| (0..trials).any(|_| rng.sample(trial)))
        })
        .map(|(provider, _)| *provider)
        .collect()
}

/// Configuration for [`RelaxationRoundingSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelaxationConfig {
    /// Trials per provider; [`default_trials`] of the target size when unset.
    pub trials: Option<usize>,
    /// Seed for the rounding generator.
    pub seed: u64,
}

/// Approximate solver: LP relaxation plus randomised rounding.
///
/// Results carry [`SolutionStatus::Unverified`]; use
/// [`Solution::uncovered`] when strict coverage matters. Equal seeds give
/// equal selections for equal backend answers.
#[derive(Debug, Clone)]
pub struct RelaxationRoundingSolver<B> {
    backend: B,
    config: RelaxationConfig,
}

impl<B: ModelBackend> RelaxationRoundingSolver<B> {
    /// Construct a solver with default configuration.
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, RelaxationConfig::default())
    }

    /// Construct a solver with explicit configuration.
    pub const fn with_config(backend: B, config: RelaxationConfig) -> Self {
        Self { backend, config }
    }

    /// Build the relaxed model for `target`.
    ///
    /// # Errors
    /// Returns [`SolveError::UnknownEntity`] for foreign target elements and
    /// [`SolveError::Infeasible`] when an element has no covering provider.
    pub fn formulate(
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> Result<LinearModel, SolveError> {
        Ok(Self::build(instance, target)?.0)
    }

    fn build(
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> Result<(LinearModel, ProviderVars), SolveError> {
        instance.check_target(target)?;
        let mut model = LinearModel::new("set-cover-relaxation", Sense::Minimise);
        let providers = ProviderVars::declare(
            &mut model,
            instance,
            VarDomain::Continuous {
                lower: 0.0,
                upper: 1.0,
            },
        );
        let covering = providers.covering_vars(instance, target);
        ensure_coverable(&covering)?;
        model.set_objective(providers.cost_expr());
        for vars in covering.values() {
            model.add_constraint(unit_sum(vars), Comparison::GreaterEq, 1.0);
        }
        Ok((model, providers))
    }

    fn trials_for(&self, target_len: usize) -> Result<usize, SolveError> {
        match self.config.trials {
            Some(0) => Err(SolveError::InvalidParameter {
                name: "trials",
                reason: "at least one trial per provider is required".to_owned(),
            }),
            Some(trials) => Ok(trials),
            None => Ok(default_trials(target_len)),
        }
    }
}

impl<B: ModelBackend> CoverSolver for RelaxationRoundingSolver<B> {
    fn name(&self) -> &'static str {
        "lp-rounding"
    }

    fn solve(
        &self,
        instance: &CoverageInstance,
        target: &BTreeSet<ElementId>,
    ) -> Result<Solution, SolveError> {
        let trials = self.trials_for(target.len())?;
        if target.is_empty() {
            instance.check_target(target)?;
            return Ok(Solution::empty(SolutionStatus::Unverified));
        }
        let (model, providers) = Self::build(instance, target)?;
        let assignment = self.backend.solve_model(&model)?;
        debug!(
            "relaxation objective {:.3}; rounding with {trials} trials per provider",
            model.evaluate(&assignment)
        );

        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let selected = round_fractional(&providers.values(&assignment), trials, &mut rng);
        let cost = instance.total_cost(&selected)?;
        Ok(Solution::new(selected, cost, SolutionStatus::Unverified))
    }
}
