//! Transient simulation runner.
//!
//! Owns the outer time loop: dispatches to the implicit or explicit
//! stepper, forwards the source slice for each step, and accumulates the
//! head history.

use std::time::{Duration, Instant};

use super::{HeadHistory, Method, TransientProblem};
use crate::error::Result;
use crate::field::Field2D;
use crate::solver::{
    ExplicitSolver, HeadStepper, ImplicitSolver, StabilityWarning, check_explicit_stability,
};

// =============================================================================
// Simulation Configuration
// =============================================================================

/// Run controls that do not change the numerical result.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Stop after this many steps even if `nt` is larger.
    pub max_steps: Option<usize>,
    /// Stop once this much wall-clock time has elapsed.
    pub max_wall_time: Option<Duration>,
    /// Emit a debug progress record every this many steps (0 disables).
    pub progress_interval: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_steps: None,
            max_wall_time: None,
            progress_interval: 100,
        }
    }
}

// =============================================================================
// Simulation Result
// =============================================================================

/// Output of a transient run.
#[derive(Clone, Debug)]
pub struct SimulationResult {
    /// Head fields, index 0 = initial condition.
    pub history: HeadHistory,
    /// Scheme that produced the history.
    pub method: Method,
    /// Advisory notices raised during the run.
    pub warnings: Vec<StabilityWarning>,
    /// Number of steps completed.
    pub n_steps: usize,
    /// Wall-clock time in seconds.
    pub wall_time: f64,
    /// Whether a step or wall-clock limit ended the run before `nt` steps.
    pub terminated_early: bool,
}

impl SimulationResult {
    /// Whether any stability warning was raised.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Final head field.
    pub fn final_head(&self) -> &Field2D {
        self.history.latest()
    }
}

// =============================================================================
// Transient Simulation
// =============================================================================

/// Runs a [`TransientProblem`] with a chosen [`Method`].
///
/// # Example
///
/// ```
/// use gw_rs::field::{AquiferProperties, Field2D};
/// use gw_rs::simulation::{Method, TransientProblem, TransientSimulation};
/// use gw_rs::types::Grid2D;
///
/// let grid = Grid2D::new(10.0, 10.0, 11, 11).unwrap();
/// let props = AquiferProperties::new(&grid, 1.0, 1.0).unwrap();
/// let problem = TransientProblem::new(props, 0.1, 20, Field2D::filled_on(&grid, 5.0)).unwrap();
///
/// let result = TransientSimulation::new(&problem, Method::Explicit)
///     .with_max_steps(5)
///     .run()
///     .unwrap();
///
/// assert_eq!(result.history.len(), 6);
/// assert!(result.terminated_early);
/// ```
pub struct TransientSimulation<'a> {
    problem: &'a TransientProblem,
    method: Method,
    config: SimulationConfig,
}

impl<'a> TransientSimulation<'a> {
    /// Create a simulation with the default configuration.
    pub fn new(problem: &'a TransientProblem, method: Method) -> Self {
        Self {
            problem,
            method,
            config: SimulationConfig::default(),
        }
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.config = config;
        self
    }

    /// Stop after `max_steps` steps.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.config.max_steps = Some(max_steps);
        self
    }

    /// Stop after `limit` of wall-clock time.
    pub fn with_max_wall_time(mut self, limit: Duration) -> Self {
        self.config.max_wall_time = Some(limit);
        self
    }

    /// Progress record interval in steps (0 disables).
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.config.progress_interval = interval;
        self
    }

    /// The problem being run.
    pub fn problem(&self) -> &TransientProblem {
        self.problem
    }

    /// Run to completion.
    pub fn run(&self) -> Result<SimulationResult> {
        self.run_with_callback(|_, _| {})
    }

    /// Run, calling `callback(step, head)` after each completed step.
    ///
    /// `step` is 1-based: the callback for the first step receives 1.
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::LinearSystem`](crate::GroundwaterError::LinearSystem)
    /// if an implicit solve fails. The partial history is dropped.
    pub fn run_with_callback<F>(&self, callback: F) -> Result<SimulationResult>
    where
        F: FnMut(usize, &Field2D),
    {
        let system = self.problem.flow_system();
        let dt = self.problem.dt();

        match self.method {
            Method::Implicit => {
                let stepper = ImplicitSolver::new(system, dt);
                self.drive(&stepper, Vec::new(), callback)
            }
            Method::Explicit => {
                let warnings = check_explicit_stability(system.grid, system.properties, dt)
                    .into_iter()
                    .collect();
                let stepper = ExplicitSolver::new(system, dt);
                self.drive(&stepper, warnings, callback)
            }
        }
    }

    fn drive<S, F>(
        &self,
        stepper: &S,
        mut warnings: Vec<StabilityWarning>,
        mut callback: F,
    ) -> Result<SimulationResult>
    where
        S: HeadStepper,
        F: FnMut(usize, &Field2D),
    {
        let problem = self.problem;
        let nt = problem.nt();
        let start_wall = Instant::now();

        log::info!(
            "Starting {} run: {} steps of dt = {:.3e} on {}",
            stepper.name(),
            nt,
            stepper.dt(),
            problem.grid()
        );
        log::debug!("Boundaries: {}", problem.boundaries().edges());

        let mut history = HeadHistory::new(problem.initial_head().clone(), nt + 1);
        let mut terminated_early = false;

        for t in 0..nt {
            if let Some(max_steps) = self.config.max_steps
                && t >= max_steps
            {
                log::info!("Step limit ({}) reached, stopping", max_steps);
                terminated_early = true;
                break;
            }
            if let Some(limit) = self.config.max_wall_time
                && start_wall.elapsed() >= limit
            {
                log::info!("Wall-clock limit ({:?}) reached after {} steps", limit, t);
                terminated_early = true;
                break;
            }

            let source = problem.source().slice(t);
            let next = stepper.step(history.latest(), source, t)?;

            if !next.all_finite() {
                let count = next.as_slice().iter().filter(|v| !v.is_finite()).count();
                let warning = StabilityWarning::NonFiniteHead { step: t + 1, count };
                log::warn!("{}", warning);
                warnings.push(warning);
            }

            history.push(next);
            callback(t + 1, history.latest());

            if self.config.progress_interval > 0 && (t + 1) % self.config.progress_interval == 0 {
                let head = history.latest();
                log::debug!(
                    "  Step {}/{}: h in [{:.4}, {:.4}], mean {:.4}",
                    t + 1,
                    nt,
                    head.min(),
                    head.max(),
                    head.mean()
                );
            }
        }

        let wall_time = start_wall.elapsed().as_secs_f64();
        let n_steps = history.n_steps();
        log::info!(
            "Run complete: {} steps in {:.3}s ({} warnings)",
            n_steps,
            wall_time,
            warnings.len()
        );

        Ok(SimulationResult {
            history,
            method: self.method,
            warnings,
            n_steps,
            wall_time,
            terminated_early,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{BoundaryCondition, BoundaryConditionSet};
    use crate::field::AquiferProperties;
    use crate::source::SourceTerm;
    use crate::types::Grid2D;

    fn problem(k: f64, s: f64, dt: f64, nt: usize) -> TransientProblem {
        let grid = Grid2D::new(4.0, 3.0, 5, 4).unwrap();
        let props = AquiferProperties::new(&grid, k, s).unwrap();
        TransientProblem::new(props, dt, nt, Field2D::filled_on(&grid, 15.0))
            .unwrap()
            .with_boundary_conditions(
                BoundaryConditionSet::no_flux()
                    .with_left(BoundaryCondition::dirichlet(20.0))
                    .with_right(BoundaryCondition::dirichlet(10.0)),
            )
            .unwrap()
    }

    #[test]
    fn test_history_length_and_initial() {
        let p = problem(10.0, 0.001, 1.0, 10);
        let result = TransientSimulation::new(&p, Method::Implicit).run().unwrap();
        assert_eq!(result.history.len(), 11);
        assert_eq!(result.n_steps, 10);
        assert!(!result.terminated_early);
        assert_eq!(result.history.initial(), p.initial_head());
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_callback_sees_every_step() {
        let p = problem(1.0, 1.0, 0.1, 7);
        let mut seen = Vec::new();
        let result = TransientSimulation::new(&p, Method::Explicit)
            .run_with_callback(|step, head| seen.push((step, head.get(1, 0))))
            .unwrap();
        assert_eq!(seen.len(), 7);
        assert_eq!(seen[0], (1, 20.0));
        assert_eq!(seen[6].0, 7);
        assert_eq!(result.n_steps, 7);
    }

    #[test]
    fn test_step_limit_returns_partial_history() {
        let p = problem(10.0, 0.001, 1.0, 10);
        let result = TransientSimulation::new(&p, Method::Implicit)
            .with_max_steps(3)
            .run()
            .unwrap();
        assert_eq!(result.history.len(), 4);
        assert!(result.terminated_early);
    }

    #[test]
    fn test_zero_wall_time_stops_immediately() {
        let p = problem(10.0, 0.001, 1.0, 10);
        let result = TransientSimulation::new(&p, Method::Implicit)
            .with_max_wall_time(Duration::ZERO)
            .run()
            .unwrap();
        assert_eq!(result.history.len(), 1);
        assert!(result.terminated_early);
    }

    #[test]
    fn test_explicit_unstable_dt_warns_but_runs() {
        let p = problem(10.0, 0.001, 1.0, 3);
        let result = TransientSimulation::new(&p, Method::Explicit).run().unwrap();
        assert_eq!(result.history.len(), 4);
        assert!(matches!(
            result.warnings[0],
            StabilityWarning::ExplicitCriterion { .. }
        ));
    }

    #[test]
    fn test_time_varying_source_is_forwarded_per_step() {
        let grid = Grid2D::new(2.0, 2.0, 3, 3).unwrap();
        let props = AquiferProperties::new(&grid, 1.0, 1.0).unwrap();
        // Recharge at the centre only during the second step
        let mut pulse = Field2D::zeros_on(&grid);
        pulse.set(1, 1, 1.0);
        let series = vec![Field2D::zeros_on(&grid), pulse, Field2D::zeros_on(&grid)];
        let p = TransientProblem::new(props, 0.1, 3, Field2D::zeros_on(&grid))
            .unwrap()
            .with_source(SourceTerm::TimeVarying(series))
            .unwrap();

        let result = TransientSimulation::new(&p, Method::Explicit).run().unwrap();
        let h = &result.history;
        assert_eq!(h[1].get(1, 1), 0.0);
        assert!((h[2].get(1, 1) - 0.1).abs() < 1e-12);
        assert_eq!(h[2].get(0, 1), 0.0);
        // No recharge in the third step: the mound starts to spread
        assert!((h[3].get(1, 1) - 0.06).abs() < 1e-12);
        assert!(h[3].get(0, 1) > 0.0);
    }
}
