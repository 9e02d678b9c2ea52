//! Explicit-scheme stability detection.
//!
//! The diffusion numbers are `α_x = (max K / min S) dt / dx²` and likewise
//! for y; a warning is raised only when `α_x + α_y > 0.5`.

use gw_rs::solver::EXPLICIT_STABILITY_LIMIT;
use gw_rs::{
    AquiferProperties, BoundaryCondition, BoundaryConditionSet, Field2D, Grid2D, Method,
    StabilityNumbers, StabilityWarning, TransientProblem, TransientSimulation,
    check_explicit_stability,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Timestep giving `α_x + α_y == target`.
fn dt_for(grid: &Grid2D, props: &AquiferProperties, target: f64) -> f64 {
    let diffusivity = props.max_conductivity() / props.min_storage();
    let inv = 1.0 / (grid.dx() * grid.dx()) + 1.0 / (grid.dy() * grid.dy());
    target / (diffusivity * inv)
}

fn setup() -> (Grid2D, AquiferProperties) {
    let grid = Grid2D::new(8.0, 3.0, 9, 7).unwrap();
    let k = Field2D::from_coordinates(&grid, |x, _| 1.0 + x);
    let s = Field2D::from_coordinates(&grid, |_, y| 0.1 + 0.05 * y);
    let props = AquiferProperties::new(&grid, k, s).unwrap();
    (grid, props)
}

#[test]
fn test_threshold_is_sharp() {
    init_logging();
    let (grid, props) = setup();
    let eps = 1e-6;

    let above = dt_for(&grid, &props, EXPLICIT_STABILITY_LIMIT + eps);
    let below = dt_for(&grid, &props, EXPLICIT_STABILITY_LIMIT - eps);

    match check_explicit_stability(&grid, &props, above) {
        Some(StabilityWarning::ExplicitCriterion {
            alpha_x,
            alpha_y,
            limit,
        }) => {
            assert!(alpha_x + alpha_y > limit);
            assert_eq!(limit, EXPLICIT_STABILITY_LIMIT);
        }
        other => panic!("expected a stability warning, got {:?}", other),
    }
    assert!(check_explicit_stability(&grid, &props, below).is_none());
}

#[test]
fn test_max_stable_dt() {
    let (grid, props) = setup();
    let dt = StabilityNumbers::max_stable_dt(&grid, &props);
    assert!(StabilityNumbers::compute(&grid, &props, dt * 0.999).is_stable());
    assert!(!StabilityNumbers::compute(&grid, &props, dt * 1.001).is_stable());
}

#[test]
fn test_unstable_run_still_completes() {
    init_logging();
    let (grid, props) = setup();
    let dt = dt_for(&grid, &props, 2.0);
    // Checkerboard excites the fastest-growing mode
    let h0 = Field2D::from_fn(7, 9, |i, j| ((i + j) % 2) as f64);
    let problem = TransientProblem::new(props, dt, 4, h0)
        .unwrap()
        .with_boundary_conditions(
            BoundaryConditionSet::no_flux().with_left(BoundaryCondition::dirichlet(0.5)),
        )
        .unwrap();

    let result = TransientSimulation::new(&problem, Method::Explicit).run().unwrap();
    assert_eq!(result.history.len(), 5);
    assert!(result.has_warnings());
    assert!(matches!(
        result.warnings[0],
        StabilityWarning::ExplicitCriterion { .. }
    ));

    // The implicit scheme has no such restriction
    let result = TransientSimulation::new(&problem, Method::Implicit).run().unwrap();
    assert!(!result.has_warnings());
    assert!(result.final_head().all_finite());
}
