//! Steady-state and volume-conservation checks.

use approx::assert_relative_eq;
use gw_rs::analysis::storage_change;
use gw_rs::{
    AquiferProperties, BoundaryCondition, BoundaryConditionSet, Field2D, Grid2D, Method,
    SimulationResult, SourceTerm, TransientProblem, TransientSimulation, WaterBalance,
    solve_2d_transient,
};

#[test]
fn test_steady_state_is_linear_between_fixed_heads() {
    let (nx, ny) = (11, 5);
    let (lx, ly) = (10.0, 4.0);
    let (h_left, h_right) = (12.0, 4.0);

    let bcs = BoundaryConditionSet::no_flux()
        .with_left(BoundaryCondition::dirichlet(h_left))
        .with_right(BoundaryCondition::dirichlet(h_right));

    let history = solve_2d_transient(
        3.0,
        1e-4,
        lx,
        ly,
        nx,
        ny,
        1e6,
        5,
        Field2D::filled(ny, nx, 8.0),
        bcs,
        SourceTerm::None,
        Method::Implicit,
    )
    .unwrap();

    let grid = Grid2D::new(lx, ly, nx, ny).unwrap();
    let expected =
        Field2D::from_coordinates(&grid, |x, _| h_left + (h_right - h_left) * x / lx);
    let last = history.latest();
    for i in 0..ny {
        for j in 0..nx {
            assert_relative_eq!(last.get(i, j), expected.get(i, j), max_relative = 1e-3);
        }
    }
}

#[test]
fn test_steady_state_with_heterogeneous_conductivity() {
    // Two zones in series: flux continuity puts the interface head at the
    // conductance-weighted mean.
    let grid = Grid2D::new(2.0, 1.0, 3, 3).unwrap();
    let k = Field2D::from_fn(3, 3, |_, j| if j < 2 { 1.0 } else { 3.0 });
    let props = AquiferProperties::new(&grid, k, 1e-3).unwrap();
    let problem = TransientProblem::new(props, 1e6, 3, Field2D::zeros_on(&grid))
        .unwrap()
        .with_boundary_conditions(
            BoundaryConditionSet::no_flux()
                .with_left(BoundaryCondition::dirichlet(1.0))
                .with_right(BoundaryCondition::dirichlet(0.0)),
        )
        .unwrap();

    let result = TransientSimulation::new(&problem, Method::Implicit).run().unwrap();
    // Faces: C_left = 1.0, C_right = 2.0, so h = C_left / (C_left + C_right)
    for i in 0..3 {
        assert_relative_eq!(result.final_head().get(i, 1), 1.0 / 3.0, epsilon = 1e-6);
    }
}

/// Closed box with a Gaussian mound; returns the properties and the run.
fn closed_box_run(k: Field2D, method: Method, dt: f64) -> (AquiferProperties, SimulationResult) {
    let grid = Grid2D::new(9.0, 6.0, 10, 7).unwrap();
    let s = Field2D::from_coordinates(&grid, |x, _| 0.01 + 0.001 * x);
    let props = AquiferProperties::new(&grid, k, s).unwrap();

    let h0 = Field2D::from_coordinates(&grid, |x, y| {
        5.0 + 3.0 * (-((x - 4.5).powi(2) + (y - 3.0).powi(2)) / 2.0).exp()
    });
    let problem = TransientProblem::new(props.clone(), dt, 20, h0).unwrap();
    let result = TransientSimulation::new(&problem, method).run().unwrap();
    (props, result)
}

fn assert_storage_conserved(props: &AquiferProperties, result: &SimulationResult) {
    for t in 1..result.history.len() {
        let dv = storage_change(props, &result.history[t - 1], &result.history[t]).unwrap();
        assert!(dv.abs() < 1e-9, "{} step {t}: storage change {dv:e}", result.method);
    }

    let balance = WaterBalance::compute(props, &result.history).unwrap();
    assert!(balance.max_abs_change() < 1e-9);
    assert_relative_eq!(balance.volumes[0], balance.volumes[20], max_relative = 1e-10);

    // The mound spreads out
    let last = result.final_head();
    assert!(last.max() < result.history.initial().max());
    assert!(last.min() > result.history.initial().min());
}

#[test]
fn test_no_flux_box_conserves_storage() {
    let grid = Grid2D::new(9.0, 6.0, 10, 7).unwrap();
    let k = Field2D::from_coordinates(&grid, |x, y| 1.0 + 0.5 * x + 0.2 * y);
    let (props, result) = closed_box_run(k, Method::Implicit, 0.5);
    assert_storage_conserved(&props, &result);
}

#[test]
fn test_no_flux_box_conserves_storage_explicit() {
    // Uniform K keeps the neighbour-side face conductances symmetric
    let (props, result) = closed_box_run(Field2D::filled(7, 10, 2.0), Method::Explicit, 1e-3);
    assert!(!result.has_warnings());
    assert_storage_conserved(&props, &result);
}

#[test]
fn test_explicit_edges_pass_no_flux() {
    // All mass starts on the left edge; it may spread but never leave.
    let grid = Grid2D::new(4.0, 4.0, 5, 5).unwrap();
    let props = AquiferProperties::new(&grid, 1.0, 1.0).unwrap();
    let h0 = Field2D::from_fn(5, 5, |_, j| if j == 0 { 10.0 } else { 0.0 });
    let problem = TransientProblem::new(props.clone(), 0.1, 10, h0).unwrap();
    let result = TransientSimulation::new(&problem, Method::Explicit).run().unwrap();

    let balance = WaterBalance::compute(&props, &result.history).unwrap();
    assert!(balance.max_abs_change() < 1e-12);
    assert!(result.final_head().get(2, 0) < 10.0);
    assert!(result.final_head().get(2, 4) > 0.0);
}

#[test]
fn test_source_volume_is_stored() {
    let grid = Grid2D::new(4.0, 4.0, 5, 5).unwrap();
    let props = AquiferProperties::new(&grid, 2.0, 0.1).unwrap();
    let mut q = Field2D::zeros_on(&grid);
    q.set(2, 2, 0.3);
    let dt = 0.25;

    let problem = TransientProblem::new(props.clone(), dt, 8, Field2D::zeros_on(&grid))
        .unwrap()
        .with_source(q)
        .unwrap();
    let result = TransientSimulation::new(&problem, Method::Implicit).run().unwrap();

    // Each step stores dt * Q * cell area
    let balance = WaterBalance::compute(&props, &result.history).unwrap();
    for dv in &balance.changes {
        assert_relative_eq!(*dv, dt * 0.3 * grid.cell_area(), max_relative = 1e-9);
    }
}
