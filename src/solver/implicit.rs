//! Fully implicit (backward Euler) step.
//!
//! Each node `idx = i * nx + j` contributes one equation:
//!
//! ```text
//! (S/dt + Σ C_nb) h_new[idx] - Σ C_nb h_new[nb] = (S/dt) h_old[idx] + Q[idx]
//! ```
//!
//! where the sums run over the neighbours that exist in the grid and `C_nb`
//! is the arithmetic-mean conductance of the shared face. Nodes owned by a
//! Dirichlet edge get the identity row `h_new[idx] = value` instead. The
//! system is unconditionally stable in time.
//!
//! Assembly collects `(row, col, value)` triplets, compresses them once into
//! a CSC matrix and solves with a sparse LU factorization.

use faer::Mat;
use faer::linalg::solvers::Solve;
use faer::sparse::{SparseColMat, Triplet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{FlowSystem, HeadStepper};
use crate::error::{GroundwaterError, Result};
use crate::field::Field2D;

/// Accumulates sparse matrix entries before compression.
#[derive(Clone, Debug)]
pub struct TripletBuilder {
    n: usize,
    triplets: Vec<Triplet<usize, usize, f64>>,
}

impl TripletBuilder {
    /// Empty builder for an `n × n` matrix with room for `nnz` entries.
    pub fn with_capacity(n: usize, nnz: usize) -> Self {
        Self {
            n,
            triplets: Vec::with_capacity(nnz),
        }
    }

    /// Append a block of entries. Duplicate positions are summed on
    /// compression.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = Triplet<usize, usize, f64>>) {
        self.triplets.extend(entries);
    }

    /// Number of entries pushed so far.
    pub fn nnz(&self) -> usize {
        self.triplets.len()
    }

    /// Compress into column-major sparse storage.
    pub fn build(self) -> std::result::Result<SparseColMat<usize, f64>, String> {
        SparseColMat::try_new_from_triplets(self.n, self.n, &self.triplets)
            .map_err(|e| format!("invalid sparse structure: {:?}", e))
    }
}

/// Assembled linear system `A h_new = b` for one step.
#[derive(Debug)]
pub struct LinearSystem {
    /// System matrix, `N × N` with `N = nx * ny`.
    pub matrix: SparseColMat<usize, f64>,
    /// Right-hand side.
    pub rhs: Vec<f64>,
}

/// Matrix entries and right-hand side for one grid row.
struct RowBlock {
    triplets: Vec<Triplet<usize, usize, f64>>,
    rhs: Vec<f64>,
}

/// Backward Euler stepper.
///
/// # Example
///
/// ```
/// use gw_rs::boundary::{BoundaryCondition, BoundaryConditionSet};
/// use gw_rs::field::{AquiferProperties, Field2D};
/// use gw_rs::solver::{FlowSystem, HeadStepper, ImplicitSolver};
/// use gw_rs::types::Grid2D;
///
/// let grid = Grid2D::new(4.0, 3.0, 5, 4).unwrap();
/// let props = AquiferProperties::new(&grid, 10.0, 0.001).unwrap();
/// let bcs = BoundaryConditionSet::no_flux()
///     .with_left(BoundaryCondition::dirichlet(20.0))
///     .with_right(BoundaryCondition::dirichlet(10.0));
///
/// let solver = ImplicitSolver::new(FlowSystem::new(&grid, &props, &bcs).unwrap(), 1.0);
/// let h0 = Field2D::filled_on(&grid, 15.0);
/// let h1 = solver.step(&h0, None, 0).unwrap();
///
/// assert_eq!(h1.get(1, 0), 20.0);
/// assert_eq!(h1.get(1, 4), 10.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ImplicitSolver<'a> {
    system: FlowSystem<'a>,
    dt: f64,
}

impl<'a> ImplicitSolver<'a> {
    /// Create a stepper with a fixed timestep.
    pub fn new(system: FlowSystem<'a>, dt: f64) -> Self {
        Self { system, dt }
    }

    /// Build the linear system for one step.
    ///
    /// # Errors
    ///
    /// Returns [`GroundwaterError::LinearSystem`] if the triplets cannot be
    /// compressed.
    pub fn assemble(
        &self,
        head: &Field2D,
        source: Option<&Field2D>,
        step: usize,
    ) -> Result<LinearSystem> {
        let grid = self.system.grid;
        let n = grid.n_nodes();

        #[cfg(feature = "parallel")]
        let blocks: Vec<RowBlock> = (0..grid.ny())
            .into_par_iter()
            .map(|i| self.assemble_row(i, head, source))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let blocks: Vec<RowBlock> = (0..grid.ny())
            .map(|i| self.assemble_row(i, head, source))
            .collect();

        let mut builder = TripletBuilder::with_capacity(n, 5 * n);
        let mut rhs = Vec::with_capacity(n);
        for block in blocks {
            builder.extend(block.triplets);
            rhs.extend(block.rhs);
        }
        log::trace!(
            "step {}: assembled {} unknowns, {} entries",
            step,
            n,
            builder.nnz()
        );

        let matrix = builder
            .build()
            .map_err(|reason| GroundwaterError::LinearSystem { step, reason })?;
        Ok(LinearSystem { matrix, rhs })
    }

    /// Equations for all nodes in grid row `i`, in column order.
    fn assemble_row(&self, i: usize, head: &Field2D, source: Option<&Field2D>) -> RowBlock {
        let FlowSystem {
            grid,
            properties,
            boundaries,
        } = self.system;
        let (ny, nx) = grid.shape();
        let storage = properties.storage();

        let mut triplets = Vec::with_capacity(5 * nx);
        let mut rhs = Vec::with_capacity(nx);

        for j in 0..nx {
            let idx = grid.node_index(i, j);

            if let Some(value) = boundaries.resolve(grid, i, j) {
                triplets.push(Triplet::new(idx, idx, 1.0));
                rhs.push(value);
                continue;
            }

            let storage_term = storage.get(i, j) / self.dt;
            let mut diagonal = storage_term;

            if j > 0 {
                let c = properties.conductance_x(i, j - 1);
                diagonal += c;
                triplets.push(Triplet::new(idx, idx - 1, -c));
            }
            if j + 1 < nx {
                let c = properties.conductance_x(i, j);
                diagonal += c;
                triplets.push(Triplet::new(idx, idx + 1, -c));
            }
            if i > 0 {
                let c = properties.conductance_y(i - 1, j);
                diagonal += c;
                triplets.push(Triplet::new(idx, idx - nx, -c));
            }
            if i + 1 < ny {
                let c = properties.conductance_y(i, j);
                diagonal += c;
                triplets.push(Triplet::new(idx, idx + nx, -c));
            }
            triplets.push(Triplet::new(idx, idx, diagonal));

            let q = source.map_or(0.0, |q| q.get(i, j));
            rhs.push(storage_term * head.get(i, j) + q);
        }

        RowBlock { triplets, rhs }
    }
}

/// Solve `A x = b` with a sparse LU factorization.
///
/// # Errors
///
/// Returns [`GroundwaterError::LinearSystem`] if the factorization fails or
/// the solution is not finite (singular or ill-posed system).
pub fn solve_sparse(system: &LinearSystem, step: usize) -> Result<Vec<f64>> {
    let n = system.rhs.len();
    let lu = system
        .matrix
        .sp_lu()
        .map_err(|e| GroundwaterError::LinearSystem {
            step,
            reason: format!("sparse LU factorization failed: {:?}", e),
        })?;

    let b = Mat::<f64>::from_fn(n, 1, |row, _| system.rhs[row]);
    let x = lu.solve(&b);

    let solution: Vec<f64> = (0..n).map(|row| x[(row, 0)]).collect();
    if let Some(row) = solution.iter().position(|v| !v.is_finite()) {
        return Err(GroundwaterError::LinearSystem {
            step,
            reason: format!("singular system: non-finite solution at node {}", row),
        });
    }
    Ok(solution)
}

impl HeadStepper for ImplicitSolver<'_> {
    fn name(&self) -> &'static str {
        "implicit"
    }

    fn dt(&self) -> f64 {
        self.dt
    }

    fn step(&self, head: &Field2D, source: Option<&Field2D>, step: usize) -> Result<Field2D> {
        let system = self.assemble(head, source, step)?;
        let solution = solve_sparse(&system, step)?;
        let grid = self.system.grid;
        let (ny, nx) = grid.shape();
        let mut next = Field2D::from_vec(ny, nx, solution)?;
        // Pivoting can leave identity rows a few ulps off
        self.system.boundaries.apply_dirichlet(grid, &mut next);
        Ok(next)
    }
}
