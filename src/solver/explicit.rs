//! Forward Euler stencil step.
//!
//! Interior nodes are updated directly from the previous head:
//!
//! ```text
//! flux_x = (K[i,j+1] (h[i,j+1] - h[i,j]) - K[i,j-1] (h[i,j] - h[i,j-1])) / dx²
//! flux_y = (K[i+1,j] (h[i+1,j] - h[i,j]) - K[i-1,j] (h[i,j] - h[i-1,j])) / dy²
//! h_new  = h + dt / S[i,j] * (flux_x + flux_y + Q[i,j])
//! ```
//!
//! Each face takes K from the neighbour on that side rather than the
//! averaged conductance of the implicit scheme. On the outer ring the
//! missing neighbour contributes no face, so a Neumann(0) edge passes no
//! flux. Dirichlet nodes are overwritten after the stencil pass.
//!
//! Only conditionally stable, see [`super::stability`].

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{FlowSystem, HeadStepper, StabilityNumbers};
use crate::error::Result;
use crate::field::Field2D;

/// Forward Euler stepper.
#[derive(Clone, Copy, Debug)]
pub struct ExplicitSolver<'a> {
    system: FlowSystem<'a>,
    dt: f64,
}

impl<'a> ExplicitSolver<'a> {
    /// Create a stepper with a fixed timestep.
    pub fn new(system: FlowSystem<'a>, dt: f64) -> Self {
        Self { system, dt }
    }

    /// Diffusion numbers for this timestep.
    pub fn stability(&self) -> StabilityNumbers {
        StabilityNumbers::compute(self.system.grid, self.system.properties, self.dt)
    }

    /// Updated head at node `(i, j)`; faces outside the grid are skipped.
    #[inline]
    fn updated_head(&self, i: usize, j: usize, head: &Field2D, source: Option<&Field2D>) -> f64 {
        let grid = self.system.grid;
        let (ny, nx) = grid.shape();
        let k = self.system.properties.conductivity();
        let s = self.system.properties.storage();
        let dx2 = grid.dx() * grid.dx();
        let dy2 = grid.dy() * grid.dy();

        let hc = head.get(i, j);
        let mut flux_x = 0.0;
        if j + 1 < nx {
            flux_x += k.get(i, j + 1) * (head.get(i, j + 1) - hc);
        }
        if j > 0 {
            flux_x -= k.get(i, j - 1) * (hc - head.get(i, j - 1));
        }
        let mut flux_y = 0.0;
        if i + 1 < ny {
            flux_y += k.get(i + 1, j) * (head.get(i + 1, j) - hc);
        }
        if i > 0 {
            flux_y -= k.get(i - 1, j) * (hc - head.get(i - 1, j));
        }
        let q = source.map_or(0.0, |q| q.get(i, j));

        hc + self.dt / s.get(i, j) * (flux_x / dx2 + flux_y / dy2 + q)
    }
}

impl HeadStepper for ExplicitSolver<'_> {
    fn name(&self) -> &'static str {
        "explicit"
    }

    fn dt(&self) -> f64 {
        self.dt
    }

    fn step(&self, head: &Field2D, source: Option<&Field2D>, _step: usize) -> Result<Field2D> {
        let grid = self.system.grid;
        let nx = grid.nx();
        let mut next = head.clone();

        let update_row = |(i, row): (usize, &mut [f64])| {
            for (j, value) in row.iter_mut().enumerate() {
                *value = self.updated_head(i, j, head, source);
            }
        };

        #[cfg(feature = "parallel")]
        next.as_mut_slice()
            .par_chunks_mut(nx)
            .enumerate()
            .for_each(update_row);

        #[cfg(not(feature = "parallel"))]
        next.as_mut_slice()
            .chunks_mut(nx)
            .enumerate()
            .for_each(update_row);

        self.system.boundaries.apply_dirichlet(grid, &mut next);
        Ok(next)
    }
}
