//! loglik_optimizer::simplex — derivative-free Nelder–Mead search.
//!
//! Purpose
//! -------
//! Minimize a negative log-likelihood without gradients. Used for models
//! whose gradient is unavailable or unreliable, and selectable for any
//! model through [`Method::Simplex`](super::traits::Method).
//!
//! Key behaviors
//! -------------
//! - The simplex has `n + 1` vertices: `θ0` and `θ0 + step·e_j` for each
//!   coordinate `j`.
//! - Each step moves the worst vertex along the line through the centroid
//!   of the others: reflection, then expansion (if the reflection is the new
//!   best) or contraction (if it is still worse than the second-worst).
//!   When contraction does not help, every vertex moves halfway toward the
//!   best one.
//! - The convergence metric is the simplex size: mean Euclidean distance
//!   from the vertices to their centroid.
//!
//! Invariants & assumptions
//! ------------------------
//! - `+∞` costs are ordinary (worst possible) values during reflection,
//!   expansion and contraction; they never replace a finite vertex.
//! - A halving (shrink) step that produces a non-finite value is a step
//!   failure. The best vertex is untouched by a shrink, so the driver still
//!   returns a valid best point.
//! - `NaN` from the model is always an error.
//!
//! Testing notes
//! -------------
//! - Unit tests cover vertex construction, the size metric and
//!   convergence on a smooth bowl and next to an infeasible region.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Theta, run::SearchStrategy, traits::NegLogLikelihood,
        validation::validate_value,
    },
};

const REFLECTION: f64 = -1.0;
const EXPANSION: f64 = -2.0;
const CONTRACTION: f64 = 0.5;

/// Nelder–Mead state over a borrowed model and data set.
#[derive(Debug)]
pub struct SimplexSearch<'a, F: NegLogLikelihood> {
    f: &'a F,
    data: &'a F::Data,
    step_size: f64,
    tol_size: f64,
    vertices: Vec<Theta>,
    costs: Vec<Cost>,
    size: Option<f64>,
    cost_count: u64,
}

impl<'a, F: NegLogLikelihood> SimplexSearch<'a, F> {
    /// Prepare a search from `theta0`. Nothing is evaluated until
    /// [`SearchStrategy::start`].
    pub fn new(f: &'a F, data: &'a F::Data, theta0: Theta, step_size: f64, tol_size: f64) -> Self {
        Self {
            f,
            data,
            step_size,
            tol_size,
            vertices: vec![theta0],
            costs: vec![f64::INFINITY],
            size: None,
            cost_count: 0,
        }
    }

    /// Current vertices (for inspection in tests and diagnostics).
    pub fn vertices(&self) -> &[Theta] {
        &self.vertices
    }

    fn eval(&mut self, theta: &Theta) -> OptResult<Cost> {
        self.cost_count += 1;
        let value = self.f.value(theta, self.data)?;
        validate_value(value)?;
        Ok(value)
    }

    /// Point on the line from `vertices[corner]` through the centroid of the
    /// other vertices: `mp − coeff·(mp − x_corner)`.
    fn move_corner(&mut self, coeff: f64, corner: usize) -> OptResult<(Theta, Cost)> {
        let n_others = (self.vertices.len() - 1) as f64;
        let mut mp = Theta::zeros(self.vertices[corner].len());
        for (i, v) in self.vertices.iter().enumerate() {
            if i != corner {
                mp += v;
            }
        }
        mp /= n_others;
        let candidate = &mp - &((&mp - &self.vertices[corner]) * coeff);
        let value = self.eval(&candidate)?;
        Ok((candidate, value))
    }

    /// Move every vertex halfway toward `best`.
    fn shrink_toward(&mut self, best: usize) -> OptResult<()> {
        let anchor = self.vertices[best].clone();
        let mut bad_value = None;
        for i in 0..self.vertices.len() {
            if i == best {
                continue;
            }
            let moved = (&self.vertices[i] + &anchor) * 0.5;
            let value = self.eval(&moved)?;
            self.vertices[i] = moved;
            self.costs[i] = value;
            if !value.is_finite() && bad_value.is_none() {
                bad_value = Some(value);
            }
        }
        match bad_value {
            Some(value) => Err(OptError::ConditionViolated {
                text: format!("simplex shrink produced a non-finite value ({value})"),
            }),
            None => Ok(()),
        }
    }

    fn replace(&mut self, index: usize, theta: Theta, cost: Cost) {
        self.vertices[index] = theta;
        self.costs[index] = cost;
    }

    /// Indices of the lowest, second-highest and highest vertex.
    fn ranking(&self) -> (usize, usize, usize) {
        let mut order: Vec<usize> = (0..self.costs.len()).collect();
        order.sort_by(|&a, &b| self.costs[a].total_cmp(&self.costs[b]));
        let n = order.len();
        (order[0], order[n - 2], order[n - 1])
    }

    fn compute_size(&self) -> f64 {
        let n = self.vertices.len() as f64;
        let mut center = Theta::zeros(self.vertices[0].len());
        for v in &self.vertices {
            center += v;
        }
        center /= n;
        self.vertices.iter().map(|v| (v - &center).mapv(|d| d * d).sum().sqrt()).sum::<f64>() / n
    }

    fn best_index(&self) -> usize {
        let mut best = 0;
        for (i, &c) in self.costs.iter().enumerate() {
            if c < self.costs[best] {
                best = i;
            }
        }
        best
    }
}

impl<'a, F: NegLogLikelihood> SearchStrategy for SimplexSearch<'a, F> {
    const NAME: &'static str = "simplex";
    const METRIC: &'static str = "size";

    fn start(&mut self) -> OptResult<()> {
        let theta0 = self.vertices[0].clone();
        let dim = theta0.len();
        let mut vertices = Vec::with_capacity(dim + 1);
        let mut costs = Vec::with_capacity(dim + 1);
        costs.push(self.eval(&theta0)?);
        vertices.push(theta0.clone());
        for j in 0..dim {
            let mut vertex = theta0.clone();
            vertex[j] += self.step_size;
            costs.push(self.eval(&vertex)?);
            vertices.push(vertex);
        }
        self.vertices = vertices;
        self.costs = costs;
        self.size = Some(self.compute_size());
        Ok(())
    }

    fn step(&mut self) -> OptResult<()> {
        let (lo, s_hi, hi) = self.ranking();
        let (reflected, val) = self.move_corner(REFLECTION, hi)?;

        if val.is_finite() && val < self.costs[lo] {
            let (expanded, val2) = self.move_corner(EXPANSION, hi)?;
            if val2.is_finite() && val2 < self.costs[lo] {
                self.replace(hi, expanded, val2);
            } else {
                self.replace(hi, reflected, val);
            }
        } else if !val.is_finite() || val > self.costs[s_hi] {
            if val.is_finite() && val <= self.costs[hi] {
                self.replace(hi, reflected, val);
            }
            let (contracted, val2) = self.move_corner(CONTRACTION, hi)?;
            if val2.is_finite() && val2 <= self.costs[hi] {
                self.replace(hi, contracted, val2);
            } else {
                self.shrink_toward(lo)?;
            }
        } else {
            self.replace(hi, reflected, val);
        }

        self.size = Some(self.compute_size());
        Ok(())
    }

    fn metric(&self) -> Option<f64> {
        self.size
    }

    fn tolerance(&self) -> f64 {
        self.tol_size
    }

    fn best(&self) -> (&Theta, Cost) {
        let i = self.best_index();
        (&self.vertices[i], self.costs[i])
    }

    fn fn_evals(&self) -> FnEvalMap {
        FnEvalMap::from([("cost_count".to_string(), self.cost_count)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::{MLEOptions, run::run_search, traits::Termination};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Initial vertex layout and the size metric.
    // - Convergence on a smooth quadratic bowl.
    // - Behavior next to a region where the objective is `+∞`.
    // -------------------------------------------------------------------------

    /// (θ0 − 1)² + 2(θ1 + 0.5)², infeasible for θ0 > 3.
    struct Bowl;

    impl NegLogLikelihood for Bowl {
        type Data = ();
        fn value(&self, theta: &Theta, _: &()) -> OptResult<Cost> {
            if theta[0] > 3.0 {
                return Ok(f64::INFINITY);
            }
            Ok((theta[0] - 1.0).powi(2) + 2.0 * (theta[1] + 0.5).powi(2))
        }
        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }
    }

    /// (x − 2)² for x ≥ 1.5, +∞ otherwise.
    struct Wall;

    impl NegLogLikelihood for Wall {
        type Data = ();
        fn value(&self, theta: &Theta, _: &()) -> OptResult<Cost> {
            if theta[0] < 1.5 {
                return Ok(f64::INFINITY);
            }
            Ok((theta[0] - 2.0).powi(2))
        }
        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }
    }

    #[test]
    // Purpose
    // -------
    // `start` lays out θ0 plus one step along each axis.
    //
    // Given
    // -----
    // - θ0 = [0, 0], step 0.5.
    //
    // Expect
    // ------
    // - Vertices [0,0], [0.5,0], [0,0.5]; size = mean distance to centroid.
    fn start_builds_axis_aligned_simplex() {
        // Arrange
        let mut search = SimplexSearch::new(&Bowl, &(), array![0.0, 0.0], 0.5, 1e-3);

        // Act
        search.start().unwrap();

        // Assert
        assert_eq!(search.vertices(), &[array![0.0, 0.0], array![0.5, 0.0], array![0.0, 0.5]]);
        let c = 0.5_f64 / 3.0;
        let d0 = (2.0 * c * c).sqrt();
        let d1 = ((0.5 - c).powi(2) + c * c).sqrt();
        assert_abs_diff_eq!(search.metric().unwrap(), (d0 + 2.0 * d1) / 3.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Nelder–Mead finds the minimum of a smooth bowl.
    //
    // Given
    // -----
    // - `Bowl` from θ0 = [0, 0], step 0.1, default options.
    //
    // Expect
    // ------
    // - Converged near [1, −0.5] with a near-zero objective.
    fn converges_on_quadratic_bowl() {
        // Arrange
        let opts = MLEOptions::simplex(0.1, false).unwrap();
        let search = SimplexSearch::new(&Bowl, &(), array![0.0, 0.0], 0.1, opts.tols.size());

        // Act
        let out = run_search(search, &Bowl, &(), &opts).unwrap();

        // Assert
        assert_eq!(out.termination, Termination::Converged);
        assert_abs_diff_eq!(out.theta_hat[0], 1.0, epsilon = 1e-2);
        assert_abs_diff_eq!(out.theta_hat[1], -0.5, epsilon = 1e-2);
        assert!(out.neg_log_likelihood < 1e-3);
        assert!(out.fn_evals["cost_count"] > 3);
    }

    #[test]
    // Purpose
    // -------
    // Infeasible trial points are treated as worst values, not errors.
    //
    // Given
    // -----
    // - `Wall` from θ0 = 1.6 with step 0.2: reflections past the minimum
    //   are fine, and moves toward x < 1.5 hit `+∞`.
    //
    // Expect
    // ------
    // - The best point stays feasible and ends near 2.
    fn infeasible_trials_are_rejected_not_fatal() {
        // Arrange
        let opts = MLEOptions::simplex(0.2, false).unwrap();
        let search = SimplexSearch::new(&Wall, &(), array![1.6], 0.2, opts.tols.size());

        // Act
        let out = run_search(search, &Wall, &(), &opts).unwrap();

        // Assert
        assert!(out.neg_log_likelihood.is_finite());
        assert_abs_diff_eq!(out.theta_hat[0], 2.0, epsilon = 1e-2);
    }
}
