//! The opaque 0/1 integer-program solver seam.
//!
//! The exact-cover encoder talks to an external solver through two small
//! traits shaped after the classic MIP call surface: create a model, add
//! binary variables, add exactly-one equality constraints, optimize, read
//! back the 0/1 assignment. Every step can fail, and each failure surfaces
//! as an [`LpError`] so callers can tell a solver malfunction apart from a
//! proven-infeasible model.
//!
//! [`BranchBoundBackend`] is the bundled implementation: a unit-propagating
//! branch-and-bound feasibility solver specialized to exactly-one equality
//! systems, which is the only model class this crate ever emits. Any real
//! MIP solver can replace it by implementing [`LpBackend`].

/// Outcome of an [`LpModel::optimize`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum LpStatus {
    /// A feasible 0/1 assignment was found and can be read back.
    Optimal,
    /// The model was proven to have no feasible assignment.
    Infeasible,
}

/// Solver malfunction, distinct from infeasibility.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LpError {
    /// The backend could not create or extend the model.
    #[display("failed to build the model: {reason}")]
    Model {
        /// Backend-reported cause.
        reason: String,
    },
    /// A constraint referenced a variable that was never added.
    #[display("constraint references unknown variable {index}")]
    UnknownVariable {
        /// Offending variable index.
        index: usize,
    },
    /// The optimize call itself failed.
    #[display("optimize failed: {reason}")]
    Optimize {
        /// Backend-reported cause.
        reason: String,
    },
    /// The solution could not be read back.
    #[display("solution readback failed: {reason}")]
    Readback {
        /// Backend-reported cause.
        reason: String,
    },
}

/// An in-progress 0/1 feasibility model.
///
/// Variables are identified by dense zero-based indices in the order they
/// were added. The objective is irrelevant: models are solved purely for
/// feasibility.
pub trait LpModel {
    /// Adds `count` binary decision variables.
    ///
    /// # Errors
    ///
    /// Returns [`LpError::Model`] if the backend rejects the variables.
    fn add_binary_vars(&mut self, count: usize) -> Result<(), LpError>;

    /// Adds the equality constraint `sum(vars) == 1`.
    ///
    /// # Errors
    ///
    /// Returns [`LpError::UnknownVariable`] for an out-of-range index and
    /// [`LpError::Model`] if the backend rejects the constraint.
    fn add_exactly_one(&mut self, vars: &[usize]) -> Result<(), LpError>;

    /// Solves the model for feasibility.
    ///
    /// # Errors
    ///
    /// Returns [`LpError::Optimize`] if the solver itself fails; an
    /// infeasible model is the `Ok(LpStatus::Infeasible)` outcome, not an
    /// error.
    fn optimize(&mut self) -> Result<LpStatus, LpError>;

    /// Reads back the 0/1 assignment of the last optimal solve.
    ///
    /// # Errors
    ///
    /// Returns [`LpError::Readback`] if no optimal solution is stored.
    fn solution(&self) -> Result<Vec<bool>, LpError>;
}

/// Factory for [`LpModel`]s.
pub trait LpBackend {
    /// Model type produced by this backend.
    type Model: LpModel;

    /// Creates an empty model.
    ///
    /// # Errors
    ///
    /// Returns [`LpError::Model`] if the backend environment cannot be set
    /// up.
    fn new_model(&self) -> Result<Self::Model, LpError>;
}

/// Bundled feasibility solver for exactly-one equality systems.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchBoundBackend;

impl LpBackend for BranchBoundBackend {
    type Model = BranchBoundModel;

    fn new_model(&self) -> Result<Self::Model, LpError> {
        Ok(BranchBoundModel::default())
    }
}

/// Model state for [`BranchBoundBackend`].
#[derive(Debug, Default)]
pub struct BranchBoundModel {
    num_vars: usize,
    constraints: Vec<Vec<usize>>,
    solution: Option<Vec<bool>>,
}

impl LpModel for BranchBoundModel {
    fn add_binary_vars(&mut self, count: usize) -> Result<(), LpError> {
        self.num_vars += count;
        Ok(())
    }

    fn add_exactly_one(&mut self, vars: &[usize]) -> Result<(), LpError> {
        if let Some(&index) = vars.iter().find(|&&index| index >= self.num_vars) {
            return Err(LpError::UnknownVariable { index });
        }
        self.constraints.push(vars.to_vec());
        Ok(())
    }

    fn optimize(&mut self) -> Result<LpStatus, LpError> {
        let mut assignment = vec![None; self.num_vars];
        if self.settle(&mut assignment) {
            // variables left free by propagation belong to no unsatisfied
            // constraint; pin them to zero
            let values = assignment
                .into_iter()
                .map(Option::unwrap_or_default)
                .collect();
            self.solution = Some(values);
            Ok(LpStatus::Optimal)
        } else {
            self.solution = None;
            Ok(LpStatus::Infeasible)
        }
    }

    fn solution(&self) -> Result<Vec<bool>, LpError> {
        self.solution.clone().ok_or_else(|| LpError::Readback {
            reason: "no optimal solution stored".to_owned(),
        })
    }
}

impl BranchBoundModel {
    /// Extends `assignment` to satisfy every constraint, or reports that no
    /// extension exists. Unit propagation runs to a fixpoint between
    /// branching decisions; branching picks the unsatisfied constraint with
    /// the fewest free variables.
    fn settle(&self, assignment: &mut Vec<Option<bool>>) -> bool {
        if !self.propagate(assignment) {
            return false;
        }
        let Some(branch) = self.pick_branch(assignment) else {
            return true;
        };
        for index in branch {
            let mut trial = assignment.clone();
            trial[index] = Some(true);
            if self.settle(&mut trial) {
                *assignment = trial;
                return true;
            }
        }
        false
    }

    /// Applies unit consequences until nothing changes. Returns `false` on
    /// a contradicted constraint (two variables true, or none possible).
    fn propagate(&self, assignment: &mut [Option<bool>]) -> bool {
        loop {
            let mut changed = false;
            for constraint in &self.constraints {
                let trues = constraint
                    .iter()
                    .filter(|&&index| assignment[index] == Some(true))
                    .count();
                if trues > 1 {
                    return false;
                }
                let free: Vec<usize> = constraint
                    .iter()
                    .copied()
                    .filter(|&index| assignment[index].is_none())
                    .collect();
                if trues == 1 {
                    for index in free {
                        assignment[index] = Some(false);
                        changed = true;
                    }
                } else if free.is_empty() {
                    return false;
                } else if free.len() == 1 {
                    assignment[free[0]] = Some(true);
                    changed = true;
                }
            }
            if !changed {
                return true;
            }
        }
    }

    /// Free variables of the unsatisfied constraint with the fewest of
    /// them, or `None` when every constraint already has its one true
    /// variable.
    fn pick_branch(&self, assignment: &[Option<bool>]) -> Option<Vec<usize>> {
        self.constraints
            .iter()
            .filter(|constraint| {
                !constraint
                    .iter()
                    .any(|&index| assignment[index] == Some(true))
            })
            .map(|constraint| {
                constraint
                    .iter()
                    .copied()
                    .filter(|&index| assignment[index].is_none())
                    .collect::<Vec<usize>>()
            })
            .min_by_key(Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> BranchBoundModel {
        BranchBoundBackend.new_model().unwrap()
    }

    #[test]
    fn solves_a_tiny_exact_cover() {
        // universe {0,1,2}; sets: {0,1}, {2}, {1,2}; exact cover = {0,1} + {2}
        let mut m = model();
        m.add_binary_vars(3).unwrap();
        m.add_exactly_one(&[0]).unwrap(); // element 0: sets containing it
        m.add_exactly_one(&[0, 2]).unwrap(); // element 1
        m.add_exactly_one(&[1, 2]).unwrap(); // element 2
        assert_eq!(m.optimize().unwrap(), LpStatus::Optimal);

        let solution = m.solution().unwrap();
        assert_eq!(solution, vec![true, true, false]);
    }

    #[test]
    fn detects_infeasibility() {
        // x0 and x1 are both forced to 1, contradicting x0 + x1 == 1
        let mut m = model();
        m.add_binary_vars(2).unwrap();
        m.add_exactly_one(&[0]).unwrap();
        m.add_exactly_one(&[1]).unwrap();
        m.add_exactly_one(&[0, 1]).unwrap();
        assert_eq!(m.optimize().unwrap(), LpStatus::Infeasible);
        assert!(matches!(m.solution(), Err(LpError::Readback { .. })));
    }

    #[test]
    fn rejects_unknown_variables() {
        let mut m = model();
        m.add_binary_vars(2).unwrap();
        assert_eq!(
            m.add_exactly_one(&[0, 5]),
            Err(LpError::UnknownVariable { index: 5 })
        );
    }

    #[test]
    fn empty_model_is_trivially_feasible() {
        let mut m = model();
        assert_eq!(m.optimize().unwrap(), LpStatus::Optimal);
        assert!(m.solution().unwrap().is_empty());
    }

    #[test]
    fn branching_is_required_for_interleaved_constraints() {
        // two disjoint pairs plus cross constraints with no unit start
        let mut m = model();
        m.add_binary_vars(4).unwrap();
        m.add_exactly_one(&[0, 1]).unwrap();
        m.add_exactly_one(&[2, 3]).unwrap();
        m.add_exactly_one(&[0, 3]).unwrap();
        m.add_exactly_one(&[1, 2]).unwrap();
        assert_eq!(m.optimize().unwrap(), LpStatus::Optimal);

        let s = m.solution().unwrap();
        assert_eq!(s.iter().filter(|&&v| v).count(), 2);
        assert!(s[0] != s[1] && s[2] != s[3] && s[0] != s[3] && s[1] != s[2]);
    }
}
