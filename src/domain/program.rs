// Lowering of the declarative model into a backend-neutral linear program.
//
// Both backends translate the same lowered program, so they see the same
// variables, the same constraint rows and the same objective — the feasible
// region cannot drift between them. Group partitions are computed once per
// referenced column and shared by every spec that uses that column.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::debug;

use super::compiler::ModelError;
use super::dataset::Dataset;
use super::model::ConstraintModel;
use super::value_objects::{Direction, Relation, VariableKind};

/// Definition of one solver variable
#[derive(Debug, Clone)]
pub struct VariableDef {
    pub name: String,
    pub kind: VariableKind,
    pub lower: f64,
    pub upper: Option<f64>,
}

impl VariableDef {
    pub fn row(index: usize, kind: VariableKind) -> Self {
        Self {
            name: format!("x_{index}"),
            kind,
            lower: 0.0,
            upper: match kind {
                VariableKind::Binary => Some(1.0),
                _ => None,
            },
        }
    }

    pub fn activation(group_column: &str, group: &str) -> Self {
        Self {
            name: format!("y_{group_column}_{group}"),
            kind: VariableKind::Binary,
            lower: 0.0,
            upper: Some(1.0),
        }
    }
}

/// One linear constraint row: Σ coeff·variable ⟨relation⟩ rhs
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(usize, f64)>,
    pub relation: Relation,
    pub rhs: f64,
}

/// Backend-neutral lowered program.
///
/// Variables 0..rows are the per-row decision variables; any activation
/// variables introduced by linking groups follow them.
#[derive(Debug, Clone)]
pub struct LinearProgram {
    pub direction: Direction,
    pub objective: Vec<f64>,
    pub variables: Vec<VariableDef>,
    pub constraints: Vec<LinearConstraint>,
    pub rows: usize,
}

impl LinearProgram {
    pub fn is_mixed_integer(&self) -> bool {
        self.variables.iter().any(|v| v.kind.is_integer())
    }

    /// Whether `values` is a feasible point of this program, within `tol`:
    /// finite, inside every variable's bounds, integral where the variable
    /// kind demands it, and satisfying every constraint row. Backends use
    /// this to vet an incumbent whose validity their API does not report.
    pub fn satisfied_by(&self, values: &[f64], tol: f64) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }

        for (def, &value) in self.variables.iter().zip(values) {
            if !value.is_finite() || value < def.lower - tol {
                return false;
            }
            if let Some(upper) = def.upper {
                if value > upper + tol {
                    return false;
                }
            }
            if def.kind.is_integer() && (value - value.round()).abs() > tol {
                return false;
            }
        }

        self.constraints.iter().all(|constraint| {
            let lhs: f64 = constraint
                .terms
                .iter()
                .map(|&(i, coeff)| coeff * values[i])
                .sum();
            match constraint.relation {
                Relation::LessEq => lhs <= constraint.rhs + tol,
                Relation::GreaterEq => lhs >= constraint.rhs - tol,
                Relation::Equal => (lhs - constraint.rhs).abs() <= tol,
            }
        })
    }
}

type Partition = Vec<(String, Vec<usize>)>;

fn partition<'a>(
    cache: &'a mut HashMap<String, Partition>,
    data: &Dataset,
    column: &str,
) -> Result<&'a Partition, ModelError> {
    match cache.entry(column.to_string()) {
        Entry::Occupied(entry) => Ok(entry.into_mut()),
        Entry::Vacant(entry) => Ok(entry.insert(data.group_rows(column)?)),
    }
}

impl ConstraintModel {
    /// Expand the declarative specs against `data` into a `LinearProgram`.
    ///
    /// All configuration and data errors surface here, before any solver is
    /// touched: a missing objective, unknown or non-numeric columns, and
    /// group rhs/bound columns that are not constant within a group.
    pub fn lower(&self, data: &Dataset) -> Result<LinearProgram, ModelError> {
        if data.rows() == 0 {
            return Err(ModelError::EmptyDataset);
        }

        let objective_spec = self.objective().ok_or(ModelError::MissingObjective)?;
        let objective_column = data.numeric(&objective_spec.column)?;

        let kind = self.variable_kind();
        let mut variables: Vec<VariableDef> =
            (0..data.rows()).map(|i| VariableDef::row(i, kind)).collect();
        let mut objective: Vec<f64> = objective_column.to_vec();
        let mut constraints: Vec<LinearConstraint> = Vec::new();
        let mut partitions: HashMap<String, Partition> = HashMap::new();

        // Group aggregation constraints: one row per distinct group value
        for spec in self.group_constraints() {
            let groups = partition(&mut partitions, data, &spec.group_column)?;
            for (group, rows) in groups {
                let rhs = data.uniform_numeric(&spec.rhs_column, group, rows)?;
                constraints.push(LinearConstraint {
                    name: format!("grp_{}_{}", spec.group_column, group),
                    terms: rows.iter().map(|&i| (i, 1.0)).collect(),
                    relation: spec.relation,
                    rhs,
                });
            }
        }

        // Linking groups: one binary activation variable per group value,
        // with the group total coupled to it. Σx ≤ u·y becomes Σx − u·y ≤ 0
        // in row form (and symmetrically for the lower bound), so the group
        // can be nonzero only when its activation is 1.
        for spec in self.linking_groups() {
            let groups = partition(&mut partitions, data, &spec.group_column)?;
            for (group, rows) in groups {
                let activation = variables.len();
                variables.push(VariableDef::activation(&spec.group_column, group));
                objective.push(0.0);

                if let Some(upper_column) = &spec.upper_column {
                    let upper = data.uniform_numeric(upper_column, group, rows)?;
                    let mut terms: Vec<(usize, f64)> =
                        rows.iter().map(|&i| (i, 1.0)).collect();
                    terms.push((activation, -upper));
                    constraints.push(LinearConstraint {
                        name: format!("link_up_{}_{}", spec.group_column, group),
                        terms,
                        relation: Relation::LessEq,
                        rhs: 0.0,
                    });
                }

                if let Some(lower_column) = &spec.lower_column {
                    let lower = data.uniform_numeric(lower_column, group, rows)?;
                    let mut terms: Vec<(usize, f64)> =
                        rows.iter().map(|&i| (i, 1.0)).collect();
                    terms.push((activation, -lower));
                    constraints.push(LinearConstraint {
                        name: format!("link_lo_{}_{}", spec.group_column, group),
                        terms,
                        relation: Relation::GreaterEq,
                        rhs: 0.0,
                    });
                }
            }
        }

        // Single weighted-sum budget cap over all rows
        if let Some(budget) = self.budget() {
            let amounts = data.numeric(&budget.amount_column)?;
            constraints.push(LinearConstraint {
                name: "budget".to_string(),
                terms: amounts.iter().copied().enumerate().collect(),
                relation: Relation::LessEq,
                rhs: budget.limit,
            });
        }

        debug!(
            "lowered model: {} variables ({} rows), {} constraints",
            variables.len(),
            data.rows(),
            constraints.len()
        );

        Ok(LinearProgram {
            direction: objective_spec.direction,
            objective,
            variables,
            constraints,
            rows: data.rows(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{GroupConstraintSpec, LinkingGroupSpec};

    fn sample() -> Dataset {
        Dataset::new()
            .with_key("supplier", vec!["a", "a", "b", "b"])
            .unwrap()
            .with_numeric("value", vec![10.0, 20.0, 30.0, 40.0])
            .unwrap()
            .with_numeric("cap", vec![1.0, 1.0, 2.0, 2.0])
            .unwrap()
            .with_numeric("cost", vec![1.0, 1.0, 1.0, 1.0])
            .unwrap()
    }

    #[test]
    fn one_variable_per_row() {
        let mut model = ConstraintModel::new();
        model.set_objective(Direction::Maximize, "value");
        let program = model.lower(&sample()).unwrap();

        assert_eq!(program.variables.len(), 4);
        assert_eq!(program.rows, 4);
        assert_eq!(program.objective, vec![10.0, 20.0, 30.0, 40.0]);
        assert!(program.constraints.is_empty());
        assert!(!program.is_mixed_integer());
    }

    #[test]
    fn group_constraint_expands_per_distinct_value() {
        let mut model = ConstraintModel::new();
        model.set_objective(Direction::Maximize, "value");
        model.add_group_constraint(GroupConstraintSpec::new("supplier", Relation::LessEq, "cap"));
        let program = model.lower(&sample()).unwrap();

        assert_eq!(program.constraints.len(), 2);
        assert_eq!(program.constraints[0].terms, vec![(0, 1.0), (1, 1.0)]);
        assert_eq!(program.constraints[0].rhs, 1.0);
        assert_eq!(program.constraints[1].terms, vec![(2, 1.0), (3, 1.0)]);
        assert_eq!(program.constraints[1].rhs, 2.0);
    }

    #[test]
    fn linking_group_adds_activation_variables_and_rows() {
        let mut model = ConstraintModel::new();
        model.set_objective(Direction::Maximize, "value");
        model.add_linking_group(
            LinkingGroupSpec::new("supplier")
                .with_upper("cap")
                .with_lower("cost"),
        );
        let program = model.lower(&sample()).unwrap();

        // 4 row variables + 2 binary activations, 2 constraints per group
        assert_eq!(program.variables.len(), 6);
        assert_eq!(program.constraints.len(), 4);
        assert!(program.is_mixed_integer());
        assert_eq!(program.variables[4].kind, VariableKind::Binary);
        assert_eq!(program.variables[4].name, "y_supplier_a");
        assert_eq!(program.objective[4], 0.0);

        let upper = &program.constraints[0];
        assert_eq!(upper.relation, Relation::LessEq);
        assert_eq!(upper.rhs, 0.0);
        assert_eq!(upper.terms, vec![(0, 1.0), (1, 1.0), (4, -1.0)]);

        let lower = &program.constraints[1];
        assert_eq!(lower.relation, Relation::GreaterEq);
        assert_eq!(lower.terms, vec![(0, 1.0), (1, 1.0), (4, -1.0)]);
    }

    #[test]
    fn linking_group_without_lower_bound_skips_that_row() {
        let mut model = ConstraintModel::new();
        model.set_objective(Direction::Maximize, "value");
        model.add_linking_group(LinkingGroupSpec::new("supplier").with_upper("cap"));
        let program = model.lower(&sample()).unwrap();

        assert_eq!(program.constraints.len(), 2);
        assert!(program
            .constraints
            .iter()
            .all(|c| c.relation == Relation::LessEq));
    }

    #[test]
    fn budget_is_one_weighted_row_over_all_variables() {
        let mut model = ConstraintModel::new();
        model.set_objective(Direction::Maximize, "value");
        model.set_budget("cost", 2.0);
        let program = model.lower(&sample()).unwrap();

        assert_eq!(program.constraints.len(), 1);
        let budget = &program.constraints[0];
        assert_eq!(budget.rhs, 2.0);
        assert_eq!(budget.terms.len(), 4);
        assert_eq!(budget.terms[2], (2, 1.0));
    }

    #[test]
    fn missing_objective_fails_fast() {
        let model = ConstraintModel::new();
        assert_eq!(
            model.lower(&sample()).unwrap_err(),
            ModelError::MissingObjective
        );
    }

    #[test]
    fn non_uniform_rhs_is_a_named_error() {
        let mut model = ConstraintModel::new();
        model.set_objective(Direction::Maximize, "value");
        // "value" varies inside supplier groups, so it cannot be a group rhs
        model.add_group_constraint(GroupConstraintSpec::new(
            "supplier",
            Relation::LessEq,
            "value",
        ));
        let err = model.lower(&sample()).unwrap_err();
        assert!(matches!(err, ModelError::NonUniformGroup { .. }));
    }

    #[test]
    fn satisfied_by_vets_incumbents_against_the_whole_program() {
        let mut model = ConstraintModel::new();
        model.set_variable_kind(VariableKind::Binary);
        model.set_objective(Direction::Maximize, "value");
        model.add_group_constraint(GroupConstraintSpec::new("supplier", Relation::LessEq, "cap"));
        model.set_budget("cost", 2.0);
        let program = model.lower(&sample()).unwrap();

        // Row 1 from group a, row 2 from group b: within caps and budget
        assert!(program.satisfied_by(&[0.0, 1.0, 1.0, 0.0], 1e-6));
        // Group a cap is 1, two rows violate it
        assert!(!program.satisfied_by(&[1.0, 1.0, 0.0, 0.0], 1e-6));
        // Budget is 2, three rows violate it
        assert!(!program.satisfied_by(&[0.0, 1.0, 1.0, 1.0], 1e-6));
        // Fractional value on a binary variable
        assert!(!program.satisfied_by(&[0.0, 0.5, 1.0, 0.0], 1e-6));
        // Wrong arity and non-finite entries are never feasible
        assert!(!program.satisfied_by(&[1.0, 0.0], 1e-6));
        assert!(!program.satisfied_by(&[f64::NAN, 0.0, 0.0, 0.0], 1e-6));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let mut model = ConstraintModel::new();
        model.set_objective(Direction::Minimize, "value");
        assert_eq!(
            model.lower(&Dataset::new()).unwrap_err(),
            ModelError::EmptyDataset
        );
    }
}
