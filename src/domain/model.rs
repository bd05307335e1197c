// Declarative constraint model: specs expressed over column names and row
// groupings, independent of any solver

use super::value_objects::{Direction, Relation, VariableKind};

/// Objective: sum over all rows of variable × `column` value
#[derive(Debug, Clone)]
pub struct ObjectiveSpec {
    pub direction: Direction,
    pub column: String,
}

/// One aggregate bound per distinct value of `group_column`:
/// Σ variable ⟨relation⟩ rhs, with the rhs read (uniformly) from the group's
/// rows in `rhs_column`
#[derive(Debug, Clone)]
pub struct GroupConstraintSpec {
    pub group_column: String,
    pub relation: Relation,
    pub rhs_column: String,
}

impl GroupConstraintSpec {
    pub fn new(
        group_column: impl Into<String>,
        relation: Relation,
        rhs_column: impl Into<String>,
    ) -> Self {
        Self {
            group_column: group_column.into(),
            relation,
            rhs_column: rhs_column.into(),
        }
    }
}

/// Indicator coupling per distinct value of `group_column`: a binary
/// activation variable y with Σ variable ≤ upper·y and/or Σ variable ≥
/// lower·y. Omitting a bound column skips the corresponding constraint.
#[derive(Debug, Clone)]
pub struct LinkingGroupSpec {
    pub group_column: String,
    pub upper_column: Option<String>,
    pub lower_column: Option<String>,
}

impl LinkingGroupSpec {
    pub fn new(group_column: impl Into<String>) -> Self {
        Self {
            group_column: group_column.into(),
            upper_column: None,
            lower_column: None,
        }
    }

    pub fn with_upper(mut self, column: impl Into<String>) -> Self {
        self.upper_column = Some(column.into());
        self
    }

    pub fn with_lower(mut self, column: impl Into<String>) -> Self {
        self.lower_column = Some(column.into());
        self
    }
}

/// Σ variable × `amount_column` ≤ limit over all rows
#[derive(Debug, Clone)]
pub struct BudgetSpec {
    pub amount_column: String,
    pub limit: f64,
}

/// Backend-agnostic soft limits on the underlying search.
///
/// Both limits are cooperative hints: the backend may overshoot a time limit
/// slightly, and a gap limit only applies to integer models. Zero or negative
/// inputs mean "no limit".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolveConfig {
    pub time_limit: Option<f64>,
    pub relative_gap: Option<f64>,
}

impl SolveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = (seconds > 0.0).then_some(seconds);
        self
    }

    pub fn with_relative_gap(mut self, gap: f64) -> Self {
        self.relative_gap = (gap > 0.0).then_some(gap);
        self
    }
}

/// Accumulates the declarative specs for one optimization model.
///
/// Operations are pure appends/sets and may be called in any order; nothing
/// here touches a solver. The model is lowered (`lower`) once per backend
/// invocation and holds no state across solves.
#[derive(Debug, Clone)]
pub struct ConstraintModel {
    variable_kind: VariableKind,
    objective: Option<ObjectiveSpec>,
    group_constraints: Vec<GroupConstraintSpec>,
    linking_groups: Vec<LinkingGroupSpec>,
    budget: Option<BudgetSpec>,
}

impl Default for ConstraintModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstraintModel {
    pub fn new() -> Self {
        Self {
            variable_kind: VariableKind::Continuous,
            objective: None,
            group_constraints: Vec::new(),
            linking_groups: Vec::new(),
            budget: None,
        }
    }

    /// Kind applied uniformly to every row variable (lower bound 0, no
    /// explicit upper bound; Binary implicitly bounds at 1)
    pub fn set_variable_kind(&mut self, kind: VariableKind) {
        self.variable_kind = kind;
    }

    pub fn set_objective(&mut self, direction: Direction, column: impl Into<String>) {
        self.objective = Some(ObjectiveSpec {
            direction,
            column: column.into(),
        });
    }

    pub fn add_group_constraint(&mut self, spec: GroupConstraintSpec) {
        self.group_constraints.push(spec);
    }

    pub fn add_linking_group(&mut self, spec: LinkingGroupSpec) {
        self.linking_groups.push(spec);
    }

    /// A non-positive limit means "no budget" and leaves the model unchanged
    pub fn set_budget(&mut self, amount_column: impl Into<String>, limit: f64) {
        if limit > 0.0 {
            self.budget = Some(BudgetSpec {
                amount_column: amount_column.into(),
                limit,
            });
        }
    }

    pub fn variable_kind(&self) -> VariableKind {
        self.variable_kind
    }

    pub fn objective(&self) -> Option<&ObjectiveSpec> {
        self.objective.as_ref()
    }

    pub fn group_constraints(&self) -> &[GroupConstraintSpec] {
        &self.group_constraints
    }

    pub fn linking_groups(&self) -> &[LinkingGroupSpec] {
        &self.linking_groups
    }

    pub fn budget(&self) -> Option<&BudgetSpec> {
        self.budget.as_ref()
    }

    /// Linking groups introduce binary activation variables, so a model with
    /// any linking spec is mixed-integer even with continuous row variables
    pub fn is_mixed_integer(&self) -> bool {
        self.variable_kind.is_integer() || !self.linking_groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_limits_mean_unlimited() {
        let config = SolveConfig::new().with_time_limit(0.0).with_relative_gap(0.0);
        assert_eq!(config.time_limit, None);
        assert_eq!(config.relative_gap, None);

        let config = SolveConfig::new().with_time_limit(30.0).with_relative_gap(0.05);
        assert_eq!(config.time_limit, Some(30.0));
        assert_eq!(config.relative_gap, Some(0.05));
    }

    #[test]
    fn non_positive_budget_is_ignored() {
        let mut model = ConstraintModel::new();
        model.set_budget("cost", 0.0);
        assert!(model.budget().is_none());

        model.set_budget("cost", 100.0);
        assert_eq!(model.budget().unwrap().limit, 100.0);
    }

    #[test]
    fn linking_groups_make_the_model_mixed_integer() {
        let mut model = ConstraintModel::new();
        assert!(!model.is_mixed_integer());

        model.add_linking_group(LinkingGroupSpec::new("supplier").with_upper("cap"));
        assert!(model.is_mixed_integer());

        let mut model = ConstraintModel::new();
        model.set_variable_kind(VariableKind::Binary);
        assert!(model.is_mixed_integer());
    }
}
