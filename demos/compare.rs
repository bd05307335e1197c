// Demo: run the same model on both backends and tabulate the results.
//
// Two supplier groups with per-group capacity caps and an activation
// (linking) constraint: a supplier's rows can only carry flow when the
// supplier is switched on, and once on must ship at least its minimum.

use rowopt::{
    ConstraintModel, Dataset, Direction, GroupConstraintSpec, LinkingGroupSpec,
    OptimizationService, Relation, SolveConfig, VariableKind,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data = Dataset::new()
        .with_key("supplier", vec!["acme", "acme", "bolt", "bolt"])?
        .with_numeric("profit", vec![4.0, 6.0, 5.0, 3.0])?
        .with_numeric("capacity", vec![10.0, 10.0, 8.0, 8.0])?
        .with_numeric("moq", vec![3.0, 3.0, 2.0, 2.0])?
        .with_numeric("units", vec![1.0, 1.0, 1.0, 1.0])?;

    let mut model = ConstraintModel::new();
    model.set_variable_kind(VariableKind::Integer);
    model.set_objective(Direction::Maximize, "profit");
    model.add_group_constraint(GroupConstraintSpec::new(
        "supplier",
        Relation::LessEq,
        "capacity",
    ));
    model.add_linking_group(
        LinkingGroupSpec::new("supplier")
            .with_upper("capacity")
            .with_lower("moq"),
    );
    model.set_budget("units", 12.0);

    // One tight config and one unlimited config per backend: early stop
    // versus full optimal
    let configs = [
        SolveConfig::new().with_time_limit(1.0).with_relative_gap(0.10),
        SolveConfig::new(),
    ];

    let service = OptimizationService::new();
    let results = service.compare(&data, &model, &configs)?;

    println!(
        "{:<14} {:<12} {:>12} {:>12} {:>8}",
        "Solver", "Status", "Objective", "Time (s)", "Gap"
    );
    for result in &results {
        println!(
            "{:<14} {:<12} {:>12} {:>12.6} {:>8}",
            result.backend.to_string(),
            result.status.to_string(),
            result
                .objective
                .map_or_else(|| "-".to_string(), |v| format!("{v:.2}")),
            result.solve_time,
            result
                .gap
                .map_or_else(|| "-".to_string(), |g| format!("{g:.4}")),
        );
    }

    Ok(())
}
