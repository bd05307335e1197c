// Demo: 0/1 selection with a budget cap
//
// Four candidate rows, each worth a value and costing one unit:
//
// Row | Value | Cost
// ----|-------|-----
//  0  |  10   |  1
//  1  |  20   |  1
//  2  |  30   |  1
//  3  |  40   |  1
//
// With a budget of 2 units the optimal selection is rows 2 and 3
// (objective 70).

use rowopt::{
    BackendKind, ConstraintModel, Dataset, Direction, OptimizationService, SolveConfig,
    VariableKind,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data = Dataset::new()
        .with_numeric("value", vec![10.0, 20.0, 30.0, 40.0])?
        .with_numeric("cost", vec![1.0, 1.0, 1.0, 1.0])?;

    let mut model = ConstraintModel::new();
    model.set_variable_kind(VariableKind::Binary);
    model.set_objective(Direction::Maximize, "value");
    model.set_budget("cost", 2.0);

    let service = OptimizationService::new();
    let result = service.solve(&data, &model, BackendKind::Highs, &SolveConfig::new())?;

    println!("Status:    {}", result.status);
    println!("Objective: {:?}", result.objective);
    println!("Time:      {:.6}s", result.solve_time);
    println!("Selected rows: {:?}", result.selected_rows());

    Ok(())
}
