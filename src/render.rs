//! Truth-table rendering (§6.3): turns a parsed [`RenderTask`] into the exact textual table
//! format, building one throwaway [`Engine`] per output column so each formula gets its own
//! fresh unique table and apply cache (§3's lifecycle: one build per engine instance).

use crate::engine::Engine;
use crate::error::ProgramError;
use crate::parser::RenderTask;
use crate::variable::VariableOrder;

/// Renders every task in `tasks` against the shared declared-variable order, concatenating each
/// task's block (header, separator, rows, trailing blank line) in program order.
pub fn render_program(variables: &VariableOrder, tasks: &[RenderTask]) -> Result<String, ProgramError> {
    let mut out = String::new();
    for task in tasks {
        match task {
            RenderTask::Show { outputs } => render_block(&mut out, variables, outputs, false)?,
            RenderTask::ShowOnes { outputs } => render_block(&mut out, variables, outputs, true)?,
        }
    }
    Ok(out)
}

fn render_block(
    out: &mut String,
    variables: &VariableOrder,
    outputs: &[(std::sync::Arc<str>, crate::expr::Expr)],
    ones_only: bool,
) -> Result<(), ProgramError> {
    let mut engines = Vec::with_capacity(outputs.len());
    for (_, expr) in outputs {
        let mut engine = Engine::new();
        engine.build(expr, variables.clone())?;
        engines.push(engine);
    }

    let var_names: Vec<&str> = variables.names().iter().map(|n| n.as_ref()).collect();
    let output_names: Vec<&str> = outputs.iter().map(|(name, _)| name.as_ref()).collect();

    let header = format!("# {} | {}", var_names.join(" "), output_names.join(" "));
    out.push_str(&header);
    out.push('\n');
    out.push_str("# ");
    out.push_str(&"-".repeat(header.len().saturating_sub(2)));
    out.push('\n');

    let n = variables.len();
    let total_rows = 1usize << n;
    for row in 0..total_rows {
        let assignment = row_assignment(variables, row, total_rows);
        let results: Vec<bool> = engines.iter().map(|engine| engine.evaluate(&assignment)).collect();

        if ones_only && !results.iter().any(|&b| b) {
            continue;
        }

        let bits: Vec<&str> = var_names
            .iter()
            .map(|name| if *assignment.get(*name).unwrap_or(&false) { "1" } else { "0" })
            .collect();
        let result_bits: Vec<&str> = results.iter().map(|&b| if b { "1" } else { "0" }).collect();

        out.push_str("  ");
        out.push_str(&bits.join(" "));
        out.push_str("   ");
        out.push_str(&result_bits.join(" "));
        out.push('\n');
    }

    out.push('\n');
    Ok(())
}

/// Row `row` of `total_rows`, with the first declared variable as the most-significant bit
/// (§6.3).
fn row_assignment(variables: &VariableOrder, row: usize, total_rows: usize) -> crate::engine::Assignment {
    let n = variables.len();
    debug_assert_eq!(total_rows, 1usize << n);
    let mut assignment = crate::engine::Assignment::new();
    for (i, name) in variables.names().iter().enumerate() {
        let shift = n - 1 - i;
        let bit = (row >> shift) & 1 == 1;
        assignment.insert(name.clone(), bit);
    }
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn two_variable_or_matches_the_scenario_table() {
        let (variables, tasks) = parse("var x y; z = x or y; show z;").unwrap();
        let rendered = render_program(&variables, &tasks).unwrap();
        let mut lines = rendered.lines();
        assert_eq!(lines.next().unwrap(), "# x y | z");
        assert!(lines.next().unwrap().starts_with("# -"));
        assert_eq!(lines.next().unwrap(), "  0 0   0");
        assert_eq!(lines.next().unwrap(), "  0 1   1");
        assert_eq!(lines.next().unwrap(), "  1 0   1");
        assert_eq!(lines.next().unwrap(), "  1 1   1");
        assert_eq!(lines.next().unwrap(), "");
    }

    #[test]
    fn constant_short_circuit_produces_two_output_columns() {
        let (variables, tasks) = parse("var x; f = x and True; g = False or x; show f g;").unwrap();
        let rendered = render_program(&variables, &tasks).unwrap();
        let mut lines = rendered.lines();
        assert_eq!(lines.next().unwrap(), "# x | f g");
        lines.next();
        assert_eq!(lines.next().unwrap(), "  0   0 0");
        assert_eq!(lines.next().unwrap(), "  1   1 1");
    }

    #[test]
    fn show_ones_suppresses_zero_rows() {
        let (variables, tasks) = parse("var a b c; f = a and b and c; show_ones f;").unwrap();
        let rendered = render_program(&variables, &tasks).unwrap();
        let data_rows: Vec<&str> = rendered
            .lines()
            .skip(2)
            .filter(|line| !line.is_empty())
            .collect();
        assert_eq!(data_rows, vec!["  1 1 1   1"]);
    }
}
