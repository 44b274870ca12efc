//! Console rendering of a solved field, ported from the original `ConsoleHexLink`.

use std::collections::HashSet;

use unordered_pair::UnorderedPair;

use crate::hex_field::HexField;
use crate::instance::Instance;
use crate::location::Location;

const LEFT_SYMBOL: &str = " \\";
const RIGHT_SYMBOL: &str = "/ ";

/// The message printed when an instance has no solutions.
pub fn render_no_solutions() -> &'static str {
    "Решений нет."
}

/// Render one solution's path edges over `instance`'s field, cell numbers on one line
/// and the diagonal/vertical connectors interleaved on the line beneath.
pub fn render_solution(instance: &Instance, solution: &[(Location, Location)]) -> String {
    let edges: HashSet<UnorderedPair<Location>> = solution.iter().map(|&(a, b)| UnorderedPair::from((a, b))).collect();

    let horizontal = horizontal_part(instance.field(), &edges);
    let vertical = vertical_part(instance.field(), &edges);

    let mut lines = Vec::with_capacity(horizontal.len() * 2);
    for (i, line) in horizontal.into_iter().enumerate() {
        lines.push(line);
        lines.push(vertical.get(i).cloned().unwrap_or_default());
    }
    lines.join("\n")
}

fn horizontal_part(field: &HexField, edges: &HashSet<UnorderedPair<Location>>) -> Vec<String> {
    let side = field.side() as isize;
    let mut indent = side - 1;
    let mut result = Vec::with_capacity(field.side());

    for (i, row) in field.rows().iter().enumerate() {
        let mut line = " ".repeat(indent.unsigned_abs());
        for (j, cell) in row.iter().enumerate() {
            let here = Location(i, j);
            let right = Location(i, j + 1);
            let between = if edges.contains(&UnorderedPair::from((here, right))) { "--" } else { "  " };
            line.push_str(&format!("{cell} {between} "));
        }
        result.push(line.trim_end().to_string());
        indent -= 2;
    }

    result
}

fn vertical_part(field: &HexField, edges: &HashSet<UnorderedPair<Location>>) -> Vec<String> {
    let side = field.side() as isize;
    let middle = field.side() / 2;
    let mut indent = side;
    let mut result = Vec::with_capacity(field.side());

    for (i, row) in field.rows().iter().enumerate() {
        let mut line = " ".repeat((indent.unsigned_abs()).saturating_sub(1));
        for j in 0..=row.len() {
            let here = Location(i, j);
            let left = edge_glyph(field, edges, here, LEFT_SYMBOL, i, middle);
            let right = edge_glyph(field, edges, here, RIGHT_SYMBOL, i, middle);
            line.push_str(&format!("{left} {right}"));
        }
        result.push(line.trim_end().to_string());
        indent -= 2;
    }

    result.into_iter().skip(1).collect()
}

fn edge_glyph(
    field: &HexField,
    edges: &HashSet<UnorderedPair<Location>>,
    start: Location,
    symbol: &str,
    row: usize,
    middle: usize,
) -> String {
    let (above_left, above_right) = (start.offset_by((-1, -1)), start.offset_by((-1, 0)));
    let (below_left, below_right) = (start.offset_by((-1, 0)), start.offset_by((-1, 1)));

    let (near, far) = if symbol == LEFT_SYMBOL {
        (above_left, above_right)
    } else {
        (below_left, below_right)
    };
    let end = if row <= middle { near } else { far };

    if edges.contains(&UnorderedPair::from((start, end))) {
        symbol.to_string()
    } else if field.is_valid(end) {
        "  ".to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::Instance;
    use crate::solver::Solver;

    #[test]
    fn renders_without_panicking_on_smallest_board() {
        let rows: Vec<Vec<String>> = vec![
            vec!["1".into(), "0".into()],
            vec!["0".into(), "1".into(), "0".into()],
            vec!["0".into(), "0".into()],
        ];
        let instance = Instance::parse(Some(&rows)).unwrap();
        let solver = Solver::new(&instance);
        let solution = solver.solutions().next().expect("has a solution");
        let rendered = render_solution(&instance, &solution);
        assert!(rendered.contains('1'));
    }

    #[test]
    fn no_solutions_message_is_stable() {
        assert_eq!(render_no_solutions(), "Решений нет.");
    }
}
