//! Property-based tests for the reader invariants
//!
//! - A container of size `n` runs its item reader exactly `n` times and
//!   consumes exactly the lines those reads consume
//! - A line reader expecting `m` tokens accepts a line iff it has `m` tokens
//! - Splitting on the default separator never drops empty tokens

mod common;

use common::*;
use linewise::{ChildReader, Context, ContainerReader, FieldsReader, ParserConfig, SectionReader};
use proptest::prelude::*;

/// Generate tokens without whitespace
fn token_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9.]{0,6}"
}

proptest! {
    #[test]
    fn container_reads_exactly_n_items(
        values in prop::collection::vec((-1000i32..1000, -1000i32..1000), 0..40),
        trailing in 0usize..5,
    ) {
        let n = values.len();
        let mut lines: Vec<String> = values.iter().map(|(x, y)| format!("{} {}", x, y)).collect();
        lines.extend((0..trailing).map(|i| format!("trailing {}", i)));

        let mut ctx = Context::new(lines);
        ctx.set_variable("N", n.to_string());
        let reader = ContainerReader::<Point, Vec<Point>, Shape>::list("N", point_reader());
        let points = reader.read(&mut ctx, None).unwrap();

        prop_assert_eq!(points.len(), n);
        prop_assert_eq!(ctx.lines_read(), n);
        prop_assert_eq!(ctx.remaining_lines(), trailing);
        for (point, (x, y)) in points.iter().zip(&values) {
            prop_assert_eq!(point, &Point { x: *x as f64, y: *y as f64 });
        }
    }

    #[test]
    fn arity_check_matches_token_count(
        tokens in prop::collection::vec("[a-z0-9]{1,4}", 0..8),
        expected in 0usize..8,
    ) {
        let labels: Vec<String> = (0..expected).map(|i| format!("@V{}", i)).collect();
        let reader = FieldsReader::<()>::new(labels);
        let mut ctx = Context::new([tokens.join(" ")]);
        let result = reader.read_section(&mut (), &mut ctx);

        prop_assert_eq!(result.is_ok(), tokens.len() == expected);
        if tokens.len() == expected {
            for (i, token) in tokens.iter().enumerate() {
                prop_assert_eq!(ctx.get_variable(&format!("V{}", i)).unwrap(), token.as_str());
            }
        }
    }

    #[test]
    fn split_preserves_empty_tokens(tokens in prop::collection::vec(token_strategy(), 1..10)) {
        let line = tokens.join(" ");
        prop_assume!(!line.is_empty());
        let config = ParserConfig::default();
        prop_assert_eq!(config.split(&line), tokens.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn generated_problems_parse(shapes in 0usize..8, points in 0usize..8) {
        let problem = problem_parser().parse(&generate_problem(shapes, points)).unwrap();
        prop_assert_eq!(problem.shapes.len(), shapes);
        prop_assert!(problem.shapes.iter().all(|s| s.points.len() == points));
    }
}
