use maze_robot::simulation::optimizer::{REWRITES, optimize, optimize_in_place};
use maze_robot::simulation::path::Path;
use proptest::prelude::*;

fn run(text: &str) -> String {
    optimize(&Path::parse(text, 128).unwrap()).to_string()
}

#[test]
fn test_overlapping_patterns_collapse_left_to_right() {
    assert_eq!(run("LDRDU"), "DDU");
}

#[test]
fn test_table_priority_beats_position() {
    // UDL sits further left, but LDR is higher in the table.
    assert_eq!(run("UDLDR"), "UDD");
}

#[test]
fn test_nested_excursions_fold_completely() {
    // L into a branch with two dead ends, back out the way it came.
    assert_eq!(run("LDUDL"), "D");
    // The folded excursion then combines with the outer junction.
    assert_eq!(run("ULDUDLL"), "R");
}

#[test]
fn test_symbols_around_the_match_are_kept() {
    assert_eq!(run("RRLDLUU"), "RRUUU");
}

#[test]
fn test_rewrite_count() {
    let mut path = Path::parse("LDUDL", 16).unwrap();
    assert_eq!(optimize_in_place(&mut path), 2);
    assert_eq!(optimize_in_place(&mut path), 0);
}

#[test]
fn test_capacity_is_kept() {
    let path = Path::parse("LDR", 5).unwrap();
    assert_eq!(optimize(&path).capacity(), 5);
}

proptest! {
    #[test]
    fn prop_optimize_is_idempotent(text in "[UDLR]{0,60}") {
        let once = optimize(&Path::parse(&text, 64).unwrap());
        let twice = optimize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_optimize_shrinks_by_pairs(text in "[UDLR]{0,60}") {
        let out = optimize(&Path::parse(&text, 64).unwrap());
        prop_assert!(out.len() <= text.len());
        prop_assert_eq!((text.len() - out.len()) % 2, 0);
    }

    #[test]
    fn prop_no_pattern_survives(text in "[UDLR]{0,60}") {
        let out = optimize(&Path::parse(&text, 64).unwrap());
        for rewrite in &REWRITES {
            prop_assert!(out.find(&rewrite.window).is_none());
        }
    }
}
