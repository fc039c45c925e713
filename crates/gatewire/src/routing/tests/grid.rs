use super::*;
use crate::routing::grid::{BLOCKED, FREE, build_grid};
use crate::routing::serialize::render_grid;
use crate::routing::types::Rect;

fn layout() -> Vec<Rect> {
    vec![
        Rect::new(40.0, 40.0, 40.0, 40.0),
        Rect::new(130.0, 10.0, 25.0, 70.0),
        Rect::new(60.0, 60.0, 40.0, 40.0),
    ]
}

#[test]
fn builder_is_idempotent() {
    let a = build_grid(300.0, 200.0, 20, &layout()).unwrap();
    let b = build_grid(300.0, 200.0, 20, &layout()).unwrap();
    assert_eq!(a, b);
    assert_eq!(render_grid(&a, &[]), render_grid(&b, &[]));
}

#[test]
fn component_order_does_not_matter() {
    let mut reversed = layout();
    reversed.reverse();
    let a = build_grid(300.0, 200.0, 20, &layout()).unwrap();
    let b = build_grid(300.0, 200.0, 20, &reversed).unwrap();
    assert_eq!(a, b);
}

#[test]
fn overlapping_components_block_their_union() {
    let g = build_grid(200.0, 200.0, 20, &[
        Rect::new(40.0, 40.0, 40.0, 40.0),
        Rect::new(60.0, 60.0, 40.0, 40.0),
    ])
    .unwrap();
    // 4 + 4 cells sharing (3,3).
    assert_eq!(g.blocked_count(), 7);
}

#[test]
fn unaligned_component_blocks_every_touched_cell() {
    // x 130..155 touches columns 6 and 7, y 10..80 touches rows 0..=3.
    let g = build_grid(200.0, 100.0, 20, &[Rect::new(130.0, 10.0, 25.0, 70.0)]).unwrap();
    for y in 0..4 {
        assert!(g.is_blocked(c(6, y)));
        assert!(g.is_blocked(c(7, y)));
    }
    assert!(!g.is_blocked(c(6, 4)));
    assert!(!g.is_blocked(c(5, 0)));
    assert!(!g.is_blocked(c(8, 0)));
    assert_eq!(g.blocked_count(), 8);
}

#[test]
fn rows_match_input() {
    let rows = vec![vec![FREE, BLOCKED, 0.5], vec![0.25, FREE, FREE]];
    let g = OccupancyGrid::from_rows(&rows, 10).unwrap();
    let back: Vec<Vec<f64>> = g.rows().map(|r| r.to_vec()).collect();
    assert_eq!(back, rows);
    assert_eq!(g.value(c(2, 0)), Some(0.5));
    assert_eq!(g.value(c(0, 1)), Some(0.25));
}

#[test]
fn render_shows_obstacles_and_route() {
    let g = grid(&[
        ".....", //
        ".##..", //
        "...3.",
    ]);
    let path = solve(&g, c(0, 0), c(4, 2), &uniform());
    let text = render_grid(&g, &[&path]);
    assert_eq!(text.lines().count(), 3);
    assert!(text.lines().all(|l| l.len() == 5));
    assert_eq!(text.matches('#').count(), 2);
    assert_eq!(text.chars().next(), Some('o'));
    assert_eq!(text.lines().nth(2).and_then(|l| l.chars().last()), Some('o'));
}
