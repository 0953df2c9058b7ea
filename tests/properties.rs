//! End-to-end checks of the engine through the public API.

use std::sync::Arc;
use std::thread;

use box_heuristic::{
    parse_level, AStar, Evaluation, Greedy, HeuristicEngine, HeuristicError, Point, State, Strategy,
    WeightedAStar, UNREACHABLE, UNREACHABLE_COST,
};

const WAREHOUSE: &str = "\
++++++++++
+0   +  a+
+ A  + + +
+  B   + +
+ ++ +   +
+ a  b+ b+
++++++++++
";

const SPLIT: &str = "\
+++++++
+0 A+a+
+  B+b+
+++++++
";

fn engine(text: &str) -> (Arc<HeuristicEngine>, State) {
    let level = parse_level(text).unwrap();
    (Arc::new(HeuristicEngine::new(level.grid).unwrap()), level.initial)
}

#[test]
fn distances_are_symmetric_with_zero_diagonal() {
    let (engine, _) = engine(WAREHOUSE);
    let grid = engine.grid();
    let cells: Vec<Point> = grid.open_cells().collect();

    for &a in &cells {
        assert_eq!(engine.distances().distance(a, a), 0);
        for &b in &cells {
            assert_eq!(
                engine.distances().distance(a, b),
                engine.distances().distance(b, a)
            );
        }
    }
}

#[test]
fn wall_barrier_gives_sentinel_without_failing() {
    let (engine, initial) = engine(SPLIT);
    let d = engine.distances();

    assert_eq!(d.distance(Point::new(1, 1), Point::new(1, 5)), UNREACHABLE);
    assert_eq!(d.distance(Point::new(2, 3), Point::new(2, 5)), UNREACHABLE);
    assert_eq!(engine.h(&initial), UNREACHABLE_COST);
}

#[test]
fn oversized_level_fails_before_search() {
    let line = format!("0{}", " ".repeat(32_766));
    let level = parse_level(&line).unwrap();
    assert!(matches!(
        HeuristicEngine::new(level.grid),
        Err(HeuristicError::GridTooLarge { height: 1, width: 32_767 })
    ));
}

#[test]
fn solved_state_scores_zero() {
    let (engine, initial) = engine(WAREHOUSE);
    let mut solved = State::new(initial.agent(), 40);
    for goal in engine.goals().goals() {
        solved.place_box(goal.cell, goal.id.letter().to_ascii_uppercase());
    }

    assert_eq!(engine.h(&solved), 0);
    assert_eq!(Greedy::new(engine).f(&solved), 0);
}

#[test]
fn one_box_three_from_goal_agent_five_away() {
    let (engine, initial) = engine("+++++++++++\n+0    A  a+\n+++++++++++\n");
    assert_eq!(engine.h(&initial), 3 * 3 + 5);
}

#[test]
fn assignments_are_one_to_one() {
    let (engine, _) = engine(WAREHOUSE);
    let state = State::with_boxes(
        Point::new(1, 1),
        [
            (Point::new(2, 2), 'b'),
            (Point::new(3, 3), 'b'),
            (Point::new(2, 3), 'b'),
            (Point::new(1, 3), 'a'),
        ],
        0,
    );

    let assignment = engine.assign(&state);
    let b_pairs: Vec<_> = assignment
        .pairs()
        .iter()
        .filter(|p| p.goal.letter() == 'b')
        .collect();
    // Three b boxes, two b goals.
    assert_eq!(b_pairs.len(), 2);
    assert_ne!(b_pairs[0].box_cell, b_pairs[1].box_cell);
    assert_ne!(b_pairs[0].goal, b_pairs[1].goal);

    let a_pairs = assignment.pairs().len() - b_pairs.len();
    assert_eq!(a_pairs, 1);
}

#[test]
fn evaluation_is_idempotent() {
    let (engine, initial) = engine(WAREHOUSE);
    let astar = AStar::new(engine.clone());

    let first = astar.f(&initial);
    for _ in 0..5 {
        assert_eq!(astar.f(&initial), first);
    }
    assert!(engine.evaluations() >= 6);
}

#[test]
fn weight_one_equals_astar_and_greedy_ignores_g() {
    let (engine, initial) = engine(WAREHOUSE);
    let astar = AStar::new(engine.clone());
    let wastar = WeightedAStar::new(engine.clone(), 1);
    let greedy = Greedy::new(engine);

    let base = greedy.f(&initial);
    for g in [0u64, 3, 99, 12_345] {
        let mut state = initial.clone();
        state.set_g(g);
        assert_eq!(astar.f(&state), wastar.f(&state));
        assert_eq!(greedy.f(&state), base);
    }
}

#[test]
fn engine_is_shared_across_threads() {
    let (engine, initial) = engine(WAREHOUSE);
    let expected = engine.h(&initial);

    let handles: Vec<_> = ["astar", "wastar:3", "greedy"]
        .into_iter()
        .map(|name| {
            let evaluator = name.parse::<Strategy>().unwrap().build(engine.clone());
            let state = initial.clone();
            thread::spawn(move || evaluator.h(&state))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
