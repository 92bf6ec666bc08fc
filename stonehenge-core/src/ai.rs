//! Exact game-tree solvers and the rough-outcome heuristic
//!
//! Both exact solvers compute the same absolute value: +1 means Player::One
//! wins under optimal play, -1 means Player::Two wins, 0 means the game
//! exhausts with no majority. The recursive form is the reference; the
//! iterative form re-derives it with an explicit work list and exists
//! chiefly to demonstrate the equivalence (recursion depth is bounded by
//! the cell count, at most 25).

use crate::board::CellId;
use crate::error::GameError;
use crate::game::{GameState, Player};

/// Absolute game value: +1 One wins, -1 Two wins, 0 draw.
pub type Value = i8;

/// Result of an exact solve: the state's value and the move achieving it
/// (`None` at terminal states).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub value: Value,
    pub best_move: Option<CellId>,
}

fn leaf_value(state: &GameState) -> Value {
    match state.winner() {
        Some(Player::One) => 1,
        Some(Player::Two) => -1,
        None => 0,
    }
}

/// Whether `candidate` beats `best` from the mover's point of view:
/// Player::One maximizes, Player::Two minimizes. Strict, so the first move
/// in label order wins ties.
fn improves(turn: Player, candidate: Value, best: Value) -> bool {
    match turn {
        Player::One => candidate > best,
        Player::Two => candidate < best,
    }
}

// ============================================================================
// RECURSIVE MINIMAX
// ============================================================================

/// Full-width recursive minimax. Every legal move is evaluated before the
/// extremum is selected; stopping at the first acceptable move could pick
/// a suboptimal line.
pub fn solve_recursive(state: &GameState) -> SearchOutcome {
    if state.is_over() {
        return SearchOutcome {
            value: leaf_value(state),
            best_move: None,
        };
    }

    let mut best_value: Option<Value> = None;
    let mut best_move = None;
    for mv in state.legal_moves() {
        let child = state.apply_move(mv).expect("legal move applies");
        let value = solve_recursive(&child).value;
        if best_value.map_or(true, |best| improves(state.turn(), value, best)) {
            best_value = Some(value);
            best_move = Some(mv);
        }
    }

    SearchOutcome {
        value: best_value.unwrap_or(0),
        best_move,
    }
}

// ============================================================================
// ITERATIVE MINIMAX
// ============================================================================

/// Search node in the explicit tree arena
struct Node {
    state: GameState,
    children: Vec<(CellId, usize)>,
    value: Value,
    expanded: bool,
}

impl Node {
    fn new(state: GameState) -> Self {
        Self {
            state,
            children: Vec::new(),
            value: 0,
            expanded: false,
        }
    }
}

/// LIFO work list over arena indices
#[derive(Default)]
struct Worklist {
    items: Vec<usize>,
}

impl Worklist {
    fn push(&mut self, id: usize) {
        self.items.push(id);
    }

    fn pop(&mut self) -> Result<usize, GameError> {
        self.items.pop().ok_or(GameError::EmptyWorklist)
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Full-width minimax with an explicit work list instead of call-stack
/// recursion. Returns the identical (value, move) pair as
/// [`solve_recursive`] for every state: same absolute scoring, same
/// first-in-label-order tie-break.
///
/// A node is pushed unexpanded; the first visit either scores it as a leaf
/// or re-pushes it beneath its children, so by the second visit every
/// child value is final and the node folds them with max (One to move) or
/// min (Two to move).
pub fn solve_iterative(state: &GameState) -> Result<SearchOutcome, GameError> {
    let mut arena = vec![Node::new(state.clone())];
    let mut worklist = Worklist::default();
    worklist.push(0);

    while !worklist.is_empty() {
        let id = worklist.pop()?;

        if !arena[id].expanded {
            arena[id].expanded = true;

            if arena[id].state.is_over() {
                arena[id].value = leaf_value(&arena[id].state);
                continue;
            }

            worklist.push(id);
            for mv in arena[id].state.legal_moves() {
                let child_state = arena[id].state.apply_move(mv)?;
                let child_id = arena.len();
                arena.push(Node::new(child_state));
                arena[id].children.push((mv, child_id));
                worklist.push(child_id);
            }
        } else {
            let turn = arena[id].state.turn();
            let mut best: Option<Value> = None;
            for &(_, child_id) in &arena[id].children {
                let value = arena[child_id].value;
                if best.map_or(true, |b| improves(turn, value, b)) {
                    best = Some(value);
                }
            }
            arena[id].value = best.unwrap_or(0);
        }
    }

    let root = &arena[0];
    let mut best_value: Option<Value> = None;
    let mut best_move = None;
    for &(mv, child_id) in &root.children {
        let value = arena[child_id].value;
        if best_value.map_or(true, |best| improves(root.state.turn(), value, best)) {
            best_value = Some(value);
            best_move = Some(mv);
        }
    }

    Ok(SearchOutcome {
        value: best_value.unwrap_or_else(|| root.value),
        best_move,
    })
}

// ============================================================================
// ROUGH-OUTCOME HEURISTIC
// ============================================================================

/// One/two-ply outcome estimate from the perspective of the player about
/// to move (not the absolute convention of the exact solvers):
///
/// - terminal: +1 / -1 / 0 for the side whose turn it would be;
/// - +1 if some move wins on the spot;
/// - -1 if every move lets the opponent win on the reply;
/// - otherwise `(safe - losing) / (moves + 1)`, strictly inside (-1, 1)
///   and monotone in the number of replies that avoid an immediate loss.
pub fn rough_outcome(state: &GameState) -> f32 {
    let mover = state.turn();

    if state.is_over() {
        return match state.winner() {
            Some(winner) if winner == mover => 1.0,
            Some(_) => -1.0,
            None => 0.0,
        };
    }

    let children: Vec<GameState> = state
        .legal_moves()
        .into_iter()
        .map(|mv| state.apply_move(mv).expect("legal move applies"))
        .collect();

    if children
        .iter()
        .any(|child| child.is_over() && child.winner() == Some(mover))
    {
        return 1.0;
    }

    let total = children.len();
    let losing = children
        .iter()
        .filter(|child| opponent_wins_immediately(child, mover.opponent()))
        .count();

    if losing == total {
        return -1.0;
    }

    let safe = total - losing;
    (safe as f32 - losing as f32) / (total as f32 + 1.0)
}

/// Whether `opponent` (the mover in `state`) has a reply that ends the
/// game in their favor. A state already over counts as an immediate loss
/// for the original mover.
fn opponent_wins_immediately(state: &GameState, opponent: Player) -> bool {
    if state.is_over() {
        return state.winner() == Some(opponent);
    }
    state.legal_moves().into_iter().any(|reply| {
        let next = state.apply_move(reply).expect("legal move applies");
        next.is_over() && next.winner() == Some(opponent)
    })
}

/// Pick the move leaving the opponent the lowest rough outcome
/// (equivalently, maximizing its negation). First move in label order wins
/// ties. `None` only at terminal states.
pub fn rough_outcome_strategy(state: &GameState) -> Option<CellId> {
    let mut best_score = f32::NEG_INFINITY;
    let mut best_move = None;
    for mv in state.legal_moves() {
        let child = state.apply_move(mv).expect("legal move applies");
        let score = -rough_outcome(&child);
        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }
    best_move
}
