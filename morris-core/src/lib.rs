//! Nine Men's Morris game logic with bitboard-based board representation.
//!
//! # Board Layout (24 points)
//!
//! ```text
//! 0-----------1-----------2
//! |           |           |
//! |   8-------9------10   |
//! |   |       |       |   |
//! |   |  16--17--18   |   |
//! 3--11--19      20--12---4
//! |   |  21--22--23   |   |
//! |   |       |       |   |
//! |  13------14------15   |
//! |           |           |
//! 5-----------6-----------7
//! ```
//!
//! Three concentric squares, numbered outer (0-7), middle (8-15), inner
//! (16-23), connected by four spokes: 1-9-17, 3-11-19, 4-12-20, 6-14-22.
//!
//! # Occupancy Encoding
//!
//! Each side's pieces live in one 24-bit mask (bit i set = point i held).
//! Mill and adjacency checks reduce to mask intersections against the
//! precomputed topology tables.
//!
//! # Game Flow
//!
//! [`Game`] is the single state machine: both players place their nine
//! pieces in turn, then slide them along board lines (or anywhere once a
//! side is down to three pieces). Completing a mill freezes the turn until
//! the mover removes one opposing piece. A side loses when it drops below
//! three pieces or, in the movement phase, cannot move at all.
//!
//! The caller feeds bare point ids into [`Game::handle_point`] (or the
//! individual operations) and redraws from [`Game::snapshot`] after every
//! call. The engine performs no I/O of its own.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "wasm")]
pub mod wasm;

/// Number of points on the board.
pub const POINT_COUNT: usize = 24;

/// Pieces each player starts with in hand.
pub const PIECES_PER_PLAYER: u8 = 9;

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Position on the board (0-23).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point(pub u8);

impl Point {
    /// Check if this is a valid point (0-23).
    #[inline]
    pub fn is_valid(self) -> bool {
        (self.0 as usize) < POINT_COUNT
    }

    /// Iterate over all 24 points.
    pub fn all() -> impl Iterator<Item = Point> {
        (0..POINT_COUNT as u8).map(Point)
    }

    #[inline]
    fn bit(self) -> u32 {
        debug_assert!(self.is_valid());
        1 << self.0
    }
}

/// Game phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Both players still have pieces in hand to place.
    Placement,
    /// All pieces placed; players slide (or fly) their pieces.
    Movement,
    /// A winner has been decided.
    GameOver,
}

// ============================================================================
// TOPOLOGY - static tables, never mutated
// ============================================================================

/// Neighbors of each point along board lines.
///
/// Corner points have 2 neighbors, mid-edge points 3, and the four spoke
/// crossings (9, 11, 12, 14) have 4.
pub const ADJACENT: [&[u8]; POINT_COUNT] = [
    &[1, 3],          // 0
    &[0, 2, 9],       // 1
    &[1, 4],          // 2
    &[0, 5, 11],      // 3
    &[2, 7, 12],      // 4
    &[3, 6],          // 5
    &[5, 7, 14],      // 6
    &[4, 6],          // 7
    &[9, 11],         // 8
    &[1, 8, 10, 17],  // 9
    &[9, 12],         // 10
    &[3, 8, 13, 19],  // 11
    &[4, 10, 15, 20], // 12
    &[11, 14],        // 13
    &[6, 13, 15, 22], // 14
    &[12, 14],        // 15
    &[17, 19],        // 16
    &[9, 16, 18],     // 17
    &[17, 20],        // 18
    &[11, 16, 21],    // 19
    &[12, 18, 23],    // 20
    &[19, 22],        // 21
    &[14, 21, 23],    // 22
    &[20, 22],        // 23
];

/// The 16 straight-line triples that form mills.
pub const MILLS: [[u8; 3]; 16] = [
    // Horizontal mills
    [0, 1, 2],    // Outer square top
    [5, 6, 7],    // Outer square bottom
    [8, 9, 10],   // Middle square top
    [13, 14, 15], // Middle square bottom
    [16, 17, 18], // Inner square top
    [21, 22, 23], // Inner square bottom
    // Vertical mills
    [0, 3, 5],    // Outer square left
    [2, 4, 7],    // Outer square right
    [8, 11, 13],  // Middle square left
    [10, 12, 15], // Middle square right
    [16, 19, 21], // Inner square left
    [18, 20, 23], // Inner square right
    // Spoke mills
    [1, 9, 17],  // Top spoke
    [3, 11, 19], // Left spoke
    [4, 12, 20], // Right spoke
    [6, 14, 22], // Bottom spoke
];

const fn mask_of(points: &[u8]) -> u32 {
    let mut mask = 0u32;
    let mut i = 0;
    while i < points.len() {
        mask |= 1 << points[i];
        i += 1;
    }
    mask
}

/// Bitmask mirror of [`ADJACENT`] for O(1) adjacency tests.
const ADJ_MASKS: [u32; POINT_COUNT] = {
    let mut masks = [0u32; POINT_COUNT];
    let mut i = 0;
    while i < masks.len() {
        masks[i] = mask_of(ADJACENT[i]);
        i += 1;
    }
    masks
};

/// Bitmask mirror of [`MILLS`].
const MILL_MASKS: [u32; 16] = {
    let mut masks = [0u32; 16];
    let mut i = 0;
    while i < masks.len() {
        masks[i] = mask_of(&MILLS[i]);
        i += 1;
    }
    masks
};

/// Check whether two points are directly connected by a board line.
#[inline]
pub fn is_adjacent(a: Point, b: Point) -> bool {
    a.is_valid() && b.is_valid() && ADJ_MASKS[a.0 as usize] & b.bit() != 0
}

// ============================================================================
// BOARD - occupancy bitboards
// ============================================================================

/// Point occupancy as one 24-bit mask per side.
///
/// The two masks are always disjoint. The board knows nothing about turns
/// or phases; [`Game`] enforces the rules on top of it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Board {
    white: u32,
    black: u32,
}

const FULL_MASK: u32 = (1 << POINT_COUNT) - 1;

impl Board {
    /// Create an empty board.
    #[inline]
    pub fn new() -> Board {
        Board { white: 0, black: 0 }
    }

    /// Get the occupant of a point, if any.
    #[inline]
    pub fn occupant(&self, point: Point) -> Option<Player> {
        let bit = point.bit();
        if self.white & bit != 0 {
            Some(Player::White)
        } else if self.black & bit != 0 {
            Some(Player::Black)
        } else {
            None
        }
    }

    /// Check if a point holds a piece of either side.
    #[inline]
    pub fn is_occupied(&self, point: Point) -> bool {
        (self.white | self.black) & point.bit() != 0
    }

    /// Put a piece on a point.
    /// Does NOT validate - caller must ensure the point is empty.
    #[inline]
    pub fn set(&mut self, point: Point, player: Player) {
        debug_assert!(!self.is_occupied(point));
        match player {
            Player::White => self.white |= point.bit(),
            Player::Black => self.black |= point.bit(),
        }
    }

    /// Remove whatever piece sits on a point.
    #[inline]
    pub fn clear(&mut self, point: Point) {
        let bit = point.bit();
        self.white &= !bit;
        self.black &= !bit;
    }

    /// Number of pieces a side has on the board.
    #[inline]
    pub fn count(&self, player: Player) -> u8 {
        self.side(player).count_ones() as u8
    }

    #[inline]
    fn side(&self, player: Player) -> u32 {
        match player {
            Player::White => self.white,
            Player::Black => self.black,
        }
    }

    #[inline]
    fn empty_mask(&self) -> u32 {
        !(self.white | self.black) & FULL_MASK
    }
}

// ============================================================================
// RESULTS - outcomes and rule errors
// ============================================================================

/// Why an operation was rejected.
///
/// Both variants are recoverable: the state machine is untouched and the
/// caller is expected to re-prompt the user.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleError {
    /// The operation does not apply in the current phase, or a pending
    /// removal (or missing selection) forbids it.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// The state allows the operation but the targeted point violates a
    /// rule (occupied placement target, protected mill piece, ...).
    #[error("illegal action: {0}")]
    IllegalAction(String),
}

impl RuleError {
    pub fn invalid_state(detail: impl Into<String>) -> Self {
        RuleError::InvalidState(detail.into())
    }

    pub fn illegal_action(detail: impl Into<String>) -> Self {
        RuleError::IllegalAction(detail.into())
    }
}

/// Result alias for engine operations.
pub type RuleResult<T> = Result<T, RuleError>;

/// Result of a placement.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceOutcome {
    /// Piece placed, turn passed to the opponent.
    Placed,
    /// Piece placed and completed a mill; the turn is frozen until the
    /// mover removes an opposing piece.
    MillFormed,
}

/// Result of a selection.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectOutcome {
    Selected,
    /// The already-selected point was picked again and the selection was
    /// cleared.
    Deselected,
}

/// Result of a move attempt.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    /// Piece moved, turn passed to the opponent.
    Moved,
    /// Piece moved and completed a mill; removal pending.
    MillFormed,
    /// Piece moved and the opponent is out of pieces or moves.
    Won,
    /// Destination occupied or unreachable. The selection is cleared and
    /// nothing else changes.
    InvalidDestination,
}

/// Result of a removal.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoveOutcome {
    /// Piece removed, turn passed to the opponent.
    Removed,
    /// Piece removed and the opponent is defeated.
    Won,
}

/// What a point click did, as reported by [`Game::handle_point`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Placed,
    MillFormed,
    Selected,
    Deselected,
    Moved,
    InvalidMove,
    Removed,
    Won,
}

// ============================================================================
// SNAPSHOT - read-only view for the presentation layer
// ============================================================================

/// Per-player in-hand piece counts.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct HandCounts {
    pub white: u8,
    pub black: u8,
}

/// Full game state as the presentation layer sees it.
///
/// Emitted after every operation; everything a client renders (board,
/// counts, whose turn, removal prompt, selection highlight, winner) is
/// derived from this. The engine keeps no display state of its own.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    /// Occupant of each point, indexed by point id.
    pub board: [Option<Player>; POINT_COUNT],
    pub current_player: Player,
    pub phase: Phase,
    pub in_hand: HandCounts,
    /// True exactly when a freshly formed mill awaits a removal.
    pub pending_removal: bool,
    /// Currently selected point (movement phase only).
    pub selection: Option<Point>,
    pub winner: Option<Player>,
}

// ============================================================================
// GAME - the state machine
// ============================================================================

/// The Nine Men's Morris state machine.
///
/// One instance owns one game from the first placement to game over. All
/// operations run to completion synchronously and either mutate the state
/// or reject without touching it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Game {
    board: Board,
    current: Player,
    phase: Phase,
    in_hand: [u8; 2],
    pending_removal: bool,
    selection: Option<Point>,
    winner: Option<Player>,
}

impl Game {
    /// Start a fresh game: empty board, nine pieces in each hand, white
    /// to place first.
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            current: Player::White,
            phase: Phase::Placement,
            in_hand: [PIECES_PER_PLAYER, PIECES_PER_PLAYER],
            pending_removal: false,
            selection: None,
            winner: None,
        }
    }

    /// Build a game from an arbitrary position.
    ///
    /// No reachability validation is performed; the caller is responsible
    /// for supplying a position that could occur in play. Useful for
    /// scenario setup in tests.
    pub fn with_position(board: Board, in_hand: HandCounts, to_move: Player, phase: Phase) -> Game {
        Game {
            board,
            current: to_move,
            phase,
            in_hand: [in_hand.white, in_hand.black],
            pending_removal: false,
            selection: None,
            winner: None,
        }
    }

    // ========== Read-only accessors ==========

    #[inline]
    pub fn current_player(&self) -> Player {
        self.current
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    #[inline]
    pub fn pending_removal(&self) -> bool {
        self.pending_removal
    }

    #[inline]
    pub fn selection(&self) -> Option<Point> {
        self.selection
    }

    #[inline]
    pub fn board(&self) -> Board {
        self.board
    }

    /// Pieces a player still holds in hand.
    #[inline]
    pub fn in_hand(&self, player: Player) -> u8 {
        self.in_hand[player.index()]
    }

    /// A player's total material: in hand plus on the board.
    pub fn total_pieces(&self, player: Player) -> u8 {
        self.in_hand[player.index()] + self.board.count(player)
    }

    /// Check if a point holds a piece.
    pub fn is_occupied(&self, point: Point) -> bool {
        point.is_valid() && self.board.is_occupied(point)
    }

    /// Check if the current player may place on a point right now.
    pub fn is_valid_placement(&self, point: Point) -> bool {
        self.phase == Phase::Placement && point.is_valid() && !self.board.is_occupied(point)
    }

    /// Find a mill through `point` held by the point's occupant.
    ///
    /// Returns the first matching triple. Used after placements and moves
    /// to decide whether a removal is due; re-forming a mill a piece just
    /// left re-triggers it like any other.
    pub fn mill_at(&self, point: Point) -> Option<[u8; 3]> {
        if !point.is_valid() {
            return None;
        }
        let owner = self.board.occupant(point)?;
        let side = self.board.side(owner);
        let bit = point.bit();
        for (i, &mask) in MILL_MASKS.iter().enumerate() {
            if mask & bit != 0 && side & mask == mask {
                return Some(MILLS[i]);
            }
        }
        None
    }

    /// Mill-protection rule: an opposing piece may be removed unless it
    /// sits in a mill while the opponent still has any piece outside one.
    pub fn can_remove(&self, point: Point) -> bool {
        if !point.is_valid() {
            return false;
        }
        let opponent = self.current.opponent();
        if self.board.occupant(point) != Some(opponent) {
            return false;
        }
        !self.in_mill_for(point, opponent) || self.all_in_mills(opponent)
    }

    /// Points the current player could select for movement.
    pub fn selectable_points(&self) -> Vec<Point> {
        if self.phase != Phase::Movement || self.pending_removal {
            return Vec::new();
        }
        Point::all()
            .filter(|&p| self.board.occupant(p) == Some(self.current))
            .collect()
    }

    /// Destinations a piece at `from` could legally move to.
    ///
    /// Empty unless it is the movement phase and `from` holds one of the
    /// current player's pieces. Flying (exactly three pieces left) opens
    /// up every empty point.
    pub fn legal_destinations(&self, from: Point) -> Vec<Point> {
        if self.phase != Phase::Movement
            || !from.is_valid()
            || self.board.occupant(from) != Some(self.current)
        {
            return Vec::new();
        }
        let flying = self.board.count(self.current) == 3;
        Point::all()
            .filter(|&to| !self.board.is_occupied(to) && (flying || is_adjacent(from, to)))
            .collect()
    }

    /// Opposing pieces that could be removed right now.
    pub fn removable_points(&self) -> Vec<Point> {
        if !self.pending_removal {
            return Vec::new();
        }
        Point::all().filter(|&p| self.can_remove(p)).collect()
    }

    /// Read-only view of the whole state for rendering.
    pub fn snapshot(&self) -> Snapshot {
        let mut board = [None; POINT_COUNT];
        for point in Point::all() {
            board[point.0 as usize] = self.board.occupant(point);
        }
        Snapshot {
            board,
            current_player: self.current,
            phase: self.phase,
            in_hand: HandCounts {
                white: self.in_hand[Player::White.index()],
                black: self.in_hand[Player::Black.index()],
            },
            pending_removal: self.pending_removal,
            selection: self.selection,
            winner: self.winner,
        }
    }

    // ========== Placement ==========

    /// Place a piece from the current player's hand.
    ///
    /// When both hands empty out the game enters the movement phase. A
    /// completed mill freezes the turn and reports
    /// [`PlaceOutcome::MillFormed`]; the mover must call
    /// [`Game::remove_piece`] before anything else.
    pub fn place_piece(&mut self, point: Point) -> RuleResult<PlaceOutcome> {
        if self.phase != Phase::Placement {
            return Err(RuleError::invalid_state(
                "placement is only allowed during the placement phase",
            ));
        }
        if self.pending_removal {
            return Err(RuleError::invalid_state("a mill is waiting for a removal"));
        }
        if !point.is_valid() {
            return Err(RuleError::illegal_action(format!(
                "no point {} on the board",
                point.0
            )));
        }
        if self.board.is_occupied(point) {
            return Err(RuleError::illegal_action(format!(
                "point {} is occupied",
                point.0
            )));
        }

        debug_assert!(self.in_hand[self.current.index()] > 0);
        self.board.set(point, self.current);
        self.in_hand[self.current.index()] -= 1;
        log::debug!(
            "{:?} placed at {}, {} left in hand",
            self.current,
            point.0,
            self.in_hand[self.current.index()]
        );

        if self.in_hand == [0, 0] {
            self.phase = Phase::Movement;
            log::debug!("all pieces placed, entering movement phase");
        }

        if self.mill_at(point).is_some() {
            self.pending_removal = true;
            Ok(PlaceOutcome::MillFormed)
        } else {
            self.advance_turn();
            Ok(PlaceOutcome::Placed)
        }
    }

    // ========== Movement ==========

    /// Select one of the current player's pieces to move.
    ///
    /// Picking the selected point again deselects it; picking another own
    /// piece moves the selection there.
    pub fn select_for_movement(&mut self, point: Point) -> RuleResult<SelectOutcome> {
        if self.phase != Phase::Movement {
            return Err(RuleError::invalid_state(
                "selection is only allowed during the movement phase",
            ));
        }
        if self.pending_removal {
            return Err(RuleError::invalid_state("a mill is waiting for a removal"));
        }
        if !point.is_valid() {
            return Err(RuleError::illegal_action(format!(
                "no point {} on the board",
                point.0
            )));
        }
        if self.selection == Some(point) {
            self.selection = None;
            return Ok(SelectOutcome::Deselected);
        }
        if self.board.occupant(point) != Some(self.current) {
            return Err(RuleError::illegal_action(format!(
                "point {} does not hold one of your pieces",
                point.0
            )));
        }
        self.selection = Some(point);
        Ok(SelectOutcome::Selected)
    }

    /// Try to move the selected piece to `to`.
    ///
    /// Legal when `to` is empty and either adjacent to the selection or
    /// the current player is flying (exactly three pieces on the board).
    /// An illegal destination clears the selection and reports
    /// [`MoveOutcome::InvalidDestination`] without further changes.
    pub fn attempt_move(&mut self, to: Point) -> RuleResult<MoveOutcome> {
        if self.phase != Phase::Movement {
            return Err(RuleError::invalid_state(
                "moving is only allowed during the movement phase",
            ));
        }
        if self.pending_removal {
            return Err(RuleError::invalid_state("a mill is waiting for a removal"));
        }
        let Some(from) = self.selection else {
            return Err(RuleError::invalid_state("no piece is selected"));
        };
        if !to.is_valid() {
            return Err(RuleError::illegal_action(format!(
                "no point {} on the board",
                to.0
            )));
        }

        let flying = self.board.count(self.current) == 3;
        if self.board.is_occupied(to) || !(flying || is_adjacent(from, to)) {
            self.selection = None;
            return Ok(MoveOutcome::InvalidDestination);
        }

        self.board.clear(from);
        self.board.set(to, self.current);
        self.selection = None;
        log::debug!("{:?} moved {} -> {}", self.current, from.0, to.0);

        if self.mill_at(to).is_some() {
            self.pending_removal = true;
            Ok(MoveOutcome::MillFormed)
        } else if self.opponent_defeated() {
            self.finish(self.current);
            Ok(MoveOutcome::Won)
        } else {
            self.advance_turn();
            Ok(MoveOutcome::Moved)
        }
    }

    // ========== Removal ==========

    /// Remove an opposing piece after a mill.
    ///
    /// All-or-nothing: a rejected removal leaves the state untouched.
    pub fn remove_piece(&mut self, point: Point) -> RuleResult<RemoveOutcome> {
        if !self.pending_removal {
            return Err(RuleError::invalid_state("no removal is pending"));
        }
        if !point.is_valid() {
            return Err(RuleError::illegal_action(format!(
                "no point {} on the board",
                point.0
            )));
        }
        if !self.can_remove(point) {
            return Err(RuleError::illegal_action(format!(
                "point {} is not a removable opposing piece",
                point.0
            )));
        }

        self.board.clear(point);
        self.pending_removal = false;
        log::debug!("{:?} removed the piece at {}", self.current, point.0);

        if self.opponent_defeated() {
            self.finish(self.current);
            Ok(RemoveOutcome::Won)
        } else {
            self.advance_turn();
            Ok(RemoveOutcome::Removed)
        }
    }

    // ========== Click dispatch ==========

    /// Apply a raw point click.
    ///
    /// The action kind is derived from the engine state, never chosen by
    /// the caller: a pending removal consumes the click as a removal
    /// target, the placement phase as a placement, and the movement phase
    /// as select / deselect / reselect / move depending on the selection
    /// and what the point holds.
    pub fn handle_point(&mut self, point: Point) -> RuleResult<Event> {
        if self.phase == Phase::GameOver {
            return Err(RuleError::invalid_state("the game is over"));
        }
        if self.pending_removal {
            return Ok(match self.remove_piece(point)? {
                RemoveOutcome::Removed => Event::Removed,
                RemoveOutcome::Won => Event::Won,
            });
        }
        if self.phase == Phase::Placement {
            return Ok(match self.place_piece(point)? {
                PlaceOutcome::Placed => Event::Placed,
                PlaceOutcome::MillFormed => Event::MillFormed,
            });
        }

        let own_piece = point.is_valid() && self.board.occupant(point) == Some(self.current);
        if self.selection.is_none() || self.selection == Some(point) || own_piece {
            Ok(match self.select_for_movement(point)? {
                SelectOutcome::Selected => Event::Selected,
                SelectOutcome::Deselected => Event::Deselected,
            })
        } else {
            Ok(match self.attempt_move(point)? {
                MoveOutcome::Moved => Event::Moved,
                MoveOutcome::MillFormed => Event::MillFormed,
                MoveOutcome::Won => Event::Won,
                MoveOutcome::InvalidDestination => Event::InvalidMove,
            })
        }
    }

    // ========== Internals ==========

    fn in_mill_for(&self, point: Point, player: Player) -> bool {
        let side = self.board.side(player);
        let bit = point.bit();
        MILL_MASKS
            .iter()
            .any(|&mask| mask & bit != 0 && side & mask == mask)
    }

    fn all_in_mills(&self, player: Player) -> bool {
        Point::all()
            .filter(|&p| self.board.occupant(p) == Some(player))
            .all(|p| self.in_mill_for(p, player))
    }

    /// Win check, run after every completed move or removal.
    ///
    /// Material: opponent's total (hand + board) fell below three.
    /// Mobility: in the movement phase, no opposing piece has anywhere to
    /// go (flying considered when the opponent is down to three).
    fn opponent_defeated(&self) -> bool {
        let opponent = self.current.opponent();
        if self.total_pieces(opponent) < 3 {
            return true;
        }
        self.phase == Phase::Movement && !self.has_any_move(opponent)
    }

    fn has_any_move(&self, player: Player) -> bool {
        let empty = self.board.empty_mask();
        if self.board.count(player) == 3 {
            return empty != 0;
        }
        Point::all()
            .filter(|&p| self.board.occupant(p) == Some(player))
            .any(|p| ADJ_MASKS[p.0 as usize] & empty != 0)
    }

    /// Swap the active player. Called exactly once per completed action,
    /// never while a removal is pending.
    fn advance_turn(&mut self) {
        self.current = self.current.opponent();
        log::debug!("{:?} to move", self.current);
    }

    fn finish(&mut self, winner: Player) {
        self.phase = Phase::GameOver;
        self.winner = Some(winner);
        self.selection = None;
        log::info!("game over, {:?} wins", winner);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
