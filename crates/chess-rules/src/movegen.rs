//! Move generation and attack detection.
//!
//! Pseudo-legal candidates come from [`Board`] geometry; the legality
//! filter simulates each candidate on a scratch board and discards the
//! ones that would leave the mover's own king in check.

use crate::{Board, Game};
use chess_core::{Color, File, Location, Move, MoveFlag, Piece, PieceKind};

/// An ordered list of moves.
///
/// Ordering is deterministic and stable for a given position, but carries
/// no semantic meaning.
#[derive(Clone, Default)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Creates an empty move list.
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Returns true if the list contains the given move.
    #[inline]
    pub fn contains(&self, m: Move) -> bool {
        self.moves.contains(&m)
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        self.moves.retain(f);
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the legal moves for the piece at `at`.
///
/// Returns an empty list when the square is empty or holds a piece of the
/// side not on move; neither case is an error.
pub(crate) fn moves_for_piece(game: &Game, at: Location) -> MoveList {
    let Some(piece) = game.board().piece_at(at) else {
        return MoveList::new();
    };
    if piece.color != game.side_to_move() {
        return MoveList::new();
    }

    let mut moves = MoveList::new();
    match piece.kind {
        PieceKind::Pawn => pawn_moves(game, at, piece, &mut moves),
        PieceKind::King => {
            piece_moves(game.board(), at, piece, &mut moves);
            castling_moves(game, at, piece, &mut moves);
        }
        _ => piece_moves(game.board(), at, piece, &mut moves),
    }

    // Discard anything that would leave our own king in check. This is
    // what separates legal from pseudo-legal: a pinned piece keeps only
    // its moves along the pin line, and a castling king may not land on
    // an attacked square.
    let us = piece.color;
    moves.retain(|m| {
        let mut scratch = game.board().clone();
        apply_to_board(&mut scratch, *m);
        !is_in_check(&scratch, us)
    });

    moves
}

/// Generates all legal moves for the side to move.
pub(crate) fn all_moves(game: &Game) -> MoveList {
    let mut all = MoveList::new();
    for (at, piece) in game.board().pieces() {
        if piece.color == game.side_to_move() {
            for m in &moves_for_piece(game, at) {
                all.push(*m);
            }
        }
    }
    all
}

fn piece_moves(board: &Board, at: Location, piece: Piece, moves: &mut MoveList) {
    for to in board.reachable(at, piece) {
        let flag = if board.piece_at(to).is_some() {
            MoveFlag::Capture
        } else {
            MoveFlag::Normal
        };
        moves.push(Move::new(piece, at, to, flag));
    }
}

fn pawn_moves(game: &Game, at: Location, piece: Piece, moves: &mut MoveList) {
    let board = game.board();
    let promotion_rank = piece.color.promotion_rank();

    for to in board.reachable(at, piece) {
        if to.rank() == promotion_rank {
            for kind in PieceKind::PROMOTIONS {
                moves.push(Move::new(piece, at, to, MoveFlag::Promotion(kind)));
            }
        } else if board.piece_at(to).is_some() {
            moves.push(Move::new(piece, at, to, MoveFlag::Capture));
        } else {
            moves.push(Move::new(piece, at, to, MoveFlag::Normal));
        }
    }

    if let Some(target) = game.en_passant_target() {
        if board.pawn_attacks(at, piece.color).contains(&target) {
            moves.push(Move::new(piece, at, target, MoveFlag::EnPassant));
        }
    }
}

fn castling_moves(game: &Game, at: Location, piece: Piece, moves: &mut MoveList) {
    let us = piece.color;
    let them = us.opposite();
    let board = game.board();

    // A king in check may not castle out of it.
    if is_in_check(board, us) {
        return;
    }

    let back = us.back_rank();
    if game.castling_rights().can_castle_kingside(us) {
        let crossed = Location::new(File::F, back);
        let landing = Location::new(File::G, back);
        if board.piece_at(crossed).is_none()
            && board.piece_at(landing).is_none()
            && !is_square_attacked(board, crossed, them)
        {
            // Landing-square safety is covered by the legality filter.
            moves.push(Move::new(piece, at, landing, MoveFlag::CastleKingside));
        }
    }

    if game.castling_rights().can_castle_queenside(us) {
        let rook_path = Location::new(File::B, back);
        let landing = Location::new(File::C, back);
        let crossed = Location::new(File::D, back);
        if board.piece_at(rook_path).is_none()
            && board.piece_at(landing).is_none()
            && board.piece_at(crossed).is_none()
            && !is_square_attacked(board, crossed, them)
        {
            moves.push(Move::new(piece, at, landing, MoveFlag::CastleQueenside));
        }
    }
}

/// Returns true if any piece of `by` attacks `target`.
pub(crate) fn is_square_attacked(board: &Board, target: Location, by: Color) -> bool {
    board
        .pieces()
        .filter(|(_, p)| p.color == by)
        .any(|(at, p)| board.attacks(at, p).contains(&target))
}

/// Returns true if the king of the given color is in check.
///
/// Built on pseudo-legal attack sets only, so the legality filter can
/// depend on it without recursing.
pub(crate) fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_location(color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => false, // No king; cannot happen in a valid game.
    }
}

/// Applies the board-level effects of a move: capture removal, mover
/// relocation, promotion substitution, and the paired rook relocation
/// for castles. Game bookkeeping (rights, en passant, clocks, turn) is
/// not touched, which makes this usable on scratch boards during
/// legality filtering.
pub(crate) fn apply_to_board(board: &mut Board, m: Move) {
    let captured = match m.flag() {
        // The en passant victim stands behind the destination, on the
        // mover's starting rank.
        MoveFlag::EnPassant => Some(Location::new(m.to().file(), m.from().rank())),
        _ => board.piece_at(m.to()).map(|_| m.to()),
    };

    board.relocate(m.from(), m.to(), captured);

    if let Some(kind) = m.promotion_kind() {
        board.place(m.to(), Piece::new(kind, m.piece().color));
    }

    if let Some((rook_from, rook_to)) = m.castle_rook_squares() {
        board.relocate(rook_from, rook_to, None);
    }
}
