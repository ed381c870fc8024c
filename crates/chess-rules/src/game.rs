//! Game orchestration: turn order, castling rights, move execution, and
//! terminal-state detection.

use crate::movegen::{self, MoveList};
use crate::Board;
use chess_core::{Color, File, Location, Move, MoveFlag, Piece, PieceKind};
use thiserror::Error;

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes all castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        let mask = match color {
            Color::White => !(Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE),
            Color::Black => !(Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE),
        };
        self.0 &= mask;
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// The progress state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has at least one legal move.
    InProgress,
    /// The side to move is in check with no legal moves; `winner` is the
    /// side that delivered mate.
    Checkmate { winner: Color },
    /// The side to move is not in check but has no legal moves.
    Stalemate,
    /// Drawn by agreement.
    Draw,
}

impl GameStatus {
    /// Returns true once no further moves may be executed.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Errors returned by move execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The move is not legal in the current position, or its start
    /// square does not hold the piece it claims to move.
    #[error("invalid move: {0}")]
    InvalidMove(Move),
    /// The game has already reached a terminal result.
    #[error("game has already ended")]
    GameOver,
}

/// A chess game: one board plus turn, castling, en passant, and result
/// state.
///
/// `Game` is a plain owned value. Callers that share one game across
/// threads must serialize access themselves; execution is a multi-step
/// transaction that must appear atomic to any observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Location>,
    halfmove_clock: u32,
    fullmove_number: u32,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game with the standard initial position.
    pub fn new() -> Self {
        Game {
            board: Board::standard(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            status: GameStatus::InProgress,
        }
    }

    /// Creates a game from a custom position.
    ///
    /// Castling rights are derived from the placement: a side keeps a
    /// right only while its king and the relevant rook stand on their
    /// home squares. The status is evaluated immediately, so a position
    /// that is already mate or stalemate starts terminal.
    pub fn with_board(board: Board, side_to_move: Color) -> Self {
        let mut flags = 0u8;
        for color in [Color::White, Color::Black] {
            let back = color.back_rank();
            let king = Piece::new(PieceKind::King, color);
            let rook = Piece::new(PieceKind::Rook, color);
            if board.piece_at(Location::new(File::E, back)) != Some(king) {
                continue;
            }
            if board.piece_at(Location::new(File::H, back)) == Some(rook) {
                flags |= match color {
                    Color::White => CastlingRights::WHITE_KINGSIDE,
                    Color::Black => CastlingRights::BLACK_KINGSIDE,
                };
            }
            if board.piece_at(Location::new(File::A, back)) == Some(rook) {
                flags |= match color {
                    Color::White => CastlingRights::WHITE_QUEENSIDE,
                    Color::Black => CastlingRights::BLACK_QUEENSIDE,
                };
            }
        }

        let mut game = Game {
            board,
            side_to_move,
            castling: CastlingRights::new(flags),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            status: GameStatus::InProgress,
        };
        game.update_status();
        game
    }

    /// Returns a reference to the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the piece occupying the given location, if any.
    pub fn piece_at(&self, at: Location) -> Option<Piece> {
        self.board.piece_at(at)
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the current castling rights.
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the en passant target square, if the previous move was a
    /// pawn's two-square advance.
    pub fn en_passant_target(&self) -> Option<Location> {
        self.en_passant
    }

    /// Returns the number of half-moves since the last pawn move or
    /// capture.
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Returns the current full move number (starts at 1, increments
    /// after Black's move).
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns the number of plies played.
    pub fn ply_count(&self) -> u32 {
        (self.fullmove_number - 1) * 2 + self.side_to_move.index() as u32
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true if the game has reached a terminal result.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns true if the given color's king is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        movegen::is_in_check(&self.board, color)
    }

    /// Returns the legal moves for the piece at `at`.
    ///
    /// Empty when the square is empty or holds a piece of the side not
    /// on move; neither case is an error.
    pub fn moves_for_piece(&self, at: Location) -> MoveList {
        movegen::moves_for_piece(self, at)
    }

    /// Returns all legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        movegen::all_moves(self)
    }

    /// Validates and executes a move.
    ///
    /// The legal-move set for the move's start square is re-derived and
    /// membership checked, so this accepts arbitrary, possibly stale
    /// input. Fails with [`GameError::GameOver`] once the game is
    /// terminal and [`GameError::InvalidMove`] otherwise; failures leave
    /// the game untouched.
    pub fn execute(&mut self, m: Move) -> Result<(), GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        if !self.moves_for_piece(m.from()).contains(m) {
            return Err(GameError::InvalidMove(m));
        }
        self.apply(m);
        Ok(())
    }

    /// Executes a move selected from a freshly generated legal set,
    /// skipping the legality re-derivation.
    ///
    /// The non-negotiable invariants still hold: the game must not be
    /// terminal, the start and end squares must differ, and the start
    /// square must hold exactly the piece the move describes, for the
    /// side to move. Any such failure returns an error without mutating
    /// state. A stale but structurally consistent move is the caller's
    /// bug; this path will apply it.
    pub fn execute_unchecked(&mut self, m: Move) -> Result<(), GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        let occupant = self.board.piece_at(m.from());
        if m.from() == m.to()
            || occupant != Some(m.piece())
            || m.piece().color != self.side_to_move
        {
            return Err(GameError::InvalidMove(m));
        }
        self.apply(m);
        Ok(())
    }

    /// Ends the game as a draw by agreement.
    pub fn agree_draw(&mut self) -> Result<(), GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        self.status = GameStatus::Draw;
        Ok(())
    }

    /// Applies a validated move. All validation happens before this
    /// point; nothing below can fail, which is what keeps execution
    /// all-or-nothing.
    fn apply(&mut self, m: Move) {
        let us = m.piece().color;
        let is_pawn = m.piece().kind == PieceKind::Pawn;
        let is_capture =
            m.flag() == MoveFlag::EnPassant || self.board.piece_at(m.to()).is_some();

        movegen::apply_to_board(&mut self.board, m);

        // Any king or rook move revokes the corresponding rights, as
        // does a capture landing on a rook home square.
        match m.piece().kind {
            PieceKind::King => self.castling.remove_color(us),
            PieceKind::Rook => {
                let back = us.back_rank();
                if m.from() == Location::new(File::H, back) {
                    self.castling.remove_kingside(us);
                } else if m.from() == Location::new(File::A, back) {
                    self.castling.remove_queenside(us);
                }
            }
            _ => {}
        }
        match m.to() {
            to if to == Location::H1 => self.castling.remove_kingside(Color::White),
            to if to == Location::A1 => self.castling.remove_queenside(Color::White),
            to if to == Location::H8 => self.castling.remove_kingside(Color::Black),
            to if to == Location::A8 => self.castling.remove_queenside(Color::Black),
            _ => {}
        }

        // The en passant window lasts exactly one ply.
        let rank_delta = m.to().rank().index() as i8 - m.from().rank().index() as i8;
        self.en_passant = if is_pawn && rank_delta.abs() == 2 {
            m.from().offset(0, us.pawn_direction())
        } else {
            None
        };

        if is_pawn || is_capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = us.opposite();
        self.update_status();
    }

    /// Recomputes the status for the side to move.
    fn update_status(&mut self) {
        self.status = if self.legal_moves().is_empty() {
            if movegen::is_in_check(&self.board, self.side_to_move) {
                GameStatus::Checkmate {
                    winner: self.side_to_move.opposite(),
                }
            } else {
                GameStatus::Stalemate
            }
        } else {
            GameStatus::InProgress
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(s: &str) -> Location {
        Location::from_algebraic(s).unwrap()
    }

    fn find_move(game: &Game, from: &str, to: &str) -> Move {
        let to = loc(to);
        game.moves_for_piece(loc(from))
            .as_slice()
            .iter()
            .copied()
            .find(|m| m.to() == to)
            .expect("expected a legal move")
    }

    #[test]
    fn new_game() {
        let game = Game::new();
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.ply_count(), 0);
        assert_eq!(game.castling_rights().raw(), CastlingRights::ALL.raw());
        assert!(!game.is_in_check(Color::White));
        assert!(!game.is_in_check(Color::Black));
    }

    #[test]
    fn double_advance_sets_en_passant_target_and_flips_turn() {
        let mut game = Game::new();
        let m = find_move(&game, "e2", "e4");
        game.execute(m).unwrap();

        assert_eq!(game.en_passant_target(), Some(loc("e3")));
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.ply_count(), 1);
        assert_eq!(game.piece_at(loc("e2")), None);
        assert_eq!(
            game.piece_at(loc("e4")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn single_advance_clears_en_passant_target() {
        let mut game = Game::new();
        game.execute(find_move(&game, "e2", "e4")).unwrap();
        game.execute(find_move(&game, "d7", "d6")).unwrap();
        assert_eq!(game.en_passant_target(), None);
    }

    #[test]
    fn wrong_color_move_is_rejected_without_mutation() {
        let mut game = Game::new();
        let black_pawn = Piece::new(PieceKind::Pawn, Color::Black);
        let m = Move::new(black_pawn, loc("e7"), loc("e5"), MoveFlag::Normal);

        let before = game.clone();
        assert_eq!(game.execute(m), Err(GameError::InvalidMove(m)));
        assert_eq!(game, before);

        assert_eq!(game.execute_unchecked(m), Err(GameError::InvalidMove(m)));
        assert_eq!(game, before);
    }

    #[test]
    fn empty_start_square_is_rejected_without_mutation() {
        let mut game = Game::new();
        let phantom = Move::new(
            Piece::new(PieceKind::Queen, Color::White),
            loc("d4"),
            loc("d8"),
            MoveFlag::Normal,
        );

        let before = game.clone();
        assert_eq!(game.execute(phantom), Err(GameError::InvalidMove(phantom)));
        assert_eq!(
            game.execute_unchecked(phantom),
            Err(GameError::InvalidMove(phantom))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn degenerate_move_to_its_own_square_is_rejected() {
        let mut game = Game::new();
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let m = Move::new(pawn, loc("e2"), loc("e2"), MoveFlag::Normal);

        let before = game.clone();
        assert_eq!(game.execute(m), Err(GameError::InvalidMove(m)));
        assert_eq!(game.execute_unchecked(m), Err(GameError::InvalidMove(m)));
        assert_eq!(game, before);
    }

    #[test]
    fn unchecked_execute_accepts_a_fresh_legal_move() {
        let mut checked = Game::new();
        let mut unchecked = checked.clone();
        let m = find_move(&checked, "g1", "f3");

        checked.execute(m).unwrap();
        unchecked.execute_unchecked(m).unwrap();
        assert_eq!(checked, unchecked);
    }

    #[test]
    fn halfmove_clock_resets_on_pawn_moves_and_captures() {
        let mut game = Game::new();
        game.execute(find_move(&game, "g1", "f3")).unwrap();
        assert_eq!(game.halfmove_clock(), 1);
        game.execute(find_move(&game, "b8", "c6")).unwrap();
        assert_eq!(game.halfmove_clock(), 2);
        game.execute(find_move(&game, "e2", "e4")).unwrap();
        assert_eq!(game.halfmove_clock(), 0);
    }

    #[test]
    fn fullmove_number_increments_after_black() {
        let mut game = Game::new();
        assert_eq!(game.fullmove_number(), 1);
        game.execute(find_move(&game, "e2", "e4")).unwrap();
        assert_eq!(game.fullmove_number(), 1);
        game.execute(find_move(&game, "e7", "e5")).unwrap();
        assert_eq!(game.fullmove_number(), 2);
    }

    #[test]
    fn king_move_revokes_both_rights() {
        let mut board = Board::empty();
        board.place(loc("e1"), Piece::new(PieceKind::King, Color::White));
        board.place(loc("a1"), Piece::new(PieceKind::Rook, Color::White));
        board.place(loc("h1"), Piece::new(PieceKind::Rook, Color::White));
        board.place(loc("e8"), Piece::new(PieceKind::King, Color::Black));
        let mut game = Game::with_board(board, Color::White);
        assert!(game.castling_rights().can_castle_kingside(Color::White));

        game.execute(find_move(&game, "e1", "e2")).unwrap();
        assert!(!game.castling_rights().can_castle_kingside(Color::White));
        assert!(!game.castling_rights().can_castle_queenside(Color::White));
    }

    #[test]
    fn rook_move_revokes_only_its_side_permanently() {
        let mut board = Board::empty();
        board.place(loc("e1"), Piece::new(PieceKind::King, Color::White));
        board.place(loc("a1"), Piece::new(PieceKind::Rook, Color::White));
        board.place(loc("h1"), Piece::new(PieceKind::Rook, Color::White));
        board.place(loc("e8"), Piece::new(PieceKind::King, Color::Black));
        let mut game = Game::with_board(board, Color::White);

        game.execute(find_move(&game, "h1", "h3")).unwrap();
        assert!(!game.castling_rights().can_castle_kingside(Color::White));
        assert!(game.castling_rights().can_castle_queenside(Color::White));

        // Returning home does not restore the right.
        game.execute(find_move(&game, "e8", "d8")).unwrap();
        game.execute(find_move(&game, "h3", "h1")).unwrap();
        assert!(!game.castling_rights().can_castle_kingside(Color::White));
    }

    #[test]
    fn capturing_a_rook_on_its_home_square_revokes_the_right() {
        let mut board = Board::empty();
        board.place(loc("e1"), Piece::new(PieceKind::King, Color::White));
        board.place(loc("e8"), Piece::new(PieceKind::King, Color::Black));
        board.place(loc("h8"), Piece::new(PieceKind::Rook, Color::Black));
        board.place(loc("h1"), Piece::new(PieceKind::Rook, Color::White));
        let mut game = Game::with_board(board, Color::White);
        assert!(game.castling_rights().can_castle_kingside(Color::Black));

        game.execute(find_move(&game, "h1", "h8")).unwrap();
        assert!(!game.castling_rights().can_castle_kingside(Color::Black));
    }

    #[test]
    fn agree_draw_is_terminal() {
        let mut game = Game::new();
        game.agree_draw().unwrap();
        assert_eq!(game.status(), GameStatus::Draw);
        assert!(game.is_over());

        let m = Move::new(
            Piece::new(PieceKind::Pawn, Color::White),
            loc("e2"),
            loc("e4"),
            MoveFlag::Normal,
        );
        assert_eq!(game.execute(m), Err(GameError::GameOver));
        assert_eq!(game.execute_unchecked(m), Err(GameError::GameOver));
        assert_eq!(game.agree_draw(), Err(GameError::GameOver));
    }

    #[test]
    fn with_board_detects_an_immediate_stalemate() {
        let mut board = Board::empty();
        board.place(loc("h8"), Piece::new(PieceKind::King, Color::Black));
        board.place(loc("f7"), Piece::new(PieceKind::Queen, Color::White));
        board.place(loc("g6"), Piece::new(PieceKind::King, Color::White));
        let game = Game::with_board(board, Color::Black);

        assert!(!game.is_in_check(Color::Black));
        assert_eq!(game.status(), GameStatus::Stalemate);
        assert!(game.legal_moves().is_empty());
    }

    #[test]
    fn with_board_detects_an_immediate_checkmate() {
        // Back-rank mate.
        let mut board = Board::empty();
        board.place(loc("g8"), Piece::new(PieceKind::King, Color::Black));
        board.place(loc("f7"), Piece::new(PieceKind::Pawn, Color::Black));
        board.place(loc("g7"), Piece::new(PieceKind::Pawn, Color::Black));
        board.place(loc("h7"), Piece::new(PieceKind::Pawn, Color::Black));
        board.place(loc("a8"), Piece::new(PieceKind::Rook, Color::White));
        board.place(loc("e1"), Piece::new(PieceKind::King, Color::White));
        let game = Game::with_board(board, Color::Black);

        assert!(game.is_in_check(Color::Black));
        assert_eq!(
            game.status(),
            GameStatus::Checkmate {
                winner: Color::White
            }
        );
    }

    #[test]
    fn with_board_derives_castling_rights_from_placement() {
        let mut board = Board::empty();
        board.place(loc("e1"), Piece::new(PieceKind::King, Color::White));
        board.place(loc("h1"), Piece::new(PieceKind::Rook, Color::White));
        // Black king displaced: no black rights even with rooks at home.
        board.place(loc("d8"), Piece::new(PieceKind::King, Color::Black));
        board.place(loc("a8"), Piece::new(PieceKind::Rook, Color::Black));
        let game = Game::with_board(board, Color::White);

        let rights = game.castling_rights();
        assert!(rights.can_castle_kingside(Color::White));
        assert!(!rights.can_castle_queenside(Color::White));
        assert!(!rights.can_castle_kingside(Color::Black));
        assert!(!rights.can_castle_queenside(Color::Black));
    }

    #[test]
    fn castling_rights_flags() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::Black));

        rights.remove_kingside(Color::White);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::White));

        rights.remove_color(Color::Black);
        assert!(!rights.can_castle_kingside(Color::Black));
        assert!(!rights.can_castle_queenside(Color::Black));

        assert_eq!(CastlingRights::NONE.raw(), 0);
    }
}
