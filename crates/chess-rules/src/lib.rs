//! Chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - 64-square occupancy store with raw movement geometry
//! - [`Game`] - turn sequencing, legal move generation, move execution,
//!   and check/checkmate/stalemate detection
//! - [`MoveList`] - ordered sequences of legal moves
//!
//! # Architecture
//!
//! The board knows geometry, not legality: it answers which squares a
//! piece could geometrically reach. The game layers turn order, castling
//! rights, en passant, and the check-safety filter on top, and is the
//! only component that mutates state. Callers drive it through three
//! operations: ask for a piece's legal moves, execute one, and read the
//! resulting status.
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Location};
//! use chess_rules::{Game, GameStatus};
//!
//! let mut game = Game::new();
//! let from = Location::from_algebraic("e2").unwrap();
//! let to = Location::from_algebraic("e4").unwrap();
//!
//! let moves = game.moves_for_piece(from);
//! let advance = moves.as_slice().iter().copied().find(|m| m.to() == to).unwrap();
//! game.execute(advance).unwrap();
//!
//! assert_eq!(game.side_to_move(), Color::Black);
//! assert_eq!(game.status(), GameStatus::InProgress);
//! ```

mod board;
mod game;
mod movegen;

pub use board::Board;
pub use game::{CastlingRights, Game, GameError, GameStatus};
pub use movegen::MoveList;
