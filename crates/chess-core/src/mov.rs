//! Move representation.

use crate::{File, Location, Piece, PieceKind};
use std::fmt;

/// Flags distinguishing special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    /// Quiet move to an empty square.
    Normal,
    /// Capture of the piece on the destination square.
    Capture,
    /// Kingside castling (O-O).
    CastleKingside,
    /// Queenside castling (O-O-O).
    CastleQueenside,
    /// En passant capture; the captured pawn does not stand on the
    /// destination square.
    EnPassant,
    /// Pawn promotion to the given kind, capturing or not.
    Promotion(PieceKind),
}

impl MoveFlag {
    /// Returns the promotion kind if this is a promotion move.
    #[inline]
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        match self {
            MoveFlag::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self, MoveFlag::Promotion(_))
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A single board transition, possibly compound (castling relocates the
/// paired rook, en passant captures off the destination square).
///
/// Moves are plain values; they describe a transition without validating
/// it. Legality is the province of the game that produced them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Location,
    to: Location,
    piece: Piece,
    flag: MoveFlag,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(piece: Piece, from: Location, to: Location, flag: MoveFlag) -> Self {
        Move {
            from,
            to,
            piece,
            flag,
        }
    }

    /// Returns the start location.
    #[inline]
    pub const fn from(self) -> Location {
        self.from
    }

    /// Returns the destination location.
    #[inline]
    pub const fn to(self) -> Location {
        self.to
    }

    /// Returns the piece being moved.
    #[inline]
    pub const fn piece(self) -> Piece {
        self.piece
    }

    /// Returns the move flag.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        self.flag
    }

    /// Returns true if this move is a castle.
    #[inline]
    pub const fn is_castle(self) -> bool {
        self.flag.is_castle()
    }

    /// Returns true if this move is a promotion.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.flag.is_promotion()
    }

    /// Returns the promotion kind if this is a promotion move.
    #[inline]
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        self.flag.promotion_kind()
    }

    /// For a castling move, returns the paired rook's start and
    /// destination squares; `None` for any other move.
    ///
    /// Renderers relocate the rook's visual representation from exactly
    /// these squares after executing a castle.
    pub const fn castle_rook_squares(self) -> Option<(Location, Location)> {
        let back = self.piece.color.back_rank();
        match self.flag {
            MoveFlag::CastleKingside => Some((
                Location::new(File::H, back),
                Location::new(File::F, back),
            )),
            MoveFlag::CastleQueenside => Some((
                Location::new(File::A, back),
                Location::new(File::D, back),
            )),
            _ => None,
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion_kind() {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}
