//! Board occupancy and raw movement geometry.

use chess_core::{Color, File, Location, Piece, PieceKind, Rank};
use std::fmt;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// A 64-square occupancy store.
///
/// The board knows which piece stands where and how pieces move in the
/// raw geometric sense. It holds no turn order, castling, or legality
/// knowledge; that lives in [`Game`](crate::Game).
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// Creates a board with the standard initial position.
    pub fn standard() -> Self {
        const BACK_RANK_KINDS: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Board::empty();
        for color in [Color::White, Color::Black] {
            for file in File::ALL {
                board.place(
                    Location::new(file, color.pawn_rank()),
                    Piece::new(PieceKind::Pawn, color),
                );
            }
            for (file, kind) in File::ALL.into_iter().zip(BACK_RANK_KINDS) {
                board.place(
                    Location::new(file, color.back_rank()),
                    Piece::new(kind, color),
                );
            }
        }
        board
    }

    /// Returns the piece occupying the given location, if any.
    #[inline]
    pub const fn piece_at(&self, at: Location) -> Option<Piece> {
        self.squares[at.index() as usize]
    }

    /// Places a piece, replacing any previous occupant.
    #[inline]
    pub fn place(&mut self, at: Location, piece: Piece) {
        self.squares[at.index() as usize] = Some(piece);
    }

    /// Removes and returns the occupant of a location.
    #[inline]
    pub fn remove(&mut self, at: Location) -> Option<Piece> {
        self.squares[at.index() as usize].take()
    }

    /// Moves the occupant of `from` to `to` as one step, first clearing
    /// `captured` if given.
    ///
    /// The captured location may differ from the destination: an en
    /// passant capture removes a pawn from the square behind it.
    pub fn relocate(&mut self, from: Location, to: Location, captured: Option<Location>) {
        if let Some(victim) = captured {
            self.squares[victim.index() as usize] = None;
        }
        let mover = self.squares[from.index() as usize].take();
        debug_assert!(mover.is_some(), "relocate from an empty square");
        self.squares[to.index() as usize] = mover;
    }

    /// Returns the location of the given color's king.
    pub fn king_location(&self, color: Color) -> Option<Location> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(loc, _)| loc)
    }

    /// Iterates over all occupied locations as `(Location, Piece)` pairs,
    /// a1 through h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Location, Piece)> + '_ {
        Location::all().filter_map(|loc| self.piece_at(loc).map(|p| (loc, p)))
    }

    /// Squares a piece standing at `from` can geometrically reach.
    ///
    /// Sliding pieces stop at the first occupied square and include it
    /// only when it holds an enemy; knights and kings use fixed offsets;
    /// pawns get forward pushes (double from their home rank) and
    /// occupied diagonal captures. No check legality is applied, and the
    /// en passant diagonal is not included here since the board does not
    /// know the en passant target.
    pub fn reachable(&self, from: Location, piece: Piece) -> Vec<Location> {
        match piece.kind {
            PieceKind::Pawn => self.pawn_reach(from, piece.color),
            PieceKind::Knight => self.leaper_reach(from, &KNIGHT_OFFSETS, piece.color),
            PieceKind::King => self.leaper_reach(from, &KING_OFFSETS, piece.color),
            PieceKind::Bishop => self.slider_reach(from, &BISHOP_DIRECTIONS, piece.color),
            PieceKind::Rook => self.slider_reach(from, &ROOK_DIRECTIONS, piece.color),
            PieceKind::Queen => {
                let mut out = self.slider_reach(from, &BISHOP_DIRECTIONS, piece.color);
                out.extend(self.slider_reach(from, &ROOK_DIRECTIONS, piece.color));
                out
            }
        }
    }

    /// Squares the piece standing at `from` attacks.
    ///
    /// This is capture geometry only: pawn pushes are excluded and pawn
    /// diagonals are included whether or not a target stands there. Check
    /// detection is built on this set.
    pub fn attacks(&self, from: Location, piece: Piece) -> Vec<Location> {
        match piece.kind {
            PieceKind::Pawn => self.pawn_attacks(from, piece.color),
            _ => self.reachable(from, piece),
        }
    }

    /// The two diagonal squares a pawn of `color` at `from` attacks,
    /// regardless of occupancy.
    pub fn pawn_attacks(&self, from: Location, color: Color) -> Vec<Location> {
        let dir = color.pawn_direction();
        [(-1, dir), (1, dir)]
            .into_iter()
            .filter_map(|(df, dr)| from.offset(df, dr))
            .collect()
    }

    fn pawn_reach(&self, from: Location, color: Color) -> Vec<Location> {
        let dir = color.pawn_direction();
        let mut out = Vec::new();

        if let Some(one) = from.offset(0, dir) {
            if self.piece_at(one).is_none() {
                out.push(one);
                if from.rank() == color.pawn_rank() {
                    if let Some(two) = one.offset(0, dir) {
                        if self.piece_at(two).is_none() {
                            out.push(two);
                        }
                    }
                }
            }
        }

        for diag in self.pawn_attacks(from, color) {
            if let Some(occupant) = self.piece_at(diag) {
                if occupant.color != color {
                    out.push(diag);
                }
            }
        }

        out
    }

    fn leaper_reach(&self, from: Location, offsets: &[(i8, i8)], us: Color) -> Vec<Location> {
        offsets
            .iter()
            .filter_map(|&(df, dr)| from.offset(df, dr))
            .filter(|&to| match self.piece_at(to) {
                Some(occupant) => occupant.color != us,
                None => true,
            })
            .collect()
    }

    fn slider_reach(&self, from: Location, directions: &[(i8, i8)], us: Color) -> Vec<Location> {
        let mut out = Vec::new();
        for &(df, dr) in directions {
            let mut current = from;
            while let Some(to) = current.offset(df, dr) {
                match self.piece_at(to) {
                    None => {
                        out.push(to);
                        current = to;
                    }
                    Some(occupant) => {
                        if occupant.color != us {
                            out.push(to);
                        }
                        break;
                    }
                }
            }
        }
        out
    }

    /// Renders the board as an ASCII diagram, White's pieces uppercase.
    ///
    /// Diagnostic only; never authoritative.
    pub fn ascii(&self) -> String {
        let mut out = String::from("  +-----------------+\n");
        for rank in Rank::ALL.iter().rev() {
            out.push(rank.to_char());
            out.push_str(" |");
            for file in File::ALL {
                out.push(' ');
                match self.piece_at(Location::new(file, *rank)) {
                    Some(piece) => out.push(piece.letter()),
                    None => out.push('.'),
                }
            }
            out.push_str(" |\n");
        }
        out.push_str("  +-----------------+\n");
        out.push_str("    a b c d e f g h\n");
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\n{})", self.ascii())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ascii())
    }
}
