//! Board representation: edge and square ownership.
//!
//! A board of size N is a square lattice of (N+1) x (N+1) dots. Players own
//! individual edges between adjacent dots and the unit squares those edges
//! enclose:
//!
//! - `horizontal`: (N+1) rows of N edges
//! - `vertical`: N rows of (N+1) edges
//! - `squares`: N x N claimed cells
//!
//! A square at (r, c) is bounded by `horizontal[r][c]`, `horizontal[r+1][c]`,
//! `vertical[r][c]` and `vertical[r][c+1]`. Its owner is cached in `squares`
//! when the fourth edge lands and is never overwritten afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::{PlayerId, PlayerMap};

/// Smallest board a new game may start at.
pub const MIN_SIZE: usize = 3;

/// Largest supported board (rows and columns are labeled A-Z).
pub const MAX_SIZE: usize = 26;

/// Which of the two edge grids a coordinate refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    Horizontal,
    Vertical,
}

impl EdgeKind {
    /// Number of rows in this edge grid for a board of the given size.
    #[must_use]
    pub const fn rows(self, size: usize) -> usize {
        match self {
            EdgeKind::Horizontal => size + 1,
            EdgeKind::Vertical => size,
        }
    }

    /// Number of columns in this edge grid for a board of the given size.
    #[must_use]
    pub const fn cols(self, size: usize) -> usize {
        match self {
            EdgeKind::Horizontal => size,
            EdgeKind::Vertical => size + 1,
        }
    }
}

/// Failure to place an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("edge coordinates are out of range")]
    OutOfBounds,
    #[error("edge is already occupied")]
    EdgeOccupied,
}

/// A row-major grid of ownership cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<PlayerId>>,
}

impl Grid {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn get(&self, row: usize, col: usize) -> Option<PlayerId> {
        self.cells[row * self.cols + col]
    }

    fn set(&mut self, row: usize, col: usize, player: PlayerId) {
        self.cells[row * self.cols + col] = Some(player);
    }
}

/// Edge and square ownership for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    horizontal: Grid,
    vertical: Grid,
    squares: Grid,
}

impl Board {
    /// Create an empty board.
    ///
    /// Sizes from 2 are accepted so saved games written by older builds
    /// remain loadable; new games start at `MIN_SIZE` or larger.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size >= 2 && size <= MAX_SIZE, "Board size must be 2-26");

        Self {
            size,
            horizontal: Grid::new(size + 1, size),
            vertical: Grid::new(size, size + 1),
            squares: Grid::new(size, size),
        }
    }

    /// Board size N (the board is always square).
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn grid(&self, kind: EdgeKind) -> &Grid {
        match kind {
            EdgeKind::Horizontal => &self.horizontal,
            EdgeKind::Vertical => &self.vertical,
        }
    }

    /// Owner of an edge, or `None` if unset.
    ///
    /// Out-of-range coordinates read as unset.
    #[must_use]
    pub fn edge(&self, kind: EdgeKind, row: usize, col: usize) -> Option<PlayerId> {
        let grid = self.grid(kind);
        if grid.in_bounds(row, col) {
            grid.get(row, col)
        } else {
            None
        }
    }

    /// Place an edge for a player.
    ///
    /// Fails with `OutOfBounds` if the coordinates fall outside the grid for
    /// that edge kind, and with `EdgeOccupied` if the edge is already owned.
    /// The board is unchanged on failure.
    pub fn set_edge(
        &mut self,
        kind: EdgeKind,
        row: usize,
        col: usize,
        player: PlayerId,
    ) -> Result<(), BoardError> {
        let grid = match kind {
            EdgeKind::Horizontal => &mut self.horizontal,
            EdgeKind::Vertical => &mut self.vertical,
        };

        if !grid.in_bounds(row, col) {
            return Err(BoardError::OutOfBounds);
        }
        if grid.get(row, col).is_some() {
            return Err(BoardError::EdgeOccupied);
        }

        grid.set(row, col, player);
        Ok(())
    }

    /// Owner of a claimed square, or `None` if unclaimed.
    #[must_use]
    pub fn square_owner(&self, row: usize, col: usize) -> Option<PlayerId> {
        if self.squares.in_bounds(row, col) {
            self.squares.get(row, col)
        } else {
            None
        }
    }

    /// Whether all four edges bounding square (row, col) are set.
    #[must_use]
    pub fn is_square_complete(&self, row: usize, col: usize) -> bool {
        if !self.squares.in_bounds(row, col) {
            return false;
        }

        self.horizontal.get(row, col).is_some()
            && self.horizontal.get(row + 1, col).is_some()
            && self.vertical.get(row, col).is_some()
            && self.vertical.get(row, col + 1).is_some()
    }

    /// Claim a completed square for a player.
    ///
    /// Returns true only when the square is complete and was not yet claimed;
    /// an existing owner is never overwritten.
    pub fn claim_square(&mut self, row: usize, col: usize, player: PlayerId) -> bool {
        if self.is_square_complete(row, col) && self.squares.get(row, col).is_none() {
            self.squares.set(row, col, player);
            true
        } else {
            false
        }
    }

    /// Whether every square is claimed. This is the sole win condition check.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.squares.cells.iter().all(|c| c.is_some())
    }

    /// Count claimed squares per player.
    #[must_use]
    pub fn claim_counts(&self, player_count: u8) -> PlayerMap<u32> {
        let mut counts = PlayerMap::with_value(player_count, 0u32);
        for owner in self.squares.cells.iter().flatten() {
            counts[*owner] += 1;
        }
        counts
    }

    /// Raw cells of an edge grid in row-major order, for the persistence
    /// boundary.
    pub fn edge_cells(&self, kind: EdgeKind) -> impl Iterator<Item = Option<PlayerId>> + '_ {
        self.grid(kind).cells.iter().copied()
    }

    /// Raw square cells in row-major order, for the persistence boundary.
    pub fn square_cells(&self) -> impl Iterator<Item = Option<PlayerId>> + '_ {
        self.squares.cells.iter().copied()
    }

    /// Rebuild a board from raw row-major cells, as read from a saved record.
    ///
    /// Cell counts must match the grid dimensions for `size` exactly.
    pub(crate) fn from_cells(
        size: usize,
        horizontal: Vec<Option<PlayerId>>,
        vertical: Vec<Option<PlayerId>>,
        squares: Vec<Option<PlayerId>>,
    ) -> Self {
        assert_eq!(horizontal.len(), (size + 1) * size);
        assert_eq!(vertical.len(), size * (size + 1));
        assert_eq!(squares.len(), size * size);

        Self {
            size,
            horizontal: Grid {
                rows: size + 1,
                cols: size,
                cells: horizontal,
            },
            vertical: Grid {
                rows: size,
                cols: size + 1,
                cells: vertical,
            },
            squares: Grid {
                rows: size,
                cols: size,
                cells: squares,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_board_is_empty() {
        for size in MIN_SIZE..=MAX_SIZE {
            let board = Board::new(size);
            assert_eq!(board.size(), size);
            assert!(!board.is_full());

            for row in 0..=size {
                for col in 0..size {
                    assert_eq!(board.edge(EdgeKind::Horizontal, row, col), None);
                }
            }
            for row in 0..size {
                for col in 0..=size {
                    assert_eq!(board.edge(EdgeKind::Vertical, row, col), None);
                }
            }
            for row in 0..size {
                for col in 0..size {
                    assert_eq!(board.square_owner(row, col), None);
                }
            }
        }
    }

    #[test]
    fn test_edge_grid_dimensions() {
        assert_eq!(EdgeKind::Horizontal.rows(3), 4);
        assert_eq!(EdgeKind::Horizontal.cols(3), 3);
        assert_eq!(EdgeKind::Vertical.rows(3), 3);
        assert_eq!(EdgeKind::Vertical.cols(3), 4);
    }

    #[test]
    fn test_set_edge() {
        let mut board = Board::new(3);

        board
            .set_edge(EdgeKind::Horizontal, 0, 0, PlayerId::ONE)
            .unwrap();
        assert_eq!(
            board.edge(EdgeKind::Horizontal, 0, 0),
            Some(PlayerId::ONE)
        );
    }

    #[test]
    fn test_set_edge_twice_is_occupied() {
        let mut board = Board::new(3);

        board
            .set_edge(EdgeKind::Vertical, 1, 2, PlayerId::ONE)
            .unwrap();
        let err = board
            .set_edge(EdgeKind::Vertical, 1, 2, PlayerId::new(2))
            .unwrap_err();

        assert_eq!(err, BoardError::EdgeOccupied);
        // First owner is preserved.
        assert_eq!(board.edge(EdgeKind::Vertical, 1, 2), Some(PlayerId::ONE));
    }

    #[test]
    fn test_set_edge_out_of_bounds() {
        let mut board = Board::new(3);

        // Horizontal rows run 0..=N, columns 0..N.
        assert_eq!(
            board.set_edge(EdgeKind::Horizontal, 4, 0, PlayerId::ONE),
            Err(BoardError::OutOfBounds)
        );
        assert_eq!(
            board.set_edge(EdgeKind::Horizontal, 0, 3, PlayerId::ONE),
            Err(BoardError::OutOfBounds)
        );
        // Vertical rows run 0..N, columns 0..=N.
        assert_eq!(
            board.set_edge(EdgeKind::Vertical, 3, 0, PlayerId::ONE),
            Err(BoardError::OutOfBounds)
        );
        assert_eq!(
            board.set_edge(EdgeKind::Vertical, 0, 4, PlayerId::ONE),
            Err(BoardError::OutOfBounds)
        );
    }

    fn complete_square(board: &mut Board, row: usize, col: usize, player: PlayerId) {
        let _ = board.set_edge(EdgeKind::Horizontal, row, col, player);
        let _ = board.set_edge(EdgeKind::Horizontal, row + 1, col, player);
        let _ = board.set_edge(EdgeKind::Vertical, row, col, player);
        let _ = board.set_edge(EdgeKind::Vertical, row, col + 1, player);
    }

    #[test]
    fn test_square_completion_and_claim() {
        let mut board = Board::new(3);

        assert!(!board.is_square_complete(0, 0));
        complete_square(&mut board, 0, 0, PlayerId::ONE);
        assert!(board.is_square_complete(0, 0));

        assert!(board.claim_square(0, 0, PlayerId::ONE));
        assert_eq!(board.square_owner(0, 0), Some(PlayerId::ONE));

        // A claimed square is never re-claimed or overwritten.
        assert!(!board.claim_square(0, 0, PlayerId::new(2)));
        assert_eq!(board.square_owner(0, 0), Some(PlayerId::ONE));
    }

    #[test]
    fn test_claim_incomplete_square_fails() {
        let mut board = Board::new(3);

        board
            .set_edge(EdgeKind::Horizontal, 0, 0, PlayerId::ONE)
            .unwrap();
        assert!(!board.claim_square(0, 0, PlayerId::ONE));
        assert_eq!(board.square_owner(0, 0), None);
    }

    #[test]
    fn test_is_full() {
        let mut board = Board::new(2);

        for row in 0..2 {
            for col in 0..2 {
                complete_square(&mut board, row, col, PlayerId::ONE);
                board.claim_square(row, col, PlayerId::ONE);
            }
        }

        assert!(board.is_full());
    }

    #[test]
    fn test_claim_counts() {
        let mut board = Board::new(3);

        complete_square(&mut board, 0, 0, PlayerId::ONE);
        board.claim_square(0, 0, PlayerId::ONE);
        complete_square(&mut board, 2, 2, PlayerId::new(2));
        board.claim_square(2, 2, PlayerId::new(2));
        complete_square(&mut board, 0, 2, PlayerId::new(2));
        board.claim_square(0, 2, PlayerId::new(2));

        let counts = board.claim_counts(2);
        assert_eq!(counts[PlayerId::ONE], 1);
        assert_eq!(counts[PlayerId::new(2)], 2);
    }

    #[test]
    fn test_board_serialization() {
        let mut board = Board::new(3);
        complete_square(&mut board, 1, 1, PlayerId::new(2));
        board.claim_square(1, 1, PlayerId::new(2));

        let json = serde_json::to_string(&board).unwrap();
        let deserialized: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, deserialized);
    }
}
