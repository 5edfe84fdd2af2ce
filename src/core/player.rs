//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Players are numbered from 1, matching the
//! numbers shown on the board and in status messages; a value of 0 never
//! denotes a player (grids use `Option<PlayerId>` for unowned cells).
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access, indexed by
//! `PlayerId`. Used for score tallies during win determination.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of players in a game.
pub const MAX_PLAYERS: u8 = 2;

/// Player identifier, numbered from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// The first player, who always opens a fresh game.
    pub const ONE: PlayerId = PlayerId(1);

    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player number (1-based).
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Get the zero-based index for array storage.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Whether this is a valid player number for a `player_count`-player game.
    #[must_use]
    pub const fn is_valid(self, player_count: u8) -> bool {
        self.0 >= 1 && self.0 <= player_count
    }

    /// The player whose turn follows this one, wrapping back to player 1.
    #[must_use]
    pub const fn next(self, player_count: u8) -> PlayerId {
        if self.0 + 1 > player_count {
            PlayerId(1)
        } else {
            PlayerId(self.0 + 1)
        }
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    pub fn all(player_count: u8) -> impl Iterator<Item = PlayerId> {
        (1..=player_count).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per player, indexed by `PlayerId`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: u8, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");

        let data = (1..=player_count).map(|n| factory(PlayerId(n))).collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: u8, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> u8 {
        self.data.len() as u8
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8 + 1), v))
    }

    /// Get the maximum value and every player holding it.
    ///
    /// Returns `None` for an empty map.
    pub fn leaders(&self) -> Option<(&T, Vec<PlayerId>)>
    where
        T: Ord,
    {
        let best = self.data.iter().max()?;
        let holders = self
            .iter()
            .filter(|(_, v)| *v == best)
            .map(|(p, _)| p)
            .collect();
        Some((best, holders))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p1 = PlayerId::ONE;
        let p2 = PlayerId::new(2);

        assert_eq!(p1.number(), 1);
        assert_eq!(p1.index(), 0);
        assert_eq!(p2.index(), 1);
        assert_eq!(format!("{}", p2), "player 2");
    }

    #[test]
    fn test_player_id_next_wraps() {
        assert_eq!(PlayerId::ONE.next(MAX_PLAYERS), PlayerId::new(2));
        assert_eq!(PlayerId::new(2).next(MAX_PLAYERS), PlayerId::ONE);
    }

    #[test]
    fn test_player_id_validity() {
        assert!(PlayerId::ONE.is_valid(2));
        assert!(PlayerId::new(2).is_valid(2));
        assert!(!PlayerId::new(0).is_valid(2));
        assert!(!PlayerId::new(3).is_valid(2));
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all(2).collect();
        assert_eq!(players, vec![PlayerId::ONE, PlayerId::new(2)]);
    }

    #[test]
    fn test_player_map_index() {
        let mut map: PlayerMap<u32> = PlayerMap::with_value(2, 0);

        map[PlayerId::ONE] = 5;
        map[PlayerId::new(2)] = 4;

        assert_eq!(map[PlayerId::ONE], 5);
        assert_eq!(map[PlayerId::new(2)], 4);
        assert_eq!(map.player_count(), 2);
    }

    #[test]
    fn test_player_map_leaders_unique() {
        let mut map: PlayerMap<u32> = PlayerMap::with_value(2, 0);
        map[PlayerId::ONE] = 5;
        map[PlayerId::new(2)] = 4;

        let (best, holders) = map.leaders().unwrap();
        assert_eq!(*best, 5);
        assert_eq!(holders, vec![PlayerId::ONE]);
    }

    #[test]
    fn test_player_map_leaders_tied() {
        let map: PlayerMap<u32> = PlayerMap::with_value(2, 3);

        let (best, holders) = map.leaders().unwrap();
        assert_eq!(*best, 3);
        assert_eq!(holders.len(), 2);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<u32> = PlayerMap::new(2, |p| p.number() as u32 * 10);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
