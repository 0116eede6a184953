//! The [`Cell`] type — one maze position with walls, exit and occupant flags.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use crate::geom::Direction;

// ---------------------------------------------------------------------------
// WallMask
// ---------------------------------------------------------------------------

/// Bitmask of blocked walls. A set bit means the wall is closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallMask(pub u8);

impl WallMask {
    pub const NONE: Self = Self(0);
    pub const NORTH: Self = Self(1 << 0);
    pub const EAST: Self = Self(1 << 1);
    pub const SOUTH: Self = Self(1 << 2);
    pub const WEST: Self = Self(1 << 3);
    pub const ALL: Self = Self(0b1111);

    /// The single-bit mask for `dir`.
    #[inline]
    pub const fn of(dir: Direction) -> Self {
        match dir {
            Direction::North => Self::NORTH,
            Direction::East => Self::EAST,
            Direction::South => Self::SOUTH,
            Direction::West => Self::WEST,
        }
    }

    /// Whether this mask contains all the bits from `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Whether the mask is empty.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of closed walls.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    const fn with(self, other: Self, on: bool) -> Self {
        if on {
            Self(self.0 | other.0)
        } else {
            Self(self.0 & !other.0)
        }
    }
}

impl BitOr for WallMask {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for WallMask {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// Player / PlayerMask
// ---------------------------------------------------------------------------

/// A player identifier. At most [`Player::MAX`] players fit in a
/// [`PlayerMask`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8"))]
pub struct Player(u8);

impl Player {
    /// Number of distinct players.
    pub const MAX: u8 = 8;
    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);

    /// Player with the given 0-based id, or `None` if `id >= Player::MAX`.
    #[inline]
    pub const fn new(id: u8) -> Option<Self> {
        if id < Self::MAX { Some(Self(id)) } else { None }
    }

    /// 0-based id.
    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Iterate over every possible player, lowest id first.
    pub fn all() -> impl Iterator<Item = Player> {
        (0..Self::MAX).map(Player)
    }
}

/// A player id of [`Player::MAX`] or more.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlayerIdError(pub u8);

impl fmt::Display for PlayerIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player id {} is out of range (at most {} players)", self.0, Player::MAX)
    }
}

impl std::error::Error for PlayerIdError {}

impl TryFrom<u8> for Player {
    type Error = PlayerIdError;

    fn try_from(id: u8) -> Result<Self, PlayerIdError> {
        Self::new(id).ok_or(PlayerIdError(id))
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.0 + 1)
    }
}

/// Bitmask of players occupying a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerMask(pub u8);

impl PlayerMask {
    pub const NONE: Self = Self(0);

    /// The single-bit mask for `player`.
    #[inline]
    pub const fn of(player: Player) -> Self {
        Self(1 << player.0)
    }

    #[inline]
    pub const fn contains(self, player: Player) -> bool {
        self.0 & Self::of(player).0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Players present, lowest id first.
    pub fn iter(self) -> impl Iterator<Item = Player> {
        Player::all().filter(move |&p| self.contains(p))
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single maze cell.
///
/// A fresh cell has all four walls closed, no exit flag and no occupants.
/// Wall flags are only changed through [`Grid`](crate::Grid), which keeps
/// facing walls of adjacent cells in agreement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub(crate) walls: WallMask,
    pub(crate) exit: bool,
    /// Occupant flags. Owned by movement logic; the generator only sets the
    /// starting player and the pathfinder never reads it.
    pub occupants: PlayerMask,
}

impl Cell {
    /// Closed walls of this cell.
    #[inline]
    pub const fn walls(&self) -> WallMask {
        self.walls
    }

    /// Whether the wall facing `dir` is closed.
    #[inline]
    pub const fn has_wall(&self, dir: Direction) -> bool {
        self.walls.contains(WallMask::of(dir))
    }

    /// Whether this cell is the maze exit.
    #[inline]
    pub const fn is_exit(&self) -> bool {
        self.exit
    }

    /// Whether `player` stands on this cell.
    #[inline]
    pub const fn has_player(&self, player: Player) -> bool {
        self.occupants.contains(player)
    }

    /// Set or clear the occupant flag of `player`.
    #[inline]
    pub fn set_player(&mut self, player: Player, present: bool) {
        let bit = PlayerMask::of(player).0;
        if present {
            self.occupants.0 |= bit;
        } else {
            self.occupants.0 &= !bit;
        }
    }

    #[inline]
    pub(crate) fn set_wall(&mut self, dir: Direction, closed: bool) {
        self.walls = self.walls.with(WallMask::of(dir), closed);
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self {
            walls: WallMask::ALL,
            exit: false,
            occupants: PlayerMask::NONE,
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn player_ids_are_checked() {
        assert_eq!(serde_json::to_string(&Player::TWO).unwrap(), "1");
        assert_eq!(serde_json::from_str::<Player>("1").unwrap(), Player::TWO);
        assert!(serde_json::from_str::<Player>("8").is_err());
        assert!(serde_json::from_str::<Player>("255").is_err());
    }
}
