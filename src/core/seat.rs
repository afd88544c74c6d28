//! Seat identification and per-seat data storage.
//!
//! ## Seat
//!
//! Type-safe seat index for table games. Seats are 0-based and play
//! proceeds in increasing order, wrapping around.
//!
//! ## SeatMap
//!
//! Per-seat storage backed by `Vec` for O(1) access, indexable by `Seat`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat at the table. The first seat is `Seat(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    /// Create a new seat.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that acts after this one at a table of `seat_count`.
    #[must_use]
    pub fn next(self, seat_count: usize) -> Self {
        Self(((self.index() + 1) % seat_count) as u8)
    }

    /// Iterate over all seats of a table with `seat_count` seats.
    ///
    /// ```
    /// use arcade_rules::core::Seat;
    ///
    /// let seats: Vec<_> = Seat::all(3).collect();
    /// assert_eq!(seats, vec![Seat(0), Seat(1), Seat(2)]);
    /// ```
    pub fn all(seat_count: usize) -> impl Iterator<Item = Seat> {
        (0..seat_count as u8).map(Seat)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data with O(1) access.
///
/// ```
/// use arcade_rules::core::{Seat, SeatMap};
///
/// let mut counts: SeatMap<usize> = SeatMap::new(3, |_| 17);
/// counts[Seat(0)] += 3;
/// assert_eq!(counts[Seat(0)], 20);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: Vec<T>,
}

impl<T> SeatMap<T> {
    /// Create a new map with values from a factory function.
    pub fn new(seat_count: usize, factory: impl Fn(Seat) -> T) -> Self {
        assert!(seat_count > 0, "Must have at least 1 seat");
        assert!(seat_count <= 255, "At most 255 seats supported");

        let data = (0..seat_count as u8).map(|i| factory(Seat(i))).collect();
        Self { data }
    }

    /// Build a map from one value per seat, in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 seat");
        assert!(data.len() <= 255, "At most 255 seats supported");
        Self { data }
    }

    /// Number of seats.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.data.len()
    }

    /// Value for `seat`, or `None` if the seat is not at the table.
    #[must_use]
    pub fn get(&self, seat: Seat) -> Option<&T> {
        self.data.get(seat.index())
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        self.data.iter().enumerate().map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over the values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        &self.data[seat.index()]
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        &mut self.data[seat.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_next_wraps() {
        assert_eq!(Seat(0).next(3), Seat(1));
        assert_eq!(Seat(2).next(3), Seat(0));
        assert_eq!(format!("{}", Seat(1)), "Seat 1");
    }

    #[test]
    fn test_seat_map_indexing() {
        let mut map: SeatMap<i32> = SeatMap::new(3, |s| s.index() as i32 * 10);
        assert_eq!(map[Seat(2)], 20);

        map[Seat(1)] = 5;
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Seat(0), &0), (Seat(1), &5), (Seat(2), &20)]);
        assert_eq!(map.seat_count(), 3);
    }

    #[test]
    fn test_seat_map_serialization() {
        let map = SeatMap::from_vec(vec![1, 2, 3]);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: SeatMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 seat")]
    fn test_seat_map_zero_seats() {
        let _: SeatMap<i32> = SeatMap::new(0, |_| 0);
    }
}
