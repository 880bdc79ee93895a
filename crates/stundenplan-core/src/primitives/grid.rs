// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use serde::{Deserialize, Serialize};

/// Day of the planning week, zero-based.
#[repr(transparent)]
#[must_use]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Day(u8);

impl Day {
    #[inline]
    pub const fn new(index: u8) -> Self {
        Day(index)
    }

    #[inline]
    pub const fn index(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Day({})", self.0)
    }
}

/// Teaching period within a day, zero-based.
#[repr(transparent)]
#[must_use]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Period(u8);

impl Period {
    #[inline]
    pub const fn new(index: u8) -> Self {
        Period(index)
    }

    #[inline]
    pub const fn index(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Period({})", self.0)
    }
}

/// One cell of the planning grid. The derived ordering is (day, period),
/// which is the ordering every deterministic enumeration in the engine
/// relies on.
#[must_use]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TimeSlot {
    day: Day,
    period: Period,
}

impl TimeSlot {
    #[inline]
    pub const fn new(day: Day, period: Period) -> Self {
        TimeSlot { day, period }
    }

    #[inline]
    pub const fn day(&self) -> Day {
        self.day
    }

    #[inline]
    pub const fn period(&self) -> Period {
        self.period
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimeSlot(d{}, p{})", self.day.index(), self.period.index())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridError {
    ZeroDays,
    ZeroPeriods,
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::ZeroDays => write!(f, "A slot grid needs at least one day."),
            GridError::ZeroPeriods => write!(f, "A slot grid needs at least one period per day."),
        }
    }
}

impl std::error::Error for GridError {}

/// The fixed, finite planning grid: `days` × `periods_per_day` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotGrid {
    days: u8,
    periods_per_day: u8,
}

impl SlotGrid {
    #[inline]
    pub fn new(days: u8, periods_per_day: u8) -> Result<Self, GridError> {
        if days == 0 {
            return Err(GridError::ZeroDays);
        }
        if periods_per_day == 0 {
            return Err(GridError::ZeroPeriods);
        }
        Ok(SlotGrid {
            days,
            periods_per_day,
        })
    }

    #[inline]
    pub const fn days(&self) -> u8 {
        self.days
    }

    #[inline]
    pub const fn periods_per_day(&self) -> u8 {
        self.periods_per_day
    }

    #[inline]
    pub const fn slot_count(&self) -> usize {
        self.days as usize * self.periods_per_day as usize
    }

    #[inline]
    pub fn contains(&self, slot: TimeSlot) -> bool {
        slot.day().index() < self.days && slot.period().index() < self.periods_per_day
    }

    /// Dense index of `slot` in (day, period) order.
    #[inline]
    pub fn ordinal(&self, slot: TimeSlot) -> Option<usize> {
        if !self.contains(slot) {
            return None;
        }
        Some(
            slot.day().index() as usize * self.periods_per_day as usize
                + slot.period().index() as usize,
        )
    }

    /// Inverse of [`SlotGrid::ordinal`].
    #[inline]
    pub fn slot_at(&self, ordinal: usize) -> Option<TimeSlot> {
        if ordinal >= self.slot_count() {
            return None;
        }
        let per = self.periods_per_day as usize;
        Some(TimeSlot::new(
            Day::new((ordinal / per) as u8),
            Period::new((ordinal % per) as u8),
        ))
    }

    /// All slots in ascending (day, period) order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = TimeSlot> + '_ {
        (0..self.slot_count()).map(move |o| self.slot_at(o).expect("ordinal in range"))
    }
}

impl std::fmt::Display for SlotGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SlotGrid({} days x {} periods)", self.days, self.periods_per_day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn slot(d: u8, p: u8) -> TimeSlot {
        TimeSlot::new(Day::new(d), Period::new(p))
    }

    #[test]
    fn test_grid_rejects_zero_dimensions() {
        assert_eq!(SlotGrid::new(0, 4), Err(GridError::ZeroDays));
        assert_eq!(SlotGrid::new(5, 0), Err(GridError::ZeroPeriods));
    }

    #[test]
    fn test_ordinal_roundtrip() {
        let grid = SlotGrid::new(5, 6).unwrap();
        assert_eq!(grid.slot_count(), 30);
        for o in 0..grid.slot_count() {
            let s = grid.slot_at(o).unwrap();
            assert_eq!(grid.ordinal(s), Some(o));
        }
        assert_eq!(grid.slot_at(30), None);
    }

    #[test]
    fn test_ordinal_rejects_out_of_grid() {
        let grid = SlotGrid::new(2, 3).unwrap();
        assert_eq!(grid.ordinal(slot(2, 0)), None);
        assert_eq!(grid.ordinal(slot(0, 3)), None);
        assert_eq!(grid.ordinal(slot(1, 2)), Some(5));
    }

    #[test]
    fn test_iteration_is_slot_ordered() {
        let grid = SlotGrid::new(2, 2).unwrap();
        let slots: Vec<_> = grid.iter().collect();
        assert_eq!(
            slots,
            vec![slot(0, 0), slot(0, 1), slot(1, 0), slot(1, 1)]
        );
        let mut sorted = slots.clone();
        sorted.sort();
        assert_eq!(slots, sorted);
    }

    #[test]
    fn test_slot_ordering_is_day_major() {
        assert!(slot(0, 5) < slot(1, 0));
        assert!(slot(1, 0) < slot(1, 1));
    }

    #[test]
    fn test_display() {
        let grid = SlotGrid::new(5, 6).unwrap();
        assert_eq!(format!("{grid}"), "SlotGrid(5 days x 6 periods)");
        assert_eq!(format!("{}", slot(2, 4)), "TimeSlot(d2, p4)");
    }
}
