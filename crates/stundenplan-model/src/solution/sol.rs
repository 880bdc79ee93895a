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

use crate::problem::{
    group::GroupId, req::RequirementId, room::RoomId, subject::SubjectId, teacher::TeacherId,
};
use serde::{Deserialize, Serialize};
use stundenplan_core::prelude::{Penalty, TimeSlot};

/// One scheduled occurrence: everything an output formatter needs to
/// render a timetable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedLesson {
    requirement: RequirementId,
    occurrence: u32,
    subject: SubjectId,
    teacher: TeacherId,
    group: GroupId,
    room: RoomId,
    slot: TimeSlot,
}

impl PlacedLesson {
    #[inline]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        requirement: RequirementId,
        occurrence: u32,
        subject: SubjectId,
        teacher: TeacherId,
        group: GroupId,
        room: RoomId,
        slot: TimeSlot,
    ) -> Self {
        Self {
            requirement,
            occurrence,
            subject,
            teacher,
            group,
            room,
            slot,
        }
    }

    #[inline]
    pub fn requirement(&self) -> RequirementId {
        self.requirement
    }

    /// Zero-based occurrence index within the requirement's quota.
    #[inline]
    pub fn occurrence(&self) -> u32 {
        self.occurrence
    }

    #[inline]
    pub fn subject(&self) -> SubjectId {
        self.subject
    }

    #[inline]
    pub fn teacher(&self) -> TeacherId {
        self.teacher
    }

    #[inline]
    pub fn group(&self) -> GroupId {
        self.group
    }

    #[inline]
    pub fn room(&self) -> RoomId {
        self.room
    }

    #[inline]
    pub fn slot(&self) -> TimeSlot {
        self.slot
    }
}

impl std::fmt::Display for PlacedLesson {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} / {} / {} in {} at {}",
            self.requirement, self.subject, self.teacher, self.group, self.room, self.slot
        )
    }
}

/// A complete, hard-constraint-valid schedule with its objective score.
/// Placements are kept sorted by (slot, room) so rendering collaborators
/// see a stable order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timetable {
    placements: Vec<PlacedLesson>,
    score: Penalty,
}

impl Timetable {
    #[inline]
    pub fn new(mut placements: Vec<PlacedLesson>, score: Penalty) -> Self {
        placements.sort_by_key(|p| (p.slot(), p.room(), p.requirement(), p.occurrence()));
        Self { placements, score }
    }

    #[inline]
    pub fn placements(&self) -> &[PlacedLesson] {
        &self.placements
    }

    #[inline]
    pub fn score(&self) -> Penalty {
        self.score
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &PlacedLesson> {
        self.placements.iter()
    }

    /// Placements on a given slot, in room order.
    #[inline]
    pub fn lessons_at(&self, slot: TimeSlot) -> impl Iterator<Item = &PlacedLesson> {
        self.placements.iter().filter(move |p| p.slot() == slot)
    }
}

impl std::fmt::Display for Timetable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timetable: {} lessons, {}", self.placements.len(), self.score)
    }
}
