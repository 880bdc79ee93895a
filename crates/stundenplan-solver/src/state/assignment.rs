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

use crate::{
    model::{
        index::{GroupIndex, LessonIndex, RoomIndex, TeacherIndex},
        solver_model::SolverModel,
    },
    state::err::ConflictError,
};
use stundenplan_model::prelude::HardRule;

/// Where a lesson sits: a slot ordinal and a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub slot: usize,
    pub room: RoomIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogEntry {
    Placed(LessonIndex),
    Removed(LessonIndex, Placement),
}

/// Opaque mark into the change log; `restore` rolls back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Snapshot(usize);

/// The mutable schedule under construction. Occupancy is tracked per
/// teacher, group and room, keyed by slot ordinal, so a placement's
/// legality is a handful of array reads. All mutation goes through
/// `place`/`remove` and is recorded in a change log, which makes
/// `restore` O(k) in the placements since the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentState {
    slot_count: usize,
    teacher_busy: Vec<Option<LessonIndex>>,
    group_busy: Vec<Option<LessonIndex>>,
    room_busy: Vec<Option<LessonIndex>>,
    placements: Vec<Option<Placement>>,
    placed: usize,
    log: Vec<LogEntry>,
}

impl AssignmentState {
    pub fn new(model: &SolverModel<'_>) -> Self {
        let slot_count = model.slot_count();
        Self {
            slot_count,
            teacher_busy: vec![None; model.teacher_count() * slot_count],
            group_busy: vec![None; model.group_count() * slot_count],
            room_busy: vec![None; model.room_count() * slot_count],
            placements: vec![None; model.lesson_count()],
            placed: 0,
            log: Vec::new(),
        }
    }

    #[inline]
    fn teacher_cell(&self, teacher: TeacherIndex, slot: usize) -> usize {
        teacher.get() * self.slot_count + slot
    }

    #[inline]
    fn group_cell(&self, group: GroupIndex, slot: usize) -> usize {
        group.get() * self.slot_count + slot
    }

    #[inline]
    fn room_cell(&self, room: RoomIndex, slot: usize) -> usize {
        room.get() * self.slot_count + slot
    }

    #[inline]
    pub fn teacher_lesson_at(&self, teacher: TeacherIndex, slot: usize) -> Option<LessonIndex> {
        self.teacher_busy[self.teacher_cell(teacher, slot)]
    }

    #[inline]
    pub fn group_lesson_at(&self, group: GroupIndex, slot: usize) -> Option<LessonIndex> {
        self.group_busy[self.group_cell(group, slot)]
    }

    #[inline]
    pub fn room_lesson_at(&self, room: RoomIndex, slot: usize) -> Option<LessonIndex> {
        self.room_busy[self.room_cell(room, slot)]
    }

    #[inline]
    pub fn placement(&self, lesson: LessonIndex) -> Option<Placement> {
        self.placements[lesson.get()]
    }

    #[inline]
    pub fn placements(&self) -> &[Option<Placement>] {
        &self.placements
    }

    #[inline]
    pub fn placed_count(&self) -> usize {
        self.placed
    }

    /// True iff every requirement's quota is met, i.e. every expanded
    /// occurrence is placed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.placed == self.placements.len()
    }

    /// First hard rule a placement would violate, if any. Pure check;
    /// the state is not touched.
    pub fn check(
        &self,
        model: &SolverModel<'_>,
        lesson: LessonIndex,
        slot: usize,
        room: RoomIndex,
    ) -> Result<(), HardRule> {
        if self.placements[lesson.get()].is_some() {
            return Err(HardRule::QuotaBound);
        }
        let ri = model.lesson(lesson).requirement();
        let teacher = model.teacher_of(ri);
        let group = model.group_of(ri);

        if !model.teacher_is_available(teacher, slot) {
            return Err(HardRule::TeacherUnavailable);
        }
        if !model.day_is_allowed(ri, slot) {
            return Err(HardRule::DisallowedDay);
        }
        if !model.room_is_admissible(ri, room) {
            if !model.room_fits(ri, room) {
                return Err(HardRule::RoomTooSmall);
            }
            return Err(HardRule::PinnedRoomType);
        }
        if self.teacher_lesson_at(teacher, slot).is_some() {
            return Err(HardRule::TeacherClash);
        }
        if self.group_lesson_at(group, slot).is_some() {
            return Err(HardRule::GroupClash);
        }
        if self.room_lesson_at(room, slot).is_some() {
            return Err(HardRule::RoomClash);
        }
        Ok(())
    }

    /// Atomic check-then-act: on violation nothing is mutated and the
    /// violated rule is named.
    pub fn place(
        &mut self,
        model: &SolverModel<'_>,
        lesson: LessonIndex,
        slot: usize,
        room: RoomIndex,
    ) -> Result<(), ConflictError> {
        if let Err(rule) = self.check(model, lesson, slot, room) {
            return Err(ConflictError::new(lesson, slot, room, rule));
        }
        let ri = model.lesson(lesson).requirement();
        let teacher_cell = self.teacher_cell(model.teacher_of(ri), slot);
        let group_cell = self.group_cell(model.group_of(ri), slot);
        let room_cell = self.room_cell(room, slot);
        self.teacher_busy[teacher_cell] = Some(lesson);
        self.group_busy[group_cell] = Some(lesson);
        self.room_busy[room_cell] = Some(lesson);
        self.placements[lesson.get()] = Some(Placement { slot, room });
        self.placed += 1;
        self.log.push(LogEntry::Placed(lesson));
        Ok(())
    }

    /// Unplaces a lesson; returns its former placement, or `None` if it
    /// was not placed.
    pub fn remove(&mut self, model: &SolverModel<'_>, lesson: LessonIndex) -> Option<Placement> {
        let placement = self.placements[lesson.get()].take()?;
        self.clear_occupancy(model, lesson, placement);
        self.placed -= 1;
        self.log.push(LogEntry::Removed(lesson, placement));
        Some(placement)
    }

    #[inline]
    fn clear_occupancy(&mut self, model: &SolverModel<'_>, lesson: LessonIndex, p: Placement) {
        let ri = model.lesson(lesson).requirement();
        let teacher_cell = self.teacher_cell(model.teacher_of(ri), p.slot);
        let group_cell = self.group_cell(model.group_of(ri), p.slot);
        let room_cell = self.room_cell(p.room, p.slot);
        self.teacher_busy[teacher_cell] = None;
        self.group_busy[group_cell] = None;
        self.room_busy[room_cell] = None;
    }

    #[inline]
    fn set_occupancy(&mut self, model: &SolverModel<'_>, lesson: LessonIndex, p: Placement) {
        let ri = model.lesson(lesson).requirement();
        let teacher_cell = self.teacher_cell(model.teacher_of(ri), p.slot);
        let group_cell = self.group_cell(model.group_of(ri), p.slot);
        let room_cell = self.room_cell(p.room, p.slot);
        self.teacher_busy[teacher_cell] = Some(lesson);
        self.group_busy[group_cell] = Some(lesson);
        self.room_busy[room_cell] = Some(lesson);
    }

    #[inline]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.log.len())
    }

    /// Rolls the state back to the snapshot by undoing logged changes in
    /// reverse order. Afterwards the state compares equal to what it was
    /// when the snapshot was taken.
    pub fn restore(&mut self, model: &SolverModel<'_>, snapshot: Snapshot) {
        while self.log.len() > snapshot.0 {
            match self.log.pop().expect("log is non-empty while above the mark") {
                LogEntry::Placed(lesson) => {
                    let p = self.placements[lesson.get()]
                        .take()
                        .expect("a logged placement is still applied");
                    self.clear_occupancy(model, lesson, p);
                    self.placed -= 1;
                }
                LogEntry::Removed(lesson, p) => {
                    self.set_occupancy(model, lesson, p);
                    self.placements[lesson.get()] = Some(p);
                    self.placed += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use stundenplan_core::prelude::{Day, Period, SlotGrid, TimeSlot};
    use stundenplan_model::prelude::{
        EntityRegistry, Group, GroupId, LessonRequirement, Problem, RequirementContainer,
        RequirementId, Room, RoomId, RoomType, RoomTypeId, Subject, SubjectId, Teacher, TeacherId,
    };

    #[inline]
    fn slot(d: u8, p: u8) -> TimeSlot {
        TimeSlot::new(Day::new(d), Period::new(p))
    }

    fn all_slots(days: u8, periods: u8) -> BTreeSet<TimeSlot> {
        (0..days)
            .flat_map(|d| (0..periods).map(move |p| slot(d, p)))
            .collect()
    }

    /// Two teachers, two groups, two rooms on a 2x2 grid; requirement 0
    /// is taught by teacher 1 to group 1, requirement 1 by teacher 2 to
    /// group 1 as well (same group, so they clash by group).
    fn sample_problem() -> Problem {
        let registry = EntityRegistry::load(
            vec![RoomType::new(RoomTypeId::new(1), "Hörsaal")],
            vec![Subject::new(SubjectId::new(1), "Analysis", None)],
            vec![
                Teacher::new(TeacherId::new(1), "Curie", all_slots(2, 2), BTreeMap::new()),
                Teacher::new(
                    TeacherId::new(2),
                    "Gauss",
                    [slot(0, 0)].into(),
                    BTreeMap::new(),
                ),
            ],
            vec![Group::new(GroupId::new(1), "B_Inf 1", 40)],
            vec![
                Room::new(RoomId::new(1), "H1", RoomTypeId::new(1), 100),
                Room::new(RoomId::new(2), "H2", RoomTypeId::new(1), 20),
            ],
        )
        .unwrap();
        let mut reqs = RequirementContainer::new();
        reqs.insert(
            LessonRequirement::new(
                RequirementId::new(1),
                SubjectId::new(1),
                TeacherId::new(1),
                GroupId::new(1),
                2,
                None,
                BTreeSet::new(),
            )
            .unwrap(),
        )
        .unwrap();
        reqs.insert(
            LessonRequirement::new(
                RequirementId::new(2),
                SubjectId::new(1),
                TeacherId::new(2),
                GroupId::new(1),
                1,
                None,
                BTreeSet::new(),
            )
            .unwrap(),
        )
        .unwrap();
        Problem::new(registry, SlotGrid::new(2, 2).unwrap(), reqs).unwrap()
    }

    #[test]
    fn test_place_and_remove_roundtrip() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let mut state = AssignmentState::new(&model);

        let l0 = LessonIndex::new(0);
        state.place(&model, l0, 0, RoomIndex::new(0)).unwrap();
        assert_eq!(state.placed_count(), 1);
        assert_eq!(
            state.placement(l0),
            Some(Placement {
                slot: 0,
                room: RoomIndex::new(0)
            })
        );
        assert_eq!(state.teacher_lesson_at(TeacherIndex::new(0), 0), Some(l0));
        assert_eq!(state.group_lesson_at(GroupIndex::new(0), 0), Some(l0));
        assert_eq!(state.room_lesson_at(RoomIndex::new(0), 0), Some(l0));

        let removed = state.remove(&model, l0).unwrap();
        assert_eq!(removed.slot, 0);
        assert_eq!(state.placed_count(), 0);
        assert_eq!(state.teacher_lesson_at(TeacherIndex::new(0), 0), None);
        assert_eq!(state.remove(&model, l0), None);
    }

    #[test]
    fn test_failed_place_leaves_state_untouched() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let mut state = AssignmentState::new(&model);

        state
            .place(&model, LessonIndex::new(0), 0, RoomIndex::new(0))
            .unwrap();
        let before = state.clone();

        // Lesson 1 shares requirement 0's teacher, who is busy at slot 0.
        let err = state
            .place(&model, LessonIndex::new(1), 0, RoomIndex::new(0))
            .expect_err("same teacher at slot 0 must clash");
        assert_eq!(err.rule(), HardRule::TeacherClash);
        assert_eq!(state, before);
    }

    #[test]
    fn test_conflict_rules_are_named() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let mut state = AssignmentState::new(&model);

        // Teacher 2 is only available at slot 0.
        let err = state
            .place(&model, LessonIndex::new(2), 3, RoomIndex::new(0))
            .expect_err("teacher 2 is not available at slot 3");
        assert_eq!(err.rule(), HardRule::TeacherUnavailable);

        // Room H2 (cap 20) cannot hold the 40-head group.
        let err = state
            .place(&model, LessonIndex::new(0), 0, RoomIndex::new(1))
            .expect_err("H2 is too small");
        assert_eq!(err.rule(), HardRule::RoomTooSmall);

        // Group clash between requirements sharing a group.
        state
            .place(&model, LessonIndex::new(0), 0, RoomIndex::new(0))
            .unwrap();
        let err = state
            .place(&model, LessonIndex::new(2), 0, RoomIndex::new(0))
            .expect_err("group 1 already busy at slot 0");
        assert_eq!(err.rule(), HardRule::GroupClash);

        // Placing the same occurrence twice.
        let err = state
            .place(&model, LessonIndex::new(0), 1, RoomIndex::new(0))
            .expect_err("occurrence 0 is already placed");
        assert_eq!(err.rule(), HardRule::QuotaBound);
    }

    #[test]
    fn test_room_clash_distinct_group_and_teacher() {
        let registry = EntityRegistry::load(
            vec![RoomType::new(RoomTypeId::new(1), "Hörsaal")],
            vec![Subject::new(SubjectId::new(1), "Analysis", None)],
            vec![
                Teacher::new(TeacherId::new(1), "Curie", all_slots(1, 2), BTreeMap::new()),
                Teacher::new(TeacherId::new(2), "Gauss", all_slots(1, 2), BTreeMap::new()),
            ],
            vec![
                Group::new(GroupId::new(1), "A", 10),
                Group::new(GroupId::new(2), "B", 10),
            ],
            vec![Room::new(RoomId::new(1), "H1", RoomTypeId::new(1), 100)],
        )
        .unwrap();
        let mut reqs = RequirementContainer::new();
        for (id, teacher, group) in [(1u32, 1u32, 1u32), (2, 2, 2)] {
            reqs.insert(
                LessonRequirement::new(
                    RequirementId::new(id),
                    SubjectId::new(1),
                    TeacherId::new(teacher),
                    GroupId::new(group),
                    1,
                    None,
                    BTreeSet::new(),
                )
                .unwrap(),
            )
            .unwrap();
        }
        let problem = Problem::new(registry, SlotGrid::new(1, 2).unwrap(), reqs).unwrap();
        let model = SolverModel::build(&problem);
        let mut state = AssignmentState::new(&model);

        state
            .place(&model, LessonIndex::new(0), 0, RoomIndex::new(0))
            .unwrap();
        let err = state
            .place(&model, LessonIndex::new(1), 0, RoomIndex::new(0))
            .expect_err("the single room is taken at slot 0");
        assert_eq!(err.rule(), HardRule::RoomClash);
    }

    #[test]
    fn test_restore_is_bit_for_bit() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let mut state = AssignmentState::new(&model);

        state
            .place(&model, LessonIndex::new(0), 0, RoomIndex::new(0))
            .unwrap();
        let snap = state.snapshot();
        let reference = state.clone();

        state
            .place(&model, LessonIndex::new(1), 1, RoomIndex::new(0))
            .unwrap();
        state
            .place(&model, LessonIndex::new(2), 0, RoomIndex::new(1))
            .unwrap_err();
        state
            .place(&model, LessonIndex::new(1), 2, RoomIndex::new(1))
            .unwrap_err();
        state.remove(&model, LessonIndex::new(0)).unwrap();
        state
            .place(&model, LessonIndex::new(2), 0, RoomIndex::new(0))
            .unwrap();

        state.restore(&model, snap);
        assert_eq!(state, reference);
        assert!(!state.is_complete());
        assert_eq!(state.placed_count(), 1);
    }

    #[test]
    fn test_is_complete_tracks_quota() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let mut state = AssignmentState::new(&model);
        assert!(!state.is_complete());

        state
            .place(&model, LessonIndex::new(0), 1, RoomIndex::new(0))
            .unwrap();
        state
            .place(&model, LessonIndex::new(1), 2, RoomIndex::new(0))
            .unwrap();
        state
            .place(&model, LessonIndex::new(2), 0, RoomIndex::new(0))
            .unwrap();
        assert!(state.is_complete());
        assert_eq!(state.placed_count(), 3);
    }
}
