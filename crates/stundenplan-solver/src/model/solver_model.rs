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

use crate::model::index::{GroupIndex, LessonIndex, RequirementIndex, RoomIndex, TeacherIndex};
use fixedbitset::FixedBitSet;
use std::collections::HashMap;
use std::ops::Range;
use stundenplan_model::prelude::{
    GroupId, Problem, RequirementId, RoomId, SubjectId, TeacherId,
};
use stundenplan_core::prelude::SlotGrid;

/// One quota-expanded occurrence of a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LessonInfo {
    requirement: RequirementIndex,
    occurrence: u32,
}

impl LessonInfo {
    #[inline]
    pub fn requirement(&self) -> RequirementIndex {
        self.requirement
    }

    #[inline]
    pub fn occurrence(&self) -> u32 {
        self.occurrence
    }
}

/// Read-only, densely indexed view of a [`Problem`], precomputed once
/// per run. Everything the search touches per step is a flat `Vec`
/// lookup or a bitset test.
#[derive(Debug, Clone)]
pub struct SolverModel<'p> {
    problem: &'p Problem,
    grid: SlotGrid,
    slot_count: usize,

    teacher_ids: Vec<TeacherId>,
    group_ids: Vec<GroupId>,
    room_ids: Vec<RoomId>,
    requirement_ids: Vec<RequirementId>,
    req_subjects: Vec<SubjectId>,

    req_teacher: Vec<TeacherIndex>,
    req_group: Vec<GroupIndex>,
    // availability ∧ allowed-day, per requirement, over slot ordinals
    req_slot_mask: Vec<FixedBitSet>,
    // rooms passing the hard filters (capacity, pinned type), room order
    req_rooms: Vec<Vec<RoomIndex>>,
    // soft mismatch of the subject's preferred room type, over all rooms
    req_room_mismatch: Vec<FixedBitSet>,

    // separate hard-filter facts, kept for conflict naming
    teacher_available: Vec<FixedBitSet>,
    req_day_allowed: Vec<FixedBitSet>,
    group_sizes: Vec<u32>,
    room_capacities: Vec<u32>,

    // graded dislike units, teacher-major [teacher * slot_count + slot]
    dislike: Vec<i64>,

    lessons: Vec<LessonInfo>,
    req_lessons: Vec<Range<usize>>,
}

impl<'p> SolverModel<'p> {
    pub fn build(problem: &'p Problem) -> Self {
        let registry = problem.registry();
        let grid = problem.grid();
        let slot_count = grid.slot_count();

        let teacher_ids: Vec<TeacherId> = registry.iter_teachers().map(|t| t.id()).collect();
        let group_ids: Vec<GroupId> = registry.iter_groups().map(|g| g.id()).collect();
        let room_ids: Vec<RoomId> = registry.iter_rooms().map(|r| r.id()).collect();

        let teacher_lookup: HashMap<TeacherId, TeacherIndex> = teacher_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, TeacherIndex::new(i)))
            .collect();
        let group_lookup: HashMap<GroupId, GroupIndex> = group_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, GroupIndex::new(i)))
            .collect();

        let mut teacher_available = Vec::with_capacity(teacher_ids.len());
        let mut dislike = vec![0i64; teacher_ids.len() * slot_count];
        for (ti, teacher) in registry.iter_teachers().enumerate() {
            let mut mask = FixedBitSet::with_capacity(slot_count);
            for &slot in teacher.available() {
                let ordinal = grid.ordinal(slot).expect("problem validated its slots");
                mask.insert(ordinal);
            }
            for (&slot, &priority) in teacher.dislikes() {
                let ordinal = grid.ordinal(slot).expect("problem validated its slots");
                dislike[ti * slot_count + ordinal] = priority.value() as i64;
            }
            teacher_available.push(mask);
        }

        let group_sizes: Vec<u32> = registry.iter_groups().map(|g| g.size()).collect();
        let room_capacities: Vec<u32> = registry.iter_rooms().map(|r| r.capacity()).collect();

        let req_count = problem.requirements().len();
        let mut requirement_ids = Vec::with_capacity(req_count);
        let mut req_subjects = Vec::with_capacity(req_count);
        let mut req_teacher = Vec::with_capacity(req_count);
        let mut req_group = Vec::with_capacity(req_count);
        let mut req_slot_mask = Vec::with_capacity(req_count);
        let mut req_rooms = Vec::with_capacity(req_count);
        let mut req_room_mismatch = Vec::with_capacity(req_count);
        let mut req_day_allowed = Vec::with_capacity(req_count);
        let mut lessons = Vec::new();
        let mut req_lessons = Vec::with_capacity(req_count);

        for (ri, req) in problem.requirements().iter().enumerate() {
            let ti = teacher_lookup[&req.teacher()];
            let gi = group_lookup[&req.group()];
            let subject = registry
                .subject(req.subject())
                .expect("problem validated its references");
            let group_size = group_sizes[gi.get()];

            let mut day_mask = FixedBitSet::with_capacity(slot_count);
            for (ordinal, slot) in grid.iter().enumerate() {
                if req.allows_day(slot.day()) {
                    day_mask.insert(ordinal);
                }
            }
            let mut slot_mask = teacher_available[ti.get()].clone();
            slot_mask.intersect_with(&day_mask);

            let mut rooms = Vec::new();
            let mut mismatch = FixedBitSet::with_capacity(room_ids.len());
            for (roomi, room) in registry.iter_rooms().enumerate() {
                let type_ok = req
                    .pinned_room_type()
                    .map_or(true, |rt| room.room_type() == rt);
                if room.fits(group_size) && type_ok {
                    rooms.push(RoomIndex::new(roomi));
                }
                if subject
                    .preferred_room_type()
                    .is_some_and(|rt| room.room_type() != rt)
                {
                    mismatch.insert(roomi);
                }
            }

            let start = lessons.len();
            for occurrence in 0..req.quota() {
                lessons.push(LessonInfo {
                    requirement: RequirementIndex::new(ri),
                    occurrence,
                });
            }
            req_lessons.push(start..lessons.len());

            requirement_ids.push(req.id());
            req_subjects.push(req.subject());
            req_teacher.push(ti);
            req_group.push(gi);
            req_slot_mask.push(slot_mask);
            req_rooms.push(rooms);
            req_room_mismatch.push(mismatch);
            req_day_allowed.push(day_mask);
        }

        Self {
            problem,
            grid,
            slot_count,
            teacher_ids,
            group_ids,
            room_ids,
            requirement_ids,
            req_subjects,
            req_teacher,
            req_group,
            req_slot_mask,
            req_rooms,
            req_room_mismatch,
            teacher_available,
            req_day_allowed,
            group_sizes,
            room_capacities,
            dislike,
            lessons,
            req_lessons,
        }
    }

    #[inline]
    pub fn problem(&self) -> &'p Problem {
        self.problem
    }

    #[inline]
    pub fn grid(&self) -> SlotGrid {
        self.grid
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    #[inline]
    pub fn teacher_count(&self) -> usize {
        self.teacher_ids.len()
    }

    #[inline]
    pub fn group_count(&self) -> usize {
        self.group_ids.len()
    }

    #[inline]
    pub fn room_count(&self) -> usize {
        self.room_ids.len()
    }

    #[inline]
    pub fn requirement_count(&self) -> usize {
        self.requirement_ids.len()
    }

    #[inline]
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    #[inline]
    pub fn lesson(&self, lesson: LessonIndex) -> LessonInfo {
        self.lessons[lesson.get()]
    }

    /// Lesson indices belonging to one requirement, in occurrence order.
    #[inline]
    pub fn lessons_of(&self, requirement: RequirementIndex) -> Range<usize> {
        self.req_lessons[requirement.get()].clone()
    }

    #[inline]
    pub fn teacher_of(&self, requirement: RequirementIndex) -> TeacherIndex {
        self.req_teacher[requirement.get()]
    }

    #[inline]
    pub fn group_of(&self, requirement: RequirementIndex) -> GroupIndex {
        self.req_group[requirement.get()]
    }

    /// Slots admissible for the requirement: teacher availability minus
    /// disallowed days.
    #[inline]
    pub fn slot_mask(&self, requirement: RequirementIndex) -> &FixedBitSet {
        &self.req_slot_mask[requirement.get()]
    }

    /// Rooms passing the hard capacity and pin filters.
    #[inline]
    pub fn rooms_of(&self, requirement: RequirementIndex) -> &[RoomIndex] {
        &self.req_rooms[requirement.get()]
    }

    #[inline]
    pub fn teacher_is_available(&self, teacher: TeacherIndex, slot: usize) -> bool {
        self.teacher_available[teacher.get()].contains(slot)
    }

    #[inline]
    pub fn day_is_allowed(&self, requirement: RequirementIndex, slot: usize) -> bool {
        self.req_day_allowed[requirement.get()].contains(slot)
    }

    #[inline]
    pub fn room_fits(&self, requirement: RequirementIndex, room: RoomIndex) -> bool {
        self.room_capacities[room.get()] >= self.group_sizes[self.req_group[requirement.get()].get()]
    }

    #[inline]
    pub fn room_is_admissible(&self, requirement: RequirementIndex, room: RoomIndex) -> bool {
        self.req_rooms[requirement.get()].contains(&room)
    }

    /// 1 when the room's type differs from the subject's preference.
    #[inline]
    pub fn room_mismatch_units(&self, requirement: RequirementIndex, room: RoomIndex) -> i64 {
        self.req_room_mismatch[requirement.get()].contains(room.get()) as i64
    }

    /// Graded dislike units of the requirement's teacher for a slot.
    #[inline]
    pub fn dislike_units(&self, requirement: RequirementIndex, slot: usize) -> i64 {
        let ti = self.req_teacher[requirement.get()].get();
        self.dislike[ti * self.slot_count + slot]
    }

    #[inline]
    pub fn requirement_id(&self, requirement: RequirementIndex) -> RequirementId {
        self.requirement_ids[requirement.get()]
    }

    #[inline]
    pub fn subject_id(&self, requirement: RequirementIndex) -> SubjectId {
        self.req_subjects[requirement.get()]
    }

    #[inline]
    pub fn teacher_id(&self, teacher: TeacherIndex) -> TeacherId {
        self.teacher_ids[teacher.get()]
    }

    #[inline]
    pub fn group_id(&self, group: GroupIndex) -> GroupId {
        self.group_ids[group.get()]
    }

    #[inline]
    pub fn room_id(&self, room: RoomIndex) -> RoomId {
        self.room_ids[room.get()]
    }
}
