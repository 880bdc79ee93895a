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
    err::{EntityKind, InvalidReferenceError, ProblemError, SlotOutOfGridError},
    registry::EntityRegistry,
    req::RequirementContainer,
};
use stundenplan_core::prelude::{Period, SlotGrid, TimeSlot};

/// A fully specified problem instance: the entity universe, the planning
/// grid and the lesson demand. Read-only for the duration of a search
/// run; validation happens once, here.
#[derive(Debug, Clone)]
pub struct Problem {
    registry: EntityRegistry,
    grid: SlotGrid,
    requirements: RequirementContainer,
}

impl Problem {
    /// Assembles a problem and validates every cross-reference: each
    /// requirement must name registered entities, teacher availabilities
    /// must lie inside the grid and disallowed days must exist in it.
    pub fn new(
        registry: EntityRegistry,
        grid: SlotGrid,
        requirements: RequirementContainer,
    ) -> Result<Self, ProblemError> {
        for teacher in registry.iter_teachers() {
            for &slot in teacher.available() {
                if !grid.contains(slot) {
                    return Err(SlotOutOfGridError::new(
                        EntityKind::Teacher,
                        teacher.id().value(),
                        slot,
                    )
                    .into());
                }
            }
        }

        for req in requirements.iter() {
            let key = req.id().value();
            if registry.subject(req.subject()).is_none() {
                return Err(InvalidReferenceError::new(
                    EntityKind::Requirement,
                    key,
                    EntityKind::Subject,
                    req.subject().value(),
                )
                .into());
            }
            if registry.teacher(req.teacher()).is_none() {
                return Err(InvalidReferenceError::new(
                    EntityKind::Requirement,
                    key,
                    EntityKind::Teacher,
                    req.teacher().value(),
                )
                .into());
            }
            if registry.group(req.group()).is_none() {
                return Err(InvalidReferenceError::new(
                    EntityKind::Requirement,
                    key,
                    EntityKind::Group,
                    req.group().value(),
                )
                .into());
            }
            if let Some(rt) = req.pinned_room_type() {
                if registry.room_type(rt).is_none() {
                    return Err(InvalidReferenceError::new(
                        EntityKind::Requirement,
                        key,
                        EntityKind::RoomType,
                        rt.value(),
                    )
                    .into());
                }
            }
            for &day in req.disallowed_days() {
                if day.index() >= grid.days() {
                    let slot = TimeSlot::new(day, Period::new(0));
                    return Err(SlotOutOfGridError::new(EntityKind::Requirement, key, slot).into());
                }
            }
        }

        Ok(Self {
            registry,
            grid,
            requirements,
        })
    }

    #[inline]
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    #[inline]
    pub fn grid(&self) -> SlotGrid {
        self.grid
    }

    #[inline]
    pub fn requirements(&self) -> &RequirementContainer {
        &self.requirements
    }

    /// Total number of lesson occurrences demanded by this instance.
    #[inline]
    pub fn total_occurrences(&self) -> u64 {
        self.requirements.total_occurrences()
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Problem: {}, {} requirements, {} occurrences",
            self.grid,
            self.requirements.len(),
            self.total_occurrences()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{
        group::{Group, GroupId},
        req::{LessonRequirement, RequirementId},
        room::{Room, RoomId, RoomType, RoomTypeId},
        subject::{Subject, SubjectId},
        teacher::{Teacher, TeacherId},
    };
    use std::collections::{BTreeMap, BTreeSet};
    use stundenplan_core::prelude::{Day, Period, TimeSlot};

    #[inline]
    fn slot(d: u8, p: u8) -> TimeSlot {
        TimeSlot::new(Day::new(d), Period::new(p))
    }

    fn registry(available: BTreeSet<TimeSlot>) -> EntityRegistry {
        EntityRegistry::load(
            vec![RoomType::new(RoomTypeId::new(1), "Hörsaal")],
            vec![Subject::new(SubjectId::new(1), "Analysis", None)],
            vec![Teacher::new(TeacherId::new(1), "Curie", available, BTreeMap::new())],
            vec![Group::new(GroupId::new(1), "B_Inf 1", 40)],
            vec![Room::new(RoomId::new(1), "Audimax", RoomTypeId::new(1), 400)],
        )
        .unwrap()
    }

    fn requirement(teacher: u32) -> LessonRequirement {
        LessonRequirement::new(
            RequirementId::new(1),
            SubjectId::new(1),
            TeacherId::new(teacher),
            GroupId::new(1),
            1,
            None,
            BTreeSet::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_problem_ok() {
        let grid = SlotGrid::new(5, 4).unwrap();
        let mut reqs = RequirementContainer::new();
        reqs.insert(requirement(1)).unwrap();
        let p = Problem::new(registry([slot(0, 0)].into()), grid, reqs).unwrap();
        assert_eq!(p.total_occurrences(), 1);
        assert_eq!(p.grid().slot_count(), 20);
    }

    #[test]
    fn test_unknown_teacher_reference_rejected() {
        let grid = SlotGrid::new(5, 4).unwrap();
        let mut reqs = RequirementContainer::new();
        reqs.insert(requirement(77)).unwrap();
        let err = Problem::new(registry([slot(0, 0)].into()), grid, reqs)
            .expect_err("unknown teacher must be rejected");
        assert_eq!(
            err,
            ProblemError::InvalidReference(InvalidReferenceError::new(
                EntityKind::Requirement,
                1,
                EntityKind::Teacher,
                77
            ))
        );
    }

    #[test]
    fn test_availability_outside_grid_rejected() {
        let grid = SlotGrid::new(2, 2).unwrap();
        let err = Problem::new(
            registry([slot(3, 0)].into()),
            grid,
            RequirementContainer::new(),
        )
        .expect_err("slot outside the grid must be rejected");
        assert!(matches!(err, ProblemError::SlotOutOfGrid(_)));
    }

    #[test]
    fn test_disallowed_day_outside_grid_rejected() {
        let grid = SlotGrid::new(2, 2).unwrap();
        let mut reqs = RequirementContainer::new();
        reqs.insert(
            LessonRequirement::new(
                RequirementId::new(1),
                SubjectId::new(1),
                TeacherId::new(1),
                GroupId::new(1),
                1,
                None,
                [Day::new(6)].into(),
            )
            .unwrap(),
        )
        .unwrap();
        let err = Problem::new(registry([slot(0, 0)].into()), grid, reqs)
            .expect_err("disallowed day outside the grid must be rejected");
        assert!(matches!(err, ProblemError::SlotOutOfGrid(_)));
    }
}
