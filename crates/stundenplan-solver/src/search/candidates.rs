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
    eval::ObjectiveEvaluator,
    model::{
        index::{LessonIndex, RoomIndex},
        solver_model::SolverModel,
    },
    state::assignment::{AssignmentState, Placement},
};
use stundenplan_core::prelude::Penalty;

/// A legal (slot, room) pair for one lesson, with the soft-penalty delta
/// placing it there would cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub slot: usize,
    pub room: RoomIndex,
    pub delta: Penalty,
}

/// All legal placements of `lesson` against the current occupancy,
/// filtered by hard rules only. `skip` excludes one placement, which the
/// repair pass uses to rule out a lesson's current position. Slots come
/// out in grid order, rooms in registry order.
pub fn enumerate(
    model: &SolverModel<'_>,
    state: &AssignmentState,
    evaluator: &ObjectiveEvaluator,
    lesson: LessonIndex,
    skip: Option<Placement>,
) -> Vec<Candidate> {
    let ri = model.lesson(lesson).requirement();
    let teacher = model.teacher_of(ri);
    let group = model.group_of(ri);
    let mut out = Vec::new();
    for slot in model.slot_mask(ri).ones() {
        if state.teacher_lesson_at(teacher, slot).is_some() {
            continue;
        }
        if state.group_lesson_at(group, slot).is_some() {
            continue;
        }
        for &room in model.rooms_of(ri) {
            if state.room_lesson_at(room, slot).is_some() {
                continue;
            }
            if skip == Some(Placement { slot, room }) {
                continue;
            }
            out.push(Candidate {
                slot,
                room,
                delta: evaluator.place_delta(model, state, lesson, slot, room),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::index::RoomIndex;
    use std::collections::{BTreeMap, BTreeSet};
    use stundenplan_core::prelude::{Day, Period, SlotGrid, TimeSlot};
    use stundenplan_model::prelude::{
        ConstraintModel, EntityRegistry, Group, GroupId, LessonRequirement, Problem,
        RequirementContainer, RequirementId, Room, RoomId, RoomType, RoomTypeId, RuleConfig,
        Subject, SubjectId, Teacher, TeacherId,
    };

    #[inline]
    fn slot(d: u8, p: u8) -> TimeSlot {
        TimeSlot::new(Day::new(d), Period::new(p))
    }

    fn sample_problem() -> Problem {
        let registry = EntityRegistry::load(
            vec![RoomType::new(RoomTypeId::new(1), "Hörsaal")],
            vec![Subject::new(SubjectId::new(1), "Analysis", None)],
            vec![Teacher::new(
                TeacherId::new(1),
                "Curie",
                [slot(0, 0), slot(0, 1)].into(),
                BTreeMap::new(),
            )],
            vec![Group::new(GroupId::new(1), "B_Inf 1", 30)],
            vec![
                Room::new(RoomId::new(1), "H1", RoomTypeId::new(1), 100),
                Room::new(RoomId::new(2), "H2", RoomTypeId::new(1), 50),
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
        Problem::new(registry, SlotGrid::new(1, 3).unwrap(), reqs).unwrap()
    }

    #[test]
    fn test_enumeration_is_grid_and_registry_ordered() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let constraints = ConstraintModel::compile(&problem, &RuleConfig::default()).unwrap();
        let eval = ObjectiveEvaluator::new(&constraints);
        let state = AssignmentState::new(&model);

        let candidates = enumerate(&model, &state, &eval, LessonIndex::new(0), None);
        let pairs: Vec<_> = candidates.iter().map(|c| (c.slot, c.room.get())).collect();
        // Teacher is available for slots 0 and 1 only; slot 2 never shows.
        assert_eq!(pairs, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_occupied_pairs_are_filtered() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let constraints = ConstraintModel::compile(&problem, &RuleConfig::default()).unwrap();
        let eval = ObjectiveEvaluator::new(&constraints);
        let mut state = AssignmentState::new(&model);
        state
            .place(&model, LessonIndex::new(0), 0, RoomIndex::new(0))
            .unwrap();

        // Slot 0 is gone entirely: the teacher and the group are busy.
        let candidates = enumerate(&model, &state, &eval, LessonIndex::new(1), None);
        let pairs: Vec<_> = candidates.iter().map(|c| (c.slot, c.room.get())).collect();
        assert_eq!(pairs, vec![(1, 0), (1, 1)]);
    }

    #[test]
    fn test_skip_excludes_exactly_one_pair() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let constraints = ConstraintModel::compile(&problem, &RuleConfig::default()).unwrap();
        let eval = ObjectiveEvaluator::new(&constraints);
        let state = AssignmentState::new(&model);

        let skip = Placement {
            slot: 0,
            room: RoomIndex::new(1),
        };
        let candidates = enumerate(&model, &state, &eval, LessonIndex::new(0), Some(skip));
        let pairs: Vec<_> = candidates.iter().map(|c| (c.slot, c.room.get())).collect();
        assert_eq!(pairs, vec![(0, 0), (1, 0), (1, 1)]);
    }
}
