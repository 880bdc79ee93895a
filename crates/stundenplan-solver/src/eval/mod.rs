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

//! Soft-constraint scoring. The score of a schedule is a pure function
//! of the assignment state; per-move deltas touch only the terms a move
//! can change, so the repair pass never re-scores the whole schedule.

use crate::{
    model::{
        index::{GroupIndex, LessonIndex, RoomIndex},
        solver_model::SolverModel,
    },
    state::assignment::AssignmentState,
};
use stundenplan_core::prelude::{Penalty, Weight};
use stundenplan_model::prelude::{ConstraintModel, SoftRule};

/// Scores assignments against the enabled soft rules.
///
/// Per-lesson terms (teacher dislike, room mismatch) are independent of
/// the rest of the schedule; the group-compactness term couples lessons
/// of one group on one day, so deltas re-scan exactly that (group, day)
/// row and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectiveEvaluator {
    preference: Option<Weight>,
    compactness: Option<Weight>,
    suitability: Option<Weight>,
}

impl ObjectiveEvaluator {
    #[inline]
    pub fn new(constraints: &ConstraintModel) -> Self {
        Self {
            preference: constraints.weight_of(SoftRule::TeacherPreference),
            compactness: constraints.weight_of(SoftRule::GroupCompactness),
            suitability: constraints.weight_of(SoftRule::RoomSuitability),
        }
    }

    /// Full recomputation over every placed lesson and every (group,
    /// day) row. Used once per run and by the equivalence tests; the
    /// search itself works from deltas.
    pub fn score_full(&self, model: &SolverModel<'_>, state: &AssignmentState) -> Penalty {
        let mut total = Penalty::ZERO;
        for (i, placement) in state.placements().iter().enumerate() {
            let Some(p) = placement else { continue };
            total += self.lesson_term(model, LessonIndex::new(i), p.slot, p.room);
        }
        if let Some(weight) = self.compactness {
            let days = model.grid().days() as usize;
            for g in 0..model.group_count() {
                for day in 0..days {
                    total += weight * self.day_gaps(model, state, GroupIndex::new(g), day, None, None);
                }
            }
        }
        total
    }

    /// Penalty the schedule gains when `lesson` lands at (slot, room).
    /// `state` must not contain the lesson yet.
    pub fn place_delta(
        &self,
        model: &SolverModel<'_>,
        state: &AssignmentState,
        lesson: LessonIndex,
        slot: usize,
        room: RoomIndex,
    ) -> Penalty {
        let mut delta = self.lesson_term(model, lesson, slot, room);
        if let Some(weight) = self.compactness {
            let group = model.group_of(model.lesson(lesson).requirement());
            let day = slot / model.grid().periods_per_day() as usize;
            let before = self.day_gaps(model, state, group, day, None, None);
            let after = self.day_gaps(model, state, group, day, Some(slot), None);
            delta += weight * (after - before);
        }
        delta
    }

    /// Penalty the schedule loses when `lesson` is removed; the negative
    /// counterpart of [`ObjectiveEvaluator::place_delta`]. `state` must
    /// still contain the lesson.
    pub fn remove_delta(
        &self,
        model: &SolverModel<'_>,
        state: &AssignmentState,
        lesson: LessonIndex,
    ) -> Penalty {
        let p = state
            .placement(lesson)
            .expect("remove_delta needs a placed lesson");
        let mut delta = -self.lesson_term(model, lesson, p.slot, p.room);
        if let Some(weight) = self.compactness {
            let group = model.group_of(model.lesson(lesson).requirement());
            let day = p.slot / model.grid().periods_per_day() as usize;
            let before = self.day_gaps(model, state, group, day, None, None);
            let after = self.day_gaps(model, state, group, day, None, Some(lesson));
            delta += weight * (after - before);
        }
        delta
    }

    /// Slot- and room-local terms of one lesson.
    #[inline]
    fn lesson_term(
        &self,
        model: &SolverModel<'_>,
        lesson: LessonIndex,
        slot: usize,
        room: RoomIndex,
    ) -> Penalty {
        let ri = model.lesson(lesson).requirement();
        let mut term = Penalty::ZERO;
        if let Some(weight) = self.preference {
            term += weight * model.dislike_units(ri, slot);
        }
        if let Some(weight) = self.suitability {
            term += weight * model.room_mismatch_units(ri, room);
        }
        term
    }

    /// Idle periods between the first and last busy period of `group` on
    /// `day`. `extra` counts one additional hypothetical slot as busy;
    /// `without` makes one placed lesson invisible.
    fn day_gaps(
        &self,
        model: &SolverModel<'_>,
        state: &AssignmentState,
        group: GroupIndex,
        day: usize,
        extra: Option<usize>,
        without: Option<LessonIndex>,
    ) -> i64 {
        let periods = model.grid().periods_per_day() as usize;
        let base = day * periods;
        let mut first: Option<usize> = None;
        let mut last = 0usize;
        let mut busy_count = 0i64;
        for period in 0..periods {
            let slot = base + period;
            let occupied = extra == Some(slot)
                || state
                    .group_lesson_at(group, slot)
                    .is_some_and(|lesson| Some(lesson) != without);
            if occupied {
                if first.is_none() {
                    first = Some(period);
                }
                last = period;
                busy_count += 1;
            }
        }
        match first {
            Some(first) => (last - first + 1) as i64 - busy_count,
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use stundenplan_core::prelude::{Day, Period, SlotGrid, TimeSlot};
    use stundenplan_model::prelude::{
        EntityRegistry, Group, GroupId, LessonRequirement, Priority, Problem, RequirementContainer,
        RequirementId, Room, RoomId, RoomType, RoomTypeId, RuleConfig, RuleToggle, Subject,
        SubjectId, Teacher, TeacherId,
    };
    use stundenplan_core::prelude::Weight as W;

    #[inline]
    fn slot(d: u8, p: u8) -> TimeSlot {
        TimeSlot::new(Day::new(d), Period::new(p))
    }

    fn all_slots(days: u8, periods: u8) -> BTreeSet<TimeSlot> {
        (0..days)
            .flat_map(|d| (0..periods).map(move |p| slot(d, p)))
            .collect()
    }

    /// One teacher, one group, quota 3 on a 1x4 day: enough structure
    /// for dislikes, mismatches and gaps at once.
    fn sample_problem() -> Problem {
        let registry = EntityRegistry::load(
            vec![
                RoomType::new(RoomTypeId::new(1), "Hörsaal"),
                RoomType::new(RoomTypeId::new(2), "Labor"),
            ],
            vec![Subject::new(
                SubjectId::new(1),
                "Chemie",
                Some(RoomTypeId::new(2)),
            )],
            vec![Teacher::new(
                TeacherId::new(1),
                "Curie",
                all_slots(1, 4),
                [(slot(0, 3), Priority::new(2))].into(),
            )],
            vec![Group::new(GroupId::new(1), "B_Che 1", 20)],
            vec![
                Room::new(RoomId::new(1), "Hörsaal A", RoomTypeId::new(1), 100),
                Room::new(RoomId::new(2), "Labor 1", RoomTypeId::new(2), 30),
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
                3,
                None,
                BTreeSet::new(),
            )
            .unwrap(),
        )
        .unwrap();
        Problem::new(registry, SlotGrid::new(1, 4).unwrap(), reqs).unwrap()
    }

    fn evaluator() -> ObjectiveEvaluator {
        let config = RuleConfig {
            teacher_preference: RuleToggle::enabled(W::new(1)),
            group_compactness: RuleToggle::enabled(W::new(5)),
            room_suitability: RuleToggle::enabled(W::new(2)),
        };
        let problem = sample_problem();
        let constraints = ConstraintModel::compile(&problem, &config).unwrap();
        ObjectiveEvaluator::new(&constraints)
    }

    #[test]
    fn test_empty_schedule_scores_zero() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let state = AssignmentState::new(&model);
        assert_eq!(evaluator().score_full(&model, &state), Penalty::ZERO);
    }

    #[test]
    fn test_score_terms_add_up() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let eval = evaluator();
        let mut state = AssignmentState::new(&model);

        // Slots 0 and 2 leave one gap (weight 5); slot 0 in the Hörsaal
        // mismatches Chemie's Labor preference (weight 2).
        state
            .place(&model, LessonIndex::new(0), 0, RoomIndex::new(0))
            .unwrap();
        state
            .place(&model, LessonIndex::new(1), 2, RoomIndex::new(1))
            .unwrap();
        assert_eq!(eval.score_full(&model, &state), Penalty::new(5 + 2));

        // The disliked slot 3 adds priority 2 x weight 1, and extends
        // the span: periods 0..3 with one idle -> still one gap.
        state
            .place(&model, LessonIndex::new(2), 3, RoomIndex::new(1))
            .unwrap();
        assert_eq!(eval.score_full(&model, &state), Penalty::new(5 + 2 + 2));
    }

    #[test]
    fn test_score_is_idempotent() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let eval = evaluator();
        let mut state = AssignmentState::new(&model);
        state
            .place(&model, LessonIndex::new(0), 0, RoomIndex::new(0))
            .unwrap();
        state
            .place(&model, LessonIndex::new(1), 3, RoomIndex::new(1))
            .unwrap();
        let a = eval.score_full(&model, &state);
        let b = eval.score_full(&model, &state);
        assert_eq!(a, b);
    }

    #[test]
    fn test_place_delta_matches_full_recompute() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let eval = evaluator();
        let mut state = AssignmentState::new(&model);
        state
            .place(&model, LessonIndex::new(0), 0, RoomIndex::new(1))
            .unwrap();

        for (slot, room) in [(1usize, 0usize), (2, 1), (3, 0)] {
            let before = eval.score_full(&model, &state);
            let delta =
                eval.place_delta(&model, &state, LessonIndex::new(1), slot, RoomIndex::new(room));
            state
                .place(&model, LessonIndex::new(1), slot, RoomIndex::new(room))
                .unwrap();
            let after = eval.score_full(&model, &state);
            assert_eq!(before + delta, after, "delta mismatch at slot {slot}");
            state.remove(&model, LessonIndex::new(1)).unwrap();
        }
    }

    #[test]
    fn test_remove_delta_mirrors_place_delta() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let eval = evaluator();
        let mut state = AssignmentState::new(&model);
        state
            .place(&model, LessonIndex::new(0), 1, RoomIndex::new(0))
            .unwrap();
        state
            .place(&model, LessonIndex::new(1), 3, RoomIndex::new(1))
            .unwrap();

        let before = eval.score_full(&model, &state);
        let delta = eval.remove_delta(&model, &state, LessonIndex::new(1));
        state.remove(&model, LessonIndex::new(1)).unwrap();
        let after = eval.score_full(&model, &state);
        assert_eq!(before + delta, after);
    }

    #[test]
    fn test_disabled_rules_do_not_score() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let config = RuleConfig {
            teacher_preference: RuleToggle::disabled(),
            group_compactness: RuleToggle::disabled(),
            room_suitability: RuleToggle::disabled(),
        };
        let constraints = ConstraintModel::compile(&problem, &config).unwrap();
        let eval = ObjectiveEvaluator::new(&constraints);
        let mut state = AssignmentState::new(&model);
        state
            .place(&model, LessonIndex::new(0), 3, RoomIndex::new(0))
            .unwrap();
        state
            .place(&model, LessonIndex::new(1), 0, RoomIndex::new(1))
            .unwrap();
        assert_eq!(eval.score_full(&model, &state), Penalty::ZERO);
    }
}
