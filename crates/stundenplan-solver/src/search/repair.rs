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

//! Hill-climbing repair over a complete schedule: pick a random placed
//! lesson, try its best alternative placement, keep the move only if the
//! total soft penalty strictly drops. Feasibility is never re-derived;
//! every candidate move is legal against the live occupancy.

use crate::{
    eval::ObjectiveEvaluator,
    model::{index::LessonIndex, solver_model::SolverModel},
    search::candidates::enumerate,
    state::assignment::AssignmentState,
};
use rand::Rng;
use stundenplan_core::prelude::Penalty;

/// What a repair run did, for logging and reproducibility checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairOutcome {
    pub iterations: u64,
    pub accepted: u64,
    pub score: Penalty,
}

/// Improves `state` in place and returns the resulting score. Random
/// single-lesson moves are accepted only when the total penalty strictly
/// drops. After a stale stretch as long as the lesson count, one
/// deterministic pass over every lesson confirms whether any improving
/// move is left; if none is, the climb has converged and stops early.
/// Driven entirely by `rng`, so equal seeds give equal schedules.
pub fn hill_climb<R: Rng>(
    model: &SolverModel<'_>,
    evaluator: &ObjectiveEvaluator,
    state: &mut AssignmentState,
    iterations: u64,
    rng: &mut R,
) -> RepairOutcome {
    let mut score = evaluator.score_full(model, state);
    let lesson_count = model.lesson_count();
    if lesson_count == 0 {
        return RepairOutcome {
            iterations: 0,
            accepted: 0,
            score,
        };
    }

    let stale_limit = lesson_count as u64;
    let mut stale: u64 = 0;
    let mut accepted: u64 = 0;
    let mut performed: u64 = 0;

    for _ in 0..iterations {
        performed += 1;

        if stale >= stale_limit {
            let improvement = (0..lesson_count)
                .find_map(|li| try_improve(model, evaluator, state, LessonIndex::new(li)));
            match improvement {
                Some(delta) => {
                    score += delta;
                    accepted += 1;
                    stale = 0;
                }
                None => break,
            }
            continue;
        }

        let lesson = LessonIndex::new(rng.random_range(0..lesson_count));
        match try_improve(model, evaluator, state, lesson) {
            Some(delta) => {
                score += delta;
                accepted += 1;
                stale = 0;
            }
            None => stale += 1,
        }
    }

    tracing::debug!(
        iterations = performed,
        accepted,
        score = score.value(),
        "repair pass finished"
    );
    RepairOutcome {
        iterations: performed,
        accepted,
        score,
    }
}

/// Moves `lesson` to its best strictly-improving legal placement, if one
/// exists; otherwise leaves the state exactly as it was. Returns the
/// applied penalty delta, which is negative by construction.
fn try_improve(
    model: &SolverModel<'_>,
    evaluator: &ObjectiveEvaluator,
    state: &mut AssignmentState,
    lesson: LessonIndex,
) -> Option<Penalty> {
    let current = state.placement(lesson)?;
    let mark = state.snapshot();
    let removal = evaluator.remove_delta(model, state, lesson);
    state.remove(model, lesson);

    let best = enumerate(model, state, evaluator, lesson, Some(current))
        .into_iter()
        .min_by_key(|c| (c.delta, c.slot, c.room.get()));

    match best {
        Some(chosen) if removal + chosen.delta < Penalty::ZERO => {
            state
                .place(model, lesson, chosen.slot, chosen.room)
                .expect("a repair candidate is legal against the live state");
            Some(removal + chosen.delta)
        }
        _ => {
            state.restore(model, mark);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::index::RoomIndex,
        monitor::{budget::SearchBudget, stop::StopToken},
        search::engine::{SearchEngine, SearchOutcome},
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::{BTreeMap, BTreeSet};
    use stundenplan_core::prelude::{Day, Period, SlotGrid, TimeSlot, Weight};
    use stundenplan_model::prelude::{
        ConstraintModel, EntityRegistry, Group, GroupId, LessonRequirement, Priority, Problem,
        RequirementContainer, RequirementId, Room, RoomId, RoomType, RoomTypeId, RuleConfig,
        RuleToggle, Subject, SubjectId, Teacher, TeacherId,
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

    /// A loose instance with penalty to shed: the teacher dislikes the
    /// late periods, quota 2 over a 1x4 day, plenty of slack.
    fn sample_problem() -> Problem {
        let registry = EntityRegistry::load(
            vec![RoomType::new(RoomTypeId::new(1), "Hörsaal")],
            vec![Subject::new(SubjectId::new(1), "Analysis", None)],
            vec![Teacher::new(
                TeacherId::new(1),
                "Curie",
                all_slots(1, 4),
                [
                    (slot(0, 2), Priority::new(4)),
                    (slot(0, 3), Priority::new(5)),
                ]
                .into(),
            )],
            vec![Group::new(GroupId::new(1), "B_Inf 1", 20)],
            vec![Room::new(RoomId::new(1), "H1", RoomTypeId::new(1), 100)],
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
        Problem::new(registry, SlotGrid::new(1, 4).unwrap(), reqs).unwrap()
    }

    fn config() -> RuleConfig {
        RuleConfig {
            teacher_preference: RuleToggle::enabled(Weight::new(10)),
            group_compactness: RuleToggle::enabled(Weight::new(1)),
            room_suitability: RuleToggle::disabled(),
        }
    }

    #[test]
    fn test_repair_improves_a_bad_schedule() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let constraints = ConstraintModel::compile(&problem, &config()).unwrap();
        let evaluator = ObjectiveEvaluator::new(&constraints);

        // Start from the worst layout: both disliked periods taken.
        let mut state = AssignmentState::new(&model);
        state
            .place(&model, LessonIndex::new(0), 2, RoomIndex::new(0))
            .unwrap();
        state
            .place(&model, LessonIndex::new(1), 3, RoomIndex::new(0))
            .unwrap();
        let before = evaluator.score_full(&model, &state);

        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let outcome = hill_climb(&model, &evaluator, &mut state, 200, &mut rng);

        assert!(outcome.score < before);
        assert_eq!(outcome.score, evaluator.score_full(&model, &state));
        // The optimum parks both lessons on the liked periods 0 and 1.
        assert_eq!(outcome.score, Penalty::ZERO);
        assert!(state.is_complete());
    }

    #[test]
    fn test_repair_never_worsens_the_score() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let constraints = ConstraintModel::compile(&problem, &config()).unwrap();
        let evaluator = ObjectiveEvaluator::new(&constraints);
        let mut state = AssignmentState::new(&model);
        let engine = SearchEngine::new(
            &model,
            &evaluator,
            SearchBudget::default(),
            StopToken::new(),
        );
        let SearchOutcome::Complete { score, .. } = engine.run(&mut state) else {
            panic!("sample instance must complete");
        };

        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let outcome = hill_climb(&model, &evaluator, &mut state, 500, &mut rng);
        assert!(outcome.score <= score);
        assert_eq!(outcome.score, evaluator.score_full(&model, &state));
    }

    #[test]
    fn test_repair_is_reproducible_per_seed() {
        let problem = sample_problem();
        let model = SolverModel::build(&problem);
        let constraints = ConstraintModel::compile(&problem, &config()).unwrap();
        let evaluator = ObjectiveEvaluator::new(&constraints);

        let run = |seed: u64| {
            let mut state = AssignmentState::new(&model);
            state
                .place(&model, LessonIndex::new(0), 3, RoomIndex::new(0))
                .unwrap();
            state
                .place(&model, LessonIndex::new(1), 1, RoomIndex::new(0))
                .unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let outcome = hill_climb(&model, &evaluator, &mut state, 100, &mut rng);
            (outcome, state)
        };

        let (out_a, state_a) = run(42);
        let (out_b, state_b) = run(42);
        assert_eq!(out_a, out_b);
        assert_eq!(state_a.placements(), state_b.placements());
    }

    #[test]
    fn test_repair_handles_empty_model() {
        let registry = EntityRegistry::load(
            vec![RoomType::new(RoomTypeId::new(1), "Hörsaal")],
            vec![],
            vec![],
            vec![],
            vec![Room::new(RoomId::new(1), "H1", RoomTypeId::new(1), 10)],
        )
        .unwrap();
        let problem = Problem::new(
            registry,
            SlotGrid::new(1, 1).unwrap(),
            RequirementContainer::new(),
        )
        .unwrap();
        let model = SolverModel::build(&problem);
        let constraints = ConstraintModel::compile(&problem, &RuleConfig::default()).unwrap();
        let evaluator = ObjectiveEvaluator::new(&constraints);
        let mut state = AssignmentState::new(&model);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let outcome = hill_climb(&model, &evaluator, &mut state, 10, &mut rng);
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.score, Penalty::ZERO);
    }
}
