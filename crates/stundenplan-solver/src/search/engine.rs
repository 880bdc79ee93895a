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

//! Constraint-guided backtracking over lesson occurrences.
//!
//! The search keeps an explicit stack of choice-point frames instead of
//! recursing: each frame remembers its lesson, the candidate list that
//! was legal when the frame was opened, the next untried candidate and a
//! change-log mark to roll back to. Occurrence selection is
//! most-constrained-first; a zero-candidate occurrence is selected
//! immediately, which undoes the placement that emptied its domain
//! before the search drifts further.

use crate::{
    eval::ObjectiveEvaluator,
    model::{
        index::{LessonIndex, RequirementIndex},
        solver_model::SolverModel,
    },
    monitor::{budget::SearchBudget, stop::StopToken},
    search::{
        candidates::{enumerate, Candidate},
        err::InfeasibleError,
    },
    state::assignment::{AssignmentState, Placement, Snapshot},
};
use stundenplan_core::prelude::Penalty;
use stundenplan_model::prelude::HardRule;

/// Terminal result of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Every occurrence is placed; the state holds the schedule.
    Complete { steps: u64, score: Penalty },
    /// Every root-level alternative was exhausted.
    Infeasible(InfeasibleError),
    /// Budget or cancellation cut the run short; carries the deepest
    /// placement vector reached.
    BudgetExceeded {
        steps: u64,
        placements: Vec<Option<Placement>>,
    },
}

#[derive(Debug)]
struct Frame {
    lesson: LessonIndex,
    candidates: Vec<Candidate>,
    next: usize,
    mark: Snapshot,
}

pub struct SearchEngine<'a, 'p> {
    model: &'a SolverModel<'p>,
    evaluator: &'a ObjectiveEvaluator,
    budget: SearchBudget,
    stop: StopToken,
}

impl<'a, 'p> SearchEngine<'a, 'p> {
    pub fn new(
        model: &'a SolverModel<'p>,
        evaluator: &'a ObjectiveEvaluator,
        budget: SearchBudget,
        stop: StopToken,
    ) -> Self {
        Self {
            model,
            evaluator,
            budget,
            stop,
        }
    }

    /// Runs the backtracking search to a terminal state. The budget and
    /// the stop token are polled between steps only, so the state is
    /// structurally consistent whenever this returns.
    pub fn run(&self, state: &mut AssignmentState) -> SearchOutcome {
        let mut steps: u64 = 0;
        let mut stack: Vec<Frame> = Vec::new();
        let mut best_placed = state.placed_count();
        let mut best_placements = state.placements().to_vec();

        loop {
            if self.stop.is_set() || self.budget.is_exhausted(steps) {
                tracing::debug!(steps, best_placed, "search stopped before completion");
                return SearchOutcome::BudgetExceeded {
                    steps,
                    placements: best_placements,
                };
            }

            if state.is_complete() {
                let score = self.evaluator.score_full(self.model, state);
                tracing::info!(steps, score = score.value(), "search complete");
                return SearchOutcome::Complete { steps, score };
            }

            let (lesson, mut candidates) = self.select(state);
            if candidates.is_empty() {
                let failure = self.diagnose(state, lesson);
                tracing::trace!(%lesson, "dead end, backtracking");
                if !self.backtrack(state, &mut stack, &mut steps) {
                    tracing::info!(steps, "search exhausted all alternatives");
                    return SearchOutcome::Infeasible(failure);
                }
                continue;
            }

            candidates.sort_by_key(|c| (c.delta, c.slot, c.room.get()));
            let chosen = candidates[0];
            let mark = state.snapshot();
            steps += 1;
            state
                .place(self.model, lesson, chosen.slot, chosen.room)
                .expect("an enumerated candidate is legal by construction");
            stack.push(Frame {
                lesson,
                candidates,
                next: 1,
                mark,
            });

            if state.placed_count() > best_placed {
                best_placed = state.placed_count();
                best_placements = state.placements().to_vec();
            }
        }
    }

    /// Unwinds frames until one offers an untried candidate, places it
    /// and returns true; false means the root was exhausted.
    fn backtrack(
        &self,
        state: &mut AssignmentState,
        stack: &mut Vec<Frame>,
        steps: &mut u64,
    ) -> bool {
        while let Some(mut frame) = stack.pop() {
            state.restore(self.model, frame.mark);
            if let Some(candidate) = frame.candidates.get(frame.next).copied() {
                frame.next += 1;
                *steps += 1;
                state
                    .place(self.model, frame.lesson, candidate.slot, candidate.room)
                    .expect("a frame candidate is legal against its restored state");
                stack.push(frame);
                return true;
            }
        }
        false
    }

    /// The first unplaced occurrence of the requirement with the fewest
    /// legal candidates; ties break by requirement creation order.
    /// Occurrences of one requirement are interchangeable, so only the
    /// first open one is considered.
    fn select(&self, state: &AssignmentState) -> (LessonIndex, Vec<Candidate>) {
        let mut best: Option<(usize, LessonIndex, Vec<Candidate>)> = None;
        for ri in 0..self.model.requirement_count() {
            let open = self
                .model
                .lessons_of(RequirementIndex::new(ri))
                .map(LessonIndex::new)
                .find(|&l| state.placement(l).is_none());
            let Some(lesson) = open else { continue };

            let candidates = enumerate(self.model, state, self.evaluator, lesson, None);
            let count = candidates.len();
            let better = match &best {
                Some((best_count, _, _)) => count < *best_count,
                None => true,
            };
            if better {
                let exhausted = count == 0;
                best = Some((count, lesson, candidates));
                if exhausted {
                    break;
                }
            }
        }
        let (_, lesson, candidates) = best.expect("select requires an incomplete state");
        (lesson, candidates)
    }

    /// Tally, per hard rule, how many slots it eliminated for the
    /// unplaceable occurrence. Only runs on dead ends, so it may be
    /// slower than the hot path.
    fn diagnose(&self, state: &AssignmentState, lesson: LessonIndex) -> InfeasibleError {
        let info = self.model.lesson(lesson);
        let ri = info.requirement();
        let teacher = self.model.teacher_of(ri);
        let group = self.model.group_of(ri);

        let mut tally = [0u64; HardRule::ALL.len()];
        for slot in 0..self.model.slot_count() {
            let rule = if !self.model.teacher_is_available(teacher, slot) {
                HardRule::TeacherUnavailable
            } else if !self.model.day_is_allowed(ri, slot) {
                HardRule::DisallowedDay
            } else if state.teacher_lesson_at(teacher, slot).is_some() {
                HardRule::TeacherClash
            } else if state.group_lesson_at(group, slot).is_some() {
                HardRule::GroupClash
            } else {
                // Teacher and group are free; every admissible room is taken.
                HardRule::RoomClash
            };
            tally[Self::rule_position(rule)] += 1;
        }

        let dominant = HardRule::ALL
            .iter()
            .copied()
            .zip(tally)
            .filter(|&(_, count)| count > 0)
            .max_by_key(|&(_, count)| count)
            .map(|(rule, _)| rule);

        InfeasibleError::new(self.model.requirement_id(ri), info.occurrence(), dominant)
    }

    #[inline]
    fn rule_position(rule: HardRule) -> usize {
        HardRule::ALL
            .iter()
            .position(|&r| r == rule)
            .expect("every hard rule is in the catalog")
    }
}
