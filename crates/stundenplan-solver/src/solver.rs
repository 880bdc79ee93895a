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

//! Solve facade: compiles the constraint model, runs the backtracking
//! opening, polishes the result with the repair pass and hands back a
//! [`Timetable`]. One run is strictly single-threaded; `solve_parallel`
//! races fully independent runs that share nothing mutable.

use crate::{
    eval::ObjectiveEvaluator,
    model::{index::LessonIndex, solver_model::SolverModel},
    monitor::{budget::SearchBudget, stop::StopToken},
    search::{
        engine::{SearchEngine, SearchOutcome},
        err::{SearchBudgetExceededError, SolveError},
        repair::hill_climb,
    },
    state::assignment::{AssignmentState, Placement},
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::{Duration, Instant};
use stundenplan_model::prelude::{
    ConstraintModel, PlacedLesson, Problem, RuleConfig, Timetable,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolverConfig {
    /// Node-visit cap for the backtracking opening.
    pub step_budget: u64,
    /// Attempt cap for the hill-climbing repair pass.
    pub repair_iterations: u64,
    /// Seed for the repair pass RNG; equal seeds reproduce runs exactly.
    pub seed: u64,
    /// Optional wall-clock cap for the opening search.
    pub time_limit: Option<Duration>,
}

impl Default for SolverConfig {
    #[inline]
    fn default() -> Self {
        Self {
            step_budget: SearchBudget::DEFAULT_MAX_STEPS,
            repair_iterations: 2_000,
            seed: 0xC0FF_EE00_D15E_A5ED,
            time_limit: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    #[inline]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> SolverConfig {
        self.config
    }

    /// Runs one full solve. Configuration problems surface before any
    /// search step; search failures carry their diagnostics.
    #[tracing::instrument(level = "info", skip(self, problem, rules))]
    pub fn solve(&self, problem: &Problem, rules: &RuleConfig) -> Result<Timetable, SolveError> {
        self.solve_with_stop(problem, rules, &StopToken::new())
    }

    /// Like [`Solver::solve`], honoring an external cancellation token
    /// between search steps.
    pub fn solve_with_stop(
        &self,
        problem: &Problem,
        rules: &RuleConfig,
        stop: &StopToken,
    ) -> Result<Timetable, SolveError> {
        let constraints = ConstraintModel::compile(problem, rules)?;
        let model = SolverModel::build(problem);
        let evaluator = ObjectiveEvaluator::new(&constraints);
        let mut state = AssignmentState::new(&model);

        let mut budget = SearchBudget::new(self.config.step_budget);
        if let Some(limit) = self.config.time_limit {
            budget = budget.with_deadline(Instant::now() + limit);
        }

        let engine = SearchEngine::new(&model, &evaluator, budget, stop.clone());
        match engine.run(&mut state) {
            SearchOutcome::Complete { steps, score } => {
                tracing::debug!(steps, score = score.value(), "opening found a schedule");
                let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
                let repaired = hill_climb(
                    &model,
                    &evaluator,
                    &mut state,
                    self.config.repair_iterations,
                    &mut rng,
                );
                Ok(Timetable::new(
                    placed_lessons(&model, state.placements()),
                    repaired.score,
                ))
            }
            SearchOutcome::Infeasible(err) => Err(err.into()),
            SearchOutcome::BudgetExceeded { steps, placements } => Err(SearchBudgetExceededError::new(
                steps,
                model.lesson_count(),
                placed_lessons(&model, &placements),
            )
            .into()),
        }
    }

    /// Races one independent, single-threaded run per seed and keeps the
    /// best-scoring timetable. Runs share only immutable data, so no
    /// synchronization is involved beyond joining the workers.
    pub fn solve_parallel(
        &self,
        problem: &Problem,
        rules: &RuleConfig,
        seeds: &[u64],
    ) -> Result<Timetable, SolveError> {
        if seeds.is_empty() {
            return self.solve(problem, rules);
        }

        let results: Vec<Result<Timetable, SolveError>> = std::thread::scope(|scope| {
            let handles: Vec<_> = seeds
                .iter()
                .map(|&seed| {
                    let config = SolverConfig {
                        seed,
                        ..self.config
                    };
                    scope.spawn(move || Solver::new(config).solve(problem, rules))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().expect("solver worker must not panic"))
                .collect()
        });

        let mut best: Option<Timetable> = None;
        let mut first_err: Option<SolveError> = None;
        for result in results {
            match result {
                Ok(timetable) => {
                    let better = best
                        .as_ref()
                        .map_or(true, |b| timetable.score() < b.score());
                    if better {
                        best = Some(timetable);
                    }
                }
                Err(err) => {
                    if first_err.is_none() {
                        first_err = Some(err);
                    }
                }
            }
        }
        match best {
            Some(timetable) => Ok(timetable),
            None => Err(first_err.expect("no results without seeds is handled above")),
        }
    }
}

/// Projects dense placements back into identifier space for the output
/// collaborator.
fn placed_lessons(model: &SolverModel<'_>, placements: &[Option<Placement>]) -> Vec<PlacedLesson> {
    let grid = model.grid();
    placements
        .iter()
        .enumerate()
        .filter_map(|(i, placement)| {
            let p = (*placement)?;
            let info = model.lesson(LessonIndex::new(i));
            let ri = info.requirement();
            let slot = grid
                .slot_at(p.slot)
                .expect("placements never leave the grid");
            Some(PlacedLesson::new(
                model.requirement_id(ri),
                info.occurrence(),
                model.subject_id(ri),
                model.teacher_id(model.teacher_of(ri)),
                model.group_id(model.group_of(ri)),
                model.room_id(p.room),
                slot,
            ))
        })
        .collect()
}
