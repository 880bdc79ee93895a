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

use stundenplan_model::prelude::{
    HardRule, PlacedLesson, RequirementId, UnsatisfiableConfigurationError,
};

/// Every root-level alternative was tried without completing the
/// schedule. Carries the occurrence whose candidate set was empty when
/// the search gave up, and the hard rule that pruned most of its slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfeasibleError {
    requirement: RequirementId,
    occurrence: u32,
    dominant: Option<HardRule>,
}

impl InfeasibleError {
    pub fn new(requirement: RequirementId, occurrence: u32, dominant: Option<HardRule>) -> Self {
        Self {
            requirement,
            occurrence,
            dominant,
        }
    }

    pub fn requirement(&self) -> RequirementId {
        self.requirement
    }

    pub fn occurrence(&self) -> u32 {
        self.occurrence
    }

    /// The hard rule that eliminated the most slots for the unplaceable
    /// occurrence, when one stood out.
    pub fn dominant(&self) -> Option<HardRule> {
        self.dominant
    }
}

impl std::fmt::Display for InfeasibleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.dominant {
            Some(rule) => write!(
                f,
                "No placement for occurrence {} of {}; most slots blocked by: {}",
                self.occurrence, self.requirement, rule
            ),
            None => write!(
                f,
                "No placement for occurrence {} of {}",
                self.occurrence, self.requirement
            ),
        }
    }
}

impl std::error::Error for InfeasibleError {}

/// The step budget or deadline ran out before a complete schedule was
/// found. The deepest partial assignment reached is attached so the
/// caller can accept it or retry with a larger budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBudgetExceededError {
    steps: u64,
    total: usize,
    partial: Vec<PlacedLesson>,
}

impl SearchBudgetExceededError {
    pub fn new(steps: u64, total: usize, partial: Vec<PlacedLesson>) -> Self {
        Self {
            steps,
            total,
            partial,
        }
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Occurrences the instance demands in total.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Best-effort partial schedule: the deepest placement state seen.
    pub fn partial(&self) -> &[PlacedLesson] {
        &self.partial
    }
}

impl std::fmt::Display for SearchBudgetExceededError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Search budget exhausted after {} steps with {}/{} lessons placed",
            self.steps,
            self.partial.len(),
            self.total
        )
    }
}

impl std::error::Error for SearchBudgetExceededError {}

/// Terminal failures of a solve run. Conflicts during search are not
/// here; the engine recovers from those by backtracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    Unsatisfiable(UnsatisfiableConfigurationError),
    Infeasible(InfeasibleError),
    BudgetExceeded(SearchBudgetExceededError),
}

impl std::fmt::Display for SolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveError::Unsatisfiable(e) => write!(f, "{}", e),
            SolveError::Infeasible(e) => write!(f, "{}", e),
            SolveError::BudgetExceeded(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<UnsatisfiableConfigurationError> for SolveError {
    fn from(err: UnsatisfiableConfigurationError) -> Self {
        SolveError::Unsatisfiable(err)
    }
}

impl From<InfeasibleError> for SolveError {
    fn from(err: InfeasibleError) -> Self {
        SolveError::Infeasible(err)
    }
}

impl From<SearchBudgetExceededError> for SolveError {
    fn from(err: SearchBudgetExceededError) -> Self {
        SolveError::BudgetExceeded(err)
    }
}
