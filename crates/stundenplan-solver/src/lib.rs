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

//! Imperative side of the timetabling engine: the dense solver model,
//! mutable assignment state with O(1) conflict lookup, incremental
//! objective evaluation, constraint-guided backtracking search and the
//! hill-climbing repair pass.

pub mod eval;
pub mod model;
pub mod monitor;
pub mod search;
pub mod solver;
pub mod state;

pub mod prelude {
    pub use crate::eval::ObjectiveEvaluator;
    pub use crate::model::{
        index::{GroupIndex, LessonIndex, RequirementIndex, RoomIndex, TeacherIndex},
        solver_model::SolverModel,
    };
    pub use crate::monitor::{budget::SearchBudget, stop::StopToken};
    pub use crate::search::{
        engine::{SearchEngine, SearchOutcome},
        err::{InfeasibleError, SearchBudgetExceededError, SolveError},
        repair::{hill_climb, RepairOutcome},
    };
    pub use crate::solver::{Solver, SolverConfig};
    pub use crate::state::{
        assignment::{AssignmentState, Placement, Snapshot},
        err::ConflictError,
    };
}
