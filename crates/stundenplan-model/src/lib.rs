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

//! Declarative side of the timetabling engine: typed entity identifiers,
//! the validated entity registry, lesson requirements, the compiled
//! constraint model and the final timetable handed to output collaborators.

pub mod common;
pub mod constraint;
pub mod problem;
pub mod solution;

pub mod prelude {
    pub use crate::common::Identifier;
    pub use crate::constraint::{
        ConstraintModel, HardRule, RuleConfig, RuleToggle, SoftRule,
        err::UnsatisfiableConfigurationError,
    };
    pub use crate::problem::{
        err::{DuplicateKeyError, EntityKind, InvalidReferenceError, ProblemError},
        group::{Group, GroupId},
        prob::Problem,
        registry::EntityRegistry,
        req::{LessonRequirement, RequirementContainer, RequirementId},
        room::{Room, RoomId, RoomType, RoomTypeId},
        subject::{Subject, SubjectId},
        teacher::{Priority, Teacher, TeacherId},
    };
    pub use crate::solution::sol::{PlacedLesson, Timetable};
}
