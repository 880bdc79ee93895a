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

use crate::model::index::{LessonIndex, RoomIndex};
use stundenplan_model::prelude::HardRule;

/// A placement would violate a hard rule. The state it was attempted on
/// is untouched. The search engine recovers from these locally; callers
/// of the solver never see one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConflictError {
    lesson: LessonIndex,
    slot: usize,
    room: RoomIndex,
    rule: HardRule,
}

impl ConflictError {
    pub fn new(lesson: LessonIndex, slot: usize, room: RoomIndex, rule: HardRule) -> Self {
        Self {
            lesson,
            slot,
            room,
            rule,
        }
    }

    pub fn lesson(&self) -> LessonIndex {
        self.lesson
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    pub fn room(&self) -> RoomIndex {
        self.room
    }

    /// The hard rule the placement would have violated.
    pub fn rule(&self) -> HardRule {
        self.rule
    }
}

impl std::fmt::Display for ConflictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Placing {} at slot {} in {} violates: {}",
            self.lesson, self.slot, self.room, self.rule
        )
    }
}

impl std::error::Error for ConflictError {}
