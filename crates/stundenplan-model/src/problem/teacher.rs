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

use crate::common::{Identifier, IdentifierMarkerName};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use stundenplan_core::prelude::TimeSlot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeacherIdentifierMarker;

impl IdentifierMarkerName for TeacherIdentifierMarker {
    const NAME: &'static str = "TeacherId";
}

pub type TeacherId = Identifier<TeacherIdentifierMarker>;

/// How strongly a teacher dislikes being scheduled in a slot. Graded, not
/// binary; the value scales the teacher-preference penalty.
#[repr(transparent)]
#[must_use]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    #[inline]
    pub const fn new(value: u8) -> Self {
        Priority(value)
    }

    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Priority({})", self.0)
    }
}

/// A teacher with hard availability and graded soft slot dislikes.
/// Dislikes outside the availability set are pruned at construction; a
/// hard-unavailable slot never needs a soft penalty on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    id: TeacherId,
    name: String,
    available: BTreeSet<TimeSlot>,
    dislikes: BTreeMap<TimeSlot, Priority>,
}

impl Teacher {
    #[inline]
    pub fn new(
        id: TeacherId,
        name: impl Into<String>,
        available: BTreeSet<TimeSlot>,
        mut dislikes: BTreeMap<TimeSlot, Priority>,
    ) -> Self {
        dislikes.retain(|slot, _| available.contains(slot));
        Self {
            id,
            name: name.into(),
            available,
            dislikes,
        }
    }

    #[inline]
    pub fn id(&self) -> TeacherId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn available(&self) -> &BTreeSet<TimeSlot> {
        &self.available
    }

    #[inline]
    pub fn is_available(&self, slot: TimeSlot) -> bool {
        self.available.contains(&slot)
    }

    #[inline]
    pub fn dislikes(&self) -> &BTreeMap<TimeSlot, Priority> {
        &self.dislikes
    }

    #[inline]
    pub fn dislike_for(&self, slot: TimeSlot) -> Option<Priority> {
        self.dislikes.get(&slot).copied()
    }
}

impl std::fmt::Display for Teacher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Teacher: Id: {}, Name: {}, Available Slots: {}, Disliked Slots: {}",
            self.id,
            self.name,
            self.available.len(),
            self.dislikes.len()
        )
    }
}
