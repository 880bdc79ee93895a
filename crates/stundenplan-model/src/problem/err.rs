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

use stundenplan_core::prelude::TimeSlot;

/// Entity kinds as they appear in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    RoomType,
    Subject,
    Teacher,
    Group,
    Room,
    Requirement,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::RoomType => "room type",
            EntityKind::Subject => "subject",
            EntityKind::Teacher => "teacher",
            EntityKind::Group => "group",
            EntityKind::Room => "room",
            EntityKind::Requirement => "requirement",
        };
        write!(f, "{name}")
    }
}

/// Two entities of the same kind were registered under one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateKeyError {
    kind: EntityKind,
    key: u32,
}

impl DuplicateKeyError {
    pub fn new(kind: EntityKind, key: u32) -> Self {
        Self { kind, key }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn key(&self) -> u32 {
        self.key
    }
}

impl std::fmt::Display for DuplicateKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Duplicate {} key {}", self.kind, self.key)
    }
}

impl std::error::Error for DuplicateKeyError {}

/// A definition references an entity that was never registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidReferenceError {
    referrer_kind: EntityKind,
    referrer_key: u32,
    target_kind: EntityKind,
    target_key: u32,
}

impl InvalidReferenceError {
    pub fn new(
        referrer_kind: EntityKind,
        referrer_key: u32,
        target_kind: EntityKind,
        target_key: u32,
    ) -> Self {
        Self {
            referrer_kind,
            referrer_key,
            target_kind,
            target_key,
        }
    }

    pub fn referrer_kind(&self) -> EntityKind {
        self.referrer_kind
    }

    pub fn referrer_key(&self) -> u32 {
        self.referrer_key
    }

    pub fn target_kind(&self) -> EntityKind {
        self.target_kind
    }

    pub fn target_key(&self) -> u32 {
        self.target_key
    }
}

impl std::fmt::Display for InvalidReferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} references undefined {} {}",
            self.referrer_kind, self.referrer_key, self.target_kind, self.target_key
        )
    }
}

impl std::error::Error for InvalidReferenceError {}

/// An entity definition names a slot outside the configured grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotOutOfGridError {
    kind: EntityKind,
    key: u32,
    slot: TimeSlot,
}

impl SlotOutOfGridError {
    pub fn new(kind: EntityKind, key: u32, slot: TimeSlot) -> Self {
        Self { kind, key, slot }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn key(&self) -> u32 {
        self.key
    }

    pub fn slot(&self) -> TimeSlot {
        self.slot
    }
}

impl std::fmt::Display for SlotOutOfGridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} names {} outside the configured grid",
            self.kind, self.key, self.slot
        )
    }
}

impl std::error::Error for SlotOutOfGridError {}

/// Malformed problem input, surfaced immediately and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProblemError {
    DuplicateKey(DuplicateKeyError),
    InvalidReference(InvalidReferenceError),
    SlotOutOfGrid(SlotOutOfGridError),
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::DuplicateKey(e) => write!(f, "{}", e),
            ProblemError::InvalidReference(e) => write!(f, "{}", e),
            ProblemError::SlotOutOfGrid(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProblemError {}

impl From<DuplicateKeyError> for ProblemError {
    fn from(err: DuplicateKeyError) -> Self {
        ProblemError::DuplicateKey(err)
    }
}

impl From<InvalidReferenceError> for ProblemError {
    fn from(err: InvalidReferenceError) -> Self {
        ProblemError::InvalidReference(err)
    }
}

impl From<SlotOutOfGridError> for ProblemError {
    fn from(err: SlotOutOfGridError) -> Self {
        ProblemError::SlotOutOfGrid(err)
    }
}
