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

use crate::{
    common::{Identifier, IdentifierMarkerName},
    problem::{
        err::{DuplicateKeyError, EntityKind},
        group::GroupId,
        room::RoomTypeId,
        subject::SubjectId,
        teacher::TeacherId,
    },
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use stundenplan_core::prelude::Day;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequirementIdentifierMarker;

impl IdentifierMarkerName for RequirementIdentifierMarker {
    const NAME: &'static str = "RequirementId";
}

pub type RequirementId = Identifier<RequirementIdentifierMarker>;

/// A requirement's quota must be positive; a zero-occurrence demand is
/// meaningless input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroQuotaError {
    id: RequirementId,
}

impl ZeroQuotaError {
    pub fn new(id: RequirementId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> RequirementId {
        self.id
    }
}

impl std::fmt::Display for ZeroQuotaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Requirement {} has a zero quota", self.id)
    }
}

impl std::error::Error for ZeroQuotaError {}

/// Demand that a subject be taught to a group by a teacher for `quota`
/// occurrences per planning period. Immutable during search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonRequirement {
    id: RequirementId,
    subject: SubjectId,
    teacher: TeacherId,
    group: GroupId,
    quota: u32,
    pinned_room_type: Option<RoomTypeId>,
    disallowed_days: BTreeSet<Day>,
}

impl LessonRequirement {
    #[inline]
    pub fn new(
        id: RequirementId,
        subject: SubjectId,
        teacher: TeacherId,
        group: GroupId,
        quota: u32,
        pinned_room_type: Option<RoomTypeId>,
        disallowed_days: BTreeSet<Day>,
    ) -> Result<Self, ZeroQuotaError> {
        if quota == 0 {
            return Err(ZeroQuotaError::new(id));
        }
        Ok(Self {
            id,
            subject,
            teacher,
            group,
            quota,
            pinned_room_type,
            disallowed_days,
        })
    }

    #[inline]
    pub fn id(&self) -> RequirementId {
        self.id
    }

    #[inline]
    pub fn subject(&self) -> SubjectId {
        self.subject
    }

    #[inline]
    pub fn teacher(&self) -> TeacherId {
        self.teacher
    }

    #[inline]
    pub fn group(&self) -> GroupId {
        self.group
    }

    #[inline]
    pub fn quota(&self) -> u32 {
        self.quota
    }

    /// A pinned room type is a hard filter: only rooms of this type are
    /// admissible for the requirement's lessons.
    #[inline]
    pub fn pinned_room_type(&self) -> Option<RoomTypeId> {
        self.pinned_room_type
    }

    #[inline]
    pub fn disallowed_days(&self) -> &BTreeSet<Day> {
        &self.disallowed_days
    }

    #[inline]
    pub fn allows_day(&self, day: Day) -> bool {
        !self.disallowed_days.contains(&day)
    }
}

impl std::fmt::Display for LessonRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Requirement: Id: {}, Subject: {}, Teacher: {}, Group: {}, Quota: {}",
            self.id, self.subject, self.teacher, self.group, self.quota
        )
    }
}

/// Requirements in insertion order. Enumeration order is the tie-breaker
/// for the search heuristic, so it must be deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementContainer {
    items: Vec<LessonRequirement>,
    index: HashMap<RequirementId, usize>,
}

impl RequirementContainer {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn insert(&mut self, requirement: LessonRequirement) -> Result<(), DuplicateKeyError> {
        let id = requirement.id();
        if self.index.contains_key(&id) {
            return Err(DuplicateKeyError::new(EntityKind::Requirement, id.value()));
        }
        self.index.insert(id, self.items.len());
        self.items.push(requirement);
        Ok(())
    }

    #[inline]
    pub fn get(&self, id: RequirementId) -> Option<&LessonRequirement> {
        self.index.get(&id).map(|&i| &self.items[i])
    }

    #[inline]
    pub fn contains_id(&self, id: RequirementId) -> bool {
        self.index.contains_key(&id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &LessonRequirement> {
        self.items.iter()
    }

    /// Sum of quotas over all requirements.
    #[inline]
    pub fn total_occurrences(&self) -> u64 {
        self.items.iter().map(|r| r.quota() as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn req(id: u32, quota: u32) -> LessonRequirement {
        LessonRequirement::new(
            RequirementId::new(id),
            SubjectId::new(1),
            TeacherId::new(1),
            GroupId::new(1),
            quota,
            None,
            BTreeSet::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_zero_quota_rejected() {
        let err = LessonRequirement::new(
            RequirementId::new(9),
            SubjectId::new(1),
            TeacherId::new(1),
            GroupId::new(1),
            0,
            None,
            BTreeSet::new(),
        )
        .expect_err("zero quota must be rejected");
        assert_eq!(err, ZeroQuotaError::new(RequirementId::new(9)));
    }

    #[test]
    fn test_allows_day() {
        let r = LessonRequirement::new(
            RequirementId::new(1),
            SubjectId::new(1),
            TeacherId::new(1),
            GroupId::new(1),
            2,
            None,
            [Day::new(4)].into(),
        )
        .unwrap();
        assert!(r.allows_day(Day::new(0)));
        assert!(!r.allows_day(Day::new(4)));
    }

    #[test]
    fn test_container_preserves_insertion_order() {
        let mut c = RequirementContainer::new();
        c.insert(req(3, 1)).unwrap();
        c.insert(req(1, 2)).unwrap();
        c.insert(req(2, 1)).unwrap();
        let ids: Vec<_> = c.iter().map(|r| r.id().value()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(c.total_occurrences(), 4);
    }

    #[test]
    fn test_container_rejects_duplicates() {
        let mut c = RequirementContainer::new();
        c.insert(req(1, 1)).unwrap();
        let err = c.insert(req(1, 2)).expect_err("duplicate id must be rejected");
        assert_eq!(err, DuplicateKeyError::new(EntityKind::Requirement, 1));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_container_lookup() {
        let mut c = RequirementContainer::new();
        c.insert(req(5, 2)).unwrap();
        assert!(c.contains_id(RequirementId::new(5)));
        assert_eq!(c.get(RequirementId::new(5)).unwrap().quota(), 2);
        assert!(c.get(RequirementId::new(6)).is_none());
    }
}
