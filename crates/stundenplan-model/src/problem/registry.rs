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

use crate::problem::{
    err::{DuplicateKeyError, EntityKind, InvalidReferenceError, ProblemError},
    group::{Group, GroupId},
    room::{Room, RoomId, RoomType, RoomTypeId},
    subject::{Subject, SubjectId},
    teacher::{Teacher, TeacherId},
};
use std::collections::HashMap;

/// Immutable, validated collection of every entity a problem may refer
/// to. Lookup by id is O(1); iteration follows insertion order so every
/// enumeration downstream is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRegistry {
    room_types: Vec<RoomType>,
    subjects: Vec<Subject>,
    teachers: Vec<Teacher>,
    groups: Vec<Group>,
    rooms: Vec<Room>,
    room_type_index: HashMap<RoomTypeId, usize>,
    subject_index: HashMap<SubjectId, usize>,
    teacher_index: HashMap<TeacherId, usize>,
    group_index: HashMap<GroupId, usize>,
    room_index: HashMap<RoomId, usize>,
}

impl EntityRegistry {
    /// Validates and freezes the entity universe. Duplicate keys within a
    /// kind and dangling room-type references are rejected.
    pub fn load(
        room_types: Vec<RoomType>,
        subjects: Vec<Subject>,
        teachers: Vec<Teacher>,
        groups: Vec<Group>,
        rooms: Vec<Room>,
    ) -> Result<Self, ProblemError> {
        let mut registry = EntityRegistry::default();

        for (i, rt) in room_types.iter().enumerate() {
            if registry.room_type_index.insert(rt.id(), i).is_some() {
                return Err(DuplicateKeyError::new(EntityKind::RoomType, rt.id().value()).into());
            }
        }
        for (i, s) in subjects.iter().enumerate() {
            if registry.subject_index.insert(s.id(), i).is_some() {
                return Err(DuplicateKeyError::new(EntityKind::Subject, s.id().value()).into());
            }
            if let Some(rt) = s.preferred_room_type() {
                if !registry.room_type_index.contains_key(&rt) {
                    return Err(InvalidReferenceError::new(
                        EntityKind::Subject,
                        s.id().value(),
                        EntityKind::RoomType,
                        rt.value(),
                    )
                    .into());
                }
            }
        }
        for (i, t) in teachers.iter().enumerate() {
            if registry.teacher_index.insert(t.id(), i).is_some() {
                return Err(DuplicateKeyError::new(EntityKind::Teacher, t.id().value()).into());
            }
        }
        for (i, g) in groups.iter().enumerate() {
            if registry.group_index.insert(g.id(), i).is_some() {
                return Err(DuplicateKeyError::new(EntityKind::Group, g.id().value()).into());
            }
        }
        for (i, r) in rooms.iter().enumerate() {
            if registry.room_index.insert(r.id(), i).is_some() {
                return Err(DuplicateKeyError::new(EntityKind::Room, r.id().value()).into());
            }
            if !registry.room_type_index.contains_key(&r.room_type()) {
                return Err(InvalidReferenceError::new(
                    EntityKind::Room,
                    r.id().value(),
                    EntityKind::RoomType,
                    r.room_type().value(),
                )
                .into());
            }
        }

        registry.room_types = room_types;
        registry.subjects = subjects;
        registry.teachers = teachers;
        registry.groups = groups;
        registry.rooms = rooms;
        Ok(registry)
    }

    #[inline]
    pub fn room_type(&self, id: RoomTypeId) -> Option<&RoomType> {
        self.room_type_index.get(&id).map(|&i| &self.room_types[i])
    }

    #[inline]
    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.subject_index.get(&id).map(|&i| &self.subjects[i])
    }

    #[inline]
    pub fn teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.teacher_index.get(&id).map(|&i| &self.teachers[i])
    }

    #[inline]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.group_index.get(&id).map(|&i| &self.groups[i])
    }

    #[inline]
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.room_index.get(&id).map(|&i| &self.rooms[i])
    }

    #[inline]
    pub fn iter_room_types(&self) -> impl Iterator<Item = &RoomType> {
        self.room_types.iter()
    }

    #[inline]
    pub fn iter_subjects(&self) -> impl Iterator<Item = &Subject> {
        self.subjects.iter()
    }

    #[inline]
    pub fn iter_teachers(&self) -> impl Iterator<Item = &Teacher> {
        self.teachers.iter()
    }

    #[inline]
    pub fn iter_groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    #[inline]
    pub fn iter_rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    #[inline]
    pub fn teacher_count(&self) -> usize {
        self.teachers.len()
    }

    #[inline]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};

    fn sample_room_types() -> Vec<RoomType> {
        vec![
            RoomType::new(RoomTypeId::new(1), "Hörsaal"),
            RoomType::new(RoomTypeId::new(2), "Labor"),
        ]
    }

    #[test]
    fn test_load_ok_and_lookup() {
        let registry = EntityRegistry::load(
            sample_room_types(),
            vec![Subject::new(SubjectId::new(1), "Analysis", Some(RoomTypeId::new(1)))],
            vec![Teacher::new(
                TeacherId::new(1),
                "Curie",
                BTreeSet::new(),
                BTreeMap::new(),
            )],
            vec![Group::new(GroupId::new(1), "B_Inf 1", 40)],
            vec![Room::new(RoomId::new(1), "Audimax", RoomTypeId::new(1), 400)],
        )
        .unwrap();

        assert_eq!(registry.subject(SubjectId::new(1)).unwrap().name(), "Analysis");
        assert_eq!(registry.teacher(TeacherId::new(1)).unwrap().name(), "Curie");
        assert_eq!(registry.group(GroupId::new(1)).unwrap().size(), 40);
        assert_eq!(registry.room(RoomId::new(1)).unwrap().capacity(), 400);
        assert!(registry.room(RoomId::new(2)).is_none());
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let err = EntityRegistry::load(
            sample_room_types(),
            vec![],
            vec![],
            vec![
                Group::new(GroupId::new(7), "A", 10),
                Group::new(GroupId::new(7), "B", 20),
            ],
            vec![],
        )
        .expect_err("duplicate group key must be rejected");
        assert_eq!(
            err,
            ProblemError::DuplicateKey(DuplicateKeyError::new(EntityKind::Group, 7))
        );
    }

    #[test]
    fn test_dangling_room_type_reference_rejected() {
        let err = EntityRegistry::load(
            sample_room_types(),
            vec![],
            vec![],
            vec![],
            vec![Room::new(RoomId::new(1), "H4", RoomTypeId::new(99), 80)],
        )
        .expect_err("unknown room type must be rejected");
        assert_eq!(
            err,
            ProblemError::InvalidReference(InvalidReferenceError::new(
                EntityKind::Room,
                1,
                EntityKind::RoomType,
                99
            ))
        );
    }

    #[test]
    fn test_subject_with_unknown_preferred_type_rejected() {
        let err = EntityRegistry::load(
            sample_room_types(),
            vec![Subject::new(SubjectId::new(1), "Chemie", Some(RoomTypeId::new(42)))],
            vec![],
            vec![],
            vec![],
        )
        .expect_err("unknown preferred room type must be rejected");
        assert!(matches!(err, ProblemError::InvalidReference(_)));
    }

    #[test]
    fn test_iteration_is_insertion_ordered() {
        let registry = EntityRegistry::load(
            sample_room_types(),
            vec![],
            vec![],
            vec![
                Group::new(GroupId::new(3), "C", 1),
                Group::new(GroupId::new(1), "A", 1),
                Group::new(GroupId::new(2), "B", 1),
            ],
            vec![],
        )
        .unwrap();
        let ids: Vec<_> = registry.iter_groups().map(|g| g.id().value()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
