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

use crate::problem::{group::GroupId, req::RequirementId, teacher::TeacherId};

/// A teacher has fewer admissible slots than lessons to give.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeacherOverloadedError {
    teacher: TeacherId,
    admissible: usize,
    required: u64,
}

impl TeacherOverloadedError {
    pub fn new(teacher: TeacherId, admissible: usize, required: u64) -> Self {
        Self {
            teacher,
            admissible,
            required,
        }
    }

    pub fn teacher(&self) -> TeacherId {
        self.teacher
    }

    pub fn admissible(&self) -> usize {
        self.admissible
    }

    pub fn required(&self) -> u64 {
        self.required
    }
}

impl std::fmt::Display for TeacherOverloadedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Teacher {} has {} admissible slots but must give {} lessons",
            self.teacher, self.admissible, self.required
        )
    }
}

impl std::error::Error for TeacherOverloadedError {}

/// A group is demanded for more occurrences than the grid has slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupOverloadedError {
    group: GroupId,
    slots: usize,
    required: u64,
}

impl GroupOverloadedError {
    pub fn new(group: GroupId, slots: usize, required: u64) -> Self {
        Self {
            group,
            slots,
            required,
        }
    }

    pub fn group(&self) -> GroupId {
        self.group
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn required(&self) -> u64 {
        self.required
    }
}

impl std::fmt::Display for GroupOverloadedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Group {} is demanded for {} occurrences but the grid has only {} slots",
            self.group, self.required, self.slots
        )
    }
}

impl std::error::Error for GroupOverloadedError {}

/// A requirement's teacher availability minus disallowed days leaves
/// fewer slots than the quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequirementStarvedError {
    requirement: RequirementId,
    admissible: usize,
    quota: u32,
}

impl RequirementStarvedError {
    pub fn new(requirement: RequirementId, admissible: usize, quota: u32) -> Self {
        Self {
            requirement,
            admissible,
            quota,
        }
    }

    pub fn requirement(&self) -> RequirementId {
        self.requirement
    }

    pub fn admissible(&self) -> usize {
        self.admissible
    }

    pub fn quota(&self) -> u32 {
        self.quota
    }
}

impl std::fmt::Display for RequirementStarvedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Requirement {} needs {} occurrences but only {} slots are admissible",
            self.requirement, self.quota, self.admissible
        )
    }
}

impl std::error::Error for RequirementStarvedError {}

/// No registered room satisfies a requirement's hard room filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoAdmissibleRoomError {
    requirement: RequirementId,
}

impl NoAdmissibleRoomError {
    pub fn new(requirement: RequirementId) -> Self {
        Self { requirement }
    }

    pub fn requirement(&self) -> RequirementId {
        self.requirement
    }
}

impl std::fmt::Display for NoAdmissibleRoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "No admissible room for requirement {}", self.requirement)
    }
}

impl std::error::Error for NoAdmissibleRoomError {}

/// Total demand exceeds the grid's slot-room capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceOverloadedError {
    demanded: u64,
    capacity: u64,
}

impl InstanceOverloadedError {
    pub fn new(demanded: u64, capacity: u64) -> Self {
        Self { demanded, capacity }
    }

    pub fn demanded(&self) -> u64 {
        self.demanded
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }
}

impl std::fmt::Display for InstanceOverloadedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Instance demands {} occurrences but slots x rooms is {}",
            self.demanded, self.capacity
        )
    }
}

impl std::error::Error for InstanceOverloadedError {}

/// Cheap necessary-condition failures found before search starts. Not a
/// feasibility proof; an instance passing these checks may still turn
/// out infeasible during search.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnsatisfiableConfigurationError {
    TeacherOverloaded(TeacherOverloadedError),
    GroupOverloaded(GroupOverloadedError),
    RequirementStarved(RequirementStarvedError),
    NoAdmissibleRoom(NoAdmissibleRoomError),
    InstanceOverloaded(InstanceOverloadedError),
}

impl std::fmt::Display for UnsatisfiableConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnsatisfiableConfigurationError::TeacherOverloaded(e) => write!(f, "{}", e),
            UnsatisfiableConfigurationError::GroupOverloaded(e) => write!(f, "{}", e),
            UnsatisfiableConfigurationError::RequirementStarved(e) => write!(f, "{}", e),
            UnsatisfiableConfigurationError::NoAdmissibleRoom(e) => write!(f, "{}", e),
            UnsatisfiableConfigurationError::InstanceOverloaded(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for UnsatisfiableConfigurationError {}

impl From<TeacherOverloadedError> for UnsatisfiableConfigurationError {
    fn from(err: TeacherOverloadedError) -> Self {
        UnsatisfiableConfigurationError::TeacherOverloaded(err)
    }
}

impl From<GroupOverloadedError> for UnsatisfiableConfigurationError {
    fn from(err: GroupOverloadedError) -> Self {
        UnsatisfiableConfigurationError::GroupOverloaded(err)
    }
}

impl From<RequirementStarvedError> for UnsatisfiableConfigurationError {
    fn from(err: RequirementStarvedError) -> Self {
        UnsatisfiableConfigurationError::RequirementStarved(err)
    }
}

impl From<NoAdmissibleRoomError> for UnsatisfiableConfigurationError {
    fn from(err: NoAdmissibleRoomError) -> Self {
        UnsatisfiableConfigurationError::NoAdmissibleRoom(err)
    }
}

impl From<InstanceOverloadedError> for UnsatisfiableConfigurationError {
    fn from(err: InstanceOverloadedError) -> Self {
        UnsatisfiableConfigurationError::InstanceOverloaded(err)
    }
}
