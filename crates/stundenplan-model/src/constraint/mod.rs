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

pub mod err;

use crate::problem::prob::Problem;
use err::{
    GroupOverloadedError, InstanceOverloadedError, NoAdmissibleRoomError, RequirementStarvedError,
    TeacherOverloadedError, UnsatisfiableConfigurationError,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use stundenplan_core::prelude::Weight;

/// Structural rules that must never be violated in a valid assignment.
/// The full catalog is always active; configuration cannot disable any
/// of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HardRule {
    /// A teacher gives at most one lesson per slot.
    TeacherClash,
    /// A group attends at most one lesson per slot.
    GroupClash,
    /// A room hosts at most one lesson per slot.
    RoomClash,
    /// A lesson lands only on slots its teacher is available for.
    TeacherUnavailable,
    /// A lesson never lands on a day its requirement disallows.
    DisallowedDay,
    /// A room must hold the whole group.
    RoomTooSmall,
    /// A requirement pinned to a room type only uses rooms of that type.
    PinnedRoomType,
    /// Each occurrence of a requirement is placed at most once.
    QuotaBound,
}

impl HardRule {
    pub const ALL: [HardRule; 8] = [
        HardRule::TeacherClash,
        HardRule::GroupClash,
        HardRule::RoomClash,
        HardRule::TeacherUnavailable,
        HardRule::DisallowedDay,
        HardRule::RoomTooSmall,
        HardRule::PinnedRoomType,
        HardRule::QuotaBound,
    ];
}

impl std::fmt::Display for HardRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            HardRule::TeacherClash => "teacher double-booked",
            HardRule::GroupClash => "group double-booked",
            HardRule::RoomClash => "room double-booked",
            HardRule::TeacherUnavailable => "teacher unavailable",
            HardRule::DisallowedDay => "day disallowed for requirement",
            HardRule::RoomTooSmall => "room too small for group",
            HardRule::PinnedRoomType => "room type does not match pin",
            HardRule::QuotaBound => "occurrence already placed",
        };
        write!(f, "{name}")
    }
}

/// Penalized-but-permitted rules; each enabled one carries a weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoftRule {
    /// Placing a lesson on a slot its teacher dislikes, scaled by the
    /// dislike priority.
    TeacherPreference,
    /// Idle periods between a group's lessons on the same day.
    GroupCompactness,
    /// Room whose type differs from the subject's preferred type.
    RoomSuitability,
}

impl std::fmt::Display for SoftRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SoftRule::TeacherPreference => "teacher slot preference",
            SoftRule::GroupCompactness => "group gap minimization",
            SoftRule::RoomSuitability => "room type suitability",
        };
        write!(f, "{name}")
    }
}

/// Enable flag plus weight for one soft rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleToggle {
    pub enabled: bool,
    pub weight: Weight,
}

impl RuleToggle {
    #[inline]
    pub const fn enabled(weight: Weight) -> Self {
        Self {
            enabled: true,
            weight,
        }
    }

    #[inline]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            weight: Weight::new(0),
        }
    }
}

impl Default for RuleToggle {
    #[inline]
    fn default() -> Self {
        RuleToggle::enabled(Weight::new(1))
    }
}

/// The configuration surface for soft constraints. Defaults enable all
/// three rules at weight 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    pub teacher_preference: RuleToggle,
    pub group_compactness: RuleToggle,
    pub room_suitability: RuleToggle,
}

/// Output of constraint compilation: the full ordered hard-rule catalog
/// and the enabled, weighted soft rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintModel {
    hard: Vec<HardRule>,
    soft: Vec<(SoftRule, Weight)>,
}

impl ConstraintModel {
    /// Compiles the rule sets for `problem` and runs the cheap
    /// necessary-condition checks. Anything caught here would make every
    /// search attempt futile, so it is surfaced before search starts.
    pub fn compile(
        problem: &Problem,
        config: &RuleConfig,
    ) -> Result<Self, UnsatisfiableConfigurationError> {
        Self::check_requirements(problem)?;
        Self::check_teacher_load(problem)?;
        Self::check_group_load(problem)?;
        Self::check_instance_load(problem)?;

        let mut soft = Vec::new();
        if config.teacher_preference.enabled {
            soft.push((SoftRule::TeacherPreference, config.teacher_preference.weight));
        }
        if config.group_compactness.enabled {
            soft.push((SoftRule::GroupCompactness, config.group_compactness.weight));
        }
        if config.room_suitability.enabled {
            soft.push((SoftRule::RoomSuitability, config.room_suitability.weight));
        }

        Ok(Self {
            hard: HardRule::ALL.to_vec(),
            soft,
        })
    }

    fn check_requirements(problem: &Problem) -> Result<(), UnsatisfiableConfigurationError> {
        let registry = problem.registry();
        for req in problem.requirements().iter() {
            let teacher = registry
                .teacher(req.teacher())
                .expect("problem validated its references");
            let group = registry
                .group(req.group())
                .expect("problem validated its references");

            let admissible_slots = teacher
                .available()
                .iter()
                .filter(|s| req.allows_day(s.day()))
                .count();
            if (admissible_slots as u64) < req.quota() as u64 {
                return Err(RequirementStarvedError::new(
                    req.id(),
                    admissible_slots,
                    req.quota(),
                )
                .into());
            }

            let has_room = registry.iter_rooms().any(|room| {
                room.fits(group.size())
                    && req
                        .pinned_room_type()
                        .map_or(true, |rt| room.room_type() == rt)
            });
            if !has_room {
                return Err(NoAdmissibleRoomError::new(req.id()).into());
            }
        }
        Ok(())
    }

    fn check_teacher_load(problem: &Problem) -> Result<(), UnsatisfiableConfigurationError> {
        let registry = problem.registry();
        let mut load: HashMap<_, u64> = HashMap::new();
        for req in problem.requirements().iter() {
            *load.entry(req.teacher()).or_default() += req.quota() as u64;
        }
        for teacher in registry.iter_teachers() {
            let required = load.get(&teacher.id()).copied().unwrap_or(0);
            let admissible = teacher.available().len();
            if required > admissible as u64 {
                return Err(TeacherOverloadedError::new(teacher.id(), admissible, required).into());
            }
        }
        Ok(())
    }

    fn check_group_load(problem: &Problem) -> Result<(), UnsatisfiableConfigurationError> {
        let slots = problem.grid().slot_count();
        let mut load: HashMap<_, u64> = HashMap::new();
        for req in problem.requirements().iter() {
            *load.entry(req.group()).or_default() += req.quota() as u64;
        }
        for (group, required) in load {
            if required > slots as u64 {
                return Err(GroupOverloadedError::new(group, slots, required).into());
            }
        }
        Ok(())
    }

    fn check_instance_load(problem: &Problem) -> Result<(), UnsatisfiableConfigurationError> {
        let demanded = problem.total_occurrences();
        let capacity = problem.grid().slot_count() as u64 * problem.registry().room_count() as u64;
        if demanded > capacity {
            return Err(InstanceOverloadedError::new(demanded, capacity).into());
        }
        Ok(())
    }

    #[inline]
    pub fn hard(&self) -> &[HardRule] {
        &self.hard
    }

    #[inline]
    pub fn soft(&self) -> &[(SoftRule, Weight)] {
        &self.soft
    }

    #[inline]
    pub fn weight_of(&self, rule: SoftRule) -> Option<Weight> {
        self.soft
            .iter()
            .find(|(r, _)| *r == rule)
            .map(|&(_, w)| w)
    }
}
