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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupIdentifierMarker;

impl IdentifierMarkerName for GroupIdentifierMarker {
    const NAME: &'static str = "GroupId";
}

pub type GroupId = Identifier<GroupIdentifierMarker>;

/// A student group (class, cohort, course-semester). A group attends at
/// most one lesson per time slot, and its size bounds admissible rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    id: GroupId,
    name: String,
    size: u32,
}

impl Group {
    #[inline]
    pub fn new(id: GroupId, name: impl Into<String>, size: u32) -> Self {
        Self {
            id,
            name: name.into(),
            size,
        }
    }

    #[inline]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Group: Id: {}, Name: {}, Size: {}",
            self.id, self.name, self.size
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_accessors() {
        let g = Group::new(GroupId::new(11), "B_Inf 2", 64);
        assert_eq!(g.id(), GroupId::new(11));
        assert_eq!(g.name(), "B_Inf 2");
        assert_eq!(g.size(), 64);
    }

    #[test]
    fn test_display_contains_fields() {
        let g = Group::new(GroupId::new(5), "M_Math 1", 12);
        let s = format!("{g}");
        assert!(s.contains("GroupId(5)"));
        assert!(s.contains("M_Math 1"));
        assert!(s.contains("12"));
    }
}
