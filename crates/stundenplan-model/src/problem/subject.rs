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
use crate::problem::room::RoomTypeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubjectIdentifierMarker;

impl IdentifierMarkerName for SubjectIdentifierMarker {
    const NAME: &'static str = "SubjectId";
}

pub type SubjectId = Identifier<SubjectIdentifierMarker>;

/// A taught subject. The preferred room type is a soft signal: placing a
/// lesson of this subject elsewhere is allowed but penalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    id: SubjectId,
    name: String,
    preferred_room_type: Option<RoomTypeId>,
}

impl Subject {
    #[inline]
    pub fn new(
        id: SubjectId,
        name: impl Into<String>,
        preferred_room_type: Option<RoomTypeId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            preferred_room_type,
        }
    }

    #[inline]
    pub fn id(&self) -> SubjectId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn preferred_room_type(&self) -> Option<RoomTypeId> {
        self.preferred_room_type
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.preferred_room_type {
            Some(rt) => write!(
                f,
                "Subject: Id: {}, Name: {}, Preferred Room Type: {}",
                self.id, self.name, rt
            ),
            None => write!(f, "Subject: Id: {}, Name: {}", self.id, self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_accessors() {
        let s = Subject::new(SubjectId::new(1), "Analysis", Some(RoomTypeId::new(4)));
        assert_eq!(s.id(), SubjectId::new(1));
        assert_eq!(s.name(), "Analysis");
        assert_eq!(s.preferred_room_type(), Some(RoomTypeId::new(4)));
    }

    #[test]
    fn test_subject_without_room_preference() {
        let s = Subject::new(SubjectId::new(2), "Ethik", None);
        assert_eq!(s.preferred_room_type(), None);
        let txt = format!("{s}");
        assert!(txt.contains("SubjectId(2)"));
        assert!(!txt.contains("Preferred"));
    }
}
