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
pub struct RoomTypeIdentifierMarker;

impl IdentifierMarkerName for RoomTypeIdentifierMarker {
    const NAME: &'static str = "RoomTypeId";
}

pub type RoomTypeId = Identifier<RoomTypeIdentifierMarker>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomIdentifierMarker;

impl IdentifierMarkerName for RoomIdentifierMarker {
    const NAME: &'static str = "RoomId";
}

pub type RoomId = Identifier<RoomIdentifierMarker>;

/// Category of room (lecture hall, lab, seminar room, ...). Types are
/// registered like entities so every reference to one can be validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomType {
    id: RoomTypeId,
    name: String,
}

impl RoomType {
    #[inline]
    pub fn new(id: RoomTypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> RoomTypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RoomType: Id: {}, Name: {}", self.id, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    name: String,
    room_type: RoomTypeId,
    capacity: u32,
}

impl Room {
    #[inline]
    pub fn new(id: RoomId, name: impl Into<String>, room_type: RoomTypeId, capacity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            room_type,
            capacity,
        }
    }

    #[inline]
    pub fn id(&self) -> RoomId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn room_type(&self) -> RoomTypeId {
        self.room_type
    }

    /// Hard upper bound on the size of a group taught here.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn fits(&self, group_size: u32) -> bool {
        group_size <= self.capacity
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Room: Id: {}, Name: {}, Type: {}, Capacity: {}",
            self.id, self.name, self.room_type, self.capacity
        )
    }
}
