//! Which rooms expose their logs.

use std::collections::{BTreeSet, HashSet};

use crate::domain::chat::ChatError;

/// Bound rooms minus private rooms are readable; everything else is
/// reported as missing, whatever the store holds.
#[derive(Debug, Clone, Default)]
pub struct RoomAccess {
    bindings: BTreeSet<String>,
    private_rooms: HashSet<String>,
}

impl RoomAccess {
    pub fn new<B, P>(bindings: B, private_rooms: P) -> Self
    where
        B: IntoIterator<Item = String>,
        P: IntoIterator<Item = String>,
    {
        Self {
            bindings: bindings.into_iter().collect(),
            private_rooms: private_rooms.into_iter().collect(),
        }
    }

    pub fn is_public(&self, room: &str) -> bool {
        self.bindings.contains(room) && !self.private_rooms.contains(room)
    }

    pub fn is_bound(&self, room: &str) -> bool {
        self.bindings.contains(room)
    }

    /// Fails with `NotFound` for unbound or private rooms.
    pub fn authorize(&self, room: &str) -> Result<(), ChatError> {
        if self.is_public(room) {
            Ok(())
        } else {
            Err(ChatError::not_found("Room not found"))
        }
    }

    /// Readable rooms in name order.
    pub fn public_rooms(&self) -> Vec<String> {
        self.bindings
            .iter()
            .filter(|room| !self.private_rooms.contains(*room))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access() -> RoomAccess {
        RoomAccess::new(
            ["rust", "linux", "secret"].map(String::from),
            ["secret"].map(String::from),
        )
    }

    #[test]
    fn bound_public_room_is_authorized() {
        assert!(access().authorize("rust").is_ok());
    }

    #[test]
    fn unbound_room_is_not_found() {
        assert_eq!(
            access().authorize("golang"),
            Err(ChatError::not_found("Room not found"))
        );
    }

    #[test]
    fn private_room_is_not_found() {
        let access = access();
        assert!(access.is_bound("secret"));
        assert!(access.authorize("secret").is_err());
    }

    #[test]
    fn public_rooms_excludes_private() {
        assert_eq!(access().public_rooms(), vec!["linux", "rust"]);
    }
}
