//! Circle membership record.

use crate::{CircleId, UserId};
use serde::{Deserialize, Serialize};

/// Decoded view of the membership record stored for one circle.
///
/// Member order is insertion order and duplicates are preserved. The
/// `version` is `None` for a record that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRecord {
    pub circle_id: CircleId,
    pub member_ids: Vec<UserId>,
    pub version: Option<i64>,
}

impl MembershipRecord {
    /// An unsaved record with no members.
    #[must_use]
    pub fn empty(circle_id: CircleId) -> Self {
        Self {
            circle_id,
            member_ids: Vec::new(),
            version: None,
        }
    }

    /// A record loaded from the store.
    #[must_use]
    pub fn stored(circle_id: CircleId, member_ids: Vec<UserId>, version: i64) -> Self {
        Self {
            circle_id,
            member_ids,
            version: Some(version),
        }
    }

    /// Appends one membership entry.
    pub fn append(&mut self, user_id: UserId) {
        self.member_ids.push(user_id);
    }

    /// Removes every entry for `user_id`, returning how many were removed.
    pub fn remove_all(&mut self, user_id: UserId) -> usize {
        let before = self.member_ids.len();
        self.member_ids.retain(|id| *id != user_id);
        before - self.member_ids.len()
    }

    /// Number of entries for `user_id`.
    #[must_use]
    pub fn count_of(&self, user_id: UserId) -> usize {
        self.member_ids.iter().filter(|id| **id == user_id).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.member_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<UserId> {
        raw.iter().copied().map(UserId::new).collect()
    }

    #[test]
    fn test_append_preserves_order_and_duplicates() {
        let mut record = MembershipRecord::empty(CircleId::new(7));
        record.append(UserId::new(42));
        record.append(UserId::new(43));
        record.append(UserId::new(42));

        assert_eq!(record.member_ids, ids(&[42, 43, 42]));
        assert_eq!(record.count_of(UserId::new(42)), 2);
        assert_eq!(record.version, None);
    }

    #[test]
    fn test_remove_all_drops_every_occurrence() {
        let mut record = MembershipRecord::stored(CircleId::new(7), ids(&[42, 43, 42, 44]), 3);

        assert_eq!(record.remove_all(UserId::new(42)), 2);
        assert_eq!(record.member_ids, ids(&[43, 44]));
        assert_eq!(record.remove_all(UserId::new(99)), 0);
        assert_eq!(record.version, Some(3));
    }

    #[test]
    fn test_remove_last_member_leaves_empty_record() {
        let mut record = MembershipRecord::stored(CircleId::new(7), ids(&[42]), 1);
        record.remove_all(UserId::new(42));
        assert!(record.is_empty());
    }
}
