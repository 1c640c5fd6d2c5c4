//! Cache key generators.

use trust_core::{CircleId, UserId};

/// Key caching the full member list of a circle.
#[must_use]
pub fn member_list(circle_id: CircleId) -> String {
    circle_id.to_string()
}

/// Key caching whether one user belongs to a circle.
#[must_use]
pub fn membership_check(circle_id: CircleId, user_id: UserId) -> String {
    format!("{}-{}", circle_id, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_list_key() {
        assert_eq!(member_list(CircleId::new(7)), "7");
    }

    #[test]
    fn test_membership_check_key() {
        assert_eq!(membership_check(CircleId::new(7), UserId::new(42)), "7-42");
    }

    #[test]
    fn test_keys_do_not_collide() {
        assert_ne!(
            member_list(CircleId::new(742)),
            membership_check(CircleId::new(7), UserId::new(42))
        );
    }
}
