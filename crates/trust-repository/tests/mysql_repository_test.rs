//! Integration tests for the MySQL repositories.
//!
//! These tests run against a real MySQL database using testcontainers and
//! need Docker. Run them with `cargo test -- --ignored`.

mod common;

use common::TestDatabase;
use trust_core::{CircleId, TrustError, UserId};
use trust_repository::{
    CircleRepository, MembershipRepository, MySqlCircleRepository, MySqlMembershipRepository,
    MySqlUserRepository, UserRepository,
};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_user_insert_and_find() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let user = repo.insert("alice").await.expect("Failed to insert user");
    assert!(user.id.value() > 0);

    let found = repo
        .find_by_id(user.id)
        .await
        .expect("Query failed")
        .expect("User not found");
    assert_eq!(found, user);

    let missing = repo.find_by_id(UserId::new(999_999)).await.expect("Query failed");
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_circle_owner_must_exist() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let circles = MySqlCircleRepository::new(db.pool());

    let owner = users.insert("alice").await.expect("Failed to insert user");
    let circle = circles
        .insert(owner.id, "family")
        .await
        .expect("Failed to insert circle");
    assert_eq!(
        circles.find_by_id(circle.id).await.expect("Query failed"),
        Some(circle)
    );

    let err = circles
        .insert(UserId::new(999_999), "orphans")
        .await
        .expect_err("Insert should fail");
    assert!(matches!(err, TrustError::Validation(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_membership_versioned_writes() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let circles = MySqlCircleRepository::new(db.pool());
    let members = MySqlMembershipRepository::new(db.pool());

    let owner = users.insert("alice").await.expect("Failed to insert user");
    let circle = circles
        .insert(owner.id, "family")
        .await
        .expect("Failed to insert circle");

    assert!(members
        .find_by_circle(circle.id)
        .await
        .expect("Query failed")
        .is_none());

    assert!(members.insert(circle.id, &[8, 42]).await.expect("Insert failed"));
    assert!(!members.insert(circle.id, &[8, 43]).await.expect("Insert failed"));

    let row = members
        .find_by_circle(circle.id)
        .await
        .expect("Query failed")
        .expect("Row not found");
    assert_eq!(row.members, vec![8, 42]);
    assert_eq!(row.version, 1);

    assert!(!members.update(circle.id, &[1], 7).await.expect("Update failed"));
    assert!(members.update(circle.id, &[1], 1).await.expect("Update failed"));
    assert!(!members.delete(circle.id, 1).await.expect("Delete failed"));
    assert!(members.delete(circle.id, 2).await.expect("Delete failed"));

    assert!(members
        .find_by_circle(circle.id)
        .await
        .expect("Query failed")
        .is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_membership_insert_for_unknown_circle_fails() {
    let db = TestDatabase::new().await;
    let members = MySqlMembershipRepository::new(db.pool());

    let err = members
        .insert(CircleId::new(999_999), &[8, 1])
        .await
        .expect_err("Insert should fail");
    assert!(matches!(err, TrustError::Validation(_)));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_membership_blob_larger_than_64k_round_trips() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let circles = MySqlCircleRepository::new(db.pool());
    let members = MySqlMembershipRepository::new(db.pool());

    let owner = users.insert("alice").await.expect("Failed to insert user");
    let circle = circles
        .insert(owner.id, "everyone")
        .await
        .expect("Failed to insert circle");

    let small = vec![8, 1];
    let large: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();

    assert!(members.insert(circle.id, &small).await.expect("Insert failed"));
    assert!(members.update(circle.id, &large, 1).await.expect("Update failed"));

    let row = members
        .find_by_circle(circle.id)
        .await
        .expect("Query failed")
        .expect("Row not found");
    assert_eq!(row.members.len(), large.len());
    assert_eq!(row.members, large);
    assert_eq!(row.version, 2);
}
