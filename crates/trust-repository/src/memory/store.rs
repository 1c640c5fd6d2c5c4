//! Shared state behind the in-memory repositories.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use trust_core::{Circle, CircleId, TrustError, TrustResult, User, UserId};

use crate::StoredMembership;

/// Process-local store shared by the memory repositories.
///
/// Cloning yields another handle to the same data. Besides the tables it
/// keeps per-table query counters and can be told to fail or stall, which
/// lets callers observe exactly how many store round trips an operation made.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    tables: Mutex<Tables>,
    faults: Mutex<Faults>,
    user_reads: AtomicUsize,
    circle_reads: AtomicUsize,
    membership_reads: AtomicUsize,
    membership_writes: AtomicUsize,
}

#[derive(Default)]
pub(crate) struct Tables {
    pub(crate) users: BTreeMap<UserId, User>,
    pub(crate) circles: BTreeMap<CircleId, Circle>,
    pub(crate) memberships: HashMap<CircleId, StoredMembership>,
    next_user_id: i64,
    next_circle_id: i64,
}

impl Tables {
    pub(crate) fn next_user_id(&mut self) -> UserId {
        self.next_user_id += 1;
        while self.users.contains_key(&UserId::new(self.next_user_id)) {
            self.next_user_id += 1;
        }
        UserId::new(self.next_user_id)
    }

    pub(crate) fn next_circle_id(&mut self) -> CircleId {
        self.next_circle_id += 1;
        while self.circles.contains_key(&CircleId::new(self.next_circle_id)) {
            self.next_circle_id += 1;
        }
        CircleId::new(self.next_circle_id)
    }
}

#[derive(Default, Clone, Copy)]
struct Faults {
    unavailable: bool,
    latency: Option<Duration>,
}

#[derive(Clone, Copy)]
pub(crate) enum Table {
    Users,
    Circles,
    Memberships,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a user with a chosen id.
    pub fn seed_user(&self, id: i64, name: &str) -> User {
        let user = User::new(UserId::new(id), name);
        self.inner.tables.lock().users.insert(user.id, user.clone());
        user
    }

    /// Inserts a circle with a chosen id. The owner is not checked.
    pub fn seed_circle(&self, id: i64, owner_id: i64, name: &str) -> Circle {
        let circle = Circle::new(CircleId::new(id), UserId::new(owner_id), name);
        self.inner
            .tables
            .lock()
            .circles
            .insert(circle.id, circle.clone());
        circle
    }

    /// Stores raw bytes as a circle's membership blob, bypassing the codec.
    pub fn put_membership_blob(&self, circle_id: i64, members: Vec<u8>) {
        let circle_id = CircleId::new(circle_id);
        let mut tables = self.inner.tables.lock();
        let version = tables
            .memberships
            .get(&circle_id)
            .map_or(1, |row| row.version + 1);
        tables.memberships.insert(
            circle_id,
            StoredMembership {
                circle_id,
                members,
                version,
            },
        );
    }

    /// Returns the stored membership blob for a circle, if any.
    #[must_use]
    pub fn membership_blob(&self, circle_id: i64) -> Option<Vec<u8>> {
        self.inner
            .tables
            .lock()
            .memberships
            .get(&CircleId::new(circle_id))
            .map(|row| row.members.clone())
    }

    /// Makes every subsequent call fail with `StoreUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.faults.lock().unavailable = unavailable;
    }

    /// Delays every subsequent call by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.inner.faults.lock().latency = latency;
    }

    /// Number of user lookups served.
    #[must_use]
    pub fn user_reads(&self) -> usize {
        self.inner.user_reads.load(Ordering::SeqCst)
    }

    /// Number of circle lookups served.
    #[must_use]
    pub fn circle_reads(&self) -> usize {
        self.inner.circle_reads.load(Ordering::SeqCst)
    }

    /// Number of membership row lookups served.
    #[must_use]
    pub fn membership_reads(&self) -> usize {
        self.inner.membership_reads.load(Ordering::SeqCst)
    }

    /// Number of membership insert/update/delete calls served.
    #[must_use]
    pub fn membership_writes(&self) -> usize {
        self.inner.membership_writes.load(Ordering::SeqCst)
    }

    /// Applies configured faults, then counts the call against `table`.
    pub(crate) async fn enter(&self, table: Table, write: bool) -> TrustResult<()> {
        let faults = *self.inner.faults.lock();

        if let Some(latency) = faults.latency {
            tokio::time::sleep(latency).await;
        }
        if faults.unavailable {
            return Err(TrustError::StoreUnavailable(
                "in-memory store is marked unavailable".to_string(),
            ));
        }

        let counter = match (table, write) {
            (Table::Users, false) => Some(&self.inner.user_reads),
            (Table::Circles, false) => Some(&self.inner.circle_reads),
            (Table::Memberships, false) => Some(&self.inner.membership_reads),
            (Table::Memberships, true) => Some(&self.inner.membership_writes),
            (Table::Users | Table::Circles, true) => None,
        };
        if let Some(counter) = counter {
            counter.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    /// Runs `f` with the tables locked.
    pub(crate) fn with_tables<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        f(&mut self.inner.tables.lock())
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables = self.inner.tables.lock();
        f.debug_struct("InMemoryStore")
            .field("users", &tables.users.len())
            .field("circles", &tables.circles.len())
            .field("memberships", &tables.memberships.len())
            .finish()
    }
}
