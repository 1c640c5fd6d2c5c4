//! Dependency injection module using Shaku.
//!
//! Two module definitions, one per store backend:
//! - `MonolithicModule`: MySQL-backed repositories behind a SQLx pool
//! - `InMemoryModule`: process-local repositories sharing one `InMemoryStore`
//!
//! Both provide the same cache and services, parameterized from `AppConfig`.

use shaku::HasComponent;
use std::sync::Arc;
use trust_config::AppConfig;
use trust_core::{module, HealthCheck, TrustResult};
use trust_repository::{
    DatabaseHealthCheck, DatabasePool, DatabasePoolInterface, DatabasePoolParameters,
    InMemoryStore, MemoryCircleRepository, MemoryCircleRepositoryParameters, MemoryHealthCheck,
    MemoryMembershipRepository, MemoryMembershipRepositoryParameters, MemoryUserRepository,
    MemoryUserRepositoryParameters, MySqlCircleRepository, MySqlMembershipRepository,
    MySqlUserRepository,
};
use trust_service::{
    CircleService, CircleServiceComponent, CircleServiceComponentParameters, MembershipService,
    MembershipServiceComponent, MembershipServiceComponentParameters, TtlMembershipCache,
    UserService, UserServiceComponent, UserServiceComponentParameters,
};

// ============================================================================
// Shaku Module Definitions
// ============================================================================

// Production module with a MySQL store:
// - Database pool, readiness check and repositories
// - In-process membership cache
// - User, circle and membership services
module! {
    pub MonolithicModule {
        components = [
            DatabasePool,
            DatabaseHealthCheck,
            MySqlUserRepository,
            MySqlCircleRepository,
            MySqlMembershipRepository,
            TtlMembershipCache,
            UserServiceComponent,
            CircleServiceComponent,
            MembershipServiceComponent,
        ],
        providers = [],
    }
}

// Module with process-local repositories. Data is lost on restart.
module! {
    pub InMemoryModule {
        components = [
            MemoryHealthCheck,
            MemoryUserRepository,
            MemoryCircleRepository,
            MemoryMembershipRepository,
            TtlMembershipCache,
            UserServiceComponent,
            CircleServiceComponent,
            MembershipServiceComponent,
        ],
        providers = [],
    }
}

// ============================================================================
// Module Builders
// ============================================================================

/// Connects to MySQL, optionally runs migrations, and builds the module.
pub async fn build_monolithic_module(config: &AppConfig) -> TrustResult<Arc<MonolithicModule>> {
    let db_pool = DatabasePool::new(&config.database).await?;

    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let store_timeout = config.database.store_timeout();

    let module = MonolithicModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.into_inner(),
        })
        .with_component_parameters::<TtlMembershipCache>(TtlMembershipCache::parameters(
            config.cache.ttl(),
        ))
        .with_component_parameters::<UserServiceComponent>(UserServiceComponentParameters {
            store_timeout,
        })
        .with_component_parameters::<CircleServiceComponent>(CircleServiceComponentParameters {
            store_timeout,
        })
        .with_component_parameters::<MembershipServiceComponent>(
            MembershipServiceComponentParameters { store_timeout },
        )
        .build();

    Ok(Arc::new(module))
}

/// Builds the in-memory module around `store`.
pub fn build_in_memory_module(config: &AppConfig, store: InMemoryStore) -> Arc<InMemoryModule> {
    let store_timeout = config.database.store_timeout();

    let module = InMemoryModule::builder()
        .with_component_parameters::<MemoryUserRepository>(MemoryUserRepositoryParameters {
            store: store.clone(),
        })
        .with_component_parameters::<MemoryCircleRepository>(MemoryCircleRepositoryParameters {
            store: store.clone(),
        })
        .with_component_parameters::<MemoryMembershipRepository>(
            MemoryMembershipRepositoryParameters { store },
        )
        .with_component_parameters::<TtlMembershipCache>(TtlMembershipCache::parameters(
            config.cache.ttl(),
        ))
        .with_component_parameters::<UserServiceComponent>(UserServiceComponentParameters {
            store_timeout,
        })
        .with_component_parameters::<CircleServiceComponent>(CircleServiceComponentParameters {
            store_timeout,
        })
        .with_component_parameters::<MembershipServiceComponent>(
            MembershipServiceComponentParameters { store_timeout },
        )
        .build();

    Arc::new(module)
}

// ============================================================================
// Convenience accessors
// ============================================================================

/// Typed accessors over any module that provides the full service set.
pub trait ServiceModuleExt:
    HasComponent<dyn UserService>
    + HasComponent<dyn CircleService>
    + HasComponent<dyn MembershipService>
    + HasComponent<dyn HealthCheck>
{
    fn user_service(&self) -> Arc<dyn UserService> {
        self.resolve()
    }

    fn circle_service(&self) -> Arc<dyn CircleService> {
        self.resolve()
    }

    fn membership_service(&self) -> Arc<dyn MembershipService> {
        self.resolve()
    }

    fn store_health(&self) -> Arc<dyn HealthCheck> {
        self.resolve()
    }
}

impl ServiceModuleExt for MonolithicModule {}
impl ServiceModuleExt for InMemoryModule {}

#[cfg(test)]
mod tests {
    use super::*;
    use trust_core::{CircleId, UserId};

    #[tokio::test]
    async fn test_in_memory_module_wires_services_to_one_store() {
        let store = InMemoryStore::new();
        store.seed_user(1, "owner");
        store.seed_user(42, "alice");
        store.seed_circle(7, 1, "family");

        let module = build_in_memory_module(&AppConfig::default(), store.clone());
        let membership = module.membership_service();

        membership
            .add_member(CircleId::new(7), UserId::new(42))
            .await
            .unwrap();
        let members = membership.list_members(CircleId::new(7)).await.unwrap();

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "alice");
        assert!(store.membership_blob(7).is_some());
    }

    #[tokio::test]
    async fn test_in_memory_module_resolves_every_component() {
        let module = build_in_memory_module(&AppConfig::default(), InMemoryStore::new());

        assert_eq!(module.store_health().name(), "memory");
        assert!(module.user_service().get_user(UserId::new(1)).await.is_err());
        assert!(module
            .circle_service()
            .get_circle(CircleId::new(1))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_modules_share_singletons() {
        let module = build_in_memory_module(&AppConfig::default(), InMemoryStore::new());

        assert!(Arc::ptr_eq(
            &module.membership_service(),
            &module.membership_service()
        ));
    }
}
