//! Caching decorator over a slow customer directory.
//!
//! Run with `cargo run --example customers`. The first lookup takes two
//! seconds; the second is served from the cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use callcache::backend::MemoryBackend;
use callcache::{
    CacheDirective, CacheError, CacheInterceptor, CachePolicy, CallSite, DirectiveRegistry,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Customer {
    customer_id: u32,
    first_name: String,
    last_name: String,
}

#[derive(Debug, Error)]
enum DirectoryError {
    #[error(transparent)]
    Cache(#[from] CacheError),
}

#[async_trait]
trait CustomerDirectory {
    async fn get_customers(&self) -> Result<Vec<Customer>, DirectoryError>;
}

/// The real directory; loading takes two seconds.
struct SlowDirectory;

#[async_trait]
impl CustomerDirectory for SlowDirectory {
    async fn get_customers(&self) -> Result<Vec<Customer>, DirectoryError> {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Ok(vec![
            Customer {
                customer_id: 1,
                first_name: "Sam".to_string(),
                last_name: "Smith".to_string(),
            },
            Customer {
                customer_id: 2,
                first_name: "Monique".to_string(),
                last_name: "Williams".to_string(),
            },
        ])
    }
}

/// Decorator implementing the same capability as the wrapped directory,
/// inserting the cache check around the delegation.
struct CachedDirectory<D> {
    inner: D,
    interceptor: CacheInterceptor,
}

#[async_trait]
impl<D: CustomerDirectory + Send + Sync> CustomerDirectory for CachedDirectory<D> {
    async fn get_customers(&self) -> Result<Vec<Customer>, DirectoryError> {
        self.interceptor
            .intercept(CallSite::new("GetCustomers"), || self.inner.get_customers())
            .await
    }
}

#[tokio::main]
async fn main() -> Result<(), DirectoryError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    let mut directives = DirectiveRegistry::new();
    directives.declare("GetCustomers", CacheDirective::with_ttl(60));

    let directory = CachedDirectory {
        inner: SlowDirectory,
        interceptor: CacheInterceptor::new(
            CachePolicy::prefixed("app"),
            directives,
            Arc::new(MemoryBackend::new()),
        ),
    };

    for round in 1u32..=2 {
        let started = Instant::now();
        let customers = directory.get_customers().await?;
        tracing::info!(
            round,
            elapsed_ms = started.elapsed().as_millis() as u64,
            count = customers.len(),
            "directory call finished"
        );
    }

    Ok(())
}
