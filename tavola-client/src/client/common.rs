//! Core client definition shared by every service.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::query::QueryCache;
use crate::services::{
    AnalyticsService, AuthService, BranchService, CartService, MealService, PageService,
    PaymentService, ReservationService, TagService,
};
use crate::stores::{AuthStore, CartStore};
use crate::ClientResult;

use super::http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
use super::http_oneshot::OneshotHttpClient;

/// State behind a [`TavolaClient`] and all of its services
#[derive(Debug)]
pub struct ClientContext<C: HttpClient> {
    pub http: C,
    pub cache: QueryCache,
    pub auth: AuthStore,
    pub cart: CartStore,
    pub config: ClientConfig,
}

/// Typed client for the restaurant backend.
///
/// Cheap to clone; clones share the transport, the query cache and the
/// stores. Services are obtained per entity:
///
/// ```no_run
/// use shared::ListQuery;
/// use tavola_client::{ClientConfig, TavolaClient};
///
/// # async fn example() -> Result<(), tavola_client::ClientError> {
/// let client = TavolaClient::network(ClientConfig::from_env())?;
/// let page = client.branches().list(&ListQuery::new().search("Cairo")).await?;
/// println!("{} branches", page.total);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TavolaClient<C: HttpClient> {
    pub(crate) ctx: Arc<ClientContext<C>>,
}

impl<C: HttpClient> Clone for TavolaClient<C> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
        }
    }
}

impl TavolaClient<NetworkHttpClient> {
    /// Client talking to a backend over HTTP
    pub fn network(config: ClientConfig) -> ClientResult<Self> {
        let http = NetworkHttpClient::new(&config)?;
        Self::with_http(http, config)
    }
}

#[cfg(feature = "in-process")]
impl TavolaClient<OneshotHttpClient> {
    /// Client calling an axum Router in-process
    pub fn in_process(router: axum::Router, config: ClientConfig) -> ClientResult<Self> {
        Self::with_http(OneshotHttpClient::new(router), config)
    }
}

impl<C: HttpClient> TavolaClient<C> {
    /// Build a client over any transport.
    ///
    /// Loads the persisted session when the config names a data directory;
    /// an explicit `config.token` wins over the stored one.
    pub fn with_http(http: C, config: ClientConfig) -> ClientResult<Self> {
        let auth = match config.session_path() {
            Some(path) => AuthStore::load(&path)?,
            None => AuthStore::new(),
        };

        if let Some(token) = config.token.clone().or_else(|| auth.token()) {
            http.set_token(Some(token));
        }
        if auth.is_authenticated() {
            tracing::info!("Restored saved session");
        }

        let cache = QueryCache::new(config.stale_time, config.retry);
        Ok(Self {
            ctx: Arc::new(ClientContext {
                http,
                cache,
                auth,
                cart: CartStore::new(),
                config,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.ctx.config
    }

    pub fn http(&self) -> &C {
        &self.ctx.http
    }

    pub fn cache(&self) -> &QueryCache {
        &self.ctx.cache
    }

    pub fn auth_store(&self) -> &AuthStore {
        &self.ctx.auth
    }

    pub fn cart_store(&self) -> &CartStore {
        &self.ctx.cart
    }

    pub fn is_authenticated(&self) -> bool {
        self.ctx.http.token().is_some()
    }

    pub fn auth(&self) -> AuthService<C> {
        AuthService::new(self.ctx.clone())
    }

    pub fn branches(&self) -> BranchService<C> {
        BranchService::new(self.ctx.clone())
    }

    pub fn meals(&self) -> MealService<C> {
        MealService::new(self.ctx.clone())
    }

    pub fn tags(&self) -> TagService<C> {
        TagService::new(self.ctx.clone())
    }

    pub fn cart(&self) -> CartService<C> {
        CartService::new(self.ctx.clone())
    }

    pub fn reservations(&self) -> ReservationService<C> {
        ReservationService::new(self.ctx.clone())
    }

    pub fn pages(&self) -> PageService<C> {
        PageService::new(self.ctx.clone())
    }

    pub fn analytics(&self) -> AnalyticsService<C> {
        AnalyticsService::new(self.ctx.clone())
    }

    pub fn payments(&self) -> PaymentService<C> {
        PaymentService::new(self.ctx.clone())
    }
}
