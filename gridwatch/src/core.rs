use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use gridwatch_core::connector::ConnectorKey;
use gridwatch_core::{
    Bucketizer, CacheConfig, Dataset, GridError, GridwatchConfig, MarketDataConnector,
    OverridePrecedence, UnitId,
};

use crate::cache::SeriesCache;
use crate::scope::SelectionScope;

/// Orchestrator that fans requests out across registered connectors and
/// reconciles the results.
pub struct Gridwatch {
    pub(crate) connectors: Vec<Arc<dyn MarketDataConnector>>,
    pub(crate) cfg: GridwatchConfig,
    pub(crate) bucketizer: Bucketizer,
    pub(crate) cache: SeriesCache,
    pub(crate) scope: SelectionScope,
}

/// Builder for constructing a `Gridwatch` orchestrator with custom configuration.
pub struct GridwatchBuilder {
    connectors: Vec<Arc<dyn MarketDataConnector>>,
    priority: Vec<ConnectorKey>,
    cfg: GridwatchConfig,
}

impl Default for GridwatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GridwatchBuilder {
    /// Create a new builder with default configuration and no connectors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            priority: vec![],
            cfg: GridwatchConfig::default(),
        }
    }

    /// Register a connector.
    ///
    /// Registration order is the fallback order unless [`prefer`](Self::prefer)
    /// sets an explicit one. Duplicates are not removed.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn MarketDataConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Try connectors in this order first; unlisted connectors follow in
    /// registration order.
    #[must_use]
    pub fn prefer(mut self, connectors_desc: &[Arc<dyn MarketDataConnector>]) -> Self {
        self.priority = connectors_desc.iter().map(|c| c.key()).collect();
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: GridwatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall deadline for each fan-out across units and datasets.
    ///
    /// When exceeded, the whole fetch fails with `RequestTimeout`.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Buffer subtracted from the earliest baseline start when building the time axis.
    #[must_use]
    pub const fn axis_lookback(mut self, lookback: std::time::Duration) -> Self {
        self.cfg.axis_lookback = lookback;
        self
    }

    /// Span of the live query window around `now`.
    #[must_use]
    pub const fn live_window(
        mut self,
        lookback: std::time::Duration,
        lookahead: std::time::Duration,
    ) -> Self {
        self.cfg.live_lookback = lookback;
        self.cfg.live_lookahead = lookahead;
        self
    }

    /// Tie-break for simultaneously active overrides.
    #[must_use]
    pub const fn override_precedence(mut self, precedence: OverridePrecedence) -> Self {
        self.cfg.override_precedence = precedence;
        self
    }

    /// Cap instructed output at potential before computing curtailment.
    #[must_use]
    pub const fn clamp_override_to_potential(mut self, yes: bool) -> Self {
        self.cfg.clamp_override_to_potential = yes;
        self
    }

    /// IANA time zone for settlement dates and calendar buckets.
    #[must_use]
    pub fn market_timezone(mut self, tz: impl Into<String>) -> Self {
        self.cfg.market_timezone = tz.into();
        self
    }

    /// Reference Monday for bi-weekly bucket alignment.
    #[must_use]
    pub const fn biweekly_anchor(mut self, anchor: chrono::NaiveDate) -> Self {
        self.cfg.biweekly_anchor = anchor;
        self
    }

    /// Maximum number of points in the downsampled preview.
    #[must_use]
    pub const fn preview_points(mut self, points: usize) -> Self {
        self.cfg.preview_points = points;
        self
    }

    /// Per-session cache settings. A zero TTL disables caching.
    #[must_use]
    pub const fn cache(mut self, cache: CacheConfig) -> Self {
        self.cfg.cache = cache;
        self
    }

    /// Build the `Gridwatch` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors are registered, the market time
    /// zone is unknown, the bi-weekly anchor is not a Monday, the live window
    /// is empty, or the provider timeout is zero.
    pub fn build(self) -> Result<Gridwatch, GridError> {
        if self.connectors.is_empty() {
            return Err(GridError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        if self.cfg.live_lookback.is_zero() && self.cfg.live_lookahead.is_zero() {
            return Err(GridError::InvalidArg(
                "live window lookback and lookahead cannot both be zero".to_string(),
            ));
        }
        if self.cfg.provider_timeout.is_zero() {
            return Err(GridError::InvalidArg(
                "provider timeout must be non-zero".to_string(),
            ));
        }
        let bucketizer = Bucketizer::from_config(&self.cfg)?;

        // Keep only registered keys, first occurrence wins.
        let known: HashSet<&'static str> = self.connectors.iter().map(|c| c.name()).collect();
        let mut seen: HashSet<&'static str> = HashSet::new();
        let priority: Vec<ConnectorKey> = self
            .priority
            .into_iter()
            .filter(|k| known.contains(k.as_str()) && seen.insert(k.as_str()))
            .collect();

        let pos: HashMap<&'static str, usize> = priority
            .iter()
            .enumerate()
            .map(|(i, k)| (k.as_str(), i))
            .collect();
        let mut connectors: Vec<(usize, Arc<dyn MarketDataConnector>)> =
            self.connectors.into_iter().enumerate().collect();
        connectors.sort_by_key(|(orig_i, c)| {
            (pos.get(c.name()).copied().unwrap_or(usize::MAX), *orig_i)
        });

        let cache = SeriesCache::new(&self.cfg.cache);
        Ok(Gridwatch {
            connectors: connectors.into_iter().map(|(_, c)| c).collect(),
            cfg: self.cfg,
            bucketizer,
            cache,
            scope: SelectionScope::new(),
        })
    }
}

/// Attribute a provider error to the connector that raised it.
///
/// Errors that already carry attribution or aggregate classification pass
/// through unchanged.
pub fn tag_err(connector: &str, e: GridError) -> GridError {
    match e {
        e @ (GridError::NotFound { .. }
        | GridError::ProviderTimeout { .. }
        | GridError::Connector { .. }
        | GridError::RequestTimeout { .. }
        | GridError::AllProvidersTimedOut { .. }
        | GridError::AllProvidersFailed(_)
        | GridError::Cancelled) => e,
        other => GridError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Apply an optional overall deadline to a future.
pub(crate) async fn with_request_deadline<F, T>(
    deadline: Option<std::time::Duration>,
    fut: F,
) -> Result<T, GridError>
where
    F: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .map_err(|_| GridError::request_timeout("request")),
        None => Ok(fut.await),
    }
}

impl Gridwatch {
    /// Start building a new `Gridwatch` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use gridwatch::Gridwatch;
    /// use gridwatch_mock::MockConnector;
    ///
    /// let gw = Gridwatch::builder()
    ///     .with_connector(Arc::new(MockConnector::new()))
    ///     .provider_timeout(std::time::Duration::from_secs(2))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> GridwatchBuilder {
        GridwatchBuilder::new()
    }

    /// The effective configuration.
    #[must_use]
    pub const fn config(&self) -> &GridwatchConfig {
        &self.cfg
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gridwatch::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: Dataset,
        timeout: std::time::Duration,
        fut: Fut,
    ) -> Result<T, GridError>
    where
        Fut: core::future::Future<Output = Result<T, GridError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(GridError::provider_timeout(connector_name, capability.as_str())))
    }

    /// Fetch one dataset for one unit, trying connectors in priority order.
    ///
    /// - Applies the per-provider timeout to each attempt.
    /// - Returns the first success.
    /// - Collapses failures with [`collapse_errors`](crate::collapse_errors).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "gridwatch::core::fetch_single_priority_with_fallback",
            skip(self, call),
            fields(unit = %unit, capability = %capability),
        )
    )]
    pub(crate) async fn fetch_single_priority_with_fallback<T, F, Fut>(
        &self,
        unit: &UnitId,
        capability: Dataset,
        call: F,
    ) -> Result<T, GridError>
    where
        T: Send,
        F: Fn(Arc<dyn MarketDataConnector>, UnitId) -> Option<Fut> + Send,
        Fut: core::future::Future<Output = Result<T, GridError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<GridError> = Vec::new();

        for c in &self.connectors {
            if !c.supports_unit(unit) {
                continue;
            }
            let Some(fut) = call(Arc::clone(c), unit.clone()) else {
                continue;
            };
            attempted_any = true;
            match Self::provider_call_with_timeout(
                c.name(),
                capability,
                self.cfg.provider_timeout,
                fut,
            )
            .await
            {
                Ok(v) => return Ok(v),
                Err(e @ (GridError::NotFound { .. } | GridError::ProviderTimeout { .. })) => {
                    errors.push(e);
                }
                Err(e) => errors.push(tag_err(c.name(), e)),
            }
        }

        Err(crate::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(format!("{capability} for {unit}")),
        ))
    }
}
