use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

// ============================================================================
// Metrics - Prometheus counters for the marketplace
// ============================================================================
//
// Registered once at startup and shared through app state; scraped via the
// /metrics endpoint in text format.
//
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub orders_placed: IntCounter,
    pub order_transitions: IntCounterVec,
    pub products_created: IntCounter,
    pub reviews_created: IntCounter,
    pub request_failures: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_placed =
            IntCounter::new("orders_placed_total", "Total orders successfully placed")?;
        registry.register(Box::new(orders_placed.clone()))?;

        let order_transitions = IntCounterVec::new(
            Opts::new(
                "order_status_transitions_total",
                "Order status transitions by target status",
            ),
            &["status"],
        )?;
        registry.register(Box::new(order_transitions.clone()))?;

        let products_created =
            IntCounter::new("products_created_total", "Total products created by sellers")?;
        registry.register(Box::new(products_created.clone()))?;

        let reviews_created =
            IntCounter::new("reviews_created_total", "Total seller reviews left by buyers")?;
        registry.register(Box::new(reviews_created.clone()))?;

        let request_failures = IntCounterVec::new(
            Opts::new("request_failures_total", "Failed requests by error kind"),
            &["kind"],
        )?;
        registry.register(Box::new(request_failures.clone()))?;

        Ok(Self {
            registry,
            orders_placed,
            order_transitions,
            products_created,
            reviews_created,
            request_failures,
        })
    }

    /// The registry backing the /metrics endpoint.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_transition(&self, status: &str) {
        self.order_transitions.with_label_values(&[status]).inc();
    }

    pub fn record_failure(&self, kind: &str) {
        self.request_failures.with_label_values(&[kind]).inc();
    }
}
