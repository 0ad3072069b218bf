//! Prometheus metrics for inbound routes and outbound backend calls.

use prometheus::{CounterVec, Gauge, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use std::time::{Duration, Instant};

/// Application metrics collector for Prometheus integration
#[derive(Clone)]
pub struct AppMetrics {
    pub registry: Registry,
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub backend_requests_total: CounterVec,
    pub backend_request_duration_seconds: HistogramVec,
    pub app_uptime_seconds: Gauge,
    pub app_info: CounterVec,
    pub start_time: Instant,
}

impl AppMetrics {
    /// Create a collector backed by its own registry
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "status", "route"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "route"],
        )?;

        let backend_requests_total = CounterVec::new(
            Opts::new(
                "backend_requests_total",
                "Proxied backend calls by context, action and outcome",
            ),
            &["context", "action", "outcome"],
        )?;

        // PDF generation can legitimately take close to a minute.
        let backend_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "backend_request_duration_seconds",
                "Duration of proxied backend calls in seconds",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 8.0, 15.0, 30.0, 65.0]),
            &["context", "action"],
        )?;

        let app_uptime_seconds = Gauge::new("app_uptime_seconds", "Application uptime in seconds")?;

        let app_info = CounterVec::new(
            Opts::new("app_info", "Application information"),
            &["version", "commit", "build_time"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(backend_requests_total.clone()))?;
        registry.register(Box::new(backend_request_duration_seconds.clone()))?;
        registry.register(Box::new(app_uptime_seconds.clone()))?;
        registry.register(Box::new(app_info.clone()))?;

        let build = crate::BuildInfo::current();
        app_info
            .with_label_values(&[build.version, build.commit, build.build_time])
            .inc();

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            backend_requests_total,
            backend_request_duration_seconds,
            app_uptime_seconds,
            app_info,
            start_time: Instant::now(),
        })
    }

    /// Record an inbound HTTP request
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration: Duration) {
        if route == "/api/metrics" {
            return;
        }

        self.http_requests_total
            .with_label_values(&[method, &status.to_string(), route])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(duration.as_secs_f64());
    }

    /// Record one proxied backend call
    pub fn record_backend_call(&self, context: &str, action: &str, outcome: &str, duration: Duration) {
        self.backend_requests_total
            .with_label_values(&[context, action, outcome])
            .inc();

        self.backend_request_duration_seconds
            .with_label_values(&[context, action])
            .observe(duration.as_secs_f64());
    }

    pub fn update_uptime(&self) {
        self.app_uptime_seconds
            .set(self.start_time.elapsed().as_secs_f64());
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_calls_rendered() {
        let metrics = AppMetrics::new().unwrap();
        metrics.record_backend_call("members", "list", "success", Duration::from_millis(40));
        metrics.record_request("GET", "/api/members", 200, Duration::from_millis(45));
        metrics.record_request("GET", "/api/metrics", 200, Duration::from_millis(1));

        let output = metrics.render().unwrap();
        assert!(output.contains("backend_requests_total"));
        assert!(output.contains(r#"context="members""#));
        assert!(output.contains(r#"route="/api/members""#));
        assert!(!output.contains(r#"route="/api/metrics""#));
    }
}
