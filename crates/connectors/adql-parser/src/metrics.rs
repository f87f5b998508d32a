//! Metrics setup and update for the service.

use prometheus::core::{AtomicU64, GenericCounter, GenericCounterVec};
use prometheus::Histogram;

#[derive(Debug, Clone)]
pub struct Metrics {
    pub translate_total: GenericCounter<AtomicU64>,
    pub translate_errors_total: GenericCounterVec<AtomicU64>,
    pub translate_duration_seconds: Histogram,
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<GenericCounter<AtomicU64>, prometheus::Error> {
    let int_counter =
        prometheus::IntCounter::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}

/// Create a new int counter metric partitioned by labels and register it with the provided
/// Prometheus Registry
fn add_int_counter_vec_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
    labels: &[&str],
) -> Result<GenericCounterVec<AtomicU64>, prometheus::Error> {
    let int_counter_vec = prometheus::IntCounterVec::new(
        prometheus::Opts::new(metric_name, metric_description),
        labels,
    )?;
    metrics_registry.register(Box::new(int_counter_vec.clone()))?;
    Ok(int_counter_vec)
}

/// Create a new histogram metric and register it with the provided Prometheus Registry
fn add_histogram_metric(
    metrics_registry: &mut prometheus::Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<Histogram, prometheus::Error> {
    let histogram = Histogram::with_opts(prometheus::HistogramOpts::new(
        metric_name,
        metric_description,
    ))?;
    metrics_registry.register(Box::new(histogram.clone()))?;
    Ok(histogram)
}

impl Metrics {
    /// Set up counters and histograms used to produce Prometheus metrics
    pub fn initialize(metrics_registry: &mut prometheus::Registry) -> Result<Self, prometheus::Error> {
        let translate_total = add_int_counter_metric(
            metrics_registry,
            "adql_parser_translate_total",
            "Total queries received for translation.",
        )?;

        let translate_errors_total = add_int_counter_vec_metric(
            metrics_registry,
            "adql_parser_translate_errors_total",
            "Total queries that failed to translate, by the stage that rejected them.",
            &["kind"],
        )?;

        let translate_duration_seconds = add_histogram_metric(
            metrics_registry,
            "adql_parser_translate_duration_seconds",
            "Time taken to translate a query, in seconds.",
        )?;

        Ok(Metrics {
            translate_total,
            translate_errors_total,
            translate_duration_seconds,
        })
    }

    /// Record the failure of one translation.
    pub fn record_failure(&self, kind: &str) {
        self.translate_errors_total.with_label_values(&[kind]).inc();
    }
}
