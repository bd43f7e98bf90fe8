use once_cell::sync::Lazy;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

// Global Prometheus registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

const DEFAULT_LATENCY_BUCKETS: [f64; 10] = [0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0];
const INPUT_CHARS_BUCKETS: [f64; 8] = [
    100.0, 1_000.0, 10_000.0, 50_000.0, 100_000.0, 500_000.0, 1_000_000.0, 5_000_000.0,
];

fn service_and_env() -> (String, String) {
    let service = std::env::var("APP_SERVICE")
        .ok()
        .unwrap_or_else(|| env!("APP_SERVICE_DEFAULT").to_string());
    let env_name = std::env::var("APP_ENV")
        .ok()
        .unwrap_or_else(|| env!("APP_ENV_DEFAULT").to_string());
    (service, env_name)
}

fn labelled(name: &str, help: &str) -> Opts {
    let (service, env_name) = service_and_env();
    Opts::new(name, help)
        .const_label("service", service)
        .const_label("env", env_name)
}

// Metric names and help texts are static, construction can only fail on a
// programming error.
pub static APP_INFO: Lazy<IntGauge> = Lazy::new(|| {
    let g = IntGauge::with_opts(
        labelled("app_info", "Application info gauge")
            .const_label("version", env!("CARGO_PKG_VERSION"))
            .const_label("git_sha", env!("GIT_SHA"))
            .const_label("build_time", env!("BUILD_TIME")),
    )
    .expect("valid app_info gauge");
    REGISTRY.register(Box::new(g.clone())).ok();
    g.set(1);
    g
});

pub static SPLIT_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    let c = IntCounter::with_opts(labelled("split_requests_total", "Total split and search requests"))
        .expect("valid split_requests_total counter");
    REGISTRY.register(Box::new(c.clone())).ok();
    c
});

pub static SPLIT_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let cv = IntCounterVec::new(
        labelled("split_failures_total", "Rejected split requests partitioned by error kind"),
        &["kind"],
    )
    .expect("valid split_failures_total counter");
    REGISTRY.register(Box::new(cv.clone())).ok();
    cv
});

pub static PARAGRAPHS_EMITTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    let c = IntCounter::with_opts(labelled("paragraphs_emitted_total", "Total paragraphs returned"))
        .expect("valid paragraphs_emitted_total counter");
    REGISTRY.register(Box::new(c.clone())).ok();
    c
});

pub static SEARCH_HITS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    let c = IntCounter::with_opts(labelled(
        "search_hits_total",
        "Total paragraphs flagged as containing the search term",
    ))
    .expect("valid search_hits_total counter");
    REGISTRY.register(Box::new(c.clone())).ok();
    c
});

#[doc(hidden)]
pub fn __test_parse_buckets_env(var: &str) -> Option<Vec<f64>> {
    parse_buckets_env(var)
}

fn parse_buckets_env(var: &str) -> Option<Vec<f64>> {
    match std::env::var(var) {
        Ok(val) if !val.trim().is_empty() => parse_buckets(var, &val),
        _ => None,
    }
}

fn parse_buckets(var: &str, val: &str) -> Option<Vec<f64>> {
    let mut parsed: Vec<f64> = Vec::new();
    for tok in val.split(',') {
        let t = tok.trim();
        if t.is_empty() {
            continue;
        }
        match t.parse::<f64>() {
            Ok(v) if v > 0.0 && v.is_finite() => parsed.push(v),
            _ => {
                tracing::warn!(env_var = %var, token = %t, "Invalid histogram bucket value; ignoring");
                return None;
            }
        }
    }
    if parsed.is_empty() {
        None
    } else {
        parsed.sort_by(|a, b| a.total_cmp(b));
        parsed.dedup();
        Some(parsed)
    }
}

pub static SPLIT_LATENCY_MS: Lazy<Histogram> = Lazy::new(|| {
    let buckets =
        parse_buckets_env("SPLIT_HISTO_BUCKETS").unwrap_or_else(|| DEFAULT_LATENCY_BUCKETS.to_vec());
    let opts = HistogramOpts::from(labelled("split_latency_ms", "Split and search latency in milliseconds"))
        .buckets(buckets);
    let h = Histogram::with_opts(opts).expect("valid split_latency_ms histogram");
    REGISTRY.register(Box::new(h.clone())).ok();
    h
});

pub static SPLIT_INPUT_CHARS: Lazy<Histogram> = Lazy::new(|| {
    let opts = HistogramOpts::from(labelled("split_input_chars", "Input text size in characters"))
        .buckets(INPUT_CHARS_BUCKETS.to_vec());
    let h = Histogram::with_opts(opts).expect("valid split_input_chars histogram");
    REGISTRY.register(Box::new(h.clone())).ok();
    h
});

/// Records one successful split
pub fn observe_split(input_chars: usize, paragraphs: usize, hits: usize, duration_ms: f64) {
    SPLIT_REQUESTS_TOTAL.inc();
    SPLIT_INPUT_CHARS.observe(input_chars as f64);
    PARAGRAPHS_EMITTED_TOTAL.inc_by(paragraphs as u64);
    SEARCH_HITS_TOTAL.inc_by(hits as u64);
    SPLIT_LATENCY_MS.observe(duration_ms);
}

/// Records one rejected split
pub fn observe_split_failure(kind: &str) {
    SPLIT_REQUESTS_TOTAL.inc();
    SPLIT_FAILURES_TOTAL.with_label_values(&[kind]).inc();
}

/// Forces registration so every series shows up on the first scrape
pub fn init() {
    Lazy::force(&APP_INFO);
    Lazy::force(&SPLIT_REQUESTS_TOTAL);
    Lazy::force(&SPLIT_FAILURES_TOTAL);
    Lazy::force(&PARAGRAPHS_EMITTED_TOTAL);
    Lazy::force(&SEARCH_HITS_TOTAL);
    Lazy::force(&SPLIT_LATENCY_MS);
    Lazy::force(&SPLIT_INPUT_CHARS);
}

// Exporter for Prometheus text format
pub fn export_prometheus() -> String {
    let metric_families = REGISTRY.gather();
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_ok() {
        String::from_utf8(buffer).unwrap_or_default()
    } else {
        String::new()
    }
}
