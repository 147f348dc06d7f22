//! Request metrics and their Prometheus text rendering.
//!
//! Counters are updated concurrently by every in-flight request. Chat
//! outcomes are plain atomics; per-route HTTP counters sit behind a short
//! mutex since their label set is only known at runtime.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use crate::state::AppState;

/// Label every metric carries.
const APP_LABEL: &str = "chatrelay";

/// Upper bounds, in seconds, of the request duration histogram buckets.
const DURATION_BUCKETS: [f64; 5] = [0.1, 0.5, 1.0, 2.0, 5.0];

/// Route label for requests no route matched.
const UNMATCHED_ROUTE: &str = "unmatched";

/// Outcome of a `POST /chat` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatOutcome {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct RouteKey {
    method: String,
    route: String,
    status: u16,
}

#[derive(Debug, Default, Clone, Copy)]
struct RouteStats {
    count: u64,
    duration_sum: Duration,
    /// Non-cumulative hits per bucket of `DURATION_BUCKETS`.
    buckets: [u64; DURATION_BUCKETS.len()],
}

impl RouteStats {
    fn observe(&mut self, elapsed: Duration) {
        self.count += 1;
        self.duration_sum += elapsed;
        let secs = elapsed.as_secs_f64();
        if let Some(slot) = DURATION_BUCKETS.iter().position(|bound| secs <= *bound) {
            self.buckets[slot] += 1;
        }
    }
}

/// Aggregate request counters.
#[derive(Debug, Default)]
pub struct RelayMetrics {
    chat_success: AtomicU64,
    chat_error: AtomicU64,
    routes: Mutex<BTreeMap<RouteKey, RouteStats>>,
}

impl RelayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_chat(&self, outcome: ChatOutcome) {
        let counter = match outcome {
            ChatOutcome::Success => &self.chat_success,
            ChatOutcome::Error => &self.chat_error,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn chat_count(&self, outcome: ChatOutcome) -> u64 {
        match outcome {
            ChatOutcome::Success => self.chat_success.load(Ordering::Relaxed),
            ChatOutcome::Error => self.chat_error.load(Ordering::Relaxed),
        }
    }

    pub fn record_http(&self, method: &str, route: &str, status: u16, elapsed: Duration) {
        let key = RouteKey {
            method: method.to_string(),
            route: route.to_string(),
            status,
        };
        // A poisoned lock only means another request panicked mid-update;
        // the counters are still usable.
        let mut routes = self
            .routes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        routes.entry(key).or_default().observe(elapsed);
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "# HELP chat_requests_total Total number of chat requests");
        let _ = writeln!(out, "# TYPE chat_requests_total counter");
        for (label, outcome) in [("success", ChatOutcome::Success), ("error", ChatOutcome::Error)] {
            let _ = writeln!(
                out,
                "chat_requests_total{{app=\"{APP_LABEL}\",status=\"{label}\"}} {}",
                self.chat_count(outcome)
            );
        }

        let routes = self
            .routes
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone();

        let _ = writeln!(out, "# HELP http_requests_total Total number of HTTP requests");
        let _ = writeln!(out, "# TYPE http_requests_total counter");
        for (key, stats) in &routes {
            let _ = writeln!(out, "http_requests_total{{{}}} {}", labels(key), stats.count);
        }

        let _ = writeln!(
            out,
            "# HELP http_request_duration_seconds Duration of HTTP requests in seconds"
        );
        let _ = writeln!(out, "# TYPE http_request_duration_seconds histogram");
        for (key, stats) in &routes {
            let labels = labels(key);
            let mut cumulative = 0;
            for (bound, hits) in DURATION_BUCKETS.iter().zip(stats.buckets) {
                cumulative += hits;
                let _ = writeln!(
                    out,
                    "http_request_duration_seconds_bucket{{{labels},le=\"{bound}\"}} {cumulative}"
                );
            }
            let _ = writeln!(
                out,
                "http_request_duration_seconds_bucket{{{labels},le=\"+Inf\"}} {}",
                stats.count
            );
            let _ = writeln!(
                out,
                "http_request_duration_seconds_sum{{{labels}}} {}",
                stats.duration_sum.as_secs_f64()
            );
            let _ = writeln!(
                out,
                "http_request_duration_seconds_count{{{labels}}} {}",
                stats.count
            );
        }

        out
    }
}

fn labels(key: &RouteKey) -> String {
    format!(
        "app=\"{APP_LABEL}\",method=\"{}\",route=\"{}\",status=\"{}\"",
        key.method, key.route, key.status
    )
}

/// Middleware recording count and duration of every HTTP request.
///
/// Routes are labelled by their matched pattern; requests that fell
/// through to the 404 fallback are labelled `unmatched`.
pub async fn track_http(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| UNMATCHED_ROUTE.to_string(), |p| p.as_str().to_string());

    let response = next.run(request).await;

    state
        .metrics
        .record_http(&method, &route, response.status().as_u16(), started.elapsed());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_counters() {
        let metrics = RelayMetrics::new();
        metrics.record_chat(ChatOutcome::Success);
        metrics.record_chat(ChatOutcome::Success);
        metrics.record_chat(ChatOutcome::Error);
        assert_eq!(metrics.chat_count(ChatOutcome::Success), 2);
        assert_eq!(metrics.chat_count(ChatOutcome::Error), 1);
    }

    #[test]
    fn test_render_prometheus_text() {
        let metrics = RelayMetrics::new();
        metrics.record_chat(ChatOutcome::Error);
        metrics.record_http("POST", "/chat", 503, Duration::from_millis(250));
        metrics.record_http("POST", "/chat", 503, Duration::from_millis(250));

        let text = metrics.render();
        assert!(text.contains("chat_requests_total{app=\"chatrelay\",status=\"error\"} 1"));
        assert!(text.contains("chat_requests_total{app=\"chatrelay\",status=\"success\"} 0"));
        assert!(text.contains(
            "http_requests_total{app=\"chatrelay\",method=\"POST\",route=\"/chat\",status=\"503\"} 2"
        ));
        assert!(text.contains(
            "http_request_duration_seconds_sum{app=\"chatrelay\",method=\"POST\",route=\"/chat\",status=\"503\"} 0.5"
        ));
        assert!(text.contains("# TYPE http_request_duration_seconds histogram"));
    }

    #[test]
    fn test_duration_buckets_are_cumulative() {
        let metrics = RelayMetrics::new();
        for millis in [50, 100, 700, 3_000, 9_000] {
            metrics.record_http("GET", "/health", 200, Duration::from_millis(millis));
        }

        let text = metrics.render();
        let bucket = |le: &str| {
            format!(
                "http_request_duration_seconds_bucket{{app=\"chatrelay\",method=\"GET\",route=\"/health\",status=\"200\",le=\"{le}\"}}"
            )
        };
        assert!(text.contains(&format!("{} 2\n", bucket("0.1"))));
        assert!(text.contains(&format!("{} 2\n", bucket("0.5"))));
        assert!(text.contains(&format!("{} 3\n", bucket("1"))));
        assert!(text.contains(&format!("{} 3\n", bucket("2"))));
        assert!(text.contains(&format!("{} 4\n", bucket("5"))));
        assert!(text.contains(&format!("{} 5\n", bucket("+Inf"))));
        assert!(text.contains(
            "http_request_duration_seconds_count{app=\"chatrelay\",method=\"GET\",route=\"/health\",status=\"200\"} 5"
        ));
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let metrics = std::sync::Arc::new(RelayMetrics::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let metrics = std::sync::Arc::clone(&metrics);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        metrics.record_chat(ChatOutcome::Success);
                        metrics.record_http("GET", "/health", 200, Duration::ZERO);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.chat_count(ChatOutcome::Success), 800);
        assert!(metrics.render().contains("route=\"/health\",status=\"200\"} 800"));
    }
}
