//! Prometheus metrics for request traffic and quiz activity.

use std::{sync::LazyLock, time::Instant};

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use qc_engine::{Correctness, QuestionType};
use regex::Regex;

static UUID_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("uuid pattern is valid")
});

static NUMERIC_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+").expect("numeric pattern is valid"));

/// Install the Prometheus recorder and return the handle used to render `/metrics`.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Full("http_request_duration_seconds".to_string()),
        &[
            0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ],
    )?;

    Ok(builder.install_recorder()?)
}

/// Middleware recording request counts, latencies and in-flight requests.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let in_flight = gauge!(
        "http_requests_in_flight",
        "method" => method.clone(),
        "path" => path.clone()
    );
    in_flight.increment(1.0);

    let response = next.run(req).await;

    in_flight.decrement(1.0);

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.clone()
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => method,
        "path" => path,
        "status" => status
    )
    .record(duration);

    response
}

/// Replace ids in a path with `:id` to keep label cardinality bounded.
fn normalize_path(path: &str) -> String {
    let normalized = UUID_SEGMENT.replace_all(path, ":id");
    NUMERIC_SEGMENT
        .replace_all(&normalized, "/:id")
        .into_owned()
}

pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (StatusCode::OK, handle.render())
}

/// Record one scored attempt.
pub fn record_attempt(question_type: QuestionType, correctness: Correctness, points: i64) {
    counter!(
        "attempts_scored_total",
        "question_type" => question_type.as_str(),
        "correctness" => correctness.as_str()
    )
    .increment(1);

    if let Ok(points) = u64::try_from(points) {
        counter!("attempt_points_total").increment(points);
    }
}

/// Record a random question request and whether a card was found.
pub fn record_question_selection(found: bool) {
    let outcome = if found { "found" } else { "empty" };

    counter!("question_selections_total", "outcome" => outcome).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path("/flashcards/550e8400-e29b-41d4-a716-446655440000"),
            "/flashcards/:id"
        );
        assert_eq!(
            normalize_path("/flashcards/550e8400-e29b-41d4-a716-446655440000/attempts"),
            "/flashcards/:id/attempts"
        );
        assert_eq!(normalize_path("/legacy/123"), "/legacy/:id");
        assert_eq!(normalize_path("/questions/random"), "/questions/random");
    }
}
