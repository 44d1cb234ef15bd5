use axum::{extract::Request, middleware::Next, response::Response};

use opentelemetry::KeyValue;
use tokio::time::Instant;
use tracing::{debug, info_span, instrument};

use crate::{middleware::normalize_uri, utils::metrics};

fn status_group(code: u16) -> &'static str {
    match code {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "unknown",
    }
}

#[instrument(name = "middleware::record_metrics", skip_all)]
pub(crate) async fn record_metrics(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let uri = normalize_uri(request.uri().path());

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed();

    let status = response.status();
    let status_str = status.as_str().to_string();
    let status_group = status_group(status.as_u16());

    debug!(?elapsed, %method, %uri, %status_str, %status_group, "request finished");

    let attributes = [
        KeyValue::new("method", method),
        KeyValue::new("uri", uri),
        KeyValue::new("status_group", status_group),
        KeyValue::new("http_status_code", status_str),
    ];

    info_span!("record metric REQUEST_COUNTER")
        .in_scope(|| metrics::REQUEST_COUNTER.add(1.0, &attributes));

    info_span!("record metric HTTP_REQUEST_DURATION_HISTOGRAM").in_scope(|| {
        metrics::HTTP_REQUEST_DURATION_HISTOGRAM.record(elapsed.as_millis() as f64, &attributes)
    });

    response
}

#[cfg(test)]
mod tests {
    use super::status_group;

    #[test]
    fn test_status_group() {
        assert_eq!(status_group(201), "2xx");
        assert_eq!(status_group(404), "4xx");
        assert_eq!(status_group(503), "5xx");
        assert_eq!(status_group(101), "unknown");
    }
}
