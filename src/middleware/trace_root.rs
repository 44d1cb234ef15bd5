use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Instrument;

use crate::{
    middleware::normalize_uri,
    utils::{root_span::SamplingPriority, RootSpan},
};

pub(crate) async fn trace_root(mut req: Request, next: Next) -> Response {
    let root_span = RootSpan::new(req.method().as_str(), &normalize_uri(req.uri().path()));

    req.extensions_mut().insert(root_span.clone());

    let resp = next.run(req).instrument(root_span.span().clone()).await;

    let status = resp.status();
    root_span.record().http_status_code(&status);

    if status.is_server_error() {
        root_span
            .record()
            .status("error")
            .sampling_priority(SamplingPriority::One);
    } else if status.is_client_error() {
        root_span.record().status("rejected");
    } else {
        root_span.record().status("ok");
    }

    resp
}
