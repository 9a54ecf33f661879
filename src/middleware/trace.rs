//! Per-request tracing middleware.

use std::time::{Duration, Instant};

use tracing::info;

use crate::middleware::Middleware;
use crate::request::Request;
use crate::response::Response;

/// When the request entered the [`Trace`] middleware.
///
/// Stored in the request extensions, so handlers further down can read it.
#[derive(Clone, Copy, Debug)]
pub struct RequestStart(pub Instant);

/// Emits one `info` event per completed request:
///
/// ```text
/// INFO afterburner::middleware::trace: request completed method=GET path=/books status=200 latency_us=41
/// ```
///
/// Add it first so the measured latency covers every other middleware.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Middleware for Trace {
    fn process_request(&self, req: &mut Request) {
        req.extensions_mut().insert(RequestStart(Instant::now()));
    }

    fn process_response(&self, req: &Request, res: &mut Response) {
        let latency = req.extensions()
            .get::<RequestStart>()
            .map_or(Duration::ZERO, |start| start.0.elapsed());

        info!(
            method = req.method(),
            path = req.path(),
            status = res.status(),
            latency_us = latency.as_micros() as u64,
            "request completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::Pipeline;

    #[test]
    fn records_start_instant_for_downstream_handlers() {
        let pipeline = Pipeline::new().with(Trace);
        let mut req = Request::new("GET", "/");
        let res = pipeline
            .run(&mut req, |req| {
                assert!(req.extensions().get::<RequestStart>().is_some());
                Ok(Response::new())
            })
            .unwrap();
        assert_eq!(res.status(), 200);
        assert!(req.extensions().get::<RequestStart>().is_some());
    }
}
