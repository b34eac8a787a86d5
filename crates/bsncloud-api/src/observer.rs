// Request/response hooks
//
// Every API call made by `BsnClient` is reported to the configured
// observer. The token exchange is not. The default observer does nothing.

use reqwest::Method;
use tracing::trace;
use url::Url;

/// Hooks invoked around every HTTP exchange.
///
/// Both methods default to no-ops, so implementors override only what they
/// need. Observers run inline on the request path and must not block.
pub trait RequestObserver: Send + Sync {
    fn on_request(&self, _method: &Method, _url: &Url) {}

    fn on_response(&self, _method: &Method, _url: &Url, _status: u16, _body: &[u8]) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {}

/// Observer that logs each exchange, including the full body, at `trace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, method: &Method, url: &Url) {
        trace!(%method, %url, "request");
    }

    fn on_response(&self, method: &Method, url: &Url, status: u16, body: &[u8]) {
        trace!(
            %method,
            %url,
            status,
            body = %String::from_utf8_lossy(body),
            "response"
        );
    }
}
