// Session state: bearer token, expiry and selected tenant.
//
// All state sits behind one async mutex held across the credential exchange,
// so at most one exchange is in flight per session. Callers queued behind a
// failed exchange receive that failure instead of starting another one.
// Nothing is written until the exchange future completes, so dropping a
// caller mid-exchange leaves the session as it was.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::auth::{AccessToken, TokenSource};
use crate::error::Error;

/// A bearer credential handed out for one request.
pub struct Bearer {
    secret: SecretString,
    generation: u64,
}

impl Bearer {
    pub fn expose(&self) -> &str {
        self.secret.expose_secret()
    }

    /// Identifies the token this bearer came from.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Debug for Bearer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bearer")
            .field("secret", &"[REDACTED]")
            .field("generation", &self.generation)
            .finish()
    }
}

#[derive(Default)]
struct SessionState {
    token: Option<AccessToken>,
    /// Bumped on every successful exchange.
    generation: u64,
    /// Tenant selected under the current token.
    tenant: Option<String>,
    /// Error of the latest exchange, replayed to callers queued behind it.
    last_failure: Option<Error>,
}

impl SessionState {
    fn bearer(&self, now: Instant) -> Option<Bearer> {
        self.token
            .as_ref()
            .filter(|token| token.is_valid_at(now))
            .map(|token| Bearer {
                secret: SecretString::from(token.secret().expose_secret().to_owned()),
                generation: self.generation,
            })
    }
}

/// Owns the session of one client. Safe to share across tasks.
pub struct SessionManager {
    source: Arc<dyn TokenSource>,
    state: Mutex<SessionState>,
    /// Completed exchanges, successful or not.
    exchanges: AtomicU64,
}

impl SessionManager {
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self {
            source,
            state: Mutex::new(SessionState::default()),
            exchanges: AtomicU64::new(0),
        }
    }

    /// Return a valid bearer, exchanging credentials first if needed.
    ///
    /// A no-op when the current token is outside the expiry safety margin.
    /// Never retries: a failed exchange is returned to the caller and to every
    /// caller that was already waiting on it.
    pub async fn ensure_authenticated(&self) -> Result<Bearer, Error> {
        let observed = self.exchanges.load(Ordering::Acquire);
        let mut state = self.state.lock().await;

        if let Some(bearer) = state.bearer(Instant::now()) {
            return Ok(bearer);
        }

        if self.exchanges.load(Ordering::Acquire) != observed {
            if let Some(failure) = &state.last_failure {
                debug!("credential exchange we waited on failed");
                return Err(failure.clone());
            }
        }

        debug!("access token missing or expired, exchanging credentials");
        let issued_at = Instant::now();
        let outcome = self.source.fetch_token().await;
        self.exchanges.fetch_add(1, Ordering::AcqRel);

        match outcome {
            Ok(response) => {
                state.token = Some(AccessToken::from_response(response, issued_at));
                state.generation += 1;
                state.tenant = None;
                state.last_failure = None;
                state
                    .bearer(issued_at)
                    .ok_or_else(|| Error::Authentication {
                        status: 200,
                        message: "token lifetime is shorter than the expiry safety margin"
                            .into(),
                    })
            }
            Err(err) => {
                warn!(error = %err, "credential exchange failed");
                state.last_failure = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Whether a token is held and outside the safety margin.
    pub async fn is_authenticated(&self) -> bool {
        self.state.lock().await.bearer(Instant::now()).is_some()
    }

    /// Tenant selected under the current token, if any.
    pub async fn selected_tenant(&self) -> Option<String> {
        let state = self.state.lock().await;
        state.bearer(Instant::now())?;
        state.tenant.clone()
    }

    /// Record a successful tenant selection made with `bearer`.
    ///
    /// Ignored when the token has been replaced since.
    pub(crate) async fn record_tenant(&self, bearer: &Bearer, name: &str) {
        let mut state = self.state.lock().await;
        if state.generation == bearer.generation {
            state.tenant = Some(name.to_owned());
        }
    }

    /// Drop the token and tenant so the next call re-authenticates.
    pub async fn invalidate(&self) {
        let mut state = self.state.lock().await;
        state.token = None;
        state.tenant = None;
    }

    /// Number of completed credential exchanges.
    pub fn exchange_count(&self) -> u64 {
        self.exchanges.load(Ordering::Acquire)
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("exchanges", &self.exchange_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::auth::TokenResponse;

    /// Counts calls and answers from a fixed script.
    struct Scripted {
        calls: AtomicUsize,
        lifetime_secs: u64,
        failure: Option<Error>,
        delay: Duration,
    }

    impl Scripted {
        fn ok(lifetime_secs: u64) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                lifetime_secs,
                failure: None,
                delay: Duration::from_millis(20),
            })
        }

        fn failing(err: Error) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                lifetime_secs: 0,
                failure: Some(err),
                delay: Duration::from_millis(20),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TokenSource for Scripted {
        async fn fetch_token(&self) -> Result<TokenResponse, Error> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::time::sleep(self.delay).await;
            if let Some(ref err) = self.failure {
                return Err(err.clone());
            }
            Ok(TokenResponse {
                access_token: SecretString::from(format!("token-{n}")),
                expires_in: self.lifetime_secs,
                token_type: "Bearer".into(),
            })
        }
    }

    #[tokio::test]
    async fn fresh_token_is_reused() {
        let source = Scripted::ok(3600);
        let session = SessionManager::new(source.clone());

        let first = session.ensure_authenticated().await.unwrap();
        let second = session.ensure_authenticated().await.unwrap();

        assert_eq!(source.calls(), 1);
        assert_eq!(first.expose(), "token-1");
        assert_eq!(second.expose(), "token-1");
        assert_eq!(first.generation(), second.generation());
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_exchange() {
        let source = Scripted::ok(3600);
        let session = SessionManager::new(source.clone());

        let (a, b, c) = tokio::join!(
            session.ensure_authenticated(),
            session.ensure_authenticated(),
            session.ensure_authenticated()
        );

        assert_eq!(source.calls(), 1);
        assert_eq!(a.unwrap().expose(), "token-1");
        assert_eq!(b.unwrap().expose(), "token-1");
        assert_eq!(c.unwrap().expose(), "token-1");
    }

    #[tokio::test]
    async fn queued_callers_observe_the_failure() {
        let source = Scripted::failing(Error::Authentication {
            status: 401,
            message: "invalid_client".into(),
        });
        let session = SessionManager::new(source.clone());

        let (a, b) = tokio::join!(session.ensure_authenticated(), session.ensure_authenticated());

        assert_eq!(source.calls(), 1);
        assert!(matches!(a, Err(Error::Authentication { status: 401, .. })));
        assert!(matches!(b, Err(Error::Authentication { status: 401, .. })));
        assert!(!session.is_authenticated().await);

        // A later caller starts a fresh exchange.
        assert!(session.ensure_authenticated().await.is_err());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn queued_callers_keep_the_error_class() {
        let source = Scripted::failing(Error::HttpStatus {
            status: 503,
            body: "down".into(),
        });
        let session = SessionManager::new(source.clone());

        let (a, b) = tokio::join!(session.ensure_authenticated(), session.ensure_authenticated());

        assert_eq!(source.calls(), 1);
        for outcome in [a, b] {
            let err = outcome.unwrap_err();
            assert!(
                matches!(err, Error::HttpStatus { status: 503, ref body } if body == "down"),
                "{err:?}"
            );
            assert!(err.is_transient());
            assert!(!err.is_auth_error());
        }
    }

    #[tokio::test]
    async fn queued_callers_see_timeouts_as_timeouts() {
        let source = Scripted::failing(Error::Timeout { timeout_secs: 4 });
        let session = SessionManager::new(source.clone());

        let (a, b) = tokio::join!(session.ensure_authenticated(), session.ensure_authenticated());

        assert_eq!(source.calls(), 1);
        assert!(matches!(a, Err(Error::Timeout { timeout_secs: 4 })));
        assert!(matches!(b, Err(Error::Timeout { timeout_secs: 4 })));
    }

    #[tokio::test(start_paused = true)]
    async fn token_inside_the_margin_is_refreshed() {
        let source = Scripted::ok(90);
        let session = SessionManager::new(source.clone());

        session.ensure_authenticated().await.unwrap();
        tokio::time::advance(Duration::from_secs(59)).await;
        session.ensure_authenticated().await.unwrap();
        assert_eq!(source.calls(), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        let refreshed = session.ensure_authenticated().await.unwrap();
        assert_eq!(source.calls(), 2);
        assert_eq!(refreshed.expose(), "token-2");
    }

    #[tokio::test]
    async fn refresh_clears_the_tenant() {
        let source = Scripted::ok(3600);
        let session = SessionManager::new(source.clone());

        let bearer = session.ensure_authenticated().await.unwrap();
        session.record_tenant(&bearer, "Retail").await;
        assert_eq!(session.selected_tenant().await.as_deref(), Some("Retail"));

        session.invalidate().await;
        assert_eq!(session.selected_tenant().await, None);

        let fresh = session.ensure_authenticated().await.unwrap();
        assert_eq!(session.selected_tenant().await, None);

        // A selection made with the old token is not recorded.
        session.record_tenant(&bearer, "Retail").await;
        assert_eq!(session.selected_tenant().await, None);
        session.record_tenant(&fresh, "Lab").await;
        assert_eq!(session.selected_tenant().await.as_deref(), Some("Lab"));
    }

    #[tokio::test]
    async fn cancelled_exchange_leaves_state_untouched() {
        let source = Arc::new(Scripted {
            calls: AtomicUsize::new(0),
            lifetime_secs: 3600,
            failure: None,
            delay: Duration::from_secs(5),
        });
        let session = SessionManager::new(source.clone());

        let timed_out =
            tokio::time::timeout(Duration::from_millis(10), session.ensure_authenticated()).await;
        assert!(timed_out.is_err());
        assert_eq!(source.calls(), 1);
        assert_eq!(session.exchange_count(), 0);
        assert!(!session.is_authenticated().await);
    }
}
