//! Gatekeeper 本体: per-request の配線を axum middleware として掛ける
//!
//! 順序は固定：
//! 1. セッション更新（外部 provider、await）
//! 2. identity → Principal
//! 3. path → RouteCategory
//! 4. decide
//! 5. respond（Allow は pass-through + refreshed cookies）
//!
//! NOTE:
//! - 1 を後回しにするとクライアント/サーバのセッションがずれる。
//!   ここの順序は仕様であって最適化対象ではない。
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::gate::decision;
use crate::gate::principal::Principal;
use crate::gate::respond;
use crate::gate::routes::RouteTable;
use crate::services::session::{SessionProvider, SessionSnapshot};
use crate::state::AppState;

/// Per-request orchestrator. Holds everything the middleware needs: the
/// route table, the session provider, and the auth-cookie names to expire on
/// forced logout. Stateless across requests.
pub struct Gatekeeper {
    table: RouteTable,
    sessions: Arc<dyn SessionProvider>,
    auth_cookie_names: Vec<String>,
}

impl std::fmt::Debug for Gatekeeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gatekeeper")
            .field("provider", &self.sessions.provider_name())
            .field("auth_cookie_names", &self.auth_cookie_names)
            .finish()
    }
}

impl Gatekeeper {
    pub fn new(
        table: RouteTable,
        sessions: Arc<dyn SessionProvider>,
        auth_cookie_names: Vec<String>,
    ) -> Self {
        Self {
            table,
            sessions,
            auth_cookie_names,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }
}

/// ゲートを router 全体に掛ける。
///
/// 例：
/// ```ignore
/// let app = portal::routes();
/// let app = gate::apply(app, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // State を取るので from_fn ではなく from_fn_with_state で渡す
    router.layer(middleware::from_fn_with_state(state, gate_middleware))
}

async fn gate_middleware(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    req: Request<Body>,
    next: Next,
) -> Response {
    let gate = &state.gate;

    // 1) セッション更新。provider 障害は anonymous 扱いに落とす
    //    （protected route は sign-in に誘導されるだけで安全）。
    let snapshot = match gate.sessions.refresh_session(req.headers()).await {
        Ok(snapshot) => snapshot,
        Err(error) => {
            tracing::warn!(
                provider = gate.sessions.provider_name(),
                error = %error,
                "session refresh failed, treating requester as anonymous"
            );
            SessionSnapshot::anonymous()
        }
    };

    // 2) + 3)
    let principal = Principal::extract(snapshot.identity.as_ref());
    let path = original_uri.path();
    let category = gate.table.classify(path);

    // 4)
    let action = decision::decide(principal.as_ref(), category, path, &gate.table);

    // 5) Allow は sentinel (None)。pass-through 側にも refreshed cookies を載せる。
    match respond::respond(&action, &gate.table, &snapshot.refreshed, &gate.auth_cookie_names) {
        Some(response) => response,
        None => {
            let mut response = next.run(req).await;
            respond::append_set_cookies(response.headers_mut(), &snapshot.refreshed, &[]);
            response
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::get;
    use cookie::Cookie;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::services::session::{SessionError, SessionIdentity};

    struct StubSessions {
        result: Result<SessionSnapshot, ()>,
    }

    #[async_trait::async_trait]
    impl SessionProvider for StubSessions {
        fn provider_name(&self) -> &'static str {
            "stub"
        }

        async fn refresh_session(
            &self,
            _headers: &HeaderMap,
        ) -> Result<SessionSnapshot, SessionError> {
            match &self.result {
                Ok(snapshot) => Ok(snapshot.clone()),
                Err(()) => Err(SessionError::Unavailable("stub down".to_string())),
            }
        }
    }

    fn router_with(stub: StubSessions) -> Router {
        let gate = Gatekeeper::new(
            RouteTable::default(),
            Arc::new(stub),
            vec!["portal_session".to_string()],
        );
        let state = AppState::new(Arc::new(gate));
        let app = Router::new()
            .route("/app", get(|| async { "app" }))
            .route("/sign-in", get(|| async { "sign in" }));
        apply(app, state.clone()).with_state(state)
    }

    fn signed_in_snapshot() -> SessionSnapshot {
        SessionSnapshot {
            identity: Some(SessionIdentity {
                user_id: Uuid::new_v4(),
                role: Some("USER".to_string()),
                account_status: Some("ACTIVE".to_string()),
                onboarding_complete: Some(true),
            }),
            refreshed: vec![Cookie::new("portal_session", "renewed-token")],
        }
    }

    #[tokio::test]
    async fn pass_through_response_carries_refreshed_cookies() {
        let app = router_with(StubSessions {
            result: Ok(signed_in_snapshot()),
        });

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/app")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("refreshed cookie must ride on the pass-through response")
            .to_str()
            .unwrap();
        assert!(set_cookie.starts_with("portal_session=renewed-token"));
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_anonymous() {
        let app = router_with(StubSessions { result: Err(()) });

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/app")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        let location = response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(location, "/sign-in?redirectTo=%2Fapp");
    }
}
