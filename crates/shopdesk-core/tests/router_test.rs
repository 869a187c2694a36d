//! Navigation guard sequencing against a mocked identity endpoint.

use std::sync::Arc;

use shopdesk_core::auth::{MemoryTokenStore, SessionManager};
use shopdesk_core::router::{NavigationDecision, NavigationGuard, RouteName, RouteTable, Router, RouterError};
use shopdesk_core::ApiClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn user_json() -> serde_json::Value {
    serde_json::json!({"id": 1, "name": "Admin", "email": "admin@example.com"})
}

fn router_for(server: &MockServer, token: Option<&str>) -> (Arc<SessionManager>, Router) {
    let tokens = Arc::new(match token {
        Some(t) => MemoryTokenStore::with_token(t),
        None => MemoryTokenStore::new(),
    });
    let api = ApiClient::new(&format!("{}/api", server.uri()), tokens).unwrap();
    let session = Arc::new(SessionManager::new(api));
    let router = Router::admin(session.clone());
    (session, router)
}

async fn mount_me(server: &MockServer, status: u16, expected_calls: u64) {
    let response = if status == 200 {
        ResponseTemplate::new(200).set_body_json(user_json())
    } else {
        ResponseTemplate::new(status)
    };
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(response)
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn protected_route_without_session_redirects_to_login() {
    let server = MockServer::start().await;
    // Once for the protected route, once more when landing on login
    mount_me(&server, 401, 2).await;

    let (session, router) = router_for(&server, Some("expired"));
    let route = router.navigate("/category").await.unwrap();

    assert!(route.is(RouteName::Login));
    assert_eq!(route.path, "/login");
    assert_eq!(route.redirected_from.as_deref(), Some("/category"));
    assert!(!session.is_logged_in());
}

#[tokio::test]
async fn protected_route_with_valid_token_fetches_identity_once() {
    let server = MockServer::start().await;
    mount_me(&server, 200, 1).await;

    let (session, router) = router_for(&server, Some("good"));

    let route = router.navigate("/category").await.unwrap();
    assert!(route.is(RouteName::Category));
    assert_eq!(route.redirected_from, None);
    assert!(session.is_logged_in());

    // Cached user: no further identity round trips
    let route = router.navigate("/product").await.unwrap();
    assert!(route.is(RouteName::Product));
}

#[tokio::test]
async fn root_redirects_to_dashboard_when_logged_in() {
    let server = MockServer::start().await;
    mount_me(&server, 200, 1).await;

    let (_session, router) = router_for(&server, Some("good"));
    let route = router.navigate("/").await.unwrap();

    assert!(route.is(RouteName::Dashboard));
    assert_eq!(route.redirected_from.as_deref(), Some("/"));
}

#[tokio::test]
async fn login_route_with_cached_user_redirects_without_fetching() {
    let server = MockServer::start().await;
    // The only identity fetch is the one that warms the cache
    mount_me(&server, 200, 1).await;

    let (session, router) = router_for(&server, Some("good"));
    session.fetch_me().await.unwrap();

    let route = router.navigate("/login").await.unwrap();
    assert!(route.is(RouteName::Dashboard));
    assert_eq!(route.redirected_from.as_deref(), Some("/login"));
}

#[tokio::test]
async fn login_route_with_valid_token_skips_login_page() {
    let server = MockServer::start().await;
    mount_me(&server, 200, 1).await;

    let (_session, router) = router_for(&server, Some("good"));
    let route = router.push(RouteName::Login).await.unwrap();

    assert!(route.is(RouteName::Dashboard));
}

#[tokio::test]
async fn login_route_without_session_shows_login() {
    let server = MockServer::start().await;
    mount_me(&server, 401, 1).await;

    let (_session, router) = router_for(&server, None);
    let route = router.navigate("/login").await.unwrap();

    assert!(route.is(RouteName::Login));
    assert_eq!(route.redirected_from, None);
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let server = MockServer::start().await;
    mount_me(&server, 200, 0).await;

    let (_session, router) = router_for(&server, None);
    let err = router.navigate("/settings").await.unwrap_err();
    assert_eq!(err, RouterError::NotFound("/settings".to_string()));
}

#[tokio::test]
async fn guard_decisions() {
    let server = MockServer::start().await;
    mount_me(&server, 500, 1).await;

    let (session, _router) = router_for(&server, Some("t"));
    let guard = NavigationGuard::new(session);
    let table = RouteTable::admin();

    let protected = table.resolve("/dashboard").unwrap();
    assert_eq!(guard.before_each(&protected).await, NavigationDecision::Redirect(RouteName::Login));
}

#[tokio::test]
async fn guard_redirect_loop_is_detected() {
    use shopdesk_core::router::RouteRecord;

    let server = MockServer::start().await;
    mount_me(&server, 200, 0).await;

    let (session, _router) = router_for(&server, None);
    let table = RouteTable::new(vec![
        RouteRecord::new("/a").redirect("/b"),
        RouteRecord::new("/b").redirect("/a"),
    ]);
    let router = Router::new(table, NavigationGuard::new(session));

    let err = router.navigate("/a").await.unwrap_err();
    assert_eq!(err, RouterError::RedirectLoop("/a".to_string()));
}
