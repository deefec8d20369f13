use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_cookies::CookieManagerLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        auth::{login, logout, register},
        health::healthz,
        notes::{create_note, delete_note, get_note, list_notes, update_note},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/healthz", get(healthz))
        // Account routes
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        // Note routes
        .route("/notes", get(list_notes).post(create_note))
        .route(
            "/notes/{id}",
            get(get_note).put(update_note).delete(delete_note),
        )
        .layer(cors)
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use tower_cookies::Key;

    use crate::storage::sqlite::SqliteStore;

    use super::*;

    async fn test_app() -> Router {
        let store = Arc::new(SqliteStore::new_in_memory().await.unwrap());
        create_app(AppState::new(store, Key::generate()))
    }

    fn form_request(uri: &str, method: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    /// Extract the session cookie pair from a login response.
    fn session_cookie(response: &Response) -> String {
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("response carries no Set-Cookie header")
            .to_str()
            .unwrap();
        set_cookie
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    /// Register and log in a user, returning the session cookie.
    async fn login_as(app: &Router, email: &str, password: &str) -> String {
        let response = app
            .clone()
            .oneshot(form_request(
                "/register",
                "POST",
                &format!("email={email}&password={password}"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(form_request(
                "/login",
                "POST",
                &format!("email={email}&password={password}"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        session_cookie(&response)
    }

    fn with_session(mut request: Request<Body>, cookie: &str) -> Request<Body> {
        request
            .headers_mut()
            .insert(header::COOKIE, cookie.parse().unwrap());
        request
    }

    #[tokio::test]
    async fn test_healthz() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_full_note_lifecycle() {
        let app = test_app().await;
        let cookie = login_as(&app, "user@example.com", "secret1").await;

        // Create
        let response = app
            .clone()
            .oneshot(with_session(
                form_request("/notes", "POST", "content=hello"),
                &cookie,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let note = json_body(response).await;
        assert_eq!(note["content"], "hello");
        let note_id = note["id"].as_i64().unwrap();

        // List
        let response = app
            .clone()
            .oneshot(with_session(
                Request::builder().uri("/notes").body(Body::empty()).unwrap(),
                &cookie,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let notes = json_body(response).await;
        assert_eq!(notes.as_array().unwrap().len(), 1);

        // Update
        let response = app
            .clone()
            .oneshot(with_session(
                form_request(&format!("/notes/{note_id}"), "PUT", "content=world"),
                &cookie,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = json_body(response).await;
        assert_eq!(updated["content"], "world");

        // Delete
        let response = app
            .clone()
            .oneshot(with_session(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/notes/{note_id}"))
                    .body(Body::empty())
                    .unwrap(),
                &cookie,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Gone
        let response = app
            .oneshot(with_session(
                Request::builder()
                    .uri(format!("/notes/{note_id}"))
                    .body(Body::empty())
                    .unwrap(),
                &cookie,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_login_returns_the_registered_identity() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(form_request(
                "/register",
                "POST",
                "email=user@example.com&password=secret1",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let registered = json_body(response).await;

        let response = app
            .oneshot(form_request(
                "/login",
                "POST",
                "email=user@example.com&password=secret1",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let logged_in = json_body(response).await;

        assert_eq!(registered["id"], logged_in["id"]);
        assert_eq!(logged_in["email"], "user@example.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let app = test_app().await;

        let body = "email=dup@example.com&password=secret1";
        let response = app
            .clone()
            .oneshot(form_request("/register", "POST", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(form_request("/register", "POST", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let app = test_app().await;

        let response = app
            .oneshot(form_request(
                "/register",
                "POST",
                "email=a@example.com&password=short",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let app = test_app().await;
        login_as(&app, "known@example.com", "secret1").await;

        let unknown_email = app
            .clone()
            .oneshot(form_request(
                "/login",
                "POST",
                "email=unknown@example.com&password=secret1",
            ))
            .await
            .unwrap();

        let wrong_password = app
            .oneshot(form_request(
                "/login",
                "POST",
                "email=known@example.com&password=wrong-password",
            ))
            .await
            .unwrap();

        // Unknown email and wrong password must be indistinguishable.
        assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

        let a = unknown_email.into_body().collect().await.unwrap().to_bytes();
        let b = wrong_password.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_notes_require_authentication() {
        let app = test_app().await;

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/notes").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(form_request("/notes", "POST", "content=nope"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_tampered_session_cookie_is_rejected() {
        let app = test_app().await;
        let cookie = login_as(&app, "user@example.com", "secret1").await;

        // Flip part of the cookie value; the signature no longer matches.
        let tampered = format!("{}x", cookie);
        let response = app
            .oneshot(with_session(
                Request::builder().uri("/notes").body(Body::empty()).unwrap(),
                &tampered,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_note_rejects_bad_content() {
        let app = test_app().await;
        let cookie = login_as(&app, "user@example.com", "secret1").await;

        // Whitespace only
        let response = app
            .clone()
            .oneshot(with_session(
                form_request("/notes", "POST", "content=+++"),
                &cookie,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Over the length limit
        let long = "x".repeat(2001);
        let response = app
            .oneshot(with_session(
                form_request("/notes", "POST", &format!("content={long}")),
                &cookie,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_filters_notes() {
        let app = test_app().await;
        let cookie = login_as(&app, "user@example.com", "secret1").await;

        for content in ["content=Buy+groceries", "content=Call+dentist"] {
            let response = app
                .clone()
                .oneshot(with_session(form_request("/notes", "POST", content), &cookie))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .oneshot(with_session(
                Request::builder()
                    .uri("/notes?q=GROCERIES")
                    .body(Body::empty())
                    .unwrap(),
                &cookie,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let notes = json_body(response).await;
        assert_eq!(notes.as_array().unwrap().len(), 1);
        assert_eq!(notes[0]["content"], "Buy groceries");
    }

    #[tokio::test]
    async fn test_users_cannot_touch_each_others_notes() {
        let app = test_app().await;
        let alice = login_as(&app, "alice@example.com", "secret1").await;
        let bob = login_as(&app, "bob@example.com", "secret2").await;

        let response = app
            .clone()
            .oneshot(with_session(
                form_request("/notes", "POST", "content=private"),
                &alice,
            ))
            .await
            .unwrap();
        let note = json_body(response).await;
        let note_id = note["id"].as_i64().unwrap();

        // Bob sees 404, not 403: foreign notes look nonexistent.
        for request in [
            Request::builder()
                .uri(format!("/notes/{note_id}"))
                .body(Body::empty())
                .unwrap(),
            form_request(&format!("/notes/{note_id}"), "PUT", "content=stolen"),
            Request::builder()
                .method("DELETE")
                .uri(format!("/notes/{note_id}"))
                .body(Body::empty())
                .unwrap(),
        ] {
            let response = app.clone().oneshot(with_session(request, &bob)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn test_logout_always_succeeds() {
        let app = test_app().await;

        // Even without a session
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // With one, the cookie is removed
        let cookie = login_as(&app, "user@example.com", "secret1").await;
        let response = app
            .oneshot(with_session(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .body(Body::empty())
                    .unwrap(),
                &cookie,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let removal = session_cookie(&response);
        assert!(removal.starts_with("notesync_session="));
    }
}
