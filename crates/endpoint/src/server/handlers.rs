//! Axum request handlers for all service endpoints.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{ErrorResponse, MAP_ERROR_BODY};
use tracing::{debug, error};

use super::state::AppState;
use crate::maps::{self, MapKey};

/// `GET /{key}` — serve one map as JSON.
///
/// An unrecognised key touches no file and answers `200 OK` with an empty
/// body, which existing clients rely on. Read and decode failures answer
/// `500` with the body `err\n`; the detail goes to the log.
pub async fn map(State(state): State<AppState>, Path(segment): Path<String>) -> Response {
    let Some(key) = MapKey::from_segment(&segment) else {
        debug!(key = %segment, "unrecognised map key");
        return StatusCode::OK.into_response();
    };

    match maps::load(state.maps.clone(), key).await {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(key = %key, kind = e.kind(), error = %e, "failed to serve map");
            let status =
                StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, MAP_ERROR_BODY).into_response()
        }
    }
}

/// Catch-all 404 handler for paths that are not a single segment.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maps::source::MockMapSource;
    use crate::server::router;
    use axum::{body::Body, http::Request};
    use std::io;
    use tower::ServiceExt;

    async fn get(state: AppState, uri: &str) -> (StatusCode, Option<String>, String) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = router::build(state).oneshot(req).await.unwrap();
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_owned());
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn serving(file: &'static str, contents: &'static str) -> AppState {
        let mut mock = MockMapSource::new();
        mock.expect_read()
            .withf(move |f| f == file)
            .times(1)
            .returning(move |_| Ok(contents.as_bytes().to_vec()));
        AppState::new(mock)
    }

    #[tokio::test]
    async fn group_is_served_as_json() {
        let state = serving(
            "groups.json",
            r#"[{"name":"wheel","gid":10,"members":["root","alice"]}]"#,
        );
        let (status, content_type, body) = get(state, "/group").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));

        let groups: common::maps::Group = serde_json::from_str(&body).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "wheel");
        assert_eq!(groups[0].gid, 10);
        assert_eq!(groups[0].members, vec!["root", "alice"]);
    }

    #[tokio::test]
    async fn unknown_key_never_reads_a_file() {
        let mut mock = MockMapSource::new();
        mock.expect_read().never();
        let (status, content_type, body) = get(AppState::new(mock), "/nonexistent").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.is_none());
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn read_failure_returns_err_body() {
        let mut mock = MockMapSource::new();
        mock.expect_read()
            .withf(|f| f == "users.json")
            .returning(|_| Err(io::Error::from(io::ErrorKind::NotFound)));
        let (status, _, body) = get(AppState::new(mock), "/user").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "err\n");
    }

    #[tokio::test]
    async fn wrong_shape_returns_err_body() {
        let state = serving("groups.json", r#""wheel""#);
        let (status, _, body) = get(state, "/group").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "err\n");
    }

    #[tokio::test]
    async fn trailing_slash_is_the_same_resource() {
        let contents = r#"[{"name":"ssh","port":22,"protocols":["tcp"],"aliases":[]}]"#;
        let plain = get(serving("services.json", contents), "/services").await;
        let slashed = get(serving("services.json", contents), "/services/").await;
        assert_eq!(plain, slashed);
        assert_eq!(plain.0, StatusCode::OK);
    }

    #[tokio::test]
    async fn null_members_still_serve_group() {
        let state = serving("groups.json", r#"[{"name":"staff","gid":50,"members":null}]"#);
        let (status, _, body) = get(state, "/group").await;
        assert_eq!(status, StatusCode::OK);
        let groups: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(groups, serde_json::json!([{"name": "staff", "gid": 50, "members": []}]));
    }

    #[tokio::test]
    async fn null_lists_still_serve_services() {
        let state = serving(
            "services.json",
            r#"[{"name":"ssh","port":22,"protocols":null,"aliases":null}]"#,
        );
        let (status, _, body) = get(state, "/services").await;
        assert_eq!(status, StatusCode::OK);
        let services: common::maps::Services = serde_json::from_str(&body).unwrap();
        assert_eq!(services[0].port, 22);
        assert!(services[0].protocols.is_empty());
        assert!(services[0].aliases.is_empty());
    }
}
