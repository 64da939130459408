//! HTTP route handlers

use super::AppState;
use crate::calculator::calculate;
use crate::render::{render_index_page, render_result_page, ResultPage};
use crate::session::{now_timestamp, session_cookie, session_token_from_headers};
use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Form, Query, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

// ============================================================================
// Health Check
// ============================================================================

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.sessions.len()
    }))
}

// ============================================================================
// Pages
// ============================================================================

fn html_response(html: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/html; charset=UTF-8"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        html,
    )
        .into_response()
}

pub async fn index(State(state): State<AppState>) -> Response {
    html_response(render_index_page(state.locale))
}

/// Calculator parameters, from the query string or a form body
#[derive(Debug, Default)]
pub struct CalcParams {
    pub a: Option<String>,
    pub b: Option<String>,
    pub op: Option<String>,
}

impl CalcParams {
    /// Pick `a`, `b` and `op` out of decoded key/value pairs.
    ///
    /// A repeated key keeps its first value, like a servlet's `getParameter`.
    fn from_pairs(pairs: Vec<(String, String)>) -> CalcParams {
        let mut params = CalcParams::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "a" => &mut params.a,
                "b" => &mut params.b,
                "op" => &mut params.op,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Fill absent fields from `fallback`
    fn or(self, fallback: CalcParams) -> CalcParams {
        CalcParams {
            a: self.a.or(fallback.a),
            b: self.b.or(fallback.b),
            op: self.op.or(fallback.op),
        }
    }
}

type RawPairs = Vec<(String, String)>;

fn query_params(query: Result<Query<RawPairs>, QueryRejection>) -> CalcParams {
    match query {
        Ok(Query(pairs)) => CalcParams::from_pairs(pairs),
        Err(e) => {
            tracing::debug!("Ignoring malformed query string: {}", e);
            CalcParams::default()
        }
    }
}

pub async fn calculate_get(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<RawPairs>, QueryRejection>,
) -> Response {
    process(&state, &headers, query_params(query))
}

pub async fn calculate_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<RawPairs>, QueryRejection>,
    form: Result<Form<RawPairs>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(pairs)) => CalcParams::from_pairs(pairs),
        Err(e) => {
            tracing::debug!("Ignoring unreadable form body: {}", e);
            CalcParams::default()
        }
    };
    process(&state, &headers, form.or(query_params(query)))
}

/// Record the access in the session, run the calculation and render the page.
///
/// The session field is overwritten before the inputs are looked at, so every
/// request moves the timestamp whether or not the calculation succeeds.
fn process(state: &AppState, headers: &HeaderMap, params: CalcParams) -> Response {
    let token = session_token_from_headers(headers, &state.cookie_name);
    let visit = state.sessions.visit(token.as_deref(), now_timestamp());

    if visit.created {
        tracing::debug!("Created session {}", &visit.token[..8]);
    }

    let outcome = calculate(
        params.a.as_deref(),
        params.b.as_deref(),
        params.op.as_deref(),
    );

    match &outcome {
        Ok(calc) => tracing::debug!(
            "Calculated {} {:?} {} = {}",
            calc.a,
            calc.op,
            calc.b,
            calc.result
        ),
        Err(e) => tracing::debug!("Calculation rejected: {}", e),
    }

    let html = render_result_page(&ResultPage {
        locale: state.locale,
        outcome: &outcome,
        previous_access: visit.previous_access.as_deref(),
        current_access: &visit.current_access,
        raw_a: params.a.as_deref(),
        raw_b: params.b.as_deref(),
        raw_op: params.op.as_deref(),
    });

    let mut response = html_response(html);
    if visit.created {
        match HeaderValue::from_str(&session_cookie(&state.cookie_name, &visit.token)) {
            Ok(cookie) => {
                response.headers_mut().insert(header::SET_COOKIE, cookie);
            }
            Err(e) => tracing::warn!("Failed to build session cookie: {}", e),
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_fallback() {
        let body = CalcParams {
            a: Some("1".to_string()),
            b: None,
            op: None,
        };
        let query = CalcParams {
            a: Some("9".to_string()),
            b: Some("2".to_string()),
            op: None,
        };

        let merged = body.or(query);
        assert_eq!(merged.a.as_deref(), Some("1"));
        assert_eq!(merged.b.as_deref(), Some("2"));
        assert_eq!(merged.op, None);
    }

    #[test]
    fn test_params_first_value_wins() {
        let pairs = vec![
            ("a".to_string(), "1".to_string()),
            ("x".to_string(), "ignored".to_string()),
            ("a".to_string(), "2".to_string()),
            ("op".to_string(), "add".to_string()),
        ];

        let params = CalcParams::from_pairs(pairs);
        assert_eq!(params.a.as_deref(), Some("1"));
        assert_eq!(params.b, None);
        assert_eq!(params.op.as_deref(), Some("add"));
    }
}
