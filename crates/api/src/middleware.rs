use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use shopcart_core::MemberId;
use shopcart_infra::MemberService;

use crate::app::errors::ApiError;
use crate::context::MemberContext;

pub const MEMBER_HEADER: &str = "x-member-id";

#[derive(Clone)]
pub struct MemberState {
    pub members: MemberService,
}

/// Resolve the calling member from the `X-Member-Id` header.
///
/// A missing, malformed or unknown id is rejected with 401 before the
/// handler runs.
pub async fn member_middleware(
    State(state): State<MemberState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let member_id = extract_member_id(req.headers())?;

    match state.members.exists(member_id).await {
        Ok(true) => {}
        Ok(false) => return Err(StatusCode::UNAUTHORIZED),
        Err(e) => return Ok(ApiError::from(e).into_response()),
    }

    req.extensions_mut().insert(MemberContext::new(member_id));

    Ok(next.run(req).await)
}

fn extract_member_id(headers: &HeaderMap) -> Result<MemberId, StatusCode> {
    let header = headers.get(MEMBER_HEADER).ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    header.parse().map_err(|_| StatusCode::UNAUTHORIZED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(MEMBER_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn member_id_is_read_from_header() {
        assert_eq!(extract_member_id(&headers_with(" 7 ")), Ok(MemberId::new(7)));
    }

    #[test]
    fn missing_or_malformed_header_is_unauthorized() {
        assert_eq!(extract_member_id(&HeaderMap::new()), Err(StatusCode::UNAUTHORIZED));
        assert_eq!(extract_member_id(&headers_with("abc")), Err(StatusCode::UNAUTHORIZED));
        assert_eq!(extract_member_id(&headers_with("0")), Err(StatusCode::UNAUTHORIZED));
    }
}
