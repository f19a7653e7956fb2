//! Access check middleware for axum routers

use axum::{
	extract::{Request, State},
	http::StatusCode,
	middleware::Next,
	response::Response,
};

use crate::app::Um;
use crate::prelude::*;
use umgate_core::decision::{Decision, Denial};

/// Name of the authenticated user, inserted into request extensions by
/// whatever authenticates the request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser(pub Box<str>);

/// Refuse requests the access policy denies.
///
/// Use with `axum::middleware::from_fn_with_state`. Requests without an
/// [`AuthUser`] get 401, denied ones 403, and paths hidden by a `NONE`
/// access limit 404.
pub async fn require_access(
	State(um): State<Um>,
	req: Request,
	next: Next,
) -> Result<Response, StatusCode> {
	let Some(AuthUser(user)) = req.extensions().get::<AuthUser>().cloned() else {
		debug!("UM: no authenticated user for <{}>", req.uri().path());
		return Err(StatusCode::UNAUTHORIZED);
	};

	match um.evaluate(&user, req.uri().path()) {
		Decision::Allow(_) => Ok(next.run(req).await),
		Decision::Deny(Denial::PathHidden) => Err(StatusCode::NOT_FOUND),
		Decision::Deny(reason) => {
			warn!(user = %user, path = %req.uri().path(), reason = %reason, "Access denied");
			Err(StatusCode::FORBIDDEN)
		}
	}
}

// vim: ts=4
