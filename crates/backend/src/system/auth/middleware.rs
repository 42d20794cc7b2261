use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};

/// Middleware that requires valid JWT authentication
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req)?;
    let claims = super::jwt::validate_token(&token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Middleware that requires admin privileges
pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let token = bearer_token(&req)?;
    let claims = super::jwt::validate_token(&token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    if !claims.is_admin {
        return Err(StatusCode::FORBIDDEN);
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn bearer_token(req: &Request<Body>) -> Result<String, StatusCode> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::to_owned)
        .ok_or(StatusCode::UNAUTHORIZED)
}
