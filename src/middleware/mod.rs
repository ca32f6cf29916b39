use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{
        HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
        ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, VARY,
    },
    http::Method,
    web, Error, HttpResponse,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use crate::AppState;

const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Adds CORS headers to every response of the wrapped resource and answers
/// `OPTIONS` requests itself with an empty 200.
pub struct CorsHeaders {
    allowed_methods: &'static [&'static str],
}

impl CorsHeaders {
    pub fn new(allowed_methods: &'static [&'static str]) -> Self {
        CorsHeaders { allowed_methods }
    }
}

impl<S, B> Transform<S, ServiceRequest> for CorsHeaders
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = CorsHeadersMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(CorsHeadersMiddleware {
            service,
            allowed_methods: self.allowed_methods.join(", "),
        })
    }
}

pub struct CorsHeadersMiddleware<S> {
    service: S,
    allowed_methods: String,
}

/// Picks the `Access-Control-Allow-Origin` value. `ALLOWED_ORIGINS` is either
/// `*` or a comma-separated list; a listed request origin is echoed back and
/// anything else gets no header.
pub fn resolve_allowed_origin(allowed_origins: &str, request_origin: Option<&str>) -> Option<String> {
    if allowed_origins.trim() == "*" {
        return Some("*".to_string());
    }
    let request_origin = request_origin?;
    allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .find(|o| *o == request_origin)
        .map(str::to_string)
}

fn apply_cors_headers(headers: &mut HeaderMap, origin: Option<&str>, methods: &str) {
    if let Some(origin) = origin {
        match HeaderValue::from_str(origin) {
            Ok(value) => {
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
                if origin != "*" {
                    headers.insert(VARY, HeaderValue::from_static("Origin"));
                }
            }
            Err(_) => log::warn!("Origin '{}' is not a valid header value.", origin),
        }
    }
    if let Ok(value) = HeaderValue::from_str(methods) {
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, value);
    }
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOWED_HEADERS));
}

impl<S, B> Service<ServiceRequest> for CorsHeadersMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_origin = req.headers().get(ORIGIN).and_then(|v| v.to_str().ok());
        let origin = match req.app_data::<web::Data<AppState>>() {
            Some(state) => resolve_allowed_origin(&state.allowed_origins, request_origin),
            None => Some("*".to_string()),
        };
        let methods = self.allowed_methods.clone();

        if req.method() == Method::OPTIONS {
            return Box::pin(async move {
                let (http_req, _payload) = req.into_parts();
                let mut res = HttpResponse::Ok().finish();
                apply_cors_headers(res.headers_mut(), origin.as_deref(), &methods);
                Ok(ServiceResponse::new(http_req, res.map_into_right_body()))
            });
        }

        let fut = self.service.call(req);
        Box::pin(async move {
            let mut res = fut.await?;
            apply_cors_headers(res.headers_mut(), origin.as_deref(), &methods);
            Ok(res.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_allows_every_origin() {
        assert_eq!(resolve_allowed_origin("*", None).as_deref(), Some("*"));
        assert_eq!(resolve_allowed_origin(" * ", Some("https://a.com")).as_deref(), Some("*"));
    }

    #[test]
    fn listed_origin_is_echoed_back() {
        let allowed = "https://a.com, https://b.com";
        assert_eq!(
            resolve_allowed_origin(allowed, Some("https://b.com")).as_deref(),
            Some("https://b.com")
        );
        assert_eq!(resolve_allowed_origin(allowed, Some("https://evil.com")), None);
        assert_eq!(resolve_allowed_origin(allowed, None), None);
    }
}
