use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpResponse,
};
use futures::future::{ready, LocalBoxFuture, Ready};

/// Sends plain-HTTP requests to the same path on the HTTPS port with a 307,
/// so the method and body are preserved by the client.
pub struct HttpsRedirect {
    port: u16,
}

impl HttpsRedirect {
    pub fn new(port: u16) -> Self {
        Self { port }
    }
}

impl<S, B> Transform<S, ServiceRequest> for HttpsRedirect
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = HttpsRedirectService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(HttpsRedirectService {
            service,
            port: self.port,
        }))
    }
}

pub struct HttpsRedirectService<S> {
    service: S,
    port: u16,
}

/// `https://host[:port]/path?query` for the incoming request.
fn https_location(host: &str, port: u16, path_and_query: &str) -> String {
    // Drop any port from the Host header; IPv6 literals keep their brackets.
    let hostname = match host.rfind(':') {
        Some(idx) if !host[idx..].contains(']') => &host[..idx],
        _ => host,
    };

    if port == 443 {
        format!("https://{}{}", hostname, path_and_query)
    } else {
        format!("https://{}:{}{}", hostname, port, path_and_query)
    }
}

impl<S, B> Service<ServiceRequest> for HttpsRedirectService<S>
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
        if req.connection_info().scheme() == "https" {
            let fut = self.service.call(req);
            return Box::pin(async move {
                let res = fut.await?;
                Ok(res.map_into_left_body())
            });
        }

        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");
        let location = https_location(req.connection_info().host(), self.port, path_and_query);

        let res = HttpResponse::TemporaryRedirect()
            .insert_header((header::LOCATION, location))
            .finish();
        Box::pin(ready(Ok(req.into_response(res).map_into_right_body())))
    }
}
