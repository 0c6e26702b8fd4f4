use tide::http::headers::HeaderValue;
use tide::security::{CorsMiddleware, Origin};

#[macro_use]
pub mod utils;
pub mod v1;

pub(super) fn mount(mut route: tide::Route<crate::State>) {
    v1::mount(route.at("/v1"));
}

pub(super) fn cors() -> CorsMiddleware {
    CorsMiddleware::new()
        .allow_methods("GET, POST, OPTIONS".parse::<HeaderValue>().unwrap())
        .allow_headers("Content-Type, Authorization".parse::<HeaderValue>().unwrap())
        .allow_origin(Origin::from("*"))
        .allow_credentials(false)
}
