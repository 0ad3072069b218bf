//! Shared helpers for integration tests: real HTTP servers on ephemeral ports.

#![allow(dead_code)]

use actix_web::{App, HttpServer, web};
use infra_site_gateway::{AppState, GatewayConfig, ProxyConfig, create_app};

/// A running server and its base URL
pub struct TestServer {
    pub url: String,
}

/// Start a mock content backend configured by `configure`. Must be called
/// from within an actix system (`#[actix_web::test]`).
pub fn spawn_backend<F>(configure: F) -> TestServer
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind mock backend");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    TestServer {
        url: format!("http://{addr}"),
    }
}

/// Start the real gateway around `state`.
pub fn spawn_gateway(state: AppState) -> TestServer {
    let server = HttpServer::new(move || create_app(state.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind gateway");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    TestServer {
        url: format!("http://{addr}"),
    }
}

pub fn config_for(backend_url: &str) -> GatewayConfig {
    GatewayConfig {
        proxy: ProxyConfig::default().with_backend_url(backend_url),
        ..GatewayConfig::default()
    }
}

pub fn state_for(backend_url: &str) -> AppState {
    AppState::from_config(config_for(backend_url)).expect("build app state")
}

/// An address nothing listens on.
pub const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";
