//! TLS listener and the plaintext redirect companion.
//!
//! The secured variant serves the same router over TLS from a
//! deployment-provided certificate pair, while a second plaintext
//! listener answers every request with a permanent redirect to the
//! HTTPS form of the same URI.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderMap, StatusCode, Uri, header};
use axum::response::{IntoResponse, Redirect};
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::app;
use crate::config::TlsSettings;
use crate::error::FeedError;

/// Serves `router` over TLS on `addr` and runs the redirect listener.
///
/// Both binds happen up front: a listener that cannot bind is an
/// unrecoverable startup condition. Shutdown mirrors the plaintext
/// path: the interrupt broadcasts to every producer loop, then the
/// acceptor drains with a bounded grace period.
///
/// # Errors
///
/// Returns [`FeedError::Io`] if the certificate pair cannot be loaded
/// or a listener cannot bind.
pub async fn serve(
    router: Router,
    addr: SocketAddr,
    tls: &TlsSettings,
    shutdown: watch::Sender<bool>,
) -> Result<(), FeedError> {
    let rustls = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await?;
    let redirect_listener = TcpListener::bind(tls.redirect_addr).await?;

    tokio::spawn(redirect_to_https(redirect_listener, addr.port()));

    let handle = Handle::new();
    tokio::spawn({
        let handle = handle.clone();
        async move {
            app::shutdown_signal(shutdown).await;
            handle.graceful_shutdown(Some(Duration::from_secs(5)));
        }
    });

    tracing::info!(%addr, "tls server listening");
    axum_server::bind_rustls(addr, rustls)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

/// Runs the plaintext listener that redirects everything to HTTPS.
async fn redirect_to_https(listener: TcpListener, https_port: u16) {
    let redirect = move |headers: HeaderMap, uri: Uri| async move {
        match https_location(&headers, &uri, https_port) {
            Some(location) => Redirect::permanent(&location).into_response(),
            None => StatusCode::BAD_REQUEST.into_response(),
        }
    };

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "redirect listener up");
    }
    if let Err(error) = axum::serve(listener, Router::new().fallback(redirect)).await {
        tracing::error!(%error, "redirect listener failed");
    }
}

/// Rewrites a plaintext request into its HTTPS location.
fn https_location(headers: &HeaderMap, uri: &Uri, https_port: u16) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?;
    let host = host.split(':').next().unwrap_or(host);
    let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());

    if https_port == 443 {
        Some(format!("https://{host}{path_and_query}"))
    } else {
        Some(format!("https://{host}:{https_port}{path_and_query}"))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn host_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let Ok(host) = value.parse() else {
            panic!("valid header value");
        };
        headers.insert(header::HOST, host);
        headers
    }

    #[test]
    fn rewrites_to_https_with_default_port() {
        let headers = host_headers("feed.example.com:8080");
        let Ok(uri) = "/ws?x=1".parse::<Uri>() else {
            panic!("valid uri");
        };
        assert_eq!(
            https_location(&headers, &uri, 443),
            Some("https://feed.example.com/ws?x=1".to_string())
        );
    }

    #[test]
    fn keeps_explicit_https_port() {
        let headers = host_headers("feed.example.com");
        let Ok(uri) = "/".parse::<Uri>() else {
            panic!("valid uri");
        };
        assert_eq!(
            https_location(&headers, &uri, 8443),
            Some("https://feed.example.com:8443/".to_string())
        );
    }

    #[test]
    fn missing_host_header_is_rejected() {
        let headers = HeaderMap::new();
        let Ok(uri) = "/".parse::<Uri>() else {
            panic!("valid uri");
        };
        assert_eq!(https_location(&headers, &uri, 443), None);
    }
}
