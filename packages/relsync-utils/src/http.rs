use bytes::{Bytes, BytesMut};
use http_body_util::{BodyExt, Full};
use hyper::{Method, StatusCode, Uri};
#[cfg(not(feature = "rustls-platform-verifier"))]
use hyper_rustls::ConfigBuilderExt;
use hyper_util::{
    client::legacy::{
        connect::{Connect, HttpConnector},
        Client,
    },
    rt::TokioExecutor,
};
use once_cell::sync::Lazy;
use rustls::ClientConfig;
#[cfg(feature = "rustls-platform-verifier")]
use rustls_platform_verifier::BuilderVerifierExt;
use std::{collections::HashMap, fmt};
use thiserror::Error;

pub type HeaderMap = HashMap<String, String>;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: hyper::http::uri::InvalidUri,
    },
    #[error("failed to build request: {0}")]
    Request(#[from] hyper::http::Error),
    #[error("tls configuration failed: {0}")]
    Tls(Box<dyn std::error::Error + Send + Sync>),
    #[error("request failed: {0}")]
    Client(#[from] hyper_util::client::legacy::Error),
    #[error("failed to read response body: {0}")]
    Body(#[from] hyper::Error),
}

#[derive(Debug)]
pub struct ResponseData {
    pub status: u16,
    pub body: Option<Bytes>,
}

impl ResponseData {
    pub fn is(&self, status: StatusCode) -> bool {
        self.status == status.as_u16()
    }

    pub fn body_text(&self) -> String {
        self.body.as_ref().map_or_else(
            || "".to_string(),
            |body| String::from_utf8_lossy(body).to_string(),
        )
    }
}

impl fmt::Display for ResponseData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Response status: {}, body: {}",
            self.status,
            self.body_text()
        )
    }
}

pub async fn get(url: &str, header_map: &HeaderMap) -> Result<ResponseData, HttpError> {
    send(Method::GET, url, header_map, None).await
}

pub async fn post(
    url: &str,
    header_map: &HeaderMap,
    body: Bytes,
) -> Result<ResponseData, HttpError> {
    send(Method::POST, url, header_map, Some(body)).await
}

pub async fn delete(url: &str, header_map: &HeaderMap) -> Result<ResponseData, HttpError> {
    send(Method::DELETE, url, header_map, None).await
}

/// Sends one request and collects the whole response body.
///
/// `https` urls go through the rustls connector, everything else through a
/// plain [`HttpConnector`]. The body is only read once a response exists.
pub async fn send(
    method: Method,
    url: &str,
    header_map: &HeaderMap,
    body: Option<Bytes>,
) -> Result<ResponseData, HttpError> {
    let uri: Uri = url.parse().map_err(|source| HttpError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let mut req = hyper::Request::builder().method(method).uri(uri.clone());
    for (key, value) in header_map {
        req = req.header(key, value);
    }
    let req = req.body(Full::new(body.unwrap_or_default()))?;

    if uri.scheme_str() == Some("https") {
        let client = Client::builder(TokioExecutor::new()).build(https_config()?);
        _send(client, req).await
    } else {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        _send(client, req).await
    }
}

async fn _send<C>(
    client: Client<C, Full<Bytes>>,
    req: hyper::Request<Full<Bytes>>,
) -> Result<ResponseData, HttpError>
where
    C: Connect + Clone + Send + Sync + 'static,
{
    let mut res = client.request(req).await?;
    let status = res.status();
    let mut body = BytesMut::new();
    while let Some(next) = res.frame().await {
        let frame = next?;
        if let Some(chunk) = frame.data_ref() {
            body.extend_from_slice(chunk);
        }
    }
    Ok(ResponseData {
        status: status.as_u16(),
        body: Some(body.freeze()),
    })
}

static PROVIDER: Lazy<std::sync::Arc<rustls::crypto::CryptoProvider>> =
    Lazy::new(|| std::sync::Arc::new(rustls::crypto::ring::default_provider()));

fn https_config() -> Result<hyper_rustls::HttpsConnector<HttpConnector>, HttpError> {
    let provider = PROVIDER.clone();
    let tls: rustls::ClientConfig;
    #[cfg(feature = "rustls-platform-verifier")]
    {
        tls = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| HttpError::Tls(Box::new(e)))?
            .with_platform_verifier()
            .map_err(|e| HttpError::Tls(Box::new(e)))?
            .with_no_client_auth();
    }
    #[cfg(all(feature = "webpki-roots", not(feature = "rustls-platform-verifier")))]
    {
        tls = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| HttpError::Tls(Box::new(e)))?
            .with_webpki_roots()
            .with_no_client_auth();
    }
    #[cfg(all(
        feature = "native-tokio",
        not(feature = "webpki-roots"),
        not(feature = "rustls-platform-verifier")
    ))]
    {
        tls = ClientConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()
            .map_err(|e| HttpError::Tls(Box::new(e)))?
            .with_native_roots()
            .map_err(|e| HttpError::Tls(Box::new(e)))?
            .with_no_client_auth();
    }
    #[cfg(all(
        not(feature = "native-tokio"),
        not(feature = "webpki-roots"),
        not(feature = "rustls-platform-verifier")
    ))]
    {
        compile_error!("No TLS backend enabled");
    }
    Ok(hyper_rustls::HttpsConnectorBuilder::new()
        .with_tls_config(tls)
        .https_or_http()
        .enable_http1()
        .build())
}

pub fn http_status_is_ok(status: u16) -> bool {
    if let Ok(status) = StatusCode::from_u16(status) {
        !(status.is_client_error() || status.is_server_error())
    } else {
        false
    }
}
