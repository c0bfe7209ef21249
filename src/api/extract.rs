//! Request extractors shared by the write endpoints.

use axum::{
    Form, Json,
    extract::{ConnectInfo, FromRequest, FromRequestParts, Multipart, Request},
    http::{header, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::net::SocketAddr;
use std::sync::Arc;

use super::{ApiError, AppState};

/// Decodes the body as JSON or multipart form data when the request says
/// so, otherwise as an urlencoded form.
#[derive(Debug)]
pub struct FormOrJson<T>(pub T);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Multipart,
    Form,
}

fn body_kind(req: &Request) -> BodyKind {
    let Some(m) = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<mime::Mime>().ok())
    else {
        return BodyKind::Form;
    };

    if m.type_() == mime::APPLICATION
        && (m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON))
    {
        BodyKind::Json
    } else if m.type_() == mime::MULTIPART && m.subtype() == mime::FORM_DATA {
        BodyKind::Multipart
    } else {
        BodyKind::Form
    }
}

/// Collects the text parts of a multipart body into a JSON object of
/// strings. A repeated name keeps its last value.
async fn multipart_fields(mut multipart: Multipart) -> Result<Map<String, Value>, ApiError> {
    let mut fields = Map::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::malformed(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let text = field
            .text()
            .await
            .map_err(|e| ApiError::malformed(e.body_text()))?;
        fields.insert(name, Value::String(text));
    }
    Ok(fields)
}

impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Json => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::malformed(e.body_text()))?;
                Ok(Self(value))
            }
            BodyKind::Multipart => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::malformed(e.body_text()))?;
                let fields = multipart_fields(multipart).await?;
                let value = serde_json::from_value(Value::Object(fields))
                    .map_err(|e| ApiError::malformed(e.to_string()))?;
                Ok(Self(value))
            }
            BodyKind::Form => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::malformed(e.body_text()))?;
                Ok(Self(value))
            }
        }
    }
}

/// Address of the client that sent the request.
///
/// The socket peer is used unless it is one of `server.trusted_proxy_ips`,
/// in which case the first `X-Forwarded-For` entry wins. Without a socket
/// peer (in-process calls) the header is used when present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub String);

fn forwarded_for(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn resolve_client_ip(peer: Option<SocketAddr>, forwarded: Option<String>, trusted: &[String]) -> String {
    match peer {
        Some(addr) => {
            let peer_ip = addr.ip().to_string();
            if trusted.iter().any(|t| t == &peer_ip) {
                forwarded.unwrap_or(peer_ip)
            } else {
                peer_ip
            }
        }
        None => forwarded.unwrap_or_else(|| "unknown".to_string()),
    }
}

impl FromRequestParts<Arc<AppState>> for ClientIp {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        let trusted = state.config().read().await.server.trusted_proxy_ips.clone();

        Ok(Self(resolve_client_ip(peer, forwarded_for(parts), &trusted)))
    }
}
