//! Local HTTP endpoint that records every request it receives, and a small
//! `multipart/form-data` parser to inspect what the client sent.

mod multipart;

pub use multipart::{FormPart, parse_multipart};

use {
    anyhow::{Context as _, Result},
    bytes::Bytes,
    http_body_util::{BodyExt, Full},
    hyper::{
        Method, Request, Response, StatusCode,
        body::{Body, Incoming},
        header::CONTENT_TYPE,
        server::conn::http1,
        service::service_fn,
    },
    hyper_util::rt::TokioIo,
    portpicker::pick_unused_port,
    std::{
        convert::Infallible,
        error::Error,
        future::Future,
        io,
        net::{Ipv4Addr, SocketAddr},
        sync::{Arc, Mutex, Once},
    },
    tokio::{
        io::{AsyncRead, AsyncWrite},
        net::TcpListener,
        task::JoinHandle,
    },
    tracing::{debug, warn},
    tracing_subscriber::EnvFilter,
    url::Url,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .init();
    });
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RecordedRequest {
    pub fn form_parts(&self) -> Result<Vec<FormPart>> {
        let content_type = self
            .content_type
            .as_deref()
            .context("request without content type")?;
        parse_multipart(content_type, &self.body)
    }
}

/// Accepts connections on a free local port and answers every request with a fixed status.
pub struct RecordingServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    task: JoinHandle<()>,
}

impl RecordingServer {
    pub async fn start(status: StatusCode) -> Result<Self> {
        let port = pick_unused_port().context("failed to pick port")?;
        let addr = SocketAddr::new(Ipv4Addr::LOCALHOST.into(), port);
        let listener = TcpListener::bind(addr).await?;
        let requests = Arc::<Mutex<Vec<RecordedRequest>>>::default();
        let task = tokio::spawn({
            let requests = Arc::clone(&requests);
            async move {
                loop {
                    match listener.accept().await {
                        Ok((stream, _)) => {
                            let requests = Arc::clone(&requests);
                            tokio::spawn(serve_connection(stream, move |request| {
                                record(request, Arc::clone(&requests), status)
                            }));
                        }
                        Err(err) => warn!(?err, "failed to accept connection"),
                    }
                }
            }
        });
        Ok(Self {
            addr,
            requests,
            task,
        })
    }

    pub fn url(&self) -> Url {
        format!("http://{}/upload", self.addr)
            .parse()
            .expect("valid local url")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("poisoned").clone()
    }
}

impl Drop for RecordingServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// URL on a local port nothing listens on.
pub fn unreachable_url() -> Result<Url> {
    let port = pick_unused_port().context("failed to pick port")?;
    Ok(format!("http://127.0.0.1:{port}/upload").parse()?)
}

async fn record(
    request: Request<Incoming>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    status: StatusCode,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, body) = request.into_parts();
    let body = match body.collect().await {
        Ok(body) => body.to_bytes(),
        Err(err) => {
            warn!(?err, "failed to read request body");
            return Ok(empty_response(StatusCode::BAD_REQUEST));
        }
    };
    debug!(method = %parts.method, path = %parts.uri.path(), len = body.len(), "request");
    let content_type = parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned);
    requests.lock().expect("poisoned").push(RecordedRequest {
        method: parts.method,
        path: parts.uri.path().to_owned(),
        content_type,
        body,
    });
    Ok(empty_response(status))
}

fn empty_response(status: StatusCode) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

async fn serve_connection<C, H, Fut, B>(io: C, handler: H)
where
    C: AsyncRead + AsyncWrite + Send + Unpin + 'static,
    H: Fn(Request<Incoming>) -> Fut,
    Fut: Future<Output = Result<Response<B>, Infallible>>,
    B: Body + 'static,
    <B as Body>::Error: Error + Send + Sync,
{
    let serving = http1::Builder::new()
        .keep_alive(true)
        .serve_connection(TokioIo::new(io), service_fn(handler))
        .await;
    if let Err(err) = serving {
        if let Some(err) = err.source().and_then(|err| err.downcast_ref::<io::Error>()) {
            match err.kind() {
                io::ErrorKind::NotConnected | io::ErrorKind::ConnectionReset => {
                    debug!(error = ?err, "canceled request");
                }
                _ => warn!(error = ?err, "error while serving"),
            }
        } else if err.is_incomplete_message() {
            debug!(error = ?err, "interrupted request");
        } else {
            warn!(error = ?err, "failed to serve HTTP");
        }
    }
}
