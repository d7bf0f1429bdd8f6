use std::net::SocketAddr;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

use crate::prelude::Result;

use files::{DirRoot, ResolveAsset};

mod files;
mod http;

const MAX_HEAD_BYTES: usize = 8192;

/// Owns the listening socket for its whole lifetime; bound once at startup,
/// released when the process goes down.
pub struct Server {
    ln: TcpListener,
    root: DirRoot,
}

impl Server {
    pub async fn bind(port: u16, root: &str) -> Result<Server> {
        let ln = TcpListener::bind(&format!("0.0.0.0:{}", port)).await?;
        Ok(Server {
            ln,
            root: DirRoot::new(root),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.ln.local_addr()?)
    }

    pub async fn start(self) -> Result<()> {
        println!("Serving at http://localhost:{}", self.local_addr()?.port());
        println!("CORS headers are enabled. Your logo should now appear correctly.");
        tokio::select! {
            r = self.accept() => r,
            _ = tokio::signal::ctrl_c() => Ok(())
        }
    }

    async fn accept(&self) -> Result<()> {
        tracing::debug!("accepting connections");
        loop {
            let (socket, _) = self.ln.accept().await?;
            let root = self.root.clone();
            tokio::spawn(async move {
                if handle_connection(socket, root).await.is_err() {
                    tracing::error!("error handling connection");
                }
            });
        }
    }
}

async fn handle_connection<T>(mut socket: TcpStream, root: T) -> Result<()>
where
    T: ResolveAsset + Send + Sync + 'static,
{
    let mut head = Vec::new();
    let mut buf = vec![0; 1024];
    loop {
        let n = socket.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") || head.len() > MAX_HEAD_BYTES {
            break;
        }
    }
    if head.is_empty() {
        return Ok(());
    }
    let response = match http::extract_request_line(&head) {
        Some((method, target)) if method == "GET" || method == "HEAD" => {
            tracing::debug!("{} {}", method, target);
            match root.resolve(&target).await {
                Ok(Some(asset)) => {
                    let mut response =
                        http::response_head("200 OK", asset.content_type, asset.bytes.len())
                            .into_bytes();
                    if method == "GET" {
                        response.extend_from_slice(&asset.bytes);
                    }
                    response
                }
                Ok(None) => http::not_found_response()?.into_bytes(),
                Err(e) => {
                    tracing::error!("error resolving {}: {}", target, e);
                    http::server_error_response().into_bytes()
                }
            }
        }
        Some((method, _)) => {
            tracing::warn!("unsupported method: {}", method);
            http::not_implemented_response().into_bytes()
        }
        None => http::bad_request_response().into_bytes(),
    };
    socket.write_all(&response).await?;
    socket.shutdown().await?;
    Ok(())
}
