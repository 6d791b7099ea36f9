//! HTTP server configuration object and helpers.

use std::env;
use std::net::SocketAddr;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration for the given bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self { bind_addr }
    }

    /// Read configuration from the environment.
    ///
    /// `BIND_ADDR` overrides the listen address; the default is
    /// `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when `BIND_ADDR` is not a valid socket
    /// address.
    pub fn from_env() -> std::io::Result<Self> {
        let addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
        let bind_addr = addr
            .parse()
            .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR {addr}: {e}")))?;
        Ok(Self::new(bind_addr))
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
