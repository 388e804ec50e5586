//! HTTP server configuration loaded via OrthoConfig.
//!
//! Values are layered from configuration files, `SHIPMENTS_*` environment
//! variables and CLI flags; later layers win.

use std::io;
use std::net::SocketAddr;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_DATA_FILE: &str = "./db.json";

/// Raw settings as supplied by the operator.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SHIPMENTS")]
pub struct ServerSettings {
    /// Socket address to listen on.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// Path of the JSON document holding users and shipments.
    #[ortho_config(default = DEFAULT_DATA_FILE.to_owned())]
    pub data_file: String,
}

impl ServerSettings {
    /// Validate the settings.
    ///
    /// # Errors
    /// Returns [`io::ErrorKind::InvalidInput`] when the bind address does not
    /// parse or the data file path is blank.
    pub fn resolve(&self) -> io::Result<ServerConfig> {
        let raw_addr = self.bind_addr.as_str();
        let bind_addr = raw_addr.trim().parse::<SocketAddr>().map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw_addr:?}: {err}"),
            )
        })?;

        let data_file = self.data_file.trim();
        if data_file.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "data file path must not be blank",
            ));
        }

        Ok(ServerConfig {
            bind_addr,
            data_file: Utf8PathBuf::from(data_file),
        })
    }
}

/// Validated configuration for creating the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) data_file: Utf8PathBuf,
}

impl ServerConfig {
    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Read by tests; the server destructures the config")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the JSON data file location.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Read by tests; the server destructures the config")
    )]
    #[must_use]
    pub fn data_file(&self) -> &Utf8Path {
        &self.data_file
    }
}
