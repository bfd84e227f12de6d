//! HTTP server configuration object and helpers.

use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use avatar_backend::settings::AvatarSettings;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) output_root: PathBuf,
    pub(crate) font_path: Option<PathBuf>,
    pub(crate) rng_seed: Option<u64>,
}

impl ServerConfig {
    /// Construct a configuration writing beneath `output_root`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, output_root: impl Into<PathBuf>) -> Self {
        Self {
            bind_addr,
            output_root: output_root.into(),
            font_path: None,
            rng_seed: None,
        }
    }

    /// Derive a configuration from loaded settings.
    ///
    /// # Errors
    /// Returns an I/O error when the configured host does not resolve.
    pub fn from_settings(settings: &AvatarSettings) -> io::Result<Self> {
        Ok(Self::new(settings.bind_addr()?, settings.output_root())
            .with_font_path(settings.font_path().map(Path::to_path_buf))
            .with_rng_seed(settings.rng_seed))
    }

    /// Probe `path` before the built-in font candidates.
    #[must_use]
    pub fn with_font_path(mut self, path: Option<PathBuf>) -> Self {
        self.font_path = path;
        self
    }

    /// Seed variant selection so runs are reproducible.
    #[must_use]
    pub const fn with_rng_seed(mut self, seed: Option<u64>) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Return the root of the generated image tree.
    #[must_use]
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }
}
