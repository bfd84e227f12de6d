//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `AVATAR_*` environment variables, matching CLI flags,
//! and configuration files, with defaults applied by the accessors.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Default listen address.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;
/// Default directory beneath which avatars are written.
pub const DEFAULT_OUTPUT_ROOT: &str = "generated_images";

/// Settings for the avatar service and the offline generator.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "AVATAR")]
pub struct AvatarSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Root of the generated image tree.
    pub output_root: Option<PathBuf>,
    /// Font probed before the built-in candidate list.
    pub font_path: Option<PathBuf>,
    /// Fixed seed for variant selection; entropy when absent.
    pub rng_seed: Option<u64>,
}

impl AvatarSettings {
    /// Configured host, falling back to [`DEFAULT_HOST`].
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Configured port, falling back to [`DEFAULT_PORT`].
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Configured output root, falling back to [`DEFAULT_OUTPUT_ROOT`].
    pub fn output_root(&self) -> PathBuf {
        self.output_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_ROOT))
    }

    /// Configured font override, if any.
    pub fn font_path(&self) -> Option<&Path> {
        self.font_path.as_deref()
    }

    /// Resolve host and port to the first matching socket address.
    ///
    /// # Errors
    /// Returns an I/O error when the host cannot be resolved.
    pub fn bind_addr(&self) -> io::Result<SocketAddr> {
        (self.host(), self.port())
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    format!("no address for {}:{}", self.host(), self.port()),
                )
            })
    }
}
