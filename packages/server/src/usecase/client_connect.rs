//! UseCase: client-connect handshake (MOTD + version compatibility).

use std::sync::Arc;

use crate::domain::MotdRepository;

use super::error::ConnectError;

/// Oldest client version the server still accepts submissions from.
pub const OLDEST_VALID_CLIENT_VERSION: &str = "0.3.1";

/// Latest released client version.
pub const CURRENT_CLIENT_VERSION: &str = "0.4.5";

/// Handshake response data for a connecting game client.
#[derive(Debug, PartialEq)]
pub struct ClientConnectInfo {
    pub motd: String,
    pub valid_version: bool,
    pub update_available: bool,
}

/// Resolves the MOTD and compares the client's version against the
/// supported range.
pub struct ClientConnectUseCase {
    motd: Arc<dyn MotdRepository>,
}

impl ClientConnectUseCase {
    pub fn new(motd: Arc<dyn MotdRepository>) -> Self {
        Self { motd }
    }

    pub async fn execute(&self, client_version: &str) -> Result<ClientConnectInfo, ConnectError> {
        let version = parse_version(client_version)
            .ok_or_else(|| ConnectError::InvalidVersion(client_version.to_string()))?;

        // The constants are compile-time literals; parse failure here
        // would be a build defect, so fall back to "always valid".
        let oldest_valid = parse_version(OLDEST_VALID_CLIENT_VERSION).unwrap_or((0, 0, 0));
        let current = parse_version(CURRENT_CLIENT_VERSION).unwrap_or((0, 0, 0));

        let motd = self.motd.get().await?;

        Ok(ClientConnectInfo {
            motd: motd.message,
            valid_version: version >= oldest_valid,
            update_available: version < current,
        })
    }
}

/// Parse a dotted `major.minor.patch` version string. Tuples compare
/// lexicographically, which is exactly the version order we need.
fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    let patch = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor, patch))
}
