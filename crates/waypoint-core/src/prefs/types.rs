//! Keys stored in the preferences table.

/// Closed set of keys owned by the link resolution client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefKey {
    /// Random UUID minted once per install.
    InstallationId,
    /// Base URL discovered via the setup call.
    ControlEndpoint,
    /// Destination URL handed to the embedded browser.
    TargetLink,
    /// Opaque identifier returned by the remote service.
    ClientId,
    /// Externally supplied push token.
    PushToken,
}

impl PrefKey {
    pub const ALL: [PrefKey; 5] = [
        PrefKey::InstallationId,
        PrefKey::ControlEndpoint,
        PrefKey::TargetLink,
        PrefKey::ClientId,
        PrefKey::PushToken,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PrefKey::InstallationId => "installation_id",
            PrefKey::ControlEndpoint => "control_endpoint",
            PrefKey::TargetLink => "target_link",
            PrefKey::ClientId => "client_id",
            PrefKey::PushToken => "push_token",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl std::fmt::Display for PrefKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
