//! Default values for node configuration records.
//!
//! The defaults match a freshly opened configuration panel: vmess over
//! plain tcp, no TLS, everything else empty.

use crate::model::{Flow, Network, NodeConfig, ObfuscationType, Protocol, Security, TlsMode};

/// Returns a fresh [`NodeConfig`] with panel-open defaults.
///
/// Backs both `Default for NodeConfig` and `FormSession::open`.
#[must_use]
pub fn node() -> NodeConfig {
    NodeConfig {
        protocol: Protocol::Vmess,
        name: String::new(),
        host: String::new(),
        port: 0,
        id: String::new(),
        alter_id: 0,
        security: Security::Auto,
        tls: TlsMode::None,
        sni: None,
        flow: Flow::None,
        allow_insecure: false,
        network: Network::Tcp,
        obfuscation_type: ObfuscationType::None,
        host_header: None,
        alpn: None,
        path: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_node_matches_panel_defaults() {
        let n = node();
        assert_eq!(n.protocol, Protocol::Vmess);
        assert_eq!(n.network, Network::Tcp);
        assert_eq!(n.tls, TlsMode::None);
        assert_eq!(n.obfuscation_type, ObfuscationType::None);
        assert!(n.host.is_empty());
        assert_eq!(n, NodeConfig::default());
    }
}
