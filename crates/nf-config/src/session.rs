//! Form session lifecycle.
//!
//! A [`FormSession`] exclusively owns one in-memory [`NodeConfig`] from
//! panel open to close: created with defaults (or an existing record when
//! editing), mutated field by field, reset on cancel, and handed off whole
//! on confirm. All mutation is synchronous; the host re-reads
//! [`FormSession::visibility`] after every change.

use nf_types::FormError;

use crate::model::{
    Flow, Network, NodeConfig, ObfuscationType, Protocol, Security, TlsMode,
};
use crate::validator;
use crate::visibility::{self, VisibilitySet};

#[derive(Debug, Clone)]
pub struct FormSession {
    initial: NodeConfig,
    config: NodeConfig,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::open()
    }
}

impl FormSession {
    /// Start a session with panel-open defaults.
    #[must_use]
    pub fn open() -> Self {
        Self::open_with(NodeConfig::default())
    }

    /// Start a session editing an existing record. `reset` returns to
    /// this snapshot.
    #[must_use]
    pub fn open_with(config: NodeConfig) -> Self {
        Self {
            initial: config.clone(),
            config,
        }
    }

    /// Read-only snapshot of the current record.
    #[must_use]
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Visibility of every field for the current record.
    #[must_use]
    pub fn visibility(&self) -> VisibilitySet {
        visibility::resolve(&self.config)
    }

    pub fn set_protocol(&mut self, protocol: Protocol) {
        self.config.protocol = protocol;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.config.name = name.into();
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.config.host = host.into();
    }

    pub fn set_port(&mut self, port: u16) {
        self.config.port = port;
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.config.id = id.into();
    }

    pub fn set_alter_id(&mut self, alter_id: u16) {
        self.config.alter_id = alter_id;
    }

    pub fn set_security(&mut self, security: Security) {
        self.config.security = security;
    }

    pub fn set_tls(&mut self, tls: TlsMode) {
        self.config.tls = tls;
    }

    pub fn set_sni(&mut self, sni: impl Into<String>) {
        self.config.sni = non_empty(sni.into());
    }

    pub fn set_flow(&mut self, flow: Flow) {
        self.config.flow = flow;
    }

    pub fn set_allow_insecure(&mut self, allow: bool) {
        self.config.allow_insecure = allow;
    }

    /// Change the transport. An obfuscation selection that is not valid
    /// for the new transport is reset to `none` rather than left stale.
    pub fn set_network(&mut self, network: Network) {
        self.config.network = network;
        if !self.config.obfuscation_type.is_valid_for(network) {
            self.config.obfuscation_type = ObfuscationType::None;
        }
    }

    pub fn set_obfuscation_type(&mut self, obfuscation: ObfuscationType) {
        self.config.obfuscation_type = obfuscation;
    }

    pub fn set_host_header(&mut self, host_header: impl Into<String>) {
        self.config.host_header = non_empty(host_header.into());
    }

    pub fn set_alpn(&mut self, alpn: impl Into<String>) {
        self.config.alpn = non_empty(alpn.into());
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.config.path = non_empty(path.into());
    }

    /// Discard edits: back to the `open`-time snapshot (close / cancel).
    pub fn reset(&mut self) {
        self.config = self.initial.clone();
    }

    /// Validate and hand off the record for submission.
    ///
    /// Any error-level issue blocks. On success the returned record has
    /// every hidden field cleared to its default, so residual state from
    /// protocol or transport changes never reaches the collaborator.
    pub fn submit(&self) -> Result<NodeConfig, FormError> {
        let report = validator::validate(&self.config);
        if !report.ok {
            let mut errors = report.errors();
            let first = errors
                .next()
                .map(|i| i.field.to_string())
                .unwrap_or_default();
            return Err(FormError::Blocked {
                errors: 1 + errors.count(),
                first,
            });
        }
        Ok(visibility::masked_for_submit(&self.config))
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldId;
    use crate::visibility::Visibility;

    fn filled_session() -> FormSession {
        let mut s = FormSession::open();
        s.set_host("example.com");
        s.set_port(443);
        s.set_id("b831381d-6324-4d53-ad4f-8cda48b30811");
        s
    }

    #[test]
    fn opens_with_panel_defaults() {
        let s = FormSession::open();
        assert_eq!(s.config(), &NodeConfig::default());
        assert_eq!(s.visibility().get(FieldId::Tls), Visibility::Required);
    }

    #[test]
    fn network_change_resets_invalid_obfuscation() {
        let mut s = FormSession::open();
        s.set_network(Network::Kcp);
        s.set_obfuscation_type(ObfuscationType::Wireguard);
        s.set_network(Network::Ws);
        assert_eq!(s.config().obfuscation_type, ObfuscationType::None);
    }

    #[test]
    fn network_change_keeps_valid_obfuscation() {
        let mut s = FormSession::open();
        s.set_network(Network::Kcp);
        s.set_obfuscation_type(ObfuscationType::Srtp);
        s.set_network(Network::Tcp);
        // srtp is valid for tcp too
        assert_eq!(s.config().obfuscation_type, ObfuscationType::Srtp);
    }

    #[test]
    fn reset_returns_to_open_snapshot() {
        let existing = NodeConfig {
            host: "node.example".into(),
            port: 8443,
            id: "user".into(),
            tls: TlsMode::Tls,
            ..NodeConfig::default()
        };
        let mut s = FormSession::open_with(existing.clone());
        s.set_host("edited.example");
        s.set_tls(TlsMode::Xtls);
        s.reset();
        assert_eq!(s.config(), &existing);
    }

    #[test]
    fn submit_blocks_on_empty_required() {
        let s = FormSession::open();
        let err = s.submit().unwrap_err();
        match err {
            FormError::Blocked { errors, first } => {
                assert_eq!(errors, 2); // host, id
                assert_eq!(first, "host");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn submit_hands_off_masked_record() {
        let mut s = filled_session();
        s.set_tls(TlsMode::Tls);
        s.set_sni("sni.example");
        s.set_tls(TlsMode::None); // sni control now hidden, value stale
        let submitted = s.submit().unwrap();
        assert_eq!(submitted.sni, None);
        assert_eq!(submitted.host, "example.com");
    }

    #[test]
    fn empty_optional_strings_store_as_none() {
        let mut s = filled_session();
        s.set_path("  ");
        assert_eq!(s.config().path, None);
        s.set_path("/ws");
        assert_eq!(s.config().path.as_deref(), Some("/ws"));
    }
}
