//! Field visibility resolver.
//!
//! Which form fields apply to a node is a pure function of the record
//! itself: `resolve` maps a (possibly partial) [`NodeConfig`] to a
//! [`VisibilitySet`] assigning every field one of hidden / optional /
//! required. The panel host renders visible inputs and blocks submission
//! on required-but-empty; the resolver itself never fails.
//!
//! A rule never reads a field that is itself hidden; when it would, the
//! hidden field is seen as its default value. This keeps the set
//! well-defined when stale values linger in the record (e.g. `tls` rules
//! while the whole tls row is hidden by a dtls disguise).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::{FieldId, Network, NodeConfig, ObfuscationType, Protocol, TlsMode};

/// Applicability of a single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Hidden,
    Optional,
    Required,
}

impl Visibility {
    #[must_use]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Resolved applicability for every field of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VisibilitySet(BTreeMap<FieldId, Visibility>);

impl VisibilitySet {
    #[must_use]
    pub fn get(&self, field: FieldId) -> Visibility {
        self.0.get(&field).copied().unwrap_or(Visibility::Hidden)
    }

    #[must_use]
    pub fn is_visible(&self, field: FieldId) -> bool {
        self.get(field).is_visible()
    }

    /// Fields that must be non-empty for submission.
    #[must_use]
    pub fn required(&self) -> Vec<FieldId> {
        self.0
            .iter()
            .filter(|(_, v)| **v == Visibility::Required)
            .map(|(f, _)| *f)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, Visibility)> + '_ {
        self.0.iter().map(|(f, v)| (*f, *v))
    }
}

/// The meaning the overloaded `path` field takes per transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PathRole {
    /// mKCP obfuscation seed.
    Seed,
    /// HTTP path for ws / h2.
    Path,
    /// gRPC service name.
    ServiceName,
}

impl PathRole {
    /// Input label used by hosts rendering the `path` control.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Seed => "Seed",
            Self::Path => "Path",
            Self::ServiceName => "ServiceName",
        }
    }
}

/// Role of the `path` field for a transport; `None` when the field does
/// not apply (plain tcp).
#[must_use]
pub fn path_role(network: Network) -> Option<PathRole> {
    match network {
        Network::Kcp => Some(PathRole::Seed),
        Network::Ws | Network::H2 => Some(PathRole::Path),
        Network::Grpc => Some(PathRole::ServiceName),
        Network::Tcp => None,
    }
}

/// Valid `obfuscationType` options for a transport.
#[must_use]
pub fn valid_obfuscations(network: Network) -> &'static [ObfuscationType] {
    ObfuscationType::options_for(network)
}

/// Values of the fields other rules read, with hidden fields collapsed
/// to their defaults.
fn effective(cfg: &NodeConfig) -> (ObfuscationType, TlsMode) {
    let obfuscation = if matches!(cfg.network, Network::Tcp | Network::Kcp) {
        cfg.obfuscation_type
    } else {
        ObfuscationType::None
    };
    // The whole tls row is hidden under a dtls disguise; dependents then
    // see tls at its default.
    let tls = if obfuscation == ObfuscationType::Dtls {
        TlsMode::None
    } else {
        cfg.tls
    };
    (obfuscation, tls)
}

/// Resolve the visibility of every form field for the given record.
///
/// Pure and idempotent: no side effects, equal inputs yield equal sets.
#[must_use]
pub fn resolve(cfg: &NodeConfig) -> VisibilitySet {
    use Visibility::{Hidden, Optional, Required};

    let (obfuscation, tls) = effective(cfg);
    let vmess = cfg.protocol == Protocol::Vmess;
    let obfuscatable = matches!(cfg.network, Network::Tcp | Network::Kcp);
    let host_header = matches!(cfg.network, Network::Ws | Network::H2)
        || tls == TlsMode::Tls
        || (cfg.network == Network::Tcp && obfuscation == ObfuscationType::Http);

    let show = |cond: bool| if cond { Optional } else { Hidden };

    let mut set = BTreeMap::new();
    set.insert(FieldId::Protocol, Required);
    set.insert(FieldId::Name, Optional);
    set.insert(FieldId::Host, Required);
    set.insert(FieldId::Port, Required);
    set.insert(FieldId::Id, Required);
    set.insert(FieldId::AlterId, show(vmess));
    set.insert(FieldId::Security, show(vmess));
    set.insert(
        FieldId::Tls,
        if obfuscation == ObfuscationType::Dtls {
            Hidden
        } else {
            Required
        },
    );
    set.insert(FieldId::Sni, show(tls != TlsMode::None));
    set.insert(FieldId::Flow, show(tls == TlsMode::Xtls));
    set.insert(FieldId::AllowInsecure, show(tls != TlsMode::None));
    set.insert(FieldId::Network, Required);
    set.insert(FieldId::ObfuscationType, show(obfuscatable));
    set.insert(FieldId::HostHeader, show(host_header));
    set.insert(FieldId::Alpn, show(tls == TlsMode::Tls));
    set.insert(FieldId::Path, show(path_role(cfg.network).is_some()));
    VisibilitySet(set)
}

/// Copy of the record with every hidden field cleared to its default.
///
/// Submission hands off the masked record so that residual state in
/// controls that were hidden after a protocol / transport change can
/// never reach the collaborator as if valid.
#[must_use]
pub fn masked_for_submit(cfg: &NodeConfig) -> NodeConfig {
    let vis = resolve(cfg);
    let defaults = NodeConfig::default();
    let mut out = cfg.clone();
    if !vis.is_visible(FieldId::AlterId) {
        out.alter_id = defaults.alter_id;
    }
    if !vis.is_visible(FieldId::Security) {
        out.security = defaults.security;
    }
    if !vis.is_visible(FieldId::Tls) {
        out.tls = defaults.tls;
    }
    if !vis.is_visible(FieldId::Sni) {
        out.sni = None;
    }
    if !vis.is_visible(FieldId::Flow) {
        out.flow = defaults.flow;
    }
    if !vis.is_visible(FieldId::AllowInsecure) {
        out.allow_insecure = defaults.allow_insecure;
    }
    if !vis.is_visible(FieldId::ObfuscationType) {
        out.obfuscation_type = defaults.obfuscation_type;
    }
    if !vis.is_visible(FieldId::HostHeader) {
        out.host_header = None;
    }
    if !vis.is_visible(FieldId::Alpn) {
        out.alpn = None;
    }
    if !vis.is_visible(FieldId::Path) {
        out.path = None;
    }
    out
}
