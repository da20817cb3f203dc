//! Node configuration data model.
//!
//! [`NodeConfig`] mirrors the external proxy-client schema: every field is
//! carried whether or not it is currently applicable, and applicability is
//! decided by [`crate::visibility::resolve`]. Wire aliases (`ps`, `add`,
//! `aid`, `scy`, `net`, `type`) are accepted on input for compatibility
//! with v2rayN-style payloads.

use serde::{Deserialize, Serialize};

use crate::de;

/// Enum fields parse leniently: an unknown string falls back to the
/// default variant instead of failing deserialization.
pub trait LenientEnum: Default {
    fn parse_lenient(s: &str) -> Self;
    fn as_str(&self) -> &'static str;
}

/// Node protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Vmess,
    Vless,
}

impl LenientEnum for Protocol {
    fn parse_lenient(s: &str) -> Self {
        match s {
            "vless" => Self::Vless,
            _ => Self::Vmess,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Vmess => "vmess",
            Self::Vless => "vless",
        }
    }
}

/// VMess payload encryption (vmess only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Security {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "aes-128-gcm")]
    Aes128Gcm,
    #[serde(rename = "chacha20-poly1305")]
    Chacha20Poly1305,
    #[serde(rename = "none")]
    None,
    #[serde(rename = "zero")]
    Zero,
}

impl LenientEnum for Security {
    fn parse_lenient(s: &str) -> Self {
        match s {
            "aes-128-gcm" => Self::Aes128Gcm,
            "chacha20-poly1305" => Self::Chacha20Poly1305,
            "none" => Self::None,
            "zero" => Self::Zero,
            _ => Self::Auto,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Aes128Gcm => "aes-128-gcm",
            Self::Chacha20Poly1305 => "chacha20-poly1305",
            Self::None => "none",
            Self::Zero => "zero",
        }
    }
}

/// Stream security layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    #[default]
    None,
    Tls,
    Xtls,
}

impl LenientEnum for TlsMode {
    fn parse_lenient(s: &str) -> Self {
        match s {
            "tls" => Self::Tls,
            "xtls" => Self::Xtls,
            _ => Self::None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Tls => "tls",
            Self::Xtls => "xtls",
        }
    }
}

/// XTLS flow control mode (xtls only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Flow {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "xtls-rprx-origin")]
    XtlsRprxOrigin,
    #[serde(rename = "xtls-rprx-origin-udp443")]
    XtlsRprxOriginUdp443,
    #[serde(rename = "xtls-rprx-vision-udp443")]
    XtlsRprxVisionUdp443,
}

impl LenientEnum for Flow {
    fn parse_lenient(s: &str) -> Self {
        match s {
            "xtls-rprx-origin" => Self::XtlsRprxOrigin,
            "xtls-rprx-origin-udp443" => Self::XtlsRprxOriginUdp443,
            "xtls-rprx-vision-udp443" => Self::XtlsRprxVisionUdp443,
            _ => Self::None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::XtlsRprxOrigin => "xtls-rprx-origin",
            Self::XtlsRprxOriginUdp443 => "xtls-rprx-origin-udp443",
            Self::XtlsRprxVisionUdp443 => "xtls-rprx-vision-udp443",
        }
    }
}

/// Underlying stream transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Tcp,
    Kcp,
    Ws,
    H2,
    Grpc,
}

impl LenientEnum for Network {
    fn parse_lenient(s: &str) -> Self {
        match s {
            // mKCP appears under both spellings in the wild
            "kcp" | "mkcp" => Self::Kcp,
            "ws" | "websocket" => Self::Ws,
            "h2" | "http" => Self::H2,
            "grpc" => Self::Grpc,
            _ => Self::Tcp,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Kcp => "kcp",
            Self::Ws => "ws",
            Self::H2 => "h2",
            Self::Grpc => "grpc",
        }
    }
}

/// Header obfuscation / disguise mode. The valid option set depends on the
/// transport; see [`ObfuscationType::options_for`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ObfuscationType {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "srtp")]
    Srtp,
    #[serde(rename = "utp")]
    Utp,
    #[serde(rename = "wechat-video")]
    WechatVideo,
    #[serde(rename = "dtls")]
    Dtls,
    #[serde(rename = "wireguard")]
    Wireguard,
    /// Legacy HTTP header disguise. Never offered as an option, but old
    /// payloads can carry it and the host-header rule reads it.
    #[serde(rename = "http")]
    Http,
}

impl LenientEnum for ObfuscationType {
    fn parse_lenient(s: &str) -> Self {
        match s {
            "srtp" => Self::Srtp,
            "utp" => Self::Utp,
            "wechat-video" => Self::WechatVideo,
            "dtls" => Self::Dtls,
            "wireguard" => Self::Wireguard,
            "http" => Self::Http,
            _ => Self::None,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Srtp => "srtp",
            Self::Utp => "utp",
            Self::WechatVideo => "wechat-video",
            Self::Dtls => "dtls",
            Self::Wireguard => "wireguard",
            Self::Http => "http",
        }
    }
}

impl ObfuscationType {
    /// Valid options for a transport. Transports without header
    /// obfuscation only accept `none`.
    #[must_use]
    pub fn options_for(network: Network) -> &'static [ObfuscationType] {
        match network {
            Network::Tcp => &[Self::None, Self::Srtp],
            Network::Kcp => &[
                Self::None,
                Self::Srtp,
                Self::Utp,
                Self::WechatVideo,
                Self::Dtls,
                Self::Wireguard,
            ],
            _ => &[Self::None],
        }
    }

    #[must_use]
    pub fn is_valid_for(self, network: Network) -> bool {
        Self::options_for(network).contains(&self)
    }
}

/// A proxy node's connection parameters.
///
/// Every field is optional at the wire level; defaults match a freshly
/// opened configuration panel (`vmess` over `tcp`, no TLS).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    #[serde(default, deserialize_with = "de::lenient")]
    pub protocol: Protocol,
    /// Display name.
    #[serde(default, alias = "ps")]
    pub name: String,
    /// Server address.
    #[serde(default, alias = "add")]
    pub host: String,
    /// Server port (0-65535).
    #[serde(default, deserialize_with = "de::lenient_u16")]
    pub port: u16,
    /// User credential (UUID for vmess/vless).
    #[serde(default)]
    pub id: String,
    /// Legacy vmess alter id; 0 for AEAD.
    #[serde(
        default,
        rename = "alterId",
        alias = "aid",
        deserialize_with = "de::lenient_u16"
    )]
    pub alter_id: u16,
    #[serde(default, alias = "scy", deserialize_with = "de::lenient")]
    pub security: Security,
    #[serde(default, deserialize_with = "de::lenient")]
    pub tls: TlsMode,
    /// TLS server name indication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,
    #[serde(default, deserialize_with = "de::lenient")]
    pub flow: Flow,
    /// Skip server certificate verification.
    #[serde(default, rename = "allowInsecure")]
    pub allow_insecure: bool,
    #[serde(default, alias = "net", deserialize_with = "de::lenient")]
    pub network: Network,
    #[serde(
        default,
        rename = "obfuscationType",
        alias = "type",
        deserialize_with = "de::lenient"
    )]
    pub obfuscation_type: ObfuscationType,
    /// Host header for ws/h2/http-disguise transports (distinct from the
    /// server address; the v2rayN payload calls this one `host`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_header: Option<String>,
    /// TLS ALPN list, comma separated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpn: Option<String>,
    /// Transport-dependent path: kcp seed, ws/h2 path, grpc service name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        crate::defaults::node()
    }
}

/// Identifier for every field on the configuration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FieldId {
    #[serde(rename = "protocol")]
    Protocol,
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "host")]
    Host,
    #[serde(rename = "port")]
    Port,
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "alterId")]
    AlterId,
    #[serde(rename = "security")]
    Security,
    #[serde(rename = "tls")]
    Tls,
    #[serde(rename = "sni")]
    Sni,
    #[serde(rename = "flow")]
    Flow,
    #[serde(rename = "allowInsecure")]
    AllowInsecure,
    #[serde(rename = "network")]
    Network,
    #[serde(rename = "obfuscationType")]
    ObfuscationType,
    #[serde(rename = "host_header")]
    HostHeader,
    #[serde(rename = "alpn")]
    Alpn,
    #[serde(rename = "path")]
    Path,
}

impl FieldId {
    /// All form fields, in form order.
    pub const ALL: [FieldId; 16] = [
        FieldId::Protocol,
        FieldId::Name,
        FieldId::Host,
        FieldId::Port,
        FieldId::Id,
        FieldId::AlterId,
        FieldId::Security,
        FieldId::Tls,
        FieldId::Sni,
        FieldId::Flow,
        FieldId::AllowInsecure,
        FieldId::Network,
        FieldId::ObfuscationType,
        FieldId::HostHeader,
        FieldId::Alpn,
        FieldId::Path,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Protocol => "protocol",
            Self::Name => "name",
            Self::Host => "host",
            Self::Port => "port",
            Self::Id => "id",
            Self::AlterId => "alterId",
            Self::Security => "security",
            Self::Tls => "tls",
            Self::Sni => "sni",
            Self::Flow => "flow",
            Self::AllowInsecure => "allowInsecure",
            Self::Network => "network",
            Self::ObfuscationType => "obfuscationType",
            Self::HostHeader => "host_header",
            Self::Alpn => "alpn",
            Self::Path => "path",
        }
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
