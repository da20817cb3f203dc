//! Serde helpers for lenient wire decoding.
//!
//! Share-link payloads are produced by many clients with loose typing:
//! ports arrive as numbers or strings, enum fields carry values from
//! newer schema revisions. Decoding never fails on those; unknown or
//! mistyped values collapse to the field default.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::model::LenientEnum;

/// Deserialize an enum field from a string, falling back to the default
/// variant for unknown strings and non-string values.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: LenientEnum,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Other(IgnoredAny),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Str(s) => Ok(T::parse_lenient(s.trim())),
        Raw::Other(_) => Ok(T::default()),
    }
}

/// Deserialize a u16 from a number or a numeric string ("443"), falling
/// back to 0 for anything else or out-of-range values.
pub fn lenient_u16<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Num(n) => u16::try_from(n).unwrap_or(0),
        Raw::Str(s) => s.trim().parse().unwrap_or(0),
        Raw::Other(_) => 0,
    })
}

#[cfg(test)]
mod tests {
    use crate::model::{Network, NodeConfig, Protocol, Security, TlsMode};

    #[test]
    fn unknown_enum_values_fall_back() {
        let cfg: NodeConfig = serde_json::from_str(
            r#"{"protocol":"trojan","tls":"reality","network":"quic","security":17}"#,
        )
        .unwrap();
        assert_eq!(cfg.protocol, Protocol::Vmess);
        assert_eq!(cfg.tls, TlsMode::None);
        assert_eq!(cfg.network, Network::Tcp);
        assert_eq!(cfg.security, Security::Auto);
    }

    #[test]
    fn port_accepts_number_and_string() {
        let cfg: NodeConfig = serde_json::from_str(r#"{"port":443}"#).unwrap();
        assert_eq!(cfg.port, 443);
        let cfg: NodeConfig = serde_json::from_str(r#"{"port":"8443"}"#).unwrap();
        assert_eq!(cfg.port, 8443);
        let cfg: NodeConfig = serde_json::from_str(r#"{"port":"oops"}"#).unwrap();
        assert_eq!(cfg.port, 0);
        let cfg: NodeConfig = serde_json::from_str(r#"{"port":70000}"#).unwrap();
        assert_eq!(cfg.port, 0);
    }

    #[test]
    fn wire_aliases_are_accepted() {
        let cfg: NodeConfig = serde_json::from_str(
            r#"{"ps":"jp-1","add":"example.com","aid":"4","scy":"zero","net":"kcp","type":"srtp"}"#,
        )
        .unwrap();
        assert_eq!(cfg.name, "jp-1");
        assert_eq!(cfg.host, "example.com");
        assert_eq!(cfg.alter_id, 4);
        assert_eq!(cfg.security, Security::Zero);
        assert_eq!(cfg.network, Network::Kcp);
        assert_eq!(
            cfg.obfuscation_type,
            crate::model::ObfuscationType::Srtp
        );
    }
}
