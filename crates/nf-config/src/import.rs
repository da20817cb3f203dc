//! Bulk node import: tag/link rows and share-link parsing.
//!
//! ## Supported links
//! - `vmess://<base64 JSON>` — the v2rayN payload (`ps`, `add`, `port`,
//!   `id`, `aid`, `scy`, `net`, `type`, `host`, `path`, `tls`, `sni`,
//!   `alpn`)
//! - `vless://uuid@server:port?type=..&security=..#name` — URI form
//!
//! No remote downloads—this module only parses.

use anyhow::{anyhow, bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::de;
use crate::model::{
    Flow, LenientEnum, Network, NodeConfig, ObfuscationType, Protocol, Security, TlsMode,
};

/// One import-form row: a user-chosen tag and a share link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRow {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub link: String,
}

impl ImportRow {
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.tag.trim().is_empty() && self.link.trim().is_empty()
    }
}

/// Ordered list of import rows, grown one empty row at a time by the
/// add-row action. Always holds at least the one row it starts with;
/// rows are never removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRowList {
    rows: Vec<ImportRow>,
}

impl Default for ImportRowList {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportRowList {
    /// Start with exactly one empty row.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: vec![ImportRow::default()],
        }
    }

    /// Append one empty row at the end.
    pub fn add_row(&mut self) {
        self.rows.push(ImportRow::default());
    }

    #[must_use]
    pub fn rows(&self) -> &[ImportRow] {
        &self.rows
    }

    pub fn row_mut(&mut self, index: usize) -> Option<&mut ImportRow> {
        self.rows.get_mut(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parse every non-blank row. A non-empty tag overrides the name
    /// embedded in the link.
    pub fn parse_all(&self) -> Vec<(usize, Result<NodeConfig>)> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_blank())
            .map(|(i, row)| {
                let parsed = parse_share_link(&row.link).map(|mut node| {
                    if !row.tag.trim().is_empty() {
                        node.name = row.tag.trim().to_string();
                    }
                    node
                });
                (i, parsed)
            })
            .collect()
    }
}

/// Parse a single share link into a [`NodeConfig`].
///
/// # Errors
/// Returns an error for unknown schemes, undecodable payloads, and
/// malformed URIs. Enum values inside a structurally valid link never
/// fail; they fall back to defaults.
pub fn parse_share_link(link: &str) -> Result<NodeConfig> {
    let link = link.trim();
    if let Some(payload) = link.strip_prefix("vmess://") {
        parse_vmess_payload(payload)
    } else if let Some(rest) = link.strip_prefix("vless://") {
        parse_vless_uri(rest)
    } else {
        let scheme = link.split("://").next().unwrap_or(link);
        bail!("unsupported link scheme: {}", scheme)
    }
}

/// v2rayN vmess payload. Field names are the wire schema; `host` here is
/// the header host, not the server address (`add`).
#[derive(Debug, Deserialize)]
struct VmessPayload {
    #[serde(default)]
    ps: String,
    #[serde(default)]
    add: String,
    #[serde(default, deserialize_with = "de::lenient_u16")]
    port: u16,
    #[serde(default)]
    id: String,
    #[serde(default, deserialize_with = "de::lenient_u16")]
    aid: u16,
    #[serde(default, deserialize_with = "de::lenient")]
    scy: Security,
    #[serde(default, deserialize_with = "de::lenient")]
    net: Network,
    #[serde(default, rename = "type", deserialize_with = "de::lenient")]
    obfuscation: ObfuscationType,
    #[serde(default)]
    host: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default, deserialize_with = "de::lenient")]
    tls: TlsMode,
    #[serde(default)]
    sni: Option<String>,
    #[serde(default)]
    alpn: Option<String>,
}

fn parse_vmess_payload(payload: &str) -> Result<NodeConfig> {
    let decoded = base64_decode(payload).context("vmess link: invalid base64 payload")?;
    let payload: VmessPayload =
        serde_json::from_slice(&decoded).context("vmess link: payload is not JSON")?;
    Ok(NodeConfig {
        protocol: Protocol::Vmess,
        name: payload.ps,
        host: payload.add,
        port: payload.port,
        id: payload.id,
        alter_id: payload.aid,
        security: payload.scy,
        tls: payload.tls,
        sni: payload.sni.filter(|s| !s.is_empty()),
        flow: Flow::None,
        allow_insecure: false,
        network: payload.net,
        obfuscation_type: payload.obfuscation,
        host_header: payload.host.filter(|s| !s.is_empty()),
        alpn: payload.alpn.filter(|s| !s.is_empty()),
        path: payload.path.filter(|s| !s.is_empty()),
    })
}

fn parse_vless_uri(rest: &str) -> Result<NodeConfig> {
    // Format: uuid@server:port?params#name
    let (main_part, name) = match rest.rfind('#') {
        Some(idx) => (
            &rest[..idx],
            urlencoding::decode(&rest[idx + 1..])
                .map(|s| s.to_string())
                .unwrap_or_default(),
        ),
        None => (rest, String::new()),
    };
    let (authority, params) = main_part.split_once('?').unwrap_or((main_part, ""));
    let (uuid, server_port) = authority
        .split_once('@')
        .ok_or_else(|| anyhow!("vless link: missing '@'"))?;
    let (server, port_str) = server_port
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("vless link: missing ':port'"))?;
    let port: u16 = port_str
        .parse()
        .with_context(|| format!("vless link: bad port '{}'", port_str))?;

    let mut node = NodeConfig {
        protocol: Protocol::Vless,
        name,
        host: server.to_string(),
        port,
        id: uuid.to_string(),
        ..NodeConfig::default()
    };

    for param in params.split('&').filter(|p| !p.is_empty()) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        let value = urlencoding::decode(value).unwrap_or_default().to_string();
        match key {
            "type" => node.network = Network::parse_lenient(&value),
            "security" => node.tls = TlsMode::parse_lenient(&value),
            "sni" => node.sni = Some(value),
            "flow" => node.flow = Flow::parse_lenient(&value),
            "path" | "serviceName" | "seed" => node.path = Some(value),
            "host" => node.host_header = Some(value),
            "alpn" => node.alpn = Some(value),
            "headerType" => node.obfuscation_type = ObfuscationType::parse_lenient(&value),
            "allowInsecure" => node.allow_insecure = value == "1" || value == "true",
            _ => {}
        }
    }
    Ok(node)
}

/// Decode standard or URL-safe base64, padded or not.
fn base64_decode(input: &str) -> Result<Vec<u8>> {
    let normalized: String = input
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    let trimmed = normalized.trim_end_matches('=');
    let padding = (4 - trimmed.len() % 4) % 4;
    let padded = format!("{}{}", trimmed, "=".repeat(padding));
    STANDARD
        .decode(padded.as_bytes())
        .map_err(|e| anyhow!("base64 decode failed: {}", e))
}
