//! Submission-time validation.
//!
//! The resolver decides which fields apply; this module checks the values
//! against that decision and collects a serializable [`Report`]. It never
//! re-derives visibility rules of its own.

use serde::Serialize;

use nf_types::IssueCode;

use crate::model::{FieldId, Flow, LenientEnum, NodeConfig};
use crate::visibility;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueLevel {
    Error,
    Warning,
}

/// A single finding against one field.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub level: IssueLevel,
    pub field: FieldId,
    #[serde(rename = "message")]
    pub msg: String,
    pub code: IssueCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Helper to append a warning issue.
pub fn push_warn(
    issues: &mut Vec<Issue>,
    code: IssueCode,
    field: FieldId,
    msg: &str,
    hint: Option<&str>,
) {
    issues.push(Issue {
        level: IssueLevel::Warning,
        field,
        msg: msg.to_string(),
        code,
        hint: hint.map(ToString::to_string),
    });
}

/// Helper to append an error issue.
pub fn push_err(
    issues: &mut Vec<Issue>,
    code: IssueCode,
    field: FieldId,
    msg: &str,
    hint: Option<&str>,
) {
    issues.push(Issue {
        level: IssueLevel::Error,
        field,
        msg: msg.to_string(),
        code,
        hint: hint.map(ToString::to_string),
    });
}

/// Validation outcome. `ok` is false iff any error-level issue exists.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub ok: bool,
    pub issues: Vec<Issue>,
}

impl Report {
    #[must_use]
    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.level == IssueLevel::Error)
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.issues
            .iter()
            .any(|i| i.level == IssueLevel::Warning)
    }
}

/// Validate a record as the panel host would on confirm.
///
/// Required-but-empty blocks; stale values in hidden controls are only
/// warnings since [`visibility::masked_for_submit`] clears them anyway.
#[must_use]
pub fn validate(cfg: &NodeConfig) -> Report {
    let vis = visibility::resolve(cfg);
    let mut issues: Vec<Issue> = Vec::new();

    if cfg.host.trim().is_empty() {
        push_err(
            &mut issues,
            IssueCode::MissingRequired,
            FieldId::Host,
            "host is required",
            None,
        );
    }
    if cfg.id.trim().is_empty() {
        push_err(
            &mut issues,
            IssueCode::MissingRequired,
            FieldId::Id,
            "id is required",
            None,
        );
    }
    if cfg.port == 0 {
        push_warn(
            &mut issues,
            IssueCode::OutOfRange,
            FieldId::Port,
            "port is 0",
            Some("port 0 selects nothing routable"),
        );
    }

    if vis.is_visible(FieldId::ObfuscationType)
        && !cfg.obfuscation_type.is_valid_for(cfg.network)
    {
        let valid: Vec<&str> = visibility::valid_obfuscations(cfg.network)
            .iter()
            .map(|o| o.as_str())
            .collect();
        push_err(
            &mut issues,
            IssueCode::InvalidEnum,
            FieldId::ObfuscationType,
            &format!(
                "obfuscation '{}' is not valid for network '{}'",
                cfg.obfuscation_type.as_str(),
                cfg.network.as_str()
            ),
            Some(&format!("valid options: {}", valid.join(", "))),
        );
    }

    if !vis.is_visible(FieldId::Flow) && cfg.flow != Flow::None {
        push_warn(
            &mut issues,
            IssueCode::Conflict,
            FieldId::Flow,
            "flow is set but tls is not xtls",
            Some("the value is cleared on submit"),
        );
    }

    let ok = !issues.iter().any(|i| i.level == IssueLevel::Error);
    Report { ok, issues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Network, ObfuscationType, TlsMode};

    fn filled() -> NodeConfig {
        NodeConfig {
            host: "example.com".into(),
            port: 443,
            id: "b831381d-6324-4d53-ad4f-8cda48b30811".into(),
            ..NodeConfig::default()
        }
    }

    #[test]
    fn empty_required_fields_block() {
        let report = validate(&NodeConfig::default());
        assert!(!report.ok);
        let fields: Vec<FieldId> = report.errors().map(|i| i.field).collect();
        assert!(fields.contains(&FieldId::Host));
        assert!(fields.contains(&FieldId::Id));
    }

    #[test]
    fn filled_record_passes() {
        let report = validate(&filled());
        assert!(report.ok);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn invalid_obfuscation_for_network_is_an_error() {
        let cfg = NodeConfig {
            network: Network::Tcp,
            obfuscation_type: ObfuscationType::Wireguard,
            ..filled()
        };
        let report = validate(&cfg);
        assert!(!report.ok);
        let issue = report.errors().next().unwrap();
        assert_eq!(issue.code, nf_types::IssueCode::InvalidEnum);
        assert_eq!(issue.field, FieldId::ObfuscationType);
        assert!(issue.hint.as_deref().unwrap().contains("none, srtp"));
    }

    #[test]
    fn stale_obfuscation_on_grpc_is_not_checked() {
        // hidden control: masked on submit, not an input error
        let cfg = NodeConfig {
            network: Network::Grpc,
            obfuscation_type: ObfuscationType::Wireguard,
            ..filled()
        };
        assert!(validate(&cfg).ok);
    }

    #[test]
    fn stale_flow_without_xtls_warns() {
        let cfg = NodeConfig {
            tls: TlsMode::Tls,
            flow: Flow::XtlsRprxOrigin,
            ..filled()
        };
        let report = validate(&cfg);
        assert!(report.ok);
        assert!(report.has_warnings());
        assert_eq!(
            report.issues[0].code,
            nf_types::IssueCode::Conflict
        );
    }

    #[test]
    fn port_zero_is_a_warning_only() {
        let cfg = NodeConfig { port: 0, ..filled() };
        let report = validate(&cfg);
        assert!(report.ok);
        assert!(report.has_warnings());
    }
}
