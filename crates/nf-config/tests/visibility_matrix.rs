//! Cross-field invariants of the visibility resolver over the whole
//! protocol / network / tls space.

use nf_config::{
    resolve, valid_obfuscations, FieldId, Flow, Network, NodeConfig, ObfuscationType, Protocol,
    TlsMode, Visibility,
};

const PROTOCOLS: [Protocol; 2] = [Protocol::Vmess, Protocol::Vless];
const NETWORKS: [Network; 5] = [
    Network::Tcp,
    Network::Kcp,
    Network::Ws,
    Network::H2,
    Network::Grpc,
];
const TLS_MODES: [TlsMode; 3] = [TlsMode::None, TlsMode::Tls, TlsMode::Xtls];

fn configs() -> impl Iterator<Item = NodeConfig> {
    PROTOCOLS.into_iter().flat_map(|protocol| {
        NETWORKS.into_iter().flat_map(move |network| {
            TLS_MODES.into_iter().map(move |tls| NodeConfig {
                protocol,
                network,
                tls,
                ..NodeConfig::default()
            })
        })
    })
}

#[test]
fn identity_fields_are_always_required() {
    for cfg in configs() {
        let vis = resolve(&cfg);
        for field in [
            FieldId::Protocol,
            FieldId::Host,
            FieldId::Port,
            FieldId::Id,
            FieldId::Network,
        ] {
            assert_eq!(vis.get(field), Visibility::Required, "{:?}", cfg);
        }
    }
}

#[test]
fn vmess_only_fields_track_protocol() {
    for cfg in configs() {
        let vis = resolve(&cfg);
        let expected = if cfg.protocol == Protocol::Vmess {
            Visibility::Optional
        } else {
            Visibility::Hidden
        };
        assert_eq!(vis.get(FieldId::AlterId), expected, "{:?}", cfg);
        assert_eq!(vis.get(FieldId::Security), expected, "{:?}", cfg);
    }
}

#[test]
fn tls_dependents_track_tls_mode() {
    for cfg in configs() {
        let vis = resolve(&cfg);
        let with_tls = cfg.tls != TlsMode::None;
        assert_eq!(vis.is_visible(FieldId::Sni), with_tls, "{:?}", cfg);
        assert_eq!(vis.is_visible(FieldId::AllowInsecure), with_tls, "{:?}", cfg);
        assert_eq!(
            vis.is_visible(FieldId::Flow),
            cfg.tls == TlsMode::Xtls,
            "{:?}",
            cfg
        );
        assert_eq!(
            vis.is_visible(FieldId::Alpn),
            cfg.tls == TlsMode::Tls,
            "{:?}",
            cfg
        );
    }
}

#[test]
fn obfuscation_only_on_tcp_and_kcp() {
    for cfg in configs() {
        let vis = resolve(&cfg);
        let expected = matches!(cfg.network, Network::Tcp | Network::Kcp);
        assert_eq!(
            vis.is_visible(FieldId::ObfuscationType),
            expected,
            "{:?}",
            cfg
        );
    }
}

#[test]
fn host_header_follows_transport_or_tls() {
    for cfg in configs() {
        let vis = resolve(&cfg);
        let expected = matches!(cfg.network, Network::Ws | Network::H2) || cfg.tls == TlsMode::Tls;
        // none of the generated configs sets the legacy http disguise
        assert_eq!(vis.is_visible(FieldId::HostHeader), expected, "{:?}", cfg);
    }
}

#[test]
fn resolve_is_pure_across_the_matrix() {
    for cfg in configs() {
        let snapshot = cfg.clone();
        assert_eq!(resolve(&cfg), resolve(&cfg));
        assert_eq!(cfg, snapshot);
    }
}

#[test]
fn valid_obfuscations_always_contain_none() {
    for network in NETWORKS {
        let options = valid_obfuscations(network);
        assert!(options.contains(&ObfuscationType::None));
        for o in options {
            assert!(o.is_valid_for(network));
        }
    }
}

#[test]
fn stale_flow_never_resurfaces_through_resolution() {
    // flow holds a stale xtls value while tls is plain; the resolver must
    // still hide the control and submission masking must clear it.
    let cfg = NodeConfig {
        host: "example.com".into(),
        port: 443,
        id: "u".into(),
        tls: TlsMode::Tls,
        flow: Flow::XtlsRprxVisionUdp443,
        ..NodeConfig::default()
    };
    assert!(!resolve(&cfg).is_visible(FieldId::Flow));
    assert_eq!(nf_config::masked_for_submit(&cfg).flow, Flow::None);
}
