use dnsq_domain::{DnsProtocol, Endpoint};

#[test]
fn test_bare_ip_is_udp_53() {
    let protocol = DnsProtocol::parse("9.9.9.9").unwrap();
    assert_eq!(
        protocol,
        DnsProtocol::Udp {
            endpoint: Endpoint::new("9.9.9.9", 53)
        }
    );
}

#[test]
fn test_at_prefix_is_ignored() {
    let protocol = DnsProtocol::parse("@dns.quad9.net").unwrap();
    assert_eq!(protocol.to_string(), "udp://dns.quad9.net:53");
}

#[test]
fn test_explicit_port() {
    let protocol = DnsProtocol::parse("127.0.0.1:5353").unwrap();
    assert_eq!(protocol.to_string(), "udp://127.0.0.1:5353");
}

#[test]
fn test_tcp_scheme() {
    let protocol = DnsProtocol::parse("tcp://1.1.1.1").unwrap();
    assert_eq!(protocol.protocol_name(), "TCP");
    assert_eq!(protocol.to_string(), "tcp://1.1.1.1:53");
}

#[test]
fn test_tls_defaults_to_853_with_sni() {
    let protocol = DnsProtocol::parse("tls://dns.quad9.net").unwrap();
    match protocol {
        DnsProtocol::Tls { endpoint, hostname } => {
            assert_eq!(endpoint.port, 853);
            assert_eq!(&*hostname, "dns.quad9.net");
        }
        other => panic!("expected TLS, got {other:?}"),
    }
}

#[test]
fn test_https_appends_default_path() {
    let protocol = DnsProtocol::parse("https://cloudflare-dns.com").unwrap();
    assert_eq!(protocol.to_string(), "https://cloudflare-dns.com/dns-query");
}

#[test]
fn test_https_keeps_custom_path() {
    let protocol = DnsProtocol::parse("https://dns.google/resolve").unwrap();
    match protocol {
        DnsProtocol::Https { url, hostname } => {
            assert_eq!(&*url, "https://dns.google/resolve");
            assert_eq!(&*hostname, "dns.google");
        }
        other => panic!("expected HTTPS, got {other:?}"),
    }
}

#[test]
fn test_ipv6_literals() {
    let bracketed = DnsProtocol::parse("[2620:fe::fe]:5353").unwrap();
    assert_eq!(bracketed.to_string(), "udp://[2620:fe::fe]:5353");

    let bare = DnsProtocol::parse("2620:fe::fe").unwrap();
    assert_eq!(bare.to_string(), "udp://[2620:fe::fe]:53");
}

#[test]
fn test_unknown_scheme_rejected() {
    let err = DnsProtocol::parse("quic://dns.adguard.com").unwrap_err();
    assert!(err.to_string().contains("unsupported scheme"));
}

#[test]
fn test_invalid_port_rejected() {
    assert!(DnsProtocol::parse("127.0.0.1:0").is_err());
    assert!(DnsProtocol::parse("127.0.0.1:abc").is_err());
}

#[test]
fn test_stream_variant() {
    let udp = DnsProtocol::parse("192.0.2.1").unwrap();
    assert_eq!(udp.as_stream().unwrap().to_string(), "tcp://192.0.2.1:53");

    let tls = DnsProtocol::parse("tls://192.0.2.1").unwrap();
    assert_eq!(tls.as_stream(), Some(tls.clone()));

    let https = DnsProtocol::parse("https://192.0.2.1").unwrap();
    assert!(https.as_stream().is_none());
}

#[test]
fn test_oblivious_splits_target_and_keeps_proxy() {
    let protocol =
        DnsProtocol::oblivious("https://odoh.example.net", "https://relay.example.org/proxy")
            .unwrap();
    assert_eq!(
        protocol,
        DnsProtocol::ObliviousHttps {
            target_host: "odoh.example.net".into(),
            target_path: "/dns-query".into(),
            proxy_url: "https://relay.example.org/proxy".into(),
        }
    );
    assert_eq!(protocol.protocol_name(), "ODoH");
    assert!(protocol.as_stream().is_none());
    assert_eq!(
        protocol.to_string(),
        "https://odoh.example.net/dns-query via https://relay.example.org/proxy"
    );
}

#[test]
fn test_oblivious_target_must_be_https() {
    let err = DnsProtocol::oblivious("tls://odoh.example.net", "https://relay.example.org")
        .unwrap_err();
    assert!(err.to_string().contains("ODoH target must use HTTPS"));
}

#[test]
fn test_oblivious_proxy_must_be_https() {
    let err = DnsProtocol::oblivious("https://odoh.example.net", "tls://relay.example.org")
        .unwrap_err();
    assert!(err.to_string().contains("ODoH proxy must use HTTPS"));
}

#[test]
fn test_oblivious_proxy_defaults_to_proxy_path() {
    let protocol =
        DnsProtocol::oblivious("https://odoh.example.net/custom", "https://relay.example.org")
            .unwrap();
    let DnsProtocol::ObliviousHttps {
        target_path,
        proxy_url,
        ..
    } = protocol
    else {
        panic!("expected an ODoH upstream");
    };
    assert_eq!(&*target_path, "/custom");
    assert_eq!(&*proxy_url, "https://relay.example.org/proxy");
}
