use super::*;
use std::path::Path;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

const ORDER: [&str; 8] = [
    "--order-no",
    "ORD-1",
    "--amount",
    "100",
    "--email",
    "a@b.bt",
    "--description",
    "Water",
];

fn with_order(head: &[&'static str]) -> Vec<&'static str> {
    head.iter().copied().chain(ORDER).collect()
}

#[test]
fn cli_parse_source_default_layout() {
    match parse(&["bfspay", "source", "msg.json"]).command {
        CliCommand::Source { layout, input } => {
            assert_eq!(layout, LayoutArg::PaymentRequest);
            assert_eq!(input, "msg.json");
        }
        _ => panic!("expected Source"),
    }
}

#[test]
fn cli_parse_source_response_layout() {
    match parse(&["bfspay", "source", "--layout", "payment-response", "-"]).command {
        CliCommand::Source { layout, input } => {
            assert_eq!(layout.layout(), PAYMENT_RESPONSE);
            assert_eq!(input, "-");
        }
        _ => panic!("expected Source"),
    }
}

#[test]
fn cli_parse_sign() {
    match parse(&with_order(&["bfspay", "sign"])).command {
        CliCommand::Sign { order, html } => {
            assert!(!html);
            assert_eq!(order.order_no, "ORD-1");
            assert!(order.txn_time.is_none());
            let o: PaymentOrder = order.into();
            assert_eq!(o.remitter_email, "a@b.bt");
            assert_eq!(o.description, "Water");
        }
        _ => panic!("expected Sign"),
    }
}

#[test]
fn cli_parse_sign_html() {
    match parse(&with_order(&["bfspay", "sign", "--html"])).command {
        CliCommand::Sign { html, .. } => assert!(html),
        _ => panic!("expected Sign with html"),
    }
}

#[test]
fn cli_parse_sign_missing_amount_fails() {
    assert!(Cli::try_parse_from([
        "bfspay",
        "sign",
        "--order-no",
        "O",
        "--email",
        "a@b.bt",
        "--description",
        "d"
    ])
    .is_err());
}

#[test]
fn cli_parse_verify() {
    match parse(&["bfspay", "verify", "reply.txt"]).command {
        CliCommand::Verify { input, urls } => {
            assert_eq!(input, "reply.txt");
            assert_eq!(urls.resolve().unwrap(), None);
        }
        _ => panic!("expected Verify"),
    }
}

#[test]
fn cli_parse_status_with_txn_time() {
    let mut args = with_order(&["bfspay", "status"]);
    args.extend(["--txn-time", "20240101120000"]);
    match parse(&args).command {
        CliCommand::Status { order, .. } => {
            assert_eq!(order.txn_time.as_deref(), Some("20240101120000"))
        }
        _ => panic!("expected Status"),
    }
}

#[test]
fn cli_parse_global_overrides() {
    let cli = parse(&[
        "bfspay",
        "verify",
        "reply.txt",
        "--config",
        "/tmp/bfspay.toml",
        "--key",
        "/tmp/m.key",
        "--cert",
        "/tmp/BFS.crt",
    ]);
    assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/bfspay.toml")));
    let mut cfg = GatewayConfig::default();
    apply_key_overrides(&mut cfg, &cli);
    assert_eq!(cfg.keys.private_key.as_deref(), Some(Path::new("/tmp/m.key")));
    assert_eq!(
        cfg.keys.bank_certificate.as_deref(),
        Some(Path::new("/tmp/BFS.crt"))
    );
}

#[test]
fn cli_parse_return_urls() {
    let cli = parse(&[
        "bfspay",
        "verify",
        "reply.txt",
        "--success-url",
        "https://shop.example.bt/ok",
        "--failure-url",
        "https://shop.example.bt/failed",
        "--cancel-url",
        "https://shop.example.bt/cart",
    ]);
    match cli.command {
        CliCommand::Verify { urls, .. } => {
            let resolved = urls.resolve().unwrap().unwrap();
            assert_eq!(resolved.failure_url, "https://shop.example.bt/failed");
        }
        _ => panic!("expected Verify"),
    }
}

#[test]
fn cli_parse_return_urls_need_all_three() {
    assert!(Cli::try_parse_from([
        "bfspay",
        "verify",
        "reply.txt",
        "--success-url",
        "https://shop.example.bt/ok"
    ])
    .is_err());
}

#[test]
fn return_url_args_reject_relative_url() {
    let args = ReturnUrlArgs {
        success_url: Some("/ok".to_string()),
        failure_url: Some("https://shop.example.bt/failed".to_string()),
        cancel_url: Some("https://shop.example.bt/cart".to_string()),
    };
    assert!(matches!(
        args.resolve(),
        Err(MessageError::InvalidReturnUrl { field: "successUrl", .. })
    ));
}
