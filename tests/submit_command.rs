//! `brand submit` end to end against mock lookup and branding servers.

mod common;

use std::fs;

use brand::cli::submit::{run, SubmitArgs};
use brand::output::Printer;
use brand::{BrandError, BrandingMode, Config, TokenSource};
use common::{solid_png, square_svg, SECRET_KEY};
use serde_json::json;
use tempfile::{tempdir, TempDir};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WALLET_ADDRESS: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";

struct Files {
    _dir: TempDir,
    args: SubmitArgs,
}

fn files(mode: BrandingMode, source: TokenSource) -> Files {
    let dir = tempdir().unwrap();
    let write = |name: &str, bytes: &[u8]| {
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        path
    };

    let args = SubmitArgs {
        token: "TKX-abcd".into(),
        website: None,
        description: None,
        socials: Vec::new(),
        png: write("logo.png", &solid_png(200, 200, 0)),
        svg: write("logo.svg", &square_svg()),
        mode: Some(mode),
        source,
        key: Some(write("wallet.key", SECRET_KEY.as_bytes())),
    };

    Files { _dir: dir, args }
}

fn config(server: &MockServer) -> Config {
    Config {
        api_url: server.uri(),
        network_api_url: Some(server.uri()),
        memexchange_api_url: Some(server.uri()),
        ..Config::default()
    }
}

async fn mount_listing(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/bonding-pairs/search"))
        .and(query_param("query", "TKX-abcd"))
        .and(query_param("state", "Finished"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "firstToken": "TKX-abcd",
                "creator": "erd1creator",
                "coin": {
                    "name": "Tokex",
                    "description": "The Tokex community token",
                    "website": "https://tokex.io",
                    "social": { "twitter": "https://x.com/tkx" }
                }
            }]
        })))
        .mount(server)
        .await;
}

async fn mount_owners(server: &MockServer, token_owner: &str) {
    Mock::given(method("GET"))
        .and(path("/tokens"))
        .and(query_param("identifiers", "TKX-abcd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "identifier": "TKX-abcd", "owner": token_owner }
        ])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/branding/owner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "owner": "erd1brand" })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_submit_memexchange_token_in_create_mode() {
    let server = MockServer::start().await;
    mount_listing(&server).await;
    mount_owners(&server, "erd1brand").await;
    Mock::given(method("POST"))
        .and(path("/api/tokens/TKX-abcd/branding/prepare"))
        .and(body_string_contains("https://tokex.io"))
        .and(body_string_contains(r#""twitter":"https://x.com/tkx""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "commitHash": "abc123" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/tokens/TKX-abcd/branding/complete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pullRequestUrl": "https://github.com/multiversx/mx-assets/pull/7"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let files = files(BrandingMode::Create, TokenSource::Memexchange);
    assert!(files.args.png.exists());

    run(files.args, &config(&server), &Printer::plain())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_submit_stops_on_ownership_mismatch() {
    let server = MockServer::start().await;
    mount_listing(&server).await;
    mount_owners(&server, "erd1someone").await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let files = files(BrandingMode::Create, TokenSource::Memexchange);
    let err = run(files.args, &config(&server), &Printer::plain())
        .await
        .unwrap_err();

    match err {
        BrandError::OwnershipMismatch { owner, expected, .. } => {
            assert_eq!(owner, "erd1someone");
            assert_eq!(expected, "erd1brand");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_own_token_in_edit_mode() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/accounts/{}/tokens", WALLET_ADDRESS)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "identifier": "TKX-abcd", "name": "Tokex", "owner": WALLET_ADDRESS }
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token-branding"))
        .and(body_string_contains(WALLET_ADDRESS))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pullRequestUrl": "https://github.com/multiversx/mx-assets/pull/8"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut files = files(BrandingMode::Edit, TokenSource::Own);
    files.args.website = Some("https://tokex.io".into());
    files.args.description = Some("The Tokex community token".into());

    run(files.args, &config(&server), &Printer::plain())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_submit_unknown_token_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/bonding-pairs/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let files = files(BrandingMode::Create, TokenSource::Memexchange);
    let err = run(files.args, &config(&server), &Printer::plain())
        .await
        .unwrap_err();
    assert!(matches!(err, BrandError::Validation { .. }));
}

#[tokio::test]
async fn test_memexchange_token_defaults_to_edit_without_wallet() {
    let server = MockServer::start().await;
    mount_listing(&server).await;
    mount_owners(&server, "erd1brand").await;
    Mock::given(method("POST"))
        .and(path("/api/tokens/TKX-abcd/branding/prepare"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/token-branding"))
        .and(body_string_contains("https://tokex.io"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pullRequestUrl": "https://github.com/multiversx/mx-assets/pull/9"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut files = files(BrandingMode::Edit, TokenSource::Memexchange);
    files.args.mode = None;
    files.args.key = None;

    run(files.args, &config(&server), &Printer::plain())
        .await
        .unwrap();
}
