// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use anyhow::Result;
use http::Uri;
use log::debug;
use oauthsign_core::hash::{base64_encode, hmac_sha1};
use oauthsign_core::Message;
use oauthsign_rfc5849::constants::*;
use oauthsign_rfc5849::{parse_authorization_header, SignatureMethod};
use percent_encoding::utf8_percent_encode;
use pretty_assertions::assert_eq;
use test_case::test_case;

use super::{fixed_time, init_signing_test, FIXED_TIMESTAMP};

#[test]
fn test_header_with_access_token() -> Result<()> {
    let (ctx, spec) = init_signing_test();

    let header = spec
        .builder_for_request(
            &ctx,
            "POST",
            Uri::from_static("http://localhost"),
            &Message::new(),
        )?
        .build()?;
    debug!("generated header: {header}");

    assert!(header.starts_with("OAuth"));
    assert!(header.contains(r#"oauth_token="accessToken""#));
    assert!(header.contains(r#"oauth_consumer_key="consumerKey""#));
    assert!(header.contains(r#"oauth_version="1.0""#));

    let params = parse_authorization_header(&header)?;
    assert!(!params[OAUTH_TIMESTAMP].is_empty());
    assert!(params[OAUTH_TIMESTAMP].chars().all(|c| c.is_ascii_digit()));
    Ok(())
}

#[test]
fn test_header_without_access_token() -> Result<()> {
    let (ctx, mut spec) = init_signing_test();
    spec.access_token = None;

    let header = spec
        .builder_for_request(
            &ctx,
            "POST",
            Uri::from_static("http://localhost"),
            &Message::new(),
        )?
        .build()?;

    assert!(!header.contains(OAUTH_TOKEN), "{header}");
    assert!(!header.contains(OAUTH_VERIFIER), "{header}");
    Ok(())
}

#[test]
fn test_header_include_empty_params_with_query() -> Result<()> {
    let (ctx, mut spec) = init_signing_test();
    spec.access_token = None;
    spec.include_empty_params = true;

    let msg = Message::new();
    let builder = spec.builder_for_request(
        &ctx,
        "POST",
        Uri::from_static("http://localhost/?a=1&b=2"),
        &msg,
    )?;
    let builder = builder.with_time(fixed_time());
    let header = builder.build()?;

    assert!(header.contains(r#"oauth_verifier="""#), "{header}");
    assert!(header.contains(r#"oauth_token="""#), "{header}");

    let base_string = builder.base_string(&FIXED_TIMESTAMP.to_string())?;
    assert!(
        base_string.starts_with("POST&http%3A%2F%2Flocalhost%2F&a%3D1%26b%3D2%26"),
        "{base_string}"
    );

    let expected = base64_encode(&hmac_sha1(
        b"consumerSecret&tokenSecret",
        base_string.as_bytes(),
    ));
    let params = parse_authorization_header(&header)?;
    assert_eq!(
        params[OAUTH_SIGNATURE],
        utf8_percent_encode(&expected, &OAUTH_ENCODE_SET).to_string()
    );
    Ok(())
}

#[test]
fn test_header_round_trip() -> Result<()> {
    let (ctx, spec) = init_signing_test();

    let header = spec
        .clone()
        .with_version("1.0a")
        .with_realm("photos")
        .builder_for_request(
            &ctx,
            "GET",
            Uri::from_static("https://photos.example.net/photos?file=vacation.jpg"),
            &Message::new(),
        )?
        .with_time(fixed_time())
        .build()?;

    let params = parse_authorization_header(&header)?;
    assert_eq!(params[OAUTH_CONSUMER_KEY], "consumerKey");
    assert_eq!(params[OAUTH_VERSION], "1.0a");
    assert_eq!(params[OAUTH_TIMESTAMP], FIXED_TIMESTAMP.to_string());
    assert_eq!(params[OAUTH_TOKEN], "accessToken");
    assert_eq!(params[REALM], "photos");
    assert_eq!(params[OAUTH_SIGNATURE_METHOD], "HMAC-SHA1");
    Ok(())
}

#[test]
fn test_header_keys_sorted() -> Result<()> {
    let (ctx, spec) = init_signing_test();

    let header = spec
        .builder_for_request(
            &ctx,
            "POST",
            Uri::from_static("http://localhost"),
            &Message::new(),
        )?
        .build()?;

    let keys: Vec<_> = parse_authorization_header(&header)?.into_keys().collect();
    assert_eq!(
        keys,
        vec![
            OAUTH_CONSUMER_KEY,
            OAUTH_NONCE,
            OAUTH_SIGNATURE,
            OAUTH_SIGNATURE_METHOD,
            OAUTH_TIMESTAMP,
            OAUTH_TOKEN,
            OAUTH_VERSION,
            REALM,
        ]
    );
    assert!(header.contains(r#"", oauth_nonce=""#), "{header}");
    Ok(())
}

#[test_case(SignatureMethod::PlainText)]
#[test_case(SignatureMethod::HmacMd5)]
#[test_case(SignatureMethod::HmacSha1)]
#[test_case(SignatureMethod::HmacSha256)]
#[test_case(SignatureMethod::HmacSha384)]
#[test_case(SignatureMethod::HmacSha512)]
fn test_build_is_deterministic(method: SignatureMethod) -> Result<()> {
    let (ctx, spec) = init_signing_test();
    let spec = spec
        .with_nonce("fixedNonce")
        .with_signature_method(method.name());

    let build = || -> Result<String> {
        Ok(spec
            .builder_for_request(
                &ctx,
                "put",
                Uri::from_static("https://example.com:8443/a%20b?x=1"),
                &Message::new(),
            )?
            .with_time(fixed_time())
            .build()?)
    };

    let header = build()?;
    assert_eq!(header, build()?);

    let params = parse_authorization_header(&header)?;
    assert_eq!(params[OAUTH_SIGNATURE_METHOD], method.formal_name());
    assert_eq!(params[OAUTH_NONCE], "fixedNonce");
    Ok(())
}

#[test]
fn test_different_methods_sign_differently() -> Result<()> {
    let (ctx, spec) = init_signing_test();
    let spec = spec.with_nonce("fixedNonce");

    let sign = |method: &str| -> Result<String> {
        let header = spec
            .builder_for_request(
                &ctx,
                method,
                Uri::from_static("http://localhost/"),
                &Message::new(),
            )?
            .with_time(fixed_time())
            .build()?;
        let params = parse_authorization_header(&header)?;
        Ok(params[OAUTH_SIGNATURE].clone())
    };

    assert_eq!(sign("get")?, sign("GET")?);
    assert_ne!(sign("GET")?, sign("POST")?);
    Ok(())
}
