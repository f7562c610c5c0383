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
use oauthsign_core::hash::{base64_encode, hmac_sha1};
use oauthsign_rfc5849::constants::*;
use oauthsign_rfc5849::{parse_authorization_header, SignatureBuilder, SignatureMethod};
use percent_encoding::utf8_percent_encode;
use pretty_assertions::assert_eq;

use super::fixed_time;

/// Request from the Twitter "Creating a signature" walkthrough.
fn twitter_builder() -> SignatureBuilder {
    SignatureBuilder::new()
        .with_method("post")
        .with_url(Uri::from_static(
            "https://api.twitter.com/1.1/statuses/update.json?include_entities=true",
        ))
        .with_consumer_key("xvz1evFS4wEEPTGEFPHBog")
        .with_consumer_secret("kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw")
        .with_access_token("370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb")
        .with_token_secret("LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE")
        .with_nonce("kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg")
        .with_signature_method(SignatureMethod::HmacSha1)
        .with_additional_data([(
            "status",
            "Hello%20Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21",
        )])
        .with_time(fixed_time())
}

#[test]
fn test_twitter_base_string() -> Result<()> {
    let base_string = twitter_builder().base_string("1318622958")?;

    assert_eq!(
        base_string,
        concat!(
            "POST&https%3A%2F%2Fapi.twitter.com%2F1.1%2Fstatuses%2Fupdate.json&",
            "include_entities%3Dtrue%26",
            "oauth_consumer_key%3Dxvz1evFS4wEEPTGEFPHBog%26",
            "oauth_nonce%3DkYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg%26",
            "oauth_signature_method%3DHMAC-SHA1%26",
            "oauth_timestamp%3D1318622958%26",
            "oauth_token%3D370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb%26",
            "oauth_version%3D1.0%26",
            "status%3DHello%2520Ladies%2520%252B%2520Gentlemen%252C%2520a%2520signed%2520OAuth%2520request%2521",
        )
    );
    Ok(())
}

#[test]
fn test_twitter_header() -> Result<()> {
    let header = twitter_builder().build()?;

    assert_eq!(
        header,
        concat!(
            r#"OAuth oauth_consumer_key="xvz1evFS4wEEPTGEFPHBog", "#,
            r#"oauth_nonce="kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg", "#,
            r#"oauth_signature="hCtSmYh%2BiHYCEqBWrE7C7hYmtUk%3D", "#,
            r#"oauth_signature_method="HMAC-SHA1", "#,
            r#"oauth_timestamp="1318622958", "#,
            r#"oauth_token="370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb", "#,
            r#"oauth_version="1.0", "#,
            r#"realm="""#,
        )
    );
    Ok(())
}

#[test]
fn test_hmac_sha1_cross_check() -> Result<()> {
    let builder = SignatureBuilder::new()
        .with_method("GET")
        .with_url(Uri::from_static("http://localhost"))
        .with_consumer_key("ck")
        .with_consumer_secret("cs")
        .with_token_secret("ts")
        .with_nonce("n")
        .with_time(fixed_time());

    let base_string = builder.base_string("1318622958")?;
    let header = builder.build()?;

    // RFC 2104 HMAC-SHA1 over the same key and message.
    let expected = base64_encode(&hmac_sha1(b"cs&ts", base_string.as_bytes()));
    let params = parse_authorization_header(&header)?;
    assert_eq!(
        params[OAUTH_SIGNATURE],
        utf8_percent_encode(&expected, &OAUTH_ENCODE_SET).to_string()
    );

    // Fixed message, independently computed with openssl.
    assert_eq!(
        base64_encode(&hmac_sha1(
            b"cs&ts",
            b"GET&http%3A%2F%2Flocalhost%2F&oauth_consumer_key%3Dck",
        )),
        "1ZlshzzG8zb55+Cgs2UhHEjHzSw="
    );
    Ok(())
}

#[test]
fn test_plaintext_signature() -> Result<()> {
    let header = twitter_builder()
        .with_signature_method(SignatureMethod::PlainText)
        .with_consumer_secret("cs")
        .with_token_secret("")
        .build()?;

    let params = parse_authorization_header(&header)?;
    // base64("cs&") = "Y3Mm"
    assert_eq!(params[OAUTH_SIGNATURE], "Y3Mm");
    assert_eq!(params[OAUTH_SIGNATURE_METHOD], "PLAINTEXT");
    Ok(())
}
