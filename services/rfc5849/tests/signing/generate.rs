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
use http::header::AUTHORIZATION;
use http::{Method, Request};
use log::debug;
use oauthsign_core::{Message, SignRequest};
use oauthsign_rfc5849::constants::*;
use oauthsign_rfc5849::{parse_authorization_header, HeaderGenerator, RequestSigner};
use pretty_assertions::assert_eq;

use super::{fixed_time, init_signing_test};

#[test]
fn test_generated_header_matches_signed_request() -> Result<()> {
    let (ctx, spec) = init_signing_test();
    let msg = Message::with_unique_id("00000000-0000-0000-0000-000000000001")
        .with_metadata("path", "statuses/update.json")
        .with_metadata("status", "Hello World");

    let mut generated = msg.clone();
    let header = HeaderGenerator::new(spec.clone(), "https://api.example.com/%message{path}")
        .with_form_fields(["status"])
        .with_time(fixed_time())
        .generate(&ctx, &mut generated)?;
    assert_eq!(
        generated.metadata(DEFAULT_TARGET_KEY),
        Some(header.as_str())
    );

    let signer = RequestSigner::new(spec)
        .with_message_context(msg)
        .with_additional_data([("status", "Hello+World")])
        .with_time(fixed_time());

    let mut req = Request::new(String::new());
    *req.method_mut() = Method::POST;
    *req.uri_mut() = "https://api.example.com/statuses/update.json".parse()?;
    let (mut parts, body) = req.into_parts();
    signer.sign_request(&ctx, &mut parts, None)?;
    let req = Request::from_parts(parts, body);
    debug!("signed request: {req:?}");

    let signed = req
        .headers()
        .get(AUTHORIZATION)
        .expect("authorization header must be set")
        .to_str()?;
    assert_eq!(signed, header);

    let params = parse_authorization_header(signed)?;
    assert_eq!(params[OAUTH_NONCE], "00000000000000000000000000000001");
    Ok(())
}

#[test]
fn test_generate_twice_overwrites_metadata() -> Result<()> {
    let (ctx, spec) = init_signing_test();
    let mut msg = Message::new();

    let generator = HeaderGenerator::new(spec, "http://localhost/").with_http_method("GET");
    let first = generator.generate(&ctx, &mut msg)?;
    let second = generator
        .clone()
        .with_time(fixed_time())
        .generate(&ctx, &mut msg)?;

    assert_ne!(first, second);
    assert_eq!(msg.metadata(DEFAULT_TARGET_KEY), Some(second.as_str()));
    assert_eq!(msg.metadata_map().len(), 1);
    Ok(())
}
