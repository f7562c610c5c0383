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

//! Builder for the RFC 5849 `Authorization` header.

use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter, Write};

use http::Uri;
use log::debug;
use oauthsign_core::hash::base64_encode;
use oauthsign_core::time::{format_unix_timestamp, now, DateTime};
use oauthsign_core::utils::{is_blank, Redact};
use oauthsign_core::{Error, Result};
use percent_encoding::utf8_percent_encode;

use crate::constants::*;
use crate::params::{filter_blank, render_authorization_header, SignatureParams};
use crate::SignatureMethod;

/// SignatureBuilder builds the `Authorization` header for a single request.
///
/// It is usually created by [`crate::AuthorizationSpec::builder_for`] but can be
/// configured directly as well. A builder holds per request state and must not be
/// shared between requests.
///
/// - [Signature](https://www.rfc-editor.org/rfc/rfc5849#section-3.4)
///
/// ```
/// use oauthsign_rfc5849::{SignatureBuilder, SignatureMethod};
///
/// # fn main() -> oauthsign_core::Result<()> {
/// let header = SignatureBuilder::new()
///     .with_method("POST")
///     .with_url("http://localhost/photos?size=original".parse()?)
///     .with_consumer_key("consumerKey")
///     .with_consumer_secret("consumerSecret")
///     .with_nonce("7d8f3e4a")
///     .with_signature_method(SignatureMethod::HmacSha256)
///     .build()?;
///
/// assert!(header.starts_with("OAuth "));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SignatureBuilder {
    url: Option<Uri>,
    method: String,
    consumer_key: String,
    consumer_secret: String,
    access_token: String,
    token_secret: String,
    nonce: String,
    realm: String,
    version: String,
    verifier: String,
    include_empty_params: bool,
    signature_method: SignatureMethod,
    additional_data: Vec<(String, String)>,

    time: Option<DateTime>,
}

impl Default for SignatureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for SignatureBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureBuilder")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("access_token", &self.access_token)
            .field("token_secret", &Redact::from(&self.token_secret))
            .field("nonce", &self.nonce)
            .field("realm", &self.realm)
            .field("version", &self.version)
            .field("verifier", &self.verifier)
            .field("include_empty_params", &self.include_empty_params)
            .field("signature_method", &self.signature_method)
            .field("additional_data", &self.additional_data)
            .finish()
    }
}

impl SignatureBuilder {
    /// Create a builder with default settings: version `1.0`, `HMAC-SHA1`,
    /// empty realm, verifier, access token and token secret.
    pub fn new() -> Self {
        Self {
            url: None,
            method: String::new(),
            consumer_key: String::new(),
            consumer_secret: String::new(),
            access_token: String::new(),
            token_secret: String::new(),
            nonce: String::new(),
            realm: String::new(),
            version: DEFAULT_VERSION.to_string(),
            verifier: String::new(),
            include_empty_params: false,
            signature_method: SignatureMethod::default(),
            additional_data: Vec::new(),

            time: None,
        }
    }

    /// Set the request url, including any query parameters.
    pub fn with_url(mut self, url: Uri) -> Self {
        self.url = Some(url);
        self
    }

    /// Set the request method, case-insensitive.
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set `oauth_consumer_key`.
    pub fn with_consumer_key(mut self, v: impl Into<String>) -> Self {
        self.consumer_key = v.into();
        self
    }

    /// Set the consumer secret.
    pub fn with_consumer_secret(mut self, v: impl Into<String>) -> Self {
        self.consumer_secret = v.into();
        self
    }

    /// Set `oauth_token`.
    pub fn with_access_token(mut self, v: impl Into<String>) -> Self {
        self.access_token = v.into();
        self
    }

    /// Set the token secret.
    pub fn with_token_secret(mut self, v: impl Into<String>) -> Self {
        self.token_secret = v.into();
        self
    }

    /// Set `oauth_nonce`.
    pub fn with_nonce(mut self, v: impl Into<String>) -> Self {
        self.nonce = v.into();
        self
    }

    /// Set `realm`, blank values become empty.
    pub fn with_realm(mut self, v: impl Into<String>) -> Self {
        self.realm = non_blank_or(v.into(), "");
        self
    }

    /// Set `oauth_version`, blank values become `1.0`.
    pub fn with_version(mut self, v: impl Into<String>) -> Self {
        self.version = non_blank_or(v.into(), DEFAULT_VERSION);
        self
    }

    /// Set `oauth_verifier`, blank values become empty.
    pub fn with_verifier(mut self, v: impl Into<String>) -> Self {
        self.verifier = non_blank_or(v.into(), "");
        self
    }

    /// Keep blank protocol parameters in the signature and the header.
    ///
    /// Some servers require empty parameters to be signed.
    pub fn with_include_empty_params(mut self, v: bool) -> Self {
        self.include_empty_params = v;
        self
    }

    /// Set `oauth_signature_method`.
    pub fn with_signature_method(mut self, v: SignatureMethod) -> Self {
        self.signature_method = v;
        self
    }

    /// Set additional parameters that must be covered by the signature, like
    /// the fields of an `application/x-www-form-urlencoded` body.
    ///
    /// Values must already be percent encoded. Replaces previously set data.
    pub fn with_additional_data<K, V>(mut self, data: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.additional_data = data
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Build the `Authorization` header value.
    ///
    /// Returns a string like `OAuth oauth_consumer_key="...", ..., realm=""`.
    pub fn build(&self) -> Result<String> {
        let url = self.validate()?;
        let timestamp = format_unix_timestamp(self.time.unwrap_or_else(now));

        let oauth_params = filter_blank(self.oauth_params(&timestamp), self.include_empty_params);
        let base_string = self.signature_base_string(url, &oauth_params)?;
        debug!("signature base string: {base_string}");

        let signature = {
            let key = self.signing_key();
            let digest = self
                .signature_method
                .digest(key.as_bytes(), base_string.as_bytes());
            utf8_percent_encode(&base64_encode(&digest), &OAUTH_ENCODE_SET).to_string()
        };

        // signature and realm are added after filtering, they are always present.
        let mut auth_params = oauth_params;
        auth_params.insert(OAUTH_SIGNATURE.to_string(), signature);
        auth_params.insert(REALM.to_string(), self.realm.clone());

        Ok(render_authorization_header(&auth_params))
    }

    /// Build the signature base string for given `oauth_timestamp`.
    ///
    /// This is the exact string [`SignatureBuilder::build`] signs.
    pub fn base_string(&self, timestamp: &str) -> Result<String> {
        let url = self.validate()?;
        let oauth_params = filter_blank(self.oauth_params(timestamp), self.include_empty_params);
        self.signature_base_string(url, &oauth_params)
    }

    fn validate(&self) -> Result<&Uri> {
        ensure_not_blank(&self.consumer_key, "consumer_key")?;
        ensure_not_blank(&self.consumer_secret, "consumer_secret")?;
        ensure_not_blank(&self.nonce, "nonce")?;
        ensure_not_blank(&self.method, "method")?;
        self.url
            .as_ref()
            .ok_or_else(|| Error::config_invalid("url is required"))
    }

    fn oauth_params(&self, timestamp: &str) -> BTreeMap<String, String> {
        BTreeMap::from([
            (OAUTH_CONSUMER_KEY.to_string(), self.consumer_key.clone()),
            (
                OAUTH_SIGNATURE_METHOD.to_string(),
                self.signature_method.formal_name().to_string(),
            ),
            (OAUTH_TIMESTAMP.to_string(), timestamp.to_string()),
            (OAUTH_VERSION.to_string(), self.version.clone()),
            (OAUTH_NONCE.to_string(), self.nonce.clone()),
            (OAUTH_TOKEN.to_string(), self.access_token.clone()),
            (OAUTH_VERIFIER.to_string(), self.verifier.clone()),
        ])
    }

    /// Signing key: `consumer_secret&token_secret`.
    ///
    /// The `&` is always present, even if there is no token secret.
    fn signing_key(&self) -> String {
        format!("{}&{}", self.consumer_secret, self.token_secret)
    }

    /// Construct signature base string
    ///
    /// ## Format
    ///
    /// ```text
    /// UPPERCASE(method) + "&" +
    /// encode(base string uri) + "&" +
    /// encode(normalized parameters)
    /// ```
    ///
    /// Parameters are collected in this order, later ones replace earlier ones
    /// with the same name ignoring case:
    ///
    /// 1. filtered protocol parameters
    /// 2. additional data
    /// 3. url query parameters
    ///
    /// ## Reference
    ///
    /// - [Signature Base String](https://www.rfc-editor.org/rfc/rfc5849#section-3.4.1)
    fn signature_base_string(
        &self,
        url: &Uri,
        oauth_params: &BTreeMap<String, String>,
    ) -> Result<String> {
        let mut params = SignatureParams::new();
        params.extend(oauth_params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        params.extend(
            self.additional_data
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        );
        // Query parameters are inserted last and win over protocol parameters
        // and additional data sharing the same name.
        if let Some(query) = url.query() {
            params.extend_from_query(query);
        }

        let mut s = String::new();
        write!(
            s,
            "{}&{}&{}",
            self.method.trim().to_uppercase(),
            utf8_percent_encode(&base_string_uri(url)?, &OAUTH_ENCODE_SET),
            utf8_percent_encode(&params.to_query_string(), &OAUTH_ENCODE_SET)
        )?;
        Ok(s)
    }
}

/// Construct base string uri: `scheme://host[:port]/path`
///
/// Scheme and host are lowercased, query and fragment are dropped and the
/// default port of the scheme is omitted.
///
/// ## Reference
///
/// - [Base String URI](https://www.rfc-editor.org/rfc/rfc5849#section-3.4.1.2)
pub fn base_string_uri(url: &Uri) -> Result<String> {
    let scheme = url
        .scheme_str()
        .ok_or_else(|| Error::encoding_invalid(format!("url {url} has no scheme")))?
        .to_ascii_lowercase();
    let host = url
        .host()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| Error::encoding_invalid(format!("url {url} has no host")))?
        .to_ascii_lowercase();

    let mut s = String::with_capacity(scheme.len() + host.len() + url.path().len() + 9);
    write!(s, "{scheme}://{host}")?;
    match (scheme.as_str(), url.port_u16()) {
        (_, None) | ("http", Some(80)) | ("https", Some(443)) => {}
        (_, Some(port)) => write!(s, ":{port}")?,
    }
    s.push_str(url.path());

    Ok(s)
}

fn ensure_not_blank(v: &str, name: &str) -> Result<()> {
    if is_blank(v) {
        return Err(Error::config_invalid(format!("{name} must not be blank")));
    }
    Ok(())
}

fn non_blank_or(v: String, default: &str) -> String {
    if is_blank(&v) {
        default.to_string()
    } else {
        v
    }
}
