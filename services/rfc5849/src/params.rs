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

//! Parameter collections used while building a signature.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use oauthsign_core::utils::is_blank;
use oauthsign_core::{Error, Result};

use crate::constants::OAUTH_SCHEME;

/// Parameter name compared without regard to case.
///
/// The spelling of the first inserted name is the one that gets rendered.
#[derive(Debug, Clone)]
struct CaseInsensitive(String);

impl CaseInsensitive {
    fn folded(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars().flat_map(char::to_lowercase)
    }
}

impl PartialEq for CaseInsensitive {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CaseInsensitive {}

impl PartialOrd for CaseInsensitive {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CaseInsensitive {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded().cmp(other.folded())
    }
}

/// Request parameters that make up the signature base string.
///
/// Keys are unique ignoring case and iterate in case-insensitive ascending
/// order. Inserting an existing key replaces its value but keeps the spelling
/// of the key inserted first.
#[derive(Debug, Clone, Default)]
pub struct SignatureParams {
    inner: BTreeMap<CaseInsensitive, String>,
}

impl SignatureParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, replacing the value of a key that only differs in case.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.insert(CaseInsensitive(key.into()), value.into());
    }

    /// Insert all parameters, later pairs win.
    pub fn extend<K, V>(&mut self, params: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in params {
            self.insert(k, v);
        }
    }

    /// Insert every pair of a raw query string.
    ///
    /// The query is split on `&` and every pair on its first `=`. Values are
    /// taken as is and never decoded. Empty pairs are skipped, a pair without
    /// `=` is inserted with an empty value.
    pub fn extend_from_query(&mut self, query: &str) {
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            match pair.split_once('=') {
                Some((k, v)) => self.insert(k, v),
                None => self.insert(pair, ""),
            }
        }
    }

    /// Get a value by key, ignoring case.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(&CaseInsensitive(key.to_string()))
            .map(|v| v.as_str())
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over parameters in signing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.0.as_str(), v.as_str()))
    }

    /// Render as `key1=value1&key2=value2` in signing order.
    ///
    /// ```shell
    /// [(b, 2), (A, 1)] => "A=1&b=2"
    /// ```
    pub fn to_query_string(&self) -> String {
        let mut s = String::with_capacity(16);

        for (idx, (k, v)) in self.iter().enumerate() {
            if idx != 0 {
                s.push('&');
            }

            s.push_str(k);
            s.push('=');
            s.push_str(v);
        }

        s
    }
}

/// Remove every parameter with a blank value, unless `include_empty` is set.
///
/// Applying this filter more than once has no further effect.
pub fn filter_blank(
    mut params: BTreeMap<String, String>,
    include_empty: bool,
) -> BTreeMap<String, String> {
    if !include_empty {
        params.retain(|_, v| !is_blank(v));
    }
    params
}

/// Render authorization parameters as an `Authorization` header value.
///
/// Every value is wrapped in double quotes, blank values render as `key=""`.
///
/// ```shell
/// [(oauth_nonce, abc), (realm, "")] => OAuth oauth_nonce="abc", realm=""
/// ```
pub fn render_authorization_header(params: &BTreeMap<String, String>) -> String {
    let mut s = String::with_capacity(256);
    s.push_str(OAUTH_SCHEME);
    s.push(' ');

    for (idx, (k, v)) in params.iter().enumerate() {
        if idx != 0 {
            s.push_str(", ");
        }

        s.push_str(k);
        s.push_str("=\"");
        s.push_str(v);
        s.push('"');
    }

    s
}

/// Parse an `Authorization` header value built by [`render_authorization_header`].
///
/// Values are returned without their quotes and are not decoded.
pub fn parse_authorization_header(value: &str) -> Result<BTreeMap<String, String>> {
    let rest = value
        .trim()
        .strip_prefix(OAUTH_SCHEME)
        .ok_or_else(|| Error::request_invalid("authorization header is not OAuth"))?;

    let mut params = BTreeMap::new();
    let mut rest = rest.trim_start();
    while !rest.is_empty() {
        let (key, after) = rest
            .split_once("=\"")
            .ok_or_else(|| Error::request_invalid(format!("malformed parameter: {rest}")))?;
        let (value, after) = after
            .split_once('"')
            .ok_or_else(|| Error::request_invalid(format!("unterminated value for {key}")))?;

        params.insert(key.trim().to_string(), value.to_string());
        rest = after.trim_start().trim_start_matches(',').trim_start();
    }

    Ok(params)
}
