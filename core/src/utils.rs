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

//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a string by replacing all but the first and last three characters with asterisks.
///
/// - If the input string has fewer than 12 characters, it should be entirely redacted.
///   Characters are counted, not bytes.
/// - If the input string has 12 or more characters, only the first three and the last three.
///
/// Consumer secrets and token secrets must only ever be printed through this type.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.chars().count();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 {
            f.write_str("***")
        } else {
            // Secrets may contain multi-byte chars, only cut at char boundaries.
            let head: String = self.0.chars().take(3).collect();
            let tail: String = {
                let mut t: Vec<char> = self.0.chars().rev().take(3).collect();
                t.reverse();
                t.into_iter().collect()
            };
            f.write_str(&head)?;
            f.write_str("***")?;
            f.write_str(&tail)
        }
    }
}

/// Returns true if the value is empty or only contains whitespace.
#[inline]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Replace every `%{scheme}{key}` token in `input` with the value returned by `lookup`.
///
/// Tokens whose key cannot be found, and a trailing token without its closing
/// brace, are kept verbatim.
///
/// ```
/// use oauthsign_core::utils::interpolate;
///
/// let v = interpolate("%env{USER}@%env{HOST}", "env", |k| (k == "USER").then(|| "alice".to_string()));
/// assert_eq!(v, "alice@%env{HOST}");
/// ```
pub fn interpolate(input: &str, scheme: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let open = format!("%{scheme}{{");
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(&open) {
        out.push_str(&rest[..start]);
        let after = &rest[start + open.len()..];
        let Some(end) = after.find('}') else {
            rest = &rest[start..];
            break;
        };

        let key = &after[..end];
        match lookup(key) {
            Some(v) => out.push_str(&v),
            None => out.push_str(&rest[start..start + open.len() + end + 1]),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}
