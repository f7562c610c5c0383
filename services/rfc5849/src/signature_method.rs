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

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::warn;
use oauthsign_core::hash::{hmac_md5, hmac_sha1, hmac_sha256, hmac_sha384, hmac_sha512};
use oauthsign_core::Error;

/// SignatureMethod maps to `oauth_signature_method`.
///
/// - [Signature](https://www.rfc-editor.org/rfc/rfc5849#section-3.4)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SignatureMethod {
    /// `PLAINTEXT`: the signature is the signing key itself.
    PlainText,
    /// `HMAC-MD5`
    HmacMd5,
    /// `HMAC-SHA1`
    #[default]
    HmacSha1,
    /// `HMAC-SHA256`
    HmacSha256,
    /// `HMAC-SHA384`
    HmacSha384,
    /// `HMAC-SHA512`
    HmacSha512,
}

impl SignatureMethod {
    /// All supported signature methods.
    pub const ALL: [SignatureMethod; 6] = [
        SignatureMethod::PlainText,
        SignatureMethod::HmacMd5,
        SignatureMethod::HmacSha1,
        SignatureMethod::HmacSha256,
        SignatureMethod::HmacSha384,
        SignatureMethod::HmacSha512,
    ];

    /// The wire name used as `oauth_signature_method`, always upper-cased.
    pub fn formal_name(&self) -> &'static str {
        match self {
            SignatureMethod::PlainText => "PLAINTEXT",
            SignatureMethod::HmacMd5 => "HMAC-MD5",
            SignatureMethod::HmacSha1 => "HMAC-SHA1",
            SignatureMethod::HmacSha256 => "HMAC-SHA256",
            SignatureMethod::HmacSha384 => "HMAC-SHA384",
            SignatureMethod::HmacSha512 => "HMAC-SHA512",
        }
    }

    /// The configuration name of this method, like `HMAC_SHA1`.
    pub fn name(&self) -> &'static str {
        match self {
            SignatureMethod::PlainText => "PLAIN_TEXT",
            SignatureMethod::HmacMd5 => "HMAC_MD5",
            SignatureMethod::HmacSha1 => "HMAC_SHA1",
            SignatureMethod::HmacSha256 => "HMAC_SHA256",
            SignatureMethod::HmacSha384 => "HMAC_SHA384",
            SignatureMethod::HmacSha512 => "HMAC_SHA512",
        }
    }

    /// Digest the message with given signing key.
    ///
    /// Returns raw bytes, callers base64 encode them.
    pub fn digest(&self, key: &[u8], message: &[u8]) -> Vec<u8> {
        match self {
            SignatureMethod::PlainText => key.to_vec(),
            SignatureMethod::HmacMd5 => hmac_md5(key, message),
            SignatureMethod::HmacSha1 => hmac_sha1(key, message),
            SignatureMethod::HmacSha256 => hmac_sha256(key, message),
            SignatureMethod::HmacSha384 => hmac_sha384(key, message),
            SignatureMethod::HmacSha512 => hmac_sha512(key, message),
        }
    }

    /// Look up a signature method by its wire name or configuration name,
    /// ignoring case.
    ///
    /// Unknown names fall back to [`SignatureMethod::HmacSha1`]. Use
    /// [`SignatureMethod::from_str`] to reject them instead.
    pub fn lookup(name: &str) -> SignatureMethod {
        match SignatureMethod::from_str(name) {
            Ok(m) => m,
            Err(_) => {
                if !name.trim().is_empty() {
                    warn!("unknown signature method {name:?}, fallback to HMAC-SHA1");
                }
                SignatureMethod::default()
            }
        }
    }
}

impl FromStr for SignatureMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SignatureMethod::ALL
            .into_iter()
            .find(|m| m.formal_name().eq_ignore_ascii_case(s) || m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::config_invalid(format!("unsupported signature method: {s}")))
    }
}

impl Display for SignatureMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.formal_name())
    }
}
