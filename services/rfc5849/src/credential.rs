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

use std::fmt::{Debug, Formatter};

use oauthsign_core::utils::{is_blank, Redact};
use oauthsign_core::SigningCredential;

/// Credential for OAuth 1.0a, with every expression already resolved and every
/// secret already decoded.
#[derive(Clone, Default)]
pub struct Credential {
    /// Consumer key, sent as `oauth_consumer_key`.
    pub consumer_key: String,
    /// Consumer secret, first half of the signing key.
    pub consumer_secret: String,
    /// Access token, sent as `oauth_token`.
    pub access_token: Option<String>,
    /// Token secret, second half of the signing key.
    pub token_secret: Option<String>,
}

impl Credential {
    /// Create a new credential with consumer key and consumer secret.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            access_token: None,
            token_secret: None,
        }
    }

    /// Set the access token and its secret.
    pub fn with_token(
        mut self,
        access_token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        self.access_token = Some(access_token.into());
        self.token_secret = Some(token_secret.into());
        self
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("access_token", &self.access_token)
            .field("token_secret", &Redact::from(&self.token_secret))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !is_blank(&self.consumer_key) && !is_blank(&self.consumer_secret)
    }
}
