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

use http::Uri;
use log::debug;
use oauthsign_core::utils::{is_blank, Redact};
use oauthsign_core::{Context, Error, MessageContext, Result, SigningCredential};
use serde::Deserialize;

use crate::constants::*;
use crate::{Credential, SignatureBuilder, SignatureMethod};

/// AuthorizationSpec carries all the configuration for RFC 5849 signing.
///
/// Every string field may contain expressions like `%message{key}` that are
/// resolved against the message being signed. Secrets may also reference the
/// environment with `%env{NAME}` and are decoded by the context before use.
///
/// An AuthorizationSpec is immutable once built and can be shared by concurrent callers,
/// every call to [`AuthorizationSpec::builder_for`] yields a fresh builder.
#[derive(Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AuthorizationSpec {
    /// `consumer_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OAUTH_CONSUMER_KEY_ENV`]
    pub consumer_key: Option<String>,
    /// `consumer_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OAUTH_CONSUMER_SECRET_ENV`]
    pub consumer_secret: Option<String>,
    /// `access_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OAUTH_ACCESS_TOKEN_ENV`]
    pub access_token: Option<String>,
    /// `token_secret` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OAUTH_TOKEN_SECRET_ENV`]
    pub token_secret: Option<String>,
    /// Fixed `oauth_nonce`, derived from the message unique id if blank.
    pub nonce: Option<String>,
    /// `realm` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OAUTH_REALM_ENV`]
    pub realm: Option<String>,
    /// `oauth_version`, `1.0` if blank.
    pub version: Option<String>,
    /// `oauth_verifier`
    pub verifier: Option<String>,
    /// Keep blank protocol parameters while signing.
    pub include_empty_params: bool,
    /// `signature_method` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`OAUTH_SIGNATURE_METHOD_ENV`]
    ///
    /// Accepts wire names like `HMAC-SHA256` or names like `HMAC_SHA256`.
    pub signature_method: Option<String>,
}

impl AuthorizationSpec {
    /// Create a new AuthorizationSpec
    pub fn new() -> Self {
        Self::default()
    }

    /// Set consumer_key
    pub fn with_consumer_key(mut self, v: impl Into<String>) -> Self {
        self.consumer_key = Some(v.into());
        self
    }

    /// Set consumer_secret
    pub fn with_consumer_secret(mut self, v: impl Into<String>) -> Self {
        self.consumer_secret = Some(v.into());
        self
    }

    /// Set access_token
    pub fn with_access_token(mut self, v: impl Into<String>) -> Self {
        self.access_token = Some(v.into());
        self
    }

    /// Set token_secret
    pub fn with_token_secret(mut self, v: impl Into<String>) -> Self {
        self.token_secret = Some(v.into());
        self
    }

    /// Set nonce
    pub fn with_nonce(mut self, v: impl Into<String>) -> Self {
        self.nonce = Some(v.into());
        self
    }

    /// Set realm
    pub fn with_realm(mut self, v: impl Into<String>) -> Self {
        self.realm = Some(v.into());
        self
    }

    /// Set version
    pub fn with_version(mut self, v: impl Into<String>) -> Self {
        self.version = Some(v.into());
        self
    }

    /// Set verifier
    pub fn with_verifier(mut self, v: impl Into<String>) -> Self {
        self.verifier = Some(v.into());
        self
    }

    /// Set include_empty_params
    pub fn with_include_empty_params(mut self, v: bool) -> Self {
        self.include_empty_params = v;
        self
    }

    /// Set signature_method
    pub fn with_signature_method(mut self, v: impl Into<String>) -> Self {
        self.signature_method = Some(v.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(OAUTH_CONSUMER_KEY_ENV) {
            self.consumer_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OAUTH_CONSUMER_SECRET_ENV) {
            self.consumer_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OAUTH_ACCESS_TOKEN_ENV) {
            self.access_token.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OAUTH_TOKEN_SECRET_ENV) {
            self.token_secret.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OAUTH_SIGNATURE_METHOD_ENV) {
            self.signature_method.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(OAUTH_REALM_ENV) {
            self.realm.get_or_insert(v);
        }

        self
    }

    /// Resolve the signature method for given message.
    ///
    /// Unknown or missing names fall back to [`SignatureMethod::HmacSha1`].
    pub fn signature_method(&self, msg: &dyn MessageContext) -> SignatureMethod {
        match &self.signature_method {
            Some(v) => SignatureMethod::lookup(&msg.resolve(v)),
            None => SignatureMethod::default(),
        }
    }

    /// Resolve the credential for given message.
    ///
    /// Secrets are resolved against the environment first, then against the
    /// message, and decoded by the context at last.
    pub fn credential(&self, ctx: &Context, msg: &dyn MessageContext) -> Result<Credential> {
        let consumer_key = resolve(msg, &self.consumer_key);
        if is_blank(&consumer_key) {
            return Err(Error::config_invalid("consumer key must not be blank"));
        }
        let consumer_secret = resolve_secret(ctx, msg, &self.consumer_secret)?;
        if is_blank(&consumer_secret) {
            return Err(Error::config_invalid("consumer secret must not be blank"));
        }

        Ok(Credential {
            consumer_key,
            consumer_secret,
            access_token: Some(resolve(msg, &self.access_token)).filter(|v| !is_blank(v)),
            token_secret: Some(resolve_secret(ctx, msg, &self.token_secret)?)
                .filter(|v| !is_blank(v)),
        })
    }

    /// Create a [`SignatureBuilder`] for given message.
    ///
    /// The returned builder still needs a method and an url.
    pub fn builder_for(&self, ctx: &Context, msg: &dyn MessageContext) -> Result<SignatureBuilder> {
        let cred = self.credential(ctx, msg)?;
        self.builder_with_credential(msg, &cred)
    }

    /// Create a [`SignatureBuilder`] for given message bound to a request.
    pub fn builder_for_request(
        &self,
        ctx: &Context,
        method: &str,
        url: Uri,
        msg: &dyn MessageContext,
    ) -> Result<SignatureBuilder> {
        Ok(self
            .builder_for(ctx, msg)?
            .with_method(method)
            .with_url(url))
    }

    /// Create a [`SignatureBuilder`] with an already resolved credential.
    ///
    /// Everything except the credential is still taken from this spec.
    pub fn builder_with_credential(
        &self,
        msg: &dyn MessageContext,
        cred: &Credential,
    ) -> Result<SignatureBuilder> {
        if !cred.is_valid() {
            return Err(Error::config_invalid(
                "consumer key and consumer secret must not be blank",
            ));
        }

        let nonce = match resolve(msg, &self.nonce) {
            v if is_blank(&v) => msg.unique_id().replace([':', '-'], ""),
            v => v,
        };
        let signature_method = self.signature_method(msg);
        debug!(
            "building {signature_method} signature for consumer key {} with nonce {nonce}",
            cred.consumer_key
        );

        Ok(SignatureBuilder::new()
            .with_consumer_key(&cred.consumer_key)
            .with_consumer_secret(&cred.consumer_secret)
            .with_access_token(cred.access_token.clone().unwrap_or_default())
            .with_token_secret(cred.token_secret.clone().unwrap_or_default())
            .with_nonce(nonce)
            .with_realm(resolve(msg, &self.realm))
            .with_version(self.version.clone().unwrap_or_default())
            .with_verifier(resolve(msg, &self.verifier))
            .with_include_empty_params(self.include_empty_params)
            .with_signature_method(signature_method))
    }
}

impl Debug for AuthorizationSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationSpec")
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
            .finish()
    }
}

fn resolve(msg: &dyn MessageContext, v: &Option<String>) -> String {
    v.as_deref().map(|v| msg.resolve(v)).unwrap_or_default()
}

fn resolve_secret(ctx: &Context, msg: &dyn MessageContext, v: &Option<String>) -> Result<String> {
    match v {
        Some(v) => ctx.decode_secret(&msg.resolve(&ctx.resolve_external(v))),
        None => Ok(String::new()),
    }
}
