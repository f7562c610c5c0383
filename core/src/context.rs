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

use crate::utils::interpolate;
use crate::{DecodeSecret, Env, Error, NoopEnv, PlainSecret, Result};
use std::fmt::Debug;
use std::sync::Arc;

/// Expression scheme resolved against the environment: `%env{NAME}`.
const ENV_SCHEME: &str = "env";

/// Context provides the host capabilities for request signing.
///
/// ## Important
///
/// oauthsign provides NO default implementations that reach outside the process.
/// Any unconfigured component uses a no-op implementation: the environment is
/// empty and secrets are returned as is.
///
/// ## Example
///
/// ```
/// use oauthsign_core::{Context, OsEnv};
///
/// // Create a context with explicit implementations
/// let ctx = Context::new()
///     .with_env(OsEnv);  // Optionally configure environment implementation
/// ```
#[derive(Clone)]
pub struct Context {
    env: Arc<dyn Env>,
    secret: Arc<dyn DecodeSecret>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("env", &self.env)
            .field("secret", &self.secret)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with no-op implementations.
    ///
    /// Use the `with_*` methods to configure the components you need.
    pub fn new() -> Self {
        Self {
            env: Arc::new(NoopEnv),
            secret: Arc::new(PlainSecret),
        }
    }

    /// Replace the environment implementation.
    pub fn with_env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Replace the secret decoder implementation.
    pub fn with_decode_secret(mut self, secret: impl DecodeSecret) -> Self {
        self.secret = Arc::new(secret);
        self
    }

    /// Get the environment variable.
    ///
    /// - Returns `Some(v)` if the environment variable is found and is valid utf-8.
    /// - Returns `None` if the environment variable is not found or value is invalid.
    #[inline]
    pub fn env_var(&self, key: &str) -> Option<String> {
        self.env.var(key)
    }

    /// Resolve `%env{NAME}` references against the configured environment.
    ///
    /// Values that reference variables which are not set are kept verbatim.
    pub fn resolve_external(&self, value: &str) -> String {
        interpolate(value, ENV_SCHEME, |key| self.env.var(key))
    }

    /// Decode a possibly encoded secret.
    ///
    /// Failures are reported as configuration errors.
    pub fn decode_secret(&self, value: &str) -> Result<String> {
        self.secret.decode_secret(value).map_err(|err| {
            Error::config_invalid("secret could not be decoded").with_source(err)
        })
    }
}
