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

use crate::Result;
use std::fmt::Debug;

/// DecodeSecret turns a possibly encoded secret into its plain form.
///
/// Hosts that keep consumer secrets or token secrets encrypted or obfuscated in
/// their configuration plug their decoder in here. Plain values must be returned
/// unchanged.
pub trait DecodeSecret: Debug + Send + Sync + 'static {
    /// Decode the secret.
    ///
    /// Returning an error fails the signing operation before any digest is computed.
    fn decode_secret(&self, value: &str) -> Result<String>;
}

/// PlainSecret returns every secret as is.
///
/// This is used when no secret decoder is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSecret;

impl DecodeSecret for PlainSecret {
    fn decode_secret(&self, value: &str) -> Result<String> {
        Ok(value.to_string())
    }
}
