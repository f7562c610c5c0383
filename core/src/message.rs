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
use std::collections::HashMap;
use std::fmt::Debug;

/// Expression scheme resolved against message metadata: `%message{key}`.
const MESSAGE_SCHEME: &str = "message";
/// Metadata key that resolves to the message unique id: `%message{%uniqueId}`.
const UNIQUE_ID_KEY: &str = "%uniqueId";

/// MessageContext is the per-message capability used while building a signature.
///
/// Configuration fields may carry expressions which are resolved against the
/// message that is about to be sent, so the same configuration can produce
/// different values for every request.
pub trait MessageContext: Debug + Send + Sync {
    /// Resolve all expressions in `expression`.
    ///
    /// Values without any expression must be returned unchanged.
    fn resolve(&self, expression: &str) -> String;

    /// The unique id of this message.
    ///
    /// Used to derive `oauth_nonce` when none has been configured.
    fn unique_id(&self) -> String;
}

/// Message is a simple message carrying a unique id and string metadata.
#[derive(Debug, Clone)]
pub struct Message {
    unique_id: String,
    metadata: HashMap<String, String>,
}

impl Default for Message {
    fn default() -> Self {
        Self::new()
    }
}

impl Message {
    /// Create a new message with a random unique id.
    pub fn new() -> Self {
        Self {
            unique_id: uuid::Uuid::new_v4().to_string(),
            metadata: HashMap::new(),
        }
    }

    /// Create a new message with given unique id.
    pub fn with_unique_id(unique_id: impl Into<String>) -> Self {
        Self {
            unique_id: unique_id.into(),
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Insert or replace a metadata entry.
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Get a metadata value by key.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(|v| v.as_str())
    }

    /// Get all metadata entries.
    pub fn metadata_map(&self) -> &HashMap<String, String> {
        &self.metadata
    }
}

impl MessageContext for Message {
    fn resolve(&self, expression: &str) -> String {
        interpolate(expression, MESSAGE_SCHEME, |key| {
            if key == UNIQUE_ID_KEY {
                return Some(self.unique_id.clone());
            }
            let v = self.metadata.get(key).cloned();
            if v.is_none() {
                log::debug!("metadata key {key} not found in message {}", self.unique_id);
            }
            v
        })
    }

    fn unique_id(&self) -> String {
        self.unique_id.clone()
    }
}
