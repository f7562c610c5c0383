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

use http::Uri;
use log::debug;
use oauthsign_core::time::DateTime;
use oauthsign_core::utils::is_blank;
use oauthsign_core::{Context, Error, Message, MessageContext, Result};

use crate::constants::{DEFAULT_HTTP_METHOD, DEFAULT_TARGET_KEY};
use crate::AuthorizationSpec;

/// HeaderGenerator builds the `Authorization` header without sending anything
/// and stores it as message metadata.
///
/// Building the header needs no connectivity, so it can be generated ahead of
/// time and attached to the outgoing request later.
///
/// If the body is going to be `application/x-www-form-urlencoded`, the form
/// fields must be signed too. List the metadata keys that make up the form with
/// [`HeaderGenerator::with_form_fields`].
#[derive(Debug, Clone)]
pub struct HeaderGenerator {
    spec: AuthorizationSpec,
    url: String,
    http_method: String,
    target_key: String,
    form_fields: Vec<String>,

    time: Option<DateTime>,
}

impl HeaderGenerator {
    /// Create a generator for given url, including any query parameters.
    ///
    /// `url` may contain `%message{key}` expressions.
    pub fn new(spec: AuthorizationSpec, url: impl Into<String>) -> Self {
        Self {
            spec,
            url: url.into(),
            http_method: DEFAULT_HTTP_METHOD.to_string(),
            target_key: DEFAULT_TARGET_KEY.to_string(),
            form_fields: Vec::new(),
            time: None,
        }
    }

    /// Set the http method, `POST` by default.
    ///
    /// May contain `%message{key}` expressions.
    pub fn with_http_method(mut self, method: impl Into<String>) -> Self {
        self.http_method = method.into();
        self
    }

    /// Set the metadata key the header is stored under, `Authorization` by default.
    pub fn with_target_key(mut self, key: impl Into<String>) -> Self {
        self.target_key = key.into();
        self
    }

    /// Sign the values of these metadata keys as form fields.
    ///
    /// Keys missing from the message are skipped.
    pub fn with_form_fields<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.form_fields = keys.into_iter().map(Into::into).collect();
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

    /// Generate the header for given message and store it as metadata.
    ///
    /// Returns the generated header value.
    pub fn generate(&self, ctx: &Context, msg: &mut Message) -> Result<String> {
        if is_blank(&self.url) {
            return Err(Error::config_invalid("url must not be blank"));
        }
        if is_blank(&self.http_method) {
            return Err(Error::config_invalid("http method must not be blank"));
        }
        if is_blank(&self.target_key) {
            return Err(Error::config_invalid("target key must not be blank"));
        }

        let url: Uri = msg.resolve(&self.url).parse()?;
        let method = msg.resolve(&self.http_method);

        let mut builder = self
            .spec
            .builder_for_request(ctx, &method, url, &*msg)?
            .with_additional_data(self.form_data(msg));
        if let Some(time) = self.time {
            builder = builder.with_time(time);
        }

        let header = builder.build()?;
        debug!(
            "generated authorization header for message {} into {}",
            msg.unique_id(),
            self.target_key
        );
        msg.insert_metadata(&self.target_key, &header);

        Ok(header)
    }

    /// Selected metadata as form encoded name value pairs.
    fn form_data(&self, msg: &Message) -> Vec<(String, String)> {
        self.form_fields
            .iter()
            .filter_map(|key| {
                let value = msg.metadata(key)?;
                let encoded = form_urlencoded::byte_serialize(value.as_bytes()).collect();
                Some((key.clone(), encoded))
            })
            .collect()
    }
}
