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

use std::sync::Arc;

use http::header::AUTHORIZATION;
use http::HeaderValue;
use oauthsign_core::time::DateTime;
use oauthsign_core::{Context, Message, MessageContext, Result, SignRequest};

use crate::{AuthorizationSpec, Credential};

/// RequestSigner that implements RFC 5849 Authorization.
///
/// It signs `http::request::Parts` in place by inserting an `Authorization`
/// header. Without a bound message context every request is signed for a new
/// [`Message`], which yields a fresh nonce per request.
///
/// - [Authenticated Requests](https://www.rfc-editor.org/rfc/rfc5849#section-3)
#[derive(Debug, Clone)]
pub struct RequestSigner {
    spec: AuthorizationSpec,
    message: Option<Arc<dyn MessageContext>>,
    additional_data: Vec<(String, String)>,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer with given spec.
    pub fn new(spec: AuthorizationSpec) -> Self {
        Self {
            spec,
            message: None,
            additional_data: Vec::new(),
            time: None,
        }
    }

    /// Resolve expressions of the AuthorizationSpec against given message instead of a new one.
    pub fn with_message_context(mut self, msg: impl MessageContext + 'static) -> Self {
        self.message = Some(Arc::new(msg));
        self
    }

    /// Sign given form parameters together with the request.
    ///
    /// Values must already be percent encoded.
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
}

impl SignRequest for RequestSigner {
    type Credential = Credential;

    fn sign_request(
        &self,
        ctx: &Context,
        parts: &mut http::request::Parts,
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let fresh;
        let msg: &dyn MessageContext = match &self.message {
            Some(msg) => msg.as_ref(),
            None => {
                fresh = Message::new();
                &fresh
            }
        };

        let cred = match credential {
            Some(cred) => cred.clone(),
            None => self.spec.credential(ctx, msg)?,
        };

        let mut builder = self
            .spec
            .builder_with_credential(msg, &cred)?
            .with_method(parts.method.as_str())
            .with_url(parts.uri.clone())
            .with_additional_data(self.additional_data.clone());
        if let Some(time) = self.time {
            builder = builder.with_time(time);
        }

        parts.headers.insert(AUTHORIZATION, {
            let mut value: HeaderValue = builder.build()?.parse()?;
            value.set_sensitive(true);

            value
        });

        Ok(())
    }
}
