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

//! OAuth 1.0a signing support for oauthsign.
//!
//! This crate builds the `Authorization` header described by
//! [RFC 5849](https://www.rfc-editor.org/rfc/rfc5849).
//!
//! ## Overview
//!
//! - [`AuthorizationSpec`] holds the signing configuration. Fields may carry
//!   `%message{key}` expressions and secrets may reference `%env{NAME}`.
//! - [`SignatureBuilder`] computes the signature base string, signs it and
//!   renders the header for a single request.
//! - [`RequestSigner`] signs `http::request::Parts` in place.
//! - [`HeaderGenerator`] stores the header as message metadata.
//!
//! ## Example
//!
//! ```
//! use oauthsign_core::{Context, Message, SignRequest};
//! use oauthsign_rfc5849::{AuthorizationSpec, RequestSigner};
//!
//! # fn main() -> oauthsign_core::Result<()> {
//! let ctx = Context::new();
//! let spec = AuthorizationSpec::new()
//!     .with_consumer_key("consumerKey")
//!     .with_consumer_secret("consumerSecret")
//!     .with_signature_method("HMAC-SHA256");
//!
//! // Build the header for a message directly.
//! let msg = Message::new();
//! let header = spec
//!     .builder_for_request(&ctx, "GET", "https://example.com/photos".parse()?, &msg)?
//!     .build()?;
//! assert!(header.starts_with("OAuth "));
//!
//! // Or sign a request in place.
//! let signer = RequestSigner::new(spec);
//! let (mut parts, _) = http::Request::get("https://example.com/photos")
//!     .body(())
//!     .map_err(|e| oauthsign_core::Error::unexpected("invalid request").with_source(e))?
//!     .into_parts();
//! signer.sign_request(&ctx, &mut parts, None)?;
//! assert!(parts.headers.contains_key(http::header::AUTHORIZATION));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod authorization;
pub use authorization::AuthorizationSpec;

mod build;
pub use build::base_string_uri;
pub use build::SignatureBuilder;

mod credential;
pub use credential::Credential;

mod generate;
pub use generate::HeaderGenerator;

mod params;
pub use params::filter_blank;
pub use params::parse_authorization_header;
pub use params::render_authorization_header;
pub use params::SignatureParams;

mod sign_request;
pub use sign_request::RequestSigner;

mod signature_method;
pub use signature_method::SignatureMethod;

#[allow(missing_docs)]
pub mod constants;
