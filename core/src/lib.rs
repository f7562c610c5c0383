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

//! Core components for signing requests with OAuth 1.0a.
//!
//! This crate provides the foundational types and traits shared by the oauthsign
//! signers. Signing itself is pure computation: nothing here performs network or
//! file I/O.
//!
//! ## Overview
//!
//! The crate is built around several key concepts:
//!
//! - **Context**: A container for the host capabilities that live for the whole
//!   process, such as environment access and secret decoding
//! - **MessageContext**: The per-message capability used to resolve expression
//!   style configuration values (`%message{key}`) and to provide a unique id
//! - **Traits**: [`SignRequest`] for applying a signature to an HTTP request and
//!   [`SigningCredential`] for validating credentials
//!
//! ## Example
//!
//! ```
//! use oauthsign_core::{Context, Message, MessageContext, StaticEnv};
//! use std::collections::HashMap;
//!
//! let ctx = Context::new().with_env(StaticEnv {
//!     envs: HashMap::from([("CONSUMER_SECRET".to_string(), "s3cr3t".to_string())]),
//! });
//!
//! let msg = Message::new().with_metadata("tenant", "acme");
//!
//! assert_eq!(ctx.resolve_external("%env{CONSUMER_SECRET}"), "s3cr3t");
//! assert_eq!(msg.resolve("key-%message{tenant}"), "key-acme");
//! ```
//!
//! ## Utilities
//!
//! The crate also provides utility modules:
//!
//! - [`hash`]: Keyed hash and base64 helpers
//! - [`time`]: Time helpers
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
mod env;
pub use env::{Env, NoopEnv, OsEnv, StaticEnv};
mod secret;
pub use secret::{DecodeSecret, PlainSecret};
mod message;
pub use message::{Message, MessageContext};

mod api;
pub use api::{SignRequest, SigningCredential};

mod error;
pub use error::{Error, ErrorKind, Result};
