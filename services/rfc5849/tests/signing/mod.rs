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

mod generate;
mod standard;
mod vectors;

use chrono::{TimeZone, Utc};
use oauthsign_core::time::DateTime;
use oauthsign_core::Context;
use oauthsign_rfc5849::AuthorizationSpec;

/// Unix timestamp used by every fixed-time test.
pub const FIXED_TIMESTAMP: i64 = 1318622958;

/// Initialize test environment
pub fn init_signing_test() -> (Context, AuthorizationSpec) {
    let _ = env_logger::builder().is_test(true).try_init();

    let spec = AuthorizationSpec::new()
        .with_consumer_key("consumerKey")
        .with_consumer_secret("consumerSecret")
        .with_access_token("accessToken")
        .with_token_secret("tokenSecret");

    (Context::new(), spec)
}

/// Signing time matching [`FIXED_TIMESTAMP`].
pub fn fixed_time() -> DateTime {
    Utc.timestamp_opt(FIXED_TIMESTAMP, 0)
        .single()
        .expect("timestamp must be valid")
}
