// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Validation failures raised at the analytics boundary. Well-formed input
/// never fails inside the engine; an empty dataset is not an error.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("invalid profile field '{field}': {reason}")]
    InvalidProfile {
        field: &'static str,
        reason: String,
    },
}
