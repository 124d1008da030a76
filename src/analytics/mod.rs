// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The budget analytics engine. Every function in here is a pure
//! recomputation over the expense log and profile: no storage access,
//! no wall-clock reads. Callers thread an explicit reference day through
//! every time-windowed computation.

pub mod achievements;
pub mod daily;
pub mod health;
pub mod streak;
pub mod summary;
pub mod trends;
