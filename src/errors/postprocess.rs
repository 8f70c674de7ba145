// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Raised from [`crate::postprocess::collect_results`] for input combinations the source domain
/// leaves unclear (`SPEC_FULL.md` §9).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostprocessError {
    #[error("task_ids is required when a schedule contains multiplexed slots")]
    MultiplexWithoutIds,
}