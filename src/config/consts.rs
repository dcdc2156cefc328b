// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Prefix marking the detached spelling of a property key (`@length`).
pub const DETACHED_PREFIX: &str = "@";
/// Key under which the active kit name is persisted with the node.
pub const NODE_STATE_KEY: &str = "KitName";
/// Host application assumed when a config does not name one.
pub const DEFAULT_APPLICATION: &str = "generic";
/// Worker count used when neither config nor system detection provides one.
pub const DEFAULT_WORKER_COUNT: usize = 4;
/// Upper bound on concurrent workers per run.
pub const MAX_WORKER_COUNT: usize = 32;
/// Usage tracker category recorded for every started conversion run.
pub const TRACKING_CATEGORY: &str = "convert";
