// ABOUTME: Re-exports command modules for stepwise-cli
// ABOUTME: Provides access to the replay and simulate commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stepwise Contributors

pub mod replay;
pub mod simulate;
