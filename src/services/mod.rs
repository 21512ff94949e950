// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod availability;
pub mod candidate_filter;
pub mod logging;
pub mod memory_store;
pub mod normalizer;
pub mod postgres_store;
pub mod ranking;
pub mod search;
pub mod store;
