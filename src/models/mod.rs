// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

pub mod backend;
pub mod booking;
pub mod db;
pub mod handyman;
pub mod search;
pub mod settings;
pub mod version;
