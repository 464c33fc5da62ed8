// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod calendar;
pub mod chain;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod dates;
pub mod db;
pub mod drafts;
pub mod engine;
pub mod errors;
pub mod identity;
pub mod models;
pub mod monthly;
pub mod service;
pub mod store;
pub mod utils;
