// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod convert;
pub mod error;
pub mod record;
pub mod schema;
