// SPDX-License-Identifier: MIT OR Apache-2.0

pub mod input;
pub mod value;

pub use self::input::InputRecord;
pub use self::value::FieldValue;
