/*
 * Copyright (C) 2022 taylor.fish <contact@taylor.fish>
 *
 * This file is part of base32k.
 *
 * base32k is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * base32k is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with base32k. If not, see <https://www.gnu.org/licenses/>.
 */

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

//! Base32k packs a sequence of 32-bit words into text, 15 bits per UTF-16
//! code unit, using only code points that survive Unicode normalization.
//! This makes it suitable for embedding binary data in XML and other
//! text-only channels.
//!
//! Every encoding ends with a terminator character recording how many bits
//! of the last data character are significant, so the empty sequence
//! encodes to a single character.
//!
//! ```
//! let words = [0xdead_beef, 0x0123_4567];
//! let text = base32k::encode(&words);
//! assert_eq!(text.chars().count(), base32k::encoded_len(2).unwrap());
//! assert_eq!(base32k::decode(&text).unwrap(), words);
//! ```

pub mod alphabet;
mod bits;
pub mod decode;
pub mod encode;

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(test)]
mod tests;

const BITS_PER_WORD: u32 = 32;
const BITS_PER_GROUP: u32 = 15;

pub use decode::{DecodeConfig, DecodeError, DecodeResult};

#[cfg(feature = "alloc")]
pub use decode::decode_chars;
#[cfg(feature = "alloc")]
pub use decode::decode_str;
#[cfg(feature = "alloc")]
pub use decode::decode_utf16;
#[cfg(feature = "alloc")]
pub use decode::decode_str as decode;
pub use decode::decoded_len_hint;

pub use encode::encode_to_chars;
pub use encode::encode_to_utf16_iter;
pub use encode::encoded_len;
#[cfg(feature = "alloc")]
pub use encode::encode_to_string;
#[cfg(feature = "alloc")]
pub use encode::encode_to_string as encode;
#[cfg(feature = "alloc")]
pub use encode::encode_to_utf16;
