// Copyright 2024 RISC Zero, Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Canonical recursive-length-prefix encoding of flat field lists.
//!
//! Every transaction payload this crate produces is a single RLP list whose items are
//! either unsigned integers or byte strings. Integers are written as their minimal
//! big-endian representation, so zero becomes the empty string.

use alloy_primitives::{Bytes, U256};
use alloy_rlp::{BufMut, Encodable};

/// A single item of a canonical list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    /// Non-negative integer, encoded without leading zeros.
    Uint(U256),
    /// Raw byte string.
    Bytes(&'a [u8]),
}

impl Encodable for Field<'_> {
    #[inline]
    fn encode(&self, out: &mut dyn BufMut) {
        match self {
            Field::Uint(value) => value.encode(out),
            Field::Bytes(bytes) => bytes.encode(out),
        }
    }

    #[inline]
    fn length(&self) -> usize {
        match self {
            Field::Uint(value) => value.length(),
            Field::Bytes(bytes) => bytes.length(),
        }
    }
}

impl From<u64> for Field<'_> {
    fn from(value: u64) -> Self {
        Field::Uint(U256::from(value))
    }
}

impl From<U256> for Field<'_> {
    fn from(value: U256) -> Self {
        Field::Uint(value)
    }
}

impl<'a> From<&'a [u8]> for Field<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Field::Bytes(bytes)
    }
}

impl<'a> From<&'a Bytes> for Field<'a> {
    fn from(bytes: &'a Bytes) -> Self {
        Field::Bytes(bytes.as_ref())
    }
}

/// Returns the combined length of the encoded items, excluding the list header.
pub fn payload_length(fields: &[Field<'_>]) -> usize {
    fields.iter().map(Encodable::length).sum()
}

/// Returns the length of the complete encoded list, including its header.
pub fn list_length(fields: &[Field<'_>]) -> usize {
    let payload_length = payload_length(fields);
    payload_length + alloy_rlp::length_of_length(payload_length)
}

/// Writes the list header followed by every field, in order.
pub fn encode_list_into(fields: &[Field<'_>], out: &mut dyn BufMut) {
    alloy_rlp::Header {
        list: true,
        payload_length: payload_length(fields),
    }
    .encode(out);
    for field in fields {
        field.encode(out);
    }
}

/// Encodes the fields as one canonical list.
pub fn encode_list(fields: &[Field<'_>]) -> Vec<u8> {
    let mut out = Vec::with_capacity(list_length(fields));
    encode_list_into(fields, &mut out);
    out
}
