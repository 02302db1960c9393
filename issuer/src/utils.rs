// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use data_encoding::{BASE64, BASE64URL_NOPAD};

#[inline]
pub fn base64url_encode(input: &[u8]) -> String {
    BASE64URL_NOPAD.encode(input)
}

#[inline]
pub fn base64_encode(input: &[u8]) -> String {
    BASE64.encode(input)
}
