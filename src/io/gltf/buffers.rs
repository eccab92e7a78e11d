// Copyright 2021 Tristam MacDonald
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
use crate::error::{Error, Result};
use gltf_dep::json as gj;

/// Resolve the data of every buffer in the document, in document order.
///
/// The binary chunk of a GLB file backs the buffer without a URI. Otherwise
/// only base64 `data:` URIs are accepted; external files are not read.
pub fn resolve_buffers(root: &gj::Root, blob: Option<Vec<u8>>) -> Result<Vec<Vec<u8>>> {
    let mut blob = blob;
    let mut buffers = Vec::with_capacity(root.buffers.len());

    for (index, buffer) in root.buffers.iter().enumerate() {
        let data = match &buffer.uri {
            None => blob.take().ok_or_else(|| {
                Error::Malformed(format!("buffer {} refers to a missing binary chunk", index))
            })?,
            Some(uri) => parse_data_uri(uri).ok_or_else(|| {
                Error::Unsupported(format!("buffer {} has external URI {}", index, uri))
            })?,
        };

        let declared = buffer.byte_length.0;
        if (data.len() as u64) < declared {
            return Err(Error::Malformed(format!(
                "buffer {} declares {} bytes but holds {}",
                index,
                declared,
                data.len()
            )));
        }
        buffers.push(data);
    }

    Ok(buffers)
}

fn parse_data_uri(uri: &str) -> Option<Vec<u8>> {
    let rest = uri.strip_prefix("data:")?;
    let base64_start = rest.find(";base64,")?;
    base64_decode(&rest[base64_start + 8..])
}

fn base64_decode(input: &str) -> Option<Vec<u8>> {
    fn decode_char(c: u8) -> Option<u8> {
        match c {
            b'A'..=b'Z' => Some(c - b'A'),
            b'a'..=b'z' => Some(c - b'a' + 26),
            b'0'..=b'9' => Some(c - b'0' + 52),
            b'+' => Some(62),
            b'/' => Some(63),
            _ => None,
        }
    }

    let input: Vec<u8> = input
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let mut result = Vec::with_capacity(input.len() * 3 / 4);

    for chunk in input.chunks(4) {
        if chunk.len() < 2 {
            return None;
        }

        let mut buf = [0u8; 4];
        let mut pad = 4 - chunk.len();
        for (i, &byte) in chunk.iter().enumerate() {
            if byte == b'=' {
                pad += 1;
            } else {
                buf[i] = decode_char(byte)?;
            }
        }

        result.push((buf[0] << 2) | (buf[1] >> 4));
        if pad < 2 {
            result.push((buf[1] << 4) | (buf[2] >> 2));
        }
        if pad < 1 {
            result.push((buf[2] << 6) | buf[3]);
        }
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_decode() {
        assert_eq!(base64_decode("SGVsbG8gV29ybGQ=").unwrap(), b"Hello World");
        assert_eq!(base64_decode("YQ==").unwrap(), b"a");
        assert_eq!(base64_decode("YWI").unwrap(), b"ab");
        assert!(base64_decode("Y!==").is_none());
    }

    #[test]
    fn test_parse_data_uri() {
        let uri = "data:application/octet-stream;base64,AAECAw==";
        assert_eq!(parse_data_uri(uri).unwrap(), vec![0, 1, 2, 3]);
        assert!(parse_data_uri("buffer.bin").is_none());
    }
}
