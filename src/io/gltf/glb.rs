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

//! Binary glTF container framing.

/// "glTF" read as a little-endian u32.
pub const MAGIC: u32 = 0x4654_6C67;
pub const VERSION: u32 = 2;
/// "JSON"
pub const CHUNK_JSON: u32 = 0x4E4F_534A;
/// "BIN\0"
pub const CHUNK_BIN: u32 = 0x004E_4942;

const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

/// Padding needed to bring `len` up to a multiple of four.
pub fn padding(len: usize) -> usize {
    (4 - len % 4) % 4
}

/// Frame a JSON document and its binary buffer as a GLB file.
///
/// The JSON chunk is padded with spaces and the BIN chunk with zeros. The BIN
/// chunk is left out entirely when `bin` is empty.
pub fn to_glb(json: &[u8], bin: &[u8]) -> Vec<u8> {
    let json_pad = padding(json.len());
    let json_chunk_len = json.len() + json_pad;

    let bin_pad = padding(bin.len());
    let bin_chunk_len = bin.len() + bin_pad;

    let has_bin = !bin.is_empty();
    let total_length = HEADER_LEN
        + CHUNK_HEADER_LEN
        + json_chunk_len
        + if has_bin {
            CHUNK_HEADER_LEN + bin_chunk_len
        } else {
            0
        };

    let mut glb = Vec::with_capacity(total_length);

    glb.extend_from_slice(&MAGIC.to_le_bytes());
    glb.extend_from_slice(&VERSION.to_le_bytes());
    glb.extend_from_slice(&(total_length as u32).to_le_bytes());

    glb.extend_from_slice(&(json_chunk_len as u32).to_le_bytes());
    glb.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    glb.extend_from_slice(json);
    glb.resize(glb.len() + json_pad, b' ');

    if has_bin {
        glb.extend_from_slice(&(bin_chunk_len as u32).to_le_bytes());
        glb.extend_from_slice(&CHUNK_BIN.to_le_bytes());
        glb.extend_from_slice(bin);
        glb.resize(glb.len() + bin_pad, 0);
    }

    glb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    }

    #[test]
    fn test_header_and_padding() {
        let glb = to_glb(b"{}", &[1, 2, 3, 4, 5]);

        assert_eq!(&glb[0..4], b"glTF");
        assert_eq!(u32_at(&glb, 4), 2);
        assert_eq!(u32_at(&glb, 8) as usize, glb.len());

        // JSON chunk: 2 bytes padded to 4 with spaces
        assert_eq!(u32_at(&glb, 12), 4);
        assert_eq!(&glb[16..20], b"JSON");
        assert_eq!(&glb[20..24], b"{}  ");

        // BIN chunk: 5 bytes padded to 8 with zeros
        assert_eq!(u32_at(&glb, 24), 8);
        assert_eq!(&glb[28..32], b"BIN\0");
        assert_eq!(&glb[32..40], &[1, 2, 3, 4, 5, 0, 0, 0]);
        assert_eq!(glb.len(), 40);
    }

    #[test]
    fn test_bin_chunk_is_optional() {
        let glb = to_glb(b"{\"a\":1}", &[]);
        assert_eq!(glb.len(), 12 + 8 + 8);
        assert_eq!(u32_at(&glb, 8), 28);
    }
}
