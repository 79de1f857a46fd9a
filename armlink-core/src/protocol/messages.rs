// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Wire messages exchanged with the peer.
//!
//! Every message is a run of 32-bit little-endian words with no sync byte, length prefix or
//! checksum. Boundaries are purely "N bytes since the receiver was reset", so the receiver has to
//! be told what shape to expect. This node only ever receives [`Response`]s.
//!
//! | Word | Ping | UpdateRequest | UpdateResponse |
//! | ---- | ---- | ------------- | -------------- |
//! | 0 | type=1 | type=2 | type=2 |
//! | 1 | id | id | id |
//! | 2 | | value | average |
//! | 3..=32 | | | values[0..30] |

/// Type word of a ping.
pub const TYPE_PING: i32 = 1;
/// Type word shared by update requests and responses.
pub const TYPE_UPDATE: i32 = 2;

/// Number of per-member values carried by a response.
pub const RESPONSE_VALUES: usize = 30;

const WORD: usize = core::mem::size_of::<i32>();

pub const PING_LEN: usize = 2 * WORD;
pub const REQUEST_LEN: usize = 3 * WORD;
pub const RESPONSE_LEN: usize = (3 + RESPONSE_VALUES) * WORD;

/// Message shape to assume when decoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Ping,
    UpdateRequest,
    UpdateResponse,
}

impl MessageKind {
    /// Fixed wire size of this shape in bytes.
    pub const fn wire_len(self) -> usize {
        match self {
            MessageKind::Ping => PING_LEN,
            MessageKind::UpdateRequest => REQUEST_LEN,
            MessageKind::UpdateResponse => RESPONSE_LEN,
        }
    }
}

/// Update broadcast from the peer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// Type word exactly as received. Decoding never checks it.
    pub tag: i32,
    pub id: i32,
    pub average: i32,
    pub values: [i32; RESPONSE_VALUES],
}

impl Response {
    pub const fn new(id: i32, average: i32, values: [i32; RESPONSE_VALUES]) -> Self {
        Self {
            tag: TYPE_UPDATE,
            id,
            average,
            values,
        }
    }

    #[inline]
    pub const fn is_update(&self) -> bool {
        self.tag == TYPE_UPDATE
    }

    /// Read a full response frame. The type word is kept as-is, never checked.
    pub fn from_bytes(bytes: &[u8; RESPONSE_LEN]) -> Self {
        let mut words = bytes
            .chunks_exact(WORD)
            .map(|w| i32::from_le_bytes([w[0], w[1], w[2], w[3]]));
        let mut next = || words.next().unwrap_or(0);

        let tag = next();
        let id = next();
        let average = next();
        let mut values = [0; RESPONSE_VALUES];
        for v in values.iter_mut() {
            *v = next();
        }
        Self {
            tag,
            id,
            average,
            values,
        }
    }
}

/// Any message of the protocol.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Message {
    Ping { id: i32 },
    UpdateRequest { id: i32, value: i32 },
    UpdateResponse(Response),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Fewer bytes than the assumed shape occupies.
    Truncated { expected: usize, got: usize },
}

/// Fixed-width encoding of a message, sized for the largest shape.
#[derive(Clone)]
pub struct Encoded {
    buf: [u8; RESPONSE_LEN],
    len: usize,
}

impl Encoded {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl core::ops::Deref for Encoded {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Message {
    pub const fn kind(&self) -> MessageKind {
        match self {
            Message::Ping { .. } => MessageKind::Ping,
            Message::UpdateRequest { .. } => MessageKind::UpdateRequest,
            Message::UpdateResponse(_) => MessageKind::UpdateResponse,
        }
    }

    /// Serialize to exactly `self.kind().wire_len()` bytes.
    pub fn encode(&self) -> Encoded {
        let mut out = Encoded {
            buf: [0; RESPONSE_LEN],
            len: self.kind().wire_len(),
        };
        let mut words = out.buf.chunks_exact_mut(WORD);
        let mut put = |w: i32| {
            if let Some(slot) = words.next() {
                slot.copy_from_slice(&w.to_le_bytes());
            }
        };

        match *self {
            Message::Ping { id } => {
                put(TYPE_PING);
                put(id);
            }
            Message::UpdateRequest { id, value } => {
                put(TYPE_UPDATE);
                put(id);
                put(value);
            }
            Message::UpdateResponse(ref r) => {
                put(r.tag);
                put(r.id);
                put(r.average);
                for &v in &r.values {
                    put(v);
                }
            }
        }

        out
    }

    /// Reinterpret `bytes` as the `assumed` shape.
    ///
    /// The type word is not cross-checked against `assumed`: a ping or request fed in as a
    /// response decodes into a response with whatever the following bytes happen to hold. Extra
    /// trailing bytes are ignored.
    pub fn decode(bytes: &[u8], assumed: MessageKind) -> Result<Self, DecodeError> {
        let expected = assumed.wire_len();
        if bytes.len() < expected {
            return Err(DecodeError::Truncated {
                expected,
                got: bytes.len(),
            });
        }

        let mut words = bytes[..expected]
            .chunks_exact(WORD)
            .map(|w| i32::from_le_bytes([w[0], w[1], w[2], w[3]]));
        let mut next = || words.next().unwrap_or(0);

        Ok(match assumed {
            MessageKind::Ping => {
                let _tag = next();
                Message::Ping { id: next() }
            }
            MessageKind::UpdateRequest => {
                let _tag = next();
                let id = next();
                Message::UpdateRequest { id, value: next() }
            }
            MessageKind::UpdateResponse => {
                let mut frame = [0u8; RESPONSE_LEN];
                frame.copy_from_slice(&bytes[..RESPONSE_LEN]);
                Message::UpdateResponse(Response::from_bytes(&frame))
            }
        })
    }
}
