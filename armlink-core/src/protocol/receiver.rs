// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Byte-at-a-time receive assembly for peer responses.
//!
//! There is no sync byte: a message is complete once [`RESPONSE_LEN`] bytes have arrived since
//! the last [`ReceiveAssembly::reset`]. The receive interrupt is the only caller of
//! [`ReceiveAssembly::push`]; the main loop resets the offset before each request and drains
//! completed messages with [`ReceiveAssembly::take`].
//!
//! There is no queue. Bytes that keep arriving before the main loop drains a completed message
//! overwrite it in place, so the last message wins.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicUsize, Ordering};

use crate::protocol::messages::{Response, RESPONSE_LEN};

#[allow(clippy::declare_interior_mutable_const)]
const EMPTY: AtomicU8 = AtomicU8::new(0);

pub struct ReceiveAssembly {
    offset: AtomicUsize,
    buf: [AtomicU8; RESPONSE_LEN],
    complete: AtomicBool,
}

impl ReceiveAssembly {
    pub const fn new() -> Self {
        Self {
            offset: AtomicUsize::new(0),
            buf: [EMPTY; RESPONSE_LEN],
            complete: AtomicBool::new(false),
        }
    }

    /// Store one received byte. Returns `true` when it completed a response.
    pub fn push(&self, byte: u8) -> bool {
        let offset = self.offset.load(Ordering::Acquire);
        if let Some(slot) = self.buf.get(offset) {
            slot.store(byte, Ordering::Relaxed);
        }

        let offset = offset + 1;
        if offset >= RESPONSE_LEN {
            self.offset.store(0, Ordering::Release);
            self.complete.store(true, Ordering::Release);
            true
        } else {
            self.offset.store(offset, Ordering::Release);
            false
        }
    }

    /// Start a new receive cycle at offset 0.
    ///
    /// Must happen before the request whose reply is expected is transmitted, or the first reply
    /// bytes land at a stale offset.
    #[inline]
    pub fn reset(&self) {
        self.offset.store(0, Ordering::Release);
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset.load(Ordering::Acquire)
    }

    /// Whether a completed message is waiting to be drained.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete.load(Ordering::Acquire)
    }

    /// Clear the complete flag, then copy out the assembled bytes.
    pub fn take_bytes(&self) -> Option<[u8; RESPONSE_LEN]> {
        if !self.complete.swap(false, Ordering::AcqRel) {
            return None;
        }

        let mut out = [0u8; RESPONSE_LEN];
        for (dst, src) in out.iter_mut().zip(self.buf.iter()) {
            *dst = src.load(Ordering::Relaxed);
        }
        Some(out)
    }

    /// Drain a completed message, always read as a [`Response`].
    pub fn take(&self) -> Option<Response> {
        self.take_bytes().map(|bytes| Response::from_bytes(&bytes))
    }
}

impl Default for ReceiveAssembly {
    fn default() -> Self {
        Self::new()
    }
}
