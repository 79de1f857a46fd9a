// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

pub mod messages;
pub mod receiver;

pub use messages::{Message, MessageKind, Response};
pub use receiver::ReceiveAssembly;
