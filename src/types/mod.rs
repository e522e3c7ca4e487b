//! 类型系统模块：聊天消息等核心数据类型。
//!
//! # Types Module
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Chat message with role and text content |
//! | [`MessageRole`] | Message role (system, user, assistant) |

pub mod message;

pub use message::{Message, MessageRole};
