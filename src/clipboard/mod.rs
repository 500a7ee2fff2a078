//! 剪贴板条目模块
//!
//! # 设计思路
//!
//! 条目是历史列表的基本单位：保存一次复制得到的全部类型数据，
//! 提供判等（去重）、取文本/HTML/图片、以及持久化所需的二进制编码。
//!
//! # 实现思路
//!
//! - 子模块按职责拆分：快照模型归 `mime`，哈希归 `hash`，
//!   默认类型与图片类型选择归 `format`，编码归 `codec`。
//! - 内容类型一律是运行时字符串，只有纯文本与 HTML 作为常量保留。
//! - 条目不加锁，由持有它的历史列表串行访问。

mod codec;
mod format;
mod hash;
mod item;
mod mime;

pub use codec::DecodeError;
pub(crate) use codec::{put_blob, read_blob, read_u32};
pub use format::{best_image_format, is_image_format, is_text_format, FormatPreference};
pub use hash::{content_hash, EMPTY_HASH};
pub use item::{ClipboardEntry, ItemData, ItemRole};
pub use mime::{MimeData, MIME_HTML, MIME_TEXT};
