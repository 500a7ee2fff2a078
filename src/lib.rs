//! # 剪贴板历史条目模型：库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  系统剪贴板快照 (MimeData: 类型 → 字节)                   │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ add / set_data
//! ┌───────┼──────────────────────────────────────────────────┐
//! │  history ──── ClipboardHistory (去重 + 上限 + 持久化)     │
//! │   │             │ Arc<HistoryConfig>                      │
//! │   │             ↓                                         │
//! │   │  clipboard ── ClipboardEntry                          │
//! │   │   ├─ hash    顺序无关的内容哈希                       │
//! │   │   ├─ format  默认类型偏好 / 图片类型选择              │
//! │   │   └─ codec   条目二进制编码                           │
//! │   │                                                       │
//! │   ├─ container  多条目文件（单条损坏可跳过）              │
//! │   └─ image_handler  图片解码与缩放                         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError` |
//! | [`clipboard`] | 条目数据模型、哈希、默认类型策略、二进制编码 |
//! | [`history`] | 历史列表、配置快照、历史记录文件 |
//! | [`image_handler`] | 图片格式识别、解码、等比缩放 |

pub mod clipboard;
pub mod error;
pub mod history;
pub mod image_handler;
