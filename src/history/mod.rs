//! 历史列表模块
//!
//! # 设计思路
//!
//! 历史列表是条目的唯一持有者：负责去重、数量上限与持久化，
//! 并向条目提供只读的配置快照（默认类型偏好、图片尺寸）。
//!
//! # 实现思路
//!
//! - `config`：`HistoryConfig` 的 JSON 读写与运行时覆盖
//! - `model`：`ClipboardHistory`，最新条目在前，重复内容移到顶部
//! - `container`：多条目文件格式，单条损坏不影响其它条目

mod config;
mod container;
mod model;

pub use config::HistoryConfig;
pub use container::{read_history, write_history, LoadReport, RecordFailure, HISTORY_FORMAT_VERSION};
pub use model::{AddOutcome, ClipboardHistory};
