//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 各子模块各自定义错误枚举（`DecodeError`、`ImageError`），
//! 对外的入口（历史列表加载/保存、配置、命令行工具）统一返回 `AppError`。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 通过 `#[from]` 提供子模块错误与 I/O 错误的自动转换，无需手动 map。

use crate::clipboard::DecodeError;
use crate::image_handler::ImageError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 历史记录或条目无法解析
    #[error("历史记录解析失败: {0}")]
    Decode(#[from] DecodeError),

    /// 图片渲染失败
    #[error("{0}")]
    Image(#[from] ImageError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 配置无效
    #[error("配置错误: {0}")]
    Config(String),
}
