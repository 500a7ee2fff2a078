//! # 错误模型模块
//!
//! 图片渲染失败不影响条目本身，调用方通常只记录日志。
//! 用单一枚举承载全部原因，便于测试按分支匹配。

/// 图片渲染统一错误类型。
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("条目中没有图片数据")]
    NoImage,

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),
}
