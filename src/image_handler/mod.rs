//! # 图片处理模块（image_handler）
//!
//! ## 设计思路
//!
//! 条目中的图片数据只在需要展示时才解码，解码结果按历史列表配置的最大尺寸
//! 等比缩小。解码失败只影响这一次渲染，条目其余功能照常可用。
//!
//! - `config`：最大尺寸、资源上限与缩放档位
//! - `handler`：对外入口，记录耗时与失败日志
//! - `pipeline`：格式识别、尺寸校验、解码与缩放
//! - `source/error`：中间数据模型与错误
//!
//! ## 调用链
//!
//! ```text
//! ClipboardEntry::render_image
//!    ↓ 选择图片类型
//! handler.rs（耗时日志）
//!    ↓
//! pipeline.rs（识别 → 限制 → 解码 → fit_within → RGBA）
//!    ↓
//! RenderedImage（独立缓冲）
//! ```

mod config;
mod error;
mod handler;
mod pipeline;
mod source;

pub use config::{ImageConfig, ImagePerformanceProfile};
pub use error::ImageError;
pub use handler::ImageHandler;
pub use pipeline::fit_within;
pub use source::RenderedImage;
