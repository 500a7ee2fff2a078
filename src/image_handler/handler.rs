use std::time::Instant;

use super::source::{RawImageData, RenderedImage};
use super::{ImageConfig, ImageError};

/// 图片渲染编排器。
///
/// 只借用配置，不持有任何状态，每次渲染都生成新的输出缓冲。
pub struct ImageHandler<'a> {
    pub(super) config: &'a ImageConfig,
}

impl<'a> ImageHandler<'a> {
    pub fn new(config: &'a ImageConfig) -> Self {
        Self { config }
    }

    /// 渲染一段图片数据。
    ///
    /// `mime` 仅在字节无法识别格式时用于兜底。
    pub fn render(&self, bytes: &[u8], mime: &str) -> Result<RenderedImage, ImageError> {
        let started = Instant::now();
        let result = self.decode_and_fit(RawImageData { bytes, mime });

        match &result {
            Ok(image) => log::debug!(
                "⏱️ 图片渲染耗时 {:?} - {} ({} bytes -> {}x{})",
                started.elapsed(),
                mime,
                bytes.len(),
                image.width,
                image.height
            ),
            Err(err) => log::warn!("⚠️ 图片渲染失败 - {} ({} bytes)：{}", mime, bytes.len(), err),
        }

        result
    }
}
