//! # 数据源与中间模型
//!
//! - `RawImageData` 表示条目中尚未解码的图片字节（借用，不复制）
//! - `RenderedImage` 表示缩放后的 RGBA 结果，始终是独立的新缓冲

/// 待解码的图片数据。
pub(crate) struct RawImageData<'a> {
    pub(crate) bytes: &'a [u8],
    /// 数据所在的内容类型，用于格式猜测失败时兜底。
    pub(crate) mime: &'a str,
}

/// 渲染结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    /// 输出宽度（像素）。
    pub width: u32,
    /// 输出高度（像素）。
    pub height: u32,
    /// RGBA 字节数组（`width * height * 4`）。
    pub rgba: Vec<u8>,
    /// 原图宽度。
    pub source_width: u32,
    /// 原图高度。
    pub source_height: u32,
    /// 来源内容类型。
    pub mime: String,
}

impl RenderedImage {
    pub fn was_scaled(&self) -> bool {
        self.width != self.source_width || self.height != self.source_height
    }
}
