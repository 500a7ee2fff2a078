//! # 剪贴板条目
//!
//! ## 设计思路
//!
//! 一个条目保存一次剪贴板捕获的全部类型数据，另外维护：
//! - 默认类型：用于展示与取文本，非空时一定存在于数据中；
//! - 内容哈希：每次修改后立即重算，只作为判等的快速过滤。
//!
//! 条目不持有历史列表本身，只持有列表配置的只读快照（`Arc<HistoryConfig>`），
//! 在选择默认类型与缩放图片时读取。
//!
//! ## 实现思路
//!
//! - 整体替换（`set_data`）与单类型写入（`set_data_for`）得到的哈希与类型列表一致，
//!   单类型写入按“减旧加新”增量更新哈希。
//! - 判等先比哈希，再做完整字节比较；哈希相同但内容不同时以字节比较为准。
//! - 图片渲染失败只返回 `None` 并记录日志，不影响条目状态。

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::format::{best_image_format, is_image_format, is_text_format};
use super::hash::{content_hash, payload_hash, EMPTY_HASH};
use super::{MimeData, MIME_HTML, MIME_TEXT};
use crate::history::HistoryConfig;
use crate::image_handler::{ImageConfig, ImageError, ImageHandler, RenderedImage};

/// 未挂接历史列表时使用的图片配置。
static DETACHED_IMAGE_CONFIG: Lazy<ImageConfig> = Lazy::new(ImageConfig::default);

/// `ClipboardEntry::data` 的查询角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRole {
    /// 按默认类型展示的内容。
    Display,
    /// 可编辑的纯文本。
    Edit,
    /// 默认类型名。
    Format,
}

/// `ClipboardEntry::data` 的返回值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemData {
    None,
    Text(String),
    Html(String),
    Image(RenderedImage),
}

/// 剪贴板历史中的一个条目。
#[derive(Clone, Default)]
pub struct ClipboardEntry {
    data: MimeData,
    format: String,
    hash: u64,
    config: Option<Arc<HistoryConfig>>,
}

impl ClipboardEntry {
    /// 创建未挂接历史列表的空条目。
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建挂接到历史列表配置的空条目。
    pub fn with_config(config: Arc<HistoryConfig>) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }

    /// 由已校验的数据与默认类型直接构造，哈希总是重新计算。
    pub(crate) fn from_parts(data: MimeData, format: String) -> Self {
        debug_assert!(format.is_empty() || data.has_format(&format));
        Self {
            hash: content_hash(&data),
            data,
            format,
            config: None,
        }
    }

    pub fn attach_config(&mut self, config: Arc<HistoryConfig>) {
        self.config = Some(config);
    }

    pub fn config(&self) -> Option<&HistoryConfig> {
        self.config.as_deref()
    }

    /// 用一次完整的剪贴板快照替换全部数据。
    pub fn set_data(&mut self, data: MimeData) {
        self.hash = content_hash(&data);
        self.data = data;
        self.format.clear();
        self.resolve_format();

        log::debug!(
            "📋 条目数据已替换 - 类型数: {} 默认类型: {:?} hash: {:016x}",
            self.data.len(),
            self.format,
            self.hash
        );
    }

    /// 写入或覆盖单个类型的数据。
    ///
    /// 第一个写入的类型成为默认类型。
    pub fn set_data_for(&mut self, mime: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        let mime = mime.into();
        let bytes = bytes.into();
        let added = payload_hash(&bytes);

        self.hash = match self.data.set_data(mime.clone(), bytes) {
            Some(old) => self.hash.wrapping_sub(payload_hash(&old)).wrapping_add(added),
            None => self.hash.wrapping_add(added),
        };

        if self.format.is_empty() && self.data.len() == 1 {
            self.format = mime;
        }
    }

    /// 清空全部数据，仅以纯文本保存 `value` 的文本形式。
    pub fn set_value<T: fmt::Display + ?Sized>(&mut self, value: &T) {
        self.clear();
        self.set_data_for(MIME_TEXT, value.to_string());
    }

    /// 显式指定默认类型，类型不存在时不做修改并返回 `false`。
    pub fn set_format(&mut self, mime: &str) -> bool {
        if !self.data.has_format(mime) {
            log::debug!("🚫 忽略不存在的默认类型: {}", mime);
            return false;
        }
        self.format = mime.to_string();
        true
    }

    /// 按历史列表的偏好重新确定默认类型。
    pub fn set_preferred_format(&mut self) {
        self.resolve_format();
    }

    fn resolve_format(&mut self) {
        if !self.format.is_empty() && self.data.has_format(&self.format) {
            return;
        }

        let formats = self.data.formats();
        let preferred = self
            .config
            .as_deref()
            .and_then(|config| config.preferred_formats.select(formats));

        self.format = preferred
            .or_else(|| formats.first().map(String::as_str))
            .unwrap_or_default()
            .to_string();
    }

    /// 清空条目，可重复调用。
    pub fn clear(&mut self) {
        self.data.clear();
        self.format.clear();
        self.hash = EMPTY_HASH;
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 纯文本内容，不存在时为空字符串。
    pub fn text(&self) -> String {
        self.decode_text(MIME_TEXT)
    }

    /// HTML 内容，不存在时为空字符串。
    pub fn html(&self) -> String {
        self.decode_text(MIME_HTML)
    }

    fn decode_text(&self, mime: &str) -> String {
        self.data
            .data(mime)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default()
    }

    /// 渲染图片缩略图；没有图片或解码失败时返回 `None`。
    ///
    /// `mime` 为空时自动挑选最合适的图片类型。
    pub fn render_image(&self, mime: Option<&str>) -> Option<RenderedImage> {
        match self.try_render_image(mime) {
            Ok(image) => Some(image),
            Err(ImageError::NoImage) => None,
            Err(err) => {
                log::warn!("⚠️ 条目图片无法渲染：{}", err);
                None
            }
        }
    }

    /// 与 `render_image` 相同，但返回具体失败原因。
    pub fn try_render_image(&self, mime: Option<&str>) -> Result<RenderedImage, ImageError> {
        let mime = match mime {
            Some(mime) if self.data.has_format(mime) => mime,
            Some(_) => return Err(ImageError::NoImage),
            None => best_image_format(self.data.formats()).ok_or(ImageError::NoImage)?,
        };
        let bytes = self.data.data(mime).ok_or(ImageError::NoImage)?;

        let image_config = match self.config.as_deref() {
            Some(config) => &config.image,
            None => &*DETACHED_IMAGE_CONFIG,
        };

        ImageHandler::new(image_config).render(bytes, mime)
    }

    /// 按角色查询条目内容。
    pub fn data(&self, role: ItemRole) -> ItemData {
        match role {
            ItemRole::Edit => ItemData::Text(self.text()),
            ItemRole::Format => ItemData::Text(self.format.clone()),
            ItemRole::Display => self.display_data(),
        }
    }

    fn display_data(&self) -> ItemData {
        let Some(bytes) = self.data.data(&self.format) else {
            return ItemData::None;
        };

        if is_image_format(&self.format) {
            if let Some(image) = self.render_image(Some(&self.format)) {
                return ItemData::Image(image);
            }
        } else if self.format == MIME_HTML {
            return ItemData::Html(self.html());
        } else if is_text_format(&self.format) {
            return ItemData::Text(String::from_utf8_lossy(bytes).into_owned());
        }

        ItemData::Text(format!("{} ({} B)", self.format, bytes.len()))
    }

    /// 按插入顺序返回全部类型。
    pub fn formats(&self) -> &[String] {
        self.data.formats()
    }

    /// 默认类型。
    pub fn format(&self) -> &str {
        &self.format
    }

    /// 内容哈希。
    pub fn data_hash(&self) -> u64 {
        self.hash
    }

    /// 原始数据的只读视图。
    pub fn mime_data(&self) -> &MimeData {
        &self.data
    }

    pub fn payload(&self, mime: &str) -> Option<&[u8]> {
        self.data.data(mime)
    }

    #[cfg(test)]
    pub(crate) fn force_hash(&mut self, hash: u64) {
        self.hash = hash;
    }
}

impl fmt::Debug for ClipboardEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipboardEntry")
            .field("format", &self.format)
            .field("formats", &self.data.formats())
            .field("size", &self.data.total_size())
            .field("hash", &format_args!("{:016x}", self.hash))
            .field("attached", &self.config.is_some())
            .finish()
    }
}

impl PartialEq for ClipboardEntry {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.data.same_payloads(&other.data)
    }
}

impl Eq for ClipboardEntry {}

impl PartialEq<MimeData> for ClipboardEntry {
    fn eq(&self, other: &MimeData) -> bool {
        self.hash == content_hash(other) && self.data.same_payloads(other)
    }
}
