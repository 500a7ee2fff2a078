//! # 剪贴板快照模型
//!
//! ## 设计思路
//!
//! 系统剪贴板在一次复制中会同时提供多种表示（纯文本、HTML、图片……），
//! 类型名由操作系统在运行时给出，因此这里不使用枚举，而是以字符串为键。
//!
//! ## 实现思路
//!
//! - `HashMap` 保存字节数据，`Vec` 单独记录首次插入顺序。
//! - 重复设置同一类型只覆盖数据，不改变其位置。
//! - 插入顺序参与默认类型的兜底选择，所以必须稳定可枚举。

use std::collections::HashMap;

/// 纯文本类型。
pub const MIME_TEXT: &str = "text/plain";
/// HTML 富文本类型。
pub const MIME_HTML: &str = "text/html";

/// 一次剪贴板捕获的全部数据：内容类型 → 原始字节。
#[derive(Debug, Clone, Default)]
pub struct MimeData {
    formats: Vec<String>,
    payloads: HashMap<String, Vec<u8>>,
}

impl MimeData {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置某个类型的数据，已存在时覆盖并返回旧数据。
    pub fn set_data(&mut self, mime: impl Into<String>, data: impl Into<Vec<u8>>) -> Option<Vec<u8>> {
        let mime = mime.into();
        let data = data.into();
        match self.payloads.get_mut(&mime) {
            Some(existing) => Some(std::mem::replace(existing, data)),
            None => {
                self.formats.push(mime.clone());
                self.payloads.insert(mime, data);
                None
            }
        }
    }

    pub fn data(&self, mime: &str) -> Option<&[u8]> {
        self.payloads.get(mime).map(Vec::as_slice)
    }

    pub fn has_format(&self, mime: &str) -> bool {
        self.payloads.contains_key(mime)
    }

    /// 按首次插入顺序返回所有类型。
    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }

    /// 按插入顺序遍历 `(类型, 数据)`。
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> + '_ {
        self.formats.iter().filter_map(move |mime| {
            self.payloads
                .get(mime)
                .map(|data| (mime.as_str(), data.as_slice()))
        })
    }

    /// 所有数据的总字节数。
    pub fn total_size(&self) -> usize {
        self.payloads.values().map(Vec::len).sum()
    }

    /// 两份快照是否拥有完全相同的类型集合与字节内容（忽略顺序）。
    pub fn same_payloads(&self, other: &MimeData) -> bool {
        self.payloads == other.payloads
    }

    pub fn clear(&mut self) {
        self.formats.clear();
        self.payloads.clear();
    }
}

impl<K, V> FromIterator<(K, V)> for MimeData
where
    K: Into<String>,
    V: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = MimeData::new();
        for (mime, bytes) in iter {
            data.set_data(mime, bytes);
        }
        data
    }
}

impl PartialEq for MimeData {
    fn eq(&self, other: &Self) -> bool {
        self.formats == other.formats && self.payloads == other.payloads
    }
}

impl Eq for MimeData {}

#[cfg(test)]
mod tests {
    use super::{MimeData, MIME_HTML, MIME_TEXT};

    #[test]
    fn formats_keep_first_insertion_order() {
        let mut data = MimeData::new();
        data.set_data(MIME_HTML, "<b>a</b>");
        data.set_data(MIME_TEXT, "a");
        data.set_data(MIME_HTML, "<i>a</i>");

        assert_eq!(data.formats(), &[MIME_HTML.to_string(), MIME_TEXT.to_string()]);
        assert_eq!(data.data(MIME_HTML), Some(&b"<i>a</i>"[..]));
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn set_data_returns_replaced_bytes() {
        let mut data = MimeData::new();
        assert_eq!(data.set_data(MIME_TEXT, "old"), None);
        assert_eq!(data.set_data(MIME_TEXT, "new"), Some(b"old".to_vec()));
    }

    #[test]
    fn same_payloads_ignores_order() {
        let a: MimeData = [(MIME_TEXT, "a"), (MIME_HTML, "b")].into_iter().collect();
        let b: MimeData = [(MIME_HTML, "b"), (MIME_TEXT, "a")].into_iter().collect();

        assert!(a.same_payloads(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn type_names_are_case_sensitive() {
        let data: MimeData = [("Text/Plain", "a"), (MIME_TEXT, "b")].into_iter().collect();
        assert_eq!(data.len(), 2);
        assert_eq!(data.data(MIME_TEXT), Some(&b"b"[..]));
    }
}
