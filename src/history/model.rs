//! # 历史列表模型
//!
//! ## 设计思路
//!
//! 历史列表按时间倒序保存条目，最新捕获位于顶部。
//! 列表拥有一份 `Arc<HistoryConfig>`，所有条目共享同一快照，
//! 替换配置时重新挂接每个条目并按新的上限裁剪。
//!
//! ## 实现思路
//!
//! 1. 新捕获先按内容判等查找，命中则把旧条目移到顶部
//! 2. 未命中时插入顶部，超出 `max_items` 的旧条目从尾部淘汰
//! 3. 持久化复用历史文件格式，损坏记录随加载结果一并返回

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use super::container::{read_history, write_history, LoadReport, RecordFailure};
use super::HistoryConfig;
use crate::clipboard::{ClipboardEntry, MimeData};
use crate::error::AppError;

/// `ClipboardHistory::add` 的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// 新条目已插入顶部。
    Inserted,
    /// 已有相同内容的条目，从原位置移到顶部。
    Promoted(usize),
}

/// 剪贴板历史列表，最新的条目在最前。
///
/// 列表持有配置快照，并把同一份 `Arc` 挂接到每个条目上。
#[derive(Debug, Clone)]
pub struct ClipboardHistory {
    entries: Vec<ClipboardEntry>,
    config: Arc<HistoryConfig>,
}

impl Default for ClipboardHistory {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl ClipboardHistory {
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            entries: Vec::new(),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// 替换配置，重新挂接全部条目并按新的上限裁剪。
    pub fn set_config(&mut self, config: HistoryConfig) {
        self.config = Arc::new(config);
        for entry in &mut self.entries {
            entry.attach_config(Arc::clone(&self.config));
        }
        self.evict_overflow();
    }

    /// 记录一次剪贴板捕获；与已有条目内容相同时只把它移到顶部。
    pub fn add(&mut self, data: MimeData) -> AddOutcome {
        if let Some(index) = self.find(&data) {
            let entry = self.entries.remove(index);
            self.entries.insert(0, entry);
            log::debug!("♻️ 重复内容，条目 {} 移至顶部", index);
            return AddOutcome::Promoted(index);
        }

        let mut entry = ClipboardEntry::with_config(Arc::clone(&self.config));
        entry.set_data(data);
        log::debug!(
            "📋 新增历史条目 - 默认类型: {} hash: {:016x}",
            entry.format(),
            entry.data_hash()
        );
        self.entries.insert(0, entry);
        self.evict_overflow();
        AddOutcome::Inserted
    }

    /// 查找与快照内容相同的条目。
    pub fn find(&self, data: &MimeData) -> Option<usize> {
        self.entries.iter().position(|entry| entry == data)
    }

    pub fn get(&self, index: usize) -> Option<&ClipboardEntry> {
        self.entries.get(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<ClipboardEntry> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClipboardEntry> + '_ {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn evict_overflow(&mut self) {
        let max_items = self.config.max_items;
        if max_items > 0 && self.entries.len() > max_items {
            let evicted = self.entries.len() - max_items;
            self.entries.truncate(max_items);
            log::debug!("🧹 超出上限 {}，淘汰 {} 个最旧条目", max_items, evicted);
        }
    }

    /// 保存到历史记录文件。
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        let mut writer = BufWriter::new(File::create(path)?);
        write_history(&mut writer, &self.entries)?;
        log::info!("💾 已保存 {} 个历史条目到 {}", self.entries.len(), path.display());
        Ok(())
    }

    /// 从历史记录文件加载。
    ///
    /// 损坏的条目被跳过并作为失败列表返回；文件头错误才会整体失败。
    pub fn load(path: &Path, config: HistoryConfig) -> Result<(Self, Vec<RecordFailure>), AppError> {
        let mut reader = BufReader::new(File::open(path)?);
        let LoadReport { entries, failures } = read_history(&mut reader)?;

        let mut history = Self {
            entries,
            config: Arc::new(config),
        };
        for entry in &mut history.entries {
            entry.attach_config(Arc::clone(&history.config));
        }
        history.evict_overflow();

        Ok((history, failures))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{AddOutcome, ClipboardHistory};
    use crate::clipboard::{MimeData, MIME_HTML, MIME_TEXT};
    use crate::history::HistoryConfig;

    fn text(value: &str) -> MimeData {
        [(MIME_TEXT, value)].into_iter().collect()
    }

    fn unique_temp_dir() -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock error")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("clipboard-history-model-history-{nanos}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn add_inserts_newest_first() {
        let mut history = ClipboardHistory::default();
        assert_eq!(history.add(text("a")), AddOutcome::Inserted);
        assert_eq!(history.add(text("b")), AddOutcome::Inserted);

        let texts: Vec<_> = history.iter().map(|e| e.text()).collect();
        assert_eq!(texts, vec!["b", "a"]);
    }

    #[test]
    fn duplicate_capture_is_promoted() {
        let mut history = ClipboardHistory::default();
        history.add(text("a"));
        history.add(text("b"));
        history.add(text("c"));

        assert_eq!(history.add(text("a")), AddOutcome::Promoted(2));
        assert_eq!(history.len(), 3);
        assert_eq!(history.get(0).map(|e| e.text()), Some("a".to_string()));
    }

    #[test]
    fn overflow_evicts_oldest() {
        let mut config = HistoryConfig::default();
        config.max_items = 2;
        let mut history = ClipboardHistory::new(config);

        history.add(text("a"));
        history.add(text("b"));
        history.add(text("c"));

        let texts: Vec<_> = history.iter().map(|e| e.text()).collect();
        assert_eq!(texts, vec!["c", "b"]);
    }

    #[test]
    fn entries_use_list_preference() {
        let mut config = HistoryConfig::default();
        config.set_preferred_formats([MIME_HTML]).expect("patterns");
        let mut history = ClipboardHistory::new(config);

        history.add([(MIME_TEXT, "a"), (MIME_HTML, "<b>a</b>")].into_iter().collect());
        assert_eq!(history.get(0).map(|e| e.format()), Some(MIME_HTML));
    }

    #[test]
    fn set_config_reattaches_and_trims() {
        let mut history = ClipboardHistory::default();
        history.add(text("a"));
        history.add(text("b"));

        let mut config = HistoryConfig::default();
        config.max_items = 1;
        config.image.max_width = 16;
        history.set_config(config);

        assert_eq!(history.len(), 1);
        let attached = history.get(0).and_then(|e| e.config()).map(|c| c.image.max_width);
        assert_eq!(attached, Some(16));
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut history = ClipboardHistory::default();
        history.add(text("a"));
        assert!(history.remove(3).is_none());
        assert_eq!(history.remove(0).map(|e| e.text()), Some("a".to_string()));
        assert!(history.is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = unique_temp_dir();
        let path = dir.join("history.bin");

        let mut history = ClipboardHistory::default();
        history.add(text("a"));
        history.add([(MIME_HTML, "<b>b</b>"), (MIME_TEXT, "b")].into_iter().collect());
        history.save(&path).expect("save");

        let (loaded, failures) = ClipboardHistory::load(&path, HistoryConfig::default()).expect("load");
        assert!(failures.is_empty());
        assert_eq!(loaded.len(), 2);
        for (left, right) in loaded.iter().zip(history.iter()) {
            assert_eq!(left, right);
            assert_eq!(left.format(), right.format());
            assert_eq!(left.formats(), right.formats());
            assert!(left.config().is_some());
        }

        let _ = std::fs::remove_dir_all(dir);
    }
}
