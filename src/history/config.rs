//! # 历史列表配置
//!
//! ## 设计思路
//!
//! 条目只需要列表的两项配置：默认类型的偏好顺序、图片缩略图尺寸。
//! 这些配置打包成不可变快照，通过 `Arc` 分发给每个条目，避免条目反向持有列表。
//!
//! ## 实现思路
//!
//! - 以 camelCase JSON 持久化，缺失字段使用默认值。
//! - 配置文件不存在或损坏时回退默认配置，只记录日志，不阻止启动。
//! - `apply_settings` 接收前端设置对象中的相关字段做运行时覆盖。

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::clipboard::{FormatPreference, MIME_HTML, MIME_TEXT};
use crate::error::AppError;
use crate::image_handler::{ImageConfig, ImagePerformanceProfile};

const DEFAULT_MAX_ITEMS: usize = 200;

static DEFAULT_PREFERRED_FORMATS: Lazy<FormatPreference> = Lazy::new(|| {
    FormatPreference::new([MIME_TEXT, MIME_HTML, "image/*"]).unwrap_or_else(|err| {
        log::error!("默认类型偏好编译失败：{}", err);
        FormatPreference::default()
    })
});

/// 历史列表配置快照。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryConfig {
    /// 最多保留的条目数，0 表示不限制。
    pub max_items: usize,
    /// 默认类型的偏好模式，越靠前优先级越高。
    pub preferred_formats: FormatPreference,
    /// 图片缩略图配置。
    pub image: ImageConfig,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            preferred_formats: DEFAULT_PREFERRED_FORMATS.clone(),
            image: ImageConfig::default(),
        }
    }
}

impl HistoryConfig {
    /// 读取配置文件，失败时回退默认配置。
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("⚙️ 配置文件不存在，使用默认配置: {}", path.display());
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!("⚠️ 解析配置文件失败，使用默认配置: {}", err);
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("⚠️ 读取配置文件失败，使用默认配置: {}", err);
                Self::default()
            }
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), AppError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("序列化配置失败: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn set_preferred_formats<I, S>(&mut self, patterns: I) -> Result<(), AppError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.preferred_formats = FormatPreference::new(patterns)
            .map_err(|e| AppError::Config(format!("类型偏好模式无效: {}", e)))?;
        Ok(())
    }

    /// 应用设置对象中的相关字段，未出现的字段保持不变。
    ///
    /// 任一字段无效时返回错误，配置整体保持原样。
    pub fn apply_settings(&mut self, settings: &serde_json::Value) -> Result<(), AppError> {
        let mut next = self.clone();

        if let Some(max_items) = settings.get("maxItems").and_then(|v| v.as_u64()) {
            next.max_items = usize::try_from(max_items).unwrap_or(usize::MAX);
        }
        if let Some(width) = settings.get("maxImageWidth").and_then(|v| v.as_u64()) {
            next.image.max_width = u32::try_from(width).unwrap_or(u32::MAX);
        }
        if let Some(height) = settings.get("maxImageHeight").and_then(|v| v.as_u64()) {
            next.image.max_height = u32::try_from(height).unwrap_or(u32::MAX);
        }
        if let Some(profile) = settings.get("imagePerformanceProfile") {
            next.image.profile = serde_json::from_value::<ImagePerformanceProfile>(profile.clone())
                .map_err(|e| AppError::Config(format!("未知图片档位: {}", e)))?;
        }
        if let Some(patterns) = settings.get("preferredFormats").and_then(|v| v.as_array()) {
            let patterns = patterns
                .iter()
                .map(|p| {
                    p.as_str()
                        .ok_or_else(|| AppError::Config("类型偏好必须是字符串".to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            next.set_preferred_formats(patterns)?;
        }

        *self = next;
        log::debug!(
            "⚙️ 历史配置已更新 - maxItems: {} 图片: {}x{} ({})",
            self.max_items,
            self.image.max_width,
            self.image.max_height,
            self.image.profile.as_str()
        );
        Ok(())
    }
}
