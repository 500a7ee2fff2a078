//! # 配置模块
//!
//! ## 设计思路
//!
//! 历史列表对图片的要求只有两类：缩略图的最大尺寸，以及解码阶段的资源上限。
//! 缩放质量用性能档位（quality / balanced / speed）表达，映射到底层滤镜。
//!
//! ## 实现思路
//!
//! - `Default` 提供历史列表缩略图的常用尺寸。
//! - `ImagePerformanceProfile` 通过 serde 以小写字符串持久化。
//! - 宽或高为 0 表示该方向不限制。

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

/// 图片渲染配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageConfig {
    /// 渲染结果的最大宽度（像素），0 表示不限制。
    pub max_width: u32,
    /// 渲染结果的最大高度（像素），0 表示不限制。
    pub max_height: u32,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 缩放档位。
    pub profile: ImagePerformanceProfile,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_width: 320,
            max_height: 240,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            profile: ImagePerformanceProfile::Balanced,
        }
    }
}

impl ImageConfig {
    pub fn with_max_size(mut self, max_width: u32, max_height: u32) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    pub(crate) fn resize_filter(&self) -> FilterType {
        self.profile.resize_filter()
    }
}

/// 图片缩放档位。
///
/// - `Quality`：尽量保真
/// - `Balanced`：质量与性能平衡
/// - `Speed`：优先速度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagePerformanceProfile {
    Quality,
    #[default]
    Balanced,
    Speed,
}

impl ImagePerformanceProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }

    fn resize_filter(self) -> FilterType {
        match self {
            Self::Quality => FilterType::CatmullRom,
            Self::Balanced => FilterType::Triangle,
            Self::Speed => FilterType::Nearest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageConfig, ImagePerformanceProfile};
    use image::imageops::FilterType;

    #[test]
    fn profile_maps_to_filter() {
        let mut config = ImageConfig::default();
        assert_eq!(config.resize_filter(), FilterType::Triangle);

        config.profile = ImagePerformanceProfile::Speed;
        assert_eq!(config.resize_filter(), FilterType::Nearest);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ImageConfig =
            serde_json::from_str(r#"{"maxWidth": 64, "profile": "quality"}"#).expect("parse");
        assert_eq!(config.max_width, 64);
        assert_eq!(config.max_height, ImageConfig::default().max_height);
        assert_eq!(config.profile, ImagePerformanceProfile::Quality);
    }
}
