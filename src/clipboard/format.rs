//! # 默认类型选择
//!
//! ## 设计思路
//!
//! 历史列表提供一组按优先级排列的类型模式（如 `text/html`、`image/*`），
//! 条目据此挑选用于展示的默认类型。模式只支持 `*` 与 `?` 通配，
//! 对用户足够直观，同时避免把正则语法暴露到配置文件里。
//!
//! ## 实现思路
//!
//! - 加载配置时把每个模式转义后编译为锚定的 `Regex`，选择时不再重复编译。
//! - 序列化时只保存原始模式字符串（`serde(try_from/into)`）。
//! - 图片类型另有一张固定的偏好表，无损格式优先。

use regex::Regex;
use serde::{Deserialize, Serialize};

/// 选择图片数据时的偏好顺序，未列出的 `image/*` 排在最后。
const IMAGE_FORMAT_PREFERENCE: &[&str] = &[
    "image/png",
    "image/bmp",
    "image/x-bmp",
    "image/tiff",
    "image/webp",
    "image/gif",
    "image/jpeg",
    "image/jpg",
];

pub fn is_image_format(mime: &str) -> bool {
    mime.starts_with("image/")
}

pub fn is_text_format(mime: &str) -> bool {
    mime.starts_with("text/")
}

/// 在已有类型中挑出最适合渲染的图片类型。
pub fn best_image_format(formats: &[String]) -> Option<&str> {
    IMAGE_FORMAT_PREFERENCE
        .iter()
        .find_map(|preferred| {
            formats
                .iter()
                .find(|mime| mime.as_str() == *preferred)
                .map(String::as_str)
        })
        .or_else(|| {
            formats
                .iter()
                .map(String::as_str)
                .find(|mime| is_image_format(mime))
        })
}

#[derive(Debug, Clone)]
struct FormatPattern {
    source: String,
    regex: Regex,
}

impl FormatPattern {
    fn compile(source: &str) -> Result<Self, regex::Error> {
        let escaped = regex::escape(source)
            .replace(r"\*", ".*")
            .replace(r"\?", ".");
        let regex = Regex::new(&format!("^(?:{escaped})$"))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }
}

/// 按优先级排列的默认类型模式。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FormatPreference {
    patterns: Vec<FormatPattern>,
}

impl FormatPreference {
    pub fn new<I, S>(patterns: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| FormatPattern::compile(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.patterns.iter().map(|p| p.source.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// 返回匹配最高优先级模式的第一个类型（按 `formats` 顺序）。
    pub fn select<'a>(&self, formats: &'a [String]) -> Option<&'a str> {
        self.patterns.iter().find_map(|pattern| {
            formats
                .iter()
                .find(|mime| pattern.regex.is_match(mime))
                .map(String::as_str)
        })
    }
}

impl TryFrom<Vec<String>> for FormatPreference {
    type Error = regex::Error;

    fn try_from(patterns: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(patterns)
    }
}

impl From<FormatPreference> for Vec<String> {
    fn from(preference: FormatPreference) -> Self {
        preference.patterns.into_iter().map(|p| p.source).collect()
    }
}
