//! # 解码与缩放流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → RGBA 缩略图”的过程集中管理，并在关键节点做资源上限控制。
//! 优先读取头部尺寸，再进行完整解码，降低损坏或恶意数据带来的内存开销。
//!
//! ## 实现思路
//!
//! 1. 按字节猜测格式，失败时按内容类型兜底
//! 2. 读取 header 尺寸并按像素/内存上限快速拒绝
//! 3. 完整解码
//! 4. 等比缩放到配置的最大尺寸内，绝不放大
//! 5. 转换 RGBA，并校验字节长度一致性

use fast_image_resize as fr;
use image::{DynamicImage, GenericImageView, ImageBuffer, ImageFormat, ImageReader, Rgba};
use std::io::Cursor;

use super::source::{RawImageData, RenderedImage};
use super::{ImageError, ImageHandler};

/// 计算等比缩放后的尺寸，结果落在 `max_width x max_height` 内且不放大。
///
/// 某一方向的上限为 0 时视为不限制。
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }

    let axis_scale = |size: u32, bound: u32| {
        if bound == 0 {
            1.0
        } else {
            bound as f64 / size as f64
        }
    };
    let scale = axis_scale(width, max_width)
        .min(axis_scale(height, max_height))
        .min(1.0);

    if scale >= 1.0 {
        return (width, height);
    }

    let bound_width = if max_width == 0 { width } else { max_width };
    let bound_height = if max_height == 0 { height } else { max_height };
    let target_width = ((width as f64 * scale).round() as u32).clamp(1, bound_width);
    let target_height = ((height as f64 * scale).round() as u32).clamp(1, bound_height);
    (target_width, target_height)
}

impl ImageHandler<'_> {
    /// 解码图片并缩放为 RGBA 缩略图。
    pub(crate) fn decode_and_fit(&self, raw: RawImageData<'_>) -> Result<RenderedImage, ImageError> {
        let format = Self::detect_format(&raw)?;

        let (header_width, header_height) = Self::inspect_dimensions(raw.bytes, format)?;
        self.validate_pixel_limits(header_width, header_height)?;
        self.validate_decoded_memory_limits(header_width, header_height)?;

        let decoded = image::load_from_memory_with_format(raw.bytes, format)
            .map_err(|e| ImageError::Decode(format!("图片解码失败：{}", e)))?;

        let (source_width, source_height) = decoded.dimensions();
        self.validate_pixel_limits(source_width, source_height)?;

        let fitted = self.fit_to_bounds(decoded)?;
        let (width, height) = fitted.dimensions();
        let rgba = fitted.to_rgba8().into_raw();

        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| ImageError::ResourceLimit("图片尺寸导致内存溢出风险".to_string()))?;

        if rgba.len() != expected_len {
            return Err(ImageError::Decode("解码后像素数据长度异常".to_string()));
        }

        log::debug!(
            "🖼️ 图片渲染成功 - 类型: {} 原始尺寸: {}x{} 输出尺寸: {}x{}",
            raw.mime,
            source_width,
            source_height,
            width,
            height
        );

        Ok(RenderedImage {
            width,
            height,
            rgba,
            source_width,
            source_height,
            mime: raw.mime.to_string(),
        })
    }

    fn detect_format(raw: &RawImageData<'_>) -> Result<ImageFormat, ImageError> {
        image::guess_format(raw.bytes)
            .ok()
            .or_else(|| ImageFormat::from_mime_type(raw.mime))
            .ok_or_else(|| {
                ImageError::InvalidFormat(format!("无法识别图片格式（类型：{}）", raw.mime))
            })
    }

    /// 仅通过图片头信息读取宽高。
    fn inspect_dimensions(bytes: &[u8], format: ImageFormat) -> Result<(u32, u32), ImageError> {
        let mut reader = ImageReader::new(Cursor::new(bytes));
        reader.set_format(format);
        reader
            .into_dimensions()
            .map_err(|e| ImageError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))
    }

    fn validate_pixel_limits(&self, width: u32, height: u32) -> Result<(), ImageError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| ImageError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > self.config.max_decoded_pixels {
            return Err(ImageError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, self.config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    fn validate_decoded_memory_limits(&self, width: u32, height: u32) -> Result<(), ImageError> {
        let estimated = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| ImageError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

        if estimated > self.config.max_decoded_bytes {
            return Err(ImageError::ResourceLimit(format!(
                "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated as f64 / 1024.0 / 1024.0,
                self.config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }

    fn fit_to_bounds(&self, image: DynamicImage) -> Result<DynamicImage, ImageError> {
        let (width, height) = image.dimensions();
        let (target_width, target_height) =
            fit_within(width, height, self.config.max_width, self.config.max_height);

        if (target_width, target_height) == (width, height) {
            return Ok(image);
        }

        let filter = self.config.resize_filter();
        log::debug!(
            "🧩 缩放：{}x{} -> {}x{}（filter={:?}）",
            width,
            height,
            target_width,
            target_height,
            filter
        );

        match Self::resize_with_fast_image_resize(&image, target_width, target_height, filter) {
            Ok(resized) => Ok(resized),
            Err(err) => {
                log::warn!("⚠️ fast_image_resize 缩放失败，回退 image::resize_exact：{}", err);
                Ok(image.resize_exact(target_width, target_height, filter))
            }
        }
    }

    fn resize_with_fast_image_resize(
        image: &DynamicImage,
        target_width: u32,
        target_height: u32,
        filter: image::imageops::FilterType,
    ) -> Result<DynamicImage, ImageError> {
        let src = image.to_rgba8();
        let (src_width, src_height) = src.dimensions();

        let src_image = fr::images::Image::from_vec_u8(
            src_width,
            src_height,
            src.into_raw(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| ImageError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(Self::to_fast_filter(filter)));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| ImageError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

        let rgba = ImageBuffer::<Rgba<u8>, Vec<u8>>::from_raw(
            target_width,
            target_height,
            dst_image.into_vec(),
        )
        .ok_or_else(|| ImageError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))?;

        Ok(DynamicImage::ImageRgba8(rgba))
    }

    fn to_fast_filter(filter: image::imageops::FilterType) -> fr::FilterType {
        match filter {
            image::imageops::FilterType::Nearest => fr::FilterType::Box,
            image::imageops::FilterType::Triangle => fr::FilterType::Bilinear,
            image::imageops::FilterType::CatmullRom => fr::FilterType::CatmullRom,
            image::imageops::FilterType::Gaussian => fr::FilterType::Mitchell,
            image::imageops::FilterType::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }
}
