//! # 条目二进制编码
//!
//! ## 格式
//!
//! 所有整数均为大端 `u32`，字符串与数据均带长度前缀：
//!
//! ```text
//! entry := string 默认类型
//!          u32    数据条数
//!          N × ( string 内容类型, u32 长度, 字节 )
//! string := u32 长度, UTF-8 字节
//! ```
//!
//! 数据按 `formats()` 顺序写出。哈希不写入流，读取时重新计算，
//! 这样哈希算法变化也无需升级格式。
//!
//! ## 实现思路
//!
//! - 写入先拼到 `BytesMut`，再一次性写给调用方的 `Write`。
//! - 读取直接基于 `Read`，长度字段不用于预分配，被篡改的长度只会读到流尾并报截断。
//! - 重复的内容类型、指向不存在数据的默认类型都视为损坏。

use std::io::{self, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use super::{ClipboardEntry, MimeData};

/// 反序列化错误。
///
/// 只影响正在读取的这一条数据，由外层容器决定跳过还是中止。
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("数据被截断：读取 {field} 时到达流末尾")]
    Truncated { field: &'static str },

    #[error("{field} 不是合法的 UTF-8")]
    InvalidUtf8 { field: &'static str },

    #[error("重复的内容类型：{0}")]
    DuplicateFormat(String),

    #[error("默认类型 {0} 没有对应的数据")]
    UnknownDefaultFormat(String),

    #[error("条目之后还有 {0} 字节多余数据")]
    TrailingBytes(usize),

    #[error("不是历史记录文件（文件头不匹配）")]
    BadMagic,

    #[error("不支持的历史记录版本：{0}")]
    UnsupportedVersion(u32),

    #[error("读取失败：{0}")]
    Io(#[from] io::Error),
}

fn length_prefix(len: usize, field: &str) -> io::Result<u32> {
    u32::try_from(len).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} 长度超出格式上限：{} 字节", field, len),
        )
    })
}

pub(crate) fn put_blob(buf: &mut BytesMut, bytes: &[u8], field: &str) -> io::Result<()> {
    buf.put_u32(length_prefix(bytes.len(), field)?);
    buf.put_slice(bytes);
    Ok(())
}

pub(crate) fn read_u32<R: Read>(reader: &mut R, field: &'static str) -> Result<u32, DecodeError> {
    let mut raw = [0u8; 4];
    reader.read_exact(&mut raw).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => DecodeError::Truncated { field },
        _ => DecodeError::Io(err),
    })?;
    Ok(u32::from_be_bytes(raw))
}

pub(crate) fn read_blob<R: Read>(reader: &mut R, field: &'static str) -> Result<Vec<u8>, DecodeError> {
    let len = u64::from(read_u32(reader, field)?);
    let mut bytes = Vec::new();
    reader.by_ref().take(len).read_to_end(&mut bytes)?;
    if bytes.len() as u64 != len {
        return Err(DecodeError::Truncated { field });
    }
    Ok(bytes)
}

fn read_string<R: Read>(reader: &mut R, field: &'static str) -> Result<String, DecodeError> {
    String::from_utf8(read_blob(reader, field)?).map_err(|_| DecodeError::InvalidUtf8 { field })
}

impl ClipboardEntry {
    /// 将条目追加编码到 `buf`。
    pub fn encode(&self, buf: &mut BytesMut) -> io::Result<()> {
        buf.reserve(8 + self.format().len() + self.mime_data().total_size());
        put_blob(buf, self.format().as_bytes(), "默认类型")?;
        buf.put_u32(length_prefix(self.formats().len(), "数据条数")?);
        for (mime, bytes) in self.mime_data().iter() {
            put_blob(buf, mime.as_bytes(), "内容类型")?;
            put_blob(buf, bytes, "数据")?;
        }
        Ok(())
    }

    pub fn to_bytes(&self) -> io::Result<Bytes> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf)?;
        Ok(buf.freeze())
    }

    /// 将条目写入流。
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes()?)
    }

    /// 从流中读取一个条目，返回的条目未挂接任何配置。
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, DecodeError> {
        let format = read_string(reader, "默认类型")?;
        let count = read_u32(reader, "数据条数")?;

        let mut data = MimeData::new();
        for _ in 0..count {
            let mime = read_string(reader, "内容类型")?;
            let bytes = read_blob(reader, "数据")?;
            if data.has_format(&mime) {
                return Err(DecodeError::DuplicateFormat(mime));
            }
            data.set_data(mime, bytes);
        }

        if !format.is_empty() && !data.has_format(&format) {
            return Err(DecodeError::UnknownDefaultFormat(format));
        }

        Ok(Self::from_parts(data, format))
    }

    /// 从完整的字节切片读取一个条目，切片必须恰好被用完。
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut remaining = bytes;
        let entry = Self::read_from(&mut remaining)?;
        if !remaining.is_empty() {
            return Err(DecodeError::TrailingBytes(remaining.len()));
        }
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::DecodeError;
    use crate::clipboard::{ClipboardEntry, MimeData, MIME_HTML, MIME_TEXT};

    fn sample_entry() -> ClipboardEntry {
        let mut entry = ClipboardEntry::new();
        entry.set_data(
            [
                (MIME_TEXT, &b"hello"[..]),
                (MIME_HTML, &b"<b>hello</b>"[..]),
                ("application/x-bin", &[0u8, 255, 0][..]),
            ]
            .into_iter()
            .collect::<MimeData>(),
        );
        entry.set_format(MIME_HTML);
        entry
    }

    #[test]
    fn layout_is_big_endian_and_length_prefixed() {
        let mut entry = ClipboardEntry::new();
        entry.set_data_for(MIME_TEXT, "hi");

        let bytes = entry.to_bytes().expect("encode");
        let mut expected = Vec::new();
        expected.extend_from_slice(&10u32.to_be_bytes());
        expected.extend_from_slice(b"text/plain");
        expected.extend_from_slice(&1u32.to_be_bytes());
        expected.extend_from_slice(&10u32.to_be_bytes());
        expected.extend_from_slice(b"text/plain");
        expected.extend_from_slice(&2u32.to_be_bytes());
        expected.extend_from_slice(b"hi");

        assert_eq!(bytes.as_ref(), expected.as_slice());
    }

    #[test]
    fn round_trip_preserves_formats_default_and_hash() {
        let entry = sample_entry();
        let mut stream = Vec::new();
        entry.write_to(&mut stream).expect("write");

        let decoded = ClipboardEntry::read_from(&mut stream.as_slice()).expect("read");

        assert_eq!(decoded, entry);
        assert_eq!(decoded.formats(), entry.formats());
        assert_eq!(decoded.format(), MIME_HTML);
        assert_eq!(decoded.data_hash(), entry.data_hash());
    }

    #[test]
    fn empty_entry_round_trips() {
        let entry = ClipboardEntry::new();
        let decoded = ClipboardEntry::from_bytes(&entry.to_bytes().expect("encode")).expect("decode");
        assert!(decoded.is_empty());
        assert_eq!(decoded.format(), "");
        assert_eq!(decoded.data_hash(), 0);
    }

    #[test]
    fn every_truncation_is_reported() {
        let bytes = sample_entry().to_bytes().expect("encode");
        for cut in 0..bytes.len() {
            let err = ClipboardEntry::from_bytes(&bytes[..cut]).expect_err("truncated must fail");
            assert!(matches!(err, DecodeError::Truncated { .. }), "cut={cut}: {err:?}");
        }
    }

    #[test]
    fn oversized_length_does_not_allocate_or_panic() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&u32::MAX.to_be_bytes());
        bytes.extend_from_slice(b"abc");

        let err = ClipboardEntry::from_bytes(&bytes).expect_err("must fail");
        assert!(matches!(err, DecodeError::Truncated { .. }));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = sample_entry().to_bytes().expect("encode").to_vec();
        bytes.push(0);
        assert!(matches!(
            ClipboardEntry::from_bytes(&bytes),
            Err(DecodeError::TrailingBytes(1))
        ));
    }

    #[test]
    fn duplicate_format_is_rejected() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0u32.to_be_bytes());
        bytes.extend_from_slice(&2u32.to_be_bytes());
        for payload in [&b"a"[..], &b"b"[..]] {
            bytes.extend_from_slice(&10u32.to_be_bytes());
            bytes.extend_from_slice(b"text/plain");
            bytes.extend_from_slice(&1u32.to_be_bytes());
            bytes.extend_from_slice(payload);
        }

        assert!(matches!(
            ClipboardEntry::from_bytes(&bytes),
            Err(DecodeError::DuplicateFormat(mime)) if mime == MIME_TEXT
        ));
    }

    #[test]
    fn default_format_must_exist() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&9u32.to_be_bytes());
        bytes.extend_from_slice(b"text/html");
        bytes.extend_from_slice(&0u32.to_be_bytes());

        assert!(matches!(
            ClipboardEntry::from_bytes(&bytes),
            Err(DecodeError::UnknownDefaultFormat(mime)) if mime == MIME_HTML
        ));
    }

    #[test]
    fn invalid_utf8_type_name_is_rejected() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&2u32.to_be_bytes());
        bytes.extend_from_slice(&[0xff, 0xfe]);

        assert!(matches!(
            ClipboardEntry::from_bytes(&bytes),
            Err(DecodeError::InvalidUtf8 { .. })
        ));
    }
}
