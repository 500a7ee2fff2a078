//! # 历史记录文件
//!
//! ## 格式
//!
//! ```text
//! file   := "CLPH" | u32 版本 | u32 条目数 | N × record
//! record := u32 长度 | 条目编码（恰好占满该长度）
//! ```
//!
//! ## 实现思路
//!
//! 每个条目单独加长度帧，解码失败的条目可以整体跳过而不影响后续条目。
//! 只有文件头错误会让整个加载失败；帧本身被截断时停止读取，
//! 保留之前已成功解析的条目。

use std::io::{self, Read, Write};

use bytes::{BufMut, BytesMut};

use crate::clipboard::{put_blob, read_blob, read_u32, ClipboardEntry, DecodeError};

const MAGIC: &[u8; 4] = b"CLPH";
/// 当前写出的文件版本。
pub const HISTORY_FORMAT_VERSION: u32 = 1;

/// 单条记录的解码失败。
#[derive(Debug)]
pub struct RecordFailure {
    /// 记录在文件中的序号（从 0 开始）。
    pub index: usize,
    pub error: DecodeError,
}

/// 一次加载的结果：成功的条目与失败的记录。
#[derive(Debug, Default)]
pub struct LoadReport {
    pub entries: Vec<ClipboardEntry>,
    pub failures: Vec<RecordFailure>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 写出全部条目。
pub fn write_history<'a, W, I>(writer: &mut W, entries: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ClipboardEntry>,
    I::IntoIter: ExactSizeIterator,
{
    let entries = entries.into_iter();
    let count = u32::try_from(entries.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "条目数量超出格式上限"))?;

    let mut buf = BytesMut::new();
    buf.put_slice(MAGIC);
    buf.put_u32(HISTORY_FORMAT_VERSION);
    buf.put_u32(count);

    let mut record = BytesMut::new();
    for entry in entries {
        record.clear();
        entry.encode(&mut record)?;
        put_blob(&mut buf, &record, "条目")?;
    }

    writer.write_all(&buf)?;
    writer.flush()?;
    Ok(())
}

/// 读取历史记录文件。
///
/// 文件头错误返回 `Err`；单条记录损坏只记录到 `LoadReport::failures`。
pub fn read_history<R: Read>(reader: &mut R) -> Result<LoadReport, DecodeError> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic).map_err(|err| match err.kind() {
        io::ErrorKind::UnexpectedEof => DecodeError::BadMagic,
        _ => DecodeError::Io(err),
    })?;
    if &magic != MAGIC {
        return Err(DecodeError::BadMagic);
    }

    let version = read_u32(reader, "版本")?;
    if version != HISTORY_FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let count = read_u32(reader, "条目数")? as usize;
    let mut report = LoadReport::default();

    for index in 0..count {
        let record = match read_blob(reader, "条目") {
            Ok(record) => record,
            Err(error) => {
                log::warn!("⚠️ 历史记录第 {} 条帧损坏，停止读取：{}", index, error);
                report.failures.push(RecordFailure { index, error });
                break;
            }
        };

        match ClipboardEntry::from_bytes(&record) {
            Ok(entry) => report.entries.push(entry),
            Err(error) => {
                log::warn!("⚠️ 跳过无法解析的历史记录第 {} 条：{}", index, error);
                report.failures.push(RecordFailure { index, error });
            }
        }
    }

    log::info!(
        "📂 历史记录读取完成 - 成功: {} 失败: {}",
        report.entries.len(),
        report.failures.len()
    );
    Ok(report)
}
