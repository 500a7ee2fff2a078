//! 内容哈希
//!
//! 每个类型的数据单独计算 xxh3，再以回绕加法累加。加法与遍历顺序无关，
//! 且不会像异或那样让两份相同数据互相抵消。类型名不参与哈希。
//!
//! 哈希只用于快速过滤，判等仍以完整字节比较为准。

use twox_hash::xxh3::hash64;

use super::MimeData;

/// 空数据的哈希值。
pub const EMPTY_HASH: u64 = 0;

/// 单个数据块的哈希分量。
pub(crate) fn payload_hash(data: &[u8]) -> u64 {
    hash64(data)
}

/// 计算整份快照的内容哈希。
pub fn content_hash(data: &MimeData) -> u64 {
    data.iter()
        .fold(EMPTY_HASH, |acc, (_, bytes)| acc.wrapping_add(payload_hash(bytes)))
}

#[cfg(test)]
mod tests {
    use super::{content_hash, EMPTY_HASH};
    use crate::clipboard::{MimeData, MIME_HTML, MIME_TEXT};

    #[test]
    fn empty_snapshot_hashes_to_zero() {
        assert_eq!(content_hash(&MimeData::new()), EMPTY_HASH);
    }

    #[test]
    fn hash_ignores_enumeration_order() {
        let a: MimeData = [(MIME_TEXT, "a"), (MIME_HTML, "<b>a</b>")].into_iter().collect();
        let b: MimeData = [(MIME_HTML, "<b>a</b>"), (MIME_TEXT, "a")].into_iter().collect();
        assert_eq!(content_hash(&a), content_hash(&b));
    }

    #[test]
    fn identical_payloads_do_not_cancel_out() {
        let data: MimeData = [("a/x", "same"), ("b/x", "same")].into_iter().collect();
        assert_ne!(content_hash(&data), EMPTY_HASH);
    }

    #[test]
    fn hash_changes_with_payload_bytes() {
        let a: MimeData = [(MIME_TEXT, "hi")].into_iter().collect();
        let b: MimeData = [(MIME_TEXT, "hey")].into_iter().collect();
        assert_ne!(content_hash(&a), content_hash(&b));
    }
}
