//! テキストからキーワードIDへの解決
//!
//! [`KeywordResolver`]は辞書を遅延読み込みして保持し、入力テキストに一致する
//! すべてのエントリのIDを集めてパック済みのバイト列を返します。
//!
//! # 例
//!
//! ```
//! use encoded_speech::dictionary::{SpeechEntry, SpeechTable};
//! use encoded_speech::KeywordResolver;
//!
//! let table = SpeechTable::from_entries(vec![
//!     SpeechEntry::new(0x02a, "*bank*"),
//!     SpeechEntry::new(0x010, "*balance*"),
//! ]);
//! let resolver = KeywordResolver::from_table(table);
//!
//! assert_eq!(resolver.keywords("Bank Balance"), vec![0x010, 0x02a]);
//! assert_eq!(resolver.resolve("Bank Balance"), vec![0x20, 0x10, 0x02, 0xa0]);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::dictionary::{FileLocator, SPEECH_FILE_NAME, SpeechTable};
use crate::encoder;

/// キーワード辞書を保持し、テキストをキーワードIDに解決するリゾルバ。
///
/// 辞書は最初の解決要求時に一度だけ読み込まれ、以降は[`reload`](Self::reload)が
/// 呼ばれるまで共有されます。読み込み中に並行して呼び出されたスレッドは
/// 読み込みの完了を待つため、構築途中の辞書が観測されることはありません。
///
/// `KeywordResolver`は`Send + Sync`であり、`Arc`で包んで共有できます。
pub struct KeywordResolver {
    locator: Option<Box<dyn FileLocator>>,
    table: RwLock<Option<Arc<SpeechTable>>>,
}

impl KeywordResolver {
    /// ロケーターを介して辞書ファイルを探すリゾルバを作成します。
    ///
    /// この時点ではファイルを読み込みません。
    ///
    /// # 引数
    ///
    /// * `locator` - `Speech.mul`の配置場所を解決するロケーター
    pub fn new<L>(locator: L) -> Self
    where
        L: FileLocator + 'static,
    {
        Self {
            locator: Some(Box::new(locator)),
            table: RwLock::new(None),
        }
    }

    /// 構築済みの辞書を直接保持するリゾルバを作成します。
    ///
    /// このリゾルバの[`reload`](Self::reload)は辞書を置き換えません。
    pub fn from_table(table: SpeechTable) -> Self {
        Self::from_shared_table(Arc::new(table))
    }

    /// 共有された辞書を保持するリゾルバを作成します。
    pub fn from_shared_table(table: Arc<SpeechTable>) -> Self {
        Self {
            locator: None,
            table: RwLock::new(Some(table)),
        }
    }

    /// 現在の辞書を取得します。未読み込みの場合はここで読み込みます。
    pub fn table(&self) -> Arc<SpeechTable> {
        if let Some(table) = self.table.read().as_ref() {
            return Arc::clone(table);
        }

        let mut guard = self.table.write();
        // Another caller may have finished loading while we waited for the lock.
        if let Some(table) = guard.as_ref() {
            return Arc::clone(table);
        }
        let table = Arc::new(self.load());
        *guard = Some(Arc::clone(&table));
        table
    }

    /// 辞書を読み込み直して置き換えます。
    ///
    /// 新しい辞書は完全に構築されてから公開されます。置き換え前に取得された
    /// スナップショットは引き続き有効です。
    ///
    /// # 戻り値
    ///
    /// 新しい辞書のエントリ数
    pub fn reload(&self) -> usize {
        if self.locator.is_none() {
            return self.table().len();
        }
        let table = Arc::new(self.load());
        let len = table.len();
        *self.table.write() = Some(table);
        len
    }

    fn load(&self) -> SpeechTable {
        let Some(locator) = self.locator.as_ref() else {
            return SpeechTable::empty();
        };
        let path = locator.locate(SPEECH_FILE_NAME);
        match SpeechTable::load(&path) {
            Ok(table) => table,
            Err(e) => {
                log::error!(
                    "Failed to load speech table {}: {}; keyword matching is disabled",
                    path.display(),
                    e,
                );
                SpeechTable::empty()
            }
        }
    }

    /// テキストに一致するキーワードIDを昇順で取得します。
    ///
    /// テキストは小文字化だけを行って比較されます。複数のエントリが同じIDで
    /// 一致した場合、そのIDは重複して含まれます。
    ///
    /// # 引数
    ///
    /// * `text` - 発話テキスト
    pub fn keywords(&self, text: &str) -> Vec<u16> {
        let table = self.table();
        let text = text.to_lowercase();

        let mut ids: Vec<u16> = table
            .iter()
            .filter(|entry| entry.is_match(&text))
            .map(|entry| entry.keyword_id)
            .collect();
        ids.sort();
        ids
    }

    /// テキストを解決し、パック済みのキーワードバイト列を返します。
    ///
    /// 一致がない場合でも、件数0を表す1バイト(`0x00`)が返ります。
    pub fn resolve(&self, text: &str) -> Vec<u8> {
        encoder::encode(&self.keywords(text))
    }
}

impl fmt::Debug for KeywordResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordResolver")
            .field("has_locator", &self.locator.is_some())
            .field("loaded_entries", &self.table.read().as_ref().map(|t| t.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dictionary::SpeechEntry;

    fn resolver(entries: &[(u16, &str)]) -> KeywordResolver {
        KeywordResolver::from_table(SpeechTable::from_entries(
            entries
                .iter()
                .map(|&(id, raw)| SpeechEntry::new(id, raw))
                .collect(),
        ))
    }

    #[test]
    fn test_literal_needs_end_alignment() {
        let r = resolver(&[(5, "hello")]);
        assert!(r.keywords("hello world").is_empty());
        assert_eq!(r.keywords("hello"), vec![5]);
    }

    #[test]
    fn test_trailing_wildcard_match() {
        let r = resolver(&[(5, "hello*")]);
        assert_eq!(r.keywords("hello world"), vec![5]);
    }

    #[test]
    fn test_case_insensitive() {
        let r = resolver(&[(5, "*guards*")]);
        assert_eq!(r.keywords("GUARDS! Help!"), vec![5]);
    }

    #[test]
    fn test_sorted_with_duplicates() {
        let r = resolver(&[(30, "*bank*"), (4, "*balance*"), (30, "bank*"), (12, "*vendor*")]);
        assert_eq!(r.keywords("bank balance"), vec![4, 30, 30]);
    }

    #[test]
    fn test_resolve_no_match() {
        let r = resolver(&[(5, "*bank*")]);
        assert_eq!(r.resolve("hail"), vec![0x00]);
    }

    #[test]
    fn test_resolve_packs() {
        let r = resolver(&[(0xABC, "*bank*")]);
        assert_eq!(r.resolve("bank"), vec![0x1A, 0xBC]);
    }

    #[test]
    fn test_reload_without_locator_keeps_table() {
        let r = resolver(&[(5, "*bank*")]);
        assert_eq!(r.reload(), 1);
        assert_eq!(r.keywords("bank"), vec![5]);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let r = KeywordResolver::new(|_: &str| {
            std::path::PathBuf::from("/nonexistent/encoded-speech/Speech.mul")
        });
        assert!(r.table().is_empty());
        assert_eq!(r.resolve("bank"), vec![0x00]);
    }
}
