//! 辞書エントリ
//!
//! このモジュールは、キーワードIDとパターンの組を表す辞書エントリを提供します。

use crate::dictionary::pattern::Pattern;

/// キーワード辞書の1レコード
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeechEntry {
    /// このパターンに一致したときに送出されるキーワードID
    pub keyword_id: u16,

    /// ワイルドカード分割済みのパターン
    pub pattern: Pattern,
}

impl SpeechEntry {
    /// 新しいインスタンスを作成します。
    ///
    /// # 引数
    ///
    /// * `keyword_id` - キーワードID
    /// * `raw` - `*`をワイルドカードとして含むパターン文字列
    pub fn new(keyword_id: u16, raw: &str) -> Self {
        Self {
            keyword_id,
            pattern: Pattern::new(raw),
        }
    }

    /// 入力文字列がこのエントリのパターンに一致するかどうかを判定します。
    #[inline(always)]
    pub fn is_match(&self, input: &str) -> bool {
        self.pattern.is_match(input)
    }
}
