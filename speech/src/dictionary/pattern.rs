//! ワイルドカード付きキーワードパターン
//!
//! このモジュールは、`*`で区切られたリテラル断片の列としてパターンを保持し、
//! 入力文字列がその断片を順番に含むかどうかを判定します。

/// パターン中のワイルドカード文字
pub const WILDCARD: char = '*';

/// ワイルドカードで分割されたキーワードパターン
///
/// 生のパターン文字列を[`WILDCARD`]で分割した断片列を保持します。
/// 先頭・末尾・連続したワイルドカードは空の断片として残ります。
///
/// # 例
///
/// ```
/// use encoded_speech::dictionary::Pattern;
///
/// let pattern = Pattern::new("*bye");
/// assert_eq!(pattern.segments(), &["", "bye"]);
/// assert!(pattern.is_match("goodbye"));
/// assert!(!pattern.is_match("goodbye now"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    segments: Vec<String>,
}

impl Pattern {
    /// 生のパターン文字列から新しいインスタンスを作成します。
    ///
    /// # 引数
    ///
    /// * `raw` - `*`をワイルドカードとして含むパターン文字列
    ///
    /// # 戻り値
    ///
    /// 分割済みのパターン。`raw`が空でも空の断片が1つ残ります。
    pub fn new(raw: &str) -> Self {
        Self {
            segments: raw.split(WILDCARD).map(str::to_string).collect(),
        }
    }

    /// 断片列を取得します。
    #[inline(always)]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// 断片を`*`で連結し、元のパターン文字列を復元します。
    pub fn to_raw(&self) -> String {
        self.segments.join("*")
    }

    /// 入力文字列がこのパターンに一致するかどうかを判定します。
    ///
    /// 断片を先頭から順に、直前の一致位置以降で検索します。
    /// 最初の断片が空でなければ入力の先頭に一致しなければならず、
    /// 最後の断片が空でなければ最後の一致が入力の末尾で終わらなければなりません。
    ///
    /// # 引数
    ///
    /// * `input` - 小文字に正規化済みの入力文字列
    ///
    /// # 戻り値
    ///
    /// 一致した場合は`true`
    pub fn is_match(&self, input: &str) -> bool {
        let mut cursor = 0;

        for (i, segment) in self.segments.iter().enumerate() {
            if segment.is_empty() {
                continue;
            }
            // `cursor` always sits at the end of a previous match, so it is a char boundary.
            let Some(offset) = input[cursor..].find(segment.as_str()) else {
                return false;
            };
            let index = cursor + offset;
            if i == 0 && index > 0 {
                return false;
            }
            cursor = index + segment.len();
        }

        match self.segments.last() {
            Some(last) if last.is_empty() => true,
            _ => cursor == input.len(),
        }
    }
}

impl From<&str> for Pattern {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_empty_segments() {
        assert_eq!(Pattern::new("hi*").segments(), &["hi", ""]);
        assert_eq!(Pattern::new("*bye").segments(), &["", "bye"]);
        assert_eq!(Pattern::new("a**b").segments(), &["a", "", "b"]);
        assert_eq!(Pattern::new("").segments(), &[""]);
        assert_eq!(Pattern::new("*").segments(), &["", ""]);
    }

    #[test]
    fn test_to_raw() {
        for raw in ["hello", "*bye", "hi*", "a**b", "*", ""] {
            assert_eq!(Pattern::new(raw).to_raw(), raw);
        }
    }

    #[test]
    fn test_literal_requires_exact_match() {
        let pattern = Pattern::new("hello");
        assert!(pattern.is_match("hello"));
        assert!(!pattern.is_match("hello world"));
        assert!(!pattern.is_match("say hello"));
        assert!(!pattern.is_match("hell"));
        assert!(!pattern.is_match(""));
    }

    #[test]
    fn test_trailing_wildcard() {
        let pattern = Pattern::new("hi*");
        assert!(pattern.is_match("hi there"));
        assert!(pattern.is_match("hi"));
        assert!(!pattern.is_match("oh hi"));
    }

    #[test]
    fn test_leading_wildcard() {
        let pattern = Pattern::new("*bye");
        assert!(pattern.is_match("goodbye"));
        assert!(pattern.is_match("bye"));
        assert!(!pattern.is_match("bye now"));
    }

    #[test]
    fn test_inner_wildcard() {
        let pattern = Pattern::new("*buy*bank*");
        assert!(pattern.is_match("i want to buy a bank box"));
        assert!(pattern.is_match("buybank"));
        assert!(!pattern.is_match("bank buy"));
    }

    #[test]
    fn test_segments_in_order() {
        let pattern = Pattern::new("vendor*buy");
        assert!(pattern.is_match("vendor buy"));
        assert!(pattern.is_match("vendor please buy"));
        assert!(!pattern.is_match("vendor buy now"));
        assert!(!pattern.is_match("buy vendor"));
    }

    #[test]
    fn test_end_anchor_uses_last_occurrence_scan() {
        // The scan takes the first occurrence after the cursor, so a later
        // occurrence that would align with the end is never considered.
        let pattern = Pattern::new("*ab");
        assert!(!pattern.is_match("abab"));
        assert!(pattern.is_match("xab"));
    }

    #[test]
    fn test_first_segment_found_later_fails() {
        let pattern = Pattern::new("guards*");
        assert!(!pattern.is_match("call the guards"));
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        let pattern = Pattern::new("");
        assert!(pattern.is_match(""));
        assert!(pattern.is_match("anything"));
    }

    #[test]
    fn test_multibyte_input() {
        let pattern = Pattern::new("*caf\u{e9}*");
        assert!(pattern.is_match("un caf\u{e9} s'il vous pla\u{ee}t"));
        let pattern = Pattern::new("na\u{ef}ve");
        assert!(pattern.is_match("na\u{ef}ve"));
    }
}
