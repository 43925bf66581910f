//! 辞書構築のためのビルダー
//!
//! このモジュールは、`keyword_id,pattern`形式のCSVから[`SpeechTable`]を
//! 構築するためのビルダーを提供します。

use std::io::Read;

use crate::dictionary::{SpeechEntry, SpeechTable};
use crate::encoder::MAX_KEYWORD_ID;
use crate::errors::{Result, SpeechError};
use crate::utils::{is_latin1, parse_csv_row};

/// CSVソースから[`SpeechTable`]を構築するビルダー
pub struct SpeechTableBuilder {}

impl SpeechTableBuilder {
    /// CSV形式のキーワード定義から新しい[`SpeechTable`]を作成します。
    ///
    /// 各行は`keyword_id,pattern`の2列です。パターンにカンマや改行を含める場合は
    /// ダブルクォートで囲みます。空行は無視され、パターンが空の行は
    /// 警告を出してスキップされます。大文字を含むパターンは小文字化された
    /// 入力に一致しないため、警告を出したうえでそのまま登録されます。
    ///
    /// # 引数
    ///
    /// * `rdr` - CSVファイルのリーダー
    ///
    /// # エラー
    ///
    /// 以下の場合に[`SpeechError`]を返します:
    /// - 列数が2でない行がある場合。
    /// - キーワードIDが整数として解釈できない、または`0x0FFF`を超える場合。
    /// - パターンにLatin-1で表現できない文字が含まれる場合。
    /// - パターンが`u16::MAX`バイトを超える場合。
    pub fn from_reader<R>(mut rdr: R) -> Result<SpeechTable>
    where
        R: Read,
    {
        let mut buf = String::new();
        rdr.read_to_string(&mut buf)?;

        let mut entries = vec![];
        let mut row = String::new();
        let mut row_start = 0;
        for (lineno, line) in buf.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if row.is_empty() {
                if line.trim().is_empty() {
                    continue;
                }
                row_start = lineno + 1;
            } else {
                row.push('\n');
            }
            row.push_str(line);
            // An odd number of quotes leaves a quoted field open across the newline.
            if row.matches('"').count() % 2 == 1 {
                continue;
            }
            if let Some(entry) = Self::parse_row(&row, row_start)? {
                entries.push(entry);
            }
            row.clear();
        }
        if !row.is_empty() {
            if let Some(entry) = Self::parse_row(&row, row_start)? {
                entries.push(entry);
            }
        }

        Ok(SpeechTable::from_entries(entries))
    }

    fn parse_row(line: &str, lineno: usize) -> Result<Option<SpeechEntry>> {
        let cols = parse_csv_row(line);
        if cols.len() != 2 {
            let msg = format!(
                "A csv row of keywords must have two items, line {}: {:?}",
                lineno, line,
            );
            return Err(SpeechError::invalid_format("keywords.csv", msg));
        }

        let keyword_id: u16 = cols[0].trim().parse()?;
        if keyword_id > MAX_KEYWORD_ID {
            return Err(SpeechError::invalid_argument(
                "keyword_id",
                format!(
                    "{} does not fit in 12 bits (line {}, max {})",
                    keyword_id, lineno, MAX_KEYWORD_ID,
                ),
            ));
        }

        let pattern = &cols[1];
        if pattern.is_empty() {
            log::warn!("Skipped an empty pattern, line {}: {:?}", lineno, line);
            return Ok(None);
        }
        if has_uppercase(pattern) {
            log::warn!(
                "Pattern never matches lowercased input, line {}: {:?}",
                lineno,
                pattern,
            );
        }
        if !is_latin1(pattern) {
            return Err(SpeechError::invalid_argument(
                "pattern",
                format!("{:?} contains characters outside Latin-1 (line {})", pattern, lineno),
            ));
        }
        if pattern.chars().count() > usize::from(u16::MAX) {
            return Err(SpeechError::invalid_argument(
                "pattern",
                format!("pattern is longer than {} bytes (line {})", u16::MAX, lineno),
            ));
        }

        Ok(Some(SpeechEntry::new(keyword_id, pattern)))
    }
}

fn has_uppercase(pattern: &str) -> bool {
    pattern.chars().any(char::is_uppercase)
}
