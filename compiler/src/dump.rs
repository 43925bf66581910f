//! キーワード辞書の内容を表示するモジュール

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use encoded_speech::SpeechTable;
use encoded_speech::errors::SpeechError;

use clap::Parser;

/// 表示コマンドの引数
#[derive(Parser, Debug)]
#[clap(name = "dump", about = "Prints the entries of a speech keyword dictionary.")]
pub struct Args {
    /// Speech dictionary (plain, or zstd when it ends in `.zst`).
    #[clap(short = 'i', long)]
    speech_in: PathBuf,
}

/// 表示処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 辞書読み込みエラー
    #[error("Dictionary loading failed: {0}")]
    Speech(#[from] SpeechError),
}

/// 辞書の各エントリを`keyword_id<TAB>pattern`の形式で標準出力に書き出す
pub fn run(args: Args) -> Result<(), DumpError> {
    let table = SpeechTable::load(&args.speech_in)?;
    if table.is_empty() {
        eprintln!("No entries in {}", args.speech_in.display());
    }

    let out = io::stdout();
    let mut out = BufWriter::new(out.lock());
    write_entries(&table, &mut out)?;
    out.flush()?;

    Ok(())
}

fn write_entries<W: Write>(table: &SpeechTable, mut wtr: W) -> io::Result<()> {
    for entry in table {
        writeln!(wtr, "{}\t{}", entry.keyword_id, entry.pattern.to_raw())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use encoded_speech::dictionary::SpeechEntry;

    #[test]
    fn test_write_entries() {
        let table = SpeechTable::from_entries(vec![
            SpeechEntry::new(5, "hello*"),
            SpeechEntry::new(17, "*bye"),
        ]);
        let mut buf = vec![];
        write_entries(&table, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "5\thello*\n17\t*bye\n");
    }
}
