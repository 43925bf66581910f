//! キーワード辞書のビルドモジュール
//!
//! `keyword_id,pattern`形式のCSVからバイナリ形式のキーワード辞書を構築します。
//! `--zstd`が指定された場合、または出力先の拡張子が`.zst`の場合は
//! Zstandardで圧縮して書き出します。

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use encoded_speech::dictionary::{SpeechTable, SpeechTableBuilder};
use encoded_speech::errors::SpeechError;

use clap::Parser;

/// Zstandardの圧縮レベル
const ZSTD_LEVEL: i32 = 19;

/// ビルドコマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "build",
    about = "A program to build the speech keyword dictionary."
)]
pub struct Args {
    /// Keyword definition file (CSV rows of `keyword_id,pattern`).
    #[clap(short = 'i', long)]
    keywords_in: PathBuf,

    /// File to which the binary dictionary is output (compressed when it ends in `.zst`).
    #[clap(short = 'o', long)]
    speech_out: PathBuf,

    /// Compresses the output with zstd regardless of its extension.
    #[clap(long)]
    zstd: bool,
}

/// ビルド処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 辞書構築エラー
    #[error("Dictionary building failed: {0}")]
    Speech(#[from] SpeechError),
}

/// ビルドコマンドを実行する
///
/// # エラー
///
/// ファイルの読み書きや辞書構築に失敗した場合、`BuildError`を返します。
pub fn run(args: Args) -> Result<(), BuildError> {
    eprintln!("Compiling the speech dictionary...");
    let table = SpeechTableBuilder::from_reader(File::open(&args.keywords_in)?)?;
    log::info!("{} entries read from {}", table.len(), args.keywords_in.display());

    eprintln!("Writing the speech dictionary...");
    let compress = args.zstd || args.speech_out.extension().is_some_and(|ext| ext == "zst");
    write_table(&table, &args.speech_out, compress)?;

    eprintln!("Successfully built the dictionary to {}", args.speech_out.display());
    Ok(())
}

/// 辞書をファイルに書き出す
///
/// CLIに依存しないコアの書き出しロジックです。`compress`が真の場合は
/// Zstandardで圧縮します。
pub fn write_table(table: &SpeechTable, path: &Path, compress: bool) -> Result<(), BuildError> {
    let file = File::create(path)?;
    if compress {
        let mut encoder = zstd::Encoder::new(file, ZSTD_LEVEL)?;
        table.write(&mut encoder)?;
        encoder.finish()?;
    } else {
        let mut wtr = BufWriter::new(file);
        table.write(&mut wtr)?;
        wtr.flush()?;
    }
    Ok(())
}
