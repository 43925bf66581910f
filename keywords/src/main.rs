//! 発話テキストをキーワードIDに解決するユーティリティ
//!
//! このバイナリは、標準入力から読み込んだ各行をキーワード辞書と照合し、
//! 指定された出力形式（ids、hex、detail）で結果を出力します。

use std::error::Error;
use std::io::{BufRead, BufWriter, IsTerminal, Write};
use std::path::PathBuf;
use std::str::FromStr;

use encoded_speech::{DataDirectory, KeywordResolver};

use clap::Parser;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Ids,
    Hex,
    Detail,
}

impl FromStr for OutputMode {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "ids" => Ok(Self::Ids),
            "hex" => Ok(Self::Hex),
            "detail" => Ok(Self::Detail),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "keywords", about = "Resolves speech keywords")]
struct Args {
    /// Speech dictionary file (plain, or zstd when it ends in `.zst`).
    #[clap(short = 'i', long, conflicts_with = "data_dir")]
    speech_in: Option<PathBuf>,

    /// Directory containing Speech.mul (or Speech.mul.zst). Defaults to the per-user data directory.
    #[clap(short = 'd', long)]
    data_dir: Option<PathBuf>,

    /// Output mode. Choices are ids, hex, and detail.
    #[clap(short = 'O', long, default_value = "ids")]
    output_mode: OutputMode,
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// メイン関数
///
/// 辞書をロードし、標準入力から読み込んだ各行を解決して、
/// 指定された形式で結果を標準出力に出力します。
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let resolver = if let Some(path) = args.speech_in {
        eprintln!("Loading the dictionary from {}...", path.display());
        KeywordResolver::new(move |_: &str| path.clone())
    } else {
        let locator = match args.data_dir {
            Some(dir) => DataDirectory::new(dir),
            None => {
                DataDirectory::global().ok_or("Could not determine the local data directory.")?
            }
        };
        eprintln!("Loading the dictionary from {}...", locator.root().display());
        KeywordResolver::new(locator)
    };
    let num_entries = resolver.table().len();
    eprintln!("Ready to resolve ({} entries)", num_entries);

    let is_tty = std::io::stdout().is_terminal();

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        let ids = resolver.keywords(&line);
        match args.output_mode {
            OutputMode::Ids => {
                let ids: Vec<String> = ids.iter().map(u16::to_string).collect();
                writeln!(&mut out, "{}", ids.join(" "))?;
            }
            OutputMode::Hex => {
                writeln!(&mut out, "{}", hex(&encoded_speech::encoder::encode(&ids)))?;
            }
            OutputMode::Detail => {
                let packed = encoded_speech::encoder::encode(&ids);
                writeln!(
                    &mut out,
                    "{}\tcount={}\tids={:?}\tpacked={}",
                    line,
                    ids.len(),
                    ids,
                    hex(&packed),
                )?;
            }
        }
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_speech_in() {
        let args = Args::try_parse_from(["keywords", "-i", "Speech.mul.zst", "-O", "hex"]).unwrap();
        assert_eq!(args.speech_in, Some(PathBuf::from("Speech.mul.zst")));
        assert!(args.data_dir.is_none());
        assert!(matches!(args.output_mode, OutputMode::Hex));
    }

    #[test]
    fn test_args_speech_in_conflicts_with_data_dir() {
        assert!(Args::try_parse_from(["keywords", "-i", "Speech.mul", "-d", "/opt/client"]).is_err());
    }
}
