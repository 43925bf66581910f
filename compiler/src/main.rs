//! キーワード辞書コンパイラのメインエントリーポイント
//!
//! CSV形式のキーワード定義からバイナリ辞書(`Speech.mul`)を構築するサブコマンドと、
//! 既存の辞書の内容を確認するサブコマンドを提供します。

mod build;
mod dump;

use clap::Parser;
use thiserror::Error;

use crate::{build::BuildError, dump::DumpError};

/// コマンドライン引数の構造体
#[derive(Parser, Debug)]
#[clap(name = "compile", version)]
struct Cli {
    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Command,
}

/// 利用可能なサブコマンド
#[derive(Parser, Debug)]
enum Command {
    /// CSVからバイナリ辞書を構築します
    Build(build::Args),

    /// バイナリ辞書の内容を表示します
    Dump(dump::Args),
}

/// コンパイラの実行中に発生する可能性のあるエラー
#[derive(Debug, Error)]
pub enum CompileError {
    /// 辞書ビルド中のエラー
    #[error(transparent)]
    BuildError(#[from] BuildError),
    /// 辞書表示中のエラー
    #[error(transparent)]
    DumpError(#[from] DumpError),
}

fn main() -> Result<(), CompileError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Build(args) => Ok(build::run(args)?),
        Command::Dump(args) => Ok(dump::run(args)?),
    }
}
