//! エラー型の定義
//!
//! このモジュールは、encoded-speechライブラリで使用されるエラー型を定義します。
//! 辞書の読み込みやキーワード解決そのものは失敗しない設計のため、
//! エラーが表面化するのは主に辞書ファイルの入出力と構築時です。

use std::error::Error;
use std::fmt;

/// encoded-speech専用のResult型
///
/// エラー型としてデフォルトで[`SpeechError`]を使用します。
pub type Result<T, E = SpeechError> = std::result::Result<T, E>;

/// encoded-speechのエラー型
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    /// 無効な引数エラー
    ///
    /// [`InvalidArgumentError`]のエラーバリアント。
    #[error(transparent)]
    InvalidArgument(InvalidArgumentError),

    /// 無効なフォーマットエラー
    ///
    /// [`InvalidFormatError`]のエラーバリアント。
    #[error(transparent)]
    InvalidFormat(InvalidFormatError),

    /// 整数パースエラー
    ///
    /// [`ParseIntError`](std::num::ParseIntError)のエラーバリアント。
    #[error(transparent)]
    ParseInt(std::num::ParseIntError),

    /// ディレクトリが指定されたエラー
    ///
    /// ファイルが期待される場所にディレクトリが指定された場合に発生します。
    #[error("The path '{0}' is a directory, but a file was expected.")]
    PathIsDirectory(std::path::PathBuf),

    /// I/Oエラー
    ///
    /// [`std::io::Error`](std::io::Error)のエラーバリアント。
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl SpeechError {
    /// 無効な引数エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 引数の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }
}

/// 引数が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// 引数の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// 入力フォーマットが無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidFormatError {
    /// フォーマットの名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

impl From<std::num::ParseIntError> for SpeechError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::ParseInt(error)
    }
}
