//! キーワード辞書モジュール。
//!
//! このモジュールは、キーワードパターン辞書(`Speech.mul`)の読み込み、構築、
//! 書き出しを行います。
//!
//! # ファイルフォーマット
//!
//! ファイルはレコードの単純な連続で、終端はファイルの末尾です。
//!
//! ```text
//! keyword_id : u16 (big endian)
//! length     : u16 (big endian)
//! text       : [u8; length]  (1バイト文字、`*`はワイルドカード)
//! ```
//!
//! `length`が0のレコードはヘッダーだけを消費してスキップされます。
//! 途中で切れたファイルも読み込みエラーにはならず、それまでに読めた
//! レコードが辞書として使われます。
//!
//! # 辞書の読み込み方法
//!
//! - [`SpeechTable::load`]: ファイルパスから読み込む(`.zst`なら展開する)
//! - [`SpeechTable::from_path`]: 非圧縮ファイルから読み込む
//! - [`SpeechTable::from_zstd`]: Zstandard圧縮ファイルから読み込む
//! - [`SpeechTable::read`]: リーダーから読み込む
//! - [`SpeechTableBuilder`]: CSV形式のソースから構築する
pub mod builder;
pub mod config;
pub(crate) mod entry;
pub(crate) mod pattern;

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::errors::{Result, SpeechError};
use crate::utils::{decode_latin1, encode_latin1};

pub use crate::dictionary::builder::SpeechTableBuilder;
pub use crate::dictionary::config::{DataDirectory, FileLocator, SPEECH_FILE_NAME};
pub use crate::dictionary::entry::SpeechEntry;
pub use crate::dictionary::pattern::{Pattern, WILDCARD};

/// レコードヘッダーのバイト数(`keyword_id`と`length`)
const HEADER_LEN: usize = 4;

/// Zstandard圧縮辞書の拡張子
pub(crate) const ZSTD_EXTENSION: &str = "zst";

/// グローバルデータディレクトリのパス。
///
/// ユーザー固有のローカルデータディレクトリ内の`encoded-speech`サブディレクトリを指します。
/// 各プラットフォームでの標準的なデータディレクトリ:
/// - Linux: `$XDG_DATA_HOME/encoded-speech` または `$HOME/.local/share/encoded-speech`
/// - macOS: `$HOME/Library/Application Support/encoded-speech`
/// - Windows: `{FOLDERID_LocalAppData}/encoded-speech`
pub static GLOBAL_DATA_DIR: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    let path = dirs::data_local_dir()?.join("encoded-speech");
    fs::create_dir_all(&path).ok()?;

    Some(path)
});

/// 読み込み済みのキーワード辞書。
///
/// ファイル中の順序を保ったエントリ列です。一度構築された後は変更されず、
/// [`Arc`](std::sync::Arc)を介して複数のスレッドから共有されます。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpeechTable {
    entries: Vec<SpeechEntry>,
}

impl SpeechTable {
    /// 空の辞書を作成します。
    ///
    /// 空の辞書はどの入力にも一致しません。
    pub fn empty() -> Self {
        Self::default()
    }

    /// エントリ列から辞書を作成します。
    pub fn from_entries(entries: Vec<SpeechEntry>) -> Self {
        Self { entries }
    }

    /// エントリ数を取得します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 辞書が空かどうかを判定します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// すべてのエントリをファイル中の順序で取得します。
    #[inline(always)]
    pub fn entries(&self) -> &[SpeechEntry] {
        &self.entries
    }

    /// エントリのイテレータを取得します。
    pub fn iter(&self) -> std::slice::Iter<'_, SpeechEntry> {
        self.entries.iter()
    }

    /// バイト列から辞書を構築します。
    ///
    /// この関数は失敗しません。不完全なヘッダーはファイルの終端として扱い、
    /// `length`に満たない本文はそこまでの断片を最後のレコードとして採用した上で
    /// 読み込みを打ち切ります。
    ///
    /// # 引数
    ///
    /// * `bytes` - 辞書ファイルの内容
    ///
    /// # 例
    ///
    /// ```
    /// use encoded_speech::dictionary::SpeechTable;
    ///
    /// let bytes = b"\x00\x05\x00\x06hello*\x00\x07\x00\x00";
    /// let table = SpeechTable::from_bytes(bytes);
    /// assert_eq!(table.len(), 1);
    /// assert_eq!(table.entries()[0].keyword_id, 5);
    /// assert_eq!(table.entries()[0].pattern.segments(), &["hello", ""]);
    /// ```
    pub fn from_bytes(mut bytes: &[u8]) -> Self {
        let mut entries = vec![];

        while let Some((header, rest)) = bytes.split_first_chunk::<HEADER_LEN>() {
            let keyword_id = u16::from_be_bytes([header[0], header[1]]);
            let length = usize::from(u16::from_be_bytes([header[2], header[3]]));
            bytes = rest;

            if length == 0 {
                continue;
            }

            if bytes.len() < length {
                log::warn!(
                    "Speech table is truncated: record {} expects {} bytes but only {} remain",
                    keyword_id,
                    length,
                    bytes.len(),
                );
                if !bytes.is_empty() {
                    entries.push(SpeechEntry::new(keyword_id, &decode_latin1(bytes)));
                }
                bytes = &[];
                break;
            }

            let (text, rest) = bytes.split_at(length);
            entries.push(SpeechEntry::new(keyword_id, &decode_latin1(text)));
            bytes = rest;
        }

        if !bytes.is_empty() {
            log::warn!(
                "Ignored {} trailing bytes after the last speech record",
                bytes.len(),
            );
        }

        Self { entries }
    }

    /// リーダーから辞書を読み込みます。
    ///
    /// ストリームを末尾まで読み込んでから[`from_bytes`](Self::from_bytes)で解析します。
    ///
    /// # エラー
    ///
    /// 読み込み中にI/Oエラーが発生した場合にエラーを返します。
    pub fn read<R: Read>(mut rdr: R) -> Result<Self> {
        let mut buffer = Vec::new();
        rdr.read_to_end(&mut buffer)?;

        Ok(Self::from_bytes(&buffer))
    }

    /// ファイルパスから非圧縮の辞書を読み込みます。
    ///
    /// ファイルが存在しない場合はエラーではなく空の辞書を返します。
    ///
    /// # 引数
    ///
    /// * `path` - 辞書ファイルへのパス
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - パスがディレクトリを指している場合。
    /// - ファイルを開けない、または読み込めない場合(存在しない場合を除く)。
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let Some(file) = Self::open(path.as_ref())? else {
            return Ok(Self::empty());
        };

        Self::read(BufReader::new(file))
    }

    /// Zstandard圧縮されたファイルから辞書を読み込みます。
    ///
    /// ファイルが存在しない場合はエラーではなく空の辞書を返します。
    ///
    /// # エラー
    ///
    /// [`from_path`](Self::from_path)のエラーに加えて、ファイルが有効な
    /// Zstandardストリームでない場合にエラーを返します。
    pub fn from_zstd<P: AsRef<Path>>(path: P) -> Result<Self> {
        let Some(file) = Self::open(path.as_ref())? else {
            return Ok(Self::empty());
        };

        let decoder = zstd::Decoder::new(file)?;
        Self::read(decoder)
    }

    /// 拡張子に応じて[`from_zstd`](Self::from_zstd)または
    /// [`from_path`](Self::from_path)で辞書を読み込みます。
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let table = if path.extension().is_some_and(|ext| ext == ZSTD_EXTENSION) {
            Self::from_zstd(path)?
        } else {
            Self::from_path(path)?
        };
        log::debug!("Loaded {} speech entries from {}", table.len(), path.display());

        Ok(table)
    }

    fn open(path: &Path) -> Result<Option<File>> {
        if path.is_dir() {
            return Err(SpeechError::PathIsDirectory(path.to_path_buf()));
        }
        match File::open(path) {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("Speech table {} not found; using an empty table", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 辞書をバイナリ形式でライターに書き出します。
    ///
    /// 出力は[`read`](Self::read)で読み戻せる形式です。パターンは`*`で
    /// 断片を連結した元の文字列として書き出されます。
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - パターンにU+00FFを超える文字が含まれる場合。
    /// - パターンが`u16::MAX`バイトを超える場合。
    /// - 書き込みに失敗した場合。
    pub fn write<W: Write>(&self, mut wtr: W) -> Result<()> {
        for entry in &self.entries {
            let raw = entry.pattern.to_raw();
            let text = encode_latin1(&raw).ok_or_else(|| {
                SpeechError::invalid_argument(
                    "pattern",
                    format!("{:?} contains characters outside Latin-1", raw),
                )
            })?;
            let length = u16::try_from(text.len()).map_err(|_| {
                SpeechError::invalid_argument(
                    "pattern",
                    format!("pattern is longer than {} bytes", u16::MAX),
                )
            })?;

            wtr.write_all(&entry.keyword_id.to_be_bytes())?;
            wtr.write_all(&length.to_be_bytes())?;
            wtr.write_all(&text)?;
        }
        wtr.flush()?;

        Ok(())
    }
}

impl<'a> IntoIterator for &'a SpeechTable {
    type Item = &'a SpeechEntry;
    type IntoIter = std::slice::Iter<'a, SpeechEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
