//! 辞書ファイルの配置設定
//!
//! このモジュールは、論理的なリソース名(`Speech.mul`)を実際のファイルパスに
//! 対応付ける[`FileLocator`]と、その標準実装を定義します。

use std::path::{Path, PathBuf};

use crate::dictionary::{GLOBAL_DATA_DIR, ZSTD_EXTENSION};

/// キーワード辞書ファイルの論理名
pub const SPEECH_FILE_NAME: &str = "Speech.mul";

/// 論理的なリソース名をディスク上のパスに解決します。
///
/// クライアントのインストール先の探索などはアプリケーション側の責務であり、
/// このトレイトを介して注入されます。
pub trait FileLocator: Send + Sync {
    /// リソース名に対応するパスを返します。
    ///
    /// ファイルが存在するかどうかは問いません。存在しないパスは
    /// 空の辞書として扱われます。
    fn locate(&self, name: &str) -> PathBuf;
}

impl<F> FileLocator for F
where
    F: Fn(&str) -> PathBuf + Send + Sync,
{
    fn locate(&self, name: &str) -> PathBuf {
        self(name)
    }
}

/// 1つのディレクトリ直下からリソースを探すロケーター
///
/// `<root>/<name>`が存在せず、Zstandard圧縮版の`<root>/<name>.zst`が
/// 存在する場合はそちらを返します。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataDirectory {
    root: PathBuf,
}

impl DataDirectory {
    /// 指定したディレクトリを起点とするロケーターを作成します。
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// ユーザー固有のローカルデータディレクトリを起点とするロケーターを作成します。
    ///
    /// | プラットフォーム | 例                                                   |
    /// | -------- | ---------------------------------------------------- |
    /// | Linux    | `/home/alice/.local/share/encoded-speech`            |
    /// | macOS    | `/Users/Alice/Library/Application Support/encoded-speech` |
    /// | Windows  | `C:\Users\Alice\AppData\Local\encoded-speech`        |
    ///
    /// # 戻り値
    ///
    /// データディレクトリを特定できない場合は`None`。
    pub fn global() -> Option<Self> {
        GLOBAL_DATA_DIR.as_ref().map(|root| Self::new(root.clone()))
    }

    /// 起点ディレクトリを取得します。
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileLocator for DataDirectory {
    fn locate(&self, name: &str) -> PathBuf {
        let path = self.root.join(name);
        if !path.exists() {
            let compressed = self.root.join(format!("{}.{}", name, ZSTD_EXTENSION));
            if compressed.is_file() {
                return compressed;
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_directory_joins_name() {
        let locator = DataDirectory::new("/opt/client");
        assert_eq!(
            locator.locate(SPEECH_FILE_NAME),
            Path::new("/opt/client").join("Speech.mul"),
        );
    }

    #[test]
    fn test_data_directory_prefers_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let locator = DataDirectory::new(dir.path());
        let plain = dir.path().join(SPEECH_FILE_NAME);
        let compressed = dir.path().join("Speech.mul.zst");

        // Neither exists: the plain path is reported.
        assert_eq!(locator.locate(SPEECH_FILE_NAME), plain);

        std::fs::write(&compressed, b"").unwrap();
        assert_eq!(locator.locate(SPEECH_FILE_NAME), compressed);

        std::fs::write(&plain, b"").unwrap();
        assert_eq!(locator.locate(SPEECH_FILE_NAME), plain);
    }

    #[test]
    fn test_closure_locator() {
        let locator = |name: &str| PathBuf::from(format!("/tmp/{}.zst", name));
        assert_eq!(
            FileLocator::locate(&locator, SPEECH_FILE_NAME),
            PathBuf::from("/tmp/Speech.mul.zst"),
        );
    }
}
