//! # encoded-speech
//!
//! ゲームクライアントの発話テキストに付与するキーワードIDを求め、
//! ワイヤプロトコル用の12ビット詰めバイト列にエンコードするライブラリです。
//!
//! ## 概要
//!
//! 1. バイナリ形式のキーワード辞書(`Speech.mul`)を読み込みます。
//! 2. 入力テキストを小文字化し、各エントリのワイルドカード付きパターンと照合します。
//! 3. 一致したキーワードIDを昇順に並べ、2つのIDを3バイトに詰めてパックします。
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use encoded_speech::dictionary::SpeechTableBuilder;
//! use encoded_speech::KeywordResolver;
//!
//! let csv = "5,hello*\n17,*bye\n";
//! let table = SpeechTableBuilder::from_reader(csv.as_bytes())?;
//! let resolver = KeywordResolver::from_table(table);
//!
//! assert_eq!(resolver.keywords("Hello there"), vec![5]);
//! assert_eq!(resolver.keywords("goodbye"), vec![17]);
//! assert!(resolver.keywords("goodbye hello").is_empty());
//!
//! assert_eq!(resolver.resolve("Hello there"), vec![0x10, 0x05]);
//! # Ok(())
//! # }
//! ```

/// キーワード辞書の読み込みと構築
pub mod dictionary;

/// キーワードIDのビットパッキング
pub mod encoder;

/// エラー型の定義
pub mod errors;

/// テキストからキーワードIDへの解決
pub mod resolver;

/// 内部ユーティリティ関数
pub mod utils;

#[cfg(test)]
mod tests;

// Re-exports
pub use dictionary::{DataDirectory, FileLocator, SpeechTable};
pub use resolver::KeywordResolver;

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
