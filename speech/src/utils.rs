//! ユーティリティ関数を提供するモジュール
//!
//! 主に以下の機能を提供します：
//!
//! - CSV行の解析と引用符処理
//! - 1バイト文字(Latin-1)とRust文字列との相互変換

use csv_core::ReadFieldResult;

/// CSV形式の行を解析してフィールドのベクターに分割する
///
/// ダブルクォートで囲まれたフィールドや、フィールド内のカンマも正しく処理します。
///
/// # 引数
///
/// * `row` - 解析するCSV形式の文字列
///
/// # 戻り値
///
/// 解析されたフィールドを格納する文字列のベクター
///
/// # 例
///
/// ```
/// # use encoded_speech::utils::parse_csv_row;
/// let fields = parse_csv_row("12,*bank*");
/// assert_eq!(fields, vec!["12", "*bank*"]);
///
/// let fields_with_quote = parse_csv_row("40,\"*hail, stranger*\"");
/// assert_eq!(fields_with_quote, vec!["40", "*hail, stranger*"]);
/// ```
pub fn parse_csv_row(row: &str) -> Vec<String> {
    let mut features = vec![];
    let mut rdr = csv_core::Reader::new();
    let mut bytes = row.as_bytes();
    let mut output = [0; 4096];
    let mut field = vec![];
    loop {
        let (result, nin, nout) = rdr.read_field(bytes, &mut output);
        field.extend_from_slice(&output[..nout]);
        bytes = &bytes[nin..];
        let end = match result {
            ReadFieldResult::InputEmpty => true,
            ReadFieldResult::OutputFull => continue,
            ReadFieldResult::Field { record_end } => record_end,
            ReadFieldResult::End => break,
        };
        features.push(String::from_utf8_lossy(&field).into_owned());
        field.clear();
        if end {
            break;
        }
    }
    features
}

/// 1バイト文字列をRustの文字列に変換する
///
/// 各バイトをそのままU+0000〜U+00FFの文字として解釈します。
/// マルチバイトのデコードは行いません。
///
/// # 例
///
/// ```
/// # use encoded_speech::utils::decode_latin1;
/// assert_eq!(decode_latin1(b"caf\xe9"), "caf\u{e9}");
/// ```
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// 文字列を1バイト文字列に変換する
///
/// # 戻り値
///
/// U+00FFを超える文字が含まれる場合は`None`
pub fn encode_latin1(s: &str) -> Option<Vec<u8>> {
    s.chars().map(|c| u8::try_from(c).ok()).collect()
}

/// 文字列のすべての文字がLatin-1の範囲内にあるかどうかを判定する
#[inline]
pub fn is_latin1(s: &str) -> bool {
    s.chars().all(|c| u32::from(c) <= 0xff)
}
