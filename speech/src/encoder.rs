//! キーワードIDのビットパッキング
//!
//! 一致したキーワードIDを、ワイヤプロトコルが要求する12ビット詰めの
//! バイト列に変換します。
//!
//! # フォーマット
//!
//! ```text
//! byte 0 : [count & 0xF : 4][id0 >> 8 : 4]
//! byte 1 : [id0 & 0xFF : 8]
//! byte 2 : [id1 >> 4 : 8]
//! byte 3 : [id1 & 0xF : 4][id2 >> 8 : 4]
//! byte 4 : [id2 & 0xFF : 8]
//! ...
//! last   : [carry : 4][0 : 4]   (IDの個数が偶数の場合のみ)
//! ```
//!
//! 先頭のニブルにはIDの個数の下位4ビットが入り、以降は2つのIDが3バイトに
//! 詰められます。ペアの2つ目のIDの下位ニブルは次のバイトの上位ニブルに
//! 持ち越されます。

/// パック可能なキーワードIDの最大値(12ビット)
pub const MAX_KEYWORD_ID: u16 = 0x0FFF;

/// ソート済みのキーワードIDをバイト列にパックします。
///
/// `0x0FFF`を超えるIDは上位ビットが切り捨てられます。これは既存の受信側との
/// 互換性のための挙動であり、呼び出し側の前提条件違反として警告が出力されます。
///
/// # 引数
///
/// * `ids` - 昇順に並んだキーワードID
///
/// # 戻り値
///
/// パック済みのバイト列。長さは[`encoded_len`]に等しくなります。
///
/// # 例
///
/// ```
/// use encoded_speech::encoder::encode;
///
/// assert_eq!(encode(&[]), vec![0x00]);
/// assert_eq!(encode(&[0xABC]), vec![0x1A, 0xBC]);
/// assert_eq!(encode(&[0x001, 0x234]), vec![0x20, 0x01, 0x23, 0x40]);
/// ```
pub fn encode(ids: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(ids.len()));

    let mut carry = (ids.len() & 0xF) as u8;
    let mut second = false;

    for &id in ids {
        if id > MAX_KEYWORD_ID {
            log::warn!(
                "Keyword id {:#06x} exceeds 12 bits; the upper bits are discarded",
                id,
            );
        }
        if second {
            out.push((id >> 4) as u8);
            carry = (id & 0xF) as u8;
        } else {
            out.push((carry << 4) | ((id >> 8) & 0xF) as u8);
            out.push(id as u8);
        }
        second = !second;
    }

    if !second {
        out.push(carry << 4);
    }

    out
}

/// `n`個のIDをパックしたときのバイト数を返します。
///
/// # 例
///
/// ```
/// use encoded_speech::encoder::encoded_len;
///
/// assert_eq!(encoded_len(0), 1);
/// assert_eq!(encoded_len(1), 2);
/// assert_eq!(encoded_len(2), 4);
/// assert_eq!(encoded_len(3), 5);
/// ```
#[inline]
pub const fn encoded_len(n: usize) -> usize {
    if n % 2 == 0 {
        n / 2 * 3 + 1
    } else {
        (n * 3 + 1) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Inverse of [`encode`], given the number of ids that were packed.
    fn decode(bytes: &[u8], n: usize) -> Vec<u16> {
        let mut ids = Vec::with_capacity(n);
        let mut pos = 0;
        while ids.len() < n {
            if ids.len() % 2 == 0 {
                let hi = u16::from(bytes[pos] & 0xF);
                ids.push((hi << 8) | u16::from(bytes[pos + 1]));
                pos += 2;
            } else {
                let hi = u16::from(bytes[pos]);
                ids.push((hi << 4) | u16::from(bytes[pos + 1] >> 4));
                pos += 1;
            }
        }
        ids
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode(&[]), vec![0x00]);
    }

    #[test]
    fn test_encode_single() {
        assert_eq!(encode(&[0xABC]), vec![0x1A, 0xBC]);
    }

    #[test]
    fn test_encode_pair() {
        // count nibble 2, id 0x0AB, id 0xCDE, carry 0xE
        assert_eq!(encode(&[0x0AB, 0xCDE]), vec![0x20, 0xAB, 0xCD, 0xE0]);
    }

    #[test]
    fn test_encode_three() {
        assert_eq!(
            encode(&[0x123, 0x456, 0x789]),
            vec![0x31, 0x23, 0x45, 0x67, 0x89],
        );
    }

    #[test]
    fn test_count_nibble_wraps() {
        let ids: Vec<u16> = (0..17).collect();
        let bytes = encode(&ids);
        assert_eq!(bytes[0] >> 4, 1);
        assert_eq!(decode(&bytes, ids.len()), ids);
    }

    #[test]
    fn test_length_matches_encoded_len() {
        for n in 0..40 {
            let ids: Vec<u16> = (0..n as u16).map(|i| i * 97 % 4096).collect();
            assert_eq!(encode(&ids).len(), encoded_len(n), "n = {}", n);
        }
    }

    #[test]
    fn test_decode_inverts_encode() {
        let cases: &[&[u16]] = &[
            &[0],
            &[MAX_KEYWORD_ID],
            &[0, MAX_KEYWORD_ID],
            &[1, 1, 1],
            &[0x010, 0x02a, 0x155, 0x800, 0xfff],
            &[3, 7, 42, 42, 100, 2048, 4000, 4095],
        ];
        for &ids in cases {
            let bytes = encode(ids);
            assert_eq!(bytes[0] >> 4, (ids.len() & 0xF) as u8);
            assert_eq!(decode(&bytes, ids.len()), ids);
        }
    }

    #[test]
    fn test_out_of_range_is_truncated() {
        assert_eq!(encode(&[0x1ABC]), encode(&[0x0ABC]));
        assert_eq!(encode(&[1, 0xF123]), encode(&[1, 0x0123]));
    }
}
