//! encoded-speechのテストモジュール群
//!
//! 辞書ファイルの読み込みと、リゾルバを通した照合からパッキングまでの
//! 一連の動作を検証するテストを含みます。
