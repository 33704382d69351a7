/// 各辺に追加する余白の最小割合（20%）
pub const MINIMUM_BORDER_FRACTION: f64 = 0.2;

/// 許容するアスペクト比の上限（3:1）。下限はその逆数（1:3）
pub const WIDE_RATIO_THRESHOLD: f64 = 3.0;

/// 出力画像の最大寸法（幅・高さ）
pub const MAX_EMITTED_DIMENSION: u32 = 1280;

/// 直近のクエリを保持するユーザー数の上限
pub const MAX_TRACKED_USERS: usize = 100;

/// デコードを許可する最大ピクセル数（ページ画像 400ppi を十分に上回る値）
pub const MAX_PIXELS: u64 = 100_000_000;

/// クエリ文字列の最大バイト数
pub const MAX_QUERY_LENGTH: usize = 4096;
