use serde::{Deserialize, Serialize};

/// Kindle ライブラリエクスポートの1冊分のレコード。
///
/// エクスポート元によってフィールドの欠けがあるため、title 以外は
/// すべて Option で受ける。title 欠落のレコードは変換時にスキップする。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindleBook {
    #[serde(default)]
    pub title: Option<String>,
    /// カンマ区切りの著者名
    #[serde(default)]
    pub authors: Option<String>,
    /// 購入日時 (エポックミリ秒)
    #[serde(default)]
    pub acquired_time: Option<i64>,
    #[serde(default)]
    pub asin: Option<String>,
    #[serde(default)]
    pub product_image: Option<String>,
}

/// Cosense インポートファイルのルート。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosenseExport {
    pub user: ExportUser,
    pub pages: Vec<CosensePage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportUser {
    pub name: String,
    pub email: String,
}

/// Cosense の1ページ。lines の先頭行がページタイトルになる。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosensePage {
    pub id: String,
    pub title: String,
    /// エポック秒
    pub created: i64,
    pub updated: i64,
    pub views: u32,
    pub lines: Vec<String>,
}

/// transform フェーズの結果と集計。
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub export: CosenseExport,
    /// 変換できた冊数 (まとめページは含まない)
    pub converted: usize,
    /// title 欠落でスキップした冊数
    pub skipped: usize,
}
