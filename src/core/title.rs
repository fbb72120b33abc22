//! 書名からシリーズ名（グループ）を推定するヒューリスティックエンジン。
//!
//! Kindle の書名は「ワンピース 1」「ギャラリーフェイク (39)」のように
//! 巻数・話数・レーベル名などのノイズを含む。ここでは巻数表記の文法を
//! 正規表現で定義し、括弧内と本文の二方向から「シリーズ名らしき文字列」を
//! 取り出す。完全なパーサではなく、あくまでベストエフォート。

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// 巻数・話数・シーズン表記の共通パターン。
///
/// 任意のキーワード接頭辞 (`Vol` / `第` / `Episode` / `EP` / `Season`)、
/// 数字列 (半角・全角・漢数字・ローマ数字)、任意の助数詞接尾辞
/// (`話` / `巻` / `号` / `編` / `版` / `シーズン`、序数 `st/nd/rd/th`+`話`)。
const VOL_MARKER: &str = r"(?:(?:[vV]ol|第|Episode|EP|Season)\.?\s*)?[0-9０-９一二三四五六七八九十百千零〇IVXLCDMivxlcdm]+(?:(?:st|nd|rd|th)話|話|巻|号|編|版|シーズン)?";

// 完全一致判定だけ大文字小文字を無視する。分割・末尾除去は
// パターンに書かれた通りの大小文字で照合する (元の挙動を維持)。
static PURE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("(?i)^{VOL_MARKER}$")).unwrap());
static MARKER_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\s+{VOL_MARKER}")).unwrap());
static TRAILING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\s+{VOL_MARKER}$")).unwrap());

static PAREN_CONTENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[（(]([^）)]+)[）)]").unwrap());
static NESTED_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s*[（(]([^）)]+)[）)]$").unwrap());
static ANY_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[（(][^）)]*[）)]").unwrap());
static SUBTITLE_SEP: LazyLock<Regex> = LazyLock::new(|| Regex::new("[:：　—―－]").unwrap());

/// 文字列全体が巻数表記だけか。
fn is_pure_marker(s: &str) -> bool {
    PURE_MARKER.is_match(s)
}

/// 書名からグループ候補を抽出する。
///
/// 先頭が本文由来の主候補、続いて括弧内由来の候補 (出現順)。
/// 空文字列と重複 (完全一致) は除去し、先に現れたものを残す。
/// どの入力に対しても失敗しない。候補なしは空の `Vec` で表す。
pub fn extract_groups(title: &str) -> Vec<String> {
    let mut candidates = paren_group_candidates(title);

    if let Some(main) = main_title_candidate(title) {
        // 書名そのものは、他に候補がない場合だけ残す
        if main != title || candidates.is_empty() {
            candidates.insert(0, main);
        }
    }

    let mut seen = HashSet::new();
    candidates.retain(|g| !g.is_empty() && seen.insert(g.clone()));
    candidates
}

/// 括弧 `(...)` / `（...）` の中身 (深さ1) からグループ候補を集める。
///
/// 中身が巻数表記そのものなら捨てる。「作品名 (3)」の形なら作品名部分へ
/// 縮め、さらに末尾の巻数表記を剥がした残りを候補にする。
fn paren_group_candidates(title: &str) -> Vec<String> {
    let mut groups = Vec::new();

    for caps in PAREN_CONTENT.captures_iter(title) {
        let content = caps[1].trim();
        if is_pure_marker(content) {
            // 巻数情報のみ。シリーズ名ではない
            continue;
        }

        let mut candidate = content.to_string();
        if let Some(inner_caps) = NESTED_PAREN.captures(&candidate) {
            let base = inner_caps[1].trim().to_string();
            let inner = inner_caps[2].trim().to_string();
            if !base.is_empty() && is_pure_marker(&inner) {
                candidate = base;
            }
        }

        let mut core = MARKER_SPLIT
            .splitn(&candidate, 2)
            .next()
            .unwrap_or("")
            .trim()
            .to_string();
        if core.is_empty() || core == candidate {
            core = TRAILING_MARKER.replace(&candidate, "").trim().to_string();
        }
        if core.is_empty() && !candidate.is_empty() && !is_pure_marker(&candidate) {
            core = candidate.clone();
        }

        if !core.is_empty() && !is_pure_marker(&core) {
            groups.push(core);
        }
    }

    groups
}

/// 括弧を取り除いた本文からの主候補。
fn main_title_candidate(title: &str) -> Option<String> {
    let without_parens = ANY_PAREN.replace_all(title, "");
    let remainder = without_parens.trim();
    if remainder.is_empty() {
        return None;
    }
    // 「Vol. 3」のように本文全体が巻数表記ならシリーズ名は存在しない
    if is_pure_marker(remainder) {
        return None;
    }

    let from_split = MARKER_SPLIT.splitn(remainder, 2).next().unwrap_or("").trim();
    let mut main = if !from_split.is_empty() && from_split != remainder {
        from_split.to_string()
    } else {
        TRAILING_MARKER.replace(remainder, "").trim().to_string()
    };
    if main.is_empty() {
        main = remainder.to_string();
    }

    // 副題の切り落とし。区切りより前が2文字以上で、落とす側が
    // 3文字を超えるか「を含む場合だけ採用する (経験則の定数)
    if !main.is_empty() {
        let head = SUBTITLE_SEP
            .splitn(&main, 2)
            .next()
            .unwrap_or("")
            .trim()
            .to_string();
        if !head.is_empty() && head.chars().count() > 1 && head != main {
            let removed = main.chars().count() - head.chars().count();
            if removed > 2 || main.contains('「') {
                main = head;
            }
        }
    }

    if main.is_empty() || is_pure_marker(&main) {
        return None;
    }
    Some(main)
}
