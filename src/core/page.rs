//! Cosense ページの組み立て。
//!
//! 1冊 = 1ページ。行の並びは「タイトル / 著者リンク / 購入日 /
//! 購入年リンク / reader リンク / Amazon リンク / シリーズリンク」。

use chrono::{DateTime, Local, TimeZone};
use uuid::Uuid;

use crate::core::title::extract_groups;
use crate::domain::model::{CosensePage, KindleBook};

const BOOK_PAGE_VIEWS: u32 = 15;
const YEAR_PAGE_VIEWS: u32 = 1;
pub const YEAR_SUMMARY_TITLE: &str = "購入年";

/// 1冊分のページを組み立てる。購入年が分かれば `Some` で返す。
pub fn build_book_page(book: &KindleBook, title: &str) -> (CosensePage, Option<String>) {
    // acquiredTime はミリ秒。欠落時は created=0 のまま現在時刻で表示する
    let acquired_sec = book.acquired_time.map(|ms| ms / 1000);
    let acquired_dt: DateTime<Local> = acquired_sec
        .and_then(|sec| Local.timestamp_opt(sec, 0).single())
        .unwrap_or_else(Local::now);

    let purchase_line = if book.acquired_time.is_some() {
        format!("購入日: {}", acquired_dt.format("%Y年%m月%d日 %H:%M"))
    } else {
        "購入日: 不明".to_string()
    };

    let year = book
        .acquired_time
        .map(|_| acquired_dt.format("%Y").to_string());

    let mut lines = vec![title.to_string()];
    lines.extend(author_links(book.authors.as_deref()));
    lines.push(purchase_line);
    if let Some(year) = &year {
        lines.push(format!("[{}年]", year));
    }

    let asin = book.asin.as_deref().unwrap_or("");
    let amazon_url = format!("https://www.amazon.co.jp/dp/{}", asin);
    lines.push(format!("[reader https://read.amazon.co.jp?asin={}]", asin));
    lines.push(match book.product_image.as_deref() {
        Some(image) => format!("[{} {}]", image, amazon_url),
        None => format!("[amazon {}]", amazon_url),
    });

    // シリーズリンク。書名そのものと同名のリンクは張らない
    for group in extract_groups(title) {
        if group != title {
            lines.push(format!("[{}]", group));
        }
    }

    let created = acquired_sec.unwrap_or(0);
    let page = CosensePage {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        created,
        updated: created,
        views: BOOK_PAGE_VIEWS,
        lines,
    };

    (page, year)
}

/// 著者名リンクの行。カンマ区切りを1人ずつのリンクにする。
fn author_links(authors: Option<&str>) -> Vec<String> {
    match authors {
        Some(authors) if !authors.is_empty() => authors
            .split(',')
            .map(|a| format!("[{}]", a.trim()))
            .collect(),
        _ => vec!["[不明]".to_string()],
    }
}

/// 購入年まとめページ。年の降順で1行ずつ並べる。
pub fn build_year_summary_page(years: &[String]) -> Option<CosensePage> {
    if years.is_empty() {
        return None;
    }

    let mut sorted: Vec<&String> = years.iter().collect();
    sorted.sort();
    sorted.dedup();
    sorted.reverse();

    let mut lines = vec![YEAR_SUMMARY_TITLE.to_string()];
    lines.extend(sorted.iter().map(|year| format!(" [{}年]", year)));

    let now = Local::now().timestamp();
    Some(CosensePage {
        id: Uuid::new_v4().to_string(),
        title: YEAR_SUMMARY_TITLE.to_string(),
        created: now,
        updated: now,
        views: YEAR_PAGE_VIEWS,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str) -> KindleBook {
        KindleBook {
            title: Some(title.to_string()),
            authors: Some("尾田栄一郎".to_string()),
            // 2021-06-15T12:00:00Z
            acquired_time: Some(1_623_758_400_000),
            asin: Some("B00A2KLMNO".to_string()),
            product_image: None,
        }
    }

    #[test]
    fn test_book_page_lines() {
        let book = book("ワンピース 1");
        let (page, year) = build_book_page(&book, "ワンピース 1");

        assert_eq!(page.title, "ワンピース 1");
        assert_eq!(page.views, 15);
        assert_eq!(page.created, 1_623_758_400);
        assert_eq!(page.updated, page.created);
        assert_eq!(year.as_deref(), Some("2021"));

        assert_eq!(page.lines[0], "ワンピース 1");
        assert_eq!(page.lines[1], "[尾田栄一郎]");
        assert!(page.lines[2].starts_with("購入日: 2021年"));
        assert_eq!(page.lines[3], "[2021年]");
        assert_eq!(
            page.lines[4],
            "[reader https://read.amazon.co.jp?asin=B00A2KLMNO]"
        );
        assert_eq!(page.lines[5], "[amazon https://www.amazon.co.jp/dp/B00A2KLMNO]");
        assert_eq!(page.lines[6], "[ワンピース]");
    }

    #[test]
    fn test_missing_acquired_time() {
        let mut book = book("タイトルのみ");
        book.acquired_time = None;
        let (page, year) = build_book_page(&book, "タイトルのみ");

        assert!(year.is_none());
        assert_eq!(page.created, 0);
        assert!(page.lines.contains(&"購入日: 不明".to_string()));
        assert!(!page.lines.iter().any(|l| l.ends_with("年]")));
    }

    #[test]
    fn test_multiple_authors_split() {
        let mut book = book("ワンピース 1");
        book.authors = Some("作者A, 作者B".to_string());
        let (page, _) = build_book_page(&book, "ワンピース 1");

        assert_eq!(page.lines[1], "[作者A]");
        assert_eq!(page.lines[2], "[作者B]");
    }

    #[test]
    fn test_missing_authors_falls_back() {
        let mut book = book("ワンピース 1");
        book.authors = None;
        let (page, _) = build_book_page(&book, "ワンピース 1");
        assert_eq!(page.lines[1], "[不明]");
    }

    #[test]
    fn test_product_image_link() {
        let mut book = book("ワンピース 1");
        book.product_image = Some("https://img.example/one-piece.jpg".to_string());
        let (page, _) = build_book_page(&book, "ワンピース 1");

        assert!(page.lines.contains(
            &"[https://img.example/one-piece.jpg https://www.amazon.co.jp/dp/B00A2KLMNO]"
                .to_string()
        ));
    }

    #[test]
    fn test_title_identical_group_not_linked() {
        let mut book = book("タイトルのみ");
        book.acquired_time = None;
        let (page, _) = build_book_page(&book, "タイトルのみ");
        // extract_groups はタイトル全体を返すが、同名リンクは張らない
        assert!(!page.lines.contains(&"[タイトルのみ]".to_string()));
    }

    #[test]
    fn test_year_summary_sorted_descending() {
        let years = vec![
            "2020".to_string(),
            "2023".to_string(),
            "2020".to_string(),
            "2021".to_string(),
        ];
        let page = build_year_summary_page(&years).unwrap();

        assert_eq!(page.title, "購入年");
        assert_eq!(page.views, 1);
        assert_eq!(
            page.lines,
            vec!["購入年", " [2023年]", " [2021年]", " [2020年]"]
        );
    }

    #[test]
    fn test_year_summary_empty() {
        assert!(build_year_summary_page(&[]).is_none());
    }
}
