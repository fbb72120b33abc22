use crate::core::page::{build_book_page, build_year_summary_page};
use crate::core::{ConfigProvider, CosenseExport, KindleBook, Pipeline, Storage, TransformResult};
use crate::domain::model::ExportUser;
use crate::utils::error::Result;

/// Kindle ライブラリ JSON を Cosense インポート JSON へ変換するパイプライン。
pub struct ConvertPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ConvertPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ConvertPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<KindleBook>> {
        tracing::debug!("Reading Kindle library from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;
        let books: Vec<KindleBook> = serde_json::from_slice(&data)?;
        tracing::debug!("Parsed {} book records", books.len());
        Ok(books)
    }

    async fn transform(&self, books: Vec<KindleBook>) -> Result<TransformResult> {
        let mut pages = Vec::new();
        let mut years = Vec::new();
        let mut skipped = 0usize;

        for book in &books {
            let Some(title) = book.title.as_deref() else {
                tracing::warn!("⚠️ title のない本をスキップします: asin={:?}", book.asin);
                skipped += 1;
                continue;
            };

            let (page, year) = build_book_page(book, title);
            pages.push(page);
            years.extend(year);
        }

        let converted = pages.len();
        if let Some(summary) = build_year_summary_page(&years) {
            pages.push(summary);
        }

        Ok(TransformResult {
            export: CosenseExport {
                user: ExportUser {
                    name: self.config.user_name().to_string(),
                    email: self.config.user_email().to_string(),
                },
                pages,
            },
            converted,
            skipped,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let json = serde_json::to_string_pretty(&result.export)?;

        tracing::debug!(
            "Writing {} pages ({} bytes) to storage",
            result.export.pages.len(),
            json.len()
        );
        self.storage
            .write_file(self.config.output_filename(), json.as_bytes())
            .await?;

        Ok(format!(
            "{}/{}",
            self.config.output_path(),
            self.config.output_filename()
        ))
    }
}
