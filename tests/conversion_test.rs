use kindle2cosense::core::CosenseExport;
use kindle2cosense::{CliConfig, ConvertEngine, ConvertError, ConvertPipeline, LocalStorage};
use tempfile::TempDir;

fn cli_config(input_path: String, output_path: String) -> CliConfig {
    CliConfig {
        input_path,
        output_path,
        output_filename: "cosense.json".to_string(),
        user_name: "Kindle User".to_string(),
        user_email: "user@example.com".to_string(),
        config: None,
        verbose: false,
        monitor: false,
    }
}

#[tokio::test]
async fn test_end_to_end_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let input_file = temp_dir.path().join("kindle.json");
    let output_dir = temp_dir.path().join("build");

    // 1623758400000 = 2021-06-15T12:00:00Z, 1651406400000 = 2022-05-01T12:00:00Z
    let kindle_data = serde_json::json!([
        {
            "title": "ワンピース 1",
            "authors": "尾田栄一郎",
            "acquiredTime": 1_623_758_400_000i64,
            "asin": "B001",
            "productImage": "https://img.example/op1.jpg"
        },
        {
            "title": "ワンピース 2",
            "authors": "尾田栄一郎",
            "acquiredTime": 1_651_406_400_000i64,
            "asin": "B002"
        },
        { "title": "タイトルのみ" },
        { "asin": "B404" }
    ]);
    std::fs::write(&input_file, serde_json::to_vec(&kindle_data).unwrap()).unwrap();

    let config = cli_config(
        input_file.to_str().unwrap().to_string(),
        output_dir.to_str().unwrap().to_string(),
    );
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = ConvertPipeline::new(storage, config);
    let engine = ConvertEngine::new_with_monitoring(pipeline, false);

    let output_path = engine.run().await.unwrap();
    assert!(output_path.ends_with("cosense.json"));

    let raw = std::fs::read(output_dir.join("cosense.json")).unwrap();
    let export: CosenseExport = serde_json::from_slice(&raw).unwrap();

    assert_eq!(export.user.name, "Kindle User");
    assert_eq!(export.user.email, "user@example.com");

    // 3冊 (titleなしの1件はスキップ) + 購入年まとめ
    assert_eq!(export.pages.len(), 4);

    let page = |title: &str| {
        export
            .pages
            .iter()
            .find(|p| p.title == title)
            .unwrap_or_else(|| panic!("page not found: {}", title))
    };

    // 同じシリーズの巻は同じグループページへリンクする
    let volume1 = page("ワンピース 1");
    let volume2 = page("ワンピース 2");
    assert!(volume1.lines.contains(&"[ワンピース]".to_string()));
    assert!(volume2.lines.contains(&"[ワンピース]".to_string()));

    assert_eq!(volume1.created, 1_623_758_400);
    assert_eq!(volume1.views, 15);
    assert!(volume1.lines.contains(&"[尾田栄一郎]".to_string()));
    assert!(volume1
        .lines
        .contains(&"[reader https://read.amazon.co.jp?asin=B001]".to_string()));
    assert!(volume1
        .lines
        .contains(&"[https://img.example/op1.jpg https://www.amazon.co.jp/dp/B001]".to_string()));
    assert!(volume2
        .lines
        .contains(&"[amazon https://www.amazon.co.jp/dp/B002]".to_string()));

    // シリーズが取れない本は自分と同名のリンクを張らない
    let standalone = page("タイトルのみ");
    assert!(standalone.lines.contains(&"購入日: 不明".to_string()));
    assert!(standalone.lines.contains(&"[不明]".to_string()));
    assert!(!standalone.lines.contains(&"[タイトルのみ]".to_string()));

    // 購入年まとめは降順
    let years = page("購入年");
    assert_eq!(years.views, 1);
    assert_eq!(years.lines, vec!["購入年", " [2022年]", " [2021年]"]);
}

#[tokio::test]
async fn test_missing_input_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let config = cli_config(
        temp_dir
            .path()
            .join("no-such-file.json")
            .to_str()
            .unwrap()
            .to_string(),
        temp_dir.path().join("build").to_str().unwrap().to_string(),
    );
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = ConvertEngine::new(ConvertPipeline::new(storage, config));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, ConvertError::IoError(_)));
}

#[tokio::test]
async fn test_malformed_input_is_serialization_error() {
    let temp_dir = TempDir::new().unwrap();
    let input_file = temp_dir.path().join("kindle.json");
    std::fs::write(&input_file, b"this is not json").unwrap();

    let config = cli_config(
        input_file.to_str().unwrap().to_string(),
        temp_dir.path().join("build").to_str().unwrap().to_string(),
    );
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = ConvertEngine::new(ConvertPipeline::new(storage, config));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, ConvertError::SerializationError(_)));
}

#[tokio::test]
async fn test_empty_library_has_no_year_summary() {
    let temp_dir = TempDir::new().unwrap();
    let input_file = temp_dir.path().join("kindle.json");
    std::fs::write(&input_file, b"[]").unwrap();

    let config = cli_config(
        input_file.to_str().unwrap().to_string(),
        temp_dir.path().join("build").to_str().unwrap().to_string(),
    );
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = ConvertEngine::new(ConvertPipeline::new(storage, config));

    engine.run().await.unwrap();

    let raw = std::fs::read(temp_dir.path().join("build").join("cosense.json")).unwrap();
    let export: CosenseExport = serde_json::from_slice(&raw).unwrap();
    assert!(export.pages.is_empty());
}
