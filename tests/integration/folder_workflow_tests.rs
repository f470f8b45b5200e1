/*!
 * Integration tests for directory runs
 */

use std::fs;
use anyhow::Result;

use dualsub::app_controller::{Controller, RunOptions, ISSUES_LOG_FILE};
use dualsub::metadata::MetadataResolver;
use crate::common::{self, mock_providers::{MockGenerator, MockReply}};

#[tokio::test]
async fn test_runFolder_withMixedResults_shouldCountAndLogFailures() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_subtitle(root, "a.srt")?;
    common::create_test_subtitle(root, "b.srt")?;
    common::create_test_subtitle(root, "nested/c.srt")?;
    common::create_test_file(root, "nested/c_zh.srt", "already done")?;

    // Files run in sorted order: a succeeds, b fails, c is skipped
    let generator = MockGenerator::with_script(vec![
        MockReply::Text("Hello world|||你好世界\nLine one Line two|||第一行 第二行".to_string()),
        MockReply::Fail,
    ]);
    let controller = Controller::with_components(
        common::test_config(),
        Box::new(generator.clone()),
        MetadataResolver::disabled("none"),
    )?;

    let summary = controller.run_folder(root.to_path_buf(), &RunOptions::default()).await?;

    assert_eq!(summary.processed, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.total(), 3);
    assert_eq!(summary.failures[0].0, root.join("b.srt"));

    assert!(root.join("a_zh.srt").exists());
    assert!(!root.join("b_zh.srt").exists());
    assert_eq!(fs::read_to_string(root.join("nested/c_zh.srt"))?, "already done");

    let issues = fs::read_to_string(root.join(ISSUES_LOG_FILE))?;
    assert!(issues.contains("1 of 3 files failed"));
    assert!(issues.contains("b.srt"));
    Ok(())
}

#[tokio::test]
async fn test_runFolder_withAllSuccessful_shouldNotWriteIssuesLog() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path();
    common::create_test_subtitle(root, "one.srt")?;
    common::create_test_subtitle(root, "two.srt")?;

    let generator = MockGenerator::new();
    let controller = Controller::with_components(
        common::test_config(),
        Box::new(generator.clone()),
        MetadataResolver::disabled("none"),
    )?;

    let summary = controller.run_folder(root.to_path_buf(), &RunOptions::default()).await?;

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(generator.prompts().len(), 2);
    assert!(!root.join(ISSUES_LOG_FILE).exists());

    // A second run finds only outputs already in place
    let summary = controller.run_folder(root.to_path_buf(), &RunOptions::default()).await?;
    assert_eq!(summary.skipped, 2);
    assert_eq!(generator.prompts().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_runFolder_withoutSubtitles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "readme.txt", "nothing here")?;

    let controller = Controller::with_components(
        common::test_config(),
        Box::new(MockGenerator::new()),
        MetadataResolver::disabled("none"),
    )?;

    assert!(controller.run_folder(temp_dir.path().to_path_buf(), &RunOptions::default()).await.is_err());
    Ok(())
}
