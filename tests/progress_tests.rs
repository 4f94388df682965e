//! Tests for the progress module functionality.
//!
//! This file contains tests for progress bar styling, configuration,
//! and display management functionality.

use stashget::progress::{ProgressBarOpts, ProgressDisplay, StyleOptions};

mod common;
use common::helpers::*;

#[test]
fn test_style_options_new() {
    let style = StyleOptions::new(ProgressBarOpts::hidden(), ProgressBarOpts::with_transfer_style());
    assert!(style.is_enabled());
    assert!(style.main().to_progress_bar(Some(3)).is_hidden());
    assert!(!style.child().to_progress_bar(Some(3)).is_hidden());
}

#[test]
fn test_style_options_hidden() {
    assert!(!StyleOptions::hidden().is_enabled());
    assert!(!StyleOptions::default().is_enabled());
}

#[test]
fn test_progress_bar_opts_set_clear() {
    let mut opts = ProgressBarOpts::with_transfer_style();
    opts.set_clear(false);
    let display = ProgressDisplay::new(StyleOptions::new(ProgressBarOpts::hidden(), opts), 1);

    let pb = display.start_transfer("file.bin", Some(10), 0);
    pb.inc(10);
    display.finish_transfer(pb);
    display.finish();
}

#[test]
fn test_progress_bar_opts_custom_template() {
    let opts = ProgressBarOpts::new(
        Some("{bar:20} {pos}/{len}".to_string()),
        Some(ProgressBarOpts::CHARS_ASCII.to_string()),
        true,
        false,
    );
    let pb = opts.to_progress_bar(Some(100));
    assert_eq!(pb.length(), Some(100));
}

#[test]
fn test_progress_display_resumed_transfer_position() {
    let display = ProgressDisplay::new(StyleOptions::visible(), 2);
    let pb = display.start_transfer("part.bin", Some(1024), 512);
    assert_eq!(pb.position(), 512);
    assert_eq!(pb.length(), Some(1024));
    display.finish_transfer(pb);
    display.task_finished();
    display.task_finished();
    display.finish();
}

#[tokio::test]
async fn test_verbose_download_completes() {
    let server = wiremock::MockServer::start().await;
    let content = create_test_content(2048);
    mount_file(&server, "/shown.bin", &content).await;

    let dir = create_temp_dir();
    let dest = dir.path().join("shown.bin");
    let downloader = test_downloader_builder().verbose(true).build().unwrap();

    downloader.fetch(&url(&server, "/shown.bin"), &dest).await.unwrap();
    assert_file_content(&dest, &content);
}
