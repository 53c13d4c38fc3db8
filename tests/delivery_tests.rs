mod common;

use checkpress::platform::RecordedDelivery;
use checkpress::{
    DeliveryMethod, DocumentOptions, HeadlessPlatform, InMemoryPlatform, PipelineBuilder,
    StrategyId,
};
use common::fixtures::*;
use common::TestResult;
use std::sync::Arc;

fn options_with_mode(mode: StrategyId) -> DocumentOptions {
    let mut options = DocumentOptions::default();
    options.mode = Some(mode);
    options
}

#[test]
fn native_shell_routes_through_the_save_dialog() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let platform = Arc::new(
        InMemoryPlatform::new()
            .with_native_app()
            .with_save_dialog()
            .with_share_sheet(true),
    );
    let pipeline = PipelineBuilder::new()
        .with_platform(platform.clone())
        .build()?;

    // Decision table: native + file access selects platform-native.
    let result = pipeline.generate_blocking(request(sample_snapshot()));
    assert!(result.success, "platform-native failed: {:?}", result.error);
    assert_eq!(result.strategy_used, StrategyId::PlatformNative);
    assert_eq!(result.delivered_via, Some(DeliveryMethod::NativeSave));
    assert!(result.has_bytes());

    let deliveries = platform.deliveries();
    assert!(matches!(deliveries[0], RecordedDelivery::Saved { .. }));
    Ok(())
}

#[test]
fn dismissed_save_dialog_falls_back_to_share_sheet() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let platform = Arc::new(
        InMemoryPlatform::new()
            .with_native_app()
            .with_failing_save_dialog()
            .with_share_sheet(true),
    );
    let pipeline = PipelineBuilder::new()
        .with_platform(platform.clone())
        .build()?;

    let result = pipeline.generate_blocking(request(sample_snapshot()));
    assert!(result.success);
    assert_eq!(result.delivered_via, Some(DeliveryMethod::ShareSheet));
    Ok(())
}

#[test]
fn capability_optimized_delivers_via_download_on_bare_platforms() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let platform = Arc::new(InMemoryPlatform::new());
    let pipeline = PipelineBuilder::new()
        .with_platform(platform.clone())
        .build()?;

    let result = pipeline.generate_blocking(request_with_options(
        sample_snapshot(),
        options_with_mode(StrategyId::CapabilityOptimized),
    ));
    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.delivered_via, Some(DeliveryMethod::Download));
    assert!(matches!(
        platform.deliveries()[0],
        RecordedDelivery::Downloaded { .. }
    ));
    Ok(())
}

#[test]
fn capability_optimized_prefers_raster_when_available() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let platform = Arc::new(InMemoryPlatform::new().with_rasterizer());
    let pipeline = PipelineBuilder::new()
        .with_platform(platform.clone())
        .build()?;

    let result = pipeline.generate_blocking(
        request_with_options(
            sample_snapshot(),
            options_with_mode(StrategyId::CapabilityOptimized),
        )
        .with_markup(sample_markup()),
    );
    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.strategy_used, StrategyId::CapabilityOptimized);
    // Bitmap pages are large; confirm the raster path actually ran.
    assert!(result.bytes.as_ref().unwrap().len() > 100_000);
    Ok(())
}

#[test]
fn failed_delivery_keeps_bytes_and_reports_the_failure() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let platform = Arc::new(InMemoryPlatform::new().with_failing_download());
    let pipeline = PipelineBuilder::new()
        .with_platform(platform.clone())
        .build()?;

    let result = pipeline.generate_blocking(request_with_options(
        sample_snapshot(),
        options_with_mode(StrategyId::PlatformNative),
    ));
    assert!(result.success, "generation itself succeeded");
    assert!(result.has_bytes());
    let error = result.error.expect("delivery failure surfaced");
    assert!(error.contains("not delivered"));
    Ok(())
}

#[test]
fn print_flow_completes_externally_without_bytes() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let platform = Arc::new(InMemoryPlatform::new().with_print_surface());
    let pipeline = PipelineBuilder::new()
        .with_platform(platform.clone())
        .build()?;

    let result = pipeline.generate_blocking(
        request_with_options(sample_snapshot(), options_with_mode(StrategyId::PrintFlow))
            .with_markup(sample_markup()),
    );
    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.strategy_used, StrategyId::PrintFlow);
    assert!(result.bytes.is_none(), "print flow produces no bytes here");

    let deliveries = platform.deliveries();
    assert!(matches!(deliveries[0], RecordedDelivery::Printed { .. }));
    Ok(())
}

#[test]
fn blocked_print_surface_falls_back_to_a_byte_strategy() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let platform = Arc::new(InMemoryPlatform::new().with_failing_print_surface());
    let pipeline = PipelineBuilder::new()
        .with_platform(platform.clone())
        .build()?;

    let result = pipeline.generate_blocking(
        request_with_options(sample_snapshot(), options_with_mode(StrategyId::PrintFlow))
            .with_markup(sample_markup()),
    );
    assert!(result.success, "{:?}", result.error);
    assert_ne!(result.strategy_used, StrategyId::PrintFlow);
    assert!(result.has_bytes());
    Ok(())
}

#[test]
fn headless_platform_writes_the_download_to_disk() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempfile::tempdir()?;
    let pipeline = PipelineBuilder::new()
        .with_platform(Arc::new(HeadlessPlatform::new(dir.path())))
        .build()?;

    let result = pipeline.generate_blocking(request(sample_snapshot()));
    assert!(result.success, "{:?}", result.error);

    let method = pipeline.deliver(&result)?;
    assert_eq!(method, DeliveryMethod::Download);

    let written = dir.path().join(&result.filename);
    let bytes = std::fs::read(&written)?;
    assert_eq!(Some(bytes), result.bytes);
    Ok(())
}

#[test]
fn in_memory_platform_delivery_order_is_stable() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    // With every channel available and healthy, exactly one delivery
    // happens and it is the save dialog.
    let platform = Arc::new(
        InMemoryPlatform::new()
            .with_native_app()
            .with_save_dialog()
            .with_share_sheet(true),
    );
    let pipeline = pipeline_with_arc(platform.clone());
    let result = pipeline.generate_blocking(request_with_options(
        sample_snapshot(),
        options_with_mode(StrategyId::PlatformNative),
    ));
    assert!(result.success);
    assert_eq!(platform.deliveries().len(), 1);
    Ok(())
}

fn pipeline_with_arc(platform: Arc<InMemoryPlatform>) -> checkpress::DocumentPipeline {
    PipelineBuilder::new()
        .with_platform(platform)
        .build()
        .expect("pipeline builds")
}
