use super::domain::{BrandElements, DeviceClass, DeviceScan, ScanResults};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Failure reported by an external measurement collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollaboratorError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
    #[error("collaborator returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// PageSpeed/Lighthouse style scanner, one call per device class.
pub trait PerformanceScanner: Send + Sync {
    fn scan(&self, url: &str, device: DeviceClass) -> Result<DeviceScan, CollaboratorError>;
}

/// Headless-browser screenshot; `Ok(None)` means the page rendered nothing usable.
pub trait ScreenshotCapturer: Send + Sync {
    fn capture(&self, url: &str) -> Result<Option<String>, CollaboratorError>;
}

pub trait BrandExtractor: Send + Sync {
    fn extract(&self, url: &str) -> Result<BrandElements, CollaboratorError>;
}

/// Runs every collaborator concurrently and keeps whatever succeeded.
pub struct ScanPipeline<P, S, B> {
    scanner: Arc<P>,
    screenshots: Arc<S>,
    brand: Arc<B>,
}

impl<P, S, B> ScanPipeline<P, S, B>
where
    P: PerformanceScanner + 'static,
    S: ScreenshotCapturer + 'static,
    B: BrandExtractor + 'static,
{
    pub fn new(scanner: Arc<P>, screenshots: Arc<S>, brand: Arc<B>) -> Self {
        Self {
            scanner,
            screenshots,
            brand,
        }
    }

    pub async fn run(&self, url: &str) -> ScanResults {
        let desktop = self.device_task(url, DeviceClass::Desktop);
        let mobile = self.device_task(url, DeviceClass::Mobile);

        let screenshots = Arc::clone(&self.screenshots);
        let target = url.to_string();
        let screenshot = tokio::task::spawn_blocking(move || screenshots.capture(&target));

        let brand = Arc::clone(&self.brand);
        let target = url.to_string();
        let brand = tokio::task::spawn_blocking(move || brand.extract(&target));

        let (desktop, mobile, screenshot, brand) = tokio::join!(
            gather("performance:desktop", url, desktop),
            gather("performance:mobile", url, mobile),
            gather("screenshot", url, screenshot),
            gather("brand", url, brand),
        );

        let results = ScanResults {
            desktop,
            mobile,
            screenshot: screenshot.flatten(),
            brand,
        };
        debug!(
            %url,
            desktop = results.desktop.is_some(),
            mobile = results.mobile.is_some(),
            screenshot = results.screenshot.is_some(),
            brand = results.brand.is_some(),
            "scan collaborators finished"
        );
        results
    }

    fn device_task(
        &self,
        url: &str,
        device: DeviceClass,
    ) -> JoinHandle<Result<DeviceScan, CollaboratorError>> {
        let scanner = Arc::clone(&self.scanner);
        let target = url.to_string();
        tokio::task::spawn_blocking(move || scanner.scan(&target, device))
    }
}

async fn gather<T>(
    collaborator: &'static str,
    url: &str,
    task: JoinHandle<Result<T, CollaboratorError>>,
) -> Option<T> {
    match task.await {
        Ok(Ok(value)) => Some(value),
        Ok(Err(error)) => {
            warn!(collaborator, %url, %error, "collaborator failed; continuing without it");
            None
        }
        Err(error) => {
            warn!(collaborator, %url, %error, "collaborator task aborted; continuing without it");
            None
        }
    }
}
