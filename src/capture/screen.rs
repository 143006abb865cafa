use anyhow::{anyhow, Result};
use image::RgbaImage;
use xcap::Monitor;

use super::Capture;

const MAX_CAPTURE_DIMENSION: u32 = 16384;
const MAX_CAPTURE_PIXELS: u64 = 256 * 1024 * 1024;

/// Grabs frames from one monitor. The recorder points this at the primary
/// display, which is where the playback window lives.
pub struct ScreenCapture {
    monitor_id: Option<u32>,
}

impl ScreenCapture {
    pub fn new() -> Self {
        Self { monitor_id: None }
    }

    pub fn with_monitor(monitor_id: u32) -> Self {
        Self {
            monitor_id: Some(monitor_id),
        }
    }

    pub fn primary() -> Result<Self> {
        let primary = Monitor::all()?
            .into_iter()
            .find(|m| m.is_primary())
            .ok_or_else(|| anyhow!("No primary monitor found"))?;
        Ok(Self::with_monitor(primary.id()))
    }

    fn monitor(&self) -> Result<Monitor> {
        let mut monitors = Monitor::all()?;
        let chosen = match self.monitor_id {
            Some(id) => monitors.into_iter().find(|m| m.id() == id),
            None => {
                let primary = monitors.iter().position(|m| m.is_primary()).unwrap_or(0);
                if monitors.is_empty() {
                    None
                } else {
                    Some(monitors.swap_remove(primary))
                }
            }
        };
        chosen.ok_or_else(|| anyhow!("Monitor unavailable"))
    }
}

impl Default for ScreenCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl Capture for ScreenCapture {
    fn capture(&self) -> Result<RgbaImage> {
        let img = self.monitor()?.capture_image()?;

        if img.width() > MAX_CAPTURE_DIMENSION || img.height() > MAX_CAPTURE_DIMENSION {
            return Err(anyhow!("Captured image dimensions exceed safety limit"));
        }
        let pixel_count = (img.width() as u64).saturating_mul(img.height() as u64);
        if pixel_count > MAX_CAPTURE_PIXELS {
            return Err(anyhow!("Captured image exceeds maximum pixel count"));
        }

        Ok(img)
    }
}
