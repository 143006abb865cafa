mod screen;

pub use screen::ScreenCapture;

use anyhow::Result;
use image::RgbaImage;

pub trait Capture {
    fn capture(&self) -> Result<RgbaImage>;
}

#[derive(Debug, Clone)]
pub struct MonitorInfo {
    pub id: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub is_primary: bool,
}

pub fn list_monitors() -> Result<Vec<MonitorInfo>> {
    let screens = xcap::Monitor::all()?;
    let monitors: Vec<MonitorInfo> = screens
        .into_iter()
        .map(|s| MonitorInfo {
            id: s.id(),
            name: s.name().to_string(),
            width: s.width(),
            height: s.height(),
            is_primary: s.is_primary(),
        })
        .collect();
    Ok(monitors)
}
