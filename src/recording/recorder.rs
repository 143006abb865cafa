use anyhow::{anyhow, Result};
use gif::{Encoder, Frame, Repeat};
use image::RgbaImage;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::capture::{Capture, ScreenCapture};

use super::RecordingSettings;

const MAX_FRAMES: usize = 18000;
const MAX_GIF_DIMENSION: u32 = 4096;
const MAX_FRAME_MEMORY_MB: usize = 1024;
const MAX_GIF_FILE_SIZE: u64 = 500 * 1024 * 1024;
const MIN_FRAME_INTERVAL_MS: u64 = 16;

/// Grabs screen frames on a worker thread while the quiz plays, then encodes
/// them to an animated GIF on save. Stopping is signalled over a channel;
/// frame count and memory are capped so a stuck stop signal cannot run the
/// process out of memory.
pub struct QuizRecorder {
    settings: RecordingSettings,
    frames: Arc<Mutex<Vec<RgbaImage>>>,
    stop_signal: Option<Sender<()>>,
}

impl QuizRecorder {
    pub fn new(settings: RecordingSettings) -> Self {
        Self {
            settings,
            frames: Arc::new(Mutex::new(Vec::new())),
            stop_signal: None,
        }
    }

    pub fn start(&mut self) -> Result<()> {
        if self.stop_signal.is_some() {
            return Ok(());
        }
        if let Ok(mut frames) = self.frames.lock() {
            frames.clear();
        }

        let capture = match self.settings.monitor_id {
            Some(id) => ScreenCapture::with_monitor(id),
            None => ScreenCapture::primary().unwrap_or_default(),
        };
        // First grab happens before the worker spawns so that permission and
        // monitor failures surface to the caller instead of dying silently.
        let first = capture.capture()?;

        let (tx, rx): (Sender<()>, Receiver<()>) = channel();
        self.stop_signal = Some(tx);

        let frames = Arc::clone(&self.frames);
        let fps = self.settings.fps.max(1);
        let max_duration = self.settings.max_duration;

        thread::spawn(move || {
            let min_frame_duration = Duration::from_millis(MIN_FRAME_INTERVAL_MS);
            let frame_duration = Duration::from_secs_f64(1.0 / fps as f64).max(min_frame_duration);
            let start_time = Instant::now();
            let max_memory = MAX_FRAME_MEMORY_MB * 1024 * 1024;
            let mut total_memory: usize = 0;
            let mut pending = Some(first);

            loop {
                if rx.try_recv().is_ok() {
                    break;
                }
                if start_time.elapsed() >= max_duration {
                    tracing::warn!("recording hit the configured duration cap");
                    break;
                }

                let frame_start = Instant::now();

                let grabbed = match pending.take() {
                    Some(image) => Ok(image),
                    None => capture.capture(),
                };

                if let Ok(image) = grabbed {
                    let image = downscale_if_needed(image);
                    let frame_size = (image.width() as usize)
                        .saturating_mul(image.height() as usize)
                        .saturating_mul(4);

                    if let Ok(mut frames_lock) = frames.lock() {
                        if frames_lock.len() >= MAX_FRAMES {
                            break;
                        }
                        if total_memory.saturating_add(frame_size) > max_memory {
                            break;
                        }
                        total_memory = total_memory.saturating_add(frame_size);
                        frames_lock.push(image);
                    }
                }

                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                }
            }
        });

        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_signal.take() {
            let _ = tx.send(());
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if path.to_string_lossy().contains("..") {
            return Err(anyhow!("Path contains directory traversal"));
        }

        let frames = self.frames.lock().unwrap_or_else(|e| e.into_inner());
        if frames.is_empty() {
            return Err(anyhow!("No frames captured"));
        }

        let orig_width = frames[0].width();
        let orig_height = frames[0].height();
        if orig_width == 0 || orig_height == 0 {
            return Err(anyhow!("Frame has zero dimension"));
        }
        if orig_width > u16::MAX as u32 || orig_height > u16::MAX as u32 {
            return Err(anyhow!("Frame dimensions too large for GIF format"));
        }

        let width = orig_width as u16;
        let height = orig_height as u16;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        let mut encoder = Encoder::new(file, width, height, &[])?;
        encoder.set_repeat(Repeat::Infinite)?;

        let fps = self.settings.fps.clamp(1, 60);
        let delay = (100.0 / fps as f64).clamp(2.0, 100.0) as u16;

        for captured in frames.iter() {
            let resized = if captured.width() != orig_width || captured.height() != orig_height {
                image::imageops::resize(
                    captured,
                    orig_width,
                    orig_height,
                    image::imageops::FilterType::Nearest,
                )
            } else {
                captured.clone()
            };

            let rgba_data: Vec<u8> = resized.into_raw();
            let mut rgb_data: Vec<u8> =
                Vec::with_capacity((width as usize).saturating_mul(height as usize) * 3);
            for chunk in rgba_data.chunks_exact(4) {
                rgb_data.push(chunk[0]);
                rgb_data.push(chunk[1]);
                rgb_data.push(chunk[2]);
            }

            let mut frame = Frame::from_rgb(width, height, &rgb_data);
            frame.delay = delay;
            encoder.write_frame(&frame)?;
        }

        if let Ok(metadata) = std::fs::metadata(path) {
            if metadata.len() > MAX_GIF_FILE_SIZE {
                let _ = std::fs::remove_file(path);
                return Err(anyhow!("Generated GIF exceeds maximum file size"));
            }
        }

        Ok(())
    }

    pub fn reset(&mut self) {
        self.stop();
        if let Ok(mut frames) = self.frames.lock() {
            frames.clear();
        }
    }
}

fn downscale_if_needed(image: RgbaImage) -> RgbaImage {
    if image.width() <= MAX_GIF_DIMENSION && image.height() <= MAX_GIF_DIMENSION {
        return image;
    }
    let scale_w = MAX_GIF_DIMENSION as f32 / image.width() as f32;
    let scale_h = MAX_GIF_DIMENSION as f32 / image.height() as f32;
    let scale = scale_w.min(scale_h);
    let new_w = ((image.width() as f32) * scale) as u32;
    let new_h = ((image.height() as f32) * scale) as u32;
    image::imageops::resize(
        &image,
        new_w.max(1),
        new_h.max(1),
        image::imageops::FilterType::Triangle,
    )
}

impl Default for QuizRecorder {
    fn default() -> Self {
        Self::new(RecordingSettings::default())
    }
}
