use std::io::Cursor;
use std::sync::mpsc::{channel, Sender};

const MUSIC_WAV: &[u8] = include_bytes!("assets/music.wav");
const SAVED_WAV: &[u8] = include_bytes!("assets/saved.wav");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Saved,
}

impl Sound {
    fn data(self) -> &'static [u8] {
        match self {
            Sound::Saved => SAVED_WAV,
        }
    }

    pub fn play_if_enabled(self, enabled: bool) {
        if enabled {
            self.play();
        }
    }

    pub fn play(self) {
        let data = self.data();
        std::thread::spawn(move || {
            let Ok((_stream, stream_handle)) = rodio::OutputStream::try_default() else {
                return;
            };

            let cursor = Cursor::new(data);
            let Ok(source) = rodio::Decoder::new(cursor) else {
                return;
            };

            let Ok(sink) = rodio::Sink::try_new(&stream_handle) else {
                return;
            };

            sink.append(source);
            sink.sleep_until_end();
        });
    }
}

enum MusicCommand {
    Play { volume: f32 },
    Stop,
}

/// Looping background soundtrack for quiz playback. The audio device is
/// owned by a dedicated thread; commands are fire-and-forget, so a machine
/// without an output device degrades to silence instead of an error.
pub struct Music {
    tx: Sender<MusicCommand>,
}

impl Music {
    pub fn spawn() -> Self {
        let (tx, rx) = channel::<MusicCommand>();

        std::thread::spawn(move || {
            use rodio::Source;

            let Ok((_stream, stream_handle)) = rodio::OutputStream::try_default() else {
                return;
            };
            let mut sink: Option<rodio::Sink> = None;

            while let Ok(command) = rx.recv() {
                match command {
                    MusicCommand::Play { volume } => {
                        if let Some(old) = sink.take() {
                            old.stop();
                        }
                        let cursor = Cursor::new(MUSIC_WAV);
                        let Ok(source) = rodio::Decoder::new(cursor) else {
                            continue;
                        };
                        let Ok(new_sink) = rodio::Sink::try_new(&stream_handle) else {
                            continue;
                        };
                        new_sink.set_volume(volume);
                        new_sink.append(source.repeat_infinite());
                        sink = Some(new_sink);
                    }
                    MusicCommand::Stop => {
                        if let Some(old) = sink.take() {
                            old.stop();
                        }
                    }
                }
            }
        });

        Self { tx }
    }

    /// Starts the loop from the beginning, replacing any running loop.
    pub fn play(&self, volume: f32) {
        let _ = self.tx.send(MusicCommand::Play {
            volume: volume.clamp(0.0, 1.0),
        });
    }

    pub fn stop(&self) {
        let _ = self.tx.send(MusicCommand::Stop);
    }
}
