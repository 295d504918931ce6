// Launchpad device - Raw MIDI node as a grid device and button stream
use crate::application::grid_device::GridDevice;
use crate::domain::error::DashboardError;
use crate::domain::grid::{ButtonEvent, GridPosition};
use crate::domain::indicator::LedColor;
use crate::infrastructure::launchpad_codec::{
    decode_event, encode_cell, encode_reset, MidiDecoder, MidiMessage,
};
use anyhow::Context;
use async_trait::async_trait;
use futures::stream::Stream;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::Mutex;

pub struct LaunchpadDevice {
    path: PathBuf,
    output: Mutex<File>,
}

impl LaunchpadDevice {
    pub async fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let output = OpenOptions::new()
            .write(true)
            .open(&path)
            .await
            .with_context(|| format!("Failed to open MIDI device {}", path.display()))?;

        Ok(Self {
            path,
            output: Mutex::new(output),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn send(&self, message: MidiMessage) -> Result<(), DashboardError> {
        let mut output = self.output.lock().await;
        output
            .write_all(&message.to_bytes())
            .await
            .map_err(|e| DashboardError::Device(e.to_string()))?;
        output
            .flush()
            .await
            .map_err(|e| DashboardError::Device(e.to_string()))
    }
}

#[async_trait]
impl GridDevice for LaunchpadDevice {
    async fn set_cell(&self, position: GridPosition, color: LedColor) -> Result<(), DashboardError> {
        self.send(encode_cell(position, color)).await
    }

    async fn clear_all(&self) -> Result<(), DashboardError> {
        self.send(encode_reset()).await
    }
}

/// Presses read from a device node. Ends when the device goes away.
pub fn button_events(path: PathBuf) -> impl Stream<Item = ButtonEvent> + Send + 'static {
    async_stream::stream! {
        match File::open(&path).await {
            Ok(mut input) => {
                let mut decoder = MidiDecoder::new();
                let mut buf = [0u8; 64];

                loop {
                    let n = match input.read(&mut buf).await {
                        Ok(0) => {
                            tracing::warn!(path = %path.display(), "MIDI device closed");
                            break;
                        }
                        Ok(n) => n,
                        Err(e) => {
                            tracing::error!(path = %path.display(), error = %e, "MIDI read failed");
                            break;
                        }
                    };

                    for &byte in &buf[..n] {
                        if let Some(event) = decoder.push(byte).and_then(decode_event) {
                            tracing::trace!(?event, "Button pressed");
                            yield event;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to open MIDI device for reading");
            }
        }
    }
}
