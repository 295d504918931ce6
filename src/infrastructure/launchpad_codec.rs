// Launchpad MIDI codec - LED messages out, button presses in
use crate::domain::grid::{ButtonEvent, GridPosition};
use crate::domain::indicator::{Intensity, LedColor};

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;
const CONTROL_CHANGE: u8 = 0xB0;
const PROGRAM_CHANGE: u8 = 0xC0;
const CHANNEL_PRESSURE: u8 = 0xD0;

/// Velocity flags for "copy + clear": write both buffers, no double buffering.
const NORMAL_FLAGS: u8 = 0x0C;
/// The scene buttons sit in a ninth column to the right of the grid.
const SCENE_COLUMN: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiMessage {
    pub status: u8,
    pub data1: u8,
    pub data2: u8,
}

impl MidiMessage {
    pub fn to_bytes(self) -> [u8; 3] {
        [self.status, self.data1, self.data2]
    }
}

fn level(intensity: Intensity) -> u8 {
    match intensity {
        Intensity::Off => 0,
        Intensity::Low => 1,
        Intensity::High => 3,
    }
}

fn key(column: u8, row: u8) -> u8 {
    row * 16 + column
}

pub fn encode_cell(position: GridPosition, color: LedColor) -> MidiMessage {
    MidiMessage {
        status: NOTE_ON,
        data1: key(position.x, position.y),
        data2: level(color.green) * 16 + level(color.red) + NORMAL_FLAGS,
    }
}

/// Turns every LED off and restores the default mapping.
pub fn encode_reset() -> MidiMessage {
    MidiMessage {
        status: CONTROL_CHANGE,
        data1: 0,
        data2: 0,
    }
}

/// Button presses from note-on messages; releases and anything else map to `None`.
pub fn decode_event(message: MidiMessage) -> Option<ButtonEvent> {
    if message.status & 0xF0 != NOTE_ON || message.data2 == 0 {
        return None;
    }

    let row = message.data1 >> 4;
    let column = message.data1 & 0x0F;

    if column == SCENE_COLUMN {
        return (row < 8).then_some(ButtonEvent::SceneSelect(row + 1));
    }

    GridPosition::new(column, row).map(ButtonEvent::GridPress)
}

/// Incremental parser for a raw MIDI byte stream, with running status.
#[derive(Debug, Default)]
pub struct MidiDecoder {
    running_status: Option<u8>,
    data: [u8; 2],
    len: usize,
}

impl MidiDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, byte: u8) -> Option<MidiMessage> {
        if byte >= 0xF8 {
            // Realtime bytes may appear anywhere and carry nothing for us
            return None;
        }

        if byte & 0x80 != 0 {
            self.len = 0;
            self.running_status = (byte < 0xF0).then_some(byte);
            return None;
        }

        let status = self.running_status?;
        self.data[self.len] = byte;
        self.len += 1;

        let needed = match status & 0xF0 {
            PROGRAM_CHANGE | CHANNEL_PRESSURE => 1,
            _ => 2,
        };
        if self.len < needed {
            return None;
        }

        self.len = 0;
        Some(MidiMessage {
            status,
            data1: self.data[0],
            data2: if needed == 2 { self.data[1] } else { 0 },
        })
    }
}
