//! Alphanumeric segment display frames.
//!
//! Segment displays carry no bit-planes; a frame is the raw segment word of
//! every digit plus the layout the words belong to. Nothing in playback reads
//! these, they are handed through to output devices untouched.

use serde::{Deserialize, Serialize};

/// Physical arrangement of the digits on a segment display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericalLayout {
    #[default]
    None,
    Alpha2x16,
    Alpha2x20,
    Alpha2x7Num2x7,
    Alpha2x7Num2x7Num4x1,
    Num2x7Num2x7Num4x1,
    Num2x7Num2x7Num10x1,
    Num2x7Num2x7Num4x1Gen7,
    Num10x2x7Num10x2x7Num4x1,
    Num2x6Num2x6Num4x1,
    Num10x2x6Num10x2x6Num4x1,
    Num10x4x7,
    Num6x4Num4x1,
    Num2x7Num4x1Alpha1x16,
    Alpha1x16Num1x16Num1x7,
}

/// One frame of segment data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlphaNumericFrame {
    segment_layout: NumericalLayout,
    segment_data: Vec<u16>,
    segment_data_extended: Option<Vec<u16>>,
}

impl AlphaNumericFrame {
    /// Frame with a single bank of segment words.
    pub fn new(layout: NumericalLayout, segment_data: Vec<u16>) -> Self {
        Self {
            segment_layout: layout,
            segment_data,
            segment_data_extended: None,
        }
    }

    /// Frame with an extra bank of segment words (used by the dual-row layouts).
    pub fn with_extended(
        layout: NumericalLayout,
        segment_data: Vec<u16>,
        segment_data_extended: Vec<u16>,
    ) -> Self {
        Self {
            segment_layout: layout,
            segment_data,
            segment_data_extended: Some(segment_data_extended),
        }
    }

    /// Get the digit layout.
    pub fn segment_layout(&self) -> NumericalLayout {
        self.segment_layout
    }

    /// Get the segment word of every digit.
    pub fn segment_data(&self) -> &[u16] {
        &self.segment_data
    }

    /// Get the extra bank of segment words, if any.
    pub fn segment_data_extended(&self) -> Option<&[u16]> {
        self.segment_data_extended.as_deref()
    }
}
