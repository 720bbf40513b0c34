//! Tagged channel numbers

use crate::arfcn::arfcn_to_frequency;
use crate::error::RasterError;
use crate::gscn::gscn_to_frequency;

/// A channel number tagged with its numbering scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChannelNumber {
    /// NR-ARFCN on the global frequency raster
    Arfcn(i64),
    /// GSCN on the synchronization raster
    Gscn(i64),
}

impl ChannelNumber {
    /// Reference frequency of this channel in Hz
    pub fn to_frequency(&self) -> Result<u64, RasterError> {
        match *self {
            ChannelNumber::Arfcn(n) => arfcn_to_frequency(n),
            ChannelNumber::Gscn(n) => gscn_to_frequency(n),
        }
    }

    /// Raw channel index
    pub fn value(&self) -> i64 {
        match *self {
            ChannelNumber::Arfcn(n) | ChannelNumber::Gscn(n) => n,
        }
    }

    /// Name of the numbering scheme
    pub fn scheme(&self) -> &'static str {
        match self {
            ChannelNumber::Arfcn(_) => "ARFCN",
            ChannelNumber::Gscn(_) => "GSCN",
        }
    }
}

impl std::fmt::Display for ChannelNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.scheme(), self.value())
    }
}

/// Convert a mixed channel list to frequencies, preserving order
pub fn channels_to_frequencies(channels: &[ChannelNumber]) -> Result<Vec<u64>, RasterError> {
    channels.iter().map(ChannelNumber::to_frequency).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_channel_list() {
        let channels = [
            ChannelNumber::Arfcn(371_570),
            ChannelNumber::Gscn(5279),
            ChannelNumber::Arfcn(628_032),
        ];

        assert_eq!(
            channels_to_frequencies(&channels).unwrap(),
            vec![1_857_850_000, 2_112_050_000, 3_420_480_000]
        );
    }

    #[test]
    fn test_invalid_element_fails_batch() {
        let channels = [ChannelNumber::Arfcn(371_570), ChannelNumber::Gscn(1)];
        assert_eq!(
            channels_to_frequencies(&channels),
            Err(RasterError::InvalidGscn(1))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ChannelNumber::Arfcn(155_050).to_string(), "ARFCN 155050");
        assert_eq!(ChannelNumber::Gscn(7499).to_string(), "GSCN 7499");
    }
}
