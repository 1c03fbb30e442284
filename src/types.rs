use crate::consts::RDM_MAX_PARAMETER_DATA_LENGTH;

/// Parameter data of a single rdm package.
pub type DataPack = heapless::Vec<u8, RDM_MAX_PARAMETER_DATA_LENGTH>;

/// Response status of a rdm package
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ResponseType {
    /// The request was acknowledged.
    ResponseTypeAck = 0x00,
    /// The request was not acknowledged.
    ResponseTypeNackReason = 0x02,
}

/// Reason codes carried by a [ResponseType::ResponseTypeNackReason] response.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum NackReason {
    UnknownPid = 0x0000,
    FormatError = 0x0001,
    HardwareFault = 0x0002,
    ProxyReject = 0x0003,
    WriteProtect = 0x0004,
    UnsupportedCommandClass = 0x0005,
    DataOutOfRange = 0x0006,
    BufferFull = 0x0007,
    PacketSizeUnsupported = 0x0008,
    SubDeviceOutOfRange = 0x0009,
    ProxyBufferFull = 0x000A,
}

impl NackReason {
    pub fn to_bytes(&self) -> [u8; 2] {
        (*self as u16).to_be_bytes()
    }

    pub fn serialize(&self) -> DataPack {
        self.to_bytes().into_iter().collect()
    }
}
