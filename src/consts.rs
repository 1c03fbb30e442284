pub const SC_RDM: u8 = 0xCC;
pub const SC_SUB_MESSAGE: u8 = 0x01;

pub const PREAMBLE_BYTE: u8 = 0xFE;
pub const SEPARATOR_BYTE: u8 = 0xAA;
/// Or-ed into the first byte of every encoded discovery response byte pair.
pub const DISC_ENCODE_MASK_HIGH: u8 = 0xAA;
/// Or-ed into the second byte of every encoded discovery response byte pair.
pub const DISC_ENCODE_MASK_LOW: u8 = 0x55;

pub const BROADCAST_UID: u64 = 0xFFFF_FFFFFFFF;
pub const UID_SIZE: usize = 6;

pub const ROOT_DEVICE: u16 = 0x0000;

/// Start code through parameter data length.
pub const RDM_HEADER_SIZE: usize = 24;
pub const RDM_CHECKSUM_SIZE: usize = 2;
pub const RDM_MIN_PACKAGE_SIZE: usize = RDM_HEADER_SIZE + RDM_CHECKSUM_SIZE;
pub const RDM_MAX_PACKAGE_SIZE: usize = 257;
pub const RDM_MAX_PARAMETER_DATA_LENGTH: usize = 231;

pub const RDM_PREAMBLE_SIZE: usize = 7;
/// Excluding preamble and separator
pub const RDM_DISCOVERY_RESPONSE_SIZE: usize = 16;
/// Including 7 bytes preamble + 1 byte separator
pub const RDM_MAX_DISCOVERY_RESPONSE_SIZE: usize = RDM_DISCOVERY_RESPONSE_SIZE + 8;
/// Lower and upper bound uid of a DISC_UNIQUE_BRANCH request.
pub const RDM_DISC_UNIQUE_BRANCH_DATA_SIZE: usize = 2 * UID_SIZE;

pub const RDM_DEVICE_INFO_SIZE: usize = 0x13;
pub const RDM_PROTOCOL_VERSION: u16 = 0x01_00;
/// Labels are limited to 32 characters by the standard.
pub const RDM_MAX_LABEL_LENGTH: usize = 32;

pub const RDM_MAX_SUPPORTED_PARAMETERS: usize = RDM_MAX_PARAMETER_DATA_LENGTH / 2;
