//! Parameter ids defined in ANSI E1.20 that this responder knows about.

// discovery
pub const DISC_UNIQUE_BRANCH: u16 = 0x0001;
pub const DISC_MUTE: u16 = 0x0002;
pub const DISC_UN_MUTE: u16 = 0x0003;

// rdm information
pub const SUPPORTED_PARAMETERS: u16 = 0x0050;
pub const PARAMETER_DESCRIPTION: u16 = 0x0051;

// product information
pub const DEVICE_INFO: u16 = 0x0060;
pub const DEVICE_MODEL_DESCRIPTION: u16 = 0x0080;
pub const MANUFACTURER_LABEL: u16 = 0x0081;
pub const SOFTWARE_VERSION_LABEL: u16 = 0x00C0;

// dmx setup
pub const DMX_START_ADDRESS: u16 = 0x00F0;

// control
pub const IDENTIFY_DEVICE: u16 = 0x1000;

/// Pids every responder has to support. They are never listed in a
/// SUPPORTED_PARAMETERS response.
pub const MANDATORY_PIDS: [u16; 9] = [
    DISC_UNIQUE_BRANCH,
    DISC_MUTE,
    DISC_UN_MUTE,
    SUPPORTED_PARAMETERS,
    PARAMETER_DESCRIPTION,
    DEVICE_INFO,
    SOFTWARE_VERSION_LABEL,
    DMX_START_ADDRESS,
    IDENTIFY_DEVICE,
];
