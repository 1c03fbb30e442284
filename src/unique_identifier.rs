use crate::consts::{BROADCAST_UID, UID_SIZE};

/// Raised when a device uid would collide with one of the reserved broadcast values.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReservedUidError;

impl core::fmt::Display for ReservedUidError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "uid is reserved for broadcasts")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReservedUidError {}

/// The unique id of a single rdm device.
/// There shouldn't be multiple devices with same unique id.
/// The manufacturer uids are assigned by the esta.
/// [more information](https://tsp.esta.org/tsp/working_groups/CP/mfctrIDs.php)
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct UniqueIdentifier {
    manufacturer_uid: u16,
    device_uid: u32,
}

impl core::fmt::Display for UniqueIdentifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04X}:{:08X}", self.manufacturer_uid, self.device_uid)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for UniqueIdentifier {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{:04X}:{:08X}", self.manufacturer_uid, self.device_uid);
    }
}

impl UniqueIdentifier {
    /// Fails if the device id is all ones since that would make it a broadcast address.
    pub const fn new(manufacturer_uid: u16, device_uid: u32) -> Result<Self, ReservedUidError> {
        if device_uid == u32::MAX {
            return Err(ReservedUidError);
        }

        Ok(Self {
            manufacturer_uid,
            device_uid,
        })
    }

    pub fn manufacturer_uid(&self) -> u16 {
        self.manufacturer_uid
    }

    pub fn device_uid(&self) -> u32 {
        self.device_uid
    }

    pub fn to_bytes(&self) -> [u8; UID_SIZE] {
        let mut buffer = [0u8; UID_SIZE];

        buffer[..2].copy_from_slice(&self.manufacturer_uid.to_be_bytes());
        buffer[2..].copy_from_slice(&self.device_uid.to_be_bytes());

        buffer
    }
}

impl TryFrom<u64> for UniqueIdentifier {
    type Error = ReservedUidError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match PackageAddress::try_from(value)? {
            PackageAddress::Device(uid) => Ok(uid),
            _ => Err(ReservedUidError),
        }
    }
}

impl From<UniqueIdentifier> for u64 {
    fn from(value: UniqueIdentifier) -> Self {
        ((value.manufacturer_uid as u64) << u32::BITS) | value.device_uid as u64
    }
}

/// How a package address relates to the uid of a responder.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Addressing {
    /// Addressed to exactly this responder.
    Unicast,
    /// Addressed to every responder on the bus.
    BroadcastAll,
    /// Addressed to every responder of this responder's manufacturer.
    Vendorcast,
    /// Addressed to some other responder or manufacturer.
    NotForMe,
}

impl Addressing {
    /// Whether the package has to be acted upon.
    pub fn requires_action(&self) -> bool {
        !matches!(self, Addressing::NotForMe)
    }

    /// Only unicast packages may be answered with a regular response.
    pub fn allows_response(&self) -> bool {
        matches!(self, Addressing::Unicast)
    }
}

/// The destination of an rdm package.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PackageAddress {
    /// Broadcast to all devices.
    Broadcast,
    /// Broadcast to all devices from a specific manufacturer identified by the manufacturer id
    /// in the u16.
    ManufacturerBroadcast(u16),
    /// Send package to a specific device.
    Device(UniqueIdentifier),
}

impl PackageAddress {
    pub fn from_bytes(buffer: &[u8; UID_SIZE]) -> Self {
        let manufacturer_uid = u16::from_be_bytes([buffer[0], buffer[1]]);
        let device_uid = u32::from_be_bytes([buffer[2], buffer[3], buffer[4], buffer[5]]);

        if device_uid != u32::MAX {
            return Self::Device(UniqueIdentifier {
                manufacturer_uid,
                device_uid,
            });
        }

        match manufacturer_uid {
            u16::MAX => Self::Broadcast,
            _ => Self::ManufacturerBroadcast(manufacturer_uid),
        }
    }

    pub fn to_bytes(&self) -> [u8; UID_SIZE] {
        match self {
            Self::Broadcast => [0xFFu8; UID_SIZE],
            Self::ManufacturerBroadcast(manufacturer_uid) => {
                let mut buffer = [0xFFu8; UID_SIZE];
                buffer[..2].copy_from_slice(&manufacturer_uid.to_be_bytes());

                buffer
            },
            Self::Device(uid) => uid.to_bytes(),
        }
    }

    /// The vendorcast address of the manufacturer of `uid`.
    pub fn vendorcast_of(uid: UniqueIdentifier) -> Self {
        Self::ManufacturerBroadcast(uid.manufacturer_uid)
    }

    pub fn is_broadcast(&self) -> bool {
        !matches!(self, PackageAddress::Device(_))
    }

    /// Classifies this address from the point of view of the responder owning `own_uid`.
    pub fn classify(&self, own_uid: UniqueIdentifier) -> Addressing {
        match *self {
            PackageAddress::Device(uid) if uid == own_uid => Addressing::Unicast,
            PackageAddress::Broadcast => Addressing::BroadcastAll,
            PackageAddress::ManufacturerBroadcast(manufacturer_uid)
                if manufacturer_uid == own_uid.manufacturer_uid =>
            {
                Addressing::Vendorcast
            },
            _ => Addressing::NotForMe,
        }
    }

    /// True if the responder owning `own_uid` has to act upon a package sent to this address.
    pub fn requires_action(&self, own_uid: UniqueIdentifier) -> bool {
        self.classify(own_uid).requires_action()
    }
}

impl TryFrom<u64> for PackageAddress {
    type Error = ReservedUidError;

    /// Fails if the value does not fit into 48 bits.
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > BROADCAST_UID {
            return Err(ReservedUidError);
        }

        let bytes = value.to_be_bytes();
        let mut uid_bytes = [0u8; UID_SIZE];
        uid_bytes.copy_from_slice(&bytes[2..]);

        Ok(Self::from_bytes(&uid_bytes))
    }
}

impl From<PackageAddress> for u64 {
    fn from(value: PackageAddress) -> Self {
        match value {
            PackageAddress::Broadcast => BROADCAST_UID,
            PackageAddress::ManufacturerBroadcast(manufacturer_uid) => {
                ((manufacturer_uid as u64) << u32::BITS) | u32::MAX as u64
            },
            PackageAddress::Device(uid) => uid.into(),
        }
    }
}
