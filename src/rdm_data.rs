use crate::checksum;
use crate::command_class::CommandClass;
use crate::consts::{
    RDM_CHECKSUM_SIZE, RDM_HEADER_SIZE, RDM_MAX_PACKAGE_SIZE, RDM_MAX_PARAMETER_DATA_LENGTH,
    RDM_MIN_PACKAGE_SIZE, ROOT_DEVICE, SC_RDM, SC_SUB_MESSAGE,
};
use crate::layouts::rdm_header_layout;
use crate::types::{DataPack, ResponseType};
use crate::unique_identifier::{PackageAddress, UniqueIdentifier};

/// Error that gets raised when attempting to answer an [RdmRequest]
/// that was not addressed to a single device.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IsBroadcastError;

impl core::fmt::Display for IsBroadcastError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "tried to convert broadcast request to response")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IsBroadcastError {}

/// The structural fault of a malformed package.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MalformedReason {
    /// Buffer must be at least 26 bytes
    BufferTooSmall,
    /// Buffer must be at most 257 bytes
    BufferTooBig,
    /// Received wrong start code (0xCC) or sub start code (0x01)
    WrongStartCode,
    /// The message length field does not match the buffer; contains the field
    WrongMessageLength(usize),
    /// The parameter data length field does not match the message length; contains the field
    WrongParameterDataLength(usize),
    /// The source uid is a broadcast address.
    SourceUidIsBroadcast,
}

/// Reasons for dropping a received package. None of them are answered.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RdmParseError {
    /// The package is structurally invalid.
    Malformed(MalformedReason),
    /// The checksum does not match the package.
    ChecksumInvalid,
}

impl From<MalformedReason> for RdmParseError {
    fn from(value: MalformedReason) -> Self {
        Self::Malformed(value)
    }
}

impl core::fmt::Display for RdmParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RdmParseError::Malformed(reason) => match reason {
                MalformedReason::BufferTooSmall => write!(f, "buffer too small"),
                MalformedReason::BufferTooBig => write!(f, "buffer too big"),
                MalformedReason::WrongStartCode => write!(f, "start code is incorrect"),
                MalformedReason::WrongMessageLength(message_length) => {
                    write!(f, "message length {} is incorrect", message_length)
                },
                MalformedReason::WrongParameterDataLength(parameter_data_length) => {
                    write!(
                        f,
                        "parameter data length {} is incorrect",
                        parameter_data_length
                    )
                },
                MalformedReason::SourceUidIsBroadcast => write!(f, "source uid is a broadcast"),
            },
            RdmParseError::ChecksumInvalid => write!(f, "checksum is incorrect"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RdmParseError {}

/// A validated rdm request. The parameter data borrows from the received buffer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RdmRequest<'a> {
    pub destination_uid: PackageAddress,
    pub source_uid: UniqueIdentifier,
    pub transaction_number: u8,
    pub port_id: u8,
    pub message_count: u8,
    pub sub_device: u16,
    pub command_class: CommandClass,
    pub parameter_id: u16,
    pub parameter_data: &'a [u8],
}

impl<'a> RdmRequest<'a> {
    /// Validates and parses a complete package, starting with the start code and
    /// ending with the checksum.
    pub fn deserialize(buffer: &'a [u8]) -> Result<Self, RdmParseError> {
        let buffer_size = buffer.len();

        if buffer_size < RDM_MIN_PACKAGE_SIZE {
            return Err(MalformedReason::BufferTooSmall.into());
        }

        if buffer_size > RDM_MAX_PACKAGE_SIZE {
            return Err(MalformedReason::BufferTooBig.into());
        }

        if !checksum::verify(buffer) {
            return Err(RdmParseError::ChecksumInvalid);
        }

        let header_view = rdm_header_layout::View::new(&buffer[..RDM_HEADER_SIZE]);

        if header_view.start_code().read() != SC_RDM
            || header_view.sub_start_code().read() != SC_SUB_MESSAGE
        {
            return Err(MalformedReason::WrongStartCode.into());
        }

        // excludes the checksum
        let message_length = header_view.message_length().read() as usize;
        if message_length != buffer_size - RDM_CHECKSUM_SIZE {
            return Err(MalformedReason::WrongMessageLength(message_length).into());
        }

        let parameter_data_length = header_view.parameter_data_length().read() as usize;
        if parameter_data_length != message_length - RDM_HEADER_SIZE
            || parameter_data_length > RDM_MAX_PARAMETER_DATA_LENGTH
        {
            return Err(MalformedReason::WrongParameterDataLength(parameter_data_length).into());
        }

        let source_uid = match PackageAddress::from_bytes(header_view.source_uid()) {
            PackageAddress::Device(uid) => uid,
            _ => return Err(MalformedReason::SourceUidIsBroadcast.into()),
        };

        Ok(Self {
            destination_uid: PackageAddress::from_bytes(header_view.destination_uid()),
            source_uid,
            transaction_number: header_view.transaction_number().read(),
            port_id: header_view.port_id_response_type().read(),
            message_count: header_view.message_count().read(),
            sub_device: header_view.sub_device().read(),
            command_class: header_view.command_class().read().into(),
            parameter_id: header_view.parameter_id().read(),
            parameter_data: &buffer[RDM_HEADER_SIZE..message_length],
        })
    }

    /// Builds the answer to this request. Fails if the request wasn't addressed to a single device.
    ///
    /// Responses always originate from the root device.
    pub fn build_response(
        &self,
        response_type: ResponseType,
        parameter_data: DataPack,
    ) -> Result<RdmResponseData, IsBroadcastError> {
        Ok(RdmResponseData {
            destination_uid: self.source_uid,
            source_uid: match self.destination_uid {
                PackageAddress::Device(uid) => uid,
                _ => return Err(IsBroadcastError),
            },
            transaction_number: self.transaction_number,
            response_type,
            message_count: 0,
            sub_device: ROOT_DEVICE,
            command_class: self.command_class.response_class(),
            parameter_id: self.parameter_id,
            parameter_data,
        })
    }
}

/// An RDM Response package that does not have its parameter data deserialized.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RdmResponseData {
    pub destination_uid: UniqueIdentifier,
    pub source_uid: UniqueIdentifier,
    pub transaction_number: u8,
    pub response_type: ResponseType,
    pub message_count: u8,
    pub sub_device: u16,
    pub command_class: CommandClass,
    pub parameter_id: u16,
    pub parameter_data: DataPack,
}
