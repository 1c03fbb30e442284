use crate::checksum;
use crate::command_class::CommandClass;
use crate::consts::{
    RDM_HEADER_SIZE, RDM_MAX_PACKAGE_SIZE, RDM_MAX_PARAMETER_DATA_LENGTH, SC_RDM, SC_SUB_MESSAGE,
};
use crate::rdm_driver::{OutputPin, PeripheralPorts, RdmTransport};
use crate::rdm_responder::{DeviceMetadata, RdmResponderConfig};
use crate::unique_identifier::{PackageAddress, UniqueIdentifier};

/// DISC_MUTE from 7a70:12345678 to 7a70:00000000.
pub const CHECKSUM_SAMPLE: [u8; 26] = [
    0xcc, 0x01, 0x18, 0x7a, 0x70, 0x00, 0x00, 0x00, 0x00, 0x7a, 0x70, 0x12, 0x34, 0x56, 0x78, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x02, 0x00, 0x03, 0xdf,
];

pub const OUR_UID: UniqueIdentifier = match UniqueIdentifier::new(0x7a70, 0x01020304) {
    Ok(uid) => uid,
    Err(_) => panic!("reserved uid"),
};

pub const CONTROLLER_UID: UniqueIdentifier = match UniqueIdentifier::new(0x7a70, 0x10000000) {
    Ok(uid) => uid,
    Err(_) => panic!("reserved uid"),
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn test_config() -> RdmResponderConfig {
    RdmResponderConfig {
        uid: OUR_UID,
        identify_pin: OutputPin::new(3, 0),
        mute_pin: OutputPin::new(3, 1),
        device_metadata: DeviceMetadata {
            device_model_id: 0x0100,
            product_category: 0x7101,
            software_version_id: 0,
            dmx_footprint: 0,
            current_personality: 0,
            personality_count: 0,
            dmx_start_address: None,
            device_model_description: "Ja Rule Responder",
            manufacturer_label: "Open Lighting Project",
            software_version_label: "Alpha",
        },
    }
}

/// The bounds of a DISC_UNIQUE_BRANCH request.
pub fn dub_parameter_data(lower_bound: u64, upper_bound: u64) -> [u8; 12] {
    let mut parameter_data = [0u8; 12];
    parameter_data[..6].copy_from_slice(&lower_bound.to_be_bytes()[2..]);
    parameter_data[6..].copy_from_slice(&upper_bound.to_be_bytes()[2..]);

    parameter_data
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SentFrame {
    pub include_break: bool,
    pub span_count: usize,
    pub data: heapless::Vec<u8, RDM_MAX_PACKAGE_SIZE>,
}

/// Records every frame instead of sending it.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub sent: heapless::Vec<SentFrame, 8>,
}

impl RdmTransport for MockTransport {
    type DriverError = core::convert::Infallible;

    fn send(&mut self, include_break: bool, buffers: &[&[u8]]) -> Result<(), Self::DriverError> {
        let mut data = heapless::Vec::new();
        for buffer in buffers {
            data.extend_from_slice(buffer).unwrap();
        }

        self.sent
            .push(SentFrame {
                include_break,
                span_count: buffers.len(),
                data,
            })
            .unwrap();

        Ok(())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PortCall {
    Set(OutputPin),
    Clear(OutputPin),
}

/// Records every pin change.
#[derive(Debug, Default)]
pub struct MockPorts {
    pub calls: heapless::Vec<PortCall, 16>,
}

impl PeripheralPorts for MockPorts {
    fn set_output(&mut self, pin: OutputPin) {
        self.calls.push(PortCall::Set(pin)).unwrap();
    }

    fn clear_output(&mut self, pin: OutputPin) {
        self.calls.push(PortCall::Clear(pin)).unwrap();
    }
}

/// Builds request frames sent by [CONTROLLER_UID]. The length fields and the checksum
/// are calculated unless they are overridden.
pub struct RequestBuilder {
    destination_uid: PackageAddress,
    source_uid: PackageAddress,
    start_code: u8,
    transaction_number: u8,
    sub_device: u16,
    command_class: CommandClass,
    parameter_id: u16,
    parameter_data: heapless::Vec<u8, RDM_MAX_PARAMETER_DATA_LENGTH>,
    message_length: Option<u8>,
    parameter_data_length: Option<u8>,
}

impl RequestBuilder {
    fn new(destination_uid: PackageAddress, command_class: CommandClass, parameter_id: u16) -> Self {
        Self {
            destination_uid,
            source_uid: PackageAddress::Device(CONTROLLER_UID),
            start_code: SC_RDM,
            transaction_number: 0,
            sub_device: 0,
            command_class,
            parameter_id,
            parameter_data: heapless::Vec::new(),
            message_length: None,
            parameter_data_length: None,
        }
    }

    pub fn discovery(destination_uid: PackageAddress, parameter_id: u16) -> Self {
        Self::new(destination_uid, CommandClass::DiscoveryCommand, parameter_id)
    }

    pub fn get(destination_uid: PackageAddress, parameter_id: u16) -> Self {
        Self::new(destination_uid, CommandClass::GetCommand, parameter_id)
    }

    pub fn set(destination_uid: PackageAddress, parameter_id: u16) -> Self {
        Self::new(destination_uid, CommandClass::SetCommand, parameter_id)
    }

    pub fn source_uid(mut self, source_uid: PackageAddress) -> Self {
        self.source_uid = source_uid;
        self
    }

    pub fn start_code(mut self, start_code: u8) -> Self {
        self.start_code = start_code;
        self
    }

    pub fn transaction_number(mut self, transaction_number: u8) -> Self {
        self.transaction_number = transaction_number;
        self
    }

    pub fn sub_device(mut self, sub_device: u16) -> Self {
        self.sub_device = sub_device;
        self
    }

    pub fn command_class(mut self, command_class: CommandClass) -> Self {
        self.command_class = command_class;
        self
    }

    pub fn parameter_data(mut self, parameter_data: &[u8]) -> Self {
        self.parameter_data = heapless::Vec::from_slice(parameter_data).unwrap();
        self
    }

    pub fn message_length(mut self, message_length: u8) -> Self {
        self.message_length = Some(message_length);
        self
    }

    pub fn parameter_data_length(mut self, parameter_data_length: u8) -> Self {
        self.parameter_data_length = Some(parameter_data_length);
        self
    }

    pub fn build(&self) -> heapless::Vec<u8, RDM_MAX_PACKAGE_SIZE> {
        let parameter_data_length = self.parameter_data.len();

        let mut frame = heapless::Vec::<u8, RDM_MAX_PACKAGE_SIZE>::new();
        frame.push(self.start_code).unwrap();
        frame.push(SC_SUB_MESSAGE).unwrap();
        frame
            .push(
                self.message_length
                    .unwrap_or((RDM_HEADER_SIZE + parameter_data_length) as u8),
            )
            .unwrap();
        frame
            .extend_from_slice(&self.destination_uid.to_bytes())
            .unwrap();
        frame.extend_from_slice(&self.source_uid.to_bytes()).unwrap();
        frame.push(self.transaction_number).unwrap();
        // port id
        frame.push(1).unwrap();
        // message count
        frame.push(0).unwrap();
        frame
            .extend_from_slice(&self.sub_device.to_be_bytes())
            .unwrap();
        frame.push(self.command_class.into()).unwrap();
        frame
            .extend_from_slice(&self.parameter_id.to_be_bytes())
            .unwrap();
        frame
            .push(
                self.parameter_data_length
                    .unwrap_or(parameter_data_length as u8),
            )
            .unwrap();
        frame.extend_from_slice(&self.parameter_data).unwrap();

        let checksum = checksum::compute(&frame);
        frame.extend_from_slice(&checksum.to_be_bytes()).unwrap();

        frame
    }
}
