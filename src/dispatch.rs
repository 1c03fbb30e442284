//! The static table that maps parameter ids to the GET and SET handlers of the responder.

use crate::command_class::CommandClass;
use crate::consts::{RDM_MAX_LABEL_LENGTH, RDM_MAX_SUPPORTED_PARAMETERS, ROOT_DEVICE};
use crate::pids;
use crate::rdm_data::RdmRequest;
use crate::rdm_driver::PeripheralPorts;
use crate::rdm_responder::RdmResponderConfig;
use crate::rdm_types::DeviceInfo;
use crate::state::ResponderState;
use crate::types::{DataPack, NackReason};
use log::{debug, trace};

/// The result of handling a request, before it is turned into a response.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RdmResult {
    /// The request was acknowledged. The [DataPack] contains the response data.
    Acknowledged(DataPack),
    /// The request was not acknowledged.
    NotAcknowledged(NackReason),
    /// The responder does not respond with anything.
    NoResponse,
}

impl From<Result<DataPack, NackReason>> for RdmResult {
    fn from(value: Result<DataPack, NackReason>) -> Self {
        match value {
            Ok(parameter_data) => Self::Acknowledged(parameter_data),
            Err(nack_reason) => Self::NotAcknowledged(nack_reason),
        }
    }
}

/// Everything a handler may read or change.
pub struct ParameterContext<'a, P: PeripheralPorts> {
    pub config: &'a RdmResponderConfig,
    pub state: &'a mut ResponderState,
    pub ports: &'a mut P,
}

/// Identifies the function that handles one command class of one parameter.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParameterHandler {
    GetSupportedParameters,
    GetDeviceInfo,
    GetDeviceModelDescription,
    GetManufacturerLabel,
    GetSoftwareVersionLabel,
    GetIdentifyDevice,
    SetIdentifyDevice,
}

/// One parameter supported by the responder.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ParameterEntry {
    pub parameter_id: u16,
    pub get_handler: Option<ParameterHandler>,
    pub set_handler: Option<ParameterHandler>,
}

impl ParameterEntry {
    const fn get_only(parameter_id: u16, handler: ParameterHandler) -> Self {
        Self {
            parameter_id,
            get_handler: Some(handler),
            set_handler: None,
        }
    }

    pub fn supports_get(&self) -> bool {
        self.get_handler.is_some()
    }

    pub fn supports_set(&self) -> bool {
        self.set_handler.is_some()
    }

    /// The handler for `command_class`, if the parameter supports it.
    pub fn handler(&self, command_class: CommandClass) -> Option<ParameterHandler> {
        match command_class {
            CommandClass::GetCommand => self.get_handler,
            CommandClass::SetCommand => self.set_handler,
            _ => None,
        }
    }
}

/// Every GET/SET parameter of the responder. It is the only source for
/// SUPPORTED_PARAMETERS responses and unknown pid nacks.
pub static PARAMETER_TABLE: [ParameterEntry; 6] = [
    ParameterEntry::get_only(
        pids::SUPPORTED_PARAMETERS,
        ParameterHandler::GetSupportedParameters,
    ),
    ParameterEntry::get_only(pids::DEVICE_INFO, ParameterHandler::GetDeviceInfo),
    ParameterEntry::get_only(
        pids::DEVICE_MODEL_DESCRIPTION,
        ParameterHandler::GetDeviceModelDescription,
    ),
    ParameterEntry::get_only(
        pids::MANUFACTURER_LABEL,
        ParameterHandler::GetManufacturerLabel,
    ),
    ParameterEntry::get_only(
        pids::SOFTWARE_VERSION_LABEL,
        ParameterHandler::GetSoftwareVersionLabel,
    ),
    ParameterEntry {
        parameter_id: pids::IDENTIFY_DEVICE,
        get_handler: Some(ParameterHandler::GetIdentifyDevice),
        set_handler: Some(ParameterHandler::SetIdentifyDevice),
    },
];

pub fn find_parameter(parameter_id: u16) -> Option<&'static ParameterEntry> {
    PARAMETER_TABLE
        .iter()
        .find(|entry| entry.parameter_id == parameter_id)
}

/// Handles a request that isn't part of the discovery process.
///
/// The caller is responsible for checking that the request is addressed to this responder.
pub fn dispatch<P: PeripheralPorts>(
    request: &RdmRequest,
    context: &mut ParameterContext<P>,
) -> RdmResult {
    if request.sub_device != ROOT_DEVICE {
        trace!("sub device {} is out of range", request.sub_device);
        return RdmResult::NotAcknowledged(NackReason::SubDeviceOutOfRange);
    }

    let handler = match find_parameter(request.parameter_id)
        .and_then(|entry| entry.handler(request.command_class))
    {
        Some(handler) => handler,
        None => {
            trace!(
                "pid {:#06X} not supported for {:?}",
                request.parameter_id,
                request.command_class
            );
            return RdmResult::NotAcknowledged(NackReason::UnknownPid);
        },
    };

    // none of the supported GET parameters take parameter data
    if request.command_class == CommandClass::GetCommand && !request.parameter_data.is_empty() {
        return RdmResult::NotAcknowledged(NackReason::FormatError);
    }

    trace!("dispatching pid {:#06X} to {:?}", request.parameter_id, handler);

    match handler {
        ParameterHandler::GetSupportedParameters => get_supported_parameters(),
        ParameterHandler::GetDeviceInfo => get_device_info(context),
        ParameterHandler::GetDeviceModelDescription => {
            get_label(context.config.device_metadata.device_model_description)
        },
        ParameterHandler::GetManufacturerLabel => {
            get_label(context.config.device_metadata.manufacturer_label)
        },
        ParameterHandler::GetSoftwareVersionLabel => {
            get_label(context.config.device_metadata.software_version_label)
        },
        ParameterHandler::GetIdentifyDevice => get_identify_device(context),
        ParameterHandler::SetIdentifyDevice => set_identify_device(request, context),
    }
    .into()
}

fn get_supported_parameters() -> Result<DataPack, NackReason> {
    let mut supported_pids = heapless::Vec::<u16, RDM_MAX_SUPPORTED_PARAMETERS>::new();

    for entry in PARAMETER_TABLE
        .iter()
        .filter(|entry| !pids::MANDATORY_PIDS.contains(&entry.parameter_id))
    {
        supported_pids
            .push(entry.parameter_id)
            .map_err(|_| NackReason::PacketSizeUnsupported)?;
    }

    supported_pids.sort_unstable();

    let mut parameter_data = DataPack::new();
    for parameter_id in supported_pids {
        parameter_data
            .extend_from_slice(&parameter_id.to_be_bytes())
            .map_err(|_| NackReason::PacketSizeUnsupported)?;
    }

    Ok(parameter_data)
}

fn get_device_info<P: PeripheralPorts>(
    context: &ParameterContext<P>,
) -> Result<DataPack, NackReason> {
    let metadata = &context.config.device_metadata;

    let device_info = DeviceInfo {
        device_model_id: metadata.device_model_id,
        product_category: metadata.product_category,
        software_version: metadata.software_version_id,
        dmx_footprint: metadata.dmx_footprint,
        current_personality: metadata.current_personality,
        personality_count: metadata.personality_count,
        dmx_start_address: metadata.dmx_start_address,
        sub_device_count: 0,
        sensor_count: 0,
    };

    DataPack::from_slice(&device_info.serialize()).map_err(|_| NackReason::PacketSizeUnsupported)
}

/// Labels are sent without a terminator and cut to 32 bytes.
fn get_label(label: &str) -> Result<DataPack, NackReason> {
    let label = label.as_bytes();

    DataPack::from_slice(&label[..label.len().min(RDM_MAX_LABEL_LENGTH)])
        .map_err(|_| NackReason::PacketSizeUnsupported)
}

fn get_identify_device<P: PeripheralPorts>(
    context: &ParameterContext<P>,
) -> Result<DataPack, NackReason> {
    DataPack::from_slice(&[context.state.identify as u8])
        .map_err(|_| NackReason::PacketSizeUnsupported)
}

fn set_identify_device<P: PeripheralPorts>(
    request: &RdmRequest,
    context: &mut ParameterContext<P>,
) -> Result<DataPack, NackReason> {
    let identify = match request.parameter_data {
        [identify] => *identify != 0,
        _ => return Err(NackReason::FormatError),
    };

    context.state.identify = identify;

    let identify_pin = context.config.identify_pin;
    if identify {
        context.ports.set_output(identify_pin);
    } else {
        context.ports.clear_output(identify_pin);
    }

    debug!("identify is now {}", identify);

    Ok(DataPack::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_config, MockPorts, PortCall, RequestBuilder, OUR_UID};
    use crate::unique_identifier::PackageAddress;
    use rstest::rstest;

    fn dispatch_frame(frame: &[u8], state: &mut ResponderState, ports: &mut MockPorts) -> RdmResult {
        let config = test_config();
        let request = RdmRequest::deserialize(frame).unwrap();

        dispatch(
            &request,
            &mut ParameterContext {
                config: &config,
                state,
                ports,
            },
        )
    }

    #[test]
    fn test_table_is_sorted_and_unique() {
        assert!(PARAMETER_TABLE
            .windows(2)
            .all(|pair| pair[0].parameter_id < pair[1].parameter_id));
    }

    #[test]
    fn test_only_identify_supports_set() {
        for entry in PARAMETER_TABLE.iter() {
            assert!(entry.supports_get());
            assert_eq!(
                entry.supports_set(),
                entry.parameter_id == pids::IDENTIFY_DEVICE
            );
        }
    }

    #[test]
    fn test_supported_parameters_excludes_mandatory_pids() {
        assert_eq!(
            get_supported_parameters().unwrap().as_slice(),
            &[0x00, 0x80, 0x00, 0x81]
        );
    }

    #[rstest]
    #[case(CommandClass::GetCommand, 0x1fff)]
    #[case(CommandClass::SetCommand, pids::DEVICE_INFO)]
    #[case(CommandClass::DiscoveryCommand, pids::DEVICE_INFO)]
    #[case(CommandClass::Unknown(0x40), pids::IDENTIFY_DEVICE)]
    #[case(CommandClass::GetCommand, pids::DISC_MUTE)]
    fn test_unknown_pid(#[case] command_class: CommandClass, #[case] parameter_id: u16) {
        let frame = RequestBuilder::get(PackageAddress::Device(OUR_UID), parameter_id)
            .command_class(command_class)
            .build();

        assert_eq!(
            dispatch_frame(&frame, &mut ResponderState::default(), &mut MockPorts::default()),
            RdmResult::NotAcknowledged(NackReason::UnknownPid)
        );
    }

    #[test]
    fn test_sub_device_checked_before_pid() {
        let frame = RequestBuilder::get(PackageAddress::Device(OUR_UID), 0x1fff)
            .sub_device(1)
            .build();

        assert_eq!(
            dispatch_frame(&frame, &mut ResponderState::default(), &mut MockPorts::default()),
            RdmResult::NotAcknowledged(NackReason::SubDeviceOutOfRange)
        );
    }

    #[test]
    fn test_get_with_parameter_data() {
        let frame = RequestBuilder::get(PackageAddress::Device(OUR_UID), pids::DEVICE_INFO)
            .parameter_data(&[0])
            .build();

        assert_eq!(
            dispatch_frame(&frame, &mut ResponderState::default(), &mut MockPorts::default()),
            RdmResult::NotAcknowledged(NackReason::FormatError)
        );
    }

    #[rstest]
    #[case(&[])]
    #[case(&[1, 0])]
    fn test_set_identify_wrong_size(#[case] parameter_data: &[u8]) {
        let frame = RequestBuilder::set(PackageAddress::Device(OUR_UID), pids::IDENTIFY_DEVICE)
            .parameter_data(parameter_data)
            .build();
        let mut state = ResponderState::default();
        let mut ports = MockPorts::default();

        assert_eq!(
            dispatch_frame(&frame, &mut state, &mut ports),
            RdmResult::NotAcknowledged(NackReason::FormatError)
        );
        assert!(!state.identify);
        assert!(ports.calls.is_empty());
    }

    #[test]
    fn test_set_identify_drives_pin() {
        let config = test_config();
        let mut state = ResponderState::default();
        let mut ports = MockPorts::default();

        let frame = RequestBuilder::set(PackageAddress::Device(OUR_UID), pids::IDENTIFY_DEVICE)
            .parameter_data(&[3])
            .build();
        assert_eq!(
            dispatch_frame(&frame, &mut state, &mut ports),
            RdmResult::Acknowledged(DataPack::new())
        );
        assert!(state.identify);

        let frame = RequestBuilder::get(PackageAddress::Device(OUR_UID), pids::IDENTIFY_DEVICE)
            .build();
        assert_eq!(
            dispatch_frame(&frame, &mut state, &mut ports),
            RdmResult::Acknowledged(DataPack::from_slice(&[1]).unwrap())
        );

        let frame = RequestBuilder::set(PackageAddress::Device(OUR_UID), pids::IDENTIFY_DEVICE)
            .parameter_data(&[0])
            .build();
        dispatch_frame(&frame, &mut state, &mut ports);
        assert!(!state.identify);

        assert_eq!(
            ports.calls.as_slice(),
            &[
                PortCall::Set(config.identify_pin),
                PortCall::Clear(config.identify_pin)
            ]
        );
    }

    #[test]
    fn test_label_is_truncated() {
        assert_eq!(
            get_label("a label that is much longer than thirty two bytes")
                .unwrap()
                .len(),
            RDM_MAX_LABEL_LENGTH
        );
    }
}
