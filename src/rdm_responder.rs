use crate::command_class::CommandClass;
use crate::discovery::{handle_disc_mute, handle_disc_unique_branch, DiscoveryResponseFrame};
use crate::dispatch::{dispatch, ParameterContext, RdmResult};
use crate::pids;
use crate::rdm_data::{RdmParseError, RdmRequest, RdmResponseData};
use crate::rdm_driver::{OutputPin, PeripheralPorts, RdmTransport};
use crate::response::ResponseFrame;
use crate::state::ResponderState;
use crate::types::ResponseType;
use crate::unique_identifier::UniqueIdentifier;
use log::{debug, trace};

/// Static description of the device reported through DEVICE_INFO and the label parameters.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DeviceMetadata {
    pub device_model_id: u16,
    pub product_category: u16,
    pub software_version_id: u32,
    pub dmx_footprint: u16,
    pub current_personality: u8,
    pub personality_count: u8,
    /// [None] if the device doesn't occupy any dmx slots.
    pub dmx_start_address: Option<u16>,
    /// Labels longer than 32 bytes get truncated.
    pub device_model_description: &'static str,
    pub manufacturer_label: &'static str,
    pub software_version_label: &'static str,
}

impl Default for DeviceMetadata {
    fn default() -> Self {
        Self {
            device_model_id: 0,
            product_category: 0,
            software_version_id: 0,
            dmx_footprint: 0,
            current_personality: 0,
            personality_count: 0,
            dmx_start_address: None,
            device_model_description: "dmx-rdm-responder device",
            manufacturer_label: "",
            software_version_label: "dmx-rdm-responder",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RdmResponderConfig {
    /// The unique id that is used as a source id in the packages.
    pub uid: UniqueIdentifier,
    /// Driven high while the device identifies itself.
    pub identify_pin: OutputPin,
    /// Driven high while the device takes part in discovery.
    pub mute_pin: OutputPin,
    pub device_metadata: DeviceMetadata,
}

/// What the responder puts on the bus for a single request.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RdmAnswer {
    /// Has to be sent with an uart break
    Response(RdmResponseData),
    /// Has to be sent without an uart break
    DiscoveryResponse(DiscoveryResponseFrame),
    /// No response to send
    NoResponse,
}

/// Errors that can happen while handling a received frame. These errors should not cause panics.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RdmResponderError<DriverError> {
    /// The frame was dropped without a response.
    ParseError(RdmParseError),
    /// A driver specific error occurred.
    DriverError(DriverError),
}

impl<DriverError> From<RdmParseError> for RdmResponderError<DriverError> {
    fn from(value: RdmParseError) -> Self {
        Self::ParseError(value)
    }
}

impl<DriverError: core::fmt::Display> core::fmt::Display for RdmResponderError<DriverError> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RdmResponderError::ParseError(error) => write!(f, "dropped frame: {}", error),
            RdmResponderError::DriverError(error) => core::fmt::Display::fmt(error, f),
        }
    }
}

#[cfg(feature = "std")]
impl<DriverError: core::fmt::Display + core::fmt::Debug> std::error::Error
    for RdmResponderError<DriverError>
{
}

/// The structure to build an RDM responder.
///
/// Every received frame is handled to completion before the next one is accepted.
pub struct RdmResponder<T: RdmTransport, P: PeripheralPorts> {
    config: RdmResponderConfig,
    state: ResponderState,
    transport: T,
    ports: P,
}

impl<T: RdmTransport, P: PeripheralPorts> RdmResponder<T, P> {
    /// Creates a new [RdmResponder] and drives the indicators to their initial levels.
    pub fn new(config: RdmResponderConfig, transport: T, ports: P) -> Self {
        let mut responder = Self {
            config,
            state: ResponderState::default(),
            transport,
            ports,
        };
        responder.reset();

        responder
    }

    /// Unmutes the responder and stops identifying.
    pub fn reset(&mut self) {
        self.state = ResponderState::default();
        self.ports.set_output(self.config.mute_pin);
        self.ports.clear_output(self.config.identify_pin);

        debug!("responder {} reset", self.config.uid);
    }

    /// Replaces the configuration and resets the state.
    pub fn reinitialize(&mut self, config: RdmResponderConfig) {
        self.config = config;
        self.reset();
    }

    pub fn get_uid(&self) -> UniqueIdentifier {
        self.config.uid
    }

    pub fn get_config(&self) -> &RdmResponderConfig {
        &self.config
    }

    /// True if the responder ignores DISC_UNIQUE_BRANCH requests.
    pub fn is_muted(&self) -> bool {
        self.state.is_muted()
    }

    pub fn is_identifying(&self) -> bool {
        self.state.identify
    }

    pub fn get_transport(&self) -> &T {
        &self.transport
    }

    pub fn get_transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn get_ports(&self) -> &P {
        &self.ports
    }

    /// Consumes the responder and returns the transport and the ports.
    pub fn release(self) -> (T, P) {
        (self.transport, self.ports)
    }

    /// Handles one complete frame, starting with the start code and ending with the checksum,
    /// and sends the answer if there is one.
    ///
    /// Malformed frames are dropped and reported as [RdmResponderError::ParseError].
    pub fn handle_frame(&mut self, frame: &[u8]) -> Result<(), RdmResponderError<T::DriverError>> {
        let request = RdmRequest::deserialize(frame).map_err(|error| {
            debug!("dropping frame: {}", error);
            error
        })?;

        let answer = self.handle_request(&request);
        self.send_answer(&answer)
            .map_err(RdmResponderError::DriverError)
    }

    /// Decides on the answer to an already parsed request. Nothing is sent.
    pub fn handle_request(&mut self, request: &RdmRequest) -> RdmAnswer {
        let addressing = request.destination_uid.classify(self.config.uid);
        if !addressing.requires_action() {
            return RdmAnswer::NoResponse;
        }

        if request.command_class.is_response() {
            trace!("ignoring {:?} from {}", request.command_class, request.source_uid);
            return RdmAnswer::NoResponse;
        }

        let mut context = ParameterContext {
            config: &self.config,
            state: &mut self.state,
            ports: &mut self.ports,
        };

        let result = if request.command_class == CommandClass::DiscoveryCommand {
            match request.parameter_id {
                pids::DISC_UNIQUE_BRANCH => {
                    return match handle_disc_unique_branch(request, self.config.uid, context.state)
                    {
                        Some(frame) => RdmAnswer::DiscoveryResponse(frame),
                        None => RdmAnswer::NoResponse,
                    };
                },
                pids::DISC_MUTE => handle_disc_mute(request, true, &mut context),
                pids::DISC_UN_MUTE => handle_disc_mute(request, false, &mut context),
                _ => {
                    trace!("ignoring discovery pid {:#06X}", request.parameter_id);
                    RdmResult::NoResponse
                },
            }
        } else {
            dispatch(request, &mut context)
        };

        let response = match result {
            RdmResult::Acknowledged(parameter_data) => {
                request.build_response(ResponseType::ResponseTypeAck, parameter_data)
            },
            RdmResult::NotAcknowledged(nack_reason) => request.build_response(
                ResponseType::ResponseTypeNackReason,
                nack_reason.serialize(),
            ),
            RdmResult::NoResponse => return RdmAnswer::NoResponse,
        };

        // broadcasts and vendorcasts are never answered
        match response {
            Ok(response) if addressing.allows_response() => RdmAnswer::Response(response),
            _ => RdmAnswer::NoResponse,
        }
    }

    /// Hands an answer to the transport.
    pub fn send_answer(&mut self, answer: &RdmAnswer) -> Result<(), T::DriverError> {
        match answer {
            RdmAnswer::Response(response) => ResponseFrame::new(response).send(&mut self.transport),
            RdmAnswer::DiscoveryResponse(frame) => self.transport.send(false, &[&frame[..]]),
            RdmAnswer::NoResponse => Ok(()),
        }
    }
}
