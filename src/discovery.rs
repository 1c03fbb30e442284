//! DISC_UNIQUE_BRANCH, DISC_MUTE and DISC_UN_MUTE handling.
//!
//! A discovery response has no header and no break. Several responders may answer the
//! same DISC_UNIQUE_BRANCH request at once, so every byte is sent twice with alternating
//! bits forced high. A controller detects collisions by checking the forced bits.

use crate::checksum;
use crate::consts::{
    DISC_ENCODE_MASK_HIGH, DISC_ENCODE_MASK_LOW, PREAMBLE_BYTE, RDM_DISC_UNIQUE_BRANCH_DATA_SIZE,
    RDM_MAX_DISCOVERY_RESPONSE_SIZE, RDM_PREAMBLE_SIZE, SEPARATOR_BYTE, UID_SIZE,
};
use crate::dispatch::{ParameterContext, RdmResult};
use crate::layouts::rdm_disc_unique_branch_layout;
use crate::rdm_data::RdmRequest;
use crate::rdm_driver::PeripheralPorts;
use crate::rdm_types::DiscoveryMuteResponse;
use crate::state::{DiscoveryState, ResponderState};
use crate::unique_identifier::{PackageAddress, UniqueIdentifier};
use log::{debug, trace};

/// 7 bytes preamble, 1 byte separator, 12 bytes encoded uid, 4 bytes encoded checksum.
pub type DiscoveryResponseFrame = [u8; RDM_MAX_DISCOVERY_RESPONSE_SIZE];

const ENCODED_UID_START: usize = RDM_PREAMBLE_SIZE + 1;
const ENCODED_CHECKSUM_START: usize = ENCODED_UID_START + 2 * UID_SIZE;

/// Encode `src` into `dest`. The destination has to be twice the source size.
fn encode_disc_unique(src: &[u8], dest: &mut [u8]) {
    for (byte, chunk) in src.iter().zip(dest.chunks_exact_mut(2)) {
        chunk[0] = byte | DISC_ENCODE_MASK_HIGH;
        chunk[1] = byte | DISC_ENCODE_MASK_LOW;
    }
}

/// Builds the collision tolerant answer to a DISC_UNIQUE_BRANCH request.
///
/// The checksum covers the encoded uid bytes and is encoded the same way.
pub fn encode_discovery_response(uid: UniqueIdentifier) -> DiscoveryResponseFrame {
    let mut frame_buffer = [PREAMBLE_BYTE; RDM_MAX_DISCOVERY_RESPONSE_SIZE];
    frame_buffer[RDM_PREAMBLE_SIZE] = SEPARATOR_BYTE;

    encode_disc_unique(
        &uid.to_bytes(),
        &mut frame_buffer[ENCODED_UID_START..ENCODED_CHECKSUM_START],
    );

    let checksum = checksum::compute(&frame_buffer[ENCODED_UID_START..ENCODED_CHECKSUM_START]);
    encode_disc_unique(
        &checksum.to_be_bytes(),
        &mut frame_buffer[ENCODED_CHECKSUM_START..],
    );

    frame_buffer
}

/// Answers with the discovery response if the responder is unmuted and its uid lies
/// within the inclusive bounds carried in the parameter data.
pub fn handle_disc_unique_branch(
    request: &RdmRequest,
    uid: UniqueIdentifier,
    state: &ResponderState,
) -> Option<DiscoveryResponseFrame> {
    if state.is_muted() {
        trace!("ignoring DISC_UNIQUE_BRANCH while muted");
        return None;
    }

    if request.parameter_data.len() != RDM_DISC_UNIQUE_BRANCH_DATA_SIZE {
        return None;
    }

    let bounds_view = rdm_disc_unique_branch_layout::View::new(request.parameter_data);
    let lower_bound: u64 = PackageAddress::from_bytes(bounds_view.lower_bound_uid()).into();
    let upper_bound: u64 = PackageAddress::from_bytes(bounds_view.upper_bound_uid()).into();

    if !(lower_bound..=upper_bound).contains(&u64::from(uid)) {
        return None;
    }

    Some(encode_discovery_response(uid))
}

/// Handles DISC_MUTE (`muted == true`) and DISC_UN_MUTE.
///
/// The mute indicator is cleared while muted and set while unmuted.
pub fn handle_disc_mute<P: PeripheralPorts>(
    request: &RdmRequest,
    muted: bool,
    context: &mut ParameterContext<P>,
) -> RdmResult {
    if !request.parameter_data.is_empty() {
        return RdmResult::NoResponse;
    }

    let mute_pin = context.config.mute_pin;
    if muted {
        context.state.discovery_state = DiscoveryState::Muted;
        context.ports.clear_output(mute_pin);
    } else {
        context.state.discovery_state = DiscoveryState::Unmuted;
        context.ports.set_output(mute_pin);
    }

    debug!("discovery state is now {:?}", context.state.discovery_state);

    RdmResult::Acknowledged(DiscoveryMuteResponse::default().serialize())
}
