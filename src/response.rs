use crate::checksum;
use crate::consts::{RDM_CHECKSUM_SIZE, RDM_HEADER_SIZE, SC_RDM, SC_SUB_MESSAGE};
use crate::layouts::rdm_header_layout;
use crate::rdm_data::RdmResponseData;
use crate::rdm_driver::RdmTransport;

/// A serialized response, kept as header, parameter data and checksum so it can be
/// handed to the transport without copying the parameter data again.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ResponseFrame<'a> {
    header: [u8; RDM_HEADER_SIZE],
    parameter_data: &'a [u8],
    checksum: [u8; RDM_CHECKSUM_SIZE],
}

impl<'a> ResponseFrame<'a> {
    pub fn new(response: &'a RdmResponseData) -> Self {
        let parameter_data_length = response.parameter_data.len();

        let mut header = [0u8; RDM_HEADER_SIZE];
        let mut header_view = rdm_header_layout::View::new(&mut header);

        header_view.start_code_mut().write(SC_RDM);
        header_view.sub_start_code_mut().write(SC_SUB_MESSAGE);
        header_view
            .message_length_mut()
            .write((RDM_HEADER_SIZE + parameter_data_length) as u8);
        header_view
            .destination_uid_mut()
            .copy_from_slice(&response.destination_uid.to_bytes());
        header_view
            .source_uid_mut()
            .copy_from_slice(&response.source_uid.to_bytes());
        header_view
            .transaction_number_mut()
            .write(response.transaction_number);
        header_view
            .port_id_response_type_mut()
            .write(response.response_type as u8);
        header_view
            .message_count_mut()
            .write(response.message_count);
        header_view.sub_device_mut().write(response.sub_device);
        header_view
            .command_class_mut()
            .write(response.command_class.into());
        header_view.parameter_id_mut().write(response.parameter_id);
        header_view
            .parameter_data_length_mut()
            .write(parameter_data_length as u8);

        let checksum = checksum::compute_spans(&[&header[..], &response.parameter_data[..]]);

        Self {
            header,
            parameter_data: &response.parameter_data,
            checksum: checksum.to_be_bytes(),
        }
    }

    /// The frame in wire order.
    pub fn spans(&self) -> [&[u8]; 3] {
        [&self.header[..], self.parameter_data, &self.checksum[..]]
    }

    /// Total size of the frame including the checksum.
    pub fn frame_size(&self) -> usize {
        RDM_HEADER_SIZE + self.parameter_data.len() + RDM_CHECKSUM_SIZE
    }

    /// Sends the frame preceded by a break.
    pub fn send<T: RdmTransport>(&self, transport: &mut T) -> Result<(), T::DriverError> {
        transport.send(true, &self.spans())
    }
}
