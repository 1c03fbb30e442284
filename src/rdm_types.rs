use crate::consts::{RDM_DEVICE_INFO_SIZE, RDM_PROTOCOL_VERSION};
use crate::layouts::rdm_device_info_layout;
use crate::types::DataPack;
use crate::unique_identifier::UniqueIdentifier;
use modular_bitfield::bitfield;
use modular_bitfield::prelude::B12;

/// Written into DEVICE_INFO when the device doesn't occupy any dmx slots.
pub const NO_DMX_START_ADDRESS: u16 = 0xFFFF;

/// Response to discovery mute/unmute requests.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct DiscoveryMuteResponse {
    /// The responder is a proxy device.
    pub managed_proxy: bool,
    /// The responder supports sub devices.
    pub sub_device: bool,
    /// The responder is not operational before receiving a firmware update.
    pub boot_loader: bool,
    /// A proxy device has responded on behalf of another device.
    pub proxy_device: bool,
    /// Included if the responding device contains multiple responder ports.
    /// It is the UID of the primary port of the device.
    pub binding_uid: Option<UniqueIdentifier>,
}

/// Bit 0 is the least significant bit of the big endian control field.
#[bitfield]
struct DiscControlField {
    managed_proxy: bool,
    sub_device: bool,
    boot_loader: bool,
    proxy_device: bool,
    #[skip]
    reserved: B12,
}

impl DiscoveryMuteResponse {
    /// Control field followed by the optional binding uid; at most 8 bytes.
    pub fn serialize(&self) -> DataPack {
        let control_field = DiscControlField::new()
            .with_managed_proxy(self.managed_proxy)
            .with_sub_device(self.sub_device)
            .with_boot_loader(self.boot_loader)
            .with_proxy_device(self.proxy_device);
        // modular_bitfield packs little endian, rdm is big endian
        let control_field = u16::from_le_bytes(control_field.into_bytes());

        let mut buffer = [0u8; 8];
        buffer[..2].copy_from_slice(&control_field.to_be_bytes());

        let length = match self.binding_uid {
            None => 2,
            Some(uid) => {
                buffer[2..].copy_from_slice(&uid.to_bytes());
                8
            },
        };

        buffer[..length].iter().copied().collect()
    }
}

/// The DEVICE_INFO parameter data.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DeviceInfo {
    pub device_model_id: u16,
    pub product_category: u16,
    pub software_version: u32,
    pub dmx_footprint: u16,
    pub current_personality: u8,
    pub personality_count: u8,
    /// [None] if the device has a dmx footprint of 0.
    pub dmx_start_address: Option<u16>,
    pub sub_device_count: u16,
    pub sensor_count: u8,
}

impl DeviceInfo {
    pub fn serialize(&self) -> [u8; RDM_DEVICE_INFO_SIZE] {
        let mut resp_buffer = [0u8; RDM_DEVICE_INFO_SIZE];
        let mut device_info_view = rdm_device_info_layout::View::new(&mut resp_buffer);

        device_info_view
            .protocol_version_mut()
            .write(RDM_PROTOCOL_VERSION);
        device_info_view
            .device_model_id_mut()
            .write(self.device_model_id);
        device_info_view
            .product_category_mut()
            .write(self.product_category);
        device_info_view
            .software_version_id_mut()
            .write(self.software_version);
        device_info_view
            .dmx_footprint_mut()
            .write(self.dmx_footprint);
        device_info_view
            .current_personality_mut()
            .write(self.current_personality);
        device_info_view
            .personality_count_mut()
            .write(self.personality_count);
        device_info_view
            .dmx_start_address_mut()
            .write(self.dmx_start_address.unwrap_or(NO_DMX_START_ADDRESS));
        device_info_view
            .sub_device_count_mut()
            .write(self.sub_device_count);
        device_info_view.sensor_count_mut().write(self.sensor_count);

        resp_buffer
    }
}
