//! Rust library implementing the responder side of DMX-RDM (ANSI E1.20) by using
//! interchangeable transports. This library features no-std as well as no-alloc support
//! (no heap allocation) to target embedded as well as os platforms.
//!
//! The responder validates received frames, takes part in discovery, answers a fixed set
//! of parameters and drives an identify and a mute indicator.
//!
//! Please refer to the [official specifications](https://tsp.esta.org/) published by the ESTA.
//!
//! <div class="warning">This library is wip, it has not yet received extensive testing and the api
//! might not be final.</div>
//!
//! # Usage
//!
//! ```rust
//! use dmx_rdm_responder::rdm_driver::{OutputPin, PeripheralPorts, RdmTransport};
//! use dmx_rdm_responder::rdm_responder::{DeviceMetadata, RdmResponder, RdmResponderConfig};
//! use dmx_rdm_responder::unique_identifier::UniqueIdentifier;
//!
//! struct PrintingTransport;
//!
//! impl RdmTransport for PrintingTransport {
//!     type DriverError = std::fmt::Error;
//!
//!     fn send(&mut self, include_break: bool, buffers: &[&[u8]]) -> Result<(), Self::DriverError> {
//!         println!("break: {include_break}, frame: {buffers:02x?}");
//!         Ok(())
//!     }
//! }
//!
//! struct Leds;
//!
//! impl PeripheralPorts for Leds {
//!     fn set_output(&mut self, pin: OutputPin) {
//!         println!("pin {pin:?} on");
//!     }
//!
//!     fn clear_output(&mut self, pin: OutputPin) {
//!         println!("pin {pin:?} off");
//!     }
//! }
//!
//! let mut responder = RdmResponder::new(
//!     RdmResponderConfig {
//!         uid: UniqueIdentifier::new(0x7FF0, 1).unwrap(),
//!         identify_pin: OutputPin::new(3, 0),
//!         mute_pin: OutputPin::new(3, 1),
//!         device_metadata: DeviceMetadata {
//!             manufacturer_label: "Example Manufacturer",
//!             ..Default::default()
//!         },
//!     },
//!     PrintingTransport,
//!     Leds,
//! );
//!
//! // A DISC_MUTE broadcast: acted upon, but never answered.
//! let frame = [
//!     0xcc, 0x01, 0x18, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f, 0xf0, 0x00, 0x00, 0x00, 0x02,
//!     0x00, 0x01, 0x00, 0x00, 0x00, 0x10, 0x00, 0x02, 0x00,
//! ];
//! let checksum = frame.iter().fold(0u16, |sum, byte| sum.wrapping_add(*byte as u16));
//!
//! let mut package = frame.to_vec();
//! package.extend_from_slice(&checksum.to_be_bytes());
//!
//! match responder.handle_frame(&package) {
//!     Ok(()) => println!("muted: {}", responder.is_muted()),
//!     Err(error) => println!("'{error}' while handling the frame"),
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// The additive checksum of rdm packages.
pub mod checksum;
pub mod command_class;
pub mod consts;
/// Module for the parameters the responder answers itself.
pub mod dispatch;
pub mod discovery;
mod layouts;
pub mod pids;
pub mod rdm_data;
/// Module for connecting the responder to the uart and the indicator outputs.
pub mod rdm_driver;
/// Module for building rdm responders.
pub mod rdm_responder;
pub mod rdm_types;
pub mod response;
pub mod state;
pub mod types;
pub mod unique_identifier;

#[cfg(test)]
mod test_utils;
