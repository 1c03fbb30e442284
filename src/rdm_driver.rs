/// Object to implement access to the uart.
/// It has to communicate at 250000 baud.
///
/// Partial frame reassembly, break/mark-after-break timing and inter-slot gaps
/// are the responsibility of the implementation.
pub trait RdmTransport {
    type DriverError;

    /// Write one frame composed of `buffers` in order.
    ///
    /// If `include_break` is true the frame has to be preceded by a break,
    /// discovery responses are sent without one.
    fn send(&mut self, include_break: bool, buffers: &[&[u8]])
        -> Result<(), Self::DriverError>;
}

/// A logical output assigned to an indicator of the responder.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputPin {
    /// The port channel the pin belongs to.
    pub channel: u8,
    /// The bit position of the pin inside the channel.
    pub bit: u8,
}

impl OutputPin {
    pub const fn new(channel: u8, bit: u8) -> Self {
        Self { channel, bit }
    }
}

/// Access to the peripheral ports driving the identify and mute indicators.
pub trait PeripheralPorts {
    fn set_output(&mut self, pin: OutputPin);

    fn clear_output(&mut self, pin: OutputPin);
}
