/// Offset between a request command class and its response command class.
pub const RESPONSE_CLASS_OFFSET: u8 = 0x01;

/// The command class field of an rdm package.
///
/// Unknown values are kept so they can still be answered with a nack.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandClass {
    DiscoveryCommand,
    DiscoveryCommandResponse,
    GetCommand,
    GetCommandResponse,
    SetCommand,
    SetCommandResponse,
    Unknown(u8),
}

impl CommandClass {
    /// Returns the command class a responder uses to answer this one.
    pub fn response_class(&self) -> CommandClass {
        u8::from(*self).wrapping_add(RESPONSE_CLASS_OFFSET).into()
    }

    /// True for the classes sent by responders.
    pub fn is_response(&self) -> bool {
        matches!(
            self,
            Self::DiscoveryCommandResponse | Self::GetCommandResponse | Self::SetCommandResponse
        )
    }
}

impl From<u8> for CommandClass {
    fn from(value: u8) -> Self {
        match value {
            0x10 => Self::DiscoveryCommand,
            0x11 => Self::DiscoveryCommandResponse,
            0x20 => Self::GetCommand,
            0x21 => Self::GetCommandResponse,
            0x30 => Self::SetCommand,
            0x31 => Self::SetCommandResponse,
            _ => Self::Unknown(value),
        }
    }
}

impl From<CommandClass> for u8 {
    fn from(value: CommandClass) -> Self {
        match value {
            CommandClass::DiscoveryCommand => 0x10,
            CommandClass::DiscoveryCommandResponse => 0x11,
            CommandClass::GetCommand => 0x20,
            CommandClass::GetCommandResponse => 0x21,
            CommandClass::SetCommand => 0x30,
            CommandClass::SetCommandResponse => 0x31,
            CommandClass::Unknown(value) => value,
        }
    }
}
