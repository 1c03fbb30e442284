/// Participation of a responder in discovery.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiscoveryState {
    /// Answers DISC_UNIQUE_BRANCH requests that contain its uid.
    #[default]
    Unmuted,
    /// Ignores DISC_UNIQUE_BRANCH requests until unmuted.
    Muted,
}

/// The mutable state of a responder. Lives as long as the responder and is only
/// changed while handling a request.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResponderState {
    pub discovery_state: DiscoveryState,
    pub identify: bool,
}

impl ResponderState {
    pub fn is_muted(&self) -> bool {
        self.discovery_state == DiscoveryState::Muted
    }
}
