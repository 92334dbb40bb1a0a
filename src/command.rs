use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use crate::mode::LightMode;

/// Commands that can be sent to the lights engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Recreate the given number of bulbs in the initial state
    Initialize(usize),
    /// Start (or resume) the animation
    Start,
    /// Stop the animation, keeping the bulbs
    Stop,
    /// Switch the glow rule
    SetMode(LightMode),
    /// Stop and drop all bulbs
    Teardown,
}

const COMMAND_CHANNEL_SIZE: usize = 4;

/// Type alias for command sender
pub type CommandSender = Sender<'static, CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE>;

/// Type alias for command receiver
pub type CommandReceiver =
    Receiver<'static, CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE>;

/// Type alias for the command channel
pub type CommandChannel = Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE>;
