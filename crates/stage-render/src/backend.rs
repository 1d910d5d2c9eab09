use stage_command::Command;

use crate::RenderError;

/// Something a command stream can be applied to. The runtime (`stage-terminal`)
/// holds a registered list of these and forwards every command stream to each
/// in turn, in registration order.
pub trait Backend {
    fn apply(&mut self, commands: &[Command]) -> Result<(), RenderError>;

    /// Drains any buffered output unconditionally. The default no-ops for
    /// backends (like the event backend) that never buffer.
    fn flush(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}
