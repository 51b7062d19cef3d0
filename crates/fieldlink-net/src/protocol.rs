//! Protocol capability contract for higher-level packet layers.

use crate::socket::SocketConfig;

/// Capability set a concrete driver-station protocol must supply.
///
/// One implementation exists per protocol revision and is selected at
/// configuration time. The socket core never calls these methods itself;
/// they are the seam between the transport layer (which moves opaque byte
/// buffers) and the wire formats of the three peers. Packet producers are
/// called once per control cycle by an external scheduler; packet consumers
/// are handed whatever a [`LinkSocket::recv`] returned.
///
/// [`LinkSocket::recv`]: crate::socket::LinkSocket::recv
pub trait Protocol: Send {
    /// Human-readable protocol name.
    fn name(&self) -> &str;

    /// Address of the field-management system.
    fn fms_address(&self) -> String;
    /// Address of the radio/bridge.
    fn radio_address(&self) -> String;
    /// Address of the robot controller.
    fn robot_address(&self) -> String;

    /// Socket configuration for the FMS channel.
    fn fms_socket(&self) -> SocketConfig;
    /// Socket configuration for the radio channel.
    fn radio_socket(&self) -> SocketConfig;
    /// Socket configuration for the robot channel.
    fn robot_socket(&self) -> SocketConfig;
    /// Socket configuration for the netconsole channel.
    ///
    /// Defaults to a disabled socket for protocols without a netconsole.
    fn netconsole_socket(&self) -> SocketConfig {
        SocketConfig::default().disabled(true)
    }

    /// Produce the next control packet for the FMS.
    fn create_fms_packet(&mut self) -> Vec<u8>;
    /// Produce the next control packet for the radio.
    fn create_radio_packet(&mut self) -> Vec<u8>;
    /// Produce the next control packet for the robot.
    fn create_robot_packet(&mut self) -> Vec<u8>;

    /// Interpret a packet received from the FMS.
    ///
    /// Returns `true` when the payload was understood.
    fn read_fms_packet(&mut self, data: &[u8]) -> bool;
    /// Interpret a packet received from the radio.
    fn read_radio_packet(&mut self, data: &[u8]) -> bool;
    /// Interpret a packet received from the robot.
    fn read_robot_packet(&mut self, data: &[u8]) -> bool;

    /// Reset internal FMS link state after a communication loss.
    fn reset_fms(&mut self);
    /// Reset internal radio link state after a communication loss.
    fn reset_radio(&mut self);
    /// Reset internal robot link state after a communication loss.
    fn reset_robot(&mut self);

    /// Ask the robot controller to reboot.
    fn reboot_robot(&mut self);
    /// Ask the robot controller to restart the user code.
    fn restart_robot_code(&mut self);
}
