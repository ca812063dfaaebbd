use emul8080_cpu::IoBus;

use crate::shift_register::ShiftRegister;

/// Value read from `IN 0`. Unused by the game but wired on the board.
pub const IN_PORT0_VALUE: u8 = 0x0e;

// Bit positions for input port 1 (IN 1).
const IN1_BIT_COIN: u8 = 0;
const IN1_BIT_P2_START: u8 = 1;
const IN1_BIT_P1_START: u8 = 2;
const IN1_BIT_ALWAYS_ONE: u8 = 3;
const IN1_BIT_P1_FIRE: u8 = 4;
const IN1_BIT_P1_LEFT: u8 = 5;
const IN1_BIT_P1_RIGHT: u8 = 6;

// Bit positions for input port 2 (IN 2). Bits 0-1, 3 and 7 are DIP switches.
const IN2_BIT_TILT: u8 = 2;
const IN2_BIT_EXTRA_SHIP: u8 = 3;
const IN2_BIT_P2_FIRE: u8 = 4;
const IN2_BIT_P2_LEFT: u8 = 5;
const IN2_BIT_P2_RIGHT: u8 = 6;
const IN2_BIT_COIN_INFO: u8 = 7;

const IN2_MASK_SHIPS_PER_CREDIT: u8 = 0x03;

/// DIP switch settings, read by the game through `IN 2`.
///
/// - `ships_per_credit`: 3 to 6, encoded in bits 0-1 as `value - 3`.
/// - `extra_ship_at_1000`: bonus ship at 1000 points instead of 1500 (bit 3).
/// - `show_coin_info`: the ROM treats bit 7 = 1 as "hide coin info".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DipConfig {
    pub ships_per_credit: u8,
    pub extra_ship_at_1000: bool,
    pub show_coin_info: bool,
}

impl Default for DipConfig {
    fn default() -> Self {
        Self {
            ships_per_credit: 3,
            extra_ship_at_1000: false,
            show_coin_info: true,
        }
    }
}

impl DipConfig {
    fn apply_to_port2(&self, in_port2: &mut u8) {
        *in_port2 &= !IN2_MASK_SHIPS_PER_CREDIT;
        *in_port2 &= !(1 << IN2_BIT_EXTRA_SHIP);
        *in_port2 &= !(1 << IN2_BIT_COIN_INFO);

        let ships = self.ships_per_credit.clamp(3, 6);
        *in_port2 |= (ships - 3) & IN2_MASK_SHIPS_PER_CREDIT;

        if self.extra_ship_at_1000 {
            *in_port2 |= 1 << IN2_BIT_EXTRA_SHIP;
        }
        if !self.show_coin_info {
            *in_port2 |= 1 << IN2_BIT_COIN_INFO;
        }
    }
}

/// Cabinet controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Coin,
    P1Start,
    P2Start,
    P1Fire,
    P1Left,
    P1Right,
    P2Fire,
    P2Left,
    P2Right,
    Tilt,
}

impl Button {
    /// Input port number and bit position.
    fn port_bit(self) -> (u8, u8) {
        match self {
            Button::Coin => (1, IN1_BIT_COIN),
            Button::P2Start => (1, IN1_BIT_P2_START),
            Button::P1Start => (1, IN1_BIT_P1_START),
            Button::P1Fire => (1, IN1_BIT_P1_FIRE),
            Button::P1Left => (1, IN1_BIT_P1_LEFT),
            Button::P1Right => (1, IN1_BIT_P1_RIGHT),
            Button::Tilt => (2, IN2_BIT_TILT),
            Button::P2Fire => (2, IN2_BIT_P2_FIRE),
            Button::P2Left => (2, IN2_BIT_P2_LEFT),
            Button::P2Right => (2, IN2_BIT_P2_RIGHT),
        }
    }
}

/// The I/O side of the board: inputs, DIP switches, shift register and the
/// sound/watchdog output latches.
#[derive(Clone, Debug)]
pub struct InvaderPorts {
    shift: ShiftRegister,
    in_port1: u8,
    in_port2: u8,
    out_port3: u8,
    out_port5: u8,
    dip: DipConfig,
}

impl InvaderPorts {
    pub fn new(dip: DipConfig) -> Self {
        let mut ports = Self {
            shift: ShiftRegister::new(),
            in_port1: 1 << IN1_BIT_ALWAYS_ONE,
            in_port2: 0,
            out_port3: 0,
            out_port5: 0,
            dip,
        };
        dip.apply_to_port2(&mut ports.in_port2);
        ports
    }

    /// Release every button and clear the latches. DIP switches are kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.dip);
    }

    pub fn press(&mut self, button: Button, pressed: bool) {
        let (port, bit) = button.port_bit();
        let target = match port {
            1 => &mut self.in_port1,
            _ => &mut self.in_port2,
        };
        set_input_bit(target, bit, pressed);
    }

    pub fn dip(&self) -> DipConfig {
        self.dip
    }

    pub fn shift_register(&self) -> &ShiftRegister {
        &self.shift
    }

    /// Current values of `IN 1` and `IN 2`.
    pub fn inputs(&self) -> (u8, u8) {
        (self.in_port1, self.in_port2)
    }

    /// Last values written to `OUT 3` and `OUT 5`.
    pub fn outputs(&self) -> (u8, u8) {
        (self.out_port3, self.out_port5)
    }

    /// Put back saved peripheral state. Port 1 bit 3 is forced on.
    pub fn restore(&mut self, shift: ShiftRegister, in_port1: u8, in_port2: u8) {
        self.shift = shift;
        self.in_port1 = in_port1 | (1 << IN1_BIT_ALWAYS_ONE);
        self.in_port2 = in_port2;
    }
}

impl Default for InvaderPorts {
    fn default() -> Self {
        Self::new(DipConfig::default())
    }
}

impl IoBus for InvaderPorts {
    fn machine_in(&mut self, port: u8) -> u8 {
        match port {
            0 => IN_PORT0_VALUE,
            1 => self.in_port1,
            2 => self.in_port2,
            3 => self.shift.result(),
            _ => {
                log::warn!("read from unmapped port {}", port);
                0
            }
        }
    }

    fn machine_out(&mut self, port: u8, value: u8) {
        match port {
            2 => self.shift.set_offset(value),
            3 => self.out_port3 = value,
            4 => self.shift.shift_in(value),
            5 => self.out_port5 = value,
            // watchdog
            6 => {}
            _ => log::warn!("write of {:02x} to unmapped port {}", value, port),
        }
    }
}

fn set_input_bit(port: &mut u8, bit: u8, pressed: bool) {
    let mask = 1 << bit;
    if pressed {
        *port |= mask;
    } else {
        *port &= !mask;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_port_values() {
        let mut ports = InvaderPorts::default();
        assert_eq!(ports.machine_in(0), 0x0e);
        assert_eq!(ports.machine_in(1), 0x08);
        assert_eq!(ports.machine_in(2), 0x00);
    }

    #[test]
    fn player_one_buttons_set_and_clear_bits() {
        let mut ports = InvaderPorts::default();

        ports.press(Button::P1Fire, true);
        assert_eq!(ports.machine_in(1), 0x08 | 0x10);
        ports.press(Button::P1Left, true);
        ports.press(Button::P1Right, true);
        assert_eq!(ports.machine_in(1), 0x08 | 0x10 | 0x20 | 0x40);

        ports.press(Button::P1Fire, false);
        ports.press(Button::P1Left, false);
        assert_eq!(ports.machine_in(1), 0x08 | 0x40);
    }

    #[test]
    fn coin_and_start_buttons() {
        let mut ports = InvaderPorts::default();
        ports.press(Button::Coin, true);
        ports.press(Button::P1Start, true);
        ports.press(Button::P2Start, true);
        assert_eq!(ports.machine_in(1), 0x08 | 0x01 | 0x04 | 0x02);
    }

    #[test]
    fn player_two_and_tilt_land_on_port_two() {
        let mut ports = InvaderPorts::default();
        ports.press(Button::P2Fire, true);
        ports.press(Button::P2Left, true);
        ports.press(Button::P2Right, true);
        ports.press(Button::Tilt, true);
        assert_eq!(ports.machine_in(2), 0x10 | 0x20 | 0x40 | 0x04);
        assert_eq!(ports.machine_in(1), 0x08);
    }

    #[test]
    fn dip_switches_encode_into_port_two() {
        let dip = DipConfig {
            ships_per_credit: 5,
            extra_ship_at_1000: true,
            show_coin_info: false,
        };
        let mut ports = InvaderPorts::new(dip);
        assert_eq!(ports.machine_in(2), 0x02 | 0x08 | 0x80);

        // Out-of-range ship counts clamp.
        let dip = DipConfig {
            ships_per_credit: 9,
            ..DipConfig::default()
        };
        assert_eq!(InvaderPorts::new(dip).machine_in(2), 0x03);
    }

    #[test]
    fn shift_register_through_ports() {
        let mut ports = InvaderPorts::default();
        ports.machine_out(4, 0xaa);
        ports.machine_out(4, 0xff);
        ports.machine_out(2, 0);
        assert_eq!(ports.machine_in(3), 0xff);
        ports.machine_out(2, 7);
        assert_eq!(ports.machine_in(3), 0xd5);
    }

    #[test]
    fn sound_latches_hold_last_write() {
        let mut ports = InvaderPorts::default();
        ports.machine_out(3, 0x02);
        ports.machine_out(5, 0x11);
        ports.machine_out(6, 0xff);
        assert_eq!(ports.outputs(), (0x02, 0x11));
    }

    #[test]
    fn unmapped_ports_read_zero() {
        let mut ports = InvaderPorts::default();
        assert_eq!(ports.machine_in(7), 0);
        ports.machine_out(9, 0x55);
        assert_eq!(ports.outputs(), (0, 0));
    }

    #[test]
    fn reset_releases_buttons_but_keeps_dip() {
        let dip = DipConfig {
            ships_per_credit: 4,
            ..DipConfig::default()
        };
        let mut ports = InvaderPorts::new(dip);
        ports.press(Button::Coin, true);
        ports.machine_out(4, 0x12);

        ports.reset();
        assert_eq!(ports.inputs(), (0x08, 0x01));
        assert_eq!(*ports.shift_register(), ShiftRegister::new());
    }
}
