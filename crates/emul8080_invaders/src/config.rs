use emul8080_cpu::{InterruptTimer, Scheduler, SystemClock, ROM_BOUNDARY};
use typed_builder::TypedBuilder;

use crate::ports::DipConfig;

/// Board configuration.
///
/// ```
/// use emul8080_invaders::{DipConfig, MachineConfig};
///
/// let config = MachineConfig::builder()
///     .cycles_per_us(2)
///     .dip(DipConfig { ships_per_credit: 5, ..DipConfig::default() })
///     .build();
/// assert_eq!(config.rom_boundary, 0x2000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, TypedBuilder)]
pub struct MachineConfig {
    /// Stores below this address fail.
    #[builder(default = ROM_BOUNDARY)]
    pub rom_boundary: u16,
    /// Upper bound on cycles run by one tick.
    #[builder(default = Scheduler::<SystemClock>::DEFAULT_MAX_CATCH_UP_CYCLES)]
    pub max_catch_up_cycles: u32,
    /// Emulated cycles per elapsed microsecond. The arcade CPU runs at
    /// 2 MHz; the default of 1 runs it at half speed.
    #[builder(default = 1)]
    pub cycles_per_us: u32,
    #[builder(default = InterruptTimer::DEFAULT_FIRST_DELAY_US)]
    pub first_interrupt_delay_us: f64,
    #[builder(default = InterruptTimer::DEFAULT_INTERVAL_US)]
    pub interrupt_interval_us: f64,
    #[builder(default)]
    pub dip: DipConfig,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
