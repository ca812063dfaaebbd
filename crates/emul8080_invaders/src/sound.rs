//! Discrete sound triggers.
//!
//! The board has no sound chip: each bit of `OUT 3` and `OUT 5` switches an
//! analog circuit on or off. Nothing is synthesized here; the latch only
//! reports which effects changed state so a host can play samples.

/// Logical identifiers for the discrete audio outputs.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SoundEffect {
    Ufo,
    Fire,
    PlayerDies,
    InvaderDies,
    Invader1,
    Invader2,
    Invader3,
    Invader4,
    UfoHit,
}

/// A sound switched on or off.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SoundEvent {
    pub effect: SoundEffect,
    pub on: bool,
}

/// Output port and bit that drive each effect.
const SOUND_BITS: &[(SoundEffect, u8, u8)] = &[
    (SoundEffect::Ufo, 3, 0),
    (SoundEffect::Fire, 3, 1),
    (SoundEffect::PlayerDies, 3, 2),
    (SoundEffect::InvaderDies, 3, 3),
    (SoundEffect::Invader1, 5, 0),
    (SoundEffect::Invader2, 5, 1),
    (SoundEffect::Invader3, 5, 2),
    (SoundEffect::Invader4, 5, 3),
    (SoundEffect::UfoHit, 5, 4),
];

/// Edge detector over the two sound output ports.
#[derive(Clone, Copy, Debug, Default)]
pub struct SoundLatch {
    out3: u8,
    out5: u8,
}

impl SoundLatch {
    /// Compare against the previous port values and report every bit that
    /// toggled.
    pub fn update(&mut self, out3: u8, out5: u8) -> Vec<SoundEvent> {
        let mut events = Vec::new();

        for &(effect, port, bit) in SOUND_BITS {
            let (before, after) = match port {
                3 => (self.out3, out3),
                _ => (self.out5, out5),
            };
            let mask = 1 << bit;
            let on = after & mask != 0;
            if on != (before & mask != 0) {
                events.push(SoundEvent { effect, on });
            }
        }

        self.out3 = out3;
        self.out5 = out5;
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_rising_and_falling_edges_once() {
        let mut latch = SoundLatch::default();

        assert_eq!(
            latch.update(0x02, 0x00),
            vec![SoundEvent {
                effect: SoundEffect::Fire,
                on: true
            }]
        );
        assert!(latch.update(0x02, 0x00).is_empty());
        assert_eq!(
            latch.update(0x00, 0x10),
            vec![
                SoundEvent {
                    effect: SoundEffect::Fire,
                    on: false
                },
                SoundEvent {
                    effect: SoundEffect::UfoHit,
                    on: true
                },
            ]
        );
    }

    #[test]
    fn unused_bits_are_ignored() {
        let mut latch = SoundLatch::default();
        assert!(latch.update(0xf0, 0xe0).is_empty());
    }
}
