use emul8080_cpu::{CpuError, ManualClock, OpCode, MEMORY_SIZE};
use emul8080_invaders::{
    Button, InvaderMachine, MachineConfig, MachineSnapshot, SoundEffect, SoundEvent, SCREEN_HEIGHT,
    SCREEN_WIDTH,
};

fn machine_with(rom: &[u8]) -> InvaderMachine<ManualClock> {
    let mut machine = InvaderMachine::with_clock(MachineConfig::default(), ManualClock::new(0.0));
    machine.load_rom(rom).unwrap();
    // The first tick only records the start time.
    assert_eq!(machine.tick().unwrap(), 0);
    machine
}

/// Advance the clock and run one tick.
fn run_for(machine: &mut InvaderMachine<ManualClock>, us: f64) -> u32 {
    machine.clock().advance(us);
    machine.tick().unwrap()
}

#[test]
fn shift_register_through_the_cpu() {
    let rom = [
        0x3e, 0xaa, // MVI A,AA
        0xd3, 0x04, // OUT 4
        0x3e, 0xff, // MVI A,FF
        0xd3, 0x04, // OUT 4
        0x3e, 0x00, // MVI A,0
        0xd3, 0x02, // OUT 2
        0xdb, 0x03, // IN 3
        0x47, // MOV B,A
        0x3e, 0x07, // MVI A,7
        0xd3, 0x02, // OUT 2
        0xdb, 0x03, // IN 3
        0xc3, 0x15, 0x00, // JMP 0015
    ];
    let mut machine = machine_with(&rom);
    run_for(&mut machine, 200.0);

    let state = &machine.cpu().state;
    assert_eq!(state.regs.b, 0xff);
    assert_eq!(state.regs.a, 0xd5);
    assert_eq!(state.pc, 0x0015);
}

fn interrupt_counting_rom() -> Vec<u8> {
    let mut rom = vec![0u8; 0x13];
    rom[0x00..0x07].copy_from_slice(&[
        0x31, 0x00, 0x24, // LXI SP,2400
        0xfb, // EI
        0xc3, 0x04, 0x00, // JMP 0004
    ]);
    rom[0x08..0x0b].copy_from_slice(&[0x04, 0xfb, 0xc9]); // INR B; EI; RET
    rom[0x10..0x13].copy_from_slice(&[0x0c, 0xfb, 0xc9]); // INR C; EI; RET
    rom
}

#[test]
fn video_interrupts_alternate_on_wall_clock_time() {
    let mut machine = machine_with(&interrupt_counting_rom());

    // Ticks every millisecond for 40 ms. Vector 1 fires at 17 ms, vector 2
    // at 26 ms and vector 1 again at 35 ms.
    for _ in 0..40 {
        run_for(&mut machine, 1_000.0);
    }

    let state = &machine.cpu().state;
    assert_eq!(state.regs.b, 2);
    assert_eq!(state.regs.c, 1);
    assert_eq!(state.sp, 0x2400);
}

#[test]
fn interrupt_delays_come_from_config() {
    let config = MachineConfig::builder()
        .first_interrupt_delay_us(1_000.0)
        .interrupt_interval_us(1_000.0)
        .build();
    let mut machine = InvaderMachine::with_clock(config, ManualClock::new(0.0));
    machine.load_rom(&interrupt_counting_rom()).unwrap();
    machine.tick().unwrap();

    for _ in 0..10 {
        run_for(&mut machine, 600.0);
    }
    let state = &machine.cpu().state;
    assert!(state.regs.b >= 2, "b = {}", state.regs.b);
    assert!(state.regs.c >= 2, "c = {}", state.regs.c);
}

#[test]
fn crash_carries_a_snapshot_of_the_failing_state() {
    let rom = [
        0x31, 0x00, 0x24, // LXI SP,2400
        0x76, // HLT
    ];
    let mut machine = machine_with(&rom);
    machine.clock().advance(100.0);

    let crash = machine.tick().unwrap_err();
    assert_eq!(crash.error, CpuError::UnhandledOperation(OpCode::Hlt));
    assert_eq!(crash.snapshot.cpu.pc, 0x0003);
    assert_eq!(crash.snapshot.cpu.sp, 0x2400);
    assert_eq!(crash.snapshot.cpu.memory[0x0003], 0x76);
}

#[test]
fn rom_writes_crash_the_machine() {
    let rom = [
        0x3e, 0x01, // MVI A,1
        0x32, 0x00, 0x10, // STA 1000
    ];
    let mut machine = machine_with(&rom);
    machine.clock().advance(100.0);

    let crash = machine.tick().unwrap_err();
    assert_eq!(crash.error, CpuError::RomViolation(0x1000));
    assert_eq!(crash.snapshot.cpu.regs.a, 1);
}

#[test]
fn buttons_are_visible_to_in_1() {
    let rom = [
        0xdb, 0x01, // IN 1
        0x47, // MOV B,A
        0xc3, 0x00, 0x00, // JMP 0000
    ];
    let mut machine = machine_with(&rom);
    machine.press(Button::P1Fire, true);
    machine.press(Button::P1Left, true);
    run_for(&mut machine, 50.0);
    assert_eq!(machine.cpu().state.regs.b, 0x08 | 0x10 | 0x20);

    machine.press(Button::P1Fire, false);
    machine.press(Button::P1Left, false);
    run_for(&mut machine, 50.0);
    assert_eq!(machine.cpu().state.regs.b, 0x08);
}

#[test]
fn sound_outputs_produce_edge_events() {
    let rom = [
        0x3e, 0x02, // MVI A,2
        0xd3, 0x03, // OUT 3
        0xc3, 0x04, 0x00, // JMP 0004
    ];
    let mut machine = machine_with(&rom);
    run_for(&mut machine, 50.0);

    assert_eq!(machine.outputs(), (0x02, 0x00));
    assert_eq!(
        machine.drain_sound_events(),
        vec![SoundEvent {
            effect: SoundEffect::Fire,
            on: true
        }]
    );

    run_for(&mut machine, 50.0);
    assert!(machine.drain_sound_events().is_empty());
}

#[test]
fn snapshot_restores_into_a_fresh_machine() {
    let rom = [
        0x31, 0x00, 0x24, // LXI SP,2400
        0x3e, 0x5a, // MVI A,5A
        0x32, 0x00, 0x30, // STA 3000
        0xd3, 0x04, // OUT 4
        0xc3, 0x0a, 0x00, // JMP 000A
    ];
    let mut machine = machine_with(&rom);
    machine.press(Button::Coin, true);
    run_for(&mut machine, 100.0);

    let data = machine.snapshot().serialize();
    assert_eq!(data.len(), MachineSnapshot::SIZE);
    assert_eq!(data.len(), MEMORY_SIZE + 18);

    let snapshot = MachineSnapshot::deserialize(&data).unwrap();
    let mut restored =
        InvaderMachine::with_clock(MachineConfig::default(), ManualClock::new(0.0));
    restored.restore(&snapshot);

    assert_eq!(restored.cpu().state, machine.cpu().state);
    assert_eq!(restored.cpu().memory.read(0x3000), 0x5a);
    assert_eq!(restored.snapshot(), machine.snapshot());
}

#[test]
fn reset_keeps_rom_and_restarts_at_zero() {
    let rom = [0xc3, 0x00, 0x00];
    let mut machine = machine_with(&rom);
    machine.cpu_mut().state.pc = 0x1234;
    machine.press(Button::Coin, true);

    machine.reset();
    assert_eq!(machine.cpu().state.pc, 0);
    assert_eq!(machine.cpu().memory.read(0), 0xc3);
    assert_eq!(machine.snapshot().in_port1, 0x08);
}

#[test]
fn oversized_rom_is_rejected() {
    let mut machine = InvaderMachine::with_clock(MachineConfig::default(), ManualClock::new(0.0));
    let rom = vec![0u8; MEMORY_SIZE + 1];
    assert_eq!(
        machine.load_rom(&rom),
        Err(CpuError::RomTooLarge(MEMORY_SIZE + 1))
    );
}

#[test]
fn frame_buffer_is_one_bit_per_pixel() {
    let machine = InvaderMachine::with_clock(MachineConfig::default(), ManualClock::new(0.0));
    assert_eq!(machine.video_memory().len(), SCREEN_WIDTH * SCREEN_HEIGHT / 8);
}
