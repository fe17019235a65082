//! Register Interface Tests.
//!
//! CCR masking and the generic device interface the scheduler uses to reach
//! the controller.

use hwcache_core::common::constants::{CCR_ENABLE, CCR_IRQ, CCR_MODE_WRITEBACK, CCR_OFFSET};
use hwcache_core::core::units::cache::WritePolicy;
use hwcache_core::soc::{CycleDevice, OpState};
use rstest::rstest;

use crate::common::harness::{CtrlContext, small_config};

/// Reserved mode-extension bit: stored in the register, never interpreted.
const RESERVED_MODE: u8 = 0x20;

#[rstest]
#[case::irq_kept(true, 0x19, 0x19)]
#[case::irq_masked(false, 0x19, 0x11)]
#[case::reserved_mode_bit_stored(true, 0x31, 0x31)]
#[case::reserved_mode_bit_stored_without_irq(false, 0x39, 0x31)]
#[case::all_modes(true, CCR_ENABLE | CCR_MODE_WRITEBACK | RESERVED_MODE, 0x31)]
fn ccr_write_is_masked(#[case] with_irq: bool, #[case] value: u8, #[case] expected: u8) {
    let mut ctx = if with_irq {
        CtrlContext::new(&small_config())
    } else {
        CtrlContext::without_irq(&small_config())
    };
    ctx.ctrl.set_ccr(value);
    assert_eq!(ctx.ctrl.ccr(), expected);
    assert_eq!(ctx.ctrl.state(), OpState::Enabled);
}

#[test]
fn reserved_mode_bit_does_not_select_writeback() {
    let mut ctx = CtrlContext::new(&small_config());
    ctx.ctrl.set_ccr(CCR_ENABLE | RESERVED_MODE);
    assert_eq!(ctx.ctrl.write_policy(), WritePolicy::WriteThrough);
}

#[test]
fn device_name() {
    let ctx = CtrlContext::new(&small_config());
    assert_eq!(ctx.ctrl.name(), "CACHE");
}

#[test]
fn register_window_reads_ccr() {
    let ctx = CtrlContext::new(&small_config());
    assert_eq!(ctx.ctrl.read_reg(CCR_OFFSET), ctx.ctrl.ccr());
    assert_eq!(ctx.ctrl.read_reg(CCR_OFFSET + 1), 0);
}

#[test]
fn register_window_writes_ccr() {
    let mut ctx = CtrlContext::new(&small_config());
    ctx.ctrl.write_reg(CCR_OFFSET + 5, 0x00);
    assert_eq!(ctx.ctrl.state(), OpState::Enabled);

    ctx.ctrl.write_reg(CCR_OFFSET, 0x00);
    assert_eq!(ctx.ctrl.state(), OpState::Disabled);
    assert_eq!(ctx.ctrl.read_reg(CCR_OFFSET), 0x00);
}

#[test]
fn tick_reports_hold() {
    let mut ctx = CtrlContext::new(&small_config());
    ctx.ctrl.write_reg(CCR_OFFSET, CCR_ENABLE | CCR_MODE_WRITEBACK | CCR_IRQ | 0x02);
    assert!(ctx.ctrl.tick());
    assert!(!ctx.ctrl.tick());
}

#[test]
fn controller_is_usable_as_trait_object() {
    let ctx = CtrlContext::new(&small_config());
    let device: &dyn CycleDevice = &ctx.ctrl;
    assert_eq!(device.name(), "CACHE");
    assert_eq!(device.read_reg(CCR_OFFSET) & CCR_ENABLE, CCR_ENABLE);
}

#[test]
fn debug_output_shows_register() {
    let ctx = CtrlContext::new(&small_config());
    let text = format!("{:?}", ctx.ctrl);
    assert!(text.starts_with("CacheController"), "{text}");
    assert!(text.contains("ccr: 0x19"), "{text}");
    assert!(text.contains("state: Enabled"), "{text}");
}

#[test]
fn irq_vector_is_configurable() {
    let config = hwcache_core::CacheConfig {
        irq_vector: 11,
        ..small_config()
    };
    let ctx = CtrlContext::new(&config);
    assert_eq!(ctx.ctrl.irq_vector(), 11);
}
