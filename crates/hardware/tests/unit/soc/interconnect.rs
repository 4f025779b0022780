//! # Memory Router Tests
//!
//! Region lookup, offset translation, per-target grant arbitration and the
//! rule that only the granted bus observes an acknowledge.

use mockall::Sequence;
use pretty_assertions::assert_eq;
use rvmini_core::common::Width;
use rvmini_core::soc::interconnect::Region;
use rvmini_core::soc::memory::Ram;
use rvmini_core::soc::traits::{BusRequest, BusResponse};
use rvmini_core::soc::{BusKind, MemoryRouter};

use crate::common::mocks::target::MockTarget;

fn acking(data: u32) -> MockTarget {
    let mut mock = MockTarget::new();
    let _ = mock.expect_name().return_const("mock");
    let _ = mock
        .expect_response()
        .return_const(BusResponse { ack: true, data });
    let _ = mock.expect_clock().return_const(());
    mock
}

fn shared(target: MockTarget) -> MemoryRouter {
    let mut router = MemoryRouter::new();
    let idx = router.add_target(Box::new(target));
    router.map(BusKind::Instruction, 0x0, 0x1000, idx);
    router.map(BusKind::Data, 0x0, 0x1000, idx);
    router
}

#[test]
fn route_translates_to_local_offsets() {
    let mut router = MemoryRouter::new();
    let a = router.add_target(Box::new(MockTarget::silent()));
    let b = router.add_target(Box::new(MockTarget::silent()));
    router.map(BusKind::Instruction, 0x0, 0x100, a);
    router.map(BusKind::Data, 0x1000, 0x100, b);

    assert_eq!(router.route(BusKind::Instruction, 0x10), Some((a, 0x10)));
    assert_eq!(router.route(BusKind::Data, 0x1004), Some((b, 0x4)));
    assert_eq!(router.route(BusKind::Data, 0x10), None, "mapped on the other bus only");
    assert_eq!(router.route(BusKind::Instruction, 0x100), None);
    assert_eq!(router.len(), 2);
    assert!(!router.is_empty());
    assert_eq!(
        router.regions(BusKind::Data),
        [Region {
            base: 0x1000,
            size: 0x100,
            target: b
        }]
    );
}

#[test]
fn first_matching_region_wins() {
    let mut router = MemoryRouter::new();
    let a = router.add_target(Box::new(MockTarget::silent()));
    let b = router.add_target(Box::new(MockTarget::silent()));
    router.map(BusKind::Data, 0x0, 0x100, a);
    router.map(BusKind::Data, 0x80, 0x100, b);
    assert_eq!(router.route(BusKind::Data, 0x90), Some((a, 0x90)));
    assert_eq!(router.route(BusKind::Data, 0x100), Some((b, 0x80)));
}

#[test]
fn region_without_target_is_unmapped() {
    let mut router = MemoryRouter::new();
    router.map(BusKind::Data, 0x0, 0x100, 3);
    assert_eq!(router.route(BusKind::Data, 0x0), None);
    assert_eq!(
        router.response(BusKind::Data, &BusRequest::read(0x0)),
        BusResponse::default()
    );
    router.clock(&BusRequest::IDLE, &BusRequest::read(0x0));
}

#[test]
fn region_end_wraps_correctly() {
    let region = Region {
        base: 0xFFFF_FF00,
        size: 0x100,
        target: 0,
    };
    assert!(region.contains(0xFFFF_FFFC));
    assert!(!region.contains(0x0));
    assert!(!region.contains(0xFFFF_FEFF));
}

#[test]
fn clock_forwards_the_local_offset() {
    let mut target = MockTarget::new();
    let _ = target.expect_name().return_const("mock");
    let _ = target
        .expect_clock()
        .withf(|req| req.is_active() && req.addr == 0x4)
        .times(1)
        .return_const(());

    let mut router = MemoryRouter::new();
    let idx = router.add_target(Box::new(target));
    router.map(BusKind::Instruction, 0x2000_0000, 0x100, idx);
    router.clock(&BusRequest::read(0x2000_0004), &BusRequest::IDLE);
}

#[test]
fn only_the_granted_bus_sees_ack() {
    let router = shared(acking(0xABCD));
    let req = BusRequest::read(0x8);

    let iresp = router.response(BusKind::Instruction, &req);
    assert!(iresp.ack);
    assert_eq!(iresp.data, 0xABCD);
    assert_eq!(router.response(BusKind::Data, &req), BusResponse::default());
    assert_eq!(
        router.response(BusKind::Instruction, &BusRequest::IDLE),
        BusResponse::default(),
        "an idle request never sees an acknowledge"
    );
}

#[test]
fn unmapped_request_never_acks() {
    let router = shared(acking(1));
    assert!(!router.response(BusKind::Data, &BusRequest::read(0x4000_0000)).ack);
}

#[test]
fn grant_handover_costs_one_idle_tick() {
    let mut target = MockTarget::new();
    let _ = target.expect_name().return_const("mock");
    let mut seq = Sequence::new();
    let _ = target
        .expect_clock()
        .withf(|req| !req.is_active())
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    let _ = target
        .expect_clock()
        .withf(|req| req.is_active() && req.we && req.data == 0x55)
        .times(2)
        .in_sequence(&mut seq)
        .return_const(());

    let mut router = shared(target);
    let store = BusRequest::write(0x10, 0x55, Width::Word);

    assert_eq!(router.grant(0), Some(BusKind::Instruction));
    router.clock(&BusRequest::IDLE, &store);
    assert_eq!(router.grant(0), Some(BusKind::Data));

    // The data bus keeps the grant while it holds the cycle, even against a fetch.
    router.clock(&BusRequest::read(0x0), &store);
    router.clock(&BusRequest::read(0x0), &store);
    assert_eq!(router.grant(0), Some(BusKind::Data));
}

#[test]
fn grant_stays_with_last_owner() {
    let mut router = shared(MockTarget::silent());
    router.clock(&BusRequest::read(0x0), &BusRequest::read(0x4));
    assert_eq!(router.grant(0), Some(BusKind::Instruction));

    router.clock(&BusRequest::IDLE, &BusRequest::read(0x4));
    router.clock(&BusRequest::IDLE, &BusRequest::IDLE);
    assert_eq!(router.grant(0), Some(BusKind::Data));

    router.clock(&BusRequest::read(0x0), &BusRequest::read(0x4));
    assert_eq!(router.grant(0), Some(BusKind::Data));
    router.clock(&BusRequest::read(0x0), &BusRequest::IDLE);
    assert_eq!(router.grant(0), Some(BusKind::Instruction));
}

#[test]
fn reset_returns_grants_to_the_instruction_bus() {
    let mut target = MockTarget::silent();
    let _ = target.expect_reset().times(1).return_const(());
    let mut router = shared(target);

    router.clock(&BusRequest::IDLE, &BusRequest::read(0x0));
    assert_eq!(router.grant(0), Some(BusKind::Data));
    router.reset();
    assert_eq!(router.grant(0), Some(BusKind::Instruction));
}

#[test]
fn contended_ram_serves_fetch_then_store() {
    let mut router = MemoryRouter::new();
    let idx = router.add_target(Box::new(Ram::new(16)));
    router.map(BusKind::Instruction, 0x0, 0x40, idx);
    router.map(BusKind::Data, 0x0, 0x40, idx);

    let fetch = BusRequest::read(0x0);
    let store = BusRequest::write(0x8, 0x1234_5678, Width::Word);

    let mut ticks = 0;
    while !router.response(BusKind::Instruction, &fetch).ack {
        router.clock(&fetch, &store);
        ticks += 1;
    }
    assert_eq!(ticks, 2);
    assert!(!router.response(BusKind::Data, &store).ack);

    // Fetch completes; the store takes over after the handover tick.
    ticks = 0;
    while !router.response(BusKind::Data, &store).ack {
        router.clock(&BusRequest::IDLE, &store);
        ticks += 1;
        assert!(ticks < 8, "store never acknowledged");
    }
    assert_eq!(router.ram().map(|r| r.word(0x8)), Some(0x1234_5678));
}
