//! # RAM and Handshake Tests
//!
//! Byte-lane writes, shifted reads, index wrapping, and the two-register
//! acknowledge pipeline shared by RAM and ROM.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvmini_core::common::Width;
use rvmini_core::soc::memory::{Handshake, Ram};
use rvmini_core::soc::traits::{BusRequest, BusTarget};

#[test]
fn handshake_acks_on_the_second_clock() {
    let mut hs = Handshake::new();
    assert!(!hs.clock(true));
    assert!(!hs.ack());
    assert!(hs.clock(true), "rising edge on the second clock");
    assert!(hs.ack());
    assert!(!hs.clock(true), "rising edge fires once per cycle");
    assert!(hs.ack());
    assert!(!hs.clock(false));
    assert!(!hs.ack());
}

#[test]
fn handshake_reset_drops_the_pipeline() {
    let mut hs = Handshake::new();
    let _ = hs.clock(true);
    hs.reset();
    assert!(!hs.clock(true));
    assert!(!hs.ack());
}

#[rstest]
#[case::byte0(0, Width::Byte, 0x1122_33EF)]
#[case::byte1(1, Width::Byte, 0x1122_EF44)]
#[case::byte3(3, Width::Byte, 0xEF22_3344)]
#[case::half0(0, Width::Half, 0x1122_BEEF)]
#[case::half1(1, Width::Half, 0x11BE_EF44)]
#[case::half2(2, Width::Half, 0xBEEF_3344)]
#[case::half3_ignored(3, Width::Half, 0x1122_3344)]
#[case::word0(0, Width::Word, 0xDEAD_BEEF)]
#[case::word1_ignored(1, Width::Word, 0x1122_3344)]
#[case::word2_ignored(2, Width::Word, 0x1122_3344)]
fn write_replaces_selected_lanes(#[case] offset: u32, #[case] width: Width, #[case] expected: u32) {
    let mut ram = Ram::new(4);
    ram.load_words(0, &[0x1122_3344]);
    ram.write(offset, 0xDEAD_BEEF, width);
    assert_eq!(ram.word(0), expected);
}

#[test]
fn read_shifts_the_addressed_byte_down() {
    let mut ram = Ram::new(4);
    ram.load_words(4, &[0xAABB_CCDD]);
    assert_eq!(ram.read(4), 0xAABB_CCDD);
    assert_eq!(ram.read(5), 0x00AA_BBCC);
    assert_eq!(ram.read(7), 0x0000_00AA);
}

#[test]
fn offsets_wrap_around_the_array() {
    let mut ram = Ram::new(2);
    ram.write(8, 0x1234_5678, Width::Word);
    assert_eq!(ram.word(0), 0x1234_5678);
    assert_eq!(ram.read(16), 0x1234_5678);
}

#[test]
fn sizes_and_bulk_loads() {
    let mut ram = Ram::new(16);
    assert_eq!(ram.len_words(), 16);
    assert_eq!(ram.size_bytes(), 64);

    ram.load_bytes(2, &[0xAA, 0xBB, 0xCC]);
    assert_eq!(ram.word(0), 0xBBAA_0000);
    assert_eq!(ram.word(4), 0x0000_00CC);
    assert_eq!(&ram.words()[..2], &[0xBBAA_0000, 0x0000_00CC]);
}

#[test]
fn zero_sized_ram_still_holds_a_word() {
    let ram = Ram::new(0);
    assert_eq!(ram.len_words(), 1);
}

#[test]
fn bus_read_acknowledges_after_two_clocks() {
    let mut ram = Ram::new(4);
    ram.load_words(0, &[0, 0xCAFE_BABE]);
    let req = BusRequest::read(4);

    ram.clock(&req);
    assert!(!ram.response().ack);
    ram.clock(&req);
    let resp = ram.response();
    assert!(resp.ack);
    assert_eq!(resp.data, 0xCAFE_BABE);

    ram.clock(&BusRequest::IDLE);
    assert!(!ram.response().ack);
}

#[test]
fn bus_write_commits_on_the_rising_edge_only() {
    let mut ram = Ram::new(4);
    let req = BusRequest::write(0, 0x5A, Width::Byte);

    ram.clock(&req);
    assert_eq!(ram.word(0), 0, "nothing written before the acknowledge");
    ram.clock(&req);
    assert_eq!(ram.word(0), 0x5A);

    // A held request does not write again.
    ram.load_words(0, &[0x1111_1111]);
    ram.clock(&req);
    assert_eq!(ram.word(0), 0x1111_1111);
}

#[test]
fn reset_clears_handshake_and_output() {
    let mut ram = Ram::new(4);
    ram.load_words(0, &[7]);
    let req = BusRequest::read(0);
    ram.clock(&req);
    ram.clock(&req);
    assert!(ram.response().ack);

    ram.reset();
    assert!(!ram.response().ack);
    assert_eq!(ram.response().data, 0);
    assert_eq!(ram.word(0), 7, "contents survive reset");
}

#[test]
fn ram_exposes_itself_for_inspection() {
    let mut ram = Ram::new(4);
    assert_eq!(ram.name(), "RAM");
    assert!(ram.as_ram().is_some());
    assert!(ram.as_ram_mut().is_some());
    assert!(ram.as_flash().is_none());
}
