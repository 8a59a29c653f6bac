//! Tests for the frame layout.

use super::frame::*;
use super::task::GpRegisters;
use core::mem::{offset_of, size_of};

#[test]
fn layout_constants() {
    assert_eq!(EIP_OFFSET, 0);
    assert_eq!(CS_OFFSET, 4);
    assert_eq!(FLAGS_OFFSET, 6);
    assert_eq!(FRAME_SIZE, 10);
    assert_eq!(GP_SIZE, 32);
}

#[test]
fn register_block_matches_pusha_order() {
    assert_eq!(size_of::<GpRegisters>(), 32);
    assert_eq!(offset_of!(GpRegisters, edi), 0);
    assert_eq!(offset_of!(GpRegisters, esi), 4);
    assert_eq!(offset_of!(GpRegisters, ebp), 8);
    assert_eq!(offset_of!(GpRegisters, esp), 12);
    assert_eq!(offset_of!(GpRegisters, ebx), 16);
    assert_eq!(offset_of!(GpRegisters, edx), 20);
    assert_eq!(offset_of!(GpRegisters, ecx), 24);
    assert_eq!(offset_of!(GpRegisters, eax), 28);
}

#[test]
fn write_produces_the_packed_layout() {
    let mut buf = [0u8; FRAME_SIZE];
    let top = buf.as_mut_ptr() as usize + FRAME_SIZE;

    let esp = unsafe { write(top, 0xAABB_CCDD, 0x0008, 0x0000_0246) };
    assert_eq!(esp, top - FRAME_SIZE);
    assert_eq!(buf[0..4], 0xAABB_CCDDu32.to_le_bytes());
    assert_eq!(buf[4..6], 0x0008u16.to_le_bytes());
    assert_eq!(buf[6..10], 0x0000_0246u32.to_le_bytes());
}

#[test]
fn read_recovers_what_write_stored() {
    let mut buf = [0u8; FRAME_SIZE];
    let top = buf.as_mut_ptr() as usize + FRAME_SIZE;

    let esp = unsafe { write(top, 0x0010_1234, 0x0010, 0x0000_0A96) };
    let (eip, cs, eflags) = unsafe { read(esp) };
    assert_eq!(eip, 0x0010_1234);
    assert_eq!(cs, 0x0010);
    assert_eq!(eflags, 0x0000_0A96);
}

#[test]
fn register_block_roundtrips() {
    let regs = GpRegisters {
        edi: 0x1111_1111,
        esi: 0x2222_2222,
        ebp: 0x3333_3333,
        esp: 0x4444_4444,
        ebx: 0x5555_5555,
        edx: 0x6666_6666,
        ecx: 0x7777_7777,
        eax: 0x8888_8888,
    };
    let mut buf = [0u8; GP_SIZE];
    let top = buf.as_mut_ptr() as usize + GP_SIZE;

    let esp = unsafe { write_registers(top, &regs) };
    assert_eq!(esp, top - GP_SIZE);
    // Lowest address first, per PUSHA.
    assert_eq!(buf[0..4], 0x1111_1111u32.to_le_bytes());
    assert_eq!(buf[28..32], 0x8888_8888u32.to_le_bytes());
    assert_eq!(unsafe { read_registers(esp) }, regs);
}
