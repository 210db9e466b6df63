use rand::{rngs::StdRng, Rng, SeedableRng};
use sim86_dasm::prelude::*;

/// Append one randomly chosen, validly encoded instruction to `image` and
/// return its encoded length.
fn push_random_instruction(rng: &mut StdRng, image: &mut Vec<u8>) -> usize {
    match rng.random_range(0..5) {
        0 => {
            // mov imm16 to register
            let reg: u8 = rng.random_range(0..8);
            image.push(0xB8 | reg);
            image.extend_from_slice(&rng.random::<u16>().to_le_bytes());
            3
        }
        1 => {
            // mov imm8 to register
            let reg: u8 = rng.random_range(0..8);
            image.push(0xB0 | reg);
            image.push(rng.random());
            2
        }
        2 => {
            // mov/add/sub/cmp register/memory with register
            const OPCODES: [u8; 16] = [
                0x88, 0x89, 0x8A, 0x8B, 0x00, 0x01, 0x02, 0x03, 0x28, 0x29, 0x2A, 0x2B, 0x38,
                0x39, 0x3A, 0x3B,
            ];
            image.push(OPCODES[rng.random_range(0..OPCODES.len())]);
            1 + push_random_modrm(rng, image)
        }
        3 => {
            // arithmetic immediate to register (sign-extended byte form)
            const REG_FIELDS: [u8; 3] = [0b000, 0b101, 0b111];
            image.push(0x83);
            let reg_field = REG_FIELDS[rng.random_range(0..REG_FIELDS.len())];
            let rm: u8 = rng.random_range(0..8);
            image.push(0b11_000_000 | (reg_field << 3) | rm);
            image.push(rng.random());
            3
        }
        _ => {
            // conditional or loop jump
            const OPCODES: [u8; 8] = [0x74, 0x75, 0x78, 0x79, 0xE0, 0xE1, 0xE2, 0xE3];
            image.push(OPCODES[rng.random_range(0..OPCODES.len())]);
            image.push(rng.random());
            2
        }
    }
}

/// Push a modrm byte plus its displacement. Direct addressing (`mod=00,
/// rm=110`) is excluded: its stored length depends on which operand side it
/// lands on, so it has no single expected length here.
fn push_random_modrm(rng: &mut StdRng, image: &mut Vec<u8>) -> usize {
    let b_mod: u8 = rng.random_range(0..4);
    let reg: u8 = rng.random_range(0..8);
    let mut rm: u8 = rng.random_range(0..8);
    if b_mod == 0b00 && rm == 0b110 {
        rm = 0b111;
    }
    image.push((b_mod << 6) | (reg << 3) | rm);
    match b_mod {
        0b01 => {
            image.push(rng.random());
            2
        }
        0b10 => {
            image.extend_from_slice(&rng.random::<u16>().to_le_bytes());
            3
        }
        _ => 1,
    }
}

#[test]
fn random_streams_decode_with_exact_accounting() {
    let mut rng = StdRng::seed_from_u64(0x8086);

    for _ in 0..200 {
        let count = rng.random_range(1..40);
        let mut image = Vec::new();
        let mut lengths = Vec::new();
        for _ in 0..count {
            lengths.push(push_random_instruction(&mut rng, &mut image));
        }

        let instructions = decode(&image).expect("valid stream decodes");
        assert_eq!(instructions.len(), count);

        let mut offset = 0;
        for (ins, expected_len) in instructions.iter().zip(&lengths) {
            assert_eq!(ins.byte_offset, offset);
            assert_eq!(ins.byte_len(), *expected_len);
            offset += ins.byte_len();
        }
        assert_eq!(offset, image.len());

        // Rendering is a pure function of the record.
        for ins in &instructions {
            assert_eq!(format_instruction(ins, &FormatOptions::default()), ins.text);
        }
    }
}

#[test]
fn register_mov_listing_round_trips_text() {
    let image = [
        0xB8u8, 0x01, 0x00, // mov ax, 1
        0xBB, 0x02, 0x00,   // mov bx, 2
        0x89, 0xC4,         // mov sp, ax
        0x89, 0xDD,         // mov bp, bx
        0x89, 0xE2,         // mov dx, sp
    ];
    let instructions = decode(&image).unwrap();
    let texts: Vec<&str> = instructions.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "mov ax, 1",
            "mov bx, 2",
            "mov sp, ax",
            "mov bp, bx",
            "mov dx, sp",
        ]
    );
}

#[test]
fn direct_address_destination_stores_both_displacement_bytes() {
    let instructions = decode(&[0x89, 0x0E, 0x05, 0x00]).unwrap();
    assert_eq!(instructions.len(), 1);
    assert_eq!(instructions[0].text, "mov [bp + 5], cx");
    assert_eq!(instructions[0].byte_len(), 4);
    assert_eq!(instructions[0].displacement_bytes, vec![0x05, 0x00]);
}

#[test]
fn direct_address_source_keeps_second_displacement_byte_in_stream() {
    // The direct-address row renders through bp and, on the source side,
    // stores only the first displacement byte; the second byte (0x00 here)
    // begins the next instruction.
    let image = [0x8Bu8, 0x2E, 0x05, 0x00, 0xD8];
    let instructions = decode(&image).unwrap();
    let texts: Vec<&str> = instructions.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, vec!["mov bp, [bp + 5]", "add al, bl"]);
    assert_eq!(instructions[0].byte_len(), 3);
    assert_eq!(instructions[0].displacement_bytes, vec![0x05, 0x00]);
    assert_eq!(instructions[1].byte_offset, 3);
}
