//! Basic disassembler usage example

use n8x305_dasm::{disassemble, DisassemblyOptions, LabelTable, RomImage};

fn main() {
    // A few hand-encoded microinstructions; the rest of the 1K ROM is zero
    let mut program = vec![0u16; 1024];
    let mut fast_io = vec![0u8; 1024];

    program[0] = 0xC000; // XMIT #$00, ,AUX
    program[1] = 0xCBF7; // XMIT #$F7, ,IVlD
    fast_io[1] = 0x28; //   ...with the VCR strobe
    program[2] = 0xBB05; // NZT IVr3,0,$0005
    fast_io[2] = 0x04; //   ...reading VSR2
    program[3] = 0xE010; // JMP $0010

    let rom = RomImage::new(program, fast_io).expect("1024 words and bytes");

    let labels = LabelTable::parse(
        "pc,label,comment\n\
         0000,RESET,Clear the accumulator\n\
         0010,IDLE,\n",
    )
    .expect("valid label table");

    let lines = disassemble(&rom, Some(&labels), DisassemblyOptions::default())
        .expect("no illegal encodings");

    println!("Disassembled microcode:");
    for line in lines.iter().take(4) {
        println!("{}", line);
    }
}
