//! Fuzz target for the label table parser.
//!
//! Arbitrary text must either parse or fail with an error, never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use n8x305_dasm::LabelTable;

fuzz_target!(|text: &str| {
    if let Ok(table) = LabelTable::parse(text) {
        for entry in table.entries() {
            // lookup always finds some entry for a listed address
            assert!(table.lookup(entry.pc).is_some());
        }
    }
});
