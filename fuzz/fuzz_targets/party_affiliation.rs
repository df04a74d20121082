#![no_main]

use caucus_core::model::{Party, party_affiliation};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(name) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(party) = party_affiliation(name) {
        // A parsed code always round-trips through its string form.
        assert_eq!(Party::from(party.to_string()), party);
    }
});
