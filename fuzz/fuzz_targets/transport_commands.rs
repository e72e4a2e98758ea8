#![no_main]

use libfuzzer_sys::fuzz_target;
use medley::core::PlayerCore;
use medley::model::Direction;
use std::path::PathBuf;

fuzz_target!(|data: &[u8]| {
    let mut core = PlayerCore::with_roots(
        PathBuf::from("fuzz-music-root"),
        PathBuf::from("fuzz-video-root"),
    );

    for byte in data {
        match byte % 8 {
            0 => core.select_next(),
            1 => core.select_prev(),
            2 => {
                let _ = core.skip(Direction::Forward);
            }
            3 => {
                let _ = core.skip(Direction::Back);
            }
            4 => core.toggle_looping(),
            5 => core.toggle_randomizing(),
            6 => core.cycle_screen(),
            _ => core.ascend(),
        }

        assert!(!(core.mode.is_looping() && core.mode.is_randomizing()));
        if let Some(state) = core.visible() {
            if let Some(selected) = state.selected {
                assert!(selected < state.entries.len());
            }
        }
    }
});
