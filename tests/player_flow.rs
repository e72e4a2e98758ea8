use medley::audio::NullAudioEngine;
use medley::core::{Activation, PlayerCore};
use medley::playback::{PlaybackController, PlaybackEvent};
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;
use tempfile::{TempDir, tempdir};

fn write_test_wav(path: &Path, duration_ms: u32) {
    let sample_rate: u32 = 44_100;
    let channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let bytes_per_sample = u32::from(bits_per_sample / 8);
    let total_samples = (u64::from(sample_rate) * u64::from(duration_ms) / 1_000) as u32;
    let data_size = total_samples * u32::from(channels) * bytes_per_sample;
    let byte_rate = sample_rate * u32::from(channels) * bytes_per_sample;
    let block_align = channels * (bits_per_sample / 8);
    let riff_chunk_size = 36_u32.saturating_add(data_size);

    let mut bytes = Vec::with_capacity((44_u32 + data_size) as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&riff_chunk_size.to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16_u32.to_le_bytes());
    bytes.extend_from_slice(&1_u16.to_le_bytes());
    bytes.extend_from_slice(&channels.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&bits_per_sample.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_size.to_le_bytes());
    bytes.resize((44_u32 + data_size) as usize, 0_u8);

    fs::write(path, bytes).expect("wav fixture should be written");
}

fn null_controller() -> PlaybackController {
    PlaybackController::new(Box::new(NullAudioEngine::new()))
}

fn media_library() -> TempDir {
    let dir = tempdir().expect("tempdir");
    write_test_wav(&dir.path().join("first.wav"), 2_000);
    write_test_wav(&dir.path().join("second.wav"), 2_000);
    fs::create_dir(dir.path().join("albums")).expect("create folder");
    write_test_wav(&dir.path().join("albums").join("nested.wav"), 2_000);
    dir
}

fn select_by_name(core: &mut PlayerCore, name: &str) {
    let index = core
        .music
        .entries
        .iter()
        .position(|entry| entry.name == name)
        .unwrap_or_else(|| panic!("entry {name} should be listed"));
    core.music.selected = Some(index);
}

#[test]
fn activating_a_file_starts_a_session_for_it() {
    let library = media_library();
    let other = tempdir().expect("tempdir");
    let mut core = PlayerCore::with_roots(library.path().to_path_buf(), other.path().to_path_buf());
    let mut playback = null_controller();

    select_by_name(&mut core, "first.wav");
    let Activation::Play(path) = core.activate_selected() else {
        panic!("a file entry should activate into playback");
    };
    playback.load(&path).expect("load");

    assert!(playback.is_playing());
    assert_eq!(playback.current_path(), Some(library.path().join("first.wav").as_path()));
    let (_, total) = playback.progress().expect("progress");
    assert!(total.expect("duration") >= Duration::from_millis(1_900));
}

#[test]
fn activating_a_folder_descends_into_it() {
    let library = media_library();
    let other = tempdir().expect("tempdir");
    let mut core = PlayerCore::with_roots(library.path().to_path_buf(), other.path().to_path_buf());

    select_by_name(&mut core, "albums");
    assert_eq!(core.activate_selected(), Activation::Descended);

    let visible = core.visible().expect("visible category");
    assert_eq!(visible.dir, library.path().join("albums"));
    assert!(visible.entries.iter().any(|entry| entry.name == "nested.wav"));

    core.ascend();
    assert_eq!(core.visible().expect("visible category").dir, library.path());
}

#[test]
fn replacing_a_session_silences_the_predecessor() {
    let library = media_library();
    let first = library.path().join("first.wav");
    let second = library.path().join("second.wav");
    let mut playback = null_controller();

    playback.load(&second).expect("load second");
    thread::sleep(Duration::from_millis(60));
    let (elapsed_before, _) = playback.progress().expect("progress");
    assert!(elapsed_before >= Duration::from_millis(40));

    playback.load(&first).expect("load first");
    assert_eq!(playback.current_path(), Some(first.as_path()));
    let (elapsed_after, _) = playback.progress().expect("progress");
    assert!(
        elapsed_after < elapsed_before,
        "the new session must start its own clock"
    );
}

#[test]
fn completion_fires_once_and_a_restart_replays_the_track() {
    let dir = tempdir().expect("tempdir");
    let track = dir.path().join("short.wav");
    write_test_wav(&track, 80);

    let mut playback = null_controller();
    playback.load(&track).expect("load");
    thread::sleep(Duration::from_millis(120));

    assert_eq!(playback.poll(), Some(PlaybackEvent::Completed));
    assert_ne!(playback.poll(), Some(PlaybackEvent::Completed));

    // The loop-mode decision lives with the caller; restarting replays the
    // same session from zero and arms another completion.
    playback.restart().expect("restart");
    assert!(playback.is_playing());
    let (elapsed, _) = playback.progress().expect("progress");
    assert!(elapsed < Duration::from_millis(40));

    thread::sleep(Duration::from_millis(120));
    assert_eq!(playback.poll(), Some(PlaybackEvent::Completed));
}

#[test]
fn stopping_keeps_the_track_name_for_display() {
    let library = media_library();
    let first = library.path().join("first.wav");
    let mut playback = null_controller();

    playback.load(&first).expect("load");
    playback.stop();

    assert!(!playback.is_playing());
    assert_eq!(playback.current_path(), Some(first.as_path()));
    assert_eq!(playback.poll(), None);
}
