//! Integration tests for the audio sequencer

mod common;
use common::*;

use wakeup_light::{AudioSequencer, AudioStage};
use wakeup_light::audio::{COUNTDOWN_TRACK, NEXT_RETRY_MS, SUNRISE_TRACK};

type Sequencer = AudioSequencer<TestInstant>;

/// Drives the sequencer through the sunrise track.
fn finish_first_song(sequencer: &mut Sequencer, audio: &mut MockAudio) {
    sequencer.play_first_song(audio);
    audio.busy = true;
    sequencer.play_first_song(audio);
    audio.busy = false;
    sequencer.play_first_song(audio);
    assert!(sequencer.first_done());
}

fn finish_countdown(sequencer: &mut Sequencer, audio: &mut MockAudio) {
    finish_first_song(sequencer, audio);
    sequencer.play_countdown(audio);
    audio.busy = true;
    sequencer.play_countdown(audio);
    audio.busy = false;
    sequencer.play_countdown(audio);
    assert!(sequencer.countdown_done());
}

#[test]
fn first_song_is_issued_once() {
    let mut sequencer = Sequencer::new();
    let mut audio = MockAudio::new();

    for _ in 0..10 {
        sequencer.play_first_song(&mut audio);
    }
    assert_eq!(audio.commands(), &[AudioCommand::Play(SUNRISE_TRACK)]);
    assert_eq!(
        sequencer.stage(),
        AudioStage::PlayingFirst { confirmed: false }
    );
    assert!(sequencer.started());
    assert!(!sequencer.first_done());
}

#[test]
fn first_song_waits_while_module_is_busy() {
    let mut sequencer = Sequencer::new();
    let mut audio = MockAudio::new();
    audio.busy = true;

    sequencer.play_first_song(&mut audio);
    assert!(audio.commands().is_empty());
    assert!(!sequencer.started());

    audio.busy = false;
    sequencer.play_first_song(&mut audio);
    assert_eq!(audio.commands(), &[AudioCommand::Play(SUNRISE_TRACK)]);
}

#[test]
fn completion_needs_busy_then_idle() {
    let mut sequencer = Sequencer::new();
    let mut audio = MockAudio::new();
    sequencer.play_first_song(&mut audio);

    audio.busy = true;
    for _ in 0..5 {
        sequencer.play_first_song(&mut audio);
        assert!(!sequencer.first_done());
    }
    assert_eq!(
        sequencer.stage(),
        AudioStage::PlayingFirst { confirmed: true }
    );

    audio.busy = false;
    sequencer.play_first_song(&mut audio);
    assert_eq!(sequencer.stage(), AudioStage::FirstDone);
}

#[test]
fn countdown_track_follows_first_song() {
    let mut sequencer = Sequencer::new();
    let mut audio = MockAudio::new();

    sequencer.play_countdown(&mut audio);
    assert!(audio.commands().is_empty());

    finish_first_song(&mut sequencer, &mut audio);
    sequencer.play_countdown(&mut audio);
    sequencer.play_countdown(&mut audio);
    assert_eq!(
        audio.commands(),
        &[
            AudioCommand::Play(SUNRISE_TRACK),
            AudioCommand::Play(COUNTDOWN_TRACK)
        ]
    );
    assert!(sequencer.countdown_started());
    assert!(!sequencer.countdown_done());
}

#[test]
fn countdown_completes_on_falling_edge() {
    let mut sequencer = Sequencer::new();
    let mut audio = MockAudio::new();
    finish_countdown(&mut sequencer, &mut audio);
    assert_eq!(sequencer.stage(), AudioStage::CountdownDone);
    assert_eq!(sequencer.song_counter(), 1);
}

#[test]
fn jukebox_skips_to_next_on_every_finish() {
    let mut sequencer = Sequencer::new();
    let mut audio = MockAudio::new();
    finish_countdown(&mut sequencer, &mut audio);

    sequencer.play_next_when_finished(TestInstant(0), &mut audio);
    assert_eq!(audio.count(AudioCommand::Next), 1);

    for round in 2..=4 {
        audio.busy = true;
        sequencer.play_next_when_finished(TestInstant(0), &mut audio);
        sequencer.play_next_when_finished(TestInstant(0), &mut audio);
        assert_eq!(audio.count(AudioCommand::Next), round - 1);

        audio.busy = false;
        sequencer.play_next_when_finished(TestInstant(0), &mut audio);
        assert_eq!(audio.count(AudioCommand::Next), round);
    }
    // Sunrise is song 0, the countdown song 1
    assert_eq!(sequencer.song_counter(), 5);
}

#[test]
fn jukebox_does_not_reissue_before_track_starts() {
    let mut sequencer = Sequencer::new();
    let mut audio = MockAudio::new();
    finish_countdown(&mut sequencer, &mut audio);

    for _ in 0..10 {
        sequencer.play_next_when_finished(TestInstant(0), &mut audio);
    }
    assert_eq!(audio.count(AudioCommand::Next), 1);
    assert_eq!(
        sequencer.stage(),
        AudioStage::Advancing { confirmed: false }
    );
}

#[test]
fn jukebox_needs_finished_countdown() {
    let mut sequencer = Sequencer::new();
    let mut audio = MockAudio::new();
    finish_first_song(&mut sequencer, &mut audio);

    sequencer.play_next_when_finished(TestInstant(0), &mut audio);
    assert_eq!(audio.count(AudioCommand::Next), 0);
}

#[test]
fn stop_is_only_sent_after_a_command() {
    let mut sequencer = Sequencer::new();
    let mut audio = MockAudio::new();

    sequencer.stop(&mut audio);
    assert!(audio.commands().is_empty());

    sequencer.play_first_song(&mut audio);
    sequencer.stop(&mut audio);
    assert_eq!(audio.last_command(), Some(AudioCommand::Stop));
    assert_eq!(sequencer.stage(), AudioStage::Idle);
    assert!(!sequencer.started());
}

#[test]
fn stopped_sequencer_can_start_over() {
    let mut sequencer = Sequencer::new();
    let mut audio = MockAudio::new();
    finish_countdown(&mut sequencer, &mut audio);
    sequencer.stop(&mut audio);

    sequencer.play_first_song(&mut audio);
    assert_eq!(audio.last_command(), Some(AudioCommand::Play(SUNRISE_TRACK)));
    assert_eq!(sequencer.song_counter(), 0);
}

#[test]
fn jukebox_reissues_next_the_module_ignored() {
    let mut sequencer = Sequencer::new();
    let mut audio = MockAudio::new();
    finish_countdown(&mut sequencer, &mut audio);

    // The first "next" is lost: the module never goes busy.
    let mut now = 0;
    sequencer.play_next_when_finished(TestInstant(now), &mut audio);
    for _ in 0..9 {
        now += 100;
        sequencer.play_next_when_finished(TestInstant(now), &mut audio);
    }
    assert_eq!(audio.count(AudioCommand::Next), 1);

    now += 100;
    sequencer.play_next_when_finished(TestInstant(now), &mut audio);
    assert_eq!(now, NEXT_RETRY_MS);
    assert_eq!(audio.count(AudioCommand::Next), 2);

    // The retry is honored; no further retries while the track plays.
    audio.busy = true;
    for _ in 0..30 {
        now += 100;
        sequencer.play_next_when_finished(TestInstant(now), &mut audio);
    }
    assert_eq!(audio.count(AudioCommand::Next), 2);
    assert_eq!(
        sequencer.stage(),
        AudioStage::Advancing { confirmed: true }
    );

    audio.busy = false;
    now += 100;
    sequencer.play_next_when_finished(TestInstant(now), &mut audio);
    assert_eq!(audio.count(AudioCommand::Next), 3);
}

#[test]
fn jukebox_keeps_retrying_a_silent_module() {
    let mut sequencer = Sequencer::new();
    let mut audio = MockAudio::new();
    finish_countdown(&mut sequencer, &mut audio);

    for step in 0..=50u64 {
        sequencer.play_next_when_finished(TestInstant(step * 100), &mut audio);
    }
    // Issued at 0 s and retried every second up to 5 s.
    assert_eq!(audio.count(AudioCommand::Next), 6);
}
