use super::*;

fn clock(total: f64) -> PlaybackClock {
    PlaybackClock::new(total, Duration::from_millis(100), 0.1, 16.0)
}

#[test]
fn new_clock_is_stopped_at_zero() {
    let c = clock(10.0);
    assert_eq!(c.mode(), PlaybackMode::Stopped);
    assert_eq!(c.current_time_sec(), 0.0);
    assert_eq!(c.speed(), 1.0);
    assert!(!c.is_playing());
}

#[test]
fn play_toggles_pause() {
    let mut c = clock(10.0);
    c.play();
    assert_eq!(c.mode(), PlaybackMode::Playing);
    c.tick();
    c.play();
    assert_eq!(c.mode(), PlaybackMode::Paused);
    assert!((c.current_time_sec() - 0.1).abs() < 1e-12);
    c.play();
    assert_eq!(c.mode(), PlaybackMode::Playing);
}

#[test]
fn playback_reaches_end_and_pauses() {
    let mut c = clock(10.0);
    c.play();
    let mut ticks = 0;
    while c.is_playing() {
        c.tick();
        ticks += 1;
        assert!(c.current_time_sec() <= 10.0);
        assert!(ticks < 1_000);
    }
    assert_eq!(c.current_time_sec(), 10.0);
    assert_eq!(c.mode(), PlaybackMode::Paused);
    assert!((100..=101).contains(&ticks));
}

#[test]
fn ticks_do_nothing_unless_playing() {
    let mut c = clock(10.0);
    assert!(!c.tick());
    assert_eq!(c.advance(Duration::from_secs(3)), 0);
    assert_eq!(c.current_time_sec(), 0.0);
}

#[test]
fn stop_cancels_and_rewinds() {
    let mut c = clock(10.0);
    c.play();
    c.advance(Duration::from_millis(550));
    c.stop();
    assert_eq!(c.mode(), PlaybackMode::Stopped);
    assert_eq!(c.current_time_sec(), 0.0);
    assert_eq!(c.advance(Duration::from_secs(1)), 0);
    assert_eq!(c.current_time_sec(), 0.0);
}

#[test]
fn advance_carries_partial_periods() {
    let mut c = clock(10.0);
    c.play();
    assert_eq!(c.advance(Duration::from_millis(250)), 2);
    assert_eq!(c.advance(Duration::from_millis(50)), 1);
    assert!((c.current_time_sec() - 0.3).abs() < 1e-9);
}

#[test]
fn seek_clamps_in_any_mode() {
    let mut c = clock(10.0);
    c.seek(4.0);
    assert_eq!(c.current_time_sec(), 4.0);
    assert_eq!(c.mode(), PlaybackMode::Paused);
    c.seek(-3.0);
    assert_eq!(c.current_time_sec(), 0.0);
    c.play();
    c.seek(99.0);
    assert_eq!(c.current_time_sec(), 10.0);
    assert!(c.is_playing());
}

#[test]
fn speed_scales_advance_without_reset() {
    let mut c = clock(100.0);
    c.play();
    c.advance(Duration::from_secs(1));
    assert!((c.current_time_sec() - 1.0).abs() < 1e-9);
    c.set_speed(2.0);
    assert!((c.current_time_sec() - 1.0).abs() < 1e-9);
    c.advance(Duration::from_secs(1));
    assert!((c.current_time_sec() - 3.0).abs() < 1e-9);
    c.set_speed(1000.0);
    assert_eq!(c.speed(), 16.0);
}

#[test]
fn shrinking_duration_reclamps_playhead() {
    let mut c = clock(60.0);
    c.seek(45.0);
    c.set_total_duration(30.0);
    assert_eq!(c.current_time_sec(), 30.0);
    c.set_total_duration(90.0);
    assert_eq!(c.current_time_sec(), 30.0);
}

#[test]
fn play_from_end_rewinds() {
    let mut c = clock(5.0);
    c.seek(5.0);
    c.play();
    assert!(c.is_playing());
    assert_eq!(c.current_time_sec(), 0.0);
}
