//! Horizontal shake played on the URL field after a failed generate.

/// How long the shake lasts, in seconds.
pub const SHAKE_DURATION: f64 = 0.4;

const AMPLITUDE: f32 = 6.0;
const OSCILLATIONS: f64 = 4.0;

/// Offset in points for a shake that started at `started`, or `None` once it is over.
///
/// The result stays within `-AMPLITUDE..=AMPLITUDE` and decays to zero.
pub fn shake_offset(started: f64, now: f64) -> Option<f32> {
    let elapsed = now - started;
    if !(0.0..SHAKE_DURATION).contains(&elapsed) {
        return None;
    }
    let progress = elapsed / SHAKE_DURATION;
    let wave = (progress * OSCILLATIONS * std::f64::consts::TAU).sin();
    Some((wave * (1.0 - progress)) as f32 * AMPLITUDE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shake_is_bounded_and_ends() {
        let mut t = 0.0;
        while t < SHAKE_DURATION {
            let offset = shake_offset(0.0, t).expect("still shaking");
            assert!(offset.abs() <= AMPLITUDE);
            t += 0.01;
        }
        assert_eq!(shake_offset(0.0, SHAKE_DURATION), None);
        assert_eq!(shake_offset(1.0, 0.5), None);
    }
}
