use crate::constants::NOISE_SECONDS;
use rand::Rng;

/// Number of frames in one looping noise buffer at `sample_rate`.
#[inline]
pub fn noise_len(sample_rate: f32) -> usize {
    (sample_rate * NOISE_SECONDS) as usize
}

/// Fill a fresh mono buffer with independent uniform samples in [-1, 1).
///
/// Every call draws new samples, so two layers built from two calls play
/// uncorrelated noise.
pub fn white_noise<R: Rng + ?Sized>(sample_rate: f32, rng: &mut R) -> Vec<f32> {
    let len = noise_len(sample_rate);
    let mut buf: Vec<f32> = Vec::with_capacity(len);
    for _ in 0..len {
        buf.push(rng.gen_range(-1.0_f32..1.0));
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn buffer_is_two_seconds_long() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(white_noise(48_000.0, &mut rng).len(), 96_000);
        assert_eq!(white_noise(44_100.0, &mut rng).len(), 88_200);
    }

    #[test]
    fn samples_are_in_half_open_unit_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let buf = white_noise(8_000.0, &mut rng);
        assert!(buf.iter().all(|s| *s >= -1.0 && *s < 1.0));
        // Uniform noise should be roughly zero-mean and use both halves of the range
        let mean = buf.iter().sum::<f32>() / buf.len() as f32;
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!(buf.iter().any(|s| *s < -0.9));
        assert!(buf.iter().any(|s| *s > 0.9));
    }

    #[test]
    fn consecutive_buffers_differ() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = white_noise(1_000.0, &mut rng);
        let b = white_noise(1_000.0, &mut rng);
        assert_ne!(a, b);
    }
}
