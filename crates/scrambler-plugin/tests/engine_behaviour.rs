//! End-to-end behaviour of the engine driven through the shared parameters.

use scrambler_plugin::{
    Preset, ProcessSpec, ProcessStatus, ReverbParam, ReverbParameters, ReverbProcessor,
};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK: usize = 256;

/// Deterministic white noise in [-0.5, 0.5).
struct Noise(u32);

impl Noise {
    fn next(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.0 >> 8) as f32 / (1u32 << 24) as f32 - 0.5
    }

    fn fill(&mut self, buf: &mut [f32]) {
        for s in buf.iter_mut() {
            *s = self.next();
        }
    }
}

fn energy(buf: &[f32]) -> f64 {
    buf.iter().map(|&s| f64::from(s) * f64::from(s)).sum()
}

fn prepared(params: &ReverbParameters) -> ReverbProcessor {
    let mut engine = ReverbProcessor::new(params.clone());
    engine.prepare(ProcessSpec::stereo(SAMPLE_RATE, BLOCK)).unwrap();
    engine
}

#[test]
fn silence_in_silence_out_for_every_preset() {
    for preset in Preset::ALL {
        let params = ReverbParameters::new();
        params.apply_preset(preset);
        let mut engine = prepared(&params);

        for _ in 0..200 {
            let mut left = [0.0f32; BLOCK];
            let mut right = [0.0f32; BLOCK];
            assert_eq!(engine.process_stereo(&mut left, &mut right), ProcessStatus::Processed);
            assert!(
                left.iter().chain(right.iter()).all(|&s| s == 0.0),
                "{preset} produced output from silence"
            );
        }
    }
}

#[test]
fn bounded_energy_over_1000_blocks_for_every_preset() {
    for (preset, max_ratio) in [
        (Preset::Default, 25.0),
        (Preset::SmallRoom, 25.0),
        (Preset::LargeHall, 100.0),
        (Preset::Cathedral, 100.0),
    ] {
        let params = ReverbParameters::new();
        params.apply_preset(preset);
        let mut engine = prepared(&params);
        let mut noise = Noise(7);

        let mut energy_in = 0.0;
        let mut energy_out = 0.0;
        let mut late_out = 0.0;
        for block in 0..1000 {
            let mut left = [0.0f32; BLOCK];
            let mut right = [0.0f32; BLOCK];
            noise.fill(&mut left);
            noise.fill(&mut right);
            energy_in += energy(&left) + energy(&right);

            let _ = engine.process_stereo(&mut left, &mut right);
            assert!(left.iter().chain(right.iter()).all(|s| s.is_finite()));

            let e = energy(&left) + energy(&right);
            energy_out += e;
            if block >= 900 {
                late_out += e;
            }
        }

        let ratio = energy_out / energy_in;
        assert!(ratio <= max_ratio, "{preset}: energy ratio {ratio} exceeds {max_ratio}");
        // The last 100 blocks must not carry more than their share: no runaway.
        assert!(
            late_out <= energy_out / 1000.0 * 100.0 * 2.0,
            "{preset}: energy still growing at the end of the run"
        );
    }
}

#[test]
fn two_engines_are_bit_identical() {
    let params_a = ReverbParameters::new();
    let params_b = ReverbParameters::new();
    let mut a = prepared(&params_a);
    let mut b = prepared(&params_b);
    let mut noise = Noise(99);

    for block in 0..200 {
        if block % 50 == 0 {
            let preset = Preset::ALL[(block / 50) % Preset::ALL.len()];
            params_a.apply_preset(preset);
            params_b.apply_preset(preset);
        }

        let mut left = [0.0f32; BLOCK];
        let mut right = [0.0f32; BLOCK];
        noise.fill(&mut left);
        noise.fill(&mut right);
        let (mut left_b, mut right_b) = (left, right);

        let _ = a.process_stereo(&mut left, &mut right);
        let _ = b.process_stereo(&mut left_b, &mut right_b);

        assert_eq!(left, left_b, "left diverged in block {block}");
        assert_eq!(right, right_b, "right diverged in block {block}");
    }
}

/// Render two engines from identical noise, writing `change` into the second
/// one's parameters before block `change_at`. Returns the first block whose
/// left channel differs, asserting nothing differs earlier.
fn first_divergent_block(
    change_at: usize,
    blocks: usize,
    change: impl Fn(&ReverbParameters),
) -> Option<usize> {
    let reference_params = ReverbParameters::new();
    let changed_params = ReverbParameters::new();
    let mut reference = prepared(&reference_params);
    let mut changed = prepared(&changed_params);
    let mut noise = Noise(3);

    for block in 0..blocks {
        if block == change_at {
            change(&changed_params);
        }

        let mut left = [0.0f32; BLOCK];
        let mut right = [0.0f32; BLOCK];
        noise.fill(&mut left);
        noise.fill(&mut right);
        let (mut left_c, mut right_c) = (left, right);

        let _ = reference.process_stereo(&mut left, &mut right);
        let _ = changed.process_stereo(&mut left_c, &mut right_c);

        if block < change_at {
            assert_eq!(left, left_c, "block {block} changed before the write");
        } else if left != left_c {
            return Some(block);
        }
    }
    None
}

#[test]
fn parameter_change_applies_at_next_block_boundary() {
    const CHANGE_AT: usize = 20;

    let first = first_divergent_block(CHANGE_AT, CHANGE_AT + 4, |params| {
        params.set(ReverbParam::WetLevel, 1.0);
        params.set(ReverbParam::DryLevel, 0.0);
    })
    .expect("parameter change never reached the output");
    assert!(first <= CHANGE_AT + 1, "change took effect only at block {first}");
}

#[test]
fn single_gain_change_is_heard_in_the_same_block() {
    const CHANGE_AT: usize = 20;

    let first = first_divergent_block(CHANGE_AT, CHANGE_AT + 4, |params| {
        params.set(ReverbParam::DryLevel, 0.0);
    })
    .expect("dry level change never reached the output");
    assert_eq!(first, CHANGE_AT);
}

#[test]
fn single_tank_change_is_heard_within_one_comb_length() {
    // Damping and room size only alter what is written into the combs, so
    // the change surfaces once the shortest comb (1116 samples at 44.1 kHz,
    // about 5 blocks here) has cycled.
    const CHANGE_AT: usize = 20;
    const MAX_LAG: usize = 8;

    for param in [ReverbParam::Damping, ReverbParam::RoomSize] {
        let first = first_divergent_block(CHANGE_AT, CHANGE_AT + MAX_LAG + 1, |params| {
            params.set(param, 1.0);
        })
        .unwrap_or_else(|| panic!("{param:?} change never reached the output"));
        assert!(
            first <= CHANGE_AT + MAX_LAG,
            "{param:?} change took effect only at block {first}"
        );
    }
}

#[test]
fn concurrent_writes_never_disturb_processing() {
    let params = ReverbParameters::new();
    let mut engine = prepared(&params);
    let writer_params = params.clone();

    std::thread::scope(|scope| {
        let writer = scope.spawn(move || {
            for i in 0..20_000u32 {
                let param = ReverbParam::ALL[(i % 5) as usize];
                // Includes out-of-range and NaN writes.
                let value = match i % 7 {
                    0 => f32::NAN,
                    1 => 5.0,
                    2 => -5.0,
                    _ => (i % 100) as f32 / 100.0,
                };
                writer_params.set(param, value);
                if i % 1000 == 0 {
                    writer_params.apply_preset(Preset::ALL[(i / 1000) as usize % 4]);
                }
            }
        });

        let mut noise = Noise(11);
        for _ in 0..400 {
            let settings = params.snapshot();
            for v in [
                settings.room_size,
                settings.damping,
                settings.wet_level,
                settings.dry_level,
                settings.width,
            ] {
                assert!((0.0..=1.0).contains(&v), "torn or unclamped value {v}");
            }

            let mut left = [0.0f32; BLOCK];
            let mut right = [0.0f32; BLOCK];
            noise.fill(&mut left);
            noise.fill(&mut right);
            assert_eq!(engine.process_stereo(&mut left, &mut right), ProcessStatus::Processed);
            assert!(left.iter().chain(right.iter()).all(|s| s.is_finite()));
        }

        writer.join().unwrap();
    });
}

#[test]
fn reprepare_with_new_rate_keeps_working() {
    let params = ReverbParameters::new();
    let mut engine = ReverbProcessor::new(params.clone());

    for (rate, channels) in [(44100.0, 2), (96000.0, 1), (22050.0, 2), (192000.0, 2)] {
        let spec = ProcessSpec {
            sample_rate: rate,
            max_block_size: BLOCK,
            num_channels: channels,
        };
        engine.prepare(spec).unwrap();

        let mut buf = vec![0.0f32; BLOCK * channels];
        buf[0] = 1.0;
        assert_eq!(engine.process_interleaved(&mut buf, channels), ProcessStatus::Processed);
        assert!(buf.iter().all(|s| s.is_finite()), "rate {rate}");
    }
}
