//! Write a small sample CSV for trying the plotter by hand:
//! a day of noisy temperature readings with a few gaps.

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record(["hour", "temperature", "station"])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for hour in 0..24 {
        // Daily cycle: coolest around 04:00, warmest around 16:00.
        let phase = (hour as f64 - 16.0) / 24.0 * 2.0 * std::f64::consts::PI;
        let temperature = 15.0 + 7.0 * phase.cos() + rng.gauss(0.0, 0.4);

        // Leave a couple of readings missing so the null handling has
        // something to chew on.
        let reading = if hour == 7 || hour == 18 {
            String::new()
        } else {
            format!("{temperature:.2}")
        };

        writer
            .write_record([hour.to_string(), reading, "station_a".to_string()])
            .expect("Failed to write row");
        rows += 1;
    }
    writer.flush().expect("Failed to flush output file");

    println!("Wrote {rows} readings to {output_path}");
}
