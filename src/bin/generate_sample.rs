//! Generates a deterministic sample dataset so the dashboard can be tried
//! without the real `NewData.xlsx`.
//!
//! Layout matches the real file: no header row, one row per state, 13 value
//! columns for 2011–2023.
//!
//! Run with: `cargo run --bin generate_sample`

use anyhow::{Context, Result};

const OUTPUT: &str = "NewData.csv";

const STATES: [&str; 32] = [
    "Aguascalientes",
    "Baja California",
    "Baja California Sur",
    "Campeche",
    "Chiapas",
    "Chihuahua",
    "Ciudad de México",
    "Coahuila",
    "Colima",
    "Durango",
    "Estado de México",
    "Guanajuato",
    "Guerrero",
    "Hidalgo",
    "Jalisco",
    "Michoacán",
    "Morelos",
    "Nayarit",
    "Nuevo León",
    "Oaxaca",
    "Puebla",
    "Querétaro",
    "Quintana Roo",
    "San Luis Potosí",
    "Sinaloa",
    "Sonora",
    "Tabasco",
    "Tamaulipas",
    "Tlaxcala",
    "Veracruz",
    "Yucatán",
    "Zacatecas",
];

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

    /// Uniform in [0, 1).
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(2011);
    let mut writer =
        csv::Writer::from_path(OUTPUT).with_context(|| format!("creating {OUTPUT}"))?;

    for state in STATES {
        // Per-state base incidence with a mild multi-year trend and noise.
        let base = 400.0 + 1800.0 * rng.next_f64();
        let trend = -30.0 + 60.0 * rng.next_f64();

        let mut record = vec![state.to_string()];
        for offset in 0..13 {
            let noise = (rng.next_f64() - 0.5) * 0.2 * base;
            let value = (base + trend * offset as f64 + noise).max(0.0);
            record.push(format!("{value:.0}"));
        }
        writer
            .write_record(&record)
            .with_context(|| format!("writing row for {state}"))?;
    }
    writer.flush().context("flushing output")?;

    println!("wrote {} rows to {OUTPUT}", STATES.len());
    Ok(())
}
